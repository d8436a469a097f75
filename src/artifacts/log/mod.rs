//! Commit history traversal
//!
//! - `rev_list`: lazy first-parent walk from a starting commit id

pub mod rev_list;
