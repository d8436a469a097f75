//! Data structures and algorithms
//!
//! - `objects`: the three object kinds (blob, tree, commit) and their codecs
//! - `log`: linear commit-history traversal

pub mod log;
pub mod objects;
