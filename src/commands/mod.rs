//! Command implementations
//!
//! Thin methods on `Repository` that compose the core operations, organized
//! the way git splits its surface:
//!
//! - `plumbing`: direct object and reference manipulation
//! - `porcelain`: user-facing workflows

pub mod plumbing;
pub mod porcelain;
