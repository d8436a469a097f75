//! Plumbing commands (low-level operations)
//!
//! ## Commands
//!
//! - `cat-file`: print an object's payload
//! - `hash-object`: compute an object id, optionally storing the blob
//! - `ls-tree`: list the entries of a tree object
//! - `commit-tree`: create a commit object from a tree id
//! - `show-ref`: list references with their resolved ids
//! - `update-ref`: write a reference

pub mod cat_file;
pub mod commit_tree;
pub mod hash_object;
pub mod ls_tree;
pub mod show_ref;
pub mod update_ref;
