//! Crate-wide error kinds
//!
//! Every failure the core can produce maps to one of these variants. All of
//! them are synchronous, local failures; none is worth retrying.

use std::path::PathBuf;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The requested object is not present in the object database.
    #[error("object not found: {0}")]
    NotFound(String),

    /// An object record or payload failed to parse (bad header, length
    /// mismatch, missing terminator).
    #[error("malformed object: {0}")]
    Malformed(String),

    /// The record's type tag is not one of blob/tree/commit.
    #[error("unknown object type: {0}")]
    UnknownType(String),

    /// A commit was expected and another variant was found.
    #[error("object {0} is not a commit")]
    NotACommit(String),

    /// A name is neither a known reference nor a well-formed object id.
    #[error("not a valid object id: {0}")]
    InvalidId(String),

    /// Missing `.git` directory, or a config that is absent or declares an
    /// unsupported format version.
    #[error("invalid repository at {path}: {reason}")]
    InvalidRepository { path: PathBuf, reason: String },

    /// A symbolic reference chain revisited one of its own links.
    #[error("cyclic reference chain through {0}")]
    CyclicReference(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}
