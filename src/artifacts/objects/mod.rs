//! Object types and codecs
//!
//! Everything in the database is one of three object kinds, each serialized
//! to a payload and wrapped in a `<type> <size>\0` record:
//!
//! - **Blob**: raw file content
//! - **Tree**: directory listing (mode, name, object id per entry)
//! - **Commit**: ordered header fields plus a free-text message

pub mod blob;
pub mod commit;
pub mod object;
pub mod object_id;
pub mod object_type;
pub mod tree;

/// Length of a SHA-1 hash in hexadecimal format
pub const OBJECT_ID_LENGTH: usize = 40;
