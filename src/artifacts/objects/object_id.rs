//! Object identifier (SHA-1 hash)
//!
//! Object IDs are 40-character lowercase hexadecimal strings. Two objects
//! with identical serialized bytes share one id; that is the whole storage
//! model.
//!
//! ## Storage
//!
//! Objects live at `.git/objects/<first-2-chars>/<remaining-38-chars>`

use crate::artifacts::objects::OBJECT_ID_LENGTH;
use crate::errors::{Error, Result};
use sha1::{Digest, Sha1};
use std::io;
use std::path::PathBuf;

/// A validated 40-character hexadecimal object id
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ObjectId(String);

impl ObjectId {
    /// Parse and validate an object id from a string.
    ///
    /// Uppercase hex digits are folded to lowercase so equal hashes compare
    /// equal regardless of how the caller spelled them.
    pub fn try_parse(id: impl Into<String>) -> Result<Self> {
        let id = id.into();
        if id.len() != OBJECT_ID_LENGTH {
            return Err(Error::InvalidId(id));
        }
        if !id.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(Error::InvalidId(id));
        }
        Ok(Self(id.to_ascii_lowercase()))
    }

    /// Hash a full object record (`<type> <size>\0<payload>`).
    pub fn digest(record: &[u8]) -> Self {
        let mut hasher = Sha1::new();
        hasher.update(record);
        let hash = hasher.finalize();
        Self(format!("{hash:x}"))
    }

    /// Write the id in binary form (20 bytes), as tree entries store it.
    pub fn write_raw_to<W: io::Write>(&self, writer: &mut W) -> Result<()> {
        for i in (0..OBJECT_ID_LENGTH).step_by(2) {
            // both chars are known hexdigits, so this cannot fail
            let byte = u8::from_str_radix(&self.0[i..i + 2], 16)
                .map_err(|_| Error::Malformed(format!("invalid hex digit in id {}", self.0)))?;
            writer.write_all(&[byte])?;
        }

        Ok(())
    }

    /// Read an id from binary form (20 bytes).
    ///
    /// Fails with `Malformed` when fewer than 20 bytes remain, which is how
    /// a truncated tree entry surfaces.
    pub fn read_raw_from<R: io::Read + ?Sized>(reader: &mut R) -> Result<Self> {
        let mut hex40 = String::with_capacity(OBJECT_ID_LENGTH);
        let mut buffer = [0; 1];

        for _ in 0..(OBJECT_ID_LENGTH / 2) {
            reader
                .read_exact(&mut buffer)
                .map_err(|_| Error::Malformed("truncated binary object id".to_string()))?;
            hex40.push_str(&format!("{:02x}", buffer[0]));
        }

        Self::try_parse(hex40)
    }

    /// Fan-out path: `abc123...` becomes `ab/c123...`
    pub fn to_path(&self) -> PathBuf {
        let (dir, file) = self.0.split_at(2);
        PathBuf::from(dir).join(file)
    }

    /// First 7 characters, for human-facing display
    pub fn to_short_oid(&self) -> String {
        self.0.split_at(7).0.to_string()
    }
}

impl AsRef<str> for ObjectId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for ObjectId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
