//! Tree object
//!
//! Trees are directory snapshots: an ordered sequence of entries, each a
//! mode, a name and the id of the child object.
//!
//! ## Format
//!
//! Each entry on the wire: `<mode> <name>\0<20-byte-sha1>`
//!
//! Canonical trees are sorted by entry name before serialization, which is
//! what makes ids deterministic for identical directory contents. Sorting
//! is the writer's responsibility ([`Tree::from_entries`]); the decoder
//! preserves whatever order the payload carries.

use crate::artifacts::objects::object::{Packable, Unpackable};
use crate::artifacts::objects::object_id::ObjectId;
use crate::errors::{Error, Result};
use bytes::Bytes;
use derive_new::new;
use std::io::BufRead;

/// A single `(mode, name, child id)` tree entry
#[derive(Debug, Clone, PartialEq, Eq, new)]
pub struct TreeEntry {
    mode: String,
    name: String,
    oid: ObjectId,
}

impl TreeEntry {
    pub fn mode(&self) -> &str {
        &self.mode
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn oid(&self) -> &ObjectId {
        &self.oid
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Tree {
    entries: Vec<TreeEntry>,
}

impl Tree {
    /// Build a canonical tree: entries sorted by name ascending.
    pub fn from_entries(mut entries: Vec<TreeEntry>) -> Self {
        entries.sort_by(|a, b| a.name.cmp(&b.name));
        Tree { entries }
    }

    pub fn entries(&self) -> &[TreeEntry] {
        &self.entries
    }
}

impl Packable for Tree {
    fn serialize(&self) -> Result<Bytes> {
        let mut payload = Vec::new();

        for entry in &self.entries {
            payload.extend_from_slice(entry.mode.as_bytes());
            payload.push(b' ');
            payload.extend_from_slice(entry.name.as_bytes());
            payload.push(0);
            entry.oid.write_raw_to(&mut payload)?;
        }

        Ok(Bytes::from(payload))
    }
}

impl Unpackable for Tree {
    fn deserialize(mut reader: impl BufRead) -> Result<Self> {
        let mut entries = Vec::new();

        // reuse scratch buffers across entries
        let mut mode_bytes = Vec::new();
        let mut name_bytes = Vec::new();

        loop {
            mode_bytes.clear();
            let n = reader.read_until(b' ', &mut mode_bytes)?;
            if n == 0 {
                break; // clean EOF: payload exhausted
            }
            if mode_bytes.last() != Some(&b' ') {
                return Err(Error::Malformed(
                    "tree entry mode is missing its space terminator".to_string(),
                ));
            }
            mode_bytes.pop();
            let mode = std::str::from_utf8(&mode_bytes)
                .map_err(|_| Error::Malformed("tree entry mode is not ASCII".to_string()))?
                .to_owned();

            name_bytes.clear();
            let n = reader.read_until(b'\0', &mut name_bytes)?;
            if n == 0 || name_bytes.last() != Some(&b'\0') {
                return Err(Error::Malformed(
                    "tree entry name is missing its NUL terminator".to_string(),
                ));
            }
            name_bytes.pop();
            let name = std::str::from_utf8(&name_bytes)
                .map_err(|_| Error::Malformed("tree entry name is not UTF-8".to_string()))?
                .to_owned();

            // the 20 raw bytes right after the NUL are the child id
            let oid = ObjectId::read_raw_from(&mut reader)?;

            entries.push(TreeEntry::new(mode, name, oid));
        }

        Ok(Tree { entries })
    }
}
