//! Object database
//!
//! Objects are stored zlib-compressed at a path derived from their id: the
//! first two hex characters name a fan-out directory, the remaining 38 the
//! file. The stored bytes are the record `<type> <size>\0<payload>`, and
//! the id is the SHA-1 of that exact record, so storage is content
//! addressed: identical objects collapse to one file, and writing is
//! idempotent.

use crate::artifacts::objects::commit::Commit;
use crate::artifacts::objects::object::{GitObject, encode_record};
use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::objects::object_type::ObjectType;
use crate::errors::{Error, Result};
use bytes::Bytes;
use derive_new::new;
use std::io::{Read, Write};
use std::path::{Path, PathBuf};

#[derive(Debug, new)]
pub struct Database {
    /// Path to the objects directory (typically `.git/objects`)
    path: Box<Path>,
}

impl Database {
    pub fn objects_path(&self) -> &Path {
        &self.path
    }

    /// Serialize and hash an object, persisting it unless `persist` is
    /// false (a dry run still computes and returns the id).
    pub fn store(&self, object: &GitObject, persist: bool) -> Result<ObjectId> {
        let payload = object.serialize()?;
        let record = encode_record(object.object_type(), &payload);
        let oid = ObjectId::digest(&record);

        if persist {
            let object_path = self.path.join(oid.to_path());

            // content addressing makes an existing file byte-identical, so
            // a repeated write is a no-op
            if !object_path.exists() {
                self.write_object(object_path, record)?;
            }
        }

        Ok(oid)
    }

    /// Read, decompress, validate and decode the object stored under `oid`.
    pub fn load(&self, oid: &ObjectId) -> Result<GitObject> {
        let object_path = self.path.join(oid.to_path());
        if !object_path.exists() {
            return Err(Error::NotFound(oid.to_string()));
        }

        let compressed = std::fs::read(&object_path)?;
        let record = Self::decompress(compressed.into())?;

        let (object_type, payload) = Self::split_record(&record)?;
        GitObject::deserialize(object_type, payload)
    }

    /// `load`, then insist on the commit variant.
    pub fn load_commit(&self, oid: &ObjectId) -> Result<Commit> {
        match self.load(oid)? {
            GitObject::Commit(commit) => Ok(commit),
            _ => Err(Error::NotACommit(oid.to_string())),
        }
    }

    /// Parse `<type> <decimal-len>\0` off the front of a decompressed
    /// record and check the declared length against the actual payload.
    fn split_record(record: &[u8]) -> Result<(ObjectType, &[u8])> {
        let space_pos = record
            .iter()
            .position(|&b| b == b' ')
            .ok_or_else(|| Error::Malformed("record header has no space".to_string()))?;
        let nul_pos = record[space_pos..]
            .iter()
            .position(|&b| b == 0)
            .map(|p| p + space_pos)
            .ok_or_else(|| Error::Malformed("record header has no NUL".to_string()))?;

        let tag = std::str::from_utf8(&record[..space_pos])
            .map_err(|_| Error::Malformed("record type tag is not ASCII".to_string()))?;
        let declared_len = std::str::from_utf8(&record[space_pos + 1..nul_pos])
            .ok()
            .and_then(|len| len.parse::<usize>().ok())
            .ok_or_else(|| Error::Malformed("record length is not a decimal number".to_string()))?;

        let payload = &record[nul_pos + 1..];
        if declared_len != payload.len() {
            return Err(Error::Malformed(format!(
                "record declares {} payload bytes but carries {}",
                declared_len,
                payload.len()
            )));
        }

        Ok((ObjectType::try_from(tag)?, payload))
    }

    fn write_object(&self, object_path: PathBuf, record: Bytes) -> Result<()> {
        let object_dir = object_path
            .parent()
            .ok_or_else(|| Error::Malformed("object path has no parent".to_string()))?;
        std::fs::create_dir_all(object_dir)?;

        let compressed = Self::compress(record)?;

        // write to a temp name first, then rename into place so a reader
        // never observes a partial object
        let temp_object_path = object_dir.join(Self::generate_temp_name());
        let mut file = std::fs::OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(true)
            .open(&temp_object_path)?;
        file.write_all(&compressed)?;

        std::fs::rename(&temp_object_path, &object_path)?;

        Ok(())
    }

    fn compress(data: Bytes) -> Result<Bytes> {
        let mut encoder =
            flate2::write::ZlibEncoder::new(Vec::new(), flate2::Compression::default());
        encoder.write_all(&data)?;

        Ok(encoder.finish()?.into())
    }

    fn decompress(data: Bytes) -> Result<Bytes> {
        let mut decoder = flate2::read::ZlibDecoder::new(&*data);
        let mut decompressed = Vec::new();
        decoder
            .read_to_end(&mut decompressed)
            .map_err(|_| Error::Malformed("object file is not valid zlib data".to_string()))?;

        Ok(decompressed.into())
    }

    fn generate_temp_name() -> String {
        format!("tmp-obj-{}", rand::random::<u32>())
    }
}
