use crate::artifacts::objects::blob::Blob;
use crate::artifacts::objects::commit::Commit;
use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::objects::object_type::ObjectType;
use crate::artifacts::objects::tree::Tree;
use crate::errors::Result;
use bytes::Bytes;
use std::io::BufRead;

/// Serialize a typed object to its payload bytes.
pub trait Packable {
    fn serialize(&self) -> Result<Bytes>;
}

/// Parse a typed object back out of its payload bytes.
///
/// The `<type> <size>\0` record header has already been consumed and
/// validated by the database at this point; codecs see the payload only.
pub trait Unpackable {
    fn deserialize(reader: impl BufRead) -> Result<Self>
    where
        Self: Sized;
}

/// Closed set of storable object variants.
///
/// Decoding always goes through [`GitObject::deserialize`], keyed on the
/// record's type tag; an unrecognized tag is rejected before this point.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GitObject {
    Blob(Blob),
    Tree(Tree),
    Commit(Commit),
}

impl GitObject {
    pub fn object_type(&self) -> ObjectType {
        match self {
            GitObject::Blob(_) => ObjectType::Blob,
            GitObject::Tree(_) => ObjectType::Tree,
            GitObject::Commit(_) => ObjectType::Commit,
        }
    }

    pub fn serialize(&self) -> Result<Bytes> {
        match self {
            GitObject::Blob(blob) => blob.serialize(),
            GitObject::Tree(tree) => tree.serialize(),
            GitObject::Commit(commit) => commit.serialize(),
        }
    }

    /// Single decode entry point, dispatching on the parsed type tag.
    pub fn deserialize(object_type: ObjectType, payload: &[u8]) -> Result<Self> {
        match object_type {
            ObjectType::Blob => Ok(GitObject::Blob(Blob::deserialize(payload)?)),
            ObjectType::Tree => Ok(GitObject::Tree(Tree::deserialize(payload)?)),
            ObjectType::Commit => Ok(GitObject::Commit(Commit::deserialize(payload)?)),
        }
    }

    /// Id of this object: the SHA-1 of its full record bytes.
    pub fn object_id(&self) -> Result<ObjectId> {
        let payload = self.serialize()?;
        Ok(ObjectId::digest(&encode_record(
            self.object_type(),
            &payload,
        )))
    }
}

impl From<Blob> for GitObject {
    fn from(value: Blob) -> Self {
        GitObject::Blob(value)
    }
}

impl From<Tree> for GitObject {
    fn from(value: Tree) -> Self {
        GitObject::Tree(value)
    }
}

impl From<Commit> for GitObject {
    fn from(value: Commit) -> Self {
        GitObject::Commit(value)
    }
}

/// Build the canonical record: `<type> <decimal-len>\0<payload>`.
///
/// This exact byte sequence is what gets hashed and (compressed) what gets
/// written to disk, so the id is a pure function of it.
pub fn encode_record(object_type: ObjectType, payload: &[u8]) -> Bytes {
    let mut record = Vec::with_capacity(payload.len() + 16);
    record.extend_from_slice(object_type.as_str().as_bytes());
    record.push(b' ');
    record.extend_from_slice(payload.len().to_string().as_bytes());
    record.push(0);
    record.extend_from_slice(payload);

    Bytes::from(record)
}
