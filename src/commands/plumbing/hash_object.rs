use crate::areas::repository::Repository;
use crate::artifacts::objects::blob::Blob;
use crate::artifacts::objects::object::GitObject;
use anyhow::Context;
use std::io::Write;

impl Repository {
    pub fn hash_object(&self, file: &str, write: bool) -> anyhow::Result<()> {
        let data = std::fs::read(file).with_context(|| format!("unable to read file {file}"))?;

        let blob = GitObject::from(Blob::from_bytes(data));
        let oid = self.database().store(&blob, write)?;

        writeln!(self.writer(), "{oid}")?;

        Ok(())
    }
}
