use crate::areas::repository::Repository;
use crate::artifacts::objects::object_id::ObjectId;
use anyhow::Context;
use std::io::Write;

impl Repository {
    pub fn cat_file(&self, name: &str) -> anyhow::Result<()> {
        let resolved = self.refs().resolve(name)?;
        let oid = ObjectId::try_parse(resolved)?;

        let object = self
            .database()
            .load(&oid)
            .with_context(|| format!("unable to read object {oid}"))?;

        // the payload bytes, verbatim
        let payload = object.serialize()?;
        self.writer().write_all(&payload)?;

        Ok(())
    }
}
