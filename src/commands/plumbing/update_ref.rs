use crate::areas::repository::Repository;
use crate::artifacts::objects::object_id::ObjectId;

impl Repository {
    pub fn update_ref(&self, name: &str, value: &str) -> anyhow::Result<()> {
        // the value may itself be a ref name; pin it to an id before writing
        let oid = ObjectId::try_parse(self.refs().resolve(value)?)?;
        self.refs().create_ref(name, oid.as_ref())?;

        Ok(())
    }
}
