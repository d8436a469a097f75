use crate::areas::repository::Repository;
use crate::artifacts::objects::object::GitObject;
use crate::artifacts::objects::object_id::ObjectId;
use std::io::Write;

impl Repository {
    pub fn ls_tree(&self, name: &str) -> anyhow::Result<()> {
        let oid = ObjectId::try_parse(self.refs().resolve(name)?)?;

        match self.database().load(&oid)? {
            GitObject::Tree(tree) => {
                for entry in tree.entries() {
                    writeln!(
                        self.writer(),
                        "{} {} {}",
                        entry.mode(),
                        entry.oid(),
                        entry.name()
                    )?;
                }

                Ok(())
            }
            _ => anyhow::bail!("object {oid} is not a tree"),
        }
    }
}
