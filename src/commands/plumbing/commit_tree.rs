use crate::areas::repository::Repository;
use crate::artifacts::objects::commit::{Author, Commit};
use crate::artifacts::objects::object::GitObject;
use crate::artifacts::objects::object_id::ObjectId;
use std::io::Write;

impl Repository {
    pub fn commit_tree(
        &self,
        tree: &str,
        parents: &[String],
        message: &str,
    ) -> anyhow::Result<()> {
        let tree_oid = ObjectId::try_parse(self.refs().resolve(tree)?)?;
        let parent_oids = parents
            .iter()
            .map(|parent| Ok(ObjectId::try_parse(self.refs().resolve(parent)?)?))
            .collect::<anyhow::Result<Vec<_>>>()?;

        let author = Author::author_from_env();
        let committer = Author::committer_from_env();

        let commit = Commit::new(&tree_oid, &parent_oids, &author, &committer, message);
        let oid = self.database().store(&GitObject::from(commit), true)?;

        writeln!(self.writer(), "{oid}")?;

        Ok(())
    }
}
