use crate::areas::repository::Repository;
use crate::artifacts::log::rev_list::RevList;
use crate::artifacts::objects::commit::{Author, Commit};
use crate::artifacts::objects::object_id::ObjectId;
use colored::Colorize;
use std::io::Write;

impl Repository {
    /// Show history in git's medium format, starting from `revision`.
    pub fn log(&self, revision: &str) -> anyhow::Result<()> {
        let start = ObjectId::try_parse(self.refs().resolve(revision)?)?;

        for step in RevList::new(self, start) {
            let (oid, commit) = step?;
            self.show_commit_medium(&oid, &commit)?;
        }

        Ok(())
    }

    fn show_commit_medium(&self, oid: &ObjectId, commit: &Commit) -> anyhow::Result<()> {
        writeln!(self.writer(), "{}", format!("commit {oid}").yellow())?;

        if let Some(author_line) = commit.author() {
            let author = Author::try_from(author_line)?;
            writeln!(self.writer(), "Author: {}", author.display_name())?;
            writeln!(self.writer(), "Date:   {}", author.readable_timestamp())?;
        }

        writeln!(self.writer())?;
        for message_line in commit.message().lines() {
            writeln!(self.writer(), "    {message_line}")?;
        }
        writeln!(self.writer())?;

        Ok(())
    }
}
