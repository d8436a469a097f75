use crate::areas::repository::Repository;
use std::io::Write;

impl Repository {
    pub fn show_ref(&self) -> anyhow::Result<()> {
        for ref_path in self.refs().list()? {
            let resolved = self.refs().resolve(&ref_path)?;
            writeln!(self.writer(), "{resolved} {ref_path}")?;
        }

        Ok(())
    }
}
