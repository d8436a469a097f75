use crate::areas::repository::Repository;
use anyhow::Context;
use std::io::Write;
use std::path::Path;

impl Repository {
    pub fn init(path: &Path, writer: Box<dyn std::io::Write>) -> anyhow::Result<()> {
        let repository = Repository::create(path, writer)
            .with_context(|| format!("unable to initialize repository at {}", path.display()))?;

        writeln!(
            repository.writer(),
            "Initialized empty Grit repository in {}",
            repository.git_path().display()
        )?;

        Ok(())
    }
}
