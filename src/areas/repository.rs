//! Repository locator
//!
//! A repository is a worktree directory with a `.git` directory inside it
//! holding the object database, the references and a config file whose
//! `repositoryformatversion` must be `0`. The handle is constructed once
//! per invocation and is stateless afterwards; every read goes back to the
//! filesystem.

use crate::areas::database::Database;
use crate::areas::refs::Refs;
use crate::errors::{Error, Result};
use std::cell::{RefCell, RefMut};
use std::path::{Path, PathBuf};

/// Branch that a freshly created HEAD points at
pub const DEFAULT_BRANCH: &str = "master";

const SUPPORTED_FORMAT_VERSION: u32 = 0;

/// Parsed repository config. Only the format version matters to the core;
/// the file keeps its other keys for compatibility with the layout git
/// writes.
#[derive(Debug, Clone, Copy)]
pub struct Config {
    pub repository_format_version: u32,
}

impl Config {
    /// Line scan for `repositoryformatversion = <n>`; the INI section
    /// headers around it carry no information we need.
    fn parse(content: &str) -> Option<Self> {
        content.lines().find_map(|line| {
            let (key, value) = line.split_once('=')?;
            if key.trim() != "repositoryformatversion" {
                return None;
            }
            value.trim().parse().ok().map(|repository_format_version| Config {
                repository_format_version,
            })
        })
    }

    fn default_content() -> &'static str {
        "[core]\n\trepositoryformatversion = 0\n\tfilemode = false\n\tbare = false\n"
    }
}

pub struct Repository {
    path: Box<Path>,
    git_path: Box<Path>,
    database: Database,
    refs: Refs,
    config: Config,
    writer: RefCell<Box<dyn std::io::Write>>,
}

impl std::fmt::Debug for Repository {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Repository")
            .field("path", &self.path)
            .field("git_path", &self.git_path)
            .field("database", &self.database)
            .field("refs", &self.refs)
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl Repository {
    /// Open the repository rooted at `path`, validating the minimal layout
    /// and the config format version.
    pub fn open(path: &Path, writer: Box<dyn std::io::Write>) -> Result<Self> {
        let path = path
            .canonicalize()
            .map_err(|_| Self::invalid(path, "no such directory"))?;

        let git_path = path.join(".git");
        if !git_path.is_dir() {
            return Err(Self::invalid(&path, "not a grit repository (missing .git directory)"));
        }

        let config_content = std::fs::read_to_string(git_path.join("config"))
            .map_err(|_| Self::invalid(&path, "configuration file missing"))?;
        let config = Config::parse(&config_content)
            .ok_or_else(|| Self::invalid(&path, "config declares no repositoryformatversion"))?;
        if config.repository_format_version != SUPPORTED_FORMAT_VERSION {
            return Err(Self::invalid(
                &path,
                format!(
                    "unsupported repositoryformatversion {}",
                    config.repository_format_version
                ),
            ));
        }

        let database = Database::new(git_path.join("objects").into_boxed_path());
        let refs = Refs::new(git_path.clone().into_boxed_path());

        Ok(Repository {
            path: path.into_boxed_path(),
            git_path: git_path.into_boxed_path(),
            database,
            refs,
            config,
            writer: RefCell::new(writer),
        })
    }

    /// Walk up from `start` until a directory containing `.git` is found.
    pub fn discover(start: &Path, writer: Box<dyn std::io::Write>) -> Result<Self> {
        let mut dir = start
            .canonicalize()
            .map_err(|_| Self::invalid(start, "no such directory"))?;

        loop {
            if dir.join(".git").is_dir() {
                return Self::open(&dir, writer);
            }

            match dir.parent() {
                Some(parent) => dir = parent.to_path_buf(),
                None => {
                    return Err(Self::invalid(
                        start,
                        "no repository found here or in any parent directory",
                    ));
                }
            }
        }
    }

    /// Materialize the minimal layout at `path` and open the result:
    /// `objects/`, `refs/heads/`, `refs/tags/`, a HEAD pointing at the
    /// default branch and a version-0 config.
    pub fn create(path: &Path, writer: Box<dyn std::io::Write>) -> Result<Self> {
        let git_path = path.join(".git");

        std::fs::create_dir_all(git_path.join("objects"))?;
        std::fs::create_dir_all(git_path.join("refs").join("heads"))?;
        std::fs::create_dir_all(git_path.join("refs").join("tags"))?;

        let refs = Refs::new(git_path.clone().into_boxed_path());
        refs.set_head_symref(&format!("refs/heads/{DEFAULT_BRANCH}"))?;

        let config_path = git_path.join("config");
        if !config_path.exists() {
            std::fs::write(&config_path, Config::default_content())?;
        }

        Self::open(path, writer)
    }

    fn invalid(path: &Path, reason: impl Into<String>) -> Error {
        Error::InvalidRepository {
            path: PathBuf::from(path),
            reason: reason.into(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn git_path(&self) -> &Path {
        &self.git_path
    }

    pub fn database(&self) -> &Database {
        &self.database
    }

    pub fn refs(&self) -> &Refs {
        &self.refs
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn writer(&'_ self) -> RefMut<'_, Box<dyn std::io::Write>> {
        self.writer.borrow_mut()
    }
}
