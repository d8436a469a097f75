//! References (HEAD, branches, tags)
//!
//! A reference is a small text file holding either a 40-hex object id or an
//! indirection `ref: <other-ref-path>`. Resolution maps a human-facing name
//! to an id by probing a fixed list of candidate paths and then chasing
//! indirections; a name matching no path at all is passed through unchanged
//! on the assumption that it already is a literal id.
//!
//! Updates are plain file overwrites. There is no locking; concurrent
//! writers race and the last one wins, while object writes stay safe on
//! their own through content addressing.

use crate::errors::{Error, Result};
use derive_new::new;
use regex::Regex;
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;
use walkdir::WalkDir;

/// Pattern for the symbolic-reference indirection marker
const SYMREF_REGEX: &str = r"^ref: (.+)$";

static SYMREF_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(SYMREF_REGEX).expect("symref pattern compiles"));

/// Name of the HEAD reference
pub const HEAD_REF_NAME: &str = "HEAD";

#[derive(Debug, new)]
pub struct Refs {
    /// Path to the repository's internal directory (typically `.git`)
    path: Box<Path>,
}

impl Refs {
    /// Resolve a name (HEAD, branch, tag, ref path or literal id) to an
    /// object id.
    ///
    /// Resolution never fails on an unknown name: when no candidate path
    /// exists the name is returned unchanged, and a bad literal surfaces
    /// later when the id is first used. The only failures are I/O and a
    /// symbolic chain that loops back on itself.
    pub fn resolve(&self, name: &str) -> Result<String> {
        let mut visited = HashSet::new();
        self.resolve_chain(name, &mut visited)
    }

    fn resolve_chain(&self, name: &str, visited: &mut HashSet<String>) -> Result<String> {
        let Some(ref_path) = self.find_ref_path(name) else {
            // nothing matched: assume the name is already a literal id
            return Ok(name.to_string());
        };

        let content = std::fs::read_to_string(&ref_path)?;
        let content = content.trim();

        if let Some(symref_match) = SYMREF_PATTERN.captures(content) {
            let target = symref_match[1].to_string();
            if !visited.insert(target.clone()) {
                return Err(Error::CyclicReference(target));
            }
            return self.resolve_chain(&target, visited);
        }

        Ok(content.to_string())
    }

    /// Candidate paths, in resolution precedence order: the internal
    /// namespace itself (HEAD lives there), then `refs/`, then the branch
    /// and tag shortcuts. First existing file wins.
    fn find_ref_path(&self, name: &str) -> Option<PathBuf> {
        [
            self.path.join(name),
            self.refs_path().join(name),
            self.heads_path().join(name),
            self.tags_path().join(name),
        ]
        .into_iter()
        .find(|path| path.is_file())
    }

    /// Every file under `refs/`, as a path relative to the internal
    /// directory, in walk order. Sorting is the caller's concern.
    pub fn list(&self) -> Result<Vec<String>> {
        Ok(WalkDir::new(self.refs_path())
            .into_iter()
            .filter_map(|entry| entry.ok())
            .filter(|entry| entry.path().is_file())
            .filter_map(|entry| {
                let relative_path = entry.path().strip_prefix(&*self.path).ok()?;
                Some(relative_path.to_string_lossy().to_string())
            })
            .collect())
    }

    /// Write a reference, defaulting bare names into `refs/heads/`.
    /// Returns the full ref path that was written.
    pub fn create_ref(&self, name: &str, value: &str) -> Result<String> {
        let ref_name = if name.starts_with("refs/") {
            name.to_string()
        } else {
            format!("refs/heads/{name}")
        };

        self.update_ref_file(&self.path.join(&ref_name), value)?;

        Ok(ref_name)
    }

    /// Point HEAD at another reference.
    pub fn set_head_symref(&self, target: &str) -> Result<()> {
        self.update_ref_file(&self.head_path(), &format!("ref: {target}"))
    }

    /// Plain overwrite of a ref file, creating parent directories on
    /// demand and terminating the content with a newline.
    pub fn update_ref_file(&self, path: &Path, raw_ref: &str) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        std::fs::write(path, format!("{raw_ref}\n"))?;

        Ok(())
    }

    pub fn head_path(&self) -> PathBuf {
        self.path.join(HEAD_REF_NAME)
    }

    pub fn refs_path(&self) -> PathBuf {
        self.path.join("refs")
    }

    pub fn heads_path(&self) -> PathBuf {
        self.refs_path().join("heads")
    }

    pub fn tags_path(&self) -> PathBuf {
        self.refs_path().join("tags")
    }
}
