//! Commit object
//!
//! Commits tie a tree snapshot into history. On the wire they are a list of
//! `key value` header lines, a blank line, then the free-text message:
//!
//! ```text
//! tree <tree-sha>
//! parent <parent-sha>
//! author <name> <email> <timestamp> <timezone>
//! committer <name> <email> <timestamp> <timezone>
//!
//! <commit message>
//! ```
//!
//! Keys are not unique on the wire (`parent` repeats for merge commits), so
//! in memory every key maps to a list of values from the start, and the
//! message is its own field rather than a reserved key.

use crate::artifacts::objects::object::{Packable, Unpackable};
use crate::artifacts::objects::object_id::ObjectId;
use crate::errors::{Error, Result};
use bytes::Bytes;
use std::io::BufRead;

/// Author or committer identity line: name, email, timestamp with offset.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Author {
    name: String,
    email: String,
    timestamp: chrono::DateTime<chrono::FixedOffset>,
}

const DEFAULT_AUTHOR_NAME: &str = "Anonymous";
const DEFAULT_AUTHOR_EMAIL: &str = "anonymous@example.com";

impl Author {
    pub fn new(name: String, email: String) -> Self {
        Author {
            name,
            email,
            timestamp: chrono::Local::now().fixed_offset(),
        }
    }

    pub fn new_with_timestamp(
        name: String,
        email: String,
        timestamp: chrono::DateTime<chrono::FixedOffset>,
    ) -> Self {
        Author {
            name,
            email,
            timestamp,
        }
    }

    /// Identity from `GIT_AUTHOR_NAME` / `GIT_AUTHOR_EMAIL`, with anonymous
    /// defaults when unset.
    pub fn author_from_env() -> Self {
        Author::new(
            std::env::var("GIT_AUTHOR_NAME").unwrap_or_else(|_| DEFAULT_AUTHOR_NAME.to_string()),
            std::env::var("GIT_AUTHOR_EMAIL").unwrap_or_else(|_| DEFAULT_AUTHOR_EMAIL.to_string()),
        )
    }

    /// Identity from `GIT_COMMITTER_NAME` / `GIT_COMMITTER_EMAIL`, falling
    /// back to the author variables and then the anonymous defaults.
    pub fn committer_from_env() -> Self {
        Author::new(
            std::env::var("GIT_COMMITTER_NAME")
                .or_else(|_| std::env::var("GIT_AUTHOR_NAME"))
                .unwrap_or_else(|_| DEFAULT_AUTHOR_NAME.to_string()),
            std::env::var("GIT_COMMITTER_EMAIL")
                .or_else(|_| std::env::var("GIT_AUTHOR_EMAIL"))
                .unwrap_or_else(|_| DEFAULT_AUTHOR_EMAIL.to_string()),
        )
    }

    /// `Name <email>` for display
    pub fn display_name(&self) -> String {
        format!("{} <{}>", self.name, self.email)
    }

    /// The full header value: `Name <email> <unix-seconds> <offset>`
    pub fn display(&self) -> String {
        format!(
            "{} <{}> {} {}",
            self.name,
            self.email,
            self.timestamp.timestamp(),
            self.timestamp.format("%z")
        )
    }

    /// Human-readable timestamp, e.g. `Mon Jan 1 12:34:56 2024 +0000`
    pub fn readable_timestamp(&self) -> String {
        self.timestamp
            .format("%a %b %-d %H:%M:%S %Y %z")
            .to_string()
    }
}

impl TryFrom<&str> for Author {
    type Error = anyhow::Error;

    fn try_from(value: &str) -> anyhow::Result<Self> {
        // Format: "name <email> timestamp timezone"; split from the right
        // so names may contain spaces
        let parts: Vec<&str> = value.rsplitn(3, ' ').collect();
        if parts.len() < 3 {
            anyhow::bail!("invalid identity line: {value}");
        }

        let timezone = parts[0];
        let seconds = parts[1];
        let name_email = parts[2];

        let email_start = name_email
            .find('<')
            .ok_or_else(|| anyhow::anyhow!("identity line is missing '<': {value}"))?;
        let email_end = name_email
            .find('>')
            .ok_or_else(|| anyhow::anyhow!("identity line is missing '>': {value}"))?;

        let name = name_email[..email_start].trim().to_string();
        let email = name_email[email_start + 1..email_end].to_string();

        let timestamp =
            chrono::DateTime::parse_from_str(&format!("{seconds} {timezone}"), "%s %z")
                .map_err(|_| anyhow::anyhow!("invalid timestamp in identity line: {value}"))?;

        Ok(Author {
            name,
            email,
            timestamp,
        })
    }
}

/// Commit object: ordered header fields plus the message.
///
/// Header keys keep first-seen order; each key holds its values in wire
/// order. Unrecognized keys survive a decode/encode round trip untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Commit {
    headers: Vec<(String, Vec<String>)>,
    message: String,
}

pub const TREE_HEADER: &str = "tree";
pub const PARENT_HEADER: &str = "parent";
pub const AUTHOR_HEADER: &str = "author";
pub const COMMITTER_HEADER: &str = "committer";

impl Commit {
    /// Build a commit the way the porcelain layer needs it.
    pub fn new(
        tree_oid: &ObjectId,
        parents: &[ObjectId],
        author: &Author,
        committer: &Author,
        message: impl Into<String>,
    ) -> Self {
        let mut commit = Commit {
            headers: Vec::new(),
            message: message.into(),
        };

        commit.push_header(TREE_HEADER, tree_oid.to_string());
        for parent in parents {
            commit.push_header(PARENT_HEADER, parent.to_string());
        }
        commit.push_header(AUTHOR_HEADER, author.display());
        commit.push_header(COMMITTER_HEADER, committer.display());

        commit
    }

    /// Append a value under `key`, keeping first-seen key order.
    pub fn push_header(&mut self, key: &str, value: String) {
        match self.headers.iter_mut().find(|(k, _)| k == key) {
            Some((_, values)) => values.push(value),
            None => self.headers.push((key.to_string(), vec![value])),
        }
    }

    /// First value under `key`, if any.
    pub fn header(&self, key: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k == key)
            .and_then(|(_, values)| values.first())
            .map(String::as_str)
    }

    /// All values under `key`, in wire order.
    pub fn header_values(&self, key: &str) -> &[String] {
        self.headers
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, values)| values.as_slice())
            .unwrap_or(&[])
    }

    pub fn headers(&self) -> &[(String, Vec<String>)] {
        &self.headers
    }

    pub fn tree_oid(&self) -> Result<ObjectId> {
        let tree = self
            .header(TREE_HEADER)
            .ok_or_else(|| Error::Malformed("commit has no tree header".to_string()))?;
        ObjectId::try_parse(tree)
    }

    /// First parent id, if any. Only the first parent participates in
    /// history traversal; further parents are stored but not followed.
    pub fn parent(&self) -> Option<&str> {
        self.header(PARENT_HEADER)
    }

    pub fn parents(&self) -> &[String] {
        self.header_values(PARENT_HEADER)
    }

    pub fn author(&self) -> Option<&str> {
        self.header(AUTHOR_HEADER)
    }

    pub fn committer(&self) -> Option<&str> {
        self.header(COMMITTER_HEADER)
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn short_message(&self) -> String {
        self.message.lines().next().unwrap_or("").to_string()
    }
}

impl Packable for Commit {
    fn serialize(&self) -> Result<Bytes> {
        let mut payload = Vec::new();

        for (key, values) in &self.headers {
            for value in values {
                payload.extend_from_slice(key.as_bytes());
                payload.push(b' ');
                payload.extend_from_slice(value.as_bytes());
                payload.push(b'\n');
            }
        }

        // blank line, then the message verbatim; no trailing newline is
        // added or assumed
        payload.push(b'\n');
        payload.extend_from_slice(self.message.as_bytes());

        Ok(Bytes::from(payload))
    }
}

impl Unpackable for Commit {
    fn deserialize(mut reader: impl BufRead) -> Result<Self> {
        let mut raw = Vec::new();
        reader.read_to_end(&mut raw)?;

        let mut commit = Commit::default();

        // header lines: `key SP value NL`, ending at the blank line. A line
        // with no space, or whose newline comes before its space, ends the
        // scan without failing.
        let mut i = 0;
        while i < raw.len() {
            let Some(space_pos) = find_byte(&raw, b' ', i) else {
                break;
            };
            let newline_pos = match find_byte(&raw, b'\n', i) {
                Some(pos) if pos > space_pos => pos,
                _ => break,
            };

            let key = decode_utf8(&raw[i..space_pos])?;
            let value = decode_utf8(&raw[space_pos + 1..newline_pos])?;
            commit.push_header(&key, value);

            i = newline_pos + 1;
        }

        // everything after the first blank line is the message, verbatim
        commit.message = match raw.windows(2).position(|window| window == b"\n\n") {
            Some(pos) => decode_utf8(&raw[pos + 2..])?,
            None => String::new(),
        };

        Ok(commit)
    }
}

fn find_byte(raw: &[u8], byte: u8, from: usize) -> Option<usize> {
    raw[from..].iter().position(|&b| b == byte).map(|p| p + from)
}

fn decode_utf8(raw: &[u8]) -> Result<String> {
    std::str::from_utf8(raw)
        .map(str::to_owned)
        .map_err(|_| Error::Malformed("commit payload is not UTF-8".to_string()))
}
