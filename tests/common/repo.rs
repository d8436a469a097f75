use grit::areas::repository::Repository;
use grit::artifacts::objects::blob::Blob;
use grit::artifacts::objects::commit::{Author, Commit};
use grit::artifacts::objects::object::GitObject;
use grit::artifacts::objects::object_id::ObjectId;
use grit::artifacts::objects::tree::{Tree, TreeEntry};
use std::path::Path;

/// Open a freshly created repository whose command output goes nowhere.
pub fn init_repository(dir: &Path) -> Repository {
    Repository::create(dir, Box::new(std::io::sink())).expect("Failed to create repository")
}

pub fn sample_author() -> Author {
    Author::new_with_timestamp(
        "Grace Hopper".to_string(),
        "grace@example.com".to_string(),
        chrono::DateTime::parse_from_rfc3339("2024-06-01T09:00:00+00:00").unwrap(),
    )
}

/// Store a blob and return its id.
pub fn store_blob(repository: &Repository, content: &[u8]) -> ObjectId {
    repository
        .database()
        .store(&GitObject::from(Blob::from_bytes(content.to_vec())), true)
        .expect("Failed to store blob")
}

/// Store a single-file tree and return its id.
pub fn store_file_tree(repository: &Repository, name: &str, blob_oid: &ObjectId) -> ObjectId {
    let tree = Tree::from_entries(vec![TreeEntry::new(
        "100644".to_string(),
        name.to_string(),
        blob_oid.clone(),
    )]);
    repository
        .database()
        .store(&GitObject::from(tree), true)
        .expect("Failed to store tree")
}

/// Store a commit over `tree_oid` with the given parents and message.
pub fn store_commit(
    repository: &Repository,
    tree_oid: &ObjectId,
    parents: &[ObjectId],
    message: &str,
) -> ObjectId {
    let author = sample_author();
    let commit = Commit::new(tree_oid, parents, &author, &author, message);
    repository
        .database()
        .store(&GitObject::from(commit), true)
        .expect("Failed to store commit")
}

/// Build a linear chain of `length` commits over one blob and tree.
/// Returns the commit ids from root to tip.
pub fn store_commit_chain(repository: &Repository, length: usize) -> Vec<ObjectId> {
    let blob_oid = store_blob(repository, b"chain content\n");
    let tree_oid = store_file_tree(repository, "file.txt", &blob_oid);

    let mut commits: Vec<ObjectId> = Vec::with_capacity(length);
    for i in 0..length {
        let parents = commits.last().cloned().map(|p| vec![p]).unwrap_or_default();
        let oid = store_commit(repository, &tree_oid, &parents, &format!("commit {i}"));
        commits.push(oid);
    }

    commits
}
