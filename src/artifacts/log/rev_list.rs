use crate::areas::repository::Repository;
use crate::artifacts::objects::commit::Commit;
use crate::artifacts::objects::object_id::ObjectId;
use crate::errors::Result;
use derive_new::new;

/// Lazy walk over the commit graph from a starting id, following the first
/// parent of each commit until a root commit is reached.
///
/// Each iteration re-reads the store, so the walk has no side effects and
/// can be restarted from any id. Errors (a missing object, a non-commit, a
/// malformed parent id) are yielded as items and end the iteration; a bad
/// commit is never skipped silently.
#[derive(Clone, new)]
pub struct RevList<'r> {
    repository: &'r Repository,
    start: ObjectId,
}

impl<'r> IntoIterator for RevList<'r> {
    type Item = Result<(ObjectId, Commit)>;
    type IntoIter = RevListIter<'r>;

    fn into_iter(self) -> Self::IntoIter {
        RevListIter {
            repository: self.repository,
            current: Some(self.start),
        }
    }
}

pub struct RevListIter<'r> {
    repository: &'r Repository,
    current: Option<ObjectId>,
}

impl Iterator for RevListIter<'_> {
    type Item = Result<(ObjectId, Commit)>;

    fn next(&mut self) -> Option<Self::Item> {
        let oid = self.current.take()?;

        let commit = match self.repository.database().load_commit(&oid) {
            Ok(commit) => commit,
            Err(err) => return Some(Err(err)),
        };

        // only the first parent is followed; merge ancestry beyond it is
        // stored but not traversed
        match commit.parent().map(ObjectId::try_parse).transpose() {
            Ok(next) => {
                self.current = next;
                Some(Ok((oid, commit)))
            }
            Err(err) => Some(Err(err)),
        }
    }
}
