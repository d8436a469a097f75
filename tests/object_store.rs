use assert_fs::TempDir;
use flate2::Compression;
use flate2::write::ZlibEncoder;
use grit::artifacts::objects::blob::Blob;
use grit::artifacts::objects::commit::Commit;
use grit::artifacts::objects::object::GitObject;
use grit::artifacts::objects::object_id::ObjectId;
use grit::artifacts::objects::tree::{Tree, TreeEntry};
use grit::errors::Error;
use pretty_assertions::assert_eq;
use rstest::rstest;
use std::io::Write;

mod common;

use common::command::repository_dir;
use common::repo::{init_repository, sample_author, store_blob};

#[rstest]
fn blob_round_trips_through_the_store(repository_dir: TempDir) {
    let repository = init_repository(repository_dir.path());

    let blob = GitObject::from(Blob::from_bytes(&b"some file content\n"[..]));
    let oid = repository.database().store(&blob, true).unwrap();

    let loaded = repository.database().load(&oid).unwrap();
    assert_eq!(loaded, blob);
}

#[rstest]
fn tree_round_trips_through_the_store(repository_dir: TempDir) {
    let repository = init_repository(repository_dir.path());

    let blob_oid = store_blob(&repository, b"content");
    let tree = GitObject::from(Tree::from_entries(vec![
        TreeEntry::new("100644".to_string(), "b.txt".to_string(), blob_oid.clone()),
        TreeEntry::new("100644".to_string(), "a.txt".to_string(), blob_oid.clone()),
    ]));

    let oid = repository.database().store(&tree, true).unwrap();
    let loaded = repository.database().load(&oid).unwrap();

    assert_eq!(loaded, tree);

    // canonical order: "a.txt" sorted ahead of "b.txt"
    match loaded {
        GitObject::Tree(tree) => {
            let names = tree
                .entries()
                .iter()
                .map(TreeEntry::name)
                .collect::<Vec<_>>();
            assert_eq!(names, vec!["a.txt", "b.txt"]);
        }
        other => panic!("expected a tree, got a {}", other.object_type()),
    }
}

#[rstest]
fn commit_round_trips_through_the_store(repository_dir: TempDir) {
    let repository = init_repository(repository_dir.path());

    let blob_oid = store_blob(&repository, b"content");
    let author = sample_author();
    let commit = GitObject::from(Commit::new(
        &blob_oid,
        &[],
        &author,
        &author,
        "a message\n\nwith a body",
    ));

    let oid = repository.database().store(&commit, true).unwrap();
    let loaded = repository.database().load(&oid).unwrap();

    assert_eq!(loaded, commit);
}

#[rstest]
fn generated_blobs_round_trip(repository_dir: TempDir) {
    use fake::Fake;
    use fake::faker::lorem::en::Words;

    let repository = init_repository(repository_dir.path());

    for _ in 0..5 {
        let content = Words(5..10).fake::<Vec<String>>().join(" ");
        let blob = GitObject::from(Blob::from_bytes(content.clone().into_bytes()));

        let oid = repository.database().store(&blob, true).unwrap();
        let loaded = repository.database().load(&oid).unwrap();

        assert_eq!(loaded, blob);
    }
}

#[rstest]
fn store_is_idempotent_and_content_addressed(repository_dir: TempDir) {
    let repository = init_repository(repository_dir.path());

    let blob = GitObject::from(Blob::from_bytes(&b"test content\n"[..]));
    let first = repository.database().store(&blob, true).unwrap();
    let second = repository.database().store(&blob, true).unwrap();

    assert_eq!(first, second);

    // git-compatible id for this exact content
    assert_eq!(first.as_ref(), "d670460b4b4aece5915caf5c68d12f560a9fe3e4");

    // exactly one physical record
    let fanout_dir = repository.database().objects_path().join("d6");
    let files = std::fs::read_dir(&fanout_dir)
        .unwrap()
        .filter_map(|entry| entry.ok())
        .count();
    assert_eq!(files, 1);
}

#[rstest]
fn dry_run_store_returns_id_without_writing(repository_dir: TempDir) {
    let repository = init_repository(repository_dir.path());

    let blob = GitObject::from(Blob::from_bytes(&b"never persisted"[..]));
    let oid = repository.database().store(&blob, false).unwrap();

    let object_path = repository.database().objects_path().join(oid.to_path());
    assert!(!object_path.exists());

    // the id is still usable: a later persisting write lands at it
    let persisted = repository.database().store(&blob, true).unwrap();
    assert_eq!(persisted, oid);
    assert!(object_path.exists());
}

#[rstest]
fn load_missing_object_fails_with_not_found(repository_dir: TempDir) {
    let repository = init_repository(repository_dir.path());

    let oid = ObjectId::try_parse("a".repeat(40)).unwrap();
    let err = repository.database().load(&oid).unwrap_err();

    assert!(matches!(err, Error::NotFound(_)));
}

/// Compress a raw record and drop it at the fan-out path for `oid`,
/// bypassing the store's write path.
fn plant_record(repository: &grit::areas::repository::Repository, oid: &ObjectId, record: &[u8]) {
    let object_path = repository.database().objects_path().join(oid.to_path());
    std::fs::create_dir_all(object_path.parent().unwrap()).unwrap();

    let mut encoder = ZlibEncoder::new(Vec::new(), Compression::default());
    encoder.write_all(record).unwrap();
    std::fs::write(&object_path, encoder.finish().unwrap()).unwrap();
}

#[rstest]
fn load_rejects_declared_length_mismatch(repository_dir: TempDir) {
    let repository = init_repository(repository_dir.path());

    let oid = ObjectId::try_parse("b".repeat(40)).unwrap();
    plant_record(&repository, &oid, b"blob 5\0hell");

    let err = repository.database().load(&oid).unwrap_err();
    assert!(matches!(err, Error::Malformed(_)));
}

#[rstest]
fn load_rejects_unknown_type_tag(repository_dir: TempDir) {
    let repository = init_repository(repository_dir.path());

    let oid = ObjectId::try_parse("c".repeat(40)).unwrap();
    plant_record(&repository, &oid, b"tag 3\0foo");

    let err = repository.database().load(&oid).unwrap_err();
    assert!(matches!(err, Error::UnknownType(_)));
}

#[rstest]
fn load_rejects_record_without_header(repository_dir: TempDir) {
    let repository = init_repository(repository_dir.path());

    let oid = ObjectId::try_parse("d".repeat(40)).unwrap();
    plant_record(&repository, &oid, b"no-header-here");

    let err = repository.database().load(&oid).unwrap_err();
    assert!(matches!(err, Error::Malformed(_)));
}

#[rstest]
fn load_rejects_non_zlib_file(repository_dir: TempDir) {
    let repository = init_repository(repository_dir.path());

    let oid = ObjectId::try_parse("e".repeat(40)).unwrap();
    let object_path = repository.database().objects_path().join(oid.to_path());
    std::fs::create_dir_all(object_path.parent().unwrap()).unwrap();
    std::fs::write(&object_path, b"definitely not zlib").unwrap();

    let err = repository.database().load(&oid).unwrap_err();
    assert!(matches!(err, Error::Malformed(_)));
}
