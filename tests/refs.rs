use assert_fs::TempDir;
use grit::errors::Error;
use pretty_assertions::assert_eq;
use rstest::rstest;

mod common;

use common::command::repository_dir;
use common::repo::init_repository;

const SOME_ID: &str = "1111111111111111111111111111111111111111";
const OTHER_ID: &str = "2222222222222222222222222222222222222222";

#[rstest]
fn head_chain_resolves_to_the_branch_id(repository_dir: TempDir) {
    let repository = init_repository(repository_dir.path());
    let refs = repository.refs();

    // HEAD -> refs/heads/main -> id
    refs.set_head_symref("refs/heads/main").unwrap();
    refs.create_ref("refs/heads/main", SOME_ID).unwrap();

    assert_eq!(refs.resolve("HEAD").unwrap(), SOME_ID);
}

#[rstest]
fn branch_and_tag_shortcuts_resolve(repository_dir: TempDir) {
    let repository = init_repository(repository_dir.path());
    let refs = repository.refs();

    refs.create_ref("refs/heads/feature", SOME_ID).unwrap();
    refs.create_ref("refs/tags/v1.0", OTHER_ID).unwrap();

    assert_eq!(refs.resolve("feature").unwrap(), SOME_ID);
    assert_eq!(refs.resolve("v1.0").unwrap(), OTHER_ID);
    assert_eq!(refs.resolve("refs/heads/feature").unwrap(), SOME_ID);
    assert_eq!(refs.resolve("heads/feature").unwrap(), SOME_ID);
}

#[rstest]
fn branches_shadow_tags_of_the_same_name(repository_dir: TempDir) {
    let repository = init_repository(repository_dir.path());
    let refs = repository.refs();

    refs.create_ref("refs/heads/release", SOME_ID).unwrap();
    refs.create_ref("refs/tags/release", OTHER_ID).unwrap();

    assert_eq!(refs.resolve("release").unwrap(), SOME_ID);
}

#[rstest]
fn unresolved_name_falls_back_to_the_literal(repository_dir: TempDir) {
    let repository = init_repository(repository_dir.path());

    // a 40-hex string with no matching ref file passes through unchanged
    let resolved = repository.refs().resolve(SOME_ID).unwrap();
    assert_eq!(resolved, SOME_ID);

    // so does any other unknown name; the id parse fails later instead
    let resolved = repository.refs().resolve("no-such-branch").unwrap();
    assert_eq!(resolved, "no-such-branch");
}

#[rstest]
fn detached_head_resolves_to_its_id(repository_dir: TempDir) {
    let repository = init_repository(repository_dir.path());
    let refs = repository.refs();

    refs.update_ref_file(&refs.head_path(), SOME_ID).unwrap();

    assert_eq!(refs.resolve("HEAD").unwrap(), SOME_ID);
}

#[rstest]
fn self_referential_head_is_a_cycle(repository_dir: TempDir) {
    let repository = init_repository(repository_dir.path());
    let refs = repository.refs();

    refs.update_ref_file(&refs.head_path(), "ref: HEAD").unwrap();

    let err = refs.resolve("HEAD").unwrap_err();
    assert!(matches!(err, Error::CyclicReference(_)));
}

#[rstest]
fn two_step_reference_cycle_is_reported(repository_dir: TempDir) {
    let repository = init_repository(repository_dir.path());
    let refs = repository.refs();

    refs.create_ref("refs/heads/a", "ref: refs/heads/b").unwrap();
    refs.create_ref("refs/heads/b", "ref: refs/heads/a").unwrap();

    let err = refs.resolve("a").unwrap_err();
    assert!(matches!(err, Error::CyclicReference(_)));
}

#[rstest]
fn deep_acyclic_chains_still_resolve(repository_dir: TempDir) {
    let repository = init_repository(repository_dir.path());
    let refs = repository.refs();

    refs.create_ref("refs/heads/hop0", SOME_ID).unwrap();
    for i in 1..10 {
        refs.create_ref(
            &format!("refs/heads/hop{i}"),
            &format!("ref: refs/heads/hop{}", i - 1),
        )
        .unwrap();
    }

    assert_eq!(refs.resolve("hop9").unwrap(), SOME_ID);
}

#[rstest]
fn list_returns_every_ref_file_relative_to_the_root(repository_dir: TempDir) {
    let repository = init_repository(repository_dir.path());
    let refs = repository.refs();

    refs.create_ref("refs/heads/main", SOME_ID).unwrap();
    refs.create_ref("refs/heads/nested/topic", SOME_ID).unwrap();
    refs.create_ref("refs/tags/v1.0", OTHER_ID).unwrap();

    let mut listed = refs.list().unwrap();
    listed.sort();

    assert_eq!(
        listed,
        vec![
            "refs/heads/main".to_string(),
            "refs/heads/nested/topic".to_string(),
            "refs/tags/v1.0".to_string(),
        ]
    );
}

#[rstest]
fn bare_names_are_created_under_heads(repository_dir: TempDir) {
    let repository = init_repository(repository_dir.path());
    let refs = repository.refs();

    let ref_name = refs.create_ref("topic", SOME_ID).unwrap();

    assert_eq!(ref_name, "refs/heads/topic");
    let content =
        std::fs::read_to_string(repository.git_path().join("refs/heads/topic")).unwrap();
    assert_eq!(content, format!("{SOME_ID}\n"));
}
