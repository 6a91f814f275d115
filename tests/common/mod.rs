// Shared test fixtures for integration tests
// Functions here are used across different test files
#![allow(dead_code)]

use chrono::DateTime;
use git2::{Commit, Oid, Repository, Signature, Time};
use std::path::PathBuf;
use tempfile::TempDir;

/// Create an empty temporary git repository
pub fn create_test_repo() -> (TempDir, PathBuf, Repository) {
    let dir = TempDir::new().unwrap();
    let repo_path = dir.path().to_path_buf();
    let repo = Repository::init(&repo_path).unwrap();

    let mut config = repo.config().unwrap();
    config.set_str("user.name", "Test User").unwrap();
    config.set_str("user.email", "test@example.com").unwrap();

    (dir, repo_path, repo)
}

/// Seconds since the epoch for an RFC 3339 timestamp
pub fn timestamp(when: &str) -> i64 {
    DateTime::parse_from_rfc3339(when).unwrap().timestamp()
}

fn write_commit(
    repo: &Repository,
    update_ref: Option<&str>,
    when: &str,
    parents: &[Oid],
    message: &str,
) -> Oid {
    let sig = Signature::new("Test User", "test@example.com", &Time::new(timestamp(when), 0))
        .unwrap();
    let tree_id = repo.treebuilder(None).unwrap().write().unwrap();
    let tree = repo.find_tree(tree_id).unwrap();

    let parents: Vec<Commit<'_>> = parents
        .iter()
        .map(|oid| repo.find_commit(*oid).unwrap())
        .collect();
    let parent_refs: Vec<&Commit<'_>> = parents.iter().collect();

    repo.commit(update_ref, &sig, &sig, message, &tree, &parent_refs)
        .unwrap()
}

/// Commit on top of HEAD with a fixed committer time
pub fn commit_at(repo: &Repository, when: &str, message: &str) -> Oid {
    let parent = repo.head().ok().and_then(|h| h.target());
    let parents: Vec<Oid> = parent.into_iter().collect();
    write_commit(repo, Some("HEAD"), when, &parents, message)
}

/// Commit with explicit parents, moving HEAD to it
pub fn merge_at(repo: &Repository, when: &str, parents: &[Oid]) -> Oid {
    write_commit(repo, Some("HEAD"), when, parents, "merge")
}

/// Parentless commit that no reference points at
pub fn orphan_at(repo: &Repository, when: &str) -> Oid {
    write_commit(repo, None, when, &[], "orphan root")
}

/// Commit with explicit parents that no reference points at
pub fn side_commit_at(repo: &Repository, when: &str, parents: &[Oid]) -> Oid {
    write_commit(repo, None, when, parents, "side branch")
}
