use crate::error::{CalverError, Result};
use crate::git::{CommitInfo, Commits, Repository};
use chrono::{DateTime, Utc};
use git2::{ObjectType, Oid};
use std::cmp::Reverse;
use std::collections::{BinaryHeap, HashMap, HashSet};

/// Mock repository for testing without actual git operations
///
/// Commits are kept in insertion order. The post-order walk mimics libgit2's
/// time sorting: a frontier ordered by committer time, newest first, with
/// ties going to the commit inserted first.
pub struct MockRepository {
    commits: Vec<CommitInfo>,
    index: HashMap<Oid, usize>,
    objects: HashMap<Oid, ObjectType>,
    refs: HashMap<String, Oid>,
    head: Option<Oid>,
}

impl MockRepository {
    /// Create a new empty mock repository
    pub fn new() -> Self {
        MockRepository {
            commits: Vec::new(),
            index: HashMap::new(),
            objects: HashMap::new(),
            refs: HashMap::new(),
            head: None,
        }
    }

    /// Add a commit to the mock repository and move HEAD to it
    pub fn add_commit(&mut self, oid: Oid, time: DateTime<Utc>, parents: &[Oid]) {
        self.add_detached_commit(oid, time, parents);
        self.head = Some(oid);
    }

    /// Add a commit without touching HEAD, e.g. an orphan branch
    pub fn add_detached_commit(&mut self, oid: Oid, time: DateTime<Utc>, parents: &[Oid]) {
        self.index.insert(oid, self.commits.len());
        self.commits.push(CommitInfo {
            id: oid,
            time,
            parents: parents.to_vec(),
        });
    }

    /// Add a non-commit object such as a tree or blob
    pub fn add_object(&mut self, oid: Oid, kind: ObjectType) {
        self.objects.insert(oid, kind);
    }

    /// Point a named reference at an object
    pub fn set_ref(&mut self, name: impl Into<String>, oid: Oid) {
        self.refs.insert(name.into(), oid);
    }

    /// Move HEAD
    pub fn set_head(&mut self, oid: Oid) {
        self.head = Some(oid);
    }

    fn lookup(&self, rev: &str) -> Option<Oid> {
        if let Some(oid) = self.refs.get(rev) {
            return Some(*oid);
        }

        let rev = rev.to_ascii_lowercase();
        let mut matches = self
            .index
            .keys()
            .chain(self.objects.keys())
            .filter(|oid| oid.to_string().starts_with(&rev));

        match (matches.next(), matches.next()) {
            (Some(oid), None) if rev.len() >= 4 => Some(*oid),
            _ => None,
        }
    }

    fn reachable(&self, start: Oid) -> Result<Vec<CommitInfo>> {
        let mut seen = HashSet::new();
        let mut stack = vec![start];
        let mut commits = Vec::new();

        while let Some(oid) = stack.pop() {
            if !seen.insert(oid) {
                continue;
            }
            let commit = self.find_commit(oid)?;
            stack.extend(commit.parents.iter().copied());
            commits.push(commit);
        }

        Ok(commits)
    }
}

impl Default for MockRepository {
    fn default() -> Self {
        Self::new()
    }
}

impl Repository for MockRepository {
    fn head(&self) -> Result<Option<CommitInfo>> {
        self.head.map(|oid| self.find_commit(oid)).transpose()
    }

    fn resolve(&self, rev: &str) -> Result<Option<CommitInfo>> {
        if rev == "HEAD" || self.commits.is_empty() {
            return self.head();
        }

        let oid = self
            .lookup(rev)
            .ok_or_else(|| CalverError::UnresolvedRevision(rev.to_string()))?;

        if let Some(kind) = self.objects.get(&oid) {
            return Err(CalverError::NotACommit {
                rev: rev.to_string(),
                kind: kind.str().to_string(),
            });
        }

        self.find_commit(oid).map(Some)
    }

    fn find_commit(&self, oid: Oid) -> Result<CommitInfo> {
        self.index
            .get(&oid)
            .map(|&i| self.commits[i].clone())
            .ok_or_else(|| git2::Error::from_str(&format!("commit {} not found", oid)).into())
    }

    fn ancestry_post_order(&self, start: Oid) -> Result<Commits<'_>> {
        let mut frontier = BinaryHeap::new();
        let mut queued = HashSet::new();
        let mut order = Vec::new();

        let first = self.find_commit(start)?;
        queued.insert(first.id);
        frontier.push((first.time, Reverse(self.index[&first.id])));

        while let Some((_, Reverse(i))) = frontier.pop() {
            let commit = self.commits[i].clone();
            for parent in &commit.parents {
                if queued.insert(*parent) {
                    let parent = self.find_commit(*parent)?;
                    frontier.push((parent.time, Reverse(self.index[&parent.id])));
                }
            }
            order.push(Ok(commit));
        }

        Ok(Box::new(order.into_iter()))
    }

    fn ancestry_full(&self, start: Oid) -> Result<Commits<'_>> {
        let commits = self.reachable(start)?;
        Ok(Box::new(commits.into_iter().map(Ok)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn oid(n: u8) -> Oid {
        Oid::from_bytes(&[n; 20]).unwrap()
    }

    fn at(hour: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2020, 1, 5, hour, 0, 0).unwrap()
    }

    #[test]
    fn test_mock_repository_basic() {
        let mut repo = MockRepository::new();
        repo.add_commit(oid(1), at(10), &[]);

        let head = repo.head().unwrap().unwrap();
        assert_eq!(head.id, oid(1));
        assert!(head.is_root());
    }

    #[test]
    fn test_mock_repository_default_is_empty() {
        let repo = MockRepository::default();
        assert_eq!(repo.head().unwrap(), None);
        assert_eq!(repo.resolve("anything").unwrap(), None);
    }

    #[test]
    fn test_mock_resolve_refs_and_prefixes() {
        let mut repo = MockRepository::new();
        repo.add_commit(oid(1), at(10), &[]);
        repo.add_commit(oid(2), at(11), &[oid(1)]);
        repo.set_ref("main", oid(2));
        repo.add_object(oid(9), ObjectType::Blob);

        assert_eq!(repo.resolve("main").unwrap().unwrap().id, oid(2));
        assert_eq!(repo.resolve("0101").unwrap().unwrap().id, oid(1));
        assert!(matches!(
            repo.resolve("0909"),
            Err(CalverError::NotACommit { .. })
        ));
        assert!(matches!(
            repo.resolve("ffff"),
            Err(CalverError::UnresolvedRevision(_))
        ));
    }

    #[test]
    fn test_mock_post_order_interleaves_merges_by_time() {
        let mut repo = MockRepository::new();
        repo.add_commit(oid(1), at(1), &[]);
        repo.add_commit(oid(2), at(3), &[oid(1)]);
        repo.add_detached_commit(oid(3), at(2), &[oid(1)]);
        repo.add_commit(oid(4), at(4), &[oid(2), oid(3)]);

        let order: Vec<Oid> = repo
            .ancestry_post_order(oid(4))
            .unwrap()
            .map(|c| c.unwrap().id)
            .collect();
        assert_eq!(order, vec![oid(4), oid(2), oid(3), oid(1)]);
    }

    #[test]
    fn test_mock_full_ancestry_visits_every_commit_once() {
        let mut repo = MockRepository::new();
        repo.add_commit(oid(1), at(1), &[]);
        repo.add_detached_commit(oid(2), at(2), &[]);
        repo.add_commit(oid(3), at(3), &[oid(1), oid(2)]);

        let mut ids: Vec<Oid> = repo
            .ancestry_full(oid(3))
            .unwrap()
            .map(|c| c.unwrap().id)
            .collect();
        ids.sort();
        assert_eq!(ids, vec![oid(1), oid(2), oid(3)]);
    }
}
