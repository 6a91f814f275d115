use crate::error::{CalverError, Result};
use crate::git::{CommitInfo, Commits, Repository};
use chrono::DateTime;
use git2::{Commit, ErrorCode, Object, ObjectType, Oid, Repository as Git2Repo, Sort};
use std::path::Path;
use tracing::debug;

/// Wrapper around git2::Repository with our trait interface
pub struct Git2Repository {
    repo: Git2Repo,
}

impl Git2Repository {
    /// Open the repository containing `path`
    ///
    /// Searches `path` and its ancestors, so any directory inside a work
    /// tree is accepted.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let repo = Git2Repo::discover(path).map_err(|source| CalverError::NotARepository {
            path: path.to_path_buf(),
            source,
        })?;

        debug!(git_dir = %repo.path().display(), "opened repository");
        Ok(Git2Repository { repo })
    }

    /// Create from existing git2::Repository
    pub fn from_git2(repo: Git2Repo) -> Self {
        Git2Repository { repo }
    }

    fn commit_info(commit: &Commit<'_>) -> Result<CommitInfo> {
        let seconds = commit.time().seconds();
        let time = DateTime::from_timestamp(seconds, 0).ok_or(CalverError::Timestamp {
            oid: commit.id(),
            seconds,
        })?;

        Ok(CommitInfo {
            id: commit.id(),
            time,
            parents: commit.parent_ids().collect(),
        })
    }

    /// Peel an object to the commit it designates
    ///
    /// Annotated tags are followed to their target; a tag of a tree or blob
    /// is reported with the kind of that target.
    fn peel_to_commit(rev: &str, object: Object<'_>) -> Result<CommitInfo> {
        let target = match object.kind() {
            Some(ObjectType::Tag) => object.peel(ObjectType::Any)?,
            _ => object,
        };

        match target.as_commit() {
            Some(commit) => Self::commit_info(commit),
            None => Err(CalverError::NotACommit {
                rev: rev.to_string(),
                kind: target
                    .kind()
                    .map(|k| k.str())
                    .unwrap_or("unknown object")
                    .to_string(),
            }),
        }
    }

    /// Look `rev` up as a literal object id, bypassing revision parsing
    fn find_raw_object(&self, rev: &str) -> Result<CommitInfo> {
        let unresolved = || CalverError::UnresolvedRevision(rev.to_string());

        let oid = Oid::from_str(rev).map_err(|_| unresolved())?;
        let object = self.repo.find_object(oid, None).map_err(|_| unresolved())?;
        Self::peel_to_commit(rev, object)
    }

    fn walk(&self, start: Oid, sorting: Sort) -> Result<Commits<'_>> {
        let mut revwalk = self.repo.revwalk()?;
        revwalk.set_sorting(sorting)?;
        revwalk.push(start)?;

        let commits = revwalk.map(move |oid| {
            let oid = oid?;
            self.find_commit(oid)
        });

        Ok(Box::new(commits))
    }
}

impl Repository for Git2Repository {
    fn head(&self) -> Result<Option<CommitInfo>> {
        match self.repo.head() {
            Ok(reference) => {
                let commit = reference.peel_to_commit()?;
                Ok(Some(Self::commit_info(&commit)?))
            }
            Err(e) if e.code() == ErrorCode::UnbornBranch || e.code() == ErrorCode::NotFound => {
                debug!("HEAD is unborn, repository has no commits");
                Ok(None)
            }
            Err(e) => Err(e.into()),
        }
    }

    fn resolve(&self, rev: &str) -> Result<Option<CommitInfo>> {
        if rev == "HEAD" || self.repo.is_empty()? {
            return self.head();
        }

        let commit = match self.repo.revparse_single(rev) {
            Ok(object) => Self::peel_to_commit(rev, object)?,
            Err(e) => {
                debug!(rev, error = %e, "revision parse failed, trying raw object id");
                self.find_raw_object(rev)?
            }
        };

        debug!(rev, commit = %commit.id, "resolved revision");
        Ok(Some(commit))
    }

    fn find_commit(&self, oid: Oid) -> Result<CommitInfo> {
        let commit = self.repo.find_commit(oid)?;
        Self::commit_info(&commit)
    }

    fn ancestry_post_order(&self, start: Oid) -> Result<Commits<'_>> {
        self.walk(start, Sort::TIME)
    }

    fn ancestry_full(&self, start: Oid) -> Result<Commits<'_>> {
        self.walk(start, Sort::NONE)
    }
}
