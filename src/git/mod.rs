//! Git operations abstraction layer
//!
//! This module provides a trait-based abstraction over the read-only Git
//! queries git-calver needs, allowing for multiple implementations including
//! real Git repositories and mock implementations for testing.
//!
//! # Overview
//!
//! The primary abstraction is the [Repository] trait. The concrete
//! implementations include:
//!
//! - [repository::Git2Repository]: A real implementation using the `git2` crate
//! - [mock::MockRepository]: An in-memory implementation for testing
//!
//! # Traversal orders
//!
//! Two ancestry walks are exposed:
//!
//! - [Repository::ancestry_post_order] yields commits newest first, the
//!   order `git log` prints them in. A commit is never yielded before a
//!   descendant that is reachable from the starting point.
//! - [Repository::ancestry_full] yields every reachable commit in no
//!   particular order and is only used to locate root commits.
//!
//! Both return boxed iterators that borrow the repository. The underlying
//! walk is released when the iterator is dropped, whether it was exhausted
//! or abandoned early.
//!
//! ```rust
//! # use git_calver::git::Repository;
//! # fn example<R: Repository>(repo: &R) -> git_calver::Result<()> {
//! if let Some(head) = repo.head()? {
//!     for commit in repo.ancestry_post_order(head.id)? {
//!         let commit = commit?;
//!         println!("{} {}", commit.id, commit.time);
//!     }
//! }
//! # Ok(())
//! # }
//! ```

pub mod mock;
pub mod repository;

pub use mock::MockRepository;
pub use repository::Git2Repository;

use crate::error::Result;
use chrono::{DateTime, Utc};
use git2::Oid;

/// Commit metadata needed for version derivation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommitInfo {
    /// The full commit id
    pub id: Oid,
    /// Committer timestamp, normalised to UTC
    pub time: DateTime<Utc>,
    /// Parent commit ids, first parent first
    pub parents: Vec<Oid>,
}

impl CommitInfo {
    /// A root commit has no parents
    pub fn is_root(&self) -> bool {
        self.parents.is_empty()
    }
}

/// Lazy sequence of commits produced by an ancestry walk
pub type Commits<'a> = Box<dyn Iterator<Item = Result<CommitInfo>> + 'a>;

/// Read-only repository queries used by the version algorithm
///
/// ## Error Handling
///
/// All methods return [crate::error::Result<T>]. Implementations map
/// underlying errors (like `git2::Error`) to the matching
/// [crate::error::CalverError] variants, in particular
/// `UnresolvedRevision` and `NotACommit` for revision lookups.
///
/// ## Implementations
///
/// - [Git2Repository](repository::Git2Repository): Real Git implementation using the `git2` crate
/// - [MockRepository](mock::MockRepository): Test implementation with hand-built histories
pub trait Repository {
    /// Get the commit HEAD points at
    ///
    /// # Returns
    /// * `Ok(Some(CommitInfo))` - The HEAD commit
    /// * `Ok(None)` - If the repository has no commits yet
    /// * `Err` - If HEAD cannot be read
    fn head(&self) -> Result<Option<CommitInfo>>;

    /// Resolve a revision string to a commit
    ///
    /// Accepts `HEAD`, symbolic refs, full or abbreviated hashes and any
    /// other revision expression the backend understands. A raw object id
    /// that exists in the object store is accepted even when normal
    /// revision parsing fails.
    ///
    /// # Returns
    /// * `Ok(Some(CommitInfo))` - The resolved commit
    /// * `Ok(None)` - If the repository has no commits yet
    /// * `Err(UnresolvedRevision)` - If nothing matches `rev`
    /// * `Err(NotACommit)` - If `rev` names a tree or blob
    fn resolve(&self, rev: &str) -> Result<Option<CommitInfo>>;

    /// Fetch a commit by id
    fn find_commit(&self, oid: Oid) -> Result<CommitInfo>;

    /// Walk the ancestry of `start` newest first, `start` included
    fn ancestry_post_order(&self, start: Oid) -> Result<Commits<'_>>;

    /// Walk every ancestor of `start` in unspecified order, `start` included
    fn ancestry_full(&self, start: Oid) -> Result<Commits<'_>>;
}
