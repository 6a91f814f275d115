use crate::error::{CalverError, Result};
use crate::git::{CommitInfo, Repository};
use chrono::Datelike;
use tracing::debug;

/// Determine the baseline year for `commit`
///
/// An explicit year wins when given. Otherwise the year of the oldest root
/// commit reachable from `commit` is used. Roots with identical timestamps
/// are ordered by object id so the answer never depends on walk order.
///
/// # Arguments
/// * `repo` - Repository to walk
/// * `commit` - Starting point of the ancestry scan
/// * `explicit_year` - Caller supplied year, parsed as an integer
///
/// # Returns
/// * `Ok(i32)` - The baseline year
/// * `Err(InvalidYear)` - If `explicit_year` is not an integer
pub fn resolve_baseline<R: Repository + ?Sized>(
    repo: &R,
    commit: &CommitInfo,
    explicit_year: Option<&str>,
) -> Result<i32> {
    if let Some(year) = explicit_year {
        return year
            .parse::<i32>()
            .map_err(|_| CalverError::InvalidYear(year.to_string()));
    }

    let oldest = find_oldest_root(repo, commit)?;
    debug!(root = %oldest.id, year = oldest.time.year(), "baseline from oldest root commit");
    Ok(oldest.time.year())
}

/// Find the earliest root commit among the ancestors of `commit`
pub fn find_oldest_root<R: Repository + ?Sized>(
    repo: &R,
    commit: &CommitInfo,
) -> Result<CommitInfo> {
    if commit.is_root() {
        return Ok(commit.clone());
    }

    let mut oldest: Option<CommitInfo> = None;
    for candidate in repo.ancestry_full(commit.id)? {
        let candidate = candidate?;
        if !candidate.is_root() {
            continue;
        }

        let older = match &oldest {
            Some(current) => (candidate.time, candidate.id) < (current.time, current.id),
            None => true,
        };
        if older {
            oldest = Some(candidate);
        }
    }

    // Shallow boundaries show up without parents, so some root is always seen
    Ok(oldest.unwrap_or_else(|| commit.clone()))
}
