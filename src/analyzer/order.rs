use crate::boundary::BoundaryWarning;
use crate::domain::CalendarDay;
use crate::error::Result;
use crate::git::{CommitInfo, Repository};
use chrono::{DateTime, Utc};
use git2::Oid;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// How far the same-day scan walks back in history
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ScanMode {
    /// Stop at the first commit older than the day. Fast and safe on
    /// shallow clones, but clock skew can hide commits.
    #[default]
    EarlyExit,
    /// Walk the whole history and only filter by day.
    Full,
}

/// Rank of `target` among the commits of its UTC day, newest first
///
/// Walks [Repository::ancestry_post_order] from `tip` and counts every
/// commit whose committer time falls inside the target's day, up to and
/// including the target. Commits from later days are skipped. The result is
/// the count minus one, so the most recent commit of the day is `0`.
///
/// # Returns
/// * `Ok(Some(n))` - The ordinal of `target`
/// * `Ok(None)` - If `target` was not met during the walk
pub fn count_same_day_order<R: Repository + ?Sized>(
    repo: &R,
    tip: Oid,
    target: &CommitInfo,
    mode: ScanMode,
) -> Result<Option<u32>> {
    let day = CalendarDay::of(target.time);
    let mut count = 0u32;
    let mut previous: Option<DateTime<Utc>> = None;

    for commit in repo.ancestry_post_order(tip)? {
        let commit = commit?;

        if let Some(warning) = target_skew(&day, target, &commit, previous) {
            warning.emit();
        }
        previous = Some(commit.time);

        if commit.time < day.start {
            if mode == ScanMode::EarlyExit {
                debug!(stop = %commit.id, "reached the previous day");
                break;
            }
            continue;
        }
        if !day.contains(commit.time) {
            continue;
        }

        count += 1;
        if commit.id == target.id {
            return Ok(Some(count - 1));
        }
    }

    Ok(None)
}

/// Clock skew seen when the walk reaches `target` itself
///
/// Commits passed on the way to the target are not checked, so a scan only
/// warns about the commit it ranks.
fn target_skew(
    day: &CalendarDay,
    target: &CommitInfo,
    commit: &CommitInfo,
    previous: Option<DateTime<Utc>>,
) -> Option<BoundaryWarning> {
    let previous_time = previous?;
    if commit.id != target.id || commit.time <= previous_time || !day.contains(commit.time) {
        return None;
    }

    Some(BoundaryWarning::ClockSkew {
        commit: commit.id,
        time: commit.time,
        previous_time,
    })
}

/// Ordinal of `target` relative to `tip`, falling back to `0`
///
/// A target that cannot be found from the tip, because it lies on another
/// branch or is hidden by clock skew, is ranked as the only commit of its
/// day.
pub fn ordinal<R: Repository + ?Sized>(
    repo: &R,
    tip: Oid,
    target: &CommitInfo,
    mode: ScanMode,
) -> Result<u32> {
    match count_same_day_order(repo, tip, target, mode)? {
        Some(order) => Ok(order),
        None => {
            BoundaryWarning::UnreachableFromTip {
                commit: target.id,
                tip,
            }
            .emit();
            Ok(0)
        }
    }
}
