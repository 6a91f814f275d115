use crate::analyzer::order::{count_same_day_order, ScanMode};
use crate::domain::VersionFields;
use crate::error::{CalverError, Result};
use crate::git::{CommitInfo, Repository};
use git2::Oid;
use tracing::debug;

/// Find the commit whose version equals `target`
///
/// Scans the whole history reachable from `head`, newest first, computing
/// each candidate's fields with the same baseline, ordinal rule and scan
/// mode used to version a single commit. The first exact match wins.
///
/// This is linear in history size times the length of a day's scan; it is
/// meant for occasional lookups, not hot paths.
///
/// # Arguments
/// * `repo` - Repository to search
/// * `head` - Tip of the history to search
/// * `baseline` - Baseline year the version was produced with
/// * `target` - Parsed version fields
/// * `mode` - Same-day scan mode the version was produced with
///
/// # Returns
/// * `Ok(Oid)` - Id of the matching commit
/// * `Err(NoMatch)` - If no commit produces `target`
pub fn invert<R: Repository + ?Sized>(
    repo: &R,
    head: &CommitInfo,
    baseline: i32,
    target: VersionFields,
    mode: ScanMode,
) -> Result<Oid> {
    debug!(
        year = i64::from(baseline) + i64::from(target.year_offset),
        month = target.month,
        day = target.day,
        order = target.order,
        "searching history for version"
    );

    let mut scanned = 0usize;
    for candidate in repo.ancestry_post_order(head.id)? {
        let candidate = candidate?;
        scanned += 1;

        // date fields first, the ordinal needs its own walk
        let dated = VersionFields::at(candidate.time, baseline, target.order);
        if dated != target {
            continue;
        }

        let order = count_same_day_order(repo, head.id, &candidate, mode)?.unwrap_or(0);
        if order == target.order {
            debug!(commit = %candidate.id, scanned, "found matching commit");
            return Ok(candidate.id);
        }
    }

    debug!(scanned, "no commit matched");
    Err(CalverError::NoMatch(target.to_string()))
}
