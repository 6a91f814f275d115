use crate::analyzer::baseline::resolve_baseline;
use crate::analyzer::inverse::invert;
use crate::analyzer::order::{ordinal, ScanMode};
use crate::boundary::BoundaryWarning;
use crate::domain::{CalendarDay, VersionFields};
use crate::error::{CalverError, Result};
use crate::git::Repository;
use git2::Oid;
use tracing::debug;

/// Derives calendar versions from commit history and maps them back
pub struct CalverAnalyzer {
    year: Option<String>,
    mode: ScanMode,
}

impl CalverAnalyzer {
    /// Create a new analyzer
    ///
    /// # Arguments
    /// * `year` - Explicit baseline year; detected from the oldest root when `None`
    /// * `mode` - Same-day scan mode
    pub fn new(year: Option<String>, mode: ScanMode) -> Self {
        CalverAnalyzer { year, mode }
    }

    /// Compute the version fields of the commit `rev` resolves to
    ///
    /// The baseline and the ordinal are taken from HEAD, the same history
    /// [CalverAnalyzer::commit_for] searches. The target stands in for HEAD
    /// only while HEAD is unborn. A repository without commits yields the
    /// all-zero version.
    pub fn version_of<R: Repository + ?Sized>(&self, repo: &R, rev: &str) -> Result<VersionFields> {
        let Some(target) = repo.resolve(rev)? else {
            BoundaryWarning::EmptyRepository.emit();
            return Ok(VersionFields::zero());
        };

        let head = repo.head()?;
        let tip = head.as_ref().unwrap_or(&target);
        let baseline = resolve_baseline(repo, tip, self.year.as_deref())?;
        let order = ordinal(repo, tip.id, &target, self.mode)?;

        let day = CalendarDay::of(target.time);
        if day.year() < baseline {
            BoundaryWarning::YearBeforeBaseline {
                commit: target.id,
                year: day.year(),
                baseline,
            }
            .emit();
        }

        let fields = VersionFields::at(target.time, baseline, order);
        debug!(commit = %target.id, baseline, %fields, "computed version");
        Ok(fields)
    }

    /// Find the commit that produced `fields`, searching from HEAD
    pub fn commit_for<R: Repository + ?Sized>(
        &self,
        repo: &R,
        fields: VersionFields,
    ) -> Result<Oid> {
        let Some(head) = repo.head()? else {
            BoundaryWarning::EmptyRepository.emit();
            return Err(CalverError::NoMatch(fields.to_string()));
        };

        let baseline = resolve_baseline(repo, &head, self.year.as_deref())?;
        invert(repo, &head, baseline, fields, self.mode)
    }
}
