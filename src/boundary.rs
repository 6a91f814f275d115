use chrono::{DateTime, Utc};
use git2::Oid;
use std::fmt;

/// Warnings that occur when deriving versions near history boundaries.
/// These are non-fatal issues that should be reported to the user.
#[derive(Debug, Clone, PartialEq)]
pub enum BoundaryWarning {
    /// Repository has no commits, the all-zero version is used
    EmptyRepository,
    /// Commit year precedes the baseline year, the offset is clamped to zero
    YearBeforeBaseline { commit: Oid, year: i32, baseline: i32 },
    /// Commit was not seen while walking back from the tip
    UnreachableFromTip { commit: Oid, tip: Oid },
    /// History walk went back in time and then forward again
    ClockSkew {
        commit: Oid,
        time: DateTime<Utc>,
        previous_time: DateTime<Utc>,
    },
}

impl BoundaryWarning {
    /// Log the warning through `tracing`
    pub fn emit(&self) {
        tracing::warn!("{}", self);
    }
}

fn short(oid: &Oid) -> String {
    let hash = oid.to_string();
    hash[..7].to_string()
}

impl fmt::Display for BoundaryWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BoundaryWarning::EmptyRepository => {
                write!(f, "Repository has no commits, using version 0.0.0.0")
            }
            BoundaryWarning::YearBeforeBaseline {
                commit,
                year,
                baseline,
            } => write!(
                f,
                "Commit {} is from {}, before baseline year {}; year offset clamped to 0",
                short(commit),
                year,
                baseline
            ),
            BoundaryWarning::UnreachableFromTip { commit, tip } => write!(
                f,
                "Commit {} is not reachable from {} within its day; ordinal set to 0",
                short(commit),
                short(tip)
            ),
            BoundaryWarning::ClockSkew {
                commit,
                time,
                previous_time,
            } => write!(
                f,
                "Commit {} ({}) follows an older commit ({}) in history order; clock skew may truncate the ordinal",
                short(commit),
                time.to_rfc3339(),
                previous_time.to_rfc3339()
            ),
        }
    }
}
