//! Main workflow orchestration logic
//!
//! Opens the repository, then either versions a revision or maps a version
//! string back to its commit. It takes an explicit [VersionOptions] so the
//! workflow can be driven programmatically without clap.

use std::fmt;
use std::path::Path;

use git2::Oid;
use tracing::debug;

use crate::analyzer::CalverAnalyzer;
use crate::config::VersionOptions;
use crate::domain::VersionFields;
use crate::error::Result;
use crate::git::{Git2Repository, Repository};

/// Result of a successful workflow run
#[derive(Debug, Clone, PartialEq)]
pub enum WorkflowOutput {
    /// Rendered version string
    Version(String),
    /// Commit found by an inverse lookup
    Commit(Oid),
}

impl fmt::Display for WorkflowOutput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WorkflowOutput::Version(version) => f.write_str(version),
            WorkflowOutput::Commit(oid) => write!(f, "{}", oid),
        }
    }
}

/// Run the workflow against the repository containing `path`
///
/// # Returns
///
/// The version string, or the commit id when `options.inverse` is set
pub fn run_workflow(path: &Path, options: &VersionOptions) -> Result<WorkflowOutput> {
    let repo = Git2Repository::open(path)?;
    run_with_repository(&repo, options)
}

/// Run the workflow against an already opened repository
pub fn run_with_repository<R: Repository + ?Sized>(
    repo: &R,
    options: &VersionOptions,
) -> Result<WorkflowOutput> {
    let analyzer = CalverAnalyzer::new(options.year.clone(), options.scan);

    match &options.inverse {
        Some(version) => {
            let fields = VersionFields::parse(version, &options.prefix, &options.separator)?;
            debug!(%fields, "inverse lookup");
            let oid = analyzer.commit_for(repo, fields)?;
            Ok(WorkflowOutput::Commit(oid))
        }
        None => {
            let fields = analyzer.version_of(repo, &options.rev)?;
            Ok(WorkflowOutput::Version(fields.format(
                &options.prefix,
                &options.separator,
                options.short,
            )))
        }
    }
}
