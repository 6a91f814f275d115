use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use git_calver::analyzer::ScanMode;
use git_calver::cli::orchestration;
use git_calver::config::{self, VersionOptions};
use git_calver::ui;
use git_calver::CalverError;

#[derive(clap::Parser)]
#[command(
    name = "git-calver",
    version,
    about = "Derive YEAR.MONTH.DAY.ORDER versions from git commit history"
)]
struct Args {
    #[arg(help = "Repository path (defaults to the current directory)")]
    paths: Vec<PathBuf>,

    #[arg(long, help = "Revision to version [default: HEAD]")]
    rev: Option<String>,

    #[arg(long, help = "Baseline year [default: year of the oldest root commit]")]
    year: Option<String>,

    #[arg(long, help = "Version prefix [default: v]")]
    prefix: Option<String>,

    #[arg(long, help = "Field separator [default: .]")]
    sep: Option<String>,

    #[arg(long, help = "Drop a trailing zero ordinal")]
    short: bool,

    #[arg(long, value_name = "VERSION", help = "Print the commit that produced VERSION")]
    inverse: Option<String>,

    #[arg(long, help = "Walk the whole history when counting same-day commits")]
    full_scan: bool,

    #[arg(short, long, help = "Custom configuration file path")]
    config: Option<PathBuf>,

    #[arg(short, long, help = "Log diagnostics to stderr")]
    verbose: bool,
}

impl Args {
    /// Layer the flags that were given on top of the file configuration
    fn into_options(self, config: &config::Config) -> VersionOptions {
        let mut options = VersionOptions::from_config(config);
        if let Some(rev) = self.rev {
            options.rev = rev;
        }
        if let Some(year) = self.year {
            options.year = Some(year);
        }
        if let Some(prefix) = self.prefix {
            options.prefix = prefix;
        }
        if let Some(sep) = self.sep {
            options.separator = sep;
        }
        if self.short {
            options.short = true;
        }
        if self.full_scan {
            options.scan = ScanMode::Full;
        }
        options.inverse = self.inverse;
        options
    }
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .without_time()
        .with_target(false)
        .init();
}

fn main() {
    let args = Args::parse();
    init_tracing(args.verbose);

    if let Err(e) = run(args) {
        ui::display_error(&format!("{:#}", e));
        std::process::exit(1);
    }
}

fn run(mut args: Args) -> Result<()> {
    let path = match args.paths.len() {
        0 => std::env::current_dir().context("Cannot determine current directory")?,
        1 => args.paths.remove(0),
        _ => {
            return Err(CalverError::usage("cannot specify more than one git directory").into())
        }
    };

    let config = config::load_config(args.config.as_deref(), &path)?;
    let options = args.into_options(&config);

    let output = orchestration::run_workflow(&path, &options)?;
    ui::write_output(&output.to_string())?;

    Ok(())
}
