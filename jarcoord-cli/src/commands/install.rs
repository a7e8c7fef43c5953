//! Install command - recover coordinates and install into the local repository.

use std::path::PathBuf;

use indicatif::{ProgressBar, ProgressStyle};
use jarcoord::install::{InstallError, InstallOutcome, Installer, MavenInstaller};
use jarcoord::resolver::BatchItem;
use tracing::{info, warn};

use super::common::{failure_line, recovery_failure_line, recovery_line};
use crate::error::CliError;
use crate::runner::CliRunner;

/// Arguments for the install command.
pub struct InstallArgs {
    pub paths: Vec<PathBuf>,
    pub dry_run: bool,
    pub force: bool,
    pub jobs: Option<usize>,
}

/// Counts reported after a batch.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct InstallSummary {
    pub installed: usize,
    pub already_present: usize,
    pub failed: usize,
    pub total: usize,
}

impl InstallSummary {
    fn succeeded(&self) -> usize {
        self.installed + self.already_present
    }
}

/// Run the install command.
pub fn run(args: InstallArgs) -> Result<(), CliError> {
    let runner = CliRunner::new()?;
    runner.log_startup("install");

    let installer = runner.installer(args.force);
    let repository = installer
        .config()
        .repository_root()
        .ok_or(InstallError::NoLocalRepository)?;
    info!(repository = %repository.display(), "Local repository");

    let discovery = runner.discover(&args.paths)?;
    let resolver = runner.resolver();
    let items = runner.recover_all(&resolver, &discovery.archives, args.jobs)?;

    let summary = if args.dry_run {
        print_dry_run(&installer, &items)
    } else {
        install_batch(&installer, &items, progress_bar(items.len() as u64))
    };

    let verb = if args.dry_run {
        "would be installed"
    } else {
        "installed"
    };
    println!();
    println!("{}/{} jars {}", summary.succeeded(), summary.total, verb);
    if summary.already_present > 0 {
        println!("  {} already present", summary.already_present);
    }

    if summary.failed > 0 {
        return Err(CliError::Incomplete {
            failed: summary.failed,
            total: summary.total,
        });
    }
    Ok(())
}

fn progress_bar(len: u64) -> ProgressBar {
    let bar = ProgressBar::new(len);
    match ProgressStyle::with_template("{spinner} [{bar:40}] {pos}/{len} {wide_msg}") {
        Ok(style) => bar.set_style(style.progress_chars("=> ")),
        Err(e) => warn!(error = %e, "Invalid progress template"),
    }
    bar
}

fn print_dry_run(installer: &MavenInstaller, items: &[BatchItem]) -> InstallSummary {
    let mut summary = InstallSummary {
        total: items.len(),
        ..Default::default()
    };
    for item in items {
        match &item.result {
            Ok(recovery) => {
                println!("{}", recovery_line(recovery));
                println!(
                    "  {}",
                    installer.command_line(&recovery.path, &recovery.coordinate)
                );
                summary.installed += 1;
            }
            Err(e) => {
                eprintln!("{}", recovery_failure_line(e));
                summary.failed += 1;
            }
        }
    }
    summary
}

/// Install every recovered archive one at a time.
///
/// Maven serializes on the local repository anyway, so installs never run
/// in parallel. Failures are reported and the batch continues.
pub fn install_batch(
    installer: &dyn Installer,
    items: &[BatchItem],
    progress: ProgressBar,
) -> InstallSummary {
    let mut summary = InstallSummary {
        total: items.len(),
        ..Default::default()
    };

    for item in items {
        progress.set_message(item.path.display().to_string());
        match &item.result {
            Ok(recovery) => match installer.install(&recovery.path, &recovery.coordinate) {
                Ok(InstallOutcome::Installed { .. }) => {
                    progress.println(recovery_line(recovery));
                    summary.installed += 1;
                }
                Ok(InstallOutcome::AlreadyPresent { target }) => {
                    progress.println(format!(
                        "{} (already present at {})",
                        recovery_line(recovery),
                        target.display()
                    ));
                    summary.already_present += 1;
                }
                Err(e) => {
                    progress.println(failure_line(&recovery.path, &e));
                    summary.failed += 1;
                }
            },
            Err(e) => {
                progress.println(recovery_failure_line(e));
                summary.failed += 1;
            }
        }
        progress.inc(1);
    }

    progress.finish_and_clear();
    summary
}
