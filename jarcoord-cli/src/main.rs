//! jarcoord CLI - recover Maven coordinates for bare jars and install them.
//!
//! The library does the recovery; this binary wires configuration, logging,
//! progress output and exit codes around it.

mod commands;
mod error;
mod runner;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{ArgAction, Parser, Subcommand};
use console::style;
use jarcoord::logging::{init_logging, LogSettings};

use commands::config::ConfigCommands;
use commands::install::InstallArgs;
use commands::scan::ScanArgs;
use error::CliError;

#[derive(Debug, Parser)]
#[command(name = "jarcoord")]
#[command(version = jarcoord::VERSION)]
#[command(about = "Recover Maven coordinates for jars and install them locally", long_about = None)]
struct Cli {
    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    /// Also write logs to this file
    #[arg(long, value_name = "PATH", global = true)]
    log_file: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Recover coordinates and print them without installing
    Scan {
        /// Jar files or directories to search recursively
        #[arg(required = true, value_name = "PATH")]
        paths: Vec<PathBuf>,

        /// Print a JSON array instead of one line per jar
        #[arg(long)]
        json: bool,

        /// Number of worker threads (default: one per CPU)
        #[arg(short, long, value_name = "N")]
        jobs: Option<usize>,
    },

    /// Recover coordinates and install jars into the local Maven repository
    Install {
        /// Jar files or directories to search recursively
        #[arg(required = true, value_name = "PATH")]
        paths: Vec<PathBuf>,

        /// Print the Maven commands instead of running them
        #[arg(long)]
        dry_run: bool,

        /// Overwrite artifacts installed with different content
        #[arg(long)]
        force: bool,

        /// Number of worker threads used for recovery
        #[arg(short, long, value_name = "N")]
        jobs: Option<usize>,
    },

    /// View or change configuration settings
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },

    /// Create the configuration file with default values
    Init,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let mut settings = LogSettings::new(cli.verbose);
    if let Some(path) = &cli.log_file {
        settings = settings.with_log_file(path);
    }
    let _log_guard = match init_logging(&settings) {
        Ok(guard) => guard,
        Err(e) => return report(CliError::Logging(e)),
    };

    match dispatch(cli.command) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => report(e),
    }
}

fn dispatch(command: Commands) -> Result<(), CliError> {
    match command {
        Commands::Scan { paths, json, jobs } => commands::scan::run(ScanArgs { paths, json, jobs }),
        Commands::Install {
            paths,
            dry_run,
            force,
            jobs,
        } => commands::install::run(InstallArgs {
            paths,
            dry_run,
            force,
            jobs,
        }),
        Commands::Config { command } => commands::config::run(command),
        Commands::Init => commands::init::run(),
    }
}

fn report(error: CliError) -> ExitCode {
    eprintln!("{} {}", style("Error:").red().bold(), error);
    ExitCode::FAILURE
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_is_well_formed() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_scan() {
        let cli = Cli::try_parse_from(["jarcoord", "-vv", "scan", "libs", "a.jar", "--json", "-j", "4"])
            .unwrap();
        assert_eq!(cli.verbose, 2);
        match cli.command {
            Commands::Scan { paths, json, jobs } => {
                assert_eq!(paths, vec![PathBuf::from("libs"), PathBuf::from("a.jar")]);
                assert!(json);
                assert_eq!(jobs, Some(4));
            }
            other => panic!("unexpected command {:?}", other),
        }
    }

    #[test]
    fn test_parse_install_flags() {
        let cli = Cli::try_parse_from([
            "jarcoord",
            "install",
            "--dry-run",
            "--force",
            "libs",
            "--log-file",
            "/tmp/jarcoord.log",
        ])
        .unwrap();
        assert_eq!(cli.log_file, Some(PathBuf::from("/tmp/jarcoord.log")));
        match cli.command {
            Commands::Install {
                dry_run,
                force,
                jobs,
                ..
            } => {
                assert!(dry_run);
                assert!(force);
                assert_eq!(jobs, None);
            }
            other => panic!("unexpected command {:?}", other),
        }
    }

    #[test]
    fn test_scan_requires_a_path() {
        assert!(Cli::try_parse_from(["jarcoord", "scan"]).is_err());
    }

    #[test]
    fn test_parse_config_set() {
        let cli = Cli::try_parse_from([
            "jarcoord",
            "config",
            "set",
            "recovery.default_group",
            "com.acme",
        ])
        .unwrap();
        assert!(matches!(
            cli.command,
            Commands::Config {
                command: ConfigCommands::Set { .. }
            }
        ));
    }
}
