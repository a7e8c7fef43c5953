//! Shared setup for commands that process archives.

use std::path::PathBuf;

use jarcoord::config::{config_file_path, ConfigFile};
use jarcoord::discovery::{find_archives, Discovery};
use jarcoord::install::{InstallConfig, MavenInstaller};
use jarcoord::resolver::{BatchItem, Resolver};
use tracing::{debug, info};

use crate::error::CliError;

/// Loads configuration and builds the library components for a command.
pub struct CliRunner {
    config: ConfigFile,
}

impl CliRunner {
    /// Load the configuration file.
    pub fn new() -> Result<Self, CliError> {
        let config = ConfigFile::load()?;
        Ok(Self { config })
    }

    /// Log which command runs with which configuration.
    pub fn log_startup(&self, command: &str) {
        info!(version = jarcoord::VERSION, command, "jarcoord starting");
        debug!(config = %config_file_path().display(), "Configuration file");
    }

    /// Resolver built from the `[recovery]` section.
    pub fn resolver(&self) -> Resolver {
        Resolver::new(self.config.recovery_config())
    }

    /// Installer built from the `[install]` section.
    pub fn installer(&self, force: bool) -> MavenInstaller {
        let config: InstallConfig = self.config.install_config().with_force(force);
        MavenInstaller::new(config)
    }

    /// Expand arguments into archives, failing when there are none.
    pub fn discover(&self, paths: &[PathBuf]) -> Result<Discovery, CliError> {
        let discovery = find_archives(paths);
        if discovery.is_empty() {
            return Err(CliError::NoArchives);
        }
        Ok(discovery)
    }

    /// Recover every archive, on a dedicated pool when `jobs` is given.
    pub fn recover_all(
        &self,
        resolver: &Resolver,
        archives: &[PathBuf],
        jobs: Option<usize>,
    ) -> Result<Vec<BatchItem>, CliError> {
        match jobs {
            Some(threads) => {
                let pool = rayon::ThreadPoolBuilder::new()
                    .num_threads(threads.max(1))
                    .build()
                    .map_err(|e| CliError::ThreadPool(e.to_string()))?;
                Ok(pool.install(|| resolver.recover_all(archives)))
            }
            None => Ok(resolver.recover_all(archives)),
        }
    }
}
