//! Installing recovered archives into a local Maven repository.
//!
//! The [`Installer`] trait is the seam between coordinate recovery and the
//! repository tool; [`MavenInstaller`] implements it with
//! `mvn install:install-file`.
//!
//! Installs are idempotent: when the repository already holds an identical
//! archive at the target path the installer reports
//! [`InstallOutcome::AlreadyPresent`] without invoking Maven.

mod checksum;
mod config;
mod error;
mod maven;
mod traits;

pub use checksum::{file_checksum, same_content};
pub use config::{InstallConfig, DEFAULT_INSTALL_PLUGIN, DEFAULT_MAVEN_COMMAND};
pub use error::{InstallError, InstallResult};
pub use maven::MavenInstaller;
pub use traits::{InstallOutcome, Installer};
