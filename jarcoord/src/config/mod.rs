//! Configuration file support.
//!
//! Settings live in an INI file (`~/.config/jarcoord/config.ini` on Linux):
//!
//! ```ini
//! [recovery]
//! default_group = local.unknown
//! placeholder_version = 0.0.0-unknown
//! synthetic_group_prefix = local
//! strategies = descriptor,manifest,layout,path,filename,fallback
//!
//! [install]
//! maven_command = mvn
//! local_repository =
//! ```
//!
//! [`ConfigFile`] maps the file onto typed sections and converts them into
//! the library's [`RecoveryConfig`](crate::resolver::RecoveryConfig) and
//! [`InstallConfig`](crate::install::InstallConfig). [`ConfigKey`] addresses
//! single settings for the `config get|set` commands.

mod error;
mod file;
mod keys;

pub use error::ConfigError;
pub use file::{config_file_path, ConfigFile, InstallSettings, RecoverySettings, CONFIG_PATH_ENV};
pub use keys::{ConfigKey, MAX_ENTRY_KIB_LIMIT};
