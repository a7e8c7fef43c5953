//! INI configuration file.

use std::path::{Path, PathBuf};

use ini::Ini;
use tracing::debug;

use super::error::ConfigError;
use super::keys::ConfigKey;
use crate::archive::DEFAULT_MAX_ENTRY_BYTES;
use crate::coordinate::{DEFAULT_SUBSTITUTE, FALLBACK_GROUP_ID, FALLBACK_VERSION};
use crate::install::{InstallConfig, DEFAULT_INSTALL_PLUGIN, DEFAULT_MAVEN_COMMAND};
use crate::resolver::{
    RecoveryConfig, DEFAULT_COMMONALITY_THRESHOLD, DEFAULT_SYNTHETIC_GROUP_PREFIX,
};
use crate::strategy::Strategy;

/// Environment variable overriding the config file location.
pub const CONFIG_PATH_ENV: &str = "JARCOORD_CONFIG";

/// Path of the configuration file.
///
/// `$JARCOORD_CONFIG` if set, otherwise `<config dir>/jarcoord/config.ini`
/// (`~/.config/jarcoord/config.ini` on Linux).
pub fn config_file_path() -> PathBuf {
    if let Some(path) = std::env::var_os(CONFIG_PATH_ENV).filter(|p| !p.is_empty()) {
        return PathBuf::from(path);
    }
    dirs::config_dir()
        .or_else(|| dirs::home_dir().map(|home| home.join(".config")))
        .unwrap_or_else(|| PathBuf::from("."))
        .join("jarcoord")
        .join("config.ini")
}

/// `[recovery]` section.
#[derive(Debug, Clone, PartialEq)]
pub struct RecoverySettings {
    pub default_group: String,
    pub placeholder_version: String,
    pub synthetic_group_prefix: String,
    pub substitute: char,
    pub lowercase_group: bool,
    pub lowercase_artifact: bool,
    pub commonality_threshold: f64,
    pub max_entry_kib: u64,
    pub strategies: Vec<Strategy>,
}

impl Default for RecoverySettings {
    fn default() -> Self {
        Self {
            default_group: FALLBACK_GROUP_ID.to_string(),
            placeholder_version: FALLBACK_VERSION.to_string(),
            synthetic_group_prefix: DEFAULT_SYNTHETIC_GROUP_PREFIX.to_string(),
            substitute: DEFAULT_SUBSTITUTE,
            lowercase_group: false,
            lowercase_artifact: false,
            commonality_threshold: DEFAULT_COMMONALITY_THRESHOLD,
            max_entry_kib: DEFAULT_MAX_ENTRY_BYTES / 1024,
            strategies: Strategy::ALL.to_vec(),
        }
    }
}

/// `[install]` section.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstallSettings {
    pub maven_command: String,
    pub install_plugin: String,
    pub extra_flags: String,
    pub local_repository: Option<PathBuf>,
}

impl Default for InstallSettings {
    fn default() -> Self {
        Self {
            maven_command: DEFAULT_MAVEN_COMMAND.to_string(),
            install_plugin: DEFAULT_INSTALL_PLUGIN.to_string(),
            extra_flags: String::new(),
            local_repository: None,
        }
    }
}

/// Contents of `config.ini`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ConfigFile {
    pub recovery: RecoverySettings,
    pub install: InstallSettings,
}

impl ConfigFile {
    /// Load the configuration file, or defaults when it does not exist.
    pub fn load() -> Result<Self, ConfigError> {
        let path = config_file_path();
        if !path.exists() {
            debug!(path = %path.display(), "No config file, using defaults");
            return Ok(Self::default());
        }
        Self::load_from(&path)
    }

    /// Load a specific configuration file.
    ///
    /// Missing keys keep their defaults; unknown keys are ignored.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let ini = Ini::load_from_file(path).map_err(|e| ConfigError::Read {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

        let mut config = Self::default();
        for key in ConfigKey::all() {
            if let Some(value) = ini.get_from(Some(key.section()), key.key_name()) {
                key.set(&mut config, value)?;
            }
        }

        debug!(path = %path.display(), "Loaded config file");
        Ok(config)
    }

    /// Save to the default location.
    pub fn save(&self) -> Result<(), ConfigError> {
        self.save_to(&config_file_path())
    }

    /// Save to a specific path, creating parent directories.
    pub fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        let mut ini = Ini::new();
        for key in ConfigKey::all() {
            ini.with_section(Some(key.section()))
                .set(key.key_name(), key.get(self));
        }
        write_ini(&ini, path)?;

        debug!(path = %path.display(), "Saved config file");
        Ok(())
    }

    /// Change one key in the file at `path`, keeping every other entry as
    /// it is, including values that would not load.
    ///
    /// The value is validated on its own, so a file rejected by
    /// [`load_from`](Self::load_from) can be repaired key by key. Returns
    /// the value as stored.
    pub fn update_key(path: &Path, key: ConfigKey, value: &str) -> Result<String, ConfigError> {
        let mut scratch = Self::default();
        key.set(&mut scratch, value)?;
        let stored = key.get(&scratch);

        let mut ini = if path.exists() {
            Ini::load_from_file(path).map_err(|e| ConfigError::Read {
                path: path.to_path_buf(),
                reason: e.to_string(),
            })?
        } else {
            Ini::new()
        };
        ini.with_section(Some(key.section()))
            .set(key.key_name(), stored.clone());
        write_ini(&ini, path)?;

        debug!(path = %path.display(), key = %key, value = %stored, "Updated config key");
        Ok(stored)
    }

    /// Recovery engine configuration.
    pub fn recovery_config(&self) -> RecoveryConfig {
        let settings = &self.recovery;
        RecoveryConfig::new()
            .with_default_group(settings.default_group.clone())
            .with_placeholder_version(settings.placeholder_version.clone())
            .with_synthetic_group_prefix(settings.synthetic_group_prefix.clone())
            .with_substitute(settings.substitute)
            .with_lowercase_group(settings.lowercase_group)
            .with_lowercase_artifact(settings.lowercase_artifact)
            .with_commonality_threshold(settings.commonality_threshold)
            .with_max_entry_bytes(settings.max_entry_kib.saturating_mul(1024))
            .with_strategies(settings.strategies.iter().copied())
    }

    /// Installer configuration.
    pub fn install_config(&self) -> InstallConfig {
        let settings = &self.install;
        let config = InstallConfig::new()
            .with_maven_command(settings.maven_command.clone())
            .with_install_plugin(settings.install_plugin.clone())
            .with_extra_flags(&settings.extra_flags);
        match &settings.local_repository {
            Some(path) => config.with_local_repository(path.clone()),
            None => config,
        }
    }
}

fn write_ini(ini: &Ini, path: &Path) -> Result<(), ConfigError> {
    let write_error = |source: std::io::Error| ConfigError::Write {
        path: path.to_path_buf(),
        source,
    };

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(write_error)?;
    }
    ini.write_to_file(path).map_err(write_error)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_defaults_match_library_defaults() {
        let config = ConfigFile::default();
        assert_eq!(config.recovery_config(), RecoveryConfig::default());
        assert_eq!(config.install_config(), InstallConfig::default());
    }

    #[test]
    fn test_save_and_load() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("nested").join("config.ini");

        let mut config = ConfigFile::default();
        config.recovery.default_group = "com.vendor".to_string();
        config.recovery.strategies = vec![Strategy::EmbeddedDescriptor, Strategy::PathConvention];
        config.install.local_repository = Some(PathBuf::from("/srv/m2"));
        config.save_to(&path).unwrap();

        let loaded = ConfigFile::load_from(&path).unwrap();
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("config.ini");
        std::fs::write(
            &path,
            "[recovery]\nplaceholder_version = 1.0.0\nunknown_key = x\n\n[install]\nextra_flags = -q -o\n",
        )
        .unwrap();

        let config = ConfigFile::load_from(&path).unwrap();
        assert_eq!(config.recovery.placeholder_version, "1.0.0");
        assert_eq!(config.recovery.default_group, "local.unknown");
        assert_eq!(config.install_config().extra_flags, vec!["-q", "-o"]);
    }

    #[test]
    fn test_invalid_value_is_reported() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("config.ini");
        std::fs::write(&path, "[recovery]\ncommonality_threshold = lots\n").unwrap();

        let err = ConfigFile::load_from(&path).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { .. }));
        assert!(err.to_string().contains("recovery.commonality_threshold"));
    }

    #[test]
    fn test_update_key_repairs_without_losing_settings() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("config.ini");
        std::fs::write(
            &path,
            "[recovery]\ndefault_group = com.vendor\ncommonality_threshold = lots\n\n\
             [install]\nextra_flags = -o\n",
        )
        .unwrap();
        assert!(ConfigFile::load_from(&path).is_err());

        let stored =
            ConfigFile::update_key(&path, ConfigKey::RecoveryCommonalityThreshold, " 0.6 ").unwrap();
        assert_eq!(stored, "0.6");

        let config = ConfigFile::load_from(&path).unwrap();
        assert_eq!(config.recovery.commonality_threshold, 0.6);
        assert_eq!(config.recovery.default_group, "com.vendor");
        assert_eq!(config.install.extra_flags, "-o");
    }

    #[test]
    fn test_update_key_rejects_invalid_value() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("config.ini");
        std::fs::write(&path, "[recovery]\ndefault_group = com.vendor\n").unwrap();

        let err = ConfigFile::update_key(&path, ConfigKey::RecoveryDefaultGroup, "a/b").unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { .. }));
        let config = ConfigFile::load_from(&path).unwrap();
        assert_eq!(config.recovery.default_group, "com.vendor");
    }

    #[test]
    fn test_update_key_creates_missing_file() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("new").join("config.ini");

        ConfigFile::update_key(&path, ConfigKey::RecoveryPlaceholderVersion, "1.0").unwrap();
        let config = ConfigFile::load_from(&path).unwrap();
        assert_eq!(config.recovery.placeholder_version, "1.0");
        assert_eq!(config.recovery.default_group, "local.unknown");
    }

    #[test]
    fn test_recovery_config_translation() {
        let mut config = ConfigFile::default();
        config.recovery.max_entry_kib = 16;
        config.recovery.strategies = vec![Strategy::ManifestAttributes];

        let recovery = config.recovery_config();
        assert_eq!(recovery.max_entry_bytes, 16 * 1024);
        assert_eq!(
            recovery.chain(),
            vec![Strategy::ManifestAttributes, Strategy::FallbackSynthetic]
        );
    }
}
