//! Typed access to individual configuration keys.
//!
//! Every setting is addressed as `section.key` (e.g. `recovery.default_group`)
//! so the CLI can read and write single values without knowing the file
//! layout. [`ConfigKey::set`] validates before storing.

use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use super::error::ConfigError;
use super::file::ConfigFile;
use crate::coordinate::{is_valid_identifier, Field};
use crate::strategy::{format_strategy_list, parse_strategy_list};

/// Largest accepted `recovery.max_entry_kib` (1 GiB).
pub const MAX_ENTRY_KIB_LIMIT: u64 = 1024 * 1024;

/// A configuration setting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ConfigKey {
    RecoveryDefaultGroup,
    RecoveryPlaceholderVersion,
    RecoverySyntheticGroupPrefix,
    RecoverySubstitute,
    RecoveryLowercaseGroup,
    RecoveryLowercaseArtifact,
    RecoveryCommonalityThreshold,
    RecoveryMaxEntryKib,
    RecoveryStrategies,
    InstallMavenCommand,
    InstallPlugin,
    InstallExtraFlags,
    InstallLocalRepository,
}

const ALL_KEYS: [ConfigKey; 13] = [
    ConfigKey::RecoveryDefaultGroup,
    ConfigKey::RecoveryPlaceholderVersion,
    ConfigKey::RecoverySyntheticGroupPrefix,
    ConfigKey::RecoverySubstitute,
    ConfigKey::RecoveryLowercaseGroup,
    ConfigKey::RecoveryLowercaseArtifact,
    ConfigKey::RecoveryCommonalityThreshold,
    ConfigKey::RecoveryMaxEntryKib,
    ConfigKey::RecoveryStrategies,
    ConfigKey::InstallMavenCommand,
    ConfigKey::InstallPlugin,
    ConfigKey::InstallExtraFlags,
    ConfigKey::InstallLocalRepository,
];

impl ConfigKey {
    /// Every key, grouped by section in file order.
    pub fn all() -> &'static [ConfigKey] {
        &ALL_KEYS
    }

    /// Full `section.key` name.
    pub fn name(&self) -> &'static str {
        match self {
            Self::RecoveryDefaultGroup => "recovery.default_group",
            Self::RecoveryPlaceholderVersion => "recovery.placeholder_version",
            Self::RecoverySyntheticGroupPrefix => "recovery.synthetic_group_prefix",
            Self::RecoverySubstitute => "recovery.substitute",
            Self::RecoveryLowercaseGroup => "recovery.lowercase_group",
            Self::RecoveryLowercaseArtifact => "recovery.lowercase_artifact",
            Self::RecoveryCommonalityThreshold => "recovery.commonality_threshold",
            Self::RecoveryMaxEntryKib => "recovery.max_entry_kib",
            Self::RecoveryStrategies => "recovery.strategies",
            Self::InstallMavenCommand => "install.maven_command",
            Self::InstallPlugin => "install.install_plugin",
            Self::InstallExtraFlags => "install.extra_flags",
            Self::InstallLocalRepository => "install.local_repository",
        }
    }

    /// INI section of the key.
    pub fn section(&self) -> &'static str {
        self.split().0
    }

    /// Key name within its section.
    pub fn key_name(&self) -> &'static str {
        self.split().1
    }

    fn split(&self) -> (&'static str, &'static str) {
        let name = self.name();
        name.split_once('.').unwrap_or(("", name))
    }

    /// Current value rendered as it appears in the file.
    pub fn get(&self, config: &ConfigFile) -> String {
        let recovery = &config.recovery;
        let install = &config.install;
        match self {
            Self::RecoveryDefaultGroup => recovery.default_group.clone(),
            Self::RecoveryPlaceholderVersion => recovery.placeholder_version.clone(),
            Self::RecoverySyntheticGroupPrefix => recovery.synthetic_group_prefix.clone(),
            Self::RecoverySubstitute => recovery.substitute.to_string(),
            Self::RecoveryLowercaseGroup => recovery.lowercase_group.to_string(),
            Self::RecoveryLowercaseArtifact => recovery.lowercase_artifact.to_string(),
            Self::RecoveryCommonalityThreshold => recovery.commonality_threshold.to_string(),
            Self::RecoveryMaxEntryKib => recovery.max_entry_kib.to_string(),
            Self::RecoveryStrategies => format_strategy_list(&recovery.strategies),
            Self::InstallMavenCommand => install.maven_command.clone(),
            Self::InstallPlugin => install.install_plugin.clone(),
            Self::InstallExtraFlags => install.extra_flags.clone(),
            Self::InstallLocalRepository => install
                .local_repository
                .as_ref()
                .map(|p| p.display().to_string())
                .unwrap_or_default(),
        }
    }

    /// Validate and store a value.
    pub fn set(&self, config: &mut ConfigFile, value: &str) -> Result<(), ConfigError> {
        let value = value.trim();
        let invalid = |reason: &str| ConfigError::InvalidValue {
            key: self.name().to_string(),
            value: value.to_string(),
            reason: reason.to_string(),
        };
        let recovery = &mut config.recovery;
        let install = &mut config.install;

        match self {
            Self::RecoveryDefaultGroup => {
                if !is_valid_identifier(Field::GroupId, value) {
                    return Err(invalid("not a valid groupId"));
                }
                recovery.default_group = value.to_string();
            }
            Self::RecoveryPlaceholderVersion => {
                if !is_valid_identifier(Field::Version, value) {
                    return Err(invalid("not a valid version"));
                }
                recovery.placeholder_version = value.to_string();
            }
            Self::RecoverySyntheticGroupPrefix => {
                if !value.is_empty() && !is_valid_identifier(Field::GroupId, value) {
                    return Err(invalid("not a valid groupId prefix"));
                }
                recovery.synthetic_group_prefix = value.to_string();
            }
            Self::RecoverySubstitute => {
                let mut chars = value.chars();
                match (chars.next(), chars.next()) {
                    (Some(c), None) if c.is_ascii_alphanumeric() || c == '_' || c == '-' => {
                        recovery.substitute = c;
                    }
                    _ => return Err(invalid("expected one of '_', '-' or a letter or digit")),
                }
            }
            Self::RecoveryLowercaseGroup => {
                recovery.lowercase_group =
                    parse_bool(value).ok_or_else(|| invalid("expected true or false"))?;
            }
            Self::RecoveryLowercaseArtifact => {
                recovery.lowercase_artifact =
                    parse_bool(value).ok_or_else(|| invalid("expected true or false"))?;
            }
            Self::RecoveryCommonalityThreshold => {
                let threshold: f64 = value
                    .parse()
                    .map_err(|_| invalid("expected a number between 0.0 and 1.0"))?;
                if !(0.0..=1.0).contains(&threshold) {
                    return Err(invalid("expected a number between 0.0 and 1.0"));
                }
                recovery.commonality_threshold = threshold;
            }
            Self::RecoveryMaxEntryKib => {
                let range = format!("expected a whole number of KiB from 1 to {}", MAX_ENTRY_KIB_LIMIT);
                let kib: u64 = value.parse().map_err(|_| invalid(&range))?;
                if !(1..=MAX_ENTRY_KIB_LIMIT).contains(&kib) {
                    return Err(invalid(&range));
                }
                recovery.max_entry_kib = kib;
            }
            Self::RecoveryStrategies => {
                recovery.strategies =
                    parse_strategy_list(value).map_err(|e| invalid(&e.to_string()))?;
            }
            Self::InstallMavenCommand => {
                if value.is_empty() {
                    return Err(invalid("must not be empty"));
                }
                install.maven_command = value.to_string();
            }
            Self::InstallPlugin => {
                if value.is_empty() || value.contains(char::is_whitespace) {
                    return Err(invalid("expected groupId:artifactId:version or a plugin prefix"));
                }
                install.install_plugin = value.to_string();
            }
            Self::InstallExtraFlags => {
                install.extra_flags = value.to_string();
            }
            Self::InstallLocalRepository => {
                install.local_repository = if value.is_empty() {
                    None
                } else {
                    Some(expand_home(value))
                };
            }
        }

        Ok(())
    }
}

impl fmt::Display for ConfigKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ConfigKey {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        ALL_KEYS
            .into_iter()
            .find(|key| key.name().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| ConfigError::UnknownKey(wanted.to_string()))
    }
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.to_ascii_lowercase().as_str() {
        "true" | "yes" | "on" | "1" => Some(true),
        "false" | "no" | "off" | "0" => Some(false),
        _ => None,
    }
}

/// Expand a leading `~/` to the home directory.
fn expand_home(value: &str) -> PathBuf {
    match (value.strip_prefix("~/"), dirs::home_dir()) {
        (Some(rest), Some(home)) => home.join(rest),
        _ => PathBuf::from(value),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::strategy::Strategy;

    #[test]
    fn test_names_parse_back() {
        for key in ConfigKey::all() {
            assert_eq!(key.name().parse::<ConfigKey>().unwrap(), *key);
            assert_eq!(
                format!("{}.{}", key.section(), key.key_name()),
                key.name()
            );
        }
        assert!("recovery.nope".parse::<ConfigKey>().is_err());
    }

    #[test]
    fn test_get_defaults() {
        let config = ConfigFile::default();
        assert_eq!(ConfigKey::RecoveryDefaultGroup.get(&config), "local.unknown");
        assert_eq!(ConfigKey::RecoverySubstitute.get(&config), "_");
        assert_eq!(
            ConfigKey::RecoveryStrategies.get(&config),
            "descriptor,manifest,layout,path,filename,fallback"
        );
        assert_eq!(ConfigKey::InstallLocalRepository.get(&config), "");
    }

    #[test]
    fn test_set_valid_values() {
        let mut config = ConfigFile::default();
        ConfigKey::RecoveryDefaultGroup.set(&mut config, " com.vendor ").unwrap();
        ConfigKey::RecoveryLowercaseArtifact.set(&mut config, "yes").unwrap();
        ConfigKey::RecoveryCommonalityThreshold.set(&mut config, "0.5").unwrap();
        ConfigKey::RecoveryStrategies.set(&mut config, "path, descriptor").unwrap();
        ConfigKey::InstallLocalRepository.set(&mut config, "/srv/m2").unwrap();
        ConfigKey::RecoveryMaxEntryKib
            .set(&mut config, &MAX_ENTRY_KIB_LIMIT.to_string())
            .unwrap();

        assert_eq!(config.recovery.default_group, "com.vendor");
        assert!(config.recovery.lowercase_artifact);
        assert_eq!(config.recovery.commonality_threshold, 0.5);
        assert_eq!(
            config.recovery.strategies,
            vec![Strategy::PathConvention, Strategy::EmbeddedDescriptor]
        );
        assert_eq!(config.install.local_repository, Some(PathBuf::from("/srv/m2")));
        assert_eq!(config.recovery.max_entry_kib, MAX_ENTRY_KIB_LIMIT);

        ConfigKey::InstallLocalRepository.set(&mut config, "").unwrap();
        assert_eq!(config.install.local_repository, None);
    }

    #[test]
    fn test_set_rejects_invalid_values() {
        let mut config = ConfigFile::default();
        let cases = [
            (ConfigKey::RecoveryDefaultGroup, "com/vendor"),
            (ConfigKey::RecoveryPlaceholderVersion, ""),
            (ConfigKey::RecoverySubstitute, "/"),
            (ConfigKey::RecoverySubstitute, "__"),
            (ConfigKey::RecoveryLowercaseGroup, "maybe"),
            (ConfigKey::RecoveryCommonalityThreshold, "1.5"),
            (ConfigKey::RecoveryMaxEntryKib, "0"),
            (ConfigKey::RecoveryMaxEntryKib, "18014398509481984"),
            (ConfigKey::RecoveryMaxEntryKib, "1048577"),
            (ConfigKey::RecoveryStrategies, "descriptor,guess"),
            (ConfigKey::InstallMavenCommand, "  "),
            (ConfigKey::InstallPlugin, "a b"),
        ];
        for (key, value) in cases {
            let err = key.set(&mut config, value).unwrap_err();
            assert!(
                matches!(err, ConfigError::InvalidValue { .. }),
                "{} = {:?} should be rejected",
                key,
                value
            );
        }
        assert_eq!(config, ConfigFile::default());
    }
}
