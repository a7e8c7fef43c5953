//! `jarcoord config` - inspect and change settings.
//!
//! Writes go through [`ConfigFile::update_key`], which touches only the one
//! key, so a file with a bad value elsewhere can still be repaired. `list`
//! prints the file's settings followed by what the resolver and installer
//! will actually run with.

use std::path::Path;

use clap::Subcommand;
use jarcoord::config::{config_file_path, ConfigFile, ConfigKey};
use jarcoord::resolver::Resolver;
use jarcoord::strategy::Strategy;

use crate::error::CliError;

/// Config subcommands.
#[derive(Debug, Subcommand)]
pub enum ConfigCommands {
    /// Print one setting
    Get {
        /// Setting name as section.key (e.g., recovery.strategies)
        key: String,
    },

    /// Validate and store one setting
    Set {
        /// Setting name as section.key (e.g., recovery.default_group)
        key: String,

        /// New value; an empty string clears optional settings
        value: String,
    },

    /// Show every setting and the effective recovery chain
    List,

    /// Print the configuration file location
    Path,
}

/// Run a config subcommand.
pub fn run(command: ConfigCommands) -> Result<(), CliError> {
    let path = config_file_path();
    match command {
        ConfigCommands::Get { key } => {
            let key = lookup_key(&key)?;
            let value = key.get(&ConfigFile::load()?);
            println!("{}", display_value(&value));
        }
        ConfigCommands::Set { key, value } => {
            let key = lookup_key(&key)?;
            println!("{}", apply_set(&path, key, &value)?);
        }
        ConfigCommands::List => print!("{}", render_listing(&ConfigFile::load()?)),
        ConfigCommands::Path => println!("{}", path.display()),
    }
    Ok(())
}

fn lookup_key(name: &str) -> Result<ConfigKey, CliError> {
    name.parse().map_err(|_| {
        let known: Vec<&str> = ConfigKey::all().iter().map(ConfigKey::name).collect();
        CliError::Config(format!(
            "Unknown configuration key '{}'. Known keys: {}",
            name,
            known.join(", ")
        ))
    })
}

fn display_value(value: &str) -> &str {
    if value.is_empty() {
        "(not set)"
    } else {
        value
    }
}

/// Store one key and describe the result.
///
/// Mentions any other value that still keeps the file from loading.
fn apply_set(path: &Path, key: ConfigKey, value: &str) -> Result<String, CliError> {
    let stored = ConfigFile::update_key(path, key, value)?;
    let mut message = format!("Set {} = {}", key.name(), display_value(&stored));

    match ConfigFile::load_from(path) {
        Ok(config) if key == ConfigKey::RecoveryStrategies => {
            message.push_str(&format!("\nEffective chain: {}", chain_summary(&config)));
        }
        Ok(_) => {}
        Err(e) => message.push_str(&format!("\nThe file still has problems: {}", e)),
    }
    Ok(message)
}

fn chain_summary(config: &ConfigFile) -> String {
    Resolver::new(config.recovery_config())
        .chain()
        .iter()
        .map(Strategy::name)
        .collect::<Vec<_>>()
        .join(" > ")
}

/// File settings per section, then the values the commands derive from them.
fn render_listing(config: &ConfigFile) -> String {
    let mut out = String::new();
    let mut current_section = "";

    for key in ConfigKey::all() {
        if key.section() != current_section {
            if !current_section.is_empty() {
                out.push('\n');
            }
            current_section = key.section();
            out.push_str(&format!("[{}]\n", current_section));
        }
        out.push_str(&format!(
            "  {} = {}\n",
            key.key_name(),
            display_value(&key.get(config))
        ));
    }

    let resolver = Resolver::new(config.recovery_config());
    let rules = resolver.normalizer().rules();
    let repository = config
        .install_config()
        .repository_root()
        .map(|root| root.display().to_string())
        .unwrap_or_else(|| "(not found)".to_string());

    out.push_str("\nEffective\n");
    out.push_str(&format!("  chain = {}\n", chain_summary(config)));
    out.push_str(&format!(
        "  max_entry_bytes = {}\n",
        resolver.config().max_entry_bytes
    ));
    out.push_str(&format!("  substitute = {}\n", rules.substitute));
    out.push_str(&format!(
        "  placeholder = {}:<file name>:jar:{}\n",
        rules.default_group, rules.placeholder_version
    ));
    out.push_str(&format!("  repository = {}\n", repository));
    out
}
