//! Init command - write a configuration file with default values.

use std::path::Path;

use jarcoord::config::{config_file_path, ConfigFile};

use crate::error::CliError;

/// Run the init command.
pub fn run() -> Result<(), CliError> {
    let path = config_file_path();

    if path.exists() {
        println!("Configuration file already exists: {}", path.display());
        println!("Use 'jarcoord config list' to review the current settings.");
        return Ok(());
    }

    ConfigFile::default().save_to(&path)?;
    print!("{}", created_message(&path));
    Ok(())
}

fn created_message(path: &Path) -> String {
    format!(
        "Created configuration file: {}\n\
         \n\
         Recovery and install settings are read from this file only.\n\
         Edit it or use 'jarcoord config set <key> <value>' to change them.\n\
         Flags affect a single run: --jobs (scan, install), --force and --dry-run (install).\n",
        path.display()
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_created_message_names_run_flags() {
        let message = created_message(Path::new("/tmp/jarcoord/config.ini"));
        assert!(message.starts_with("Created configuration file: /tmp/jarcoord/config.ini\n"));
        for flag in ["--jobs", "--force", "--dry-run"] {
            assert!(message.contains(flag), "missing {}", flag);
        }
        assert!(!message.contains("override"));
    }
}
