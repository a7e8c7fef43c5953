//! Configuration for the Maven installer.

use std::path::PathBuf;

/// Default Maven executable.
pub const DEFAULT_MAVEN_COMMAND: &str = "mvn";

/// Default install plugin, pinned so `install-file` behaves the same everywhere.
pub const DEFAULT_INSTALL_PLUGIN: &str = "org.apache.maven.plugins:maven-install-plugin:3.1.1";

/// Configuration for installing archives into a local repository.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstallConfig {
    /// Maven executable name or path.
    pub maven_command: String,

    /// Fully qualified install plugin (`groupId:artifactId:version`).
    pub install_plugin: String,

    /// Extra arguments placed before the goal (e.g., `-q`, `-o`).
    pub extra_flags: Vec<String>,

    /// Local repository root. `None` means `~/.m2/repository`.
    pub local_repository: Option<PathBuf>,

    /// Install over an existing archive with different content.
    pub force: bool,
}

impl Default for InstallConfig {
    fn default() -> Self {
        Self {
            maven_command: DEFAULT_MAVEN_COMMAND.to_string(),
            install_plugin: DEFAULT_INSTALL_PLUGIN.to_string(),
            extra_flags: Vec::new(),
            local_repository: None,
            force: false,
        }
    }
}

impl InstallConfig {
    /// Create a configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the Maven executable.
    pub fn with_maven_command(mut self, command: impl Into<String>) -> Self {
        self.maven_command = command.into();
        self
    }

    /// Set the install plugin.
    pub fn with_install_plugin(mut self, plugin: impl Into<String>) -> Self {
        self.install_plugin = plugin.into();
        self
    }

    /// Set extra Maven flags, split on whitespace.
    pub fn with_extra_flags(mut self, flags: &str) -> Self {
        self.extra_flags = flags.split_whitespace().map(str::to_string).collect();
        self
    }

    /// Set the local repository root.
    pub fn with_local_repository(mut self, path: PathBuf) -> Self {
        self.local_repository = Some(path);
        self
    }

    /// Enable or disable overwriting conflicting installs.
    pub fn with_force(mut self, force: bool) -> Self {
        self.force = force;
        self
    }

    /// Resolve the local repository root.
    pub fn repository_root(&self) -> Option<PathBuf> {
        self.local_repository
            .clone()
            .or_else(|| dirs::home_dir().map(|home| home.join(".m2").join("repository")))
    }
}
