//! Maven `install:install-file` adapter.
//!
//! Runs the install plugin as a subprocess with an argument vector (no
//! shell). Before running Maven the target file in the local repository is
//! checked so repeated installs of the same archive are skipped and
//! accidental overwrites of a different archive are refused.

use std::path::{Path, PathBuf};
use std::process::Command;

use tracing::{debug, info};

use super::checksum::same_content;
use super::config::InstallConfig;
use super::error::{InstallError, InstallResult};
use super::traits::{InstallOutcome, Installer};
use crate::coordinate::FinalCoordinate;

/// Installs archives with the Maven install plugin.
#[derive(Debug, Clone, Default)]
pub struct MavenInstaller {
    config: InstallConfig,
}

impl MavenInstaller {
    /// Create an installer with the given configuration.
    pub fn new(config: InstallConfig) -> Self {
        Self { config }
    }

    /// The active configuration.
    pub fn config(&self) -> &InstallConfig {
        &self.config
    }

    /// Path the archive will occupy in the local repository.
    ///
    /// `<root>/org/example/widget/2.3.1/widget-2.3.1.jar`
    pub fn target_path(&self, coordinate: &FinalCoordinate) -> InstallResult<PathBuf> {
        let root = self
            .config
            .repository_root()
            .ok_or(InstallError::NoLocalRepository)?;

        let mut target = root;
        target.extend(coordinate.group_id().split('.'));
        target.push(coordinate.artifact_id());
        target.push(coordinate.version());
        target.push(coordinate.artifact_filename());
        Ok(target)
    }

    /// Arguments passed to Maven, excluding the executable.
    pub fn arguments(&self, archive: &Path, coordinate: &FinalCoordinate) -> Vec<String> {
        let mut args = self.config.extra_flags.clone();
        args.push(format!("{}:install-file", self.config.install_plugin));
        args.push(format!("-Dfile={}", archive.display()));
        args.push(format!("-DgroupId={}", coordinate.group_id()));
        args.push(format!("-DartifactId={}", coordinate.artifact_id()));
        args.push(format!("-Dversion={}", coordinate.version()));
        args.push(format!("-Dpackaging={}", coordinate.packaging()));
        args.push("-DcreateChecksum=true".to_string());
        if let Some(repository) = &self.config.local_repository {
            args.push(format!("-Dmaven.repo.local={}", repository.display()));
        }
        args
    }

    /// The full command as it would be typed, for dry runs and error messages.
    pub fn command_line(&self, archive: &Path, coordinate: &FinalCoordinate) -> String {
        std::iter::once(self.config.maven_command.clone())
            .chain(self.arguments(archive, coordinate))
            .collect::<Vec<_>>()
            .join(" ")
    }

    fn run(&self, archive: &Path, coordinate: &FinalCoordinate) -> InstallResult<()> {
        let command_line = self.command_line(archive, coordinate);
        debug!(command = %command_line, "Running Maven");

        let output = Command::new(&self.config.maven_command)
            .args(self.arguments(archive, coordinate))
            .output()
            .map_err(|source| InstallError::Io {
                path: PathBuf::from(&self.config.maven_command),
                source,
            })?;

        if !output.status.success() {
            // Maven reports build failures on stdout
            let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
            let detail = if stderr.is_empty() {
                last_error_lines(&String::from_utf8_lossy(&output.stdout))
            } else {
                stderr
            };
            return Err(InstallError::CommandFailed {
                command: command_line,
                status: output.status.code(),
                stderr: detail,
            });
        }

        Ok(())
    }
}

impl Installer for MavenInstaller {
    fn install(
        &self,
        archive: &Path,
        coordinate: &FinalCoordinate,
    ) -> InstallResult<InstallOutcome> {
        if !archive.is_file() {
            return Err(InstallError::Io {
                path: archive.to_path_buf(),
                source: std::io::Error::new(std::io::ErrorKind::NotFound, "archive not found"),
            });
        }

        let target = self.target_path(coordinate)?;
        if target.exists() {
            if same_content(archive, &target)? {
                debug!(target = %target.display(), "Identical archive already installed");
                return Ok(InstallOutcome::AlreadyPresent { target });
            }
            if !self.config.force {
                return Err(InstallError::Conflict {
                    coordinate: coordinate.to_string(),
                    target,
                });
            }
            info!(target = %target.display(), "Overwriting existing archive");
        }

        self.run(archive, coordinate)?;
        info!(
            archive = %archive.display(),
            coordinate = %coordinate,
            "Installed"
        );
        Ok(InstallOutcome::Installed { target })
    }
}

/// Keep the `[ERROR]` lines of Maven output, or its tail when there are none.
fn last_error_lines(stdout: &str) -> String {
    let errors: Vec<&str> = stdout
        .lines()
        .filter(|line| line.starts_with("[ERROR]"))
        .collect();
    let lines = if errors.is_empty() {
        let all: Vec<&str> = stdout.lines().collect();
        all[all.len().saturating_sub(5)..].to_vec()
    } else {
        errors
    };
    lines.join("\n").trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coordinate::{CandidateCoordinate, Confidence, MergedCandidate, Normalizer};
    use tempfile::TempDir;

    fn coordinate(group: &str, artifact: &str, version: &str) -> FinalCoordinate {
        let candidate = CandidateCoordinate::new(Confidence::EmbeddedDescriptor)
            .with_group_id(group)
            .with_artifact_id(artifact)
            .with_version(version);
        Normalizer::default().normalize(&MergedCandidate::from_candidates([&candidate]))
    }

    fn installer(repo: &Path, command: &str) -> MavenInstaller {
        MavenInstaller::new(
            InstallConfig::new()
                .with_maven_command(command)
                .with_local_repository(repo.to_path_buf()),
        )
    }

    #[test]
    fn test_target_path() {
        let installer = installer(Path::new("/repo"), "mvn");
        let target = installer
            .target_path(&coordinate("org.example", "widget", "2.3.1"))
            .unwrap();
        assert_eq!(
            target,
            PathBuf::from("/repo/org/example/widget/2.3.1/widget-2.3.1.jar")
        );
    }

    #[test]
    fn test_command_line() {
        let installer = MavenInstaller::new(InstallConfig::new().with_extra_flags("-q"));
        let line = installer.command_line(
            Path::new("/libs/widget.jar"),
            &coordinate("org.example", "widget", "2.3.1"),
        );
        assert_eq!(
            line,
            "mvn -q org.apache.maven.plugins:maven-install-plugin:3.1.1:install-file \
             -Dfile=/libs/widget.jar -DgroupId=org.example -DartifactId=widget \
             -Dversion=2.3.1 -Dpackaging=jar -DcreateChecksum=true"
        );
    }

    #[test]
    fn test_already_present_skips_maven() {
        let temp = TempDir::new().unwrap();
        let repo = temp.path().join("repo");
        let archive = temp.path().join("widget.jar");
        std::fs::write(&archive, b"jar bytes").unwrap();

        // The command does not exist; reaching it would fail the test.
        let installer = installer(&repo, "jarcoord-no-such-maven");
        let coordinate = coordinate("org.example", "widget", "1.0");
        let target = installer.target_path(&coordinate).unwrap();
        std::fs::create_dir_all(target.parent().unwrap()).unwrap();
        std::fs::write(&target, b"jar bytes").unwrap();

        let outcome = installer.install(&archive, &coordinate).unwrap();
        assert_eq!(outcome, InstallOutcome::AlreadyPresent { target });
    }

    #[test]
    fn test_conflict_without_force() {
        let temp = TempDir::new().unwrap();
        let repo = temp.path().join("repo");
        let archive = temp.path().join("widget.jar");
        std::fs::write(&archive, b"new bytes").unwrap();

        let installer = installer(&repo, "jarcoord-no-such-maven");
        let coordinate = coordinate("org.example", "widget", "1.0");
        let target = installer.target_path(&coordinate).unwrap();
        std::fs::create_dir_all(target.parent().unwrap()).unwrap();
        std::fs::write(&target, b"old bytes").unwrap();

        let err = installer.install(&archive, &coordinate).unwrap_err();
        assert!(matches!(err, InstallError::Conflict { .. }));
    }

    #[test]
    fn test_missing_maven_is_io_error() {
        let temp = TempDir::new().unwrap();
        let archive = temp.path().join("widget.jar");
        std::fs::write(&archive, b"bytes").unwrap();

        let installer = installer(&temp.path().join("repo"), "jarcoord-no-such-maven");
        let err = installer
            .install(&archive, &coordinate("org.example", "widget", "1.0"))
            .unwrap_err();
        assert!(matches!(err, InstallError::Io { .. }));
    }

    #[test]
    fn test_missing_archive() {
        let temp = TempDir::new().unwrap();
        let installer = installer(temp.path(), "mvn");
        let err = installer
            .install(
                &temp.path().join("absent.jar"),
                &coordinate("org.example", "widget", "1.0"),
            )
            .unwrap_err();
        assert!(matches!(err, InstallError::Io { .. }));
    }

    #[cfg(unix)]
    #[test]
    fn test_command_outcomes() {
        let temp = TempDir::new().unwrap();
        let archive = temp.path().join("widget.jar");
        std::fs::write(&archive, b"bytes").unwrap();
        let coordinate = coordinate("org.example", "widget", "1.0");

        let ok = installer(&temp.path().join("repo"), "true");
        assert!(matches!(
            ok.install(&archive, &coordinate).unwrap(),
            InstallOutcome::Installed { .. }
        ));

        let failing = installer(&temp.path().join("repo"), "false");
        let err = failing.install(&archive, &coordinate).unwrap_err();
        assert!(matches!(
            err,
            InstallError::CommandFailed {
                status: Some(1),
                ..
            }
        ));
    }

    #[test]
    fn test_last_error_lines() {
        let stdout = "[INFO] Scanning\n[ERROR] Failed to execute goal\n[INFO] done\n[ERROR] bad file\n";
        assert_eq!(
            last_error_lines(stdout),
            "[ERROR] Failed to execute goal\n[ERROR] bad file"
        );
        assert_eq!(last_error_lines("a\nb\n"), "a\nb");
    }
}
