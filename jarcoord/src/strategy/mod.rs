//! Metadata extraction strategies.
//!
//! Each strategy inspects one archive and returns what it could find as a
//! [`CandidateCoordinate`] tagged with the strategy's fixed confidence tier,
//! or `None` when it found nothing usable.
//!
//! # Strategy Chain
//!
//! The set of strategies is closed, so they are an enum rather than trait
//! objects. From most to least trustworthy:
//!
//! | Strategy             | Source                                   | Fields           |
//! |----------------------|------------------------------------------|------------------|
//! | `EmbeddedDescriptor` | `META-INF/maven/*/*/pom.xml`, `pom.properties` | all        |
//! | `ManifestAttributes` | `META-INF/MANIFEST.MF`                   | any              |
//! | `PackageLayout`      | dominant package of `.class` entries     | groupId          |
//! | `PathConvention`     | `name-version` file or directory name    | all but packaging|
//! | `FilenameHeuristic`  | file stem without noise suffixes         | artifactId       |
//! | `FallbackSynthetic`  | configured placeholders                  | all but packaging|
//!
//! Strategies never write anything and never fail: malformed input they do
//! not understand is reported as absence.

mod descriptor;
mod fallback;
mod filename;
mod layout;
mod manifest;
mod path;

use std::fmt;
use std::str::FromStr;

use crate::archive::ArchiveHandle;
use crate::coordinate::{CandidateCoordinate, Confidence};
use crate::resolver::RecoveryConfig;

pub use descriptor::{parse_pom, parse_pom_properties, PomFields};
pub use filename::strip_noise_suffixes;
pub use layout::dominant_package;

/// A metadata extraction strategy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Strategy {
    EmbeddedDescriptor,
    ManifestAttributes,
    PackageLayout,
    PathConvention,
    FilenameHeuristic,
    FallbackSynthetic,
}

impl Strategy {
    /// Every strategy, best first.
    pub const ALL: [Strategy; 6] = [
        Strategy::EmbeddedDescriptor,
        Strategy::ManifestAttributes,
        Strategy::PackageLayout,
        Strategy::PathConvention,
        Strategy::FilenameHeuristic,
        Strategy::FallbackSynthetic,
    ];

    /// Confidence tier of every candidate this strategy produces.
    pub fn confidence(&self) -> Confidence {
        match self {
            Self::EmbeddedDescriptor => Confidence::EmbeddedDescriptor,
            Self::ManifestAttributes => Confidence::ManifestAttributes,
            Self::PackageLayout => Confidence::PackageLayout,
            Self::PathConvention => Confidence::PathConvention,
            Self::FilenameHeuristic => Confidence::FilenameHeuristic,
            Self::FallbackSynthetic => Confidence::FallbackSynthetic,
        }
    }

    /// Name used in configuration files and logs.
    pub fn name(&self) -> &'static str {
        self.confidence().label()
    }

    /// Run the strategy against an archive.
    pub fn extract(
        &self,
        archive: &mut ArchiveHandle,
        config: &RecoveryConfig,
    ) -> Option<CandidateCoordinate> {
        let candidate = match self {
            Self::EmbeddedDescriptor => descriptor::extract(archive),
            Self::ManifestAttributes => manifest::extract(archive),
            Self::PackageLayout => layout::extract(archive, config),
            Self::PathConvention => path::extract(archive, config),
            Self::FilenameHeuristic => filename::extract(archive),
            Self::FallbackSynthetic => Some(fallback::extract(archive, config)),
        };
        candidate.filter(|c| !c.is_empty())
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Error parsing a strategy name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownStrategy(pub String);

impl fmt::Display for UnknownStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "unknown strategy '{}' (expected one of: descriptor, manifest, layout, path, filename, fallback)",
            self.0
        )
    }
}

impl std::error::Error for UnknownStrategy {}

impl FromStr for Strategy {
    type Err = UnknownStrategy;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Self::ALL
            .into_iter()
            .find(|strategy| strategy.name().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| UnknownStrategy(wanted.to_string()))
    }
}

/// Parse a comma-separated strategy list such as `descriptor,manifest,path`.
///
/// Empty items are skipped.
pub fn parse_strategy_list(list: &str) -> Result<Vec<Strategy>, UnknownStrategy> {
    list.split(',')
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(|item| item.parse::<Strategy>())
        .collect()
}

/// Render a strategy list in the form accepted by [`parse_strategy_list`].
pub fn format_strategy_list(strategies: &[Strategy]) -> String {
    strategies
        .iter()
        .map(Strategy::name)
        .collect::<Vec<_>>()
        .join(",")
}
