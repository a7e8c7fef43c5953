//! Configuration for the Resolver.

use crate::archive::DEFAULT_MAX_ENTRY_BYTES;
use crate::coordinate::NormalizeRules;
use crate::strategy::Strategy;

/// Default prefix for synthetic groupIds derived from directory names.
pub const DEFAULT_SYNTHETIC_GROUP_PREFIX: &str = "local";

/// Default share of classes a package must hold to count as dominant.
pub const DEFAULT_COMMONALITY_THRESHOLD: f64 = 0.8;

/// Immutable configuration for metadata recovery.
///
/// Passed to [`Resolver::new`](super::Resolver::new) once; the resolver
/// holds no other process-wide state.
#[derive(Debug, Clone, PartialEq)]
pub struct RecoveryConfig {
    /// Sanitizing rules and the synthetic defaults used by the fallback strategy.
    pub normalize: NormalizeRules,

    /// Prefix for groupIds synthesized from a parent directory name.
    ///
    /// `vendor-libs/sdk-1.0.jar` becomes `local.vendor-libs`. Empty means
    /// the directory name is used as is.
    pub synthetic_group_prefix: String,

    /// Share of class files (0.0 - 1.0) a package must contain to be used as groupId.
    pub commonality_threshold: f64,

    /// Ceiling for a single archive entry read.
    pub max_entry_bytes: u64,

    /// Strategies to run.
    ///
    /// Order does not matter: the resolver always runs them by confidence,
    /// and appends the fallback strategy when it is missing.
    pub strategies: Vec<Strategy>,
}

impl Default for RecoveryConfig {
    fn default() -> Self {
        Self {
            normalize: NormalizeRules::default(),
            synthetic_group_prefix: DEFAULT_SYNTHETIC_GROUP_PREFIX.to_string(),
            commonality_threshold: DEFAULT_COMMONALITY_THRESHOLD,
            max_entry_bytes: DEFAULT_MAX_ENTRY_BYTES,
            strategies: Strategy::ALL.to_vec(),
        }
    }
}

impl RecoveryConfig {
    /// Create a configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the groupId used when nothing better is known.
    pub fn with_default_group(mut self, group: impl Into<String>) -> Self {
        self.normalize.default_group = group.into();
        self
    }

    /// Set the placeholder version.
    pub fn with_placeholder_version(mut self, version: impl Into<String>) -> Self {
        self.normalize.placeholder_version = version.into();
        self
    }

    /// Set the synthetic groupId prefix.
    pub fn with_synthetic_group_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.synthetic_group_prefix = prefix.into();
        self
    }

    /// Set the character that replaces disallowed characters.
    pub fn with_substitute(mut self, substitute: char) -> Self {
        self.normalize.substitute = substitute;
        self
    }

    /// Enable or disable lower-casing of groupIds.
    pub fn with_lowercase_group(mut self, lowercase: bool) -> Self {
        self.normalize.lowercase_group = lowercase;
        self
    }

    /// Enable or disable lower-casing of artifactIds.
    pub fn with_lowercase_artifact(mut self, lowercase: bool) -> Self {
        self.normalize.lowercase_artifact = lowercase;
        self
    }

    /// Set the package commonality threshold, clamped to 0.0 - 1.0.
    pub fn with_commonality_threshold(mut self, threshold: f64) -> Self {
        self.commonality_threshold = if threshold.is_nan() {
            DEFAULT_COMMONALITY_THRESHOLD
        } else {
            threshold.clamp(0.0, 1.0)
        };
        self
    }

    /// Set the entry size ceiling.
    pub fn with_max_entry_bytes(mut self, max: u64) -> Self {
        self.max_entry_bytes = max.max(1);
        self
    }

    /// Select which strategies run.
    pub fn with_strategies(mut self, strategies: impl IntoIterator<Item = Strategy>) -> Self {
        self.strategies = strategies.into_iter().collect();
        self
    }

    /// The strategy chain actually run: configured strategies sorted by
    /// confidence, deduplicated, always ending with the fallback.
    pub fn chain(&self) -> Vec<Strategy> {
        let mut chain = self.strategies.clone();
        chain.push(Strategy::FallbackSynthetic);
        chain.sort_by_key(|strategy| strategy.confidence());
        chain.dedup();
        chain
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = RecoveryConfig::default();
        assert_eq!(config.normalize.default_group, "local.unknown");
        assert_eq!(config.normalize.placeholder_version, "0.0.0-unknown");
        assert_eq!(config.synthetic_group_prefix, "local");
        assert_eq!(config.strategies.len(), 6);
        assert_eq!(config.chain(), Strategy::ALL.to_vec());
    }

    #[test]
    fn test_builder_pattern() {
        let config = RecoveryConfig::new()
            .with_default_group("com.vendor")
            .with_placeholder_version("1.0")
            .with_synthetic_group_prefix("internal")
            .with_substitute('-')
            .with_lowercase_artifact(true)
            .with_commonality_threshold(1.5)
            .with_max_entry_bytes(0);

        assert_eq!(config.normalize.default_group, "com.vendor");
        assert_eq!(config.normalize.placeholder_version, "1.0");
        assert_eq!(config.synthetic_group_prefix, "internal");
        assert_eq!(config.normalize.substitute, '-');
        assert!(config.normalize.lowercase_artifact);
        assert_eq!(config.commonality_threshold, 1.0);
        assert_eq!(config.max_entry_bytes, 1);
    }

    #[test]
    fn test_chain_is_sorted_and_always_ends_with_fallback() {
        let config = RecoveryConfig::new().with_strategies([
            Strategy::PathConvention,
            Strategy::EmbeddedDescriptor,
            Strategy::PathConvention,
        ]);
        assert_eq!(
            config.chain(),
            vec![
                Strategy::EmbeddedDescriptor,
                Strategy::PathConvention,
                Strategy::FallbackSynthetic,
            ]
        );
    }
}
