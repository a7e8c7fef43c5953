//! Maven coordinate types, merging and normalization.
//!
//! # Overview
//!
//! A coordinate is the `(groupId, artifactId, version, packaging)` tuple that
//! identifies an artifact in a Maven repository. Recovery works in three
//! stages, each with its own type:
//!
//! ```text
//! CandidateCoordinate ──► MergedCandidate ──► FinalCoordinate
//!   (one strategy,          (per-field,          (normalized,
//!    partial, tiered)        first wins)          always valid)
//! ```
//!
//! - **CandidateCoordinate**: what one strategy found, tagged with its
//!   [`Confidence`] tier
//! - **MergedCandidate**: the fold of all candidates in confidence order
//! - **FinalCoordinate**: output of the [`Normalizer`], installable by
//!   construction

mod merge;
mod normalize;
mod types;
mod version;

pub use merge::{MergedCandidate, Sourced};
pub use normalize::{
    is_valid_identifier, NormalizeRules, Normalizer, DEFAULT_SUBSTITUTE, FALLBACK_ARTIFACT_ID,
    FALLBACK_GROUP_ID, FALLBACK_VERSION,
};
pub use types::{CandidateCoordinate, Confidence, Field, FinalCoordinate, DEFAULT_PACKAGING};
pub use version::{is_version_token, split_name_version, NameVersion};
