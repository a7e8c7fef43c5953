//! Per-field merge of candidates from several strategies.
//!
//! Each field is owned by the most trustworthy strategy that supplied a
//! plausible value for it. Merging is a fold in confidence order where the
//! first value wins:
//!
//! ```text
//! descriptor  : -            -        -
//! manifest    : -            -        1.4.2   ← version
//! path        : local.libs   widget   1.4     ← groupId, artifactId
//! fallback    : local.unk    widget   0.0.0
//! merged      : local.libs   widget   1.4.2
//! ```

use serde::Serialize;

use super::types::{CandidateCoordinate, Confidence, Field};

/// A field value together with the tier that supplied it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Sourced {
    pub value: String,
    pub confidence: Confidence,
}

/// Running merge of candidate coordinates.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MergedCandidate {
    group_id: Option<Sourced>,
    artifact_id: Option<Sourced>,
    version: Option<Sourced>,
    packaging: Option<Sourced>,
}

impl MergedCandidate {
    /// Create an empty merge.
    pub fn new() -> Self {
        Self::default()
    }

    /// Absorb a candidate, filling only fields that are still empty.
    ///
    /// Implausible values (see [`Field::accepts`]) are skipped so that a
    /// lower tier can still supply the field. The fallback tier is the last
    /// one, so its values are taken as they are and left to the normalizer.
    /// Returns the fields this candidate contributed.
    pub fn absorb(&mut self, candidate: &CandidateCoordinate) -> Vec<Field> {
        let confidence = candidate.confidence();
        let mut taken = Vec::new();

        for field in [Field::GroupId, Field::ArtifactId, Field::Version, Field::Packaging] {
            let slot = self.slot_mut(field);
            if slot.is_some() {
                continue;
            }
            let Some(value) = candidate.get(field) else {
                continue;
            };
            if confidence != Confidence::FallbackSynthetic && !field.accepts(value) {
                continue;
            }
            *slot = Some(Sourced {
                value: value.trim().to_string(),
                confidence,
            });
            taken.push(field);
        }

        taken
    }

    /// Fold an ordered sequence of candidates into a merge.
    pub fn from_candidates<'a, I>(candidates: I) -> Self
    where
        I: IntoIterator<Item = &'a CandidateCoordinate>,
    {
        let mut merged = Self::new();
        for candidate in candidates {
            merged.absorb(candidate);
        }
        merged
    }

    /// Field value and its source, if set.
    pub fn get(&self, field: Field) -> Option<&Sourced> {
        match field {
            Field::GroupId => self.group_id.as_ref(),
            Field::ArtifactId => self.artifact_id.as_ref(),
            Field::Version => self.version.as_ref(),
            Field::Packaging => self.packaging.as_ref(),
        }
    }

    /// Field value, if set.
    pub fn value(&self, field: Field) -> Option<&str> {
        self.get(field).map(|sourced| sourced.value.as_str())
    }

    /// True when groupId, artifactId and version are all set.
    ///
    /// Packaging is excluded: it only ever comes from the embedded
    /// descriptor and otherwise defaults to `jar`.
    pub fn is_complete(&self) -> bool {
        self.group_id.is_some() && self.artifact_id.is_some() && self.version.is_some()
    }

    fn slot_mut(&mut self, field: Field) -> &mut Option<Sourced> {
        match field {
            Field::GroupId => &mut self.group_id,
            Field::ArtifactId => &mut self.artifact_id,
            Field::Version => &mut self.version,
            Field::Packaging => &mut self.packaging,
        }
    }
}
