//! Cross-rule merge into the final artifact set.

use std::collections::BTreeMap;

use serde::Serialize;

use depsel_core::artifact::{ArtifactCoordinate, ArtifactSet};

use crate::processor::RuleResult;

/// Deduplicated union of rule results. The first rule to contribute an
/// artifact owns it; later contributions of the same artifact are ignored.
#[derive(Debug, Clone, Default)]
pub struct FinalSet {
    artifacts: ArtifactSet,
    owners: BTreeMap<ArtifactCoordinate, usize>,
    trails: BTreeMap<ArtifactCoordinate, Vec<String>>,
}

/// One selected artifact as written by `--output`.
#[derive(Debug, Clone, Serialize)]
pub struct SelectedArtifact<'a> {
    #[serde(flatten)]
    pub artifact: &'a ArtifactCoordinate,
    pub rule: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub trail: Option<&'a [String]>,
}

impl FinalSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Merge one rule's result; returns how many artifacts were new.
    pub fn merge(&mut self, result: RuleResult) -> usize {
        let RuleResult {
            index,
            artifacts,
            mut trails,
            ..
        } = result;
        let mut added = 0;
        for artifact in artifacts {
            if self.artifacts.contains(&artifact) {
                tracing::debug!(
                    "{artifact} already selected by rule #{}",
                    self.owners.get(&artifact).copied().unwrap_or_default()
                );
                continue;
            }
            if let Some(trail) = trails.remove(&artifact) {
                self.trails.insert(artifact.clone(), trail);
            }
            self.owners.insert(artifact.clone(), index);
            self.artifacts.insert(artifact);
            added += 1;
        }
        added
    }

    pub fn artifacts(&self) -> &ArtifactSet {
        &self.artifacts
    }

    /// The 1-based index of the rule that contributed the artifact.
    pub fn owner(&self, artifact: &ArtifactCoordinate) -> Option<usize> {
        self.owners.get(artifact).copied()
    }

    pub fn trail(&self, artifact: &ArtifactCoordinate) -> Option<&[String]> {
        self.trails.get(artifact).map(Vec::as_slice)
    }

    pub fn len(&self) -> usize {
        self.artifacts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.artifacts.is_empty()
    }

    /// Selected artifacts in coordinate order, with owner rule and trail.
    pub fn entries(&self) -> Vec<SelectedArtifact<'_>> {
        self.artifacts
            .iter()
            .map(|artifact| SelectedArtifact {
                artifact,
                rule: self.owner(artifact).unwrap_or_default(),
                trail: self.trail(artifact),
            })
            .collect()
    }
}
