//! Artifact matching against coordinate patterns, and the closed set of
//! artifact filters combined by [`all_of`].

use crate::artifact::{ArtifactCoordinate, ArtifactSet, DependencyScope};
use crate::pattern::{Pattern, PatternList};

/// Whether all four slots of `pattern` match the artifact.
pub fn matches(artifact: &ArtifactCoordinate, pattern: &Pattern) -> bool {
    pattern.group_id.matches(&artifact.group_id)
        && pattern.artifact_id.matches(&artifact.artifact_id)
        && pattern.type_.matches(&artifact.type_)
        && pattern.classifier.matches(&artifact.classifier)
}

/// Whether the artifact matches at least one pattern of the list.
pub fn matches_any(artifact: &ArtifactCoordinate, patterns: &PatternList) -> bool {
    patterns.patterns().iter().any(|p| matches(artifact, p))
}

/// Accepts artifacts whose scope is one of a fixed set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScopeFilter {
    scopes: Vec<DependencyScope>,
}

impl ScopeFilter {
    pub fn including(scopes: &[DependencyScope]) -> Self {
        Self {
            scopes: scopes.to_vec(),
        }
    }

    /// The `compile` + `runtime` filter applied to every selection.
    pub fn compile_runtime() -> Self {
        Self::including(&[DependencyScope::Compile, DependencyScope::Runtime])
    }

    pub fn includes_scope(&self, scope: &str) -> bool {
        self.scopes.iter().any(|s| s.as_str() == scope)
    }

    pub fn includes(&self, artifact: &ArtifactCoordinate) -> bool {
        self.includes_scope(&artifact.scope)
    }
}

/// One term of a filter conjunction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ArtifactFilter {
    Scope(ScopeFilter),
    /// Passes artifacts matching any pattern. An empty list passes everything.
    Include(PatternList),
    /// Rejects artifacts matching any pattern. An empty list passes everything.
    Exclude(PatternList),
}

impl ArtifactFilter {
    pub fn include(&self, artifact: &ArtifactCoordinate) -> bool {
        match self {
            Self::Scope(scope) => scope.includes(artifact),
            Self::Include(list) => list.is_empty() || matches_any(artifact, list),
            Self::Exclude(list) => list.is_empty() || !matches_any(artifact, list),
        }
    }
}

/// AND-combinator: the artifact passes only if every filter includes it.
pub fn all_of(filters: &[ArtifactFilter], artifact: &ArtifactCoordinate) -> bool {
    filters.iter().all(|f| f.include(artifact))
}

/// Return the subset of `artifacts` accepted by every filter.
pub fn filter_artifacts(artifacts: &ArtifactSet, filters: &[ArtifactFilter]) -> ArtifactSet {
    artifacts
        .iter()
        .filter(|a| all_of(filters, a))
        .cloned()
        .collect()
}
