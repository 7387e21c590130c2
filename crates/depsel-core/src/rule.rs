use serde::{Deserialize, Serialize};

use crate::matcher::{ArtifactFilter, ScopeFilter};
use crate::pattern::PatternList;

/// A `[[filter]]` entry from `Depsel.toml`.
///
/// `include` and `exclude` are comma-separated coordinate patterns.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterRule {
    #[serde(default)]
    pub include: String,
    #[serde(default)]
    pub exclude: String,
    #[serde(default)]
    pub transitive: bool,
}

impl FilterRule {
    pub fn new(include: &str, exclude: &str, transitive: bool) -> Self {
        Self {
            include: include.to_string(),
            exclude: exclude.to_string(),
            transitive,
        }
    }

    pub fn include_patterns(&self) -> PatternList {
        PatternList::parse(&self.include)
    }

    pub fn exclude_patterns(&self) -> PatternList {
        PatternList::parse(&self.exclude)
    }

    /// The scope, include and exclude filters applied to this rule's candidates.
    pub fn filters(&self) -> Vec<ArtifactFilter> {
        vec![
            ArtifactFilter::Scope(ScopeFilter::compile_runtime()),
            ArtifactFilter::Include(self.include_patterns()),
            ArtifactFilter::Exclude(self.exclude_patterns()),
        ]
    }
}
