use std::collections::BTreeSet;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Packaging type assumed when a coordinate or POM omits one.
pub const DEFAULT_TYPE: &str = "jar";

/// A resolved build dependency.
///
/// Identity (equality, hashing, ordering) covers all six fields and compares
/// them exactly. An absent classifier is the empty string.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ArtifactCoordinate {
    #[serde(rename = "groupId")]
    pub group_id: String,
    #[serde(rename = "artifactId")]
    pub artifact_id: String,
    #[serde(rename = "type")]
    pub type_: String,
    #[serde(default)]
    pub classifier: String,
    pub version: String,
    pub scope: String,
}

/// A set of artifacts with a stable iteration order.
pub type ArtifactSet = BTreeSet<ArtifactCoordinate>;

impl ArtifactCoordinate {
    /// A `jar` artifact without classifier in `compile` scope.
    pub fn new(group_id: &str, artifact_id: &str, version: &str) -> Self {
        Self {
            group_id: group_id.to_string(),
            artifact_id: artifact_id.to_string(),
            type_: DEFAULT_TYPE.to_string(),
            classifier: String::new(),
            version: version.to_string(),
            scope: DependencyScope::Compile.as_str().to_string(),
        }
    }

    pub fn with_type(mut self, type_: &str) -> Self {
        self.type_ = type_.to_string();
        self
    }

    pub fn with_classifier(mut self, classifier: &str) -> Self {
        self.classifier = classifier.to_string();
        self
    }

    pub fn with_scope(mut self, scope: &str) -> Self {
        self.scope = scope.to_string();
        self
    }

    /// Parse `group:artifact:version`, `group:artifact:type:version` or
    /// `group:artifact:type:classifier:version`. Scope defaults to `compile`.
    pub fn parse(s: &str) -> Option<Self> {
        let parts: Vec<&str> = s.split(':').map(str::trim).collect();
        let coord = match parts.as_slice() {
            [g, a, v] => Self::new(g, a, v),
            [g, a, t, v] => Self::new(g, a, v).with_type(t),
            [g, a, t, c, v] => Self::new(g, a, v).with_type(t).with_classifier(c),
            _ => return None,
        };
        let complete = !coord.group_id.is_empty()
            && !coord.artifact_id.is_empty()
            && !coord.type_.is_empty()
            && !coord.version.is_empty();
        complete.then_some(coord)
    }

    /// `group:artifact` identifier (without version).
    pub fn key(&self) -> String {
        format!("{}:{}", self.group_id, self.artifact_id)
    }

    /// `group:artifact:type:classifier`, the key versions conflict on.
    pub fn conflict_key(&self) -> String {
        format!(
            "{}:{}:{}:{}",
            self.group_id, self.artifact_id, self.type_, self.classifier
        )
    }

    /// `artifactId:version`, the form used in per-rule listings.
    pub fn listing_id(&self) -> String {
        format!("{}:{}", self.artifact_id, self.version)
    }

    pub fn has_classifier(&self) -> bool {
        !self.classifier.is_empty()
    }
}

/// `group:artifact:type[:classifier]:version:scope`
impl fmt::Display for ArtifactCoordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}:{}", self.group_id, self.artifact_id, self.type_)?;
        if self.has_classifier() {
            write!(f, ":{}", self.classifier)?;
        }
        write!(f, ":{}:{}", self.version, self.scope)
    }
}

/// Maven-compatible dependency scope.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DependencyScope {
    Compile,
    Runtime,
    Provided,
    Test,
    System,
    Import,
}

impl Default for DependencyScope {
    fn default() -> Self {
        Self::Compile
    }
}

impl DependencyScope {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Compile => "compile",
            Self::Runtime => "runtime",
            Self::Provided => "provided",
            Self::Test => "test",
            Self::System => "system",
            Self::Import => "import",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "compile" => Some(Self::Compile),
            "runtime" => Some(Self::Runtime),
            "provided" => Some(Self::Provided),
            "test" => Some(Self::Test),
            "system" => Some(Self::System),
            "import" => Some(Self::Import),
            _ => None,
        }
    }
}

impl fmt::Display for DependencyScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
