//! Coordinate patterns over `groupId:artifactId:type:classifier`.
//!
//! A raw token is split on `:` and padded with wildcards on the right:
//! `a` becomes `a:*:*:*`, `a:b` becomes `a:b:*:*`, `a:b:c` becomes `a:b:c:*`.
//! Tokens with more than four segments keep their first four.

use std::fmt;

/// The wildcard marker. Only whole-segment wildcards are supported.
pub const WILDCARD: &str = "*";

/// One slot of a [`Pattern`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Segment {
    Any,
    Literal(String),
}

impl Segment {
    /// Build a segment from raw text, trimming surrounding whitespace.
    pub fn parse(raw: &str) -> Self {
        let trimmed = raw.trim();
        if trimmed == WILDCARD {
            Self::Any
        } else {
            Self::Literal(trimmed.to_string())
        }
    }

    pub fn matches(&self, value: &str) -> bool {
        match self {
            Self::Any => true,
            Self::Literal(lit) => lit == value,
        }
    }

    pub fn is_any(&self) -> bool {
        matches!(self, Self::Any)
    }
}

impl fmt::Display for Segment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Any => f.write_str(WILDCARD),
            Self::Literal(lit) => f.write_str(lit),
        }
    }
}

/// A normalized four-slot coordinate pattern.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Pattern {
    pub group_id: Segment,
    pub artifact_id: Segment,
    pub type_: Segment,
    pub classifier: Segment,
}

impl Pattern {
    /// Matches every artifact.
    pub fn any() -> Self {
        Self {
            group_id: Segment::Any,
            artifact_id: Segment::Any,
            type_: Segment::Any,
            classifier: Segment::Any,
        }
    }

    /// Normalize a raw filter token into a pattern.
    pub fn normalize(token: &str) -> Self {
        let parts: Vec<&str> = token.split(':').collect();
        if parts.len() > 4 {
            tracing::warn!(
                "pattern '{token}' has {} segments; only the first four are used",
                parts.len()
            );
        }
        let slot = |i: usize| parts.get(i).map_or(Segment::Any, |s| Segment::parse(s));
        Self {
            group_id: slot(0),
            artifact_id: slot(1),
            type_: slot(2),
            classifier: slot(3),
        }
    }

    /// The four slots in `group, artifact, type, classifier` order.
    pub fn segments(&self) -> [&Segment; 4] {
        [
            &self.group_id,
            &self.artifact_id,
            &self.type_,
            &self.classifier,
        ]
    }
}

impl fmt::Display for Pattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}:{}:{}:{}",
            self.group_id, self.artifact_id, self.type_, self.classifier
        )
    }
}

/// Number of colon-separated segments in a raw token.
pub fn segment_count(token: &str) -> usize {
    token.split(':').count()
}

/// Whether a token falls outside the one-to-four segment shapes.
pub fn is_degenerate(token: &str) -> bool {
    !(1..=4).contains(&segment_count(token))
}

/// An ordered list of patterns parsed from a comma-separated string.
///
/// Blank tokens are skipped, so `""` and `" , "` both yield an empty list.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PatternList {
    tokens: Vec<String>,
    patterns: Vec<Pattern>,
}

impl PatternList {
    pub fn parse(raw: &str) -> Self {
        let tokens: Vec<String> = raw
            .split(',')
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .map(str::to_string)
            .collect();
        let patterns = tokens.iter().map(|t| Pattern::normalize(t)).collect();
        Self { tokens, patterns }
    }

    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }

    pub fn len(&self) -> usize {
        self.patterns.len()
    }

    pub fn patterns(&self) -> &[Pattern] {
        &self.patterns
    }

    /// The trimmed raw tokens, in the same order as [`Self::patterns`].
    pub fn tokens(&self) -> &[String] {
        &self.tokens
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Pattern)> {
        self.tokens
            .iter()
            .map(String::as_str)
            .zip(self.patterns.iter())
    }
}
