//! The per-rule diagnostic listing.

use std::fmt;

use depsel_core::artifact::ArtifactSet;

/// Sorted `artifactId:version` lines for one rule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleListing {
    /// 1-based rule position.
    pub index: usize,
    pub lines: Vec<String>,
}

impl RuleListing {
    pub fn new(index: usize, artifacts: &ArtifactSet) -> Self {
        let mut lines: Vec<String> = artifacts.iter().map(|a| a.listing_id()).collect();
        lines.sort();
        Self { index, lines }
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}

/// Listings of every processed rule, in rule order.
#[derive(Debug, Clone, Default)]
pub struct SelectionReport {
    pub listings: Vec<RuleListing>,
}

impl SelectionReport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, listing: RuleListing) {
        self.listings.push(listing);
    }

    pub fn len(&self) -> usize {
        self.listings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.listings.is_empty()
    }

    /// Every listed line across all rules, in emission order.
    pub fn lines(&self) -> impl Iterator<Item = &str> {
        self.listings
            .iter()
            .flat_map(|l| l.lines.iter().map(String::as_str))
    }
}

impl fmt::Display for RuleListing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Rule #{} ({} artifacts):", self.index, self.lines.len())?;
        for line in &self.lines {
            writeln!(f, "  {line}")?;
        }
        Ok(())
    }
}

impl fmt::Display for SelectionReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.listings.is_empty() {
            return write!(f, "No filter rules.");
        }
        for listing in &self.listings {
            write!(f, "{listing}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use depsel_core::artifact::ArtifactCoordinate;

    #[test]
    fn listing_is_sorted_by_string() {
        let artifacts: ArtifactSet = [
            ArtifactCoordinate::new("z.group", "alpha", "10.0"),
            ArtifactCoordinate::new("a.group", "beta", "1.0"),
            ArtifactCoordinate::new("m.group", "alpha", "2.0"),
        ]
        .into();
        let listing = RuleListing::new(1, &artifacts);
        assert_eq!(listing.lines, ["alpha:10.0", "alpha:2.0", "beta:1.0"]);
    }

    #[test]
    fn empty_report() {
        let report = SelectionReport::new();
        assert!(report.is_empty());
        assert_eq!(report.to_string(), "No filter rules.");
    }

    #[test]
    fn report_renders_rules_in_order() {
        let mut report = SelectionReport::new();
        report.add(RuleListing::new(
            1,
            &[ArtifactCoordinate::new("g", "b", "1")].into(),
        ));
        report.add(RuleListing::new(2, &ArtifactSet::new()));
        assert_eq!(report.len(), 2);
        assert_eq!(
            report.to_string(),
            "Rule #1 (1 artifacts):\n  b:1\nRule #2 (0 artifacts):\n"
        );
        assert_eq!(report.lines().collect::<Vec<_>>(), ["b:1"]);
    }
}
