//! Processing of a single filter rule: seeds, strategy, then filtering.

use std::collections::BTreeMap;

use depsel_core::artifact::{ArtifactCoordinate, ArtifactSet};
use depsel_core::matcher::filter_artifacts;
use depsel_core::rule::FilterRule;
use depsel_maven::client::ArtifactRepositoryClient;
use depsel_maven::project::Project;
use depsel_maven::session::BuildSession;

use crate::strategy::{select_seeds, ResolutionStrategy};

/// The artifacts one rule selected.
#[derive(Debug, Clone, Default)]
pub struct RuleResult {
    /// 1-based position of the rule in the configuration.
    pub index: usize,
    pub seeds: ArtifactSet,
    pub artifacts: ArtifactSet,
    pub trails: BTreeMap<ArtifactCoordinate, Vec<String>>,
}

/// Run one rule against the project's resolved dependency artifacts.
///
/// Nothing is shared between calls; each rule starts from `project_artifacts`.
pub fn process_rule<C: ArtifactRepositoryClient + ?Sized>(
    index: usize,
    rule: &FilterRule,
    project: &Project,
    project_artifacts: &ArtifactSet,
    client: &C,
    session: &BuildSession,
) -> miette::Result<RuleResult> {
    let seeds = select_seeds(project_artifacts, &rule.include_patterns());
    let strategy = ResolutionStrategy::for_rule(rule.transitive);
    tracing::debug!(
        "rule #{index}: {} seeds, {:?} resolution",
        seeds.len(),
        strategy
    );

    let candidates = strategy.resolve(client, session, project, index, &seeds)?;
    let artifacts = filter_artifacts(&candidates.artifacts, &rule.filters());
    for dropped in candidates.artifacts.difference(&artifacts) {
        tracing::debug!("rule #{index}: filtered out {dropped}");
    }

    let trails = candidates
        .trails
        .into_iter()
        .filter(|(a, _)| artifacts.contains(a))
        .collect();

    Ok(RuleResult {
        index,
        seeds,
        artifacts,
        trails,
    })
}
