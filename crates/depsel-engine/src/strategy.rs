//! Seed selection and the two resolution strategies a rule can use.

use std::collections::BTreeMap;

use depsel_core::artifact::{ArtifactCoordinate, ArtifactSet};
use depsel_core::matcher::matches_any;
use depsel_core::pattern::PatternList;
use depsel_maven::client::{ArtifactRepositoryClient, TransitiveRequest};
use depsel_maven::project::Project;
use depsel_maven::session::BuildSession;
use depsel_util::errors::DepselError;

/// Artifacts produced by a strategy, with their dependency trails when known.
#[derive(Debug, Clone, Default)]
pub struct Candidates {
    pub artifacts: ArtifactSet,
    pub trails: BTreeMap<ArtifactCoordinate, Vec<String>>,
}

/// The project artifacts matching at least one include pattern.
pub fn select_seeds(project_artifacts: &ArtifactSet, include: &PatternList) -> ArtifactSet {
    project_artifacts
        .iter()
        .filter(|a| matches_any(a, include))
        .cloned()
        .collect()
}

/// How a rule turns its seeds into candidate artifacts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResolutionStrategy {
    /// Resolve the full closure of the seeds as direct project dependencies.
    Transitive,
    /// Resolve each seed alone; unresolvable seeds are dropped.
    NonTransitive,
}

impl ResolutionStrategy {
    pub fn for_rule(transitive: bool) -> Self {
        if transitive {
            Self::Transitive
        } else {
            Self::NonTransitive
        }
    }

    /// Produce the candidate set for `seeds`. Only the transitive strategy
    /// can fail; `rule_index` is 1-based and appears in its error.
    pub fn resolve<C: ArtifactRepositoryClient + ?Sized>(
        self,
        client: &C,
        session: &BuildSession,
        project: &Project,
        rule_index: usize,
        seeds: &ArtifactSet,
    ) -> miette::Result<Candidates> {
        match self {
            Self::Transitive => resolve_transitive(client, session, project, rule_index, seeds),
            Self::NonTransitive => Ok(resolve_each(client, session, seeds)),
        }
    }
}

fn resolve_transitive<C: ArtifactRepositoryClient + ?Sized>(
    client: &C,
    session: &BuildSession,
    project: &Project,
    rule_index: usize,
    seeds: &ArtifactSet,
) -> miette::Result<Candidates> {
    let request = TransitiveRequest::for_project(project, seeds.clone(), session);
    tracing::debug!(
        "rule #{rule_index}: resolving {} seeds transitively against {} repositories",
        seeds.len(),
        request.repositories.len()
    );
    let result = client.resolve_transitive(&request);
    if result.has_exceptions() {
        return Err(DepselError::Resolution {
            message: format!(
                "project {}, rule #{rule_index}: {}",
                project.id(),
                result.exception_summary()
            ),
        }
        .into());
    }
    Ok(Candidates {
        artifacts: result.artifacts,
        trails: result.trails,
    })
}

fn resolve_each<C: ArtifactRepositoryClient + ?Sized>(
    client: &C,
    session: &BuildSession,
    seeds: &ArtifactSet,
) -> Candidates {
    let repositories = session.effective_repositories(&session.remote_repositories);
    let mut candidates = Candidates::default();
    for seed in seeds {
        let result = client.resolve_single(seed, &repositories);
        if result.has_exceptions() || result.artifacts.is_empty() {
            let reason = if result.has_exceptions() {
                result.exception_summary()
            } else {
                "no artifact returned".to_string()
            };
            tracing::error!("Can't resolve artifact {seed}: {reason}");
            continue;
        }
        candidates.artifacts.extend(result.artifacts);
    }
    candidates
}
