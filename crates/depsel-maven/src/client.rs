//! Artifact repository client: single-artifact and transitive resolution.
//!
//! [`LocalRepositoryClient`] resolves against a Maven-layout local
//! repository. Remote retrieval is left to other implementations of
//! [`ArtifactRepositoryClient`].

use std::collections::{BTreeMap, HashSet, VecDeque};
use std::fmt;

use petgraph::graph::NodeIndex;

use depsel_core::artifact::{ArtifactCoordinate, ArtifactSet, DEFAULT_TYPE};
use depsel_core::config::ProxyEntry;
use depsel_core::matcher::ScopeFilter;

use crate::graph::DependencyGraph;
use crate::local::LocalRepository;
use crate::pom::{Pom, PomDependency, PomExclusion};
use crate::project::Project;
use crate::repository::{aggregate_remote_repositories, RemoteRepository};
use crate::session::BuildSession;

/// Everything a transitive resolution needs.
#[derive(Debug, Clone)]
pub struct TransitiveRequest {
    /// The artifact the seeds are direct dependencies of. Not itself resolved.
    pub root: ArtifactCoordinate,
    pub seeds: ArtifactSet,
    pub repositories: Vec<RemoteRepository>,
    /// `group:artifact` -> version overrides for transitive dependencies.
    pub managed_versions: BTreeMap<String, String>,
    /// Exclusions each seed starts with, by `group:artifact:type:classifier`.
    pub seed_exclusions: BTreeMap<String, Vec<PomExclusion>>,
    pub collection_filter: ScopeFilter,
    pub offline: bool,
    pub force_update: bool,
    pub proxies: Vec<ProxyEntry>,
}

impl TransitiveRequest {
    /// Build a request rooted at the project. Repositories are the session
    /// repositories followed by the project's, deduplicated by URL, with
    /// mirrors and credentials applied.
    pub fn for_project(project: &Project, seeds: ArtifactSet, session: &BuildSession) -> Self {
        let aggregated =
            aggregate_remote_repositories(&[&session.remote_repositories, &project.repositories]);
        Self {
            root: project.artifact.clone(),
            seeds,
            repositories: session.effective_repositories(&aggregated),
            managed_versions: project.managed_versions.clone(),
            seed_exclusions: project.exclusions.clone(),
            collection_filter: ScopeFilter::compile_runtime(),
            offline: session.offline,
            force_update: session.force_update,
            proxies: session.active_proxies(),
        }
    }
}

/// A problem with one artifact encountered during resolution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolutionException {
    pub artifact: ArtifactCoordinate,
    pub message: String,
}

impl fmt::Display for ResolutionException {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.artifact, self.message)
    }
}

/// The outcome of a resolution request.
#[derive(Debug, Clone, Default)]
pub struct ResolutionResult {
    pub artifacts: ArtifactSet,
    /// Path from the request root to each artifact, when known.
    pub trails: BTreeMap<ArtifactCoordinate, Vec<String>>,
    pub exceptions: Vec<ResolutionException>,
}

impl ResolutionResult {
    pub fn has_exceptions(&self) -> bool {
        !self.exceptions.is_empty()
    }

    /// One-line summary of the exceptions: the first, plus a count of the rest.
    pub fn exception_summary(&self) -> String {
        match self.exceptions.as_slice() {
            [] => String::new(),
            [only] => only.to_string(),
            [first, rest @ ..] => format!("{first} (and {} more)", rest.len()),
        }
    }
}

/// Resolves artifacts against some set of repositories.
pub trait ArtifactRepositoryClient {
    /// Resolve the seeds and their dependency closure.
    fn resolve_transitive(&self, request: &TransitiveRequest) -> ResolutionResult;

    /// Resolve exactly one artifact, without dependencies.
    fn resolve_single(
        &self,
        artifact: &ArtifactCoordinate,
        repositories: &[RemoteRepository],
    ) -> ResolutionResult;
}

/// Entry in the BFS queue.
struct QueueEntry {
    artifact: ArtifactCoordinate,
    parent: Option<NodeIndex>,
    exclusions: Vec<PomExclusion>,
}

/// Client backed by a local repository directory.
#[derive(Debug, Clone)]
pub struct LocalRepositoryClient {
    local: LocalRepository,
    offline: bool,
}

impl LocalRepositoryClient {
    pub fn new(local: LocalRepository, offline: bool) -> Self {
        Self { local, offline }
    }

    pub fn local(&self) -> &LocalRepository {
        &self.local
    }

    fn missing(&self, artifact: &ArtifactCoordinate) -> ResolutionException {
        let path = self.local.artifact_path(artifact);
        let message = if self.offline {
            format!("not found at {} (offline)", path.display())
        } else {
            format!(
                "not found at {}; remote retrieval is not supported",
                path.display()
            )
        };
        ResolutionException {
            artifact: artifact.clone(),
            message,
        }
    }

    /// Children of one collected artifact, after optional, scope and
    /// exclusion pruning.
    fn children(
        &self,
        entry: &QueueEntry,
        pom: &Pom,
        managed: &BTreeMap<String, String>,
        result: &mut ResolutionResult,
    ) -> Vec<QueueEntry> {
        let mut out = Vec::new();
        for dep in &pom.dependencies {
            if dep.optional {
                continue;
            }
            let dep_scope = dep.scope.as_deref().unwrap_or("compile");
            if matches!(dep_scope, "test" | "provided" | "system") {
                continue;
            }
            if is_excluded(&entry.exclusions, dep) {
                tracing::debug!("{} excluded below {}", dep.key(), entry.artifact.key());
                continue;
            }

            let version = managed
                .get(&dep.key())
                .cloned()
                .or_else(|| dep.version.clone())
                .or_else(|| {
                    pom.managed_version(&dep.group_id, &dep.artifact_id)
                        .map(str::to_string)
                });
            let Some(version) = version.filter(|v| !v.is_empty()) else {
                result.exceptions.push(ResolutionException {
                    artifact: ArtifactCoordinate::new(&dep.group_id, &dep.artifact_id, "?"),
                    message: format!("no version declared in {}", entry.artifact.key()),
                });
                continue;
            };

            let mut exclusions = entry.exclusions.clone();
            exclusions.extend(dep.exclusions.iter().cloned());

            out.push(QueueEntry {
                artifact: ArtifactCoordinate::new(&dep.group_id, &dep.artifact_id, &version)
                    .with_type(dep.type_.as_deref().unwrap_or(DEFAULT_TYPE))
                    .with_classifier(dep.classifier.as_deref().unwrap_or_default())
                    .with_scope(propagate_scope(&entry.artifact.scope, dep_scope)),
                parent: None,
                exclusions,
            });
        }
        out
    }
}

impl ArtifactRepositoryClient for LocalRepositoryClient {
    /// Breadth-first, nearest-wins closure over the POMs in the local
    /// repository.
    fn resolve_transitive(&self, request: &TransitiveRequest) -> ResolutionResult {
        tracing::debug!(
            "transitive resolution from {} with {} seeds, {} repositories ({} authenticated), {} proxies (force update: {})",
            request.root,
            request.seeds.len(),
            request.repositories.len(),
            request.repositories.iter().filter(|r| r.has_auth()).count(),
            request.proxies.len(),
            request.force_update
        );
        let mut result = ResolutionResult::default();
        let mut graph = DependencyGraph::new(request.root.clone());
        let mut seen: HashSet<String> = HashSet::from([request.root.conflict_key()]);

        let mut queue: VecDeque<QueueEntry> = request
            .seeds
            .iter()
            .map(|seed| QueueEntry {
                artifact: seed.clone(),
                parent: None,
                exclusions: request
                    .seed_exclusions
                    .get(&seed.conflict_key())
                    .cloned()
                    .unwrap_or_default(),
            })
            .collect();

        while let Some(entry) = queue.pop_front() {
            let key = entry.artifact.conflict_key();
            if seen.contains(&key) {
                tracing::debug!("{} omitted: nearer version already collected", entry.artifact);
                continue;
            }
            if !request.collection_filter.includes(&entry.artifact) {
                continue;
            }
            seen.insert(key);

            let parent = entry.parent.unwrap_or(graph.root());
            let idx = graph.add_node(entry.artifact.clone());
            graph.add_edge(parent, idx);

            if self.local.has_artifact(&entry.artifact) {
                result.artifacts.insert(entry.artifact.clone());
            } else {
                result.exceptions.push(self.missing(&entry.artifact));
            }

            let a = &entry.artifact;
            let pom = match self.local.effective_pom(&a.group_id, &a.artifact_id, &a.version) {
                Ok(Some(pom)) => pom,
                Ok(None) => {
                    tracing::warn!("POM for {a} is missing, no dependency information available");
                    continue;
                }
                Err(e) => {
                    result.exceptions.push(ResolutionException {
                        artifact: a.clone(),
                        message: e.to_string(),
                    });
                    continue;
                }
            };

            // Seeds keep their own versions; managed versions apply below them.
            for mut child in self.children(&entry, &pom, &request.managed_versions, &mut result) {
                child.parent = Some(idx);
                queue.push_back(child);
            }
        }

        for artifact in &result.artifacts {
            if let Some(trail) = graph.trail(&artifact.conflict_key()) {
                result.trails.insert(artifact.clone(), trail);
            }
        }
        result
    }

    fn resolve_single(
        &self,
        artifact: &ArtifactCoordinate,
        repositories: &[RemoteRepository],
    ) -> ResolutionResult {
        tracing::debug!(
            "resolving {artifact} against {} repositories",
            repositories.len()
        );
        let mut result = ResolutionResult::default();
        if self.local.has_artifact(artifact) {
            result.artifacts.insert(artifact.clone());
        } else {
            result.exceptions.push(self.missing(artifact));
        }
        result
    }
}

fn is_excluded(exclusions: &[PomExclusion], dep: &PomDependency) -> bool {
    exclusions.iter().any(|e| {
        let group_ok = e.group_id == "*" || e.group_id == dep.group_id;
        let artifact_ok = match e.artifact_id.as_deref() {
            None | Some("*") => true,
            Some(a) => a == dep.artifact_id,
        };
        group_ok && artifact_ok
    })
}

/// Maven scope propagation for the scopes that reach the closure.
fn propagate_scope(parent_scope: &str, dep_scope: &str) -> &'static str {
    match (parent_scope, dep_scope) {
        ("compile", "compile") => "compile",
        ("compile", "runtime") => "runtime",
        ("runtime", _) => "runtime",
        _ => "compile",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scope_propagation() {
        assert_eq!(propagate_scope("compile", "compile"), "compile");
        assert_eq!(propagate_scope("compile", "runtime"), "runtime");
        assert_eq!(propagate_scope("runtime", "compile"), "runtime");
        assert_eq!(propagate_scope("runtime", "runtime"), "runtime");
    }

    #[test]
    fn exclusion_matching() {
        let dep = PomDependency {
            group_id: "commons-logging".to_string(),
            artifact_id: "commons-logging".to_string(),
            ..Default::default()
        };
        let by_group = PomExclusion {
            group_id: "commons-logging".to_string(),
            artifact_id: None,
        };
        let wildcard = PomExclusion {
            group_id: "*".to_string(),
            artifact_id: Some("*".to_string()),
        };
        let other = PomExclusion {
            group_id: "commons-logging".to_string(),
            artifact_id: Some("other".to_string()),
        };
        assert!(is_excluded(&[by_group], &dep));
        assert!(is_excluded(&[wildcard], &dep));
        assert!(!is_excluded(&[other], &dep));
        assert!(!is_excluded(&[], &dep));
    }

    #[test]
    fn exception_summary_counts_rest() {
        let ex = |a: &str| ResolutionException {
            artifact: ArtifactCoordinate::new("g", a, "1"),
            message: "missing".to_string(),
        };
        let mut result = ResolutionResult::default();
        assert_eq!(result.exception_summary(), "");
        result.exceptions.push(ex("a"));
        assert_eq!(result.exception_summary(), "g:a:jar:1:compile: missing");
        result.exceptions.push(ex("b"));
        result.exceptions.push(ex("c"));
        assert!(result.exception_summary().ends_with("(and 2 more)"));
    }
}
