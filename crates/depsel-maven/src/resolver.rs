//! Project dependency resolution: the one-time pass that produces the
//! project's dependency artifacts.

use depsel_core::artifact::ArtifactSet;
use depsel_core::matcher::ScopeFilter;
use depsel_util::errors::DepselError;

use crate::client::{ArtifactRepositoryClient, TransitiveRequest};
use crate::project::Project;
use crate::session::BuildSession;

/// Resolves a project's declared dependencies into artifacts.
pub trait DependencyResolver {
    fn resolve_project_dependencies(
        &self,
        project: &Project,
        scope_filter: &ScopeFilter,
    ) -> miette::Result<ArtifactSet>;
}

/// [`DependencyResolver`] that delegates to an artifact repository client.
pub struct ClientDependencyResolver<'a, C: ?Sized> {
    client: &'a C,
    session: &'a BuildSession,
}

impl<'a, C: ArtifactRepositoryClient + ?Sized> ClientDependencyResolver<'a, C> {
    pub fn new(client: &'a C, session: &'a BuildSession) -> Self {
        Self { client, session }
    }
}

impl<C: ArtifactRepositoryClient + ?Sized> DependencyResolver for ClientDependencyResolver<'_, C> {
    fn resolve_project_dependencies(
        &self,
        project: &Project,
        scope_filter: &ScopeFilter,
    ) -> miette::Result<ArtifactSet> {
        let seeds: ArtifactSet = project.dependencies.iter().cloned().collect();
        let mut request = TransitiveRequest::for_project(project, seeds, self.session);
        request.collection_filter = scope_filter.clone();

        let result = self.client.resolve_transitive(&request);
        if result.has_exceptions() {
            return Err(DepselError::Resolution {
                message: format!(
                    "failed to create dependency artifacts for {}: {}",
                    project.id(),
                    result.exception_summary()
                ),
            }
            .into());
        }
        for artifact in &result.artifacts {
            tracing::info!("resolved dependency artifact {}", artifact.artifact_id);
        }
        Ok(result.artifacts)
    }
}

/// Resolve the project's dependency artifacts unless already cached on it.
pub fn ensure_dependency_artifacts<R: DependencyResolver + ?Sized>(
    project: &mut Project,
    resolver: &R,
) -> miette::Result<()> {
    if project.dependency_artifacts().is_some() {
        return Ok(());
    }
    let artifacts =
        resolver.resolve_project_dependencies(project, &ScopeFilter::compile_runtime())?;
    project.set_dependency_artifacts(artifacts);
    Ok(())
}
