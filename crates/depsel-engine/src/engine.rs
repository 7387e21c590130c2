//! Engine entry point: apply an ordered list of filter rules to a project.

use depsel_core::rule::FilterRule;
use depsel_maven::client::ArtifactRepositoryClient;
use depsel_maven::project::Project;
use depsel_maven::resolver::{ensure_dependency_artifacts, DependencyResolver};
use depsel_maven::session::BuildSession;
use depsel_util::errors::DepselError;

use crate::merge::FinalSet;
use crate::processor::process_rule;
use crate::report::{RuleListing, SelectionReport};

/// The outcome of one selection pass.
#[derive(Debug, Clone, Default)]
pub struct Selection {
    pub final_set: FinalSet,
    pub report: SelectionReport,
}

/// Collaborators shared by every rule of a pass.
pub struct SelectionEngine<'a, C: ?Sized, R: ?Sized> {
    client: &'a C,
    resolver: &'a R,
    session: &'a BuildSession,
}

impl<'a, C, R> SelectionEngine<'a, C, R>
where
    C: ArtifactRepositoryClient + ?Sized,
    R: DependencyResolver + ?Sized,
{
    pub fn new(client: &'a C, resolver: &'a R, session: &'a BuildSession) -> Self {
        Self {
            client,
            resolver,
            session,
        }
    }

    /// Run every rule in order and replace the project's dependency
    /// artifacts with the merged result.
    ///
    /// The project's artifacts are resolved first if not already cached.
    /// Any fatal error aborts the pass and leaves the project untouched.
    pub fn apply(&self, project: &mut Project, rules: &[FilterRule]) -> miette::Result<Selection> {
        ensure_dependency_artifacts(project, self.resolver)?;
        let project_artifacts = project
            .dependency_artifacts()
            .cloned()
            .ok_or_else(|| DepselError::Resolution {
                message: format!("no dependency artifacts for {}", project.id()),
            })?;
        tracing::info!(
            "applying {} filter rules to {} ({} dependency artifacts)",
            rules.len(),
            project.id(),
            project_artifacts.len()
        );

        let mut selection = Selection::default();
        for (i, rule) in rules.iter().enumerate() {
            let index = i + 1;
            let result = process_rule(
                index,
                rule,
                project,
                &project_artifacts,
                self.client,
                self.session,
            )?;

            let listing = RuleListing::new(index, &result.artifacts);
            for line in &listing.lines {
                tracing::info!("{line}");
            }
            selection.report.add(listing);
            selection.final_set.merge(result);
        }

        project.set_dependency_artifacts(selection.final_set.artifacts().clone());
        Ok(selection)
    }
}
