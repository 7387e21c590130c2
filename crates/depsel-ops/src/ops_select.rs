//! Operation: apply the configured filter rules to the project's
//! dependency artifacts.

use std::path::{Path, PathBuf};

use depsel_core::config::GlobalSettings;
use depsel_engine::{Selection, SelectionEngine};
use depsel_maven::client::LocalRepositoryClient;
use depsel_maven::local::LocalRepository;
use depsel_maven::project::Project;
use depsel_maven::resolver::ClientDependencyResolver;
use depsel_maven::session::{BuildSession, SessionOverrides};
use depsel_util::errors::DepselError;
use depsel_util::progress::{spinner, status, status_info};

/// Format of the `--output` file.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OutputFormat {
    /// One `group:artifact:type:classifier:version:scope` line per artifact.
    #[default]
    Text,
    /// JSON array of coordinates with owning rule and trail.
    Json,
}

impl OutputFormat {
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "text" => Some(Self::Text),
            "json" => Some(Self::Json),
            _ => None,
        }
    }
}

/// Options for `depsel select`.
#[derive(Debug, Default)]
pub struct SelectOptions {
    /// Override the settings' offline flag (only when set).
    pub offline: bool,
    /// Override the settings' update-snapshots flag (only when set).
    pub update_snapshots: bool,
    pub local_repository: Option<PathBuf>,
    pub settings: Option<PathBuf>,
    pub output: Option<PathBuf>,
    pub format: OutputFormat,
}

/// Resolve the project, run every rule, print the listings and optionally
/// write the final set.
pub fn select(project_root: &Path, opts: &SelectOptions) -> miette::Result<Selection> {
    let pom_path = crate::project_pom(project_root)?;
    let config = crate::load_project_config(project_root)?;
    let settings = GlobalSettings::load(opts.settings.as_deref())?;

    let overrides = SessionOverrides {
        offline: opts.offline.then_some(true),
        force_update: opts.update_snapshots.then_some(true),
        local_repository: opts.local_repository.clone(),
    };
    let session = BuildSession::from_settings(&settings, &overrides);
    let local = LocalRepository::new(&session.local_repository);
    let mut project = Project::from_path(&pom_path, Some(&local))?;
    tracing::debug!(
        "project {} with {} declared dependencies, local repository {}",
        project.id(),
        project.dependencies.len(),
        session.local_repository.display()
    );

    let client = LocalRepositoryClient::new(local, session.offline);
    let resolver = ClientDependencyResolver::new(&client, &session);
    let engine = SelectionEngine::new(&client, &resolver, &session);

    status(
        "Selecting",
        &format!("{} ({} rules)", project.id(), config.filters.len()),
    );
    let sp = spinner("Resolving dependencies...");
    let result = engine.apply(&mut project, &config.filters);
    sp.finish_and_clear();
    let selection = result?;

    print!("{}", selection.report);
    status_info(
        "Selected",
        &format!(
            "{} artifacts from {} rules",
            selection.final_set.len(),
            selection.report.len()
        ),
    );

    if let Some(ref output) = opts.output {
        write_output(&selection, output, opts.format)?;
        status("Wrote", &output.display().to_string());
    }
    Ok(selection)
}

/// Render the final set in the requested format.
pub fn render(selection: &Selection, format: OutputFormat) -> miette::Result<String> {
    match format {
        OutputFormat::Text => Ok(selection
            .final_set
            .artifacts()
            .iter()
            .map(|a| {
                format!(
                    "{}:{}:{}:{}:{}:{}\n",
                    a.group_id, a.artifact_id, a.type_, a.classifier, a.version, a.scope
                )
            })
            .collect()),
        OutputFormat::Json => serde_json::to_string_pretty(&selection.final_set.entries())
            .map(|mut s| {
                s.push('\n');
                s
            })
            .map_err(|e| {
                DepselError::Generic {
                    message: format!("Failed to serialize selection: {e}"),
                }
                .into()
            }),
    }
}

fn write_output(selection: &Selection, path: &Path, format: OutputFormat) -> miette::Result<()> {
    let content = render(selection, format)?;
    std::fs::write(path, content).map_err(|e| DepselError::Generic {
        message: format!("Failed to write {}: {e}", path.display()),
    })?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use depsel_core::artifact::ArtifactCoordinate;
    use depsel_engine::processor::RuleResult;

    fn selection() -> Selection {
        let mut selection = Selection::default();
        let jar = ArtifactCoordinate::new("com.foo", "bar", "1.0");
        let sources = ArtifactCoordinate::new("com.foo", "bar", "1.0")
            .with_classifier("sources")
            .with_scope("runtime");
        let mut result = RuleResult {
            index: 1,
            artifacts: [jar.clone(), sources].into(),
            ..Default::default()
        };
        result
            .trails
            .insert(jar, vec!["org.app:app:jar:1.0".to_string()]);
        selection.final_set.merge(result);
        selection
    }

    #[test]
    fn format_parsing() {
        assert_eq!(OutputFormat::parse("text"), Some(OutputFormat::Text));
        assert_eq!(OutputFormat::parse("json"), Some(OutputFormat::Json));
        assert_eq!(OutputFormat::parse("yaml"), None);
    }

    #[test]
    fn text_output_lists_full_coordinates() {
        let text = render(&selection(), OutputFormat::Text).unwrap();
        assert_eq!(
            text,
            "com.foo:bar:jar::1.0:compile\ncom.foo:bar:jar:sources:1.0:runtime\n"
        );
    }

    #[test]
    fn json_output_carries_rule_and_trail() {
        let json = render(&selection(), OutputFormat::Json).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value.as_array().unwrap().len(), 2);
        assert_eq!(value[0]["artifactId"], "bar");
        assert_eq!(value[0]["rule"], 1);
        assert_eq!(value[0]["trail"][0], "org.app:app:jar:1.0");
        assert!(value[1].get("trail").is_none());
        assert_eq!(value[1]["classifier"], "sources");
    }
}
