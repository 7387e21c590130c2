//! The project model built from `pom.xml`.

use std::collections::BTreeMap;
use std::path::Path;

use depsel_core::artifact::{ArtifactCoordinate, ArtifactSet, DEFAULT_TYPE};
use depsel_util::errors::DepselError;

use crate::local::LocalRepository;
use crate::pom::{self, Pom, PomDependency, PomExclusion};
use crate::repository::RemoteRepository;

/// Name of the project model file.
pub const PROJECT_POM_FILE: &str = "pom.xml";

/// A project whose dependency set is being narrowed.
#[derive(Debug, Clone)]
pub struct Project {
    /// The project's own coordinate; its type is the POM packaging.
    pub artifact: ArtifactCoordinate,
    /// Dependencies declared in the POM, with versions filled in from
    /// dependency management.
    pub dependencies: Vec<ArtifactCoordinate>,
    /// `group:artifact` -> version from `<dependencyManagement>`.
    pub managed_versions: BTreeMap<String, String>,
    /// `<exclusions>` of each declared dependency, by
    /// `group:artifact:type:classifier`.
    pub exclusions: BTreeMap<String, Vec<PomExclusion>>,
    /// Repositories declared by the project.
    pub repositories: Vec<RemoteRepository>,
    /// Resolved dependency artifacts; `None` until resolved.
    dependency_artifacts: Option<ArtifactSet>,
}

impl Project {
    /// Load `pom.xml`, merging parents found in `local` when given.
    pub fn from_path(path: &Path, local: Option<&LocalRepository>) -> miette::Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| DepselError::Pom {
            message: format!("Failed to read {}: {e}", path.display()),
        })?;
        let mut pom = pom::parse_pom(&content)?;
        if let Some(local) = local {
            local.merge_parents(&mut pom)?;
        }
        pom.resolve_properties();
        Self::from_pom(&pom)
    }

    /// Build the project from an already interpolated POM.
    pub fn from_pom(pom: &Pom) -> miette::Result<Self> {
        let missing = |field: &str| DepselError::Pom {
            message: format!("project POM has no {field}"),
        };
        let group = pom.effective_group_id().ok_or_else(|| missing("groupId"))?;
        let artifact_id = pom.artifact_id.as_deref().ok_or_else(|| missing("artifactId"))?;
        let version = pom.effective_version().ok_or_else(|| missing("version"))?;
        let packaging = pom.packaging.as_deref().unwrap_or(DEFAULT_TYPE);

        let mut dependencies = Vec::new();
        let mut exclusions = BTreeMap::new();
        for dep in &pom.dependencies {
            let Some(coordinate) = declared_coordinate(dep, pom) else {
                continue;
            };
            if !dep.exclusions.is_empty() {
                exclusions.insert(coordinate.conflict_key(), dep.exclusions.clone());
            }
            dependencies.push(coordinate);
        }

        Ok(Self {
            artifact: ArtifactCoordinate::new(group, artifact_id, version).with_type(packaging),
            dependencies,
            managed_versions: pom.managed_version_map(),
            exclusions,
            repositories: pom.repositories.iter().map(RemoteRepository::from_pom).collect(),
            dependency_artifacts: None,
        })
    }

    /// `group:artifact:version` of the project.
    pub fn id(&self) -> String {
        format!(
            "{}:{}:{}",
            self.artifact.group_id, self.artifact.artifact_id, self.artifact.version
        )
    }

    pub fn dependency_artifacts(&self) -> Option<&ArtifactSet> {
        self.dependency_artifacts.as_ref()
    }

    pub fn set_dependency_artifacts(&mut self, artifacts: ArtifactSet) {
        self.dependency_artifacts = Some(artifacts);
    }
}

fn declared_coordinate(dep: &PomDependency, pom: &Pom) -> Option<ArtifactCoordinate> {
    let version = dep
        .version
        .clone()
        .or_else(|| pom.managed_version(&dep.group_id, &dep.artifact_id).map(str::to_string));
    let Some(version) = version else {
        tracing::warn!("dependency {} has no version; skipping", dep.key());
        return None;
    };
    Some(
        ArtifactCoordinate::new(&dep.group_id, &dep.artifact_id, &version)
            .with_type(dep.type_.as_deref().unwrap_or(DEFAULT_TYPE))
            .with_classifier(dep.classifier.as_deref().unwrap_or_default())
            .with_scope(dep.scope.as_deref().unwrap_or("compile")),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    const APP_POM: &str = r#"<project>
    <groupId>org.example</groupId>
    <artifactId>app</artifactId>
    <version>1.0</version>
    <packaging>war</packaging>
    <repositories>
        <repository><id>corp</id><url>https://corp.example.com/maven/</url></repository>
    </repositories>
    <dependencyManagement><dependencies>
        <dependency><groupId>com.lib</groupId><artifactId>lib</artifactId><version>2.5</version></dependency>
    </dependencies></dependencyManagement>
    <dependencies>
        <dependency><groupId>com.lib</groupId><artifactId>lib</artifactId>
            <exclusions><exclusion><groupId>commons-logging</groupId><artifactId>commons-logging</artifactId></exclusion></exclusions>
        </dependency>
        <dependency><groupId>junit</groupId><artifactId>junit</artifactId><version>4.13.2</version><scope>test</scope></dependency>
        <dependency><groupId>com.nover</groupId><artifactId>missing</artifactId></dependency>
    </dependencies>
</project>"#;

    #[test]
    fn project_from_pom() {
        let mut pom = pom::parse_pom(APP_POM).unwrap();
        pom.resolve_properties();
        let project = Project::from_pom(&pom).unwrap();
        assert_eq!(project.id(), "org.example:app:1.0");
        assert_eq!(project.artifact.type_, "war");
        assert_eq!(project.dependencies.len(), 2);
        assert_eq!(project.dependencies[0].version, "2.5");
        assert_eq!(project.dependencies[1].scope, "test");
        assert_eq!(project.managed_versions["com.lib:lib"], "2.5");
        let excluded = &project.exclusions["com.lib:lib:jar:"];
        assert_eq!(excluded.len(), 1);
        assert_eq!(excluded[0].group_id, "commons-logging");
        assert!(!project.exclusions.contains_key("junit:junit:jar:"));
        assert_eq!(project.repositories[0].url, "https://corp.example.com/maven");
        assert!(project.dependency_artifacts().is_none());
    }

    #[test]
    fn project_requires_coordinates() {
        let pom = pom::parse_pom("<project><artifactId>x</artifactId></project>").unwrap();
        let err = Project::from_pom(&pom).unwrap_err();
        assert!(err.to_string().contains("groupId"), "got: {err}");
    }

    #[test]
    fn dependency_artifacts_are_cached() {
        let pom = pom::parse_pom(APP_POM).unwrap();
        let mut project = Project::from_pom(&pom).unwrap();
        let set: ArtifactSet = [ArtifactCoordinate::new("com.lib", "lib", "2.5")].into();
        project.set_dependency_artifacts(set.clone());
        assert_eq!(project.dependency_artifacts(), Some(&set));
    }
}
