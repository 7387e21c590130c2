//! Read-only access to a Maven-layout local repository.

use std::fs;
use std::path::{Path, PathBuf};

use depsel_core::artifact::ArtifactCoordinate;

use crate::pom::{self, Pom};

/// Parent chains longer than this are treated as cyclic.
const MAX_PARENT_DEPTH: usize = 16;

/// A local repository such as `~/.m2/repository`.
#[derive(Debug, Clone)]
pub struct LocalRepository {
    root: PathBuf,
}

impl LocalRepository {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// The root directory of this repository.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Directory holding every file of one coordinate version.
    pub fn version_dir(&self, group: &str, artifact: &str, version: &str) -> PathBuf {
        self.root
            .join(group.replace('.', "/"))
            .join(artifact)
            .join(version)
    }

    /// Path of the artifact file, whether or not it exists.
    pub fn artifact_path(&self, artifact: &ArtifactCoordinate) -> PathBuf {
        let ext = extension_for_type(&artifact.type_);
        let filename = if artifact.has_classifier() {
            format!(
                "{}-{}-{}.{ext}",
                artifact.artifact_id, artifact.version, artifact.classifier
            )
        } else {
            format!("{}-{}.{ext}", artifact.artifact_id, artifact.version)
        };
        self.version_dir(&artifact.group_id, &artifact.artifact_id, &artifact.version)
            .join(filename)
    }

    pub fn pom_path(&self, group: &str, artifact: &str, version: &str) -> PathBuf {
        self.version_dir(group, artifact, version)
            .join(format!("{artifact}-{version}.pom"))
    }

    /// Whether the artifact file is present.
    pub fn has_artifact(&self, artifact: &ArtifactCoordinate) -> bool {
        self.artifact_path(artifact).is_file()
    }

    /// Read and parse a POM. `Ok(None)` when the file is absent.
    pub fn read_pom(&self, group: &str, artifact: &str, version: &str) -> miette::Result<Option<Pom>> {
        let path = self.pom_path(group, artifact, version);
        if !path.is_file() {
            return Ok(None);
        }
        let content = fs::read_to_string(&path).map_err(depsel_util::errors::DepselError::Io)?;
        pom::parse_pom(&content).map(Some)
    }

    /// Read a POM, merge the parent chain found in this repository, and
    /// interpolate properties.
    pub fn effective_pom(
        &self,
        group: &str,
        artifact: &str,
        version: &str,
    ) -> miette::Result<Option<Pom>> {
        let Some(mut pom) = self.read_pom(group, artifact, version)? else {
            return Ok(None);
        };
        self.merge_parents(&mut pom)?;
        pom.resolve_properties();
        Ok(Some(pom))
    }

    /// Merge every ancestor POM available locally into `pom`. Missing
    /// parents end the chain without error.
    pub fn merge_parents(&self, pom: &mut Pom) -> miette::Result<()> {
        let mut next = pom.parent.clone();
        let mut depth = 0;
        while let Some(parent_ref) = next.take() {
            depth += 1;
            if depth > MAX_PARENT_DEPTH {
                tracing::warn!(
                    "parent chain of {} exceeds {MAX_PARENT_DEPTH} levels; stopping",
                    pom.artifact_id.as_deref().unwrap_or("?")
                );
                break;
            }
            let parent = self.read_pom(
                &parent_ref.group_id,
                &parent_ref.artifact_id,
                &parent_ref.version,
            )?;
            match parent {
                Some(parent) => {
                    pom.apply_parent(&parent);
                    next = parent.parent.clone();
                }
                None => tracing::debug!(
                    "parent {}:{}:{} not in local repository",
                    parent_ref.group_id,
                    parent_ref.artifact_id,
                    parent_ref.version
                ),
            }
        }
        Ok(())
    }
}

/// File extension used for a packaging type.
pub fn extension_for_type(type_: &str) -> &str {
    match type_ {
        "" | "jar" | "bundle" | "test-jar" | "maven-plugin" | "ejb" | "ejb-client"
        | "java-source" | "javadoc" => "jar",
        other => other,
    }
}
