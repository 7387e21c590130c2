pub mod ops_check;
pub mod ops_rules;
pub mod ops_select;

use std::path::{Path, PathBuf};

use depsel_core::config::{ProjectConfig, PROJECT_CONFIG_FILE};
use depsel_maven::project::PROJECT_POM_FILE;
use depsel_util::errors::DepselError;

/// Path of `name` in the project root, or a `Config` error if it is absent.
pub fn require_project_file(project_root: &Path, name: &str) -> miette::Result<PathBuf> {
    let path = project_root.join(name);
    if !path.is_file() {
        return Err(DepselError::Config {
            message: format!("No {name} found in {}", project_root.display()),
        }
        .into());
    }
    Ok(path)
}

/// Load `Depsel.toml` from the project root.
pub fn load_project_config(project_root: &Path) -> miette::Result<ProjectConfig> {
    let path = require_project_file(project_root, PROJECT_CONFIG_FILE)?;
    ProjectConfig::from_path(&path)
}

/// Path of the project's `pom.xml`.
pub fn project_pom(project_root: &Path) -> miette::Result<PathBuf> {
    require_project_file(project_root, PROJECT_POM_FILE)
}
