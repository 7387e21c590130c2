use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use depsel_util::errors::DepselError;

use crate::rule::FilterRule;

/// Name of the per-project configuration file.
pub const PROJECT_CONFIG_FILE: &str = "Depsel.toml";

/// Default local repository location.
pub const DEFAULT_LOCAL_REPOSITORY: &str = "~/.m2/repository";

/// Per-project configuration loaded from `Depsel.toml`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProjectConfig {
    /// Filter rules, applied in file order.
    #[serde(default, rename = "filter")]
    pub filters: Vec<FilterRule>,
}

impl ProjectConfig {
    pub fn from_path(path: &Path) -> miette::Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| DepselError::Config {
            message: format!("Failed to read {}: {e}", path.display()),
        })?;
        Self::parse_toml(&content)
    }

    pub fn parse_toml(content: &str) -> miette::Result<Self> {
        toml::from_str(content).map_err(|e| {
            DepselError::Config {
                message: format!("Failed to parse {PROJECT_CONFIG_FILE}: {e}"),
            }
            .into()
        })
    }
}

/// User-level build session settings from `~/.depsel/settings.toml`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct GlobalSettings {
    #[serde(default)]
    pub offline: bool,

    #[serde(default)]
    pub update_snapshots: bool,

    #[serde(default)]
    pub local_repository: Option<String>,

    /// Session-level remote repositories, in priority order.
    #[serde(default)]
    pub repositories: Vec<RepositoryDecl>,

    #[serde(default)]
    pub servers: Vec<ServerEntry>,

    #[serde(default)]
    pub mirrors: Vec<MirrorEntry>,

    #[serde(default)]
    pub proxies: Vec<ProxyEntry>,
}

/// A named remote repository.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RepositoryDecl {
    pub id: String,
    pub url: String,
}

/// Credentials for the repository or mirror with the same `id`.
///
/// `username` and `password` support `${env:VAR}` references.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerEntry {
    pub id: String,
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub password: Option<String>,
}

/// A mirror replacing the repositories selected by `mirror-of`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct MirrorEntry {
    pub id: String,
    pub url: String,
    pub mirror_of: String,
}

/// An HTTP proxy definition.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct ProxyEntry {
    pub id: String,
    pub host: String,
    pub port: u16,
    #[serde(default = "default_proxy_protocol")]
    pub protocol: String,
    #[serde(default)]
    pub non_proxy_hosts: Option<String>,
    #[serde(default = "default_active")]
    pub active: bool,
}

fn default_proxy_protocol() -> String {
    "http".to_string()
}

fn default_active() -> bool {
    true
}

impl GlobalSettings {
    /// Load settings from an explicit path, or from `~/.depsel/settings.toml`
    /// when it exists. Missing default file yields defaults.
    pub fn load(explicit: Option<&Path>) -> miette::Result<Self> {
        let path = match explicit {
            Some(p) => p.to_path_buf(),
            None => {
                let p = Self::default_path();
                if !p.is_file() {
                    return Ok(Self::default());
                }
                p
            }
        };
        let content = std::fs::read_to_string(&path).map_err(|e| DepselError::Config {
            message: format!("Failed to read settings {}: {e}", path.display()),
        })?;
        let mut settings: Self = toml::from_str(&content).map_err(|e| DepselError::Config {
            message: format!("Failed to parse settings {}: {e}", path.display()),
        })?;
        settings.interpolate_credentials();
        Ok(settings)
    }

    /// Returns the default path to the settings file.
    pub fn default_path() -> PathBuf {
        dirs_path().join("settings.toml")
    }

    /// The configured local repository, or `~/.m2/repository`.
    pub fn local_repository_path(&self) -> PathBuf {
        depsel_util::fs::expand_home(
            self.local_repository
                .as_deref()
                .unwrap_or(DEFAULT_LOCAL_REPOSITORY),
        )
    }

    fn interpolate_credentials(&mut self) {
        for server in &mut self.servers {
            server.username = server.username.as_deref().map(interpolate_env);
            server.password = server.password.as_deref().map(interpolate_env);
        }
    }
}

/// Replace `${env:VAR}` references with process environment values.
/// Unset variables become empty strings.
pub fn interpolate_env(input: &str) -> String {
    let mut result = input.to_string();
    while let Some(start) = result.find("${env:") {
        let Some(end) = result[start..].find('}') else {
            break;
        };
        let end = start + end;
        let key = &result[start + 6..end];
        let value = std::env::var(key).unwrap_or_default();
        result.replace_range(start..=end, &value);
    }
    result
}

/// Returns the path to the depsel data directory (`~/.depsel/`).
pub fn dirs_path() -> PathBuf {
    depsel_util::fs::home_dir().join(".depsel")
}

/// Group settings by id for quick lookup.
pub fn servers_by_id(servers: &[ServerEntry]) -> BTreeMap<&str, &ServerEntry> {
    servers.iter().map(|s| (s.id.as_str(), s)).collect()
}
