//! Read-only build session inputs: offline and update flags, repositories,
//! servers, mirrors and proxies.

use std::path::PathBuf;

use depsel_core::config::{GlobalSettings, MirrorEntry, ProxyEntry, ServerEntry};

use crate::repository::{apply_mirrors, apply_servers, RemoteRepository};

/// Settings shared by every resolution request of one invocation.
#[derive(Debug, Clone)]
pub struct BuildSession {
    pub offline: bool,
    /// Re-check snapshots and cached metadata.
    pub force_update: bool,
    pub local_repository: PathBuf,
    /// Session-level remote repositories, in priority order.
    pub remote_repositories: Vec<RemoteRepository>,
    pub servers: Vec<ServerEntry>,
    pub mirrors: Vec<MirrorEntry>,
    pub proxies: Vec<ProxyEntry>,
}

/// Overrides from the command line. `None` keeps the settings value.
#[derive(Debug, Clone, Default)]
pub struct SessionOverrides {
    pub offline: Option<bool>,
    pub force_update: Option<bool>,
    pub local_repository: Option<PathBuf>,
}

impl BuildSession {
    /// Build the session from settings and command-line overrides. Maven
    /// Central is used when no repository is configured.
    pub fn from_settings(settings: &GlobalSettings, overrides: &SessionOverrides) -> Self {
        let mut remote_repositories: Vec<RemoteRepository> = settings
            .repositories
            .iter()
            .map(RemoteRepository::from_decl)
            .collect();
        if remote_repositories.is_empty() {
            remote_repositories.push(RemoteRepository::maven_central());
        }
        Self {
            offline: overrides.offline.unwrap_or(settings.offline),
            force_update: overrides.force_update.unwrap_or(settings.update_snapshots),
            local_repository: overrides
                .local_repository
                .clone()
                .unwrap_or_else(|| settings.local_repository_path()),
            remote_repositories,
            servers: settings.servers.clone(),
            mirrors: settings.mirrors.clone(),
            proxies: settings.proxies.clone(),
        }
    }

    /// Apply mirrors, then attach server credentials.
    pub fn effective_repositories(&self, repos: &[RemoteRepository]) -> Vec<RemoteRepository> {
        let mut out = apply_mirrors(repos, &self.mirrors);
        apply_servers(&mut out, &self.servers);
        out
    }

    /// Proxies marked active.
    pub fn active_proxies(&self) -> Vec<ProxyEntry> {
        self.proxies.iter().filter(|p| p.active).cloned().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use depsel_core::config::RepositoryDecl;

    #[test]
    fn defaults_to_maven_central() {
        let session = BuildSession::from_settings(&GlobalSettings::default(), &Default::default());
        assert_eq!(session.remote_repositories.len(), 1);
        assert_eq!(session.remote_repositories[0].id, "central");
        assert!(!session.offline);
    }

    #[test]
    fn overrides_take_precedence() {
        let settings = GlobalSettings {
            offline: false,
            update_snapshots: true,
            repositories: vec![RepositoryDecl {
                id: "corp".to_string(),
                url: "https://corp.example.com/maven/".to_string(),
            }],
            ..Default::default()
        };
        let overrides = SessionOverrides {
            offline: Some(true),
            force_update: None,
            local_repository: Some(PathBuf::from("/tmp/m2")),
        };
        let session = BuildSession::from_settings(&settings, &overrides);
        assert!(session.offline);
        assert!(session.force_update);
        assert_eq!(session.local_repository, PathBuf::from("/tmp/m2"));
        assert_eq!(session.remote_repositories[0].url, "https://corp.example.com/maven");
    }

    #[test]
    fn effective_repositories_mirror_then_authenticate() {
        let settings = GlobalSettings {
            mirrors: vec![MirrorEntry {
                id: "corp-mirror".to_string(),
                url: "https://mirror.example.com/maven".to_string(),
                mirror_of: "*".to_string(),
            }],
            servers: vec![ServerEntry {
                id: "corp-mirror".to_string(),
                username: Some("ci".to_string()),
                password: None,
            }],
            ..Default::default()
        };
        let session = BuildSession::from_settings(&settings, &Default::default());
        let repos = session.effective_repositories(&session.remote_repositories);
        assert_eq!(repos.len(), 1);
        assert_eq!(repos[0].id, "corp-mirror");
        assert_eq!(repos[0].username.as_deref(), Some("ci"));
    }
}
