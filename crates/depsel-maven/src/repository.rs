//! Remote repository model: aggregation, mirror substitution and server
//! credentials.

use std::collections::HashSet;

use depsel_core::config::{servers_by_id, MirrorEntry, RepositoryDecl, ServerEntry};

use crate::pom::PomRepository;

/// Maven Central base URL.
pub const MAVEN_CENTRAL_URL: &str = "https://repo.maven.apache.org/maven2";

/// A configured remote repository with optional credentials.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoteRepository {
    pub id: String,
    pub url: String,
    pub username: Option<String>,
    pub password: Option<String>,
    /// Id of the mirror that replaced the original repository, if any.
    pub mirror_of: Option<String>,
}

impl RemoteRepository {
    pub fn new(id: &str, url: &str) -> Self {
        Self {
            id: id.to_string(),
            url: url.trim_end_matches('/').to_string(),
            username: None,
            password: None,
            mirror_of: None,
        }
    }

    pub fn from_decl(decl: &RepositoryDecl) -> Self {
        Self::new(&decl.id, &decl.url)
    }

    pub fn from_pom(repo: &PomRepository) -> Self {
        Self::new(&repo.id, &repo.url)
    }

    /// Construct the default Maven Central repository.
    pub fn maven_central() -> Self {
        Self::new("central", MAVEN_CENTRAL_URL)
    }

    /// Whether this repository has authentication configured.
    pub fn has_auth(&self) -> bool {
        self.username.is_some() || self.password.is_some()
    }

    /// Whether the URL points at the local machine.
    pub fn is_local(&self) -> bool {
        let rest = self
            .url
            .split_once("://")
            .map_or(self.url.as_str(), |(_, r)| r);
        let host = rest.split(['/', ':']).next().unwrap_or_default();
        self.url.starts_with("file:") || host == "localhost" || host == "127.0.0.1"
    }
}

/// Concatenate repository lists, keeping the first repository seen for
/// each URL.
pub fn aggregate_remote_repositories(lists: &[&[RemoteRepository]]) -> Vec<RemoteRepository> {
    let mut seen: HashSet<&str> = HashSet::new();
    let mut out = Vec::new();
    for list in lists {
        for repo in *list {
            if seen.insert(repo.url.as_str()) {
                out.push(repo.clone());
            }
        }
    }
    out
}

/// Whether a mirror's `mirror-of` expression selects the repository.
///
/// Supports `*`, `external:*`, exact ids, comma lists and `!id` exclusions.
pub fn mirror_matches(mirror_of: &str, repo: &RemoteRepository) -> bool {
    let mut matched = false;
    for part in mirror_of.split(',').map(str::trim).filter(|p| !p.is_empty()) {
        if let Some(excluded) = part.strip_prefix('!') {
            if excluded == repo.id {
                return false;
            }
            continue;
        }
        matched |= match part {
            "*" => true,
            "external:*" => !repo.is_local(),
            id => id == repo.id,
        };
    }
    matched
}

/// Replace each repository with the first mirror that selects it.
/// Repositories sharing a mirror collapse into one entry.
pub fn apply_mirrors(repos: &[RemoteRepository], mirrors: &[MirrorEntry]) -> Vec<RemoteRepository> {
    let mirrored: Vec<RemoteRepository> = repos
        .iter()
        .map(|repo| {
            match mirrors.iter().find(|m| mirror_matches(&m.mirror_of, repo)) {
                Some(mirror) => {
                    tracing::debug!("repository '{}' mirrored by '{}'", repo.id, mirror.id);
                    RemoteRepository {
                        mirror_of: Some(repo.id.clone()),
                        ..RemoteRepository::new(&mirror.id, &mirror.url)
                    }
                }
                None => repo.clone(),
            }
        })
        .collect();
    aggregate_remote_repositories(&[&mirrored])
}

/// Attach credentials from the server whose id equals the repository id.
pub fn apply_servers(repos: &mut [RemoteRepository], servers: &[ServerEntry]) {
    let by_id = servers_by_id(servers);
    for repo in repos {
        if let Some(server) = by_id.get(repo.id.as_str()) {
            repo.username = server.username.clone();
            repo.password = server.password.clone();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mirror(id: &str, of: &str) -> MirrorEntry {
        MirrorEntry {
            id: id.to_string(),
            url: format!("https://{id}.example.com/maven"),
            mirror_of: of.to_string(),
        }
    }

    #[test]
    fn new_trims_trailing_slash() {
        let repo = RemoteRepository::new("x", "https://repo.example.com/maven/");
        assert_eq!(repo.url, "https://repo.example.com/maven");
        assert!(!repo.has_auth());
    }

    #[test]
    fn aggregate_first_url_wins() {
        let session = vec![
            RemoteRepository::new("central", MAVEN_CENTRAL_URL),
            RemoteRepository::new("corp", "https://corp.example.com/maven"),
        ];
        let project = vec![
            RemoteRepository::new("central-again", MAVEN_CENTRAL_URL),
            RemoteRepository::new("extra", "https://extra.example.com/maven"),
        ];
        let all = aggregate_remote_repositories(&[&session, &project]);
        let ids: Vec<&str> = all.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, ["central", "corp", "extra"]);
    }

    #[test]
    fn aggregate_of_empty_lists_is_empty() {
        assert!(aggregate_remote_repositories(&[&[], &[]]).is_empty());
    }

    #[test]
    fn mirror_of_star_and_exclusions() {
        let central = RemoteRepository::maven_central();
        let corp = RemoteRepository::new("corp", "https://corp.example.com/maven");
        assert!(mirror_matches("*", &central));
        assert!(mirror_matches("*,!corp", &central));
        assert!(!mirror_matches("*,!corp", &corp));
        assert!(mirror_matches("central,corp", &corp));
        assert!(!mirror_matches("central", &corp));
    }

    #[test]
    fn mirror_of_external_skips_local_repositories() {
        let local = RemoteRepository::new("dev", "http://localhost:8081/repo");
        let file = RemoteRepository::new("disk", "file:///srv/repo");
        assert!(!mirror_matches("external:*", &local));
        assert!(!mirror_matches("external:*", &file));
        assert!(mirror_matches("external:*", &RemoteRepository::maven_central()));
    }

    #[test]
    fn apply_mirrors_collapses_repositories() {
        let repos = vec![
            RemoteRepository::maven_central(),
            RemoteRepository::new("corp", "https://corp.example.com/maven"),
            RemoteRepository::new("dev", "http://localhost:8081/repo"),
        ];
        let out = apply_mirrors(&repos, &[mirror("proxy", "external:*")]);
        let ids: Vec<&str> = out.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, ["proxy", "dev"]);
        assert_eq!(out[0].mirror_of.as_deref(), Some("central"));
    }

    #[test]
    fn apply_servers_attaches_credentials() {
        let mut repos = vec![RemoteRepository::new("corp", "https://corp.example.com/maven")];
        apply_servers(
            &mut repos,
            &[ServerEntry {
                id: "corp".to_string(),
                username: Some("user".to_string()),
                password: Some("pass".to_string()),
            }],
        );
        assert!(repos[0].has_auth());
        assert_eq!(repos[0].username.as_deref(), Some("user"));
    }
}
