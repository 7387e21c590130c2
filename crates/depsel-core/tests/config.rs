use depsel_core::config::{interpolate_env, GlobalSettings, ProjectConfig};
use tempfile::TempDir;

#[test]
fn project_config_parses_filters_in_order() {
    let config = ProjectConfig::parse_toml(
        r#"
[[filter]]
include = "com.foo,org.bar:baz"
exclude = "com.foo:legacy"
transitive = true

[[filter]]
include = "org.other"
"#,
    )
    .unwrap();
    assert_eq!(config.filters.len(), 2);
    assert_eq!(config.filters[0].include, "com.foo,org.bar:baz");
    assert_eq!(config.filters[0].exclude, "com.foo:legacy");
    assert!(config.filters[0].transitive);
    assert_eq!(config.filters[1].include, "org.other");
    assert_eq!(config.filters[1].exclude, "");
    assert!(!config.filters[1].transitive);
}

#[test]
fn project_config_empty_has_no_filters() {
    let config = ProjectConfig::parse_toml("").unwrap();
    assert!(config.filters.is_empty());
}

#[test]
fn project_config_rejects_bad_types() {
    let err = ProjectConfig::parse_toml("[[filter]]\ntransitive = \"yes\"\n").unwrap_err();
    assert!(err.to_string().contains("Configuration error"), "got: {err}");
}

#[test]
fn settings_defaults() {
    let settings: GlobalSettings = toml::from_str("").unwrap();
    assert!(!settings.offline);
    assert!(!settings.update_snapshots);
    assert!(settings.repositories.is_empty());
    assert!(settings
        .local_repository_path()
        .ends_with(".m2/repository"));
}

#[test]
fn settings_load_from_explicit_path() {
    let tmp = TempDir::new().unwrap();
    let path = tmp.path().join("settings.toml");
    std::fs::write(
        &path,
        r#"
offline = true
update-snapshots = true
local-repository = "/opt/m2"

[[repositories]]
id = "central"
url = "https://repo.maven.apache.org/maven2"

[[servers]]
id = "central"
username = "deployer"
password = "${env:DEPSEL_TEST_UNSET_PASSWORD}"

[[mirrors]]
id = "corp"
url = "https://mirror.example.com/maven"
mirror-of = "*"

[[proxies]]
id = "corp-proxy"
host = "proxy.example.com"
port = 3128
"#,
    )
    .unwrap();

    let settings = GlobalSettings::load(Some(&path)).unwrap();
    assert!(settings.offline);
    assert!(settings.update_snapshots);
    assert_eq!(
        settings.local_repository_path(),
        std::path::PathBuf::from("/opt/m2")
    );
    assert_eq!(settings.repositories[0].id, "central");
    assert_eq!(settings.servers[0].username.as_deref(), Some("deployer"));
    assert_eq!(settings.servers[0].password.as_deref(), Some(""));
    assert_eq!(settings.mirrors[0].mirror_of, "*");
    assert_eq!(settings.proxies[0].protocol, "http");
    assert!(settings.proxies[0].active);
}

#[test]
fn settings_load_missing_explicit_path_fails() {
    let tmp = TempDir::new().unwrap();
    let result = GlobalSettings::load(Some(&tmp.path().join("nope.toml")));
    assert!(result.is_err());
}

#[test]
fn interpolate_env_reads_process_environment() {
    std::env::set_var("DEPSEL_TEST_TOKEN", "s3cret");
    assert_eq!(interpolate_env("token=${env:DEPSEL_TEST_TOKEN}"), "token=s3cret");
    assert_eq!(interpolate_env("plain"), "plain");
}
