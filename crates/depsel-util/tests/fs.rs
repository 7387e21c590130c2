use depsel_util::fs::{expand_home, find_ancestor_with, home_dir};
use tempfile::TempDir;

#[test]
fn test_find_ancestor_with_direct() {
    let tmp = TempDir::new().unwrap();
    std::fs::write(tmp.path().join("Depsel.toml"), "").unwrap();
    let result = find_ancestor_with(tmp.path(), "Depsel.toml");
    assert_eq!(result, Some(tmp.path().to_path_buf()));
}

#[test]
fn test_find_ancestor_with_nested() {
    let tmp = TempDir::new().unwrap();
    std::fs::write(tmp.path().join("Depsel.toml"), "").unwrap();
    let nested = tmp.path().join("a").join("b").join("c");
    std::fs::create_dir_all(&nested).unwrap();
    let result = find_ancestor_with(&nested, "Depsel.toml");
    assert_eq!(result, Some(tmp.path().to_path_buf()));
}

#[test]
fn test_find_ancestor_with_not_found() {
    let tmp = TempDir::new().unwrap();
    let result = find_ancestor_with(tmp.path(), "NonExistent.file");
    assert_eq!(result, None);
}

#[test]
fn test_expand_home_prefix() {
    let expanded = expand_home("~/.m2/repository");
    assert_eq!(expanded, home_dir().join(".m2/repository"));
}

#[test]
fn test_expand_home_leaves_absolute_paths() {
    assert_eq!(
        expand_home("/opt/repo"),
        std::path::PathBuf::from("/opt/repo")
    );
}
