//! Unit tests for configuration resolution
//!
//! Note: Uses serial_test crate to prevent ENV variable race conditions.
//! Tests that manipulate SPINDLE_ROOT, SPINDLE_CATALOG_URL, or
//! XDG_CONFIG_HOME are marked with #[serial] to ensure they run
//! sequentially, not in parallel.

use serial_test::serial;
use spindle_common::config::{
    database_path, ensure_root_folder, resolve_catalog_url, resolve_root_folder,
    CATALOG_URL_ENV, DEFAULT_CATALOG_URL, ROOT_ENV,
};
use std::env;
use std::path::PathBuf;

#[test]
#[serial]
fn catalog_url_defaults_to_local_catalog() {
    env::remove_var(CATALOG_URL_ENV);
    assert_eq!(resolve_catalog_url(), DEFAULT_CATALOG_URL);
}

#[test]
#[serial]
fn catalog_url_env_var_overrides_default() {
    env::set_var(CATALOG_URL_ENV, "http://catalog.example.com:9000");
    assert_eq!(resolve_catalog_url(), "http://catalog.example.com:9000");
    env::remove_var(CATALOG_URL_ENV);
}

#[test]
#[serial]
fn catalog_url_trailing_slash_is_stripped() {
    env::set_var(CATALOG_URL_ENV, "http://catalog.example.com:9000/");
    assert_eq!(resolve_catalog_url(), "http://catalog.example.com:9000");
    env::remove_var(CATALOG_URL_ENV);
}

#[test]
#[serial]
fn root_folder_env_var_takes_priority() {
    env::set_var(ROOT_ENV, "/tmp/spindle-test-env-root");
    let root = resolve_root_folder();
    assert_eq!(root, PathBuf::from("/tmp/spindle-test-env-root"));
    env::remove_var(ROOT_ENV);
}

#[test]
#[serial]
fn root_folder_resolves_without_any_configuration() {
    env::remove_var(ROOT_ENV);
    // No config file, no env var: falls through to the compiled default
    // without erroring.
    let root = resolve_root_folder();
    assert!(!root.as_os_str().is_empty());
}

#[cfg(target_os = "linux")]
#[test]
#[serial]
fn root_folder_reads_toml_config_file() {
    env::remove_var(ROOT_ENV);

    let config_home = tempfile::tempdir().unwrap();
    let spindle_dir = config_home.path().join("spindle");
    std::fs::create_dir_all(&spindle_dir).unwrap();
    std::fs::write(
        spindle_dir.join("spindle.toml"),
        "root_folder = \"/srv/spindle-from-toml\"\n",
    )
    .unwrap();

    // dirs::config_dir() honors XDG_CONFIG_HOME on Linux
    let saved = env::var("XDG_CONFIG_HOME").ok();
    env::set_var("XDG_CONFIG_HOME", config_home.path());

    let root = resolve_root_folder();

    match saved {
        Some(v) => env::set_var("XDG_CONFIG_HOME", v),
        None => env::remove_var("XDG_CONFIG_HOME"),
    }

    assert_eq!(root, PathBuf::from("/srv/spindle-from-toml"));
}

#[test]
fn database_path_is_inside_root() {
    let root = PathBuf::from("/tmp/spindle-test-root");
    assert_eq!(database_path(&root), root.join("spindle.db"));
}

#[test]
fn ensure_root_folder_creates_missing_directories() {
    let base = tempfile::tempdir().unwrap();
    let root = base.path().join("nested").join("spindle");

    assert!(!root.exists());
    ensure_root_folder(&root).unwrap();
    assert!(root.is_dir());

    // Idempotent: a second call succeeds on the existing directory
    ensure_root_folder(&root).unwrap();
    assert!(root.is_dir());
}
