//! Integration tests for Settings config loading with layered merge semantics.
//!
//! Merge Semantics:
//! - Defaults → Global: REPLACE (global defines the real baseline)
//! - Global → Local: ordered UNION with `!name` removal
//! - Any → Env vars: REPLACE (explicit user override)
//!
//! Every load goes through `Settings::load_from` with explicit sources, so the
//! user's XDG config and `BLACKROAD_*` variables never take part.

use std::fs;
use std::path::Path;

use tempfile::TempDir;

use blackroad::application::ApplicationError;
use blackroad::config::{local_config_path, Settings, DEFAULT_DASHBOARD_URL};
use blackroad::infrastructure::ServiceContainer;

fn project_with_config(content: &str) -> TempDir {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join(".blackroad.toml"), content).unwrap();
    dir
}

/// Local config only: no global file, no environment overrides.
fn load_local(dir: &Path) -> Result<Settings, ApplicationError> {
    Settings::load_from(None, Some(dir), None)
}

#[test]
fn given_no_local_config_when_load_then_defaults() {
    let dir = TempDir::new().unwrap();

    let settings = load_local(dir.path()).expect("load settings");

    assert_eq!(settings.dashboard_url, DEFAULT_DASHBOARD_URL);
    assert!(settings.catalog.extra_products.is_empty());
}

#[test]
fn given_local_config_with_extras_when_load_then_catalog_extended() {
    let dir = project_with_config(
        r#"
[catalog]
extra_products = ["forgejo", "wiki"]
"#,
    );

    let settings = load_local(dir.path()).expect("load settings");
    let catalog = settings.catalog().expect("catalog");

    assert_eq!(settings.catalog.extra_products, vec!["forgejo", "wiki"]);
    assert_eq!(catalog.len(), 52);
    assert_eq!(catalog.sku_count(), 156);
    assert!(catalog.contains("forgejo"));
}

#[test]
fn given_local_config_with_negation_when_load_then_removes_builtin() {
    let dir = project_with_config(
        r#"
[catalog]
extra_products = ["!tts", "!vosk"]
"#,
    );

    let settings = load_local(dir.path()).expect("load settings");
    let catalog = settings.catalog().expect("catalog");

    assert_eq!(catalog.len(), 48);
    assert!(!catalog.contains("tts"));
    assert_eq!(catalog.wave_count(), 5, "no extra wave for pure removals");
}

#[test]
fn given_local_scalars_when_load_then_override_defaults() {
    let dir = project_with_config(
        r#"
dashboard_url = "https://dash.example.test/p/"
revenue_potential = "$1/year"
strict = true
"#,
    );

    let settings = load_local(dir.path()).expect("load settings");

    assert_eq!(settings.dashboard_url, "https://dash.example.test/p");
    assert_eq!(settings.revenue_potential, "$1/year");
    assert!(settings.strict);

    let container = ServiceContainer::new(settings).expect("container");
    let receipt = container
        .deployment_service()
        .deploy("vllm")
        .expect("known product deploys");
    assert_eq!(receipt.dashboard_url, "https://dash.example.test/p/vllm");
    assert!(container.deployment_service().deploy("nope").is_err());
}

#[test]
fn given_malformed_local_config_when_load_then_config_error() {
    let dir = project_with_config("strict = \"not a bool");

    let result = load_local(dir.path());

    assert!(matches!(result, Err(ApplicationError::Config { .. })));
}

#[test]
fn given_missing_file_when_write_template_then_created_and_loadable() {
    let dir = TempDir::new().unwrap();
    let path = local_config_path(dir.path());

    Settings::write_template(&path).expect("write template");

    assert!(path.exists());
    let settings = load_local(dir.path()).expect("template loads");
    assert_eq!(settings, Settings::load_from(None, None, None).expect("defaults"));
}

#[test]
fn given_existing_file_when_write_template_then_refuses_overwrite() {
    let dir = project_with_config("strict = true\n");
    let path = local_config_path(dir.path());

    let result = Settings::write_template(&path);

    assert!(matches!(result, Err(ApplicationError::AlreadyExists(_))));
    assert_eq!(fs::read_to_string(&path).unwrap(), "strict = true\n");
}

#[test]
fn given_nested_missing_directory_when_write_template_then_creates_parents() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("a/b/blackroad.toml");

    Settings::write_template(&path).expect("write template");

    assert!(path.exists());
}

#[test]
fn given_global_and_local_extras_when_load_then_global_replaces_and_local_unions() {
    let global_dir = TempDir::new().unwrap();
    let global_path = global_dir.path().join("blackroad.toml");
    fs::write(
        &global_path,
        "revenue_potential = \"$9/year\"\n[catalog]\nextra_products = [\"a\", \"b\"]\n",
    )
    .unwrap();
    let project = project_with_config("[catalog]\nextra_products = [\"!a\", \"c\"]\n");

    let settings = Settings::load_from(Some(&global_path), Some(project.path()), None)
        .expect("load settings");

    assert_eq!(settings.catalog.extra_products, vec!["b", "c"]);
    assert_eq!(settings.revenue_potential, "$9/year");
}

#[test]
fn given_missing_global_file_when_load_then_skipped() {
    let dir = TempDir::new().unwrap();
    let missing = dir.path().join("nope/blackroad.toml");

    let settings = Settings::load_from(Some(&missing), None, None).expect("load settings");

    assert_eq!(settings, Settings::default());
}

#[test]
fn given_env_overrides_when_load_then_replace_file_values() {
    // Unique prefix so no other test or the outer shell can collide.
    std::env::set_var("BRCFGTEST_STRICT", "true");
    std::env::set_var("BRCFGTEST_CATALOG__EXTRA_PRODUCTS", "wiki, forgejo");
    let project = project_with_config("strict = false\n[catalog]\nextra_products = [\"x\"]\n");

    let settings = Settings::load_from(None, Some(project.path()), Some("BRCFGTEST"));
    std::env::remove_var("BRCFGTEST_STRICT");
    std::env::remove_var("BRCFGTEST_CATALOG__EXTRA_PRODUCTS");

    let settings = settings.expect("load settings");
    assert!(settings.strict);
    assert_eq!(settings.catalog.extra_products, vec!["wiki", "forgejo"]);
}
