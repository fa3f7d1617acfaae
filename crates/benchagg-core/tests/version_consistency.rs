//! Ensures both workspace crates use `version.workspace = true` and that
//! the workspace version matches the compiled package version.

use std::path::{Path, PathBuf};

fn workspace_root() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .parent()
        .unwrap()
        .parent()
        .unwrap()
        .to_path_buf()
}

fn read_toml(path: &Path) -> toml::Value {
    let raw = std::fs::read_to_string(path).unwrap();
    raw.parse().unwrap()
}

/// `"workspace"` when the crate inherits its version, the literal otherwise.
fn crate_version(manifest_dir: &Path) -> String {
    let doc = read_toml(&manifest_dir.join("Cargo.toml"));
    let version = doc
        .get("package")
        .and_then(|pkg| pkg.get("version"))
        .unwrap_or_else(|| panic!("no package.version in {}", manifest_dir.display()));

    if let Some(table) = version.as_table() {
        if table.get("workspace").and_then(|v| v.as_bool()) == Some(true) {
            return "workspace".to_string();
        }
    }
    version.as_str().unwrap_or_default().to_string()
}

#[test]
fn all_crates_use_workspace_version() {
    let root = workspace_root();
    for krate in ["crates/benchagg-core", "crates/benchagg-cli"] {
        let version = crate_version(&root.join(krate));
        assert_eq!(
            version, "workspace",
            "{} should use version.workspace = true, got {:?}",
            krate, version
        );
    }
}

#[test]
fn workspace_version_matches_cargo_pkg() {
    let doc = read_toml(&workspace_root().join("Cargo.toml"));
    let ws_version = doc["workspace"]["package"]["version"].as_str().unwrap();
    assert_eq!(ws_version, env!("CARGO_PKG_VERSION"));
    assert_eq!(ws_version, benchagg_core::VERSION);
}

#[test]
fn internal_dependency_pins_workspace_version() {
    let doc = read_toml(&workspace_root().join("Cargo.toml"));
    let pinned = doc["workspace"]["dependencies"]["benchagg-core"]["version"]
        .as_str()
        .unwrap();
    assert_eq!(pinned, env!("CARGO_PKG_VERSION"));
}
