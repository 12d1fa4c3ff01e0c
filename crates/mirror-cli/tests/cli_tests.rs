//! End-to-end tests of the `mirror` binary.

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn mirror() -> Command {
    let mut cmd = Command::cargo_bin("mirror").unwrap();
    // Keep the host environment's credentials out of the tests.
    cmd.env_remove("MIRROR_GITHUB_TOKEN");
    cmd.env_remove("GITHUB_TOKEN");
    cmd
}

const CONFIG: &str = r#"
[source]
owner = "acme"
repo = "handbook"

[[roots]]
remote = "docs"
"#;

#[test]
fn sync_without_credential_exits_nonzero() {
    let dir = TempDir::new().unwrap();
    std::fs::write(dir.path().join("mirror.toml"), CONFIG).unwrap();

    mirror()
        .current_dir(dir.path())
        .args(["sync"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("no credential found"));
}

#[test]
fn sync_without_config_exits_nonzero() {
    let dir = TempDir::new().unwrap();

    mirror()
        .current_dir(dir.path())
        .args(["sync"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Configuration not found"));
}

#[test]
fn check_links_reports_broken_targets() {
    let dir = TempDir::new().unwrap();
    std::fs::write(dir.path().join("good.md"), "[ok](other.md)").unwrap();
    std::fs::write(dir.path().join("other.md"), "x").unwrap();
    std::fs::write(dir.path().join("bad.md"), "[gone](missing.md)").unwrap();

    mirror()
        .current_dir(dir.path())
        .args(["check-links"])
        .assert()
        .failure()
        .stdout(predicate::str::contains("missing.md"))
        .stderr(predicate::str::contains("1 broken links found"));
}

#[test]
fn check_links_passes_on_clean_tree() {
    let dir = TempDir::new().unwrap();
    std::fs::write(dir.path().join("doc.md"), "[ok](other.md)").unwrap();
    std::fs::write(dir.path().join("other.md"), "x").unwrap();

    mirror()
        .current_dir(dir.path())
        .args(["check-links"])
        .assert()
        .success()
        .stdout(predicate::str::contains("All documentation links valid"));
}

#[test]
fn convert_roles_produces_frontmatter() {
    let dir = TempDir::new().unwrap();
    let roles = dir.path().join("roles");
    std::fs::create_dir_all(&roles).unwrap();
    std::fs::write(roles.join("business-analyst.md"), "role body\n").unwrap();

    mirror()
        .current_dir(dir.path())
        .args(["convert-roles", "roles", "--out", "agents"])
        .assert()
        .success();

    let converted =
        std::fs::read_to_string(dir.path().join("agents").join("business-analyst.md")).unwrap();
    assert!(converted.starts_with("---\n"));
    assert!(mirror_tools::validate(&converted).is_ok());
}

#[test]
fn update_catalog_rewrites_lists() {
    let dir = TempDir::new().unwrap();
    std::fs::write(
        dir.path().join("catalog.json"),
        r#"{"name": "toolkit", "version": "1.0.0", "agents": [], "commands": []}"#,
    )
    .unwrap();
    let agents = dir.path().join("agents");
    std::fs::create_dir_all(&agents).unwrap();
    std::fs::write(agents.join("a.md"), "x").unwrap();
    std::fs::write(agents.join("b.md"), "x").unwrap();

    mirror()
        .current_dir(dir.path())
        .args(["update-catalog"])
        .assert()
        .success()
        .stdout(predicate::str::contains("2 agents"));

    let written: serde_json::Value = serde_json::from_str(
        &std::fs::read_to_string(dir.path().join("catalog.json")).unwrap(),
    )
    .unwrap();
    assert_eq!(written["version"], "1.1.0");
    assert_eq!(written["agents"], serde_json::json!(["a", "b"]));
}
