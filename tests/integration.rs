use predicates::prelude::*;
use std::net::TcpListener;
use std::process::Command;
use tempfile::TempDir;

const NOW: &str = "2025-03-04T05:06:00Z";

fn cmd() -> assert_cmd::Command {
    let mut cmd = assert_cmd::Command::from(Command::new(env!("CARGO_BIN_EXE_statusboard")));
    cmd.env_remove("GITHUB_TOKEN").env_remove("RUST_LOG");
    cmd
}

fn fixture_path(name: &str) -> String {
    format!("{}/tests/fixtures/{}", env!("CARGO_MANIFEST_DIR"), name)
}

fn offline(dir: &TempDir) -> assert_cmd::Command {
    let mut cmd = cmd();
    cmd.args(["--offline", "--timestamp", NOW])
        .args(["-o", dir.path().to_str().unwrap()]);
    cmd
}

/// A local address nothing listens on.
fn closed_port_url() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{}", addr)
}

// -- fresh output directory --

#[test]
fn missing_documents_start_from_skeletons() {
    let dir = TempDir::new().unwrap();

    offline(&dir)
        .assert()
        .success()
        .stdout(predicate::str::contains("README.md"))
        .stdout(predicate::str::contains("index.html"))
        .stdout(predicate::str::contains("Overall completion: 67%"))
        .stdout(predicate::str::contains("Components ready: 8/12"))
        .stdout(predicate::str::contains("In development: 4"));

    let readme = std::fs::read_to_string(dir.path().join("README.md")).unwrap();
    assert!(readme.contains("**67%** Complete | **8/12** Components Ready"));
    assert!(readme.contains("*Last updated: 2025-03-04*"));
    assert!(readme.contains("| **12** | **8** | **4** | **0** | **0** | **0%** |"));
    assert!(readme.contains("| **Code Miner**<br/>"));
    assert!(readme.contains("Private repo"));
    assert!(readme.contains("[PyPI](https://pypi.org/project/semantic-copycat-oslili/)"));

    let html = std::fs::read_to_string(dir.path().join("index.html")).unwrap();
    assert!(html.contains(r#"<div class="stat-number">67%</div>"#));
    assert_eq!(html.matches("class=\"component-card\"").count(), 12);
    assert!(html.contains("Last updated: 2025-03-04 05:06 UTC"));
    assert!(!dir.path().join("status.json").exists());
}

#[test]
fn second_run_is_byte_identical() {
    let dir = TempDir::new().unwrap();

    offline(&dir).assert().success();
    let readme = std::fs::read(dir.path().join("README.md")).unwrap();
    let html = std::fs::read(dir.path().join("index.html")).unwrap();

    offline(&dir).assert().success();
    assert_eq!(std::fs::read(dir.path().join("README.md")).unwrap(), readme);
    assert_eq!(std::fs::read(dir.path().join("index.html")).unwrap(), html);
}

#[test]
fn output_directory_is_created() {
    let dir = TempDir::new().unwrap();
    let nested = dir.path().join("site/public");

    cmd()
        .args(["--offline", "--timestamp", NOW, "html"])
        .args(["-o", nested.to_str().unwrap()])
        .assert()
        .success();

    assert!(nested.join("index.html").is_file());
    assert!(!nested.join("README.md").exists());
}

// -- existing documents --

#[test]
fn legacy_html_page_is_patched_in_place() {
    let dir = TempDir::new().unwrap();
    std::fs::copy(fixture_path("index.html"), dir.path().join("index.html")).unwrap();

    offline(&dir).arg("html").assert().success();

    let html = std::fs::read_to_string(dir.path().join("index.html")).unwrap();
    assert!(html.contains(r#"<div class="stat-number">67%</div><div class="stat-label">Overall</div>"#));
    assert!(html.contains(r#"<div class="stat-number">12</div><div class="stat-label">Components</div>"#));
    assert!(html.contains(r#"<div class="stat-number">8</div><div class="stat-label">Ready</div>"#));
    assert!(html.contains(r#"<div class="stat-number">4</div><div class="stat-label">In Development</div>"#));
    assert!(html.contains(r#"<div class="stat-number">700+</div>"#));
    assert!(!html.contains("Retired Scanner"));
    assert!(html.contains("<span class=\"component-name\">Binary Sniffer</span>"));
    assert!(html.contains("<nav class=\"site-nav\">Home · Docs · Contact</nav>"));
    assert!(html.contains("<p>Contact us at hello@example.com</p>"));
    assert!(html.contains("<p>Last updated: 2025-03-04 05:06 UTC</p>"));
}

#[test]
fn hand_written_readme_keeps_unmarked_text() {
    let dir = TempDir::new().unwrap();
    std::fs::copy(fixture_path("README.md"), dir.path().join("README.md")).unwrap();

    offline(&dir).arg("readme").assert().success();

    let readme = std::fs::read_to_string(dir.path().join("README.md")).unwrap();
    assert!(readme.starts_with("# Code Copycat Defender\n\nHand-written introduction that must survive regeneration.\n"));
    assert!(readme.contains("**67%** Complete | **8/12** Components Ready"));
    assert!(readme.contains(&format!("\n{}{}\n", "█".repeat(33), "░".repeat(17))));
    assert!(readme.contains("*Last updated: 2025-03-04*"));
    assert!(!readme.contains("| stale | row |"));
    assert!(readme.contains("<!--BEGIN:COMPONENTS-->\n| Component | Version | License |"));
    assert!(readme.ends_with("## Notes\n\nKeep this paragraph.\n"));
}

// -- json target --

#[test]
fn json_target_writes_status_file() {
    let dir = TempDir::new().unwrap();

    offline(&dir).arg("json").assert().success();

    let json = std::fs::read_to_string(dir.path().join("status.json")).unwrap();
    let value: serde_json::Value = serde_json::from_str(&json).unwrap();
    assert_eq!(value["generated_at"], NOW);
    assert_eq!(value["totals"]["total"], 12);
    assert_eq!(value["totals"]["ready"], 8);
    assert_eq!(value["components"].as_array().unwrap().len(), 12);
    assert_eq!(value["components"][0]["name"], "Frontend UI");
    assert!(!dir.path().join("README.md").exists());
}

// -- network failures and bad input --

#[test]
fn unreachable_services_degrade_to_defaults() {
    let dir = TempDir::new().unwrap();
    let url = closed_port_url();

    cmd()
        .args(["--timestamp", NOW, "readme"])
        .args(["--github-api", &url, "--pypi-api", &url])
        .args(["-o", dir.path().to_str().unwrap()])
        .assert()
        .success()
        .stdout(predicate::str::contains("Components ready: 8/12"));

    let readme = std::fs::read_to_string(dir.path().join("README.md")).unwrap();
    assert!(readme.contains("**67%** Complete | **8/12** Components Ready"));
}

#[test]
fn unknown_target_fails_before_writing() {
    let dir = TempDir::new().unwrap();

    offline(&dir)
        .args(["readme", "pdf"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown target: pdf"));

    assert!(!dir.path().join("README.md").exists());
}

#[test]
fn invalid_timestamp_is_rejected() {
    cmd()
        .args(["--offline", "--timestamp", "last tuesday"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid RFC 3339 timestamp"));
}

#[test]
fn declared_readiness_counts_overrides_only() {
    let dir = TempDir::new().unwrap();

    offline(&dir)
        .args(["--readiness", "declared", "json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Components ready: 8/12"));
}
