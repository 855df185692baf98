//! End-to-end tests for the marketbrief binary.
//!
//! Network-facing flows run against scripted wiremock endpoints; the
//! binary itself runs on a blocking thread because the mock server
//! needs the test runtime.

use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::json;
use tempfile::TempDir;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn marketbrief(workdir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("marketbrief").unwrap();
    cmd.current_dir(workdir.path())
        .env_remove("OPENAI_API_KEY")
        .env_remove("BIGDATA_API_KEY");
    cmd
}

#[test]
fn help_lists_the_three_flows() {
    let dir = TempDir::new().unwrap();
    marketbrief(&dir)
        .arg("--help")
        .assert()
        .success()
        .stdout(
            predicate::str::contains("research")
                .and(predicate::str::contains("volume"))
                .and(predicate::str::contains("download")),
        );
}

#[test]
fn missing_ai_key_names_that_key_only() {
    let dir = TempDir::new().unwrap();
    marketbrief(&dir)
        .arg("research")
        .assert()
        .failure()
        .stderr(
            predicate::str::contains("OPENAI_API_KEY")
                .and(predicate::str::contains("BIGDATA_API_KEY").not()),
        );
}

#[test]
fn missing_data_key_names_that_key_only() {
    let dir = TempDir::new().unwrap();
    marketbrief(&dir)
        .args(["download", "DOC123"])
        .assert()
        .failure()
        .stderr(
            predicate::str::contains("BIGDATA_API_KEY")
                .and(predicate::str::contains("OPENAI_API_KEY").not()),
        );
}

#[test]
fn inverted_volume_range_fails_before_any_request() {
    let dir = TempDir::new().unwrap();
    marketbrief(&dir)
        .env("BIGDATA_API_KEY", "data-key")
        .args([
            "volume",
            "--start-date",
            "2025-12-15",
            "--end-date",
            "2025-01-01",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("must be before end date"));
}

#[tokio::test]
async fn research_flow_prints_summary_and_writes_pdf() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/responses"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "output": [
                {"type": "mcp_call", "id": "c1", "server_label": "bigdata",
                 "name": "search", "arguments": {"q": "micron"}, "output": "10 hits"},
                {"type": "mcp_call", "id": "c2", "server_label": "bigdata",
                 "name": "search", "arguments": {"q": "dram"}, "output": "4 hits"},
                {"type": "mcp_call", "id": "c3", "server_label": "bigdata",
                 "name": "read", "arguments": {"id": "doc-1"}, "output": "body"},
                {"type": "message", "content": [
                    {"type": "output_text",
                     "text": "# Earnings preview\n\nDRAM pricing remains favorable."}
                ]}
            ]
        })))
        .mount(&server)
        .await;

    let base = server.uri();
    tokio::task::spawn_blocking(move || {
        let dir = TempDir::new().unwrap();
        let out = dir.path().join("artifacts");
        marketbrief(&dir)
            .env("OPENAI_API_KEY", "ai-key")
            .env("BIGDATA_API_KEY", "data-key")
            .args(["research", "--ai-base-url", &base])
            .arg("--output-dir")
            .arg(&out)
            .assert()
            .success()
            .stdout(
                predicate::str::contains("Total MCP Calls: 3")
                    .and(predicate::str::contains(format!(
                        "{:<30} {:>8}",
                        "search", 2
                    )))
                    .and(predicate::str::contains(format!("{:<30} {:>8}", "read", 1)))
                    .and(predicate::str::contains("[CALL #3]"))
                    .and(predicate::str::contains("PDF generated")),
            );

        let pdfs: Vec<_> = std::fs::read_dir(&out)
            .unwrap()
            .filter_map(|e| e.ok())
            .map(|e| e.file_name().to_string_lossy().into_owned())
            .filter(|name| name.starts_with("research_report_") && name.ends_with(".pdf"))
            .collect();
        assert_eq!(pdfs.len(), 1);
    })
    .await
    .unwrap();
}

#[tokio::test]
async fn download_flow_saves_indented_json_with_sanitized_name() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/documents/DOC9"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "content": {"title": {"text": "Chips: up <50%>?"}},
            "body": ["chunk one", "chunk two"]
        })))
        .mount(&server)
        .await;

    let base = server.uri();
    tokio::task::spawn_blocking(move || {
        let dir = TempDir::new().unwrap();
        let out = dir.path().join("artifacts");
        marketbrief(&dir)
            .env("BIGDATA_API_KEY", "data-key")
            .args(["download", "DOC9", "--data-base-url", &base])
            .arg("--output-dir")
            .arg(&out)
            .assert()
            .success()
            .stdout(predicate::str::contains("Document saved to"));

        let saved = out.join("DOC9_Chips_up_50%.json");
        let text = std::fs::read_to_string(&saved).unwrap();
        // Indented output, not a single line
        assert!(text.lines().count() > 3);
        let round: serde_json::Value = serde_json::from_str(&text).unwrap();
        assert_eq!(
            round.pointer("/content/title/text").unwrap(),
            "Chips: up <50%>?"
        );
    })
    .await
    .unwrap();
}

#[tokio::test]
async fn rejected_ai_key_reports_the_upstream_status() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/responses"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({
            "error": {"message": "Incorrect API key provided"}
        })))
        .mount(&server)
        .await;

    let base = server.uri();
    tokio::task::spawn_blocking(move || {
        let dir = TempDir::new().unwrap();
        marketbrief(&dir)
            .env("OPENAI_API_KEY", "bad-key")
            .env("BIGDATA_API_KEY", "data-key")
            .args(["research", "--ai-base-url", &base])
            .assert()
            .failure()
            .stderr(
                predicate::str::contains("401").and(predicate::str::contains("Incorrect API key")),
            );
    })
    .await
    .unwrap();
}
