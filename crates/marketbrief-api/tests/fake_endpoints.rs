//! Scripted fake endpoints for the blocking clients.
//!
//! The clients are synchronous, so each call runs on a blocking thread
//! while the wiremock server lives on the test runtime.

use marketbrief_api::{DataClient, McpServer, ResearchSession};
use marketbrief_types::{CallSummary, Error};
use serde_json::json;
use wiremock::matchers::{body_partial_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn mcp_server() -> McpServer {
    McpServer {
        server_label: "bigdata".to_string(),
        server_url: "https://mcp.bigdata.com/deepresearch/".to_string(),
        api_key: "data-key".to_string(),
        allowed_tools: vec![],
    }
}

#[tokio::test]
async fn session_driver_captures_three_tool_calls() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/responses"))
        .and(header("Authorization", "Bearer test-ai-key"))
        .and(body_partial_json(json!({"model": "o3-deep-research"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "output": [
                {"type": "mcp_list_tools", "server_label": "bigdata",
                 "tools": [{"name": "search"}, {"name": "read"}]},
                {"type": "mcp_call", "id": "c1", "server_label": "bigdata",
                 "name": "search", "arguments": {"q": "micron"}},
                {"type": "mcp_call_output", "call_id": "c1", "output": {"hits": 7}},
                {"type": "mcp_call", "id": "c2", "server_label": "bigdata",
                 "name": "search", "arguments": {"q": "dram pricing"}, "output": "ok"},
                {"type": "mcp_call", "id": "c3", "server_label": "bigdata",
                 "name": "read", "arguments": {"id": "doc-1"}},
                {"type": "message", "content": [
                    {"type": "output_text", "text": "# Earnings preview\n\nSolid."}
                ]}
            ]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let base = server.uri();
    let result = tokio::task::spawn_blocking(move || {
        ResearchSession::new("test-ai-key".to_string(), base).run(
            "o3-deep-research",
            "earnings preview for Micron",
            &mcp_server(),
        )
    })
    .await
    .unwrap()
    .unwrap();

    assert_eq!(result.events.len(), 3);
    assert_eq!(result.events[0].call_id, "c1");
    assert_eq!(result.events[0].response, Some(json!({"hits": 7})));
    assert_eq!(result.final_text, "# Earnings preview\n\nSolid.");
    assert_eq!(result.listings.len(), 1);

    // Summary over the captured sequence: search twice, read once.
    let summary = CallSummary::from_events(&result.events);
    assert_eq!(summary.total(), 3);
    let pairs: Vec<(&str, usize)> = summary.iter().collect();
    assert_eq!(pairs, vec![("search", 2), ("read", 1)]);
}

#[tokio::test]
async fn rejected_credential_surfaces_as_upstream_error() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/responses"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({
            "error": {"message": "Incorrect API key provided"}
        })))
        .mount(&server)
        .await;

    let base = server.uri();
    let err = tokio::task::spawn_blocking(move || {
        ResearchSession::new("bad-key".to_string(), base).run("o3", "prompt", &mcp_server())
    })
    .await
    .unwrap()
    .unwrap_err();

    match err {
        Error::Upstream { status, message } => {
            assert_eq!(status, Some(401));
            assert!(message.contains("Incorrect API key"));
        }
        other => panic!("expected Upstream, got {:?}", other),
    }
}

#[tokio::test]
async fn document_endpoint_inline_response() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/documents/DOC123"))
        .and(header("x-api-key", "data-key"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "content": {"title": {"text": "Chip makers rally"}}
        })))
        .mount(&server)
        .await;

    let base = server.uri();
    let document = tokio::task::spawn_blocking(move || {
        DataClient::new("data-key".to_string(), base).fetch_document("DOC123")
    })
    .await
    .unwrap()
    .unwrap();

    assert_eq!(
        document.pointer("/content/title/text").unwrap(),
        "Chip makers rally"
    );
}

#[tokio::test]
async fn document_endpoint_presigned_redirect_triggers_second_get() {
    let server = MockServer::start().await;

    let signed_url = format!("{}/signed/DOC456", server.uri());
    Mock::given(method("GET"))
        .and(path("/documents/DOC456"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"url": signed_url})))
        .expect(1)
        .mount(&server)
        .await;

    // The pre-signed fetch carries no API key.
    Mock::given(method("GET"))
        .and(path("/signed/DOC456"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "content": {"title": {"text": "Large archived filing"}}
        })))
        .expect(1)
        .mount(&server)
        .await;

    let base = server.uri();
    let document = tokio::task::spawn_blocking(move || {
        DataClient::new("data-key".to_string(), base).fetch_document("DOC456")
    })
    .await
    .unwrap()
    .unwrap();

    assert_eq!(
        document.pointer("/content/title/text").unwrap(),
        "Large archived filing"
    );
}

#[tokio::test]
async fn volume_endpoint_posts_query_and_decodes_series() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/search/volume"))
        .and(header("x-api-key", "data-key"))
        .and(body_partial_json(json!({
            "query": {"text": "Tariffs impact"}
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "metadata": {"request_id": "req-9"},
            "results": {
                "total": {"documents": 40, "chunks": 200},
                "volume": [
                    {"date": "2025-01-06", "documents": 12, "chunks": 60, "sentiment": 0.2},
                    {"date": "2025-01-07", "documents": 28, "chunks": 140, "sentiment": -0.1}
                ]
            }
        })))
        .mount(&server)
        .await;

    let base = server.uri();
    let report = tokio::task::spawn_blocking(move || {
        DataClient::new("data-key".to_string(), base).fetch_volume(
            "Tariffs impact",
            "2025-01-01T00:00:00Z",
            "2025-01-31T23:59:59Z",
        )
    })
    .await
    .unwrap()
    .unwrap();

    assert_eq!(report.metadata.request_id.as_deref(), Some("req-9"));
    assert_eq!(report.results.volume.len(), 2);
    assert_eq!(report.results.total.documents, 40);
}
