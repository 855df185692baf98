use std::time::Instant;

use marketbrief_types::{Error, Result, SessionResult, ToolCallEvent, ToolInfo, ToolListing};
use serde::Deserialize;
use serde_json::{Value, json};

/// Default base of the AI responses endpoint.
pub const DEFAULT_AI_BASE_URL: &str = "https://api.openai.com/v1";

/// Descriptor for the remote MCP tool server the session may invoke.
#[derive(Debug, Clone)]
pub struct McpServer {
    pub server_label: String,
    pub server_url: String,
    /// Credential forwarded to the tool server as `x-api-key`
    pub api_key: String,
    /// Tool names the session is allowed to call; empty means all
    pub allowed_tools: Vec<String>,
}

/// Issues the single long-running completion request of the
/// deep-research flow and captures the full tool-call sequence.
pub struct ResearchSession {
    api_key: String,
    base_url: String,
    client: reqwest::blocking::Client,
}

impl ResearchSession {
    pub fn new(api_key: String, base_url: String) -> Self {
        Self {
            api_key,
            base_url: base_url.trim_end_matches('/').to_string(),
            client: reqwest::blocking::Client::new(),
        }
    }

    /// Run one session and block until the endpoint signals completion.
    ///
    /// Elapsed time is measured from request start to full response
    /// receipt. The returned event sequence is complete and immutable;
    /// there is no streaming consumption.
    pub fn run(&self, model: &str, prompt: &str, server: &McpServer) -> Result<SessionResult> {
        let url = format!("{}/responses", self.base_url);

        let mut tool = json!({
            "type": "mcp",
            "server_label": server.server_label,
            "server_url": server.server_url,
            "headers": { "x-api-key": server.api_key },
            "require_approval": "never",
        });
        if !server.allowed_tools.is_empty() {
            tool["allowed_tools"] = json!(server.allowed_tools);
        }

        let payload = json!({
            "model": model,
            "input": prompt,
            "tools": [tool],
        });

        let started = Instant::now();

        let response = self
            .client
            .post(&url)
            .header("Authorization", format!("Bearer {}", self.api_key))
            .json(&payload)
            .send()
            .map_err(|e| Error::Upstream {
                status: None,
                message: format!("request to {} failed: {}", url, e),
            })?;

        let status = response.status();
        let body = response.text().map_err(|e| Error::Upstream {
            status: Some(status.as_u16()),
            message: format!("failed to read response body: {}", e),
        })?;

        let elapsed = started.elapsed();

        if !status.is_success() {
            return Err(upstream_error(status.as_u16(), &body));
        }

        let parsed: ResponsesBody = serde_json::from_str(&body).map_err(|e| Error::Upstream {
            status: Some(status.as_u16()),
            message: format!("unexpected response shape: {}", e),
        })?;

        let mut result = assemble(parsed);
        result.elapsed = elapsed;
        Ok(result)
    }
}

/// Extract the upstream `error.message` when the body is JSON,
/// otherwise surface the raw body.
fn upstream_error(status: u16, body: &str) -> Error {
    let message = serde_json::from_str::<Value>(body)
        .ok()
        .and_then(|v| {
            v.pointer("/error/message")
                .and_then(Value::as_str)
                .map(str::to_string)
        })
        .unwrap_or_else(|| body.trim().to_string());

    Error::Upstream {
        status: Some(status),
        message,
    }
}

#[derive(Debug, Deserialize)]
struct ResponsesBody {
    #[serde(default)]
    output: Vec<OutputItem>,
    #[serde(default)]
    output_text: Option<String>,
}

/// Items of the ordered `output` array, tagged by `type`.
#[derive(Debug, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
enum OutputItem {
    McpListTools {
        server_label: String,
        #[serde(default)]
        tools: Vec<ToolInfo>,
    },
    McpCall {
        id: String,
        server_label: String,
        name: String,
        #[serde(default)]
        arguments: Value,
        #[serde(default)]
        output: Option<Value>,
    },
    McpCallOutput {
        call_id: String,
        #[serde(default)]
        output: Value,
    },
    Message {
        #[serde(default)]
        content: Vec<ContentPart>,
    },
    #[serde(other)]
    Other,
}

#[derive(Debug, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
enum ContentPart {
    OutputText {
        text: String,
    },
    #[serde(other)]
    Other,
}

/// Fold the ordered output items into a SessionResult.
///
/// A standalone `mcp_call_output` attaches to the most recent pending
/// call with the same call id; newer servers inline the output on the
/// call itself.
fn assemble(body: ResponsesBody) -> SessionResult {
    let mut events: Vec<ToolCallEvent> = Vec::new();
    let mut listings: Vec<ToolListing> = Vec::new();
    let mut message_texts: Vec<String> = Vec::new();

    for item in body.output {
        match item {
            OutputItem::McpListTools {
                server_label,
                tools,
            } => listings.push(ToolListing {
                server_label,
                tools,
            }),

            OutputItem::McpCall {
                id,
                server_label,
                name,
                arguments,
                output,
            } => events.push(ToolCallEvent {
                server_label,
                tool_name: name,
                call_id: id,
                arguments,
                response: output,
            }),

            OutputItem::McpCallOutput { call_id, output } => {
                if let Some(event) = events
                    .iter_mut()
                    .rev()
                    .find(|e| e.call_id == call_id && e.response.is_none())
                {
                    event.response = Some(output);
                }
            }

            OutputItem::Message { content } => {
                for part in content {
                    if let ContentPart::OutputText { text } = part {
                        message_texts.push(text);
                    }
                }
            }

            OutputItem::Other => {}
        }
    }

    let final_text = body
        .output_text
        .unwrap_or_else(|| message_texts.join("\n\n"));

    SessionResult {
        final_text,
        elapsed: std::time::Duration::ZERO,
        events,
        listings,
    }
}
