use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::time::Duration;

// NOTE: Schema Design
//
// The upstream responses endpoint interleaves three item kinds in its
// `output` array: tool listings, tool calls, and tool outputs keyed by
// call id. We flatten those into one fixed-shape record per completed
// tool invocation, in arrival order. The sequence is captured whole
// after the blocking request returns; nothing consumes it incrementally
// and nothing mutates it afterwards.

/// One invocation of a remote tool by the AI session.
///
/// `call_id` is only unique within a single session.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolCallEvent {
    /// Label of the remote tool server that handled the call
    pub server_label: String,

    /// Tool name as reported by the server (case-sensitive)
    pub tool_name: String,

    /// Upstream identifier for this call
    pub call_id: String,

    /// Arguments the model passed to the tool
    #[serde(default)]
    pub arguments: Value,

    /// Tool response, when the endpoint reported one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub response: Option<Value>,
}

/// A tool described by the remote server at session start.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolInfo {
    pub name: String,
    #[serde(default)]
    pub description: String,
}

/// The tool inventory a remote server advertised for this session.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolListing {
    pub server_label: String,
    #[serde(default)]
    pub tools: Vec<ToolInfo>,
}

/// Everything one deep-research session produced.
///
/// Owned by the session driver for the duration of one run and consumed
/// exactly once by the transcript, summary, and report stages.
#[derive(Debug, Clone)]
pub struct SessionResult {
    /// Final assistant text (markdown)
    pub final_text: String,

    /// Wall-clock time from request start to response completion
    pub elapsed: Duration,

    /// Completed tool calls, in arrival order
    pub events: Vec<ToolCallEvent>,

    /// Tool inventories advertised by the remote server(s)
    pub listings: Vec<ToolListing>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn event_round_trips_through_json() {
        let event = ToolCallEvent {
            server_label: "bigdata".to_string(),
            tool_name: "search".to_string(),
            call_id: "call_1".to_string(),
            arguments: json!({"query": "micron earnings"}),
            response: Some(json!({"hits": 3})),
        };

        let text = serde_json::to_string(&event).unwrap();
        let back: ToolCallEvent = serde_json::from_str(&text).unwrap();
        assert_eq!(back.tool_name, "search");
        assert_eq!(back.arguments["query"], "micron earnings");
    }

    #[test]
    fn absent_response_is_omitted() {
        let event = ToolCallEvent {
            server_label: "bigdata".to_string(),
            tool_name: "read".to_string(),
            call_id: "call_2".to_string(),
            arguments: Value::Null,
            response: None,
        };

        let text = serde_json::to_string(&event).unwrap();
        assert!(!text.contains("response"));
    }
}
