use std::fmt;

use marketbrief_types::SessionResult;
use owo_colors::OwoColorize;
use serde_json::Value;

use crate::presentation::DisplayOptions;
use crate::presentation::formatters::text;

/// Fixed preview limit for tool responses in the transcript. The
/// upstream outputs can run to hundreds of kilobytes; 2000 characters
/// is enough to see what a tool returned without flooding the console.
pub const RESPONSE_PREVIEW_MAX_CHARS: usize = 2000;

const RULE_WIDTH: usize = 80;
const PLACEHOLDER: &str = "-";

/// Human-readable console transcript of a captured session: one block
/// per tool-call event, preceded by the advertised tool inventories.
/// Display only; the session is not mutated.
pub struct TranscriptView<'a> {
    pub session: &'a SessionResult,
    pub options: &'a DisplayOptions,
}

impl fmt::Display for TranscriptView<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rule = "=".repeat(RULE_WIDTH);

        writeln!(f, "{}", rule)?;
        if self.options.enable_color {
            writeln!(f, "{}", "MCP REQUESTS AND RESPONSES".bold())?;
        } else {
            writeln!(f, "MCP REQUESTS AND RESPONSES")?;
        }
        writeln!(f, "{}", rule)?;

        for listing in &self.session.listings {
            writeln!(
                f,
                "\n[TOOLS - Server: {}]",
                or_placeholder(&listing.server_label)
            )?;
            for tool in &listing.tools {
                writeln!(
                    f,
                    "  - {}: {}",
                    or_placeholder(&tool.name),
                    text::truncate(&tool.description, 100)
                )?;
            }
        }

        for (index, event) in self.session.events.iter().enumerate() {
            if self.options.enable_color {
                writeln!(f, "\n{}", format!("[CALL #{}]", index + 1).bold())?;
            } else {
                writeln!(f, "\n[CALL #{}]", index + 1)?;
            }
            writeln!(f, "  Server: {}", or_placeholder(&event.server_label))?;
            if self.options.enable_color {
                writeln!(f, "  Tool: {}", or_placeholder(&event.tool_name).cyan())?;
            } else {
                writeln!(f, "  Tool: {}", or_placeholder(&event.tool_name))?;
            }
            writeln!(f, "  Call ID: {}", or_placeholder(&event.call_id))?;
            writeln!(f, "  Arguments: {}", render_value(&event.arguments))?;
            match &event.response {
                Some(response) => writeln!(
                    f,
                    "  Response: {}",
                    text::preview(response, RESPONSE_PREVIEW_MAX_CHARS)
                )?,
                None => writeln!(f, "  Response: {}", PLACEHOLDER)?,
            }
        }

        Ok(())
    }
}

fn or_placeholder(field: &str) -> &str {
    if field.is_empty() { PLACEHOLDER } else { field }
}

fn render_value(value: &Value) -> String {
    match value {
        Value::Null => PLACEHOLDER.to_string(),
        Value::String(s) if s.is_empty() => PLACEHOLDER.to_string(),
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
