use serde_json::Value;

/// Truncate to at most `max_len` characters; the `...` marker is
/// appended only when truncation occurred and counts toward the limit.
pub fn truncate(text: &str, max_len: usize) -> String {
    let char_count = text.chars().count();

    if char_count <= max_len {
        text.to_string()
    } else if max_len <= 3 {
        // For very small max_len, just take first chars without "..."
        text.chars().take(max_len).collect()
    } else {
        let truncated: String = text.chars().take(max_len - 3).collect();
        format!("{}...", truncated)
    }
}

/// Render an opaque JSON value for the transcript. Strings print
/// bare, everything else as pretty JSON, then truncated.
pub fn preview(value: &Value, max_len: usize) -> String {
    let rendered = match value {
        Value::String(s) => s.clone(),
        other => serde_json::to_string_pretty(other).unwrap_or_else(|_| other.to_string()),
    };
    truncate(&rendered, max_len)
}
