use indexmap::IndexMap;

use crate::event::ToolCallEvent;

/// Per-tool call counts derived from a completed event sequence.
///
/// Computed once after the full sequence is known. Iteration order is
/// first-appearance order of each tool name (stable, not sorted); names
/// are matched exactly, case-sensitive.
#[derive(Debug, Clone, Default)]
pub struct CallSummary {
    counts: IndexMap<String, usize>,
    total: usize,
}

impl CallSummary {
    pub fn from_events(events: &[ToolCallEvent]) -> Self {
        let mut counts: IndexMap<String, usize> = IndexMap::new();
        for event in events {
            *counts.entry(event.tool_name.clone()).or_insert(0) += 1;
        }
        Self {
            counts,
            total: events.len(),
        }
    }

    /// Total call count; equals the length of the input sequence.
    pub fn total(&self) -> usize {
        self.total
    }

    pub fn is_empty(&self) -> bool {
        self.total == 0
    }

    /// (tool name, count) pairs in first-appearance order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, usize)> {
        self.counts.iter().map(|(name, count)| (name.as_str(), *count))
    }
}
