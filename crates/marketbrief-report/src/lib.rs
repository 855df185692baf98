//! Artifact rendering: markdown report to paginated PDF, theme volume
//! chart to PNG, plus artifact naming (timestamps, filesystem-safe
//! slugs). Rendering failures abort the flow; no plain-text fallback
//! is produced.

pub mod chart;
pub mod filename;
pub mod markdown;
pub mod pdf;

pub use chart::render_volume_chart;
pub use filename::{chart_png_name, document_json_name, report_pdf_name, sanitize_filename, theme_slug};
pub use pdf::render_report_pdf;
