use std::sync::LazyLock;

use chrono::Local;
use regex::Regex;

const MAX_HEADLINE_LEN: usize = 100;

static RESERVED: LazyLock<Regex> = LazyLock::new(|| Regex::new(r#"[<>:"/\\|?*]"#).unwrap());
static WHITESPACE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s+").unwrap());
static NON_SLUG: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[^\w\s-]").unwrap());
static SLUG_JOIN: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[-\s]+").unwrap());

/// Make a string safe for filesystem use: strip reserved characters,
/// collapse whitespace to underscores, trim leading/trailing dots and
/// spaces, cap at 100 characters.
pub fn sanitize_filename(text: &str) -> String {
    let cleaned = RESERVED.replace_all(text, "");
    let trimmed = cleaned.trim_matches(|c| c == '.' || c == ' ');
    let joined = WHITESPACE.replace_all(trimmed, "_");

    joined.chars().take(MAX_HEADLINE_LEN).collect()
}

/// Lowercase slug for chart filenames: drop everything but word
/// characters, spaces and hyphens, then join runs with underscores.
pub fn theme_slug(theme: &str) -> String {
    let cleaned = NON_SLUG.replace_all(theme, "");
    let joined = SLUG_JOIN.replace_all(&cleaned, "_");
    joined.to_lowercase().trim_matches('_').to_string()
}

/// Local timestamp at second granularity, as embedded in artifact names.
fn timestamp() -> String {
    Local::now().format("%Y%m%d_%H%M%S").to_string()
}

pub fn report_pdf_name() -> String {
    format!("research_report_{}.pdf", timestamp())
}

pub fn chart_png_name(theme: &str) -> String {
    format!("{}_volume_evolution_{}.png", theme_slug(theme), timestamp())
}

pub fn document_json_name(document_id: &str, headline: &str) -> String {
    format!("{}_{}.json", document_id, sanitize_filename(headline))
}
