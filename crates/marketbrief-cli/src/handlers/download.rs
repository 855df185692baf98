use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use marketbrief_api::DataClient;
use marketbrief_report::document_json_name;
use marketbrief_types::document_headline;

/// The document download flow: fetch one full document (following a
/// pre-signed redirect when the API issues one) and save it as
/// indented UTF-8 JSON named after the id and sanitized headline.
pub fn handle(document_id: &str, data_base_url: &str, output_dir: &Path) -> Result<()> {
    let api_key = marketbrief_api::bigdata_api_key()?;

    let document = DataClient::new(api_key, data_base_url.to_string())
        .fetch_document(document_id)
        .with_context(|| format!("failed to download document {}", document_id))?;

    let headline = document_headline(&document).unwrap_or("document");

    fs::create_dir_all(output_dir)
        .with_context(|| format!("failed to create {}", output_dir.display()))?;
    let path = output_dir.join(document_json_name(document_id, headline));

    let mut rendered = serde_json::to_string_pretty(&document)?;
    rendered.push('\n');
    fs::write(&path, rendered).with_context(|| format!("failed to write {}", path.display()))?;

    println!("Document downloaded successfully!");
    println!("Document saved to: {}", path.display());
    Ok(())
}
