use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use marketbrief_api::{McpServer, ResearchSession};
use marketbrief_report::{render_report_pdf, report_pdf_name};
use marketbrief_types::CallSummary;

use crate::args::DEFAULT_PROMPT;
use crate::presentation::DisplayOptions;
use crate::presentation::views::{SummaryView, TranscriptView};

pub struct Args {
    pub prompt: Option<String>,
    pub model: String,
    pub server_label: String,
    pub server_url: String,
    pub allowed_tools: Vec<String>,
    pub ai_base_url: String,
}

/// The deep-research flow: one blocking session against the AI
/// endpoint, then transcript, summary, final text, and the PDF brief.
pub fn handle(args: Args, output_dir: &Path, options: &DisplayOptions) -> Result<()> {
    let ai_key = marketbrief_api::openai_api_key()?;
    let data_key = marketbrief_api::bigdata_api_key()?;

    let prompt = args.prompt.unwrap_or_else(|| DEFAULT_PROMPT.to_string());
    let server = McpServer {
        server_label: args.server_label,
        server_url: args.server_url,
        api_key: data_key,
        allowed_tools: args.allowed_tools,
    };

    println!(
        "Launching deep research with model {} via server '{}'",
        args.model, server.server_label
    );

    let session = ResearchSession::new(ai_key, args.ai_base_url).run(&args.model, &prompt, &server)?;

    print!(
        "{}",
        TranscriptView {
            session: &session,
            options,
        }
    );

    let summary = CallSummary::from_events(&session.events);
    print!(
        "\n{}",
        SummaryView {
            summary: &summary,
            elapsed: session.elapsed,
            options,
        }
    );

    let rule = "=".repeat(80);
    println!("\n{}\nFINAL OUTPUT\n{}", rule, rule);
    println!("{}", session.final_text);

    fs::create_dir_all(output_dir)
        .with_context(|| format!("failed to create {}", output_dir.display()))?;
    let path = output_dir.join(report_pdf_name());
    render_report_pdf(&session.final_text, &path)?;

    println!("\nPDF generated: {}", path.display());
    Ok(())
}
