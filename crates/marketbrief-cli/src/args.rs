use clap::{Parser, Subcommand};
use std::path::PathBuf;

pub const DEFAULT_MODEL: &str = "o3-deep-research-2025-06-26";
pub const DEFAULT_SERVER_LABEL: &str = "bigdata";
pub const DEFAULT_SERVER_URL: &str = "https://mcp.bigdata.com/deepresearch/";

pub const DEFAULT_PROMPT: &str = "You are a senior equity analyst preparing for an upcoming \
earnings call. Please provide a comprehensive earnings preview and analysis for Micron.\n\n\
Cover:\n\
- Recent developments and initiatives\n\
- Industry trends and sector dynamics\n\
- Bull/bear cases\n\
- Key metrics to watch\n\n\
Deliverable Format: Present findings as a concise, actionable brief suitable for investment \
professionals. Focus on business fundamentals, avoid speculation, and highlight areas of \
uncertainty or debate. Be decisive in your assessments while acknowledging alternative \
viewpoints. Add inline source attribution and use the remote research tools.";

#[derive(Parser)]
#[command(name = "marketbrief")]
#[command(about = "Demo flows for AI deep research and market data APIs", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Directory where output artifacts are written
    #[arg(long, default_value = "output", global = true)]
    pub output_dir: PathBuf,

    /// Disable colored console output
    #[arg(long, global = true)]
    pub no_color: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    #[command(about = "Run a deep-research session via a remote MCP tool server and render a PDF brief")]
    Research {
        /// Research prompt; defaults to the built-in earnings preview brief
        #[arg(long)]
        prompt: Option<String>,

        #[arg(long, default_value = DEFAULT_MODEL)]
        model: String,

        #[arg(long, default_value = DEFAULT_SERVER_LABEL)]
        server_label: String,

        #[arg(long, default_value = DEFAULT_SERVER_URL)]
        server_url: String,

        /// Restrict the session to these tool names (repeatable)
        #[arg(long = "allowed-tool")]
        allowed_tools: Vec<String>,

        /// Override the AI endpoint base URL
        #[arg(long, default_value = marketbrief_api::DEFAULT_AI_BASE_URL, hide = true)]
        ai_base_url: String,
    },

    #[command(about = "Chart the volume evolution of a theme over a date range")]
    Volume {
        /// Start date: YYYY-MM-DD or YYYY-MM-DDTHH:MM:SSZ
        #[arg(long, short = 's')]
        start_date: String,

        /// End date: YYYY-MM-DD or YYYY-MM-DDTHH:MM:SSZ
        #[arg(long, short = 'e')]
        end_date: String,

        #[arg(long, short = 't', default_value = "Tariffs impact")]
        theme: String,

        /// Override the data API base URL
        #[arg(long, default_value = marketbrief_api::DEFAULT_DATA_BASE_URL, hide = true)]
        data_base_url: String,
    },

    #[command(about = "Download an entire document and save it as indented JSON")]
    Download {
        /// Document ID, e.g. 0105A1520E8594CB6B0B8505CB0090AA
        document_id: String,

        /// Override the data API base URL
        #[arg(long, default_value = marketbrief_api::DEFAULT_DATA_BASE_URL, hide = true)]
        data_base_url: String,
    },
}
