//! Blocking clients for the two upstream services the demo flows talk
//! to: the AI responses endpoint (driven through a remote MCP tool
//! server) and the market data API (documents, theme volume).
//!
//! Every call is synchronous and single-shot. A failed request aborts
//! the flow; nothing here retries or recovers.

pub mod config;
pub mod data;
pub mod research;

pub use config::{BIGDATA_API_KEY, OPENAI_API_KEY, bigdata_api_key, openai_api_key};
pub use data::{DEFAULT_DATA_BASE_URL, DataClient};
pub use research::{DEFAULT_AI_BASE_URL, McpServer, ResearchSession};
