use dotenv::dotenv;
use marketbrief_types::{Error, Result};

/// Environment key for the AI provider credential.
pub const OPENAI_API_KEY: &str = "OPENAI_API_KEY";

/// Environment key for the market data provider credential.
pub const BIGDATA_API_KEY: &str = "BIGDATA_API_KEY";

/// Read a required credential from the environment, loading a local
/// `.env` file first when one exists. The error names the exact key so
/// a missing AI key is never reported as a missing data key.
pub fn required_key(name: &str) -> Result<String> {
    dotenv().ok();
    std::env::var(name)
        .ok()
        .filter(|value| !value.trim().is_empty())
        .ok_or_else(|| Error::Configuration(name.to_string()))
}

pub fn openai_api_key() -> Result<String> {
    required_key(OPENAI_API_KEY)
}

pub fn bigdata_api_key() -> Result<String> {
    required_key(BIGDATA_API_KEY)
}
