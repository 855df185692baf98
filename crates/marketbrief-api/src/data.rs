use marketbrief_types::{DocumentResponse, Error, Result, VolumeReport};
use serde_json::{Value, json};

/// Default base of the market data API.
pub const DEFAULT_DATA_BASE_URL: &str = "https://api.bigdata.com";

/// Client for the market data API (documents, theme volume).
pub struct DataClient {
    api_key: String,
    base_url: String,
    client: reqwest::blocking::Client,
}

impl DataClient {
    pub fn new(api_key: String, base_url: String) -> Self {
        Self {
            api_key,
            base_url: base_url.trim_end_matches('/').to_string(),
            client: reqwest::blocking::Client::new(),
        }
    }

    /// Download a full document.
    ///
    /// Small documents come back inline; large ones come back as a
    /// pre-signed URL which is fetched with a second, unauthenticated
    /// GET.
    pub fn fetch_document(&self, document_id: &str) -> Result<Value> {
        let url = format!("{}/documents/{}", self.base_url, document_id);
        let body = self.get_json(&url, true)?;

        let response: DocumentResponse =
            serde_json::from_value(body).map_err(|e| Error::Upstream {
                status: None,
                message: format!("unexpected document response shape: {}", e),
            })?;

        match response {
            DocumentResponse::Direct(document) => Ok(document),
            DocumentResponse::Presigned(redirect) => self.get_json(&redirect.url, false),
        }
    }

    /// Daily volume series for a theme over a closed date range.
    /// `start`/`end` are RFC3339-style timestamps.
    pub fn fetch_volume(&self, theme: &str, start: &str, end: &str) -> Result<VolumeReport> {
        let url = format!("{}/v1/search/volume", self.base_url);

        let payload = json!({
            "query": {
                "text": theme,
                "filters": {
                    "timestamp": { "start": start, "end": end }
                }
            }
        });

        let response = self
            .client
            .post(&url)
            .header("x-api-key", &self.api_key)
            .json(&payload)
            .send()
            .map_err(|e| Error::Upstream {
                status: None,
                message: format!("request to {} failed: {}", url, e),
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().unwrap_or_default();
            return Err(Error::Upstream {
                status: Some(status.as_u16()),
                message: body.trim().to_string(),
            });
        }

        response.json().map_err(|e| Error::Upstream {
            status: Some(status.as_u16()),
            message: format!("unexpected volume response shape: {}", e),
        })
    }

    fn get_json(&self, url: &str, with_key: bool) -> Result<Value> {
        let mut request = self.client.get(url);
        if with_key {
            request = request.header("x-api-key", &self.api_key);
        }

        let response = request.send().map_err(|e| Error::Upstream {
            status: None,
            message: format!("request to {} failed: {}", url, e),
        })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().unwrap_or_default();
            return Err(Error::Upstream {
                status: Some(status.as_u16()),
                message: body.trim().to_string(),
            });
        }

        response.json().map_err(|e| Error::Upstream {
            status: Some(status.as_u16()),
            message: format!("response was not valid JSON: {}", e),
        })
    }
}
