use crate::error::Error;
use std::time::Duration;
use tracing::debug;

pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Retrieves the raw HTML of one Moss result page.
pub trait PageFetcher {
    fn fetch(&self, url: &str) -> Result<String, Error>;
}

pub struct HttpFetcher {
    client: reqwest::blocking::Client,
}

impl HttpFetcher {
    pub fn new(timeout: Duration) -> Result<Self, Error> {
        let client = reqwest::blocking::Client::builder()
            .user_agent(concat!("mossum/", env!("CARGO_PKG_VERSION")))
            .timeout(timeout)
            .build()
            .map_err(|e| Error::Fetch {
                url: String::new(),
                reason: format!("build http client: {}", e),
            })?;
        Ok(Self { client })
    }
}

impl PageFetcher for HttpFetcher {
    fn fetch(&self, url: &str) -> Result<String, Error> {
        let fetch_error = |reason: String| Error::Fetch {
            url: url.to_string(),
            reason,
        };

        let resp = self
            .client
            .get(url)
            .send()
            .map_err(|e| fetch_error(e.to_string()))?;
        let resp = resp
            .error_for_status()
            .map_err(|e| fetch_error(e.to_string()))?;
        let bytes = resp.bytes().map_err(|e| fetch_error(e.to_string()))?;
        debug!("Fetched {} bytes from {}", bytes.len(), url);

        decode_page(url, bytes.to_vec())
    }
}

/// Result pages must be valid UTF-8; a corrupt page fails the fetch.
pub fn decode_page(url: &str, bytes: Vec<u8>) -> Result<String, Error> {
    String::from_utf8(bytes).map_err(|e| Error::Fetch {
        url: url.to_string(),
        reason: format!("page is not valid UTF-8: {}", e),
    })
}
