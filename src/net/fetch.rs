use std::time::Duration;

use thiserror::Error;
use url::Url;

/// A fetched game page.
#[derive(Debug, Clone)]
pub struct FetchResult {
    pub html: String,
    /// Final URL after redirects.
    pub url: String,
    pub status: u16,
}

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("invalid URL {url:?}: {source}")]
    InvalidUrl {
        url: String,
        source: url::ParseError,
    },
    #[error("client error: {0}")]
    Client(reqwest::Error),
    #[error("request failed: {0}")]
    Request(reqwest::Error),
    #[error("HTTP {status} from {url}")]
    Status { url: String, status: u16 },
    #[error("failed to read body: {0}")]
    Body(reqwest::Error),
}

/// Blocking fetcher that replays the player's session cookie, so pages
/// come back as the logged-in game would show them.
pub struct PageFetcher {
    client: reqwest::blocking::Client,
    cookie: Option<String>,
}

impl PageFetcher {
    pub fn new(cookie: Option<String>) -> Result<Self, FetchError> {
        let client = reqwest::blocking::Client::builder()
            .user_agent(concat!("farmrpg-tracker/", env!("CARGO_PKG_VERSION")))
            .timeout(Duration::from_secs(15))
            .redirect(reqwest::redirect::Policy::limited(10))
            .build()
            .map_err(FetchError::Client)?;
        Ok(Self { client, cookie })
    }

    pub fn fetch(&self, url_str: &str) -> Result<FetchResult, FetchError> {
        let parsed = Url::parse(url_str).map_err(|source| FetchError::InvalidUrl {
            url: url_str.to_string(),
            source,
        })?;

        let mut request = self
            .client
            .get(parsed.as_str())
            .header("Accept", "text/html,*/*;q=0.8");
        if let Some(cookie) = &self.cookie {
            request = request.header("Cookie", cookie);
        }
        let response = request.send().map_err(FetchError::Request)?;

        let status = response.status().as_u16();
        let final_url = response.url().to_string();
        if !response.status().is_success() {
            return Err(FetchError::Status {
                url: final_url,
                status,
            });
        }
        let html = response.text().map_err(FetchError::Body)?;
        log::debug!("Fetched {} ({} bytes)", final_url, html.len());

        Ok(FetchResult {
            html,
            url: final_url,
            status,
        })
    }
}
