use std::future::Future;

/// Transport seam for raw layer documents.
///
/// Implementations resolve a URL to the document body; everything after the
/// fetch (decode, attach) is synchronous and owned by the loader.
pub trait FetchDocument {
    fn fetch(&self, url: &str) -> impl Future<Output = Result<String, FetchError>>;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchError {
    Status { url: String, status: u16 },
    Transport { url: String, reason: String },
}

impl std::fmt::Display for FetchError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FetchError::Status { url, status } => {
                write!(f, "HTTP {status} fetching {url}")
            }
            FetchError::Transport { url, reason } => {
                write!(f, "fetch failed for {url}: {reason}")
            }
        }
    }
}

impl std::error::Error for FetchError {}

/// Production fetcher over a shared `reqwest` client.
#[derive(Debug, Default, Clone)]
pub struct HttpFetcher {
    client: reqwest::Client,
}

impl HttpFetcher {
    pub fn new() -> Self {
        Self::default()
    }
}

impl FetchDocument for HttpFetcher {
    async fn fetch(&self, url: &str) -> Result<String, FetchError> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| FetchError::Transport {
                url: url.to_string(),
                reason: e.to_string(),
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        response.text().await.map_err(|e| FetchError::Transport {
            url: url.to_string(),
            reason: e.to_string(),
        })
    }
}
