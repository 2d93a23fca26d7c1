//! Local-then-remote corpus loader.

use std::fmt;
use std::path::{Path, PathBuf};
use std::time::Duration;

use reqwest::header::{CACHE_CONTROL, PRAGMA};
use serde_json::Value;

/// Where to look for the corpus and how hard to try.
#[derive(Debug, Clone)]
pub struct SourceConfig {
    /// Local cache file, preferred when present and parseable
    pub local: Option<PathBuf>,

    /// Remote mirror URLs, tried in order
    pub remote: Vec<String>,

    /// Per-request timeout
    pub timeout: Duration,

    /// Base delay after a failed request; the n-th retry of a mirror waits n times this
    pub retry_delay: Duration,

    /// Requests per mirror before moving on
    pub attempts: u32,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            local: None,
            remote: Vec::new(),
            timeout: Duration::from_secs(20),
            retry_delay: Duration::from_millis(500),
            attempts: 1,
        }
    }
}

/// Where a loaded corpus came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Origin {
    Local(PathBuf),
    Remote(String),
}

impl fmt::Display for Origin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Local(path) => write!(f, "{}", path.display()),
            Self::Remote(url) => f.write_str(url),
        }
    }
}

/// A parsed corpus document.
#[derive(Debug)]
pub struct Loaded {
    pub origin: Origin,
    pub value: Value,
}

/// Errors that can occur while loading the corpus.
#[derive(Debug, thiserror::Error)]
pub enum SourceError {
    #[error("All corpus sources failed after {attempts} attempts: {last}")]
    Unavailable { attempts: usize, last: String },

    #[error("Failed to create HTTP client: {0}")]
    Client(String),
}

/// A single failed request.
#[derive(Debug, thiserror::Error)]
enum FetchError {
    #[error("fetch {url} timed out after {ms}ms")]
    Timeout { url: String, ms: u128 },

    #[error("HTTP {status} @ {url}")]
    Status {
        url: String,
        status: reqwest::StatusCode,
    },

    #[error("fetch {url} failed: {source}")]
    Request {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("invalid JSON from {url}: {source}")]
    Json {
        url: String,
        #[source]
        source: serde_json::Error,
    },
}

/// Loads the corpus from the first source that answers.
pub struct SourceLoader {
    config: SourceConfig,
    client: reqwest::Client,
}

impl SourceLoader {
    /// Create a loader for `config`.
    pub fn new(config: SourceConfig) -> Result<Self, SourceError> {
        let client = reqwest::Client::builder()
            .build()
            .map_err(|e| SourceError::Client(e.to_string()))?;

        Ok(Self::with_client(config, client))
    }

    /// Create a loader that reuses an existing HTTP client.
    pub fn with_client(config: SourceConfig, client: reqwest::Client) -> Self {
        Self { config, client }
    }

    /// Load the corpus.
    ///
    /// The local file wins if it reads and parses. Otherwise each mirror is
    /// requested up to `attempts` times, sleeping between failures; the first
    /// success is returned and later mirrors are never contacted.
    pub async fn load(&self) -> Result<Loaded, SourceError> {
        let mut last: Option<String> = None;

        if let Some(path) = &self.config.local {
            match read_local(path).await {
                Ok(value) => {
                    tracing::info!("Loaded corpus from {}", path.display());
                    return Ok(Loaded {
                        origin: Origin::Local(path.clone()),
                        value,
                    });
                }
                Err(message) => {
                    tracing::info!("Local corpus unavailable ({}), trying mirrors", message);
                    last = Some(message);
                }
            }
        }

        let mut attempts = 0;
        for url in &self.config.remote {
            for attempt in 1..=self.config.attempts.max(1) {
                attempts += 1;
                match self.fetch(url).await {
                    Ok(value) => {
                        tracing::info!("Loaded corpus from {}", url);
                        return Ok(Loaded {
                            origin: Origin::Remote(url.clone()),
                            value,
                        });
                    }
                    Err(e) => {
                        tracing::warn!("Fetch failed: {}", e);
                        last = Some(e.to_string());
                        tokio::time::sleep(self.config.retry_delay * attempt).await;
                    }
                }
            }
        }

        Err(SourceError::Unavailable {
            attempts,
            last: last.unwrap_or_else(|| "no corpus sources configured".to_string()),
        })
    }

    /// GET one mirror, bypassing caches, bounded by the configured timeout.
    async fn fetch(&self, url: &str) -> Result<Value, FetchError> {
        let request = async {
            let response = self
                .client
                .get(url)
                .header(CACHE_CONTROL, "no-cache")
                .header(PRAGMA, "no-cache")
                .send()
                .await
                .map_err(|source| FetchError::Request {
                    url: url.to_string(),
                    source,
                })?;

            let status = response.status();
            if !status.is_success() {
                return Err(FetchError::Status {
                    url: url.to_string(),
                    status,
                });
            }

            response.text().await.map_err(|source| FetchError::Request {
                url: url.to_string(),
                source,
            })
        };

        let body = tokio::time::timeout(self.config.timeout, request)
            .await
            .map_err(|_| FetchError::Timeout {
                url: url.to_string(),
                ms: self.config.timeout.as_millis(),
            })??;

        serde_json::from_str(&body).map_err(|source| FetchError::Json {
            url: url.to_string(),
            source,
        })
    }
}

async fn read_local(path: &Path) -> Result<Value, String> {
    let raw = tokio::fs::read_to_string(path)
        .await
        .map_err(|e| format!("{}: {}", path.display(), e))?;

    serde_json::from_str(&raw).map_err(|e| format!("{}: {}", path.display(), e))
}
