//! The [`Fetcher`] capability and its bundled implementation.

use std::path::PathBuf;
use std::time::Duration;

use tracing::debug;

/// Upper bound on archive size accepted from a remote server.
const MAX_ARCHIVE_BYTES: u64 = 4 << 30;

/// Global request timeout for remote fetches.
const FETCH_TIMEOUT: Duration = Duration::from_secs(300);

/// Archive retrieval failed.
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    /// The server answered with a non-success status.
    #[error("fetch {url}: HTTP status {code}")]
    Status { url: String, code: u16 },

    /// Transport-level failure (DNS, TLS, timeout, oversized body).
    #[error("fetch {url}: {source}")]
    Transport {
        url: String,
        #[source]
        source: ureq::Error,
    },

    /// The fetcher does not speak this URL scheme.
    #[error("unsupported url scheme: {0}")]
    UnsupportedScheme(String),

    /// Local file read failed (`file://` URLs).
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Retrieves raw archive bytes for a formula's source URL.
///
/// Verification and building are not the fetcher's concern; it either
/// returns the bytes or fails.
pub trait Fetcher {
    fn fetch(&self, url: &str) -> Result<Vec<u8>, FetchError>;
}

/// The bundled fetcher: `http`/`https` over ureq, `file` from disk.
pub struct ArchiveFetcher {
    agent: ureq::Agent,
}

impl ArchiveFetcher {
    pub fn new() -> Self {
        let config = ureq::Agent::config_builder()
            .timeout_global(Some(FETCH_TIMEOUT))
            .build();
        Self {
            agent: ureq::Agent::new_with_config(config),
        }
    }

    fn fetch_http(&self, url: &str) -> Result<Vec<u8>, FetchError> {
        debug!(url, "fetching archive");
        let mut response = self.agent.get(url).call().map_err(|e| match e {
            ureq::Error::StatusCode(code) => FetchError::Status {
                url: url.to_string(),
                code,
            },
            source => FetchError::Transport {
                url: url.to_string(),
                source,
            },
        })?;

        response
            .body_mut()
            .with_config()
            .limit(MAX_ARCHIVE_BYTES)
            .read_to_vec()
            .map_err(|source| FetchError::Transport {
                url: url.to_string(),
                source,
            })
    }
}

impl Default for ArchiveFetcher {
    fn default() -> Self {
        Self::new()
    }
}

impl Fetcher for ArchiveFetcher {
    fn fetch(&self, url: &str) -> Result<Vec<u8>, FetchError> {
        match url.split_once("://") {
            Some(("http" | "https", _)) => self.fetch_http(url),
            Some(("file", path)) => {
                debug!(path, "reading local archive");
                Ok(std::fs::read(PathBuf::from(path))?)
            }
            Some((scheme, _)) => Err(FetchError::UnsupportedScheme(scheme.to_string())),
            None => Err(FetchError::UnsupportedScheme(url.to_string())),
        }
    }
}
