//! Upstream request target.
//!
//! Built per request from the configured repository coordinates and the
//! resolved file path. The repository is private, so the target is the
//! GitHub contents API rather than the anonymous raw-file host:
//!
//! ```text
//! {api_base}/repos/{owner}/{repository}/contents/{segment}/...?ref={branch}
//! ```

use std::fmt;
use url::Url;

use crate::config::UpstreamConfig;
use crate::error::ProxyError;
use crate::http::path::FilePath;

/// Fully-resolved upstream URL for one file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpstreamTarget {
    url: Url,
    relative_path: String,
}

impl UpstreamTarget {
    /// Combine repository coordinates with a file path.
    ///
    /// Each path segment is percent-encoded individually, so a segment can
    /// never introduce extra path levels or a query string.
    pub fn new(config: &UpstreamConfig, path: &FilePath) -> Result<Self, ProxyError> {
        let mut url = Url::parse(&config.api_base).map_err(|e| {
            ProxyError::UnexpectedFailure(format!("Invalid upstream base URL: {}", e))
        })?;

        url.path_segments_mut()
            .map_err(|_| {
                ProxyError::UnexpectedFailure("Upstream base URL cannot carry a path".to_string())
            })?
            .pop_if_empty()
            .extend([
                "repos",
                config.owner.as_str(),
                config.repository.as_str(),
                "contents",
            ])
            .extend(path.segments());

        url.query_pairs_mut().append_pair("ref", &config.branch);

        Ok(Self {
            url,
            relative_path: path.joined(),
        })
    }

    /// URL to request.
    pub fn url(&self) -> &Url {
        &self.url
    }

    /// File path inside the repository, segments joined by `/`.
    pub fn relative_path(&self) -> &str {
        &self.relative_path
    }
}

impl fmt::Display for UpstreamTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.url)
    }
}
