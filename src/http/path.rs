//! File path resolution.
//!
//! A request names its file either through `path` query parameters
//! (`/api/data?path=en&path=version.json`) or through the URL itself
//! (`/api/data/en/version.json`). Query parameters win when present.

use crate::error::ProxyError;

/// Route prefix under which files are served.
pub const DATA_ROUTE_PREFIX: &str = "/api/data";

/// Name of the query parameter carrying path segments.
pub const PATH_QUERY_PARAM: &str = "path";

/// Validated, non-empty sequence of path segments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilePath(Vec<String>);

impl FilePath {
    /// Validate segments.
    ///
    /// Rejects an empty sequence, empty segments, `.`/`..` and control
    /// characters.
    pub fn new(segments: Vec<String>) -> Result<Self, ProxyError> {
        if segments.is_empty() {
            return Err(ProxyError::InvalidPath("No file path provided".to_string()));
        }
        for segment in &segments {
            if segment.is_empty() {
                return Err(ProxyError::InvalidPath(
                    "File path contains an empty segment".to_string(),
                ));
            }
            if segment == "." || segment == ".." {
                return Err(ProxyError::InvalidPath(format!(
                    "Path segment '{}' is not allowed",
                    segment
                )));
            }
            if segment.chars().any(char::is_control) {
                return Err(ProxyError::InvalidPath(
                    "File path contains non-printable characters".to_string(),
                ));
            }
        }
        Ok(Self(segments))
    }

    pub fn segments(&self) -> &[String] {
        &self.0
    }

    /// Segments joined by `/`.
    pub fn joined(&self) -> String {
        self.0.join("/")
    }
}

/// Resolve the requested file path.
///
/// `structured` holds every `path` query value in request order; each value
/// may itself contain `/`. When it yields nothing, `raw_path` (the request
/// URL path) is used with [`DATA_ROUTE_PREFIX`] stripped and each segment
/// percent-decoded. Empty components are discarded in both sources.
pub fn resolve_path(structured: &[String], raw_path: &str) -> Result<FilePath, ProxyError> {
    let from_query = split_segments(structured.iter().map(String::as_str));
    if !from_query.is_empty() {
        return FilePath::new(from_query);
    }

    let rest = strip_route_prefix(raw_path).ok_or_else(|| {
        ProxyError::InvalidPath(format!("Path must start with {}", DATA_ROUTE_PREFIX))
    })?;

    let mut segments = Vec::new();
    for component in rest.split('/').filter(|c| !c.is_empty()) {
        let decoded = urlencoding::decode(component).map_err(|_| {
            ProxyError::InvalidPath("File path is not valid UTF-8".to_string())
        })?;
        segments.push(decoded.into_owned());
    }
    FilePath::new(segments)
}

fn split_segments<'a>(values: impl Iterator<Item = &'a str>) -> Vec<String> {
    values
        .flat_map(|value| value.split('/'))
        .filter(|segment| !segment.is_empty())
        .map(str::to_string)
        .collect()
}

fn strip_route_prefix(raw_path: &str) -> Option<&str> {
    raw_path
        .strip_prefix(DATA_ROUTE_PREFIX)
        .filter(|rest| rest.is_empty() || rest.starts_with('/'))
}
