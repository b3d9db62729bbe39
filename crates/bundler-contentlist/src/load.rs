use std::path::{Path, PathBuf};

use bundler_vidispine::{HttpClient, HttpRequest, Method, RetryPolicy, execute};
use serde::Deserialize;
use tracing::info;
use url::Url;

use crate::error::{Error, Result};

/// One file to put into the bundle.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContentItem {
    pub file_id: String,
    pub storage_id: String,
}

/// Where a content list comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Location {
    File(PathBuf),
    Http(Url),
}

impl Location {
    /// `file://` URLs and bare paths are local; `http(s)://` URLs are remote.
    pub fn parse(location: &str) -> Result<Self> {
        let invalid = |reason: String| Error::InvalidLocation {
            location: location.to_string(),
            reason,
        };

        match Url::parse(location) {
            Ok(url) => match url.scheme() {
                "file" => url
                    .to_file_path()
                    .map(Location::File)
                    .map_err(|()| invalid("not a local file path".into())),
                "http" | "https" => Ok(Location::Http(url)),
                other => Err(invalid(format!("unsupported scheme '{other}'"))),
            },
            Err(url::ParseError::RelativeUrlWithoutBase) => {
                Ok(Location::File(PathBuf::from(location)))
            }
            Err(e) => Err(invalid(e.to_string())),
        }
    }
}

/// Decode a JSON content list.
pub fn parse(json: &[u8]) -> Result<Vec<ContentItem>> {
    Ok(serde_json::from_slice(json)?)
}

/// Read a content list from disk.
pub fn load_file(path: &Path) -> Result<Vec<ContentItem>> {
    let content = std::fs::read(path).map_err(|source| Error::Read {
        path: path.to_path_buf(),
        source,
    })?;
    parse(&content)
}

/// Fetch a content list with `GET url` and `X-Authentication-Token: token`.
///
/// Responses are classified and 502/503 retried the same way as Vidispine
/// requests.
pub fn download<C: HttpClient + ?Sized>(
    url: &Url,
    token: &str,
    client: &C,
    policy: &RetryPolicy,
) -> Result<Vec<ContentItem>> {
    let request = HttpRequest {
        method: Method::Get,
        url: url.to_string(),
        headers: vec![("X-Authentication-Token".to_string(), token.to_string())],
        body: None,
    };

    let body = execute(client, &request, policy)?;
    parse(&body)
}

/// Load a content list from a local path, `file://` URL or `http(s)://` URL.
pub fn load<C: HttpClient + ?Sized>(
    location: &str,
    token: &str,
    client: &C,
    policy: &RetryPolicy,
) -> Result<Vec<ContentItem>> {
    let items = match Location::parse(location)? {
        Location::File(path) => load_file(&path)?,
        Location::Http(url) => download(&url, token, client, policy)?,
    };
    info!(count = items.len(), location, "loaded content list");
    Ok(items)
}
