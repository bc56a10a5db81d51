//! Single-page HTTP sources.

use std::time::Duration;

use reqwest::blocking::Client;
use tracing::debug;
use url::Url;

use super::git::is_git_url;
use crate::errors::IngestError;
use crate::tree::FileNode;

const FALLBACK_FILENAME: &str = "page.html";
const TIMEOUT: Duration = Duration::from_secs(30);

/// Check if `input` is an http(s) URL that is not a repository.
pub fn is_web_url(input: &str) -> bool {
    match Url::parse(input) {
        Ok(url) => matches!(url.scheme(), "http" | "https") && !is_git_url(input),
        Err(_) => false,
    }
}

/// File name for a fetched page: the last path segment if it has an
/// extension, else `page.html`.
///
/// # Examples
///
/// ```
/// use zipingest::source::web::filename_from_url;
///
/// assert_eq!(filename_from_url("https://example.com/docs/guide.md"), "guide.md");
/// assert_eq!(filename_from_url("https://example.com/docs/"), "page.html");
/// ```
pub fn filename_from_url(input: &str) -> String {
    Url::parse(input)
        .ok()
        .and_then(|url| {
            url.path_segments()
                .and_then(|mut segments| segments.next_back())
                .filter(|last| last.contains('.'))
                .map(str::to_string)
        })
        .unwrap_or_else(|| FALLBACK_FILENAME.to_string())
}

/// Fetch `url` and return its body as a single-file tree.
///
/// The node's name and path are both the derived file name. Non-success
/// status codes are errors.
pub fn load_url(url: &str) -> Result<FileNode, IngestError> {
    let fetch_error = |source| IngestError::Fetch {
        url: url.to_string(),
        source,
    };

    let client = Client::builder()
        .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
        .timeout(TIMEOUT)
        .build()
        .map_err(fetch_error)?;

    debug!(url, "fetching");
    let body = client
        .get(url)
        .send()
        .and_then(|response| response.error_for_status())
        .and_then(|response| response.text())
        .map_err(fetch_error)?;

    let name = filename_from_url(url);
    let size = body.len() as u64;
    Ok(FileNode::text_file(name.clone(), name, size, body))
}
