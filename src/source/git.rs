//! Git repository sources.

use std::path::Path;

use git2::build::RepoBuilder;
use git2::FetchOptions;
use tracing::debug;
use url::Url;

use super::staging::{StagingDir, GIT_PREFIX};
use crate::errors::IngestError;
use crate::tree::FileNode;
use crate::walker::{process_directory_with_filter, ProcessOptions};

/// Hosts where `https://<host>/<owner>/<repo>` is a repository.
const KNOWN_HOSTS: &[&str] = &["github.com", "gitlab.com", "bitbucket.org"];

/// Check if `input` looks like a cloneable repository URL.
///
/// # Examples
///
/// ```
/// use zipingest::source::git::is_git_url;
///
/// assert!(is_git_url("https://github.com/rust-lang/rust"));
/// assert!(is_git_url("git@github.com:rust-lang/rust.git"));
/// assert!(is_git_url("https://example.com/team/project.git"));
/// assert!(!is_git_url("https://github.com/rust-lang/rust/blob/master/README.md"));
/// assert!(!is_git_url("https://example.com/docs/index.html"));
/// ```
pub fn is_git_url(input: &str) -> bool {
    if input.starts_with("git@") || input.starts_with("git://") || input.starts_with("ssh://") {
        return true;
    }

    let Ok(url) = Url::parse(input) else {
        return false;
    };
    if !matches!(url.scheme(), "http" | "https") {
        return false;
    }

    let path = url.path().trim_end_matches('/');
    if path.ends_with(".git") {
        return true;
    }

    let host = url.host_str().unwrap_or_default();
    let host = host.strip_prefix("www.").unwrap_or(host);
    KNOWN_HOSTS.contains(&host)
        && path.trim_start_matches('/').split('/').filter(|s| !s.is_empty()).count() == 2
}

/// Repository name from a clone URL: the last segment without `.git`.
///
/// # Examples
///
/// ```
/// use zipingest::source::git::repo_name;
///
/// assert_eq!(repo_name("https://github.com/owner/widgets.git"), "widgets");
/// assert_eq!(repo_name("git@github.com:owner/widgets.git"), "widgets");
/// assert_eq!(repo_name("https://github.com/owner/widgets?tab=readme"), "widgets");
/// ```
pub fn repo_name(url: &str) -> String {
    let without_query = url.split(['?', '#']).next().unwrap_or(url);
    let trimmed = without_query.trim_end_matches('/');
    let last = trimmed.rsplit(['/', ':']).next().unwrap_or(trimmed);
    let name = last.strip_suffix(".git").unwrap_or(last);

    if name.is_empty() {
        "repository".to_string()
    } else {
        name.to_string()
    }
}

/// Shallow-clone `url` into `dest`, fetching only the latest commit.
pub fn clone_shallow(url: &str, dest: &Path) -> Result<(), IngestError> {
    let mut fetch_options = FetchOptions::new();
    fetch_options.depth(1);

    debug!(url, dest = %dest.display(), "cloning repository");
    RepoBuilder::new()
        .fetch_options(fetch_options)
        .clone(url, dest)
        .map(|_| ())
        .map_err(|source| IngestError::Clone {
            url: url.to_string(),
            source,
        })
}

/// Clone a repository into a staging directory and process it.
///
/// `.git/**` is always excluded on top of the caller's patterns. The root
/// is named after the repository.
pub fn load_git(url: &str, options: &ProcessOptions) -> Result<FileNode, IngestError> {
    let filter = options.filter()?.exclude(".git/**")?;

    let staging = StagingDir::create(GIT_PREFIX)?;
    clone_shallow(url, staging.path())?;

    let mut root = process_directory_with_filter(staging.path(), &filter, options.max_file_size)?;
    root.name = repo_name(url);
    Ok(root)
}
