//! Source detection and acquisition.
//!
//! Every source is reduced to a [`FileNode`] tree: directories are walked in
//! place, zip archives are extracted and repositories cloned into a
//! [`staging::StagingDir`] that is removed once the tree is built, and URLs
//! become a single in-memory file.

pub mod archive;
pub mod git;
pub mod staging;
pub mod web;

use std::fmt;
use std::path::Path;

use tracing::info;

use crate::errors::IngestError;
use crate::tree::FileNode;
use crate::walker::{process_directory, ProcessOptions};

pub use archive::load_zip;
pub use git::load_git;
pub use web::load_url;

/// The kind of input being ingested.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceType {
    Zip,
    Directory,
    Git,
    Url,
}

impl SourceType {
    pub fn as_str(&self) -> &'static str {
        match self {
            SourceType::Zip => "zip",
            SourceType::Directory => "directory",
            SourceType::Git => "git",
            SourceType::Url => "url",
        }
    }
}

impl fmt::Display for SourceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A source reduced to its tree.
#[derive(Debug, Clone)]
pub struct LoadedSource {
    pub source_type: SourceType,
    pub root: FileNode,
}

fn is_http(input: &str) -> bool {
    input.starts_with("http://") || input.starts_with("https://")
}

/// Classify an input string.
///
/// Checked in order: zip path, repository URL, other web URL, existing
/// directory.
///
/// # Examples
///
/// ```
/// use zipingest::source::{detect_source_type, SourceType};
///
/// assert_eq!(detect_source_type("bundle.zip").unwrap(), SourceType::Zip);
/// assert_eq!(detect_source_type("https://github.com/owner/repo").unwrap(), SourceType::Git);
/// assert_eq!(detect_source_type("https://example.com/index.html").unwrap(), SourceType::Url);
/// assert_eq!(detect_source_type(".").unwrap(), SourceType::Directory);
/// assert!(detect_source_type("/definitely/not/here").is_err());
/// ```
pub fn detect_source_type(input: &str) -> Result<SourceType, IngestError> {
    if !is_http(input) && archive::is_zip_path(input) {
        return Ok(SourceType::Zip);
    }
    if git::is_git_url(input) {
        return Ok(SourceType::Git);
    }
    if web::is_web_url(input) {
        return Ok(SourceType::Url);
    }
    if Path::new(input).is_dir() {
        return Ok(SourceType::Directory);
    }
    Err(IngestError::UnknownSource(input.to_string()))
}

/// Walk a local directory. The root is named after the resolved directory.
pub fn load_directory(path: &Path, options: &ProcessOptions) -> Result<FileNode, IngestError> {
    let resolved = path
        .canonicalize()
        .map_err(|_| IngestError::PathNotFound(path.to_path_buf()))?;
    Ok(process_directory(&resolved, options)?)
}

/// Detect the source type of `input` and load it.
pub fn load(input: &str, options: &ProcessOptions) -> Result<LoadedSource, IngestError> {
    let source_type = detect_source_type(input)?;
    info!(source = input, %source_type, "loading source");

    let root = match source_type {
        SourceType::Zip => load_zip(Path::new(input), options)?,
        SourceType::Directory => load_directory(Path::new(input), options)?,
        SourceType::Git => load_git(input, options)?,
        SourceType::Url => load_url(input)?,
    };

    Ok(LoadedSource { source_type, root })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_source_type_display() {
        assert_eq!(SourceType::Zip.to_string(), "zip");
        assert_eq!(SourceType::Directory.to_string(), "directory");
        assert_eq!(SourceType::Git.to_string(), "git");
        assert_eq!(SourceType::Url.to_string(), "url");
    }

    #[test]
    fn test_detect_order() {
        assert_eq!(detect_source_type("a/b/c.ZIP").unwrap(), SourceType::Zip);
        // A remote zip is a plain download, not an archive source.
        assert_eq!(
            detect_source_type("https://example.com/release.zip").unwrap(),
            SourceType::Url
        );
        assert_eq!(detect_source_type("git@github.com:o/r.git").unwrap(), SourceType::Git);
        assert_eq!(
            detect_source_type("https://example.com/o/r.git").unwrap(),
            SourceType::Git
        );
    }

    #[test]
    fn test_detect_directory() {
        let dir = TempDir::new().unwrap();
        let input = dir.path().to_string_lossy().into_owned();
        assert_eq!(detect_source_type(&input).unwrap(), SourceType::Directory);
    }

    #[test]
    fn test_detect_unknown() {
        let dir = TempDir::new().unwrap();
        let file = dir.path().join("notes.txt");
        fs::write(&file, "x").unwrap();

        let result = detect_source_type(&file.to_string_lossy());
        assert!(matches!(result, Err(IngestError::UnknownSource(_))));
    }

    #[test]
    fn test_load_directory_names_root() {
        let dir = TempDir::new().unwrap();
        let project = dir.path().join("my-project");
        fs::create_dir(&project).unwrap();
        fs::write(project.join("main.rs"), "fn main() {}").unwrap();

        let loaded = load(&project.to_string_lossy(), &ProcessOptions::default()).unwrap();
        assert_eq!(loaded.source_type, SourceType::Directory);
        assert_eq!(loaded.root.name, "my-project");
        assert_eq!(loaded.root.file_count(), 1);
    }

    #[test]
    fn test_load_missing_directory() {
        let result = load_directory(Path::new("/nonexistent/dir"), &ProcessOptions::default());
        assert!(matches!(result, Err(IngestError::PathNotFound(_))));
    }
}
