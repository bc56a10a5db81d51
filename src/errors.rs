//! Error types for zipingest.

use std::path::PathBuf;

use crate::clipboard::ClipboardError;
use crate::filter::FilterError;
use crate::walker::WalkError;

/// Top-level error type for ingest operations.
#[derive(Debug, thiserror::Error)]
pub enum IngestError {
    #[error("unknown source type: {0}")]
    UnknownSource(String),

    #[error("path not found: {0}")]
    PathNotFound(PathBuf),

    #[error("walk error: {0}")]
    Walk(#[from] WalkError),

    #[error("filter error: {0}")]
    Filter(#[from] FilterError),

    #[error("failed to read archive {path}: {source}")]
    Archive {
        path: PathBuf,
        #[source]
        source: zip::result::ZipError,
    },

    #[error("failed to clone {url}: {source}")]
    Clone {
        url: String,
        #[source]
        source: git2::Error,
    },

    #[error("failed to fetch {url}: {source}")]
    Fetch {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("clipboard error: {0}")]
    Clipboard(#[from] ClipboardError),

    #[error("selection failed: {0}")]
    Selection(#[from] dialoguer::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Map an error to its exit code.
pub fn exit_code(error: &IngestError) -> i32 {
    match error {
        IngestError::UnknownSource(_) => 2,
        IngestError::PathNotFound(_) => 3,
        IngestError::Walk(WalkError::NotFound { .. }) => 3,
        IngestError::Walk(_) => 2,
        IngestError::Filter(_) => 2,
        IngestError::Archive { .. } => 4,
        IngestError::Clone { .. } => 5,
        IngestError::Fetch { .. } => 5,
        IngestError::Clipboard(_) => 6,
        IngestError::Selection(_) => 1,
        IngestError::Io(_) => 1,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exit_codes_are_nonzero() {
        let errors = [
            IngestError::UnknownSource("x".into()),
            IngestError::PathNotFound("x".into()),
            IngestError::Walk(WalkError::NotFound { path: "x".into() }),
            IngestError::Walk(WalkError::NotADirectory { path: "x".into() }),
            IngestError::Clipboard(ClipboardError::NoClipboardFound),
            IngestError::Io(std::io::Error::other("boom")),
        ];
        for error in &errors {
            assert_ne!(exit_code(error), 0, "{error}");
        }
    }

    #[test]
    fn test_missing_paths_share_a_code() {
        let direct = IngestError::PathNotFound("x".into());
        let walked = IngestError::Walk(WalkError::NotFound { path: "x".into() });
        assert_eq!(exit_code(&direct), exit_code(&walked));
    }

    #[test]
    fn test_messages() {
        let err = IngestError::UnknownSource("foo".into());
        assert_eq!(err.to_string(), "unknown source type: foo");
    }
}
