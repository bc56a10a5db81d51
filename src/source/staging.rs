//! Scoped temporary directories for extracted archives and clones.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};

use chrono::Utc;
use tracing::{debug, warn};

/// Prefix for zip extraction directories.
pub const ZIP_PREFIX: &str = "zipingest-";

/// Prefix for repository clone directories.
pub const GIT_PREFIX: &str = "zipingest-git-";

static SEQUENCE: AtomicUsize = AtomicUsize::new(0);

/// A directory under the platform temp dir, removed when dropped.
///
/// Removal failures are logged and otherwise ignored.
#[derive(Debug)]
pub struct StagingDir {
    path: PathBuf,
}

impl StagingDir {
    /// Create `<prefix><unix-millis>-<pid>-<seq>` under the temp dir.
    pub fn create(prefix: &str) -> io::Result<Self> {
        let name = format!(
            "{}{}-{}-{}",
            prefix,
            Utc::now().timestamp_millis(),
            std::process::id(),
            SEQUENCE.fetch_add(1, Ordering::Relaxed)
        );
        let path = std::env::temp_dir().join(name);
        fs::create_dir_all(&path)?;
        debug!(path = %path.display(), "created staging directory");
        Ok(Self { path })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Drop for StagingDir {
    fn drop(&mut self) {
        match fs::remove_dir_all(&self.path) {
            Ok(()) => debug!(path = %self.path.display(), "removed staging directory"),
            Err(e) if e.kind() == io::ErrorKind::NotFound => {}
            Err(e) => warn!(
                path = %self.path.display(),
                error = %e,
                "failed to clean up staging directory"
            ),
        }
    }
}
