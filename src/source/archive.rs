//! Zip archive sources.

use std::fs::{self, File};
use std::io;
use std::path::{Path, PathBuf};

use tracing::debug;
use zip::ZipArchive;

use super::staging::{StagingDir, ZIP_PREFIX};
use crate::errors::IngestError;
use crate::tree::FileNode;
use crate::walker::{process_directory, ProcessOptions};

/// Check if `input` names a zip archive by extension.
pub fn is_zip_path(input: &str) -> bool {
    input.to_ascii_lowercase().ends_with(".zip")
}

/// Name used for the root of an archive: its file stem.
pub fn archive_name(path: &Path) -> String {
    path.file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "archive".to_string())
}

/// Extract every entry of `archive` into `dest`.
///
/// Entries whose names would escape `dest` are rejected by the zip reader.
pub fn extract(archive: &Path, dest: &Path) -> Result<(), IngestError> {
    let file = File::open(archive).map_err(|e| match e.kind() {
        io::ErrorKind::NotFound => IngestError::PathNotFound(archive.to_path_buf()),
        _ => IngestError::Io(e),
    })?;

    let archive_error = |source| IngestError::Archive {
        path: archive.to_path_buf(),
        source,
    };

    let mut zip = ZipArchive::new(file).map_err(archive_error)?;
    debug!(archive = %archive.display(), entries = zip.len(), "extracting");
    zip.extract(dest).map_err(archive_error)
}

/// The directory to process: the sole top-level directory if there is
/// exactly one entry and it is a directory, else `dir` itself.
pub fn content_root(dir: &Path) -> Result<PathBuf, IngestError> {
    let entries: Vec<_> = fs::read_dir(dir)?.collect::<Result<_, _>>()?;

    if let [only] = entries.as_slice() {
        if only.file_type()?.is_dir() {
            return Ok(only.path());
        }
    }
    Ok(dir.to_path_buf())
}

/// Extract a zip archive into a staging directory and process it.
///
/// The root is named after the archive. The staging directory is removed
/// before this returns.
pub fn load_zip(path: &Path, options: &ProcessOptions) -> Result<FileNode, IngestError> {
    if !path.is_file() {
        return Err(IngestError::PathNotFound(path.to_path_buf()));
    }

    load_into(path, options, StagingDir::create(ZIP_PREFIX)?)
}

/// Takes the staging directory by value so it is dropped on every return path.
fn load_into(path: &Path, options: &ProcessOptions, staging: StagingDir) -> Result<FileNode, IngestError> {
    extract(path, staging.path())?;

    let root_dir = content_root(staging.path())?;
    let mut root = process_directory(&root_dir, options)?;
    root.name = archive_name(path);
    Ok(root)
}
