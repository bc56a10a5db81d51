//! Directory traversal into a [`FileNode`] tree.
//!
//! Walks one directory level at a time with the `ignore` crate (all of its
//! standard filters switched off, so only [`PathFilter`] decides what is
//! skipped), classifies every file, and builds the tree depth-first.
//!
//! Failures below the root never abort the walk: an unreadable file becomes
//! a node whose content describes the error, and a directory that cannot be
//! enumerated is logged and left empty.

use std::fs;
use std::path::{Path, PathBuf};

use ignore::WalkBuilder;
use thiserror::Error;
use tracing::{debug, trace, warn};

use crate::binary::{decode_text, is_binary_extension, oversize_placeholder, DEFAULT_MAX_FILE_SIZE};
use crate::filter::{FilterError, PathFilter};
use crate::notebook::transcode;
use crate::tree::FileNode;

/// Errors that prevent a traversal from starting.
#[derive(Debug, Error)]
pub enum WalkError {
    #[error("path not found: {path}")]
    NotFound { path: PathBuf },

    #[error("not a directory: {path}")]
    NotADirectory { path: PathBuf },

    #[error("IO error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    Filter(#[from] FilterError),
}

/// Options for directory processing.
#[derive(Debug, Clone)]
pub struct ProcessOptions {
    /// Only files matching one of these are kept (empty = keep all).
    pub include: Vec<String>,
    /// Entries matching one of these are skipped.
    pub exclude: Vec<String>,
    /// Files larger than this are treated as binary.
    pub max_file_size: u64,
}

impl Default for ProcessOptions {
    fn default() -> Self {
        Self {
            include: Vec::new(),
            exclude: Vec::new(),
            max_file_size: DEFAULT_MAX_FILE_SIZE,
        }
    }
}

impl ProcessOptions {
    /// Compile the include/exclude patterns.
    pub fn filter(&self) -> Result<PathFilter, FilterError> {
        PathFilter::new(&self.exclude, &self.include)
    }
}

/// Process a directory into a tree.
///
/// The root node is named after the directory and has an empty path; every
/// other node's path is relative to `root`.
///
/// # Examples
///
/// ```no_run
/// use std::path::Path;
/// use zipingest::walker::{process_directory, ProcessOptions};
///
/// let tree = process_directory(Path::new("./project"), &ProcessOptions::default()).unwrap();
/// println!("{} files, {} bytes", tree.file_count(), tree.size());
/// ```
pub fn process_directory(root: &Path, options: &ProcessOptions) -> Result<FileNode, WalkError> {
    let filter = options.filter()?;
    process_directory_with_filter(root, &filter, options.max_file_size)
}

/// Process a directory with an already compiled filter.
pub fn process_directory_with_filter(
    root: &Path,
    filter: &PathFilter,
    max_file_size: u64,
) -> Result<FileNode, WalkError> {
    let metadata = fs::metadata(root).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            WalkError::NotFound {
                path: root.to_path_buf(),
            }
        } else {
            WalkError::Io {
                path: root.to_path_buf(),
                source: e,
            }
        }
    })?;

    if !metadata.is_dir() {
        return Err(WalkError::NotADirectory {
            path: root.to_path_buf(),
        });
    }

    let name = root.file_name().map_or_else(
        || root.to_string_lossy().into_owned(),
        |n| n.to_string_lossy().into_owned(),
    );

    debug!(root = %root.display(), "processing directory");
    let mut node = FileNode::directory(name, "");
    walk_into(&mut node, root, "", filter, max_file_size);
    Ok(node)
}

/// An entry of a single directory listing.
struct DirEntry {
    path: PathBuf,
    name: String,
    is_dir: bool,
    is_file: bool,
}

/// List the immediate entries of `dir` in filesystem order.
///
/// Any enumeration error is logged and yields an empty listing.
fn read_entries(dir: &Path) -> Vec<DirEntry> {
    let walker = WalkBuilder::new(dir)
        .standard_filters(false)
        .follow_links(false)
        .max_depth(Some(1))
        .build();

    let mut entries = Vec::new();
    for result in walker {
        match result {
            Ok(entry) if entry.depth() == 0 => {}
            Ok(entry) => {
                let file_type = entry.file_type();
                entries.push(DirEntry {
                    name: entry.file_name().to_string_lossy().into_owned(),
                    is_dir: file_type.is_some_and(|ft| ft.is_dir()),
                    is_file: file_type.is_some_and(|ft| ft.is_file()),
                    path: entry.into_path(),
                });
            }
            Err(err) => {
                warn!(directory = %dir.display(), error = %err, "failed to read directory");
                return Vec::new();
            }
        }
    }
    entries
}

fn join_relative(parent: &str, name: &str) -> String {
    if parent.is_empty() {
        name.to_string()
    } else {
        format!("{}/{}", parent, name)
    }
}

fn walk_into(dir: &mut FileNode, abs: &Path, rel: &str, filter: &PathFilter, max_file_size: u64) {
    for entry in read_entries(abs) {
        let entry_rel = join_relative(rel, &entry.name);

        if filter.should_exclude(&entry_rel, entry.is_dir) {
            trace!(path = %entry_rel, "excluded");
            continue;
        }

        if entry.is_dir {
            let mut child = FileNode::directory(entry.name, entry_rel.as_str());
            walk_into(&mut child, &entry.path, &entry_rel, filter, max_file_size);
            dir.add_child(child);
        } else if entry.is_file {
            dir.add_child(process_file(&entry.path, &entry_rel, max_file_size));
        } else {
            trace!(path = %entry_rel, "skipping non-regular entry");
        }
    }
}

fn read_error(err: &std::io::Error) -> String {
    format!("[Error reading file: {}]", err)
}

fn is_notebook(name: &str) -> bool {
    Path::new(name)
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("ipynb"))
}

/// Read and classify one file.
///
/// Binary by extension: no content. Larger than `max_file_size`: binary with
/// a placeholder. Binary by content: no content. Notebooks are transcoded to
/// markdown. I/O failures are embedded in the content instead of returned.
pub fn process_file(path: &Path, rel: &str, max_file_size: u64) -> FileNode {
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();

    let size = match fs::metadata(path) {
        Ok(metadata) => metadata.len(),
        Err(e) => return FileNode::text_file(name, rel, 0, read_error(&e)),
    };

    if is_binary_extension(&name) {
        return FileNode::binary_file(name, rel, size, None);
    }

    if size > max_file_size {
        return FileNode::binary_file(name, rel, size, Some(oversize_placeholder(size, max_file_size)));
    }

    let bytes = match fs::read(path) {
        Ok(bytes) => bytes,
        Err(e) => return FileNode::text_file(name, rel, size, read_error(&e)),
    };

    match decode_text(bytes) {
        None => FileNode::binary_file(name, rel, size, None),
        Some(text) if is_notebook(&name) => {
            FileNode::file(name, rel, size, Some(transcode(&text)), false, true)
        }
        Some(text) => FileNode::text_file(name, rel, size, text),
    }
}
