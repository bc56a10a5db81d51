//! zipingest - Turn a source of files into one LLM-friendly digest.
//!
//! A source (local directory, zip archive, Git repository or single URL) is
//! walked into an in-memory [`FileNode`] tree, filtered with include/exclude
//! globs, classified into text and binary files, and rendered as a digest:
//! a stats header, an ASCII directory tree and the content of every file.
//!
//! # Quick Start
//!
//! ```no_run
//! use zipingest::builder::Ingest;
//!
//! let digest = Ingest::new("./my-project")
//!     .include(["*.rs", "*.toml"])
//!     .exclude(["target/**"])
//!     .run()
//!     .unwrap();
//!
//! println!("{digest}");
//! ```
//!
//! # Modules
//!
//! - [`filter`] - Include/exclude glob matching and the default exclude table
//! - [`binary`] - Text vs. binary classification
//! - [`notebook`] - Jupyter notebook to markdown transcoding
//! - [`tree`] - File tree representation and rendering
//! - [`tokens`] - Token estimation for LLM context budgets
//! - [`walker`] - Directory traversal into a [`FileNode`] tree
//! - [`output`] - Digest formatting
//! - [`source`] - Source detection and acquisition (directory, zip, git, url)
//! - [`select`] - Interactive file selection
//! - [`clipboard`] - System clipboard support
//! - [`logging`] - tracing subscriber setup
//! - [`errors`] - Top-level error type and exit codes
//! - [`builder`] - Fluent API tying the pipeline together

pub mod binary;
pub mod builder;
pub mod clipboard;
pub mod errors;
pub mod filter;
pub mod logging;
pub mod notebook;
pub mod output;
pub mod select;
pub mod source;
pub mod tokens;
pub mod tree;
pub mod walker;

// Re-export key types at crate root for convenience
pub use builder::Ingest;
pub use errors::IngestError;
pub use filter::{should_exclude, FilterError, PathFilter};
pub use output::{format_output, render_digest, OutputOptions, ProcessingResult, Summary, TreeStyle};
pub use source::{detect_source_type, load, LoadedSource, SourceType};
pub use tokens::{count_tokens, estimate_tokens, format_token_count};
pub use tree::{render_flat, render_tree, FileNode, NodeKind};
pub use walker::{process_directory, ProcessOptions, WalkError};
