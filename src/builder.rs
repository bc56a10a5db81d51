//! Fluent builder API for zipingest.
//!
//! Provides both builder-style and plain-function entry points for turning
//! a source into a digest.

use crate::errors::IngestError;
use crate::output::{render_digest, OutputOptions, TreeStyle};
use crate::source::{load, LoadedSource};
use crate::walker::ProcessOptions;

/// Builder for ingesting one source.
///
/// # Examples
///
/// ```no_run
/// use zipingest::builder::Ingest;
///
/// let digest = Ingest::new("https://github.com/owner/repo")
///     .include(["*.md"])
///     .include_tree(false)
///     .run()
///     .unwrap();
/// ```
#[derive(Debug, Clone)]
pub struct Ingest {
    source: String,
    process: ProcessOptions,
    output: OutputOptions,
}

impl Ingest {
    /// Create a builder for a directory path, zip path or URL.
    pub fn new(source: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            process: ProcessOptions::default(),
            output: OutputOptions::default(),
        }
    }

    /// Add include patterns. When any are set, only matching files are kept.
    pub fn include<I, S>(mut self, patterns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.process.include.extend(patterns.into_iter().map(Into::into));
        self
    }

    /// Add exclude patterns.
    pub fn exclude<I, S>(mut self, patterns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.process.exclude.extend(patterns.into_iter().map(Into::into));
        self
    }

    /// Files larger than this many bytes are treated as binary.
    pub fn max_file_size(mut self, bytes: u64) -> Self {
        self.process.max_file_size = bytes;
        self
    }

    /// Include the directory tree section (default: true).
    pub fn include_tree(mut self, include: bool) -> Self {
        self.output.include_tree = include;
        self
    }

    /// Include the stats block (default: true).
    pub fn include_stats(mut self, include: bool) -> Self {
        self.output.include_stats = include;
        self
    }

    /// Choose how the tree section is drawn.
    pub fn tree_style(mut self, style: TreeStyle) -> Self {
        self.output.tree_style = style;
        self
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn process_options(&self) -> &ProcessOptions {
        &self.process
    }

    pub fn output_options(&self) -> &OutputOptions {
        &self.output
    }

    /// Acquire the source and build its tree without formatting.
    pub fn load(&self) -> Result<LoadedSource, IngestError> {
        load(&self.source, &self.process)
    }

    /// Format an already loaded source with this builder's output options.
    pub fn render(&self, loaded: &LoadedSource) -> String {
        render_digest(&loaded.root, loaded.source_type, &self.output)
    }

    /// Load and format in one step.
    pub fn run(&self) -> Result<String, IngestError> {
        let loaded = self.load()?;
        Ok(self.render(&loaded))
    }
}

// ============================================================================
// Functional API
// ============================================================================

/// Produce the digest for `source` with explicit options.
///
/// # Examples
///
/// ```no_run
/// use zipingest::builder::ingest;
/// use zipingest::output::OutputOptions;
/// use zipingest::walker::ProcessOptions;
///
/// let digest = ingest("./project", &ProcessOptions::default(), &OutputOptions::default()).unwrap();
/// print!("{digest}");
/// ```
pub fn ingest(
    source: &str,
    process: &ProcessOptions,
    output: &OutputOptions,
) -> Result<String, IngestError> {
    let loaded = load(source, process)?;
    Ok(render_digest(&loaded.root, loaded.source_type, output))
}
