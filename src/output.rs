//! Digest formatting.
//!
//! Turns a finished [`FileNode`] tree into the text handed to an LLM: an
//! optional stats block, an optional directory tree, then every file's
//! content in traversal order.

use crate::source::SourceType;
use crate::tokens::{estimate_tokens, format_token_count, round_tenths};
use crate::tree::{render_flat, render_tree, FileNode};

/// Line framing the stats block and each file header.
pub const SEPARATOR: &str = "================================================";

/// How the directory tree section is rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TreeStyle {
    /// Box-drawing tree (default).
    #[default]
    Ascii,
    /// Sorted list of file paths.
    Flat,
}

/// Options controlling which sections appear in the digest.
#[derive(Debug, Clone)]
pub struct OutputOptions {
    /// Include the stats block.
    pub include_stats: bool,
    /// Include the directory tree section.
    pub include_tree: bool,
    /// Tree rendering style.
    pub tree_style: TreeStyle,
}

impl Default for OutputOptions {
    fn default() -> Self {
        Self {
            include_stats: true,
            include_tree: true,
            tree_style: TreeStyle::Ascii,
        }
    }
}

/// Aggregate statistics of a processed source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Summary {
    pub source_name: String,
    pub source_type: SourceType,
    pub files_analyzed: usize,
    pub total_size: u64,
    pub estimated_tokens: usize,
}

/// Everything needed to print a digest.
#[derive(Debug, Clone)]
pub struct ProcessingResult {
    pub summary: Summary,
    /// Rendered directory tree.
    pub tree: String,
    /// Concatenated file blocks.
    pub content: String,
}

/// Count files and sum their sizes in one traversal.
pub fn calculate_stats(root: &FileNode) -> (usize, u64) {
    root.files()
        .into_iter()
        .fold((0, 0), |(count, size), file| (count + 1, size + file.size()))
}

/// Build the result for a finished tree.
pub fn create_processing_result(
    root: &FileNode,
    tree: String,
    source_type: SourceType,
    estimated_tokens: usize,
) -> ProcessingResult {
    let (files_analyzed, total_size) = calculate_stats(root);

    ProcessingResult {
        summary: Summary {
            source_name: root.name.clone(),
            source_type,
            files_analyzed,
            total_size,
            estimated_tokens,
        },
        tree,
        content: format_all_contents(root),
    }
}

/// Human-readable byte size: `1.5 MB`, `2.0 KB`, `512 B`.
///
/// # Examples
///
/// ```
/// use zipingest::output::format_size;
///
/// assert_eq!(format_size(512), "512 B");
/// assert_eq!(format_size(2048), "2.0 KB");
/// assert_eq!(format_size(1_572_864), "1.5 MB");
/// ```
pub fn format_size(bytes: u64) -> String {
    const KB: u64 = 1024;
    const MB: u64 = KB * 1024;

    if bytes >= MB {
        format!("{:.1} MB", round_tenths(bytes as f64 / MB as f64))
    } else if bytes >= KB {
        format!("{:.1} KB", round_tenths(bytes as f64 / KB as f64))
    } else {
        format!("{} B", bytes)
    }
}

fn format_summary(summary: &Summary) -> String {
    format!(
        "{sep}\nSource: {}\nType: {}\nFiles analyzed: {}\nTotal size: {}\nEstimated tokens: {}\n{sep}",
        summary.source_name,
        summary.source_type,
        summary.files_analyzed,
        format_size(summary.total_size),
        format_token_count(summary.estimated_tokens),
        sep = SEPARATOR,
    )
}

fn format_file_block(file: &FileNode) -> String {
    let body = if file.is_binary() {
        format!("[Binary file - {}]", format_size(file.size()))
    } else {
        match file.content() {
            Some(text) if !text.is_empty() => text.to_string(),
            _ => "[Empty file]".to_string(),
        }
    };

    format!("{sep}\nFILE: {}\n{sep}\n{}\n", file.path, body, sep = SEPARATOR)
}

fn format_all_contents(root: &FileNode) -> String {
    root.files()
        .into_iter()
        .map(format_file_block)
        .collect::<Vec<_>>()
        .join("\n")
}

/// Assemble the digest.
///
/// Sections appear in the order stats, tree, content, separated by a blank
/// line. An empty tree or content section is left out.
pub fn format_output(result: &ProcessingResult, options: &OutputOptions) -> String {
    let mut sections = Vec::new();

    if options.include_stats {
        sections.push(format_summary(&result.summary));
    }

    if options.include_tree && !result.tree.is_empty() {
        sections.push(format!("Directory structure:\n{}", result.tree));
    }

    if !result.content.is_empty() {
        sections.push(result.content.clone());
    }

    sections.join("\n\n")
}

/// Render, estimate, summarize and format a tree in one call.
///
/// # Examples
///
/// ```
/// use zipingest::output::{render_digest, OutputOptions};
/// use zipingest::source::SourceType;
/// use zipingest::tree::FileNode;
///
/// let mut root = FileNode::directory("demo", "");
/// root.add_child(FileNode::text_file("a.txt", "a.txt", 5, "hello"));
///
/// let digest = render_digest(&root, SourceType::Directory, &OutputOptions::default());
/// assert!(digest.contains("Files analyzed: 1"));
/// assert!(digest.contains("FILE: a.txt"));
/// ```
pub fn render_digest(root: &FileNode, source_type: SourceType, options: &OutputOptions) -> String {
    let tree = match options.tree_style {
        TreeStyle::Ascii => render_tree(root),
        TreeStyle::Flat => render_flat(root),
    };
    let tokens = estimate_tokens(root);
    let result = create_processing_result(root, tree, source_type, tokens);
    format_output(&result, options)
}
