//! File tree representation and rendering.
//!
//! Provides the [`FileNode`] tree built by the walker and functions for
//! rendering it with box-drawing characters or as a flat path list.

use std::cmp::Ordering;

/// The type of a filesystem node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NodeKind {
    Directory {
        /// Children in insertion (enumeration) order.
        children: Vec<FileNode>,
    },
    File {
        size: u64,
        /// Text content, the oversize placeholder, or an inline error message.
        content: Option<String>,
        is_binary: bool,
        is_notebook: bool,
    },
}

impl NodeKind {
    /// Check if this is a directory.
    pub fn is_directory(&self) -> bool {
        matches!(self, NodeKind::Directory { .. })
    }

    /// Check if this is a file.
    pub fn is_file(&self) -> bool {
        matches!(self, NodeKind::File { .. })
    }
}

/// A node in the file tree.
///
/// A directory's size is never stored: [`FileNode::size`] sums the children,
/// so it always agrees with the subtree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileNode {
    /// File or directory name (not full path).
    pub name: String,
    /// Path relative to the processed root, `/`-separated. Empty for the root.
    pub path: String,
    /// Type of node (file or directory).
    pub kind: NodeKind,
}

impl FileNode {
    /// Create a new, empty directory node.
    pub fn directory(name: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            path: path.into(),
            kind: NodeKind::Directory {
                children: Vec::new(),
            },
        }
    }

    /// Create a text file node.
    pub fn text_file(
        name: impl Into<String>,
        path: impl Into<String>,
        size: u64,
        content: impl Into<String>,
    ) -> Self {
        Self::file(name, path, size, Some(content.into()), false, false)
    }

    /// Create a binary file node, optionally carrying a placeholder.
    pub fn binary_file(
        name: impl Into<String>,
        path: impl Into<String>,
        size: u64,
        placeholder: Option<String>,
    ) -> Self {
        Self::file(name, path, size, placeholder, true, false)
    }

    /// Create a file node with every field spelled out.
    pub fn file(
        name: impl Into<String>,
        path: impl Into<String>,
        size: u64,
        content: Option<String>,
        is_binary: bool,
        is_notebook: bool,
    ) -> Self {
        Self {
            name: name.into(),
            path: path.into(),
            kind: NodeKind::File {
                size,
                content,
                is_binary,
                is_notebook,
            },
        }
    }

    /// Check if this is a directory.
    pub fn is_directory(&self) -> bool {
        self.kind.is_directory()
    }

    /// Check if this is a file.
    pub fn is_file(&self) -> bool {
        self.kind.is_file()
    }

    /// Add a child node. Ignored for files.
    pub fn add_child(&mut self, child: FileNode) {
        if let NodeKind::Directory { children } = &mut self.kind {
            children.push(child);
        }
    }

    /// Get child nodes (empty for files).
    pub fn children(&self) -> &[FileNode] {
        match &self.kind {
            NodeKind::Directory { children } => children,
            NodeKind::File { .. } => &[],
        }
    }

    /// Size in bytes; for directories, the sum over all descendant files.
    pub fn size(&self) -> u64 {
        match &self.kind {
            NodeKind::File { size, .. } => *size,
            NodeKind::Directory { children } => children.iter().map(FileNode::size).sum(),
        }
    }

    /// File content, if any.
    pub fn content(&self) -> Option<&str> {
        match &self.kind {
            NodeKind::File { content, .. } => content.as_deref(),
            NodeKind::Directory { .. } => None,
        }
    }

    /// Whether this file was classified as binary. Directories never are.
    pub fn is_binary(&self) -> bool {
        matches!(self.kind, NodeKind::File { is_binary: true, .. })
    }

    /// Whether this file's content was transcoded from a notebook.
    pub fn is_notebook(&self) -> bool {
        matches!(self.kind, NodeKind::File { is_notebook: true, .. })
    }

    /// All file nodes, depth-first in insertion order.
    pub fn files(&self) -> Vec<&FileNode> {
        let mut out = Vec::new();
        collect_files(self, &mut out);
        out
    }

    /// Count total files in this tree.
    pub fn file_count(&self) -> usize {
        match &self.kind {
            NodeKind::File { .. } => 1,
            NodeKind::Directory { children } => children.iter().map(FileNode::file_count).sum(),
        }
    }

    /// Count total directories in this tree, including this one.
    pub fn directory_count(&self) -> usize {
        match &self.kind {
            NodeKind::File { .. } => 0,
            NodeKind::Directory { children } => {
                1 + children.iter().map(FileNode::directory_count).sum::<usize>()
            }
        }
    }

    /// Find a node by its relative path.
    pub fn find(&self, path: &str) -> Option<&FileNode> {
        if self.path == path {
            return Some(self);
        }
        self.children().iter().find_map(|c| c.find(path))
    }
}

fn collect_files<'a>(node: &'a FileNode, out: &mut Vec<&'a FileNode>) {
    match &node.kind {
        NodeKind::File { .. } => out.push(node),
        NodeKind::Directory { children } => {
            for child in children {
                collect_files(child, out);
            }
        }
    }
}

/// Collation class of a character: symbols sort before digits, digits before letters.
fn char_class(c: char) -> u8 {
    if c.is_alphabetic() {
        2
    } else if c.is_numeric() {
        1
    } else {
        0
    }
}

fn primary_key(name: &str) -> impl Iterator<Item = (u8, char)> + '_ {
    name.chars()
        .flat_map(char::to_lowercase)
        .map(|c| (char_class(c), c))
}

fn case_key(name: &str) -> impl Iterator<Item = bool> + '_ {
    name.chars().map(char::is_uppercase)
}

/// Locale-style name ordering.
///
/// Names are first compared ignoring case, with symbols before digits before
/// letters. Names that differ only in case put lowercase first. Byte order
/// breaks any remaining tie.
pub fn compare_names(a: &str, b: &str) -> Ordering {
    primary_key(a)
        .cmp(primary_key(b))
        .then_with(|| case_key(a).cmp(case_key(b)))
        .then_with(|| a.cmp(b))
}

/// Directories first, then [`compare_names`].
fn compare_nodes(a: &FileNode, b: &FileNode) -> Ordering {
    match (a.is_directory(), b.is_directory()) {
        (true, false) => Ordering::Less,
        (false, true) => Ordering::Greater,
        _ => compare_names(&a.name, &b.name),
    }
}

fn sorted_children(node: &FileNode) -> Vec<&FileNode> {
    let mut children: Vec<&FileNode> = node.children().iter().collect();
    children.sort_by(|a, b| compare_nodes(a, b));
    children
}

/// Box-drawing characters for tree rendering.
const BRANCH: &str = "├── ";
const LAST_BRANCH: &str = "└── ";
const VERTICAL: &str = "│   ";
const SPACE: &str = "    ";

/// Render a file tree with box-drawing characters.
///
/// Children are sorted for display only; the tree itself is not modified.
///
/// # Examples
///
/// ```
/// use zipingest::tree::{render_tree, FileNode};
///
/// let mut root = FileNode::directory("project", "");
/// root.add_child(FileNode::text_file("main.rs", "main.rs", 12, "fn main() {}"));
/// root.add_child(FileNode::directory("src", "src"));
///
/// assert_eq!(render_tree(&root), "project/\n├── src/\n└── main.rs");
/// ```
pub fn render_tree(root: &FileNode) -> String {
    let mut lines = Vec::new();
    render_node(&mut lines, root, "", true, true);
    lines.join("\n")
}

fn render_node(lines: &mut Vec<String>, node: &FileNode, prefix: &str, is_last: bool, is_root: bool) {
    let branch = if is_root {
        ""
    } else if is_last {
        LAST_BRANCH
    } else {
        BRANCH
    };
    let slash = if node.is_directory() { "/" } else { "" };
    lines.push(format!("{}{}{}{}", prefix, branch, node.name, slash));

    let children = sorted_children(node);
    let child_prefix = if is_root {
        String::new()
    } else {
        format!("{}{}", prefix, if is_last { SPACE } else { VERTICAL })
    };

    let count = children.len();
    for (i, child) in children.into_iter().enumerate() {
        render_node(lines, child, &child_prefix, i + 1 == count, false);
    }
}

/// Render every file path, sorted, one per line. Directories are omitted.
///
/// Meant for trees too large for the box-drawing form.
pub fn render_flat(root: &FileNode) -> String {
    let mut paths: Vec<&str> = root.files().into_iter().map(|f| f.path.as_str()).collect();
    paths.sort_unstable();
    paths.join("\n")
}
