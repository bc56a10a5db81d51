//! Interactive file selection.
//!
//! Shows every file of a tree in a checkbox prompt and prunes the tree down
//! to the checked ones.

use std::collections::HashSet;

use dialoguer::MultiSelect;
use tracing::info;

use crate::errors::IngestError;
use crate::output::format_size;
use crate::tree::{FileNode, NodeKind};

const PAGE_SIZE: usize = 20;

/// Keep only files whose path is in `selected`.
///
/// A directory survives only if at least one child survives, so the result
/// is `None` when nothing is selected. Directory sizes follow from the
/// remaining files.
///
/// # Examples
///
/// ```
/// use std::collections::HashSet;
/// use zipingest::select::filter_by_paths;
/// use zipingest::tree::FileNode;
///
/// let mut root = FileNode::directory("p", "");
/// root.add_child(FileNode::text_file("a.rs", "a.rs", 3, "abc"));
/// root.add_child(FileNode::text_file("b.rs", "b.rs", 2, "de"));
///
/// let selected: HashSet<String> = ["b.rs".to_string()].into();
/// let pruned = filter_by_paths(&root, &selected).unwrap();
/// assert_eq!(pruned.file_count(), 1);
/// assert_eq!(pruned.size(), 2);
/// ```
pub fn filter_by_paths(node: &FileNode, selected: &HashSet<String>) -> Option<FileNode> {
    match &node.kind {
        NodeKind::File { .. } => selected.contains(&node.path).then(|| node.clone()),
        NodeKind::Directory { children } => {
            let kept: Vec<FileNode> = children
                .iter()
                .filter_map(|child| filter_by_paths(child, selected))
                .collect();

            if kept.is_empty() {
                return None;
            }

            Some(FileNode {
                name: node.name.clone(),
                path: node.path.clone(),
                kind: NodeKind::Directory { children: kept },
            })
        }
    }
}

/// Checkbox label for a file.
pub fn choice_label(file: &FileNode) -> String {
    let marker = if file.is_binary() { " [binary]" } else { "" };
    format!("{} ({}){}", file.path, format_size(file.size()), marker)
}

/// Prompt for the files to keep. Text files start checked.
///
/// Returns `Ok(None)` when the tree has no files, the prompt is cancelled,
/// or nothing is checked.
pub fn select_files(root: &FileNode) -> Result<Option<FileNode>, IngestError> {
    let files = root.files();
    if files.is_empty() {
        info!("no files to select");
        return Ok(None);
    }

    let labels: Vec<String> = files.iter().map(|f| choice_label(f)).collect();
    let defaults: Vec<bool> = files.iter().map(|f| !f.is_binary()).collect();

    let chosen = MultiSelect::new()
        .with_prompt("Select files to include")
        .items(&labels)
        .defaults(&defaults)
        .max_length(PAGE_SIZE)
        .interact_opt()?;

    let selected: HashSet<String> = match chosen {
        Some(indices) if !indices.is_empty() => {
            indices.into_iter().map(|i| files[i].path.clone()).collect()
        }
        _ => return Ok(None),
    };

    info!(selected = selected.len(), total = files.len(), "files selected");
    Ok(filter_by_paths(root, &selected))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_tree() -> FileNode {
        let mut root = FileNode::directory("p", "");
        let mut src = FileNode::directory("src", "src");
        src.add_child(FileNode::text_file("main.rs", "src/main.rs", 10, "fn main(){}"));
        src.add_child(FileNode::text_file("lib.rs", "src/lib.rs", 20, "pub fn x(){}"));
        let mut docs = FileNode::directory("docs", "docs");
        docs.add_child(FileNode::text_file("guide.md", "docs/guide.md", 5, "guide"));
        root.add_child(src);
        root.add_child(docs);
        root.add_child(FileNode::binary_file("logo.png", "logo.png", 2048, None));
        root
    }

    fn paths(items: &[&str]) -> HashSet<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_keeps_selected_files() {
        let pruned = filter_by_paths(&sample_tree(), &paths(&["src/lib.rs", "logo.png"])).unwrap();
        assert!(pruned.find("src/lib.rs").is_some());
        assert!(pruned.find("logo.png").is_some());
        assert!(pruned.find("src/main.rs").is_none());
    }

    #[test]
    fn test_drops_emptied_directories() {
        let pruned = filter_by_paths(&sample_tree(), &paths(&["src/main.rs"])).unwrap();
        assert!(pruned.find("docs").is_none());
        assert_eq!(pruned.directory_count(), 2);
    }

    #[test]
    fn test_sizes_follow_selection() {
        let pruned = filter_by_paths(&sample_tree(), &paths(&["src/main.rs", "docs/guide.md"])).unwrap();
        assert_eq!(pruned.size(), 15);
        assert_eq!(pruned.find("src").unwrap().size(), 10);
    }

    #[test]
    fn test_nothing_selected() {
        assert!(filter_by_paths(&sample_tree(), &HashSet::new()).is_none());
        assert!(filter_by_paths(&sample_tree(), &paths(&["missing.rs"])).is_none());
    }

    #[test]
    fn test_original_untouched() {
        let root = sample_tree();
        let _ = filter_by_paths(&root, &paths(&["logo.png"]));
        assert_eq!(root.file_count(), 4);
    }

    #[test]
    fn test_choice_label() {
        let tree = sample_tree();
        assert_eq!(choice_label(tree.find("src/main.rs").unwrap()), "src/main.rs (10 B)");
        assert_eq!(choice_label(tree.find("logo.png").unwrap()), "logo.png (2.0 KB) [binary]");
    }

    #[test]
    fn test_select_files_empty_tree() {
        let root = FileNode::directory("empty", "");
        assert!(select_files(&root).unwrap().is_none());
    }
}
