//! Jupyter notebook transcoding.
//!
//! Notebooks are JSON documents; shipping them verbatim wastes most of the
//! token budget on metadata. [`transcode`] rewrites one as markdown: markdown
//! cells as-is, code cells in fenced `python` blocks followed by their text
//! output, raw cells in plain fences.

use serde::Deserialize;
use serde_json::{Map, Value};

const HEADER: &str = "# Jupyter Notebook\n";

#[derive(Debug, Deserialize)]
struct Notebook {
    cells: Vec<Cell>,
}

#[derive(Debug, Deserialize)]
struct Cell {
    cell_type: CellType,
    #[serde(default)]
    source: Source,
    #[serde(default)]
    outputs: Vec<CellOutput>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
enum CellType {
    Code,
    Markdown,
    Raw,
    #[serde(other)]
    Unknown,
}

/// Notebook text fields are either one string or a list of line fragments.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum Source {
    Text(String),
    Fragments(Vec<String>),
}

impl Default for Source {
    fn default() -> Self {
        Source::Text(String::new())
    }
}

impl Source {
    fn joined(&self) -> String {
        match self {
            Source::Text(text) => text.clone(),
            Source::Fragments(parts) => parts.concat(),
        }
    }
}

#[derive(Debug, Deserialize)]
struct CellOutput {
    #[serde(default)]
    text: Option<Source>,
    #[serde(default)]
    data: Option<Map<String, Value>>,
}

impl CellOutput {
    /// Prefer the `text` field, fall back to `data["text/plain"]`.
    fn text(&self) -> Option<String> {
        if let Some(text) = self.text.as_ref().map(Source::joined) {
            if !text.is_empty() {
                return Some(text);
            }
        }

        let plain = self.data.as_ref()?.get("text/plain")?;
        let text = match plain {
            Value::String(s) => s.clone(),
            Value::Array(parts) => parts.iter().filter_map(Value::as_str).collect(),
            _ => return None,
        };
        (!text.is_empty()).then_some(text)
    }
}

/// Convert notebook JSON into readable markdown.
///
/// Never fails: unparseable input yields a single bracketed error line.
///
/// # Examples
///
/// ```
/// use zipingest::notebook::transcode;
///
/// let nb = r##"{"cells": [{"cell_type": "markdown", "source": ["# Title"]}]}"##;
/// assert!(transcode(nb).contains("# Title"));
/// assert!(transcode("not json").starts_with("[Error parsing notebook:"));
/// ```
pub fn transcode(json: &str) -> String {
    match serde_json::from_str::<Notebook>(json) {
        Ok(notebook) => render(&notebook),
        Err(e) => format!("[Error parsing notebook: {}]", e),
    }
}

fn render(notebook: &Notebook) -> String {
    let mut lines: Vec<String> = vec![HEADER.to_string()];

    for cell in &notebook.cells {
        let source = cell.source.joined();
        if source.trim().is_empty() {
            continue;
        }

        match cell.cell_type {
            CellType::Markdown => {
                lines.push(source);
                lines.push(String::new());
            }
            CellType::Code => {
                lines.push("```python".to_string());
                lines.push(source);
                lines.push("```".to_string());

                let output = output_text(&cell.outputs);
                if !output.is_empty() {
                    lines.push(String::new());
                    lines.push("**Output:**".to_string());
                    lines.push("```".to_string());
                    lines.push(output);
                    lines.push("```".to_string());
                }
                lines.push(String::new());
            }
            CellType::Raw => {
                lines.push("```".to_string());
                lines.push(source);
                lines.push("```".to_string());
                lines.push(String::new());
            }
            CellType::Unknown => {}
        }
    }

    lines.join("\n")
}

fn output_text(outputs: &[CellOutput]) -> String {
    outputs
        .iter()
        .filter_map(CellOutput::text)
        .collect::<Vec<_>>()
        .join("\n")
        .trim()
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_markdown_and_code_without_outputs() {
        let nb = r##"{
            "cells": [
                {"cell_type": "markdown", "source": "# Title"},
                {"cell_type": "code", "source": ["print(1)"], "outputs": []}
            ],
            "metadata": {}
        }"##;

        let md = transcode(nb);
        assert!(md.starts_with("# Jupyter Notebook\n"));
        assert!(md.contains("# Title"));
        assert!(md.contains("```python\nprint(1)\n```"));
        assert!(!md.contains("Output"));
    }

    #[test]
    fn test_fragments_concatenate_without_separator() {
        let nb = r#"{"cells": [{"cell_type": "code", "source": ["x = 1\n", "y = 2"]}]}"#;
        assert!(transcode(nb).contains("```python\nx = 1\ny = 2\n```"));
    }

    #[test]
    fn test_code_outputs() {
        let nb = r#"{
            "cells": [{
                "cell_type": "code",
                "source": "print('hi')\n2 + 2",
                "outputs": [
                    {"output_type": "stream", "text": ["hi\n"]},
                    {"output_type": "execute_result", "data": {"text/plain": ["4"], "text/html": "<b>4</b>"}},
                    {"output_type": "display_data", "data": {"image/png": "iVBOR"}}
                ]
            }]
        }"#;

        let md = transcode(nb);
        assert!(md.contains("**Output:**\n```\nhi\n\n4\n```"));
        assert!(!md.contains("<b>4</b>"));
        assert!(!md.contains("iVBOR"));
    }

    #[test]
    fn test_raw_cell_unlabeled_fence() {
        let nb = r#"{"cells": [{"cell_type": "raw", "source": "raw text"}]}"#;
        assert!(transcode(nb).contains("```\nraw text\n```"));
    }

    #[test]
    fn test_blank_cells_skipped() {
        let nb = r#"{"cells": [
            {"cell_type": "code", "source": ["   ", "\n"]},
            {"cell_type": "markdown", "source": ""}
        ]}"#;
        assert_eq!(transcode(nb), "# Jupyter Notebook\n");
    }

    #[test]
    fn test_unknown_cell_type_skipped() {
        let nb = r#"{"cells": [{"cell_type": "heading", "source": "old"}]}"#;
        assert!(!transcode(nb).contains("old"));
    }

    #[test]
    fn test_parse_failure() {
        let out = transcode("{\"cells\": 3}");
        assert!(out.starts_with("[Error parsing notebook: "));
        assert!(out.ends_with(']'));
        assert!(!out.contains('\n'));
    }
}
