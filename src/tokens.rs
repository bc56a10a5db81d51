//! Token estimation for LLM context budgets.
//!
//! Uses tiktoken-rs (`cl100k_base`) when the encoding can be loaded,
//! with a ~4 characters per token fallback otherwise.

use std::sync::OnceLock;

use rayon::prelude::*;
use tiktoken_rs::CoreBPE;

use crate::tree::FileNode;

/// Tokens added per file for the separator and header around its block.
pub const FILE_OVERHEAD_TOKENS: usize = 10;

static CL100K: OnceLock<Option<CoreBPE>> = OnceLock::new();

fn tokenizer() -> Option<&'static CoreBPE> {
    CL100K
        .get_or_init(|| tiktoken_rs::cl100k_base().ok())
        .as_ref()
}

/// Fallback heuristic: `ceil(chars / 4)`.
fn fallback_count(text: &str) -> usize {
    text.chars().count().div_ceil(4)
}

/// Count tokens in text.
///
/// Never fails: falls back to a character-based estimate if the
/// tokenizer is unavailable.
///
/// # Examples
///
/// ```
/// use zipingest::tokens::count_tokens;
///
/// assert_eq!(count_tokens(""), 0);
/// assert!(count_tokens("Hello, world!") > 0);
/// ```
pub fn count_tokens(text: &str) -> usize {
    match tokenizer() {
        Some(bpe) => bpe.encode_ordinary(text).len(),
        None => fallback_count(text),
    }
}

/// Estimate the tokens a digest of `root` will take.
///
/// Every file with non-empty content contributes its token count plus
/// [`FILE_OVERHEAD_TOKENS`]; binary files without content and directories
/// contribute nothing.
pub fn estimate_tokens(root: &FileNode) -> usize {
    let contents: Vec<&str> = root
        .files()
        .into_iter()
        .filter_map(FileNode::content)
        .filter(|c| !c.is_empty())
        .collect();

    contents
        .par_iter()
        .map(|content| count_tokens(content) + FILE_OVERHEAD_TOKENS)
        .sum()
}

/// Round to one decimal place, halves away from zero.
///
/// `{:.1}` alone rounds exact halves to even, which turns 2.25 into 2.2.
pub fn round_tenths(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

/// Format a token count for display: `~500`, `~2.5k`, `~1.5M`.
pub fn format_token_count(tokens: usize) -> String {
    if tokens >= 1_000_000 {
        format!("~{:.1}M", round_tenths(tokens as f64 / 1_000_000.0))
    } else if tokens >= 1_000 {
        format!("~{:.1}k", round_tenths(tokens as f64 / 1_000.0))
    } else {
        format!("~{}", tokens)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_string() {
        assert_eq!(count_tokens(""), 0);
    }

    #[test]
    fn test_simple_text() {
        let count = count_tokens("Hello, world!");
        assert!(count > 0 && count < 10);
    }

    #[test]
    fn test_fallback_approximation() {
        assert_eq!(fallback_count(""), 0);
        assert_eq!(fallback_count("a"), 1);
        assert_eq!(fallback_count("abcd"), 1);
        assert_eq!(fallback_count("abcde"), 2);
        // Characters, not bytes
        assert_eq!(fallback_count("éééé"), 1);
    }

    #[test]
    fn test_monotonic_in_content() {
        let short = count_tokens("fn main() {}");
        let long = count_tokens("fn main() {}\nfn other() { println!(\"more\"); }");
        assert!(long >= short);
    }

    #[test]
    fn test_estimate_adds_overhead_per_file() {
        let mut root = FileNode::directory("p", "");
        root.add_child(FileNode::text_file("a.txt", "a.txt", 5, "hello"));
        root.add_child(FileNode::text_file("b.txt", "b.txt", 5, "world"));

        let expected = count_tokens("hello") + count_tokens("world") + 2 * FILE_OVERHEAD_TOKENS;
        assert_eq!(estimate_tokens(&root), expected);
    }

    #[test]
    fn test_estimate_skips_binary_and_empty() {
        let mut root = FileNode::directory("p", "");
        root.add_child(FileNode::binary_file("a.png", "a.png", 100, None));
        root.add_child(FileNode::text_file("empty.txt", "empty.txt", 0, ""));
        root.add_child(FileNode::directory("sub", "sub"));
        assert_eq!(estimate_tokens(&root), 0);
    }

    #[test]
    fn test_estimate_counts_placeholder() {
        let mut root = FileNode::directory("p", "");
        root.add_child(FileNode::binary_file(
            "big.txt",
            "big.txt",
            2_000_000,
            Some("[File too large: 2000000 bytes, max: 1048576 bytes]".into()),
        ));
        assert!(estimate_tokens(&root) > FILE_OVERHEAD_TOKENS);
    }

    #[test]
    fn test_format_token_count() {
        assert_eq!(format_token_count(0), "~0");
        assert_eq!(format_token_count(500), "~500");
        assert_eq!(format_token_count(999), "~999");
        assert_eq!(format_token_count(2500), "~2.5k");
        assert_eq!(format_token_count(1_500_000), "~1.5M");
        assert_eq!(format_token_count(2250), "~2.3k");
        assert_eq!(format_token_count(1_250_000), "~1.3M");
    }

    #[test]
    fn test_round_tenths() {
        assert_eq!(round_tenths(2.25), 2.3);
        assert_eq!(round_tenths(1.25), 1.3);
        assert_eq!(round_tenths(1.24), 1.2);
    }
}
