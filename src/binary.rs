//! Text vs. binary classification.
//!
//! A file is binary when its extension is in a fixed list of known binary
//! formats, or when its bytes fail a content sniff: a NUL byte within the
//! first [`SNIFF_LEN`] bytes, or content that does not decode cleanly as
//! UTF-8. UTF-16 and other non-UTF-8 text is reported as binary too.

/// How many leading bytes are scanned for NUL.
pub const SNIFF_LEN: usize = 8000;

/// Default upper bound for file content, in bytes.
pub const DEFAULT_MAX_FILE_SIZE: u64 = 1_048_576;

/// Extensions (lowercase, without dot) that are binary without looking at content.
const BINARY_EXTENSIONS: &[&str] = &[
    // Images
    "png", "jpg", "jpeg", "gif", "bmp", "ico", "webp", "svg", "tiff", "tif",
    // Audio
    "mp3", "wav", "ogg", "flac", "aac", "m4a", "wma",
    // Video
    "mp4", "avi", "mov", "wmv", "flv", "webm", "mkv", "m4v",
    // Archives
    "zip", "tar", "gz", "bz2", "7z", "rar", "xz",
    // Executables
    "exe", "dll", "so", "dylib", "bin", "app",
    // Documents
    "pdf", "doc", "docx", "xls", "xlsx", "ppt", "pptx",
    // Fonts
    "ttf", "otf", "woff", "woff2", "eot",
    // Databases
    "db", "sqlite", "sqlite3",
    // Compiled artifacts
    "pyc", "pyo", "class", "o", "a", "lib",
];

/// Check whether the final extension of `name` is a known binary format.
///
/// # Examples
///
/// ```
/// use zipingest::binary::is_binary_extension;
///
/// assert!(is_binary_extension("logo.PNG"));
/// assert!(is_binary_extension("backup.tar.gz"));
/// assert!(!is_binary_extension("main.rs"));
/// assert!(!is_binary_extension("Makefile"));
/// ```
pub fn is_binary_extension(name: &str) -> bool {
    match name.rsplit_once('.') {
        Some((_, ext)) if !ext.is_empty() => {
            BINARY_EXTENSIONS.contains(&ext.to_ascii_lowercase().as_str())
        }
        _ => false,
    }
}

/// Content sniff: NUL in the first [`SNIFF_LEN`] bytes, or invalid UTF-8.
pub fn is_binary_content(bytes: &[u8]) -> bool {
    if has_nul(bytes) {
        return true;
    }
    match std::str::from_utf8(bytes) {
        Ok(text) => text.contains(char::REPLACEMENT_CHARACTER),
        Err(_) => true,
    }
}

/// Decode `bytes` as text, or return `None` if the content sniff says binary.
pub fn decode_text(bytes: Vec<u8>) -> Option<String> {
    if has_nul(&bytes) {
        return None;
    }
    match String::from_utf8(bytes) {
        Ok(text) if !text.contains(char::REPLACEMENT_CHARACTER) => Some(text),
        _ => None,
    }
}

/// Classify by extension first, then by content.
pub fn classify(name: &str, bytes: &[u8]) -> bool {
    is_binary_extension(name) || is_binary_content(bytes)
}

/// Content placed in an oversized file's node.
pub fn oversize_placeholder(size: u64, max: u64) -> String {
    format!("[File too large: {} bytes, max: {} bytes]", size, max)
}

fn has_nul(bytes: &[u8]) -> bool {
    bytes[..bytes.len().min(SNIFF_LEN)].contains(&0)
}
