//! Include/exclude filtering with glob patterns.
//!
//! Every entry met during traversal is checked against three pattern sets:
//! user excludes, the fixed [`DEFAULT_EXCLUDES`] table, and user includes.
//! Include patterns only ever apply to files, so directories are always
//! descended into and only disappear indirectly, by ending up empty.
//!
//! Patterns use `glob` semantics: `*` stays within one path segment, `**`
//! crosses segments, and a leading dot gets no special treatment. A pattern
//! is unanchored unless it starts with `/`: it may match the full relative
//! path or any segment-aligned suffix of it, so `*.md` matches `docs/c.md`.
//! A pattern ending in `/**` also matches the directory it names.

use std::sync::OnceLock;

use glob::{MatchOptions, Pattern, PatternError};
use thiserror::Error;

/// Errors that can occur while compiling filter patterns.
#[derive(Debug, Error)]
pub enum FilterError {
    #[error("invalid glob pattern '{pattern}': {source}")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: PatternError,
    },
}

/// Patterns that are always excluded, on top of any user excludes.
pub const DEFAULT_EXCLUDES: &[&str] = &[
    // Dependencies and lockfiles
    "node_modules/**",
    "*.lock",
    "package-lock.json",
    "yarn.lock",
    "pnpm-lock.yaml",
    // Version control
    ".git/**",
    // Build output and framework caches
    "dist/**",
    "build/**",
    ".next/**",
    // Minified assets and source maps
    "*.min.js",
    "*.min.css",
    "*.map",
    // OS metadata
    ".DS_Store",
    "Thumbs.db",
    // Compiled bytecode
    "*.pyc",
    "__pycache__/**",
    // Secrets and logs
    ".env*",
    "*.log",
    // Editors
    ".vscode/**",
    ".idea/**",
    // Coverage output
    "coverage/**",
    ".nyc_output/**",
];

const MATCH_OPTIONS: MatchOptions = MatchOptions {
    case_sensitive: true,
    require_literal_separator: true,
    require_literal_leading_dot: false,
};

/// A single compiled pattern.
#[derive(Debug, Clone)]
struct Glob {
    pattern: Pattern,
    /// For `dir/**`, the pattern for `dir` itself.
    dir_itself: Option<Pattern>,
    anchored: bool,
}

impl Glob {
    fn new(raw: &str) -> Result<Self, FilterError> {
        let anchored = raw.starts_with('/');
        let body = raw.trim_start_matches('/');

        let compile = |p: &str| {
            Pattern::new(p).map_err(|source| FilterError::InvalidPattern {
                pattern: raw.to_string(),
                source,
            })
        };

        let pattern = compile(body)?;
        let dir_itself = match body.strip_suffix("/**") {
            Some(dir) if !dir.is_empty() => Some(compile(dir)?),
            _ => None,
        };

        Ok(Self {
            pattern,
            dir_itself,
            anchored,
        })
    }

    fn matches(&self, path: &str) -> bool {
        if self.anchored {
            return self.matches_exact(path);
        }
        suffixes(path).any(|candidate| self.matches_exact(candidate))
    }

    fn matches_exact(&self, candidate: &str) -> bool {
        self.pattern.matches_with(candidate, MATCH_OPTIONS)
            || self
                .dir_itself
                .as_ref()
                .is_some_and(|dir| dir.matches_with(candidate, MATCH_OPTIONS))
    }
}

/// Segment-aligned suffixes of `path`, longest first.
fn suffixes(path: &str) -> impl Iterator<Item = &str> {
    std::iter::once(path).chain(path.match_indices('/').map(move |(i, _)| &path[i + 1..]))
}

fn default_globs() -> &'static [Glob] {
    static DEFAULTS: OnceLock<Vec<Glob>> = OnceLock::new();
    DEFAULTS.get_or_init(|| {
        DEFAULT_EXCLUDES
            .iter()
            .filter_map(|p| Glob::new(p).ok())
            .collect()
    })
}

fn compile_all<I, S>(patterns: I) -> Result<Vec<Glob>, FilterError>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    patterns.into_iter().map(|p| Glob::new(p.as_ref())).collect()
}

/// Compiled include/exclude rules for one traversal.
///
/// # Examples
///
/// ```
/// use zipingest::filter::PathFilter;
///
/// let filter = PathFilter::new(["*.tmp"], ["*.md"]).unwrap();
/// assert!(filter.should_exclude("notes.tmp", false));
/// assert!(filter.should_exclude("b.txt", false));
/// assert!(!filter.should_exclude("docs/c.md", false));
/// assert!(!filter.should_exclude("docs", true));
/// ```
#[derive(Debug, Clone, Default)]
pub struct PathFilter {
    excludes: Vec<Glob>,
    includes: Vec<Glob>,
}

impl PathFilter {
    /// Compile user exclude and include patterns.
    pub fn new<E, I, S, T>(excludes: E, includes: I) -> Result<Self, FilterError>
    where
        E: IntoIterator<Item = S>,
        I: IntoIterator<Item = T>,
        S: AsRef<str>,
        T: AsRef<str>,
    {
        Ok(Self {
            excludes: compile_all(excludes)?,
            includes: compile_all(includes)?,
        })
    }

    /// Add an exclude pattern after construction.
    pub fn exclude(mut self, pattern: &str) -> Result<Self, FilterError> {
        self.excludes.push(Glob::new(pattern)?);
        Ok(self)
    }

    /// Decide whether the entry at `path` (relative, `/`-separated) is skipped.
    pub fn should_exclude(&self, path: &str, is_directory: bool) -> bool {
        if self.excludes.iter().any(|g| g.matches(path)) {
            return true;
        }

        if default_globs().iter().any(|g| g.matches(path)) {
            return true;
        }

        !is_directory && !self.includes.is_empty() && !self.includes.iter().any(|g| g.matches(path))
    }
}

/// Check if `path` matches any of `patterns`.
///
/// Patterns that fail to compile never match.
pub fn matches_any(path: &str, patterns: &[String]) -> bool {
    patterns
        .iter()
        .filter_map(|p| Glob::new(p).ok())
        .any(|g| g.matches(path))
}

/// One-shot form of [`PathFilter::should_exclude`].
///
/// Compiles the patterns on every call and treats invalid patterns as
/// non-matching; build a [`PathFilter`] for repeated checks.
pub fn should_exclude(
    path: &str,
    custom_excludes: &[String],
    custom_includes: &[String],
    is_directory: bool,
) -> bool {
    if matches_any(path, custom_excludes) {
        return true;
    }

    if default_globs().iter().any(|g| g.matches(path)) {
        return true;
    }

    !is_directory && !custom_includes.is_empty() && !matches_any(path, custom_includes)
}
