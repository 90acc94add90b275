//! File reading and source discovery.
//!
//! Source files are loaded as ordered [`SourceLine`]s and discovered by
//! walking a project tree, pruning dependency caches and VCS directories.
//!
//! # Example
//!
//! ```ignore
//! use std::path::Path;
//! use depscan::reader::{find, read, DEFAULT_EXCLUDED_DIRS};
//!
//! for path in find(Path::new("."), DEFAULT_EXCLUDED_DIRS)? {
//!     let file = read(&path)?;
//!     println!("{}: {} lines", path.display(), file.lines.len());
//! }
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use serde::Serialize;
use thiserror::Error;
use tracing::debug;
use walkdir::WalkDir;

/// Directories pruned during discovery unless the caller supplies its own set.
pub const DEFAULT_EXCLUDED_DIRS: &[&str] = &[
    "node_modules",
    ".git",
    "dist",
    "build",
    ".next",
    "coverage",
    ".turbo",
];

/// Errors that can occur while reading or discovering files.
#[derive(Error, Debug)]
pub enum ReadError {
    #[error("Failed to read file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to walk directory {path}: {source}")]
    Walk {
        path: PathBuf,
        #[source]
        source: walkdir::Error,
    },
}

/// Result type for reader operations.
pub type ReadResult<T> = Result<T, ReadError>;

/// A single physical line of a file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SourceLine {
    /// Line content without the `\n` terminator.
    pub text: String,
    /// 1-based line number.
    pub line_number: usize,
}

impl SourceLine {
    pub fn new(text: impl Into<String>, line_number: usize) -> Self {
        Self {
            text: text.into(),
            line_number,
        }
    }
}

/// A file loaded as lines.
#[derive(Debug, Clone)]
pub struct SourceFile {
    pub path: PathBuf,
    pub lines: Vec<SourceLine>,
}

impl SourceFile {
    /// Re-joins the lines with `\n`, reproducing the original content.
    pub fn to_text(&self) -> String {
        join_lines(&self.lines)
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}

/// Language type for file discovery.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceLanguage {
    JavaScript,
    TypeScript,
    Tsx,
    Jsx,
}

impl SourceLanguage {
    /// Determine language from file extension.
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_lowercase().as_str() {
            "js" | "mjs" | "cjs" => Some(SourceLanguage::JavaScript),
            "jsx" => Some(SourceLanguage::Jsx),
            "ts" | "mts" | "cts" => Some(SourceLanguage::TypeScript),
            "tsx" => Some(SourceLanguage::Tsx),
            _ => None,
        }
    }

    /// Determine language from a path's extension.
    pub fn from_path(path: &Path) -> Option<Self> {
        path.extension()
            .and_then(|e| e.to_str())
            .and_then(Self::from_extension)
    }
}

/// Splits text on `\n` into numbered lines.
///
/// A `\r` before the terminator stays in the line text so that
/// [`join_lines`] is an exact inverse. Empty input yields no lines.
pub fn split_lines(content: &str) -> Vec<SourceLine> {
    if content.is_empty() {
        return Vec::new();
    }

    content
        .split('\n')
        .enumerate()
        .map(|(idx, text)| SourceLine::new(text, idx + 1))
        .collect()
}

/// Joins lines back together with `\n`.
pub fn join_lines(lines: &[SourceLine]) -> String {
    lines
        .iter()
        .map(|l| l.text.as_str())
        .collect::<Vec<_>>()
        .join("\n")
}

/// Reads a file into ordered lines.
///
/// Invalid UTF-8 sequences are replaced with U+FFFD.
pub fn read(path: &Path) -> ReadResult<SourceFile> {
    let bytes = fs::read(path).map_err(|source| ReadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let content = String::from_utf8_lossy(&bytes);

    Ok(SourceFile {
        path: path.to_path_buf(),
        lines: split_lines(&content),
    })
}

/// Recursively collects source files under `root`.
///
/// Directories whose name is in `exclude_dirs` are not descended into.
/// The root itself is never pruned. Results are sorted by path.
pub fn find<S: AsRef<str>>(root: &Path, exclude_dirs: &[S]) -> ReadResult<Vec<PathBuf>> {
    let mut files = Vec::new();

    let walker = WalkDir::new(root)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|e| e.depth() == 0 || !is_excluded_dir(e, exclude_dirs));

    for entry in walker {
        let entry = entry.map_err(|source| ReadError::Walk {
            path: root.to_path_buf(),
            source,
        })?;

        if !entry.file_type().is_file() {
            continue;
        }

        if SourceLanguage::from_path(entry.path()).is_none() {
            continue;
        }

        files.push(entry.into_path());
    }

    files.sort();
    debug!(root = %root.display(), count = files.len(), "discovered source files");

    Ok(files)
}

/// Check if a directory should be pruned during traversal.
fn is_excluded_dir<S: AsRef<str>>(entry: &walkdir::DirEntry, exclude_dirs: &[S]) -> bool {
    if !entry.file_type().is_dir() {
        return false;
    }

    let name = entry.file_name().to_string_lossy();
    exclude_dirs.iter().any(|d| d.as_ref() == name)
}
