// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! Markdown document discovery
//!
//! Finds every `*.md` file below the scan root that lives in at least one
//! subdirectory, then reads them all concurrently to pull out their titles.

use std::path::{Path, PathBuf};

use globset::{Glob, GlobMatcher};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tokio::task::JoinSet;
use tracing::{debug, info, warn};
use walkdir::{DirEntry, WalkDir};

/// Pattern every entry document must match
pub const MARKDOWN_GLOB: &str = "**/*.md";

/// Errors raised while scanning documents
#[derive(Debug, Error)]
pub enum ScanError {
    /// Directory traversal failed
    #[error("Walk error: {0}")]
    Walk(#[from] walkdir::Error),

    /// The document pattern did not compile
    #[error("Glob error: {0}")]
    Glob(#[from] globset::Error),

    /// A document could not be read
    #[error("Failed to read {path}: {source}")]
    Read {
        /// Path of the unreadable document
        path: PathBuf,
        /// Underlying I/O error
        source: std::io::Error,
    },

    /// A read task panicked or was cancelled
    #[error("Read task failed: {0}")]
    Join(#[from] tokio::task::JoinError),
}

/// Builds `<base>/blob/<branch>/<path>` links
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UrlTemplate {
    base: String,
    branch: String,
}

impl UrlTemplate {
    /// Create a template from a web address and a branch name
    #[must_use]
    pub fn new(base: impl Into<String>, branch: impl Into<String>) -> Self {
        Self {
            base: base.into(),
            branch: branch.into(),
        }
    }

    /// Link for a repository-relative path
    #[must_use]
    pub fn url_for(&self, path: &str) -> String {
        format!("{}/blob/{}/{}", self.base, self.branch, path)
    }
}

/// One markdown document found by the scanner
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentMeta {
    /// Repository-relative path, `/`-separated
    pub path: String,
    /// First path segment
    pub subject: String,
    /// Level-1 heading text, empty if the document has none
    pub title: String,
    /// Canonical web link
    pub url: String,
}

impl DocumentMeta {
    /// Build the record for `path` from the document's content
    #[must_use]
    pub fn from_content(path: &str, content: &str, urls: &UrlTemplate) -> Self {
        Self {
            path: path.to_string(),
            subject: subject_of(path).to_string(),
            title: extract_title(content),
            url: urls.url_for(path),
        }
    }
}

/// First segment of a `/`-separated path
#[must_use]
pub fn subject_of(path: &str) -> &str {
    path.split('/').next().unwrap_or("")
}

/// Text of the first `# ` heading, or an empty string
#[must_use]
pub fn extract_title(content: &str) -> String {
    content
        .lines()
        .find_map(|line| line.strip_prefix("# "))
        .map(|title| title.trim().to_string())
        .unwrap_or_default()
}

fn is_hidden(entry: &DirEntry) -> bool {
    entry.depth() > 0 && entry.file_name().to_string_lossy().starts_with('.')
}

fn relative_path(root: &Path, path: &Path) -> String {
    let relative = path.strip_prefix(root).unwrap_or(path);
    relative
        .components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}

/// List the relative paths of all entry documents under `root`, sorted
///
/// Hidden files and directories are skipped, as are documents directly in
/// `root`. A missing root yields no documents.
///
/// # Errors
///
/// Returns `ScanError` if the directory tree cannot be walked.
pub fn discover(root: &Path) -> Result<Vec<String>, ScanError> {
    if !root.is_dir() {
        warn!(root = %root.display(), "Scan root missing, no documents");
        return Ok(Vec::new());
    }

    let matcher: GlobMatcher = Glob::new(MARKDOWN_GLOB)?.compile_matcher();
    let mut paths = Vec::new();

    for entry in WalkDir::new(root).into_iter().filter_entry(|e| !is_hidden(e)) {
        let entry = entry?;
        if !entry.file_type().is_file() {
            continue;
        }

        let rel = relative_path(root, entry.path());
        if !rel.contains('/') || !matcher.is_match(&rel) {
            continue;
        }
        paths.push(rel);
    }

    paths.sort();
    debug!(count = paths.len(), "Discovered markdown documents");
    Ok(paths)
}

/// Discover and read every entry document under `root`
///
/// All reads are started at once; the scan completes when each has finished,
/// or fails on the first read error.
///
/// # Errors
///
/// Returns `ScanError` on traversal failure or the first unreadable document.
pub async fn scan(root: &Path, urls: &UrlTemplate) -> Result<Vec<DocumentMeta>, ScanError> {
    let walk_root = root.to_path_buf();
    let paths = tokio::task::spawn_blocking(move || discover(&walk_root)).await??;

    let mut reads = JoinSet::new();
    for (index, rel) in paths.into_iter().enumerate() {
        let full = root.join(&rel);
        reads.spawn(async move {
            match tokio::fs::read(&full).await {
                Ok(bytes) => Ok((index, rel, String::from_utf8_lossy(&bytes).into_owned())),
                Err(source) => Err(ScanError::Read { path: full, source }),
            }
        });
    }

    let mut contents = Vec::with_capacity(reads.len());
    while let Some(joined) = reads.join_next().await {
        contents.push(joined??);
    }
    contents.sort_by_key(|(index, _, _)| *index);

    let documents: Vec<DocumentMeta> = contents
        .iter()
        .map(|(_, rel, content)| DocumentMeta::from_content(rel, content, urls))
        .collect();

    info!(root = %root.display(), documents = documents.len(), "Scanned documents");
    Ok(documents)
}
