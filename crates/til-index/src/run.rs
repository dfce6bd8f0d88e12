// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! README regeneration pipeline
//!
//! This module ties the pieces together: acquire the repository and fold its
//! history, scan the markdown entries, render both fragments, and splice them
//! into the README.
//!
//! # Example
//!
//! ```no_run
//! use til_index::config::Config;
//! use til_index::run::Generator;
//!
//! # async fn example() -> Result<(), til_index::run::RunError> {
//! let config = Config {
//!     remote: Some("https://github.com/santiagoballadares/til".to_string()),
//!     ..Default::default()
//! };
//! let report = Generator::new(config).run().await?;
//! println!("{} entries", report.stats.entries);
//! # Ok(())
//! # }
//! ```

use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use til_index_git::{FileTimeline, GitError, GitRepo, WalkOrder};
use tracing::{info, warn};

use crate::config::Config;
use crate::entry::{self, Entry, Rendered};
use crate::scan::{self, ScanError};
use crate::splice::{self, Markers, SpliceError};

// ============================================================================
// Error Types
// ============================================================================

/// Errors that abort a run before anything is written
#[derive(Debug, Error)]
pub enum RunError {
    /// History traversal or diff failure
    #[error("Git error: {0}")]
    Git(#[from] GitError),

    /// Document discovery or read failure
    #[error("Scan error: {0}")]
    Scan(#[from] ScanError),

    /// README markers could not be located
    #[error("Splice error: {0}")]
    Splice(#[from] SpliceError),

    /// README could not be read or written
    #[error("Failed to access {path}: {source}")]
    Io {
        /// The README path
        path: PathBuf,
        /// Underlying I/O error
        source: std::io::Error,
    },

    /// The history worker panicked
    #[error("History task failed: {0}")]
    Join(#[from] tokio::task::JoinError),
}

// ============================================================================
// Statistics
// ============================================================================

/// Counts collected over one run
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunStats {
    /// Commits folded into the timeline
    pub commits: usize,
    /// Distinct paths seen in history
    pub paths: usize,
    /// Markdown documents scanned
    pub documents: usize,
    /// Entries rendered
    pub entries: usize,
    /// Distinct subjects rendered
    pub subjects: usize,
    /// Whether the README was written
    pub written: bool,
}

/// Result of a successful run
#[derive(Debug, Clone)]
pub struct RunReport {
    /// Counts for this run
    pub stats: RunStats,
    /// The regenerated README text
    pub document: String,
}

// ============================================================================
// Generator
// ============================================================================

/// Regenerates a README from an explicit configuration
pub struct Generator {
    config: Config,
    markers: Markers,
    order: WalkOrder,
}

impl Generator {
    /// Create a generator with the default markers and oldest-first history
    #[must_use]
    pub fn new(config: Config) -> Self {
        Self {
            config,
            markers: Markers::default(),
            order: WalkOrder::OldestFirst,
        }
    }

    /// Use custom marker tokens
    #[must_use]
    pub fn with_markers(mut self, markers: Markers) -> Self {
        self.markers = markers;
        self
    }

    /// Fold history in a different order
    #[must_use]
    pub fn with_order(mut self, order: WalkOrder) -> Self {
        self.order = order;
        self
    }

    /// Acquire the repository and fold its history
    ///
    /// Returns `None` when the repository is unavailable; the run then treats
    /// it as empty.
    ///
    /// # Errors
    ///
    /// Returns `RunError` on traversal or diff failure.
    pub async fn build_timeline(&self) -> Result<Option<FileTimeline>, RunError> {
        let remote = self.config.remote_url().map(str::to_string);
        let clone_dir = self.config.clone_dir_path();
        let order = self.order;

        let timeline = tokio::task::spawn_blocking(move || {
            let repo = match remote {
                Some(remote) => GitRepo::acquire(&remote, &clone_dir),
                None => GitRepo::open(&clone_dir),
            };
            match repo {
                Ok(repo) => FileTimeline::from_history(&repo, order).map(Some),
                Err(e) => {
                    warn!(error = %e, "Repository unavailable, rendering no entries");
                    Ok(None)
                }
            }
        })
        .await??;

        Ok(timeline)
    }

    /// Splice freshly rendered fragments into `readme`
    ///
    /// # Errors
    ///
    /// Returns `SpliceError` if either region's markers cannot be located.
    pub fn regenerate(&self, readme: &str, rendered: &Rendered) -> Result<String, SpliceError> {
        let document = splice::splice(readme, &self.markers.counter, &rendered.counter)?;
        splice::splice(&document, &self.markers.entries, &rendered.entries)
    }

    /// Run the whole pipeline and write the README unless in dry-run mode
    ///
    /// Nothing is written unless every step succeeds.
    ///
    /// # Errors
    ///
    /// Returns `RunError` if any step fails.
    pub async fn run(&self) -> Result<RunReport, RunError> {
        let urls = self.config.url_template();
        let readme_path = self.config.readme_path();
        let clone_dir = self.config.clone_dir_path();

        info!(readme = %readme_path.display(), clone_dir = %clone_dir.display(), "Starting run");

        let readme = tokio::fs::read_to_string(&readme_path)
            .await
            .map_err(|source| RunError::Io {
                path: readme_path.clone(),
                source,
            })?;

        let (timeline, documents) = match self.build_timeline().await? {
            Some(timeline) => {
                let documents = scan::scan(&clone_dir, &urls).await?;
                (timeline, documents)
            }
            None => (FileTimeline::new(), Vec::new()),
        };
        let document_count = documents.len();

        let entries: Vec<Entry> = entry::assemble(&timeline, documents);
        let rendered = entry::render(&entries, &self.markers);
        let document = self.regenerate(&readme, &rendered)?;

        let mut stats = RunStats {
            commits: timeline.commits(),
            paths: timeline.len(),
            documents: document_count,
            entries: entries.len(),
            subjects: entry::group(&entries).len(),
            written: false,
        };

        if !self.config.dry_run {
            tokio::fs::write(&readme_path, &document)
                .await
                .map_err(|source| RunError::Io {
                    path: readme_path.clone(),
                    source,
                })?;
            stats.written = true;
        }

        info!(
            commits = stats.commits,
            entries = stats.entries,
            subjects = stats.subjects,
            written = stats.written,
            "Run complete"
        );

        Ok(RunReport { stats, document })
    }
}
