// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! Error types for til-index-git

use thiserror::Error;

/// Errors that can occur during git operations
#[derive(Debug, Error)]
pub enum GitError {
    /// Error from git2 library
    #[error("Git error: {0}")]
    Git2(#[from] git2::Error),

    /// Neither a clone nor an existing repository could be obtained
    #[error("Repository unavailable at {path}: clone failed ({clone}), open failed ({open})")]
    Unavailable {
        /// The local path used as clone target and fallback
        path: String,
        /// Why the clone failed
        clone: String,
        /// Why opening the existing copy failed
        open: String,
    },

    /// Repository not found at the specified path
    #[error("Repository not found: {path}")]
    RepositoryNotFound {
        /// The path that was searched for a repository
        path: String,
    },

    /// A commit or tree id that does not parse as an object id
    #[error("Invalid object id: {sha}")]
    InvalidObjectId {
        /// The offending id string
        sha: String,
    },

    /// A commit time that cannot be represented as a UTC date
    #[error("Commit {sha} has an out-of-range timestamp: {seconds}")]
    InvalidTimestamp {
        /// The commit carrying the timestamp
        sha: String,
        /// Seconds since the Unix epoch, as stored in the commit
        seconds: i64,
    },
}
