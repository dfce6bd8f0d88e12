//! Commit snapshots produced by the history walker

use chrono::{DateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};

use crate::error::GitError;

/// A commit as seen by the timeline builder
///
/// This is an owned copy of the parts of a `git2::Commit` the rest of the
/// workspace needs, so it can outlive the repository borrow.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Commit {
    /// The commit SHA (40 hex characters)
    pub sha: String,
    /// SHA of the tree snapshot this commit points at
    pub tree: String,
    /// Commit message
    pub message: String,
    /// Commit timestamp
    pub timestamp: DateTime<Utc>,
    /// Parent commit SHAs, in parent order
    pub parents: Vec<String>,
}

impl Commit {
    /// Copy the relevant fields out of a git2 commit
    ///
    /// # Errors
    ///
    /// Returns `GitError::InvalidTimestamp` if the commit time is outside the
    /// range chrono can represent.
    pub fn from_git2(commit: &git2::Commit<'_>) -> Result<Self, GitError> {
        let sha = commit.id().to_string();
        let timestamp = timestamp_from_secs(&sha, commit.time().seconds())?;

        Ok(Self {
            sha,
            tree: commit.tree_id().to_string(),
            message: commit.message().unwrap_or("").to_string(),
            timestamp,
            parents: commit.parent_ids().map(|id| id.to_string()).collect(),
        })
    }

    /// Get the short SHA (first 7 characters)
    #[must_use]
    pub fn short_sha(&self) -> &str {
        &self.sha[..7.min(self.sha.len())]
    }

    /// Check if this is a merge commit (has multiple parents)
    #[must_use]
    pub fn is_merge(&self) -> bool {
        self.parents.len() > 1
    }

    /// Check if this is a root commit (has no parents)
    #[must_use]
    pub fn is_root(&self) -> bool {
        self.parents.is_empty()
    }

    /// Get the first line of the commit message (subject)
    #[must_use]
    pub fn subject(&self) -> &str {
        self.message.lines().next().unwrap_or("")
    }
}

fn timestamp_from_secs(sha: &str, seconds: i64) -> Result<DateTime<Utc>, GitError> {
    Utc.timestamp_opt(seconds, 0)
        .single()
        .ok_or_else(|| GitError::InvalidTimestamp {
            sha: sha.to_string(),
            seconds,
        })
}
