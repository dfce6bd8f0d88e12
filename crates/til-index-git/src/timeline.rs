// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! Per-file timelines folded from commit history
//!
//! A [`FileTimeline`] maps every path that ever appeared in a change-set to a
//! [`TimelineRecord`]. The first commit that touches a path sets `created`;
//! each later one overwrites `updated`. What "first" means depends on the
//! [`WalkOrder`] the commits were folded in: with [`WalkOrder::OldestFirst`]
//! `created` is the earliest touch and `updated` the latest, while folding
//! [`WalkOrder::NewestFirst`] yields the opposite assignment.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::error::GitError;
use crate::repo::{GitRepo, WalkOrder};

/// First and last sighting of a single path
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimelineRecord {
    /// Timestamp of the first folded commit touching the path
    pub created: DateTime<Utc>,
    /// Timestamp of the most recently folded later commit, if any
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated: Option<DateTime<Utc>>,
}

/// Path to timeline record mapping built from one history walk
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileTimeline {
    records: BTreeMap<String, TimelineRecord>,
    commits: usize,
}

impl FileTimeline {
    /// Create an empty timeline
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Walk the current branch of `repo` and fold every change-set
    ///
    /// # Errors
    ///
    /// Returns `GitError` on the first traversal or diff failure.
    pub fn from_history(repo: &GitRepo, order: WalkOrder) -> Result<Self, GitError> {
        let mut timeline = Self::new();

        for commit in repo.walk(order)? {
            let commit = commit?;
            let paths = repo.changed_paths(&commit)?;
            timeline.record(commit.timestamp, paths);
        }

        info!(
            commits = timeline.commits,
            paths = timeline.len(),
            order = ?order,
            "Built file timeline"
        );

        Ok(timeline)
    }

    /// Fold one commit's change-set into the timeline
    pub fn record<I, S>(&mut self, timestamp: DateTime<Utc>, paths: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.commits += 1;

        for path in paths {
            let path = path.into();
            match self.records.get_mut(&path) {
                Some(record) => record.updated = Some(timestamp),
                None => {
                    debug!(path = %path, created = %timestamp, "New path in history");
                    self.records.insert(
                        path,
                        TimelineRecord {
                            created: timestamp,
                            updated: None,
                        },
                    );
                }
            }
        }
    }

    /// Look up the record for a repository-relative path
    #[must_use]
    pub fn get(&self, path: &str) -> Option<&TimelineRecord> {
        self.records.get(path)
    }

    /// Number of tracked paths
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether no path has been recorded
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Number of commits folded so far
    #[must_use]
    pub fn commits(&self) -> usize {
        self.commits
    }

    /// Iterate records in path order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &TimelineRecord)> {
        self.records.iter().map(|(path, record)| (path.as_str(), record))
    }
}
