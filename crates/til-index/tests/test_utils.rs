// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! Test utilities for til-index integration tests
//!
//! This module provides utilities for:
//! - Temporary directory management
//! - Git repository scaffolding with fixed commit dates
//! - README fixtures carrying the marker regions

#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU32, Ordering};

use chrono::{TimeZone, Utc};
use git2::{Oid, Repository, Signature, Time};

// ============================================================================
// Temporary Directory Management
// ============================================================================

/// Counter for generating unique test directory names
static TEST_DIR_COUNTER: AtomicU32 = AtomicU32::new(0);

/// A temporary directory that is automatically cleaned up when dropped
pub struct TempTestDir {
    path: PathBuf,
}

impl TempTestDir {
    /// Create a new, empty, uniquely named temporary directory
    pub fn new(test_name: &str) -> Self {
        let counter = TEST_DIR_COUNTER.fetch_add(1, Ordering::SeqCst);
        let dir_name = format!(
            "til-index-test-{}-{}-{}",
            test_name,
            std::process::id(),
            counter
        );
        let path = std::env::temp_dir().join(dir_name);
        let _ = fs::remove_dir_all(&path);
        fs::create_dir_all(&path).expect("Failed to create temp test directory");
        Self { path }
    }

    /// Get the path to the temporary directory
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Path of an entry inside the directory (not created)
    pub fn join(&self, relative_path: &str) -> PathBuf {
        self.path.join(relative_path)
    }

    /// Create a file within the temp directory with the given content
    pub fn create_file(&self, relative_path: &str, content: &str) -> PathBuf {
        let file_path = self.path.join(relative_path);
        if let Some(parent) = file_path.parent() {
            fs::create_dir_all(parent).expect("Failed to create parent directories");
        }
        fs::write(&file_path, content).expect("Failed to write file");
        file_path
    }

    /// Read a file from the temp directory
    pub fn read_file(&self, relative_path: &str) -> String {
        fs::read_to_string(self.path.join(relative_path)).expect("Failed to read file")
    }
}

impl Drop for TempTestDir {
    fn drop(&mut self) {
        if self.path.exists() {
            let _ = fs::remove_dir_all(&self.path);
        }
    }
}

// ============================================================================
// Git Repository Scaffolding
// ============================================================================

/// Unix seconds for midnight UTC on the given day
pub fn unix_day(y: i32, m: u32, d: u32) -> i64 {
    Utc.with_ymd_and_hms(y, m, d, 0, 0, 0).unwrap().timestamp()
}

/// A temporary git repository whose commits carry chosen dates
pub struct TestGitRepo {
    temp_dir: TempTestDir,
    repo: Repository,
}

impl TestGitRepo {
    /// Create and initialize a new test git repository
    pub fn new(test_name: &str) -> Self {
        let temp_dir = TempTestDir::new(test_name);
        let repo = Repository::init(temp_dir.path()).expect("Failed to init repository");
        Self { temp_dir, repo }
    }

    /// Get the path to the repository
    pub fn path(&self) -> &Path {
        self.temp_dir.path()
    }

    /// Write a file and stage it
    pub fn create_file(&self, relative_path: &str, content: &str) -> &Self {
        self.temp_dir.create_file(relative_path, content);
        let mut index = self.repo.index().expect("Failed to open index");
        index
            .add_path(Path::new(relative_path))
            .expect("Failed to stage file");
        index.write().expect("Failed to write index");
        self
    }

    /// Commit the index at the given unix time
    pub fn commit_at(&self, message: &str, secs: i64) -> Oid {
        let mut index = self.repo.index().expect("Failed to open index");
        let tree_id = index.write_tree().expect("Failed to write tree");
        let tree = self.repo.find_tree(tree_id).expect("Failed to find tree");
        let sig = Signature::new("Test Author", "test@example.com", &Time::new(secs, 0))
            .expect("Failed to build signature");

        let parent = self.repo.head().ok().and_then(|h| h.peel_to_commit().ok());
        let parents: Vec<&git2::Commit<'_>> = parent.iter().collect();

        self.repo
            .commit(Some("HEAD"), &sig, &sig, message, &tree, &parents)
            .expect("Failed to commit")
    }

    /// Create a file and commit it at the given unix time
    pub fn create_and_commit(&self, relative_path: &str, content: &str, secs: i64) -> Oid {
        self.create_file(relative_path, content);
        self.commit_at(relative_path, secs)
    }

    /// Detach HEAD at the current commit
    pub fn detach_head(&self) {
        let oid = self
            .repo
            .head()
            .ok()
            .and_then(|h| h.target())
            .expect("HEAD has a target");
        self.repo.set_head_detached(oid).expect("Failed to detach HEAD");
    }
}

/// The repository from the two-topic scenario
///
/// `topics/a.md` is created on 2021-01-01 and edited on 2021-06-01;
/// `topics/b.md` is created on 2021-03-01.
pub fn topics_repo(test_name: &str) -> TestGitRepo {
    let repo = TestGitRepo::new(test_name);
    repo.create_and_commit("topics/a.md", "# A\n\nFirst.\n", unix_day(2021, 1, 1));
    repo.create_and_commit("topics/b.md", "# B\n\nSecond.\n", unix_day(2021, 3, 1));
    repo.create_and_commit("topics/a.md", "# A\n\nFirst, edited.\n", unix_day(2021, 6, 1));
    repo
}

// ============================================================================
// README Fixtures
// ============================================================================

/// A README with both marker regions holding stale content
pub const SAMPLE_README: &str = concat!(
    "# TIL\n\n",
    "<!-- counter start -->0<!-- counter end -->\n\n",
    "<!-- entries start -->\nstale\n<!-- entries end -->\n\n",
    "Footer.\n",
);

// ============================================================================
// Environment Isolation
// ============================================================================

/// Temporarily set an environment variable for a test
///
/// The original value is restored when the guard is dropped.
pub struct EnvGuard {
    key: String,
    original: Option<String>,
}

impl EnvGuard {
    /// Set an environment variable, returning a guard that restores it on drop
    pub fn set(key: &str, value: &str) -> Self {
        let original = std::env::var(key).ok();
        // SAFETY: test code owns these variables and no other thread reads them
        unsafe { std::env::set_var(key, value) };
        Self {
            key: key.to_string(),
            original,
        }
    }
}

impl Drop for EnvGuard {
    fn drop(&mut self) {
        // SAFETY: test code owns these variables and no other thread reads them
        unsafe {
            match &self.original {
                Some(val) => std::env::set_var(&self.key, val),
                None => std::env::remove_var(&self.key),
            }
        }
    }
}

// ============================================================================
// Unit Tests for Utilities
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_utils_temp_dir_cleanup() {
        let path;
        {
            let temp = TempTestDir::new("test_cleanup");
            path = temp.path().to_path_buf();
            assert!(path.exists());
        }
        assert!(!path.exists());
    }

    #[test]
    fn test_utils_topics_repo_has_history() {
        let repo = topics_repo("utils_history");
        assert!(repo.path().join(".git").exists());
        assert!(repo.path().join("topics/a.md").exists());
    }
}
