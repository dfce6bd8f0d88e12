// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! Repository access, history walking and change-set extraction
//!
//! This module wraps a `git2::Repository` and exposes the three primitives the
//! timeline builder is made of: obtaining a repository, walking the current
//! branch, and listing the paths each commit touched.

use std::collections::BTreeSet;
use std::path::Path;

use git2::{DiffFindOptions, DiffOptions, ErrorCode, Oid, Repository, Revwalk, Sort, Tree};
use tracing::{debug, info};

use crate::commit::Commit;
use crate::error::GitError;

/// Direction in which history is walked
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum WalkOrder {
    /// Children before parents, most recent commit first
    NewestFirst,
    /// Parents before children, root commit first
    #[default]
    OldestFirst,
}

impl WalkOrder {
    fn sorting(self) -> Sort {
        match self {
            Self::NewestFirst => Sort::TOPOLOGICAL | Sort::TIME,
            Self::OldestFirst => Sort::TOPOLOGICAL | Sort::TIME | Sort::REVERSE,
        }
    }
}

/// A git repository wrapper used to derive file timelines
pub struct GitRepo {
    repo: Repository,
}

impl GitRepo {
    /// Clone `remote` into `local`, falling back to opening `local`
    ///
    /// Any clone failure (network error, target already populated, ...) is
    /// logged and followed by an attempt to open the existing copy.
    ///
    /// # Errors
    ///
    /// Returns `GitError::Unavailable` if both the clone and the open fail.
    pub fn acquire(remote: &str, local: impl AsRef<Path>) -> Result<Self, GitError> {
        let local = local.as_ref();

        match Repository::clone(remote, local) {
            Ok(repo) => {
                info!(remote = %remote, path = %local.display(), "Cloned repository");
                Ok(Self { repo })
            }
            Err(clone_err) => {
                debug!(error = %clone_err, "Clone failed, opening existing copy");
                let repo = Repository::open(local).map_err(|open_err| GitError::Unavailable {
                    path: local.display().to_string(),
                    clone: clone_err.message().to_string(),
                    open: open_err.message().to_string(),
                })?;
                info!(path = %local.display(), "Opened existing repository");
                Ok(Self { repo })
            }
        }
    }

    /// Open a git repository at the given path
    ///
    /// # Errors
    ///
    /// Returns `GitError::RepositoryNotFound` if the path is not a git repository.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, GitError> {
        let path = path.as_ref();
        let repo = Repository::open(path).map_err(|_| GitError::RepositoryNotFound {
            path: path.display().to_string(),
        })?;
        Ok(Self { repo })
    }

    /// Get the working directory path (None for bare repos)
    #[must_use]
    pub fn workdir(&self) -> Option<&Path> {
        self.repo.workdir()
    }

    /// Tip of the checked-out branch, or `None` if no branch is checked out
    ///
    /// Both a detached HEAD and an unborn branch count as "no branch".
    ///
    /// # Errors
    ///
    /// Returns `GitError` if HEAD exists but cannot be read.
    pub fn current_branch_tip(&self) -> Result<Option<Oid>, GitError> {
        let head = match self.repo.head() {
            Ok(head) => head,
            Err(e) if matches!(e.code(), ErrorCode::UnbornBranch | ErrorCode::NotFound) => {
                return Ok(None);
            }
            Err(e) => return Err(e.into()),
        };

        if !head.is_branch() {
            debug!("HEAD is detached, treating history as empty");
            return Ok(None);
        }

        Ok(head.target())
    }

    /// Walk the current branch in the given order
    ///
    /// The returned iterator is lazy and single-pass. It is empty when no
    /// branch is checked out.
    ///
    /// # Errors
    ///
    /// Returns `GitError` if the walk cannot be set up. Failures while
    /// walking are yielded as `Err` items.
    pub fn walk(&self, order: WalkOrder) -> Result<HistoryWalk<'_>, GitError> {
        let Some(tip) = self.current_branch_tip()? else {
            return Ok(HistoryWalk {
                repo: &self.repo,
                revwalk: None,
            });
        };

        let mut revwalk = self.repo.revwalk()?;
        revwalk.set_sorting(order.sorting())?;
        revwalk.push(tip)?;

        Ok(HistoryWalk {
            repo: &self.repo,
            revwalk: Some(revwalk),
        })
    }

    fn commit_tree(&self, sha: &str) -> Result<Tree<'_>, GitError> {
        Ok(self.repo.find_commit(parse_oid(sha)?)?.tree()?)
    }

    /// Paths touched by `commit` relative to its parents
    ///
    /// Root commits are diffed against the empty tree, merge commits against
    /// every parent. Each delta contributes its new-side path, or its old-side
    /// path when git reports no new side.
    ///
    /// # Errors
    ///
    /// Returns `GitError` if the commit's tree or one of its parents cannot
    /// be read.
    pub fn changed_paths(&self, commit: &Commit) -> Result<BTreeSet<String>, GitError> {
        let tree = self.repo.find_tree(parse_oid(&commit.tree)?)?;

        let parent_trees: Vec<Option<Tree<'_>>> = if commit.is_root() {
            vec![None]
        } else {
            commit
                .parents
                .iter()
                .map(|sha| self.commit_tree(sha).map(Some))
                .collect::<Result<_, _>>()?
        };

        let mut paths = BTreeSet::new();
        for parent_tree in &parent_trees {
            let mut opts = DiffOptions::new();
            opts.ignore_submodules(true);

            let mut diff =
                self.repo
                    .diff_tree_to_tree(parent_tree.as_ref(), Some(&tree), Some(&mut opts))?;

            let mut find = DiffFindOptions::new();
            find.renames(true);
            diff.find_similar(Some(&mut find))?;

            for delta in diff.deltas() {
                let path = delta.new_file().path().or_else(|| delta.old_file().path());
                if let Some(path) = path {
                    paths.insert(path.to_string_lossy().into_owned());
                }
            }
        }

        debug!(
            sha = %commit.short_sha(),
            subject = %commit.subject(),
            merge = commit.is_merge(),
            files = paths.len(),
            "Extracted change-set"
        );

        Ok(paths)
    }
}

fn parse_oid(sha: &str) -> Result<Oid, GitError> {
    Oid::from_str(sha).map_err(|_| GitError::InvalidObjectId {
        sha: sha.to_string(),
    })
}

/// Lazy walk over the current branch's history
pub struct HistoryWalk<'repo> {
    repo: &'repo Repository,
    revwalk: Option<Revwalk<'repo>>,
}

impl Iterator for HistoryWalk<'_> {
    type Item = Result<Commit, GitError>;

    fn next(&mut self) -> Option<Self::Item> {
        let oid = match self.revwalk.as_mut()?.next()? {
            Ok(oid) => oid,
            Err(e) => return Some(Err(e.into())),
        };

        Some(
            self.repo
                .find_commit(oid)
                .map_err(GitError::from)
                .and_then(|c| Commit::from_git2(&c)),
        )
    }
}
