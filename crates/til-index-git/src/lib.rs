// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! til-index-git: commit history processing for til-index
//!
//! This library crate walks a repository's current branch and folds each
//! commit's change-set into per-file created/updated timestamps.

#![warn(missing_docs)]

//! # Example
//!
//! ```no_run
//! use til_index_git::{FileTimeline, GitRepo, WalkOrder};
//!
//! let repo = GitRepo::acquire("https://github.com/santiagoballadares/til", "tmp")
//!     .expect("clone or open");
//! let timeline = FileTimeline::from_history(&repo, WalkOrder::OldestFirst)
//!     .expect("walk history");
//!
//! for (path, record) in timeline.iter() {
//!     println!("{path} created {}", record.created);
//! }
//! ```

pub mod commit;
pub mod error;
pub mod repo;
pub mod timeline;

pub use commit::Commit;
pub use error::GitError;
pub use repo::{GitRepo, HistoryWalk, WalkOrder};
pub use timeline::{FileTimeline, TimelineRecord};

