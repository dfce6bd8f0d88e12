// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! Entry assembly and rendering
//!
//! Joins scanned documents with their file timelines, orders them by creation
//! date, groups them by subject, and renders the counter and listing
//! fragments.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use til_index_git::FileTimeline;

use crate::scan::DocumentMeta;
use crate::splice::Markers;

/// A document with its timeline dates attached
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entry {
    /// Grouping key (first path segment)
    pub subject: String,
    /// Level-1 heading text
    pub title: String,
    /// Canonical web link
    pub url: String,
    /// Repository-relative path
    pub path: String,
    /// Creation date from history, if the path was ever committed
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created: Option<DateTime<Utc>>,
    /// Last update date from history, if touched more than once
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated: Option<DateTime<Utc>>,
}

impl Entry {
    /// Combine a scanned document with its timeline record, if any
    #[must_use]
    pub fn new(document: DocumentMeta, timeline: &FileTimeline) -> Self {
        let record = timeline.get(&document.path);
        Self {
            subject: document.subject,
            title: document.title,
            url: document.url,
            path: document.path,
            created: record.map(|r| r.created),
            updated: record.and_then(|r| r.updated),
        }
    }

    /// `* [title](url) - YYYY-MM-DD`, with an empty date when unknown
    #[must_use]
    pub fn bullet(&self) -> String {
        let date = self
            .created
            .map(|d| d.format("%Y-%m-%d").to_string())
            .unwrap_or_default();
        format!("* [{}]({}) - {}", self.title, self.url, date)
    }
}

/// Merge documents with the timeline and sort by creation date
///
/// The sort is stable. Entries without a creation date come first, in scan
/// order.
#[must_use]
pub fn assemble(timeline: &FileTimeline, documents: Vec<DocumentMeta>) -> Vec<Entry> {
    let mut entries: Vec<Entry> = documents
        .into_iter()
        .map(|doc| Entry::new(doc, timeline))
        .collect();
    entries.sort_by_key(|entry| entry.created);
    entries
}

/// Partition entries by subject, in first-seen subject order
#[must_use]
pub fn group(entries: &[Entry]) -> Vec<(&str, Vec<&Entry>)> {
    let mut buckets: Vec<(&str, Vec<&Entry>)> = Vec::new();
    let mut index: HashMap<&str, usize> = HashMap::new();

    for entry in entries {
        let slot = *index.entry(entry.subject.as_str()).or_insert_with(|| {
            buckets.push((entry.subject.as_str(), Vec::new()));
            buckets.len() - 1
        });
        buckets[slot].1.push(entry);
    }

    buckets
}

/// The two README fragments produced from a set of entries
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rendered {
    /// Marker-wrapped entry count
    pub counter: String,
    /// Marker-wrapped grouped listing
    pub entries: String,
}

/// Render the counter and listing fragments
#[must_use]
pub fn render(entries: &[Entry], markers: &Markers) -> Rendered {
    let counter = markers.counter.wrap(&entries.len().to_string());

    let mut lines = vec![markers.entries.start.clone()];
    for (subject, bucket) in group(entries) {
        lines.push(format!("## {subject}\n"));
        lines.extend(bucket.iter().map(|entry| entry.bullet()));
    }
    lines.push(markers.entries.end.clone());

    Rendered {
        counter,
        entries: lines.join("\n"),
    }
}
