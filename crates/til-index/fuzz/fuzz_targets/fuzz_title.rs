#![no_main]

//! Fuzz target for title extraction
//!
//! Every scanned document goes through title extraction, so it must never
//! panic on arbitrary content.

use libfuzzer_sys::fuzz_target;

use til_index::scan::extract_title;

fuzz_target!(|content: &str| {
    let title = extract_title(content);
    assert_eq!(title, title.trim());
});
