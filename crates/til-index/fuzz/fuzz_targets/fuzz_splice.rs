#![no_main]

//! Fuzz target for marker splicing
//!
//! Arbitrary README text must never panic the splicer, even when the byte
//! after an end marker starts a multi-byte character.

use libfuzzer_sys::fuzz_target;

use til_index::splice::{self, Markers};

fuzz_target!(|document: &str| {
    let markers = Markers::default();
    let fragment = markers.counter.wrap("1");

    if let Ok(out) = splice::splice(document, &markers.counter, &fragment) {
        assert!(splice::relocate(&out, &markers.counter).is_ok());
    }
    let _ = splice::splice(document, &markers.entries, "");
});
