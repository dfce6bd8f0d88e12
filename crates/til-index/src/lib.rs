//! til-index library
//!
//! This module exports the README regeneration pipeline for use in
//! integration tests and as a library.

pub mod config;
pub mod entry;
pub mod run;
pub mod scan;
pub mod splice;
