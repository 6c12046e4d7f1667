//! utilkit documentation engine
//!
//! Extracts documentation for the exported functions, constants and types of a
//! TypeScript utility library from its `/** */` doc comments, and produces the
//! JSON artifact the documentation site renders.
//!
//! # Architecture
//!
//! - `scan`: finding exported declarations (two interchangeable strategies)
//! - `jsdoc`: parsing doc comment text and tags
//! - `assemble`: merging signatures with doc tags into records
//! - `extract`: walking the project and running the pipeline concurrently
//! - `model`: the records and the `DocsData` aggregate
//! - `cache`: an injectable holder for a loaded snapshot

pub mod artifact;
pub mod assemble;
pub mod cache;
pub mod category;
pub mod config;
pub mod error;
pub mod extract;
pub mod jsdoc;
pub mod manifest;
pub mod model;
pub mod scan;

pub use cache::DocsCache;
pub use config::DocgenConfig;
pub use error::{DocsError, Result};
pub use extract::DocExtractor;
pub use model::*;
pub use scan::{RegexScanner, ScanStrategy, SourceScanner, SyntaxScanner};
