//! Takeout Parser - Turn Google Takeout exports into a typed event stream
//!
//! This library parses the directory tree of an unpacked Google Takeout
//! export into strongly typed events. It supports:
//!
//! - Locale-aware routing of export paths to the right decoder
//! - JSON, HTML and CSV decoders for activity, location, Chrome, YouTube,
//!   Play Store and Keep data
//! - Per-record error values so one bad record never loses a file
//! - A file-identity cache that skips re-decoding unchanged files
//! - Merging overlapping exports into one deduplicated timeline
//!
//! # Example
//!
//! ```no_run
//! use takeout_parser::TakeoutParser;
//! use std::path::PathBuf;
//!
//! let parser = TakeoutParser::new(PathBuf::from("/home/alice/Takeout"));
//! let results = parser.parse()?;
//! println!("Parsed {} results", results.len());
//! # Ok::<(), anyhow::Error>(())
//! ```

pub mod cache;
pub mod cli;
pub mod dispatch;
pub mod merge;
pub mod models;
pub mod parsers;

// Re-export commonly used types
pub use cache::ParseCache;
pub use dispatch::{LocaleTable, TakeoutParser};
pub use merge::{DedupPolicy, merge_events};
pub use models::{DecodeError, Event, EventKey, EventKind, ParseResult};
