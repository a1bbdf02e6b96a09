//! Durable per-file decode-result cache.
//!
//! Keyed by file identity (canonical path, size, mtime): unchanged files are
//! never re-decoded across runs. Each entry uses a two-file layout:
//!
//! - `<hash>.json`: JSON metadata (cache version + file identity)
//! - `<hash>.bin`: bincode-serialized decode results
//!
//! Entries are replaced wholesale, never patched. Cache IO failures degrade
//! to direct computation with a warning; they never fail a parse.
//!
//! Cache location: platform cache directory
//! (e.g. `~/.cache/takeout-parser/` on Linux).

pub mod metadata;
pub mod persistence;

pub use metadata::{CACHE_VERSION, EntryMetadata, FileIdentity};
pub use persistence::{ParseCache, StoredResult};
