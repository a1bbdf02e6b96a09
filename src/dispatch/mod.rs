//! Locale-aware path dispatch.
//!
//! Maps every file inside a bundle root to the decoder that understands it,
//! regardless of the locale the bundle's directories are named in. Files
//! with no matching rule are silently skipped; bundles are full of images
//! and other files this pipeline does not care about.

pub mod locales;

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing::{debug, warn};
use walkdir::WalkDir;

use crate::cache::ParseCache;
use crate::models::ParseResult;
use crate::parsers;
pub use locales::{AmbiguousDispatch, LocaleTable, ProductArea};

/// One concrete decoder routine, selected per file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileHandler {
    ActivityJson,
    ActivityHtml,
    LocationJson,
    SemanticLocationJson,
    ChromeJson,
    LikesJson,
    AppInstallsJson,
    KeepJson,
    YoutubeCommentsCsv,
    YoutubeLiveChatsCsv,
}

impl FileHandler {
    /// Run the decoder over one file.
    pub fn decode(self, path: &Path) -> Vec<ParseResult> {
        match self {
            FileHandler::ActivityJson => parsers::parse_activity_json(path),
            FileHandler::ActivityHtml => parsers::parse_activity_html(path),
            FileHandler::LocationJson => parsers::parse_location_json(path),
            FileHandler::SemanticLocationJson => parsers::parse_semantic_location_json(path),
            FileHandler::ChromeJson => parsers::parse_chrome_json(path),
            FileHandler::LikesJson => parsers::parse_likes_json(path),
            FileHandler::AppInstallsJson => parsers::parse_app_installs_json(path),
            FileHandler::KeepJson => parsers::parse_keep_json(path),
            FileHandler::YoutubeCommentsCsv => parsers::parse_youtube_comments_csv(path),
            FileHandler::YoutubeLiveChatsCsv => parsers::parse_youtube_live_chats_csv(path),
        }
    }
}

fn extension(file_name: &str) -> Option<&str> {
    file_name.rsplit_once('.').map(|(_, ext)| ext)
}

/// Pick the decoder for a file inside a matched area. `tail` holds the path
/// segments below the area directory, ending with the file name.
fn handler_for(area: ProductArea, tail: &[&str]) -> Option<FileHandler> {
    let file_name = *tail.last()?;
    match area {
        ProductArea::Chrome => {
            (file_name == "BrowserHistory.json").then_some(FileHandler::ChromeJson)
        }
        ProductArea::LocationHistory => {
            if tail.contains(&"Semantic Location History") {
                (extension(file_name) == Some("json")).then_some(FileHandler::SemanticLocationJson)
            } else if file_name == "Records.json" || file_name == "Location History.json" {
                Some(FileHandler::LocationJson)
            } else {
                // Settings.json, Timeline Edits.json and friends
                None
            }
        }
        ProductArea::MyActivity => match extension(file_name) {
            Some("json") => Some(FileHandler::ActivityJson),
            Some("html") => Some(FileHandler::ActivityHtml),
            _ => None,
        },
        ProductArea::YouTube => {
            // watch-history / search-history share the My Activity shape
            if file_name.ends_with("-history.json") {
                Some(FileHandler::ActivityJson)
            } else if file_name.ends_with("-history.html") {
                Some(FileHandler::ActivityHtml)
            } else if file_name == "likes.json" {
                Some(FileHandler::LikesJson)
            } else if file_name == "comments.csv" {
                Some(FileHandler::YoutubeCommentsCsv)
            } else if file_name == "live chats.csv" {
                Some(FileHandler::YoutubeLiveChatsCsv)
            } else {
                None
            }
        }
        ProductArea::PlayStore => {
            (file_name == "Installs.json").then_some(FileHandler::AppInstallsJson)
        }
        ProductArea::Keep => (extension(file_name) == Some("json")).then_some(FileHandler::KeepJson),
    }
}

/// Walks one bundle root, classifies every file and decodes the matches,
/// optionally through a [`ParseCache`].
pub struct TakeoutParser {
    root: PathBuf,
    table: LocaleTable,
    cache: Option<ParseCache>,
}

impl TakeoutParser {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        TakeoutParser { root: root.into(), table: LocaleTable::new(), cache: None }
    }

    /// Route all per-file decoding through a durable cache.
    pub fn with_cache(mut self, cache: ParseCache) -> Self {
        self.cache = Some(cache);
        self
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Map a path (relative to the bundle root) to its decoder.
    ///
    /// `Ok(None)` means "not ours": an expected, non-exceptional skip.
    /// Ambiguity is a table bug and comes back as an error.
    pub fn classify(&self, relative: &Path) -> Result<Option<FileHandler>, AmbiguousDispatch> {
        let Some(segments) = relative
            .components()
            .map(|c| c.as_os_str().to_str())
            .collect::<Option<Vec<&str>>>()
        else {
            // non-UTF-8 names never belong to a known area
            return Ok(None);
        };
        let Some((area, idx)) = self.table.classify_segments(&segments)? else {
            return Ok(None);
        };
        Ok(handler_for(area, &segments[idx + 1..]))
    }

    /// Parse the whole bundle into one result sequence.
    ///
    /// Walk order is sorted by file name, so two runs over the same bundle
    /// produce identical sequences. A dispatch ambiguity aborts; everything
    /// else degrades per file or per record.
    pub fn parse(&self) -> Result<Vec<ParseResult>> {
        let mut out = Vec::new();
        for entry in WalkDir::new(&self.root).sort_by_file_name() {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    warn!("skipping unreadable bundle entry: {e}");
                    continue;
                }
            };
            if !entry.file_type().is_file() {
                continue;
            }
            let relative = entry.path().strip_prefix(&self.root).unwrap_or(entry.path());
            let handler = self
                .classify(relative)
                .with_context(|| format!("dispatching '{}'", relative.display()))?;
            let Some(handler) = handler else {
                continue;
            };
            debug!(file = %relative.display(), ?handler, "decoding bundle file");
            let results = match &self.cache {
                Some(cache) => cache.get_or_compute(entry.path(), || handler.decode(entry.path())),
                None => handler.decode(entry.path()),
            };
            out.extend(results);
        }
        Ok(out)
    }
}
