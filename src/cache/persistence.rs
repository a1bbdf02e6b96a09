//! Cache persistence: entry load/store with atomic writes.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use bincode::config;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use super::metadata::{CACHE_VERSION, EntryMetadata, FileIdentity};
use crate::models::{DecodeError, Event, ParseResult};

/// Serializable form of one decode result. `Result` itself does not
/// round-trip serde, so entries are stored through this wrapper.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum StoredResult {
    Event(Event),
    Error(DecodeError),
}

impl From<ParseResult> for StoredResult {
    fn from(result: ParseResult) -> Self {
        match result {
            Ok(event) => StoredResult::Event(event),
            Err(error) => StoredResult::Error(error),
        }
    }
}

impl From<StoredResult> for ParseResult {
    fn from(stored: StoredResult) -> Self {
        match stored {
            StoredResult::Event(event) => Ok(event),
            StoredResult::Error(error) => Err(error),
        }
    }
}

/// Hash of the canonical source path, used as the entry file name.
/// First 12 hex characters are plenty for per-user cache isolation.
fn entry_key(path: &Path) -> String {
    use std::collections::hash_map::DefaultHasher;
    use std::hash::{Hash, Hasher};

    let mut hasher = DefaultHasher::new();
    path.hash(&mut hasher);
    format!("{:016x}", hasher.finish())[..12].to_string()
}

/// Durable store of per-file decode results.
pub struct ParseCache {
    dir: PathBuf,
}

impl ParseCache {
    /// Open the cache at the platform default location.
    pub fn open() -> Result<Self> {
        let base = dirs::cache_dir().context("failed to resolve platform cache directory")?;
        Self::at(base.join("takeout-parser"))
    }

    /// Open the cache rooted at an explicit directory.
    pub fn at(dir: impl Into<PathBuf>) -> Result<Self> {
        let dir = dir.into();
        if !dir.exists() {
            fs::create_dir_all(&dir)
                .with_context(|| format!("failed to create cache directory {}", dir.display()))?;
        }
        Ok(ParseCache { dir })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Return the cached results for `path` if its identity is unchanged,
    /// otherwise run `compute`, replace the entry wholesale and return the
    /// fresh results.
    ///
    /// Cache IO failures fall back to direct computation with a warning;
    /// they are never surfaced into the result stream.
    pub fn get_or_compute(
        &self,
        path: &Path,
        compute: impl FnOnce() -> Vec<ParseResult>,
    ) -> Vec<ParseResult> {
        let identity = match FileIdentity::from_path(path) {
            Ok(identity) => identity,
            Err(e) => {
                warn!("cache disabled for {}: {e:#}", path.display());
                return compute();
            }
        };

        match self.load(&identity) {
            Ok(Some(results)) => {
                debug!("cache hit for {}", identity.path.display());
                return results;
            }
            Ok(None) => {}
            Err(e) => warn!("failed to read cache entry for {}: {e:#}", identity.path.display()),
        }

        let results = compute();
        if let Err(e) = self.store(&identity, &results) {
            warn!("failed to write cache entry for {}: {e:#}", identity.path.display());
        }
        results
    }

    fn entry_paths(&self, identity: &FileIdentity) -> (PathBuf, PathBuf) {
        let key = entry_key(&identity.path);
        (self.dir.join(format!("{key}.json")), self.dir.join(format!("{key}.bin")))
    }

    /// Load a stored entry, returning `None` on missing, stale or
    /// version-mismatched entries (caller recomputes).
    fn load(&self, identity: &FileIdentity) -> Result<Option<Vec<ParseResult>>> {
        let (meta_path, data_path) = self.entry_paths(identity);
        if !meta_path.exists() || !data_path.exists() {
            return Ok(None);
        }

        let meta_json = fs::read_to_string(&meta_path).context("failed to read entry metadata")?;
        let meta: EntryMetadata =
            serde_json::from_str(&meta_json).context("failed to parse entry metadata")?;
        if meta.version != CACHE_VERSION || meta.identity != *identity {
            // stale or from an older format: never served
            return Ok(None);
        }

        let bytes = fs::read(&data_path).context("failed to read entry data")?;
        let stored: Vec<StoredResult> =
            bincode::serde::decode_from_slice(&bytes, config::standard())
                .context("failed to deserialize entry data")?
                .0;
        Ok(Some(stored.into_iter().map(ParseResult::from).collect()))
    }

    /// Replace the entry for `identity`, atomically (temp file + rename).
    fn store(&self, identity: &FileIdentity, results: &[ParseResult]) -> Result<()> {
        let (meta_path, data_path) = self.entry_paths(identity);

        let stored: Vec<StoredResult> = results.iter().cloned().map(StoredResult::from).collect();
        let bytes = bincode::serde::encode_to_vec(&stored, config::standard())
            .context("failed to serialize entry data")?;
        let data_temp = data_path.with_extension("bin.tmp");
        fs::write(&data_temp, bytes).context("failed to write entry data temp file")?;
        fs::rename(&data_temp, &data_path).context("failed to rename entry data temp file")?;

        let meta = EntryMetadata { version: CACHE_VERSION, identity: identity.clone() };
        let meta_json =
            serde_json::to_string_pretty(&meta).context("failed to serialize entry metadata")?;
        let meta_temp = meta_path.with_extension("json.tmp");
        fs::write(&meta_temp, meta_json).context("failed to write entry metadata temp file")?;
        fs::rename(&meta_temp, &meta_path).context("failed to rename entry metadata temp file")?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;
    use std::fs;

    use chrono::TimeZone;
    use chrono::{DateTime, Utc};
    use tempfile::TempDir;

    use super::*;
    use crate::models::{
        Activity, ChromeHistory, CsvYoutubeComment, CsvYoutubeLiveChat, Keep, LikedYoutubeVideo,
        Location, PlaceVisit, PlayStoreAppInstall,
    };

    fn ts(secs: i64) -> DateTime<Utc> {
        Utc.timestamp_opt(secs, 0).unwrap()
    }

    /// One result per variant plus both error shapes, to exercise the full
    /// round-trip surface.
    fn sample_results() -> Vec<ParseResult> {
        vec![
            Ok(Event::Activity(Activity {
                header: "YouTube".into(),
                title: "Watched something".into(),
                time: ts(100),
                description: Some("desc".into()),
                title_url: Some("https://www.youtube.com/watch?v=abc".into()),
                subtitles: vec![crate::models::Subtitle { name: "Channel".into(), url: None }],
                details: vec!["From Google Ads".into()],
                location_infos: vec![crate::models::LocationInfo {
                    name: Some("At home".into()),
                    url: None,
                    source: None,
                    source_url: None,
                }],
                products: vec!["YouTube".into()],
            })),
            Ok(Event::Location(Location {
                lat: 37.7749,
                lng: -122.4194,
                accuracy: Some(12.0),
                device_tag: Some(99),
                source: Some("GPS".into()),
                dt: ts(200),
            })),
            Ok(Event::PlaceVisit(PlaceVisit {
                lat: 1.0,
                lng: 2.0,
                center_lat: Some(1.5),
                center_lng: None,
                address: Some("1 Main St".into()),
                name: Some("Somewhere".into()),
                location_confidence: Some(80.0),
                place_id: "ChIJ".into(),
                start_time: ts(300),
                end_time: ts(400),
                source_info_device_tag: None,
                other_candidate_locations: vec![crate::models::CandidateLocation {
                    lat: 1.1,
                    lng: 2.1,
                    address: None,
                    name: None,
                    place_id: None,
                    semantic_type: Some("TYPE_HOME".into()),
                    location_confidence: None,
                    source_info_device_tag: None,
                }],
                place_confidence: None,
                place_visit_type: Some("SINGLE_PLACE".into()),
                visit_confidence: Some(70.0),
                edit_confirmation_status: None,
                place_visit_importance: None,
            })),
            Ok(Event::ChromeHistory(ChromeHistory {
                title: "Example".into(),
                url: "http://example.com".into(),
                dt: ts(500),
                page_transition: Some("LINK".into()),
            })),
            Ok(Event::PlayStoreAppInstall(PlayStoreAppInstall {
                title: "Discord".into(),
                last_update_time: ts(600),
                first_installation_time: ts(550),
                device_name: Some("Pixel".into()),
                device_carrier: None,
                device_manufacturer: Some("Google".into()),
            })),
            Ok(Event::LikedYoutubeVideo(LikedYoutubeVideo {
                title: "A video".into(),
                desc: String::new(),
                link: "https://youtube.com/watch?v=abc".into(),
                dt: ts(700),
            })),
            Ok(Event::CsvYoutubeComment(CsvYoutubeComment {
                comment_id: "UgxB1".into(),
                channel_id: "UCabc".into(),
                dt: ts(800),
                price: None,
                parent_comment_id: Some("UgxB0".into()),
                video_id: "vid".into(),
                content_json: r#"{"takeoutSegments":[]}"#.into(),
            })),
            Ok(Event::CsvYoutubeLiveChat(CsvYoutubeLiveChat {
                live_chat_id: "UgxL1".into(),
                channel_id: "UCabc".into(),
                dt: ts(900),
                price: None,
                video_id: "vid".into(),
                content_json: r#"{"takeoutSegments":[]}"#.into(),
            })),
            Ok(Event::Keep(Keep {
                title: "Shopping".into(),
                updated_dt: ts(1000),
                created_dt: ts(950),
                list_content: Some(vec![crate::models::KeepListItem {
                    text_html: "<b>milk</b>".into(),
                    text: "milk".into(),
                    checked: true,
                }]),
                text_content: None,
                text_content_html: None,
                color: "DEFAULT".into(),
                annotations: None,
                trashed: false,
                pinned: true,
                archived: false,
            })),
            Err(DecodeError::Structure {
                path: "some/file.json".into(),
                message: "top-level item is not a list".into(),
            }),
            Err(DecodeError::Record {
                path: "some/file.json".into(),
                message: "no 'header' key".into(),
            }),
        ]
    }

    fn cache_and_source() -> (TempDir, ParseCache, std::path::PathBuf) {
        let dir = TempDir::new().unwrap();
        let cache = ParseCache::at(dir.path().join("cache")).unwrap();
        let source = dir.path().join("source.json");
        fs::write(&source, b"irrelevant").unwrap();
        (dir, cache, source)
    }

    #[test]
    fn test_round_trip_preserves_every_variant_and_error() {
        let (_dir, cache, source) = cache_and_source();
        let identity = FileIdentity::from_path(&source).unwrap();
        let results = sample_results();

        cache.store(&identity, &results).unwrap();
        let loaded = cache.load(&identity).unwrap().expect("entry should exist");
        assert_eq!(loaded, results);
    }

    #[test]
    fn test_miss_then_hit_yields_identical_sequences() {
        let (_dir, cache, source) = cache_and_source();
        let calls = Cell::new(0);
        let compute = || {
            calls.set(calls.get() + 1);
            sample_results()
        };

        let first = cache.get_or_compute(&source, compute);
        assert_eq!(calls.get(), 1);

        let second = cache.get_or_compute(&source, || {
            calls.set(calls.get() + 1);
            Vec::new()
        });
        // hit: compute not invoked, stored sequence returned verbatim
        assert_eq!(calls.get(), 1);
        assert_eq!(first, second);
    }

    #[test]
    fn test_stale_entry_is_recomputed() {
        let (_dir, cache, source) = cache_and_source();
        let first = cache.get_or_compute(&source, sample_results);
        assert!(!first.is_empty());

        // grow the file; mtime alone can be too coarse on fast test runs
        fs::write(&source, b"changed content, longer than before").unwrap();

        let recomputed = cache.get_or_compute(&source, Vec::new);
        assert!(recomputed.is_empty());
    }

    #[test]
    fn test_missing_source_file_falls_back_to_compute() {
        let dir = TempDir::new().unwrap();
        let cache = ParseCache::at(dir.path().join("cache")).unwrap();
        let results =
            cache.get_or_compute(Path::new("/nonexistent/file.json"), || sample_results());
        assert_eq!(results, sample_results());
    }

    #[test]
    fn test_corrupt_entry_is_recomputed() {
        let (_dir, cache, source) = cache_and_source();
        let identity = FileIdentity::from_path(&source).unwrap();
        cache.store(&identity, &sample_results()).unwrap();

        let (_meta, data) = cache.entry_paths(&identity);
        fs::write(&data, b"not bincode").unwrap();

        // load fails, get_or_compute degrades to recomputation
        let results = cache.get_or_compute(&source, Vec::new);
        assert!(results.is_empty());
    }
}
