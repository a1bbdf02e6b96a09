use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::activity::Activity;
use super::apps::PlayStoreAppInstall;
use super::chrome::ChromeHistory;
use super::keep::Keep;
use super::location::{Location, PlaceVisit};
use super::youtube::{CsvYoutubeComment, CsvYoutubeLiveChat, LikedYoutubeVideo};

/// The closed set of event variants a takeout bundle can produce.
///
/// New variants are added by extending this enum; there is no open
/// subtyping. Every variant carries its own timestamp and identity key.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Event {
    Activity(Activity),
    Location(Location),
    PlaceVisit(PlaceVisit),
    ChromeHistory(ChromeHistory),
    PlayStoreAppInstall(PlayStoreAppInstall),
    LikedYoutubeVideo(LikedYoutubeVideo),
    CsvYoutubeComment(CsvYoutubeComment),
    CsvYoutubeLiveChat(CsvYoutubeLiveChat),
    Keep(Keep),
}

/// Variant discriminant, used together with [`EventKey`] for grouping so
/// that equal keys of different variants never deduplicate against each
/// other.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum EventKind {
    Activity,
    Location,
    PlaceVisit,
    ChromeHistory,
    PlayStoreAppInstall,
    LikedYoutubeVideo,
    CsvYoutubeComment,
    CsvYoutubeLiveChat,
    Keep,
}

impl EventKind {
    pub fn name(self) -> &'static str {
        match self {
            EventKind::Activity => "Activity",
            EventKind::Location => "Location",
            EventKind::PlaceVisit => "PlaceVisit",
            EventKind::ChromeHistory => "ChromeHistory",
            EventKind::PlayStoreAppInstall => "PlayStoreAppInstall",
            EventKind::LikedYoutubeVideo => "LikedYoutubeVideo",
            EventKind::CsvYoutubeComment => "CsvYoutubeComment",
            EventKind::CsvYoutubeLiveChat => "CsvYoutubeLiveChat",
            EventKind::Keep => "Keep",
        }
    }
}

/// Identity key: the minimal per-variant field subset observed to stay
/// stable across independent exports of the same underlying event.
///
/// There is no single global primary key in the export format, which is why
/// the shapes differ per variant. Floats are carried as raw bits and
/// timestamps truncated to whole seconds so keys are hashable and compare
/// exactly.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum EventKey {
    HeaderTitleTime { header: String, title: String, secs: i64 },
    Coordinates { lat: u64, lng: u64, accuracy: Option<u64>, secs: i64 },
    Visit { lat: u64, lng: u64, secs: i64, confidence: Option<u64> },
    UrlTime { url: String, secs: i64 },
    Time(i64),
}

impl Event {
    /// The event's canonical point in time, used for global ordering.
    pub fn timestamp(&self) -> DateTime<Utc> {
        match self {
            Event::Activity(a) => a.time,
            Event::Location(l) => l.dt,
            Event::PlaceVisit(p) => p.start_time,
            Event::ChromeHistory(c) => c.dt,
            Event::PlayStoreAppInstall(a) => a.last_update_time,
            Event::LikedYoutubeVideo(l) => l.dt,
            Event::CsvYoutubeComment(c) => c.dt,
            Event::CsvYoutubeLiveChat(c) => c.dt,
            Event::Keep(k) => k.created_dt,
        }
    }

    pub fn kind(&self) -> EventKind {
        match self {
            Event::Activity(_) => EventKind::Activity,
            Event::Location(_) => EventKind::Location,
            Event::PlaceVisit(_) => EventKind::PlaceVisit,
            Event::ChromeHistory(_) => EventKind::ChromeHistory,
            Event::PlayStoreAppInstall(_) => EventKind::PlayStoreAppInstall,
            Event::LikedYoutubeVideo(_) => EventKind::LikedYoutubeVideo,
            Event::CsvYoutubeComment(_) => EventKind::CsvYoutubeComment,
            Event::CsvYoutubeLiveChat(_) => EventKind::CsvYoutubeLiveChat,
            Event::Keep(_) => EventKind::Keep,
        }
    }

    /// Per-variant identity key. Never fails: key derivation is defined over
    /// fields that were already validated at decode time.
    pub fn key(&self) -> EventKey {
        match self {
            Event::Activity(a) => a.key(),
            Event::Location(l) => l.key(),
            Event::PlaceVisit(p) => p.key(),
            Event::ChromeHistory(c) => c.key(),
            Event::PlayStoreAppInstall(a) => a.key(),
            Event::LikedYoutubeVideo(l) => l.key(),
            Event::CsvYoutubeComment(c) => c.key(),
            Event::CsvYoutubeLiveChat(c) => c.key(),
            Event::Keep(k) => k.key(),
        }
    }
}
