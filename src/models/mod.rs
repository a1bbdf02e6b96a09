//! Data models for parsed takeout events.
//!
//! Every top-level struct here is one variant of the closed [`Event`] union.
//! Each variant exposes the timestamp used for global ordering and an
//! identity key ([`EventKey`]) that stays stable across re-exports of the
//! same underlying event, which is what the merge engine deduplicates on.
//!
//! Decode failures are modelled as [`DecodeError`] values inside the result
//! stream, not as control-flow errors.

pub mod activity;
pub mod apps;
pub mod chrome;
pub mod error;
pub mod event;
pub mod keep;
pub mod location;
pub mod youtube;

pub use activity::{Activity, LocationInfo, Subtitle};
pub use apps::PlayStoreAppInstall;
pub use chrome::ChromeHistory;
pub use error::{DecodeError, ParseResult};
pub use event::{Event, EventKey, EventKind};
pub use keep::{Keep, KeepAnnotation, KeepListItem};
pub use location::{CandidateLocation, Location, PlaceVisit};
pub use youtube::{CsvYoutubeComment, CsvYoutubeLiveChat, LikedYoutubeVideo};
