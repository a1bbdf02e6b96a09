//! Per-format decoders.
//!
//! One decoder per (product area, historical schema version). Every decoder
//! is a pure function from a file path to a finite sequence of
//! `Result<Event, DecodeError>`:
//!
//! - a wrong top-level shape yields exactly one [`Structure`] error for the
//!   whole file and decoding stops,
//! - a failure inside a single record yields one [`Record`] error in that
//!   record's position and decoding continues,
//! - historically added/removed fields are always optional.
//!
//! [`Structure`]: crate::models::DecodeError::Structure
//! [`Record`]: crate::models::DecodeError::Record

pub mod csv;
pub mod html;
pub mod https;
pub mod json;
pub mod timestamps;

pub use csv::{parse_youtube_comments_csv, parse_youtube_live_chats_csv};
pub use html::parse_activity_html;
pub use json::{
    parse_activity_json, parse_app_installs_json, parse_chrome_json, parse_keep_json,
    parse_likes_json, parse_location_json, parse_semantic_location_json,
};
