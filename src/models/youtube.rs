use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::event::EventKey;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LikedYoutubeVideo {
    pub title: String,
    pub desc: String,
    pub link: String,
    pub dt: DateTime<Utc>,
}

impl LikedYoutubeVideo {
    pub fn key(&self) -> EventKey {
        EventKey::Time(self.dt.timestamp())
    }
}

/// A comment from the newer CSV export format.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CsvYoutubeComment {
    pub comment_id: String,
    pub channel_id: String,
    pub dt: DateTime<Utc>,
    pub price: Option<String>,
    pub parent_comment_id: Option<String>,
    pub video_id: String,
    /// The raw JSON content column, kept verbatim.
    pub content_json: String,
}

impl CsvYoutubeComment {
    pub fn url(&self) -> String {
        format!("https://www.youtube.com/watch?v={}&lc={}", self.video_id, self.comment_id)
    }

    pub fn video_url(&self) -> String {
        format!("https://www.youtube.com/watch?v={}", self.video_id)
    }

    pub fn key(&self) -> EventKey {
        EventKey::Time(self.dt.timestamp())
    }
}

/// Very similar to [`CsvYoutubeComment`], but sent in a livestream chat:
/// a chat id instead of a comment id and never a parent comment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CsvYoutubeLiveChat {
    pub live_chat_id: String,
    pub channel_id: String,
    pub dt: DateTime<Utc>,
    pub price: Option<String>,
    pub video_id: String,
    pub content_json: String,
}

impl CsvYoutubeLiveChat {
    pub fn url(&self) -> String {
        format!("https://www.youtube.com/watch?v={}&lc={}", self.video_id, self.live_chat_id)
    }

    pub fn video_url(&self) -> String {
        format!("https://www.youtube.com/watch?v={}", self.video_id)
    }

    pub fn key(&self) -> EventKey {
        EventKey::Time(self.dt.timestamp())
    }
}
