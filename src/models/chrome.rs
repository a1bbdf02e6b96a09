use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::event::EventKey;

/// One browser history entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChromeHistory {
    pub title: String,
    /// Kept exactly as exported. History URLs are not upgraded to https,
    /// since plenty of visited pages genuinely were not.
    pub url: String,
    pub dt: DateTime<Utc>,
    pub page_transition: Option<String>,
}

impl ChromeHistory {
    pub fn key(&self) -> EventKey {
        EventKey::UrlTime { url: self.url.clone(), secs: self.dt.timestamp() }
    }
}
