use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::event::EventKey;

/// One extra line of text attached to an activity, optionally linked.
///
/// In HTML exports there is no way to tell a description apart from a
/// subtitle, so descriptions end up here as well.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Subtitle {
    pub name: String,
    pub url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LocationInfo {
    pub name: Option<String>,
    pub url: Option<String>,
    pub source: Option<String>,
    pub source_url: Option<String>,
}

/// A "My Activity" record (also the shape of YouTube watch/search history).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Activity {
    pub header: String,
    pub title: String,
    pub time: DateTime<Utc>,
    pub description: Option<String>,
    pub title_url: Option<String>,
    pub subtitles: Vec<Subtitle>,
    pub details: Vec<String>,
    pub location_infos: Vec<LocationInfo>,
    pub products: Vec<String>,
}

impl Activity {
    pub fn key(&self) -> EventKey {
        EventKey::HeaderTitleTime {
            header: self.header.clone(),
            title: self.title.clone(),
            secs: self.time.timestamp(),
        }
    }

    /// Sorted, comma-separated product list, for display.
    pub fn products_desc(&self) -> String {
        let mut products: Vec<&str> = self.products.iter().map(String::as_str).collect();
        products.sort_unstable();
        products.join(", ")
    }
}
