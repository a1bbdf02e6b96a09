use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::event::EventKey;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KeepListItem {
    pub text_html: String,
    pub text: String,
    pub checked: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KeepAnnotation {
    pub description: String,
    pub source: String,
    pub title: String,
    pub url: String,
}

/// A Keep note. Exported one note per JSON file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Keep {
    pub title: String,
    pub updated_dt: DateTime<Utc>,
    pub created_dt: DateTime<Utc>,
    pub list_content: Option<Vec<KeepListItem>>,
    pub text_content: Option<String>,
    pub text_content_html: Option<String>,
    pub color: String,
    pub annotations: Option<Vec<KeepAnnotation>>,
    pub trashed: bool,
    pub pinned: bool,
    pub archived: bool,
}

impl Keep {
    pub fn key(&self) -> EventKey {
        EventKey::Time(self.created_dt.timestamp())
    }
}
