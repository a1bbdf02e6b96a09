use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::event::EventKey;

/// A Play Store app installation event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayStoreAppInstall {
    pub title: String,
    /// When this installation event occurred. Different installs of the same
    /// app share close `first_installation_time`s, so this is the one used as
    /// the event timestamp.
    pub last_update_time: DateTime<Utc>,
    /// When the app was first installed on the device.
    pub first_installation_time: DateTime<Utc>,
    pub device_name: Option<String>,
    pub device_carrier: Option<String>,
    pub device_manufacturer: Option<String>,
}

impl PlayStoreAppInstall {
    pub fn key(&self) -> EventKey {
        EventKey::Time(self.last_update_time.timestamp())
    }
}
