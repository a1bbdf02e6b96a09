use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::event::EventKey;

/// A raw location history point.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Location {
    pub lat: f64,
    pub lng: f64,
    /// Missing in older exports.
    pub accuracy: Option<f64>,
    pub device_tag: Option<i64>,
    pub source: Option<String>,
    pub dt: DateTime<Utc>,
}

impl Location {
    pub fn key(&self) -> EventKey {
        EventKey::Coordinates {
            lat: self.lat.to_bits(),
            lng: self.lng.to_bits(),
            accuracy: self.accuracy.map(f64::to_bits),
            secs: self.dt.timestamp(),
        }
    }
}

/// A candidate place attached to a [`PlaceVisit`]. Not an event on its own.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CandidateLocation {
    pub lat: f64,
    pub lng: f64,
    pub address: Option<String>,
    pub name: Option<String>,
    /// Sometimes missing; in that case `semantic_type` is set instead.
    pub place_id: Option<String>,
    /// Something like TYPE_HOME, TYPE_WORK or TYPE_ALIAS.
    pub semantic_type: Option<String>,
    /// Missing in older (around 2014/15) history.
    pub location_confidence: Option<f64>,
    pub source_info_device_tag: Option<i64>,
}

/// A semantic location history visit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlaceVisit {
    pub lat: f64,
    pub lng: f64,
    pub center_lat: Option<f64>,
    pub center_lng: Option<f64>,
    pub address: Option<String>,
    pub name: Option<String>,
    /// Missing in older (around 2014/15) history.
    pub location_confidence: Option<f64>,
    pub place_id: String,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub source_info_device_tag: Option<i64>,
    pub other_candidate_locations: Vec<CandidateLocation>,
    /// Pre-2018 semantic history did not have it.
    pub place_confidence: Option<String>,
    pub place_visit_type: Option<String>,
    pub visit_confidence: Option<f64>,
    pub edit_confirmation_status: Option<String>,
    pub place_visit_importance: Option<String>,
}

impl PlaceVisit {
    pub fn key(&self) -> EventKey {
        EventKey::Visit {
            lat: self.lat.to_bits(),
            lng: self.lng.to_bits(),
            secs: self.start_time.timestamp(),
            confidence: self.visit_confidence.map(f64::to_bits),
        }
    }
}
