//! Decoders for the JSON export shapes.
//!
//! Each decoder documents the schema versions it understands and the key
//! used to detect each one, since the same file type has changed shape
//! mid-history (per record, not per file).

use std::fs;
use std::path::Path;

use serde_json::Value;
use tracing::debug;

use super::https::upgrade_to_https_opt;
use super::timestamps::{parse_micros_value, parse_timestamp_key, parse_utc_date};
use crate::models::{
    Activity, CandidateLocation, ChromeHistory, DecodeError, Event, Keep, KeepAnnotation,
    KeepListItem, LikedYoutubeVideo, Location, LocationInfo, ParseResult, PlaceVisit,
    PlayStoreAppInstall, Subtitle,
};

type JsonMap = serde_json::Map<String, Value>;

fn read_json(path: &Path) -> Result<Value, DecodeError> {
    let text = fs::read_to_string(path)
        .map_err(|e| DecodeError::structure(path, format!("failed to read file: {e}")))?;
    serde_json::from_str(&text)
        .map_err(|e| DecodeError::structure(path, format!("invalid JSON: {e}")))
}

fn as_record<'a>(path: &Path, value: &'a Value, what: &str) -> Result<&'a JsonMap, DecodeError> {
    value.as_object().ok_or_else(|| DecodeError::record(path, format!("{what} is not an object")))
}

fn opt_str(obj: &JsonMap, key: &str) -> Option<String> {
    obj.get(key).and_then(Value::as_str).map(str::to_owned)
}

fn req_str(path: &Path, obj: &JsonMap, key: &str) -> Result<String, DecodeError> {
    opt_str(obj, key).ok_or_else(|| DecodeError::record(path, format!("no '{key}' key")))
}

fn opt_f64(obj: &JsonMap, key: &str) -> Option<f64> {
    obj.get(key).and_then(Value::as_f64)
}

fn opt_i64(obj: &JsonMap, key: &str) -> Option<i64> {
    obj.get(key).and_then(Value::as_i64)
}

fn list<'a>(obj: &'a JsonMap, key: &str) -> &'a [Value] {
    obj.get(key).and_then(Value::as_array).map(Vec::as_slice).unwrap_or(&[])
}

/// Geographic coordinates are fixed-point integers scaled by 10^7.
fn e7_coordinate(path: &Path, obj: &JsonMap, key: &str) -> Result<f64, DecodeError> {
    let raw = obj
        .get(key)
        .and_then(Value::as_f64)
        .ok_or_else(|| DecodeError::record(path, format!("no '{key}' key")))?;
    Ok(raw / 1e7)
}

/// "My Activity" JSON, also the shape of YouTube watch/search history.
///
/// Two historical shapes, detected per record:
/// - old (until at least 2017): everything nested under a `snippet` key,
///   no header (fixed to "YouTube"), time under `publishedAt`;
/// - new: flat record with `header` and `time`.
///
/// A missing header is tolerated only for `Visited view-source:` records,
/// which some pre-2021 Chrome activity files contain.
pub fn parse_activity_json(path: &Path) -> Vec<ParseResult> {
    let value = match read_json(path) {
        Ok(v) => v,
        Err(e) => return vec![Err(e)],
    };
    let Some(items) = value.as_array() else {
        return vec![Err(DecodeError::structure(path, "top-level item is not a list"))];
    };
    items.iter().map(|blob| decode_activity(path, blob).map(Event::Activity)).collect()
}

fn decode_activity(path: &Path, blob: &Value) -> Result<Activity, DecodeError> {
    let obj = as_record(path, blob, "activity record")?;

    let mut subtitles = Vec::new();
    for s in list(obj, "subtitles") {
        let Some(s) = s.as_object() else { continue };
        // sometimes just empty (Assistant data circa 2018)
        if !s.contains_key("name") {
            continue;
        }
        subtitles.push(Subtitle {
            name: s.get("name").map(json_to_string).unwrap_or_default(),
            url: upgrade_to_https_opt(opt_str(s, "url")),
        });
    }

    let (source, header, time_str): (&JsonMap, String, Option<String>) =
        if let Some(snippet) = obj.get("snippet") {
            let snippet = as_record(path, snippet, "activity snippet")?;
            // old format didn't have a header
            (snippet, "YouTube".to_string(), opt_str(snippet, "publishedAt"))
        } else {
            let header = match opt_str(obj, "header") {
                Some(h) => h,
                // a few headerless records exist; they always come from
                // viewing page source in Chrome
                None if opt_str(obj, "title")
                    .is_some_and(|t| t.starts_with("Visited view-source:")) =>
                {
                    "Chrome".to_string()
                }
                None => return Err(DecodeError::record(path, "no 'header' key")),
            };
            (obj, header, opt_str(obj, "time"))
        };

    let time_str =
        time_str.ok_or_else(|| DecodeError::record(path, "no time key in activity record"))?;
    let time =
        parse_utc_date(&time_str).map_err(|e| DecodeError::record(path, format!("{e:#}")))?;
    let title = req_str(path, source, "title")?;

    Ok(Activity {
        header,
        title,
        time,
        description: opt_str(source, "description"),
        title_url: upgrade_to_https_opt(opt_str(source, "titleUrl")),
        subtitles,
        details: list(source, "details")
            .iter()
            .filter_map(Value::as_object)
            .filter_map(|d| d.get("name").map(json_to_string))
            .collect(),
        location_infos: list(source, "locationInfos")
            .iter()
            .filter_map(Value::as_object)
            .map(|li| LocationInfo {
                name: opt_str(li, "name"),
                url: upgrade_to_https_opt(opt_str(li, "url")),
                source: opt_str(li, "source"),
                source_url: upgrade_to_https_opt(opt_str(li, "sourceUrl")),
            })
            .collect(),
        products: list(source, "products").iter().map(json_to_string).collect(),
    })
}

fn json_to_string(v: &Value) -> String {
    match v {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// YouTube likes playlist (`playlists/likes.json`).
pub fn parse_likes_json(path: &Path) -> Vec<ParseResult> {
    let value = match read_json(path) {
        Ok(v) => v,
        Err(e) => return vec![Err(e)],
    };
    let Some(items) = value.as_array() else {
        return vec![Err(DecodeError::structure(path, "top-level item is not a list"))];
    };
    items.iter().map(|like| decode_like(path, like).map(Event::LikedYoutubeVideo)).collect()
}

fn decode_like(path: &Path, blob: &Value) -> Result<LikedYoutubeVideo, DecodeError> {
    let obj = as_record(path, blob, "liked video record")?;
    let snippet = obj
        .get("snippet")
        .and_then(Value::as_object)
        .ok_or_else(|| DecodeError::record(path, "no 'snippet' key"))?;
    let video_id = obj
        .get("contentDetails")
        .and_then(Value::as_object)
        .and_then(|cd| opt_str(cd, "videoId"))
        .ok_or_else(|| DecodeError::record(path, "no 'contentDetails.videoId' key"))?;
    let published = req_str(path, snippet, "publishedAt")?;
    Ok(LikedYoutubeVideo {
        title: req_str(path, snippet, "title")?,
        desc: opt_str(snippet, "description").unwrap_or_default(),
        link: format!("https://youtube.com/watch?v={video_id}"),
        dt: parse_utc_date(&published).map_err(|e| DecodeError::record(path, format!("{e:#}")))?,
    })
}

/// Play Store `Installs.json`.
pub fn parse_app_installs_json(path: &Path) -> Vec<ParseResult> {
    let value = match read_json(path) {
        Ok(v) => v,
        Err(e) => return vec![Err(e)],
    };
    let Some(items) = value.as_array() else {
        return vec![Err(DecodeError::structure(path, "top-level item is not a list"))];
    };
    items
        .iter()
        .map(|blob| decode_app_install(path, blob).map(Event::PlayStoreAppInstall))
        .collect()
}

fn decode_app_install(path: &Path, blob: &Value) -> Result<PlayStoreAppInstall, DecodeError> {
    let obj = as_record(path, blob, "app install record")?;
    let install = obj
        .get("install")
        .and_then(Value::as_object)
        .ok_or_else(|| DecodeError::record(path, "no 'install' key"))?;
    let doc = install.get("doc").and_then(Value::as_object);
    let device = install.get("deviceAttribute").and_then(Value::as_object);

    let title = doc
        .and_then(|d| opt_str(d, "title"))
        .ok_or_else(|| DecodeError::record(path, "no 'install.doc.title' key"))?;
    let last_update = req_str(path, install, "lastUpdateTime")?;
    let first_install = req_str(path, install, "firstInstallationTime")?;

    Ok(PlayStoreAppInstall {
        title,
        last_update_time: parse_utc_date(&last_update)
            .map_err(|e| DecodeError::record(path, format!("{e:#}")))?,
        first_installation_time: parse_utc_date(&first_install)
            .map_err(|e| DecodeError::record(path, format!("{e:#}")))?,
        device_name: device.and_then(|d| opt_str(d, "deviceDisplayName")),
        device_carrier: device.and_then(|d| opt_str(d, "carrier")),
        device_manufacturer: device.and_then(|d| opt_str(d, "manufacturer")),
    })
}

/// Raw location history (`Records.json` / `Location History.json`).
///
/// Coordinates are E7 fixed-point; timestamps are either `timestampMs`
/// (older) or an ISO `timestamp` (newer), sniffed per record.
pub fn parse_location_json(path: &Path) -> Vec<ParseResult> {
    let value = match read_json(path) {
        Ok(v) => v,
        Err(e) => return vec![Err(e)],
    };
    let Some(locations) = value.as_object().and_then(|o| o.get("locations")) else {
        return vec![Err(DecodeError::structure(path, "no 'locations' key"))];
    };
    let Some(locations) = locations.as_array() else {
        return vec![Err(DecodeError::structure(path, "'locations' is not a list"))];
    };
    locations.iter().map(|loc| decode_location(path, loc).map(Event::Location)).collect()
}

fn decode_location(path: &Path, blob: &Value) -> Result<Location, DecodeError> {
    let obj = as_record(path, blob, "location record")?;
    Ok(Location {
        lat: e7_coordinate(path, obj, "latitudeE7")?,
        lng: e7_coordinate(path, obj, "longitudeE7")?,
        accuracy: opt_f64(obj, "accuracy"),
        device_tag: opt_i64(obj, "deviceTag"),
        source: opt_str(obj, "source"),
        dt: parse_timestamp_key(obj, "timestamp")
            .map_err(|e| DecodeError::record(path, format!("{e:#}")))?,
    })
}

const SEMANTIC_REQUIRED_KEYS: &[&str] = &["location", "duration"];
// some fairly recent (as of 2023) places might miss placeId
const SEMANTIC_REQUIRED_LOCATION_KEYS: &[&str] = &["placeId", "latitudeE7", "longitudeE7"];

fn missing_key<'a>(obj: &JsonMap, required: &[&'a str]) -> Option<&'a str> {
    required.iter().find(|k| !obj.contains_key(**k)).copied()
}

/// Semantic location history. Map root with a `timelineObjects` list; only
/// the `placeVisit` entries become events, `activitySegment` entries are
/// skipped.
pub fn parse_semantic_location_json(path: &Path) -> Vec<ParseResult> {
    let value = match read_json(path) {
        Ok(v) => v,
        Err(e) => return vec![Err(e)],
    };
    let Some(root) = value.as_object() else {
        return vec![Err(DecodeError::structure(path, "top-level item is not a map"))];
    };
    let Some(objects) = root.get("timelineObjects").and_then(Value::as_array) else {
        return vec![Err(DecodeError::structure(path, "no 'timelineObjects' key"))];
    };

    let mut out = Vec::new();
    for timeline_object in objects {
        let Some(visit) = timeline_object.get("placeVisit").and_then(Value::as_object) else {
            continue;
        };
        if let Some(missing) = missing_key(visit, SEMANTIC_REQUIRED_KEYS) {
            out.push(Err(DecodeError::record(path, format!("no '{missing}' key"))));
            continue;
        }
        match decode_place_visit(path, visit) {
            Ok(Some(v)) => out.push(Ok(Event::PlaceVisit(v))),
            Ok(None) => {} // location too incomplete to use, skipped
            Err(e) => out.push(Err(e)),
        }
    }
    out
}

fn decode_place_visit(path: &Path, visit: &JsonMap) -> Result<Option<PlaceVisit>, DecodeError> {
    let location = visit
        .get("location")
        .and_then(Value::as_object)
        .ok_or_else(|| DecodeError::record(path, "'location' is not an object"))?;
    if let Some(missing) = missing_key(location, SEMANTIC_REQUIRED_LOCATION_KEYS) {
        // nothing at all we can do without coordinates or a place id
        debug!(path = %path.display(), missing, "skipping place visit with incomplete location");
        return Ok(None);
    }
    let location = decode_candidate_location(path, location)?;
    let place_id = location
        .place_id
        .clone()
        .ok_or_else(|| DecodeError::record(path, "place visit location has no placeId"))?;

    let duration = visit
        .get("duration")
        .and_then(Value::as_object)
        .ok_or_else(|| DecodeError::record(path, "'duration' is not an object"))?;

    let mut other_candidates = Vec::new();
    for candidate in list(visit, "otherCandidateLocations") {
        let obj = as_record(path, candidate, "candidate location")?;
        other_candidates.push(decode_candidate_location(path, obj)?);
    }

    Ok(Some(PlaceVisit {
        lat: location.lat,
        lng: location.lng,
        center_lat: opt_f64(visit, "centerLatE7").map(|v| v / 1e7),
        center_lng: opt_f64(visit, "centerLngE7").map(|v| v / 1e7),
        address: location.address,
        name: location.name,
        location_confidence: location.location_confidence,
        place_id,
        start_time: parse_timestamp_key(duration, "startTimestamp")
            .map_err(|e| DecodeError::record(path, format!("{e:#}")))?,
        end_time: parse_timestamp_key(duration, "endTimestamp")
            .map_err(|e| DecodeError::record(path, format!("{e:#}")))?,
        source_info_device_tag: location.source_info_device_tag,
        other_candidate_locations: other_candidates,
        place_confidence: opt_str(visit, "placeConfidence"),
        place_visit_type: opt_str(visit, "placeVisitType"),
        visit_confidence: opt_f64(visit, "visitConfidence"),
        edit_confirmation_status: opt_str(visit, "editConfirmationStatus"),
        place_visit_importance: opt_str(visit, "placeVisitImportance"),
    }))
}

fn decode_candidate_location(
    path: &Path,
    obj: &JsonMap,
) -> Result<CandidateLocation, DecodeError> {
    let place_id = opt_str(obj, "placeId");
    let semantic_type = opt_str(obj, "semanticType");
    if place_id.is_none() && semantic_type.is_none() {
        return Err(DecodeError::record(
            path,
            "candidate location has neither placeId nor semanticType",
        ));
    }
    Ok(CandidateLocation {
        lat: e7_coordinate(path, obj, "latitudeE7")?,
        lng: e7_coordinate(path, obj, "longitudeE7")?,
        address: opt_str(obj, "address"),
        name: opt_str(obj, "name"),
        place_id,
        semantic_type,
        location_confidence: opt_f64(obj, "locationConfidence"),
        source_info_device_tag: obj
            .get("sourceInfo")
            .and_then(Value::as_object)
            .and_then(|si| opt_i64(si, "deviceTag")),
    })
}

/// Chrome `BrowserHistory.json`. Map root with a `Browser History` list;
/// visit times are microsecond epochs under `time_usec`.
pub fn parse_chrome_json(path: &Path) -> Vec<ParseResult> {
    let value = match read_json(path) {
        Ok(v) => v,
        Err(e) => return vec![Err(e)],
    };
    let Some(items) = value.as_object().and_then(|o| o.get("Browser History")) else {
        return vec![Err(DecodeError::structure(path, "no 'Browser History' key"))];
    };
    let Some(items) = items.as_array() else {
        return vec![Err(DecodeError::structure(path, "'Browser History' is not a list"))];
    };
    items.iter().map(|item| decode_chrome_entry(path, item).map(Event::ChromeHistory)).collect()
}

fn decode_chrome_entry(path: &Path, blob: &Value) -> Result<ChromeHistory, DecodeError> {
    let obj = as_record(path, blob, "browser history record")?;
    let time_usec = obj
        .get("time_usec")
        .ok_or_else(|| DecodeError::record(path, "no 'time_usec' key"))?;
    Ok(ChromeHistory {
        title: req_str(path, obj, "title")?,
        url: req_str(path, obj, "url")?,
        dt: parse_micros_value(time_usec)
            .map_err(|e| DecodeError::record(path, format!("{e:#}")))?,
        page_transition: opt_str(obj, "page_transition"),
    })
}

/// A Keep note file: map root, one note per file.
pub fn parse_keep_json(path: &Path) -> Vec<ParseResult> {
    let value = match read_json(path) {
        Ok(v) => v,
        Err(e) => return vec![Err(e)],
    };
    let Some(obj) = value.as_object() else {
        return vec![Err(DecodeError::structure(path, "top-level item is not a map"))];
    };
    vec![decode_keep(path, obj).map(Event::Keep)]
}

fn decode_keep(path: &Path, obj: &JsonMap) -> Result<Keep, DecodeError> {
    let created = obj
        .get("createdTimestampUsec")
        .ok_or_else(|| DecodeError::record(path, "no 'createdTimestampUsec' key"))?;
    let edited = obj
        .get("userEditedTimestampUsec")
        .ok_or_else(|| DecodeError::record(path, "no 'userEditedTimestampUsec' key"))?;

    let list_content = obj.get("listContent").and_then(Value::as_array).map(|items| {
        items
            .iter()
            .filter_map(Value::as_object)
            .map(|item| KeepListItem {
                text_html: opt_str(item, "textHtml").unwrap_or_default(),
                text: opt_str(item, "text").unwrap_or_default(),
                checked: item.get("isChecked").and_then(Value::as_bool).unwrap_or(false),
            })
            .collect::<Vec<_>>()
    });
    let annotations = obj.get("annotations").and_then(Value::as_array).map(|items| {
        items
            .iter()
            .filter_map(Value::as_object)
            .map(|a| KeepAnnotation {
                description: opt_str(a, "description").unwrap_or_default(),
                source: opt_str(a, "source").unwrap_or_default(),
                title: opt_str(a, "title").unwrap_or_default(),
                url: opt_str(a, "url").unwrap_or_default(),
            })
            .collect::<Vec<_>>()
    });

    Ok(Keep {
        title: opt_str(obj, "title").unwrap_or_default(),
        updated_dt: parse_micros_value(edited)
            .map_err(|e| DecodeError::record(path, format!("{e:#}")))?,
        created_dt: parse_micros_value(created)
            .map_err(|e| DecodeError::record(path, format!("{e:#}")))?,
        list_content,
        text_content: opt_str(obj, "textContent"),
        text_content_html: opt_str(obj, "textContentHtml"),
        color: opt_str(obj, "color").unwrap_or_else(|| "DEFAULT".to_string()),
        annotations,
        trashed: obj.get("isTrashed").and_then(Value::as_bool).unwrap_or(false),
        pinned: obj.get("isPinned").and_then(Value::as_bool).unwrap_or(false),
        archived: obj.get("isArchived").and_then(Value::as_bool).unwrap_or(false),
    })
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use tempfile::NamedTempFile;

    use super::*;
    use crate::models::EventKind;

    fn write_file(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().expect("failed to create temp file");
        file.write_all(content.as_bytes()).expect("failed to write temp file");
        file.flush().expect("failed to flush temp file");
        file
    }

    #[test]
    fn test_activity_new_flat_shape() {
        let content = r#"[
            {"header": "YouTube", "title": "Watched a video",
             "titleUrl": "http://www.youtube.com/watch?v=abc",
             "time": "2021-01-03T10:23:42.123Z",
             "subtitles": [{"name": "Some Channel", "url": "http://www.youtube.com/channel/x"}],
             "products": ["YouTube"]}
        ]"#;
        let file = write_file(content);
        let results = parse_activity_json(file.path());
        assert_eq!(results.len(), 1);
        let Ok(Event::Activity(a)) = &results[0] else { panic!("expected activity") };
        assert_eq!(a.header, "YouTube");
        assert_eq!(a.title, "Watched a video");
        // http URLs on youtube.com get upgraded
        assert_eq!(a.title_url.as_deref(), Some("https://www.youtube.com/watch?v=abc"));
        assert_eq!(a.subtitles.len(), 1);
        assert_eq!(a.subtitles[0].url.as_deref(), Some("https://www.youtube.com/channel/x"));
        assert_eq!(a.products, vec!["YouTube".to_string()]);
    }

    #[test]
    fn test_activity_old_snippet_shape_mixed_in_same_file() {
        // same file holds both shapes; detection is per record
        let content = r#"[
            {"snippet": {"title": "Old style video", "publishedAt": "2016-07-23T03:23:30.248Z"}},
            {"header": "Search", "title": "Searched for rust", "time": "2021-01-03T10:23:42Z"}
        ]"#;
        let file = write_file(content);
        let results = parse_activity_json(file.path());
        assert_eq!(results.len(), 2);
        let Ok(Event::Activity(old)) = &results[0] else { panic!("expected activity") };
        assert_eq!(old.header, "YouTube");
        assert_eq!(old.title, "Old style video");
        let Ok(Event::Activity(new)) = &results[1] else { panic!("expected activity") };
        assert_eq!(new.header, "Search");
    }

    #[test]
    fn test_activity_headerless_view_source_record() {
        let content = r#"[
            {"title": "Visited view-source:https://example.com", "time": "2020-05-01T00:00:00Z"}
        ]"#;
        let file = write_file(content);
        let results = parse_activity_json(file.path());
        let Ok(Event::Activity(a)) = &results[0] else { panic!("expected activity") };
        assert_eq!(a.header, "Chrome");
    }

    #[test]
    fn test_activity_bad_record_does_not_abort_file() {
        let content = r#"[
            {"header": "YouTube", "title": "Good", "time": "2021-01-03T10:23:42Z"},
            {"title": "No header here", "time": "2021-01-03T10:23:42Z"},
            {"header": "YouTube", "title": "Also good", "time": "2021-01-04T10:23:42Z"}
        ]"#;
        let file = write_file(content);
        let results = parse_activity_json(file.path());
        assert_eq!(results.len(), 3);
        assert!(results[0].is_ok());
        assert!(matches!(results[1], Err(DecodeError::Record { .. })));
        assert!(results[2].is_ok());
    }

    #[test]
    fn test_activity_wrong_top_level_shape() {
        let file = write_file(r#"{"not": "a list"}"#);
        let results = parse_activity_json(file.path());
        assert_eq!(results.len(), 1);
        assert!(matches!(results[0], Err(DecodeError::Structure { .. })));
    }

    #[test]
    fn test_location_e7_coordinates() {
        let content = r#"{"locations": [
            {"latitudeE7": 377749000, "longitudeE7": -1224194000,
             "accuracy": 10, "timestampMs": "1454948546904"}
        ]}"#;
        let file = write_file(content);
        let results = parse_location_json(file.path());
        assert_eq!(results.len(), 1);
        let Ok(Event::Location(loc)) = &results[0] else { panic!("expected location") };
        assert!((loc.lat - 37.7749).abs() < 1e-9);
        assert!((loc.lng - -122.4194).abs() < 1e-9);
        assert_eq!(loc.accuracy, Some(10.0));
    }

    #[test]
    fn test_location_iso_timestamp_shape() {
        let content = r#"{"locations": [
            {"latitudeE7": 10000000, "longitudeE7": 20000000,
             "timestamp": "2017-12-10T01:20:06.149Z"}
        ]}"#;
        let file = write_file(content);
        let results = parse_location_json(file.path());
        let Ok(Event::Location(loc)) = &results[0] else { panic!("expected location") };
        assert_eq!(loc.accuracy, None);
        assert_eq!(loc.device_tag, None);
        assert_eq!(loc.dt, parse_utc_date("2017-12-10T01:20:06.149Z").unwrap());
    }

    #[test]
    fn test_location_missing_locations_key() {
        let file = write_file(r#"{"something": []}"#);
        let results = parse_location_json(file.path());
        assert_eq!(results.len(), 1);
        assert!(matches!(results[0], Err(DecodeError::Structure { .. })));
    }

    #[test]
    fn test_location_record_missing_coordinate_is_isolated() {
        let content = r#"{"locations": [
            {"latitudeE7": 10000000, "timestampMs": "1454948546904"},
            {"latitudeE7": 10000000, "longitudeE7": 20000000, "timestampMs": "1454948546904"}
        ]}"#;
        let file = write_file(content);
        let results = parse_location_json(file.path());
        assert_eq!(results.len(), 2);
        assert!(matches!(&results[0], Err(DecodeError::Record { message, .. })
            if message.contains("longitudeE7")));
        assert!(results[1].is_ok());
    }

    #[test]
    fn test_semantic_location_happy_path() {
        let content = r#"{"timelineObjects": [
            {"activitySegment": {"whatever": true}},
            {"placeVisit": {
                "location": {"placeId": "ChIJ123", "latitudeE7": 377749000,
                             "longitudeE7": -1224194000, "name": "Somewhere",
                             "locationConfidence": 87.5,
                             "sourceInfo": {"deviceTag": 12345}},
                "duration": {"startTimestamp": "2019-06-01T10:00:00Z",
                             "endTimestamp": "2019-06-01T11:00:00Z"},
                "visitConfidence": 77.0,
                "placeConfidence": "HIGH_CONFIDENCE"
            }}
        ]}"#;
        let file = write_file(content);
        let results = parse_semantic_location_json(file.path());
        // activitySegment entries are skipped, not errors
        assert_eq!(results.len(), 1);
        let Ok(Event::PlaceVisit(v)) = &results[0] else { panic!("expected place visit") };
        assert_eq!(v.place_id, "ChIJ123");
        assert_eq!(v.name.as_deref(), Some("Somewhere"));
        assert_eq!(v.source_info_device_tag, Some(12345));
        assert_eq!(v.visit_confidence, Some(77.0));
    }

    #[test]
    fn test_semantic_location_missing_duration_is_record_error() {
        let content = r#"{"timelineObjects": [
            {"placeVisit": {"location": {"placeId": "x", "latitudeE7": 1, "longitudeE7": 1}}}
        ]}"#;
        let file = write_file(content);
        let results = parse_semantic_location_json(file.path());
        assert_eq!(results.len(), 1);
        assert!(matches!(&results[0], Err(DecodeError::Record { message, .. })
            if message.contains("duration")));
    }

    #[test]
    fn test_semantic_location_incomplete_location_is_skipped() {
        // missing latitudeE7: defensively skipped, not an error
        let content = r#"{"timelineObjects": [
            {"placeVisit": {
                "location": {"placeId": "x", "longitudeE7": 1},
                "duration": {"startTimestamp": "2019-06-01T10:00:00Z",
                             "endTimestamp": "2019-06-01T11:00:00Z"}
            }}
        ]}"#;
        let file = write_file(content);
        let results = parse_semantic_location_json(file.path());
        assert!(results.is_empty());
    }

    #[test]
    fn test_chrome_history_usec_timestamps() {
        let content = r#"{"Browser History": [
            {"title": "Example", "url": "http://example.com/page",
             "time_usec": 1598000000000000, "page_transition": "LINK"}
        ]}"#;
        let file = write_file(content);
        let results = parse_chrome_json(file.path());
        assert_eq!(results.len(), 1);
        let Ok(Event::ChromeHistory(h)) = &results[0] else { panic!("expected chrome history") };
        // history URLs are not https-upgraded
        assert_eq!(h.url, "http://example.com/page");
        assert_eq!(h.dt.timestamp(), 1_598_000_000);
        assert_eq!(h.page_transition.as_deref(), Some("LINK"));
    }

    #[test]
    fn test_app_installs() {
        let content = r#"[
            {"install": {
                "doc": {"documentType": "Android Apps", "title": "Discord"},
                "firstInstallationTime": "2020-03-01T10:00:00Z",
                "lastUpdateTime": "2020-04-01T12:00:00Z",
                "deviceAttribute": {"manufacturer": "Google", "deviceDisplayName": "Pixel"}
            }}
        ]"#;
        let file = write_file(content);
        let results = parse_app_installs_json(file.path());
        let Ok(Event::PlayStoreAppInstall(app)) = &results[0] else { panic!("expected install") };
        assert_eq!(app.title, "Discord");
        assert_eq!(app.device_name.as_deref(), Some("Pixel"));
        assert_eq!(app.device_carrier, None);
        let event = Event::PlayStoreAppInstall(app.clone());
        assert_eq!(event.timestamp(), app.last_update_time);
    }

    #[test]
    fn test_likes() {
        let content = r#"[
            {"contentDetails": {"videoId": "dQw4w9WgXcQ"},
             "snippet": {"title": "A video", "description": "desc",
                         "publishedAt": "2015-10-19T01:03:51.000Z"}}
        ]"#;
        let file = write_file(content);
        let results = parse_likes_json(file.path());
        let Ok(Event::LikedYoutubeVideo(like)) = &results[0] else { panic!("expected like") };
        assert_eq!(like.link, "https://youtube.com/watch?v=dQw4w9WgXcQ");
        assert_eq!(like.title, "A video");
    }

    #[test]
    fn test_keep_note() {
        let content = r#"{
            "title": "Shopping",
            "createdTimestampUsec": 1598000000000000,
            "userEditedTimestampUsec": 1598100000000000,
            "color": "RED",
            "isPinned": true,
            "listContent": [
                {"text": "milk", "textHtml": "<b>milk</b>", "isChecked": false}
            ]
        }"#;
        let file = write_file(content);
        let results = parse_keep_json(file.path());
        assert_eq!(results.len(), 1);
        let Ok(Event::Keep(note)) = &results[0] else { panic!("expected keep note") };
        assert_eq!(note.title, "Shopping");
        assert_eq!(note.color, "RED");
        assert!(note.pinned);
        assert!(!note.trashed);
        let items = note.list_content.as_ref().unwrap();
        assert_eq!(items[0].text, "milk");
        assert!(!items[0].checked);
    }

    #[test]
    fn test_keep_missing_created_timestamp() {
        let file = write_file(r#"{"title": "x", "userEditedTimestampUsec": 1}"#);
        let results = parse_keep_json(file.path());
        assert!(matches!(&results[0], Err(DecodeError::Record { message, .. })
            if message.contains("createdTimestampUsec")));
    }

    #[test]
    fn test_decoded_kinds() {
        let content = r#"{"locations": [
            {"latitudeE7": 10000000, "longitudeE7": 20000000, "timestampMs": "1454948546904"}
        ]}"#;
        let file = write_file(content);
        let results = parse_location_json(file.path());
        assert_eq!(results[0].as_ref().unwrap().kind(), EventKind::Location);
    }
}
