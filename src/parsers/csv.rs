//! Decoders for the newer CSV exports (YouTube comments and live chats).
//!
//! Rows are read positionally after the header row, since the column titles
//! themselves are locale-dependent. The content column carries raw JSON
//! (`takeoutSegments`), kept verbatim.

use std::path::Path;

use csv::{ReaderBuilder, StringRecord};

use super::timestamps::parse_utc_date;
use crate::models::{CsvYoutubeComment, CsvYoutubeLiveChat, DecodeError, Event, ParseResult};

// comments.csv: Comment ID, Channel ID, Comment Create Timestamp, Price,
//               Parent Comment ID, Video ID, Comment Text
const COMMENT_COLUMNS: usize = 7;
// live chats.csv: Live Chat ID, Channel ID, Live Chat Create Timestamp,
//                 Price, Video ID, Live Chat Text
const LIVE_CHAT_COLUMNS: usize = 6;

fn read_rows(path: &Path) -> Result<Vec<Result<StringRecord, DecodeError>>, DecodeError> {
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_path(path)
        .map_err(|e| DecodeError::structure(path, format!("failed to read CSV: {e}")))?;
    Ok(reader
        .records()
        .map(|row| row.map_err(|e| DecodeError::record(path, format!("bad CSV row: {e}"))))
        .collect())
}

fn column<'a>(
    path: &Path,
    row: &'a StringRecord,
    idx: usize,
    name: &str,
) -> Result<&'a str, DecodeError> {
    match row.get(idx).map(str::trim) {
        Some(value) if !value.is_empty() => Ok(value),
        _ => Err(DecodeError::record(path, format!("no '{name}' column value"))),
    }
}

fn optional_column(row: &StringRecord, idx: usize) -> Option<String> {
    row.get(idx).map(str::trim).filter(|v| !v.is_empty()).map(str::to_owned)
}

pub fn parse_youtube_comments_csv(path: &Path) -> Vec<ParseResult> {
    let rows = match read_rows(path) {
        Ok(rows) => rows,
        Err(e) => return vec![Err(e)],
    };
    rows.into_iter()
        .map(|row| row.and_then(|r| decode_comment_row(path, &r)).map(Event::CsvYoutubeComment))
        .collect()
}

fn decode_comment_row(path: &Path, row: &StringRecord) -> Result<CsvYoutubeComment, DecodeError> {
    if row.len() < COMMENT_COLUMNS {
        return Err(DecodeError::record(
            path,
            format!("expected {COMMENT_COLUMNS} columns, got {}", row.len()),
        ));
    }
    let timestamp = column(path, row, 2, "comment create timestamp")?;
    Ok(CsvYoutubeComment {
        comment_id: column(path, row, 0, "comment id")?.to_owned(),
        channel_id: column(path, row, 1, "channel id")?.to_owned(),
        dt: parse_utc_date(timestamp).map_err(|e| DecodeError::record(path, format!("{e:#}")))?,
        price: optional_column(row, 3).filter(|p| p != "0"),
        parent_comment_id: optional_column(row, 4),
        video_id: column(path, row, 5, "video id")?.to_owned(),
        content_json: row.get(6).unwrap_or_default().to_owned(),
    })
}

pub fn parse_youtube_live_chats_csv(path: &Path) -> Vec<ParseResult> {
    let rows = match read_rows(path) {
        Ok(rows) => rows,
        Err(e) => return vec![Err(e)],
    };
    rows.into_iter()
        .map(|row| row.and_then(|r| decode_live_chat_row(path, &r)).map(Event::CsvYoutubeLiveChat))
        .collect()
}

fn decode_live_chat_row(
    path: &Path,
    row: &StringRecord,
) -> Result<CsvYoutubeLiveChat, DecodeError> {
    if row.len() < LIVE_CHAT_COLUMNS {
        return Err(DecodeError::record(
            path,
            format!("expected {LIVE_CHAT_COLUMNS} columns, got {}", row.len()),
        ));
    }
    let timestamp = column(path, row, 2, "live chat create timestamp")?;
    Ok(CsvYoutubeLiveChat {
        live_chat_id: column(path, row, 0, "live chat id")?.to_owned(),
        channel_id: column(path, row, 1, "channel id")?.to_owned(),
        dt: parse_utc_date(timestamp).map_err(|e| DecodeError::record(path, format!("{e:#}")))?,
        price: optional_column(row, 3).filter(|p| p != "0"),
        video_id: column(path, row, 4, "video id")?.to_owned(),
        content_json: row.get(5).unwrap_or_default().to_owned(),
    })
}
