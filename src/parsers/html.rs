//! Decoder for the legacy HTML "My Activity" export.
//!
//! Older takeouts (and any current takeout where the HTML format was picked)
//! store activity as one `div.outer-cell` block per record: a title
//! paragraph carrying the product header, a body cell with the title line,
//! optional subtitle lines and the date line separated by `<br>`, and a
//! caption cell listing products and details.
//!
//! There is no way to tell a description apart from a subtitle in this
//! format, so descriptions come through as subtitles.

use std::fs;
use std::path::Path;

use scraper::node::Node;
use scraper::{ElementRef, Html, Selector};

use super::https::upgrade_to_https_opt;
use super::timestamps::parse_html_date;
use crate::models::{Activity, DecodeError, Event, ParseResult, Subtitle};

fn selector(css: &str) -> Selector {
    Selector::parse(css).expect("valid selector")
}

/// Decode an HTML activity export into one event per outer cell.
pub fn parse_activity_html(path: &Path) -> Vec<ParseResult> {
    let text = match fs::read_to_string(path) {
        Ok(t) => t,
        Err(e) => {
            return vec![Err(DecodeError::structure(path, format!("failed to read file: {e}")))];
        }
    };
    let doc = Html::parse_document(&text);
    let outer = selector("div.outer-cell");
    let cells: Vec<ElementRef> = doc.select(&outer).collect();
    if cells.is_empty() {
        return vec![Err(DecodeError::structure(path, "no activity cells found"))];
    }
    cells.into_iter().map(|cell| decode_cell(path, cell).map(Event::Activity)).collect()
}

fn decode_cell(path: &Path, cell: ElementRef) -> Result<Activity, DecodeError> {
    let title_p = selector("p.mdl-typography--title");
    let content = selector("div.content-cell");

    let header = cell
        .select(&title_p)
        .next()
        .map(|el| el.text().collect::<String>().trim().to_string())
        .filter(|s| !s.is_empty())
        .ok_or_else(|| DecodeError::record(path, "activity cell has no header"))?;

    let mut body = None;
    let mut caption = None;
    for div in cell.select(&content) {
        let classes: Vec<&str> = div.value().classes().collect();
        if classes.contains(&"mdl-typography--caption") {
            caption.get_or_insert(div);
        } else if classes.contains(&"mdl-typography--body-1")
            && !classes.contains(&"mdl-typography--text-right")
        {
            body.get_or_insert(div);
        }
    }
    let body = body.ok_or_else(|| DecodeError::record(path, "activity cell has no body"))?;

    let (lines, title_url) = cell_lines(body);
    if lines.len() < 2 {
        return Err(DecodeError::record(path, "activity cell has no title and date lines"));
    }
    let title = lines[0].clone();
    let date_line = lines.last().expect("checked non-empty");
    let time = parse_html_date(date_line).map_err(|e| DecodeError::record(path, format!("{e:#}")))?;
    let subtitles = lines[1..lines.len() - 1]
        .iter()
        .map(|line| Subtitle { name: line.clone(), url: None })
        .collect();

    let mut products = Vec::new();
    let mut details = Vec::new();
    if let Some(caption) = caption {
        for (label, values) in caption_sections(caption) {
            match label.as_str() {
                "Products:" => products = values,
                "Details:" => details = values,
                _ => {}
            }
        }
    }

    Ok(Activity {
        header,
        title,
        time,
        description: None,
        title_url: upgrade_to_https_opt(title_url),
        subtitles,
        details,
        location_infos: Vec::new(),
        products,
    })
}

/// Split a content cell into text lines on `<br>` boundaries and capture the
/// first link target.
fn cell_lines(cell: ElementRef) -> (Vec<String>, Option<String>) {
    let mut lines = Vec::new();
    let mut current = String::new();
    let mut first_link = None;

    let mut flush = |current: &mut String, lines: &mut Vec<String>| {
        let line = normalize_whitespace(current);
        if !line.is_empty() {
            lines.push(line);
        }
        current.clear();
    };

    for child in cell.children() {
        match child.value() {
            Node::Text(text) => current.push_str(text),
            Node::Element(el) if el.name() == "br" => flush(&mut current, &mut lines),
            Node::Element(el) => {
                if el.name() == "a" && first_link.is_none() {
                    first_link = el.attr("href").map(str::to_owned);
                }
                if let Some(el_ref) = ElementRef::wrap(child) {
                    current.push_str(&el_ref.text().collect::<String>());
                }
            }
            _ => {}
        }
    }
    flush(&mut current, &mut lines);
    (lines, first_link)
}

/// Caption cells interleave `<b>Label:</b>` markers with the values that
/// belong to them.
fn caption_sections(cell: ElementRef) -> Vec<(String, Vec<String>)> {
    let mut sections: Vec<(String, Vec<String>)> = Vec::new();
    for child in cell.children() {
        match child.value() {
            Node::Element(el) if el.name() == "b" => {
                let label = ElementRef::wrap(child)
                    .map(|e| e.text().collect::<String>().trim().to_string())
                    .unwrap_or_default();
                sections.push((label, Vec::new()));
            }
            Node::Text(text) => {
                let value = normalize_whitespace(text);
                if !value.is_empty()
                    && let Some((_, values)) = sections.last_mut()
                {
                    values.push(value);
                }
            }
            _ => {}
        }
    }
    sections
}

fn normalize_whitespace(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}
