//! Locale-variant product area tables.
//!
//! Export bundles name their directories in the account's locale ("My
//! Activity" vs "Meine Aktivitäten"). Each product area owns an ordered list
//! of directory-name patterns, one per supported locale (or one pattern
//! covering related locales via alternation). Patterns are matched
//! case-sensitively against whole path segments, never against the full
//! path, because absolute nesting depth varies between bundles.

use regex::Regex;
use thiserror::Error;

/// Product areas the dispatcher knows how to decode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProductArea {
    Chrome,
    LocationHistory,
    MyActivity,
    YouTube,
    PlayStore,
    Keep,
}

/// A path segment matched more than one product area: a pattern-table bug,
/// never a runtime condition to paper over.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("path segment '{segment}' matches multiple product areas ({first:?} and {second:?})")]
pub struct AmbiguousDispatch {
    pub segment: String,
    pub first: ProductArea,
    pub second: ProductArea,
}

struct AreaRule {
    area: ProductArea,
    /// Locale-variant directories carry regex patterns; locale-invariant
    /// ones (Play Store, Keep) a single exact name. Only the former are
    /// reported by [`LocaleTable::locale_directory_patterns`].
    localized: bool,
    patterns: &'static [&'static str],
    compiled: Vec<Regex>,
}

/// The immutable pattern tables, loaded once and passed explicitly.
pub struct LocaleTable {
    rules: Vec<AreaRule>,
}

const AREA_PATTERNS: &[(ProductArea, bool, &[&str])] = &[
    (ProductArea::Chrome, true, &["Chrome"]),
    (
        ProductArea::LocationHistory,
        true,
        &["Location History", r"Location History \(Timeline\)"],
    ),
    (ProductArea::MyActivity, true, &["My Activity", "Meine Aktivitäten"]),
    (
        ProductArea::YouTube,
        true,
        &["YouTube( and YouTube Music)?", "YouTube( und YouTube Music)?"],
    ),
    (ProductArea::PlayStore, false, &["Google Play Store"]),
    (ProductArea::Keep, false, &["Keep"]),
];

impl LocaleTable {
    pub fn new() -> Self {
        Self::from_rules(AREA_PATTERNS)
    }

    fn from_rules(table: &[(ProductArea, bool, &'static [&'static str])]) -> Self {
        let rules = table
            .iter()
            .map(|&(area, localized, patterns)| AreaRule {
                area,
                localized,
                patterns,
                compiled: patterns
                    .iter()
                    // whole-segment match: "Location History" must not also
                    // claim "Location History (Timeline)"
                    .map(|p| Regex::new(&format!("^(?:{p})$")).expect("valid locale pattern"))
                    .collect(),
            })
            .collect();
        LocaleTable { rules }
    }

    /// The locale-variant directory-name patterns, sorted. Stable across
    /// releases; a regression test pins the literal list.
    pub fn locale_directory_patterns(&self) -> Vec<&'static str> {
        let mut patterns: Vec<&'static str> = self
            .rules
            .iter()
            .filter(|rule| rule.localized)
            .flat_map(|rule| rule.patterns.iter().copied())
            .collect();
        patterns.sort_unstable();
        patterns
    }

    /// The area owning a single path segment, if any.
    pub fn area_for_segment(&self, segment: &str) -> Result<Option<ProductArea>, AmbiguousDispatch> {
        let mut found: Option<ProductArea> = None;
        for rule in &self.rules {
            if rule.compiled.iter().any(|re| re.is_match(segment)) {
                match found {
                    None => found = Some(rule.area),
                    Some(first) if first != rule.area => {
                        return Err(AmbiguousDispatch {
                            segment: segment.to_string(),
                            first,
                            second: rule.area,
                        });
                    }
                    Some(_) => {}
                }
            }
        }
        Ok(found)
    }

    /// Walk the segments of a relative path and return the first matching
    /// area together with the index of the segment that matched.
    ///
    /// Only the first matching segment is consulted: "My Activity/Chrome/…"
    /// belongs to My Activity, the nested "Chrome" names a sub-area of it.
    pub fn classify_segments(
        &self,
        segments: &[&str],
    ) -> Result<Option<(ProductArea, usize)>, AmbiguousDispatch> {
        for (idx, segment) in segments.iter().enumerate() {
            if let Some(area) = self.area_for_segment(segment)? {
                return Ok(Some((area, idx)));
            }
        }
        Ok(None)
    }
}

impl Default for LocaleTable {
    fn default() -> Self {
        Self::new()
    }
}
