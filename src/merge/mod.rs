//! Cross-export merge with duplicate collapse.
//!
//! Multiple Takeout exports of the same account overlap heavily; merging
//! collapses events that carry the same identity key so a combined timeline
//! contains each real-world event once.

use std::collections::HashMap;

use crate::models::{EventKey, EventKind, ParseResult};

/// Which representative survives when two events share an identity key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DedupPolicy {
    /// Later arrivals replace earlier ones. Later exports tend to carry
    /// richer records for the same event, so this is the default.
    #[default]
    LastWins,
    /// The first arrival is kept and later duplicates are dropped.
    FirstWins,
}

/// Merge result streams from several exports into one deduplicated stream.
///
/// Events are grouped by `(EventKind, EventKey)`; one representative
/// survives per group, chosen by `policy`, and keeps its first-arrival
/// position for ordering. Errors are never deduplicated. Output carries
/// all errors first in arrival order, then events sorted by timestamp
/// with arrival order breaking ties.
pub fn merge_events(streams: Vec<Vec<ParseResult>>, policy: DedupPolicy) -> Vec<ParseResult> {
    let mut errors = Vec::new();
    let mut events = Vec::new();
    let mut seen: HashMap<(EventKind, EventKey), usize> = HashMap::new();

    for result in streams.into_iter().flatten() {
        match result {
            Err(error) => errors.push(error),
            Ok(event) => {
                let group = (event.kind(), event.key());
                match seen.get(&group) {
                    Some(&index) => {
                        if policy == DedupPolicy::LastWins {
                            events[index] = event;
                        }
                    }
                    None => {
                        seen.insert(group, events.len());
                        events.push(event);
                    }
                }
            }
        }
    }

    let mut indexed: Vec<(usize, _)> = events.into_iter().enumerate().collect();
    indexed.sort_by(|(ia, a), (ib, b)| a.timestamp().cmp(&b.timestamp()).then(ia.cmp(ib)));

    errors
        .into_iter()
        .map(Err)
        .chain(indexed.into_iter().map(|(_, event)| Ok(event)))
        .collect()
}
