//! Query-string codec for the shareable session state.
//!
//! Format: `topic=<id>&f_<filterId>=all|<value>|<v1,v2,...>`, form-urlencoded the way a
//! browser's `URLSearchParams` does it. Values are not escaped beyond that, so a comma inside a
//! selected value does not survive a multi-value round trip.

use serde::Serialize;
use url::form_urlencoded;

use super::model::{FilterSelection, FilterState};

const TOPIC_KEY: &str = "topic";
const FILTER_PREFIX: &str = "f_";
const ALL_VALUE: &str = "all";

/// Decoded address-bar state. Either half may be absent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct UrlState {
    pub topic: Option<String>,
    pub filters: FilterState,
}

/// Decode a query string (with or without the leading `?`).
///
/// Unknown filter ids are kept; they simply match no filter definition later on.
/// A repeated `topic` keeps its first value, a repeated filter key its last.
pub fn parse_url_state(search: &str) -> UrlState {
    let query = search.strip_prefix('?').unwrap_or(search);
    let mut state = UrlState::default();

    for (key, value) in form_urlencoded::parse(query.as_bytes()) {
        if key == TOPIC_KEY {
            if state.topic.is_none() {
                state.topic = Some(value.into_owned());
            }
            continue;
        }
        let Some(id) = key.strip_prefix(FILTER_PREFIX) else {
            continue;
        };
        state.filters.insert(id.to_string(), decode_selection(&value));
    }

    tracing::debug!(
        topic = ?state.topic,
        filters = state.filters.len(),
        "decoded url state"
    );
    state
}

fn decode_selection(raw: &str) -> FilterSelection {
    if raw.is_empty() || raw == ALL_VALUE {
        FilterSelection::All
    } else if raw.contains(',') {
        FilterSelection::Multi {
            values: split_csv(raw),
        }
    } else {
        FilterSelection::Single {
            value: Some(raw.to_string()),
        }
    }
}

fn split_csv(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .map(String::from)
        .collect()
}

/// Encode topic and every filter entry present in `filters`.
pub fn to_query_string(topic: &str, filters: &FilterState) -> String {
    let mut serializer = form_urlencoded::Serializer::new(String::new());
    serializer.append_pair(TOPIC_KEY, topic);

    for (id, selection) in filters {
        let key = format!("{FILTER_PREFIX}{id}");
        let value = match selection {
            FilterSelection::All => ALL_VALUE.to_string(),
            FilterSelection::Single { value } => {
                value.clone().unwrap_or_else(|| ALL_VALUE.to_string())
            }
            FilterSelection::Multi { values } => values.join(","),
        };
        serializer.append_pair(&key, &value);
    }

    serializer.finish()
}
