//! Explicit session state container with a pure reducer.
//!
//! The view keeps one `SessionState` in a signal, dispatches `SessionAction`s, and writes
//! `query_string()` back to the address bar after every transition.

use serde::Serialize;

use super::model::{FilterSelection, FilterState, TopicConfig};
use super::url_state::{to_query_string, UrlState};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SessionState {
    pub topic_id: String,
    pub filters: FilterState,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionAction {
    SelectTopic(String),
    /// Checkbox click in the filter panel.
    ToggleValue { filter_id: String, value: String },
    SelectAllValues {
        filter_id: String,
        values: Vec<String>,
    },
    ClearFilter(String),
    ClearAll,
    /// Explicit `all` for every configured filter.
    ResetBaseline { filter_ids: Vec<String> },
}

impl SessionState {
    /// Startup state: the URL wins, then the configured default topic.
    pub fn initial(url: UrlState, config: &TopicConfig) -> Self {
        let topic_id = url
            .topic
            .filter(|topic| !topic.is_empty())
            .unwrap_or_else(|| config.default_topic_id());
        Self {
            topic_id,
            filters: url.filters,
        }
    }

    pub fn reduce(mut self, action: SessionAction) -> Self {
        match action {
            SessionAction::SelectTopic(topic_id) => {
                self.topic_id = topic_id;
            }
            SessionAction::ToggleValue { filter_id, value } => {
                let mut selected = match self.filters.remove(&filter_id) {
                    Some(FilterSelection::Multi { values }) => values,
                    _ => Vec::new(),
                };
                if let Some(pos) = selected.iter().position(|v| *v == value) {
                    selected.remove(pos);
                } else {
                    selected.push(value);
                }
                let next = if selected.is_empty() {
                    FilterSelection::All
                } else {
                    FilterSelection::Multi { values: selected }
                };
                self.filters.insert(filter_id, next);
            }
            SessionAction::SelectAllValues { filter_id, values } => {
                self.filters
                    .insert(filter_id, FilterSelection::Multi { values });
            }
            SessionAction::ClearFilter(filter_id) => {
                self.filters.insert(filter_id, FilterSelection::All);
            }
            SessionAction::ClearAll => {
                self.filters.clear();
            }
            SessionAction::ResetBaseline { filter_ids } => {
                self.filters = filter_ids
                    .into_iter()
                    .map(|id| (id, FilterSelection::All))
                    .collect();
            }
        }
        self
    }

    pub fn query_string(&self) -> String {
        to_query_string(&self.topic_id, &self.filters)
    }

    /// Values currently ticked for a filter. Only multi selections are shown as ticked.
    pub fn selected_values(&self, filter_id: &str) -> &[String] {
        match self.filters.get(filter_id) {
            Some(FilterSelection::Multi { values }) => values,
            _ => &[],
        }
    }
}
