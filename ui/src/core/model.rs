//! Configuration schema, respondent rows, and the selection/distribution types shared by the engine.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Number, Value};

/// Minimum filtered sample size before the overlay series is shown.
pub const DEFAULT_OVERLAY_THRESHOLD: usize = 10;

pub const DEFAULT_OVERLAY_NOTE: &str = "Filtered results hidden (n < 10). Baseline shown in gray.";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SelectKind {
    #[default]
    SingleSelect,
    MultiSelect,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OrderMode {
    #[default]
    Alpha,
    Custom,
}

/// The whole survey configuration document. Loaded once and never mutated.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TopicConfig {
    #[serde(default)]
    pub version: String,
    #[serde(default)]
    pub dataset: DatasetInfo,
    #[serde(default)]
    pub filters: Vec<FilterDef>,
    #[serde(default)]
    pub topics: Vec<TopicDef>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ui_defaults: Option<UiDefaults>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DatasetInfo {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub label: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UiDefaults {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub active_topic_id: Option<String>,
    #[serde(default)]
    pub active_question_id_by_topic: BTreeMap<String, String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FilterDef {
    pub id: String,
    #[serde(default)]
    pub label: String,
    /// Respondent field this filter reads.
    pub column: String,
    #[serde(rename = "type", default)]
    pub kind: SelectKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ui: Option<FilterUi>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FilterUi {
    #[serde(default)]
    pub order_mode: OrderMode,
    #[serde(default)]
    pub order: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TopicDef {
    pub id: String,
    #[serde(default)]
    pub label: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub short_label: Option<String>,
    #[serde(default)]
    pub question_set: Vec<QuestionDef>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuestionDef {
    pub id: String,
    #[serde(default)]
    pub is_default: bool,
    #[serde(rename = "type", default)]
    pub kind: SelectKind,
    /// Respondent field holding the answer to this question.
    pub column: String,
    #[serde(default)]
    pub prompt: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub response: Option<ResponseSpec>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub chart: Option<ChartSpec>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ResponseSpec {
    #[serde(default)]
    pub exclude_values: Vec<Option<String>>,
    #[serde(default)]
    pub order_mode: OrderMode,
    /// Canonical option order. Options listed here are always charted, even with zero answers.
    #[serde(default)]
    pub order: Vec<String>,
    #[serde(default)]
    pub label_overrides: BTreeMap<String, String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ChartSpec {
    #[serde(default)]
    pub kind: Option<String>,
    #[serde(default)]
    pub show_baseline_gray: Option<bool>,
    #[serde(default)]
    pub overlay_filtered_color: Option<bool>,
    #[serde(default)]
    pub show_n_on_bars: Option<bool>,
    #[serde(default)]
    pub show_n_for: Option<String>,
    #[serde(default)]
    pub hide_overlay_if_filtered_n_lt: Option<usize>,
    #[serde(default)]
    pub hide_overlay_note: Option<String>,
}

impl TopicConfig {
    /// Topic with the given id, falling back to the first configured topic.
    pub fn topic(&self, id: &str) -> Option<&TopicDef> {
        self.topics
            .iter()
            .find(|topic| topic.id == id)
            .or_else(|| self.topics.first())
    }

    pub fn default_topic_id(&self) -> String {
        self.ui_defaults
            .as_ref()
            .and_then(|defaults| defaults.active_topic_id.clone())
            .or_else(|| self.topics.first().map(|topic| topic.id.clone()))
            .unwrap_or_default()
    }

    pub fn filter_ids(&self) -> Vec<String> {
        self.filters.iter().map(|def| def.id.clone()).collect()
    }
}

impl TopicDef {
    /// The question charted for this topic: the first flagged `is_default`, else the first one.
    pub fn active_question(&self) -> Option<&QuestionDef> {
        self.question_set
            .iter()
            .find(|question| question.is_default)
            .or_else(|| self.question_set.first())
    }

    pub fn display_label(&self) -> &str {
        if self.label.is_empty() {
            &self.id
        } else {
            &self.label
        }
    }
}

impl QuestionDef {
    pub fn option_order(&self) -> &[String] {
        self.response
            .as_ref()
            .map(|response| response.order.as_slice())
            .unwrap_or(&[])
    }

    pub fn label_overrides(&self) -> Option<&BTreeMap<String, String>> {
        self.response
            .as_ref()
            .map(|response| &response.label_overrides)
            .filter(|overrides| !overrides.is_empty())
    }

    pub fn overlay_threshold(&self) -> usize {
        self.chart
            .as_ref()
            .and_then(|chart| chart.hide_overlay_if_filtered_n_lt)
            .unwrap_or(DEFAULT_OVERLAY_THRESHOLD)
    }

    pub fn overlay_note(&self) -> String {
        self.chart
            .as_ref()
            .and_then(|chart| chart.hide_overlay_note.clone())
            .unwrap_or_else(|| DEFAULT_OVERLAY_NOTE.to_string())
    }

    pub fn show_n_on_bars(&self) -> bool {
        self.chart
            .as_ref()
            .and_then(|chart| chart.show_n_on_bars)
            .unwrap_or(true)
    }
}

/// Result of reading one column from a respondent row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Cell {
    /// Missing, null, or whitespace-only. A non-answer everywhere in the engine.
    Blank,
    Value(String),
}

impl Cell {
    pub fn is_blank(&self) -> bool {
        matches!(self, Cell::Blank)
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Cell::Blank => None,
            Cell::Value(value) => Some(value.as_str()),
        }
    }
}

/// One survey respondent: an opaque record of column name to scalar.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Respondent {
    fields: Map<String, Value>,
}

impl Respondent {
    pub fn new(fields: Map<String, Value>) -> Self {
        Self { fields }
    }

    pub fn from_pairs<K, V, I>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<Value>,
    {
        Self {
            fields: pairs
                .into_iter()
                .map(|(key, value)| (key.into(), value.into()))
                .collect(),
        }
    }

    /// Stringified value of `column`, or [`Cell::Blank`] for a non-answer.
    pub fn cell(&self, column: &str) -> Cell {
        match self.fields.get(column) {
            None | Some(Value::Null) => Cell::Blank,
            Some(Value::String(text)) if text.trim().is_empty() => Cell::Blank,
            Some(Value::String(text)) => Cell::Value(text.clone()),
            Some(Value::Bool(flag)) => Cell::Value(flag.to_string()),
            Some(Value::Number(number)) => Cell::Value(number_text(number)),
            Some(other) => Cell::Value(other.to_string()),
        }
    }

    pub fn is_blank(&self, column: &str) -> bool {
        self.cell(column).is_blank()
    }
}

/// Largest magnitude below which every integer is exactly representable as `f64`.
const MAX_EXACT_INTEGER: f64 = 9_007_199_254_740_992.0;

/// Whole-valued floats print without a fraction (`5.0` reads as `5`), like JavaScript's `String(n)`.
fn number_text(number: &Number) -> String {
    match number.as_f64() {
        Some(value)
            if number.is_f64()
                && value.is_finite()
                && value.fract() == 0.0
                && value.abs() <= MAX_EXACT_INTEGER =>
        {
            format!("{}", value as i64)
        }
        _ => number.to_string(),
    }
}

/// How one filter constrains the respondent set.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "lowercase")]
pub enum FilterSelection {
    #[default]
    All,
    Single {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        value: Option<String>,
    },
    Multi {
        #[serde(default)]
        values: Vec<String>,
    },
}

impl FilterSelection {
    pub fn single(value: impl Into<String>) -> Self {
        FilterSelection::Single {
            value: Some(value.into()),
        }
    }

    pub fn multi<I, S>(values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        FilterSelection::Multi {
            values: values.into_iter().map(Into::into).collect(),
        }
    }

    /// Whether this selection excludes anything. An unset single value and an empty
    /// multi set both behave like [`FilterSelection::All`].
    pub fn is_active(&self) -> bool {
        match self {
            FilterSelection::All => false,
            FilterSelection::Single { value } => value.as_deref().is_some_and(|v| !v.is_empty()),
            FilterSelection::Multi { values } => !values.is_empty(),
        }
    }

    pub fn contains(&self, value: &str) -> bool {
        match self {
            FilterSelection::All => false,
            FilterSelection::Single { value: selected } => selected.as_deref() == Some(value),
            FilterSelection::Multi { values } => values.iter().any(|v| v == value),
        }
    }
}

/// Filter id to selection. A missing entry means [`FilterSelection::All`].
pub type FilterState = BTreeMap<String, FilterSelection>;

/// One response option within one cohort.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DistRow {
    /// Raw response value.
    pub key: String,
    pub label: String,
    pub count: usize,
    /// 0..=100
    pub pct: f64,
}
