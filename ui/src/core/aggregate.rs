//! Baseline vs. filtered response distributions for the active question.

use std::collections::{BTreeMap, BTreeSet, HashMap};

use serde::Serialize;

use super::filters::apply_filters;
use super::model::{DistRow, FilterState, Respondent, TopicConfig};

/// Inputs for [`build_distributions`].
#[derive(Debug, Clone, Copy)]
pub struct DistributionInput<'a> {
    pub baseline_rows: &'a [&'a Respondent],
    pub filtered_rows: &'a [&'a Respondent],
    pub question_column: &'a str,
    /// Configured option order. Empty means "sorted union of observed keys".
    pub option_order: &'a [String],
    pub label_overrides: Option<&'a BTreeMap<String, String>>,
}

/// Key-aligned distributions for both cohorts.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Distributions {
    pub baseline: Vec<DistRow>,
    pub filtered: Vec<DistRow>,
}

struct Tally {
    counts: HashMap<String, usize>,
    denominator: usize,
}

impl Tally {
    fn count(rows: &[&Respondent], column: &str) -> Self {
        let mut counts = HashMap::new();
        let mut denominator = 0usize;
        for row in rows {
            if let Some(value) = row.cell(column).as_str() {
                *counts.entry(value.to_string()).or_insert(0) += 1;
                denominator += 1;
            }
        }
        Self {
            counts,
            denominator,
        }
    }

    fn rows(&self, keys: &[String], labels: Option<&BTreeMap<String, String>>) -> Vec<DistRow> {
        keys.iter()
            .map(|key| {
                let count = self.counts.get(key).copied().unwrap_or(0);
                DistRow {
                    key: key.clone(),
                    label: labels
                        .and_then(|labels| labels.get(key))
                        .cloned()
                        .unwrap_or_else(|| key.clone()),
                    count,
                    pct: percent(count, self.denominator),
                }
            })
            .collect()
    }
}

fn percent(count: usize, denominator: usize) -> f64 {
    if denominator == 0 {
        0.0
    } else {
        count as f64 / denominator as f64 * 100.0
    }
}

/// Count each option per cohort. Blank answers are skipped and do not enter the denominator.
pub fn build_distributions(input: DistributionInput<'_>) -> Distributions {
    let baseline = Tally::count(input.baseline_rows, input.question_column);
    let filtered = Tally::count(input.filtered_rows, input.question_column);

    let keys: Vec<String> = if input.option_order.is_empty() {
        baseline
            .counts
            .keys()
            .chain(filtered.counts.keys())
            .cloned()
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    } else {
        input.option_order.to_vec()
    };

    Distributions {
        baseline: baseline.rows(&keys, input.label_overrides),
        filtered: filtered.rows(&keys, input.label_overrides),
    }
}

/// Small filtered cohorts are not charted; `threshold` is exclusive.
pub fn overlay_hidden(filtered_n: usize, threshold: usize) -> bool {
    filtered_n < threshold
}

/// Everything the chart needs for the current session state.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ChartModel {
    pub topic_id: String,
    pub question_id: String,
    pub prompt: String,
    pub baseline: Vec<DistRow>,
    pub filtered: Vec<DistRow>,
    pub baseline_n: usize,
    pub filtered_n: usize,
    pub overlay_hidden: bool,
    pub overlay_note: String,
    pub show_n_on_bars: bool,
}

impl ChartModel {
    /// Resolve the active question for `topic_id` and build both cohorts.
    ///
    /// Returns `None` when there is no topic to show or the topic has no questions.
    pub fn derive(
        config: &TopicConfig,
        respondents: &[Respondent],
        topic_id: &str,
        filters: &FilterState,
    ) -> Option<Self> {
        let topic = config.topic(topic_id)?;
        let question = topic.active_question()?;
        let column = question.column.as_str();

        let baseline_rows: Vec<&Respondent> = respondents
            .iter()
            .filter(|row| !row.is_blank(column))
            .collect();

        let filtered_rows: Vec<&Respondent> =
            apply_filters(baseline_rows.iter().copied(), &config.filters, filters)
                .into_iter()
                .filter(|row| !row.is_blank(column))
                .collect();

        let dists = build_distributions(DistributionInput {
            baseline_rows: &baseline_rows,
            filtered_rows: &filtered_rows,
            question_column: column,
            option_order: question.option_order(),
            label_overrides: question.label_overrides(),
        });

        let filtered_n = filtered_rows.len();
        let hidden = overlay_hidden(filtered_n, question.overlay_threshold());
        tracing::debug!(
            topic = %topic.id,
            question = %question.id,
            baseline_n = baseline_rows.len(),
            filtered_n,
            overlay_hidden = hidden,
            "derived chart model"
        );

        Some(Self {
            topic_id: topic.id.clone(),
            question_id: question.id.clone(),
            prompt: question.prompt.clone(),
            baseline_n: baseline_rows.len(),
            filtered_n,
            baseline: dists.baseline,
            filtered: dists.filtered,
            overlay_hidden: hidden,
            overlay_note: question.overlay_note(),
            show_n_on_bars: question.show_n_on_bars(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::model::FilterSelection;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn answers(values: &[serde_json::Value]) -> Vec<Respondent> {
        values
            .iter()
            .map(|value| Respondent::from_pairs([("q", value.clone())]))
            .collect()
    }

    fn round2(value: f64) -> f64 {
        (value * 100.0).round() / 100.0
    }

    #[test]
    fn baseline_excludes_blanks_from_denominator() {
        let data = answers(&[json!("Yes"), json!("No"), json!("Yes"), json!("")]);
        let refs: Vec<&Respondent> = data.iter().collect();
        let order = vec!["Yes".to_string(), "No".to_string()];
        let dists = build_distributions(DistributionInput {
            baseline_rows: &refs,
            filtered_rows: &refs,
            question_column: "q",
            option_order: &order,
            label_overrides: None,
        });

        let summary: Vec<(&str, usize, f64)> = dists
            .baseline
            .iter()
            .map(|row| (row.key.as_str(), row.count, round2(row.pct)))
            .collect();
        assert_eq!(summary, vec![("Yes", 2, 66.67), ("No", 1, 33.33)]);
    }

    #[test]
    fn configured_order_keeps_unobserved_options() {
        let data = answers(&[json!("Yes")]);
        let refs: Vec<&Respondent> = data.iter().collect();
        let order = vec!["Yes".to_string(), "No".to_string(), "Unsure".to_string()];
        let dists = build_distributions(DistributionInput {
            baseline_rows: &refs,
            filtered_rows: &[],
            question_column: "q",
            option_order: &order,
            label_overrides: None,
        });
        assert_eq!(dists.baseline.len(), 3);
        assert_eq!(dists.baseline[2].count, 0);
        assert_eq!(dists.baseline[2].pct, 0.0);
        assert!(dists.filtered.iter().all(|row| row.count == 0 && row.pct == 0.0));
    }

    #[test]
    fn fallback_order_is_sorted_union_of_both_cohorts() {
        let base = answers(&[json!("b"), json!("a")]);
        let filt = answers(&[json!("c")]);
        let base_refs: Vec<&Respondent> = base.iter().collect();
        let filt_refs: Vec<&Respondent> = filt.iter().collect();
        let dists = build_distributions(DistributionInput {
            baseline_rows: &base_refs,
            filtered_rows: &filt_refs,
            question_column: "q",
            option_order: &[],
            label_overrides: None,
        });
        let keys: Vec<&str> = dists.baseline.iter().map(|r| r.key.as_str()).collect();
        assert_eq!(keys, vec!["a", "b", "c"]);
        let filtered_keys: Vec<&str> = dists.filtered.iter().map(|r| r.key.as_str()).collect();
        assert_eq!(keys, filtered_keys);
    }

    #[test]
    fn label_overrides_apply_to_both_cohorts() {
        let data = answers(&[json!("1"), json!("2")]);
        let refs: Vec<&Respondent> = data.iter().collect();
        let labels = BTreeMap::from([("1".to_string(), "Strongly agree".to_string())]);
        let dists = build_distributions(DistributionInput {
            baseline_rows: &refs,
            filtered_rows: &refs,
            question_column: "q",
            option_order: &[],
            label_overrides: Some(&labels),
        });
        assert_eq!(dists.baseline[0].label, "Strongly agree");
        assert_eq!(dists.filtered[0].label, "Strongly agree");
        assert_eq!(dists.baseline[1].label, "2");
    }

    #[test]
    fn whole_float_answers_count_toward_configured_keys() {
        let data = answers(&[json!(5.0), json!(5), json!(3.0)]);
        let refs: Vec<&Respondent> = data.iter().collect();
        let order = vec!["3".to_string(), "5".to_string()];
        let dists = build_distributions(DistributionInput {
            baseline_rows: &refs,
            filtered_rows: &refs,
            question_column: "q",
            option_order: &order,
            label_overrides: None,
        });
        let counts: Vec<usize> = dists.baseline.iter().map(|row| row.count).collect();
        assert_eq!(counts, vec![1, 2]);
    }

    #[test]
    fn overlay_threshold_is_exclusive() {
        assert!(overlay_hidden(7, 10));
        assert!(!overlay_hidden(10, 10));
        assert!(!overlay_hidden(0, 0));
    }

    fn config() -> TopicConfig {
        serde_json::from_value(json!({
            "version": "1",
            "dataset": {"id": "escrs", "label": "ESCRS"},
            "filters": [{"id": "region", "label": "Region", "column": "region", "type": "single_select"}],
            "topics": [{
                "id": "phaco",
                "label": "Phaco",
                "question_set": [
                    {"id": "q0", "column": "other", "prompt": "Other"},
                    {"id": "q1", "is_default": true, "column": "q", "prompt": "Do you?",
                     "response": {"order": ["Yes", "No"]},
                     "chart": {"hide_overlay_if_filtered_n_lt": 2}}
                ]
            }]
        }))
        .unwrap()
    }

    #[test]
    fn derive_uses_default_question_and_filtered_cohort() {
        let data = vec![
            Respondent::from_pairs([("q", json!("Yes")), ("region", json!("EU"))]),
            Respondent::from_pairs([("q", json!("No")), ("region", json!("EU"))]),
            Respondent::from_pairs([("q", json!("Yes")), ("region", json!("US"))]),
            Respondent::from_pairs([("q", json!(" ")), ("region", json!("EU"))]),
        ];
        let mut filters = FilterState::new();
        filters.insert("region".into(), FilterSelection::single("EU"));

        let model = ChartModel::derive(&config(), &data, "phaco", &filters).unwrap();
        assert_eq!(model.question_id, "q1");
        assert_eq!(model.baseline_n, 3);
        assert_eq!(model.filtered_n, 2);
        assert!(!model.overlay_hidden);
        assert_eq!(model.filtered[0].count, 1);
        assert_eq!(model.filtered[0].pct, 50.0);
    }

    #[test]
    fn derive_hides_overlay_below_threshold() {
        let data = vec![Respondent::from_pairs([("q", json!("Yes")), ("region", json!("EU"))])];
        let model = ChartModel::derive(&config(), &data, "unknown", &FilterState::new()).unwrap();
        assert_eq!(model.topic_id, "phaco");
        assert_eq!(model.filtered_n, 1);
        assert!(model.overlay_hidden);
    }

    #[test]
    fn derive_without_topics_yields_nothing() {
        assert!(ChartModel::derive(&TopicConfig::default(), &[], "x", &FilterState::new()).is_none());
    }
}
