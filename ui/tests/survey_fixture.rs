//! End-to-end engine checks against a small survey fixture: config parsing, session
//! bootstrap from a shared link, filtering, and chart derivation.

use pretty_assertions::assert_eq;

use ui::core::loader::{parse_config, parse_respondents};
use ui::core::{
    filter_options, parse_url_state, ChartModel, FilterSelection, FilterState, SessionAction,
    SessionState, TopicConfig,
};

const CONFIG: &str = include_str!("fixtures/topic_config.json");
const RESPONDENTS: &str = include_str!("fixtures/respondents.json");

fn fixture() -> (TopicConfig, Vec<ui::core::Respondent>) {
    let config = parse_config(CONFIG).expect("fixture config parses");
    let respondents = parse_respondents(RESPONDENTS).expect("fixture respondents parse");
    (config, respondents)
}

fn counts(rows: &[ui::core::DistRow]) -> Vec<(&str, usize)> {
    rows.iter().map(|row| (row.key.as_str(), row.count)).collect()
}

#[test]
fn default_topic_comes_from_ui_defaults_without_url() {
    let (config, _) = fixture();
    let session = SessionState::initial(parse_url_state(""), &config);
    assert_eq!(session.topic_id, "iol");
    assert!(session.filters.is_empty());
}

#[test]
fn baseline_uses_default_question_and_configured_order() {
    let (config, respondents) = fixture();
    let model = ChartModel::derive(&config, &respondents, "phaco", &FilterState::new())
        .expect("phaco has questions");

    assert_eq!(model.question_id, "phaco_q1");
    assert_eq!(model.prompt, "Preferred phaco technique");
    // Row 10 answers with whitespace only; it is not part of the baseline.
    assert_eq!(model.baseline_n, 11);
    assert_eq!(
        counts(&model.baseline),
        vec![("Divide and conquer", 6), ("Stop and chop", 5), ("Phaco chop", 0)]
    );
    assert_eq!(model.baseline[0].label, "Divide & conquer");
    assert_eq!(model.baseline[2].pct, 0.0);
    assert!(!model.show_n_on_bars);
    assert_eq!(model.filtered_n, model.baseline_n);
}

#[test]
fn shared_link_restores_filters_and_hides_small_overlay() {
    let (config, respondents) = fixture();
    let url = parse_url_state("?topic=phaco&f_practice=Private+practice");
    let session = SessionState::initial(url, &config);
    assert_eq!(session.topic_id, "phaco");
    assert_eq!(
        session.filters.get("practice"),
        Some(&FilterSelection::single("Private practice"))
    );

    let model = ChartModel::derive(&config, &respondents, &session.topic_id, &session.filters)
        .expect("phaco has questions");
    assert_eq!(model.filtered_n, 6);
    // Configured threshold of 7 hides a cohort of 6.
    assert!(model.overlay_hidden);
    assert_eq!(
        counts(&model.filtered),
        vec![("Divide and conquer", 4), ("Stop and chop", 2), ("Phaco chop", 0)]
    );
}

#[test]
fn overlay_visible_once_cohort_reaches_threshold() {
    let (config, respondents) = fixture();
    let session = SessionState::initial(parse_url_state("topic=phaco"), &config)
        .reduce(SessionAction::ToggleValue {
            filter_id: "practice".into(),
            value: "Private practice".into(),
        })
        .reduce(SessionAction::ToggleValue {
            filter_id: "practice".into(),
            value: "University".into(),
        });
    assert_eq!(
        session.filters.get("practice"),
        Some(&FilterSelection::multi(["Private practice", "University"]))
    );

    let model = ChartModel::derive(&config, &respondents, &session.topic_id, &session.filters)
        .expect("phaco has questions");
    assert_eq!(model.filtered_n, 9);
    assert!(!model.overlay_hidden);
    assert_eq!(
        model.filtered.iter().map(|row| &row.key).collect::<Vec<_>>(),
        model.baseline.iter().map(|row| &row.key).collect::<Vec<_>>()
    );
}

#[test]
fn default_threshold_applies_when_not_configured() {
    let (config, respondents) = fixture();
    let mut filters = FilterState::new();
    filters.insert("age".into(), FilterSelection::multi(["30-40", "41-50"]));

    let model = ChartModel::derive(&config, &respondents, "iol", &filters).expect("iol has questions");
    // Row 6 has a null IOL answer and drops out of both cohorts.
    assert_eq!(model.baseline_n, 10);
    assert_eq!(model.filtered_n, 5);
    assert!(model.overlay_hidden);
    assert!(model.show_n_on_bars);
    assert_eq!(
        counts(&model.baseline),
        vec![("EDOF", 2), ("Monofocal", 6), ("Toric", 2)]
    );
}

#[test]
fn unknown_topic_in_url_falls_back_to_first_topic() {
    let (config, respondents) = fixture();
    let session = SessionState::initial(parse_url_state("?topic=retina"), &config);
    let model = ChartModel::derive(&config, &respondents, &session.topic_id, &session.filters)
        .expect("falls back to a configured topic");
    assert_eq!(model.topic_id, "phaco");
}

#[test]
fn filter_options_follow_custom_order_with_dash_normalisation() {
    let (config, respondents) = fixture();
    let age = &config.filters[0];
    assert_eq!(
        filter_options(&respondents, age),
        vec!["<30", "30-40", "41-50", ">50"]
    );

    let practice = &config.filters[1];
    assert_eq!(
        filter_options(&respondents, practice),
        vec!["Private practice", "Public hospital", "University"]
    );
}

#[test]
fn reset_baseline_round_trips_through_query_string() {
    let (config, _) = fixture();
    let session = SessionState::initial(parse_url_state("topic=phaco&f_age=30-40%2C41-50"), &config)
        .reduce(SessionAction::ResetBaseline {
            filter_ids: config.filter_ids(),
        });

    let query = session.query_string();
    assert_eq!(query, "topic=phaco&f_age=all&f_practice=all");

    let restored = SessionState::initial(parse_url_state(&query), &config);
    assert_eq!(restored, session);
}
