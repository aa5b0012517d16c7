use std::rc::Rc;

use dioxus::prelude::*;

use crate::core::{
    load_all, parse_url_state, platform, AppSettings, ChartModel, LoadedData, SessionAction,
    SessionState,
};
use crate::dashboard::{
    accent_for, ChartActions, ChartPanel, FilterGroup, FiltersPanel, TopicTab, TopicTabs,
};

const FALLBACK_TITLE: &str = "ESCRS Clinical Trends Survey 2025";

/// Loaded documents shared by reference; equality is identity.
#[derive(Clone)]
pub struct SharedData(pub Rc<LoadedData>);

impl PartialEq for SharedData {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

/// Loads both survey documents, then hands over to the dashboard.
#[component]
pub fn Explorer() -> Element {
    let loaded = use_resource(|| async move {
        load_all(&AppSettings::from_env())
            .await
            .map(|data| SharedData(Rc::new(data)))
            .map_err(|err| err.to_string())
    });

    match &*loaded.read_unchecked() {
        Some(Ok(data)) => rsx! {
            Dashboard { data: data.clone() }
        },
        Some(Err(err)) => rsx! {
            section { class: "page page-explorer",
                div { class: "explorer-card explorer__error",
                    h2 { "Couldn't load the survey" }
                    p { "{err}" }
                }
            }
        },
        None => rsx! {
            section { class: "page page-explorer",
                p { class: "explorer__loading", "Loading…" }
            }
        },
    }
}

#[component]
fn Dashboard(data: SharedData) -> Element {
    let session = use_signal({
        let data = data.clone();
        move || SessionState::initial(parse_url_state(&platform::current_search()), &data.0.config)
    });

    use_effect(move || {
        let state = session.read();
        if state.topic_id.is_empty() {
            return;
        }
        platform::replace_query(&state.query_string());
    });

    let chart = use_memo({
        let data = data.clone();
        move || {
            let state = session.read();
            ChartModel::derive(
                &data.0.config,
                &data.0.respondents,
                &state.topic_id,
                &state.filters,
            )
        }
    });

    let groups = use_memo({
        let data = data.clone();
        move || FilterGroup::build(&data.0.config.filters, &data.0.respondents)
    });

    let config = &data.0.config;
    let title = if config.dataset.label.is_empty() {
        FALLBACK_TITLE.to_string()
    } else {
        config.dataset.label.clone()
    };
    let tabs = TopicTab::from_config(config);
    let active_topic = chart
        .read()
        .as_ref()
        .map(|model| model.topic_id.clone())
        .unwrap_or_else(|| session.read().topic_id.clone());
    let accent = accent_for(&active_topic).to_string();
    let model = chart();

    rsx! {
        section { class: "page page-explorer",
            header { class: "explorer__header",
                div {
                    h1 { class: "explorer__title", "{title}" }
                    p { class: "explorer__subtitle",
                        "Blank responses excluded. Overlay hidden when filtered n < 10."
                    }
                }
                if let Some(model) = model.clone() {
                    ChartActions { model, accent: accent.clone() }
                }
            }

            TopicTabs {
                topics: tabs,
                active: active_topic.clone(),
                accent: accent.clone(),
                on_select: move |topic_id: String| {
                    crate::dashboard::dispatch(session, SessionAction::SelectTopic(topic_id))
                },
            }

            div { class: "explorer__panels",
                aside { class: "explorer-card",
                    FiltersPanel {
                        groups: groups(),
                        filter_ids: config.filter_ids(),
                        session,
                        accent: accent.clone(),
                    }
                }
                if let Some(model) = model {
                    ChartPanel { model, accent: accent.clone() }
                } else {
                    div { class: "explorer-card",
                        p { class: "explorer__placeholder", "This topic has no questions configured yet." }
                    }
                }
            }
        }
    }
}
