use dioxus::prelude::*;

use crate::core::TopicConfig;

#[derive(Debug, Clone, PartialEq)]
pub struct TopicTab {
    pub id: String,
    pub label: String,
}

impl TopicTab {
    pub fn from_config(config: &TopicConfig) -> Vec<TopicTab> {
        config
            .topics
            .iter()
            .map(|topic| TopicTab {
                id: topic.id.clone(),
                label: topic.display_label().to_string(),
            })
            .collect()
    }
}

#[component]
pub fn TopicTabs(
    topics: Vec<TopicTab>,
    active: String,
    accent: String,
    on_select: EventHandler<String>,
) -> Element {
    rsx! {
        nav { class: "topic-tabs",
            for tab in topics.into_iter() {
                {render_tab(tab, &active, &accent, on_select)}
            }
        }
    }
}

fn render_tab(tab: TopicTab, active: &str, accent: &str, on_select: EventHandler<String>) -> Element {
    let is_active = tab.id == active;
    let class_name = if is_active {
        "topic-tabs__tab topic-tabs__tab--active"
    } else {
        "topic-tabs__tab"
    };
    let style = if is_active {
        format!("border-color: {accent};")
    } else {
        String::new()
    };
    let TopicTab { id, label } = tab;
    let key = id.clone();

    rsx! {
        button {
            key: "{key}",
            r#type: "button",
            class: class_name,
            style: "{style}",
            onclick: move |_| on_select.call(id.clone()),
            "{label}"
        }
    }
}
