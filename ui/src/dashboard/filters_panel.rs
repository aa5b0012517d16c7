use dioxus::prelude::*;

use crate::core::{filter_options, FilterDef, Respondent, SessionAction, SessionState};

use super::dispatch;

/// A filter and the values respondents actually gave for it.
#[derive(Debug, Clone, PartialEq)]
pub struct FilterGroup {
    pub id: String,
    pub label: String,
    pub values: Vec<String>,
}

impl FilterGroup {
    pub fn build(defs: &[FilterDef], respondents: &[Respondent]) -> Vec<FilterGroup> {
        defs.iter()
            .map(|def| FilterGroup {
                id: def.id.clone(),
                label: def.label.clone(),
                values: filter_options(respondents, def),
            })
            .collect()
    }
}

#[component]
pub fn FiltersPanel(
    groups: Vec<FilterGroup>,
    /// Every configured filter id; "Reset baseline" sets each of them to `all`.
    filter_ids: Vec<String>,
    session: Signal<SessionState>,
    accent: String,
) -> Element {
    rsx! {
        div { class: "filters-panel",
            h2 { class: "filters-panel__title", "Filters" }

            div { class: "filters-panel__actions",
                button {
                    r#type: "button",
                    class: "button",
                    onclick: move |_| dispatch(session, SessionAction::ClearAll),
                    "Clear all"
                }
                button {
                    r#type: "button",
                    class: "button button--accent",
                    style: "background: {accent};",
                    onclick: move |_| dispatch(
                        session,
                        SessionAction::ResetBaseline { filter_ids: filter_ids.clone() },
                    ),
                    "Reset baseline"
                }
            }

            for group in groups.into_iter() {
                {render_group(group, session, &accent)}
            }
        }
    }
}

fn render_group(group: FilterGroup, session: Signal<SessionState>, accent: &str) -> Element {
    let FilterGroup { id, label, values } = group;
    let selected: Vec<String> = session.read().selected_values(&id).to_vec();
    let has_values = !values.is_empty();
    let all_selected = has_values && selected.len() == values.len();
    let select_all_style = if all_selected {
        format!("background: {accent}; color: white;")
    } else {
        String::new()
    };

    let select_all = SessionAction::SelectAllValues {
        filter_id: id.clone(),
        values: values.clone(),
    };
    let clear = SessionAction::ClearFilter(id.clone());
    let group_key = id.clone();

    rsx! {
        div { key: "{group_key}", class: "filters-panel__group",
            div { class: "filters-panel__label", "{label}" }

            div { class: "filters-panel__group-actions",
                button {
                    r#type: "button",
                    class: "button button--small",
                    style: "{select_all_style}",
                    disabled: !has_values,
                    onclick: move |_| dispatch(session, select_all.clone()),
                    "Select all"
                }
                button {
                    r#type: "button",
                    class: "button button--small",
                    onclick: move |_| dispatch(session, clear.clone()),
                    "Clear"
                }
            }

            div { class: "filters-panel__options",
                for value in values.into_iter() {
                    {render_option(id.clone(), value.clone(), selected.contains(&value), session)}
                }
            }
        }
    }
}

fn render_option(
    filter_id: String,
    value: String,
    checked: bool,
    session: Signal<SessionState>,
) -> Element {
    let toggle = SessionAction::ToggleValue {
        filter_id,
        value: value.clone(),
    };

    rsx! {
        label { key: "{value}", class: "filters-panel__option",
            input {
                r#type: "checkbox",
                checked: checked,
                onchange: move |_| dispatch(session, toggle.clone()),
            }
            "{value}"
        }
    }
}
