use dioxus::prelude::*;

use crate::core::format::format_n;
use crate::core::ChartModel;

use super::svg::chart_svg;

/// Gray baseline bars with the filtered series drawn beside them in the topic accent.
#[component]
pub fn OverlayBarChart(model: ChartModel, accent: String) -> Element {
    let markup = chart_svg(&model, &accent);

    rsx! {
        div { class: "overlay-chart", dangerous_inner_html: "{markup}" }
    }
}

#[component]
pub fn ChartPanel(model: ChartModel, accent: String) -> Element {
    let baseline_n = format_n(model.baseline_n);
    let filtered_n = format_n(model.filtered_n);
    let prompt = model.prompt.clone();
    let note = model.overlay_note.clone();
    let hidden = model.overlay_hidden;

    rsx! {
        section { class: "explorer-card chart-panel",
            div { class: "chart-panel__header",
                h2 { class: "chart-panel__title", "{prompt}" }
                span { class: "chart-panel__meta", "Baseline {baseline_n} • Filtered {filtered_n}" }
            }

            if hidden {
                p { class: "chart-panel__notice", "{note}" }
            }

            OverlayBarChart { model, accent }

            p { class: "chart-panel__legend",
                "Gray bars show overall distribution (baseline). Colored overlay shows filtered distribution. Counts shown above colored bars only."
            }
        }
    }
}
