//! SVG rendering of the overlay bar chart.
//!
//! The same markup drives the on-screen chart and the PNG export, so what gets downloaded is
//! exactly what is shown.

use std::fmt::Write;

use crate::core::format::{format_n, format_pct};
use crate::core::ChartModel;

use super::fonts::{self, FontWeight};
use super::utils::{escape_xml, nice_ceiling, wrap_label, BASELINE_FILL};

pub(crate) const CHART_WIDTH: f64 = 960.0;
pub(crate) const CHART_HEIGHT: f64 = 420.0;
pub(crate) const EXPORT_WIDTH: f64 = 1040.0;

const MARGIN_TOP: f64 = 28.0;
const MARGIN_RIGHT: f64 = 20.0;
const MARGIN_LEFT: f64 = 56.0;
const AXIS_LABEL_AREA: f64 = 86.0;
const LABEL_CHARS: usize = 18;
const LABEL_LINES: usize = 4;
const FONT_FAMILY: &str = "Inter, Helvetica, Arial, sans-serif";

/// Chart body only, sized with a `viewBox` so it scales to its container.
pub fn chart_svg(model: &ChartModel, accent: &str) -> String {
    let mut out = String::new();
    let _ = write!(
        out,
        "<svg xmlns='http://www.w3.org/2000/svg' viewBox='0 0 {CHART_WIDTH} {CHART_HEIGHT}' \
         width='100%' role='img' font-family='{FONT_FAMILY}'>"
    );
    write_plot(&mut out, model, accent, 0.0, 0.0);
    out.push_str("</svg>");
    out
}

/// Fixed-size SVG document ready for rasterizing.
#[derive(Debug, Clone, PartialEq)]
pub struct SvgSnapshot {
    pub markup: String,
    pub width: f64,
    pub height: f64,
}

/// Standalone snapshot for export: title, cohort sizes, overlay note, chart, and legend.
pub fn export_svg(model: &ChartModel, accent: &str) -> SvgSnapshot {
    let pad = 40.0;
    let title_size = 22.0;
    let title_metrics = fonts::measure(title_size);
    let title_lines = wrap_label(
        &model.prompt,
        fonts::chars_per_line(EXPORT_WIDTH - pad * 2.0, title_size, FontWeight::Bold),
        3,
    );

    let mut y = pad + title_metrics.asc;
    let mut header = String::new();
    for line in &title_lines {
        let _ = write!(
            header,
            "<text x='{pad}' y='{y}' font-size='{title_size}' font-weight='{}' fill='#111'>{}</text>",
            FontWeight::Bold.css_value(),
            escape_xml(line)
        );
        y += title_metrics.line_h;
    }

    let meta = format!(
        "Baseline {} • Filtered {}",
        format_n(model.baseline_n),
        format_n(model.filtered_n)
    );
    let _ = write!(
        header,
        "<text x='{pad}' y='{y}' font-size='13' font-weight='{}' fill='#666'>{}</text>",
        FontWeight::Regular.css_value(),
        escape_xml(&meta)
    );
    y += fonts::measure(13.0).line_h + 8.0;

    if model.overlay_hidden {
        let _ = write!(
            header,
            "<rect x='{pad}' y='{y}' width='{}' height='34' rx='10' fill='#fff7ed' stroke='#fed7aa'/>\
             <text x='{}' y='{}' font-size='13' font-weight='{}' fill='#9a3412'>{}</text>",
            EXPORT_WIDTH - pad * 2.0,
            pad + 12.0,
            y + 22.0,
            FontWeight::Bold.css_value(),
            escape_xml(&model.overlay_note)
        );
        y += 46.0;
    }

    let plot_top = y;
    let legend_y = plot_top + CHART_HEIGHT + 24.0;
    let height = legend_y + pad;

    let mut out = String::new();
    let _ = write!(
        out,
        "<svg xmlns='http://www.w3.org/2000/svg' width='{EXPORT_WIDTH}' height='{height}' \
         viewBox='0 0 {EXPORT_WIDTH} {height}' font-family='{FONT_FAMILY}'>\
         <rect width='{EXPORT_WIDTH}' height='{height}' fill='#ffffff'/>"
    );
    out.push_str(&header);
    write_plot(&mut out, model, accent, pad, plot_top);
    let _ = write!(
        out,
        "<text x='{pad}' y='{legend_y}' font-size='12' font-weight='{}' fill='#666'>{}</text></svg>",
        FontWeight::Regular.css_value(),
        escape_xml(
            "Gray bars show overall distribution (baseline). Colored overlay shows filtered distribution."
        )
    );

    SvgSnapshot {
        markup: out,
        width: EXPORT_WIDTH,
        height,
    }
}

fn write_plot(out: &mut String, model: &ChartModel, accent: &str, dx: f64, dy: f64) {
    let show_overlay = !model.overlay_hidden;
    let plot_left = dx + MARGIN_LEFT;
    let plot_top = dy + MARGIN_TOP;
    let plot_w = CHART_WIDTH - MARGIN_LEFT - MARGIN_RIGHT;
    let plot_h = CHART_HEIGHT - MARGIN_TOP - AXIS_LABEL_AREA;
    let plot_bottom = plot_top + plot_h;

    let max_pct = model
        .baseline
        .iter()
        .map(|row| row.pct)
        .chain(
            model
                .filtered
                .iter()
                .filter(|_| show_overlay)
                .map(|row| row.pct),
        )
        .fold(0.0_f64, f64::max);
    let y_max = nice_ceiling(max_pct);
    let scale = |pct: f64| (pct.clamp(0.0, y_max) / y_max) * plot_h;

    let mut tick = 0.0;
    while tick <= y_max {
        let ty = plot_bottom - scale(tick);
        let _ = write!(
            out,
            "<line x1='{plot_left}' y1='{ty}' x2='{}' y2='{ty}' stroke='#eee'/>\
             <text x='{}' y='{}' font-size='11' font-weight='{}' fill='#666' \
             text-anchor='end'>{tick}%</text>",
            plot_left + plot_w,
            plot_left - 8.0,
            ty + 4.0,
            FontWeight::Regular.css_value()
        );
        tick += 10.0;
    }

    let count = model.baseline.len().max(1) as f64;
    let band = plot_w / count;
    let group_w = band * 0.72;
    let bar_w = if show_overlay { group_w / 2.0 } else { group_w };
    let label_metrics = fonts::measure(12.0);

    for (idx, base) in model.baseline.iter().enumerate() {
        let band_x = plot_left + band * idx as f64;
        let center = band_x + band / 2.0;
        let group_x = center - group_w / 2.0;

        let base_h = scale(base.pct);
        let _ = write!(
            out,
            "<rect x='{group_x}' y='{}' width='{bar_w}' height='{base_h}' rx='6' fill='{BASELINE_FILL}'>\
             <title>Baseline: {} ({})</title></rect>",
            plot_bottom - base_h,
            format_pct(base.pct),
            format_n(base.count)
        );

        if show_overlay {
            if let Some(filtered) = model.filtered.get(idx) {
                let fx = group_x + bar_w;
                let fh = scale(filtered.pct);
                let _ = write!(
                    out,
                    "<rect x='{fx}' y='{}' width='{bar_w}' height='{fh}' rx='6' fill='{}'>\
                     <title>Filtered: {} ({})</title></rect>",
                    plot_bottom - fh,
                    escape_xml(accent),
                    format_pct(filtered.pct),
                    format_n(filtered.count)
                );
                if model.show_n_on_bars {
                    let _ = write!(
                        out,
                        "<text x='{}' y='{}' font-size='12' font-weight='{}' fill='#111' \
                         text-anchor='middle'>{}</text>",
                        fx + bar_w / 2.0,
                        plot_bottom - fh - 6.0,
                        FontWeight::Bold.css_value(),
                        filtered.count
                    );
                }
            }
        }

        let mut ly = plot_bottom + 10.0 + label_metrics.asc;
        for line in wrap_label(&base.label, LABEL_CHARS, LABEL_LINES) {
            let _ = write!(
                out,
                "<text x='{center}' y='{ly}' font-size='12' font-weight='{}' fill='#333' \
                 text-anchor='middle'>{}</text>",
                FontWeight::SemiBold.css_value(),
                escape_xml(&line)
            );
            ly += label_metrics.line_h - 1.0;
        }
    }

    let _ = write!(
        out,
        "<line x1='{plot_left}' y1='{plot_bottom}' x2='{}' y2='{plot_bottom}' stroke='#999'/>",
        plot_left + plot_w
    );
}
