//! Dashboard components: topic tabs, filter panel, overlay chart, and chart actions.
//!
//! Components only read engine output and dispatch `SessionAction`s; every rule lives in `core`.

mod charts;
pub use charts::{ChartPanel, OverlayBarChart};

mod export;
pub use export::{ChartActions, ExportError};

mod filters_panel;
pub use filters_panel::{FilterGroup, FiltersPanel};

mod topic_tabs;
pub use topic_tabs::{TopicTab, TopicTabs};

mod fonts;
mod svg;
pub use svg::{chart_svg, export_svg, SvgSnapshot};

mod utils;
pub use utils::{accent_for, DEFAULT_ACCENT};

use dioxus::prelude::*;

use crate::core::{SessionAction, SessionState};

/// Apply `action` to the session signal.
pub(crate) fn dispatch(mut session: Signal<SessionState>, action: SessionAction) {
    tracing::debug!(?action, "session action");
    let next = session.peek().clone().reduce(action);
    session.set(next);
}
