//! Filter evaluation over respondent rows, plus the option lists the filter panel offers.

use std::collections::{BTreeSet, HashMap};

use super::model::{Cell, FilterDef, FilterSelection, FilterState, OrderMode, Respondent};

/// Rows matching every active filter, in input order.
///
/// A blank cell never satisfies an active filter. Filters whose selection is inactive
/// (`all`, an unset single value, an empty multi set) and selections for ids with no
/// definition have no effect.
pub fn apply_filters<'a>(
    rows: impl IntoIterator<Item = &'a Respondent>,
    defs: &[FilterDef],
    state: &FilterState,
) -> Vec<&'a Respondent> {
    let active: Vec<(&FilterDef, &FilterSelection)> = defs
        .iter()
        .filter_map(|def| {
            state
                .get(&def.id)
                .filter(|selection| selection.is_active())
                .map(|selection| (def, selection))
        })
        .collect();

    rows.into_iter()
        .filter(|row| active.iter().all(|(def, selection)| row_matches(row, def, selection)))
        .collect()
}

fn row_matches(row: &Respondent, def: &FilterDef, selection: &FilterSelection) -> bool {
    match row.cell(&def.column) {
        Cell::Blank => false,
        Cell::Value(value) => selection.contains(&value),
    }
}

/// Distinct non-blank values of a filter's column, trimmed and ordered per the filter's UI config.
pub fn filter_options(rows: &[Respondent], def: &FilterDef) -> Vec<String> {
    let values: BTreeSet<String> = rows
        .iter()
        .filter_map(|row| row.cell(&def.column).as_str().map(|v| v.trim().to_string()))
        .collect();
    let mut values: Vec<String> = values.into_iter().collect();

    let custom_order = def
        .ui
        .as_ref()
        .filter(|ui| ui.order_mode == OrderMode::Custom && !ui.order.is_empty())
        .map(|ui| ui.order.as_slice());

    if let Some(order) = custom_order {
        let rank: HashMap<String, usize> = order
            .iter()
            .enumerate()
            .map(|(idx, value)| (normalize_option(value), idx))
            .collect();
        values.sort_by(|a, b| {
            let ra = rank.get(&normalize_option(a)).copied().unwrap_or(usize::MAX);
            let rb = rank.get(&normalize_option(b)).copied().unwrap_or(usize::MAX);
            ra.cmp(&rb).then_with(|| a.cmp(b))
        });
    }

    values
}

/// Trim, map en/em dashes to `-`, collapse whitespace runs. Used only for matching custom orders.
fn normalize_option(value: &str) -> String {
    value
        .trim()
        .replace(['\u{2013}', '\u{2014}'], "-")
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}
