#![cfg(test)]
/*!
Theme selector lint for the desktop build.

Ensures the selectors the explorer components emit remain present in the shared theme
(`ui/assets/theme/main.css`). A substring check is enough to catch a refactor that drops
or renames a class before it silently degrades a packaged desktop build.

When you rename a class in a component, adjust REQUIRED_SELECTORS accordingly.
*/

const THEME_CSS: &str = include_str!(concat!(
    env!("CARGO_MANIFEST_DIR"),
    "/../ui/assets/theme/main.css"
));

const REQUIRED_SELECTORS: &[&str] = &[
    // Global / layout
    ":root",
    "body {",
    ".page {",
    ".page-gate",
    // Buttons
    ".button {",
    ".button--primary",
    ".button--accent",
    ".button--small",
    // Access gate
    ".gate-card",
    ".gate-card__input",
    ".gate-card__error",
    // Explorer shell
    ".explorer__header",
    ".explorer__title",
    ".explorer__panels",
    ".explorer__error",
    ".explorer-card",
    // Topic tabs
    ".topic-tabs",
    ".topic-tabs__tab",
    ".topic-tabs__tab--active",
    // Filters
    ".filters-panel__actions",
    ".filters-panel__group",
    ".filters-panel__options",
    ".filters-panel__option",
    // Chart
    ".chart-panel__header",
    ".chart-panel__meta",
    ".chart-panel__notice",
    ".chart-panel__legend",
    ".overlay-chart",
    // Actions
    ".chart-actions",
    ".chart-actions__status--success",
    ".chart-actions__status--error",
    "@media (max-width: 720px)",
];

#[test]
fn unified_theme_contains_required_selectors() {
    let missing: Vec<&str> = REQUIRED_SELECTORS
        .iter()
        .copied()
        .filter(|sel| !THEME_CSS.contains(sel))
        .collect();

    if !missing.is_empty() {
        panic!(
            "Missing {} required CSS selectors/tokens in unified theme:\n{}",
            missing.len(),
            missing.join("\n")
        );
    }
}

#[test]
fn unified_theme_not_trivially_empty() {
    let non_ws_len = THEME_CSS.chars().filter(|c| !c.is_whitespace()).count();
    assert!(
        non_ws_len > 2_000,
        "Embedded theme appears unexpectedly small ({non_ws_len} non-whitespace chars) – \
         did the file get truncated or path change?"
    );
}
