//! Shared UI crate for the ESCRS survey explorer. The engine and all cross-platform views live here.

pub mod core;
pub mod dashboard;
pub mod views;

use dioxus::prelude::*;

/// Shared theme (ui/assets/theme/main.css).
pub const THEME_CSS: Asset = asset!("/assets/theme/main.css");
