use dioxus::prelude::*;

use ui::views::{AccessGate, Explorer};

fn main() {
    dioxus::launch(App);
}

#[component]
fn App() -> Element {
    rsx! {
        // Global app resources
        document::Link { rel: "stylesheet", href: ui::THEME_CSS }

        AccessGate {
            Explorer {}
        }
    }
}
