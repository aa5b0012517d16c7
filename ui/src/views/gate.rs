//! Access-code prompt shown before the explorer. A convenience gate, not a security boundary.

use dioxus::prelude::*;

use crate::core::{platform, AppSettings};

pub fn access_granted(candidate: &str, expected: &str) -> bool {
    !expected.is_empty() && candidate == expected
}

#[component]
pub fn AccessGate(children: Element) -> Element {
    let expected = use_hook(|| AppSettings::from_env().access_code);
    let mut unlocked = use_signal({
        let expected = expected.clone();
        move || {
            platform::stored_access_code()
                .is_some_and(|stored| access_granted(&stored, &expected))
        }
    });
    let mut attempt = use_signal(String::new);
    let mut rejected = use_signal(|| false);

    if unlocked() {
        return children;
    }

    rsx! {
        section { class: "page page-gate",
            form {
                class: "gate-card",
                onsubmit: move |evt: FormEvent| {
                    evt.prevent_default();
                    let candidate = attempt();
                    if access_granted(&candidate, &expected) {
                        platform::store_access_code(&candidate);
                        rejected.set(false);
                        unlocked.set(true);
                        tracing::info!("access granted");
                    } else {
                        rejected.set(true);
                    }
                },
                h1 { class: "gate-card__title", "ESCRS Survey Explorer" }
                p { class: "gate-card__hint", "Enter the access code to continue." }
                input {
                    r#type: "password",
                    class: "gate-card__input",
                    placeholder: "Access code",
                    value: "{attempt}",
                    oninput: move |evt| attempt.set(evt.value()),
                }
                button { r#type: "submit", class: "button button--primary", "Enter" }
                if rejected() {
                    p { class: "gate-card__error", "Incorrect access code. Please try again." }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_exact_code_unlocks() {
        assert!(access_granted("tfg123", "tfg123"));
        assert!(!access_granted("TFG123", "tfg123"));
        assert!(!access_granted("", ""));
    }
}
