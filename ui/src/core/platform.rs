//! Browser/desktop glue: address bar, share link, gate flag, and future spawning.

#[cfg(not(target_arch = "wasm32"))]
use once_cell::sync::Lazy;
#[cfg(not(target_arch = "wasm32"))]
use std::sync::Mutex;

#[cfg(not(target_arch = "wasm32"))]
static LAST_QUERY: Lazy<Mutex<String>> = Lazy::new(|| Mutex::new(String::new()));
#[cfg(not(target_arch = "wasm32"))]
static GATE_FLAG: Lazy<Mutex<Option<String>>> = Lazy::new(|| Mutex::new(None));

#[cfg(target_arch = "wasm32")]
const GATE_STORAGE_KEY: &str = "escrs_auth";

/// The query string the session should start from.
#[cfg(target_arch = "wasm32")]
pub fn current_search() -> String {
    web_sys::window()
        .and_then(|window| window.location().search().ok())
        .unwrap_or_default()
}

/// First CLI argument, when it looks like a shared query string.
#[cfg(not(target_arch = "wasm32"))]
pub fn current_search() -> String {
    std::env::args()
        .nth(1)
        .filter(|arg| looks_like_query(arg))
        .unwrap_or_default()
}

#[cfg(not(target_arch = "wasm32"))]
fn looks_like_query(arg: &str) -> bool {
    arg.starts_with('?') || arg.contains("topic=")
}

/// Replace (never push) the current history entry with `?qs`.
#[cfg(target_arch = "wasm32")]
pub fn replace_query(qs: &str) {
    let Some(window) = web_sys::window() else {
        return;
    };
    let pathname = window.location().pathname().unwrap_or_default();
    let url = if qs.is_empty() {
        pathname
    } else {
        format!("{pathname}?{qs}")
    };
    if let Ok(history) = window.history() {
        if history
            .replace_state_with_url(&wasm_bindgen::JsValue::NULL, "", Some(&url))
            .is_err()
        {
            tracing::warn!(%url, "history.replaceState rejected");
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
pub fn replace_query(qs: &str) {
    if let Ok(mut slot) = LAST_QUERY.lock() {
        *slot = qs.to_string();
    }
}

/// Link that restores the current view.
#[cfg(target_arch = "wasm32")]
pub fn share_link() -> String {
    web_sys::window()
        .and_then(|window| window.location().href().ok())
        .unwrap_or_default()
}

#[cfg(not(target_arch = "wasm32"))]
pub fn share_link() -> String {
    let qs = LAST_QUERY.lock().map(|slot| slot.clone()).unwrap_or_default();
    if qs.is_empty() {
        qs
    } else {
        format!("?{qs}")
    }
}

#[cfg(target_arch = "wasm32")]
pub fn stored_access_code() -> Option<String> {
    web_sys::window()
        .and_then(|window| window.local_storage().ok().flatten())
        .and_then(|storage| storage.get_item(GATE_STORAGE_KEY).ok().flatten())
}

#[cfg(not(target_arch = "wasm32"))]
pub fn stored_access_code() -> Option<String> {
    GATE_FLAG.lock().ok().and_then(|slot| slot.clone())
}

#[cfg(target_arch = "wasm32")]
pub fn store_access_code(code: &str) {
    if let Some(storage) = web_sys::window().and_then(|window| window.local_storage().ok().flatten())
    {
        let _ = storage.set_item(GATE_STORAGE_KEY, code);
    }
}

#[cfg(not(target_arch = "wasm32"))]
pub fn store_access_code(code: &str) {
    if let Ok(mut slot) = GATE_FLAG.lock() {
        *slot = Some(code.to_string());
    }
}

#[cfg(target_arch = "wasm32")]
pub fn spawn_future<F>(future: F)
where
    F: std::future::Future<Output = ()> + 'static,
{
    wasm_bindgen_futures::spawn_local(future);
}
