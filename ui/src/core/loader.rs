//! Loading the configuration and respondent documents.
//!
//! Both documents are requested at the same time and both must succeed; a failure is
//! reported once and never retried.

use std::io;

use thiserror::Error;

use super::model::{Respondent, TopicConfig};
use super::settings::AppSettings;

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to fetch {path}: {message}")]
    Fetch { path: String, message: String },

    #[error("failed to load {path}: HTTP {status}")]
    Status { path: String, status: u16 },

    #[error("failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: io::Error,
    },

    #[error("failed to parse {what}: {source}")]
    Parse {
        what: &'static str,
        #[source]
        source: serde_json::Error,
    },
}

/// Both documents, ready for the engine.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LoadedData {
    pub config: TopicConfig,
    pub respondents: Vec<Respondent>,
}

pub fn parse_config(text: &str) -> Result<TopicConfig, LoadError> {
    serde_json::from_str(text).map_err(|source| LoadError::Parse {
        what: "config",
        source,
    })
}

pub fn parse_respondents(text: &str) -> Result<Vec<Respondent>, LoadError> {
    serde_json::from_str(text).map_err(|source| LoadError::Parse {
        what: "respondents",
        source,
    })
}

pub async fn load_all(settings: &AppSettings) -> Result<LoadedData, LoadError> {
    let config_path = settings.config_url();
    let data_path = settings.data_url();
    tracing::info!(config = %config_path, data = %data_path, "loading survey documents");

    let (config_text, data_text) = futures::join!(fetch_text(&config_path), fetch_text(&data_path));

    let loaded = config_text
        .and_then(|text| parse_config(&text))
        .and_then(|config| {
            let respondents = data_text.and_then(|text| parse_respondents(&text))?;
            Ok(LoadedData {
                config,
                respondents,
            })
        });

    match &loaded {
        Ok(data) => tracing::info!(
            topics = data.config.topics.len(),
            filters = data.config.filters.len(),
            respondents = data.respondents.len(),
            "survey documents loaded"
        ),
        Err(err) => tracing::error!(%err, "survey documents failed to load"),
    }
    loaded
}

#[cfg(not(target_arch = "wasm32"))]
async fn fetch_text(path: &str) -> Result<String, LoadError> {
    std::fs::read_to_string(path).map_err(|source| LoadError::Io {
        path: path.to_string(),
        source,
    })
}

#[cfg(target_arch = "wasm32")]
async fn fetch_text(path: &str) -> Result<String, LoadError> {
    use wasm_bindgen::JsCast;
    use wasm_bindgen_futures::JsFuture;

    let fetch_err = |message: &str| LoadError::Fetch {
        path: path.to_string(),
        message: message.to_string(),
    };

    let window = web_sys::window().ok_or_else(|| fetch_err("window unavailable"))?;
    let response = JsFuture::from(window.fetch_with_str(path))
        .await
        .map_err(|_| fetch_err("network request failed"))?;
    let response: web_sys::Response = response
        .dyn_into()
        .map_err(|_| fetch_err("unexpected fetch result"))?;

    if !response.ok() {
        return Err(LoadError::Status {
            path: path.to_string(),
            status: response.status(),
        });
    }

    let body = response.text().map_err(|_| fetch_err("body unavailable"))?;
    JsFuture::from(body)
        .await
        .map_err(|_| fetch_err("body read failed"))?
        .as_string()
        .ok_or_else(|| fetch_err("body is not text"))
}
