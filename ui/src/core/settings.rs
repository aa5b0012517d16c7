//! Where the survey documents live and how the access gate is keyed.

pub const CONFIG_FILE: &str = "data/topic_config.json";
pub const RESPONDENTS_FILE: &str = "data/respondents.min.json";
pub const DEFAULT_ACCESS_CODE: &str = "tfg123";

#[cfg(not(debug_assertions))]
const DEFAULT_BASE_PATH: &str = "/escrs-survey-tool";
#[cfg(debug_assertions)]
const DEFAULT_BASE_PATH: &str = "";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppSettings {
    /// URL prefix on the web, directory prefix on desktop.
    pub base_path: String,
    pub config_path: String,
    pub data_path: String,
    pub access_code: String,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            base_path: DEFAULT_BASE_PATH.to_string(),
            config_path: CONFIG_FILE.to_string(),
            data_path: RESPONDENTS_FILE.to_string(),
            access_code: DEFAULT_ACCESS_CODE.to_string(),
        }
    }
}

impl AppSettings {
    #[cfg(target_arch = "wasm32")]
    pub fn from_env() -> Self {
        Self::default()
    }

    /// Defaults, overridden by `ESCRS_DATA_DIR` and `ESCRS_ACCESS_CODE`.
    #[cfg(not(target_arch = "wasm32"))]
    pub fn from_env() -> Self {
        let mut settings = Self {
            base_path: String::new(),
            ..Self::default()
        };
        if let Ok(dir) = std::env::var("ESCRS_DATA_DIR") {
            settings.base_path = dir;
        }
        if let Ok(code) = std::env::var("ESCRS_ACCESS_CODE") {
            if !code.trim().is_empty() {
                settings.access_code = code;
            }
        }
        settings
    }

    pub fn config_url(&self) -> String {
        join_path(&self.base_path, &self.config_path)
    }

    pub fn data_url(&self) -> String {
        join_path(&self.base_path, &self.data_path)
    }
}

fn join_path(base: &str, relative: &str) -> String {
    let relative = relative.trim_start_matches('/');
    if base.is_empty() {
        #[cfg(target_arch = "wasm32")]
        return format!("/{relative}");
        #[cfg(not(target_arch = "wasm32"))]
        return relative.to_string();
    }
    format!("{}/{relative}", base.trim_end_matches('/'))
}
