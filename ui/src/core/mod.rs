//! Platform-agnostic survey engine: config model, filtering, distributions, and URL state.

pub mod aggregate;
pub mod filters;
pub mod format;
pub mod loader;
pub mod model;
pub mod platform;
pub mod session;
pub mod settings;
pub mod url_state;

pub use aggregate::{build_distributions, overlay_hidden, ChartModel, DistributionInput, Distributions};
pub use filters::{apply_filters, filter_options};
pub use loader::{load_all, LoadError, LoadedData};
pub use model::{
    Cell, DistRow, FilterDef, FilterSelection, FilterState, QuestionDef, Respondent, TopicConfig,
    TopicDef,
};
pub use session::{SessionAction, SessionState};
pub use settings::AppSettings;
pub use url_state::{parse_url_state, to_query_string, UrlState};
