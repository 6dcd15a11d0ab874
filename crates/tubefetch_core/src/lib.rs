//! Tubefetch core: pure state machine and view-model helpers.
mod classify;
mod effect;
mod form;
mod log_buffer;
mod msg;
mod state;
mod update;
mod validate;
mod view_model;

pub use classify::{classify_line, LineStyle, StyledLine};
pub use effect::Effect;
pub use form::{result_location, DownloadForm, DownloadOutcome, URL_FIELD};
pub use log_buffer::LogBuffer;
pub use msg::Msg;
pub use state::{AppState, FormState, Phase};
pub use update::update;
pub use validate::{validate_url, UrlValidity, REQUIRED_SCHEME};
pub use view_model::AppViewModel;
