use crate::{DownloadOutcome, Phase, StyledLine, UrlValidity};

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AppViewModel {
    pub url: String,
    pub validity: UrlValidity,
    pub submit_enabled: bool,
    pub phase: Phase,
    pub lines: Vec<StyledLine>,
    pub status: Option<String>,
    pub outcome: Option<DownloadOutcome>,
}
