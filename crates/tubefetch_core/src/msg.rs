use crate::{DownloadForm, DownloadOutcome};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Msg {
    /// User edited the URL input.
    UrlChanged(String),
    /// User submitted the download form.
    Submitted(DownloadForm),
    /// A poll tick delivered the server's accumulated log lines.
    LogsReceived(Vec<String>),
    /// The download request resolved with a result body.
    DownloadFinished(DownloadOutcome),
    /// The download request failed before yielding a usable body.
    DownloadFailed(String),
    /// User asked to abandon the in-flight download.
    CancelRequested,
    /// The view is going away.
    TornDown,
}
