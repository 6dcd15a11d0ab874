use crate::DownloadForm;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// POST the form to the download endpoint.
    SubmitDownload { form: DownloadForm },
    StartPolling,
    StopPolling,
    /// Abort the in-flight download request.
    CancelDownload,
    /// Move to the result view.
    Navigate { location: String },
}
