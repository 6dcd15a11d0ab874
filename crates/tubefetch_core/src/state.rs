use crate::view_model::AppViewModel;
use crate::{validate_url, DownloadOutcome, LogBuffer, UrlValidity};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Phase {
    #[default]
    Idle,
    Downloading,
    Done,
    Failed,
    Cancelled,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FormState {
    pub url: String,
    pub validity: UrlValidity,
    pub is_submitting: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AppState {
    form: FormState,
    log: LogBuffer,
    phase: Phase,
    outcome: Option<DownloadOutcome>,
    status: Option<String>,
    dirty: bool,
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn view(&self) -> AppViewModel {
        AppViewModel {
            url: self.form.url.clone(),
            validity: self.form.validity,
            submit_enabled: !self.form.is_submitting,
            phase: self.phase,
            lines: self.log.lines().to_vec(),
            status: self.status.clone(),
            outcome: self.outcome.clone(),
        }
    }

    pub fn form(&self) -> &FormState {
        &self.form
    }

    pub fn log(&self) -> &LogBuffer {
        &self.log
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn is_downloading(&self) -> bool {
        self.phase == Phase::Downloading
    }

    /// Returns whether anything changed since the last call, and resets the flag.
    pub fn consume_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    pub(crate) fn set_url(&mut self, url: String) {
        self.form.validity = validate_url(&url);
        self.form.url = url;
        self.dirty = true;
    }

    pub(crate) fn begin_download(&mut self, url: &str) {
        if self.form.url != url {
            self.set_url(url.to_string());
        }
        self.form.is_submitting = true;
        self.log.clear();
        self.phase = Phase::Downloading;
        self.outcome = None;
        self.status = None;
        self.dirty = true;
    }

    pub(crate) fn append_logs(&mut self, lines: Vec<String>) -> usize {
        let appended = self.log.append_new(lines);
        if appended > 0 {
            self.dirty = true;
        }
        appended
    }

    pub(crate) fn finish_download(&mut self, outcome: DownloadOutcome) {
        self.end_download(Phase::Done);
        self.status = Some(outcome.message.clone());
        self.outcome = Some(outcome);
    }

    pub(crate) fn fail_download(&mut self, reason: String) {
        self.end_download(Phase::Failed);
        self.status = Some(reason);
    }

    pub(crate) fn cancel_download(&mut self) {
        self.end_download(Phase::Cancelled);
        self.status = Some("Download cancelled".to_string());
    }

    fn end_download(&mut self, phase: Phase) {
        self.form.is_submitting = false;
        self.phase = phase;
        self.dirty = true;
    }
}
