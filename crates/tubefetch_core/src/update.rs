use crate::{result_location, AppState, Effect, Msg};

/// Pure update function: applies a message to state and returns any effects.
pub fn update(mut state: AppState, msg: Msg) -> (AppState, Vec<Effect>) {
    let effects = match msg {
        Msg::UrlChanged(url) => {
            state.set_url(url);
            Vec::new()
        }
        Msg::Submitted(form) => {
            // The disabled submit control is the only guard against a second job.
            if state.form().is_submitting {
                return (state, Vec::new());
            }
            state.begin_download(&form.url);
            vec![Effect::SubmitDownload { form }, Effect::StartPolling]
        }
        Msg::LogsReceived(lines) => {
            // Ticks already queued when polling stopped must not grow the buffer.
            if state.is_downloading() {
                state.append_logs(lines);
            }
            Vec::new()
        }
        Msg::DownloadFinished(outcome) => {
            if !state.is_downloading() {
                return (state, Vec::new());
            }
            let location = result_location(&outcome);
            state.finish_download(outcome);
            vec![Effect::StopPolling, Effect::Navigate { location }]
        }
        Msg::DownloadFailed(reason) => {
            if !state.is_downloading() {
                return (state, Vec::new());
            }
            state.fail_download(reason);
            vec![Effect::StopPolling]
        }
        Msg::CancelRequested => {
            if !state.is_downloading() {
                return (state, Vec::new());
            }
            state.cancel_download();
            vec![Effect::CancelDownload, Effect::StopPolling]
        }
        Msg::TornDown => {
            if state.is_downloading() {
                vec![Effect::StopPolling]
            } else {
                Vec::new()
            }
        }
    };

    (state, effects)
}
