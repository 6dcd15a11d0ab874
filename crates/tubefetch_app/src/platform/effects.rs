use std::sync::{mpsc, Arc};

use tubefetch_core::{DownloadForm, DownloadOutcome, Effect, Msg};
use tubefetch_engine::{
    ApiError, ClientSettings, DownloadRequest, EngineEvent, EngineHandle, EventSink,
};
use tubefetch_logging::{engine_debug, engine_info};

pub struct EffectRunner {
    engine: EngineHandle,
}

impl EffectRunner {
    pub fn new(settings: ClientSettings, msg_tx: mpsc::Sender<Msg>) -> Result<Self, ApiError> {
        let engine = EngineHandle::new(settings, Arc::new(MsgSink { msg_tx }))?;
        Ok(Self { engine })
    }

    /// Hands IO effects to the engine. Returns the navigation target when an
    /// effect asks to leave the form.
    pub fn enqueue(&self, effects: Vec<Effect>) -> Option<String> {
        let mut navigate_to = None;
        for effect in effects {
            match effect {
                Effect::SubmitDownload { form } => {
                    engine_info!("SubmitDownload url_len={} url={}", form.url.len(), form.url);
                    self.engine.submit(to_request(&form));
                }
                Effect::StartPolling => self.engine.start_polling(),
                Effect::StopPolling => self.engine.stop_polling(),
                Effect::CancelDownload => self.engine.cancel_download(),
                Effect::Navigate { location } => {
                    engine_info!("Navigate location={}", location);
                    navigate_to = Some(location);
                }
            }
        }
        navigate_to
    }
}

struct MsgSink {
    msg_tx: mpsc::Sender<Msg>,
}

impl EventSink for MsgSink {
    fn emit(&self, event: EngineEvent) {
        if let EngineEvent::LogsFetched { tick, lines } = &event {
            engine_debug!("Poll tick {} returned {} line(s)", tick, lines.len());
        }
        let _ = self.msg_tx.send(map_event(event));
    }
}

fn to_request(form: &DownloadForm) -> DownloadRequest {
    DownloadRequest {
        fields: form
            .fields()
            .into_iter()
            .map(|(name, value)| (name.to_string(), value.to_string()))
            .collect(),
    }
}

fn map_event(event: EngineEvent) -> Msg {
    match event {
        EngineEvent::LogsFetched { lines, .. } => Msg::LogsReceived(lines),
        EngineEvent::DownloadCompleted(Ok(response)) => Msg::DownloadFinished(DownloadOutcome {
            success: response.success,
            message: response.message,
        }),
        EngineEvent::DownloadCompleted(Err(err)) => Msg::DownloadFailed(err.to_string()),
    }
}
