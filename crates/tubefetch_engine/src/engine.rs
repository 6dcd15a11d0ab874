use std::sync::{mpsc, Arc};
use std::thread;
use std::time::Duration;

use tokio::runtime::Handle;
use tokio_util::sync::CancellationToken;
use tubefetch_logging::{engine_error, engine_info, engine_warn};

use crate::poller::{spawn_poller, EventSink, PollSlot};
use crate::{
    ApiError, ClientSettings, DownloadApi, DownloadRequest, EngineEvent, FailureKind,
    ReqwestDownloadApi,
};

enum EngineCommand {
    Submit { request: DownloadRequest },
    StartPolling,
    StopPolling,
    CancelDownload,
}

/// Runs download requests and the log poll on a dedicated tokio runtime.
///
/// Dropping the handle shuts the runtime thread down, which stops any poll
/// still running.
pub struct EngineHandle {
    cmd_tx: mpsc::Sender<EngineCommand>,
}

impl EngineHandle {
    pub fn new(settings: ClientSettings, sink: Arc<dyn EventSink>) -> Result<Self, ApiError> {
        let poll_interval = settings.poll_interval;
        let api = Arc::new(ReqwestDownloadApi::new(settings)?);
        Self::with_api(api, poll_interval, sink)
    }

    /// Starts the engine thread. Fails if its runtime cannot be built.
    pub fn with_api(
        api: Arc<dyn DownloadApi>,
        poll_interval: Duration,
        sink: Arc<dyn EventSink>,
    ) -> Result<Self, ApiError> {
        let runtime = tokio::runtime::Runtime::new().map_err(runtime_error)?;
        let (cmd_tx, cmd_rx) = mpsc::channel();

        thread::spawn(move || {
            let mut worker = EngineWorker {
                runtime: runtime.handle().clone(),
                api,
                poll_interval,
                sink,
                poll: PollSlot::new(),
                download: None,
            };
            while let Ok(command) = cmd_rx.recv() {
                worker.handle(command);
            }
            worker.shutdown();
        });

        Ok(Self { cmd_tx })
    }

    pub fn submit(&self, request: DownloadRequest) {
        self.send(EngineCommand::Submit { request });
    }

    pub fn start_polling(&self) {
        self.send(EngineCommand::StartPolling);
    }

    pub fn stop_polling(&self) {
        self.send(EngineCommand::StopPolling);
    }

    pub fn cancel_download(&self) {
        self.send(EngineCommand::CancelDownload);
    }

    fn send(&self, command: EngineCommand) {
        if self.cmd_tx.send(command).is_err() {
            engine_warn!("Engine thread is gone; command dropped");
        }
    }
}

struct EngineWorker {
    runtime: Handle,
    api: Arc<dyn DownloadApi>,
    poll_interval: Duration,
    sink: Arc<dyn EventSink>,
    poll: PollSlot,
    download: Option<CancellationToken>,
}

impl EngineWorker {
    fn handle(&mut self, command: EngineCommand) {
        match command {
            EngineCommand::Submit { request } => {
                engine_info!("Submitting download with {} field(s)", request.fields.len());
                let cancel = CancellationToken::new();
                if let Some(previous) = self.download.replace(cancel.clone()) {
                    previous.cancel();
                }
                let api = self.api.clone();
                let sink = self.sink.clone();
                self.runtime.spawn(async move {
                    let result = api.submit(&request, &cancel).await;
                    match &result {
                        Ok(response) => engine_info!(
                            "Download finished success={} message={}",
                            response.success,
                            response.message
                        ),
                        Err(err) => engine_warn!("Download request failed: {}", err),
                    }
                    sink.emit(EngineEvent::DownloadCompleted(result));
                });
            }
            EngineCommand::StartPolling => {
                let handle = spawn_poller(
                    &self.runtime,
                    self.api.clone(),
                    self.poll_interval,
                    self.sink.clone(),
                );
                self.poll.start(handle);
            }
            EngineCommand::StopPolling => {
                if !self.poll.stop() {
                    engine_warn!("Stop requested but no log poll was running");
                }
            }
            EngineCommand::CancelDownload => match self.download.take() {
                Some(cancel) => {
                    engine_info!("Cancelling download request");
                    cancel.cancel();
                }
                None => engine_warn!("Cancel requested but no download is in flight"),
            },
        }
    }

    fn shutdown(&mut self) {
        self.poll.stop();
        if let Some(cancel) = self.download.take() {
            cancel.cancel();
        }
    }
}

fn runtime_error(err: std::io::Error) -> ApiError {
    engine_error!("Failed to start engine runtime: {}", err);
    ApiError::new(FailureKind::Runtime, err.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn runtime_failure_becomes_api_error() {
        let err = runtime_error(std::io::Error::other("no threads"));
        assert_eq!(err.kind, FailureKind::Runtime);
        assert_eq!(err.to_string(), "runtime unavailable: no threads");
    }
}
