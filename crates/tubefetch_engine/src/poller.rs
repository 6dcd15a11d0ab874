use std::sync::{mpsc, Arc};
use std::time::Duration;

use tokio::runtime::Handle;
use tokio::time::{Instant, MissedTickBehavior};
use tokio_util::sync::CancellationToken;
use tubefetch_logging::{engine_debug, engine_warn};

use crate::{DownloadApi, EngineEvent};

pub trait EventSink: Send + Sync {
    fn emit(&self, event: EngineEvent);
}

pub struct ChannelEventSink {
    tx: mpsc::Sender<EngineEvent>,
}

impl ChannelEventSink {
    pub fn new(tx: mpsc::Sender<EngineEvent>) -> Self {
        Self { tx }
    }
}

impl EventSink for ChannelEventSink {
    fn emit(&self, event: EngineEvent) {
        let _ = self.tx.send(event);
    }
}

/// The running poll task. Dropping the handle cancels the task.
pub struct PollHandle {
    cancel: CancellationToken,
}

impl PollHandle {
    pub fn stop(self) {
        self.cancel.cancel();
    }
}

impl Drop for PollHandle {
    fn drop(&mut self) {
        self.cancel.cancel();
    }
}

/// Owner of the single active poll. Starting a new poll stops the old one.
#[derive(Default)]
pub struct PollSlot {
    active: Option<PollHandle>,
}

impl PollSlot {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn start(&mut self, handle: PollHandle) {
        if self.stop() {
            engine_warn!("Replacing a log poll that was still running");
        }
        self.active = Some(handle);
    }

    /// Returns whether a poll was running.
    pub fn stop(&mut self) -> bool {
        match self.active.take() {
            Some(handle) => {
                handle.stop();
                true
            }
            None => false,
        }
    }

    pub fn is_active(&self) -> bool {
        self.active.is_some()
    }
}

/// Spawns the poll loop on `runtime`. The first request goes out one
/// `interval` after the call, then every `interval` until cancelled.
pub fn spawn_poller(
    runtime: &Handle,
    api: Arc<dyn DownloadApi>,
    interval: Duration,
    sink: Arc<dyn EventSink>,
) -> PollHandle {
    let cancel = CancellationToken::new();
    runtime.spawn(poll_loop(api, interval, sink, cancel.clone()));
    PollHandle { cancel }
}

async fn poll_loop(
    api: Arc<dyn DownloadApi>,
    interval: Duration,
    sink: Arc<dyn EventSink>,
    cancel: CancellationToken,
) {
    let mut ticker = tokio::time::interval_at(Instant::now() + interval, interval);
    // A slow request pushes the schedule back instead of bunching ticks up.
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
    let mut tick: u64 = 0;

    loop {
        tokio::select! {
            _ = cancel.cancelled() => break,
            _ = ticker.tick() => {}
        }
        tick += 1;

        let result = tokio::select! {
            _ = cancel.cancelled() => break,
            result = api.fetch_logs() => result,
        };
        match result {
            Ok(Some(lines)) => sink.emit(EngineEvent::LogsFetched { tick, lines }),
            Ok(None) => engine_debug!("Log poll tick {} carried no log list", tick),
            Err(err) => engine_warn!("Log poll tick {} failed: {}", tick, err),
        }
    }
    engine_debug!("Log poll stopped after {} ticks", tick);
}

/// Extracts `logs` from a logs response. Anything but an array of strings
/// yields `None`.
pub fn parse_logs(value: &serde_json::Value) -> Option<Vec<String>> {
    value
        .get("logs")?
        .as_array()?
        .iter()
        .map(|line| line.as_str().map(ToOwned::to_owned))
        .collect()
}
