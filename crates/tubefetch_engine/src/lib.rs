//! Tubefetch engine: HTTP client, log poller and effect execution.
mod client;
mod engine;
mod poller;
mod types;

pub use client::{ClientSettings, DownloadApi, ReqwestDownloadApi, DOWNLOAD_PATH, LOGS_PATH};
pub use engine::EngineHandle;
pub use poller::{parse_logs, spawn_poller, ChannelEventSink, EventSink, PollHandle, PollSlot};
pub use types::{ApiError, DownloadRequest, DownloadResponse, EngineEvent, FailureKind};
