use std::sync::{Arc, Mutex};
use std::time::Duration;

use serde_json::json;
use tokio::runtime::Handle;
use tubefetch_engine::{
    parse_logs, spawn_poller, ClientSettings, DownloadApi, EngineEvent, EventSink, PollSlot,
    ReqwestDownloadApi,
};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const INTERVAL: Duration = Duration::from_millis(20);

#[derive(Default)]
struct TestSink {
    events: Mutex<Vec<EngineEvent>>,
}

impl TestSink {
    fn ticks(&self) -> Vec<u64> {
        self.events
            .lock()
            .unwrap()
            .iter()
            .filter_map(|event| match event {
                EngineEvent::LogsFetched { tick, .. } => Some(*tick),
                _ => None,
            })
            .collect()
    }
}

impl EventSink for TestSink {
    fn emit(&self, event: EngineEvent) {
        self.events.lock().unwrap().push(event);
    }
}

async fn logs_server(template: ResponseTemplate) -> MockServer {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/download/logs"))
        .respond_with(template)
        .mount(&server)
        .await;
    server
}

fn api_for(server: &MockServer) -> Arc<dyn DownloadApi> {
    Arc::new(
        ReqwestDownloadApi::new(ClientSettings {
            base_url: server.uri(),
            ..ClientSettings::default()
        })
        .expect("client"),
    )
}

async fn logs_requests(server: &MockServer) -> usize {
    server.received_requests().await.unwrap_or_default().len()
}

#[tokio::test(flavor = "multi_thread")]
async fn poller_emits_each_tick_until_stopped() {
    let server = logs_server(
        ResponseTemplate::new(200).set_body_raw(r#"{"logs": ["[info] starting"]}"#, "application/json"),
    )
    .await;
    let sink = Arc::new(TestSink::default());

    let handle = spawn_poller(&Handle::current(), api_for(&server), INTERVAL, sink.clone());
    tokio::time::sleep(INTERVAL * 8).await;
    handle.stop();

    let ticks = sink.ticks();
    assert!(ticks.len() >= 2, "expected several ticks, got {ticks:?}");
    assert!(ticks.windows(2).all(|pair| pair[0] < pair[1]));

    tokio::time::sleep(INTERVAL * 3).await;
    let settled = sink.ticks().len();
    tokio::time::sleep(INTERVAL * 5).await;
    assert_eq!(sink.ticks().len(), settled);
}

#[tokio::test(flavor = "multi_thread")]
async fn failed_ticks_do_not_stop_polling() {
    let server = logs_server(ResponseTemplate::new(500)).await;
    let sink = Arc::new(TestSink::default());

    let _handle = spawn_poller(&Handle::current(), api_for(&server), INTERVAL, sink.clone());
    tokio::time::sleep(INTERVAL * 8).await;
    let early = logs_requests(&server).await;
    tokio::time::sleep(INTERVAL * 8).await;

    assert!(early >= 2);
    assert!(logs_requests(&server).await > early);
    assert!(sink.ticks().is_empty());
}

#[tokio::test(flavor = "multi_thread")]
async fn malformed_logs_emit_nothing() {
    let server = logs_server(ResponseTemplate::new(200).set_body_raw("{}", "application/json")).await;
    let sink = Arc::new(TestSink::default());

    let _handle = spawn_poller(&Handle::current(), api_for(&server), INTERVAL, sink.clone());
    tokio::time::sleep(INTERVAL * 6).await;

    assert!(logs_requests(&server).await >= 1);
    assert!(sink.events.lock().unwrap().is_empty());
}

#[tokio::test(flavor = "multi_thread")]
async fn slot_keeps_at_most_one_poll() {
    let server = logs_server(
        ResponseTemplate::new(200).set_body_raw(r#"{"logs": []}"#, "application/json"),
    )
    .await;
    let first_sink = Arc::new(TestSink::default());
    let second_sink = Arc::new(TestSink::default());
    let mut slot = PollSlot::new();
    assert!(!slot.is_active());

    slot.start(spawn_poller(&Handle::current(), api_for(&server), INTERVAL, first_sink.clone()));
    slot.start(spawn_poller(&Handle::current(), api_for(&server), INTERVAL, second_sink.clone()));
    tokio::time::sleep(INTERVAL * 6).await;

    assert!(slot.is_active());
    assert!(first_sink.ticks().is_empty());
    assert!(!second_sink.ticks().is_empty());

    assert!(slot.stop());
    assert!(!slot.stop());
}

#[test]
fn parse_logs_requires_array_of_strings() {
    assert_eq!(
        parse_logs(&json!({"logs": ["a", "b"]})),
        Some(vec!["a".to_string(), "b".to_string()])
    );
    assert_eq!(parse_logs(&json!({"logs": []})), Some(Vec::new()));
    assert_eq!(parse_logs(&json!({})), None);
    assert_eq!(parse_logs(&json!({"logs": null})), None);
    assert_eq!(parse_logs(&json!({"logs": "a"})), None);
    assert_eq!(parse_logs(&json!({"logs": ["a", 1]})), None);
    assert_eq!(parse_logs(&json!(["a"])), None);
}
