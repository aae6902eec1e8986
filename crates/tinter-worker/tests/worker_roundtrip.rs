//! End-to-end requests through a running filter worker.

use std::sync::Arc;

use tinter_core::{FilterTable, PixelBuffer};
use tinter_worker::{
    FilterOutcome, FilterRequest, FilterResponse, FilterSession, FilterWorker, WorkerConfig,
    WorkerError,
};

const MALFORMED: &str = "You must provide both imgData and filterName";

fn config() -> WorkerConfig {
    WorkerConfig {
        queue_capacity: 2,
        filter_table_path: None,
    }
}

fn spawn() -> FilterWorker {
    FilterWorker::spawn(&config(), FilterTable::builtin()).unwrap()
}

fn gradient(width: u32, height: u32) -> PixelBuffer {
    let mut data = Vec::with_capacity((width * height * 4) as usize);
    for i in 0..width * height {
        let v = (i * 37 % 256) as u8;
        data.extend_from_slice(&[v, 255 - v, v / 2, 200]);
    }
    PixelBuffer::new(width, height, data).unwrap()
}

#[tokio::test]
async fn test_submit_applies_filter() {
    let worker = spawn();
    let input = gradient(8, 4);
    let response = worker
        .submit(FilterRequest::new(input.clone(), "vintage"))
        .await
        .unwrap();
    let output = response.into_image().unwrap();
    assert_eq!(output.width, 8);
    assert_eq!(output.height, 4);
    assert_eq!(output.data.len(), input.data.len());
    assert_ne!(output, input);
    assert!(output.data.chunks_exact(4).all(|px| px[3] == 200));
    worker.shutdown();
}

#[tokio::test]
async fn test_json_envelope_round_trip() {
    let worker = spawn();
    let request = FilterRequest::new(PixelBuffer::new(1, 1, vec![100, 220, 0, 255]).unwrap(), "bright");
    let json = serde_json::to_string(&request).unwrap();

    let reply = worker.submit_json(&json).await.unwrap();
    let response: FilterResponse = serde_json::from_str(&reply).unwrap();
    assert_eq!(response.into_image().unwrap().data, vec![125, 255, 0, 255]);
}

#[tokio::test]
async fn test_malformed_requests_get_error_message() {
    let worker = spawn();

    let empty_name = FilterRequest::new(gradient(2, 2), "");
    let response = worker.submit(empty_name).await.unwrap();
    assert_eq!(
        response.result,
        FilterOutcome::Error {
            message: MALFORMED.to_string()
        }
    );

    let reply = worker.submit_json(r#"{ "filterName": "dawn" }"#).await.unwrap();
    let value: serde_json::Value = serde_json::from_str(&reply).unwrap();
    assert_eq!(value["result"]["type"], "Error");
    assert_eq!(value["result"]["data"]["message"], MALFORMED);
}

#[tokio::test]
async fn test_unknown_filter_returns_original() {
    let worker = spawn();
    let input = gradient(3, 3);
    let response = worker
        .submit(FilterRequest::new(input.clone(), "polaroid"))
        .await
        .unwrap();
    assert_eq!(response.into_image().unwrap(), input);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_submits_are_all_answered() {
    let worker = Arc::new(spawn());
    let input = gradient(16, 16);

    let mut tasks = Vec::new();
    for _ in 0..12 {
        let worker = Arc::clone(&worker);
        let input = input.clone();
        tasks.push(tokio::spawn(async move {
            worker
                .submit(FilterRequest::new(input, "sepiana"))
                .await
                .and_then(FilterResponse::into_image)
        }));
    }

    let mut outputs = Vec::new();
    for task in tasks {
        outputs.push(task.await.unwrap().unwrap());
    }
    assert!(outputs.windows(2).all(|pair| pair[0] == pair[1]));
}

#[tokio::test]
async fn test_shutdown_from_blocking_task_drains_queue() {
    let worker = spawn();
    let response = worker
        .submit(FilterRequest::new(gradient(2, 2), "bright"))
        .await
        .unwrap();
    assert!(response.into_image().is_ok());

    tokio::task::spawn_blocking(move || worker.shutdown())
        .await
        .unwrap();
}

#[tokio::test]
async fn test_session_apply_and_undo() {
    let worker = spawn();
    let original = gradient(4, 4);
    let mut session = FilterSession::new(&worker, original.clone());
    assert!(!session.undo());

    session.apply("gameron").await.unwrap();
    let first = session.current().clone();
    assert_ne!(first, original);

    session.apply("charm").await.unwrap();
    assert_eq!(session.backup().get(), Some(&first));

    assert!(session.undo());
    assert_eq!(session.current(), &first);
    assert!(!session.undo());
    assert_eq!(session.into_image(), first);
}

#[tokio::test]
async fn test_session_failure_keeps_current_image() {
    let worker = spawn();
    let original = gradient(2, 2);
    let mut session = FilterSession::new(&worker, original.clone());

    let err = session.apply("").await.unwrap_err();
    assert!(matches!(err, WorkerError::Rejected(msg) if msg == MALFORMED));
    assert_eq!(session.current(), &original);
    assert!(session.backup().is_empty());
}
