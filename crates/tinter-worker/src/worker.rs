//! A dedicated filter thread fed through a bounded channel.
//!
//! Each [`FilterWorker`] owns one OS thread that takes requests off a
//! `tokio::sync::mpsc` queue one at a time and runs each to completion. The
//! queue decouples async callers from the CPU-bound pixel loop; spawn more
//! workers for more throughput.

use std::thread::JoinHandle;

use tinter_core::FilterTable;
use tokio::sync::{mpsc, oneshot};

use crate::boundary;
use crate::config::WorkerConfig;
use crate::error::WorkerError;
use crate::messages::{FilterRequest, FilterResponse};

struct Job {
    request: FilterRequest,
    reply: oneshot::Sender<FilterResponse>,
}

/// Handle to a running filter thread.
///
/// Dropping the handle closes the queue and joins the thread after the
/// queued requests drain. That join blocks the calling thread, so inside an
/// async runtime drop the last handle via
/// `tokio::task::spawn_blocking(move || worker.shutdown())`.
pub struct FilterWorker {
    tx: Option<mpsc::Sender<Job>>,
    thread: Option<JoinHandle<()>>,
}

impl FilterWorker {
    /// Start a worker serving `table`.
    pub fn spawn(config: &WorkerConfig, table: FilterTable) -> Result<Self, WorkerError> {
        let (tx, mut rx) = mpsc::channel::<Job>(config.queue_capacity.max(1));

        let thread = std::thread::Builder::new()
            .name("tinter-worker".to_string())
            .spawn(move || {
                tracing::info!(filters = table.len(), "filter worker started");
                while let Some(job) = rx.blocking_recv() {
                    let response = boundary::handle_request(job.request, &table);
                    if job.reply.send(response).is_err() {
                        tracing::debug!("requester went away before the reply");
                    }
                }
                tracing::info!("filter worker stopped");
            })?;

        Ok(Self {
            tx: Some(tx),
            thread: Some(thread),
        })
    }

    /// Queue a request and wait for its response.
    ///
    /// Waits for queue space when the worker is saturated.
    pub async fn submit(&self, request: FilterRequest) -> Result<FilterResponse, WorkerError> {
        let tx = self.tx.as_ref().ok_or(WorkerError::Closed)?;
        let (reply, response) = oneshot::channel();
        tx.send(Job { request, reply })
            .await
            .map_err(|_| WorkerError::Closed)?;
        response.await.map_err(|_| {
            tracing::error!("filter worker dropped a request without replying");
            WorkerError::Closed
        })
    }

    /// Submit a JSON request envelope, returning the JSON response.
    pub async fn submit_json(&self, json: &str) -> Result<String, WorkerError> {
        let response = match boundary::decode_request(json) {
            Ok(request) => self.submit(request).await?,
            Err(response) => response,
        };
        Ok(serde_json::to_string(&response)?)
    }

    /// Close the queue and wait for the thread to finish pending work.
    pub fn shutdown(mut self) {
        self.stop();
    }

    fn stop(&mut self) {
        drop(self.tx.take());
        if let Some(thread) = self.thread.take()
            && thread.join().is_err()
        {
            tracing::error!("filter worker thread panicked");
        }
    }
}

impl Drop for FilterWorker {
    fn drop(&mut self) {
        self.stop();
    }
}
