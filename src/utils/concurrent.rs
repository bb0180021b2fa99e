//! Concurrent task runner utilities
//!
//! Fan-out/fan-in helpers for running one async task per item:
//! - `run_concurrent` spawns every task at once and joins them all
//! - `run_sequential` runs the same tasks one after another
//!
//! Both return results in input order, whatever order tasks finish in.
//! A failing task never aborts the batch: a panic is reported for that item
//! and every other task still runs to completion.
//!
//! ## Built on standard primitives
//!
//! - `tokio::spawn` per item (no concurrency cap)
//! - `futures::future::join_all` over the join handles to keep input order
//!
//! ## Example
//!
//! ```ignore
//! use brewcount::utils::concurrent::run_concurrent;
//!
//! let results = run_concurrent(states, |state| {
//!     let client = client.clone();
//!     async move { count_breweries(&client, &state).await }
//! })
//! .await;
//! ```

use futures::future::join_all;
use std::future::Future;
use std::time::Instant;
use thiserror::Error;
use tokio::task::JoinHandle;
use tracing::{debug, warn};

use crate::client::StateQuery;

/// Errors from concurrent task execution
#[derive(Debug, Error)]
pub enum ConcurrentError {
    /// A spawned task panicked
    #[error("Task '{id}' panicked: {message}")]
    Panic { id: String, message: String },

    /// A spawned task was cancelled by the runtime
    #[error("Task '{id}' cancelled")]
    Cancelled { id: String },
}

/// Result of a single task
#[derive(Debug, Clone)]
pub struct TaskResult<T> {
    /// Identifier for the task
    pub id: String,
    /// The value the task produced
    pub value: T,
}

/// Trait for items that can identify themselves for logging
pub trait HasId {
    fn id(&self) -> String;
}

impl HasId for String {
    fn id(&self) -> String {
        self.clone()
    }
}

impl HasId for StateQuery {
    fn id(&self) -> String {
        self.as_str().to_string()
    }
}

impl HasId for &StateQuery {
    fn id(&self) -> String {
        self.as_str().to_string()
    }
}

/// Run one spawned task per item and wait for all of them
///
/// Every task is spawned before any is awaited, so all of them are in flight
/// together. The returned vector lines up with the input: element `i` is the
/// outcome of item `i`.
pub async fn run_concurrent<I, T, F, Fut>(
    items: I,
    task_fn: F,
) -> Vec<Result<TaskResult<T>, ConcurrentError>>
where
    I: IntoIterator,
    I::Item: HasId,
    F: Fn(I::Item) -> Fut,
    Fut: Future<Output = T> + Send + 'static,
    T: Send + 'static,
{
    let (ids, handles): (Vec<String>, Vec<JoinHandle<TaskResult<T>>>) = items
        .into_iter()
        .map(|item| {
            let id = item.id();
            let task = task_fn(item);
            let task_id = id.clone();

            let handle = tokio::spawn(async move {
                TaskResult {
                    id: task_id,
                    value: task.await,
                }
            });
            (id, handle)
        })
        .unzip();

    debug!(tasks = ids.len(), "Spawned concurrent tasks");

    join_all(handles)
        .await
        .into_iter()
        .zip(ids)
        .map(|(joined, id)| {
            joined.map_err(|e| {
                if e.is_panic() {
                    warn!(task_id = %id, error = %e, "Task panicked");
                    ConcurrentError::Panic {
                        id,
                        message: e.to_string(),
                    }
                } else {
                    warn!(task_id = %id, "Task cancelled");
                    ConcurrentError::Cancelled { id }
                }
            })
        })
        .collect()
}

/// Run the tasks one at a time, in input order
///
/// The sequential baseline for `run_concurrent`: task `i + 1` is not started
/// until task `i` has finished.
pub async fn run_sequential<I, T, F, Fut>(items: I, mut task_fn: F) -> Vec<TaskResult<T>>
where
    I: IntoIterator,
    I::Item: HasId,
    F: FnMut(I::Item) -> Fut,
    Fut: Future<Output = T>,
{
    let mut results = Vec::new();

    for item in items {
        let id = item.id();
        let start = Instant::now();
        let value = task_fn(item).await;
        let elapsed = start.elapsed();
        debug!(task_id = %id, elapsed_ms = elapsed.as_millis(), "Sequential task done");
        results.push(TaskResult { id, value });
    }

    results
}
