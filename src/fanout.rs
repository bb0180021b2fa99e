//! Concurrent fan-out runner
//!
//! Applies the paginated counter to a list of states, once with every state
//! in flight together and once one state at a time, and compares the two
//! wall-clock timings.
//!
//! Results always come back in the order the states were given. A state whose
//! count fails still gets an entry (with whatever count it reached), so the
//! batch never loses a state.

use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::info;

use crate::client::{PageSource, StateQuery};
use crate::counter::{BreweryCountResult, StateCount, count_breweries_paged};
use crate::utils::{run_concurrent, run_sequential};

/// Default states for the comparison run
pub const DEFAULT_STATES: [&str; 4] = ["district_of_columbia", "maryland", "new_york", "virginia"];

/// How a batch was executed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    Concurrent,
    Sequential,
}

impl std::fmt::Display for Mode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Mode::Concurrent => write!(f, "concurrent"),
            Mode::Sequential => write!(f, "sequential"),
        }
    }
}

/// One timed pass over the state list
#[derive(Debug, Clone)]
pub struct BatchRun {
    pub mode: Mode,
    /// One entry per input state, in input order
    pub counts: Vec<StateCount>,
    pub elapsed: Duration,
}

impl BatchRun {
    /// Plain `{state, brewery_count}` results, in input order
    pub fn results(&self) -> Vec<BreweryCountResult> {
        self.counts.iter().map(|c| c.result.clone()).collect()
    }

    /// States whose count was cut short by a failure
    pub fn incomplete(&self) -> impl Iterator<Item = &StateCount> {
        self.counts.iter().filter(|c| !c.is_complete())
    }
}

/// Concurrent vs sequential timings for the same state list
#[derive(Debug, Clone)]
pub struct Comparison {
    pub concurrent: BatchRun,
    pub sequential: BatchRun,
}

impl Comparison {
    /// How much faster the concurrent pass was, as a percentage of the sequential time
    ///
    /// Negative when the concurrent pass was slower; 0 when the sequential
    /// pass took no measurable time.
    pub fn speedup_percent(&self) -> f64 {
        speedup_percent(self.concurrent.elapsed, self.sequential.elapsed)
    }

    /// One-line summary written to the run report
    pub fn summary(&self) -> String {
        format!(
            "concurrent version was {:.2}% faster than the sequential version",
            self.speedup_percent()
        )
    }

    /// Whether both passes produced the same set of `{state, brewery_count}` pairs
    pub fn results_agree(&self) -> bool {
        let mut concurrent = self.concurrent.results();
        let mut sequential = self.sequential.results();
        concurrent.sort_by(|a, b| a.state.cmp(&b.state));
        sequential.sort_by(|a, b| a.state.cmp(&b.state));
        concurrent == sequential
    }
}

/// Percentage speed-up of `fast` over `slow`
pub fn speedup_percent(fast: Duration, slow: Duration) -> f64 {
    let slow = slow.as_secs_f64();
    if slow == 0.0 {
        return 0.0;
    }
    100.0 * (slow - fast.as_secs_f64()) / slow
}

/// Count every state at once, one spawned task per state
pub async fn count_concurrent<S>(
    source: Arc<S>,
    states: &[StateQuery],
    per_page: u32,
) -> Vec<StateCount>
where
    S: PageSource + 'static,
{
    let results = run_concurrent(states.iter().cloned(), |state| {
        let source = Arc::clone(&source);
        async move { count_breweries_paged(source.as_ref(), &state, per_page).await }
    })
    .await;

    results
        .into_iter()
        .zip(states)
        .map(|(result, state)| match result {
            Ok(task) => task.value,
            Err(e) => StateCount::failed(state, e.to_string()),
        })
        .collect()
}

/// Count states one after another
pub async fn count_sequential<S>(
    source: &S,
    states: &[StateQuery],
    per_page: u32,
) -> Vec<StateCount>
where
    S: PageSource + ?Sized,
{
    run_sequential(states.iter(), |state| count_breweries_paged(source, state, per_page))
        .await
        .into_iter()
        .map(|task| task.value)
        .collect()
}

/// Run a timed concurrent pass
pub async fn run_concurrent_batch<S>(
    source: Arc<S>,
    states: &[StateQuery],
    per_page: u32,
) -> BatchRun
where
    S: PageSource + 'static,
{
    let start = Instant::now();
    let counts = count_concurrent(source, states, per_page).await;
    let elapsed = start.elapsed();

    info!(
        mode = %Mode::Concurrent,
        states = states.len(),
        elapsed_ms = elapsed.as_millis(),
        "Batch complete"
    );
    BatchRun {
        mode: Mode::Concurrent,
        counts,
        elapsed,
    }
}

/// Run a timed sequential pass
pub async fn run_sequential_batch<S>(source: &S, states: &[StateQuery], per_page: u32) -> BatchRun
where
    S: PageSource + ?Sized,
{
    let start = Instant::now();
    let counts = count_sequential(source, states, per_page).await;
    let elapsed = start.elapsed();

    info!(
        mode = %Mode::Sequential,
        states = states.len(),
        elapsed_ms = elapsed.as_millis(),
        "Batch complete"
    );
    BatchRun {
        mode: Mode::Sequential,
        counts,
        elapsed,
    }
}

/// Concurrent pass, then sequential pass, over the same states
pub async fn compare<S>(source: Arc<S>, states: &[StateQuery], per_page: u32) -> Comparison
where
    S: PageSource + 'static,
{
    let concurrent = run_concurrent_batch(Arc::clone(&source), states, per_page).await;
    let sequential = run_sequential_batch(source.as_ref(), states, per_page).await;

    Comparison {
        concurrent,
        sequential,
    }
}
