//! In-memory page source for unit tests

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Mutex;
use std::time::Duration;

use crate::client::{Brewery, BreweryError, BreweryResult, PageResponse, PageSource, StateQuery};

/// What the source answers for one page request
#[derive(Debug, Clone, Copy)]
pub enum Step {
    /// A 200 page with this many records (0 = end of data)
    Records(usize),
    /// A non-success status
    Status(u16),
    /// A transport-level failure
    Fail,
}

/// Scripted per-state pages; requests past the end of a script get an empty page
#[derive(Debug, Default)]
pub struct ScriptedPages {
    scripts: HashMap<String, Vec<Step>>,
    delays: HashMap<String, Duration>,
    requests: Mutex<Vec<(String, u32, u32)>>,
}

impl ScriptedPages {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_state(mut self, state: &str, steps: Vec<Step>) -> Self {
        self.scripts.insert(state.to_string(), steps);
        self
    }

    /// Delay every response for `state`
    pub fn with_delay(mut self, state: &str, delay: Duration) -> Self {
        self.delays.insert(state.to_string(), delay);
        self
    }

    /// Pages requested for `state`, in request order
    pub fn requests_for(&self, state: &str) -> Vec<u32> {
        self.requests
            .lock()
            .unwrap()
            .iter()
            .filter(|(s, _, _)| s == state)
            .map(|(_, page, _)| *page)
            .collect()
    }

    /// States in the order their first page was requested
    pub fn request_order(&self) -> Vec<String> {
        let requests = self.requests.lock().unwrap();
        let mut order: Vec<String> = Vec::new();
        for (state, _, _) in requests.iter() {
            if !order.contains(state) {
                order.push(state.clone());
            }
        }
        order
    }

    pub fn per_page_seen(&self) -> Vec<u32> {
        self.requests
            .lock()
            .unwrap()
            .iter()
            .map(|(_, _, per_page)| *per_page)
            .collect()
    }
}

#[async_trait]
impl PageSource for ScriptedPages {
    async fn fetch_page(
        &self,
        state: &StateQuery,
        page: u32,
        per_page: u32,
    ) -> BreweryResult<PageResponse> {
        self.requests
            .lock()
            .unwrap()
            .push((state.to_string(), page, per_page));

        if let Some(delay) = self.delays.get(state.as_str()) {
            tokio::time::sleep(*delay).await;
        }

        let step = self
            .scripts
            .get(state.as_str())
            .and_then(|steps| steps.get(page as usize - 1))
            .copied()
            .unwrap_or(Step::Records(0));

        match step {
            Step::Records(n) => Ok(PageResponse::ok(vec![Brewery::default(); n])),
            Step::Status(code) => Ok(PageResponse::with_status(code)),
            Step::Fail => Err(BreweryError::Decode("connection reset".to_string())),
        }
    }
}
