//! Run report
//!
//! The one-line summary of a comparison run, tagged with the host it ran on,
//! persisted as a small JSON object (`async.json` by default).

use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;
use tracing::info;

/// Default report file name
pub const DEFAULT_REPORT_PATH: &str = "async.json";

/// Errors that can occur while writing a report
#[derive(Debug, Error)]
pub enum ReportError {
    #[error("Failed to write report: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to serialize report: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// `{"result": <summary>, "host": <hostname>}`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunReport {
    pub result: String,
    pub host: String,
}

impl RunReport {
    /// Create a report for this machine
    pub fn new(result: impl Into<String>) -> Self {
        Self::with_host(result, local_hostname())
    }

    pub fn with_host(result: impl Into<String>, host: impl Into<String>) -> Self {
        Self {
            result: result.into(),
            host: host.into(),
        }
    }

    pub fn to_json(&self) -> Result<String, ReportError> {
        Ok(serde_json::to_string(self)?)
    }

    /// Write the report, replacing any existing file
    pub fn write_to(&self, path: impl AsRef<Path>) -> Result<(), ReportError> {
        let path = path.as_ref();
        std::fs::write(path, self.to_json()?)?;
        info!(path = %path.display(), host = %self.host, "Report written");
        Ok(())
    }

    pub fn read_from(path: impl AsRef<Path>) -> Result<Self, ReportError> {
        let content = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&content)?)
    }
}

/// Hostname of this machine, or "unknown" if it cannot be read
pub fn local_hostname() -> String {
    hostname::get()
        .map(|h| h.to_string_lossy().into_owned())
        .unwrap_or_else(|_| "unknown".to_string())
}
