//! Utility modules for brewcount
//!
//! Common utilities used by the fan-out runner.

pub mod concurrent;

pub use concurrent::{ConcurrentError, HasId, TaskResult, run_concurrent, run_sequential};
