//! Worker configuration and filter table loading.

use std::path::PathBuf;

use tinter_core::FilterTable;

use crate::error::WorkerError;

/// Default number of requests that may wait for a busy worker.
const DEFAULT_QUEUE_CAPACITY: usize = 8;
/// Environment variable overriding the queue capacity.
const QUEUE_CAPACITY_VAR: &str = "TINTER_QUEUE_CAPACITY";
/// Environment variable naming a JSON filter table merged over the built-ins.
const FILTERS_VAR: &str = "TINTER_FILTERS";

/// Runtime configuration for a filter worker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkerConfig {
    /// Bounded queue depth in front of the worker thread. At least 1.
    pub queue_capacity: usize,
    /// Optional JSON filter table merged over [`FilterTable::builtin`].
    pub filter_table_path: Option<PathBuf>,
}

impl WorkerConfig {
    /// Build from a key lookup, e.g. `std::env::var`.
    ///
    /// Unparseable or zero capacities fall back to the default.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        Self {
            queue_capacity: lookup(QUEUE_CAPACITY_VAR)
                .and_then(|s| s.trim().parse().ok())
                .filter(|&n: &usize| n > 0)
                .unwrap_or(DEFAULT_QUEUE_CAPACITY),
            filter_table_path: lookup(FILTERS_VAR)
                .filter(|s| !s.trim().is_empty())
                .map(PathBuf::from),
        }
    }
}

impl Default for WorkerConfig {
    fn default() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }
}

/// The effective filter table: built-ins, plus the configured file if any.
///
/// Every entry is compiled once so a broken table fails here rather than on
/// the first request that names it.
pub fn load_filter_table(config: &WorkerConfig) -> Result<FilterTable, WorkerError> {
    let mut table = FilterTable::builtin();

    if let Some(path) = &config.filter_table_path {
        let json = std::fs::read_to_string(path)?;
        let extra = FilterTable::from_json_str(&json)?;
        tracing::info!(
            path = %path.display(),
            filters = extra.len(),
            "loaded filter table"
        );
        table.extend(extra);
    }

    table.validate()?;
    Ok(table)
}
