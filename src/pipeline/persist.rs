//! Row-by-row writes with failure collection.

use crate::core::{Error, Result};
use crate::observability::{increment_processed, set_current_entity};
use serde::Serialize;
use tracing::warn;

/// One row that did not commit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RowFailure {
    pub kind: &'static str,
    pub key: String,
    pub message: String,
}

/// Write every row, logging failures instead of stopping at the first one.
///
/// Each row is an independent idempotent upsert, so one bad row never blocks
/// the rest of the population.
pub fn write_rows<T>(
    kind: &'static str,
    rows: &[T],
    key: impl Fn(&T) -> String,
    write: impl Fn(&T) -> Result<()>,
) -> Vec<RowFailure> {
    let mut failures = Vec::new();
    for row in rows {
        let row_key = key(row);
        let _row = set_current_entity(row_key.as_str());
        if let Err(e) = write(row) {
            warn!(kind, key = %row_key, error = %e, "Row write failed");
            failures.push(RowFailure {
                kind,
                key: row_key,
                message: e.to_string(),
            });
        }
        increment_processed();
    }
    failures
}

/// Fold row failures into the single error a run reports.
pub fn aggregate_failures(failures: &[RowFailure]) -> Option<Error> {
    let first = failures.first()?;
    Some(Error::Persistence {
        message: format!(
            "{} row(s) were not written; first failure: {} {}: {}",
            failures.len(),
            first.kind,
            first.key,
            first.message
        ),
        failed_rows: failures.len(),
    })
}
