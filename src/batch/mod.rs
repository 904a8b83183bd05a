
use chrono::{DateTime, Utc};
use rand::Rng;

use crate::errors::AppError;
use crate::generator::RecordGenerator;
use crate::models::InsertableRow;
use crate::rules;

/// Builds `size` rows, all stamped with the same `timestamp`.
pub fn build_batch<R: Rng>(
    generator: &mut RecordGenerator<R>,
    size: usize,
    timestamp: DateTime<Utc>,
) -> Result<Vec<InsertableRow>, AppError> {
    let mut rows = Vec::with_capacity(size);

    for _ in 0..size {
        let record = generator.generate();
        let result = rules::evaluate_one(std::iter::once(record))?;

        if tracing::enabled!(tracing::Level::TRACE) {
            match serde_json::to_string(&result) {
                Ok(json) => tracing::trace!(transaction = %json, "evaluated transaction"),
                Err(err) => tracing::trace!("Failed to serialize evaluated transaction: {err}"),
            }
        }

        rows.push(InsertableRow::new(timestamp, result));
    }

    Ok(rows)
}
