
use std::future::Future;
use std::time::Duration;

use chrono::Utc;
use rand::rngs::StdRng;
use rand::Rng;
use tokio_util::sync::CancellationToken;

use crate::batch::build_batch;
use crate::config::Settings;
use crate::db::TransactionStore;
use crate::errors::AppError;
use crate::generator::RecordGenerator;
use crate::models::InsertableRow;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CycleState {
    Connecting,
    SchemaReady,
    Running,
    Draining,
    Closed,
    Error,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunReport {
    pub cycles: u64,
    pub batches_committed: u64,
    pub rows_inserted: u64,
    pub empty_cycles: u64,
}

/// Drives generate → evaluate → insert → commit → sleep until shutdown.
///
/// The shutdown token is only checked between cycles, so a batch that has
/// started inserting is always committed or rolled back first.
pub struct CycleController<R = StdRng> {
    generator: RecordGenerator<R>,
    batch_size: usize,
    interval: Duration,
    max_cycles: Option<u64>,
    target: String,
    shutdown: CancellationToken,
    state: CycleState,
    report: RunReport,
}

impl CycleController<StdRng> {
    pub fn new(settings: &Settings, shutdown: CancellationToken) -> Self {
        let generator = match settings.seed {
            Some(seed) => RecordGenerator::seeded(seed),
            None => RecordGenerator::from_entropy(),
        };
        Self::with_generator(settings, generator, shutdown)
    }
}

impl<R: Rng> CycleController<R> {
    pub fn with_generator(
        settings: &Settings,
        generator: RecordGenerator<R>,
        shutdown: CancellationToken,
    ) -> Self {
        Self {
            generator,
            batch_size: settings.batch_size,
            interval: settings.sleep_interval,
            max_cycles: settings.max_cycles,
            target: settings.target(),
            shutdown,
            state: CycleState::Connecting,
            report: RunReport::default(),
        }
    }

    pub fn state(&self) -> CycleState {
        self.state
    }

    pub async fn run<S, F, Fut>(&mut self, connect: F) -> Result<RunReport, AppError>
    where
        S: TransactionStore,
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<S, AppError>>,
    {
        tracing::info!(target_db = %self.target, state = ?self.state, "Starting generator");

        let mut store = match connect().await {
            Ok(store) => store,
            Err(err) => {
                // nothing to release yet
                self.fail(&err);
                self.transition(CycleState::Closed);
                return Err(err);
            }
        };

        let outcome = self.drive(&mut store).await;
        if let Err(err) = &outcome {
            self.fail(err);
        }

        self.transition(CycleState::Draining);
        match store.close().await {
            Ok(()) => tracing::info!("Database connection closed"),
            Err(err) => tracing::warn!("Failed to close connection to {}: {err}", self.target),
        }
        self.transition(CycleState::Closed);

        outcome.map(|_| self.report.clone())
    }

    async fn drive<S: TransactionStore>(&mut self, store: &mut S) -> Result<(), AppError> {
        store
            .ensure_schema()
            .await
            .map_err(|source| AppError::Schema {
                target: self.target.clone(),
                source,
            })?;
        self.transition(CycleState::SchemaReady);
        self.transition(CycleState::Running);

        while !self.stop_requested() {
            self.report.cycles += 1;
            let cycle = self.report.cycles;
            let batch_ts = Utc::now();

            let rows = build_batch(&mut self.generator, self.batch_size, batch_ts)?;
            if rows.is_empty() {
                tracing::warn!(cycle, "No rows generated this cycle, skipping insert");
                self.report.empty_cycles += 1;
            } else {
                let inserted = self.persist(store, cycle, &rows).await?;
                self.report.batches_committed += 1;
                self.report.rows_inserted += inserted;
                tracing::info!(
                    cycle,
                    rows = inserted,
                    batch_ts = %batch_ts.to_rfc3339(),
                    "Batch inserted"
                );
            }

            if self.stop_requested() {
                break;
            }

            tokio::select! {
                _ = tokio::time::sleep(self.interval) => {}
                _ = self.shutdown.cancelled() => {}
            }
        }

        tracing::info!(cycles = self.report.cycles, "Stop requested, leaving run loop");
        Ok(())
    }

    // one batch, one transaction
    async fn persist<S: TransactionStore>(
        &self,
        store: &mut S,
        cycle: u64,
        rows: &[InsertableRow],
    ) -> Result<u64, AppError> {
        let inserted = match store.insert_batch(rows).await {
            Ok(inserted) => inserted,
            Err(source) => {
                self.rollback(store, cycle).await;
                return Err(self.insert_error(cycle, "insert", source));
            }
        };

        if let Err(source) = store.commit().await {
            self.rollback(store, cycle).await;
            return Err(self.insert_error(cycle, "commit", source));
        }

        Ok(inserted)
    }

    async fn rollback<S: TransactionStore>(&self, store: &mut S, cycle: u64) {
        if let Err(err) = store.rollback().await {
            tracing::warn!(cycle, "Failed to roll back batch: {err}");
        }
    }

    fn insert_error(&self, cycle: u64, operation: &'static str, source: sqlx::Error) -> AppError {
        AppError::Insert {
            cycle,
            operation,
            target: self.target.clone(),
            source,
        }
    }

    fn stop_requested(&self) -> bool {
        self.shutdown.is_cancelled()
            || self
                .max_cycles
                .is_some_and(|max_cycles| self.report.cycles >= max_cycles)
    }

    fn fail(&mut self, err: &AppError) {
        tracing::error!(target_db = %self.target, state = ?self.state, "Fatal error: {err}");
        self.transition(CycleState::Error);
    }

    fn transition(&mut self, next: CycleState) {
        tracing::info!(from = ?self.state, to = ?next, "State transition");
        self.state = next;
    }
}
