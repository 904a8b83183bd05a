pub mod transactions;
#[cfg(test)]
mod tests;

use async_trait::async_trait;

use crate::models::InsertableRow;

pub use transactions::TransactionRepository;

/// Storage used by the cycle controller.
///
/// `insert_batch` writes into an open transaction that only becomes visible
/// after `commit`; `rollback` discards everything inserted since the last
/// commit.
#[async_trait]
pub trait TransactionStore: Send {
    async fn ensure_schema(&mut self) -> Result<(), sqlx::Error>;

    async fn insert_batch(&mut self, rows: &[InsertableRow]) -> Result<u64, sqlx::Error>;

    async fn commit(&mut self) -> Result<(), sqlx::Error>;

    async fn rollback(&mut self) -> Result<(), sqlx::Error>;

    async fn close(&mut self) -> Result<(), sqlx::Error>;
}
