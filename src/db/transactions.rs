use async_trait::async_trait;
use sqlx::postgres::{PgConnectOptions, PgPoolOptions};
use sqlx::{PgPool, Postgres, QueryBuilder, Transaction};

use super::TransactionStore;
use crate::config::Settings;
use crate::models::InsertableRow;

const SCHEMA_SQL: &str = include_str!("../../sql/schema.sql");

// 15 binds per row keeps each statement well below the 65535 parameter cap
const MAX_ROWS_PER_STATEMENT: usize = 1_000;

// Database repository
pub struct TransactionRepository {
    pool: PgPool,
    pending: Option<Transaction<'static, Postgres>>,
}

impl TransactionRepository {
    pub fn new(pool: PgPool) -> Self {
        Self {
            pool,
            pending: None,
        }
    }

    pub async fn connect(settings: &Settings) -> Result<Self, sqlx::Error> {
        tracing::info!(
            "Connecting to PostgreSQL at {}:{} (db={}, user={})",
            settings.db_host,
            settings.db_port,
            settings.db_name,
            settings.db_user
        );

        let mut options = PgConnectOptions::new()
            .host(&settings.db_host)
            .port(settings.db_port)
            .database(&settings.db_name)
            .username(&settings.db_user)
            .password(&settings.db_password);
        if let Some(ssl_mode) = settings.ssl_mode {
            options = options.ssl_mode(ssl_mode);
        }

        // a single connection, owned by the controller for the whole run
        let pool = PgPoolOptions::new()
            .max_connections(1)
            .acquire_timeout(settings.connect_timeout)
            .connect_with(options)
            .await?;

        Ok(Self::new(pool))
    }

    async fn open_transaction(&mut self) -> Result<&mut Transaction<'static, Postgres>, sqlx::Error> {
        let tx = match self.pending.take() {
            Some(tx) => tx,
            None => self.pool.begin().await?,
        };
        Ok(self.pending.insert(tx))
    }
}

#[async_trait]
impl TransactionStore for TransactionRepository {
    async fn ensure_schema(&mut self) -> Result<(), sqlx::Error> {
        sqlx::raw_sql(SCHEMA_SQL).execute(&self.pool).await?;
        tracing::info!("Ensured schema and indexes exist");
        Ok(())
    }

    async fn insert_batch(&mut self, rows: &[InsertableRow]) -> Result<u64, sqlx::Error> {
        if rows.is_empty() {
            return Ok(0);
        }

        let tx = self.open_transaction().await?;
        let mut inserted = 0;

        for chunk in rows.chunks(MAX_ROWS_PER_STATEMENT) {
            let mut builder: QueryBuilder<Postgres> = QueryBuilder::new("INSERT INTO banking_data (");
            builder.push(InsertableRow::COLUMNS.join(", ")).push(") ");
            builder.push_values(chunk, |mut values, row| {
                values
                    .push_bind(row.batch_ts)
                    .push_bind(row.uniq_id)
                    .push_bind(row.trans_type.as_str())
                    .push_bind(row.amount)
                    .push_bind(row.amount_crr)
                    .push_bind(row.account_holder_name.as_str())
                    .push_bind(row.card_presense.as_str())
                    .push_bind(row.merchant_category.as_str())
                    .push_bind(row.card_type.as_str())
                    .push_bind(row.card_id.as_str())
                    .push_bind(row.account_id)
                    .push_bind(row.account_blacklisted)
                    .push_bind(row.rules_triggered.as_str())
                    .push_bind(row.rules_explanation.as_str())
                    .push_bind(row.decision.as_str());
            });

            let result = builder.build().execute(&mut **tx).await?;
            inserted += result.rows_affected();
        }

        tracing::debug!("Inserted {inserted} rows");
        Ok(inserted)
    }

    async fn commit(&mut self) -> Result<(), sqlx::Error> {
        match self.pending.take() {
            Some(tx) => tx.commit().await,
            None => Ok(()),
        }
    }

    async fn rollback(&mut self) -> Result<(), sqlx::Error> {
        match self.pending.take() {
            Some(tx) => tx.rollback().await,
            None => Ok(()),
        }
    }

    async fn close(&mut self) -> Result<(), sqlx::Error> {
        // dropping an open transaction rolls it back
        drop(self.pending.take());
        self.pool.close().await;
        Ok(())
    }
}
