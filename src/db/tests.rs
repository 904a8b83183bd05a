//! Run with `TEST_DATABASE_URL=postgres://... cargo test -- --ignored`.

use super::{TransactionRepository, TransactionStore};

use chrono::{DateTime, Utc};
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;

use crate::batch::build_batch;
use crate::generator::RecordGenerator;

async fn test_pool() -> PgPool {
    let url = std::env::var("TEST_DATABASE_URL").expect("TEST_DATABASE_URL must be set");
    PgPoolOptions::new()
        .max_connections(2)
        .connect(&url)
        .await
        .expect("Failed to connect to test database")
}

async fn rows_at(pool: &PgPool, ts: DateTime<Utc>) -> i64 {
    sqlx::query_scalar("SELECT COUNT(*) FROM banking_data WHERE batch_ts = $1")
        .bind(ts)
        .fetch_one(pool)
        .await
        .unwrap()
}

async fn schema_object_count(pool: &PgPool) -> i64 {
    sqlx::query_scalar("SELECT COUNT(*) FROM pg_indexes WHERE tablename = 'banking_data'")
        .fetch_one(pool)
        .await
        .unwrap()
}

#[tokio::test]
#[ignore]
async fn test_schema_setup_is_idempotent() {
    let pool = test_pool().await;
    let mut repo = TransactionRepository::new(pool.clone());

    repo.ensure_schema().await.unwrap();
    let indexes = schema_object_count(&pool).await;
    repo.ensure_schema().await.unwrap();

    assert_eq!(schema_object_count(&pool).await, indexes);
    // primary key + decision + batch_ts
    assert_eq!(indexes, 3);
}

#[tokio::test]
#[ignore]
async fn test_committed_batch_is_visible() {
    let pool = test_pool().await;
    let mut repo = TransactionRepository::new(pool.clone());
    repo.ensure_schema().await.unwrap();

    let ts = Utc::now();
    let rows = build_batch(&mut RecordGenerator::from_entropy(), 25, ts).unwrap();

    assert_eq!(repo.insert_batch(&rows).await.unwrap(), 25);
    repo.commit().await.unwrap();

    assert_eq!(rows_at(&pool, ts).await, 25);
}

#[tokio::test]
#[ignore]
async fn test_failed_batch_leaves_no_rows() {
    let pool = test_pool().await;
    let mut repo = TransactionRepository::new(pool.clone());
    repo.ensure_schema().await.unwrap();

    let ts = Utc::now();
    let mut rows = build_batch(&mut RecordGenerator::from_entropy(), 1_500, ts).unwrap();
    // too long for the column; fails in the second chunk
    rows[1_200].card_id = "9".repeat(40);

    assert!(repo.insert_batch(&rows).await.is_err());
    repo.rollback().await.unwrap();

    assert_eq!(rows_at(&pool, ts).await, 0);
}

#[tokio::test]
#[ignore]
async fn test_empty_batch_is_a_no_op() {
    let pool = test_pool().await;
    let mut repo = TransactionRepository::new(pool);

    assert_eq!(repo.insert_batch(&[]).await.unwrap(), 0);
    repo.commit().await.unwrap();
    repo.close().await.unwrap();
}
