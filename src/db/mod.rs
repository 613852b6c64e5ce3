pub mod models;
pub mod stats;

pub use models::{
    NewRecord, RECORDS_TABLE, STATS_TABLE, count_records, delete_record, init_db, insert_record,
    list_records, ping, search_records,
};
pub use stats::{get_department_breakdown, get_recent_activity};

/// A single-connection in-memory database with the schema applied.
#[cfg(test)]
pub async fn test_pool() -> sqlx::SqlitePool {
    let pool = sqlx::sqlite::SqlitePoolOptions::new()
        .max_connections(1)
        .idle_timeout(None)
        .max_lifetime(None)
        .connect("sqlite::memory:")
        .await
        .unwrap();

    init_db(&pool).await.unwrap();
    pool
}
