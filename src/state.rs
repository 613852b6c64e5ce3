use sqlx::SqlitePool;

use crate::config::Config;

#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub db: SqlitePool,
}

#[cfg(test)]
pub async fn test_state() -> std::sync::Arc<AppState> {
    let config = Config {
        host: "127.0.0.1".to_string(),
        port: 0,
        database_url: "sqlite::memory:".to_string(),
        db_max_connections: 1,
        environment: "test".to_string(),
    };

    std::sync::Arc::new(AppState {
        config,
        db: crate::db::test_pool().await,
    })
}
