use std::env;

#[derive(Clone, Debug)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub database_url: String,
    pub db_max_connections: u32,
    pub environment: String,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        // Load .env file if it exists (for development)
        dotenvy::dotenv().ok();

        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let host = lookup("HOST").unwrap_or_else(|| "0.0.0.0".to_string());

        let port = lookup("PORT")
            .unwrap_or_else(|| "5000".to_string())
            .parse()
            .map_err(|e| anyhow::anyhow!("Invalid PORT value: {}", e))?;

        let database_url =
            lookup("DATABASE_URL").unwrap_or_else(|| "sqlite:./records_api.db".to_string());

        let db_max_connections = lookup("DB_MAX_CONNECTIONS")
            .unwrap_or_else(|| "5".to_string())
            .parse()
            .map_err(|e| anyhow::anyhow!("Invalid DB_MAX_CONNECTIONS value: {}", e))?;

        let environment = lookup("ENVIRONMENT").unwrap_or_else(|| "production".to_string());

        Ok(Config {
            host,
            port,
            database_url,
            db_max_connections,
            environment,
        })
    }
}
