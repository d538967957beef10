use anyhow::{Context, Result, anyhow};
use std::path::PathBuf;

const DEFAULT_MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub run_migrations: bool,
    pub port: u16,
    pub db_min_conn: u32,
    pub db_max_conn: u32,
    pub storage_root: PathBuf,
    pub max_upload_bytes: usize,
    pub otel_endpoint: Option<String>,
}

impl Config {
    pub fn init() -> Result<Self> {
        let database_url =
            std::env::var("DATABASE_URL").context("Missing environment variable: DATABASE_URL")?;
        let run_migrations_str = std::env::var("RUN_MIGRATIONS")
            .context("Missing environment variable: RUN_MIGRATIONS")?;
        let port_str = std::env::var("PORT").context("Missing environment variable: PORT")?;

        let run_migrations = match run_migrations_str.as_str() {
            "true" => true,
            "false" => false,
            other => {
                return Err(anyhow!(
                    "RUN_MIGRATIONS must be 'true' or 'false', got '{}'",
                    other
                ));
            }
        };

        let port = port_str
            .parse::<u16>()
            .context("PORT must be a valid u16 integer")?;

        let db_min_conn = optional_var("DB_MIN_CONN")?
            .map(|v| v.parse::<u32>())
            .transpose()
            .context("DB_MIN_CONN must be a valid u32 integer")?
            .unwrap_or(1);

        let db_max_conn = optional_var("DB_MAX_CONN")?
            .map(|v| v.parse::<u32>())
            .transpose()
            .context("DB_MAX_CONN must be a valid u32 integer")?
            .unwrap_or(5);

        let storage_root = optional_var("STORAGE_ROOT")?
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from("./storage"));

        let max_upload_bytes = optional_var("MAX_UPLOAD_BYTES")?
            .map(|v| v.parse::<usize>())
            .transpose()
            .context("MAX_UPLOAD_BYTES must be a valid integer")?
            .unwrap_or(DEFAULT_MAX_UPLOAD_BYTES);

        let otel_endpoint = optional_var("OTEL_ENDPOINT")?;

        Ok(Self {
            database_url,
            run_migrations,
            port,
            db_min_conn,
            db_max_conn,
            storage_root,
            max_upload_bytes,
            otel_endpoint,
        })
    }
}

fn optional_var(key: &str) -> Result<Option<String>> {
    match std::env::var(key) {
        Ok(value) if value.trim().is_empty() => Ok(None),
        Ok(value) => Ok(Some(value)),
        Err(std::env::VarError::NotPresent) => Ok(None),
        Err(e) => Err(anyhow!("Invalid environment variable {key}: {e}")),
    }
}
