use std::path::PathBuf;

use anyhow::{Context, Result};
use sql_connection::PostgresDbConfig;

const DEFAULT_HOST: &str = "0.0.0.0";
const DEFAULT_PORT: u16 = 8088;
const DEFAULT_FILEPATH_ROOT: &str = ".";
const DEFAULT_DB_MAX_CONN: u32 = 10;

/// Settings read once at start-up, after `.env` has been loaded.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub filepath_root: PathBuf,
    pub database: PostgresDbConfig,
}

impl ServerConfig {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let uri = lookup("DB_URL").context("DB_URL must be set")?;

        let port = match lookup("PORT") {
            Some(port) => port
                .parse::<u16>()
                .with_context(|| format!("PORT is not a valid port: {port}"))?,
            None => DEFAULT_PORT,
        };

        let max_conn = match lookup("DB_MAX_CONN") {
            Some(max) => max.parse::<u32>().with_context(|| {
                format!("DB_MAX_CONN is not a valid number: {max}")
            })?,
            None => DEFAULT_DB_MAX_CONN,
        };

        let min_conn = lookup("DB_MIN_CONN")
            .map(|min| {
                min.parse::<u32>().with_context(|| {
                    format!("DB_MIN_CONN is not a valid number: {min}")
                })
            })
            .transpose()?;

        Ok(Self {
            host: lookup("HOST").unwrap_or_else(|| DEFAULT_HOST.to_string()),
            port,
            filepath_root: lookup("FILEPATH_ROOT")
                .unwrap_or_else(|| DEFAULT_FILEPATH_ROOT.to_string())
                .into(),
            database: PostgresDbConfig {
                uri,
                max_conn: Some(max_conn),
                min_conn,
                logger: false,
            },
        })
    }

    pub fn bind_address(&self) -> (&str, u16) { (&self.host, self.port) }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn config_from(vars: &[(&str, &str)]) -> Result<ServerConfig> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        ServerConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = config_from(&[("DB_URL", "postgres://localhost/chirpy")]).unwrap();

        assert_eq!(config.bind_address(), ("0.0.0.0", 8088));
        assert_eq!(config.filepath_root, PathBuf::from("."));
        assert_eq!(config.database.uri, "postgres://localhost/chirpy");
        assert_eq!(config.database.max_conn, Some(10));
        assert_eq!(config.database.min_conn, None);
    }

    #[test]
    fn test_overrides() {
        let config = config_from(&[
            ("DB_URL", "postgres://db/chirpy"),
            ("HOST", "127.0.0.1"),
            ("PORT", "9000"),
            ("FILEPATH_ROOT", "./public"),
            ("DB_MAX_CONN", "25"),
            ("DB_MIN_CONN", "2"),
        ])
        .unwrap();

        assert_eq!(config.bind_address(), ("127.0.0.1", 9000));
        assert_eq!(config.filepath_root, PathBuf::from("./public"));
        assert_eq!(config.database.max_conn, Some(25));
        assert_eq!(config.database.min_conn, Some(2));
    }

    #[test]
    fn test_missing_db_url() {
        let err = config_from(&[]).unwrap_err();
        assert!(err.to_string().contains("DB_URL"));
    }

    #[test]
    fn test_invalid_port() {
        let err = config_from(&[("DB_URL", "postgres://db"), ("PORT", "http")])
            .unwrap_err();
        assert!(err.to_string().contains("PORT"));
    }
}
