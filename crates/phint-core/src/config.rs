//! Connection settings for the `EXPLAIN` runner.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConnectionConfig {
    /// Database server host.
    pub host: String,

    /// Database server port.
    pub port: u16,

    /// Database name to connect to.
    pub dbname: String,

    /// `psql` executable used to run `EXPLAIN`.
    pub psql_bin: String,
}

impl Default for ConnectionConfig {
    fn default() -> Self {
        Self {
            host: "localhost".to_string(),
            port: 5432,
            dbname: "postgres".to_string(),
            psql_bin: "psql".to_string(),
        }
    }
}

impl ConnectionConfig {
    /// Create a config from environment variables, falling back to defaults.
    ///
    /// Environment variables:
    /// - `PHINT_HOST`: database server host
    /// - `PHINT_PORT`: database server port
    /// - `PHINT_DBNAME`: database name
    /// - `PHINT_PSQL`: path to the `psql` binary
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as `from_env`, reading variables through `lookup`.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut cfg = Self::default();

        if let Some(s) = lookup("PHINT_HOST") {
            cfg.host = s;
        }

        if let Some(s) = lookup("PHINT_PORT") {
            if let Ok(v) = s.parse::<u16>() {
                cfg.port = v;
            }
        }

        if let Some(s) = lookup("PHINT_DBNAME") {
            cfg.dbname = s;
        }

        if let Some(s) = lookup("PHINT_PSQL") {
            cfg.psql_bin = s;
        }

        cfg
    }
}
