//! Getting a plan: where the SQL comes from and how `EXPLAIN` is run.
//!
//! `EXPLAIN` is executed through the `psql` client, so no driver is linked in.
//! `-A -t` makes psql print the single result column verbatim.

use std::fs;
use std::io::Read;
use std::path::PathBuf;
use std::process::Command;

use phint_core::config::ConnectionConfig;
use phint_core::decode::PlanFormat;
use phint_core::error::{Error, Result};

/// Where the statement (or the already captured plan) comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SqlSource {
    /// Inline SQL from `--command`.
    Command(String),
    /// SQL read from `--file`.
    File(PathBuf),
    /// A captured `EXPLAIN` payload piped on stdin (`--input-plan`).
    Stdin,
}

impl SqlSource {
    /// Pick the source from CLI flags. `--command` wins over `--file`, which
    /// wins over `--input-plan`.
    pub fn from_args(command: Option<String>, file: Option<PathBuf>, input_plan: bool) -> Result<Self> {
        match (command, file) {
            (Some(sql), _) if !sql.is_empty() => Ok(SqlSource::Command(sql)),
            (_, Some(path)) => Ok(SqlSource::File(path)),
            _ if input_plan => Ok(SqlSource::Stdin),
            _ => Err(Error::Config(
                "Either SQL command or SQL file must be specified".into(),
            )),
        }
    }

    /// SQL text to explain; `None` when the plan is read directly.
    pub fn read_sql(&self) -> Result<Option<String>> {
        match self {
            SqlSource::Command(sql) => Ok(Some(sql.clone())),
            SqlSource::File(path) => Ok(Some(fs::read_to_string(path)?)),
            SqlSource::Stdin => Ok(None),
        }
    }
}

/// Runs `EXPLAIN` for a statement and returns the raw payload.
pub trait ExplainRunner {
    fn explain(&self, sql: &str, format: PlanFormat) -> Result<String>;
}

/// `ExplainRunner` backed by the `psql` command line client.
#[derive(Debug, Clone)]
pub struct PsqlRunner {
    config: ConnectionConfig,
}

impl PsqlRunner {
    pub fn new(config: ConnectionConfig) -> Self {
        Self { config }
    }

    /// Arguments passed to psql for `statement`.
    pub fn args(&self, statement: &str) -> Vec<String> {
        vec![
            "-X".into(),
            "-q".into(),
            "-A".into(),
            "-t".into(),
            "-v".into(),
            "ON_ERROR_STOP=1".into(),
            "-h".into(),
            self.config.host.clone(),
            "-p".into(),
            self.config.port.to_string(),
            "-d".into(),
            self.config.dbname.clone(),
            "-c".into(),
            statement.to_string(),
        ]
    }
}

/// `EXPLAIN (FORMAT ...) <sql>`.
pub fn explain_statement(sql: &str, format: PlanFormat) -> String {
    format!("{} {}", format.explain_prefix(), sql.trim())
}

impl ExplainRunner for PsqlRunner {
    fn explain(&self, sql: &str, format: PlanFormat) -> Result<String> {
        let statement = explain_statement(sql, format);
        tracing::debug!(
            host = %self.config.host,
            port = self.config.port,
            dbname = %self.config.dbname,
            "running EXPLAIN through {}",
            self.config.psql_bin
        );

        let output = Command::new(&self.config.psql_bin)
            .args(self.args(&statement))
            .output()?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(Error::Explain(format!(
                "{} exited with {}: {}",
                self.config.psql_bin,
                output.status,
                stderr.trim()
            )));
        }

        String::from_utf8(output.stdout)
            .map_err(|e| Error::Explain(format!("psql returned non UTF-8 output: {e}")))
    }
}

/// Read a captured plan in full.
pub fn read_plan<R: Read>(mut reader: R) -> Result<String> {
    let mut buf = String::new();
    reader.read_to_string(&mut buf)?;
    Ok(buf)
}
