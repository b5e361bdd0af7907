//! `EXPLAIN` payload → `Plan`.
//!
//! Example (`EXPLAIN (FORMAT JSON)`):
//! ```json
//! [ { "Plan": { "Node Type": "Seq Scan", "Relation Name": "tbl1" } } ]
//! ```
//!
//! The same document rendered by `EXPLAIN (FORMAT YAML)` uses identical keys,
//! so both formats land in the same serde model. The plain-text format has no
//! stable structure and is rejected.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::plan::{Plan, PlanBranch};

/// Output format requested from `EXPLAIN`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlanFormat {
    #[default]
    Json,
    Yaml,
    Text,
}

impl PlanFormat {
    /// Statement prefix that asks the server for this format.
    pub fn explain_prefix(self) -> &'static str {
        match self {
            PlanFormat::Json => "EXPLAIN (FORMAT JSON)",
            PlanFormat::Yaml => "EXPLAIN (FORMAT YAML)",
            PlanFormat::Text => "EXPLAIN (FORMAT TEXT)",
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            PlanFormat::Json => "json",
            PlanFormat::Yaml => "yaml",
            PlanFormat::Text => "text",
        }
    }

    /// Whether `decode_plan` can handle this format.
    pub fn is_supported(self) -> bool {
        !matches!(self, PlanFormat::Text)
    }
}

impl fmt::Display for PlanFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PlanFormat {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "json" => Ok(PlanFormat::Json),
            "yaml" => Ok(PlanFormat::Yaml),
            "text" => Ok(PlanFormat::Text),
            other => Err(Error::Config(format!(
                "unrecognized type specified: {other} ('json', 'yaml' and 'text' are available)"
            ))),
        }
    }
}

/// Parse one `EXPLAIN` payload.
///
/// Fails on anything that is not an array of `{"Plan": {...}}` objects, and on
/// an array with no entries.
pub fn decode_plan(src: &str, format: PlanFormat) -> Result<Plan> {
    let branches: Vec<PlanBranch> = match format {
        PlanFormat::Json => serde_json::from_str(src)?,
        PlanFormat::Yaml => serde_yaml::from_str(src)?,
        PlanFormat::Text => {
            return Err(Error::Unsupported(
                "currently only \"json\" and \"yaml\" types are supported, sorry".into(),
            ))
        }
    };

    if branches.is_empty() {
        return Err(Error::EmptyPlan);
    }
    Ok(Plan::new(branches, src))
}
