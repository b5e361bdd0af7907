#![forbid(unsafe_code)]
//! phint-core: the PostgreSQL plan model and everything needed to get one.
//!
//! Responsibilities:
//! - `plan`: `Plan` / `PlanBranch` / `Node`, mirroring `EXPLAIN` output keys.
//! - `decode`: JSON and YAML `EXPLAIN` payloads → `Plan`.
//! - `config`: connection settings for the `EXPLAIN` runner.
//! - `error`: the shared `Error` / `Result` types.
//!
//! **No process spawning, no hint logic** here. `phint-hint` walks the plan,
//! `phint-cli` talks to the server.

pub mod config;
pub mod decode;
pub mod error;
pub mod plan;
pub mod prelude;

pub use config::ConnectionConfig;
pub use decode::{decode_plan, PlanFormat};
pub use error::{Error, Result};
pub use plan::{Node, Plan, PlanBranch};
