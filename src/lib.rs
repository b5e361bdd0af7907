#![forbid(unsafe_code)]
//! phint: derive `pg_hint_plan` hints that reproduce a PostgreSQL query plan.
//!
//! Thin facade over the workspace crates; the `phint` binary lives in
//! `crates/phint-cli`.

pub use phint_core::{
    decode_plan, ConnectionConfig, Error, Node, Plan, PlanBranch, PlanFormat, Result,
};
pub use phint_hint::{derive_hint, Diagnostic, Hint};

/// Decode one `EXPLAIN` payload and render its hint block.
pub fn hint_for(src: &str, format: PlanFormat) -> Result<String> {
    let plan = decode_plan(src, format)?;
    Ok(derive_hint(&plan).render())
}
