//! Convenient re-exports for downstream crates.

pub use crate::config::ConnectionConfig;
pub use crate::decode::{decode_plan, PlanFormat};
pub use crate::error::{Error, Result};
pub use crate::plan::{Node, Plan, PlanBranch};
