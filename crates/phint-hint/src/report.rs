//! Non-fatal findings produced while walking a plan.
//!
//! Diagnostics are collected on the `Hint` as data. With the `tracing`
//! feature they are mirrored as `warn`-level events too.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Diagnostic {
    #[error("unrecognized node type \"{node_type}\"; might be better to add it to the taxonomy")]
    UnrecognizedNodeType { node_type: String },

    #[error("\"{node_type}\" node has no child to descend into")]
    MissingChild { node_type: String },

    #[error("\"{node_type}\" node has {count} children; only the first one is followed")]
    ExtraChildren { node_type: String, count: usize },
}

impl Diagnostic {
    /// The plan operator the diagnostic is about.
    pub fn node_type(&self) -> &str {
        match self {
            Diagnostic::UnrecognizedNodeType { node_type }
            | Diagnostic::MissingChild { node_type }
            | Diagnostic::ExtraChildren { node_type, .. } => node_type,
        }
    }
}

#[cfg(feature = "tracing")]
pub(crate) fn emit(diagnostic: &Diagnostic) {
    tracing::warn!(node_type = %diagnostic.node_type(), "{}", diagnostic);
}

#[cfg(not(feature = "tracing"))]
pub(crate) fn emit(_diagnostic: &Diagnostic) { /* no-op */
}
