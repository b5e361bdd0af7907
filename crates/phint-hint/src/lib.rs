#![forbid(unsafe_code)]
//! phint-hint: PostgreSQL plan tree → `pg_hint_plan` hint block.
//!
//! Pipeline:
//!     * `classify` maps each `Node Type` to a hint keyword and a walk category
//!     * `walk` recurses over every branch, filling one `Hint`
//!     * `bitmap` resolves index names behind `BitmapOr`/`BitmapAnd`
//!     * `Hint::render` produces the `/*+ ... */` text
//!
//! Unknown operators never abort a derivation; they show up in
//! `Hint::diagnostics` and the rest of the plan is still hinted.

pub mod bitmap;
pub mod classify;
pub mod hint;
pub mod report;
pub mod walk;

pub use bitmap::resolve_index_name;
pub use classify::{category_of, keyword_for, HintKeyword, NodeCategory};
pub use hint::{Hint, JoinFragment};
pub use report::Diagnostic;
pub use walk::derive_hint;
