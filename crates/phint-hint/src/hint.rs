//! The hint accumulator and its renderer.
//!
//! A `Hint` is filled in by exactly one walk and is read-only afterwards.
//! Join fragments are kept in pre-order; each one stays open (accepting
//! relation names) until the walker has finished every child of its join.

use std::fmt;

use phint_core::plan::Plan;

use crate::classify::HintKeyword;
use crate::report::{self, Diagnostic};

/// One `Keyword(name ...)` join hint under construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JoinFragment {
    keyword: HintKeyword,
    names: Vec<String>,
    closed: bool,
}

impl JoinFragment {
    fn new(keyword: HintKeyword) -> Self {
        Self {
            keyword,
            names: Vec::new(),
            closed: false,
        }
    }

    pub fn keyword(&self) -> HintKeyword {
        self.keyword
    }

    /// Every relation/CTE name joined at or below this join, leaf order.
    pub fn names(&self) -> &[String] {
        &self.names
    }

    pub fn is_open(&self) -> bool {
        !self.closed
    }
}

impl fmt::Display for JoinFragment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}({}", self.keyword, self.names.join(" "))?;
        if self.closed {
            f.write_str(")")?;
        }
        Ok(())
    }
}

/// Accumulated `pg_hint_plan` directives for one plan.
#[derive(Debug, Clone)]
pub struct Hint<'p> {
    leading: String,
    joins: Vec<JoinFragment>,
    scans: Vec<String>,
    source_plan: &'p Plan,
    diagnostics: Vec<Diagnostic>,
}

impl<'p> Hint<'p> {
    pub(crate) fn new(source_plan: &'p Plan) -> Self {
        Self {
            leading: "Leading(".to_string(),
            joins: Vec::new(),
            scans: Vec::new(),
            source_plan,
            diagnostics: Vec::new(),
        }
    }

    /// The `Leading(...)` clause.
    pub fn leading(&self) -> &str {
        &self.leading
    }

    pub fn joins(&self) -> &[JoinFragment] {
        &self.joins
    }

    /// Join hints as they will be rendered.
    pub fn join_hints(&self) -> Vec<String> {
        self.joins.iter().map(ToString::to_string).collect()
    }

    pub fn scans(&self) -> &[String] {
        &self.scans
    }

    pub fn source_plan(&self) -> &'p Plan {
        self.source_plan
    }

    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    /// Render the full `/*+ ... */` block.
    pub fn render(&self) -> String {
        let mut out = String::from("/*+\n");
        out.push_str(&self.leading);
        out.push('\n');
        for join in &self.joins {
            out.push_str(&join.to_string());
            out.push('\n');
        }
        for scan in &self.scans {
            out.push_str(scan);
            out.push('\n');
        }
        out.push_str("*/");
        out
    }

    pub(crate) fn push_leading(&mut self, s: &str) {
        self.leading.push_str(s);
    }

    pub(crate) fn finish(&mut self) {
        self.leading.push(')');
    }

    /// Open a join fragment and return its position for `close_join`.
    pub(crate) fn open_join(&mut self, keyword: HintKeyword) -> usize {
        self.joins.push(JoinFragment::new(keyword));
        self.joins.len() - 1
    }

    pub(crate) fn close_join(&mut self, pos: usize) {
        if let Some(join) = self.joins.get_mut(pos) {
            join.closed = true;
        }
    }

    /// Add `name` to every join that is still open: a join hint lists all
    /// relations at or below it, not just its direct operands.
    pub(crate) fn add_join_rel(&mut self, name: &str) {
        for join in self.joins.iter_mut().filter(|j| j.is_open()) {
            join.names.push(name.to_string());
        }
    }

    pub(crate) fn push_scan(&mut self, scan: String) {
        self.scans.push(scan);
    }

    pub(crate) fn report(&mut self, diagnostic: Diagnostic) {
        report::emit(&diagnostic);
        self.diagnostics.push(diagnostic);
    }
}

impl fmt::Display for Hint<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render())
    }
}
