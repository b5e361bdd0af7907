//! In-memory form of one `EXPLAIN` result.
//!
//! Field names follow the keys PostgreSQL emits for `FORMAT JSON` and
//! `FORMAT YAML`. Keys we don't model are ignored; keys that are absent take
//! their empty/zero default, so a plan captured without `ANALYZE` or
//! `VERBOSE` decodes the same way as a full one.

use std::fmt::Write as _;

use serde::{Deserialize, Serialize};

/// One complete EXPLAIN result: every top-level branch plus the source text.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Plan {
    pub branches: Vec<PlanBranch>,
    /// Raw payload the plan was decoded from. Kept for echo/diagnostics only.
    pub source: String,
}

/// A single top-level entry of the `EXPLAIN` array.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PlanBranch {
    #[serde(rename = "Plan")]
    pub root: Node,
    #[serde(rename = "Planning Time", default, skip_serializing_if = "Option::is_none")]
    pub planning_time: Option<f64>,
    #[serde(rename = "Execution Time", default, skip_serializing_if = "Option::is_none")]
    pub execution_time: Option<f64>,
}

/// One physical plan operator.
///
/// Please note that this includes some fields the hint derivation never looks at.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Node {
    #[serde(rename = "Node Type")]
    pub node_type: String,
    #[serde(rename = "Join Type")]
    pub join_type: String,
    #[serde(rename = "Relation Name")]
    pub relation_name: String,
    #[serde(rename = "Index Name")]
    pub index_name: String,
    #[serde(rename = "CTE Name")]
    pub cte_name: String,
    #[serde(rename = "Alias")]
    pub alias: String,
    #[serde(rename = "Parent Relationship")]
    pub parent_relationship: String,
    #[serde(rename = "Subplan Name")]
    pub subplan_name: String,
    #[serde(rename = "Inner Unique")]
    pub inner_unique: bool,
    #[serde(rename = "Parallel Aware")]
    pub parallel_aware: bool,

    #[serde(rename = "Startup Cost")]
    pub startup_cost: f64,
    #[serde(rename = "Total Cost")]
    pub total_cost: f64,
    #[serde(rename = "Plan Rows")]
    pub plan_rows: f64,
    #[serde(rename = "Plan Width")]
    pub plan_width: f64,
    #[serde(rename = "Actual Startup Time")]
    pub actual_startup_time: f64,
    #[serde(rename = "Actual Total Time")]
    pub actual_total_time: f64,
    #[serde(rename = "Actual Rows")]
    pub actual_rows: f64,
    #[serde(rename = "Actual Loops")]
    pub actual_loops: f64,

    /// Subplans, in the order the planner listed them.
    #[serde(rename = "Plans", skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<Node>,
}

impl Node {
    /// Bare node of the given type; handy for building plans by hand.
    pub fn new(node_type: impl Into<String>) -> Self {
        Self {
            node_type: node_type.into(),
            ..Default::default()
        }
    }

    pub fn with_relation(mut self, relation: impl Into<String>) -> Self {
        let relation = relation.into();
        self.alias = relation.clone();
        self.relation_name = relation;
        self
    }

    pub fn with_index(mut self, index: impl Into<String>) -> Self {
        self.index_name = index.into();
        self
    }

    pub fn with_cte(mut self, cte: impl Into<String>) -> Self {
        self.cte_name = cte.into();
        self
    }

    pub fn with_children(mut self, children: Vec<Node>) -> Self {
        self.children = children;
        self
    }

    /// Number of nodes in this subtree, including `self`.
    pub fn node_count(&self) -> usize {
        1 + self.children.iter().map(Node::node_count).sum::<usize>()
    }

    fn dump_into(&self, level: usize, out: &mut String) {
        let indent = "  ".repeat(level);
        let _ = writeln!(out, "{indent}- Node Type: {}", self.node_type);
        if !self.relation_name.is_empty() {
            let _ = writeln!(out, "{indent}    Relation Name: {}", self.relation_name);
        }
        if !self.index_name.is_empty() {
            let _ = writeln!(out, "{indent}    Index Name: {}", self.index_name);
        }
        if !self.cte_name.is_empty() {
            let _ = writeln!(out, "{indent}    CTE Name: {}", self.cte_name);
        }
        let _ = writeln!(out, "{indent}    Plan Rows: {}", self.plan_rows);
        let _ = writeln!(out, "{indent}    Actual Rows: {}", self.actual_rows);

        for child in &self.children {
            child.dump_into(level + 1, out);
        }
    }
}

impl Plan {
    pub fn new(branches: Vec<PlanBranch>, source: impl Into<String>) -> Self {
        Self {
            branches,
            source: source.into(),
        }
    }

    /// Build a single-branch plan around `root`.
    pub fn from_root(root: Node) -> Self {
        Self::new(vec![PlanBranch::new(root)], String::new())
    }

    /// Indented outline of every branch, one block per node.
    pub fn dump(&self) -> String {
        let mut out = String::new();
        for branch in &self.branches {
            branch.root.dump_into(0, &mut out);
        }
        out
    }
}

impl PlanBranch {
    pub fn new(root: Node) -> Self {
        Self {
            root,
            planning_time: None,
            execution_time: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn node_count_includes_descendants() {
        let root = Node::new("Hash Join").with_children(vec![
            Node::new("Seq Scan").with_relation("a"),
            Node::new("Hash").with_children(vec![Node::new("Seq Scan").with_relation("b")]),
        ]);
        assert_eq!(root.node_count(), 4);
    }

    #[test]
    fn dump_indents_children_and_skips_empty_names() {
        let plan = Plan::from_root(
            Node::new("Sort").with_children(vec![Node::new("Seq Scan").with_relation("t")]),
        );
        let dump = plan.dump();
        let lines: Vec<&str> = dump.lines().collect();
        assert_eq!(lines[0], "- Node Type: Sort");
        assert!(!dump.contains("Relation Name: \n"));
        assert!(lines.contains(&"  - Node Type: Seq Scan"));
        assert!(lines.contains(&"      Relation Name: t"));
    }

    #[test]
    fn with_relation_sets_alias() {
        let n = Node::new("Seq Scan").with_relation("tbl1");
        assert_eq!(n.relation_name, "tbl1");
        assert_eq!(n.alias, "tbl1");
    }
}
