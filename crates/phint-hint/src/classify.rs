//! Node classification: `Node Type` → hint keyword, `Node Type` → walk category.
//!
//! The two tables are deliberately separate. `Sample Scan` has a keyword but
//! no walk category yet, so the walker reports it instead of hinting it.

use std::fmt;

/// Keywords understood by `pg_hint_plan`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HintKeyword {
    NestLoop,
    HashJoin,
    MergeJoin,
    SeqScan,
    IndexScan,
    IndexOnlyScan,
    BitmapScan,
    CteScan,
    SampleScan,
}

impl HintKeyword {
    pub fn as_str(self) -> &'static str {
        match self {
            HintKeyword::NestLoop => "NestLoop",
            HintKeyword::HashJoin => "HashJoin",
            HintKeyword::MergeJoin => "MergeJoin",
            HintKeyword::SeqScan => "SeqScan",
            HintKeyword::IndexScan => "IndexScan",
            HintKeyword::IndexOnlyScan => "IndexOnlyScan",
            HintKeyword::BitmapScan => "BitmapScan",
            HintKeyword::CteScan => "CTEScan",
            HintKeyword::SampleScan => "SampleScan",
        }
    }

    pub fn is_join(self) -> bool {
        matches!(
            self,
            HintKeyword::NestLoop | HintKeyword::HashJoin | HintKeyword::MergeJoin
        )
    }
}

impl fmt::Display for HintKeyword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Map a plan operator name to its hint keyword. `None` means the operator has
/// no hint of its own.
pub fn keyword_for(node_type: &str) -> Option<HintKeyword> {
    let kw = match node_type {
        "Nested Loop" => HintKeyword::NestLoop,
        "Hash Join" => HintKeyword::HashJoin,
        "Merge Join" => HintKeyword::MergeJoin,
        "Seq Scan" => HintKeyword::SeqScan,
        "Index Scan" => HintKeyword::IndexScan,
        "Index Only Scan" => HintKeyword::IndexOnlyScan,
        "Bitmap Heap Scan" => HintKeyword::BitmapScan,
        "CTE Scan" => HintKeyword::CteScan,
        "Sample Scan" => HintKeyword::SampleScan,
        _ => return None,
    };
    Some(kw)
}

/// How the walker treats a node.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeCategory {
    /// Nested Loop, Hash Join, Merge Join.
    Join,
    /// Names a CTE; contributes to `Leading` and joins but not to scans.
    CteScan,
    /// Leaf scan whose index comes from its bitmap child.
    BitmapHeapScan,
    /// Seq Scan, Index Scan, Index Only Scan.
    PlainScan,
    /// Contributes nothing and delegates to its only child.
    PassThrough,
    Unrecognized,
}

pub fn category_of(node_type: &str) -> NodeCategory {
    match node_type {
        "Nested Loop" | "Hash Join" | "Merge Join" => NodeCategory::Join,
        "CTE Scan" => NodeCategory::CteScan,
        "Bitmap Heap Scan" => NodeCategory::BitmapHeapScan,
        "Seq Scan" | "Index Scan" | "Index Only Scan" => NodeCategory::PlainScan,
        "Materialize" | "Sort" | "Hash" | "Bitmap Index Scan" | "BitmapOr" | "BitmapAnd"
        | "Result" | "Aggregate" | "Hash Aggregate" => NodeCategory::PassThrough,
        _ => NodeCategory::Unrecognized,
    }
}

/// `BitmapOr` / `BitmapAnd`: the nodes that fan several bitmap index scans in.
pub fn is_bitmap_combiner(node_type: &str) -> bool {
    matches!(node_type, "BitmapOr" | "BitmapAnd")
}
