//! Plan tree → `Hint`.
//!
//! The walk is pre-order. A join writes `(` and opens its fragment before any
//! child is visited, and writes `)` / closes the fragment only after the last
//! child returns. Leaves append their name to `Leading` and to every fragment
//! that is still open at that moment.

use phint_core::plan::{Node, Plan};

use crate::bitmap::resolve_index_name;
use crate::classify::{category_of, keyword_for, HintKeyword, NodeCategory};
use crate::hint::Hint;
use crate::report::Diagnostic;

/// Derive the hint block for every branch of `plan`.
///
/// Branches share one accumulator; their `Leading` contributions are separated
/// by a single space.
pub fn derive_hint(plan: &Plan) -> Hint<'_> {
    let mut hint = Hint::new(plan);

    for (i, branch) in plan.branches.iter().enumerate() {
        if i > 0 {
            hint.push_leading(" ");
        }
        derive_node(&branch.root, &mut hint);
    }

    hint.finish();

    #[cfg(feature = "tracing")]
    tracing::debug!(
        branches = plan.branches.len(),
        joins = hint.joins().len(),
        scans = hint.scans().len(),
        diagnostics = hint.diagnostics().len(),
        "derived hint"
    );

    hint
}

fn derive_node(node: &Node, hint: &mut Hint<'_>) {
    match category_of(&node.node_type) {
        NodeCategory::Join => derive_join(node, hint),
        NodeCategory::CteScan => {
            hint.push_leading(&node.cte_name);
            // The CTE itself is hinted where it is materialized.
            hint.add_join_rel(&node.cte_name);
        }
        NodeCategory::BitmapHeapScan => {
            let Some(keyword) = keyword_or_report(node, hint) else {
                return;
            };
            hint.push_leading(&node.relation_name);
            let scan = match resolve_index_name(node) {
                Some(index) if !index.is_empty() => {
                    format!("{}({} {})", keyword, node.relation_name, index)
                }
                Some(_) => format!("{}({})", keyword, node.relation_name),
                None => {
                    hint.report(Diagnostic::MissingChild {
                        node_type: node.node_type.clone(),
                    });
                    format!("{}({})", keyword, node.relation_name)
                }
            };
            hint.push_scan(scan);
            hint.add_join_rel(&node.relation_name);
        }
        NodeCategory::PlainScan => {
            let Some(keyword) = keyword_or_report(node, hint) else {
                return;
            };
            hint.push_leading(&node.relation_name);
            let scan = if keyword == HintKeyword::IndexScan {
                format!("{}({} {})", keyword, node.relation_name, node.index_name)
            } else {
                format!("{}({})", keyword, node.relation_name)
            };
            hint.push_scan(scan);
            hint.add_join_rel(&node.relation_name);
        }
        NodeCategory::PassThrough => match node.children.as_slice() {
            [] => hint.report(Diagnostic::MissingChild {
                node_type: node.node_type.clone(),
            }),
            [only] => derive_node(only, hint),
            [first, ..] => {
                hint.report(Diagnostic::ExtraChildren {
                    node_type: node.node_type.clone(),
                    count: node.children.len(),
                });
                derive_node(first, hint);
            }
        },
        NodeCategory::Unrecognized => hint.report(Diagnostic::UnrecognizedNodeType {
            node_type: node.node_type.clone(),
        }),
    }
}

fn derive_join(node: &Node, hint: &mut Hint<'_>) {
    let Some(keyword) = keyword_or_report(node, hint) else {
        return;
    };

    hint.push_leading("(");
    let pos = hint.open_join(keyword);

    for (i, child) in node.children.iter().enumerate() {
        if i > 0 {
            hint.push_leading(" ");
        }
        derive_node(child, hint);
    }

    hint.push_leading(")");
    hint.close_join(pos);
}

fn keyword_or_report(node: &Node, hint: &mut Hint<'_>) -> Option<HintKeyword> {
    let keyword = keyword_for(&node.node_type);
    if keyword.is_none() {
        hint.report(Diagnostic::UnrecognizedNodeType {
            node_type: node.node_type.clone(),
        });
    }
    keyword
}
