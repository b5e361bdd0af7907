//! Structural properties of derived hints over hand-built plan trees

use phint_core::plan::{Node, Plan};
use phint_hint::{category_of, derive_hint, NodeCategory};

fn seq(rel: &str) -> Node {
    Node::new("Seq Scan").with_relation(rel)
}

fn idx(rel: &str) -> Node {
    Node::new("Index Scan")
        .with_relation(rel)
        .with_index(format!("{rel}_pkey"))
}

fn cte(name: &str) -> Node {
    Node::new("CTE Scan").with_cte(name)
}

fn join(node_type: &str, children: Vec<Node>) -> Node {
    Node::new(node_type).with_children(children)
}

fn wrap(node_type: &str, child: Node) -> Node {
    Node::new(node_type).with_children(vec![child])
}

/// A bushy plan mixing all three join methods, pass-through nodes and a CTE.
fn bushy_plan() -> Node {
    join(
        "Hash Join",
        vec![
            join(
                "Merge Join",
                vec![wrap("Sort", seq("orders")), wrap("Sort", idx("customers"))],
            ),
            wrap(
                "Hash",
                join(
                    "Nested Loop",
                    vec![
                        cte("recent"),
                        wrap("Materialize", idx("items")),
                        join("Hash Join", vec![seq("tags"), wrap("Hash", seq("labels"))]),
                    ],
                ),
            ),
        ],
    )
}

/// Names of the hinted leaves under `node`, left to right.
fn leaf_names(node: &Node) -> Vec<String> {
    match category_of(&node.node_type) {
        NodeCategory::CteScan => vec![node.cte_name.clone()],
        NodeCategory::PlainScan | NodeCategory::BitmapHeapScan => {
            vec![node.relation_name.clone()]
        }
        NodeCategory::PassThrough => node.children.first().map(leaf_names).unwrap_or_default(),
        NodeCategory::Join => node.children.iter().flat_map(leaf_names).collect(),
        NodeCategory::Unrecognized => Vec::new(),
    }
}

/// Join nodes under `node` in pre-order.
fn joins_preorder<'a>(node: &'a Node, out: &mut Vec<&'a Node>) {
    if category_of(&node.node_type) == NodeCategory::Join {
        out.push(node);
    }
    for child in &node.children {
        joins_preorder(child, out);
    }
}

fn leading_names(leading: &str) -> Vec<String> {
    leading
        .trim_start_matches("Leading")
        .replace(['(', ')'], " ")
        .split_whitespace()
        .map(str::to_string)
        .collect()
}

#[test]
fn test_render_is_deterministic() {
    let plan = Plan::from_root(bushy_plan());
    let first = derive_hint(&plan).render();
    for _ in 0..5 {
        assert_eq!(derive_hint(&plan).render(), first);
    }
}

#[test]
fn test_leading_follows_leaf_order() {
    let root = bushy_plan();
    let plan = Plan::from_root(root.clone());
    let hint = derive_hint(&plan);

    assert_eq!(leading_names(hint.leading()), leaf_names(&root));
    assert_eq!(
        hint.leading(),
        "Leading(((orders customers) (recent items (tags labels))))"
    );
}

#[test]
fn test_join_hints_list_every_leaf_below() {
    let root = bushy_plan();
    let plan = Plan::from_root(root.clone());
    let hint = derive_hint(&plan);

    let mut joins = Vec::new();
    joins_preorder(&root, &mut joins);
    assert_eq!(hint.joins().len(), joins.len());

    for (fragment, node) in hint.joins().iter().zip(joins) {
        assert_eq!(fragment.names(), leaf_names(node).as_slice());
        assert!(!fragment.is_open());
    }
    assert_eq!(
        hint.join_hints(),
        vec![
            "HashJoin(orders customers recent items tags labels)",
            "MergeJoin(orders customers)",
            "NestLoop(recent items tags labels)",
            "HashJoin(tags labels)",
        ]
    );
}

#[test]
fn test_scan_hints_in_visit_order() {
    let plan = Plan::from_root(bushy_plan());
    let hint = derive_hint(&plan);
    assert_eq!(
        hint.scans(),
        [
            "SeqScan(orders)",
            "IndexScan(customers customers_pkey)",
            "IndexScan(items items_pkey)",
            "SeqScan(tags)",
            "SeqScan(labels)",
        ]
    );
}

#[test]
fn test_pass_through_nodes_are_transparent() {
    let bare = join("Nested Loop", vec![seq("a"), idx("b")]);
    let wrapped = wrap(
        "Aggregate",
        wrap(
            "Sort",
            join(
                "Nested Loop",
                vec![wrap("Result", seq("a")), wrap("Materialize", idx("b"))],
            ),
        ),
    );

    let bare_plan = Plan::from_root(bare);
    let wrapped_plan = Plan::from_root(wrapped);
    assert_eq!(
        derive_hint(&bare_plan).render(),
        derive_hint(&wrapped_plan).render()
    );
    assert!(derive_hint(&wrapped_plan).diagnostics().is_empty());
}

#[test]
fn test_bitmap_and_dedup_in_rendered_hint() {
    let heap = Node::new("Bitmap Heap Scan")
        .with_relation("events")
        .with_children(vec![join(
            "BitmapAnd",
            vec![
                Node::new("Bitmap Index Scan").with_index("events_ts_idx"),
                Node::new("Bitmap Index Scan").with_index("events_kind_idx"),
                Node::new("Bitmap Index Scan").with_index("events_ts_idx"),
            ],
        )]);
    let plan = Plan::from_root(heap);
    assert_eq!(
        derive_hint(&plan).render(),
        "/*+\nLeading(events)\nBitmapScan(events events_ts_idx events_kind_idx)\n*/"
    );
}

#[test]
fn test_unrecognized_root_yields_empty_hint() {
    let plan = Plan::from_root(join("Append", vec![seq("p1"), seq("p2")]));
    let hint = derive_hint(&plan);
    assert_eq!(hint.render(), "/*+\nLeading()\n*/");
    assert_eq!(hint.diagnostics().len(), 1);
}
