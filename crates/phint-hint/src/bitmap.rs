//! Index name for a `Bitmap Heap Scan`.
//!
//! A `BitmapOr`/`BitmapAnd` child fans in several `Bitmap Index Scan`s, each
//! possibly over a different index. The scan hint lists every distinct index
//! once, in the order the planner first used it.

use std::collections::HashSet;

use phint_core::plan::Node;

use crate::classify::is_bitmap_combiner;

/// Resolve the index name(s) a bitmap heap scan reads through.
///
/// Returns `None` when `heap_scan` has no child at all.
pub fn resolve_index_name(heap_scan: &Node) -> Option<String> {
    let child = heap_scan.children.first()?;

    if !is_bitmap_combiner(&child.node_type) {
        return Some(child.index_name.clone());
    }

    let mut seen = HashSet::new();
    let mut names = Vec::new();
    collect_index_names(child, &mut seen, &mut names);
    Some(names.join(" "))
}

fn collect_index_names<'a>(
    combiner: &'a Node,
    seen: &mut HashSet<&'a str>,
    names: &mut Vec<&'a str>,
) {
    for member in &combiner.children {
        if is_bitmap_combiner(&member.node_type) {
            collect_index_names(member, seen, names);
        } else if !member.index_name.is_empty() && seen.insert(member.index_name.as_str()) {
            names.push(member.index_name.as_str());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn index_scan(index: &str) -> Node {
        Node::new("Bitmap Index Scan").with_index(index)
    }

    fn heap(child: Node) -> Node {
        Node::new("Bitmap Heap Scan")
            .with_relation("t")
            .with_children(vec![child])
    }

    #[test]
    fn single_index_child() {
        assert_eq!(
            resolve_index_name(&heap(index_scan("t_pkey"))).as_deref(),
            Some("t_pkey")
        );
    }

    #[test]
    fn bitmap_or_dedups_in_first_seen_order() {
        let or = Node::new("BitmapOr").with_children(vec![
            index_scan("t_b_idx"),
            index_scan("t_pkey"),
            index_scan("t_b_idx"),
            index_scan("t_c_idx"),
        ]);
        assert_eq!(
            resolve_index_name(&heap(or)).as_deref(),
            Some("t_b_idx t_pkey t_c_idx")
        );
    }

    #[test]
    fn nested_combiners_are_flattened() {
        let and = Node::new("BitmapAnd").with_children(vec![
            index_scan("t_a_idx"),
            Node::new("BitmapOr").with_children(vec![index_scan("t_b_idx"), index_scan("t_a_idx")]),
        ]);
        assert_eq!(
            resolve_index_name(&heap(and)).as_deref(),
            Some("t_a_idx t_b_idx")
        );
    }

    #[test]
    fn no_child_resolves_to_none() {
        let bare = Node::new("Bitmap Heap Scan").with_relation("t");
        assert_eq!(resolve_index_name(&bare), None);
    }
}
