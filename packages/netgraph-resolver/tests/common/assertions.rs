//! Edge assertions

use netgraph_resolver::{BlastPropagation, EdgeDescriptor, Item, QueryMethod};

/// Find the edge of `item` pointing at `(item_type, method, query)`
pub fn find_edge<'a>(
    item: &'a Item,
    item_type: &str,
    method: QueryMethod,
    query: &str,
) -> Option<&'a EdgeDescriptor> {
    item.linked_item_queries.iter().find(|edge| {
        edge.query.item_type == item_type && edge.query.method == method && edge.query.query == query
    })
}

/// Assert that `item` has the edge with the given propagation flags
pub fn assert_edge(
    item: &Item,
    item_type: &str,
    method: QueryMethod,
    query: &str,
    expected: BlastPropagation,
) {
    let edge = find_edge(item, item_type, method, query).unwrap_or_else(|| {
        panic!(
            "Expected edge to {item_type} {method} {query}, got: {:?}",
            item.linked_item_queries
                .iter()
                .map(|e| format!("{} {} {}", e.query.item_type, e.query.method, e.query.query))
                .collect::<Vec<_>>()
        )
    });

    assert_eq!(
        edge.blast_propagation, expected,
        "Unexpected propagation on edge to {item_type} {query}"
    );
}

/// Edge target types of `item`, in order
pub fn edge_types(item: &Item) -> Vec<&str> {
    item.linked_item_queries
        .iter()
        .map(|edge| edge.target_type())
        .collect()
}
