use crate::document::{Document, NodeId};

/// Walks `doc` in document order beginning at `start`, which does not need to
/// be the root: when a subtree is exhausted the walk climbs to the next
/// sibling of the closest ancestor that has one.
///
/// `visit` is called once per node and returns `true` to skip the children of
/// that node. Returns the last visited node, or `None` if `start` is `None`.
pub fn traverse<F>(doc: &Document, start: Option<NodeId>, mut visit: F) -> Option<NodeId>
where
    F: FnMut(NodeId) -> bool,
{
    let mut current = start?;

    loop {
        let skip = visit(current);

        let next = if skip {
            None
        } else {
            doc.first_child(current)
        };

        match next.or_else(|| next_in_order(doc, current)) {
            Some(node) => current = node,
            None => return Some(current),
        }
    }
}

/// The node following the subtree of `node`.
fn next_in_order(doc: &Document, node: NodeId) -> Option<NodeId> {
    let mut current = node;

    loop {
        if let Some(sibling) = doc.next_sibling(current) {
            return Some(sibling);
        }

        current = doc.parent(current)?;
    }
}
