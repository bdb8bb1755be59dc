use crate::collection::collection_model::{CollectionTree, NodeId};

/// Separator used between path segments and in test case classnames.
pub const DEFAULT_SEPARATOR: &str = " / ";

/// Resolve the hierarchical path of a node, e.g. `"Group / Subgroup / Item"`.
///
/// Ancestors are listed root-to-parent, excluding the root collection
/// itself, followed by the node's own name. The root collection resolves
/// to an empty path. An unknown node yields `None`, which callers treat
/// as "name unknown" rather than an error.
pub fn resolve(tree: &CollectionTree, node: Option<NodeId>, separator: &str) -> Option<String> {
    let id = node?;
    let current = tree.node(id)?;

    let mut chain: Vec<&str> = tree
        .ancestors(id)
        .filter(|(_, ancestor)| ancestor.parent.is_some())
        .map(|(_, ancestor)| ancestor.name_or_id())
        .collect();
    chain.reverse();

    if current.parent.is_some() {
        chain.push(current.name_or_id());
    }

    Some(chain.join(separator))
}

/// Shorthand for [`resolve`] with [`DEFAULT_SEPARATOR`].
pub fn full_name(tree: &CollectionTree, node: Option<NodeId>) -> Option<String> {
    resolve(tree, node, DEFAULT_SEPARATOR)
}
