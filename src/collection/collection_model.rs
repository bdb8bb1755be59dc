use serde::Deserialize;

// ============================================================================
// Collection tree — arena of nodes with index parent links
// ============================================================================

/// Index of a node inside a [`CollectionTree`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(usize);

/// Whether a node is a runnable request or a folder of other nodes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeKind {
    Item,
    Group,
}

/// A single node of the collection definition.
#[derive(Debug, Clone, PartialEq)]
pub struct CollectionNode {
    pub kind: NodeKind,

    /// Stable identifier (may be empty when the source had none)
    pub id: String,

    /// Human-readable name, if the node has one
    pub name: Option<String>,

    /// Parent group; `None` only for the root collection
    pub parent: Option<NodeId>,
}

impl CollectionNode {
    /// Prefer the human name, fall back to the identifier.
    pub fn name_or_id(&self) -> &str {
        match self.name.as_deref() {
            Some(name) if !name.is_empty() => name,
            _ => &self.id,
        }
    }
}

/// The whole collection as an owned arena. Node 0 is always the root.
#[derive(Debug, Clone, PartialEq)]
pub struct CollectionTree {
    nodes: Vec<CollectionNode>,
}

impl CollectionTree {
    /// A tree holding only the root collection group.
    pub fn new(id: &str, name: Option<&str>) -> Self {
        Self {
            nodes: vec![CollectionNode {
                kind: NodeKind::Group,
                id: id.to_string(),
                name: name.map(str::to_string),
                parent: None,
            }],
        }
    }

    pub fn root(&self) -> NodeId {
        NodeId(0)
    }

    pub fn node(&self, id: NodeId) -> Option<&CollectionNode> {
        self.nodes.get(id.0)
    }

    /// Append a child under `parent`. Returns `None` if `parent` is unknown
    /// or is not a group.
    pub fn add(
        &mut self,
        parent: NodeId,
        kind: NodeKind,
        id: &str,
        name: Option<&str>,
    ) -> Option<NodeId> {
        match self.node(parent) {
            Some(p) if p.kind == NodeKind::Group => {}
            _ => return None,
        }
        self.nodes.push(CollectionNode {
            kind,
            id: id.to_string(),
            name: name.map(str::to_string),
            parent: Some(parent),
        });
        Some(NodeId(self.nodes.len() - 1))
    }

    pub fn add_group(&mut self, parent: NodeId, id: &str, name: Option<&str>) -> Option<NodeId> {
        self.add(parent, NodeKind::Group, id, name)
    }

    pub fn add_item(&mut self, parent: NodeId, id: &str, name: Option<&str>) -> Option<NodeId> {
        self.add(parent, NodeKind::Item, id, name)
    }

    /// Walk from the immediate parent of `id` up to and including the root.
    pub fn ancestors(&self, id: NodeId) -> Ancestors<'_> {
        Ancestors {
            tree: self,
            next: self.node(id).and_then(|n| n.parent),
        }
    }

    /// Locate an item by identifier, falling back to a name match.
    pub fn find_item(&self, id: Option<&str>, name: Option<&str>) -> Option<NodeId> {
        let items = || {
            self.nodes
                .iter()
                .enumerate()
                .filter(|(_, n)| n.kind == NodeKind::Item)
        };

        if let Some(id) = id.filter(|s| !s.is_empty()) {
            if let Some((i, _)) = items().find(|(_, n)| n.id == id) {
                return Some(NodeId(i));
            }
        }
        let name = name.filter(|s| !s.is_empty())?;
        items()
            .find(|(_, n)| n.name.as_deref() == Some(name))
            .map(|(i, _)| NodeId(i))
    }

    /// Build a tree from the nested collection definition.
    pub fn from_definition(definition: &CollectionDefinition) -> Self {
        let mut tree = Self::new(&definition.id, definition.name.as_deref());
        let root = tree.root();
        for entry in definition.item.iter().flatten() {
            tree.insert_entry(root, entry);
        }
        tree
    }

    fn insert_entry(&mut self, parent: NodeId, entry: &ItemDefinition) {
        let id = entry.id.as_deref().unwrap_or_default();
        match &entry.item {
            Some(children) => {
                if let Some(group) = self.add_group(parent, id, entry.name.as_deref()) {
                    for child in children {
                        self.insert_entry(group, child);
                    }
                }
            }
            None => {
                self.add_item(parent, id, entry.name.as_deref());
            }
        }
    }
}

/// Iterator over ancestors, immediate parent first.
pub struct Ancestors<'a> {
    tree: &'a CollectionTree,
    next: Option<NodeId>,
}

impl<'a> Iterator for Ancestors<'a> {
    type Item = (NodeId, &'a CollectionNode);

    fn next(&mut self) -> Option<Self::Item> {
        let id = self.next?;
        let node = self.tree.node(id)?;
        self.next = node.parent;
        Some((id, node))
    }
}

// ============================================================================
// Wire shape of the collection definition
// ============================================================================

/// Collection as it appears in the run summary.
///
/// Each field decodes on its own, so a bad entry deep in `item` costs that
/// entry only.
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
pub struct CollectionDefinition {
    #[serde(default, deserialize_with = "crate::trace::lenient::deserialize")]
    pub id: String,

    #[serde(default, deserialize_with = "crate::trace::lenient::deserialize")]
    pub name: Option<String>,

    #[serde(default, deserialize_with = "crate::trace::lenient::seq")]
    pub item: Option<Vec<ItemDefinition>>,
}

/// A nested entry; the presence of an `item` list makes it a group.
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
pub struct ItemDefinition {
    #[serde(default, deserialize_with = "crate::trace::lenient::deserialize")]
    pub id: Option<String>,

    #[serde(default, deserialize_with = "crate::trace::lenient::deserialize")]
    pub name: Option<String>,

    #[serde(default, deserialize_with = "crate::trace::lenient::seq")]
    pub item: Option<Vec<ItemDefinition>>,
}
