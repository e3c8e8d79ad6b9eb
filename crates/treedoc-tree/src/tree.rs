//! Program structure tree.
//!
//! Nodes are stored in a flat `Vec` with parent/children relationships
//! tracked by indices. The root is always node 0 and is the only node
//! that normally carries no metadata.

use crate::element::ElementMetadata;

/// Index of a node in an [`ElementTree`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NodeId(usize);

/// A node in the program structure tree.
#[derive(Clone, Debug)]
pub struct ElementNode {
    /// Short identifier, unique among siblings. Used for file names.
    pub name: String,
    /// Attached metadata; `None` for the synthetic root.
    pub info: Option<ElementMetadata>,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
}

impl ElementNode {
    /// Parent node, `None` for the root.
    #[must_use]
    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    /// Children in insertion order.
    #[must_use]
    pub fn children(&self) -> &[NodeId] {
        &self.children
    }

    /// Whether this node gets a page and menu entry.
    ///
    /// Nodes without metadata are exportable; only an explicit
    /// non-exportable record hides a node.
    #[must_use]
    pub fn is_exportable(&self) -> bool {
        self.info.as_ref().is_none_or(|info| info.exportable)
    }

    /// Whether this node is rendered as a single page rather than a directory.
    ///
    /// Nodes without metadata are containers.
    #[must_use]
    pub fn is_leaf(&self) -> bool {
        self.info.as_ref().is_some_and(|info| info.kind.is_leaf())
    }

    /// Declared display name, falling back to the node name.
    #[must_use]
    pub fn display_name(&self) -> &str {
        match &self.info {
            Some(info) if !info.name.is_empty() => &info.name,
            _ => &self.name,
        }
    }
}

/// Read-only program structure tree.
#[derive(Clone, Debug)]
pub struct ElementTree {
    nodes: Vec<ElementNode>,
}

impl ElementTree {
    /// Create a tree holding only a root without metadata.
    #[must_use]
    pub fn new(root_name: impl Into<String>) -> Self {
        Self {
            nodes: vec![ElementNode {
                name: root_name.into(),
                info: None,
                parent: None,
                children: Vec::new(),
            }],
        }
    }

    /// The root node.
    #[must_use]
    pub fn root(&self) -> NodeId {
        NodeId(0)
    }

    /// Append a child under `parent`.
    ///
    /// # Returns
    ///
    /// Id of the added node.
    pub fn add_child(
        &mut self,
        parent: NodeId,
        name: impl Into<String>,
        info: Option<ElementMetadata>,
    ) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(ElementNode {
            name: name.into(),
            info,
            parent: Some(parent),
            children: Vec::new(),
        });
        self.nodes[parent.0].children.push(id);
        id
    }

    /// Attach metadata to the root.
    pub(crate) fn set_root_info(&mut self, info: ElementMetadata) {
        self.nodes[0].info = Some(info);
    }

    /// Get a node by id.
    ///
    /// # Panics
    ///
    /// Panics if `id` does not belong to this tree.
    #[must_use]
    pub fn node(&self, id: NodeId) -> &ElementNode {
        &self.nodes[id.0]
    }

    /// Parent of a node, `None` for the root.
    #[must_use]
    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.nodes[id.0].parent
    }

    /// Children of a node in insertion order.
    #[must_use]
    pub fn children(&self, id: NodeId) -> &[NodeId] {
        &self.nodes[id.0].children
    }

    /// Children of a node that get a page and menu entry.
    pub fn exportable_children(&self, id: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        self.children(id)
            .iter()
            .copied()
            .filter(|&child| self.node(child).is_exportable())
    }

    /// Number of ancestors of a node (root = 0).
    #[must_use]
    pub fn depth(&self, id: NodeId) -> usize {
        let mut depth = 0;
        let mut current = self.parent(id);
        while let Some(parent) = current {
            depth += 1;
            current = self.parent(parent);
        }
        depth
    }

    /// Total number of nodes, root included.
    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Always false: a tree has at least a root.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Find a direct child by name.
    #[must_use]
    pub fn child_by_name(&self, parent: NodeId, name: &str) -> Option<NodeId> {
        self.children(parent)
            .iter()
            .copied()
            .find(|&child| self.node(child).name == name)
    }
}
