use std::any::Any;
use std::fmt;

/// Identifier of a node inside an [`Applier`] tree.
pub type NodeId = usize;

/// A retained element produced by composition.
///
/// Composable functions do not build the tree directly. They emit nodes
/// through the current [`crate::Composer`], which reuses an existing node
/// when the call site and node type line up and creates a fresh one
/// otherwise. Implementations keep whatever payload the host cares about
/// (text, handlers, layout parameters) and receive structural callbacks
/// as the tree changes around them.
pub trait Node: Any {
    /// Called once, right after the node is inserted.
    fn mount(&mut self) {}

    /// Called when a later pass reuses this node.
    fn update(&mut self) {}

    /// Called right before the node is removed.
    fn unmount(&mut self) {}

    /// Receives the ordered child list for the current pass.
    fn update_children(&mut self, _children: &[NodeId]) {}

    /// Child ids as of the last pass. Leaf nodes return an empty list.
    fn children(&self) -> Vec<NodeId> {
        Vec::new()
    }

    /// Short name used by tree dumps.
    fn describe(&self) -> String {
        std::any::type_name::<Self>()
            .rsplit("::")
            .next()
            .unwrap_or("Node")
            .to_string()
    }
}

impl dyn Node {
    pub fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }

    pub fn as_any(&self) -> &dyn Any {
        self
    }
}

/// Errors surfaced by [`Applier`] implementations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NodeError {
    /// The id does not refer to a live node.
    Missing(NodeId),
    /// The node exists but is not of the requested type.
    TypeMismatch { id: NodeId, expected: &'static str },
}

impl fmt::Display for NodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NodeError::Missing(id) => write!(f, "node {id} does not exist"),
            NodeError::TypeMismatch { id, expected } => {
                write!(f, "node {id} is not a {expected}")
            }
        }
    }
}

impl std::error::Error for NodeError {}

/// Storage for the retained node tree.
///
/// The composer drives an applier while rendering; tests and hosts read
/// back through it afterwards.
pub trait Applier {
    fn create(&mut self, node: Box<dyn Node>) -> NodeId;
    fn get_mut(&mut self, id: NodeId) -> Result<&mut dyn Node, NodeError>;
    fn remove(&mut self, id: NodeId) -> Result<(), NodeError>;
    fn contains(&self, id: NodeId) -> bool;
}

/// In-memory [`Applier`] backed by a slab of boxed nodes.
///
/// Ids are slab indices and are never reused within one applier, so a
/// stale id fails with [`NodeError::Missing`] instead of silently
/// pointing at an unrelated node.
#[derive(Default)]
pub struct MemoryApplier {
    nodes: Vec<Option<Box<dyn Node>>>,
    live: usize,
}

impl MemoryApplier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of live nodes.
    pub fn len(&self) -> usize {
        self.live
    }

    pub fn is_empty(&self) -> bool {
        self.live == 0
    }

    /// Runs `f` against the node at `id` downcast to `N`.
    pub fn with_node<N: Node, R>(
        &mut self,
        id: NodeId,
        f: impl FnOnce(&mut N) -> R,
    ) -> Result<R, NodeError> {
        let node = self.get_mut(id)?;
        match node.as_any_mut().downcast_mut::<N>() {
            Some(typed) => Ok(f(typed)),
            None => Err(NodeError::TypeMismatch {
                id,
                expected: std::any::type_name::<N>(),
            }),
        }
    }

    /// Renders the subtree under `root` as an indented outline.
    pub fn dump_tree(&self, root: NodeId) -> String {
        let mut out = String::new();
        self.dump_into(root, 0, &mut out);
        out
    }

    fn dump_into(&self, id: NodeId, depth: usize, out: &mut String) {
        let Some(Some(node)) = self.nodes.get(id) else {
            return;
        };
        for _ in 0..depth {
            out.push_str("  ");
        }
        out.push_str(&format!("[{id}] {}\n", node.describe()));
        for child in node.children() {
            self.dump_into(child, depth + 1, out);
        }
    }
}

impl Applier for MemoryApplier {
    fn create(&mut self, mut node: Box<dyn Node>) -> NodeId {
        let id = self.nodes.len();
        node.mount();
        self.nodes.push(Some(node));
        self.live += 1;
        id
    }

    fn get_mut(&mut self, id: NodeId) -> Result<&mut dyn Node, NodeError> {
        match self.nodes.get_mut(id) {
            Some(Some(node)) => Ok(node.as_mut()),
            _ => Err(NodeError::Missing(id)),
        }
    }

    fn remove(&mut self, id: NodeId) -> Result<(), NodeError> {
        match self.nodes.get_mut(id) {
            Some(slot @ Some(_)) => {
                if let Some(mut node) = slot.take() {
                    node.unmount();
                }
                self.live -= 1;
                Ok(())
            }
            _ => Err(NodeError::Missing(id)),
        }
    }

    fn contains(&self, id: NodeId) -> bool {
        matches!(self.nodes.get(id), Some(Some(_)))
    }
}
