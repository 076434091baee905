use std::collections::HashMap;
use std::fmt;
use std::hash::Hash;
use std::ops::Index;
use std::sync::atomic::{AtomicUsize, Ordering};

use crate::fp::error::TreeError;

static NEXT_TREE_ID: AtomicUsize = AtomicUsize::new(0);

/// Identity of one [`FPTree`] instance, unique within the process.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TreeId(usize);

impl TreeId {
    fn next() -> Self {
        Self(NEXT_TREE_ID.fetch_add(1, Ordering::Relaxed))
    }
}

/// Stable handle to a node slot inside one [`FPTree`].
///
/// Handles carry the identity of the tree that issued them, so a handle
/// passed to the wrong tree is rejected instead of aliasing a foreign slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId {
    tree: TreeId,
    index: usize,
}

impl NodeId {
    pub fn tree(&self) -> TreeId {
        self.tree
    }

    pub fn index(&self) -> usize {
        self.index
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.index)
    }
}

#[derive(Debug, Clone)]
pub struct FPNode<T> {
    pub(super) id: NodeId,
    pub(super) item: Option<T>,
    pub(super) count: Option<usize>,
    pub(super) parent: Option<NodeId>,
    pub(super) children: HashMap<T, NodeId>,
    pub(super) neighbor: Option<NodeId>,
}

impl<T: Eq + Hash> FPNode<T> {
    pub(super) fn new_root(id: NodeId) -> Self {
        Self {
            id,
            item: None,
            count: None,
            parent: None,
            children: HashMap::new(),
            neighbor: None,
        }
    }

    pub(super) fn new_item(id: NodeId, item: T, count: usize) -> Self {
        Self {
            id,
            item: Some(item),
            count: Some(count),
            parent: None,
            children: HashMap::new(),
            neighbor: None,
        }
    }

    pub fn id(&self) -> NodeId {
        self.id
    }

    /// The item held by this node, `None` only for the root.
    pub fn item(&self) -> Option<&T> {
        self.item.as_ref()
    }

    pub fn count(&self) -> Result<usize, TreeError> {
        self.count.ok_or(TreeError::InvalidCountOperation)
    }

    /// Count of an item node. Chains and prefix paths never hold the root.
    pub(crate) fn weight(&self) -> usize {
        debug_assert!(!self.is_root(), "the root carries no count");
        self.count.unwrap_or_default()
    }

    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    /// Next node holding the same item, in first-insertion order.
    pub fn neighbor(&self) -> Option<NodeId> {
        self.neighbor
    }

    pub fn search(&self, item: &T) -> Option<NodeId> {
        self.children.get(item).copied()
    }

    pub fn contains(&self, item: &T) -> bool {
        self.children.contains_key(item)
    }

    pub fn children(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.children.values().copied()
    }

    pub fn child_count(&self) -> usize {
        self.children.len()
    }

    pub fn is_root(&self) -> bool {
        self.item.is_none() && self.count.is_none()
    }

    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }
}

/// Head and tail of the neighbor chain through every node of one item.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) struct Route {
    pub(super) head: NodeId,
    pub(super) tail: NodeId,
}

/// An FP-tree backed by an arena of nodes.
///
/// The tree owns every node; parent, neighbor and child links are stored as
/// [`NodeId`] handles into the arena. Removed nodes leave a vacant slot so
/// that outstanding handles never resolve to a different node.
#[derive(Debug)]
pub struct FPTree<T> {
    pub(super) id: TreeId,
    pub(super) nodes: Vec<Option<FPNode<T>>>,
    pub(super) routes: HashMap<T, Route>,
    pub(super) item_order: Vec<T>,
    pub(super) root: NodeId,
    pub(super) live: usize,
}

impl<T: Eq + Hash + Clone> Default for FPTree<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Eq + Hash + Clone> FPTree<T> {
    pub fn new() -> Self {
        let id = TreeId::next();
        let root = NodeId { tree: id, index: 0 };
        Self {
            id,
            nodes: vec![Some(FPNode::new_root(root))],
            routes: HashMap::new(),
            item_order: Vec::new(),
            root,
            live: 0,
        }
    }

    pub fn id(&self) -> TreeId {
        self.id
    }

    pub fn root(&self) -> NodeId {
        self.root
    }

    /// Number of live item nodes, the root excluded.
    pub fn len(&self) -> usize {
        self.live
    }

    pub fn is_empty(&self) -> bool {
        self.live == 0
    }

    pub fn get(&self, id: NodeId) -> Option<&FPNode<T>> {
        if id.tree != self.id {
            return None;
        }
        self.nodes.get(id.index)?.as_ref()
    }

    pub fn node(&self, id: NodeId) -> Result<&FPNode<T>, TreeError> {
        if id.tree != self.id {
            return Err(TreeError::InvalidNodeRelationship(
                "node handle belongs to a different tree",
            ));
        }
        self.get(id)
            .ok_or(TreeError::InvalidNodeRelationship("node has been removed"))
    }

    pub fn search(&self, parent: NodeId, item: &T) -> Result<Option<NodeId>, TreeError> {
        Ok(self.node(parent)?.search(item))
    }

    pub fn increment(&mut self, id: NodeId) -> Result<usize, TreeError> {
        self.increment_by(id, 1)
    }

    pub fn increment_by(&mut self, id: NodeId, amount: usize) -> Result<usize, TreeError> {
        let current = self.node(id)?.count()?;
        self.add_to_count(id, amount);
        Ok(current + amount)
    }

    /// Creates a node for `item` under `parent` and appends it to the item's
    /// chain.
    pub fn insert_child(
        &mut self,
        parent: NodeId,
        item: T,
        count: usize,
    ) -> Result<NodeId, TreeError> {
        if self.node(parent)?.contains(&item) {
            return Err(TreeError::InvalidNodeRelationship(
                "parent already has a child for this item",
            ));
        }
        Ok(self.push_child(parent, item, count))
    }

    pub(crate) fn push_child(&mut self, parent: NodeId, item: T, count: usize) -> NodeId {
        let child = NodeId {
            tree: self.id,
            index: self.nodes.len(),
        };
        self.nodes.push(Some(FPNode::new_item(child, item, count)));
        self.live += 1;
        self.link(parent, child);
        self.append_to_route(child);
        child
    }

    pub(crate) fn add_to_count(&mut self, id: NodeId, amount: usize) {
        if let Some(count) = self.node_mut(id).count.as_mut() {
            *count += amount;
        }
    }

    /// Registers `child` under its item key in `parent` and points the child
    /// back at it. The root has no item and is never linked.
    pub(super) fn link(&mut self, parent: NodeId, child: NodeId) {
        if let Some(item) = self[child].item.clone() {
            self.node_mut(parent).children.insert(item, child);
            self.node_mut(child).parent = Some(parent);
        }
    }

    pub(super) fn release(&mut self, id: NodeId) {
        if let Some(slot) = self.nodes.get_mut(id.index) {
            if slot.take().is_some() {
                self.live -= 1;
            }
        }
    }

    pub(super) fn node_mut(&mut self, id: NodeId) -> &mut FPNode<T> {
        match self.nodes.get_mut(id.index).and_then(Option::as_mut) {
            Some(node) if id.tree == self.id => node,
            _ => panic!("node {id} is not live in this tree"),
        }
    }
}

impl<T: Eq + Hash + Clone> Index<NodeId> for FPTree<T> {
    type Output = FPNode<T>;

    fn index(&self, id: NodeId) -> &FPNode<T> {
        match self.get(id) {
            Some(node) => node,
            None => panic!("node {id} is not live in this tree"),
        }
    }
}
