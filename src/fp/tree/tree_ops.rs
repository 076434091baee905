use std::fmt::{self, Debug};
use std::hash::Hash;

use super::tree::{FPNode, FPTree, NodeId, Route};
use crate::fp::error::TreeError;

/// Iterator over the chain of nodes holding one item.
pub struct Nodes<'a, T> {
    tree: &'a FPTree<T>,
    next: Option<NodeId>,
}

impl<T> Clone for Nodes<'_, T> {
    fn clone(&self) -> Self {
        Self {
            tree: self.tree,
            next: self.next,
        }
    }
}

impl<'a, T: Eq + Hash + Clone> Iterator for Nodes<'a, T> {
    type Item = &'a FPNode<T>;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.tree.get(self.next?)?;
        self.next = node.neighbor;
        Some(node)
    }
}

impl<T: Eq + Hash + Clone> FPTree<T> {
    /// Inserts a transaction that is already filtered to frequent items and
    /// sorted by descending support.
    pub fn add<I>(&mut self, transaction: I)
    where
        I: IntoIterator<Item = T>,
    {
        let mut point = self.root;

        for item in transaction {
            point = match self[point].search(&item) {
                Some(child) => {
                    self.add_to_count(child, 1);
                    child
                }
                None => self.push_child(point, item, 1),
            };
        }
    }

    pub fn nodes_for(&self, item: &T) -> Nodes<'_, T> {
        Nodes {
            tree: self,
            next: self.routes.get(item).map(|route| route.head),
        }
    }

    /// Items that currently have at least one live node, in the order their
    /// first node was inserted.
    pub fn items(&self) -> impl Iterator<Item = &T> + '_ {
        self.item_order.iter()
    }

    pub fn items_with_nodes(&self) -> impl Iterator<Item = (&T, Nodes<'_, T>)> + '_ {
        self.item_order
            .iter()
            .map(move |item| (item, self.nodes_for(item)))
    }

    /// Sum of the counts along the item's chain.
    pub fn support(&self, item: &T) -> usize {
        self.nodes_for(item).map(FPNode::weight).sum()
    }

    /// One root-to-node path per occurrence of `item`, root excluded. Each
    /// path ends with the occurrence itself.
    pub fn prefix_paths(&self, item: &T) -> impl Iterator<Item = Vec<&FPNode<T>>> + '_ {
        self.nodes_for(item).map(move |node| self.path_to(node))
    }

    fn path_to<'a>(&'a self, node: &'a FPNode<T>) -> Vec<&'a FPNode<T>> {
        let mut path = Vec::new();
        let mut current = Some(node);

        while let Some(point) = current.filter(|point| !point.is_root()) {
            path.push(point);
            current = point.parent.and_then(|parent| self.get(parent));
        }

        path.reverse();
        path
    }

    /// Detaches `child` from `parent`, then hands the child's own children
    /// to `parent`, merging into any child `parent` already has for the
    /// same item.
    pub fn remove(&mut self, parent: NodeId, child: NodeId) -> Result<(), TreeError> {
        self.node(parent)?;
        let not_a_child = TreeError::NotAChild { parent, child };
        let item = self.node(child)?.item.clone().ok_or(not_a_child.clone())?;
        if self[parent].search(&item) != Some(child) {
            return Err(not_a_child);
        }

        self.detach(parent, child);
        Ok(())
    }

    /// Removes every node holding `item`, compressing around each one.
    pub fn remove_item(&mut self, item: &T) {
        let doomed: Vec<NodeId> = self.nodes_for(item).map(FPNode::id).collect();

        for id in doomed {
            let parent = self.get(id).and_then(|node| node.parent);
            if let Some(parent) = parent {
                self.detach(parent, id);
            }
        }
    }

    pub(super) fn detach(&mut self, parent: NodeId, child: NodeId) {
        if let Some(item) = self[child].item.clone() {
            self.node_mut(parent).children.remove(&item);
        }
        self.node_mut(child).parent = None;
        self.remove_notify(child);

        let orphans: Vec<NodeId> = self
            .node_mut(child)
            .children
            .drain()
            .map(|(_, id)| id)
            .collect();
        self.release(child);

        for orphan in orphans {
            self.relocate(parent, orphan);
        }
    }

    fn relocate(&mut self, parent: NodeId, orphan: NodeId) {
        let mut pending = vec![(parent, orphan)];

        while let Some((parent, orphan)) = pending.pop() {
            self.node_mut(orphan).parent = None;
            let Some(item) = self[orphan].item.clone() else {
                continue;
            };

            match self[parent].search(&item) {
                Some(existing) => {
                    let count = self[orphan].weight();
                    self.add_to_count(existing, count);
                    self.remove_notify(orphan);

                    let grandchildren: Vec<NodeId> = self
                        .node_mut(orphan)
                        .children
                        .drain()
                        .map(|(_, id)| id)
                        .collect();
                    self.release(orphan);
                    pending.extend(grandchildren.into_iter().map(|id| (existing, id)));
                }
                None => self.link(parent, orphan),
            }
        }
    }

    pub(super) fn append_to_route(&mut self, node: NodeId) {
        let Some(item) = self[node].item.clone() else {
            return;
        };

        match self.routes.get(&item).copied() {
            Some(route) => {
                self.node_mut(route.tail).neighbor = Some(node);
                self.routes.insert(
                    item,
                    Route {
                        head: route.head,
                        tail: node,
                    },
                );
            }
            None => {
                self.item_order.push(item.clone());
                self.routes.insert(
                    item,
                    Route {
                        head: node,
                        tail: node,
                    },
                );
            }
        }
    }

    /// Splices a node that is leaving the tree out of its item's chain.
    pub(super) fn remove_notify(&mut self, node: NodeId) {
        let Some(item) = self[node].item.clone() else {
            return;
        };
        let neighbor = self.node_mut(node).neighbor.take();
        let Some(route) = self.routes.get(&item).copied() else {
            return;
        };

        if route.head == node {
            match neighbor {
                Some(next) => {
                    self.routes.insert(
                        item,
                        Route {
                            head: next,
                            tail: route.tail,
                        },
                    );
                }
                None => {
                    self.routes.remove(&item);
                    self.item_order.retain(|known| *known != item);
                }
            }
            return;
        }

        let mut cursor = route.head;
        while let Some(next) = self[cursor].neighbor {
            if next == node {
                self.node_mut(cursor).neighbor = neighbor;
                if route.tail == node {
                    self.routes.insert(
                        item,
                        Route {
                            head: route.head,
                            tail: cursor,
                        },
                    );
                }
                return;
            }
            cursor = next;
        }
    }
}

impl<T: Eq + Hash + Clone + Debug> FPTree<T> {
    /// Renders the tree structure followed by every item's chain.
    pub fn inspect(&self) -> String {
        DisplayTree(self).to_string()
    }
}

struct DisplayTree<'a, T>(&'a FPTree<T>);

impl<T: Eq + Hash + Clone + Debug> fmt::Display for DisplayTree<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let tree = self.0;
        writeln!(f, "Tree:")?;
        let mut stack = vec![(tree.root, 1usize)];
        while let Some((id, depth)) = stack.pop() {
            let node = &tree[id];
            writeln!(f, "{}{}", "  ".repeat(depth), DisplayNode(node))?;
            stack.extend(node.children().map(|child| (child, depth + 1)));
        }

        writeln!(f)?;
        writeln!(f, "Routes:")?;
        for (item, nodes) in tree.items_with_nodes() {
            writeln!(f, "  {item:?}")?;
            for node in nodes {
                writeln!(f, "    {}", DisplayNode(node))?;
            }
        }
        Ok(())
    }
}

struct DisplayNode<'a, T>(&'a FPNode<T>);

impl<T: Debug> fmt::Display for DisplayNode<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (&self.0.item, self.0.count) {
            (Some(item), Some(count)) => write!(f, "<FPNode {item:?} ({count})>"),
            _ => write!(f, "<FPNode (root)>"),
        }
    }
}
