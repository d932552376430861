use std::ops::{Index, IndexMut};

/// Color tag of a tree node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Color {
    Red,
    Black,
}

impl Color {
    /// Returns `true` if the color is [`Red`].
    ///
    /// [`Red`]: Color::Red
    #[must_use]
    pub fn is_red(&self) -> bool {
        matches!(self, Self::Red)
    }

    /// Returns `true` if the color is [`Black`].
    ///
    /// [`Black`]: Color::Black
    #[must_use]
    pub fn is_black(&self) -> bool {
        matches!(self, Self::Black)
    }
}

/// Index of a node inside the [`Arena`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub(crate) struct NodeId(usize);

/// A child or parent slot. `None` is an absent node, which counts as black.
pub(crate) type Link = Option<NodeId>;

pub(crate) struct Node<K, V> {
    pub(crate) key: K,
    pub(crate) value: V,
    pub(crate) color: Color,
    // non-owning, `None` only for the root
    pub(crate) parent: Link,
    pub(crate) left: Link,
    pub(crate) right: Link,
}

impl<K, V> Node<K, V> {
    /// A detached red node, the shape every freshly inserted node starts with.
    pub(crate) fn new_red(key: K, value: V) -> Self {
        Self {
            key,
            value,
            color: Color::Red,
            parent: None,
            left: None,
            right: None,
        }
    }
}

/// Slab of nodes addressed by [`NodeId`].
///
/// Freed slots are recycled through a free list so ids of live nodes never
/// move while the tree is being rebalanced.
pub(crate) struct Arena<K, V> {
    slots: Vec<Option<Node<K, V>>>,
    free: Vec<NodeId>,
}

impl<K, V> Arena<K, V> {
    pub(crate) fn new() -> Self {
        Self {
            slots: Vec::new(),
            free: Vec::new(),
        }
    }

    pub(crate) fn with_capacity(capacity: usize) -> Self {
        Self {
            slots: Vec::with_capacity(capacity),
            free: Vec::new(),
        }
    }

    pub(crate) fn alloc(&mut self, node: Node<K, V>) -> NodeId {
        match self.free.pop() {
            Some(id) => {
                debug_assert!(self.slots[id.0].is_none());
                self.slots[id.0] = Some(node);
                id
            }
            None => {
                self.slots.push(Some(node));
                NodeId(self.slots.len() - 1)
            }
        }
    }

    /// Takes the node out of its slot. The id must not be used afterwards.
    pub(crate) fn free(&mut self, id: NodeId) -> Node<K, V> {
        match self.slots[id.0].take() {
            Some(node) => {
                self.free.push(id);
                node
            }
            None => unreachable!("double free of {id:?}"),
        }
    }

    /// Number of live nodes.
    pub(crate) fn live(&self) -> usize {
        self.slots.len() - self.free.len()
    }

    /// Leftmost node of the subtree rooted at `root`.
    pub(crate) fn min_of(&self, root: NodeId) -> NodeId {
        let mut x = root;
        while let Some(left) = self[x].left {
            x = left;
        }

        x
    }

    /// Rightmost node of the subtree rooted at `root`.
    pub(crate) fn max_of(&self, root: NodeId) -> NodeId {
        let mut x = root;
        while let Some(right) = self[x].right {
            x = right;
        }

        x
    }

    /// Releases the backing storage. Every slot must already be freed.
    pub(crate) fn reset(&mut self) {
        debug_assert_eq!(self.live(), 0);
        self.slots = Vec::new();
        self.free = Vec::new();
    }

    #[cfg(test)]
    pub(crate) fn slot_capacity(&self) -> usize {
        self.slots.capacity()
    }
}

impl<K, V> Index<NodeId> for Arena<K, V> {
    type Output = Node<K, V>;

    #[inline]
    fn index(&self, id: NodeId) -> &Self::Output {
        match &self.slots[id.0] {
            Some(node) => node,
            None => unreachable!("dangling {id:?}"),
        }
    }
}

impl<K, V> IndexMut<NodeId> for Arena<K, V> {
    #[inline]
    fn index_mut(&mut self, id: NodeId) -> &mut Self::Output {
        match &mut self.slots[id.0] {
            Some(node) => node,
            None => unreachable!("dangling {id:?}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn alloc_reuses_freed_slots() {
        let mut arena = Arena::new();
        let a = arena.alloc(Node::new_red(1, "a"));
        let b = arena.alloc(Node::new_red(2, "b"));
        assert_ne!(a, b);
        assert_eq!(arena.live(), 2);

        let node = arena.free(a);
        assert_eq!((node.key, node.value), (1, "a"));
        assert_eq!(arena.live(), 1);

        let c = arena.alloc(Node::new_red(3, "c"));
        assert_eq!(c, a);
        assert_eq!(arena[c].key, 3);
        assert_eq!(arena[b].key, 2);
        assert_eq!(arena.live(), 2);
    }

    #[test]
    fn new_nodes_are_red_and_detached() {
        let node = Node::new_red(7, ());
        assert!(node.color.is_red());
        assert_eq!(node.parent, None);
        assert_eq!(node.left, None);
        assert_eq!(node.right, None);
    }

    #[test]
    fn reset_releases_storage() {
        let mut arena = Arena::new();
        let ids: Vec<_> = (0..64).map(|k| arena.alloc(Node::new_red(k, k))).collect();
        for id in ids {
            arena.free(id);
        }
        assert!(arena.slot_capacity() >= 64);

        arena.reset();
        assert_eq!(arena.live(), 0);
        assert_eq!(arena.slot_capacity(), 0);
    }

    #[test]
    #[should_panic]
    fn double_free_panics() {
        let mut arena = Arena::new();
        let a = arena.alloc(Node::new_red(1, 1));
        arena.free(a);
        arena.free(a);
    }
}
