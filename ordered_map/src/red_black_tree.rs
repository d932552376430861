use core::fmt;
use std::borrow::Borrow;
use std::cmp::Ordering;
use std::mem;

use log::{debug, trace};

use crate::error::{MapError, MapResult};
use crate::node::{Arena, Color, Link, Node, NodeId};

/// Where a node hangs, or where a new node would be attached.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum NodePos {
    Root,
    Left(NodeId),
    Right(NodeId),
}

impl NodePos {
    #[inline]
    fn parent(self) -> Link {
        match self {
            NodePos::Root => None,
            NodePos::Left(p) | NodePos::Right(p) => Some(p),
        }
    }
}

/// Outcome of a descent from the root.
enum Search {
    Found(NodeId),
    Vacant(NodePos),
}

/// An ordered map based on a red-black tree.
///
/// Keys are unique. Inserting a key that is already present leaves the map
/// unchanged, use [`upsert`](Self::upsert) to overwrite values.
pub struct OrderedMap<K, V> {
    // INVARIANTS:
    //  * `root` is `None` iff `len == 0`
    //  * `len` equals the number of live nodes in `arena`
    arena: Arena<K, V>,
    root: Link,
    len: usize,
}

impl<K, V> Default for OrderedMap<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K, V> Clone for OrderedMap<K, V>
where
    K: Clone,
    V: Clone,
{
    /// Deep copy with the same shape and colors. The copy is compacted into a
    /// fresh arena and its length is counted while walking.
    fn clone(&self) -> Self {
        let mut copy = Self {
            arena: Arena::with_capacity(self.len),
            root: None,
            len: 0,
        };
        let Some(root) = self.root else {
            return copy;
        };

        let mut stack = vec![(root, NodePos::Root)];
        while let Some((src, pos)) = stack.pop() {
            let node = &self.arena[src];
            let id = copy.arena.alloc(Node {
                key: node.key.clone(),
                value: node.value.clone(),
                color: node.color,
                parent: pos.parent(),
                left: None,
                right: None,
            });
            copy.link(pos, Some(id));
            copy.len += 1;

            if let Some(right) = node.right {
                stack.push((right, NodePos::Right(id)));
            }
            if let Some(left) = node.left {
                stack.push((left, NodePos::Left(id)));
            }
        }

        debug_assert_eq!(copy.len, self.len);
        debug!("cloned tree with {} nodes", copy.len);
        copy
    }
}

impl<K, V> fmt::Debug for OrderedMap<K, V>
where
    K: fmt::Debug,
    V: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        struct TreeDebug<'a, K, V> {
            tree: &'a OrderedMap<K, V>,
        }

        impl<K, V> fmt::Debug for TreeDebug<'_, K, V>
        where
            K: fmt::Debug,
            V: fmt::Debug,
        {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                let mut f = f.debug_list();
                self.tree.inorder_for_each_core(|id| {
                    let node = &self.tree.arena[id];
                    f.entry(&(&node.key, &node.value, node.color));
                });
                f.finish()
            }
        }

        f.debug_struct("OrderedMap")
            .field("len", &self.len)
            .field("root", &self.root.map(|id| self.node_ref(id)))
            .field("nodes", &TreeDebug { tree: self })
            .finish()
    }
}

impl<K, V> OrderedMap<K, V> {
    pub fn new() -> Self {
        Self {
            arena: Arena::new(),
            root: None,
            len: 0,
        }
    }

    /// Number of entries in the map. O(1).
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Moves the whole tree out in O(1), leaving `self` empty.
    pub fn take(&mut self) -> Self {
        mem::take(self)
    }

    /// Removes every entry. Nodes are released in post-order.
    pub fn clear(&mut self) {
        let released = self.len;
        let mut stack: Vec<(NodeId, bool)> =
            self.root.map(|r| (r, false)).into_iter().collect();
        while let Some((id, children_done)) = stack.pop() {
            if children_done {
                self.arena.free(id);
                self.len -= 1;
                continue;
            }

            stack.push((id, true));
            let node = &self.arena[id];
            if let Some(right) = node.right {
                stack.push((right, false));
            }
            if let Some(left) = node.left {
                stack.push((left, false));
            }
        }

        debug_assert_eq!(self.len, 0);
        self.root = None;
        self.arena.reset();
        if released > 0 {
            debug!("cleared {released} nodes");
        }
    }

    pub fn find<Q>(&self, key: &Q) -> Option<NodeRef<'_, K, V>>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        match self.search(key) {
            Search::Found(id) => Some(self.node_ref(id)),
            Search::Vacant(_) => None,
        }
    }

    pub fn get<Q>(&self, key: &Q) -> Option<(&K, &V)>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        match self.search(key) {
            Search::Found(id) => {
                let node = &self.arena[id];
                Some((&node.key, &node.value))
            }
            Search::Vacant(_) => None,
        }
    }

    pub fn get_mut<Q>(&mut self, key: &Q) -> Option<(&K, &mut V)>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        match self.search(key) {
            Search::Found(id) => {
                let node = &mut self.arena[id];
                Some((&node.key, &mut node.value))
            }
            Search::Vacant(_) => None,
        }
    }

    pub fn contains<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        matches!(self.search(key), Search::Found(_))
    }

    /// Node with the smallest key.
    pub fn minimum(&self) -> MapResult<NodeRef<'_, K, V>> {
        self.root
            .map(|root| self.node_ref(self.arena.min_of(root)))
            .ok_or(MapError::EmptyTree)
    }

    /// Node with the largest key.
    pub fn maximum(&self) -> MapResult<NodeRef<'_, K, V>> {
        self.root
            .map(|root| self.node_ref(self.arena.max_of(root)))
            .ok_or(MapError::EmptyTree)
    }

    pub fn min(&self) -> Option<(&K, &V)> {
        self.minimum().ok().map(|node| (node.key(), node.value()))
    }

    pub fn max(&self) -> Option<(&K, &V)> {
        self.maximum().ok().map(|node| (node.key(), node.value()))
    }

    /// Inserts `key` if it is not present yet.
    ///
    /// Returns `false` and drops `key` and `value` if the key already exists.
    pub fn insert(&mut self, key: K, value: V) -> bool
    where
        K: Ord,
    {
        match self.search(&key) {
            Search::Found(_) => false,
            Search::Vacant(pos) => {
                self.attach(pos, key, value);
                true
            }
        }
    }

    /// Inserts `key` or overwrites its value, returning the previous value.
    pub fn upsert(&mut self, key: K, value: V) -> Option<V>
    where
        K: Ord,
    {
        match self.search(&key) {
            Search::Found(id) => Some(mem::replace(&mut self.arena[id].value, value)),
            Search::Vacant(pos) => {
                self.attach(pos, key, value);
                None
            }
        }
    }

    /// Removes `key` and hands back the stored pair.
    ///
    /// Fails with [`MapError::KeyNotFound`] without touching the tree if the
    /// key is absent.
    pub fn remove<Q>(&mut self, key: &Q) -> MapResult<(K, V)>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        match self.search(key) {
            Search::Found(id) => Ok(self.remove_node(id)),
            Search::Vacant(_) => Err(MapError::KeyNotFound),
        }
    }

    #[inline]
    fn node_ref(&self, id: NodeId) -> NodeRef<'_, K, V> {
        NodeRef {
            arena: &self.arena,
            id,
        }
    }

    fn search<Q>(&self, key: &Q) -> Search
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        let Some(mut x) = self.root else {
            return Search::Vacant(NodePos::Root);
        };

        loop {
            let node = &self.arena[x];
            match key.cmp(node.key.borrow()) {
                Ordering::Less => match node.left {
                    Some(left) => x = left,
                    None => return Search::Vacant(NodePos::Left(x)),
                },
                Ordering::Equal => return Search::Found(x),
                Ordering::Greater => match node.right {
                    Some(right) => x = right,
                    None => return Search::Vacant(NodePos::Right(x)),
                },
            }
        }
    }

    fn inorder_for_each_core<F>(&self, mut f: F)
    where
        F: FnMut(NodeId),
    {
        let mut stack = Vec::new();
        let mut cur = self.root;
        loop {
            while let Some(id) = cur {
                stack.push(id);
                cur = self.arena[id].left;
            }
            let Some(id) = stack.pop() else {
                break;
            };
            f(id);
            cur = self.arena[id].right;
        }
    }

    #[inline]
    fn parent(&self, id: NodeId) -> Link {
        self.arena[id].parent
    }

    #[inline]
    fn left(&self, id: NodeId) -> Link {
        self.arena[id].left
    }

    #[inline]
    fn right(&self, id: NodeId) -> Link {
        self.arena[id].right
    }

    #[inline]
    fn color(&self, id: NodeId) -> Color {
        self.arena[id].color
    }

    /// Color of a child slot, absent nodes are black.
    #[inline]
    fn color_of(&self, link: Link) -> Color {
        link.map_or(Color::Black, |id| self.color(id))
    }

    #[inline]
    fn set_parent(&mut self, id: NodeId, parent: Link) {
        self.arena[id].parent = parent;
    }

    #[inline]
    fn set_left(&mut self, id: NodeId, left: Link) {
        self.arena[id].left = left;
    }

    #[inline]
    fn set_right(&mut self, id: NodeId, right: Link) {
        self.arena[id].right = right;
    }

    #[inline]
    fn set_color(&mut self, id: NodeId, color: Color) {
        self.arena[id].color = color;
    }

    fn pos(&self, id: NodeId) -> NodePos {
        match self.parent(id) {
            Some(p) if self.left(p) == Some(id) => NodePos::Left(p),
            Some(p) => {
                debug_assert_eq!(self.right(p), Some(id));
                NodePos::Right(p)
            }
            None => NodePos::Root,
        }
    }

    /// Points the slot described by `pos` at `child`. Does not touch
    /// `child`'s parent link.
    fn link(&mut self, pos: NodePos, child: Link) {
        match pos {
            NodePos::Root => self.root = child,
            NodePos::Left(p) => self.set_left(p, child),
            NodePos::Right(p) => self.set_right(p, child),
        }
    }

    fn rotate_left(&mut self, node: NodeId) {
        //    p                       p
        //    |                       |
        // +-node-+               +-right-+
        // |      |      -->      |       |
        // a  +-right-+       +-node-+    c
        //    |       |       |      |
        //    b       c       a      b
        // where a, b, c can be any subtrees
        if let Some(right) = self.right(node) {
            // attach b to node
            let b = self.left(right);
            self.set_right(node, b);
            if let Some(b) = b {
                self.set_parent(b, Some(node));
            }

            // attach right to parent
            let pos = self.pos(node);
            self.set_parent(right, pos.parent());
            self.link(pos, Some(right));

            // attach node to right
            self.set_left(right, Some(node));
            self.set_parent(node, Some(right));
        }
    }

    fn rotate_right(&mut self, node: NodeId) {
        //         p              p
        //         |              |
        //     +-node-+       +-left-+
        //     |      |       |      |
        // +-left-+   c  -->  a  +-node-+
        // |      |              |      |
        // a      b              b      c
        // where a, b, c can be any subtrees
        if let Some(left) = self.left(node) {
            // attach b to node
            let b = self.right(left);
            self.set_left(node, b);
            if let Some(b) = b {
                self.set_parent(b, Some(node));
            }

            // attach left to parent
            let pos = self.pos(node);
            self.set_parent(left, pos.parent());
            self.link(pos, Some(left));

            // attach node to left
            self.set_right(left, Some(node));
            self.set_parent(node, Some(left));
        }
    }

    /// Hangs a new red leaf at `pos` and rebalances.
    fn attach(&mut self, pos: NodePos, key: K, value: V) -> NodeId {
        let mut node = Node::new_red(key, value);
        node.parent = pos.parent();
        let id = self.arena.alloc(node);
        self.link(pos, Some(id));

        self.len += 1;
        self.insert_fixup(id);
        id
    }

    fn insert_fixup(&mut self, new_node: NodeId) {
        let mut node = new_node;
        while let Some(mut parent) = self.parent(node) {
            if self.color(parent).is_black() {
                break;
            }
            debug_assert!(self.color(node).is_red());
            // Red parent with a red child is the only violation in the tree.
            // The red uncle branch may push it up to the grand parent, the
            // other branch resolves it and the next check sees a black parent.

            match self.pos(parent) {
                NodePos::Root => unreachable!("root is never red here"),
                NodePos::Left(grand_parent) => {
                    debug_assert!(self.color(grand_parent).is_black());
                    match self.right(grand_parent) {
                        Some(uncle) if self.color(uncle).is_red() => {
                            //     +--- gp:b ---+               +--- gp:r ---+
                            //     |            |               |            |
                            //  + p:r +      + u:r +   -->   + p:b +      + u:b +
                            //  |     |      |     |         |     |      |     |
                            // n:r   a:b    b:b   c:b       n:r   a:b    b:b   c:b
                            //
                            // black height is unchanged, gp may now have a red parent
                            trace!("insert fixup: red uncle");
                            self.set_color(parent, Color::Black);
                            self.set_color(uncle, Color::Black);
                            self.set_color(grand_parent, Color::Red);
                            node = grand_parent;
                        }
                        _ => {
                            if let NodePos::Right(_) = self.pos(node) {
                                //       +-- gp:b --+                 +-- gp:b --+
                                //       |          |                 |          |
                                //  +-- p:r --+    u:b  -->       +- n:r --+    u:b
                                //  |         |                   |        |
                                // a:b    +- n:r -+           +- p:r -+   c:b
                                //        |       |           |       |
                                //       b:b     c:b         a:b     b:b
                                trace!("insert fixup: inner child, left side");
                                self.rotate_left(parent);
                                mem::swap(&mut parent, &mut node);
                            }

                            //           +-- gp:b --+            +----- p:b -----+
                            //           |          |            |               |
                            //      +-- p:r --+    u:b  -->   +- n:r -+     +- gp:r -+
                            //      |         |               |       |     |        |
                            //  +- n:r -+    c:b             a:b     b:b   c:b      u:b
                            //  |       |
                            // a:b     b:b
                            trace!("insert fixup: outer child, left side");
                            self.set_color(parent, Color::Black);
                            self.set_color(grand_parent, Color::Red);
                            self.rotate_right(grand_parent);
                        }
                    }
                }
                NodePos::Right(grand_parent) => {
                    // same as Left branch but left/right are switched
                    debug_assert!(self.color(grand_parent).is_black());
                    match self.left(grand_parent) {
                        Some(uncle) if self.color(uncle).is_red() => {
                            trace!("insert fixup: red uncle");
                            self.set_color(parent, Color::Black);
                            self.set_color(uncle, Color::Black);
                            self.set_color(grand_parent, Color::Red);
                            node = grand_parent;
                        }
                        _ => {
                            if let NodePos::Left(_) = self.pos(node) {
                                trace!("insert fixup: inner child, right side");
                                self.rotate_right(parent);
                                mem::swap(&mut parent, &mut node);
                            }

                            trace!("insert fixup: outer child, right side");
                            self.set_color(parent, Color::Black);
                            self.set_color(grand_parent, Color::Red);
                            self.rotate_left(grand_parent);
                        }
                    }
                }
            }
        }

        if let Some(root) = self.root {
            self.set_color(root, Color::Black);
        }
    }

    fn remove_node(&mut self, node: NodeId) -> (K, V) {
        //       ┌────────── 34 ─────────┐
        //       │                       │
        // ┌──── 2 ────┐                 58 ────┐
        // │           │                        │
        // 1      ┌─── 9 ────┐              ┌── 77 ──┐
        //        │          │              │        │
        //     ┌─ 6       ┌─ 20 ─┐      ┌─ 71 ─┐     82
        //     │          │      │      │      │
        //     5         12 ─┐   24    67      75
        //                   │
        //                   13

        let mut removed_color = self.color(node);
        // `replacement` takes the structural place of the removed color, it may
        // be absent, so its parent is tracked next to it
        let replacement: Link;
        let replacement_parent: Link;
        match (self.left(node), self.right(node)) {
            (None, child) | (child, None) => {
                // No children or only one: splice `node` out by putting the
                // child (or nothing) in its place. E.g. remove 1, 6, 12, 58.
                replacement = child;
                replacement_parent = self.parent(node);
                self.replace_subtree(node, child);
            }
            (Some(left), Some(right)) => {
                // Replace `node` with its successor, the minimum of the right
                // subtree. The successor has no left child.
                let successor = self.arena.min_of(right);
                removed_color = self.color(successor);
                replacement = self.right(successor);

                if successor == right {
                    // E.g. remove 20, 75, 77.
                    replacement_parent = Some(successor);
                } else {
                    // E.g. remove 9, successor 12 is first lifted out of its
                    // own position by its right child.
                    replacement_parent = self.parent(successor);
                    self.replace_subtree(successor, replacement);
                    self.set_right(successor, Some(right));
                    self.set_parent(right, Some(successor));
                }

                self.replace_subtree(node, Some(successor));
                self.set_left(successor, Some(left));
                self.set_parent(left, Some(successor));
                self.set_color(successor, self.color(node));
            }
        }

        if removed_color.is_black() {
            self.remove_fixup(replacement, replacement_parent);
        }

        self.len -= 1;
        let node = self.arena.free(node);
        if self.len == 0 {
            debug_assert_eq!(self.root, None);
            self.arena.reset();
        }
        (node.key, node.value)
    }

    fn remove_fixup(&mut self, mut x: Link, mut x_parent: Link) {
        // `x` sits where a black node was removed, so every path through it is
        // one black short. A red `x` absorbs the deficit by turning black after
        // the loop, and so does the root.
        while x != self.root && self.color_of(x).is_black() {
            let Some(parent) = x_parent else {
                break;
            };
            // `x` is absent only when `parent` has a single child, so an
            // absent `x` equal to an absent left slot is the left side.
            if x == self.left(parent) {
                // A black-short x needs a sibling to keep black heights equal.
                let Some(mut sibling) = self.right(parent) else {
                    unreachable!("deficient node without a sibling");
                };

                if self.color(sibling).is_red() {
                    //     ┌─── p:b ───┐                    ┌─── s:b ───┐
                    //     │           │                    │           │
                    // ┌─ x:b ─┐   ┌─ s:r ─┐   ──►      ┌─ p:r ─┐      d:b
                    // │       │   │       │            │       │
                    // a       b  c:b     d:b       ┌─ x:b ─┐  c:b
                    //                              │       │
                    //                              a       b
                    // x gains a red parent and one of the black sibling
                    // cases below finishes the job.
                    trace!("remove fixup: red sibling, left side");
                    self.set_color(sibling, Color::Black);
                    self.set_color(parent, Color::Red);
                    self.rotate_left(parent);
                    let Some(s) = self.right(parent) else {
                        unreachable!("rotation left parent without a sibling");
                    };
                    sibling = s;
                }

                if self.color_of(self.left(sibling)).is_black()
                    && self.color_of(self.right(sibling)).is_black()
                {
                    //     ┌─── p:c ───┐                ┌─── p:c ───┐
                    //     │           │                │           │
                    // ┌─ x:b ─┐   ┌─ s:b ─┐   ──►  ┌─ x:b ─┐   ┌─ s:r ─┐
                    // │       │   │       │        │       │   │       │
                    // a       b  c:b     d:b       a       b  c:b     d:b
                    // Move the extra black up to the parent.
                    trace!("remove fixup: black nephews, left side");
                    self.set_color(sibling, Color::Red);
                    x = Some(parent);
                    x_parent = self.parent(parent);
                } else {
                    if self.color_of(self.right(sibling)).is_black() {
                        // near nephew is red, rotate it into the sibling position
                        trace!("remove fixup: red near nephew, left side");
                        if let Some(near) = self.left(sibling) {
                            self.set_color(near, Color::Black);
                        }
                        self.set_color(sibling, Color::Red);
                        self.rotate_right(sibling);
                        let Some(s) = self.right(parent) else {
                            unreachable!("rotation left parent without a sibling");
                        };
                        sibling = s;
                    }

                    //     ┌─── p:c ───┐                     ┌── s:c ──┐
                    //     │           │                     │         │
                    // ┌─ x:b ─┐   ┌─ s:b ─┐   ──►       ┌─ p:b ─┐    d:b
                    // │       │   │       │             │       │
                    // a       b  c:?     d:r       ┌─ x:b ─┐  c:?
                    //                              │       │
                    //                              a       b
                    // x gains a black ancestor, the deficit is gone.
                    trace!("remove fixup: red far nephew, left side");
                    self.set_color(sibling, self.color(parent));
                    self.set_color(parent, Color::Black);
                    if let Some(far) = self.right(sibling) {
                        self.set_color(far, Color::Black);
                    }
                    self.rotate_left(parent);
                    x = self.root;
                    break;
                }
            } else {
                // same as above but left/right are switched
                let Some(mut sibling) = self.left(parent) else {
                    unreachable!("deficient node without a sibling");
                };

                if self.color(sibling).is_red() {
                    trace!("remove fixup: red sibling, right side");
                    self.set_color(sibling, Color::Black);
                    self.set_color(parent, Color::Red);
                    self.rotate_right(parent);
                    let Some(s) = self.left(parent) else {
                        unreachable!("rotation left parent without a sibling");
                    };
                    sibling = s;
                }

                if self.color_of(self.left(sibling)).is_black()
                    && self.color_of(self.right(sibling)).is_black()
                {
                    trace!("remove fixup: black nephews, right side");
                    self.set_color(sibling, Color::Red);
                    x = Some(parent);
                    x_parent = self.parent(parent);
                } else {
                    if self.color_of(self.left(sibling)).is_black() {
                        trace!("remove fixup: red near nephew, right side");
                        if let Some(near) = self.right(sibling) {
                            self.set_color(near, Color::Black);
                        }
                        self.set_color(sibling, Color::Red);
                        self.rotate_left(sibling);
                        let Some(s) = self.left(parent) else {
                            unreachable!("rotation left parent without a sibling");
                        };
                        sibling = s;
                    }

                    trace!("remove fixup: red far nephew, right side");
                    self.set_color(sibling, self.color(parent));
                    self.set_color(parent, Color::Black);
                    if let Some(far) = self.left(sibling) {
                        self.set_color(far, Color::Black);
                    }
                    self.rotate_right(parent);
                    x = self.root;
                    break;
                }
            }
        }

        if let Some(x) = x {
            self.set_color(x, Color::Black);
        }
    }

    /// Replaces subtree `old` with subtree `new`
    fn replace_subtree(&mut self, old: NodeId, new: Link) {
        // a) make the parent of `old` (or the root) point to `new`
        // b) make `new` point to the parent of `old`
        let pos = self.pos(old);
        self.link(pos, new);
        if let Some(new) = new {
            self.set_parent(new, pos.parent());
        }
    }
}

/// Read-only handle to a node of an [`OrderedMap`].
///
/// Borrows the map, so the tree cannot change while a handle is alive.
pub struct NodeRef<'a, K, V> {
    arena: &'a Arena<K, V>,
    id: NodeId,
}

impl<K, V> Clone for NodeRef<'_, K, V> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<K, V> Copy for NodeRef<'_, K, V> {}

impl<K, V> PartialEq for NodeRef<'_, K, V> {
    fn eq(&self, other: &Self) -> bool {
        std::ptr::eq(self.arena, other.arena) && self.id == other.id
    }
}

impl<K, V> Eq for NodeRef<'_, K, V> {}

impl<K, V> fmt::Debug for NodeRef<'_, K, V>
where
    K: fmt::Debug,
    V: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NodeRef")
            .field("key", self.key())
            .field("value", self.value())
            .field("color", &self.color())
            .finish()
    }
}

impl<'a, K, V> NodeRef<'a, K, V> {
    #[inline]
    fn node(&self) -> &'a Node<K, V> {
        let arena: &'a Arena<K, V> = self.arena;
        &arena[self.id]
    }

    #[inline]
    fn with_id(&self, id: NodeId) -> Self {
        Self {
            arena: self.arena,
            id,
        }
    }

    pub fn key(&self) -> &'a K {
        &self.node().key
    }

    pub fn value(&self) -> &'a V {
        &self.node().value
    }

    pub fn color(&self) -> Color {
        self.node().color
    }

    pub fn left(&self) -> Option<Self> {
        self.node().left.map(|id| self.with_id(id))
    }

    pub fn right(&self) -> Option<Self> {
        self.node().right.map(|id| self.with_id(id))
    }

    pub fn parent(&self) -> Option<Self> {
        self.node().parent.map(|id| self.with_id(id))
    }

    /// Node with the smallest key in the subtree rooted here.
    pub fn minimum(&self) -> Self {
        self.with_id(self.arena.min_of(self.id))
    }

    /// Node with the largest key in the subtree rooted here.
    pub fn maximum(&self) -> Self {
        self.with_id(self.arena.max_of(self.id))
    }
}
