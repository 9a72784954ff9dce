//! Ordered tree of tagged values with a side-chain of per-kind trees.
//!
//! An [`OrderedTree`] is a binary search tree keyed by [`TaggedValue::compare`].
//! The first value inserted into an empty tree fixes its *established kind*;
//! a value of any other kind (or one that compares `Different`) is handed to
//! the tree's side-chain, a lazily created [`OrderedTree`] reachable through
//! [`OrderedTree::next`]. Every tree of the chain therefore holds one kind only.
//!
//! Duplicates follow the tree's [`DuplicatePolicy`]: an equal value either
//! descends left, descends right, or is dropped.
//!
//! # Key design decisions
//!
//! - **Arena storage**: nodes live in a `Vec` owned by the tree and link to
//!   each other by index, so the parent link never owns its parent.
//! - **No auto-balancing**: insertion keeps plain BST order. [`OrderedTree::balance`]
//!   restores the AVL height invariant on demand.
//! - **Chain compaction**: a tree emptied by removal is replaced by its
//!   side-chain, so no empty tree sits in front of a populated one.
//!
//! # Example
//! ```
//! use threes_core::{DuplicatePolicy, OrderedTree, TaggedValue, TraversalOrder};
//!
//! let mut tree = OrderedTree::new(DuplicatePolicy::AppendRight);
//! assert_eq!(tree.add(TaggedValue::integer(5)), Some(0));
//! assert_eq!(tree.add(TaggedValue::integer(3)), Some(1));
//! assert_eq!(tree.add(TaggedValue::integer(5)), Some(1));
//! assert_eq!(tree.repr(TraversalOrder::InOrder), "[3, 5, 5]");
//!
//! // A string cannot live next to integers: it goes to the side-chain.
//! tree.add(TaggedValue::string("five"));
//! assert_eq!(tree.next().map(|t| t.repr(TraversalOrder::InOrder)), Some("['five']".to_string()));
//! ```

use crate::error::ThreesError;
use crate::traversal::{print_repr, ReprStyle, TraversalOrder};
use crate::value::{Comparison, Kind, TaggedValue};
use log::{debug, trace, warn};
use serde::{Deserialize, Serialize};
use std::io;
use std::str::FromStr;

/// Sentinel form of "not added / not found" for callers that want an integer
/// instead of an `Option`.
pub const NOT_ADDED: i64 = -1;

/// Convert a depth returned by [`OrderedTree::add`] or [`OrderedTree::search`]
/// into its integer form, mapping `None` to [`NOT_ADDED`].
pub fn depth_or_sentinel(depth: Option<usize>) -> i64 {
    depth
        .and_then(|d| i64::try_from(d).ok())
        .unwrap_or(NOT_ADDED)
}

/// What [`OrderedTree::add`] does with a value equal to one already stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DuplicatePolicy {
    /// Descend left as if the value were smaller.
    AppendLeft,
    /// Descend right as if the value were greater.
    AppendRight,
    /// Drop the value; `add` returns `None`.
    #[default]
    Ignore,
}

impl FromStr for DuplicatePolicy {
    type Err = ThreesError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "append-left" | "left" => Ok(DuplicatePolicy::AppendLeft),
            "append-right" | "right" => Ok(DuplicatePolicy::AppendRight),
            "ignore" => Ok(DuplicatePolicy::Ignore),
            _ => Err(ThreesError::UnknownPolicy(s.to_string())),
        }
    }
}

/// Where a node hangs relative to its parent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Position {
    Left,
    Right,
    Root,
}

/// Read-only view of a stored node, as returned by [`OrderedTree::nodes`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NodeView<'a> {
    pub value: &'a TaggedValue,
    pub depth: usize,
    pub position: Position,
}

type NodeId = usize;

#[derive(Debug, Clone)]
struct Node {
    value: TaggedValue,
    parent: Option<NodeId>,
    left: Option<NodeId>,
    right: Option<NodeId>,
    position: Position,
    depth: usize,
}

impl Node {
    fn new(value: TaggedValue, parent: Option<NodeId>, position: Position, depth: usize) -> Self {
        Self {
            value,
            parent,
            left: None,
            right: None,
            position,
            depth,
        }
    }
}

/// Outcome of walking the descent path for a value.
enum Located {
    Found(NodeId),
    Missing,
    Different,
}

/// Outcome of offering a value to a single tree of the chain.
enum Insert {
    Done(Option<usize>),
    PassOn(TaggedValue),
}

/// Placement order inside a tree: [`TaggedValue::compare`], except that two
/// NaNs of one kind count as equal so they gather in a single tree instead of
/// each opening a new one.
fn place(value: &TaggedValue, stored: &TaggedValue) -> Comparison {
    match value.compare(stored) {
        Comparison::Different
            if value.is_nan() && stored.is_nan() && value.kind() == stored.kind() =>
        {
            Comparison::Equal
        }
        other => other,
    }
}

/// Binary search tree of [`TaggedValue`]s with a per-kind side-chain.
///
/// Every operation walks the side-chain with a loop, and dropping or cloning
/// a tree unlinks the chain one tree at a time, so chain length never turns
/// into stack depth.
#[derive(Debug)]
pub struct OrderedTree {
    slots: Vec<Option<Node>>,
    free: Vec<NodeId>,
    root: Option<NodeId>,
    len: usize,
    policy: DuplicatePolicy,
    established_kind: Option<Kind>,
    next: Option<Box<OrderedTree>>,
}

impl Default for OrderedTree {
    fn default() -> Self {
        Self::new(DuplicatePolicy::default())
    }
}

impl Clone for OrderedTree {
    fn clone(&self) -> Self {
        let mut rest: Vec<OrderedTree> = self.chain().skip(1).map(Self::clone_alone).collect();
        let mut next = None;
        while let Some(mut tree) = rest.pop() {
            tree.next = next;
            next = Some(Box::new(tree));
        }
        let mut head = self.clone_alone();
        head.next = next;
        head
    }
}

impl Drop for OrderedTree {
    fn drop(&mut self) {
        let mut link = self.next.take();
        while let Some(mut tree) = link {
            link = tree.next.take();
        }
    }
}

impl OrderedTree {
    pub fn new(policy: DuplicatePolicy) -> Self {
        Self {
            slots: Vec::new(),
            free: Vec::new(),
            root: None,
            len: 0,
            policy,
            established_kind: None,
            next: None,
        }
    }

    pub fn policy(&self) -> DuplicatePolicy {
        self.policy
    }

    /// Kind of the values stored directly in this tree; `None` before the
    /// first insertion.
    pub fn established_kind(&self) -> Option<Kind> {
        self.established_kind
    }

    /// Number of values stored directly in this tree (side-chain excluded).
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    /// Number of values stored in this tree and its whole side-chain.
    pub fn total_len(&self) -> usize {
        self.chain().map(OrderedTree::len).sum()
    }

    /// The side-chain tree holding values of another kind, if one was created.
    pub fn next(&self) -> Option<&OrderedTree> {
        self.next.as_deref()
    }

    /// This tree followed by every tree of its side-chain.
    pub fn chain(&self) -> impl Iterator<Item = &OrderedTree> {
        std::iter::successors(Some(self), |tree| tree.next())
    }

    /// Insert `value`, returning the depth it was placed at.
    ///
    /// Returns `None` (see [`NOT_ADDED`]) when the [`DuplicatePolicy::Ignore`]
    /// policy drops an equal value or node storage cannot be reserved. Values
    /// of another kind are placed in the side-chain and the returned depth is
    /// the depth inside that side-chain tree.
    ///
    /// NaNs never order against numbers, so they live in a side-chain tree of
    /// their own where they count as duplicates of each other.
    pub fn add(&mut self, mut value: TaggedValue) -> Option<usize> {
        let mut tree = self;
        loop {
            match tree.insert_here(value) {
                Insert::Done(depth) => return depth,
                Insert::PassOn(rejected) => {
                    value = rejected;
                    tree = tree.side_chain();
                }
            }
        }
    }

    /// Depth of the first node equal to `value` along its descent path,
    /// following the side-chain for values this tree cannot hold.
    pub fn search(&self, value: &TaggedValue) -> Option<usize> {
        for tree in self.chain() {
            if tree.established_kind != Some(value.kind()) {
                continue;
            }
            match tree.locate(value) {
                Located::Found(id) => return Some(tree.node(id).depth),
                Located::Missing => return None,
                Located::Different => {}
            }
        }
        None
    }

    pub fn contains(&self, value: &TaggedValue) -> bool {
        self.search(value).is_some()
    }

    /// Remove every occurrence of `value`, duplicates included, and return how
    /// many were removed.
    pub fn remove(&mut self, value: &TaggedValue) -> usize {
        let mut removed = 0;
        let mut link = Some(&mut *self);
        while let Some(tree) = link {
            let (count, onward) = tree.remove_here(value);
            removed += count;
            if !onward {
                break;
            }
            link = tree.next.as_deref_mut();
        }

        if removed > 0 {
            debug!("removed {removed} occurrence(s) of {value}");
            self.compact_chain();
        }
        removed
    }

    /// Remove the first occurrence of `value` on its descent path and hand the
    /// stored value back to the caller.
    pub fn take(&mut self, value: &TaggedValue) -> Option<TaggedValue> {
        let mut taken = None;
        let mut link = Some(&mut *self);
        while let Some(tree) = link {
            if tree.established_kind == Some(value.kind()) {
                match tree.locate(value) {
                    Located::Found(id) => {
                        taken = Some(tree.delete(id));
                        break;
                    }
                    Located::Missing => break,
                    Located::Different => {}
                }
            }
            link = tree.next.as_deref_mut();
        }
        if taken.is_some() {
            self.compact_chain();
        }
        taken
    }

    /// Rebalance this tree and every tree of its side-chain so that, for every
    /// node, the heights of the two subtrees differ by at most one.
    ///
    /// The in-order sequence, duplicates included, is preserved.
    pub fn balance(&mut self) {
        let mut link = Some(self);
        while let Some(tree) = link {
            tree.balance_alone();
            link = tree.next.as_deref_mut();
        }
    }

    fn balance_alone(&mut self) {
        let order = self.ids(TraversalOrder::InOrder);
        let mut heights = vec![0usize; self.slots.len()];

        self.root = None;
        for &id in &order {
            let node = self.node_mut(id);
            node.parent = None;
            node.left = None;
            node.right = None;
        }
        for id in order {
            self.append_balanced(id, &mut heights);
        }
        if let Some(root) = self.root {
            let node = self.node_mut(root);
            node.parent = None;
            node.position = Position::Root;
            self.refresh_from(root, 0);
        }
        debug!(
            "balanced {} tree of {} node(s) to height {}",
            self.established_kind.map_or("empty", Kind::name),
            self.len,
            self.height()
        );
    }

    /// True when every node's subtrees differ in height by at most one.
    pub fn is_balanced(&self) -> bool {
        let mut heights = vec![0usize; self.slots.len()];
        for id in self.ids(TraversalOrder::PostOrder) {
            let node = self.node(id);
            let left = node.left.map_or(0, |c| heights[c]);
            let right = node.right.map_or(0, |c| heights[c]);
            if left.abs_diff(right) > 1 {
                return false;
            }
            heights[id] = 1 + left.max(right);
        }
        true
    }

    /// Number of levels in this tree: 0 when empty, 1 for a lone root.
    pub fn height(&self) -> usize {
        self.ids(TraversalOrder::PreOrder)
            .into_iter()
            .map(|id| self.node(id).depth + 1)
            .max()
            .unwrap_or(0)
    }

    /// Values of this tree (side-chain excluded) in the given order.
    pub fn values(&self, order: TraversalOrder) -> Vec<&TaggedValue> {
        self.ids(order)
            .into_iter()
            .map(|id| &self.node(id).value)
            .collect()
    }

    /// Values together with their depth and position, in the given order.
    pub fn nodes(&self, order: TraversalOrder) -> Vec<NodeView<'_>> {
        self.ids(order)
            .into_iter()
            .map(|id| {
                let node = self.node(id);
                NodeView {
                    value: &node.value,
                    depth: node.depth,
                    position: node.position,
                }
            })
            .collect()
    }

    /// `[a, b, c]` rendering of this tree's own values.
    pub fn repr(&self, order: TraversalOrder) -> String {
        self.repr_with(order, &ReprStyle::list())
    }

    pub fn repr_with(&self, order: TraversalOrder, style: &ReprStyle) -> String {
        style.render(self.values(order))
    }

    /// Print [`repr`](Self::repr) to stdout without a trailing newline.
    pub fn display(&self, order: TraversalOrder) -> io::Result<()> {
        print_repr(&self.repr(order))
    }

    // ------------------------------------------------------------------
    // Single-tree steps of the chain walks
    // ------------------------------------------------------------------

    /// Copy of this tree without its side-chain.
    fn clone_alone(&self) -> Self {
        Self {
            slots: self.slots.clone(),
            free: self.free.clone(),
            root: self.root,
            len: self.len,
            policy: self.policy,
            established_kind: self.established_kind,
            next: None,
        }
    }

    /// Place `value` in this tree, or hand it back when it belongs further
    /// down the chain.
    fn insert_here(&mut self, value: TaggedValue) -> Insert {
        let Some(mut current) = self.root else {
            let kind = value.kind();
            let Some(id) = self.alloc(Node::new(value, None, Position::Root, 0)) else {
                return Insert::Done(None);
            };
            self.root = Some(id);
            self.len += 1;
            self.established_kind = Some(kind);
            trace!("established {kind} tree");
            return Insert::Done(Some(0));
        };

        if self.established_kind != Some(value.kind()) {
            return Insert::PassOn(value);
        }

        loop {
            let side = match place(&value, &self.node(current).value) {
                Comparison::Less => Position::Left,
                Comparison::Greater => Position::Right,
                Comparison::Equal => match self.policy {
                    DuplicatePolicy::AppendLeft => Position::Left,
                    DuplicatePolicy::AppendRight => Position::Right,
                    DuplicatePolicy::Ignore => {
                        trace!("ignoring duplicate {value}");
                        return Insert::Done(None);
                    }
                },
                Comparison::Different => return Insert::PassOn(value),
            };

            match self.child(current, side) {
                Some(child) => current = child,
                None => return Insert::Done(self.attach(current, side, value)),
            }
        }
    }

    /// Delete every occurrence of `value` held by this tree alone. Returns the
    /// count and whether the value may still live further down the chain.
    fn remove_here(&mut self, value: &TaggedValue) -> (usize, bool) {
        if self.established_kind != Some(value.kind()) {
            return (0, true);
        }
        let mut removed = 0;
        loop {
            match self.locate(value) {
                Located::Found(id) => {
                    self.delete(id);
                    removed += 1;
                }
                Located::Missing => return (removed, false),
                Located::Different => return (removed, true),
            }
        }
    }

    // ------------------------------------------------------------------
    // Arena plumbing
    // ------------------------------------------------------------------

    fn node(&self, id: NodeId) -> &Node {
        match &self.slots[id] {
            Some(node) => node,
            None => unreachable!("tree node {id} is linked but was freed"),
        }
    }

    fn node_mut(&mut self, id: NodeId) -> &mut Node {
        match &mut self.slots[id] {
            Some(node) => node,
            None => unreachable!("tree node {id} is linked but was freed"),
        }
    }

    fn alloc(&mut self, node: Node) -> Option<NodeId> {
        if let Some(id) = self.free.pop() {
            self.slots[id] = Some(node);
            return Some(id);
        }
        if let Err(err) = self.slots.try_reserve(1) {
            warn!("could not reserve a tree node: {err}");
            return None;
        }
        self.slots.push(Some(node));
        Some(self.slots.len() - 1)
    }

    fn release(&mut self, id: NodeId) -> Node {
        match self.slots[id].take() {
            Some(node) => {
                self.free.push(id);
                node
            }
            None => unreachable!("tree node {id} released twice"),
        }
    }

    fn child(&self, id: NodeId, side: Position) -> Option<NodeId> {
        let node = self.node(id);
        match side {
            Position::Left => node.left,
            Position::Right => node.right,
            Position::Root => None,
        }
    }

    /// Point whichever slot referenced `old` (a child link of `parent`, or
    /// the root) at `new`.
    fn replace_child(&mut self, parent: Option<NodeId>, old: NodeId, new: Option<NodeId>) {
        match parent {
            None => self.root = new,
            Some(p) => {
                let node = self.node_mut(p);
                if node.left == Some(old) {
                    node.left = new;
                } else {
                    node.right = new;
                }
            }
        }
    }

    fn side_chain(&mut self) -> &mut OrderedTree {
        let policy = self.policy;
        let kind = self.established_kind;
        self.next.get_or_insert_with(|| {
            debug!(
                "creating side-chain tree after {}",
                kind.map_or("empty", Kind::name)
            );
            Box::new(OrderedTree::new(policy))
        })
    }

    fn attach(&mut self, parent: NodeId, side: Position, value: TaggedValue) -> Option<usize> {
        let depth = self.node(parent).depth + 1;
        let id = self.alloc(Node::new(value, Some(parent), side, depth))?;
        let node = self.node_mut(parent);
        match side {
            Position::Left => node.left = Some(id),
            Position::Right => node.right = Some(id),
            Position::Root => unreachable!("attach is only called for child positions"),
        }
        self.len += 1;
        Some(depth)
    }

    fn locate(&self, value: &TaggedValue) -> Located {
        let mut current = self.root;
        while let Some(id) = current {
            let node = self.node(id);
            match place(value, &node.value) {
                Comparison::Less => current = node.left,
                Comparison::Greater => current = node.right,
                Comparison::Equal => return Located::Found(id),
                Comparison::Different => return Located::Different,
            }
        }
        Located::Missing
    }

    /// Delete the node `id` and return the value it held.
    fn delete(&mut self, id: NodeId) -> TaggedValue {
        let node = self.node(id);
        if let (Some(_), Some(right)) = (node.left, node.right) {
            let successor = self.leftmost(right);
            let successor_value = self.unlink(successor);
            return std::mem::replace(&mut self.node_mut(id).value, successor_value);
        }
        self.unlink(id)
    }

    /// Remove a node with at most one child by splicing that child into the
    /// node's slot.
    fn unlink(&mut self, id: NodeId) -> TaggedValue {
        let node = self.release(id);
        debug_assert!(node.left.is_none() || node.right.is_none());
        let child = node.left.or(node.right);

        self.replace_child(node.parent, id, child);
        if let Some(child) = child {
            let moved = self.node_mut(child);
            moved.parent = node.parent;
            moved.position = node.position;
            self.refresh_from(child, node.depth);
        }
        self.len -= 1;
        node.value
    }

    fn leftmost(&self, mut id: NodeId) -> NodeId {
        while let Some(left) = self.node(id).left {
            id = left;
        }
        id
    }

    /// Reassign depth to the subtree rooted at `start`, and parent/position
    /// to every node below it.
    fn refresh_from(&mut self, start: NodeId, depth: usize) {
        let mut stack = vec![(start, depth)];
        while let Some((id, depth)) = stack.pop() {
            let node = self.node_mut(id);
            node.depth = depth;
            let (left, right) = (node.left, node.right);
            for (child, position) in [(left, Position::Left), (right, Position::Right)] {
                if let Some(child) = child {
                    let below = self.node_mut(child);
                    below.parent = Some(id);
                    below.position = position;
                    stack.push((child, depth + 1));
                }
            }
        }
    }

    /// Unlink every empty tree of the side-chain; an empty head takes over
    /// the first populated tree behind it.
    fn compact_chain(&mut self) {
        let mut kept = Vec::new();
        let mut link = self.next.take();
        while let Some(mut tree) = link {
            link = tree.next.take();
            if !tree.is_empty() {
                kept.push(tree);
            }
        }
        if self.is_empty() && !kept.is_empty() {
            *self = *kept.remove(0);
        }
        while let Some(mut tree) = kept.pop() {
            tree.next = self.next.take();
            self.next = Some(tree);
        }
    }

    fn ids(&self, order: TraversalOrder) -> Vec<NodeId> {
        let mut out = Vec::with_capacity(self.len);
        let Some(root) = self.root else {
            return out;
        };

        match order {
            TraversalOrder::InOrder => {
                let mut stack = Vec::new();
                let mut current = Some(root);
                while current.is_some() || !stack.is_empty() {
                    while let Some(id) = current {
                        stack.push(id);
                        current = self.node(id).left;
                    }
                    if let Some(id) = stack.pop() {
                        out.push(id);
                        current = self.node(id).right;
                    }
                }
            }
            TraversalOrder::PreOrder => {
                let mut stack = vec![root];
                while let Some(id) = stack.pop() {
                    out.push(id);
                    let node = self.node(id);
                    stack.extend(node.right);
                    stack.extend(node.left);
                }
            }
            TraversalOrder::PostOrder => {
                // Node-right-left pre-order, reversed.
                let mut stack = vec![root];
                while let Some(id) = stack.pop() {
                    out.push(id);
                    let node = self.node(id);
                    stack.extend(node.left);
                    stack.extend(node.right);
                }
                out.reverse();
            }
        }
        out
    }

    // ------------------------------------------------------------------
    // AVL rebuild
    // ------------------------------------------------------------------

    /// Hang `id` as the right-most node and retrace towards the root,
    /// rotating wherever a subtree leans by more than one level.
    fn append_balanced(&mut self, id: NodeId, heights: &mut [usize]) {
        heights[id] = 1;
        let Some(root) = self.root else {
            self.root = Some(id);
            return;
        };

        let mut tail = root;
        while let Some(right) = self.node(tail).right {
            tail = right;
        }
        self.node_mut(tail).right = Some(id);
        self.node_mut(id).parent = Some(tail);

        let mut cursor = Some(tail);
        while let Some(x) = cursor {
            let top = self.rebalance(x, heights);
            cursor = self.node(top).parent;
        }
    }

    fn subtree_height(id: Option<NodeId>, heights: &[usize]) -> usize {
        id.map_or(0, |i| heights[i])
    }

    fn update_height(&self, id: NodeId, heights: &mut [usize]) {
        let node = self.node(id);
        heights[id] = 1 + Self::subtree_height(node.left, heights)
            .max(Self::subtree_height(node.right, heights));
    }

    fn balance_factor(&self, id: NodeId, heights: &[usize]) -> isize {
        let node = self.node(id);
        Self::subtree_height(node.left, heights) as isize
            - Self::subtree_height(node.right, heights) as isize
    }

    /// Restore the AVL condition at `x` with a single or double rotation and
    /// return the node now at the top of that subtree.
    fn rebalance(&mut self, x: NodeId, heights: &mut [usize]) -> NodeId {
        self.update_height(x, heights);
        let factor = self.balance_factor(x, heights);

        if factor > 1 {
            if let Some(left) = self.node(x).left {
                if self.balance_factor(left, heights) < 0 {
                    self.rotate_left(left, heights);
                }
            }
            return self.rotate_right(x, heights);
        }
        if factor < -1 {
            if let Some(right) = self.node(x).right {
                if self.balance_factor(right, heights) > 0 {
                    self.rotate_right(right, heights);
                }
            }
            return self.rotate_left(x, heights);
        }
        x
    }

    fn rotate_left(&mut self, x: NodeId, heights: &mut [usize]) -> NodeId {
        let Some(y) = self.node(x).right else {
            return x;
        };
        let parent = self.node(x).parent;
        let inner = self.node(y).left;

        self.node_mut(x).right = inner;
        if let Some(inner) = inner {
            self.node_mut(inner).parent = Some(x);
        }
        self.node_mut(y).left = Some(x);
        self.node_mut(x).parent = Some(y);
        self.node_mut(y).parent = parent;
        self.replace_child(parent, x, Some(y));

        self.update_height(x, heights);
        self.update_height(y, heights);
        y
    }

    fn rotate_right(&mut self, x: NodeId, heights: &mut [usize]) -> NodeId {
        let Some(y) = self.node(x).left else {
            return x;
        };
        let parent = self.node(x).parent;
        let inner = self.node(y).right;

        self.node_mut(x).left = inner;
        if let Some(inner) = inner {
            self.node_mut(inner).parent = Some(x);
        }
        self.node_mut(y).right = Some(x);
        self.node_mut(x).parent = Some(y);
        self.node_mut(y).parent = parent;
        self.replace_child(parent, x, Some(y));

        self.update_height(x, heights);
        self.update_height(y, heights);
        y
    }
}
