//! Doubly linked list of tagged values.
//!
//! Backing storage for [`Stack`](crate::Stack) and [`Queue`](crate::Queue).
//! Nodes live in an index arena like [`OrderedTree`](crate::OrderedTree)'s, and
//! index lookups walk from whichever end of the list is closer.

use crate::error::{Result, ThreesError};
use crate::traversal::{print_repr, ReprStyle};
use crate::value::{Comparison, TaggedValue};
use log::debug;
use std::io;

type Link = Option<usize>;

#[derive(Debug, Clone)]
struct ListNode {
    value: TaggedValue,
    prev: Link,
    next: Link,
}

#[derive(Debug, Clone, Default)]
pub struct List {
    slots: Vec<Option<ListNode>>,
    free: Vec<usize>,
    head: Link,
    tail: Link,
    len: usize,
}

impl List {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn push_front(&mut self, value: TaggedValue) {
        let id = self.alloc(ListNode {
            value,
            prev: None,
            next: self.head,
        });
        match self.head {
            Some(old) => self.node_mut(old).prev = Some(id),
            None => self.tail = Some(id),
        }
        self.head = Some(id);
        self.len += 1;
    }

    pub fn push_back(&mut self, value: TaggedValue) {
        let id = self.alloc(ListNode {
            value,
            prev: self.tail,
            next: None,
        });
        match self.tail {
            Some(old) => self.node_mut(old).next = Some(id),
            None => self.head = Some(id),
        }
        self.tail = Some(id);
        self.len += 1;
    }

    pub fn front(&self) -> Option<&TaggedValue> {
        self.head.map(|id| &self.node(id).value)
    }

    pub fn back(&self) -> Option<&TaggedValue> {
        self.tail.map(|id| &self.node(id).value)
    }

    pub fn pop_front(&mut self) -> Option<TaggedValue> {
        let id = self.head?;
        Some(self.unlink(id))
    }

    pub fn pop_back(&mut self) -> Option<TaggedValue> {
        let id = self.tail?;
        Some(self.unlink(id))
    }

    /// Value at `index`, or `None` past the end.
    pub fn get(&self, index: usize) -> Option<&TaggedValue> {
        self.locate(index).map(|id| &self.node(id).value)
    }

    /// Index of the first value that compares `Equal` to `value`.
    ///
    /// Matching uses [`TaggedValue::compare`], so `Integer(3)` finds a stored
    /// `Float64(3.0)`.
    pub fn index_of(&self, value: &TaggedValue) -> Option<usize> {
        self.iter()
            .position(|stored| value.compare(stored) == Comparison::Equal)
    }

    /// Remove and return the value at `index`.
    pub fn remove_at(&mut self, index: usize) -> Result<TaggedValue> {
        let id = self.locate(index).ok_or(ThreesError::IndexOutOfBounds {
            index,
            len: self.len,
        })?;
        Ok(self.unlink(id))
    }

    /// Remove every value that compares `Equal` to `value`; returns how many
    /// were removed.
    pub fn remove_all(&mut self, value: &TaggedValue) -> usize {
        let mut removed = 0;
        let mut cursor = self.head;
        while let Some(id) = cursor {
            let node = self.node(id);
            cursor = node.next;
            if value.compare(&node.value) == Comparison::Equal {
                self.unlink(id);
                removed += 1;
            }
        }
        if removed > 0 {
            debug!("removed {removed} occurrence(s) of {value} from list");
        }
        removed
    }

    pub fn iter(&self) -> Iter<'_> {
        Iter {
            list: self,
            cursor: self.head,
            remaining: self.len,
        }
    }

    /// `[a, b, c]`
    pub fn repr(&self) -> String {
        self.repr_with(&ReprStyle::list())
    }

    pub fn repr_with(&self, style: &ReprStyle) -> String {
        style.render(self.iter())
    }

    /// Print [`repr`](Self::repr) to stdout without a trailing newline.
    pub fn display(&self) -> io::Result<()> {
        print_repr(&self.repr())
    }

    fn node(&self, id: usize) -> &ListNode {
        match &self.slots[id] {
            Some(node) => node,
            None => unreachable!("list node {id} is linked but was freed"),
        }
    }

    fn node_mut(&mut self, id: usize) -> &mut ListNode {
        match &mut self.slots[id] {
            Some(node) => node,
            None => unreachable!("list node {id} is linked but was freed"),
        }
    }

    fn alloc(&mut self, node: ListNode) -> usize {
        match self.free.pop() {
            Some(id) => {
                self.slots[id] = Some(node);
                id
            }
            None => {
                self.slots.push(Some(node));
                self.slots.len() - 1
            }
        }
    }

    /// Walk to `index` from the head when it sits in the first half of the
    /// list, from the tail otherwise.
    fn locate(&self, index: usize) -> Link {
        if index >= self.len {
            return None;
        }
        if index * 2 < self.len {
            let mut cursor = self.head;
            for _ in 0..index {
                cursor = cursor.and_then(|id| self.node(id).next);
            }
            cursor
        } else {
            let mut cursor = self.tail;
            for _ in index + 1..self.len {
                cursor = cursor.and_then(|id| self.node(id).prev);
            }
            cursor
        }
    }

    fn unlink(&mut self, id: usize) -> TaggedValue {
        let node = match self.slots[id].take() {
            Some(node) => node,
            None => unreachable!("list node {id} unlinked twice"),
        };
        self.free.push(id);

        match node.prev {
            Some(prev) => self.node_mut(prev).next = node.next,
            None => self.head = node.next,
        }
        match node.next {
            Some(next) => self.node_mut(next).prev = node.prev,
            None => self.tail = node.prev,
        }
        self.len -= 1;
        node.value
    }
}

/// Front-to-back iterator over a [`List`].
pub struct Iter<'a> {
    list: &'a List,
    cursor: Link,
    remaining: usize,
}

impl<'a> Iterator for Iter<'a> {
    type Item = &'a TaggedValue;

    fn next(&mut self) -> Option<Self::Item> {
        let id = self.cursor?;
        let node = self.list.node(id);
        self.cursor = node.next;
        self.remaining -= 1;
        Some(&node.value)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl ExactSizeIterator for Iter<'_> {}

impl<'a> IntoIterator for &'a List {
    type Item = &'a TaggedValue;
    type IntoIter = Iter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl FromIterator<TaggedValue> for List {
    fn from_iter<I: IntoIterator<Item = TaggedValue>>(iter: I) -> Self {
        let mut list = List::new();
        list.extend(iter);
        list
    }
}

impl Extend<TaggedValue> for List {
    fn extend<I: IntoIterator<Item = TaggedValue>>(&mut self, iter: I) {
        for value in iter {
            self.push_back(value);
        }
    }
}
