//! FIFO queue of tagged values backed by a [`List`].

use crate::list::List;
use crate::traversal::{print_repr, ReprStyle};
use crate::value::TaggedValue;
use std::io;

/// First in, first out. Rendered front to back as `<[1 | 2 | 3]`.
#[derive(Debug, Clone, Default)]
pub struct Queue {
    list: List,
}

impl Queue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn enqueue(&mut self, value: TaggedValue) {
        self.list.push_back(value);
    }

    /// Remove the front value and hand it back; `None` when empty.
    pub fn dequeue(&mut self) -> Option<TaggedValue> {
        self.list.pop_front()
    }

    pub fn peek(&self) -> Option<&TaggedValue> {
        self.list.front()
    }

    pub fn len(&self) -> usize {
        self.list.len()
    }

    pub fn is_empty(&self) -> bool {
        self.list.is_empty()
    }

    pub fn repr(&self) -> String {
        self.list.repr_with(&ReprStyle::queue())
    }

    pub fn display(&self) -> io::Result<()> {
        print_repr(&self.repr())
    }
}

impl FromIterator<TaggedValue> for Queue {
    fn from_iter<I: IntoIterator<Item = TaggedValue>>(iter: I) -> Self {
        Self {
            list: iter.into_iter().collect(),
        }
    }
}
