//! LIFO stack of tagged values backed by a [`List`].

use crate::list::List;
use crate::traversal::{print_repr, ReprStyle};
use crate::value::TaggedValue;
use std::io;

/// Last in, first out. Rendered bottom to top as `$[1|2|3]>`.
#[derive(Debug, Clone, Default)]
pub struct Stack {
    list: List,
}

impl Stack {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, value: TaggedValue) {
        self.list.push_back(value);
    }

    /// Remove the top value and hand it back; `None` when empty.
    pub fn pop(&mut self) -> Option<TaggedValue> {
        self.list.pop_back()
    }

    pub fn peek(&self) -> Option<&TaggedValue> {
        self.list.back()
    }

    pub fn len(&self) -> usize {
        self.list.len()
    }

    pub fn is_empty(&self) -> bool {
        self.list.is_empty()
    }

    pub fn repr(&self) -> String {
        self.list.repr_with(&ReprStyle::stack())
    }

    pub fn display(&self) -> io::Result<()> {
        print_repr(&self.repr())
    }
}

impl FromIterator<TaggedValue> for Stack {
    fn from_iter<I: IntoIterator<Item = TaggedValue>>(iter: I) -> Self {
        Self {
            list: iter.into_iter().collect(),
        }
    }
}
