//! Traversal orders and the bracketed representation shared by all containers.
//!
//! Every container renders itself as `prefix + item + separator + item + suffix`,
//! where each item is the value's own [`repr`](crate::TaggedValue::repr).
//! The presets mirror the classic look of each container:
//!
//! | container | preset               | example          |
//! |-----------|----------------------|------------------|
//! | tree/list | [`ReprStyle::list`]  | `[1, 2, 3]`      |
//! | stack     | [`ReprStyle::stack`] | `$[1\|2\|3]>`    |
//! | queue     | [`ReprStyle::queue`] | `<[1 \| 2 \| 3]` |

use crate::error::ThreesError;
use crate::value::TaggedValue;
use serde::{Deserialize, Serialize};
use std::fmt::Write;
use std::io;
use std::str::FromStr;

/// Order in which tree nodes are visited.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TraversalOrder {
    /// Left subtree, node, right subtree (sorted order).
    #[default]
    InOrder,
    /// Node, left subtree, right subtree.
    PreOrder,
    /// Left subtree, right subtree, node.
    PostOrder,
}

impl FromStr for TraversalOrder {
    type Err = ThreesError;

    /// Accepts `in`, `pre`, `post` and the `-order` spellings.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "in" | "in-order" | "inorder" => Ok(TraversalOrder::InOrder),
            "pre" | "pre-order" | "preorder" => Ok(TraversalOrder::PreOrder),
            "post" | "post-order" | "postorder" => Ok(TraversalOrder::PostOrder),
            _ => Err(ThreesError::UnknownOrder(s.to_string())),
        }
    }
}

/// Framing used when a container renders its values.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReprStyle {
    pub prefix: String,
    pub suffix: String,
    pub separator: String,
}

impl ReprStyle {
    pub fn new(
        prefix: impl Into<String>,
        suffix: impl Into<String>,
        separator: impl Into<String>,
    ) -> Self {
        Self {
            prefix: prefix.into(),
            suffix: suffix.into(),
            separator: separator.into(),
        }
    }

    /// `[a, b, c]`, used by trees and lists.
    pub fn list() -> Self {
        Self::new("[", "]", ", ")
    }

    /// `$[bottom|...|top]>`
    pub fn stack() -> Self {
        Self::new("$[", "]>", "|")
    }

    /// `<[front | ... | back]`
    pub fn queue() -> Self {
        Self::new("<[", "]", " | ")
    }

    /// Join the reprs of `values` inside this style's framing.
    pub fn render<'a, I>(&self, values: I) -> String
    where
        I: IntoIterator<Item = &'a TaggedValue>,
    {
        let mut out = String::new();
        out.push_str(&self.prefix);
        for (i, value) in values.into_iter().enumerate() {
            if i > 0 {
                out.push_str(&self.separator);
            }
            // Writing into a String cannot fail.
            let _ = write!(out, "{}", value);
        }
        out.push_str(&self.suffix);
        out
    }
}

impl Default for ReprStyle {
    fn default() -> Self {
        Self::list()
    }
}

/// Print a rendered representation to stdout, without a trailing newline.
pub(crate) fn print_repr(text: &str) -> io::Result<()> {
    write_repr(&mut io::stdout().lock(), text)
}

/// Write `text` to `out` and flush it, so the output is visible even though
/// no newline follows.
pub(crate) fn write_repr<W: io::Write>(out: &mut W, text: &str) -> io::Result<()> {
    out.write_all(text.as_bytes())?;
    out.flush()
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Closed;

    impl io::Write for Closed {
        fn write(&mut self, _: &[u8]) -> io::Result<usize> {
            Err(io::Error::new(io::ErrorKind::BrokenPipe, "closed"))
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn write_repr_writes_text_without_newline() {
        let mut out = Vec::new();
        write_repr(&mut out, "[1, 2]").unwrap();
        assert_eq!(out, b"[1, 2]");
    }

    #[test]
    fn write_repr_reports_write_failure() {
        let err = write_repr(&mut Closed, "[1]").unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::BrokenPipe);
    }
}
