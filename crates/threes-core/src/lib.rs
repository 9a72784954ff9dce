//! # threes-core
//!
//! Small in-memory data structures built around one primitive: the
//! [`TaggedValue`], a type-erased value of a closed set of primitive kinds with
//! a four-way cross-kind comparison (`Less`, `Equal`, `Greater`, `Different`).
//!
//! On top of it sit an [`OrderedTree`] that keeps values of a foreign kind in a
//! side-chain of per-kind trees, and a doubly linked [`List`] with thin
//! [`Stack`] and [`Queue`] adapters.
//!
//! ## Quick start
//!
//! ```rust
//! use threes_core::{DuplicatePolicy, OrderedTree, TaggedValue, TraversalOrder};
//!
//! let mut tree = OrderedTree::new(DuplicatePolicy::Ignore);
//! for v in [5, 3, 8, 3] {
//!     tree.add(TaggedValue::integer(v));
//! }
//! assert_eq!(tree.repr(TraversalOrder::InOrder), "[3, 5, 8]");
//! assert_eq!(tree.search(&TaggedValue::integer(8)), Some(1));
//! ```
//!
//! ## Modules
//!
//! - [`value`]: `TaggedValue`, `Kind`, `Comparison`
//! - [`tree`]: `OrderedTree` with duplicate policies, side-chain and AVL balancing
//! - [`traversal`]: traversal orders and bracketed representation styles
//! - [`list`]: doubly linked list with nearest-end index lookups
//! - [`stack`] / [`queue`]: LIFO / FIFO adapters over `List`
//! - [`error`]: Error types

pub mod error;
pub mod list;
pub mod queue;
pub mod stack;
pub mod traversal;
pub mod tree;
pub mod value;

pub use error::ThreesError;
pub use list::List;
pub use queue::Queue;
pub use stack::Stack;
pub use traversal::{ReprStyle, TraversalOrder};
pub use tree::{depth_or_sentinel, DuplicatePolicy, NodeView, OrderedTree, Position, NOT_ADDED};
pub use value::{values_from_json, Comparison, Kind, TaggedValue};
