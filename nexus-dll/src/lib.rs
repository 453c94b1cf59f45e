//! Head-inserting doubly-linked list with a fail-fast forward cursor.
//!
//! Nodes live in a storage arena and link to each other by integer keys.
//! The arena owns every node exactly once. The forward link is the chain the
//! list walks and tears down; the back-link is maintained on every insert
//! and head removal, but never followed.
//!
//! ```text
//!  Dll { head, len, storage }
//!          │
//!          ▼
//!  ┌──────────┐ next ┌──────────┐ next ┌──────────┐ next
//!  │ value: 1 │─────▶│ value: 2 │─────▶│ value: 3 │─────▶ NONE
//!  │ prev:NONE│◀─────│ prev     │◀─────│ prev     │
//!  └──────────┘      └──────────┘      └──────────┘
//!      begin()                                          end()
//! ```
//!
//! # Quick Start
//!
//! ```
//! use nexus_dll::SlabDll;
//!
//! let mut list: SlabDll<u64> = SlabDll::new();
//! for value in [6, 5, 4, 3, 2, 1] {
//!     list.insert_at_head(value);
//! }
//!
//! // Pre-increment loop
//! let mut seen = Vec::new();
//! let mut cursor = list.begin();
//! while cursor != list.end() {
//!     seen.push(*cursor.get());
//!     cursor.advance();
//! }
//! assert_eq!(seen, vec![1, 2, 3, 4, 5, 6]);
//!
//! // Or any std iterator adapter
//! assert_eq!(list.iter().sum::<u64>(), 21);
//! ```
//!
//! # Cursor Contract
//!
//! | Operation | Effect | At end |
//! |-----------|--------|--------|
//! | [`Cursor::get`] | value at the current node | panics |
//! | [`Cursor::advance`] | step, return updated cursor | panics |
//! | [`Cursor::advance_postfix`] | step, return previous cursor | panics |
//! | `==` / `!=` | same node | equal to any end cursor |
//!
//! The same contract is the [`Traverse`] trait, which [`walk`] and
//! [`distance`] consume generically.
//!
//! # Storage Options
//!
//! | Alias | Storage | Insert | Use Case |
//! |-------|---------|--------|----------|
//! | [`SlabDll`] | `slab::Slab` | `insert_at_head` | Size unknown |
//! | [`FixedDll`] | [`FixedStorage`] | `try_insert_at_head -> Result` | Bounded memory |
//!
//! Configure either up front with [`DllBuilder`].
//!
//! # Single-threaded
//!
//! Nothing inside the list synchronises. Cursors borrow the list, so it
//! cannot be mutated while a cursor is alive.

#![warn(missing_docs)]

pub mod builder;
pub mod cursor;
pub mod error;
pub mod key;
pub mod list;
pub mod storage;

pub use builder::{DllBuilder, FixedDllBuilder};
pub use cursor::{Cursor, Traverse, Walk, distance, walk};
pub use error::{BuildError, Full};
pub use key::Key;
pub use list::{Dll, FixedDll, IntoIter, Iter, IterMut, Node, SlabDll};
pub use storage::{BoundedStorage, FixedStorage, Storage, UnboundedStorage};
