//! Forward cursors and the traversal protocol built on them.
//!
//! A [`Cursor`] names one node in a list, or the one-past-the-end position.
//! It supports exactly three things: read the value, step forward, and
//! compare positions. Generic code that only needs those three goes through
//! the [`Traverse`] trait, so [`walk`] and [`distance`] work on any cursor
//! type that implements it.
//!
//! # Fail-fast
//!
//! Reading or advancing the end cursor is a bug in the caller. Both panic.
//! Check [`Cursor::is_end`], or compare against [`Dll::end`](crate::Dll::end),
//! before stepping.
//!
//! ```should_panic
//! use nexus_dll::SlabDll;
//!
//! let list: SlabDll<u64> = SlabDll::new();
//! let _ = list.end().get(); // panics: dereferenced the end cursor
//! ```

use core::iter::FusedIterator;

use crate::{Dll, Key, Node, Storage};

/// The cursor capability: dereference, advance, compare.
///
/// Equality is positional. Two cursors are equal when they name the same
/// node, or both denote the end sentinel.
pub trait Traverse: Clone + PartialEq {
    /// What dereferencing yields, typically `&'a T`.
    type Item;

    /// Returns the value at the current position.
    ///
    /// # Panics
    ///
    /// Panics at the end position.
    fn get(&self) -> Self::Item;

    /// Steps forward and returns the updated cursor (pre-increment).
    ///
    /// # Panics
    ///
    /// Panics at the end position.
    fn advance(&mut self) -> &mut Self;

    /// Steps forward and returns the position before the step
    /// (post-increment).
    ///
    /// # Panics
    ///
    /// Panics at the end position.
    fn advance_postfix(&mut self) -> Self {
        let before = self.clone();
        self.advance();
        before
    }
}

/// A position in a [`Dll`].
///
/// Cursors are `Copy` and borrow the list, so the list cannot be mutated
/// while any cursor into it is alive.
///
/// # Example
///
/// ```
/// use nexus_dll::SlabDll;
///
/// let mut list: SlabDll<u64> = SlabDll::new();
/// list.insert_at_head(2);
/// list.insert_at_head(1);
///
/// let mut cursor = list.begin();
/// let before = cursor.advance_postfix();
/// assert_eq!(*before.get(), 1);
/// assert_eq!(*cursor.get(), 2);
///
/// cursor.advance();
/// assert!(cursor == list.end());
/// ```
pub struct Cursor<'a, T, S, K: Key = u32>
where
    S: Storage<Node<T, K>, Key = K>,
{
    list: &'a Dll<T, S, K>,
    current: K,
}

impl<'a, T, S, K: Key> Cursor<'a, T, S, K>
where
    S: Storage<Node<T, K>, Key = K>,
{
    /// `current` must be `NONE` or reachable from the list's head.
    #[inline]
    pub(crate) fn new(list: &'a Dll<T, S, K>, current: K) -> Self {
        Self { list, current }
    }

    /// Returns `true` at the one-past-the-end position.
    #[inline]
    pub fn is_end(&self) -> bool {
        self.current.is_none()
    }

    /// Returns the value at the current position.
    ///
    /// # Panics
    ///
    /// Panics if this is the end cursor.
    #[inline]
    #[track_caller]
    pub fn get(&self) -> &'a T {
        assert!(!self.is_end(), "dereferenced the end cursor");
        // Safety: a non-end cursor key is reachable from head while the list is borrowed
        unsafe { &self.list.node_unchecked(self.current).value }
    }

    /// Steps to the next node, or to the end position after the last node.
    ///
    /// Returns `self` so the step can be chained with a read.
    ///
    /// # Panics
    ///
    /// Panics if this is already the end cursor.
    #[inline]
    #[track_caller]
    pub fn advance(&mut self) -> &mut Self {
        assert!(!self.is_end(), "advanced the end cursor");
        // Safety: a non-end cursor key is reachable from head while the list is borrowed
        self.current = unsafe { self.list.node_unchecked(self.current) }.next;
        self
    }

    /// Steps forward and returns the cursor as it was before the step.
    ///
    /// # Panics
    ///
    /// Panics if this is already the end cursor.
    #[inline]
    #[track_caller]
    pub fn advance_postfix(&mut self) -> Self {
        let before = *self;
        self.advance();
        before
    }
}

impl<T, S, K: Key> Clone for Cursor<'_, T, S, K>
where
    S: Storage<Node<T, K>, Key = K>,
{
    #[inline]
    fn clone(&self) -> Self {
        *self
    }
}

impl<T, S, K: Key> Copy for Cursor<'_, T, S, K> where S: Storage<Node<T, K>, Key = K> {}

impl<T, S, K: Key> PartialEq for Cursor<'_, T, S, K>
where
    S: Storage<Node<T, K>, Key = K>,
{
    #[inline]
    fn eq(&self, other: &Self) -> bool {
        // End is one sentinel shared by every list; node keys only mean
        // something within their own list's storage.
        self.current == other.current
            && (self.current.is_none() || core::ptr::eq(self.list, other.list))
    }
}

impl<T, S, K: Key> Eq for Cursor<'_, T, S, K> where S: Storage<Node<T, K>, Key = K> {}

impl<T, S, K: Key> core::fmt::Debug for Cursor<'_, T, S, K>
where
    S: Storage<Node<T, K>, Key = K>,
{
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        if self.is_end() {
            f.write_str("Cursor(end)")
        } else {
            f.debug_tuple("Cursor").field(&self.current).finish()
        }
    }
}

impl<'a, T, S, K: Key> Traverse for Cursor<'a, T, S, K>
where
    S: Storage<Node<T, K>, Key = K>,
{
    type Item = &'a T;

    #[inline]
    fn get(&self) -> &'a T {
        Cursor::get(self)
    }

    #[inline]
    fn advance(&mut self) -> &mut Self {
        Cursor::advance(self)
    }

    #[inline]
    fn advance_postfix(&mut self) -> Self {
        Cursor::advance_postfix(self)
    }
}

// =============================================================================
// Generic traversal
// =============================================================================

/// Iterator over the half-open range `[begin, end)` of any [`Traverse`].
///
/// Created by [`walk`].
#[derive(Clone, Debug)]
pub struct Walk<C> {
    current: C,
    end: C,
}

/// Walks from `begin` up to, not including, `end`.
///
/// `end` must be reachable from `begin`. If it is not, the walk runs off the
/// end of the list and panics.
///
/// ```
/// use nexus_dll::{SlabDll, walk};
///
/// let list: SlabDll<u64> = [3, 2, 1].into_iter().collect();
/// let mut second = list.begin();
/// second.advance();
///
/// let tail: Vec<_> = walk(second, list.end()).copied().collect();
/// assert_eq!(tail, vec![2, 3]);
/// ```
#[inline]
pub fn walk<C: Traverse>(begin: C, end: C) -> Walk<C> {
    Walk {
        current: begin,
        end,
    }
}

impl<C: Traverse> Iterator for Walk<C> {
    type Item = C::Item;

    #[inline]
    fn next(&mut self) -> Option<C::Item> {
        if self.current == self.end {
            return None;
        }
        Some(self.current.advance_postfix().get())
    }
}

impl<C: Traverse> FusedIterator for Walk<C> {}

/// Counts the advances needed to get from `begin` to `end`.
///
/// # Panics
///
/// Panics if `end` is not reachable from `begin`.
#[inline]
pub fn distance<C: Traverse>(mut begin: C, end: C) -> usize {
    let mut steps = 0;
    while begin != end {
        begin.advance();
        steps += 1;
    }
    steps
}
