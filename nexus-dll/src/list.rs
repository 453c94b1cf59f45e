//! Head-inserting doubly-linked list that owns its node storage.
//!
//! Nodes live in a storage arena and link to each other by [`Key`]. The
//! arena is the single owner of every node: `next` is the chain the list
//! walks and releases, `prev` is bookkeeping only and never followed.
//!
//! # Growable vs Fixed Storage
//!
//! ```
//! use nexus_dll::{FixedDll, FixedStorage, SlabDll};
//!
//! // Growable (slab::Slab) - infallible insertion
//! let mut list: SlabDll<u64> = SlabDll::new();
//! list.insert_at_head(1);
//!
//! // Fixed (FixedStorage) - exhaustion hands the value back
//! let mut list: FixedDll<u64> = FixedDll::with_storage(FixedStorage::with_capacity(1));
//! list.try_insert_at_head(1).unwrap();
//! assert_eq!(list.try_insert_at_head(2).unwrap_err().into_inner(), 2);
//! ```
//!
//! # Example
//!
//! ```
//! use nexus_dll::SlabDll;
//!
//! let mut list: SlabDll<u64> = SlabDll::new();
//! for value in [3, 2, 1] {
//!     list.insert_at_head(value);
//! }
//!
//! let mut cursor = list.begin();
//! let mut seen = Vec::new();
//! while cursor != list.end() {
//!     seen.push(*cursor.get());
//!     cursor.advance();
//! }
//! assert_eq!(seen, vec![1, 2, 3]);
//! ```

use core::iter::FusedIterator;
use core::marker::PhantomData;

use crate::{BoundedStorage, Cursor, FixedStorage, Full, Key, Storage, UnboundedStorage};

/// List over growable `slab::Slab` storage.
pub type SlabDll<T> = Dll<T, slab::Slab<Node<T, usize>>, usize>;

/// List over fixed-capacity [`FixedStorage`].
pub type FixedDll<T, K = u32> = Dll<T, FixedStorage<Node<T, K>, K>, K>;

/// A list node: the value plus its links.
///
/// Nodes are an implementation detail of the list. Storage types are
/// parameterised over them, so the type is public, but its fields are not.
#[derive(Debug)]
pub struct Node<T, K: Key = u32> {
    pub(crate) value: T,
    pub(crate) next: K,
    pub(crate) prev: K,
}

impl<T, K: Key> Node<T, K> {
    /// A node about to become the head in front of `next`.
    #[inline]
    fn head_of(value: T, next: K) -> Self {
        Self {
            value,
            next,
            prev: K::NONE,
        }
    }
}

/// A doubly-linked list that owns its node storage.
///
/// # Type Parameters
///
/// - `T`: element type
/// - `S`: node storage, e.g. `slab::Slab<Node<T, usize>>`
/// - `K`: key type of `S`
///
/// Prefer the [`SlabDll`] and [`FixedDll`] aliases.
pub struct Dll<T, S, K: Key = u32>
where
    S: Storage<Node<T, K>, Key = K>,
{
    storage: S,
    head: K,
    len: usize,
    _marker: PhantomData<T>,
}

impl<T, S, K: Key> Default for Dll<T, S, K>
where
    S: Storage<Node<T, K>, Key = K> + Default,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<T, S, K: Key> Dll<T, S, K>
where
    S: Storage<Node<T, K>, Key = K> + Default,
{
    /// Creates an empty list over default-constructed storage.
    #[inline]
    pub fn new() -> Self {
        Self::with_storage(S::default())
    }
}

// =============================================================================
// Base impl - any storage
// =============================================================================

impl<T, S, K: Key> Dll<T, S, K>
where
    S: Storage<Node<T, K>, Key = K>,
{
    /// Creates an empty list over the given storage.
    ///
    /// # Panics
    ///
    /// Panics if `storage` already holds nodes.
    pub fn with_storage(storage: S) -> Self {
        assert!(storage.is_empty(), "storage must be empty");
        Self {
            storage,
            head: K::NONE,
            len: 0,
            _marker: PhantomData,
        }
    }

    /// Returns the number of nodes in the list.
    #[inline]
    pub const fn len(&self) -> usize {
        self.len
    }

    /// Returns `true` if the list has no nodes.
    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Returns the head value, or `None` if empty.
    #[inline]
    pub fn front(&self) -> Option<&T> {
        self.storage.get(self.head).map(|node| &node.value)
    }

    /// Returns the head value mutably, or `None` if empty.
    #[inline]
    pub fn front_mut(&mut self) -> Option<&mut T> {
        self.storage.get_mut(self.head).map(|node| &mut node.value)
    }

    /// Removes and returns the head value.
    ///
    /// The new head's back-link is reset, so the list stays doubly linked.
    pub fn pop_front(&mut self) -> Option<T> {
        if self.head.is_none() {
            return None;
        }

        let node = self.storage.remove(self.head)?;
        self.head = node.next;
        if self.head.is_some() {
            // Safety: next of a linked node is occupied
            unsafe { self.storage.get_unchecked_mut(self.head) }.prev = K::NONE;
        }
        self.len -= 1;

        Some(node.value)
    }

    /// Releases every node, front to back.
    ///
    /// Each node's successor is read before the node is released, and the
    /// node is dropped before the walk moves on.
    pub fn clear(&mut self) {
        let mut current = self.head;
        let mut released = 0usize;

        while current.is_some() {
            let Some(node) = self.storage.remove(current) else {
                debug_assert!(false, "linked key {current:?} is vacant");
                break;
            };
            current = node.next;
            drop(node);
            released += 1;
        }

        if released > 0 {
            log::trace!("released {released} nodes");
        }

        self.head = K::NONE;
        self.len = 0;
    }

    /// Returns a cursor at the head, or the end cursor if empty.
    #[inline]
    pub fn begin(&self) -> Cursor<'_, T, S, K> {
        Cursor::new(self, self.head)
    }

    /// Returns the one-past-the-end cursor.
    #[inline]
    pub fn end(&self) -> Cursor<'_, T, S, K> {
        Cursor::new(self, K::NONE)
    }

    /// Returns an iterator over the values, head first.
    #[inline]
    pub fn iter(&self) -> Iter<'_, T, S, K> {
        Iter {
            cursor: self.begin(),
            remaining: self.len,
        }
    }

    /// Returns an iterator over mutable references to the values, head first.
    #[inline]
    pub fn iter_mut(&mut self) -> IterMut<'_, T, S, K> {
        IterMut {
            current: self.head,
            remaining: self.len,
            storage: &mut self.storage,
            _marker: PhantomData,
        }
    }

    /// Returns the node behind a cursor key.
    ///
    /// # Safety
    ///
    /// `key` must be reachable from `head`.
    #[inline]
    pub(crate) unsafe fn node_unchecked(&self, key: K) -> &Node<T, K> {
        unsafe { self.storage.get_unchecked(key) }
    }

    /// Finishes a head insertion once storage has accepted the node.
    #[inline]
    fn link_head(&mut self, key: K) {
        if self.head.is_some() {
            // Safety: head is occupied when is_some()
            unsafe { self.storage.get_unchecked_mut(self.head) }.prev = key;
        }
        self.head = key;
        self.len += 1;
    }

    #[cfg(test)]
    pub(crate) fn assert_links(&self) {
        let mut prev = K::NONE;
        let mut current = self.head;
        let mut reachable = 0;

        while current.is_some() {
            let node = self.storage.get(current).expect("linked key is occupied");
            assert_eq!(node.prev, prev, "back-link of {current:?}");
            prev = current;
            current = node.next;
            reachable += 1;
        }

        assert_eq!(reachable, self.len);
        assert_eq!(self.storage.len(), self.len);
    }
}

// =============================================================================
// Growable storage - infallible insertion
// =============================================================================

impl<T, S, K: Key> Dll<T, S, K>
where
    S: UnboundedStorage<Node<T, K>, Key = K>,
{
    /// Inserts `value` in front of the current head.
    #[inline]
    pub fn insert_at_head(&mut self, value: T) {
        let key = self.storage.insert(Node::head_of(value, self.head));
        self.link_head(key);
    }
}

// =============================================================================
// Fixed storage - fallible insertion
// =============================================================================

impl<T, S, K: Key> Dll<T, S, K>
where
    S: BoundedStorage<Node<T, K>, Key = K>,
{
    /// Inserts `value` in front of the current head.
    ///
    /// # Errors
    ///
    /// Returns `Err(Full(value))` if storage has no vacant slot. The list is
    /// unchanged in that case.
    #[inline]
    pub fn try_insert_at_head(&mut self, value: T) -> Result<(), Full<T>> {
        let key = self
            .storage
            .try_insert(Node::head_of(value, self.head))
            .map_err(|Full(node)| Full(node.value))?;
        self.link_head(key);
        Ok(())
    }

    /// Returns the number of slots in the backing storage.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.storage.capacity()
    }
}

impl<T, S, K: Key> Drop for Dll<T, S, K>
where
    S: Storage<Node<T, K>, Key = K>,
{
    fn drop(&mut self) {
        self.clear();
    }
}

impl<T: core::fmt::Debug, S, K: Key> core::fmt::Debug for Dll<T, S, K>
where
    S: Storage<Node<T, K>, Key = K>,
{
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

/// Inserts each value at the head in turn, so the last value ends up first.
impl<T, S, K: Key> Extend<T> for Dll<T, S, K>
where
    S: UnboundedStorage<Node<T, K>, Key = K>,
{
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for value in iter {
            self.insert_at_head(value);
        }
    }
}

/// Head-inserts every value, so iteration yields them in reverse.
impl<T, S, K: Key> FromIterator<T> for Dll<T, S, K>
where
    S: UnboundedStorage<Node<T, K>, Key = K> + Default,
{
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut list = Self::new();
        list.extend(iter);
        list
    }
}

impl<'a, T, S, K: Key> IntoIterator for &'a Dll<T, S, K>
where
    S: Storage<Node<T, K>, Key = K>,
{
    type Item = &'a T;
    type IntoIter = Iter<'a, T, S, K>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<'a, T, S, K: Key> IntoIterator for &'a mut Dll<T, S, K>
where
    S: Storage<Node<T, K>, Key = K>,
{
    type Item = &'a mut T;
    type IntoIter = IterMut<'a, T, S, K>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter_mut()
    }
}

impl<T, S, K: Key> IntoIterator for Dll<T, S, K>
where
    S: Storage<Node<T, K>, Key = K>,
{
    type Item = T;
    type IntoIter = IntoIter<T, S, K>;

    fn into_iter(self) -> Self::IntoIter {
        IntoIter { list: self }
    }
}

// =============================================================================
// Iterators
// =============================================================================

/// Iterator over references to list values, driven by a [`Cursor`].
pub struct Iter<'a, T, S, K: Key = u32>
where
    S: Storage<Node<T, K>, Key = K>,
{
    cursor: Cursor<'a, T, S, K>,
    remaining: usize,
}

impl<T, S, K: Key> Clone for Iter<'_, T, S, K>
where
    S: Storage<Node<T, K>, Key = K>,
{
    fn clone(&self) -> Self {
        Self {
            cursor: self.cursor,
            remaining: self.remaining,
        }
    }
}

impl<'a, T, S, K: Key> Iterator for Iter<'a, T, S, K>
where
    S: Storage<Node<T, K>, Key = K>,
{
    type Item = &'a T;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        if self.cursor.is_end() {
            return None;
        }

        self.remaining -= 1;
        Some(self.cursor.advance_postfix().get())
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<T, S, K: Key> ExactSizeIterator for Iter<'_, T, S, K> where S: Storage<Node<T, K>, Key = K> {}

impl<T, S, K: Key> FusedIterator for Iter<'_, T, S, K> where S: Storage<Node<T, K>, Key = K> {}

/// Iterator over mutable references to list values.
pub struct IterMut<'a, T, S, K: Key = u32> {
    storage: &'a mut S,
    current: K,
    remaining: usize,
    _marker: PhantomData<&'a mut T>,
}

impl<'a, T: 'a, S, K: Key> Iterator for IterMut<'a, T, S, K>
where
    S: Storage<Node<T, K>, Key = K>,
{
    type Item = &'a mut T;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        if self.current.is_none() {
            return None;
        }

        // Safety: current is reachable from head, so occupied
        let node = unsafe { self.storage.get_unchecked_mut(self.current) };
        self.current = node.next;
        self.remaining -= 1;

        // Extend lifetime - each node is visited exactly once
        Some(unsafe { &mut *(&mut node.value as *mut T) })
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<'a, T: 'a, S, K: Key> ExactSizeIterator for IterMut<'a, T, S, K> where
    S: Storage<Node<T, K>, Key = K>
{
}

impl<'a, T: 'a, S, K: Key> FusedIterator for IterMut<'a, T, S, K> where
    S: Storage<Node<T, K>, Key = K>
{
}

/// Owning iterator. Releases nodes front to back as it goes.
pub struct IntoIter<T, S, K: Key = u32>
where
    S: Storage<Node<T, K>, Key = K>,
{
    list: Dll<T, S, K>,
}

impl<T, S, K: Key> Iterator for IntoIter<T, S, K>
where
    S: Storage<Node<T, K>, Key = K>,
{
    type Item = T;

    #[inline]
    fn next(&mut self) -> Option<T> {
        self.list.pop_front()
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.list.len(), Some(self.list.len()))
    }
}

impl<T, S, K: Key> ExactSizeIterator for IntoIter<T, S, K> where S: Storage<Node<T, K>, Key = K> {}

impl<T, S, K: Key> FusedIterator for IntoIter<T, S, K> where S: Storage<Node<T, K>, Key = K> {}


#[cfg(test)]
mod bench_fixed_storage {
    use super::*;
    use hdrhistogram::Histogram;

    #[inline]
    fn rdtscp() -> u64 {
        #[cfg(target_arch = "x86_64")]
        unsafe {
            core::arch::x86_64::__rdtscp(&mut 0)
        }
        #[cfg(not(target_arch = "x86_64"))]
        {
            use std::sync::OnceLock;
            use std::time::Instant;

            static START: OnceLock<Instant> = OnceLock::new();
            START.get_or_init(Instant::now).elapsed().as_nanos() as u64
        }
    }

    fn print_histogram(name: &str, hist: &Histogram<u64>) {
        println!(
            "{:24} p50: {:4} cycles | p99: {:4} cycles | p999: {:5} cycles | min: {:4} | max: {:5}",
            name,
            hist.value_at_quantile(0.50),
            hist.value_at_quantile(0.99),
            hist.value_at_quantile(0.999),
            hist.min(),
            hist.max(),
        );
    }

    const WARMUP: usize = 10_000;
    const ITERATIONS: usize = 100_000;

    #[test]
    #[ignore]
    fn bench_try_insert_at_head() {
        let mut list: FixedDll<u64> =
            FixedDll::with_storage(FixedStorage::with_capacity(ITERATIONS + WARMUP));
        let mut hist = Histogram::<u64>::new(3).unwrap();

        for i in 0..WARMUP {
            let _ = list.try_insert_at_head(i as u64);
            let _ = list.pop_front();
        }

        for i in 0..ITERATIONS {
            let start = rdtscp();
            let _ = list.try_insert_at_head(i as u64);
            let elapsed = rdtscp() - start;
            hist.record(elapsed).unwrap();
            let _ = list.pop_front();
        }

        print_histogram("try_insert_at_head", &hist);
    }

    #[test]
    #[ignore]
    fn bench_cursor_advance() {
        let mut list: FixedDll<u64> =
            FixedDll::with_storage(FixedStorage::with_capacity(ITERATIONS));
        let mut hist = Histogram::<u64>::new(3).unwrap();

        for i in 0..ITERATIONS {
            list.try_insert_at_head(i as u64).unwrap();
        }

        let end = list.end();
        let mut cursor = list.begin();
        while cursor != end {
            let start = rdtscp();
            cursor.advance();
            let elapsed = rdtscp() - start;
            hist.record(elapsed).unwrap();
        }

        print_histogram("cursor advance", &hist);
    }
}
