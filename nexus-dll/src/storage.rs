//! Node storage with stable keys.
//!
//! The list never allocates nodes itself. It asks a storage arena for a slot
//! and links slots together by [`Key`]. The arena owns every node, so
//! releasing a node is exactly one `remove` on the arena.
//!
//! Storage comes in two flavours:
//!
//! ```text
//! Storage<T>              get, get_mut, remove, len
//!     ├── BoundedStorage  try_insert -> Result<Key, Full<T>>
//!     └── UnboundedStorage insert -> Key
//! ```
//!
//! [`FixedStorage`] is the bounded arena in this crate. `slab::Slab` is the
//! unbounded one.

use crate::{BuildError, Full, Key};

/// Slab-like storage with stable keys.
///
/// A key handed out by an insert stays valid until that key is removed.
///
/// # Safety
///
/// [`Dll`](crate::Dll) reads nodes through [`get_unchecked`](Self::get_unchecked)
/// and [`get_unchecked_mut`](Self::get_unchecked_mut) using only keys it
/// got back from an insert. Implementors must guarantee that:
///
/// - every key returned by [`BoundedStorage::try_insert`] or
///   [`UnboundedStorage::insert`] is not [`Key::NONE`] and names an occupied
///   slot holding the inserted value until that key is passed to
///   [`remove`](Self::remove)
/// - no other key is handed out for an occupied slot
/// - `get_unchecked` and `get_unchecked_mut` return that slot's value for
///   any such key
/// - [`len`](Self::len) counts exactly the occupied slots
///
/// A safe `impl` does not compile:
///
/// ```compile_fail
/// use nexus_dll::Storage;
///
/// struct Sloppy(Vec<u64>);
///
/// impl Storage<u64> for Sloppy {
///     type Key = usize;
///     fn get(&self, key: usize) -> Option<&u64> { self.0.get(key) }
///     fn get_mut(&mut self, key: usize) -> Option<&mut u64> { self.0.get_mut(key) }
///     fn remove(&mut self, _key: usize) -> Option<u64> { None }
///     fn len(&self) -> usize { self.0.len() }
///     unsafe fn get_unchecked(&self, key: usize) -> &u64 { &self.0[key] }
///     unsafe fn get_unchecked_mut(&mut self, key: usize) -> &mut u64 { &mut self.0[key] }
/// }
/// ```
pub unsafe trait Storage<T> {
    /// Handle type for this storage.
    type Key: Key;

    /// Returns a reference to the value at `key`, if occupied.
    fn get(&self, key: Self::Key) -> Option<&T>;

    /// Returns a mutable reference to the value at `key`, if occupied.
    fn get_mut(&mut self, key: Self::Key) -> Option<&mut T>;

    /// Removes and returns the value at `key`, if occupied.
    fn remove(&mut self, key: Self::Key) -> Option<T>;

    /// Returns the number of occupied slots.
    fn len(&self) -> usize;

    /// Returns `true` if no slot is occupied.
    #[inline]
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns a reference without checking occupancy.
    ///
    /// # Safety
    ///
    /// `key` must name an occupied slot.
    unsafe fn get_unchecked(&self, key: Self::Key) -> &T;

    /// Returns a mutable reference without checking occupancy.
    ///
    /// # Safety
    ///
    /// `key` must name an occupied slot.
    unsafe fn get_unchecked_mut(&mut self, key: Self::Key) -> &mut T;
}

/// Storage with a fixed number of slots.
pub trait BoundedStorage<T>: Storage<T> {
    /// Inserts a value, or hands it back if every slot is occupied.
    ///
    /// Storage is left untouched on error.
    fn try_insert(&mut self, value: T) -> Result<Self::Key, Full<T>>;

    /// Returns the total number of slots.
    fn capacity(&self) -> usize;
}

/// Storage that grows on demand.
pub trait UnboundedStorage<T>: Storage<T> {
    /// Inserts a value, growing if needed.
    fn insert(&mut self, value: T) -> Self::Key;
}

// =============================================================================
// FixedStorage - one up-front allocation, free list through vacant slots
// =============================================================================

enum Slot<T, K> {
    Occupied(T),
    /// Vacant slot holding the next free key.
    Vacant(K),
}

/// Fixed-capacity arena.
///
/// All slots are allocated at construction. Vacant slots form a LIFO free
/// list, so the most recently released key is the next one handed out.
///
/// # Example
///
/// ```
/// use nexus_dll::{BoundedStorage, FixedStorage, Storage};
///
/// let mut storage: FixedStorage<u64> = FixedStorage::with_capacity(2);
/// let a = storage.try_insert(1).unwrap();
/// let _b = storage.try_insert(2).unwrap();
/// assert_eq!(storage.try_insert(3).unwrap_err().into_inner(), 3);
///
/// assert_eq!(storage.remove(a), Some(1));
/// assert_eq!(storage.try_insert(4), Ok(a));
/// ```
pub struct FixedStorage<T, K: Key = u32> {
    slots: Box<[Slot<T, K>]>,
    free_head: K,
    len: usize,
}

impl<T, K: Key> FixedStorage<T, K> {
    /// Creates storage with exactly `capacity` slots.
    ///
    /// # Panics
    ///
    /// Panics if `capacity` is 0, exceeds what `K` can address, or the slot
    /// array cannot be allocated. Use [`try_with_capacity`](Self::try_with_capacity)
    /// to handle those cases.
    pub fn with_capacity(capacity: usize) -> Self {
        match Self::try_with_capacity(capacity) {
            Ok(storage) => storage,
            Err(err) => panic!("{err}"),
        }
    }

    /// Creates storage with exactly `capacity` slots.
    ///
    /// # Errors
    ///
    /// - [`BuildError::ZeroCapacity`] if `capacity` is 0
    /// - [`BuildError::CapacityExceedsKey`] if some slot index would collide
    ///   with `K::NONE`
    /// - [`BuildError::AllocationFailed`] if the slot array cannot be reserved
    pub fn try_with_capacity(capacity: usize) -> Result<Self, BuildError> {
        if capacity == 0 {
            return Err(BuildError::ZeroCapacity);
        }

        let max = K::NONE.as_usize();
        if capacity > max {
            return Err(BuildError::CapacityExceedsKey { capacity, max });
        }

        let mut slots = Vec::new();
        slots
            .try_reserve_exact(capacity)
            .map_err(|_| BuildError::AllocationFailed)?;

        // Slot i points at i + 1, the last slot ends the free list.
        slots.extend((0..capacity).map(|i| {
            if i + 1 < capacity {
                Slot::Vacant(K::from_usize(i + 1))
            } else {
                Slot::Vacant(K::NONE)
            }
        }));

        Ok(Self {
            slots: slots.into_boxed_slice(),
            free_head: K::from_usize(0),
            len: 0,
        })
    }

    /// Returns `true` if every slot is occupied.
    #[inline]
    pub fn is_full(&self) -> bool {
        self.free_head.is_none()
    }
}

// Safety: keys come off the free list, which only threads vacant in-bounds
// slots, and `remove` pushes a key back only after vacating it.
unsafe impl<T, K: Key> Storage<T> for FixedStorage<T, K> {
    type Key = K;

    #[inline]
    fn get(&self, key: K) -> Option<&T> {
        match self.slots.get(key.as_usize()) {
            Some(Slot::Occupied(value)) => Some(value),
            _ => None,
        }
    }

    #[inline]
    fn get_mut(&mut self, key: K) -> Option<&mut T> {
        match self.slots.get_mut(key.as_usize()) {
            Some(Slot::Occupied(value)) => Some(value),
            _ => None,
        }
    }

    #[inline]
    fn remove(&mut self, key: K) -> Option<T> {
        let free_head = self.free_head;
        let slot = self.slots.get_mut(key.as_usize())?;

        match core::mem::replace(slot, Slot::Vacant(free_head)) {
            Slot::Occupied(value) => {
                self.free_head = key;
                self.len -= 1;
                Some(value)
            }
            vacant => {
                *slot = vacant;
                None
            }
        }
    }

    #[inline]
    fn len(&self) -> usize {
        self.len
    }

    #[inline]
    unsafe fn get_unchecked(&self, key: K) -> &T {
        // Safety: caller guarantees key names an occupied slot
        match unsafe { self.slots.get_unchecked(key.as_usize()) } {
            Slot::Occupied(value) => value,
            Slot::Vacant(_) => unsafe { core::hint::unreachable_unchecked() },
        }
    }

    #[inline]
    unsafe fn get_unchecked_mut(&mut self, key: K) -> &mut T {
        // Safety: caller guarantees key names an occupied slot
        match unsafe { self.slots.get_unchecked_mut(key.as_usize()) } {
            Slot::Occupied(value) => value,
            Slot::Vacant(_) => unsafe { core::hint::unreachable_unchecked() },
        }
    }
}

impl<T, K: Key> BoundedStorage<T> for FixedStorage<T, K> {
    #[inline]
    fn try_insert(&mut self, value: T) -> Result<K, Full<T>> {
        let key = self.free_head;
        let Some(slot) = self.slots.get_mut(key.as_usize()) else {
            return Err(Full(value));
        };

        let next_free = match slot {
            Slot::Vacant(next) => *next,
            Slot::Occupied(_) => unreachable!("free list points at an occupied slot"),
        };

        *slot = Slot::Occupied(value);
        self.free_head = next_free;
        self.len += 1;
        Ok(key)
    }

    #[inline]
    fn capacity(&self) -> usize {
        self.slots.len()
    }
}

impl<T, K: Key> core::fmt::Debug for FixedStorage<T, K> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("FixedStorage")
            .field("len", &self.len)
            .field("capacity", &self.slots.len())
            .finish()
    }
}

// =============================================================================
// slab::Slab
// =============================================================================

// Safety: `Slab::insert` returns the index of the slot it filled, and that
// index stays occupied until `try_remove`.
unsafe impl<T> Storage<T> for slab::Slab<T> {
    type Key = usize;

    #[inline]
    fn get(&self, key: usize) -> Option<&T> {
        slab::Slab::get(self, key)
    }

    #[inline]
    fn get_mut(&mut self, key: usize) -> Option<&mut T> {
        slab::Slab::get_mut(self, key)
    }

    #[inline]
    fn remove(&mut self, key: usize) -> Option<T> {
        slab::Slab::try_remove(self, key)
    }

    #[inline]
    fn len(&self) -> usize {
        slab::Slab::len(self)
    }

    #[inline]
    unsafe fn get_unchecked(&self, key: usize) -> &T {
        unsafe { slab::Slab::get_unchecked(self, key) }
    }

    #[inline]
    unsafe fn get_unchecked_mut(&mut self, key: usize) -> &mut T {
        unsafe { slab::Slab::get_unchecked_mut(self, key) }
    }
}

impl<T> UnboundedStorage<T> for slab::Slab<T> {
    #[inline]
    fn insert(&mut self, value: T) -> usize {
        slab::Slab::insert(self, value)
    }
}
