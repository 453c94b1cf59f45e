//! Builders for configuring list storage up front.
//!
//! ```
//! use nexus_dll::{DllBuilder, FixedDll, SlabDll};
//!
//! // Growable, with room for 1024 nodes before the slab reallocates
//! let list: SlabDll<u64> = DllBuilder::default().capacity(1024).build();
//!
//! // Fixed, exactly 1024 slots
//! let list: FixedDll<u64> = DllBuilder::default()
//!     .fixed()
//!     .capacity(1024)
//!     .build()
//!     .unwrap();
//! assert_eq!(list.capacity(), 1024);
//! ```

use crate::{BuildError, Dll, FixedDll, FixedStorage, Key, SlabDll};

/// Builder for a list over growable slab storage.
#[derive(Clone, Debug, Default)]
pub struct DllBuilder {
    capacity: Option<usize>,
}

impl DllBuilder {
    /// Creates a builder with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-reserve room for at least this many nodes.
    /// The slab still grows past it. Default: no reservation.
    pub fn capacity(mut self, nodes: usize) -> Self {
        self.capacity = Some(nodes);
        self
    }

    /// Switch to fixed-capacity storage.
    pub fn fixed(self) -> FixedDllBuilder {
        FixedDllBuilder {
            capacity: self.capacity,
        }
    }

    /// Builds an empty growable list.
    pub fn build<T>(self) -> SlabDll<T> {
        let storage = match self.capacity {
            Some(nodes) => slab::Slab::with_capacity(nodes),
            None => slab::Slab::new(),
        };
        log::debug!("slab list storage reserved for {} nodes", storage.capacity());
        Dll::with_storage(storage)
    }
}

/// Builder for a list over [`FixedStorage`].
///
/// Created via `DllBuilder::default().fixed()`.
#[derive(Clone, Debug)]
pub struct FixedDllBuilder {
    capacity: Option<usize>,
}

impl FixedDllBuilder {
    /// Exact number of slots. Required.
    pub fn capacity(mut self, slots: usize) -> Self {
        self.capacity = Some(slots);
        self
    }

    /// Builds an empty fixed-capacity list.
    ///
    /// # Errors
    ///
    /// - [`BuildError::ZeroCapacity`] if no capacity, or a capacity of 0, was set
    /// - [`BuildError::CapacityExceedsKey`] if `K` cannot address every slot
    /// - [`BuildError::AllocationFailed`] if the slots cannot be allocated
    pub fn build<T, K: Key>(self) -> Result<FixedDll<T, K>, BuildError> {
        let capacity = self.capacity.unwrap_or(0);
        let storage = FixedStorage::try_with_capacity(capacity)?;
        log::debug!("fixed list storage allocated with {capacity} slots");
        Ok(Dll::with_storage(storage))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn growable_reserves_capacity() {
        let mut list: SlabDll<u64> = DllBuilder::new().capacity(100).build();
        for value in 0..200 {
            list.insert_at_head(value);
        }
        assert_eq!(list.len(), 200);
    }

    #[test]
    fn fixed_requires_capacity() {
        let err = DllBuilder::default().fixed().build::<u64, u32>().unwrap_err();
        assert_eq!(err, BuildError::ZeroCapacity);
    }

    #[test]
    fn fixed_capacity_carries_over() {
        let list: FixedDll<u64> = DllBuilder::default().capacity(8).fixed().build().unwrap();
        assert_eq!(list.capacity(), 8);
        assert!(list.is_empty());
    }

    #[test]
    fn fixed_rejects_capacity_beyond_key() {
        let err = DllBuilder::default()
            .fixed()
            .capacity(1_000)
            .build::<u64, u8>()
            .unwrap_err();
        assert_eq!(
            err,
            BuildError::CapacityExceedsKey {
                capacity: 1_000,
                max: 255
            }
        );
    }
}
