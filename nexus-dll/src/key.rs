//! Node handles.
//!
//! A [`Key`] names a slot in node storage. Links between nodes are keys, not
//! pointers, so the storage arena is the only owner of a node and a link can
//! never keep a node alive on its own.

/// Integer handle into node storage with a reserved "no node" sentinel.
///
/// `NONE` plays the role of a null link: the tail's `next`, the head's
/// `prev`, an empty list's head and the end cursor all hold it.
///
/// # Example
///
/// ```
/// use nexus_dll::Key;
///
/// let key: u32 = 7;
/// assert!(key.is_some());
/// assert!(u32::NONE.is_none());
/// assert_eq!(u32::from_usize(7), key);
/// ```
pub trait Key: Copy + Eq + core::fmt::Debug {
    /// Sentinel meaning "no node". Never handed out by storage.
    const NONE: Self;

    /// Converts a slot index into a key.
    fn from_usize(val: usize) -> Self;

    /// Returns the slot index this key names.
    fn as_usize(&self) -> usize;

    /// Returns `true` if this is the sentinel.
    #[inline]
    fn is_none(&self) -> bool {
        *self == Self::NONE
    }

    /// Returns `true` if this names a slot.
    #[inline]
    fn is_some(&self) -> bool {
        !self.is_none()
    }
}

macro_rules! impl_key_for_unsigned {
    ($($ty:ty),*) => {
        $(
            impl Key for $ty {
                const NONE: Self = <$ty>::MAX;

                #[inline]
                fn from_usize(val: usize) -> Self {
                    val as Self
                }

                #[inline]
                fn as_usize(&self) -> usize {
                    *self as usize
                }
            }
        )*
    };
}

impl_key_for_unsigned!(u8, u16, u32, u64, usize);
