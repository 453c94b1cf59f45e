//! Error types for list construction and insertion.

use core::fmt;

/// Error returned when fixed-capacity storage has no vacant slot.
///
/// Carries the value that could not be inserted so the caller can retry
/// elsewhere or drop it deliberately.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Full<T>(pub T);

impl<T> Full<T> {
    /// Returns the value that could not be inserted.
    pub fn into_inner(self) -> T {
        self.0
    }
}

impl<T> fmt::Display for Full<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "storage is full")
    }
}

impl<T: fmt::Debug> std::error::Error for Full<T> {}

/// Error during storage or list construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BuildError {
    /// Fixed storage needs at least one slot.
    ZeroCapacity,
    /// Capacity does not fit the key type once `NONE` is reserved.
    CapacityExceedsKey {
        /// Requested slot count.
        capacity: usize,
        /// Largest slot count the key type can address.
        max: usize,
    },
    /// The slot array could not be allocated.
    AllocationFailed,
}

impl fmt::Display for BuildError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ZeroCapacity => write!(f, "capacity must be > 0"),
            Self::CapacityExceedsKey { capacity, max } => {
                write!(f, "capacity {capacity} exceeds key maximum {max}")
            }
            Self::AllocationFailed => write!(f, "failed to allocate node storage"),
        }
    }
}

impl std::error::Error for BuildError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn full_hands_value_back() {
        let err = Full(String::from("order"));
        assert_eq!(err.to_string(), "storage is full");
        assert_eq!(err.into_inner(), "order");
    }

    #[test]
    fn build_error_messages() {
        assert_eq!(BuildError::ZeroCapacity.to_string(), "capacity must be > 0");
        assert_eq!(
            BuildError::CapacityExceedsKey {
                capacity: 300,
                max: 255
            }
            .to_string(),
            "capacity 300 exceeds key maximum 255"
        );
    }
}
