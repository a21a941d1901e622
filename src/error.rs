use thiserror::Error;

/// Errors raised by [`ChainedHashTable`](crate::ChainedHashTable).
///
/// A missing key is never an error; lookups report absence through `Option`
/// or `bool`. These variants mean the table's own invariants were broken.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum TableError {
    /// A computed bucket index fell outside `[0, capacity)`.
    ///
    /// `index` is `None` when the capacity admits no index at all (a table
    /// constructed with capacity 0).
    #[error("bucket index {index:?} out of bounds for capacity {capacity}")]
    OutOfBounds {
        /// The offending index, if one could be computed.
        index: Option<usize>,
        /// The bucket count at the time of the access.
        capacity: usize,
    },
    /// Doubling the bucket count would overflow `usize`.
    #[error("cannot grow a table of capacity {capacity}")]
    CapacityOverflow {
        /// The bucket count that could not be doubled.
        capacity: usize,
    },
}

#[cfg(test)]
mod tests {
    use alloc::string::ToString;

    use super::*;

    #[test]
    fn messages_name_the_capacity() {
        let err = TableError::OutOfBounds {
            index: Some(9),
            capacity: 8,
        };
        assert_eq!(
            err.to_string(),
            "bucket index Some(9) out of bounds for capacity 8"
        );

        let err = TableError::OutOfBounds {
            index: None,
            capacity: 0,
        };
        assert_eq!(
            err.to_string(),
            "bucket index None out of bounds for capacity 0"
        );

        let err = TableError::CapacityOverflow {
            capacity: usize::MAX,
        };
        assert!(err.to_string().contains(&usize::MAX.to_string()));
    }
}
