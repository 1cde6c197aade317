/// Errors reported by table construction, lookups, and the prime helpers.
///
/// A refused [`put`](crate::DoubleHashingTable::put) is not an error; it is
/// reported through the returned `bool`.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[non_exhaustive]
pub enum Error {
    /// An argument was outside the range the operation accepts.
    #[error("illegal {name}: {value}")]
    InvalidArgument {
        /// Which argument was rejected.
        name: &'static str,
        /// The rejected value.
        value: i128,
    },
    /// No prime exists between the starting point and `i32::MAX`.
    #[error("no prime number found in the range ({from}; i32::MAX)")]
    SearchExhausted {
        /// The exclusive lower bound of the search.
        from: i32,
    },
    /// The table holds no mapping for the key.
    #[error("no mapping for key {0}")]
    KeyNotFound(i32),
}

/// Result alias used throughout the crate.
pub type Result<T> = core::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use alloc::string::ToString;

    use super::*;

    #[test]
    fn messages() {
        let err = Error::InvalidArgument {
            name: "desired capacity",
            value: 0,
        };
        assert_eq!(err.to_string(), "illegal desired capacity: 0");
        assert_eq!(
            Error::SearchExhausted { from: i32::MAX - 1 }.to_string(),
            "no prime number found in the range (2147483646; i32::MAX)"
        );
        assert_eq!(Error::KeyNotFound(-7).to_string(), "no mapping for key -7");
    }
}
