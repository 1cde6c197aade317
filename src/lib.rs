#![warn(missing_docs)]
#![doc = include_str!("../README.md")]
#![cfg_attr(not(feature = "std"), no_std)]

extern crate alloc;

/// Error type shared by table construction, lookups, and the prime helpers.
pub mod error;

/// A fixed-capacity table using open addressing with double hashing.
///
/// This module provides [`DoubleHashingTable`], its stored [`Entry`] type,
/// and the capacity constants it is built around.
pub mod hash_table;

pub mod primes;

pub use error::Error;
pub use error::Result;
pub use hash_table::DEFAULT_CAPACITY;
#[cfg(feature = "stats")]
pub use hash_table::DebugStats;
pub use hash_table::DoubleHashingTable;
pub use hash_table::Entry;
pub use hash_table::MAX_CAPACITY;

/// The operations shared by integer-keyed probing tables, independent of the
/// collision strategy behind them.
pub trait ProbingTable {
    /// Returns `true` if the table maps `key` to a value.
    fn contains_key(&self, key: i32) -> bool;

    /// Maps `key` to `value`, replacing any previous value. Returns `false`
    /// if the table has no room for the key.
    fn put(&mut self, key: i32, value: i64) -> bool;

    /// Returns the value mapped to `key`.
    ///
    /// # Errors
    ///
    /// [`Error::KeyNotFound`] if the table holds no mapping for `key`.
    fn get(&self, key: i32) -> Result<i64>;

    /// Returns the number of entries in the table.
    fn len(&self) -> usize;

    /// Returns `true` if the table holds no entries.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
