use alloc::boxed::Box;
use core::fmt::Debug;
use core::fmt::Display;

use crate::ProbingTable;
use crate::error::Error;
use crate::error::Result;
use crate::primes;

/// Capacity used by [`DoubleHashingTable::new`]. Must be prime.
pub const DEFAULT_CAPACITY: usize = 17;

/// The largest prime not exceeding `i32::MAX`, and the largest capacity a
/// table may be constructed with.
pub const MAX_CAPACITY: usize = 2_147_483_629;

/// A key-value pair stored in a [`DoubleHashingTable`] slot.
///
/// Equality and hashing cover both the key and the value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Entry {
    key: i32,
    value: i64,
}

impl Entry {
    fn new(key: i32, value: i64) -> Self {
        Self { key, value }
    }

    /// The entry's key.
    pub fn key(&self) -> i32 {
        self.key
    }

    /// The value currently mapped to the key.
    pub fn value(&self) -> i64 {
        self.value
    }
}

impl Display for Entry {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}={}", self.key, self.value)
    }
}

/// Probe-length statistics for a table.
///
/// Available with the `stats` feature.
#[cfg(any(test, feature = "stats"))]
#[derive(Debug, Clone)]
pub struct DebugStats {
    /// Number of entries currently in the table
    pub populated: usize,
    /// Number of slots in the table
    pub capacity: usize,
    /// The prime seeding the probe step
    pub prime_for_hash: usize,
    /// Load factor (populated / capacity)
    pub load_factor: f64,
    /// Largest number of probe steps any stored entry sits from its home slot
    pub longest_probe: usize,
    /// Total memory in bytes used by the slots
    pub total_bytes: usize,
}

#[cfg(any(test, feature = "stats"))]
impl DebugStats {
    /// Pretty-print the debug statistics.
    #[cfg(feature = "std")]
    pub fn print(&self) {
        println!("=== Double Hashing Table Statistics ===");
        println!(
            "Population: {}/{} ({:.2}% load factor)",
            self.populated,
            self.capacity,
            self.load_factor * 100.0
        );
        println!("Probe step prime: {}", self.prime_for_hash);
        println!("Longest probe: {} steps", self.longest_probe);
        println!("Total Allocated: {} bytes", self.total_bytes);
    }
}

/// A fixed-capacity map from `i32` keys to `i64` values using open
/// addressing with double hashing.
///
/// The number of slots is the smallest prime at least as large as the
/// requested capacity and never changes. A key's home slot is
/// `key mod capacity`; on collision the table steps through slots by
/// `prime_for_hash - (key mod prime_for_hash)`, where `prime_for_hash` is the
/// largest prime below the capacity. Since the capacity is prime, every step
/// size is coprime with it.
///
/// There is no removal and no growth: once no slot is reachable for a key,
/// [`put`](Self::put) returns `false`.
///
/// ## Example
///
/// ```rust
/// # use double_hash_table::DoubleHashingTable;
/// let mut table = DoubleHashingTable::with_capacity(10).unwrap();
/// assert_eq!(table.capacity(), 11);
///
/// assert!(table.put(1, 10));
/// assert!(table.put(12, 120)); // collides with 1
/// assert_eq!(table.get(12), Ok(120));
/// assert!(table.get(2).is_err());
/// ```
#[derive(Clone)]
pub struct DoubleHashingTable {
    slots: Box<[Option<Entry>]>,
    populated: usize,
    prime_for_hash: usize,
}

impl Debug for DoubleHashingTable {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let mut map = f.debug_map();
        for entry in self.iter() {
            map.entry(&entry.key, &entry.value);
        }
        map.finish()
    }
}

impl Display for DoubleHashingTable {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str("DoubleHashingTable[")?;
        for (i, entry) in self.iter().enumerate() {
            if i > 0 {
                f.write_str(",")?;
            }
            write!(f, "{entry}")?;
        }
        f.write_str("]")
    }
}

impl Default for DoubleHashingTable {
    fn default() -> Self {
        Self::new()
    }
}

impl DoubleHashingTable {
    /// Creates an empty table with [`DEFAULT_CAPACITY`] slots.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use double_hash_table::DoubleHashingTable;
    /// let table = DoubleHashingTable::new();
    /// assert_eq!(table.capacity(), 17);
    /// assert!(table.is_empty());
    /// ```
    pub fn new() -> Self {
        Self::from_prime_capacity(DEFAULT_CAPACITY)
    }

    /// Creates an empty table with at least `desired_capacity` slots.
    ///
    /// The capacity is `desired_capacity` itself if it is prime, and the next
    /// prime above it otherwise.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidArgument`] unless `1 <= desired_capacity <=
    /// MAX_CAPACITY`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use double_hash_table::DoubleHashingTable;
    /// assert_eq!(DoubleHashingTable::with_capacity(4).unwrap().capacity(), 5);
    /// assert_eq!(DoubleHashingTable::with_capacity(5).unwrap().capacity(), 5);
    /// assert!(DoubleHashingTable::with_capacity(0).is_err());
    /// ```
    pub fn with_capacity(desired_capacity: usize) -> Result<Self> {
        if desired_capacity == 0 || desired_capacity > MAX_CAPACITY {
            return Err(Error::InvalidArgument {
                name: "desired capacity",
                value: desired_capacity as i128,
            });
        }

        // In range, so this fits an i32.
        let desired = desired_capacity as i32;
        let capacity = if primes::is_prime(desired) {
            desired
        } else {
            primes::next_prime(desired)?
        };

        let table = Self::from_prime_capacity(capacity as usize);
        log::debug!(
            "double hashing table: desired capacity {desired_capacity}, capacity {}, prime for hash {}",
            table.capacity(),
            table.prime_for_hash
        );
        Ok(table)
    }

    fn from_prime_capacity(capacity: usize) -> Self {
        // prev_prime only fails below 3; those tables probe with a step of 1.
        let prime_for_hash = primes::prev_prime(capacity as i32).map_or(1, |p| p as usize);
        Self {
            slots: alloc::vec![None; capacity].into_boxed_slice(),
            populated: 0,
            prime_for_hash,
        }
    }

    /// Returns the number of entries in the table.
    pub fn len(&self) -> usize {
        self.populated
    }

    /// Returns `true` if the table holds no entries.
    pub fn is_empty(&self) -> bool {
        self.populated == 0
    }

    /// Returns `true` if every slot is occupied, so no new key can be added.
    pub fn is_full(&self) -> bool {
        self.populated == self.slots.len()
    }

    /// Returns the number of slots. This never changes after construction.
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// Returns the prime the probe step is derived from: the largest prime
    /// below the capacity, or 1 for tables with fewer than 3 slots.
    pub fn prime_for_hash(&self) -> usize {
        self.prime_for_hash
    }

    /// Returns `true` if the table maps `key` to a value.
    pub fn contains_key(&self, key: i32) -> bool {
        self.key_position(key).is_some()
    }

    /// Returns the value mapped to `key`.
    ///
    /// # Errors
    ///
    /// [`Error::KeyNotFound`] if the table holds no mapping for `key`.
    pub fn get(&self, key: i32) -> Result<i64> {
        self.key_position(key)
            .and_then(|position| self.slots[position])
            .map(|entry| entry.value)
            .ok_or(Error::KeyNotFound(key))
    }

    /// Maps `key` to `value`, replacing the previous value if `key` is
    /// already present.
    ///
    /// Returns `false` without changing the table if the table is full, or if
    /// the probe sequence for `key` cycles back to its home slot without
    /// reaching a free slot.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use double_hash_table::DoubleHashingTable;
    /// let mut table = DoubleHashingTable::with_capacity(2).unwrap();
    /// assert!(table.put(1, 7));
    /// assert!(table.put(1, 8)); // update in place
    /// assert!(table.put(2, 13));
    /// assert!(!table.put(18, 777)); // full
    /// assert!(!table.put(2, 14)); // a full table refuses updates too
    /// assert_eq!(table.get(2), Ok(13));
    /// assert_eq!(table.len(), 2);
    /// ```
    pub fn put(&mut self, key: i32, value: i64) -> bool {
        if self.is_full() {
            log::debug!("refusing key {key}: table is full");
            return false;
        }

        let position = self.find_position(key);
        match self.slots[position].as_mut() {
            Some(entry) if entry.key == key => {
                log::trace!("updating key {key} at slot {position}");
                entry.value = value;
                true
            }
            Some(_) => {
                log::debug!("refusing key {key}: probe chain has no free slot");
                false
            }
            None => {
                self.slots[position] = Some(Entry::new(key, value));
                self.populated += 1;
                true
            }
        }
    }

    /// Iterates over the stored entries in slot order.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use double_hash_table::DoubleHashingTable;
    /// let mut table = DoubleHashingTable::new();
    /// table.put(20, 2);
    /// table.put(1, 1);
    /// let keys: Vec<i32> = table.iter().map(|e| e.key()).collect();
    /// assert_eq!(keys, [1, 20]);
    /// ```
    pub fn iter(&self) -> impl Iterator<Item = &Entry> + '_ {
        self.slots.iter().flatten()
    }

    fn first_hash(&self, key: i32) -> usize {
        (key as i64).rem_euclid(self.slots.len() as i64) as usize
    }

    fn second_hash(&self, key: i32) -> usize {
        let prime = self.prime_for_hash;
        prime - (key as i64).rem_euclid(prime as i64) as usize
    }

    fn holds(&self, position: usize, key: i32) -> bool {
        matches!(self.slots[position], Some(entry) if entry.key == key)
    }

    /// Resolves the slot for `key`: its home slot if that is empty or holds
    /// the key, otherwise the first slot along the probe sequence that is
    /// empty or holds the key. If the sequence cycles back to the home slot,
    /// the home slot is returned and it holds a different key.
    fn find_position(&self, key: i32) -> usize {
        let start = self.first_hash(key);
        if self.slots[start].is_none() || self.holds(start, key) {
            return start;
        }

        let capacity = self.slots.len();
        let step = self.second_hash(key);
        let mut position = (start + step) % capacity;
        while self.slots[position].is_some() && !self.holds(position, key) && position != start {
            position = (position + step) % capacity;
        }
        position
    }

    fn key_position(&self, key: i32) -> Option<usize> {
        let position = self.find_position(key);
        self.holds(position, key).then_some(position)
    }

    /// Number of probe steps between `key`'s home slot and `position`.
    /// Walks the probe sequence again, so this is O(capacity) per entry.
    #[cfg(any(test, feature = "stats"))]
    fn probe_length(&self, key: i32, position: usize) -> usize {
        let capacity = self.slots.len();
        let step = self.second_hash(key);
        let mut current = self.first_hash(key);
        let mut steps = 0;
        while current != position && steps < capacity {
            current = (current + step) % capacity;
            steps += 1;
        }
        steps
    }

    /// Computes a histogram of probe lengths for the current table state.
    ///
    /// Index `d` of the result counts the entries stored `d` probe steps
    /// from their home slot; index 0 counts entries sitting in their home
    /// slot. The result has `longest_probe + 1` bins, or none for an empty
    /// table.
    ///
    /// Each entry's chain is re-walked, so this costs O(len * capacity) in
    /// the worst case. Meant for debugging, not hot paths.
    #[cfg(any(test, feature = "stats"))]
    pub fn probe_histogram(&self) -> alloc::vec::Vec<usize> {
        let mut hist = alloc::vec::Vec::new();
        for (position, slot) in self.slots.iter().enumerate() {
            if let Some(entry) = slot {
                let length = self.probe_length(entry.key, position);
                if hist.len() <= length {
                    hist.resize(length + 1, 0);
                }
                hist[length] += 1;
            }
        }
        hist
    }

    /// Returns probe statistics for debugging.
    #[cfg(any(test, feature = "stats"))]
    pub fn debug_stats(&self) -> DebugStats {
        DebugStats {
            populated: self.populated,
            capacity: self.slots.len(),
            prime_for_hash: self.prime_for_hash,
            load_factor: self.populated as f64 / self.slots.len() as f64,
            longest_probe: self.probe_histogram().len().saturating_sub(1),
            total_bytes: core::mem::size_of_val(&*self.slots),
        }
    }

    /// Pretty-prints the probe-length histogram horizontally using stdout.
    #[cfg(all(any(test, feature = "stats"), feature = "std"))]
    pub fn print_probe_histogram(&self) {
        let hist = self.probe_histogram();
        let max = hist.iter().copied().max().unwrap_or(0);
        if max == 0 {
            println!("probe histogram: empty");
            return;
        }

        let max_bar = 60usize;
        println!("probe histogram ({} entries):", self.populated);
        for (length, &count) in hist.iter().enumerate() {
            let bar = "█".repeat((count * max_bar).div_ceil(max));
            println!("{length:>3} | {bar} ({count})");
        }
    }
}

impl ProbingTable for DoubleHashingTable {
    fn contains_key(&self, key: i32) -> bool {
        DoubleHashingTable::contains_key(self, key)
    }

    fn put(&mut self, key: i32, value: i64) -> bool {
        DoubleHashingTable::put(self, key, value)
    }

    fn get(&self, key: i32) -> Result<i64> {
        DoubleHashingTable::get(self, key)
    }

    fn len(&self) -> usize {
        DoubleHashingTable::len(self)
    }
}
