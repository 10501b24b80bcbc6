use alloc::vec::Vec;
use core::fmt::Debug;
use core::hash::BuildHasher;
use core::hash::Hash;
use core::iter::FusedIterator;
use core::mem;

use crate::config::TableConfig;
use crate::config::threshold_for;
use crate::error::Result;
use crate::error::TableError;

/// State of a single bucket.
///
/// Deleted buckets keep a `Tombstone` so that probes for other keys continue
/// past them. Only a rehash turns tombstones back into `Empty` slots.
#[derive(Clone)]
enum Slot<K, V> {
    Empty,
    Tombstone,
    Occupied(K, V),
}

fn empty_slots<K, V>(capacity: usize) -> Vec<Slot<K, V>> {
    let mut slots = Vec::with_capacity(capacity);
    slots.resize_with(capacity, || Slot::Empty);
    slots
}

/// Triangular probe sequence over a power-of-two table.
///
/// Yields `(home + P(i)) mod capacity` for `i` in `0..capacity`, where
/// `P(i) = (i * i + i) / 2`. With a power-of-two capacity these offsets hit
/// every slot exactly once, so the iterator ends after one full pass.
struct ProbeSeq {
    pos: usize,
    stride: usize,
    mask: usize,
}

impl ProbeSeq {
    #[inline(always)]
    fn new(hash: u64, capacity: usize) -> Self {
        debug_assert!(capacity.is_power_of_two());
        let mask = capacity - 1;
        Self {
            pos: hash as usize & mask,
            stride: 0,
            mask,
        }
    }
}

impl Iterator for ProbeSeq {
    type Item = usize;

    #[inline(always)]
    fn next(&mut self) -> Option<usize> {
        if self.stride > self.mask {
            return None;
        }

        let pos = self.pos;
        self.stride += 1;
        self.pos = (self.pos + self.stride) & self.mask;
        Some(pos)
    }
}

/// Outcome of walking a key's probe sequence.
///
/// `tombstone` is the first tombstone passed before the walk stopped.
enum Probe {
    Found {
        index: usize,
        tombstone: Option<usize>,
    },
    Vacant {
        empty: Option<usize>,
        tombstone: Option<usize>,
    },
}

/// Debug statistics for hash table analysis.
///
/// Available with the `stats` feature.
#[cfg(any(test, feature = "stats"))]
#[derive(Debug, Clone)]
pub struct DebugStats {
    /// Number of live entries
    pub populated: usize,
    /// Occupied plus tombstoned slots
    pub used_buckets: usize,
    /// Slots holding a tombstone
    pub tombstones: usize,
    /// Total number of slots allocated
    pub capacity: usize,
    /// Used-bucket count that triggers the next rehash
    pub threshold: usize,
    /// Configured load factor
    pub load_factor: f64,
    /// Slot utilization (used_buckets / capacity)
    pub occupancy: f64,
    /// Structural modifications since construction
    pub modifications: u64,
}

#[cfg(any(test, feature = "stats"))]
impl DebugStats {
    /// Pretty-print the debug statistics.
    #[cfg(feature = "std")]
    pub fn print(&self) {
        println!("=== Probing Table Debug Statistics ===");
        println!(
            "Population: {}/{} slots ({} tombstones)",
            self.populated, self.capacity, self.tombstones
        );
        println!(
            "Used Buckets: {}/{} ({:.2}% occupancy, rehash at {} with load factor {})",
            self.used_buckets,
            self.capacity,
            self.occupancy * 100.0,
            self.threshold,
            self.load_factor
        );
        println!("Modifications: {}", self.modifications);
    }
}

/// An open-addressing hash table with triangular quadratic probing.
///
/// `ProbingTable<K, V, S>` maps keys implementing `Hash + Eq` to values of
/// any type, hashing keys with the [`BuildHasher`] `S`. All entries live in a
/// single power-of-two array of slots. Removal leaves a tombstone behind, and
/// the table grows (doubling, and purging every tombstone) once the number of
/// occupied plus tombstoned slots reaches `capacity * load_factor`.
///
/// Lookups through [`get`](Self::get) take `&mut self`: when a probe passes a
/// tombstone before finding its key, the entry is moved into that tombstone,
/// shortening the probe chain for the next lookup. Use
/// [`peek`](Self::peek) to read through a shared reference without moving
/// anything.
///
/// ## Example
///
/// ```rust
/// use quad_hash::DefaultHashBuilder;
/// use quad_hash::ProbingTable;
///
/// let mut table: ProbingTable<&str, u32, DefaultHashBuilder> = ProbingTable::new();
/// assert_eq!(table.insert("apples", 3), None);
/// assert_eq!(table.insert("pears", 5), None);
/// assert_eq!(table.insert("apples", 4), Some(3));
///
/// assert_eq!(table.get(&"apples"), Some(&4));
/// assert_eq!(table.remove(&"pears"), Some(5));
/// assert_eq!(table.len(), 1);
/// ```
#[derive(Clone)]
pub struct ProbingTable<K, V, S> {
    slots: Vec<Slot<K, V>>,

    load_factor: f64,
    threshold: usize,

    populated: usize,
    used: usize,
    modifications: u64,

    hash_builder: S,
}

impl<K, V, S> Debug for ProbingTable<K, V, S>
where
    K: Debug,
    V: Debug,
{
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

impl<K, V, S> ProbingTable<K, V, S> {
    /// Returns the number of live entries.
    pub fn len(&self) -> usize {
        self.populated
    }

    /// Returns `true` if the table holds no live entries.
    pub fn is_empty(&self) -> bool {
        self.populated == 0
    }

    /// Returns the number of slots, always a power of two of at least 8.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use quad_hash::DefaultHashBuilder;
    /// use quad_hash::ProbingTable;
    ///
    /// let table: ProbingTable<u64, u64, DefaultHashBuilder> =
    ///     ProbingTable::with_capacity(10).unwrap();
    /// assert_eq!(table.capacity(), 16);
    /// ```
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// Number of used buckets at which the next insert grows the table.
    pub fn threshold(&self) -> usize {
        self.threshold
    }

    /// Returns the configured load factor.
    pub fn load_factor(&self) -> f64 {
        self.load_factor
    }

    /// Returns the number of slots that are occupied or hold a tombstone.
    ///
    /// This count is what the growth threshold is compared against. It does
    /// not go down on removal, so heavy insert/remove churn eventually
    /// triggers a rehash that reclaims the tombstones.
    pub fn used_buckets(&self) -> usize {
        self.used
    }

    /// Returns the number of slots holding a tombstone.
    pub fn tombstones(&self) -> usize {
        self.used - self.populated
    }

    /// Removes every entry, keeping the current capacity.
    ///
    /// All slots become empty, including tombstones. Outstanding
    /// [`KeyCursor`]s are invalidated.
    pub fn clear(&mut self) {
        self.slots.fill_with(|| Slot::Empty);
        self.populated = 0;
        self.used = 0;
        self.modifications += 1;
    }

    /// Returns an iterator over `(&K, &V)` pairs in slot order.
    pub fn iter(&self) -> Iter<'_, K, V> {
        Iter {
            slots: self.slots.iter(),
            remaining: self.populated,
        }
    }

    /// Collects references to every live key, in slot order.
    pub fn keys(&self) -> Vec<&K> {
        let mut keys = Vec::with_capacity(self.populated);
        keys.extend(self.iter().map(|(k, _)| k));
        keys
    }

    /// Collects references to every live value, in slot order.
    pub fn values(&self) -> Vec<&V> {
        let mut values = Vec::with_capacity(self.populated);
        values.extend(self.iter().map(|(_, v)| v));
        values
    }

    /// Creates a fail-fast cursor over the keys of this table.
    ///
    /// The cursor does not borrow the table. Each step takes the table as an
    /// argument and fails with [`TableError::ConcurrentModification`] if the
    /// table was inserted into, removed from, cleared or rehashed since the
    /// cursor was created.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use quad_hash::DefaultHashBuilder;
    /// use quad_hash::ProbingTable;
    /// use quad_hash::TableError;
    ///
    /// let mut table: ProbingTable<u32, &str, DefaultHashBuilder> = ProbingTable::new();
    /// table.insert(1, "one");
    ///
    /// let mut cursor = table.cursor();
    /// table.insert(2, "two");
    /// assert_eq!(cursor.next(&table), Err(TableError::ConcurrentModification));
    /// ```
    pub fn cursor(&self) -> KeyCursor {
        KeyCursor {
            expected_modifications: self.modifications,
            index: 0,
        }
    }

    #[inline(always)]
    fn occupied(&self, index: usize) -> (&K, &V) {
        match &self.slots[index] {
            Slot::Occupied(key, value) => (key, value),
            _ => unreachable!("probe resolved to a slot without an entry"),
        }
    }

    #[inline(always)]
    fn occupied_mut(&mut self, index: usize) -> &mut V {
        match &mut self.slots[index] {
            Slot::Occupied(_, value) => value,
            _ => unreachable!("probe resolved to a slot without an entry"),
        }
    }

    /// Moves the entry at `index` out, leaving a tombstone.
    #[inline(always)]
    fn take_occupied(&mut self, index: usize) -> (K, V) {
        match mem::replace(&mut self.slots[index], Slot::Tombstone) {
            Slot::Occupied(key, value) => (key, value),
            _ => unreachable!("probe resolved to a slot without an entry"),
        }
    }
}

impl<K, V, S> ProbingTable<K, V, S>
where
    K: Hash + Eq,
    S: BuildHasher,
{
    /// Creates a table from `config`, hashing keys with `hash_builder`.
    ///
    /// Fails with [`TableError::InvalidConfig`] if the capacity is zero or
    /// the load factor is not a finite positive number.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use quad_hash::DefaultHashBuilder;
    /// use quad_hash::ProbingTable;
    /// use quad_hash::TableConfig;
    ///
    /// let config = TableConfig::default().with_initial_capacity(3);
    /// let table: ProbingTable<u64, u64, _> =
    ///     ProbingTable::with_config_and_hasher(config, DefaultHashBuilder::default()).unwrap();
    /// assert_eq!(table.capacity(), 8);
    /// assert_eq!(table.threshold(), 3);
    ///
    /// let config = TableConfig::default().with_load_factor(f64::NAN);
    /// assert!(
    ///     ProbingTable::<u64, u64, _>::with_config_and_hasher(config, DefaultHashBuilder::default())
    ///         .is_err()
    /// );
    /// ```
    pub fn with_config_and_hasher(config: TableConfig, hash_builder: S) -> Result<Self> {
        config.validate()?;
        let capacity = config.effective_capacity()?;

        Ok(Self {
            slots: empty_slots(capacity),
            load_factor: config.load_factor,
            threshold: threshold_for(capacity, config.load_factor),
            populated: 0,
            used: 0,
            modifications: 0,
            hash_builder,
        })
    }

    /// Creates a table with the default configuration (8 slots, load factor
    /// 0.45) and the given hasher builder.
    pub fn with_hasher(hash_builder: S) -> Self {
        let capacity = crate::config::MIN_CAPACITY;
        let load_factor = crate::config::DEFAULT_LOAD_FACTOR;

        Self {
            slots: empty_slots(capacity),
            load_factor,
            threshold: threshold_for(capacity, load_factor),
            populated: 0,
            used: 0,
            modifications: 0,
            hash_builder,
        }
    }

    /// Returns a reference to the table's hasher builder.
    pub fn hasher(&self) -> &S {
        &self.hash_builder
    }

    fn probe(&self, key: &K) -> Probe {
        let hash = self.hash_builder.hash_one(key);
        let mut tombstone = None;

        for index in ProbeSeq::new(hash, self.slots.len()) {
            match &self.slots[index] {
                Slot::Empty => {
                    return Probe::Vacant {
                        empty: Some(index),
                        tombstone,
                    };
                }
                Slot::Tombstone => {
                    tombstone.get_or_insert(index);
                }
                Slot::Occupied(k, _) => {
                    if k == key {
                        return Probe::Found { index, tombstone };
                    }
                }
            }
        }

        Probe::Vacant {
            empty: None,
            tombstone,
        }
    }

    /// Inserts a key-value pair into the table.
    ///
    /// Returns the previous value if the key was present; the stored key is
    /// kept in that case. If the probe for the key passed a tombstone, the
    /// entry is written into the first such tombstone instead of its current
    /// slot.
    ///
    /// The table grows before probing once the used-bucket count reaches the
    /// threshold.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use quad_hash::DefaultHashBuilder;
    /// use quad_hash::ProbingTable;
    ///
    /// let mut table: ProbingTable<u32, &str, DefaultHashBuilder> = ProbingTable::new();
    /// for key in 0..4 {
    ///     table.insert(key, "value");
    /// }
    /// assert_eq!(table.capacity(), 16);
    /// assert_eq!(table.threshold(), 7);
    /// ```
    pub fn insert(&mut self, key: K, value: V) -> Option<V> {
        if self.used >= self.threshold {
            self.grow();
        }

        loop {
            match self.probe(&key) {
                Probe::Found {
                    index,
                    tombstone: None,
                } => {
                    self.modifications += 1;
                    return Some(mem::replace(self.occupied_mut(index), value));
                }
                Probe::Found {
                    index,
                    tombstone: Some(tombstone),
                } => {
                    log::trace!("moving updated entry from slot {index} to tombstone {tombstone}");
                    let (stored_key, old_value) = self.take_occupied(index);
                    self.slots[tombstone] = Slot::Occupied(stored_key, value);
                    self.modifications += 1;
                    return Some(old_value);
                }
                Probe::Vacant {
                    tombstone: Some(tombstone),
                    ..
                } => {
                    self.slots[tombstone] = Slot::Occupied(key, value);
                    self.populated += 1;
                    self.modifications += 1;
                    return None;
                }
                Probe::Vacant {
                    empty: Some(empty),
                    tombstone: None,
                } => {
                    self.slots[empty] = Slot::Occupied(key, value);
                    self.used += 1;
                    self.populated += 1;
                    self.modifications += 1;
                    return None;
                }
                // Every slot is live; only reachable with load factors >= 1.
                Probe::Vacant {
                    empty: None,
                    tombstone: None,
                } => self.grow(),
            }
        }
    }

    /// Probes for `key`, moving the entry into the first tombstone passed on
    /// the way. Returns the entry's final slot.
    fn find_and_compact(&mut self, key: &K) -> Option<usize> {
        match self.probe(key) {
            Probe::Found {
                index,
                tombstone: None,
            } => Some(index),
            Probe::Found {
                index,
                tombstone: Some(tombstone),
            } => {
                log::trace!("relocating entry from slot {index} to tombstone {tombstone}");
                self.slots.swap(index, tombstone);
                Some(tombstone)
            }
            Probe::Vacant { .. } => None,
        }
    }

    /// Returns a reference to the value stored for `key`.
    ///
    /// If the probe passed a tombstone before reaching the key, the entry is
    /// relocated into that tombstone first. Relocation does not count as a
    /// modification: outstanding [`KeyCursor`]s stay valid.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use quad_hash::DefaultHashBuilder;
    /// use quad_hash::ProbingTable;
    ///
    /// let mut table: ProbingTable<u32, &str, DefaultHashBuilder> = ProbingTable::new();
    /// table.insert(1, "a");
    /// assert_eq!(table.get(&1), Some(&"a"));
    /// assert_eq!(table.get(&2), None);
    /// ```
    pub fn get(&mut self, key: &K) -> Option<&V> {
        let index = self.find_and_compact(key)?;
        Some(self.occupied(index).1)
    }

    /// Returns a mutable reference to the value stored for `key`, relocating
    /// the entry like [`get`](Self::get).
    pub fn get_mut(&mut self, key: &K) -> Option<&mut V> {
        let index = self.find_and_compact(key)?;
        Some(self.occupied_mut(index))
    }

    /// Returns `true` if the table holds `key`. Relocates like
    /// [`get`](Self::get).
    pub fn contains_key(&mut self, key: &K) -> bool {
        self.find_and_compact(key).is_some()
    }

    /// Returns a reference to the value stored for `key` without relocating
    /// anything.
    pub fn peek(&self, key: &K) -> Option<&V> {
        match self.probe(key) {
            Probe::Found { index, .. } => Some(self.occupied(index).1),
            Probe::Vacant { .. } => None,
        }
    }

    /// Removes `key`, returning its value if it was present.
    ///
    /// The slot becomes a tombstone and keeps counting towards the used
    /// buckets until the next rehash.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use quad_hash::DefaultHashBuilder;
    /// use quad_hash::ProbingTable;
    ///
    /// let mut table: ProbingTable<u32, &str, DefaultHashBuilder> = ProbingTable::new();
    /// table.insert(1, "a");
    /// assert_eq!(table.remove(&1), Some("a"));
    /// assert_eq!(table.remove(&1), None);
    /// assert_eq!(table.tombstones(), 1);
    /// ```
    pub fn remove(&mut self, key: &K) -> Option<V> {
        self.remove_entry(key).map(|(_, v)| v)
    }

    /// Removes `key`, returning the stored key and value if it was present.
    pub fn remove_entry(&mut self, key: &K) -> Option<(K, V)> {
        let Probe::Found { index, .. } = self.probe(key) else {
            return None;
        };

        let entry = self.take_occupied(index);
        self.populated -= 1;
        self.modifications += 1;
        Some(entry)
    }

    /// Inserts with a key that may be missing.
    ///
    /// Fails with [`TableError::InvalidArgument`] on `None`, leaving the
    /// table untouched.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use quad_hash::DefaultHashBuilder;
    /// use quad_hash::ProbingTable;
    /// use quad_hash::TableError;
    ///
    /// let mut table: ProbingTable<String, u32, DefaultHashBuilder> = ProbingTable::new();
    /// assert_eq!(table.try_insert(None, 1), Err(TableError::InvalidArgument));
    /// assert_eq!(table.try_insert(Some("a".to_string()), 1), Ok(None));
    /// assert_eq!(table.len(), 1);
    /// ```
    pub fn try_insert(&mut self, key: Option<K>, value: V) -> Result<Option<V>> {
        let key = key.ok_or(TableError::InvalidArgument)?;
        Ok(self.insert(key, value))
    }

    /// Looks up a key that may be missing. See [`try_insert`](Self::try_insert).
    pub fn try_get(&mut self, key: Option<&K>) -> Result<Option<&V>> {
        let key = key.ok_or(TableError::InvalidArgument)?;
        Ok(self.get(key))
    }

    /// Removes a key that may be missing. See [`try_insert`](Self::try_insert).
    pub fn try_remove(&mut self, key: Option<&K>) -> Result<Option<V>> {
        let key = key.ok_or(TableError::InvalidArgument)?;
        Ok(self.remove(key))
    }

    /// Doubles the capacity and rehashes.
    ///
    /// The threshold is only consulted at the top of `insert`, so a table
    /// whose threshold is still below its live count after doubling keeps
    /// growing one step per insert.
    #[cold]
    fn grow(&mut self) {
        let capacity = self.capacity().checked_mul(2).expect("capacity overflow");
        self.rehash(capacity);
    }

    fn rehash(&mut self, capacity: usize) {
        log::debug!(
            "rehashing probing table from {} to {} slots ({} live, {} tombstones)",
            self.capacity(),
            capacity,
            self.populated,
            self.tombstones()
        );

        let old_slots = mem::replace(&mut self.slots, empty_slots(capacity));
        self.threshold = threshold_for(capacity, self.load_factor);
        self.populated = 0;
        self.used = 0;

        for slot in old_slots {
            if let Slot::Occupied(key, value) = slot {
                self.place_fresh(key, value);
            }
        }

        self.modifications += 1;
    }

    /// Places an entry known to be absent into the first empty slot of its
    /// probe sequence. Only valid on a table without tombstones.
    fn place_fresh(&mut self, key: K, value: V) {
        let hash = self.hash_builder.hash_one(&key);
        let index = ProbeSeq::new(hash, self.slots.len())
            .find(|&index| matches!(self.slots[index], Slot::Empty))
            .unwrap_or_else(|| unreachable!("rehash target has no empty slot"));

        self.slots[index] = Slot::Occupied(key, value);
        self.used += 1;
        self.populated += 1;
    }

    /// Number of probe steps between the home slot of the entry at `index`
    /// and `index` itself.
    #[cfg(any(test, feature = "stats"))]
    fn probe_distance(&self, index: usize) -> usize {
        let (key, _) = self.occupied(index);
        let hash = self.hash_builder.hash_one(key);
        ProbeSeq::new(hash, self.slots.len())
            .position(|probe| probe == index)
            .unwrap_or_else(|| unreachable!("every slot lies on every probe sequence"))
    }

    /// Returns, for each probe distance, how many live entries sit that many
    /// steps from their home slot.
    #[cfg(any(test, feature = "stats"))]
    pub fn probe_histogram(&self) -> Vec<usize> {
        let mut histogram = Vec::new();
        for index in 0..self.slots.len() {
            if !matches!(self.slots[index], Slot::Occupied(..)) {
                continue;
            }

            let distance = self.probe_distance(index);
            if histogram.len() <= distance {
                histogram.resize(distance + 1, 0);
            }
            histogram[distance] += 1;
        }
        histogram
    }

    /// Snapshot of the table's bookkeeping.
    #[cfg(any(test, feature = "stats"))]
    pub fn debug_stats(&self) -> DebugStats {
        DebugStats {
            populated: self.populated,
            used_buckets: self.used,
            tombstones: self.tombstones(),
            capacity: self.capacity(),
            threshold: self.threshold,
            load_factor: self.load_factor,
            occupancy: self.used as f64 / self.capacity() as f64,
            modifications: self.modifications,
        }
    }
}

impl<K, V, S> ProbingTable<K, V, S>
where
    K: Hash + Eq,
    S: BuildHasher + Default,
{
    /// Creates an empty table with 8 slots and a load factor of 0.45.
    pub fn new() -> Self {
        Self::with_hasher(S::default())
    }

    /// Creates a table from `config` using the default hasher builder.
    pub fn with_config(config: TableConfig) -> Result<Self> {
        Self::with_config_and_hasher(config, S::default())
    }

    /// Creates a table with at least `capacity` slots and the default load
    /// factor. Fails with [`TableError::InvalidConfig`] on zero.
    pub fn with_capacity(capacity: usize) -> Result<Self> {
        Self::with_config(TableConfig::default().with_initial_capacity(capacity))
    }
}

impl<K, V, S> Default for ProbingTable<K, V, S>
where
    K: Hash + Eq,
    S: BuildHasher + Default,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<K, V, S> Extend<(K, V)> for ProbingTable<K, V, S>
where
    K: Hash + Eq,
    S: BuildHasher,
{
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (key, value) in iter {
            self.insert(key, value);
        }
    }
}

impl<K, V, S> FromIterator<(K, V)> for ProbingTable<K, V, S>
where
    K: Hash + Eq,
    S: BuildHasher + Default,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut table = Self::new();
        table.extend(iter);
        table
    }
}

impl<'a, K, V, S> IntoIterator for &'a ProbingTable<K, V, S> {
    type Item = (&'a K, &'a V);
    type IntoIter = Iter<'a, K, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<K, V, S> IntoIterator for ProbingTable<K, V, S> {
    type Item = (K, V);
    type IntoIter = IntoIter<K, V>;

    fn into_iter(self) -> Self::IntoIter {
        IntoIter {
            remaining: self.populated,
            slots: self.slots.into_iter(),
        }
    }
}

/// A fail-fast cursor over the keys of a [`ProbingTable`].
///
/// Created by [`ProbingTable::cursor`]. A cursor captures the table's
/// modification counter and compares it on every step; inserts, removals,
/// clears and rehashes make the next step fail with
/// [`TableError::ConcurrentModification`]. Lookups never invalidate a
/// cursor, but a lookup may move an entry to an earlier slot, so an entry
/// relocated behind the cursor while it is in flight is skipped.
/// [`has_next`](Self::has_next) always agrees with what
/// [`next`](Self::next) returns.
///
/// A cursor is single-pass and cannot be restarted; create a new one
/// instead.
#[derive(Debug, Clone)]
pub struct KeyCursor {
    expected_modifications: u64,
    index: usize,
}

impl KeyCursor {
    fn check<K, V, S>(&self, table: &ProbingTable<K, V, S>) -> Result<()> {
        if table.modifications != self.expected_modifications {
            return Err(TableError::ConcurrentModification);
        }
        Ok(())
    }

    /// Returns `true` if an occupied slot remains ahead of the cursor.
    pub fn has_next<K, V, S>(&self, table: &ProbingTable<K, V, S>) -> Result<bool> {
        self.check(table)?;
        let ahead = table.slots.get(self.index..).unwrap_or_default();
        Ok(ahead.iter().any(|slot| matches!(slot, Slot::Occupied(..))))
    }

    /// Advances to the next key.
    pub fn next<'a, K, V, S>(&mut self, table: &'a ProbingTable<K, V, S>) -> Result<Option<&'a K>> {
        self.check(table)?;

        while let Some(slot) = table.slots.get(self.index) {
            self.index += 1;
            if let Slot::Occupied(key, _) = slot {
                return Ok(Some(key));
            }
        }

        Ok(None)
    }

    /// Removal through a cursor is not supported; always fails with
    /// [`TableError::Unsupported`] and leaves the table untouched.
    pub fn remove<K, V, S>(&mut self, _table: &mut ProbingTable<K, V, S>) -> Result<()> {
        Err(TableError::Unsupported("remove through a key cursor"))
    }
}

/// An iterator over the entries of a [`ProbingTable`], in slot order.
///
/// This struct is created by the [`iter`] method on [`ProbingTable`].
///
/// [`iter`]: ProbingTable::iter
pub struct Iter<'a, K, V> {
    slots: core::slice::Iter<'a, Slot<K, V>>,
    remaining: usize,
}

impl<'a, K, V> Iterator for Iter<'a, K, V> {
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }

        for slot in self.slots.by_ref() {
            if let Slot::Occupied(key, value) = slot {
                self.remaining -= 1;
                return Some((key, value));
            }
        }

        None
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<K, V> ExactSizeIterator for Iter<'_, K, V> {}

impl<K, V> FusedIterator for Iter<'_, K, V> {}

/// An owning iterator over the entries of a [`ProbingTable`], in slot order.
pub struct IntoIter<K, V> {
    slots: alloc::vec::IntoIter<Slot<K, V>>,
    remaining: usize,
}

impl<K, V> Iterator for IntoIter<K, V> {
    type Item = (K, V);

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }

        for slot in self.slots.by_ref() {
            if let Slot::Occupied(key, value) = slot {
                self.remaining -= 1;
                return Some((key, value));
            }
        }

        None
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<K, V> ExactSizeIterator for IntoIter<K, V> {}

impl<K, V> FusedIterator for IntoIter<K, V> {}
