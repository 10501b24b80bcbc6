use core::fmt::Debug;
use core::hash::BuildHasher;
use core::hash::Hash;
use core::iter::FusedIterator;

use crate::config::TableConfig;
use crate::error::Result;
use crate::probing_table;
use crate::probing_table::KeyCursor;
use crate::probing_table::ProbingTable;

/// A hash set backed by a [`ProbingTable`] with unit values.
///
/// Membership tests through [`contains`](Self::contains) relocate elements
/// into earlier tombstones exactly like [`ProbingTable::get`].
#[derive(Clone)]
pub struct ProbingSet<T, S> {
    table: ProbingTable<T, (), S>,
}

impl<T, S> PartialEq for ProbingSet<T, S>
where
    T: Hash + Eq,
    S: BuildHasher,
{
    fn eq(&self, other: &Self) -> bool {
        if self.len() != other.len() {
            return false;
        }
        self.iter().all(|v| other.table.peek(v).is_some())
    }
}

impl<T, S> Eq for ProbingSet<T, S>
where
    T: Hash + Eq,
    S: BuildHasher,
{
}

impl<T, S> Debug for ProbingSet<T, S>
where
    T: Debug,
{
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

impl<T, S> ProbingSet<T, S> {
    /// Returns the number of elements in the set.
    pub fn len(&self) -> usize {
        self.table.len()
    }

    /// Returns `true` if the set contains no elements.
    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }

    /// Returns the number of slots in the underlying table.
    pub fn capacity(&self) -> usize {
        self.table.capacity()
    }

    /// Removes all elements from the set, keeping its capacity.
    pub fn clear(&mut self) {
        self.table.clear();
    }

    /// Returns an iterator over the elements in slot order.
    pub fn iter(&self) -> Iter<'_, T> {
        Iter {
            inner: self.table.iter(),
        }
    }

    /// Creates a fail-fast cursor over the elements. See
    /// [`ProbingTable::cursor`].
    pub fn cursor(&self) -> KeyCursor {
        self.table.cursor()
    }

    /// Returns the underlying table, for use with [`KeyCursor`] steps.
    pub fn as_table(&self) -> &ProbingTable<T, (), S> {
        &self.table
    }
}

impl<T, S> ProbingSet<T, S>
where
    T: Hash + Eq,
    S: BuildHasher,
{
    /// Creates an empty set hashing with `hash_builder`.
    pub fn with_hasher(hash_builder: S) -> Self {
        Self {
            table: ProbingTable::with_hasher(hash_builder),
        }
    }

    /// Creates a set from `config`, hashing with `hash_builder`.
    pub fn with_config_and_hasher(config: TableConfig, hash_builder: S) -> Result<Self> {
        Ok(Self {
            table: ProbingTable::with_config_and_hasher(config, hash_builder)?,
        })
    }

    /// Adds a value to the set.
    ///
    /// Returns `true` if the value was not present. An equal value already in
    /// the set is kept.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use quad_hash::DefaultHashBuilder;
    /// use quad_hash::ProbingSet;
    ///
    /// let mut set: ProbingSet<&str, DefaultHashBuilder> = ProbingSet::new();
    /// assert!(set.insert("a"));
    /// assert!(!set.insert("a"));
    /// assert_eq!(set.len(), 1);
    /// ```
    pub fn insert(&mut self, value: T) -> bool {
        self.table.insert(value, ()).is_none()
    }

    /// Returns `true` if the set contains `value`, relocating it towards the
    /// start of its probe chain when a tombstone precedes it.
    pub fn contains(&mut self, value: &T) -> bool {
        self.table.contains_key(value)
    }

    /// Removes `value`, returning whether it was present.
    pub fn remove(&mut self, value: &T) -> bool {
        self.table.remove(value).is_some()
    }

    /// Removes and returns the stored value equal to `value`, if any.
    pub fn take(&mut self, value: &T) -> Option<T> {
        self.table.remove_entry(value).map(|(v, _)| v)
    }

    /// Returns `true` if `self` has no elements in common with `other`.
    pub fn is_disjoint(&self, other: &ProbingSet<T, S>) -> bool {
        self.iter().all(|v| other.table.peek(v).is_none())
    }

    /// Returns `true` if every element of `self` is in `other`.
    pub fn is_subset(&self, other: &ProbingSet<T, S>) -> bool {
        self.len() <= other.len() && self.iter().all(|v| other.table.peek(v).is_some())
    }
}

impl<T, S> ProbingSet<T, S>
where
    T: Hash + Eq,
    S: BuildHasher + Default,
{
    /// Creates an empty set with the default configuration.
    pub fn new() -> Self {
        Self::with_hasher(S::default())
    }

    /// Creates a set from `config` using the default hasher builder.
    pub fn with_config(config: TableConfig) -> Result<Self> {
        Self::with_config_and_hasher(config, S::default())
    }
}

impl<T, S> Default for ProbingSet<T, S>
where
    T: Hash + Eq,
    S: BuildHasher + Default,
{
    fn default() -> Self {
        Self::new()
    }
}

/// An iterator over the elements of a [`ProbingSet`].
pub struct Iter<'a, T> {
    inner: probing_table::Iter<'a, T, ()>,
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|(v, _)| v)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<T> ExactSizeIterator for Iter<'_, T> {}

impl<T> FusedIterator for Iter<'_, T> {}

/// An owning iterator over the elements of a [`ProbingSet`].
pub struct IntoIter<T> {
    inner: probing_table::IntoIter<T, ()>,
}

impl<T> Iterator for IntoIter<T> {
    type Item = T;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|(v, _)| v)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<T> ExactSizeIterator for IntoIter<T> {}

impl<T> FusedIterator for IntoIter<T> {}

impl<T, S> IntoIterator for ProbingSet<T, S> {
    type Item = T;
    type IntoIter = IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        IntoIter {
            inner: self.table.into_iter(),
        }
    }
}

impl<'a, T, S> IntoIterator for &'a ProbingSet<T, S> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<T, S> FromIterator<T> for ProbingSet<T, S>
where
    T: Hash + Eq,
    S: BuildHasher + Default,
{
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut set = Self::new();
        set.extend(iter);
        set
    }
}

impl<T, S> Extend<T> for ProbingSet<T, S>
where
    T: Hash + Eq,
    S: BuildHasher,
{
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for value in iter {
            self.insert(value);
        }
    }
}

#[cfg(test)]
mod tests {
    use alloc::format;
    use alloc::string::String;
    use alloc::string::ToString;
    use alloc::vec;
    use alloc::vec::Vec;

    use rand::TryRngCore;
    use rand::rngs::OsRng;
    use siphasher::sip::SipHasher;

    use super::*;
    use crate::error::TableError;

    #[derive(Clone)]
    struct SipHashBuilder {
        k1: u64,
        k2: u64,
    }

    impl BuildHasher for SipHashBuilder {
        type Hasher = SipHasher;

        fn build_hasher(&self) -> Self::Hasher {
            SipHasher::new_with_keys(self.k1, self.k2)
        }
    }

    impl Default for SipHashBuilder {
        fn default() -> Self {
            let mut rng = OsRng;
            Self {
                k1: rng.try_next_u64().unwrap_or(0),
                k2: rng.try_next_u64().unwrap_or(0),
            }
        }
    }

    #[test]
    fn test_insert_and_contains() {
        let mut set = ProbingSet::with_hasher(SipHashBuilder::default());

        assert!(set.insert(1));
        assert!(set.insert(2));
        assert!(!set.insert(1));

        assert_eq!(set.len(), 2);
        assert!(set.contains(&1));
        assert!(set.contains(&2));
        assert!(!set.contains(&3));
    }

    #[test]
    fn test_remove_and_take() {
        let mut set = ProbingSet::with_hasher(SipHashBuilder::default());
        set.insert("hello".to_string());
        set.insert("world".to_string());

        assert!(set.remove(&"hello".to_string()));
        assert!(!set.remove(&"hello".to_string()));
        assert_eq!(set.take(&"world".to_string()), Some("world".to_string()));
        assert_eq!(set.take(&"world".to_string()), None);
        assert!(set.is_empty());
    }

    #[test]
    fn test_clear() {
        let mut set: ProbingSet<u32, SipHashBuilder> = (0..10).collect();
        assert_eq!(set.len(), 10);
        set.clear();
        assert!(set.is_empty());
        assert!(!set.contains(&3));
    }

    #[test]
    fn test_collision_handling() {
        let mut set = ProbingSet::with_hasher(SipHashBuilder::default());
        for i in 0..1000 {
            assert!(set.insert(i));
        }

        for i in (0..1000).step_by(2) {
            assert!(set.remove(&i));
        }

        assert_eq!(set.len(), 500);
        for i in (1..1000).step_by(2) {
            assert!(set.contains(&i));
        }
        for i in (0..1000).step_by(2) {
            assert!(!set.contains(&i));
        }
    }

    #[test]
    fn test_iterators() {
        let set: ProbingSet<u32, SipHashBuilder> = vec![3, 1, 2].into_iter().collect();

        let mut borrowed: Vec<u32> = set.iter().copied().collect();
        borrowed.sort();
        assert_eq!(borrowed, vec![1, 2, 3]);
        assert_eq!((&set).into_iter().count(), 3);

        let mut owned: Vec<u32> = set.into_iter().collect();
        owned.sort();
        assert_eq!(owned, vec![1, 2, 3]);
    }

    #[test]
    fn test_iterators_are_exact_and_fused() {
        let set: ProbingSet<u32, SipHashBuilder> = (0..4).collect();

        let mut iter = set.iter();
        assert_eq!(iter.len(), 4);
        iter.next();
        assert_eq!(iter.len(), 3);
        assert_eq!(iter.by_ref().count(), 3);
        assert_eq!(iter.next(), None);
        assert_eq!(iter.next(), None);

        let mut owned = set.into_iter();
        assert_eq!(owned.len(), 4);
        assert_eq!(owned.by_ref().count(), 4);
        assert_eq!(owned.len(), 0);
        assert_eq!(owned.next(), None);
    }

    #[test]
    fn test_equality_and_subsets() {
        let a: ProbingSet<u32, SipHashBuilder> = (0..5).collect();
        let b: ProbingSet<u32, SipHashBuilder> = (0..5).rev().collect();
        let c: ProbingSet<u32, SipHashBuilder> = (0..3).collect();
        let d: ProbingSet<u32, SipHashBuilder> = (10..13).collect();

        assert_eq!(a, b);
        assert_ne!(a, c);
        assert!(c.is_subset(&a));
        assert!(!a.is_subset(&c));
        assert!(a.is_disjoint(&d));
        assert!(!a.is_disjoint(&c));
    }

    #[test]
    fn test_cursor_fails_fast() {
        let mut set: ProbingSet<u32, SipHashBuilder> = (0..4).collect();

        let mut cursor = set.cursor();
        assert!(cursor.next(set.as_table()).unwrap().is_some());
        assert!(set.contains(&2));
        assert!(cursor.next(set.as_table()).is_ok());

        set.insert(9);
        assert_eq!(
            cursor.next(set.as_table()),
            Err(TableError::ConcurrentModification)
        );
    }

    #[test]
    fn test_with_config() {
        let config = TableConfig::default().with_initial_capacity(100);
        let set = ProbingSet::<String, SipHashBuilder>::with_config(config).unwrap();
        assert_eq!(set.capacity(), 128);

        let config = TableConfig::default().with_initial_capacity(0);
        assert!(ProbingSet::<String, SipHashBuilder>::with_config(config).is_err());
    }

    #[test]
    fn test_debug() {
        let mut set = ProbingSet::with_hasher(SipHashBuilder::default());
        set.insert(String::from("only"));
        assert_eq!(format!("{set:?}"), r#"{"only"}"#);
    }
}
