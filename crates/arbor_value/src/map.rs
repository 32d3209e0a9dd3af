use alloc::string::String;
use alloc::vec::Vec;
use core::fmt;
use core::hash::BuildHasher;
use core::iter::FusedIterator;

use foldhash::fast::FixedState;
use hashbrown::HashTable;

use crate::Value;

/// Fixed seed, so that key hashes do not depend on process state.
const KEY_HASH_STATE: FixedState = FixedState::with_seed(0x2D35_8DCC_AA6C_78A5);

#[inline]
fn hash_key(key: &str) -> u64 {
    KEY_HASH_STATE.hash_one(key)
}

// -----------------------------------------------------------------------------
// ValueMap

/// An insertion-ordered map from `String` to [`Value`].
///
/// Entries are kept in a vector, a hash table of indices provides lookup.
/// Iteration, serialization and equality all follow insertion order.
///
/// # Examples
///
/// ```
/// use arbor_value::{Value, ValueMap};
///
/// let mut map = ValueMap::new();
/// map.insert("z", 1);
/// map.insert("a", 2);
///
/// // Replacing keeps the original slot.
/// assert_eq!(map.insert("z", 3), Some(Value::from(1)));
///
/// let keys: Vec<&str> = map.keys().collect();
/// assert_eq!(keys, ["z", "a"]);
/// ```
#[derive(Clone, Default)]
pub struct ValueMap {
    entries: Vec<(String, Value)>,
    indices: HashTable<usize>,
}

impl ValueMap {
    /// Creates an empty map.
    #[inline]
    pub const fn new() -> Self {
        Self {
            entries: Vec::new(),
            indices: HashTable::new(),
        }
    }

    /// Creates an empty map with space for at least `capacity` entries.
    #[inline]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: Vec::with_capacity(capacity),
            indices: HashTable::with_capacity(capacity),
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn index_of(&self, key: &str) -> Option<usize> {
        let entries = &self.entries;
        self.indices
            .find(hash_key(key), |&idx| entries[idx].0 == key)
            .copied()
    }

    /// Inserts a key-value pair.
    ///
    /// If the key already exists, its value is replaced in place (the entry
    /// keeps its position) and the old value is returned.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) -> Option<Value> {
        let key = key.into();
        let value = value.into();
        match self.index_of(&key) {
            Some(idx) => Some(core::mem::replace(&mut self.entries[idx].1, value)),
            None => {
                let idx = self.entries.len();
                let entries = &self.entries;
                self.indices
                    .insert_unique(hash_key(&key), idx, |&i| hash_key(&entries[i].0));
                self.entries.push((key, value));
                None
            }
        }
    }

    #[inline]
    pub fn contains_key(&self, key: &str) -> bool {
        self.index_of(key).is_some()
    }

    #[inline]
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.index_of(key).map(|idx| &self.entries[idx].1)
    }

    #[inline]
    pub fn get_mut(&mut self, key: &str) -> Option<&mut Value> {
        self.index_of(key).map(|idx| &mut self.entries[idx].1)
    }

    /// Returns the entry at `index` in insertion order.
    #[inline]
    pub fn get_index(&self, index: usize) -> Option<(&str, &Value)> {
        self.entries.get(index).map(|(k, v)| (k.as_str(), v))
    }

    /// Removes a key, returning its value.
    ///
    /// The relative order of the remaining entries is preserved.
    pub fn remove(&mut self, key: &str) -> Option<Value> {
        let entries = &self.entries;
        let found = self
            .indices
            .find_entry(hash_key(key), |&idx| entries[idx].0 == key);
        let idx = match found {
            Ok(entry) => entry.remove().0,
            Err(_) => return None,
        };
        for slot in self.indices.iter_mut() {
            if *slot > idx {
                *slot -= 1;
            }
        }
        Some(self.entries.remove(idx).1)
    }

    pub fn clear(&mut self) {
        self.entries.clear();
        self.indices.clear();
    }

    pub fn keys(&self) -> impl DoubleEndedIterator<Item = &str> + ExactSizeIterator {
        self.entries.iter().map(|(k, _)| k.as_str())
    }

    pub fn values(&self) -> impl DoubleEndedIterator<Item = &Value> + ExactSizeIterator {
        self.entries.iter().map(|(_, v)| v)
    }

    pub fn values_mut(&mut self) -> impl DoubleEndedIterator<Item = &mut Value> + ExactSizeIterator {
        self.entries.iter_mut().map(|(_, v)| v)
    }

    #[inline]
    pub fn iter(&self) -> Iter<'_> {
        Iter(self.entries.iter())
    }
}

impl PartialEq for ValueMap {
    /// Order-sensitive: two maps with the same entries in a different order are not equal.
    #[inline]
    fn eq(&self, other: &Self) -> bool {
        self.entries == other.entries
    }
}

impl fmt::Debug for ValueMap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for ValueMap {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut map = Self::new();
        map.extend(iter);
        map
    }
}

impl<K: Into<String>, V: Into<Value>> Extend<(K, V)> for ValueMap {
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (k, v) in iter {
            self.insert(k, v);
        }
    }
}

// -----------------------------------------------------------------------------
// Iterators

/// Borrowing iterator over a [`ValueMap`], in insertion order.
pub struct Iter<'a>(core::slice::Iter<'a, (String, Value)>);

impl<'a> Iterator for Iter<'a> {
    type Item = (&'a str, &'a Value);

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        self.0.next().map(|(k, v)| (k.as_str(), v))
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        self.0.size_hint()
    }
}

impl DoubleEndedIterator for Iter<'_> {
    #[inline]
    fn next_back(&mut self) -> Option<Self::Item> {
        self.0.next_back().map(|(k, v)| (k.as_str(), v))
    }
}

impl ExactSizeIterator for Iter<'_> {}
impl FusedIterator for Iter<'_> {}

/// Owning iterator over a [`ValueMap`], in insertion order.
pub struct IntoIter(alloc::vec::IntoIter<(String, Value)>);

impl Iterator for IntoIter {
    type Item = (String, Value);

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        self.0.next()
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        self.0.size_hint()
    }
}

impl DoubleEndedIterator for IntoIter {
    #[inline]
    fn next_back(&mut self) -> Option<Self::Item> {
        self.0.next_back()
    }
}

impl ExactSizeIterator for IntoIter {}
impl FusedIterator for IntoIter {}

impl IntoIterator for ValueMap {
    type Item = (String, Value);
    type IntoIter = IntoIter;

    #[inline]
    fn into_iter(self) -> IntoIter {
        IntoIter(self.entries.into_iter())
    }
}

impl<'a> IntoIterator for &'a ValueMap {
    type Item = (&'a str, &'a Value);
    type IntoIter = Iter<'a>;

    #[inline]
    fn into_iter(self) -> Iter<'a> {
        self.iter()
    }
}

// -----------------------------------------------------------------------------
// Tests
