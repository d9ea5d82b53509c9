// the immutable ordered key -> value container
use indexmap::IndexMap;

use crate::core::error::ListError;
use crate::core::types::{Flags, Key, Value};
use crate::source::PairSource;

/// An immutable, order-preserving list of `Key -> Value` pairs.
///
/// Keys are unique and iteration follows construction order. Nothing ever
/// writes to a list after it is built: transformations produce a new list that
/// owns its own copy of the pairs and inherits this list's [`Flags`].
#[derive(Debug, Clone, Default)]
pub struct ArrayList {
    entries: IndexMap<Key, Value>,
    flags: Flags,
}

impl ArrayList {
    /// Builds a list from any pair source with the given iteration flags.
    ///
    /// A repeated key keeps the position of its first occurrence and the value
    /// of its last.
    pub fn new<S: PairSource>(source: S, flags: Flags) -> Self {
        let mut entries = IndexMap::new();
        for (key, value) in source.into_pairs() {
            entries.insert(key, value);
        }
        ArrayList { entries, flags }
    }

    pub fn from_source<S: PairSource>(source: S) -> Self {
        ArrayList::new(source, Flags::NONE)
    }

    /// Same pairs, different flags.
    pub fn with_flags(&self, flags: Flags) -> Self {
        ArrayList {
            entries: self.entries.clone(),
            flags,
        }
    }

    //every derived list goes through here so flags are never lost
    pub(crate) fn make(&self, entries: IndexMap<Key, Value>) -> Self {
        ArrayList {
            entries,
            flags: self.flags,
        }
    }

    pub(crate) fn make_list(&self, values: Vec<Value>) -> Self {
        self.make(sequential(values))
    }

    pub(crate) fn pairs(&self) -> &IndexMap<Key, Value> {
        &self.entries
    }

    pub fn flags(&self) -> Flags {
        self.flags
    }

    pub fn get(&self, key: impl Into<Key>) -> Result<&Value, ListError> {
        let key = key.into();
        self.entries.get(&key).ok_or(ListError::KeyNotFound(key))
    }

    pub fn has(&self, key: impl Into<Key>) -> bool {
        self.entries.contains_key(&key.into())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn size(&self) -> usize {
        self.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterates the pairs in order. Each call starts over from the first pair.
    pub fn entries(&self) -> impl Iterator<Item = (&Key, &Value)> + '_ {
        self.entries.iter()
    }

    pub fn keys_iter(&self) -> impl Iterator<Item = &Key> + '_ {
        self.entries.keys()
    }

    pub fn values_iter(&self) -> impl Iterator<Item = &Value> + '_ {
        self.entries.values()
    }

    /// An owned copy of the pairs, for comparison and interchange.
    pub fn to_mapping(&self) -> IndexMap<Key, Value> {
        self.entries.clone()
    }

    pub fn to_vec(&self) -> Vec<(Key, Value)> {
        self.entries
            .iter()
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect()
    }

    pub fn set(&self, _key: impl Into<Key>, _value: impl Into<Value>) -> Result<(), ListError> {
        Err(ListError::ImmutableViolation)
    }

    pub fn delete(&self, _key: impl Into<Key>) -> Result<(), ListError> {
        Err(ListError::ImmutableViolation)
    }

    /// The integer key an appended value would receive, or `None` once
    /// `i64::MAX` is taken.
    pub fn next_index(&self) -> Option<i64> {
        next_index(&self.entries)
    }

    /// True when the keys are exactly `0, 1, 2, ...` in order.
    pub fn is_list(&self) -> bool {
        self.entries
            .keys()
            .enumerate()
            .all(|(i, k)| *k == Key::Int(i as i64))
    }
}

pub(crate) fn next_index(entries: &IndexMap<Key, Value>) -> Option<i64> {
    entries
        .keys()
        .filter_map(Key::as_int)
        .max()
        .map_or(Some(0), |max| max.checked_add(1))
}

pub(crate) fn sequential(values: Vec<Value>) -> IndexMap<Key, Value> {
    values
        .into_iter()
        .enumerate()
        .map(|(i, v)| (Key::Int(i as i64), v))
        .collect()
}

//ordered comparison; IndexMap's own PartialEq ignores order
impl PartialEq for ArrayList {
    fn eq(&self, other: &Self) -> bool {
        self.entries.len() == other.entries.len() && self.entries.iter().eq(other.entries.iter())
    }
}

impl<'a> IntoIterator for &'a ArrayList {
    type Item = (&'a Key, &'a Value);
    type IntoIter = indexmap::map::Iter<'a, Key, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

impl IntoIterator for ArrayList {
    type Item = (Key, Value);
    type IntoIter = indexmap::map::IntoIter<Key, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

impl FromIterator<Value> for ArrayList {
    fn from_iter<I: IntoIterator<Item = Value>>(iter: I) -> Self {
        ArrayList {
            entries: sequential(iter.into_iter().collect()),
            flags: Flags::NONE,
        }
    }
}

impl FromIterator<(Key, Value)> for ArrayList {
    fn from_iter<I: IntoIterator<Item = (Key, Value)>>(iter: I) -> Self {
        let mut entries = IndexMap::new();
        for (key, value) in iter {
            entries.insert(key, value);
        }
        ArrayList {
            entries,
            flags: Flags::NONE,
        }
    }
}

impl<V: Into<Value>> From<Vec<V>> for ArrayList {
    fn from(values: Vec<V>) -> Self {
        ArrayList::from_source(values)
    }
}

impl<V: Into<Value>, const N: usize> From<[V; N]> for ArrayList {
    fn from(values: [V; N]) -> Self {
        ArrayList::from_source(values)
    }
}

impl From<IndexMap<Key, Value>> for ArrayList {
    fn from(entries: IndexMap<Key, Value>) -> Self {
        ArrayList {
            entries,
            flags: Flags::NONE,
        }
    }
}
