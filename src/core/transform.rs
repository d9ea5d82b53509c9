// bespoke transformations: map, filter, reject, reduce, join, contains, append, prepend
use indexmap::IndexMap;

use crate::core::error::ListError;
use crate::core::mapping::{ArrayList, next_index};
use crate::core::types::{Key, Value};

impl ArrayList {
    /// Applies `f(value, key)` to every pair. Keys and order are preserved.
    pub fn map<F>(&self, mut f: F) -> ArrayList
    where
        F: FnMut(&Value, &Key) -> Value,
    {
        let entries = self
            .entries()
            .map(|(k, v)| (k.clone(), f(v, k)))
            .collect();
        self.make(entries)
    }

    /// Keeps the pairs for which `f(value, key)` holds. Surviving keys are not
    /// renumbered.
    pub fn filter<F>(&self, mut f: F) -> ArrayList
    where
        F: FnMut(&Value, &Key) -> bool,
    {
        let entries = self
            .entries()
            .filter(|&(k, v)| f(v, k))
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect();
        self.make(entries)
    }

    /// The complement of [`filter`](ArrayList::filter).
    pub fn reject<F>(&self, mut f: F) -> ArrayList
    where
        F: FnMut(&Value, &Key) -> bool,
    {
        self.filter(|v, k| !f(v, k))
    }

    /// Left fold over the pairs in order.
    pub fn reduce<A, F>(&self, mut f: F, initial: A) -> A
    where
        F: FnMut(A, &Value, &Key) -> A,
    {
        let mut carry = initial;
        for (k, v) in self.entries() {
            carry = f(carry, v, k);
        }
        carry
    }

    /// Concatenates the display forms of the values.
    pub fn join(&self, separator: &str) -> String {
        self.values_iter()
            .map(Value::display)
            .collect::<Vec<_>>()
            .join(separator)
    }

    /// Strict membership test over values.
    pub fn contains(&self, value: &Value) -> bool {
        self.values_iter().any(|v| v == value)
    }

    /// New list with `value` at the end under the next free integer key.
    ///
    /// Fails with [`ListError::InvalidArgument`] when `i64::MAX` is already a
    /// key, since no free integer key is left.
    pub fn append(&self, value: impl Into<Value>) -> Result<ArrayList, ListError> {
        let key = free_key("append", self)?;
        let mut entries = self.to_mapping();
        entries.insert(key, value.into());
        Ok(self.make(entries))
    }

    /// New list with `value` at the front under the next free integer key.
    /// Existing keys are left as they are. Fails like [`append`](ArrayList::append).
    pub fn prepend(&self, value: impl Into<Value>) -> Result<ArrayList, ListError> {
        let key = free_key("prepend", self)?;
        let mut entries = IndexMap::with_capacity(self.len() + 1);
        entries.insert(key, value.into());
        for (k, v) in self.entries() {
            entries.insert(k.clone(), v.clone());
        }
        Ok(self.make(entries))
    }
}

//the fresh key is never already bound, so the insert always adds a pair
fn free_key(op: &'static str, list: &ArrayList) -> Result<Key, ListError> {
    next_index(list.pairs())
        .map(Key::Int)
        .ok_or_else(|| ListError::invalid(op, "cannot add element, the next integer key is already occupied"))
}
