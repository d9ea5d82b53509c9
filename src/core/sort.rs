// sort family: every sort works on a private copy and returns a new list
use std::cmp::Ordering;

use rand::Rng;
use rand::seq::SliceRandom;

use crate::core::compare;
use crate::core::mapping::ArrayList;
use crate::core::types::{Key, Value};

/// Comparison rule for [`ArrayList::asort`] and [`ArrayList::ksort`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortFlag {
    #[default]
    Regular,
    Numeric,
    String,
    StringCase,
    Natural,
    NaturalCase,
}

impl SortFlag {
    //0 regular, 1 numeric, 2 string, 6 natural; 8 folds case for string/natural
    pub fn from_bits(bits: i64) -> Option<SortFlag> {
        match bits {
            0 => Some(SortFlag::Regular),
            1 => Some(SortFlag::Numeric),
            2 => Some(SortFlag::String),
            10 => Some(SortFlag::StringCase),
            6 => Some(SortFlag::Natural),
            14 => Some(SortFlag::NaturalCase),
            _ => None,
        }
    }

    pub fn compare(self, a: &Value, b: &Value) -> Ordering {
        match self {
            SortFlag::Regular => compare::regular(a, b),
            SortFlag::Numeric => compare::numeric(a, b),
            SortFlag::String => compare::string(a, b),
            SortFlag::StringCase => compare::string_case(a, b),
            SortFlag::Natural => compare::natural_values(a, b, false),
            SortFlag::NaturalCase => compare::natural_values(a, b, true),
        }
    }

    fn compare_keys(self, a: &Key, b: &Key) -> Ordering {
        match self {
            SortFlag::Regular => compare::keys_regular(a, b),
            _ => self.compare(&a.to_value(), &b.to_value()),
        }
    }
}

//stable; comparators that are not total orders still terminate without panicking
fn merge_sort<T, F>(mut items: Vec<T>, cmp: &mut F) -> Vec<T>
where
    F: FnMut(&T, &T) -> Ordering,
{
    if items.len() <= 1 {
        return items;
    }
    let right = items.split_off(items.len() / 2);
    let left = merge_sort(items, cmp);
    let right = merge_sort(right, cmp);

    let mut out = Vec::with_capacity(left.len() + right.len());
    let mut left = left.into_iter().peekable();
    let mut right = right.into_iter().peekable();
    while let (Some(l), Some(r)) = (left.peek(), right.peek()) {
        let next = if cmp(r, l) == Ordering::Less { right.next() } else { left.next() };
        out.extend(next);
    }
    out.extend(left);
    out.extend(right);
    out
}

impl ArrayList {
    /// Sorts by value; every key stays bound to its value.
    pub fn asort(&self, flag: SortFlag) -> ArrayList {
        self.uasort(|a, b| flag.compare(a, b))
    }

    /// Sorts by key.
    pub fn ksort(&self, flag: SortFlag) -> ArrayList {
        self.uksort(|a, b| flag.compare_keys(a, b))
    }

    pub fn uasort<F>(&self, mut cmp: F) -> ArrayList
    where
        F: FnMut(&Value, &Value) -> Ordering,
    {
        let mut by_value = |a: &(Key, Value), b: &(Key, Value)| cmp(&a.1, &b.1);
        let sorted = merge_sort(self.to_vec(), &mut by_value);
        self.make(sorted.into_iter().collect())
    }

    pub fn uksort<F>(&self, mut cmp: F) -> ArrayList
    where
        F: FnMut(&Key, &Key) -> Ordering,
    {
        let mut by_key = |a: &(Key, Value), b: &(Key, Value)| cmp(&a.0, &b.0);
        let sorted = merge_sort(self.to_vec(), &mut by_key);
        self.make(sorted.into_iter().collect())
    }

    pub fn natsort(&self) -> ArrayList {
        self.asort(SortFlag::Natural)
    }

    pub fn natcasesort(&self) -> ArrayList {
        self.asort(SortFlag::NaturalCase)
    }

    /// Random order. Keys are discarded and the result is a plain `0..n` list.
    pub fn shuffle(&self) -> ArrayList {
        self.shuffle_with(&mut rand::thread_rng())
    }

    pub fn shuffle_with<R: Rng + ?Sized>(&self, rng: &mut R) -> ArrayList {
        let mut values: Vec<Value> = self.values_iter().cloned().collect();
        values.shuffle(rng);
        self.make_list(values)
    }
}
