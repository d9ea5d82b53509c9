// native array functions reachable through dispatch
//
// each handler owns a private copy of the pairs and never sees the caller's list
use std::collections::HashSet;

use indexmap::IndexMap;
use tracing::warn;

use crate::core::error::ListError;
use crate::core::mapping::{ArrayList, sequential};
use crate::core::sort::SortFlag;
use crate::core::types::{Key, Number, Value};
use crate::dispatch::registry::Output;

type Pairs = IndexMap<Key, Value>;

//upper bound on elements array_pad may add
const MAX_PAD: usize = 1 << 20;

fn arg<'a>(args: &'a [Value], idx: usize) -> Option<&'a Value> {
    args.get(idx).filter(|v| !v.is_null())
}

fn arg_int(op: &'static str, args: &[Value], idx: usize) -> Result<Option<i64>, ListError> {
    match arg(args, idx) {
        None => Ok(None),
        Some(Value::Int(i)) => Ok(Some(*i)),
        Some(Value::Bool(b)) => Ok(Some(i64::from(*b))),
        Some(other) => match other.numeric() {
            Some(Number::Int(i)) => Ok(Some(i)),
            Some(Number::Float(f)) if f.is_finite() => Ok(Some(f as i64)),
            _ => Err(ListError::invalid(op, format!("argument #{} must be of type int", idx + 2))),
        },
    }
}

fn required_int(op: &'static str, args: &[Value], idx: usize) -> Result<i64, ListError> {
    arg_int(op, args, idx)?
        .ok_or_else(|| ListError::invalid(op, format!("argument #{} is required", idx + 2)))
}

fn arg_flag(args: &[Value], idx: usize) -> bool {
    arg(args, idx).is_some_and(Value::truthy)
}

fn arg_sort_flag(op: &'static str, args: &[Value], idx: usize, default: SortFlag) -> Result<SortFlag, ListError> {
    match arg_int(op, args, idx)? {
        None => Ok(default),
        Some(bits) => SortFlag::from_bits(bits)
            .ok_or_else(|| ListError::invalid(op, format!("unknown sort flag {bits}"))),
    }
}

fn arg_lists<'a>(op: &'static str, args: &'a [Value]) -> Result<Vec<&'a ArrayList>, ListError> {
    args.iter()
        .enumerate()
        .map(|(i, v)| {
            v.as_list()
                .ok_or_else(|| ListError::invalid(op, format!("argument #{} must be of type array", i + 2)))
        })
        .collect()
}

//values that cannot be keys fall back to their display form
fn key_of(value: &Value) -> Key {
    Key::from_value(value).unwrap_or_else(|| Key::from(value.display()))
}

//integer keys become 0, 1, 2, ...; string keys survive, later ones overwrite
fn renumber(pairs: impl IntoIterator<Item = (Key, Value)>) -> Pairs {
    let mut next = 0;
    let mut out = IndexMap::new();
    for (key, value) in pairs {
        match key {
            Key::Int(_) => {
                out.insert(Key::Int(next), value);
                next += 1;
            }
            key => {
                out.insert(key, value);
            }
        }
    }
    out
}

pub fn keys(pairs: Pairs, args: &[Value]) -> Result<Output, ListError> {
    let keys = match args.first() {
        None => pairs.into_keys().map(Value::from).collect(),
        Some(needle) => {
            let strict = arg_flag(args, 1);
            pairs
                .into_iter()
                .filter(|(_, v)| {
                    if strict {
                        v == needle
                    } else {
                        SortFlag::Regular.compare(v, needle).is_eq()
                    }
                })
                .map(|(k, _)| Value::from(k))
                .collect()
        }
    };
    Ok(Output::Pairs(sequential(keys)))
}

pub fn values(pairs: Pairs, _args: &[Value]) -> Result<Output, ListError> {
    Ok(Output::Pairs(sequential(pairs.into_values().collect())))
}

pub fn count_values(pairs: Pairs, _args: &[Value]) -> Result<Output, ListError> {
    let mut counts: IndexMap<Key, i64> = IndexMap::new();
    for value in pairs.values() {
        match Key::from_value(value) {
            Some(key) => *counts.entry(key).or_insert(0) += 1,
            None => warn!(value = ?value, "array_count_values(): can only count string and integer values, skipping"),
        }
    }
    Ok(Output::Pairs(counts.into_iter().map(|(k, n)| (k, Value::Int(n))).collect()))
}

pub fn reverse(pairs: Pairs, args: &[Value]) -> Result<Output, ListError> {
    let reversed = pairs.into_iter().rev();
    if arg_flag(args, 0) {
        Ok(Output::Pairs(reversed.collect()))
    } else {
        Ok(Output::Pairs(renumber(reversed)))
    }
}

pub fn unique(pairs: Pairs, args: &[Value]) -> Result<Output, ListError> {
    let flag = arg_sort_flag("array_unique", args, 0, SortFlag::String)?;
    let mut out = IndexMap::new();

    if flag == SortFlag::String {
        let mut seen = HashSet::new();
        for (key, value) in pairs {
            if seen.insert(value.display()) {
                out.insert(key, value);
            }
        }
    } else {
        for (key, value) in pairs {
            if !out.values().any(|kept| flag.compare(kept, &value).is_eq()) {
                out.insert(key, value);
            }
        }
    }
    Ok(Output::Pairs(out))
}

pub fn flip(pairs: Pairs, _args: &[Value]) -> Result<Output, ListError> {
    let mut out = IndexMap::new();
    for (key, value) in pairs {
        match Key::from_value(&value) {
            Some(new_key) => {
                out.insert(new_key, Value::from(key));
            }
            None => warn!(value = ?value, "array_flip(): can only flip string and integer values, skipping"),
        }
    }
    Ok(Output::Pairs(out))
}

fn fold_numbers(op: &'static str, pairs: &Pairs, identity: i64, int_op: fn(i64, i64) -> Option<i64>, float_op: fn(f64, f64) -> f64) -> Value {
    let mut acc = Number::Int(identity);
    for value in pairs.values() {
        let n = match value {
            Value::Array(_) => {
                warn!(op, "array values are not numeric, skipping");
                continue;
            }
            other => other.numeric().unwrap_or(Number::Int(0)),
        };
        acc = match (acc, n) {
            (Number::Int(a), Number::Int(b)) => match int_op(a, b) {
                Some(r) => Number::Int(r),
                None => Number::Float(float_op(a as f64, b as f64)),
            },
            (a, b) => Number::Float(float_op(a.as_f64(), b.as_f64())),
        };
    }
    acc.into_value()
}

pub fn sum(pairs: Pairs, _args: &[Value]) -> Result<Output, ListError> {
    Ok(Output::Scalar(fold_numbers("array_sum", &pairs, 0, i64::checked_add, |a, b| a + b)))
}

pub fn product(pairs: Pairs, _args: &[Value]) -> Result<Output, ListError> {
    Ok(Output::Scalar(fold_numbers("array_product", &pairs, 1, i64::checked_mul, |a, b| a * b)))
}

pub fn slice(pairs: Pairs, args: &[Value]) -> Result<Output, ListError> {
    let len = pairs.len() as i64;
    let offset = required_int("array_slice", args, 0)?;
    let length = arg_int("array_slice", args, 1)?;
    let preserve = arg_flag(args, 2);

    let start = if offset < 0 { len.saturating_add(offset).max(0) } else { offset.min(len) };
    let end = match length {
        None => len,
        Some(n) if n < 0 => len.saturating_add(n),
        Some(n) => start.saturating_add(n).min(len),
    };

    let taken = pairs
        .into_iter()
        .skip(start as usize)
        .take(end.saturating_sub(start).max(0) as usize);
    if preserve {
        Ok(Output::Pairs(taken.collect()))
    } else {
        Ok(Output::Pairs(renumber(taken)))
    }
}

pub fn merge(pairs: Pairs, args: &[Value]) -> Result<Output, ListError> {
    let others = arg_lists("array_merge", args)?;
    let rest = others.into_iter().flat_map(|l| l.to_vec());
    Ok(Output::Pairs(renumber(pairs.into_iter().chain(rest))))
}

pub fn replace(mut pairs: Pairs, args: &[Value]) -> Result<Output, ListError> {
    for other in arg_lists("array_replace", args)? {
        for (key, value) in other {
            pairs.insert(key.clone(), value.clone());
        }
    }
    Ok(Output::Pairs(pairs))
}

pub fn pad(pairs: Pairs, args: &[Value]) -> Result<Output, ListError> {
    let size = required_int("array_pad", args, 0)?;
    let fill = args.get(1).cloned().unwrap_or_default();

    let wanted = size.unsigned_abs() as usize;
    if wanted <= pairs.len() {
        return Ok(Output::Pairs(pairs));
    }
    let missing = wanted - pairs.len();
    if missing > MAX_PAD {
        return Err(ListError::invalid("array_pad", format!("may only add up to {MAX_PAD} elements at a time")));
    }

    let padding = std::iter::repeat_n((Key::Int(0), fill), missing);
    if size > 0 {
        Ok(Output::Pairs(renumber(pairs.into_iter().chain(padding))))
    } else {
        Ok(Output::Pairs(renumber(padding.chain(pairs))))
    }
}

pub fn chunk(pairs: Pairs, args: &[Value]) -> Result<Output, ListError> {
    let size = required_int("array_chunk", args, 0)?;
    if size < 1 {
        return Err(ListError::invalid("array_chunk", "argument #2 must be greater than 0"));
    }
    let preserve = arg_flag(args, 1);

    let mut chunks = Vec::new();
    let mut current: Vec<(Key, Value)> = Vec::new();
    for pair in pairs {
        current.push(pair);
        if current.len() as i64 == size {
            chunks.push(std::mem::take(&mut current));
        }
    }
    if !current.is_empty() {
        chunks.push(current);
    }

    let chunks = chunks
        .into_iter()
        .map(|c| {
            if preserve {
                c.into_iter().collect()
            } else {
                sequential(c.into_iter().map(|(_, v)| v).collect())
            }
        })
        .collect();
    Ok(Output::Nested(chunks))
}

pub fn combine(pairs: Pairs, args: &[Value]) -> Result<Output, ListError> {
    let values = args
        .first()
        .and_then(Value::as_list)
        .ok_or_else(|| ListError::invalid("array_combine", "argument #2 must be of type array"))?;
    if values.len() != pairs.len() {
        return Err(ListError::invalid(
            "array_combine",
            "both arguments must have the same number of elements",
        ));
    }
    let combined = pairs
        .values()
        .map(key_of)
        .zip(values.values_iter().cloned())
        .collect();
    Ok(Output::Pairs(combined))
}

pub fn fill_keys(pairs: Pairs, args: &[Value]) -> Result<Output, ListError> {
    let fill = args.first().cloned().unwrap_or_default();
    let filled = pairs.values().map(|v| (key_of(v), fill.clone())).collect();
    Ok(Output::Pairs(filled))
}

pub fn diff(pairs: Pairs, args: &[Value]) -> Result<Output, ListError> {
    let others = arg_lists("array_diff", args)?;
    let excluded: HashSet<String> = others
        .into_iter()
        .flat_map(|l| l.values_iter().map(Value::display))
        .collect();
    let kept = pairs
        .into_iter()
        .filter(|(_, v)| !excluded.contains(&v.display()))
        .collect();
    Ok(Output::Pairs(kept))
}

pub fn intersect(pairs: Pairs, args: &[Value]) -> Result<Output, ListError> {
    let others = arg_lists("array_intersect", args)?;
    let sets: Vec<HashSet<String>> = others
        .into_iter()
        .map(|l| l.values_iter().map(Value::display).collect())
        .collect();
    let kept = pairs
        .into_iter()
        .filter(|(_, v)| {
            let shown = v.display();
            sets.iter().all(|s| s.contains(&shown))
        })
        .collect();
    Ok(Output::Pairs(kept))
}

pub fn diff_key(pairs: Pairs, args: &[Value]) -> Result<Output, ListError> {
    let others = arg_lists("array_diff_key", args)?;
    let kept = pairs
        .into_iter()
        .filter(|(k, _)| !others.iter().any(|l| l.has(k)))
        .collect();
    Ok(Output::Pairs(kept))
}

pub fn intersect_key(pairs: Pairs, args: &[Value]) -> Result<Output, ListError> {
    let others = arg_lists("array_intersect_key", args)?;
    let kept = pairs
        .into_iter()
        .filter(|(k, _)| others.iter().all(|l| l.has(k)))
        .collect();
    Ok(Output::Pairs(kept))
}

pub fn key_first(pairs: Pairs, _args: &[Value]) -> Result<Output, ListError> {
    Ok(Output::Scalar(pairs.into_keys().next().into()))
}

pub fn key_last(pairs: Pairs, _args: &[Value]) -> Result<Output, ListError> {
    Ok(Output::Scalar(pairs.into_keys().next_back().into()))
}

pub fn is_list(pairs: Pairs, _args: &[Value]) -> Result<Output, ListError> {
    Ok(Output::Scalar(Value::Bool(ArrayList::from(pairs).is_list())))
}

pub fn change_key_case(pairs: Pairs, args: &[Value]) -> Result<Output, ListError> {
    let upper = arg_int("array_change_key_case", args, 0)?.unwrap_or(0) != 0;
    let mut out = IndexMap::new();
    for (key, value) in pairs {
        let key = match key {
            Key::Str(s) if upper => Key::from(s.to_uppercase()),
            Key::Str(s) => Key::from(s.to_lowercase()),
            int => int,
        };
        out.insert(key, value);
    }
    Ok(Output::Pairs(out))
}

fn sorted(list: ArrayList) -> Output {
    Output::Pairs(list.into_iter().collect())
}

pub fn asort(pairs: Pairs, args: &[Value]) -> Result<Output, ListError> {
    let flag = arg_sort_flag("array_asort", args, 0, SortFlag::Regular)?;
    Ok(sorted(ArrayList::from(pairs).asort(flag)))
}

pub fn ksort(pairs: Pairs, args: &[Value]) -> Result<Output, ListError> {
    let flag = arg_sort_flag("array_ksort", args, 0, SortFlag::Regular)?;
    Ok(sorted(ArrayList::from(pairs).ksort(flag)))
}

pub fn natsort(pairs: Pairs, _args: &[Value]) -> Result<Output, ListError> {
    Ok(sorted(ArrayList::from(pairs).natsort()))
}

pub fn natcasesort(pairs: Pairs, _args: &[Value]) -> Result<Output, ListError> {
    Ok(sorted(ArrayList::from(pairs).natcasesort()))
}

pub fn shuffle(pairs: Pairs, _args: &[Value]) -> Result<Output, ListError> {
    Ok(sorted(ArrayList::from(pairs).shuffle()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mk_pairs<K: Into<Key>, V: Into<Value>>(pairs: Vec<(K, V)>) -> Pairs {
        pairs.into_iter().map(|(k, v)| (k.into(), v.into())).collect()
    }

    fn mk_seq<V: Into<Value>>(values: Vec<V>) -> Pairs {
        sequential(values.into_iter().map(Into::into).collect())
    }

    fn pairs_of(out: Output) -> Pairs {
        match out {
            Output::Pairs(p) => p,
            other => panic!("expected pairs, got {other:?}"),
        }
    }

    fn nested_of(out: Output) -> Vec<Pairs> {
        match out {
            Output::Nested(parts) => parts,
            other => panic!("expected nested collections, got {other:?}"),
        }
    }

    fn scalar_of(out: Output) -> Value {
        match out {
            Output::Scalar(v) => v,
            other => panic!("expected a scalar, got {other:?}"),
        }
    }

    //IndexMap equality ignores order
    fn same(actual: Pairs, expected: Pairs) {
        let actual: Vec<_> = actual.into_iter().collect();
        let expected: Vec<_> = expected.into_iter().collect();
        assert_eq!(actual, expected);
    }

    fn mk_list_arg(pairs: Pairs) -> Value {
        Value::Array(ArrayList::from(pairs))
    }

    #[test]
    fn keys_with_and_without_search() {
        let p = mk_pairs(vec![("a", Value::from("y")), ("b", Value::Int(1)), ("c", Value::from("1"))]);

        let all = pairs_of(keys(p.clone(), &[]).unwrap());
        same(all, mk_seq(vec!["a", "b", "c"]));

        let loose = pairs_of(keys(p.clone(), &[Value::Int(1)]).unwrap());
        same(loose, mk_seq(vec!["b", "c"]));

        let strict = pairs_of(keys(p, &[Value::Int(1), Value::Bool(true)]).unwrap());
        same(strict, mk_seq(vec!["b"]));
    }

    #[test]
    fn keys_search_for_bool_matches_truthy_values() {
        let p = mk_seq(vec![Value::from("abc"), Value::Bool(true), Value::from("")]);
        let found = pairs_of(keys(p, &[Value::Bool(true)]).unwrap());
        same(found, mk_seq(vec![0, 1]));
    }

    #[test]
    fn count_values_skips_unkeyable_values() {
        let p = mk_seq(vec![Value::Int(1), "hello".into(), Value::Int(1), "world".into(), "hello".into(), Value::Float(1.5)]);
        let counts = pairs_of(count_values(p, &[]).unwrap());

        same(
            counts,
            mk_pairs(vec![(Key::Int(1), 2), (Key::from("hello"), 2), (Key::from("world"), 1)]),
        );
    }

    #[test]
    fn count_values_folds_numeric_strings_into_int_keys() {
        let p = mk_seq(vec![Value::Int(1), Value::from("1")]);
        let counts = pairs_of(count_values(p, &[]).unwrap());
        same(counts, mk_pairs(vec![(1, 2)]));
    }

    #[test]
    fn reverse_indexed_and_associative() {
        let out = pairs_of(reverse(mk_seq(vec![1, 2, 3]), &[]).unwrap());
        same(out, mk_seq(vec![3, 2, 1]));

        let out = pairs_of(reverse(mk_seq(vec![1, 2, 3]), &[Value::Bool(true)]).unwrap());
        same(out, mk_pairs(vec![(2, 3), (1, 2), (0, 1)]));

        let out = pairs_of(reverse(mk_pairs(vec![("a", "x"), ("b", "y"), ("c", "z")]), &[]).unwrap());
        same(out, mk_pairs(vec![("c", "z"), ("b", "y"), ("a", "x")]));
    }

    #[test]
    fn unique_keeps_first_occurrence() {
        let p = mk_seq(vec![9, 3, 0, 4, 9, 4, 3, 0, 4, 1, 0]);
        let out = pairs_of(unique(p, &[]).unwrap());
        same(out, mk_pairs(vec![(0, 9), (1, 3), (2, 0), (3, 4), (9, 1)]));

        let p = mk_seq(vec![Value::Int(4), Value::from("4"), Value::Float(4.0)]);
        let out = pairs_of(unique(p, &[]).unwrap());
        assert_eq!(out.len(), 1);

        let p = mk_seq(vec![Value::from("10"), Value::from("1e1")]);
        assert_eq!(pairs_of(unique(p.clone(), &[]).unwrap()).len(), 2);
        assert_eq!(pairs_of(unique(p, &[Value::Int(0)]).unwrap()).len(), 1);
    }

    #[test]
    fn flip_swaps_keys_and_values() {
        let p = mk_pairs(vec![(Key::from("a"), Value::Int(1)), (Key::from("b"), Value::from("x")), (Key::from("c"), Value::Int(1)), (Key::from("d"), Value::Null)]);
        let out = pairs_of(flip(p, &[]).unwrap());
        same(out, mk_pairs(vec![(Key::Int(1), "c"), (Key::from("x"), "b")]));
    }

    #[test]
    fn sum_and_product() {
        let p = mk_seq(vec![Value::Int(1), Value::from("2"), Value::Float(0.5)]);
        assert_eq!(scalar_of(sum(p.clone(), &[]).unwrap()), Value::Float(3.5));
        assert_eq!(scalar_of(product(p, &[]).unwrap()), Value::Float(1.0));

        assert_eq!(scalar_of(sum(mk_seq(vec![1, 2, 3]), &[]).unwrap()), Value::Int(6));
        assert_eq!(scalar_of(product(Pairs::new(), &[]).unwrap()), Value::Int(1));
        assert_eq!(scalar_of(sum(Pairs::new(), &[]).unwrap()), Value::Int(0));

        let big = mk_seq(vec![Value::Int(i64::MAX), Value::Int(1)]);
        assert!(matches!(scalar_of(sum(big, &[]).unwrap()), Value::Float(_)));
    }

    #[test]
    fn slice_offsets_and_lengths() {
        let p = mk_seq(vec!["a", "b", "c", "d", "e"]);

        same(pairs_of(slice(p.clone(), &[Value::Int(2)]).unwrap()), mk_seq(vec!["c", "d", "e"]));
        same(pairs_of(slice(p.clone(), &[Value::Int(-2), Value::Int(1)]).unwrap()), mk_seq(vec!["d"]));
        same(pairs_of(slice(p.clone(), &[Value::Int(0), Value::Int(-3)]).unwrap()), mk_seq(vec!["a", "b"]));
        same(
            pairs_of(slice(p.clone(), &[Value::Int(2), Value::Int(-1), Value::Bool(true)]).unwrap()),
            mk_pairs(vec![(2, "c"), (3, "d")]),
        );
        assert!(pairs_of(slice(p.clone(), &[Value::Int(10)]).unwrap()).is_empty());
        assert!(pairs_of(slice(p.clone(), &[Value::Int(3), Value::Int(-4)]).unwrap()).is_empty());

        let err = slice(p, &[]).unwrap_err();
        assert!(matches!(err, ListError::InvalidArgument { op: "array_slice", .. }));
    }

    #[test]
    fn merge_renumbers_and_overwrites() {
        let p = mk_pairs(vec![(Key::from("a"), 1), (Key::Int(5), 2)]);
        let other = mk_list_arg(mk_pairs(vec![(Key::from("a"), 3), (Key::Int(9), 4)]));

        let out = pairs_of(merge(p, &[other]).unwrap());
        same(out, mk_pairs(vec![(Key::from("a"), 3), (Key::Int(0), 2), (Key::Int(1), 4)]));

        let err = merge(Pairs::new(), &[Value::Int(1)]).unwrap_err();
        assert!(matches!(err, ListError::InvalidArgument { op: "array_merge", .. }));
    }

    #[test]
    fn replace_keeps_keys() {
        let p = mk_seq(vec!["a", "b", "c"]);
        let other = mk_list_arg(mk_pairs(vec![(1, "B"), (3, "d")]));

        let out = pairs_of(replace(p, &[other]).unwrap());
        same(out, mk_seq(vec!["a", "B", "c", "d"]));
    }

    #[test]
    fn pad_left_and_right() {
        let p = mk_seq(vec![1, 2]);
        same(pairs_of(pad(p.clone(), &[Value::Int(4), Value::Int(0)]).unwrap()), mk_seq(vec![1, 2, 0, 0]));
        same(pairs_of(pad(p.clone(), &[Value::Int(-3), Value::Int(0)]).unwrap()), mk_seq(vec![0, 1, 2]));
        same(pairs_of(pad(p.clone(), &[Value::Int(1), Value::Int(0)]).unwrap()), mk_seq(vec![1, 2]));
        assert!(pad(p, &[Value::Int(i64::MAX)]).is_err());
    }

    #[test]
    fn chunk_sizes() {
        let p = mk_pairs(vec![("a", 1), ("b", 2), ("c", 3)]);

        let mut out = nested_of(chunk(p.clone(), &[Value::Int(2)]).unwrap()).into_iter();
        assert_eq!(out.len(), 2);
        same(out.next().unwrap(), mk_seq(vec![1, 2]));
        same(out.next().unwrap(), mk_seq(vec![3]));

        let out = nested_of(chunk(p.clone(), &[Value::Int(2), Value::Bool(true)]).unwrap());
        same(out[1].clone(), mk_pairs(vec![("c", 3)]));

        let err = chunk(p, &[Value::Int(0)]).unwrap_err();
        assert!(matches!(err, ListError::InvalidArgument { op: "array_chunk", .. }));
    }

    #[test]
    fn combine_and_fill_keys() {
        let p = mk_seq(vec!["x", "y"]);
        let out = pairs_of(combine(p.clone(), &[Value::Array(ArrayList::from([1, 2]))]).unwrap());
        same(out, mk_pairs(vec![("x", 1), ("y", 2)]));

        assert!(combine(p.clone(), &[Value::Array(ArrayList::from([1]))]).is_err());
        assert!(combine(p.clone(), &[]).is_err());

        let out = pairs_of(fill_keys(p, &[Value::Int(0)]).unwrap());
        same(out, mk_pairs(vec![("x", 0), ("y", 0)]));
    }

    #[test]
    fn diff_and_intersect() {
        let p = mk_pairs(vec![("a", "green"), ("b", "red"), ("c", "blue")]);
        let other = mk_list_arg(mk_seq(vec!["green", "yellow", "red"]));

        let out = pairs_of(diff(p.clone(), &[other.clone()]).unwrap());
        same(out, mk_pairs(vec![("c", "blue")]));

        let out = pairs_of(intersect(p, &[other]).unwrap());
        same(out, mk_pairs(vec![("a", "green"), ("b", "red")]));
    }

    #[test]
    fn key_based_diff_and_intersect() {
        let p = mk_pairs(vec![("a", 1), ("b", 2), ("c", 3)]);
        let other = mk_list_arg(mk_pairs(vec![("a", 9), ("c", 9)]));

        same(pairs_of(diff_key(p.clone(), &[other.clone()]).unwrap()), mk_pairs(vec![("b", 2)]));
        same(pairs_of(intersect_key(p, &[other]).unwrap()), mk_pairs(vec![("a", 1), ("c", 3)]));
    }

    #[test]
    fn scalar_natives() {
        let p = mk_pairs(vec![("a", 1), ("b", 2)]);
        assert_eq!(scalar_of(key_first(p.clone(), &[]).unwrap()), Value::from("a"));
        assert_eq!(scalar_of(key_last(p.clone(), &[]).unwrap()), Value::from("b"));
        assert_eq!(scalar_of(key_first(Pairs::new(), &[]).unwrap()), Value::Null);
        assert_eq!(scalar_of(is_list(p, &[]).unwrap()), Value::Bool(false));
        assert_eq!(scalar_of(is_list(mk_seq(vec![1]), &[]).unwrap()), Value::Bool(true));
    }

    #[test]
    fn change_key_case_folds_string_keys() {
        let p = mk_pairs(vec![(Key::from("FirSt"), 1), (Key::Int(3), 2), (Key::from("first"), 3)]);
        let out = pairs_of(change_key_case(p.clone(), &[]).unwrap());
        same(out, mk_pairs(vec![(Key::from("first"), 3), (Key::Int(3), 2)]));

        let out = pairs_of(change_key_case(p, &[Value::Int(1)]).unwrap());
        assert!(out.contains_key(&Key::from("FIRST")));
    }

    #[test]
    fn sort_aliases_take_optional_flags() {
        let p = mk_pairs(vec![("a", "10"), ("b", "9")]);
        let regular = pairs_of(asort(p.clone(), &[]).unwrap());
        assert_eq!(regular.keys().cloned().collect::<Vec<_>>(), vec![Key::from("b"), Key::from("a")]);

        let as_text = pairs_of(asort(p.clone(), &[Value::Int(2)]).unwrap());
        assert_eq!(as_text.keys().cloned().collect::<Vec<_>>(), vec![Key::from("a"), Key::from("b")]);

        assert!(asort(p, &[Value::Int(99)]).is_err());
    }
}
