// value and key comparison rules used by the sort family
use std::cmp::Ordering;

use crate::core::types::{Key, Value};

/// Loose "regular" comparison.
///
/// A bool on either side turns both operands into bools. Otherwise two
/// operands that both have a numeric reading compare as numbers and anything
/// else compares by display form. Lists compare by size.
pub fn regular(a: &Value, b: &Value) -> Ordering {
    if matches!(a, Value::Bool(_)) || matches!(b, Value::Bool(_)) {
        return a.truthy().cmp(&b.truthy());
    }
    if let (Value::Array(x), Value::Array(y)) = (a, b) {
        return x.len().cmp(&y.len());
    }
    match (a.numeric(), b.numeric()) {
        (Some(x), Some(y)) => total(x.as_f64(), y.as_f64()),
        _ => a.display().cmp(&b.display()),
    }
}

pub fn numeric(a: &Value, b: &Value) -> Ordering {
    let x = a.numeric().map_or(0.0, |n| n.as_f64());
    let y = b.numeric().map_or(0.0, |n| n.as_f64());
    total(x, y)
}

pub fn string(a: &Value, b: &Value) -> Ordering {
    a.display().cmp(&b.display())
}

pub fn string_case(a: &Value, b: &Value) -> Ordering {
    a.display().to_lowercase().cmp(&b.display().to_lowercase())
}

//NaN sorts after everything so the ordering stays total
fn total(x: f64, y: f64) -> Ordering {
    x.partial_cmp(&y).unwrap_or_else(|| x.is_nan().cmp(&y.is_nan()))
}

pub fn keys_regular(a: &Key, b: &Key) -> Ordering {
    match (a, b) {
        (Key::Int(x), Key::Int(y)) => x.cmp(y),
        _ => regular(&a.to_value(), &b.to_value()),
    }
}

/// Natural order comparison: runs of digits compare by numeric value, all other
/// characters compare one by one. Leading whitespace is ignored.
pub fn natural(a: &str, b: &str, fold_case: bool) -> Ordering {
    let a: Vec<char> = a.trim_start().chars().collect();
    let b: Vec<char> = b.trim_start().chars().collect();
    let (mut i, mut j) = (0, 0);

    while i < a.len() && j < b.len() {
        let (ca, cb) = (a[i], b[j]);

        if ca.is_ascii_digit() && cb.is_ascii_digit() {
            let start_a = i;
            while i < a.len() && a[i].is_ascii_digit() {
                i += 1;
            }
            let start_b = j;
            while j < b.len() && b[j].is_ascii_digit() {
                j += 1;
            }
            let ord = digit_runs(&a[start_a..i], &b[start_b..j]);
            if ord != Ordering::Equal {
                return ord;
            }
            continue;
        }

        let ord = if fold_case {
            ca.to_lowercase().cmp(cb.to_lowercase())
        } else {
            ca.cmp(&cb)
        };
        if ord != Ordering::Equal {
            return ord;
        }
        i += 1;
        j += 1;
    }

    (a.len() - i).cmp(&(b.len() - j))
}

//compare two digit runs by value without parsing (runs can be arbitrarily long)
fn digit_runs(a: &[char], b: &[char]) -> Ordering {
    let strip = |run: &[char]| -> usize { run.iter().take_while(|c| **c == '0').count().min(run.len().saturating_sub(1)) };
    let a_sig = &a[strip(a)..];
    let b_sig = &b[strip(b)..];
    a_sig
        .len()
        .cmp(&b_sig.len())
        .then_with(|| a_sig.cmp(b_sig))
        //"01" after "1"
        .then_with(|| a.len().cmp(&b.len()))
}

pub fn natural_values(a: &Value, b: &Value, fold_case: bool) -> Ordering {
    natural(&a.display(), &b.display(), fold_case)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mk_sorted(input: &[&str], fold_case: bool) -> Vec<String> {
        let mut v: Vec<String> = input.iter().map(|s| s.to_string()).collect();
        v.sort_by(|a, b| natural(a, b, fold_case));
        v
    }

    #[test]
    fn natural_order_is_case_sensitive_by_default() {
        assert_eq!(mk_sorted(&["a2", "a11", "A5", "a1", "a10"], false), vec!["A5", "a1", "a2", "a10", "a11"]);
    }

    #[test]
    fn natural_case_folding() {
        assert_eq!(mk_sorted(&["A2", "a11", "a1", "A10"], true), vec!["a1", "A2", "A10", "a11"]);
    }

    #[test]
    fn natural_digit_runs() {
        assert_eq!(natural("img12.png", "img10.png", false), Ordering::Greater);
        assert_eq!(natural("x2", "x10", false), Ordering::Less);
        assert_eq!(natural("x010", "x9", false), Ordering::Greater);
        assert_eq!(natural("x1", "x01", false), Ordering::Less);
        assert_eq!(natural("  a", "a", false), Ordering::Equal);
        assert_eq!(natural("abc", "ab", false), Ordering::Greater);
        assert_eq!(natural("99999999999999999999999", "100000000000000000000000", false), Ordering::Less);
    }

    #[test]
    fn regular_mixes_numbers_and_strings() {
        assert_eq!(regular(&Value::Int(10), &Value::Int(9)), Ordering::Greater);
        assert_eq!(regular(&Value::from("10"), &Value::Int(9)), Ordering::Greater);
        assert_eq!(regular(&Value::Float(1.5), &Value::Int(2)), Ordering::Less);
        assert_eq!(regular(&Value::from("10"), &Value::from("9")), Ordering::Greater);
        assert_eq!(regular(&Value::from("b"), &Value::from("a")), Ordering::Greater);
        //"abc" has no numeric reading, so both sides compare as text
        assert_eq!(regular(&Value::from("abc"), &Value::Int(5)), Ordering::Greater);
    }

    #[test]
    fn bools_compare_by_truthiness() {
        assert_eq!(regular(&Value::from("abc"), &Value::Bool(true)), Ordering::Equal);
        assert_eq!(regular(&Value::Bool(false), &Value::from("0")), Ordering::Equal);
        assert_eq!(regular(&Value::Bool(false), &Value::Null), Ordering::Equal);
        assert_eq!(regular(&Value::Bool(true), &Value::Int(0)), Ordering::Greater);
        assert_eq!(regular(&Value::Bool(false), &Value::Bool(true)), Ordering::Less);
    }

    #[test]
    fn string_rules() {
        assert_eq!(string(&Value::from("10"), &Value::from("9")), Ordering::Less);
        assert_eq!(string_case(&Value::from("B"), &Value::from("a")), Ordering::Greater);
        assert_eq!(numeric(&Value::from("x"), &Value::Int(-1)), Ordering::Greater);
    }

    #[test]
    fn integer_keys_compare_numerically() {
        assert_eq!(keys_regular(&Key::Int(10), &Key::Int(9)), Ordering::Greater);
        assert_eq!(keys_regular(&Key::from("b"), &Key::from("a")), Ordering::Greater);
    }
}
