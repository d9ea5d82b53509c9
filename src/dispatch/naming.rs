// method name -> native identifier

const NAMESPACE: &str = "array";

/// Rewrites an invoked method name into the native naming convention.
///
/// The namespace prefix is prepended to the name with its first letter
/// capitalised, then every upper-case letter becomes `_` plus its lower-case
/// form: `countValues` -> `array_count_values`, `walk_recursive` ->
/// `array_walk_recursive`.
pub fn native_identifier(name: &str) -> String {
    let mut out = String::with_capacity(NAMESPACE.len() + name.len() + 4);
    out.push_str(NAMESPACE);

    let mut chars = name.chars();
    if let Some(first) = chars.next() {
        push_folded(&mut out, first.to_ascii_uppercase());
    }
    for c in chars {
        push_folded(&mut out, c);
    }
    out
}

fn push_folded(out: &mut String, c: char) {
    if c.is_ascii_uppercase() {
        out.push('_');
        out.push(c.to_ascii_lowercase());
    } else {
        out.push(c);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn camel_case_becomes_snake_case() {
        assert_eq!(native_identifier("countValues"), "array_count_values");
        assert_eq!(native_identifier("keys"), "array_keys");
        assert_eq!(native_identifier("walkRecursive"), "array_walk_recursive");
        assert_eq!(native_identifier("natCaseSort"), "array_nat_case_sort");
    }

    #[test]
    fn snake_case_passes_through() {
        assert_eq!(native_identifier("count_values"), "array_count_values");
        assert_eq!(native_identifier("Reverse"), "array_reverse");
    }

    #[test]
    fn degenerate_names() {
        assert_eq!(native_identifier(""), "array");
        assert_eq!(native_identifier("_x"), "array_x");
        assert_eq!(native_identifier("ÄBC"), "arrayÄ_b_c");
    }
}
