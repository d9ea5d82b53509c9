// closed table of native array functions
use std::collections::HashMap;
use std::sync::LazyLock;

use indexmap::IndexMap;

use crate::core::error::ListError;
use crate::core::types::{Key, Value};
use crate::dispatch::native;

/// What a native function produced.
#[derive(Debug)]
pub enum Output {
    //collection-shaped; wrapped back into a list by the dispatcher
    Pairs(IndexMap<Key, Value>),
    //a sequential list of collections; each one is wrapped like Pairs
    Nested(Vec<IndexMap<Key, Value>>),
    Scalar(Value),
}

/// Handler for a native that takes the list by value: it receives its own copy
/// of the pairs followed by the caller's arguments.
pub type Native = fn(IndexMap<Key, Value>, &[Value]) -> Result<Output, ListError>;

/// How a native takes its primary argument.
#[derive(Clone, Copy)]
pub enum Signature {
    ByValue(Native),
    //writes to the caller's storage; never executed
    ByReference,
}

#[derive(Clone, Copy)]
pub struct NativeOp {
    pub name: &'static str,
    pub signature: Signature,
}

impl NativeOp {
    pub fn mutates_primary(&self) -> bool {
        matches!(self.signature, Signature::ByReference)
    }
}

const NATIVES: &[(&str, Signature)] = &[
    ("array_keys", Signature::ByValue(native::keys)),
    ("array_values", Signature::ByValue(native::values)),
    ("array_count_values", Signature::ByValue(native::count_values)),
    ("array_reverse", Signature::ByValue(native::reverse)),
    ("array_unique", Signature::ByValue(native::unique)),
    ("array_flip", Signature::ByValue(native::flip)),
    ("array_sum", Signature::ByValue(native::sum)),
    ("array_product", Signature::ByValue(native::product)),
    ("array_slice", Signature::ByValue(native::slice)),
    ("array_merge", Signature::ByValue(native::merge)),
    ("array_replace", Signature::ByValue(native::replace)),
    ("array_pad", Signature::ByValue(native::pad)),
    ("array_chunk", Signature::ByValue(native::chunk)),
    ("array_combine", Signature::ByValue(native::combine)),
    ("array_fill_keys", Signature::ByValue(native::fill_keys)),
    ("array_diff", Signature::ByValue(native::diff)),
    ("array_diff_key", Signature::ByValue(native::diff_key)),
    ("array_intersect", Signature::ByValue(native::intersect)),
    ("array_intersect_key", Signature::ByValue(native::intersect_key)),
    ("array_key_first", Signature::ByValue(native::key_first)),
    ("array_key_last", Signature::ByValue(native::key_last)),
    ("array_is_list", Signature::ByValue(native::is_list)),
    ("array_change_key_case", Signature::ByValue(native::change_key_case)),
    ("array_asort", Signature::ByValue(native::asort)),
    ("array_ksort", Signature::ByValue(native::ksort)),
    ("array_natsort", Signature::ByValue(native::natsort)),
    ("array_natcasesort", Signature::ByValue(native::natcasesort)),
    ("array_nat_case_sort", Signature::ByValue(native::natcasesort)),
    ("array_shuffle", Signature::ByValue(native::shuffle)),
    ("array_multisort", Signature::ByReference),
    ("array_pop", Signature::ByReference),
    ("array_push", Signature::ByReference),
    ("array_shift", Signature::ByReference),
    ("array_splice", Signature::ByReference),
    ("array_unshift", Signature::ByReference),
    ("array_walk", Signature::ByReference),
    ("array_walk_recursive", Signature::ByReference),
];

static REGISTRY: LazyLock<HashMap<&'static str, NativeOp>> = LazyLock::new(|| {
    NATIVES
        .iter()
        .map(|&(name, signature)| (name, NativeOp { name, signature }))
        .collect()
});

pub fn lookup(identifier: &str) -> Option<&'static NativeOp> {
    REGISTRY.get(identifier)
}

/// Every registered identifier, in table order.
pub fn identifiers() -> impl Iterator<Item = &'static str> {
    NATIVES.iter().map(|(name, _)| *name)
}

#[cfg(test)]
mod tests {
    use super::*;

    const IN_PLACE: [&str; 8] = [
        "array_multisort",
        "array_pop",
        "array_push",
        "array_shift",
        "array_splice",
        "array_unshift",
        "array_walk",
        "array_walk_recursive",
    ];

    #[test]
    fn in_place_natives_are_flagged() {
        for name in IN_PLACE {
            let op = lookup(name).unwrap();
            assert!(op.mutates_primary(), "{name} should be flagged");
        }
    }

    #[test]
    fn by_value_natives_are_not_flagged() {
        let flagged: Vec<_> = identifiers()
            .filter(|name| lookup(name).unwrap().mutates_primary())
            .collect();
        assert_eq!(flagged, IN_PLACE.to_vec());
    }

    #[test]
    fn identifiers_are_unique() {
        assert_eq!(REGISTRY.len(), NATIVES.len());
        assert!(lookup("array_test").is_none());
    }
}
