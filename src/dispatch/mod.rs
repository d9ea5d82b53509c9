//! Invoking array functions by method name.
//!
//! [`ArrayList::call`] resolves a method name (`countValues`, `reverse`, ...)
//! against a closed table of native array functions. Natives that would have to
//! write to the list in place are refused; everything else runs on a private
//! copy of the list, and collection results come back as a new list carrying
//! the receiver's flags.

pub mod naming;
pub mod native;
pub mod registry;

use tracing::{debug, warn};

use crate::core::error::ListError;
use crate::core::mapping::ArrayList;
use crate::core::types::Value;
use crate::dispatch::registry::{NativeOp, Output, Signature};

/// Per-call record of how a method name was resolved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OperationDescriptor {
    pub invoked: String,
    pub identifier: &'static str,
    pub mutates_primary: bool,
}

fn resolve(name: &str) -> Result<&'static NativeOp, ListError> {
    let identifier = naming::native_identifier(name);
    registry::lookup(&identifier).ok_or_else(|| ListError::UnknownOperation(name.to_owned()))
}

/// Resolves `name` without running anything.
pub fn describe(name: &str) -> Result<OperationDescriptor, ListError> {
    let op = resolve(name)?;
    Ok(OperationDescriptor {
        invoked: name.to_owned(),
        identifier: op.name,
        mutates_primary: op.mutates_primary(),
    })
}

impl ArrayList {
    /// Runs the native array function named by `name` on a copy of this list.
    ///
    /// `args` follow the list in the native's parameter order. Collection
    /// results are returned as [`Value::Array`]; scalars pass through.
    ///
    /// Fails with [`ListError::UnknownOperation`] when nothing matches `name` and
    /// [`ListError::UnsupportedOperation`] when the native takes its array by
    /// reference.
    pub fn call(&self, name: &str, args: &[Value]) -> Result<Value, ListError> {
        let op = resolve(name)?;

        let native = match op.signature {
            Signature::ByValue(native) => native,
            Signature::ByReference => {
                warn!(invoked = name, native = op.name, "refusing in-place array function");
                return Err(ListError::UnsupportedOperation(op.name));
            }
        };

        debug!(invoked = name, native = op.name, args = args.len(), "dispatching");
        match native(self.to_mapping(), args)? {
            Output::Pairs(pairs) => Ok(Value::Array(self.make(pairs))),
            Output::Nested(parts) => {
                let parts = parts.into_iter().map(|p| Value::Array(self.make(p))).collect();
                Ok(Value::Array(self.make_list(parts)))
            }
            Output::Scalar(value) => Ok(value),
        }
    }

    /// Like [`call`](ArrayList::call) for functions known to return a collection.
    pub fn call_list(&self, name: &str, args: &[Value]) -> Result<ArrayList, ListError> {
        let descriptor = describe(name)?;
        match self.call(name, args)? {
            Value::Array(list) => Ok(list),
            other => Err(ListError::invalid(
                descriptor.identifier,
                format!("expected a collection result, got {other:?}"),
            )),
        }
    }
}
