//! Immutable, order-preserving array lists.
//!
//! An [`ArrayList`] holds ordered `Key -> Value` pairs and never changes after
//! construction. Every transformation returns a new list; array functions can be
//! invoked by name through [`ArrayList::call`], which refuses functions that would
//! need to write to the list in place.

pub mod core;
pub mod dispatch;
pub mod interchange;
pub mod source;

pub use crate::core::error::ListError;
pub use crate::core::mapping::ArrayList;
pub use crate::core::sort::SortFlag;
pub use crate::core::types::{Flags, Key, Value};
pub use crate::dispatch::OperationDescriptor;
pub use crate::source::{Keyed, PairSource, Values};
