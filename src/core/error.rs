// error taxonomy
use thiserror::Error;

use crate::core::types::Key;

/// Every failure an [`ArrayList`](crate::ArrayList) operation can report.
///
/// None of these are transient: they signal incorrect use of the API and are
/// returned to the caller as-is, never retried.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ListError {
    #[error("key {0} does not exist in this array list")]
    KeyNotFound(Key),

    #[error("this array list is immutable")]
    ImmutableViolation,

    #[error("method '{0}' does not exist for arrays")]
    UnknownOperation(String),

    //carries the resolved native identifier, not the invoked name
    #[error("function '{0}()' cannot be used on this array list")]
    UnsupportedOperation(&'static str),

    #[error("{op}(): {reason}")]
    InvalidArgument { op: &'static str, reason: String },

    #[error("interchange failed: {0}")]
    Interchange(String),
}

impl ListError {
    pub(crate) fn invalid(op: &'static str, reason: impl Into<String>) -> Self {
        ListError::InvalidArgument {
            op,
            reason: reason.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_name_the_offending_operation() {
        let unknown = ListError::UnknownOperation("test".into());
        assert_eq!(unknown.to_string(), "method 'test' does not exist for arrays");

        let unsupported = ListError::UnsupportedOperation("array_splice");
        assert_eq!(
            unsupported.to_string(),
            "function 'array_splice()' cannot be used on this array list"
        );

        let missing = ListError::KeyNotFound(Key::from("xyz"));
        assert_eq!(missing.to_string(), "key \"xyz\" does not exist in this array list");
    }
}
