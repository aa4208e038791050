//! Key/value fields attached to log entries.

use serde_json::Value;

/// A single structured field.
#[derive(Debug, Clone, PartialEq)]
pub struct Field {
    pub key: String,
    pub value: Value,
}

impl Field {
    /// Create a field from any JSON-convertible value.
    pub fn new(key: impl Into<String>, value: impl Into<Value>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }

    /// Create a field holding the `Display` rendering of `value`.
    pub fn display(key: impl Into<String>, value: impl std::fmt::Display) -> Self {
        Self::new(key, value.to_string())
    }
}

/// Build a `Vec<Field>` from `key => value` pairs.
///
/// ```
/// use batchlog::fields;
///
/// let fields = fields!["user_id" => "42", "attempt" => 3];
/// assert_eq!(fields.len(), 2);
/// ```
#[macro_export]
macro_rules! fields {
    () => {
        ::std::vec::Vec::<$crate::logger::Field>::new()
    };
    ($($key:expr => $value:expr),+ $(,)?) => {
        ::std::vec![$($crate::logger::Field::new($key, $value)),+]
    };
}
