//! Runtime value types for criteria.
//!
//! The [`Value`] enum holds whatever a caller put into a criterion: a string
//! typed into a search box, a flag, a page size, or a nested structure
//! forwarded from a request body. Values are stored as-is; the `to_*` methods
//! coerce them on read and never fail.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// A criterion value.
///
/// # Example
///
/// ```
/// use sift_criteria::Value;
///
/// let limit = Value::from("25");
/// assert_eq!(limit.to_int(), 25);
///
/// let published = Value::from(0);
/// assert!(!published.to_bool());
/// ```
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    /// No value.
    #[default]
    Null,
    /// Boolean value.
    Bool(bool),
    /// Numeric value.
    Number(Number),
    /// String value.
    String(String),
    /// Ordered list of values.
    List(Vec<Value>),
    /// Nested key/value structure.
    Map(BTreeMap<String, Value>),
}

impl Value {
    /// Returns `true` if this is a `Null` value.
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Coerces the value to a boolean.
    ///
    /// `Null`, `false`, zero, `""`, `"0"` and empty collections are false;
    /// everything else is true.
    pub fn to_bool(&self) -> bool {
        match self {
            Value::Null => false,
            Value::Bool(b) => *b,
            Value::Number(n) => !n.is_zero(),
            Value::String(s) => !(s.is_empty() || s == "0"),
            Value::List(items) => !items.is_empty(),
            Value::Map(entries) => !entries.is_empty(),
        }
    }

    /// Coerces the value to an integer.
    ///
    /// Strings contribute their leading integer (`"12abc"` is 12, `"abc"` is
    /// 0). Floats are truncated and saturate at the `i64` bounds. Collections
    /// are 1 when non-empty, 0 otherwise.
    pub fn to_int(&self) -> i64 {
        match self {
            Value::Null => 0,
            Value::Bool(b) => i64::from(*b),
            Value::Number(n) => n.to_i64(),
            Value::String(s) => leading_int(s),
            Value::List(items) => i64::from(!items.is_empty()),
            Value::Map(entries) => i64::from(!entries.is_empty()),
        }
    }

    /// Coerces the value to a string.
    ///
    /// `true` is `"1"`, `false` and `Null` are `""`. Collections have no
    /// scalar rendering and coerce to `""`.
    pub fn to_text(&self) -> String {
        match self {
            Value::Null | Value::Bool(false) | Value::List(_) | Value::Map(_) => String::new(),
            Value::Bool(true) => "1".to_string(),
            Value::Number(n) => n.to_string(),
            Value::String(s) => s.clone(),
        }
    }
}

fn leading_int(text: &str) -> i64 {
    let trimmed = text.trim_start();
    let (negative, rest) = match trimmed.as_bytes().first() {
        Some(b'-') => (true, &trimmed[1..]),
        Some(b'+') => (false, &trimmed[1..]),
        _ => (false, trimmed),
    };

    let magnitude = rest
        .bytes()
        .take_while(u8::is_ascii_digit)
        .fold(0i64, |acc, digit| {
            acc.saturating_mul(10).saturating_add(i64::from(digit - b'0'))
        });

    if negative {
        -magnitude
    } else {
        magnitude
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_text())
    }
}

/// Numeric value that preserves the source type.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Number {
    /// Signed integer.
    I64(i64),
    /// Unsigned integer.
    U64(u64),
    /// Floating point.
    F64(f64),
}

impl Number {
    /// Converts to i64, truncating floats and saturating out-of-range values.
    ///
    /// NaN converts to 0.
    pub fn to_i64(self) -> i64 {
        match self {
            Number::I64(n) => n,
            Number::U64(n) => i64::try_from(n).unwrap_or(i64::MAX),
            // `as` saturates at the bounds and maps NaN to 0
            Number::F64(n) => n as i64,
        }
    }

    /// Returns `true` if the number equals zero.
    pub fn is_zero(self) -> bool {
        match self {
            Number::I64(n) => n == 0,
            Number::U64(n) => n == 0,
            Number::F64(n) => n == 0.0,
        }
    }
}

impl fmt::Display for Number {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Number::I64(n) => write!(f, "{n}"),
            Number::U64(n) => write!(f, "{n}"),
            Number::F64(n) => write!(f, "{n}"),
        }
    }
}

impl From<i32> for Number {
    fn from(n: i32) -> Self {
        Number::I64(i64::from(n))
    }
}

impl From<i64> for Number {
    fn from(n: i64) -> Self {
        Number::I64(n)
    }
}

impl From<u32> for Number {
    fn from(n: u32) -> Self {
        Number::U64(u64::from(n))
    }
}

impl From<u64> for Number {
    fn from(n: u64) -> Self {
        Number::U64(n)
    }
}

impl From<usize> for Number {
    fn from(n: usize) -> Self {
        Number::U64(n as u64)
    }
}

impl From<f64> for Number {
    fn from(n: f64) -> Self {
        Number::F64(n)
    }
}

// Conversions into Value

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(s)
    }
}

impl From<Number> for Value {
    fn from(n: Number) -> Self {
        Value::Number(n)
    }
}

impl From<i32> for Value {
    fn from(n: i32) -> Self {
        Value::Number(n.into())
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::Number(n.into())
    }
}

impl From<u32> for Value {
    fn from(n: u32) -> Self {
        Value::Number(n.into())
    }
}

impl From<u64> for Value {
    fn from(n: u64) -> Self {
        Value::Number(n.into())
    }
}

impl From<usize> for Value {
    fn from(n: usize) -> Self {
        Value::Number(n.into())
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Value::Number(n.into())
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(value: Option<T>) -> Self {
        value.map_or(Value::Null, Into::into)
    }
}

impl<T: Into<Value>> From<Vec<T>> for Value {
    fn from(items: Vec<T>) -> Self {
        Value::List(items.into_iter().map(Into::into).collect())
    }
}

impl From<serde_json::Value> for Value {
    fn from(value: serde_json::Value) -> Self {
        match value {
            serde_json::Value::Null => Value::Null,
            serde_json::Value::Bool(b) => Value::Bool(b),
            serde_json::Value::Number(n) => {
                if let Some(i) = n.as_i64() {
                    Value::Number(Number::I64(i))
                } else if let Some(u) = n.as_u64() {
                    Value::Number(Number::U64(u))
                } else {
                    Value::Number(Number::F64(n.as_f64().unwrap_or_default()))
                }
            }
            serde_json::Value::String(s) => Value::String(s),
            serde_json::Value::Array(items) => {
                Value::List(items.into_iter().map(Value::from).collect())
            }
            serde_json::Value::Object(entries) => Value::Map(
                entries
                    .into_iter()
                    .map(|(key, value)| (key, Value::from(value)))
                    .collect(),
            ),
        }
    }
}
