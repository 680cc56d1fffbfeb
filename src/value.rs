//! Dynamic values and the capability traits the kernel dispatches on.
//!
//! Most kernel operations are generic over the element type. A few need to
//! look *inside* an element: `pluck` and `sort_by_field` read a named field,
//! `invoke_method` calls a named method, `flatten` asks whether an element is
//! itself a sequence. Those capabilities are expressed as small traits
//! ([`Record`], [`Methods`], [`Nested`], [`Truthy`]) and implemented for
//! [`Value`], a JSON-shaped dynamic value, plus the obvious std types.
//!
//! # Example
//!
//! ```rust
//! use underbar::{Record, Value};
//!
//! let person = Value::from_json(r#"{"name": "moe", "age": 40}"#)?;
//! assert_eq!(person.field("age"), Some(&Value::Int(40)));
//! assert_eq!(person.field("height"), None);
//! # Ok::<(), underbar::UnderbarError>(())
//! ```

use crate::error::Result;
use crate::kernel::Mapping;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::{BTreeMap, HashMap};
use std::fmt;

/// A dynamically typed value.
///
/// Serializes to and from plain JSON. Integers that fit in `i64` stay
/// integral; every other number becomes a `Float`.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    #[default]
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    String(String),
    List(Vec<Value>),
    Map(Mapping<Value>),
}

impl Value {
    /// Parse a JSON document into a value.
    pub fn from_json(json: &str) -> Result<Value> {
        Ok(serde_json::from_str(json)?)
    }

    /// Serialize this value as compact JSON.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    /// Name of the variant, for diagnostics.
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Bool(_) => "bool",
            Value::Int(_) => "int",
            Value::Float(_) => "float",
            Value::String(_) => "string",
            Value::List(_) => "list",
            Value::Map(_) => "map",
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Value::Int(i) => Some(*i),
            _ => None,
        }
    }

    /// Numeric view of `Int` and `Float`.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Int(i) => Some(*i as f64),
            Value::Float(f) => Some(*f),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[Value]> {
        match self {
            Value::List(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_map(&self) -> Option<&Mapping<Value>> {
        match self {
            Value::Map(map) => Some(map),
            _ => None,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::String(s) => f.write_str(s),
            other => {
                let json = serde_json::to_string(other).map_err(|_| fmt::Error)?;
                f.write_str(&json)
            }
        }
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Null, Value::Null) => true,
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::Int(a), Value::Int(b)) => a == b,
            (Value::Float(a), Value::Float(b)) => a == b,
            (Value::Int(a), Value::Float(b)) | (Value::Float(b), Value::Int(a)) => *a as f64 == *b,
            (Value::String(a), Value::String(b)) => a == b,
            (Value::List(a), Value::List(b)) => a == b,
            (Value::Map(a), Value::Map(b)) => a == b,
            _ => false,
        }
    }
}

/// Numbers order numerically across `Int` and `Float`, strings
/// lexicographically, booleans `false < true`. Anything else only compares
/// equal to an equal value and is otherwise unordered.
impl PartialOrd for Value {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        match (self, other) {
            (Value::Int(a), Value::Int(b)) => a.partial_cmp(b),
            (Value::Bool(a), Value::Bool(b)) => a.partial_cmp(b),
            (Value::String(a), Value::String(b)) => a.partial_cmp(b),
            (Value::Int(_) | Value::Float(_), Value::Int(_) | Value::Float(_)) => {
                self.as_f64()?.partial_cmp(&other.as_f64()?)
            }
            _ if self == other => Some(Ordering::Equal),
            _ => None,
        }
    }
}

// =============================================================================
// Conversions
// =============================================================================

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<i32> for Value {
    fn from(i: i32) -> Self {
        Value::Int(i as i64)
    }
}

impl From<i64> for Value {
    fn from(i: i64) -> Self {
        Value::Int(i)
    }
}

impl From<usize> for Value {
    fn from(i: usize) -> Self {
        Value::Int(i as i64)
    }
}

impl From<f64> for Value {
    fn from(f: f64) -> Self {
        Value::Float(f)
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

impl<T: Into<Value>> From<Vec<T>> for Value {
    fn from(items: Vec<T>) -> Self {
        Value::List(items.into_iter().map(Into::into).collect())
    }
}

impl From<Mapping<Value>> for Value {
    fn from(map: Mapping<Value>) -> Self {
        Value::Map(map)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(opt: Option<T>) -> Self {
        opt.map_or(Value::Null, Into::into)
    }
}

impl FromIterator<Value> for Value {
    fn from_iter<I: IntoIterator<Item = Value>>(iter: I) -> Self {
        Value::List(iter.into_iter().collect())
    }
}

// =============================================================================
// Truthy
// =============================================================================

/// Truthiness used by the default predicates of `every` and `some`.
pub trait Truthy {
    fn is_truthy(&self) -> bool;
}

impl Truthy for Value {
    fn is_truthy(&self) -> bool {
        match self {
            Value::Null => false,
            Value::Bool(b) => *b,
            Value::Int(i) => *i != 0,
            Value::Float(f) => *f != 0.0 && !f.is_nan(),
            Value::String(s) => !s.is_empty(),
            Value::List(_) | Value::Map(_) => true,
        }
    }
}

impl Truthy for bool {
    fn is_truthy(&self) -> bool {
        *self
    }
}

macro_rules! truthy_int {
    ($($t:ty),*) => {
        $(impl Truthy for $t {
            fn is_truthy(&self) -> bool {
                *self != 0
            }
        })*
    };
}

truthy_int!(i32, i64, u32, u64, usize);

impl Truthy for f64 {
    fn is_truthy(&self) -> bool {
        *self != 0.0 && !self.is_nan()
    }
}

impl Truthy for String {
    fn is_truthy(&self) -> bool {
        !self.is_empty()
    }
}

impl Truthy for &str {
    fn is_truthy(&self) -> bool {
        !self.is_empty()
    }
}

impl<T: Truthy> Truthy for Option<T> {
    fn is_truthy(&self) -> bool {
        self.as_ref().is_some_and(Truthy::is_truthy)
    }
}

// =============================================================================
// Record
// =============================================================================

/// Field lookup by name.
///
/// Backs `pluck` and `sort_by_field`. A missing field is `None`.
pub trait Record {
    type Field;

    fn field(&self, name: &str) -> Option<&Self::Field>;
}

impl Record for Value {
    type Field = Value;

    /// Maps look the name up as a key; lists accept a decimal index.
    fn field(&self, name: &str) -> Option<&Value> {
        match self {
            Value::Map(map) => map.get(name),
            Value::List(items) => name.parse::<usize>().ok().and_then(|i| items.get(i)),
            _ => None,
        }
    }
}

impl<V> Record for BTreeMap<String, V> {
    type Field = V;

    fn field(&self, name: &str) -> Option<&V> {
        self.get(name)
    }
}

impl<V> Record for HashMap<String, V> {
    type Field = V;

    fn field(&self, name: &str) -> Option<&V> {
        self.get(name)
    }
}

// =============================================================================
// Methods
// =============================================================================

/// Method lookup by name, used by `invoke_method`.
///
/// Returns `None` when the receiver has no method with that name.
pub trait Methods {
    fn call_method(&self, name: &str, args: &[Value]) -> Option<Value>;
}

impl Methods for Value {
    fn call_method(&self, name: &str, args: &[Value]) -> Option<Value> {
        match (self, name) {
            (Value::String(s), _) => s.call_method(name, args),
            (_, "to_string") => Some(Value::String(self.to_string())),
            (Value::List(items), "len") => Some(Value::from(items.len())),
            (Value::List(items), "sort") => {
                let mut sorted = items.clone();
                sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(Ordering::Equal));
                Some(Value::List(sorted))
            }
            (Value::List(items), "reverse") => Some(items.iter().rev().cloned().collect()),
            (Value::List(items), "concat") => {
                Some(items.iter().chain(args.iter()).cloned().collect())
            }
            (Value::List(items), "join") => {
                let sep = args.first().map_or_else(|| ",".to_string(), ToString::to_string);
                let parts: Vec<String> = items.iter().map(ToString::to_string).collect();
                Some(Value::String(parts.join(&sep)))
            }
            (Value::Map(map), "len") => Some(Value::from(map.len())),
            (Value::Map(map), "keys") => {
                Some(map.keys().map(|k| Value::from(k.as_str())).collect())
            }
            (Value::Map(map), "values") => Some(map.values().cloned().collect()),
            _ => None,
        }
    }
}

impl Methods for String {
    fn call_method(&self, name: &str, _args: &[Value]) -> Option<Value> {
        let result = match name {
            "len" => Value::from(self.chars().count()),
            "to_uppercase" => Value::String(self.to_uppercase()),
            "to_lowercase" => Value::String(self.to_lowercase()),
            "trim" => Value::from(self.trim()),
            "reverse" => Value::String(self.chars().rev().collect()),
            "to_string" => Value::String(self.clone()),
            _ => return None,
        };
        Some(result)
    }
}

// =============================================================================
// Nested
// =============================================================================

/// Values that may contain a sequence of values of the same type.
///
/// `flatten` descends into anything that reports children.
pub trait Nested: Sized {
    fn children(&self) -> Option<&[Self]>;
}

impl Nested for Value {
    fn children(&self) -> Option<&[Value]> {
        self.as_list()
    }
}
