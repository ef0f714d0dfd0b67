use core::fmt::{self, Display};

use indexmap::IndexMap;
use num_bigint::BigInt;
use thisisplural::Plural;

use crate::number::Number;

/// Discriminator of [`Value`] variants, used in invalid-type reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValueKind {
    Null,
    Bool,
    String,
    Number,
    Array,
    Struct,
}

impl Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Null => write!(f, "null"),
            Self::Bool => write!(f, "boolean"),
            Self::String => write!(f, "string"),
            Self::Number => write!(f, "number"),
            Self::Array => write!(f, "array"),
            Self::Struct => write!(f, "struct"),
        }
    }
}

/// An immutable JSON-like value tree.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Null,
    Bool(bool),
    String(String),
    Number(Number),
    Array(Array),
    Struct(Struct),
}

impl Value {
    pub fn kind(&self) -> ValueKind {
        match self {
            Self::Null => ValueKind::Null,
            Self::Bool(_) => ValueKind::Bool,
            Self::String(_) => ValueKind::String,
            Self::Number(_) => ValueKind::Number,
            Self::Array(_) => ValueKind::Array,
            Self::Struct(_) => ValueKind::Struct,
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_number(&self) -> Option<&Number> {
        match self {
            Self::Number(n) => Some(n),
            _ => None,
        }
    }

    pub fn as_array(&self) -> Option<&Array> {
        match self {
            Self::Array(array) => Some(array),
            _ => None,
        }
    }

    pub fn as_struct(&self) -> Option<&Struct> {
        match self {
            Self::Struct(fields) => Some(fields),
            _ => None,
        }
    }

    /// Emptiness of containers and strings. Scalars other than strings are
    /// never empty; `Null` is.
    pub fn is_empty(&self) -> bool {
        match self {
            Self::Null => true,
            Self::String(s) => s.is_empty(),
            Self::Array(array) => array.is_empty(),
            Self::Struct(fields) => fields.is_empty(),
            Self::Bool(_) | Self::Number(_) => false,
        }
    }
}

/// Compact JSON rendering, used in error messages.
impl Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => write!(f, "null"),
            Value::Bool(b) => write!(f, "{}", b),
            Value::String(s) => write_quoted(f, s),
            Value::Number(n) => write!(f, "{}", n),
            Value::Array(items) => {
                write!(f, "[")?;
                for (i, item) in items.iter().enumerate() {
                    if i != 0 {
                        write!(f, ",")?;
                    }
                    write!(f, "{}", item)?;
                }
                write!(f, "]")
            }
            Value::Struct(fields) => {
                write!(f, "{{")?;
                for (i, (key, value)) in fields.iter().enumerate() {
                    if i != 0 {
                        write!(f, ",")?;
                    }
                    write_quoted(f, key)?;
                    write!(f, ":{}", value)?;
                }
                write!(f, "}}")
            }
        }
    }
}

fn write_quoted(f: &mut fmt::Formatter<'_>, s: &str) -> fmt::Result {
    write!(f, "\"")?;
    for c in s.chars() {
        match c {
            '"' => write!(f, "\\\"")?,
            '\\' => write!(f, "\\\\")?,
            '\n' => write!(f, "\\n")?,
            '\r' => write!(f, "\\r")?,
            '\t' => write!(f, "\\t")?,
            c if (c as u32) < 0x20 => write!(f, "\\u{:04x}", c as u32)?,
            c => write!(f, "{}", c)?,
        }
    }
    write!(f, "\"")
}

// ============================================================================
// Array
// ============================================================================

/// Ordered sequence of values.
#[derive(Debug, Default, Clone, PartialEq, Plural)]
#[plural(len, is_empty, iter, into_iter, into_iter_ref, from_iter, new)]
pub struct Array(Vec<Value>);

impl Array {
    pub fn get(&self, index: usize) -> Option<&Value> {
        self.0.get(index)
    }

    pub fn as_slice(&self) -> &[Value] {
        &self.0
    }

    pub fn into_vec(self) -> Vec<Value> {
        self.0
    }
}

impl From<Vec<Value>> for Array {
    fn from(values: Vec<Value>) -> Self {
        Array(values)
    }
}

// ============================================================================
// Struct
// ============================================================================

/// String-keyed fields in insertion order. Keys are unique; inserting an
/// existing key replaces the value in place.
///
/// Equality compares keys and values and ignores field order.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct Struct(IndexMap<String, Value>);

impl Struct {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    /// Used while building a struct, before it is shared.
    pub fn insert(&mut self, key: impl Into<String>, value: Value) -> Option<Value> {
        self.0.insert(key.into(), value)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v))
    }
}

impl<K: Into<String>> FromIterator<(K, Value)> for Struct {
    fn from_iter<T: IntoIterator<Item = (K, Value)>>(iter: T) -> Self {
        Struct(iter.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }
}

impl IntoIterator for Struct {
    type Item = (String, Value);
    type IntoIter = indexmap::map::IntoIter<String, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

// ============================================================================
// From implementations for Value
// ============================================================================

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

impl From<&String> for Value {
    fn from(s: &String) -> Self {
        Value::String(s.clone())
    }
}

impl From<Number> for Value {
    fn from(n: Number) -> Self {
        Value::Number(n)
    }
}

impl From<BigInt> for Value {
    fn from(n: BigInt) -> Self {
        Value::Number(n.into())
    }
}

macro_rules! value_from_integer {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for Value {
                fn from(n: $ty) -> Self {
                    Value::Number(n.into())
                }
            }
        )*
    };
}

value_from_integer!(i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize);

/// Non-finite floats have no JSON representation and become `Null`.
impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Number::from_f64(n).map_or(Value::Null, Value::Number)
    }
}

impl From<f32> for Value {
    fn from(n: f32) -> Self {
        Value::from(f64::from(n))
    }
}

impl From<Array> for Value {
    fn from(array: Array) -> Self {
        Value::Array(array)
    }
}

impl From<Struct> for Value {
    fn from(fields: Struct) -> Self {
        Value::Struct(fields)
    }
}

impl<T: Into<Value>> From<Vec<T>> for Value {
    fn from(values: Vec<T>) -> Self {
        Value::Array(values.into_iter().map(Into::into).collect())
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(value: Option<T>) -> Self {
        value.map_or(Value::Null, Into::into)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn person(name: &str, age: i64) -> Value {
        Value::Struct(Struct::from_iter([
            ("name", Value::from(name)),
            ("age", Value::from(age)),
        ]))
    }

    #[test]
    fn test_kind() {
        assert_eq!(Value::Null.kind(), ValueKind::Null);
        assert_eq!(Value::from(true).kind(), ValueKind::Bool);
        assert_eq!(Value::from("a").kind(), ValueKind::String);
        assert_eq!(Value::from(1).kind(), ValueKind::Number);
        assert_eq!(Value::from(vec![1, 2]).kind(), ValueKind::Array);
        assert_eq!(person("a", 1).kind(), ValueKind::Struct);
    }

    #[test]
    fn test_struct_keeps_insertion_order() {
        let mut fields = Struct::new();
        fields.insert("z", Value::Null);
        fields.insert("a", Value::Null);
        fields.insert("m", Value::Null);
        assert_eq!(fields.keys().collect::<Vec<_>>(), vec!["z", "a", "m"]);
    }

    #[test]
    fn test_struct_insert_replaces_existing_key() {
        let mut fields = Struct::new();
        fields.insert("a", Value::from(1));
        let old = fields.insert("a", Value::from(2));
        assert_eq!(old, Some(Value::from(1)));
        assert_eq!(fields.len(), 1);
        assert_eq!(fields.get("a"), Some(&Value::from(2)));
    }

    #[test]
    fn test_struct_equality_compares_values() {
        assert_eq!(person("Alice", 30), person("Alice", 30));
        assert_ne!(person("Alice", 30), person("Bob", 30));
    }

    #[test]
    fn test_struct_equality_ignores_order() {
        let a = Value::Struct(Struct::from_iter([
            ("x", Value::from(1)),
            ("y", Value::from(2)),
        ]));
        let b = Value::Struct(Struct::from_iter([
            ("y", Value::from(2)),
            ("x", Value::from(1)),
        ]));
        assert_eq!(a, b);
    }

    #[test]
    fn test_number_equality_is_textual() {
        assert_eq!(Value::from(10), Value::Number(Number::parse("10").unwrap()));
        assert_ne!(
            Value::Number(Number::parse("1.0").unwrap()),
            Value::Number(Number::parse("1").unwrap())
        );
    }

    #[test]
    fn test_is_empty() {
        assert!(Value::Null.is_empty());
        assert!(Value::from("").is_empty());
        assert!(Value::Array(Array::new()).is_empty());
        assert!(Value::Struct(Struct::new()).is_empty());
        assert!(!Value::from(0).is_empty());
        assert!(!Value::from(false).is_empty());
    }

    #[test]
    fn test_array_get() {
        let array: Array = vec![Value::from("+1"), Value::from("+2")].into();
        assert_eq!(array.get(1), Some(&Value::from("+2")));
        assert_eq!(array.get(2), None);
    }

    #[test]
    fn test_display_renders_compact_json() {
        let value = Value::Struct(Struct::from_iter([
            ("name", Value::from("say \"hi\"")),
            ("tags", Value::from(vec![Value::from(1), Value::Null, Value::from(true)])),
        ]));
        assert_eq!(value.to_string(), r#"{"name":"say \"hi\"","tags":[1,null,true]}"#);
    }

    #[test]
    fn test_non_finite_float_becomes_null() {
        assert_eq!(Value::from(f64::NAN), Value::Null);
        assert_eq!(Value::from(0.5f64), Value::Number(Number::parse("0.5").unwrap()));
    }
}
