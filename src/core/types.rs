//! Core value types shared by the rule engine

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// A dynamically-shaped design attribute
///
/// Contexts arrive from JSON or TOML, so values are untagged on the wire:
/// `80`, `"premium"`, `true`, `[..]` and `{..}` map straight onto variants.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    #[default]
    Null,
    Bool(bool),
    Number(f64),
    Text(String),
    List(Vec<Value>),
    Map(BTreeMap<String, Value>),
}

impl Value {
    /// Numeric coercion used by ordering comparisons
    ///
    /// Text is trimmed and parsed (empty text is zero), booleans are 1/0 and
    /// null is zero. Lists, maps and text spelling out infinity have no
    /// numeric value.
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Value::Number(n) if n.is_nan() => None,
            Value::Number(n) => Some(*n),
            Value::Bool(b) => Some(if *b { 1.0 } else { 0.0 }),
            Value::Null => Some(0.0),
            Value::Text(s) => {
                let trimmed = s.trim();
                if trimmed.is_empty() {
                    Some(0.0)
                } else {
                    trimmed.parse::<f64>().ok().filter(|n| n.is_finite())
                }
            }
            Value::List(_) | Value::Map(_) => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Text(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[Value]> {
        match self {
            Value::List(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_map(&self) -> Option<&BTreeMap<String, Value>> {
        match self {
            Value::Map(map) => Some(map),
            _ => None,
        }
    }

    /// Text rendering of scalar values, used for substring tests
    pub fn to_text(&self) -> Option<String> {
        match self {
            Value::Text(s) => Some(s.clone()),
            Value::Number(n) => Some(n.to_string()),
            Value::Bool(b) => Some(b.to_string()),
            Value::Null | Value::List(_) | Value::Map(_) => None,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => write!(f, "null"),
            Value::Bool(b) => write!(f, "{}", b),
            Value::Number(n) => write!(f, "{}", n),
            Value::Text(s) => write!(f, "\"{}\"", s),
            Value::List(items) => {
                write!(f, "[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", item)?;
                }
                write!(f, "]")
            }
            Value::Map(map) => {
                write!(f, "{{")?;
                for (i, (key, value)) in map.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}: {}", key, value)?;
                }
                write!(f, "}}")
            }
        }
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Value::Number(n)
    }
}

impl From<i32> for Value {
    fn from(n: i32) -> Self {
        Value::Number(n as f64)
    }
}

impl From<u32> for Value {
    fn from(n: u32) -> Self {
        Value::Number(n as f64)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Text(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Text(s)
    }
}

impl<T: Into<Value>> From<Vec<T>> for Value {
    fn from(items: Vec<T>) -> Self {
        Value::List(items.into_iter().map(Into::into).collect())
    }
}

impl From<Context> for Value {
    fn from(context: Context) -> Self {
        Value::Map(context.values)
    }
}

/// Snapshot of design attributes a rule is evaluated against
///
/// Keys are kept ordered so serialized contexts are byte-stable.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Context {
    values: BTreeMap<String, Value>,
}

impl Context {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert
    pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.insert(key, value);
        self
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        self.values.insert(key.into(), value.into());
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.values.get(key)
    }

    /// Resolve a dot-separated path through nested maps
    pub fn get_path(&self, path: &str) -> Option<&Value> {
        let mut segments = path.split('.');
        let mut current = self.values.get(segments.next()?)?;
        for segment in segments {
            current = current.as_map()?.get(segment)?;
        }
        Some(current)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl From<BTreeMap<String, Value>> for Context {
    fn from(values: BTreeMap<String, Value>) -> Self {
        Self { values }
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for Context {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut context = Context::new();
        for (key, value) in iter {
            context.insert(key, value);
        }
        context
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_numeric_coercion() {
        assert_eq!(Value::from(80).as_number(), Some(80.0));
        assert_eq!(Value::from(" 12.5 ").as_number(), Some(12.5));
        assert_eq!(Value::from("").as_number(), Some(0.0));
        assert_eq!(Value::from(true).as_number(), Some(1.0));
        assert_eq!(Value::Null.as_number(), Some(0.0));
        assert_eq!(Value::from("large").as_number(), None);
        assert_eq!(Value::from(vec![1, 2]).as_number(), None);
    }

    #[test]
    fn test_infinity_text_is_not_a_number() {
        assert_eq!(Value::from("inf").as_number(), None);
        assert_eq!(Value::from("-Infinity").as_number(), None);
        assert_eq!(Value::from("NaN").as_number(), None);
        assert_eq!(Value::from("1e3").as_number(), Some(1000.0));
    }

    #[test]
    fn test_structural_equality_is_type_strict() {
        assert_ne!(Value::from(80), Value::from("80"));
        assert_eq!(Value::from(vec!["a", "b"]), Value::from(vec!["a", "b"]));
    }

    #[test]
    fn test_nested_path_lookup() {
        let display = Context::new().with("size", 80);
        let context = Context::new().with("display", display);

        assert_eq!(context.get_path("display.size"), Some(&Value::Number(80.0)));
        assert_eq!(context.get_path("display.weight"), None);
        assert_eq!(context.get_path("display.size.inches"), None);
        assert!(context.get_path("display").is_some());
    }

    #[test]
    fn test_context_deserializes_from_json() {
        let json = r#"{
            "tier": "premium",
            "capacity": 12,
            "rooms": ["a", "b"],
            "display": {"size": 75}
        }"#;
        let context: Context = serde_json::from_str(json).unwrap();

        assert_eq!(context.get("tier"), Some(&Value::from("premium")));
        assert_eq!(context.get("capacity"), Some(&Value::Number(12.0)));
        assert_eq!(context.get_path("display.size"), Some(&Value::Number(75.0)));
    }
}
