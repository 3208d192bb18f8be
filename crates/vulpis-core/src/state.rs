//! The application state store shared between click handlers and the frame loop.
//!
//! The store is an explicit context object: the frame loop owns it and lends
//! it to handlers by `&mut`. Writes mark it dirty; the loop re-renders the
//! description on the next frame and clears the flag.

use indexmap::IndexMap;

/// A value held in the state store.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(untagged))]
pub enum StateValue {
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(String),
}

impl StateValue {
    /// Integral numbers are stored as `Int`, everything else as `Float`.
    pub fn from_number(n: f64) -> Self {
        if n.fract() == 0.0 && n >= i64::MIN as f64 && n <= i64::MAX as f64 {
            StateValue::Int(n as i64)
        } else {
            StateValue::Float(n)
        }
    }

    pub fn as_int(&self) -> Option<i64> {
        match self {
            StateValue::Int(i) => Some(*i),
            _ => None,
        }
    }

    pub fn as_float(&self) -> Option<f64> {
        match self {
            StateValue::Int(i) => Some(*i as f64),
            StateValue::Float(f) => Some(*f),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            StateValue::Str(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            StateValue::Bool(b) => Some(*b),
            _ => None,
        }
    }
}

impl From<i64> for StateValue {
    fn from(v: i64) -> Self {
        StateValue::Int(v)
    }
}

impl From<i32> for StateValue {
    fn from(v: i32) -> Self {
        StateValue::Int(v as i64)
    }
}

impl From<f64> for StateValue {
    fn from(v: f64) -> Self {
        StateValue::from_number(v)
    }
}

impl From<bool> for StateValue {
    fn from(v: bool) -> Self {
        StateValue::Bool(v)
    }
}

impl From<&str> for StateValue {
    fn from(v: &str) -> Self {
        StateValue::Str(v.to_string())
    }
}

impl From<String> for StateValue {
    fn from(v: String) -> Self {
        StateValue::Str(v)
    }
}

/// Key/value application state with a single dirty flag.
#[derive(Debug, Clone, Default)]
pub struct StateStore {
    values: IndexMap<String, StateValue>,
    dirty: bool,
}

impl StateStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Read a value, inserting `default` on first access. Does not mark dirty.
    pub fn get(&mut self, key: &str, default: impl Into<StateValue>) -> StateValue {
        self.values
            .entry(key.to_string())
            .or_insert_with(|| default.into())
            .clone()
    }

    /// Read a value without inserting.
    pub fn peek(&self, key: &str) -> Option<&StateValue> {
        self.values.get(key)
    }

    /// Write a value and mark the store dirty.
    pub fn set(&mut self, key: &str, value: impl Into<StateValue>) {
        self.values.insert(key.to_string(), value.into());
        self.dirty = true;
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    pub fn clear_dirty(&mut self) {
        self.dirty = false;
    }

    /// Force a re-render on the next frame without changing any value.
    pub fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &StateValue)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_inserts_default_once() {
        let mut store = StateStore::new();
        assert_eq!(store.get("count", 0), StateValue::Int(0));
        assert!(!store.is_dirty());

        store.set("count", 5);
        assert_eq!(store.get("count", 0), StateValue::Int(5));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_set_marks_dirty_until_cleared() {
        let mut store = StateStore::new();
        store.set("name", "fox");
        assert!(store.is_dirty());
        store.clear_dirty();
        assert!(!store.is_dirty());
        assert_eq!(store.peek("name").and_then(StateValue::as_str), Some("fox"));
    }

    #[test]
    fn test_integral_numbers_become_ints() {
        assert_eq!(StateValue::from(3.0), StateValue::Int(3));
        assert_eq!(StateValue::from(2.5), StateValue::Float(2.5));
        assert_eq!(StateValue::Int(4).as_float(), Some(4.0));
    }
}
