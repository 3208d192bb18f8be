//! The declarative view description produced by the host on every render.
//!
//! A [`Description`] is immutable input: the tree builder and reconciler only
//! read it. Style fields are kept as loosely typed [`Value`]s because the
//! host may send anything; readers fall back to defaults on mismatch.

use indexmap::IndexMap;

use crate::font::FontId;
use crate::handler::HandlerRef;

/// A loosely typed style value as sent by the host.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(untagged))]
pub enum Value {
    #[default]
    Nil,
    Bool(bool),
    Number(f64),
    Str(String),
    List(Vec<Value>),
}

impl Value {
    pub fn as_number(&self) -> Option<f32> {
        match self {
            Value::Number(n) if n.is_finite() => Some(*n as f32),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Str(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[Value]> {
        match self {
            Value::List(items) => Some(items),
            _ => None,
        }
    }

    pub fn is_nil(&self) -> bool {
        matches!(self, Value::Nil)
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Value::Number(v)
    }
}

impl From<f32> for Value {
    fn from(v: f32) -> Self {
        Value::Number(v as f64)
    }
}

impl From<i32> for Value {
    fn from(v: i32) -> Self {
        Value::Number(v as f64)
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Value::Bool(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::Str(v.to_string())
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Value::Str(v)
    }
}

impl From<[u8; 4]> for Value {
    fn from(rgba: [u8; 4]) -> Self {
        Value::List(rgba.iter().map(|&c| Value::Number(c as f64)).collect())
    }
}

impl From<Vec<Value>> for Value {
    fn from(items: Vec<Value>) -> Self {
        Value::List(items)
    }
}

/// Style map in the order the host wrote it.
pub type Style = IndexMap<String, Value>;

/// One node of the declarative view description.
#[derive(Debug, Clone, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct Description {
    /// Node kind tag ("vstack", "hstack", "text", ...).
    #[cfg_attr(feature = "serde", serde(rename = "type", alias = "kind"))]
    pub kind: String,
    pub style: Style,
    pub children: Vec<Description>,
    pub key: Option<String>,
    #[cfg_attr(feature = "serde", serde(skip))]
    pub on_click: Option<HandlerRef>,
    pub text: Option<String>,
    pub font: Option<FontId>,
    /// Text color (hex string or channel list).
    pub color: Option<Value>,
}

impl Description {
    pub fn new(kind: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            ..Default::default()
        }
    }

    /// A horizontal stack.
    pub fn row() -> Self {
        Self::new("hstack")
    }

    /// A vertical stack.
    pub fn column() -> Self {
        Self::new("vstack")
    }

    pub fn rect() -> Self {
        Self::new("rect")
    }

    pub fn text(content: impl Into<String>) -> Self {
        Self {
            text: Some(content.into()),
            ..Self::new("text")
        }
    }

    pub fn style(mut self, key: &str, value: impl Into<Value>) -> Self {
        self.style.insert(key.to_string(), value.into());
        self
    }

    pub fn child(mut self, child: Description) -> Self {
        self.children.push(child);
        self
    }

    pub fn children(mut self, children: impl IntoIterator<Item = Description>) -> Self {
        self.children.extend(children);
        self
    }

    pub fn key(mut self, key: impl Into<String>) -> Self {
        self.key = Some(key.into());
        self
    }

    pub fn on_click(mut self, handler: HandlerRef) -> Self {
        self.on_click = Some(handler);
        self
    }

    pub fn font(mut self, font: FontId) -> Self {
        self.font = Some(font);
        self
    }

    pub fn color(mut self, color: impl Into<Value>) -> Self {
        self.color = Some(color.into());
        self
    }

    /// Total number of descriptions in this subtree, including itself.
    pub fn subtree_len(&self) -> usize {
        1 + self.children.iter().map(Description::subtree_len).sum::<usize>()
    }

    /// Parse a description tree from JSON. Callbacks cannot be expressed in
    /// JSON and are always absent.
    #[cfg(feature = "serde")]
    pub fn from_json_str(json: &str) -> Result<Self, crate::errors::DescriptionError> {
        serde_json::from_str(json).map_err(|e| crate::errors::DescriptionError::InvalidJson {
            reason: e.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder() {
        let desc = Description::column()
            .style("padding", 8)
            .style("backgroundColor", "#FF0000")
            .key("root")
            .child(Description::text("hello").font(FontId(1)))
            .child(Description::rect().style("width", "50%"));

        assert_eq!(desc.kind, "vstack");
        assert_eq!(desc.key.as_deref(), Some("root"));
        assert_eq!(desc.style.get("padding").and_then(Value::as_number), Some(8.0));
        assert_eq!(desc.children.len(), 2);
        assert_eq!(desc.children[0].text.as_deref(), Some("hello"));
        assert_eq!(desc.subtree_len(), 3);
    }

    #[test]
    fn test_style_keeps_insertion_order() {
        let desc = Description::rect().style("b", 1).style("a", 2);
        let keys: Vec<&str> = desc.style.keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["b", "a"]);
    }

    #[test]
    fn test_value_accessors() {
        assert_eq!(Value::from(3).as_number(), Some(3.0));
        assert_eq!(Value::Number(f64::NAN).as_number(), None);
        assert_eq!(Value::from("x").as_str(), Some("x"));
        assert_eq!(Value::from([1u8, 2, 3, 4]).as_list().map(|l| l.len()), Some(4));
        assert!(Value::Nil.is_nil());
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_from_json() {
        let desc = Description::from_json_str(
            r##"{
                "type": "hstack",
                "style": { "gap": 4, "backgroundColor": [10, 20, 30], "overflow": "visible", "bg": null },
                "children": [
                    { "type": "text", "text": "hi", "font": 2, "key": "t" }
                ]
            }"##,
        )
        .unwrap();

        assert_eq!(desc.kind, "hstack");
        assert_eq!(desc.style.get("gap"), Some(&Value::Number(4.0)));
        assert_eq!(desc.style.get("bg"), Some(&Value::Nil));
        assert_eq!(desc.children[0].font, Some(FontId(2)));
        assert_eq!(desc.children[0].key.as_deref(), Some("t"));
        assert!(desc.on_click.is_none());
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_from_json_rejects_garbage() {
        assert!(Description::from_json_str("[1, 2").is_err());
    }
}
