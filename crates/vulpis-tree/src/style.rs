//! Reading loosely typed description styles into [`NodeStyle`].
//!
//! Malformed or missing fields never fail: every reader falls back to the
//! field's default.

use vulpis_core::{Color, Description, Edges, Length, Style, Value, UNBOUNDED};

use crate::node::{Align, Justify, NodeStyle};

/// Typed accessors over a style map.
#[derive(Debug, Clone, Copy)]
pub struct StyleReader<'a> {
    style: &'a Style,
}

impl<'a> StyleReader<'a> {
    pub fn new(style: &'a Style) -> Self {
        Self { style }
    }

    fn get(&self, key: &str) -> Option<&'a Value> {
        self.style.get(key).filter(|v| !v.is_nil())
    }

    /// A finite number, if present.
    pub fn number(&self, key: &str) -> Option<f32> {
        self.get(key).and_then(Value::as_number)
    }

    pub fn number_or(&self, key: &str, default: f32) -> f32 {
        self.number(key).unwrap_or(default)
    }

    pub fn string(&self, key: &str) -> Option<&'a str> {
        self.get(key).and_then(Value::as_str)
    }

    /// A length: numbers are pixels, strings are parsed ("50%", "12px").
    pub fn length(&self, key: &str) -> Option<Length> {
        match self.get(key)? {
            Value::Number(_) => self.number(key).map(Length::Px),
            Value::Str(s) => Some(Length::parse(s)),
            _ => None,
        }
    }

    /// A shorthand applied to all four edges, with per-edge overrides.
    pub fn edges(&self, prefix: &str) -> Edges {
        let all = self.number_or(prefix, 0.0);
        Edges {
            top: self.number_or(&format!("{prefix}Top"), all),
            bottom: self.number_or(&format!("{prefix}Bottom"), all),
            left: self.number_or(&format!("{prefix}Left"), all),
            right: self.number_or(&format!("{prefix}Right"), all),
        }
    }

    pub fn color(&self, key: &str) -> Option<Color> {
        self.get(key).and_then(parse_color)
    }
}

/// Parse a color from a hex string or a channel list.
///
/// Unparsable hex strings resolve to opaque white; list entries that are not
/// numbers count as full intensity. Other value types are not colors.
pub fn parse_color(value: &Value) -> Option<Color> {
    match value {
        Value::Str(hex) => Some(Color::from_hex(hex).unwrap_or(Color::WHITE)),
        Value::List(items) => {
            let channels: Vec<f32> = items
                .iter()
                .take(4)
                .map(|item| item.as_number().unwrap_or(255.0))
                .collect();
            Some(Color::from_channels(&channels))
        }
        _ => None,
    }
}

/// Resolve every style field of a description, applying defaults.
pub fn resolve_style(desc: &Description) -> NodeStyle {
    let r = StyleReader::new(&desc.style);

    let text_color = desc
        .color
        .as_ref()
        .and_then(parse_color)
        .or_else(|| r.color("color"))
        .unwrap_or(Color::WHITE);

    NodeStyle {
        width: r.length("width").or_else(|| r.length("w")).unwrap_or_default(),
        height: r.length("height").or_else(|| r.length("h")).unwrap_or_default(),
        min_width: r.number_or("minWidth", 0.0),
        max_width: r.number_or("maxWidth", UNBOUNDED),
        min_height: r.number_or("minHeight", 0.0),
        max_height: r.number_or("maxHeight", UNBOUNDED),
        padding: r.edges("padding"),
        margin: r.edges("margin"),
        spacing: r.number("gap").or_else(|| r.number("spacing")).unwrap_or(0.0),
        flex_grow: r.number_or("flexGrow", 0.0).max(0.0),
        align_items: r.string("alignItems").map(Align::parse).unwrap_or_default(),
        justify_content: r
            .string("justifyContent")
            .map(Justify::parse)
            .unwrap_or_default(),
        background: r.color("backgroundColor").or_else(|| r.color("BGColor")),
        overflow_hidden: r.string("overflow") != Some("visible"),
        text_color,
    }
}

/// Overwrite `field` with `value` and record whether it changed.
pub fn update<T: PartialEq>(field: &mut T, value: T, changed: &mut bool) {
    if *field != value {
        *field = value;
        *changed = true;
    }
}

/// Which kinds of work a style patch requires.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct StyleChange {
    pub layout: bool,
    pub paint: bool,
}

/// Patch `current` towards `next`, classifying each changed field.
pub fn patch_style(current: &mut NodeStyle, next: NodeStyle) -> StyleChange {
    let mut change = StyleChange::default();
    let layout = &mut change.layout;

    update(&mut current.width, next.width, layout);
    update(&mut current.height, next.height, layout);
    update(&mut current.min_width, next.min_width, layout);
    update(&mut current.max_width, next.max_width, layout);
    update(&mut current.min_height, next.min_height, layout);
    update(&mut current.max_height, next.max_height, layout);
    update(&mut current.padding, next.padding, layout);
    update(&mut current.margin, next.margin, layout);
    update(&mut current.spacing, next.spacing, layout);
    update(&mut current.flex_grow, next.flex_grow, layout);
    update(&mut current.align_items, next.align_items, layout);
    update(&mut current.justify_content, next.justify_content, layout);

    let paint = &mut change.paint;
    update(&mut current.background, next.background, paint);
    update(&mut current.overflow_hidden, next.overflow_hidden, paint);
    update(&mut current.text_color, next.text_color, paint);

    change
}
