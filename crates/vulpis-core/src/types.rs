//! Core value types shared by every stage of the pipeline.

use glam::Vec2;

/// Clamp ceiling used when no maximum size is requested.
pub const UNBOUNDED: f32 = 99999.0;

/// An 8-bit RGBA color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Create from hex string (e.g., "#FF5733", "FF5733" or "#FF573380").
    pub fn from_hex(hex: &str) -> Option<Self> {
        let hex = hex.trim().trim_start_matches('#');
        if !hex.is_ascii() {
            return None;
        }
        let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok();
        match hex.len() {
            6 => Some(Self::rgb(channel(0)?, channel(2)?, channel(4)?)),
            8 => Some(Self::rgba(channel(0)?, channel(2)?, channel(4)?, channel(6)?)),
            _ => None,
        }
    }

    /// Build from up to four channel values; missing channels are full intensity.
    pub fn from_channels(channels: &[f32]) -> Self {
        let channel = |i: usize| {
            channels
                .get(i)
                .map(|v| v.round().clamp(0.0, 255.0) as u8)
                .unwrap_or(255)
        };
        Self::rgba(channel(0), channel(1), channel(2), channel(3))
    }

    /// Convert to hex string (e.g., "#FF5733").
    pub fn to_hex(&self) -> String {
        if self.a == 255 {
            format!("#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
        } else {
            format!("#{:02X}{:02X}{:02X}{:02X}", self.r, self.g, self.b, self.a)
        }
    }

    pub const WHITE: Self = Self::rgb(255, 255, 255);
    pub const BLACK: Self = Self::rgb(0, 0, 0);
}

impl Default for Color {
    fn default() -> Self {
        Self::WHITE
    }
}

/// A requested length along one axis.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Length {
    /// Not requested; the measure pass assigns the intrinsic size.
    #[default]
    Auto,
    /// Absolute pixels.
    Px(f32),
    /// Percentage of the parent's content box.
    Percent(f32),
}

impl Length {
    /// Parse a length from its textual form ("50%", "120px", "120").
    pub fn parse(s: &str) -> Self {
        let s = s.trim();
        if let Some(pct) = s.strip_suffix('%') {
            return pct.trim().parse().map(Length::Percent).unwrap_or_default();
        }
        let px = s.strip_suffix("px").unwrap_or(s);
        px.trim().parse().map(Length::Px).unwrap_or_default()
    }

    /// Resolve against the parent's content extent. `None` means the size is
    /// not definite and must come from measurement.
    pub fn resolve(&self, parent: Option<f32>) -> Option<f32> {
        match *self {
            Length::Auto => None,
            Length::Px(v) => Some(v),
            Length::Percent(p) => parent.map(|extent| extent * p / 100.0),
        }
    }

    pub fn is_auto(&self) -> bool {
        matches!(self, Length::Auto)
    }

    pub fn is_percent(&self) -> bool {
        matches!(self, Length::Percent(_))
    }
}

/// Per-edge values for padding and margin.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Edges {
    pub top: f32,
    pub bottom: f32,
    pub left: f32,
    pub right: f32,
}

impl Edges {
    /// Same value on all four edges.
    pub fn uniform(value: f32) -> Self {
        Self {
            top: value,
            bottom: value,
            left: value,
            right: value,
        }
    }

    pub fn horizontal(&self) -> f32 {
        self.left + self.right
    }

    pub fn vertical(&self) -> f32 {
        self.top + self.bottom
    }
}

/// A width/height pair.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Size {
    pub width: f32,
    pub height: f32,
}

impl Size {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }
}

/// Axis-aligned box in absolute window coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Bounds {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Bounds {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self { x, y, width, height }
    }

    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }

    /// Half-open containment: the right and bottom edges are outside.
    pub fn contains(&self, point: Vec2) -> bool {
        point.x >= self.x && point.x < self.right() && point.y >= self.y && point.y < self.bottom()
    }

    /// Shrink by per-edge insets, never producing a negative size.
    pub fn inset(&self, edges: &Edges) -> Bounds {
        Bounds::new(
            self.x + edges.left,
            self.y + edges.top,
            (self.width - edges.horizontal()).max(0.0),
            (self.height - edges.vertical()).max(0.0),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_color_from_hex() {
        assert_eq!(Color::from_hex("#FF5733"), Some(Color::rgb(255, 87, 51)));
        assert_eq!(Color::from_hex("00000080"), Some(Color::rgba(0, 0, 0, 128)));
        assert_eq!(Color::from_hex("#12"), None);
        assert_eq!(Color::from_hex("#GG0000"), None);
    }

    #[test]
    fn test_color_missing_channels_are_full() {
        assert_eq!(Color::from_channels(&[10.0, 20.0]), Color::rgba(10, 20, 255, 255));
        assert_eq!(Color::from_channels(&[]), Color::WHITE);
        assert_eq!(Color::from_channels(&[300.0, -4.0, 0.0, 7.0]), Color::rgba(255, 0, 0, 7));
    }

    #[test]
    fn test_color_hex_roundtrip_format() {
        assert_eq!(Color::rgb(255, 87, 51).to_hex(), "#FF5733");
        assert_eq!(Color::rgba(1, 2, 3, 4).to_hex(), "#01020304");
    }

    #[test]
    fn test_length_parse() {
        assert_eq!(Length::parse("50%"), Length::Percent(50.0));
        assert_eq!(Length::parse("120px"), Length::Px(120.0));
        assert_eq!(Length::parse(" 42 "), Length::Px(42.0));
        assert_eq!(Length::parse("wide"), Length::Auto);
        assert_eq!(Length::parse("abc%"), Length::Auto);
    }

    #[test]
    fn test_length_resolve() {
        assert_eq!(Length::Percent(50.0).resolve(Some(200.0)), Some(100.0));
        assert_eq!(Length::Percent(50.0).resolve(None), None);
        assert_eq!(Length::Px(30.0).resolve(None), Some(30.0));
        assert_eq!(Length::Auto.resolve(Some(10.0)), None);
    }

    #[test]
    fn test_bounds_contains_is_half_open() {
        let bounds = Bounds::new(10.0, 20.0, 100.0, 50.0);
        assert!(bounds.contains(Vec2::new(10.0, 20.0)));
        assert!(bounds.contains(Vec2::new(50.0, 40.0)));
        assert!(!bounds.contains(Vec2::new(110.0, 40.0)));
        assert!(!bounds.contains(Vec2::new(50.0, 70.0)));
    }

    #[test]
    fn test_bounds_inset() {
        let bounds = Bounds::new(0.0, 0.0, 100.0, 40.0);
        let inner = bounds.inset(&Edges { top: 5.0, bottom: 5.0, left: 10.0, right: 20.0 });
        assert!((inner.x - 10.0).abs() < 0.001);
        assert!((inner.y - 5.0).abs() < 0.001);
        assert!((inner.width - 70.0).abs() < 0.001);
        assert!((inner.height - 30.0).abs() < 0.001);

        let collapsed = bounds.inset(&Edges::uniform(60.0));
        assert_eq!(collapsed.width, 0.0);
        assert_eq!(collapsed.height, 0.0);
    }
}
