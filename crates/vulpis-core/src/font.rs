//! Font metrics contract used by text layout and command generation.

use indexmap::IndexMap;

/// Opaque handle to a font owned by the font provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct FontId(pub u32);

/// Vertical metrics of a font at its loaded size.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FontMetrics {
    /// Distance between consecutive baselines.
    pub line_height: f32,
    /// Distance from the top of a line to its baseline.
    pub ascent: f32,
}

/// Supplies glyph advances and line metrics for font handles.
pub trait FontProvider {
    /// Metrics for a font, or `None` if the handle does not resolve.
    fn metrics(&self, font: FontId) -> Option<FontMetrics>;

    /// Horizontal advance of a single character.
    fn advance(&self, font: FontId, ch: char) -> f32;

    /// Width of a run of characters.
    fn measure(&self, font: FontId, text: &str) -> f32 {
        text.chars().map(|ch| self.advance(font, ch)).sum()
    }
}

#[derive(Debug, Clone)]
struct MonospaceFace {
    name: String,
    size: f32,
    advance: f32,
    metrics: FontMetrics,
}

/// A font provider where every character has the same advance.
///
/// Used headless and in tests. Faces loaded by name and size get estimated
/// metrics (advance 0.55em, line height 1.2em, ascent 0.8em); faces added
/// with [`MonospaceFonts::insert`] use exact values.
#[derive(Debug, Clone)]
pub struct MonospaceFonts {
    faces: IndexMap<FontId, MonospaceFace>,
    next_id: u32,
}

impl Default for MonospaceFonts {
    fn default() -> Self {
        Self::new()
    }
}

impl MonospaceFonts {
    pub fn new() -> Self {
        Self {
            faces: IndexMap::new(),
            next_id: 1,
        }
    }

    /// Load a face by name and pixel size. Loading the same pair twice
    /// returns the same handle.
    pub fn load(&mut self, name: &str, size: f32) -> FontId {
        if let Some((&id, _)) = self
            .faces
            .iter()
            .find(|(_, face)| face.name == name && face.size == size)
        {
            return id;
        }
        let metrics = FontMetrics {
            line_height: size * 1.2,
            ascent: size * 0.8,
        };
        self.add(name.to_string(), size, size * 0.55, metrics)
    }

    /// Register a face with exact advance and metrics.
    pub fn insert(&mut self, advance: f32, metrics: FontMetrics) -> FontId {
        let name = format!("mono-{}", self.next_id);
        self.add(name, metrics.line_height, advance, metrics)
    }

    fn add(&mut self, name: String, size: f32, advance: f32, metrics: FontMetrics) -> FontId {
        let id = FontId(self.next_id);
        self.next_id += 1;
        self.faces.insert(
            id,
            MonospaceFace {
                name,
                size,
                advance,
                metrics,
            },
        );
        id
    }

    pub fn len(&self) -> usize {
        self.faces.len()
    }

    pub fn is_empty(&self) -> bool {
        self.faces.is_empty()
    }
}

impl FontProvider for MonospaceFonts {
    fn metrics(&self, font: FontId) -> Option<FontMetrics> {
        self.faces.get(&font).map(|face| face.metrics)
    }

    fn advance(&self, font: FontId, _ch: char) -> f32 {
        self.faces.get(&font).map(|face| face.advance).unwrap_or(0.0)
    }
}
