//! Greedy word wrapping.

use vulpis_core::{FontId, FontProvider};
use vulpis_tree::TextLine;

/// Wrap `text` into lines no wider than `max_width` where possible.
///
/// Words are accumulated onto the current line while the line plus a space
/// and the next word still fits; otherwise the line is flushed and the word
/// starts a new one. A word wider than `max_width` gets a line to itself.
/// An explicit newline always flushes.
pub fn wrap_text(fonts: &dyn FontProvider, font: FontId, text: &str, max_width: f32) -> Vec<TextLine> {
    if text.is_empty() {
        return Vec::new();
    }

    let space = fonts.measure(font, " ");
    let mut lines = Vec::new();

    for paragraph in text.split('\n') {
        let mut line = TextLine::default();
        for word in paragraph.split(' ').filter(|w| !w.is_empty()) {
            let word_width = fonts.measure(font, word);
            let joined = line.width + space + word_width;
            if line.text.is_empty() {
                line.text.push_str(word);
                line.width = word_width;
            } else if joined <= max_width {
                line.text.push(' ');
                line.text.push_str(word);
                line.width = joined;
            } else {
                lines.push(std::mem::take(&mut line));
                line.text.push_str(word);
                line.width = word_width;
            }
        }
        lines.push(line);
    }

    lines
}

/// Width of the widest line.
pub fn block_width(lines: &[TextLine]) -> f32 {
    lines.iter().map(|l| l.width).fold(0.0, f32::max)
}
