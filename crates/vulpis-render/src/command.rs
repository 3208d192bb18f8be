//! Render commands.

use vulpis_core::{Bounds, Color, FontId};

/// A single draw instruction for a renderer backend.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum RenderCommand {
    /// Fill a box with a solid color
    FillRect { bounds: Bounds, color: Color },
    /// Restrict drawing to a box until the matching `PopClip`
    PushClip { bounds: Bounds },
    /// End the innermost clip
    PopClip,
    /// Draw one line of text with its baseline at `y`
    DrawText {
        text: String,
        font: FontId,
        x: f32,
        y: f32,
        color: Color,
    },
}

/// An ordered list of render commands for one frame.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RenderCommandList {
    pub commands: Vec<RenderCommand>,
}

impl RenderCommandList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, command: RenderCommand) {
        self.commands.push(command);
    }

    pub fn fill_rect(&mut self, bounds: Bounds, color: Color) {
        self.push(RenderCommand::FillRect { bounds, color });
    }

    pub fn push_clip(&mut self, bounds: Bounds) {
        self.push(RenderCommand::PushClip { bounds });
    }

    pub fn pop_clip(&mut self) {
        self.push(RenderCommand::PopClip);
    }

    pub fn draw_text(&mut self, text: impl Into<String>, font: FontId, x: f32, y: f32, color: Color) {
        self.push(RenderCommand::DrawText {
            text: text.into(),
            font,
            x,
            y,
            color,
        });
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    pub fn clear(&mut self) {
        self.commands.clear();
    }

    pub fn iter(&self) -> std::slice::Iter<'_, RenderCommand> {
        self.commands.iter()
    }

    /// Whether every `PushClip` has a matching `PopClip` and no pop
    /// underflows.
    pub fn clips_balanced(&self) -> bool {
        let mut depth: usize = 0;
        for command in &self.commands {
            match command {
                RenderCommand::PushClip { .. } => depth += 1,
                RenderCommand::PopClip => match depth.checked_sub(1) {
                    Some(d) => depth = d,
                    None => return false,
                },
                RenderCommand::FillRect { .. } | RenderCommand::DrawText { .. } => {}
            }
        }
        depth == 0
    }
}

impl<'a> IntoIterator for &'a RenderCommandList {
    type Item = &'a RenderCommand;
    type IntoIter = std::slice::Iter<'a, RenderCommand>;

    fn into_iter(self) -> Self::IntoIter {
        self.commands.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_list_building() {
        let mut list = RenderCommandList::new();
        let bounds = Bounds::new(0.0, 0.0, 10.0, 10.0);
        list.fill_rect(bounds, Color::BLACK);
        list.push_clip(bounds);
        list.draw_text("hi", FontId(1), 0.0, 8.0, Color::WHITE);
        list.pop_clip();

        assert_eq!(list.len(), 4);
        assert!(list.clips_balanced());
        assert_eq!(list.commands[3], RenderCommand::PopClip);
    }

    #[test]
    fn test_unbalanced_clips() {
        let mut list = RenderCommandList::new();
        list.pop_clip();
        assert!(!list.clips_balanced());

        let mut list = RenderCommandList::new();
        list.push_clip(Bounds::default());
        assert!(!list.clips_balanced());
    }
}
