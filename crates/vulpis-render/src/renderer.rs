//! The renderer backend contract.

use vulpis_core::RenderError;

use crate::command::RenderCommandList;

/// A backend that consumes one command list per frame.
pub trait Renderer {
    fn begin_frame(&mut self) -> Result<(), RenderError>;

    fn submit(&mut self, commands: &RenderCommandList) -> Result<(), RenderError>;

    fn end_frame(&mut self) -> Result<(), RenderError>;
}

/// A renderer that keeps the commands of every finished frame.
///
/// Useful headless and in tests.
#[derive(Debug, Default, Clone)]
pub struct RecordingRenderer {
    frames: Vec<RenderCommandList>,
    current: Option<RenderCommandList>,
}

impl RecordingRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Finished frames, oldest first.
    pub fn frames(&self) -> &[RenderCommandList] {
        &self.frames
    }

    pub fn last_frame(&self) -> Option<&RenderCommandList> {
        self.frames.last()
    }

    pub fn frame_count(&self) -> usize {
        self.frames.len()
    }
}

impl Renderer for RecordingRenderer {
    fn begin_frame(&mut self) -> Result<(), RenderError> {
        if self.current.is_some() {
            return Err(RenderError::FrameInProgress);
        }
        self.current = Some(RenderCommandList::new());
        Ok(())
    }

    fn submit(&mut self, commands: &RenderCommandList) -> Result<(), RenderError> {
        let frame = self.current.as_mut().ok_or(RenderError::NoActiveFrame)?;
        frame.commands.extend(commands.iter().cloned());
        Ok(())
    }

    fn end_frame(&mut self) -> Result<(), RenderError> {
        let frame = self.current.take().ok_or(RenderError::NoActiveFrame)?;
        self.frames.push(frame);
        Ok(())
    }
}
