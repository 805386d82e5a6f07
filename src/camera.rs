#![warn(clippy::all, clippy::pedantic)]

/// Vertical render offset. Only the renderer applies it; gameplay math stays untranslated.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Camera {
    offset: f32,
}

impl Camera {
    #[must_use]
    pub fn offset(&self) -> f32 {
        self.offset
    }

    /// Scroll one block height once the stack is taller than `threshold`
    pub fn on_placement(&mut self, stack_len: usize, threshold: usize, block_height: f32) -> bool {
        if stack_len > threshold {
            self.offset += block_height;
            true
        } else {
            false
        }
    }

    #[must_use]
    pub fn to_screen_y(&self, y: f32) -> f32 {
        y + self.offset
    }
}
