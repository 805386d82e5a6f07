#![warn(clippy::all, clippy::pedantic)]

use log::{debug, trace};

use crate::components::{Block, Direction, MovingBlock};
use crate::config::TuningConfig;

/// Outcome of dropping the moving block onto the landing target
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Placement {
    Landed(Block),
    Miss { overlap: f32 },
}

/// Horizontal overlap of the span `[left, left + width)` with `target`.
/// Returns `(start, end)`; the overlap length `end - start` is non-positive when they don't meet.
#[must_use]
pub fn overlap_span(left: f32, width: f32, target: &Block) -> (f32, f32) {
    let start = left.max(target.left);
    let end = (left + width).min(target.right());
    (start, end)
}

/// The tower and the block currently sliding above it
#[derive(Debug, Clone, PartialEq)]
pub struct Stack {
    // Never empty: index 0 is the foundation
    blocks: Vec<Block>,
    moving: MovingBlock,
    block_height: f32,
}

impl Stack {
    /// A fresh tower: one base block centred at the bottom of the viewport
    #[must_use]
    pub fn new(tuning: &TuningConfig) -> Self {
        let left = (tuning.viewport_width - tuning.initial_width) / 2.0;
        let base = Block {
            left,
            top: tuning.viewport_height - tuning.block_height,
            width: tuning.initial_width,
            color_index: 0,
        };

        Self {
            blocks: vec![base],
            moving: MovingBlock {
                left,
                width: tuning.initial_width,
                direction: Direction::Right,
                speed: tuning.base_speed,
            },
            block_height: tuning.block_height,
        }
    }

    /// Build a stack from explicit blocks. Returns `None` for an empty tower.
    #[must_use]
    pub fn from_blocks(blocks: Vec<Block>, moving: MovingBlock, block_height: f32) -> Option<Self> {
        if blocks.is_empty() {
            return None;
        }
        Some(Self {
            blocks,
            moving,
            block_height,
        })
    }

    #[must_use]
    pub fn blocks(&self) -> &[Block] {
        &self.blocks
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    // A stack always holds its foundation
    #[must_use]
    pub fn is_empty(&self) -> bool {
        false
    }

    /// The landing target
    #[must_use]
    pub fn top(&self) -> &Block {
        &self.blocks[self.blocks.len() - 1]
    }

    #[must_use]
    pub fn moving(&self) -> &MovingBlock {
        &self.moving
    }

    /// Top surface of the row the moving block travels in
    #[must_use]
    pub fn moving_top(&self) -> f32 {
        self.top().top - self.block_height
    }

    /// Slide the moving block, reflecting off either viewport edge
    pub fn advance_moving_block(&mut self, time_scale: f32, viewport_width: f32) {
        let moving = &mut self.moving;
        moving.left += moving.speed * moving.direction.sign() * time_scale;

        if moving.right() > viewport_width {
            moving.direction = Direction::Left;
        } else if moving.left < 0.0 {
            moving.direction = Direction::Right;
        }

        trace!("Moving block at {:.1} heading {:?}", moving.left, moving.direction);
    }

    /// Measure the moving block against the landing target. A positive overlap is sliced off
    /// and appended as the new landing target; anything else is a miss and leaves the tower alone.
    pub fn evaluate_placement(&mut self, score: u32, palette_size: usize) -> Placement {
        let top = *self.top();
        let (start, end) = overlap_span(self.moving.left, self.moving.width, &top);
        let overlap = end - start;

        // NaN falls through to a miss
        if overlap > 0.0 {
            let block = Block {
                left: start,
                top: top.top - self.block_height,
                width: overlap,
                color_index: (score as usize + 1) % palette_size.max(1),
            };
            self.blocks.push(block);
            debug!(
                "Placed block #{} at {:.1} with width {:.1}",
                self.blocks.len() - 1,
                block.left,
                block.width
            );
            Placement::Landed(block)
        } else {
            debug!("Miss: moving block at {:.1} vs target at {:.1}", self.moving.left, top.left);
            Placement::Miss { overlap }
        }
    }

    /// Put a fresh moving block, as wide as the landing target, just off the edge it travels away from
    pub fn respawn_moving_block(&mut self, direction: Direction, speed: f32, viewport_width: f32) {
        let width = self.top().width;
        let left = match direction {
            Direction::Right => -width,
            Direction::Left => viewport_width,
        };
        self.moving = MovingBlock {
            left,
            width,
            direction,
            speed,
        };
    }
}
