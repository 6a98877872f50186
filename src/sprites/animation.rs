//! Per-entity animation clock for multi-frame texture variations.
//!
//! The clock is derived state: it is rebuilt from frame 0 whenever an entity's
//! texture changes, and advanced once per draw by the real-time delta.

use crate::textures::{AnimationFrame, next_valid_frame};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct AnimationClock {
    /// Column shown right now.
    pub current_frame: i32,
    /// Position within the variation's frame list.
    pub frame_index: usize,
    /// How long the current frame stays up.
    pub frame_duration_ms: u32,
    /// Time spent on the current frame so far.
    pub elapsed_ms: u32,
}

impl AnimationClock {
    /// Clock parked on the first frame, or `None` for an empty animation.
    pub fn start(frames: &[AnimationFrame]) -> Option<Self> {
        let first = frames.first()?;
        Some(Self {
            current_frame: first.frame,
            frame_index: 0,
            frame_duration_ms: first.duration,
            elapsed_ms: 0,
        })
    }

    /// Advance by `delta_ms`. Returns true when the frame changed.
    ///
    /// Moving to a new frame resets `elapsed_ms` to zero; leftover time is not
    /// carried into the next frame.
    pub fn tick(&mut self, frames: &[AnimationFrame], delta_ms: u32, active: bool) -> bool {
        self.elapsed_ms = self.elapsed_ms.saturating_add(delta_ms);

        let frame_valid = frames
            .get(self.frame_index)
            .is_some_and(|frame| frame.state.allows(active));
        if self.elapsed_ms < self.frame_duration_ms && frame_valid {
            return false;
        }

        let index = next_valid_frame(frames, self.frame_index, active);
        let Some(frame) = frames.get(index) else {
            return false;
        };

        self.frame_index = index;
        self.current_frame = frame.frame;
        self.frame_duration_ms = frame.duration;
        self.elapsed_ms = 0;
        true
    }
}
