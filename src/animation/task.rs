use crate::animation::waveform::{RenderedFrame, WaveformState};

/// Repeating per-frame task driving one Animating part.
///
/// The owning controller holds at most one task. Freezing a part consumes its task via
/// [`AnimationTask::cancel`], so no tick can be applied after the freeze.
#[derive(Debug)]
pub struct AnimationTask {
    part_index: usize,
    state: WaveformState,
    ticks: u64,
}

impl AnimationTask {
    /// Start driving `part_index` from `seed`.
    pub fn start(part_index: usize, seed: WaveformState) -> Self {
        Self {
            part_index,
            state: seed,
            ticks: 0,
        }
    }

    /// Index of the driven part within its scene.
    pub fn part_index(&self) -> usize {
        self.part_index
    }

    /// Number of frames produced so far.
    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    /// Counters that the next tick will render.
    pub fn state(&self) -> WaveformState {
        self.state
    }

    /// Produce one display frame and step the waveform.
    pub fn tick(&mut self) -> RenderedFrame {
        let (frame, next) = self.state.next();
        self.state = next;
        self.ticks += 1;
        frame
    }

    /// Stop the task, returning the number of frames it produced.
    pub fn cancel(self) -> u64 {
        tracing::debug!(
            part_index = self.part_index,
            ticks = self.ticks,
            "animation task cancelled"
        );
        self.ticks
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/task.rs"]
mod tests;
