//! DragGesture: one press-move-release sequence on a card.

use super::feedback::{DragFeedback, sanitize};
use super::interpreter::{GestureInterpreter, GestureOutcome};

/// Tracks the offset stream of a single drag.
///
/// A drag always starts at 0. Samples only update the visual offset; the
/// outcome is decided once, on release.
#[derive(Debug, Clone)]
pub struct DragGesture {
    interpreter: GestureInterpreter,
    offset: f64,
    samples: usize,
}

impl DragGesture {
    pub fn begin(interpreter: GestureInterpreter) -> Self {
        Self {
            interpreter,
            offset: 0.0,
            samples: 0,
        }
    }

    /// Record an intermediate offset and return the feedback to render.
    pub fn sample(&mut self, offset: f64) -> DragFeedback {
        self.offset = sanitize(offset);
        self.samples += 1;
        self.interpreter.feedback(self.offset)
    }

    pub fn offset(&self) -> f64 {
        self.offset
    }

    pub fn samples(&self) -> usize {
        self.samples
    }

    /// Release at the last sampled offset.
    pub fn release(self) -> GestureOutcome {
        self.interpreter.release(self.offset)
    }

    /// Release at an explicit terminal offset.
    pub fn release_at(mut self, offset: f64) -> GestureOutcome {
        self.offset = sanitize(offset);
        self.release()
    }
}
