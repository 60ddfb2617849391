//! GestureInterpreter: turns a released drag (or a button press) into a
//! triage outcome.

use serde::{Deserialize, Serialize};

use super::feedback::{DragFeedback, sanitize};

/// Default release threshold, in the same unit as drag offsets.
pub const DEFAULT_SWIPE_THRESHOLD: f64 = 100.0;

/// Horizontal distance a committed card travels while it animates out.
pub const EXIT_OFFSET: f64 = 500.0;

/// Which way a committed card leaves the screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExitDirection {
    Left,
    Right,
}

impl ExitDirection {
    /// Right means done, left means not done.
    pub fn for_outcome(outcome: bool) -> Self {
        if outcome {
            ExitDirection::Right
        } else {
            ExitDirection::Left
        }
    }

    pub fn outcome(self) -> bool {
        matches!(self, ExitDirection::Right)
    }

    /// Target x-offset for the exit animation.
    pub fn exit_offset(self) -> f64 {
        match self {
            ExitDirection::Left => -EXIT_OFFSET,
            ExitDirection::Right => EXIT_OFFSET,
        }
    }
}

/// Result of interpreting a release or a button press.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum GestureOutcome {
    /// Accept `outcome`; the card exits towards `exit`.
    Commit { outcome: bool, exit: ExitDirection },

    /// Released within the threshold: snap back to 0, nothing happens.
    Cancel,
}

impl GestureOutcome {
    pub fn commit(outcome: bool) -> Self {
        GestureOutcome::Commit {
            outcome,
            exit: ExitDirection::for_outcome(outcome),
        }
    }

    pub fn outcome(&self) -> Option<bool> {
        match self {
            GestureOutcome::Commit { outcome, .. } => Some(*outcome),
            GestureOutcome::Cancel => None,
        }
    }

    pub fn is_cancel(&self) -> bool {
        matches!(self, GestureOutcome::Cancel)
    }
}

/// Pure interpretation of drag offsets.
///
/// No network, no state: the same offset always yields the same result.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GestureInterpreter {
    threshold: f64,
}

impl GestureInterpreter {
    /// `threshold` is taken as an absolute value; non-finite or zero values
    /// fall back to the default.
    pub fn new(threshold: f64) -> Self {
        let threshold = threshold.abs();
        let threshold = if threshold.is_finite() && threshold > 0.0 {
            threshold
        } else {
            DEFAULT_SWIPE_THRESHOLD
        };
        Self { threshold }
    }

    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    /// Visual feedback for an intermediate drag sample.
    pub fn feedback(&self, offset: f64) -> DragFeedback {
        DragFeedback::at(offset)
    }

    /// Interpret the final offset of a drag.
    ///
    /// Strictly beyond the threshold commits; on the threshold cancels.
    pub fn release(&self, offset: f64) -> GestureOutcome {
        let offset = sanitize(offset);
        if offset > self.threshold {
            GestureOutcome::commit(true)
        } else if offset < -self.threshold {
            GestureOutcome::commit(false)
        } else {
            GestureOutcome::Cancel
        }
    }

    /// Button path: always commits, no threshold check.
    pub fn button(&self, outcome: bool) -> GestureOutcome {
        GestureOutcome::commit(outcome)
    }
}

impl Default for GestureInterpreter {
    fn default() -> Self {
        Self::new(DEFAULT_SWIPE_THRESHOLD)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rstest::rstest;

    #[rstest]
    #[case::far_right(150.0, Some(true))]
    #[case::just_right(100.5, Some(true))]
    #[case::on_right_threshold(100.0, None)]
    #[case::small_right(50.0, None)]
    #[case::origin(0.0, None)]
    #[case::on_left_threshold(-100.0, None)]
    #[case::just_left(-100.5, Some(false))]
    #[case::far_left(-150.0, Some(false))]
    #[case::nan(f64::NAN, None)]
    fn release_uses_strict_threshold(#[case] offset: f64, #[case] expected: Option<bool>) {
        let interpreter = GestureInterpreter::default();
        assert_eq!(interpreter.release(offset).outcome(), expected);
    }

    #[test]
    fn commit_exit_direction_matches_outcome() {
        let interpreter = GestureInterpreter::default();
        assert_eq!(
            interpreter.release(120.0),
            GestureOutcome::Commit {
                outcome: true,
                exit: ExitDirection::Right
            }
        );
        assert_eq!(
            interpreter.release(-120.0),
            GestureOutcome::Commit {
                outcome: false,
                exit: ExitDirection::Left
            }
        );
        assert_eq!(ExitDirection::Right.exit_offset(), 500.0);
        assert_eq!(ExitDirection::Left.exit_offset(), -500.0);
    }

    #[test]
    fn button_always_commits() {
        let interpreter = GestureInterpreter::default();
        assert_eq!(interpreter.button(false), GestureOutcome::commit(false));
        assert_eq!(interpreter.button(true).outcome(), Some(true));
    }

    #[rstest]
    #[case::zero(0.0, DEFAULT_SWIPE_THRESHOLD)]
    #[case::nan(f64::NAN, DEFAULT_SWIPE_THRESHOLD)]
    #[case::infinite(f64::INFINITY, DEFAULT_SWIPE_THRESHOLD)]
    #[case::negative_is_absolute(-40.0, 40.0)]
    #[case::custom(60.0, 60.0)]
    fn threshold_is_normalized(#[case] threshold: f64, #[case] expected: f64) {
        assert_eq!(GestureInterpreter::new(threshold).threshold(), expected);
    }

    proptest! {
        #[test]
        fn within_threshold_always_cancels(offset in -100.0f64..=100.0) {
            prop_assert!(GestureInterpreter::default().release(offset).is_cancel());
        }

        #[test]
        fn beyond_threshold_right_is_done(offset in 100.001f64..10_000.0) {
            prop_assert_eq!(GestureInterpreter::default().release(offset).outcome(), Some(true));
        }

        #[test]
        fn beyond_threshold_left_is_not_done(offset in -10_000.0f64..-100.001) {
            prop_assert_eq!(GestureInterpreter::default().release(offset).outcome(), Some(false));
        }
    }
}
