//! Visual feedback while a card is being dragged.
//!
//! Everything here is presentational: the values tell the view how to tilt
//! and fade the card, they never commit anything.

use serde::{Deserialize, Serialize};

const ROTATION_INPUT: [f64; 2] = [-200.0, 200.0];
const ROTATION_OUTPUT: [f64; 2] = [-30.0, 30.0];

const OPACITY_INPUT: [f64; 5] = [-200.0, -100.0, 0.0, 100.0, 200.0];
const OPACITY_OUTPUT: [f64; 5] = [0.0, 1.0, 1.0, 1.0, 0.0];

const DONE_BADGE_INPUT: [f64; 2] = [0.0, 100.0];
const DONE_BADGE_OUTPUT: [f64; 2] = [0.0, 1.0];

const NOT_DONE_BADGE_INPUT: [f64; 2] = [-100.0, 0.0];
const NOT_DONE_BADGE_OUTPUT: [f64; 2] = [1.0, 0.0];

/// Piecewise-linear map of `x` from `input` breakpoints to `output` values.
///
/// `input` must be ascending and the same length as `output`. Values outside
/// the input domain clamp to the first/last output.
pub fn interpolate(input: &[f64], output: &[f64], x: f64) -> f64 {
    debug_assert_eq!(input.len(), output.len());
    debug_assert!(!input.is_empty());

    let last = input.len() - 1;
    if x <= input[0] {
        return output[0];
    }
    if x >= input[last] {
        return output[last];
    }

    for i in 0..last {
        let (x0, x1) = (input[i], input[i + 1]);
        if x <= x1 {
            let t = (x - x0) / (x1 - x0);
            return output[i] + t * (output[i + 1] - output[i]);
        }
    }
    output[last]
}

/// Offsets that are not finite are treated as the rest position.
pub(crate) fn sanitize(offset: f64) -> f64 {
    if offset.is_finite() { offset } else { 0.0 }
}

/// Card transform for a given drag offset.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DragFeedback {
    pub offset: f64,
    /// Degrees, positive = clockwise.
    pub rotation: f64,
    pub opacity: f64,
    /// Opacity of the "done" badge (fades in while dragging right).
    pub done_badge_opacity: f64,
    /// Opacity of the "not done" badge (fades in while dragging left).
    pub not_done_badge_opacity: f64,
}

impl DragFeedback {
    pub fn at(offset: f64) -> Self {
        let offset = sanitize(offset);
        Self {
            offset,
            rotation: interpolate(&ROTATION_INPUT, &ROTATION_OUTPUT, offset),
            opacity: interpolate(&OPACITY_INPUT, &OPACITY_OUTPUT, offset),
            done_badge_opacity: interpolate(&DONE_BADGE_INPUT, &DONE_BADGE_OUTPUT, offset),
            not_done_badge_opacity: interpolate(
                &NOT_DONE_BADGE_INPUT,
                &NOT_DONE_BADGE_OUTPUT,
                offset,
            ),
        }
    }

    /// Resting card: no tilt, fully opaque, no badges.
    pub fn rest() -> Self {
        Self::at(0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[rstest]
    #[case::left_edge(-200.0, -30.0)]
    #[case::beyond_left(-400.0, -30.0)]
    #[case::center(0.0, 0.0)]
    #[case::half_right(100.0, 15.0)]
    #[case::right_edge(200.0, 30.0)]
    #[case::beyond_right(1000.0, 30.0)]
    fn rotation_is_linear_and_clamped(#[case] offset: f64, #[case] expected: f64) {
        assert!(close(DragFeedback::at(offset).rotation, expected));
    }

    #[rstest]
    #[case(-250.0, 0.0)]
    #[case(-150.0, 0.5)]
    #[case(-100.0, 1.0)]
    #[case(50.0, 1.0)]
    #[case(100.0, 1.0)]
    #[case(150.0, 0.5)]
    #[case(200.0, 0.0)]
    fn opacity_fades_past_threshold(#[case] offset: f64, #[case] expected: f64) {
        assert!(close(DragFeedback::at(offset).opacity, expected));
    }

    #[test]
    fn badges_fade_in_by_direction() {
        let right = DragFeedback::at(50.0);
        assert!(close(right.done_badge_opacity, 0.5));
        assert!(close(right.not_done_badge_opacity, 0.0));

        let left = DragFeedback::at(-100.0);
        assert!(close(left.done_badge_opacity, 0.0));
        assert!(close(left.not_done_badge_opacity, 1.0));
    }

    #[test]
    fn non_finite_offset_renders_at_rest() {
        assert_eq!(DragFeedback::at(f64::NAN), DragFeedback::rest());
        assert_eq!(DragFeedback::at(f64::INFINITY), DragFeedback::rest());
    }
}
