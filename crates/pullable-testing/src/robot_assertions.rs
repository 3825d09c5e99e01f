//! Assertion helpers for pull tests.

use pullable_view::PullEvent;

/// Assert that a value is within `tolerance` of `expected`.
pub fn assert_approx_eq(actual: f32, expected: f32, tolerance: f32, msg: &str) {
    let diff = (actual - expected).abs();
    assert!(
        diff <= tolerance,
        "{}: expected {} (±{}), got {} (diff: {})",
        msg,
        expected,
        tolerance,
        actual,
        diff
    );
}

/// Assert that `values` never move away from `target` between samples.
pub fn assert_monotonic_towards(values: &[f32], target: f32, msg: &str) {
    for pair in values.windows(2) {
        assert!(
            (pair[1] - target).abs() <= (pair[0] - target).abs() + 1e-4,
            "{}: {} -> {} moves away from {}",
            msg,
            pair[0],
            pair[1],
            target
        );
    }
}

/// Assert the exact sequence of listener callbacks.
pub fn assert_events(actual: &[PullEvent], expected: &[PullEvent], msg: &str) {
    assert_eq!(actual, expected, "{}: unexpected listener callbacks", msg);
}
