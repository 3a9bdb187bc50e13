//! Assertion utilities for testing.
//!
//! This module provides helper functions for making assertions in tests,
//! particularly for floating-point comparisons.

/// Default epsilon for floating-point comparisons
pub const DEFAULT_EPSILON: f32 = 1e-6;

/// Assert that two floating-point values are approximately equal.
///
/// # Arguments
///
/// * `actual` - The actual value
/// * `expected` - The expected value
/// * `epsilon` - The maximum allowed difference (default: 1e-6)
///
/// # Panics
///
/// Panics if the absolute difference between `actual` and `expected` is greater than `epsilon`.
pub fn assert_approx_eq(actual: f32, expected: f32, epsilon: Option<f32>) {
    let epsilon = epsilon.unwrap_or(DEFAULT_EPSILON);
    let diff = (actual - expected).abs();

    assert!(
        diff <= epsilon,
        "Values not approximately equal: actual = {}, expected = {}, diff = {}, epsilon = {}",
        actual,
        expected,
        diff,
        epsilon
    );
}

/// Assert that a sequence of values is strictly increasing with even spacing.
///
/// # Panics
///
/// Panics if any adjacent pair is non-increasing or deviates from the
/// expected spacing by more than `epsilon`.
pub fn assert_evenly_spaced(values: &[f64], epsilon: f64) {
    assert!(values.len() >= 2, "Need at least two values");
    let step = (values[values.len() - 1] - values[0]) / (values.len() - 1) as f64;

    for (i, w) in values.windows(2).enumerate() {
        assert!(
            w[1] > w[0],
            "Values not strictly increasing at index {}: {} then {}",
            i,
            w[0],
            w[1]
        );
        let diff = (w[1] - w[0] - step).abs();
        assert!(
            diff <= epsilon,
            "Uneven spacing at index {}: got {}, expected {}, diff = {}",
            i,
            w[1] - w[0],
            step,
            diff
        );
    }
}
