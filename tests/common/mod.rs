#![allow(dead_code)]
use approx::assert_abs_diff_eq;
use cosmos::{OrbitalElements, Position};

pub fn assert_position_close(actual: &Position, expected: &Position, epsilon: f64) {
    assert_abs_diff_eq!(actual.x, expected.x, epsilon = epsilon);
    assert_abs_diff_eq!(actual.y, expected.y, epsilon = epsilon);
    assert_abs_diff_eq!(actual.z, expected.z, epsilon = epsilon);
}

pub fn earth_like() -> OrbitalElements {
    OrbitalElements::new(0.0167, 1.0, 0.0, 365.25).unwrap()
}

pub fn mars_like() -> OrbitalElements {
    OrbitalElements::from_degrees(0.0934, 1.52, 5.65, 687.0).unwrap()
}

/// A spread of times covering negative values, fractions of a period and many revolutions.
pub fn sample_times(period: f64) -> Vec<f64> {
    let mut times: Vec<f64> = (-12..=12).map(|k| k as f64 * period / 7.3).collect();
    times.extend([period * 1000.25, -period * 333.5, 0.123]);
    times
}
