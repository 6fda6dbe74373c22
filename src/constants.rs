//! # Constants and type definitions for Cosmos
//!
//! This module centralizes the **conversion factors**, **solver defaults**, and **common type
//! aliases** used throughout the `cosmos` crate.
//!
//! ## Overview
//!
//! - Angular constants and unit conversions (degrees ↔ radians, days ↔ seconds)
//! - Default budgets and tolerance of the Kepler equation solver
//! - Core type aliases used across the crate
//!
//! Lengths are never converted implicitly: a body's position is always expressed
//! in the unit of its own semi-major axis (AU or km, by catalogue convention).

use nalgebra::Vector3;

// -------------------------------------------------------------------------------------------------
// Physical constants and unit conversions
// -------------------------------------------------------------------------------------------------

/// 2π, useful for trigonometric conversions
pub const DPI: f64 = 2. * std::f64::consts::PI;

/// Degrees → radians
pub const RADEG: f64 = std::f64::consts::PI / 180.0;

/// Number of seconds in a day
pub const SECONDS_PER_DAY: f64 = 86_400.0;

// -------------------------------------------------------------------------------------------------
// Kepler solver defaults
// -------------------------------------------------------------------------------------------------

/// Fixed number of Newton-Raphson steps always performed on Kepler's equation.
pub const NEWTON_ITERATIONS: usize = 10;

/// Hard cap on Newton-Raphson steps, extension included.
pub const MAX_NEWTON_ITERATIONS: usize = 100;

/// Maximum accepted residual `|E - e·sin(E) - M|` (radians).
pub const KEPLER_TOLERANCE: f64 = 1e-8;

/// Upper bound on the number of samples of a [`crate::trajectory::TimeGrid`].
pub const MAX_TIME_GRID_SAMPLES: usize = 10_000_000;

/// Version of the catalogue schema understood by [`crate::catalogue`].
pub const CATALOGUE_VERSION: u32 = 1;

// -------------------------------------------------------------------------------------------------
// Type aliases
// -------------------------------------------------------------------------------------------------

/// Angle in degrees
pub type Degree = f64;
/// Angle in radians
pub type Radian = f64;
/// Distance in kilometers
pub type Kilometer = f64;
/// Mass in kilograms
pub type Kilogram = f64;
/// Duration in days
pub type Day = f64;

/// Cartesian position `[x, y, z]`, in the length unit of the semi-major axis.
pub type Position = Vector3<f64>;
