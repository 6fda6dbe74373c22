//! # Orbital elements for two-body Kepler propagation
//!
//! This module defines [`OrbitalElements`](crate::orbital_elements::OrbitalElements), the
//! immutable value type consumed by the [`propagator`](crate::propagator).
//!
//! ## Elements
//!
//! 1. **e** – Eccentricity (unitless), in `[0, 1)`; `0` is a circular orbit.
//! 2. **a** – Semi-major axis, `≥ 0`, in the length unit of the computation (AU or km).
//! 3. **i** – Inclination (radians) of the orbital plane relative to the reference plane.
//! 4. **P** – Orbital period, `≥ 0`, in the time unit of the computation (usually days).
//! 5. **M₀** – Mean anomaly at `t = 0` (radians), default `0`.
//!
//! A period of `0` is the sentinel for a body that does not orbit (e.g. the central star of
//! a simplified single-frame system): its position is the origin at all times.
//!
//! Longitude of ascending node and argument of periapsis are **not** part of this model:
//! the orbital plane is tilted about the x-axis only and periapsis lies on the +x axis.
//!
//! ## Validation
//!
//! Elements are validated once at construction ([`OrbitalElements::new`],
//! [`OrbitalElements::from_degrees`], and deserialization). The propagator re-checks the
//! domain constraints so that hand-built literals are rejected as well.
//!
//! ## Example
//!
//! ```rust
//! use cosmos::orbital_elements::OrbitalElements;
//!
//! let earth = OrbitalElements::new(0.0167, 1.0, 0.0, 365.25).unwrap();
//! assert!((earth.periapsis_distance() - 0.9833).abs() < 1e-12);
//! ```
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::{
    constants::{Degree, Radian, DPI, RADEG},
    cosmos_errors::CosmosError,
};

/// Orbital elements of an elliptic (or circular) two-body orbit.
///
/// Units
/// -----
/// * `eccentricity`: unitless, `[0, 1)`.
/// * `semi_major_axis`: length unit of the computation (AU or km), `≥ 0`.
/// * `inclination`: radians.
/// * `orbital_period`: time unit of the computation, `≥ 0` (`0` = fixed body).
/// * `epoch_mean_anomaly`: radians.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawOrbitalElements")]
pub struct OrbitalElements {
    pub eccentricity: f64,
    pub semi_major_axis: f64,
    pub inclination: Radian,
    pub orbital_period: f64,
    pub epoch_mean_anomaly: Radian,
}

#[derive(Deserialize)]
struct RawOrbitalElements {
    eccentricity: f64,
    semi_major_axis: f64,
    inclination: f64,
    orbital_period: f64,
    #[serde(default)]
    epoch_mean_anomaly: f64,
}

impl TryFrom<RawOrbitalElements> for OrbitalElements {
    type Error = CosmosError;

    fn try_from(raw: RawOrbitalElements) -> Result<Self, Self::Error> {
        OrbitalElements::new(
            raw.eccentricity,
            raw.semi_major_axis,
            raw.inclination,
            raw.orbital_period,
        )?
        .with_epoch_mean_anomaly(raw.epoch_mean_anomaly)
    }
}

impl OrbitalElements {
    /// Build validated orbital elements with a zero mean anomaly at epoch.
    ///
    /// Arguments
    /// ---------
    /// * `eccentricity` – `e ∈ [0, 1)`.
    /// * `semi_major_axis` – `a ≥ 0`.
    /// * `inclination` – `i` in radians.
    /// * `orbital_period` – `P ≥ 0`, `0` for a fixed body.
    ///
    /// Errors
    /// ------
    /// * [`CosmosError::InvalidElements`] if any value is non-finite or out of its domain.
    pub fn new(
        eccentricity: f64,
        semi_major_axis: f64,
        inclination: Radian,
        orbital_period: f64,
    ) -> Result<Self, CosmosError> {
        let elements = OrbitalElements {
            eccentricity,
            semi_major_axis,
            inclination,
            orbital_period,
            epoch_mean_anomaly: 0.0,
        };
        elements.validate()?;
        Ok(elements)
    }

    /// Same as [`OrbitalElements::new`] with the inclination given in degrees.
    pub fn from_degrees(
        eccentricity: f64,
        semi_major_axis: f64,
        inclination: Degree,
        orbital_period: f64,
    ) -> Result<Self, CosmosError> {
        Self::new(
            eccentricity,
            semi_major_axis,
            inclination * RADEG,
            orbital_period,
        )
    }

    /// Elements of a body fixed at the origin of its frame.
    pub fn fixed() -> Self {
        OrbitalElements {
            eccentricity: 0.0,
            semi_major_axis: 0.0,
            inclination: 0.0,
            orbital_period: 0.0,
            epoch_mean_anomaly: 0.0,
        }
    }

    /// Return a copy with the given mean anomaly at `t = 0` (radians).
    pub fn with_epoch_mean_anomaly(mut self, mean_anomaly: Radian) -> Result<Self, CosmosError> {
        if !mean_anomaly.is_finite() {
            return Err(CosmosError::InvalidElements(format!(
                "epoch mean anomaly must be finite, got {mean_anomaly}"
            )));
        }
        self.epoch_mean_anomaly = mean_anomaly;
        Ok(self)
    }

    /// Check the domain constraints of the elements.
    pub fn validate(&self) -> Result<(), CosmosError> {
        let fields = [
            ("eccentricity", self.eccentricity),
            ("semi_major_axis", self.semi_major_axis),
            ("inclination", self.inclination),
            ("orbital_period", self.orbital_period),
            ("epoch_mean_anomaly", self.epoch_mean_anomaly),
        ];
        if let Some((name, value)) = fields.iter().find(|(_, v)| !v.is_finite()) {
            return Err(CosmosError::InvalidElements(format!(
                "{name} must be finite, got {value}"
            )));
        }
        if !(0.0..1.0).contains(&self.eccentricity) {
            return Err(CosmosError::InvalidElements(format!(
                "eccentricity must be in [0, 1), got {}",
                self.eccentricity
            )));
        }
        if self.semi_major_axis < 0.0 {
            return Err(CosmosError::InvalidElements(format!(
                "semi_major_axis must be >= 0, got {}",
                self.semi_major_axis
            )));
        }
        if self.orbital_period < 0.0 {
            return Err(CosmosError::InvalidElements(format!(
                "orbital_period must be >= 0, got {}",
                self.orbital_period
            )));
        }
        if !self.is_fixed() && !(DPI / self.orbital_period).is_finite() {
            return Err(CosmosError::InvalidElements(format!(
                "orbital_period {:e} is too small for a finite mean motion",
                self.orbital_period
            )));
        }
        Ok(())
    }

    /// `true` when the elements describe a non-orbiting body.
    pub fn is_fixed(&self) -> bool {
        self.orbital_period == 0.0
    }

    /// Mean motion `n = 2π / P` (radians per time unit), `None` for a fixed body.
    pub fn mean_motion(&self) -> Option<f64> {
        if self.is_fixed() {
            None
        } else {
            Some(DPI / self.orbital_period)
        }
    }

    /// Mean anomaly at time `t`, not normalized.
    pub fn mean_anomaly_at(&self, t: f64) -> Option<Radian> {
        self.mean_motion().map(|n| n * t + self.epoch_mean_anomaly)
    }

    /// Closest distance to the focus, `a·(1 - e)`.
    pub fn periapsis_distance(&self) -> f64 {
        self.semi_major_axis * (1.0 - self.eccentricity)
    }

    /// Farthest distance from the focus, `a·(1 + e)`.
    pub fn apoapsis_distance(&self) -> f64 {
        self.semi_major_axis * (1.0 + self.eccentricity)
    }
}

impl Default for OrbitalElements {
    fn default() -> Self {
        Self::fixed()
    }
}

impl fmt::Display for OrbitalElements {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rad_to_deg = 1.0 / RADEG;
        writeln!(f, "Orbital Elements")?;
        writeln!(f, "-------------------------------------------")?;
        writeln!(f, "  e   (eccentricity)          = {:.6}", self.eccentricity)?;
        writeln!(
            f,
            "  a   (semi-major axis)       = {:.6}",
            self.semi_major_axis
        )?;
        writeln!(
            f,
            "  i   (inclination)           = {:.6} rad ({:.6}°)",
            self.inclination,
            self.inclination * rad_to_deg
        )?;
        writeln!(f, "  P   (orbital period)        = {:.6}", self.orbital_period)?;
        writeln!(
            f,
            "  M0  (mean anomaly at epoch) = {:.6} rad ({:.6}°)",
            self.epoch_mean_anomaly,
            self.epoch_mean_anomaly * rad_to_deg
        )
    }
}
