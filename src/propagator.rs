//! # Two-body Kepler propagation
//!
//! Converts an [`OrbitalElements`] set and a time `t` into a Cartesian position, assuming an
//! unperturbed elliptic (or circular) orbit with the primary body at the focus (the origin).
//!
//! ## Algorithm
//!
//! 1. Mean motion `n = 2π / P`.
//! 2. Mean anomaly `M = n·t + M₀` (not normalized).
//! 3. Eccentric anomaly `E` from Kepler's equation
//!    (see [`solve_kepler_equation`](crate::kepler::solve_kepler_equation)).
//! 4. True anomaly `ν = 2·atan2(√(1+e)·sin(E/2), √(1-e)·cos(E/2))`.
//! 5. Radial distance `r = a·(1 - e·cos(E))`.
//! 6. In-plane coordinates `(r·cos ν, r·sin ν)`, then a rotation of angle `i` about the
//!    x-axis: `y = r·sin ν·cos i`, `z = r·sin ν·sin i`.
//!
//! A body with `P = 0` is fixed at the origin and never reaches the solver.
//!
//! Propagation is pure: no shared state, no I/O, no logging. A [`KeplerPropagator`] is `Copy`
//! and may be used from any number of threads at once.
//!
//! ## Example
//!
//! ```rust
//! use cosmos::orbital_elements::OrbitalElements;
//! use cosmos::propagator::position_at_time;
//!
//! let earth = OrbitalElements::new(0.0167, 1.0, 0.0, 365.25).unwrap();
//! let pos = position_at_time(&earth, 0.0).unwrap();
//! assert!((pos.x - 0.9833).abs() < 1e-12);
//! ```
use nalgebra::Vector3;

use crate::{
    constants::{Position, Radian},
    cosmos_errors::CosmosError,
    kepler::{principal_angle, solve_kepler_equation, true_anomaly},
    orbital_elements::OrbitalElements,
    solver_settings::SolverSettings,
};

/// Full outcome of one propagation step.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OrbitState {
    pub time: f64,
    pub mean_anomaly: Radian,
    pub eccentric_anomaly: Radian,
    /// True anomaly, in [0, 2π).
    pub true_anomaly: Radian,
    pub radius: f64,
    pub position: Position,
    /// Residual of Kepler's equation at the returned `eccentric_anomaly`.
    pub residual: f64,
    /// Newton-Raphson steps spent (0 for a fixed body).
    pub iterations: usize,
}

/// Kepler propagator configured with a set of [`SolverSettings`].
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct KeplerPropagator {
    settings: SolverSettings,
}

impl KeplerPropagator {
    /// Build a propagator from already validated settings.
    pub fn new(settings: SolverSettings) -> Self {
        KeplerPropagator { settings }
    }

    pub fn settings(&self) -> &SolverSettings {
        &self.settings
    }

    /// Position of the body at time `t`.
    ///
    /// Errors
    /// ------
    /// * [`CosmosError::InvalidElements`] – eccentricity outside `[0, 1)`, negative period, …
    /// * [`CosmosError::InvalidTime`] – `t` is not finite.
    /// * [`CosmosError::Convergence`] – Kepler's equation could not be solved within budget.
    pub fn position_at_time(
        &self,
        elements: &OrbitalElements,
        t: f64,
    ) -> Result<Position, CosmosError> {
        Ok(self.propagate(elements, t)?.position)
    }

    /// Propagate the elements to time `t` and return every intermediate quantity.
    pub fn propagate(&self, elements: &OrbitalElements, t: f64) -> Result<OrbitState, CosmosError> {
        elements.validate()?;
        if !t.is_finite() {
            return Err(CosmosError::InvalidTime(t));
        }

        let Some(mean_anomaly) = elements.mean_anomaly_at(t) else {
            return Ok(OrbitState {
                time: t,
                mean_anomaly: 0.0,
                eccentric_anomaly: 0.0,
                true_anomaly: 0.0,
                radius: 0.0,
                position: Vector3::zeros(),
                residual: 0.0,
                iterations: 0,
            });
        };
        if !mean_anomaly.is_finite() {
            return Err(CosmosError::InvalidTime(t));
        }

        let ecc = elements.eccentricity;
        let solution = solve_kepler_equation(mean_anomaly, ecc, &self.settings)?;
        let ecc_anom = solution.eccentric_anomaly;

        let nu = true_anomaly(ecc_anom, ecc);
        let radius = elements.semi_major_axis * (1.0 - ecc * ecc_anom.cos());

        Ok(OrbitState {
            time: t,
            mean_anomaly,
            eccentric_anomaly: ecc_anom,
            true_anomaly: principal_angle(nu),
            radius,
            position: tilted_position(radius, nu, elements.inclination),
            residual: solution.residual,
            iterations: solution.iterations,
        })
    }
}

/// Position in the orbital plane, rotated by the inclination about the x-axis.
fn tilted_position(radius: f64, true_anomaly: Radian, inclination: Radian) -> Position {
    let x = radius * true_anomaly.cos();
    let y_plane = radius * true_anomaly.sin();
    Vector3::new(x, y_plane * inclination.cos(), y_plane * inclination.sin())
}

/// Position of a body at time `t` with the default solver settings.
///
/// See [`KeplerPropagator::position_at_time`].
pub fn position_at_time(elements: &OrbitalElements, t: f64) -> Result<Position, CosmosError> {
    KeplerPropagator::default().position_at_time(elements, t)
}

#[cfg(test)]
mod propagator_test {
    use std::f64::consts::PI;

    use approx::assert_abs_diff_eq;

    use super::*;
    use crate::{constants::DPI, kepler::kepler_residual};

    fn assert_copy_send_sync<T: Copy + Send + Sync>() {}

    fn earth() -> OrbitalElements {
        OrbitalElements::new(0.0167, 1.0, 0.0, 365.25).unwrap()
    }

    #[test]
    fn test_earth_at_epoch() {
        let state = KeplerPropagator::default().propagate(&earth(), 0.0).unwrap();
        assert_abs_diff_eq!(state.eccentric_anomaly, 0.0, epsilon = 1e-15);
        assert_abs_diff_eq!(state.true_anomaly, 0.0, epsilon = 1e-15);
        assert_abs_diff_eq!(state.radius, 0.9833, epsilon = 1e-12);
        assert_abs_diff_eq!(state.position.x, 0.9833, epsilon = 1e-12);
        assert_abs_diff_eq!(state.position.y, 0.0, epsilon = 1e-15);
        assert_abs_diff_eq!(state.position.z, 0.0, epsilon = 1e-15);
    }

    #[test]
    fn test_earth_after_one_period() {
        let p0 = position_at_time(&earth(), 0.0).unwrap();
        let p1 = position_at_time(&earth(), 365.25).unwrap();
        assert_abs_diff_eq!(p0, p1, epsilon = 1e-9);
    }

    #[test]
    fn test_apoapsis_at_half_period() {
        let state = KeplerPropagator::default()
            .propagate(&earth(), 365.25 / 2.0)
            .unwrap();
        assert_abs_diff_eq!(state.eccentric_anomaly, PI, epsilon = 1e-12);
        assert_abs_diff_eq!(state.radius, 1.0167, epsilon = 1e-12);
        assert_abs_diff_eq!(state.position.x, -1.0167, epsilon = 1e-12);
    }

    #[test]
    fn test_fixed_body_stays_at_origin() {
        let sun = OrbitalElements::fixed();
        for t in [-1e9, 0.0, 1.0, 365.25, 1e12] {
            let state = KeplerPropagator::default().propagate(&sun, t).unwrap();
            assert_eq!(state.position, Vector3::zeros());
            assert_eq!(state.iterations, 0);
        }
    }

    #[test]
    fn test_fixed_body_with_nonzero_axis() {
        // The zero period alone marks the body as fixed
        let elem = OrbitalElements::new(0.5, 3.0, 0.4, 0.0).unwrap();
        assert_eq!(position_at_time(&elem, 12.0).unwrap(), Vector3::zeros());
    }

    #[test]
    fn test_inclination_tilt() {
        let incl = 0.3;
        let elem = OrbitalElements::new(0.1, 2.0, incl, 10.0).unwrap();
        let flat = OrbitalElements::new(0.1, 2.0, 0.0, 10.0).unwrap();
        let p = position_at_time(&elem, 2.7).unwrap();
        let q = position_at_time(&flat, 2.7).unwrap();
        assert_abs_diff_eq!(p.x, q.x, epsilon = 1e-14);
        assert_abs_diff_eq!(p.y, q.y * incl.cos(), epsilon = 1e-14);
        assert_abs_diff_eq!(p.z, q.y * incl.sin(), epsilon = 1e-14);
        assert_abs_diff_eq!(p.norm(), q.norm(), epsilon = 1e-14);
        assert_eq!(q.z, 0.0);
    }

    #[test]
    fn test_round_trip_residual() {
        let elem = OrbitalElements::new(0.7, 1.0, 0.2, 3.0)
            .unwrap()
            .with_epoch_mean_anomaly(1.1)
            .unwrap();
        for k in 0..50 {
            let t = -7.0 + 0.31 * k as f64;
            let state = KeplerPropagator::default().propagate(&elem, t).unwrap();
            let res = kepler_residual(state.eccentric_anomaly, 0.7, state.mean_anomaly);
            assert!(res.abs() <= 1e-8, "t = {t}: residual {res}");
        }
    }

    #[test]
    fn test_invalid_inputs() {
        let hyperbolic = OrbitalElements {
            eccentricity: 1.0,
            ..earth()
        };
        assert!(matches!(
            position_at_time(&hyperbolic, 1.0),
            Err(CosmosError::InvalidElements(_))
        ));

        let negative_period = OrbitalElements {
            orbital_period: -365.25,
            ..earth()
        };
        assert!(matches!(
            position_at_time(&negative_period, 1.0),
            Err(CosmosError::InvalidElements(_))
        ));

        assert_eq!(
            position_at_time(&earth(), f64::INFINITY).unwrap_err(),
            CosmosError::InvalidTime(f64::INFINITY)
        );
    }

    #[test]
    fn test_convergence_error_surfaces() {
        let settings = SolverSettings {
            newton_iterations: 1,
            max_iterations: 1,
            tolerance: 1e-15,
        };
        let elem = OrbitalElements::new(0.999, 1.0, 0.0, 100.0).unwrap();
        let err = KeplerPropagator::new(settings)
            .position_at_time(&elem, 1.0)
            .unwrap_err();
        assert!(matches!(err, CosmosError::Convergence { .. }));
    }

    #[test]
    fn test_reported_true_anomaly_is_principal() {
        let elem = OrbitalElements::new(0.4, 1.0, 0.0, 10.0).unwrap();
        let propagator = KeplerPropagator::default();
        for t in [-123.4, -2.5, 0.0, 7.5, 1e4 + 3.3] {
            let state = propagator.propagate(&elem, t).unwrap();
            assert!((0.0..DPI).contains(&state.true_anomaly), "t = {t}");
            assert_abs_diff_eq!(
                state.position.x,
                state.radius * state.true_anomaly.cos(),
                epsilon = 1e-12
            );
        }
        // past apoapsis the body is below the x-axis
        let state = propagator.propagate(&elem, 7.5).unwrap();
        assert!(state.true_anomaly > PI);
        assert!(state.position.y < 0.0);
    }

    #[test]
    fn test_value_types_are_thread_safe() {
        assert_copy_send_sync::<OrbitalElements>();
        assert_copy_send_sync::<SolverSettings>();
        assert_copy_send_sync::<KeplerPropagator>();

        let propagator = KeplerPropagator::default();
        let elem = earth();
        let serial: Vec<Position> = (0..4)
            .map(|k| propagator.position_at_time(&elem, 91.0 * k as f64).unwrap())
            .collect();
        let parallel: Vec<Position> = std::thread::scope(|scope| {
            let handles: Vec<_> = (0..4)
                .map(|k| scope.spawn(move || propagator.position_at_time(&elem, 91.0 * k as f64)))
                .collect();
            handles
                .into_iter()
                .map(|h| h.join().unwrap().unwrap())
                .collect()
        });
        assert_eq!(serial, parallel);
    }
}
