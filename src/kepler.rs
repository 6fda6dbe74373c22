use std::f64::consts::PI;

use super::constants::{Radian, DPI};
use crate::{cosmos_errors::CosmosError, solver_settings::SolverSettings};

/// Converged solution of Kepler's equation `E - e·sin(E) = M`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct KeplerSolution {
    /// Eccentric anomaly `E` (radians), on the same revolution as the input mean anomaly.
    pub eccentric_anomaly: Radian,
    /// Final residual `E - e·sin(E) - M` of the reduced problem.
    pub residual: f64,
    /// Newton-Raphson steps performed.
    pub iterations: usize,
}

/// Returns the principal value of an angle in radians, in [0, 2π).
pub fn principal_angle(a: f64) -> f64 {
    a.rem_euclid(DPI)
}

/// Signed difference `a - b` wrapped to [-π, π].
pub fn angle_diff(a: f64, b: f64) -> f64 {
    let d = principal_angle(a - b);
    if d > PI {
        d - DPI
    } else {
        d
    }
}

/// Residual of Kepler's equation for an elliptic orbit.
#[inline]
pub fn kepler_residual(eccentric_anomaly: f64, eccentricity: f64, mean_anomaly: f64) -> f64 {
    eccentric_anomaly - eccentricity * eccentric_anomaly.sin() - mean_anomaly
}

/// True anomaly from the eccentric anomaly.
///
/// Uses the two-argument arctangent of the half-angle relation
/// `tan(ν/2) = √((1+e)/(1-e))·tan(E/2)`, which keeps the correct quadrant for any `E`.
#[inline]
pub fn true_anomaly(eccentric_anomaly: f64, eccentricity: f64) -> f64 {
    let half = 0.5 * eccentric_anomaly;
    2.0 * ((1.0 + eccentricity).sqrt() * half.sin())
        .atan2((1.0 - eccentricity).sqrt() * half.cos())
}

/// Solve Kepler's equation `E - e·sin(E) = M` for the eccentric anomaly.
///
/// The mean anomaly is not expected to be normalized. Whole revolutions are removed before
/// iterating (the equation is invariant under `E → E + 2πk`, `M → M + 2πk`) and added back
/// to the result, so intermediate magnitudes stay small for any `M`.
///
/// Newton-Raphson is seeded at `E₀ = M` and runs `settings.newton_iterations` steps
/// unconditionally. When the residual still exceeds `settings.tolerance`, iteration continues
/// until it does, up to `settings.max_iterations` steps in total. The root is bracketed in
/// `[M - e, M + e]`: a Newton step leaving the bracket is replaced by a bisection step.
///
/// Arguments
/// -----------------
/// * `mean_anomaly`: Mean anomaly `M` (radians).
/// * `eccentricity`: Eccentricity `e`, expected in [0, 1).
/// * `settings`: Iteration budgets and residual tolerance.
///
/// Return
/// ----------
/// * A [`KeplerSolution`] or [`CosmosError::Convergence`] carrying the last `E` and residual.
pub fn solve_kepler_equation(
    mean_anomaly: f64,
    eccentricity: f64,
    settings: &SolverSettings,
) -> Result<KeplerSolution, CosmosError> {
    let revolutions = (mean_anomaly / DPI).round();
    let m = mean_anomaly - revolutions * DPI;

    let mut lower = m - eccentricity;
    let mut upper = m + eccentricity;

    let mut ecc_anom = m;
    let mut residual = kepler_residual(ecc_anom, eccentricity, m);
    let mut iterations = 0;

    while iterations < settings.max_iterations {
        if iterations >= settings.newton_iterations && residual.abs() <= settings.tolerance {
            break;
        }

        // f is strictly increasing: its sign tells on which side of the root we are
        if residual < 0.0 {
            lower = ecc_anom;
        } else if residual > 0.0 {
            upper = ecc_anom;
        }

        let next = ecc_anom - residual / (1.0 - eccentricity * ecc_anom.cos());
        ecc_anom = if next >= lower && next <= upper {
            next
        } else {
            0.5 * (lower + upper)
        };

        residual = kepler_residual(ecc_anom, eccentricity, m);
        iterations += 1;
    }

    let eccentric_anomaly = ecc_anom + revolutions * DPI;

    if !residual.is_finite() || residual.abs() > settings.tolerance {
        return Err(CosmosError::Convergence {
            eccentric_anomaly,
            residual,
            iterations,
        });
    }

    Ok(KeplerSolution {
        eccentric_anomaly,
        residual,
        iterations,
    })
}

#[cfg(test)]
mod kepler_test {
    use approx::assert_abs_diff_eq;

    use super::*;

    #[test]
    fn test_principal_angle() {
        assert_abs_diff_eq!(principal_angle(-PI / 2.0), 1.5 * PI, epsilon = 1e-15);
        assert_abs_diff_eq!(principal_angle(5.0 * PI), PI, epsilon = 1e-12);
        assert_eq!(principal_angle(0.0), 0.0);
    }

    #[test]
    fn test_angle_diff() {
        assert_abs_diff_eq!(angle_diff(0.1, DPI - 0.1), 0.2, epsilon = 1e-12);
        assert_abs_diff_eq!(angle_diff(DPI - 0.1, 0.1), -0.2, epsilon = 1e-12);
        assert_abs_diff_eq!(angle_diff(3.0 * DPI + 1.0, 1.0), 0.0, epsilon = 1e-12);
        assert_abs_diff_eq!(angle_diff(PI, 0.0), PI, epsilon = 1e-15);
    }

    #[test]
    fn test_circular_orbit_is_identity() {
        let settings = SolverSettings::default();
        for m in [-3.0, -0.5, 0.0, 0.25, 1.0, 2.5, 40.0] {
            let sol = solve_kepler_equation(m, 0.0, &settings).unwrap();
            assert_abs_diff_eq!(sol.eccentric_anomaly, m, epsilon = 1e-12);
            assert_eq!(sol.iterations, settings.newton_iterations);
        }
    }

    #[test]
    fn test_solution_satisfies_kepler_equation() {
        let settings = SolverSettings::default();
        for e in [0.0167, 0.0934, 0.2056, 0.5, 0.9, 0.999] {
            for k in -20..=20 {
                let m = 0.37 * k as f64;
                let sol = solve_kepler_equation(m, e, &settings).unwrap();
                let res = kepler_residual(sol.eccentric_anomaly, e, m);
                assert!(res.abs() <= 1e-8, "e = {e}, M = {m}: residual {res} too large");
                assert!(sol.iterations <= settings.max_iterations);
            }
        }
    }

    #[test]
    fn test_high_eccentricity_near_periapsis() {
        let settings = SolverSettings::default();
        let e = 0.999;
        for m in [1e-6, 1e-3, 0.05, -0.05, DPI - 1e-4] {
            let sol = solve_kepler_equation(m, e, &settings).unwrap();
            assert!(kepler_residual(sol.eccentric_anomaly, e, m).abs() <= 1e-8);
        }
    }

    #[test]
    fn test_large_mean_anomaly_keeps_revolution() {
        let settings = SolverSettings::default();
        let m = 1000.0 * DPI + 0.3;
        let sol = solve_kepler_equation(m, 0.3, &settings).unwrap();
        let reduced = solve_kepler_equation(0.3, 0.3, &settings).unwrap();
        assert_abs_diff_eq!(
            sol.eccentric_anomaly,
            reduced.eccentric_anomaly + 1000.0 * DPI,
            epsilon = 1e-9
        );
    }

    #[test]
    fn test_convergence_error_when_budget_too_small() {
        let settings = SolverSettings {
            newton_iterations: 1,
            max_iterations: 1,
            tolerance: 1e-15,
        };
        let err = solve_kepler_equation(0.1, 0.999, &settings).unwrap_err();
        match err {
            CosmosError::Convergence {
                residual,
                iterations,
                ..
            } => {
                assert_eq!(iterations, 1);
                assert!(residual.abs() > 1e-15);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_true_anomaly_quadrants() {
        let e = 0.3;
        assert_eq!(true_anomaly(0.0, e), 0.0);
        assert_abs_diff_eq!(true_anomaly(PI, e), PI, epsilon = 1e-12);

        // cos ν = (cos E - e) / (1 - e cos E) and sin ν has the sign of sin E
        for k in 0..16 {
            let ecc_anom = -PI + 0.1 + k as f64 * (DPI / 16.0);
            let nu = true_anomaly(ecc_anom, e);
            let expected_cos = (ecc_anom.cos() - e) / (1.0 - e * ecc_anom.cos());
            assert_abs_diff_eq!(nu.cos(), expected_cos, epsilon = 1e-12);
            assert_eq!(nu.sin().signum(), ecc_anom.sin().signum());
        }
    }
}
