//! # Kepler solver configuration
//!
//! This module defines [`SolverSettings`](crate::solver_settings::SolverSettings), the set of
//! tunables used by the Newton-Raphson solver of Kepler's equation, together with its
//! validating builder.
//!
//! The solver always performs a **fixed budget** of `newton_iterations` steps. If the residual
//! `|E - e·sin(E) - M|` still exceeds `tolerance`, iteration continues until the residual is
//! acceptable or `max_iterations` steps have been spent in total, at which point a
//! [`CosmosError::Convergence`] is raised.
//!
//! ## Example
//!
//! ```rust
//! use cosmos::solver_settings::SolverSettings;
//!
//! let settings = SolverSettings::builder()
//!     .newton_iterations(8)
//!     .max_iterations(50)
//!     .tolerance(1e-10)
//!     .build()
//!     .unwrap();
//!
//! assert_eq!(settings.max_iterations, 50);
//! ```
//!
//! Settings can also be read from TOML:
//!
//! ```toml
//! newton_iterations = 10
//! max_iterations = 100
//! tolerance = 1e-8
//! ```
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::{
    constants::{KEPLER_TOLERANCE, MAX_NEWTON_ITERATIONS, NEWTON_ITERATIONS},
    cosmos_errors::CosmosError,
};

/// Tunables of the Kepler equation solver.
///
/// Fields
/// -----------------
/// * `newton_iterations` – Newton-Raphson steps always performed (default 10).
/// * `max_iterations` – Total step cap once the fixed budget is exhausted (default 100).
/// * `tolerance` – Maximum accepted residual of Kepler's equation, radians (default 1e-8).
///
/// Validation
/// -----------------
/// * `newton_iterations ≥ 1`
/// * `max_iterations ≥ newton_iterations`
/// * `tolerance > 0` and finite
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SolverSettings {
    pub newton_iterations: usize,
    pub max_iterations: usize,
    pub tolerance: f64,
}

impl SolverSettings {
    /// Equivalent to [`SolverSettings::default()`].
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a new [`SolverSettingsBuilder`] initialized with the default values.
    pub fn builder() -> SolverSettingsBuilder {
        SolverSettingsBuilder::new()
    }

    /// Parse and validate settings from a TOML document.
    ///
    /// Missing keys fall back to their default value.
    ///
    /// Errors
    /// -----------------
    /// * [`CosmosError::CatalogueParse`] if the document is not valid TOML for this schema.
    /// * [`CosmosError::InvalidSolverSettings`] if a validation rule fails.
    pub fn from_toml_str(content: &str) -> Result<Self, CosmosError> {
        let settings: SolverSettings = toml::from_str(content)?;
        settings.validate()?;
        Ok(settings)
    }

    pub(crate) fn validate(&self) -> Result<(), CosmosError> {
        if self.newton_iterations == 0 {
            return Err(CosmosError::InvalidSolverSettings(
                "newton_iterations must be >= 1".into(),
            ));
        }
        if self.max_iterations < self.newton_iterations {
            return Err(CosmosError::InvalidSolverSettings(
                "max_iterations must be >= newton_iterations".into(),
            ));
        }
        if !(self.tolerance.is_finite() && self.tolerance > 0.0) {
            return Err(CosmosError::InvalidSolverSettings(
                "tolerance must be finite and > 0".into(),
            ));
        }
        Ok(())
    }
}

impl Default for SolverSettings {
    fn default() -> Self {
        SolverSettings {
            newton_iterations: NEWTON_ITERATIONS,
            max_iterations: MAX_NEWTON_ITERATIONS,
            tolerance: KEPLER_TOLERANCE,
        }
    }
}

/// Builder for [`SolverSettings`], with validation.
#[derive(Debug, Clone)]
pub struct SolverSettingsBuilder {
    settings: SolverSettings,
}

impl Default for SolverSettingsBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl SolverSettingsBuilder {
    /// Create a new builder initialized with default values.
    pub fn new() -> Self {
        Self {
            settings: SolverSettings::default(),
        }
    }

    pub fn newton_iterations(mut self, v: usize) -> Self {
        self.settings.newton_iterations = v;
        self
    }

    pub fn max_iterations(mut self, v: usize) -> Self {
        self.settings.max_iterations = v;
        self
    }

    pub fn tolerance(mut self, v: f64) -> Self {
        self.settings.tolerance = v;
        self
    }

    /// Finalize the builder and produce a [`SolverSettings`] instance.
    ///
    /// Returns
    /// -----------------
    /// * `Ok(SolverSettings)` if all validation rules hold.
    /// * `Err(CosmosError::InvalidSolverSettings)` otherwise.
    pub fn build(self) -> Result<SolverSettings, CosmosError> {
        self.settings.validate()?;
        Ok(self.settings)
    }
}

impl fmt::Display for SolverSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if f.alternate() {
            writeln!(f, "Kepler Solver Settings")?;
            writeln!(f, "----------------------")?;
            writeln!(
                f,
                "  newton_iterations = {:<8}  # fixed Newton-Raphson budget",
                self.newton_iterations
            )?;
            writeln!(
                f,
                "  max_iterations    = {:<8}  # cap including extension",
                self.max_iterations
            )?;
            writeln!(
                f,
                "  tolerance         = {:<8.1e}  # max |E - e sin E - M|",
                self.tolerance
            )
        } else {
            write!(
                f,
                "SolverSettings(newton_iterations={}, max_iterations={}, tolerance={:.1e})",
                self.newton_iterations, self.max_iterations, self.tolerance
            )
        }
    }
}
