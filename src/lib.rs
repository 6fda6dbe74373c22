//! # Cosmos
//!
//! Kepler orbit propagation for a toy astronomical simulation, together with the celestial
//! body records, star-system hierarchy and catalogue needed to drive it.
//!
//! ## Modules
//!
//! - [`propagator`]: `position_at_time(elements, t)`: mean anomaly, Kepler's equation,
//!   true anomaly and projection to Cartesian coordinates.
//! - [`kepler`]: Newton-Raphson solver of Kepler's equation and anomaly helpers.
//! - [`orbital_elements`]: validated [`OrbitalElements`] value type.
//! - [`solver_settings`]: iteration budgets and tolerance of the solver.
//! - [`body`], [`star_system`], [`star_cluster`]: bodies and their arena-backed hierarchy.
//! - [`catalogue`]: TOML catalogues and the built-in inner solar system.
//! - [`trajectory`], [`display`]: sampling with CSV export, and terminal tables.
//!
//! ## Quick start
//!
//! ```rust
//! use cosmos::{position_at_time, OrbitalElements};
//!
//! let earth = OrbitalElements::new(0.0167, 1.0, 0.0, 365.25).unwrap();
//! let p0 = position_at_time(&earth, 0.0).unwrap();
//! let p1 = position_at_time(&earth, 365.25).unwrap();
//! assert!((p0 - p1).norm() < 1e-9);
//! ```
pub mod body;
pub mod catalogue;
pub mod constants;
pub mod cosmos_errors;
pub mod display;
pub mod kepler;
pub mod orbital_elements;
pub mod propagator;
pub mod solver_settings;
pub mod star_cluster;
pub mod star_system;
pub mod trajectory;

pub use constants::Position;
pub use cosmos_errors::CosmosError;
pub use orbital_elements::OrbitalElements;
pub use propagator::{position_at_time, KeplerPropagator};
