//! # Celestial bodies
//!
//! This module defines [`CelestialBody`](crate::body::CelestialBody), the single validated
//! record describing a star, planet, moon or comet, built from three groups of attributes:
//!
//! - [`GeneralInfo`](crate::body::GeneralInfo): name, description and the **name** of the
//!   parent body (hierarchy is resolved later by [`StarSystem`](crate::star_system::StarSystem)).
//! - [`OrbitalElements`](crate::orbital_elements::OrbitalElements): orbit around the parent.
//! - [`PhysicalProperties`](crate::body::PhysicalProperties): mass, radius, body type, axial
//!   tilt and rotation period.
//!
//! All validation happens once, in [`CelestialBody::new`]; a constructed body is always
//! consistent.
//!
//! ## Example
//!
//! ```rust
//! use cosmos::body::{BodyType, CelestialBody, GeneralInfo, PhysicalProperties};
//! use cosmos::orbital_elements::OrbitalElements;
//!
//! let earth = CelestialBody::new(
//!     GeneralInfo::new("Earth", "The third planet from the Sun.").with_parent("Sun"),
//!     OrbitalElements::from_degrees(0.0167, 149_598_262.0, 7.155, 365.256).unwrap(),
//!     PhysicalProperties {
//!         mass: 5.97237e24,
//!         radius: 6371.0,
//!         body_type: BodyType::Planet,
//!         axial_tilt: 23.44,
//!         rotation_period: 0.99726968,
//!     },
//! )
//! .unwrap();
//!
//! assert_eq!(earth.parent(), Some("Sun"));
//! ```
use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::{
    constants::{Day, Degree, Kilogram, Kilometer, Position, Radian},
    cosmos_errors::CosmosError,
    orbital_elements::OrbitalElements,
    propagator::KeplerPropagator,
};

/// Kind of celestial body.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BodyType {
    Star,
    Planet,
    DwarfPlanet,
    Moon,
    Comet,
    Asteroid,
}

impl fmt::Display for BodyType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            BodyType::Star => "star",
            BodyType::Planet => "planet",
            BodyType::DwarfPlanet => "dwarf planet",
            BodyType::Moon => "moon",
            BodyType::Comet => "comet",
            BodyType::Asteroid => "asteroid",
        };
        f.write_str(s)
    }
}

impl FromStr for BodyType {
    type Err = CosmosError;

    /// Case-insensitive; `"dwarf planet"`, `"dwarf_planet"` and `"dwarf-planet"` are accepted.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase().replace(['-', ' '], "_");
        match normalized.as_str() {
            "star" => Ok(BodyType::Star),
            "planet" => Ok(BodyType::Planet),
            "dwarf_planet" => Ok(BodyType::DwarfPlanet),
            "moon" | "satellite" => Ok(BodyType::Moon),
            "comet" => Ok(BodyType::Comet),
            "asteroid" => Ok(BodyType::Asteroid),
            _ => Err(CosmosError::InvalidBody(format!("unknown body type '{s}'"))),
        }
    }
}

/// Identity of a body and the name of the body it orbits.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeneralInfo {
    pub name: String,
    pub description: String,
    #[serde(default)]
    pub parent: Option<String>,
}

impl GeneralInfo {
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        GeneralInfo {
            name: name.into(),
            description: description.into(),
            parent: None,
        }
    }

    pub fn with_parent(mut self, parent: impl Into<String>) -> Self {
        self.parent = Some(parent.into());
        self
    }
}

/// Physical properties of a body.
///
/// Units
/// -----
/// * `mass`: kg, `> 0`.
/// * `radius`: km, `> 0`.
/// * `axial_tilt`: degrees, relative to the orbital plane.
/// * `rotation_period`: days, `≥ 0`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PhysicalProperties {
    pub mass: Kilogram,
    pub radius: Kilometer,
    pub body_type: BodyType,
    pub axial_tilt: Degree,
    pub rotation_period: Day,
}

impl PhysicalProperties {
    fn validate(&self) -> Result<(), CosmosError> {
        if !(self.mass.is_finite() && self.mass > 0.0) {
            return Err(CosmosError::InvalidPhysicalProperty(format!(
                "mass must be a positive number, got {}",
                self.mass
            )));
        }
        if !(self.radius.is_finite() && self.radius > 0.0) {
            return Err(CosmosError::InvalidPhysicalProperty(format!(
                "radius must be a positive number, got {}",
                self.radius
            )));
        }
        if !self.axial_tilt.is_finite() {
            return Err(CosmosError::InvalidPhysicalProperty(format!(
                "axial_tilt must be a number, got {}",
                self.axial_tilt
            )));
        }
        if !(self.rotation_period.is_finite() && self.rotation_period >= 0.0) {
            return Err(CosmosError::InvalidPhysicalProperty(format!(
                "rotation_period must be a non-negative number, got {}",
                self.rotation_period
            )));
        }
        Ok(())
    }
}

/// A validated celestial body.
#[derive(Debug, Clone, PartialEq)]
pub struct CelestialBody {
    general_info: GeneralInfo,
    orbital_elements: OrbitalElements,
    physical_properties: PhysicalProperties,
}

impl CelestialBody {
    /// Build a body, validating every attribute group.
    ///
    /// Errors
    /// ------
    /// * [`CosmosError::InvalidBody`] – empty name, or a body declared as its own parent.
    /// * [`CosmosError::InvalidElements`] – orbital elements out of their domain.
    /// * [`CosmosError::InvalidPhysicalProperty`] – non-positive mass or radius, …
    pub fn new(
        general_info: GeneralInfo,
        orbital_elements: OrbitalElements,
        physical_properties: PhysicalProperties,
    ) -> Result<Self, CosmosError> {
        if general_info.name.trim().is_empty() {
            return Err(CosmosError::InvalidBody("name must not be empty".into()));
        }
        if general_info.parent.as_deref() == Some(general_info.name.as_str()) {
            return Err(CosmosError::InvalidBody(format!(
                "'{}' cannot be its own parent",
                general_info.name
            )));
        }
        orbital_elements.validate()?;
        physical_properties.validate()?;

        Ok(CelestialBody {
            general_info,
            orbital_elements,
            physical_properties,
        })
    }

    // General info
    pub fn name(&self) -> &str {
        &self.general_info.name
    }

    pub fn description(&self) -> &str {
        &self.general_info.description
    }

    /// Name of the parent body, `None` for a root body (e.g. a star).
    pub fn parent(&self) -> Option<&str> {
        self.general_info.parent.as_deref()
    }

    pub fn general_info(&self) -> &GeneralInfo {
        &self.general_info
    }

    // Orbital parameters
    pub fn orbital_elements(&self) -> &OrbitalElements {
        &self.orbital_elements
    }

    pub fn eccentricity(&self) -> f64 {
        self.orbital_elements.eccentricity
    }

    pub fn semi_major_axis(&self) -> f64 {
        self.orbital_elements.semi_major_axis
    }

    pub fn inclination(&self) -> Radian {
        self.orbital_elements.inclination
    }

    pub fn orbital_period(&self) -> f64 {
        self.orbital_elements.orbital_period
    }

    pub fn periapsis(&self) -> f64 {
        self.orbital_elements.periapsis_distance()
    }

    pub fn apoapsis(&self) -> f64 {
        self.orbital_elements.apoapsis_distance()
    }

    // Physical properties
    pub fn physical_properties(&self) -> &PhysicalProperties {
        &self.physical_properties
    }

    pub fn mass(&self) -> Kilogram {
        self.physical_properties.mass
    }

    pub fn radius(&self) -> Kilometer {
        self.physical_properties.radius
    }

    pub fn body_type(&self) -> BodyType {
        self.physical_properties.body_type
    }

    pub fn axial_tilt(&self) -> Degree {
        self.physical_properties.axial_tilt
    }

    pub fn rotation_period(&self) -> Day {
        self.physical_properties.rotation_period
    }

    /// Position relative to the parent body at time `t`.
    ///
    /// Errors carry the body name and the time, see [`CosmosError::PropagationFailed`].
    pub fn position_at_time(
        &self,
        propagator: &KeplerPropagator,
        t: f64,
    ) -> Result<Position, CosmosError> {
        propagator
            .position_at_time(&self.orbital_elements, t)
            .map_err(|err| err.at_body(self.name(), t))
    }
}

impl fmt::Display for CelestialBody {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name(), self.body_type())?;
        if let Some(parent) = self.parent() {
            write!(f, " orbiting {parent}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
pub(crate) mod body_test {
    use super::*;

    pub(crate) fn physical(body_type: BodyType) -> PhysicalProperties {
        PhysicalProperties {
            mass: 1.0e22,
            radius: 1000.0,
            body_type,
            axial_tilt: 0.0,
            rotation_period: 1.0,
        }
    }

    pub(crate) fn make_body(name: &str, parent: Option<&str>, period: f64) -> CelestialBody {
        let mut info = GeneralInfo::new(name, format!("Test body {name}"));
        if let Some(p) = parent {
            info = info.with_parent(p);
        }
        let (elements, body_type) = if period == 0.0 {
            (OrbitalElements::fixed(), BodyType::Star)
        } else {
            (
                OrbitalElements::new(0.1, 10.0, 0.05, period).unwrap(),
                BodyType::Planet,
            )
        };
        CelestialBody::new(info, elements, physical(body_type)).unwrap()
    }

    #[test]
    fn test_body_type_parsing() {
        assert_eq!("Star".parse::<BodyType>().unwrap(), BodyType::Star);
        assert_eq!("dwarf planet".parse::<BodyType>().unwrap(), BodyType::DwarfPlanet);
        assert_eq!("Dwarf-Planet".parse::<BodyType>().unwrap(), BodyType::DwarfPlanet);
        assert_eq!("satellite".parse::<BodyType>().unwrap(), BodyType::Moon);
        assert!("nebula".parse::<BodyType>().is_err());
    }

    #[test]
    fn test_accessors() {
        let body = make_body("Ares", Some("Helios"), 687.0);
        assert_eq!(body.name(), "Ares");
        assert_eq!(body.description(), "Test body Ares");
        assert_eq!(body.parent(), Some("Helios"));
        assert_eq!(body.eccentricity(), 0.1);
        assert_eq!(body.semi_major_axis(), 10.0);
        assert_eq!(body.inclination(), 0.05);
        assert_eq!(body.orbital_period(), 687.0);
        assert!((body.periapsis() - 9.0).abs() < 1e-12);
        assert!((body.apoapsis() - 11.0).abs() < 1e-12);
        assert_eq!(body.body_type(), BodyType::Planet);
        assert_eq!(body.mass(), 1.0e22);
        assert_eq!(body.radius(), 1000.0);
        assert_eq!(body.axial_tilt(), 0.0);
        assert_eq!(body.rotation_period(), 1.0);
        assert_eq!(body.to_string(), "Ares (planet) orbiting Helios");
    }

    #[test]
    fn test_invalid_bodies() {
        let err = CelestialBody::new(
            GeneralInfo::new("  ", ""),
            OrbitalElements::fixed(),
            physical(BodyType::Star),
        )
        .unwrap_err();
        assert_eq!(err, CosmosError::InvalidBody("name must not be empty".into()));

        let err = CelestialBody::new(
            GeneralInfo::new("Ouroboros", "").with_parent("Ouroboros"),
            OrbitalElements::fixed(),
            physical(BodyType::Moon),
        )
        .unwrap_err();
        assert!(matches!(err, CosmosError::InvalidBody(_)));

        let mut props = physical(BodyType::Planet);
        props.radius = 0.0;
        let err = CelestialBody::new(GeneralInfo::new("Flat", ""), OrbitalElements::fixed(), props)
            .unwrap_err();
        assert!(matches!(err, CosmosError::InvalidPhysicalProperty(_)));

        let mut props = physical(BodyType::Planet);
        props.rotation_period = -1.0;
        assert!(
            CelestialBody::new(GeneralInfo::new("Spin", ""), OrbitalElements::fixed(), props)
                .is_err()
        );

        let bad_orbit = OrbitalElements {
            eccentricity: 2.0,
            ..OrbitalElements::fixed()
        };
        let err = CelestialBody::new(
            GeneralInfo::new("Rogue", ""),
            bad_orbit,
            physical(BodyType::Comet),
        )
        .unwrap_err();
        assert!(matches!(err, CosmosError::InvalidElements(_)));
    }

    #[test]
    fn test_position_error_names_body() {
        let body = make_body("Ares", Some("Helios"), 687.0);
        let err = body
            .position_at_time(&KeplerPropagator::default(), f64::NAN)
            .unwrap_err();
        match err {
            CosmosError::PropagationFailed { body, t, .. } => {
                assert_eq!(body, "Ares");
                assert!(t.is_nan());
            }
            other => panic!("unexpected error: {other}"),
        }
    }
}
