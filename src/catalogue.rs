//! # Body catalogues
//!
//! A catalogue is a versioned TOML document describing one star system. It is the on-disk
//! counterpart of [`StarSystem`]: every entry becomes a validated [`CelestialBody`], and the
//! satellites are linked by parent name.
//!
//! ## Format
//!
//! ```toml
//! version = 1
//! name = "Sol"
//! location = [0.0, 0.0, 0.0]
//!
//! [[bodies]]
//! name = "Sun"
//! description = "The star at the center of our solar system."
//!
//! [bodies.orbit]
//! eccentricity = 0.0
//! semi_major_axis = 0.0
//! inclination_deg = 0.0
//! orbital_period = 0.0
//!
//! [bodies.physical]
//! mass = 1.989e30
//! radius = 696340.0
//! body_type = "star"
//! axial_tilt = 0.0
//! rotation_period = 25.0
//!
//! [[bodies]]
//! name = "Earth"
//! description = "The third planet from the Sun and our home."
//! parent = "Sun"
//! # ...
//! ```
//!
//! Inclinations and the optional `epoch_mean_anomaly_deg` are written in **degrees**; they are
//! converted to radians when the bodies are built.
//!
//! ## Built-in data
//!
//! [`solar_system_catalogue`] returns the inner solar system (Sun, Mercury, Venus, Earth,
//! Mars) with semi-major axes in km, inclinations to the solar equator and periods in days.
use std::path::Path;

use nalgebra::Vector3;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::{
    body::{BodyType, CelestialBody, GeneralInfo, PhysicalProperties},
    constants::{Degree, CATALOGUE_VERSION, RADEG},
    cosmos_errors::CosmosError,
    orbital_elements::OrbitalElements,
    star_system::StarSystem,
};

/// Orbit of a catalogue entry, angles in degrees.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct OrbitEntry {
    pub eccentricity: f64,
    pub semi_major_axis: f64,
    pub inclination_deg: Degree,
    pub orbital_period: f64,
    #[serde(default)]
    pub epoch_mean_anomaly_deg: Degree,
}

impl OrbitEntry {
    fn to_elements(&self) -> Result<OrbitalElements, CosmosError> {
        OrbitalElements::from_degrees(
            self.eccentricity,
            self.semi_major_axis,
            self.inclination_deg,
            self.orbital_period,
        )?
        .with_epoch_mean_anomaly(self.epoch_mean_anomaly_deg * RADEG)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BodyEntry {
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent: Option<String>,
    pub orbit: OrbitEntry,
    pub physical: PhysicalProperties,
}

impl BodyEntry {
    /// Build the validated body described by this entry.
    pub fn to_body(&self) -> Result<CelestialBody, CosmosError> {
        let mut info = GeneralInfo::new(self.name.clone(), self.description.clone());
        info.parent = self.parent.clone();
        CelestialBody::new(info, self.orbit.to_elements()?, self.physical.clone())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Catalogue {
    pub version: u32,
    pub name: String,
    #[serde(default)]
    pub location: [f64; 3],
    #[serde(default)]
    pub bodies: Vec<BodyEntry>,
}

impl Catalogue {
    /// Parse a catalogue from a TOML document.
    ///
    /// Errors
    /// ------
    /// * [`CosmosError::CatalogueParse`] – malformed TOML or schema mismatch.
    /// * [`CosmosError::UnsupportedCatalogueVersion`] – `version` is not understood.
    pub fn from_toml_str(content: &str) -> Result<Self, CosmosError> {
        let catalogue: Catalogue = toml::from_str(content)?;
        if catalogue.version != CATALOGUE_VERSION {
            return Err(CosmosError::UnsupportedCatalogueVersion(catalogue.version));
        }
        debug!(
            catalogue = %catalogue.name,
            bodies = catalogue.bodies.len(),
            "catalogue parsed"
        );
        Ok(catalogue)
    }

    /// Read and parse a catalogue file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, CosmosError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)?;
        let catalogue = Self::from_toml_str(&content)?;
        info!(path = %path.display(), bodies = catalogue.bodies.len(), "catalogue loaded");
        Ok(catalogue)
    }

    pub fn to_toml_string(&self) -> Result<String, CosmosError> {
        toml::to_string(self).map_err(|err| CosmosError::CatalogueParse(err.to_string()))
    }

    /// Build every body of the catalogue, in order.
    pub fn bodies(&self) -> Result<Vec<CelestialBody>, CosmosError> {
        self.bodies.iter().map(BodyEntry::to_body).collect()
    }

    /// Build the star system described by the catalogue, hierarchy linked.
    pub fn into_star_system(self) -> Result<StarSystem, CosmosError> {
        let bodies = self.bodies()?;
        let [x, y, z] = self.location;
        StarSystem::from_bodies(self.name, Vector3::new(x, y, z), bodies)
    }
}

fn entry(
    name: &str,
    description: &str,
    parent: Option<&str>,
    orbit: (f64, f64, Degree, f64),
    physical: PhysicalProperties,
) -> BodyEntry {
    let (eccentricity, semi_major_axis, inclination_deg, orbital_period) = orbit;
    BodyEntry {
        name: name.to_string(),
        description: description.to_string(),
        parent: parent.map(str::to_string),
        orbit: OrbitEntry {
            eccentricity,
            semi_major_axis,
            inclination_deg,
            orbital_period,
            epoch_mean_anomaly_deg: 0.0,
        },
        physical,
    }
}

/// Inner solar system: the Sun (fixed) and the four terrestrial planets.
///
/// Units: km, degrees to the solar equator, days, kg.
pub fn solar_system_catalogue() -> Catalogue {
    let planet = |mass, radius, axial_tilt, rotation_period| PhysicalProperties {
        mass,
        radius,
        body_type: BodyType::Planet,
        axial_tilt,
        rotation_period,
    };

    Catalogue {
        version: CATALOGUE_VERSION,
        name: "Sol".to_string(),
        location: [0.0, 0.0, 0.0],
        bodies: vec![
            entry(
                "Sun",
                "The star at the center of our solar system.",
                None,
                (0.0, 0.0, 0.0, 0.0),
                PhysicalProperties {
                    mass: 1.989e30,
                    radius: 696_340.0,
                    body_type: BodyType::Star,
                    axial_tilt: 0.0,
                    rotation_period: 25.0,
                },
            ),
            entry(
                "Mercury",
                "The closest planet to the Sun.",
                Some("Sun"),
                (0.2056, 57_909_175.0, 3.38, 88.0),
                planet(3.3011e23, 2439.7, 0.034, 59.646),
            ),
            entry(
                "Venus",
                "The second planet from the Sun.",
                Some("Sun"),
                (0.0068, 108_208_000.0, 3.86, 225.0),
                planet(4.867e24, 6051.8, 177.4, 243.025),
            ),
            entry(
                "Earth",
                "The third planet from the Sun and our home.",
                Some("Sun"),
                (0.0167, 149_598_262.0, 7.155, 365.256),
                planet(5.97237e24, 6371.0, 23.44, 0.99726968),
            ),
            entry(
                "Mars",
                "The fourth planet from the Sun.",
                Some("Sun"),
                (0.0935, 227_939_100.0, 5.65, 687.0),
                planet(6.4171e23, 3389.5, 25.19, 1.025957),
            ),
        ],
    }
}

/// [`solar_system_catalogue`] as a linked [`StarSystem`].
pub fn solar_system() -> Result<StarSystem, CosmosError> {
    solar_system_catalogue().into_star_system()
}
