//! Constellations, skybox and star clusters.
//!
//! A [`StarCluster`] is not a cluster in the astronomical sense: it groups the star systems of
//! one community under a shared [`Skybox`], the celestial sphere on which [`Constellation`]s
//! are drawn.
use crate::{cosmos_errors::CosmosError, star_system::StarSystem};

/// A named pattern of stars drawn on the skybox.
#[derive(Debug, Clone, PartialEq)]
pub struct Constellation {
    name: String,
    description: String,
    location: (f64, f64),
}

impl Constellation {
    /// `location` is the (latitude, longitude) of the pattern on the skybox, in degrees.
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        location: (f64, f64),
    ) -> Self {
        Constellation {
            name: name.into(),
            description: description.into(),
            location,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn location(&self) -> (f64, f64) {
        self.location
    }
}

/// Celestial sphere surrounding the star scape.
#[derive(Debug, Clone, PartialEq)]
pub struct Skybox {
    radius: f64,
    constellations: Vec<Constellation>,
}

impl Skybox {
    /// Build a skybox of the given radius in light-years.
    ///
    /// Errors
    /// ------
    /// * [`CosmosError::InvalidPhysicalProperty`] if the radius is not a positive number.
    pub fn new(radius: f64, constellations: Vec<Constellation>) -> Result<Self, CosmosError> {
        if !(radius.is_finite() && radius > 0.0) {
            return Err(CosmosError::InvalidPhysicalProperty(format!(
                "skybox radius must be a positive number, got {radius}"
            )));
        }
        Ok(Skybox {
            radius,
            constellations,
        })
    }

    pub fn radius(&self) -> f64 {
        self.radius
    }

    pub fn constellations(&self) -> &[Constellation] {
        &self.constellations
    }

    pub fn add_constellation(&mut self, constellation: Constellation) {
        self.constellations.push(constellation);
    }
}

#[derive(Debug, Clone)]
pub struct StarCluster {
    name: String,
    skybox: Skybox,
    star_systems: Vec<StarSystem>,
}

impl StarCluster {
    pub fn new(name: impl Into<String>, skybox: Skybox) -> Self {
        StarCluster {
            name: name.into(),
            skybox,
            star_systems: Vec::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn skybox(&self) -> &Skybox {
        &self.skybox
    }

    pub fn star_systems(&self) -> &[StarSystem] {
        &self.star_systems
    }

    /// Errors with [`CosmosError::DuplicateBody`] if a system with that name is already present.
    pub fn add_star_system(&mut self, system: StarSystem) -> Result<(), CosmosError> {
        if self.star_system(system.name()).is_some() {
            return Err(CosmosError::DuplicateBody(system.name().to_string()));
        }
        self.star_systems.push(system);
        Ok(())
    }

    pub fn star_system(&self, name: &str) -> Option<&StarSystem> {
        self.star_systems.iter().find(|s| s.name() == name)
    }
}
