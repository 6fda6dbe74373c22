//! # Star systems
//!
//! A [`StarSystem`](crate::star_system::StarSystem) owns every body orbiting one barycenter in
//! an **arena** (`Vec`), and stores the hierarchy as [`BodyId`](crate::star_system::BodyId)
//! indices rather than references between bodies:
//!
//! ```text
//! StarSystem
//! ├── nodes[0]  Sun      parent: None     satellites: [1, 2]
//! ├── nodes[1]  Earth    parent: Some(0)  satellites: [3]
//! ├── nodes[2]  Mars     parent: Some(0)  satellites: []
//! └── nodes[3]  Moon     parent: Some(1)  satellites: []
//! ```
//!
//! Bodies declare their parent **by name**. [`StarSystem::link_satellites`] resolves those
//! names into indices, fills each body's satellite list, and rejects unknown parents and
//! parent cycles.
//!
//! ## Frames
//!
//! * [`relative_position_at_time`](StarSystem::relative_position_at_time): position of a body
//!   with respect to its parent (the focus of its orbit).
//! * [`absolute_position_at_time`](StarSystem::absolute_position_at_time): sum of the relative
//!   positions along the parent chain, i.e. the position in the frame of the root body.
//!
//! All bodies of a system are expected to share one length unit.
use std::collections::HashMap;

use itertools::Itertools;
use nalgebra::Vector3;
use tracing::{debug, trace};

use crate::{
    body::CelestialBody, constants::Position, cosmos_errors::CosmosError,
    propagator::KeplerPropagator,
};

/// Index of a body inside its [`StarSystem`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BodyId(usize);

impl BodyId {
    pub fn index(self) -> usize {
        self.0
    }
}

#[derive(Debug, Clone)]
struct BodyNode {
    body: CelestialBody,
    parent: Option<BodyId>,
    satellites: Vec<BodyId>,
}

#[derive(Debug, Clone)]
pub struct StarSystem {
    name: String,
    location: Vector3<f64>,
    nodes: Vec<BodyNode>,
    by_name: HashMap<String, BodyId>,
    propagator: KeplerPropagator,
}

impl StarSystem {
    /// Create an empty star system located at `location` (x, y, z).
    pub fn new(name: impl Into<String>, location: Vector3<f64>) -> Self {
        StarSystem {
            name: name.into(),
            location,
            nodes: Vec::new(),
            by_name: HashMap::new(),
            propagator: KeplerPropagator::default(),
        }
    }

    /// Build a system from a list of bodies and link the hierarchy.
    pub fn from_bodies(
        name: impl Into<String>,
        location: Vector3<f64>,
        bodies: impl IntoIterator<Item = CelestialBody>,
    ) -> Result<Self, CosmosError> {
        let mut system = StarSystem::new(name, location);
        for body in bodies {
            system.add_body(body)?;
        }
        system.link_satellites()?;
        Ok(system)
    }

    /// Replace the propagator used for every position query.
    pub fn with_propagator(mut self, propagator: KeplerPropagator) -> Self {
        self.propagator = propagator;
        self
    }

    /// Add a body to the arena.
    ///
    /// The hierarchy is not updated: call [`StarSystem::link_satellites`] once all bodies
    /// are in place.
    ///
    /// Errors
    /// ------
    /// * [`CosmosError::DuplicateBody`] if a body with the same name already exists.
    pub fn add_body(&mut self, body: CelestialBody) -> Result<BodyId, CosmosError> {
        if self.by_name.contains_key(body.name()) {
            return Err(CosmosError::DuplicateBody(body.name().to_string()));
        }
        let id = BodyId(self.nodes.len());
        self.by_name.insert(body.name().to_string(), id);
        trace!(system = %self.name, body = %body.name(), index = id.0, "body added");
        self.nodes.push(BodyNode {
            body,
            parent: None,
            satellites: Vec::new(),
        });
        Ok(id)
    }

    /// Resolve parent names into indices and rebuild every satellite list.
    ///
    /// Satellites are listed in insertion order.
    ///
    /// Errors
    /// ------
    /// * [`CosmosError::UnknownParent`] if a parent name matches no body of the system.
    /// * [`CosmosError::HierarchyCycle`] if following parents never reaches a root body.
    pub fn link_satellites(&mut self) -> Result<(), CosmosError> {
        let mut parents = Vec::with_capacity(self.nodes.len());
        for node in &self.nodes {
            let parent = match node.body.parent() {
                None => None,
                Some(parent_name) => match self.by_name.get(parent_name) {
                    Some(id) => Some(*id),
                    None => {
                        return Err(CosmosError::UnknownParent {
                            body: node.body.name().to_string(),
                            parent: parent_name.to_string(),
                        })
                    }
                },
            };
            parents.push(parent);
        }

        self.check_acyclic(&parents)?;

        for node in &mut self.nodes {
            node.satellites.clear();
        }
        for (index, parent) in parents.into_iter().enumerate() {
            self.nodes[index].parent = parent;
            if let Some(parent) = parent {
                self.nodes[parent.0].satellites.push(BodyId(index));
            }
        }

        debug!(
            system = %self.name,
            bodies = self.nodes.len(),
            roots = self.roots().count(),
            "satellite hierarchy linked"
        );
        Ok(())
    }

    fn check_acyclic(&self, parents: &[Option<BodyId>]) -> Result<(), CosmosError> {
        for start in 0..parents.len() {
            let mut chain = vec![start];
            let mut current = parents[start];
            while let Some(BodyId(next)) = current {
                if chain.contains(&next) {
                    chain.push(next);
                    let path = chain
                        .iter()
                        .map(|&i| self.nodes[i].body.name())
                        .join(" -> ");
                    debug!(system = %self.name, %path, "cycle in parent chain");
                    return Err(CosmosError::HierarchyCycle(
                        self.nodes[start].body.name().to_string(),
                    ));
                }
                chain.push(next);
                current = parents[next];
            }
        }
        Ok(())
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn location(&self) -> &Vector3<f64> {
        &self.location
    }

    pub fn propagator(&self) -> &KeplerPropagator {
        &self.propagator
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn body(&self, id: BodyId) -> Option<&CelestialBody> {
        self.nodes.get(id.0).map(|node| &node.body)
    }

    /// Look a body up by name.
    pub fn find(&self, name: &str) -> Option<BodyId> {
        self.by_name.get(name).copied()
    }

    pub fn parent_of(&self, id: BodyId) -> Option<BodyId> {
        self.nodes.get(id.0).and_then(|node| node.parent)
    }

    pub fn satellites_of(&self, id: BodyId) -> &[BodyId] {
        self.nodes
            .get(id.0)
            .map(|node| node.satellites.as_slice())
            .unwrap_or(&[])
    }

    /// Bodies in insertion order.
    pub fn bodies(&self) -> impl Iterator<Item = (BodyId, &CelestialBody)> + '_ {
        self.nodes
            .iter()
            .enumerate()
            .map(|(i, node)| (BodyId(i), &node.body))
    }

    /// Bodies without a parent.
    pub fn roots(&self) -> impl Iterator<Item = BodyId> + '_ {
        self.nodes
            .iter()
            .enumerate()
            .filter(|(_, node)| node.parent.is_none())
            .map(|(i, _)| BodyId(i))
    }

    fn node(&self, id: BodyId) -> Result<&BodyNode, CosmosError> {
        self.nodes
            .get(id.0)
            .ok_or_else(|| CosmosError::BodyNotFound(format!("#{}", id.0)))
    }

    /// Position of a body with respect to its parent at time `t`.
    pub fn relative_position_at_time(&self, id: BodyId, t: f64) -> Result<Position, CosmosError> {
        self.node(id)?.body.position_at_time(&self.propagator, t)
    }

    /// Position of a body in the frame of its root body at time `t`.
    pub fn absolute_position_at_time(&self, id: BodyId, t: f64) -> Result<Position, CosmosError> {
        let mut position = Vector3::zeros();
        let mut current = Some(id);
        while let Some(body_id) = current {
            let node = self.node(body_id)?;
            position += node.body.position_at_time(&self.propagator, t)?;
            current = node.parent;
        }
        Ok(position)
    }

    /// Absolute positions of every body at time `t`, in insertion order.
    pub fn positions_at_time(&self, t: f64) -> Result<Vec<(BodyId, Position)>, CosmosError> {
        (0..self.nodes.len())
            .map(|i| {
                let id = BodyId(i);
                self.absolute_position_at_time(id, t).map(|pos| (id, pos))
            })
            .collect()
    }
}
