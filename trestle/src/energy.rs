//! Constraint energy of trivalent rod networks.
//!
//! The error functional scores every vertex of a [`Shape`] against a target
//! rod-packing geometry. Each vertex must be incident to exactly three edges
//! (the shape must be a 3-regular graph). For a vertex at position $\vec{v}$
//! and each incident rod with endpoints $\vec{e_1}$ and $\vec{e_2}$, let
//! $\vec{a} = \vec{e_1} - \vec{e_2}$ and $t = \vec{v} \cdot \vec{a}$. The rod
//! contributes two terms:
//!
//! 1. $w(\lVert\vec{v} - t\vec{a}\rVert - r)^2$, where
//!    $r = \frac{d}{2} + m$ is the clearance radius derived from the rod
//!    diameter $d$ and margin $m$, and $w$ is the clearance weight.
//! 2. $\lVert\vec{v} - \vec{e}\rVert^2$, where $\vec{e}$ is $\vec{e_1}$ if
//!    $t$ exceeds the endpoint threshold and $\vec{e_2}$ otherwise.
//!
//! The energy of a shape is the sum of these terms over all vertices.
//!
//! Note that $t$ projects the position of the vertex itself onto the axis,
//! not the position of the vertex relative to an endpoint of the rod. The
//! endpoint threshold is likewise compared against this raw projection.
//!
//! # Examples
//!
//! ```rust
//! use trestle::energy::{EnergyConfig, ErrorFunctional};
//! use trestle::prelude::*;
//! use trestle::primitive::dodecahedron::Dodecahedron;
//!
//! let shape = Dodecahedron::new().shape().unwrap();
//! let functional = ErrorFunctional::new(EnergyConfig::default().with_rod_diameter(0.25)).unwrap();
//! let energy = functional.evaluate(&shape).unwrap();
//! assert!(energy.is_finite());
//! ```

use arrayvec::ArrayVec;
use std::collections::TryReserveError;
use thiserror::Error;
use tracing::{debug, instrument, trace};

use crate::geometry::{dot, length, scale, subtract, Vector};
use crate::rod::Rod;
use crate::shape::{Shape, VertexAdjacency};

/// Diameter of a quarter-inch threaded rod in millimeters.
pub const DEFAULT_ROD_DIAMETER: f64 = 6.35;

pub const DEFAULT_CLEARANCE_WEIGHT: f64 = 10.0;
pub const DEFAULT_CLEARANCE_MARGIN: f64 = 0.2;
pub const DEFAULT_ENDPOINT_THRESHOLD: f64 = 0.5;

/// Number of edges that must be incident to every vertex.
pub const VERTEX_DEGREE: usize = 3;

#[derive(Clone, Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("rod diameter must be positive and finite; got {0}")]
    RodDiameter(f64),
    #[error("{name} must be finite; got {value}")]
    NonFinite { name: &'static str, value: f64 },
    #[error("{name} must be positive and finite; got {value}")]
    NonPositive { name: &'static str, value: f64 },
    #[error("step decay must be in (0, 1]; got {0}")]
    Decay(f64),
}

/// Errors concerning the evaluation of the error functional.
#[derive(Clone, Debug, Error, PartialEq)]
pub enum EnergyError {
    /// A vertex is not incident to exactly three edges.
    #[error("vertex {vertex} has degree {degree}; expected 3")]
    Structural {
        /// The offending vertex.
        vertex: usize,
        /// The number of edges incident to the vertex.
        degree: usize,
    },
    #[error("failed to allocate vertex adjacency")]
    Allocation(#[from] TryReserveError),
    #[error(transparent)]
    Config(#[from] ConfigError),
}

/// Parameters of the error functional.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct EnergyConfig {
    rod_diameter: f64,
    clearance_weight: f64,
    clearance_margin: f64,
    endpoint_threshold: f64,
}

impl EnergyConfig {
    pub fn with_rod_diameter(mut self, rod_diameter: f64) -> Self {
        self.rod_diameter = rod_diameter;
        self
    }

    pub fn with_clearance_weight(mut self, weight: f64) -> Self {
        self.clearance_weight = weight;
        self
    }

    pub fn with_clearance_margin(mut self, margin: f64) -> Self {
        self.clearance_margin = margin;
        self
    }

    pub fn with_endpoint_threshold(mut self, threshold: f64) -> Self {
        self.endpoint_threshold = threshold;
        self
    }

    pub fn rod_diameter(&self) -> f64 {
        self.rod_diameter
    }

    pub fn clearance_weight(&self) -> f64 {
        self.clearance_weight
    }

    pub fn clearance_margin(&self) -> f64 {
        self.clearance_margin
    }

    pub fn endpoint_threshold(&self) -> f64 {
        self.endpoint_threshold
    }

    /// Target distance between a vertex and the axis of each incident rod.
    pub fn clearance_radius(&self) -> f64 {
        0.5 * self.rod_diameter + self.clearance_margin
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.rod_diameter.is_finite() && self.rod_diameter > 0.0) {
            return Err(ConfigError::RodDiameter(self.rod_diameter));
        }
        for (name, value) in [
            ("clearance weight", self.clearance_weight),
            ("clearance margin", self.clearance_margin),
            ("endpoint threshold", self.endpoint_threshold),
        ] {
            if !value.is_finite() {
                return Err(ConfigError::NonFinite { name, value });
            }
        }
        Ok(())
    }
}

impl Default for EnergyConfig {
    fn default() -> Self {
        EnergyConfig {
            rod_diameter: DEFAULT_ROD_DIAMETER,
            clearance_weight: DEFAULT_CLEARANCE_WEIGHT,
            clearance_margin: DEFAULT_CLEARANCE_MARGIN,
            endpoint_threshold: DEFAULT_ENDPOINT_THRESHOLD,
        }
    }
}

/// The error functional over trivalent shapes.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ErrorFunctional {
    config: EnergyConfig,
}

impl ErrorFunctional {
    pub fn new(config: EnergyConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(ErrorFunctional { config })
    }

    pub fn config(&self) -> &EnergyConfig {
        &self.config
    }

    /// Computes the total energy of a shape.
    ///
    /// # Errors
    ///
    /// Returns [`EnergyError::Structural`] for the first vertex (by index)
    /// that is not incident to exactly three edges. No partial sum is
    /// computed in that case.
    #[instrument(level = "debug", skip_all, fields(vertices = shape.vertex_count()))]
    pub fn evaluate(&self, shape: &Shape) -> Result<f64, EnergyError> {
        let energy: f64 = self.vertex_energies(shape)?.into_iter().sum();
        debug!(energy, "evaluated shape");
        Ok(energy)
    }

    /// Computes the energy of each vertex of a shape, indexed by vertex.
    ///
    /// # Errors
    ///
    /// Fails under the same conditions as [`ErrorFunctional::evaluate`].
    pub fn vertex_energies(&self, shape: &Shape) -> Result<Vec<f64>, EnergyError> {
        let adjacency = trivalent_adjacency(shape)?;
        let mut energies = Vec::new();
        energies.try_reserve_exact(adjacency.len())?;
        for (vertex, edges) in adjacency.iter() {
            let energy = self.energy_at(shape, vertex, edges);
            trace!(vertex, energy);
            energies.push(energy);
        }
        Ok(energies)
    }

    /// Computes the energy of a vertex at `position` with respect to the rods
    /// incident to it.
    pub fn vertex_energy(&self, position: Vector, rods: &[Rod]) -> f64 {
        rods.iter().fold(0.0, |energy, rod| {
            let (clearance, reach) = self.rod_terms(position, rod);
            energy + clearance + reach
        })
    }

    // `edges` are the edges incident to `vertex`, of which there are at most three.
    pub(crate) fn energy_at(&self, shape: &Shape, vertex: usize, edges: &[usize]) -> f64 {
        let rods = edges
            .iter()
            .map(|&edge| shape.rod_at(edge))
            .collect::<ArrayVec<Rod, VERTEX_DEGREE>>();
        self.vertex_energy(shape.vertices()[vertex], &rods)
    }

    pub(crate) fn total(&self, shape: &Shape, adjacency: &VertexAdjacency) -> f64 {
        adjacency
            .iter()
            .map(|(vertex, edges)| self.energy_at(shape, vertex, edges))
            .sum()
    }

    fn rod_terms(&self, position: Vector, rod: &Rod) -> (f64, f64) {
        let axis = rod.axis();
        // This is the raw position projected onto the (unnormalized) axis.
        let t = dot(position, axis);
        let closest = scale(t, axis);
        let offset = length(subtract(position, closest)) - self.config.clearance_radius();
        let clearance = self.config.clearance_weight * (offset * offset);
        let endpoint = if t > self.config.endpoint_threshold {
            rod.end1
        }
        else {
            rod.end2
        };
        let reach = subtract(position, endpoint);
        (clearance, dot(reach, reach))
    }
}

/// Builds the adjacency of a shape and checks that every vertex is trivalent.
pub(crate) fn trivalent_adjacency(shape: &Shape) -> Result<VertexAdjacency, EnergyError> {
    let adjacency = VertexAdjacency::from_shape(shape)?;
    if let Some((vertex, degree)) = adjacency.find_irregular(VERTEX_DEGREE) {
        debug!(vertex, degree, "shape is not trivalent");
        return Err(EnergyError::Structural { vertex, degree });
    }
    Ok(adjacency)
}

/// Computes the total energy of a shape with the given parameters.
///
/// This is shorthand for constructing an [`ErrorFunctional`] and evaluating
/// it once.
pub fn energy(shape: &Shape, config: EnergyConfig) -> Result<f64, EnergyError> {
    ErrorFunctional::new(config)?.evaluate(shape)
}
