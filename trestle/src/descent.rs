//! Gradient descent over vertex positions.
//!
//! [`Descent`] relaxes a trivalent [`Shape`] toward a minimum of the
//! [error functional][`ErrorFunctional`]. The topology of the shape is fixed;
//! only vertex positions move.
//!
//! The gradient is estimated with forward differences. Each step moves every
//! vertex against the gradient, scaled so that no coordinate moves further
//! than the current step size. The step size decays geometrically after every
//! iteration. A step that would increase the energy is rejected, so the energy
//! of the result never exceeds the energy of the input.
//!
//! # Examples
//!
//! ```rust
//! use trestle::descent::{Descent, DescentConfig};
//! use trestle::energy::{EnergyConfig, ErrorFunctional};
//! use trestle::prelude::*;
//! use trestle::primitive::dodecahedron::Dodecahedron;
//!
//! let shape = Dodecahedron::with_radius(12.0).shape().unwrap();
//! let functional = ErrorFunctional::new(EnergyConfig::default()).unwrap();
//! let descent = Descent::new(functional, DescentConfig::default().with_iterations(20)).unwrap();
//!
//! let minimum = descent.minimize(&shape).unwrap();
//! assert!(minimum.energy() <= functional.evaluate(&shape).unwrap());
//! ```

use arrayvec::ArrayVec;
use tracing::{debug, instrument, trace};

use crate::energy::{
    trivalent_adjacency, ConfigError, EnergyError, ErrorFunctional, VERTEX_DEGREE,
};
use crate::geometry::Vector;
use crate::shape::{Shape, VertexAdjacency};

pub const DEFAULT_STEP: f64 = 0.05;
pub const DEFAULT_DECAY: f64 = 0.8;
pub const DEFAULT_ITERATIONS: usize = 200;
pub const DEFAULT_EPSILON: f64 = 1.0e-6;

/// Parameters of gradient descent.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DescentConfig {
    step: f64,
    decay: f64,
    iterations: usize,
    epsilon: f64,
}

impl DescentConfig {
    /// Sets the initial step size: the largest distance any coordinate moves
    /// in the first iteration.
    pub fn with_step(mut self, step: f64) -> Self {
        self.step = step;
        self
    }

    /// Sets the factor by which the step size is multiplied after each
    /// iteration.
    pub fn with_decay(mut self, decay: f64) -> Self {
        self.decay = decay;
        self
    }

    pub fn with_iterations(mut self, iterations: usize) -> Self {
        self.iterations = iterations;
        self
    }

    /// Sets the displacement used to estimate partial derivatives.
    pub fn with_epsilon(mut self, epsilon: f64) -> Self {
        self.epsilon = epsilon;
        self
    }

    pub fn step(&self) -> f64 {
        self.step
    }

    pub fn decay(&self) -> f64 {
        self.decay
    }

    pub fn iterations(&self) -> usize {
        self.iterations
    }

    pub fn epsilon(&self) -> f64 {
        self.epsilon
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        for (name, value) in [("step", self.step), ("epsilon", self.epsilon)] {
            if !(value.is_finite() && value > 0.0) {
                return Err(ConfigError::NonPositive { name, value });
            }
        }
        if !(self.decay > 0.0 && self.decay <= 1.0) {
            return Err(ConfigError::Decay(self.decay));
        }
        Ok(())
    }
}

impl Default for DescentConfig {
    fn default() -> Self {
        DescentConfig {
            step: DEFAULT_STEP,
            decay: DEFAULT_DECAY,
            iterations: DEFAULT_ITERATIONS,
            epsilon: DEFAULT_EPSILON,
        }
    }
}

/// Result of [`Descent::minimize`].
#[derive(Clone, Debug, PartialEq)]
pub struct Minimum {
    shape: Shape,
    energy: f64,
    steps: usize,
}

impl Minimum {
    pub fn shape(&self) -> &Shape {
        &self.shape
    }

    pub fn into_shape(self) -> Shape {
        self.shape
    }

    /// Gets the energy of the relaxed shape.
    pub fn energy(&self) -> f64 {
        self.energy
    }

    /// Gets the number of accepted steps.
    pub fn steps(&self) -> usize {
        self.steps
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Descent {
    functional: ErrorFunctional,
    config: DescentConfig,
}

impl Descent {
    pub fn new(functional: ErrorFunctional, config: DescentConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Descent { functional, config })
    }

    pub fn functional(&self) -> &ErrorFunctional {
        &self.functional
    }

    pub fn config(&self) -> &DescentConfig {
        &self.config
    }

    /// Estimates the gradient of the energy with respect to the position of
    /// each vertex, indexed by vertex.
    ///
    /// # Errors
    ///
    /// Fails under the same conditions as [`ErrorFunctional::evaluate`].
    pub fn gradient(&self, shape: &Shape) -> Result<Vec<Vector>, EnergyError> {
        let adjacency = trivalent_adjacency(shape)?;
        self.gradient_with(shape, &adjacency)
    }

    /// Relaxes a shape by gradient descent and returns the result.
    ///
    /// The input shape is not modified. Descent stops early if the gradient
    /// vanishes or is not finite.
    ///
    /// # Errors
    ///
    /// Fails under the same conditions as [`ErrorFunctional::evaluate`].
    #[instrument(level = "debug", skip_all, fields(vertices = shape.vertex_count()))]
    pub fn minimize(&self, shape: &Shape) -> Result<Minimum, EnergyError> {
        let adjacency = trivalent_adjacency(shape)?;
        let mut current = shape.clone();
        let mut energy = self.functional.total(&current, &adjacency);
        let mut gradient = self.gradient_with(&current, &adjacency)?;
        let mut step = self.config.step;
        let mut steps = 0;
        for iteration in 0..self.config.iterations {
            let extent = gradient
                .iter()
                .flat_map(|partial| partial.into_array())
                .fold(0.0, |extent: f64, x| extent.max(x.abs()));
            if !(extent.is_finite() && extent > 0.0) {
                break;
            }
            let factor = -step / extent;
            let candidate =
                current.map_positions(|vertex, position| position + gradient[vertex] * factor);
            let candidate_energy = self.functional.total(&candidate, &adjacency);
            if candidate_energy <= energy {
                trace!(iteration, step, energy = candidate_energy, "accepted step");
                current = candidate;
                energy = candidate_energy;
                steps += 1;
                gradient = self.gradient_with(&current, &adjacency)?;
            }
            step *= self.config.decay;
        }
        debug!(energy, steps, "minimized shape");
        Ok(Minimum {
            shape: current,
            energy,
            steps,
        })
    }

    fn gradient_with(
        &self,
        shape: &Shape,
        adjacency: &VertexAdjacency,
    ) -> Result<Vec<Vector>, EnergyError> {
        let epsilon = self.config.epsilon;
        let mut gradient = Vec::new();
        gradient.try_reserve_exact(shape.vertex_count())?;
        let mut displaced = shape.clone();
        for (vertex, edges) in adjacency.iter() {
            // Moving a vertex changes its own energy and the energy of each of
            // its neighbors, because the rods between them move.
            let mut affected = ArrayVec::<usize, { VERTEX_DEGREE + 1 }>::new();
            affected.push(vertex);
            affected.extend(edges.iter().map(|&edge| {
                let (a, b) = shape.edges()[edge].vertices();
                if a == vertex {
                    b
                }
                else {
                    a
                }
            }));
            let local = |shape: &Shape| -> f64 {
                affected
                    .iter()
                    .map(|&vertex| {
                        let edges = adjacency.incident_edges(vertex).unwrap_or_default();
                        self.functional.energy_at(shape, vertex, edges)
                    })
                    .sum()
            };
            let baseline = local(shape);
            let origin = shape.vertices()[vertex];
            let mut partials = [0.0; 3];
            for (axis, partial) in partials.iter_mut().enumerate() {
                let mut position = origin.into_array();
                position[axis] += epsilon;
                displaced.positions_mut()[vertex] = Vector::from(position);
                *partial = (local(&displaced) - baseline) / epsilon;
            }
            displaced.positions_mut()[vertex] = origin;
            gradient.push(Vector::from(partials));
        }
        Ok(gradient)
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use crate::descent::{Descent, DescentConfig};
    use crate::energy::{ConfigError, EnergyConfig, EnergyError, ErrorFunctional};
    use crate::geometry::Vector;
    use crate::prelude::*;
    use crate::primitive::dodecahedron::Dodecahedron;
    use crate::primitive::octahedron::Octahedron;
    use crate::shape::Shape;

    fn descent(config: DescentConfig) -> Descent {
        Descent::new(
            ErrorFunctional::new(EnergyConfig::default()).unwrap(),
            config,
        )
        .unwrap()
    }

    // A dodecahedron with every vertex nudged off of the sphere.
    fn dodecahedron() -> Shape {
        Dodecahedron::with_radius(10.0)
            .shape()
            .unwrap()
            .map_positions(|vertex, position| {
                let t = vertex as f64;
                position + Vector::new(0.1 * t.sin(), 0.1 * t.cos(), 0.05 * (2.0 * t).sin())
            })
    }

    #[test]
    fn gradient_matches_difference_of_totals() {
        let epsilon = 1.0e-3;
        let descent = descent(DescentConfig::default().with_epsilon(epsilon));
        let functional = descent.functional();
        let shape = dodecahedron();
        let gradient = descent.gradient(&shape).unwrap();
        assert_eq!(shape.vertex_count(), gradient.len());

        let baseline = functional.evaluate(&shape).unwrap();
        for vertex in [0, 7, 19] {
            let moved = shape.map_positions(|index, position| {
                if index == vertex {
                    position + Vector::y() * epsilon
                }
                else {
                    position
                }
            });
            let partial = (functional.evaluate(&moved).unwrap() - baseline) / epsilon;
            assert_relative_eq!(
                partial,
                gradient[vertex].y,
                epsilon = 1.0e-6,
                max_relative = 1.0e-6
            );
        }
    }

    #[test]
    fn energy_does_not_increase() {
        let shape = dodecahedron();
        let functional = ErrorFunctional::new(EnergyConfig::default()).unwrap();
        let mut energy = functional.evaluate(&shape).unwrap();
        let initial = energy;
        // Descent is deterministic, so each run extends the previous one by
        // a single iteration.
        for iterations in 1..=12 {
            let minimum = descent(DescentConfig::default().with_iterations(iterations))
                .minimize(&shape)
                .unwrap();
            assert_eq!(
                minimum.energy(),
                functional.evaluate(minimum.shape()).unwrap()
            );
            assert!(minimum.energy() <= energy);
            energy = minimum.energy();
        }
        assert!(energy < initial);
    }

    #[test]
    fn minimize_preserves_topology_and_input() {
        let shape = dodecahedron();
        let snapshot = shape.clone();
        let minimum = descent(DescentConfig::default().with_iterations(30))
            .minimize(&shape)
            .unwrap();
        assert_eq!(snapshot, shape);
        assert!(minimum.steps() > 0);
        assert!(minimum.steps() <= 30);
        assert_eq!(shape.edges(), minimum.shape().edges());
        assert_ne!(shape.vertices(), minimum.shape().vertices());
    }

    #[test]
    fn zero_iterations() {
        let shape = dodecahedron();
        let minimum = descent(DescentConfig::default().with_iterations(0))
            .minimize(&shape)
            .unwrap();
        assert_eq!(0, minimum.steps());
        assert_eq!(&shape, minimum.shape());
    }

    #[test]
    fn error_on_octahedron() {
        let shape = Octahedron::new().shape().unwrap();
        let descent = descent(DescentConfig::default());
        assert_eq!(
            descent.minimize(&shape).err().unwrap(),
            EnergyError::Structural {
                vertex: 0,
                degree: 4
            }
        );
        assert!(descent.gradient(&shape).is_err());
    }

    #[test]
    fn error_on_invalid_config() {
        let functional = ErrorFunctional::new(EnergyConfig::default()).unwrap();
        assert_eq!(
            Descent::new(functional, DescentConfig::default().with_step(0.0)).err(),
            Some(ConfigError::NonPositive {
                name: "step",
                value: 0.0
            })
        );
        assert_eq!(
            Descent::new(functional, DescentConfig::default().with_decay(1.5)).err(),
            Some(ConfigError::Decay(1.5))
        );
        assert!(Descent::new(
            functional,
            DescentConfig::default().with_epsilon(f64::INFINITY)
        )
        .is_err());
    }
}
