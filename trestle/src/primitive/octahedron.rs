//! Octahedron primitive.
//!
//! Every vertex of an octahedron has degree four, so octahedra are not
//! accepted by the error functional. They are useful as a counterexample and
//! as a basis for other networks.

use crate::builder::ShapeBuilder;
use crate::geometry::Vector;
use crate::primitive::Generator;
use crate::shape::ShapeError;

const EDGES: [(usize, usize); 12] = [
    (0, 2),
    (0, 3),
    (0, 4),
    (0, 5),
    (1, 2),
    (1, 3),
    (1, 4),
    (1, 5),
    (2, 4),
    (4, 3),
    (3, 5),
    (5, 2),
];

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Octahedron {
    radius: f64,
}

impl Octahedron {
    pub fn new() -> Self {
        Octahedron::with_radius(1.0)
    }

    pub fn with_radius(radius: f64) -> Self {
        Octahedron { radius }
    }
}

impl Default for Octahedron {
    fn default() -> Self {
        Octahedron::new()
    }
}

impl Generator for Octahedron {
    fn vertex_count(&self) -> usize {
        6
    }

    fn edge_count(&self) -> usize {
        EDGES.len()
    }

    fn generate(&self, builder: &mut ShapeBuilder) -> Result<(), ShapeError> {
        let d = self.radius;
        // Poles on the z-axis, then the equator.
        let base = builder.vertex_count();
        for position in [
            Vector::new(0.0, 0.0, d),
            Vector::new(0.0, 0.0, -d),
            Vector::new(0.0, d, 0.0),
            Vector::new(0.0, -d, 0.0),
            Vector::new(d, 0.0, 0.0),
            Vector::new(-d, 0.0, 0.0),
        ] {
            builder.insert_vertex(position);
        }
        for (a, b) in EDGES {
            builder.insert_edge(base + a, base + b)?;
        }
        Ok(())
    }
}
