//! Tetrahedron primitive.

use itertools::Itertools;

use crate::builder::ShapeBuilder;
use crate::geometry::Vector;
use crate::primitive::Generator;
use crate::shape::ShapeError;

// Alternating corners of a cube.
const CORNERS: [(f64, f64, f64); 4] = [
    (1.0, 1.0, 1.0),
    (1.0, -1.0, -1.0),
    (-1.0, 1.0, -1.0),
    (-1.0, -1.0, 1.0),
];

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Tetrahedron {
    radius: f64,
}

impl Tetrahedron {
    pub fn new() -> Self {
        Tetrahedron::with_radius(1.0)
    }

    pub fn with_radius(radius: f64) -> Self {
        Tetrahedron { radius }
    }
}

impl Default for Tetrahedron {
    fn default() -> Self {
        Tetrahedron::new()
    }
}

impl Generator for Tetrahedron {
    fn vertex_count(&self) -> usize {
        4
    }

    fn edge_count(&self) -> usize {
        6
    }

    fn generate(&self, builder: &mut ShapeBuilder) -> Result<(), ShapeError> {
        let scale = self.radius / 3.0f64.sqrt();
        let keys = CORNERS
            .iter()
            .map(|&corner| builder.insert_vertex(Vector::from(corner) * scale))
            .collect::<Vec<_>>();
        // Every pair of vertices is joined.
        for (a, b) in keys.into_iter().tuple_combinations() {
            builder.insert_edge(a, b)?;
        }
        Ok(())
    }
}
