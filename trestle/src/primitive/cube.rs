//! Cube primitive.

use itertools::Itertools;

use crate::builder::ShapeBuilder;
use crate::geometry::Vector;
use crate::primitive::Generator;
use crate::shape::ShapeError;

// Counter-clockwise about the z-axis.
const SQUARE: [(f64, f64); 4] = [(-1.0, -1.0), (1.0, -1.0), (1.0, 1.0), (-1.0, 1.0)];

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Cube {
    radius: f64,
}

impl Cube {
    pub fn new() -> Self {
        Cube::with_radius(1.0)
    }

    pub fn with_radius(radius: f64) -> Self {
        Cube { radius }
    }

    /// Creates a cube with the given edge length.
    pub fn with_width(width: f64) -> Self {
        Cube::with_radius(0.5 * width * 3.0f64.sqrt())
    }
}

impl Default for Cube {
    fn default() -> Self {
        Cube::new()
    }
}

impl Generator for Cube {
    fn vertex_count(&self) -> usize {
        8
    }

    fn edge_count(&self) -> usize {
        12
    }

    fn generate(&self, builder: &mut ShapeBuilder) -> Result<(), ShapeError> {
        let scale = self.radius / 3.0f64.sqrt();
        // Insert the bottom face (z = -1) and then the top face (z = 1).
        let keys = [-1.0, 1.0]
            .iter()
            .map(|&z| {
                SQUARE
                    .iter()
                    .map(|&(x, y)| builder.insert_vertex(Vector::new(x, y, z) * scale))
                    .collect::<Vec<_>>()
            })
            .collect::<Vec<_>>();
        let (lower, upper) = (&keys[0], &keys[1]);
        for face in [lower, upper] {
            for (a, b) in face.iter().copied().circular_tuple_windows() {
                builder.insert_edge(a, b)?;
            }
        }
        for (&a, &b) in lower.iter().zip(upper.iter()) {
            builder.insert_edge(a, b)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use crate::primitive::cube::Cube;
    use crate::primitive::Generator;

    #[test]
    fn width() {
        let shape = Cube::with_width(2.0).shape().unwrap();
        for rod in shape.rods() {
            assert_relative_eq!(2.0, rod.length(), max_relative = 1.0e-12);
        }
    }
}
