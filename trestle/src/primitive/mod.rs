//! Polyhedral primitives.
//!
//! This module provides generators for the edge skeletons of convex
//! polyhedra. Every primitive is centered at the origin and scaled so that its
//! vertices lie on a sphere of a given radius (the circumradius). The
//! following table summarizes the primitives:
//!
//! | Primitive      | Vertices | Edges | Degree |
//! |----------------|----------|-------|--------|
//! | `Tetrahedron`  | 4        | 6     | 3      |
//! | `Cube`         | 8        | 12    | 3      |
//! | `Octahedron`   | 6        | 12    | 4      |
//! | `Dodecahedron` | 20       | 30    | 3      |
//!
//! All of these except the octahedron are trivalent and can be scored by the
//! [error functional][`crate::energy`].
//!
//! # Examples
//!
//! ```rust
//! use trestle::prelude::*;
//! use trestle::primitive::cube::Cube;
//!
//! let shape = Cube::with_radius(2.0).shape().unwrap();
//! assert_eq!(8, shape.vertex_count());
//! ```

pub mod cube;
pub mod dodecahedron;
pub mod octahedron;
pub mod tetrahedron;

use crate::builder::ShapeBuilder;
use crate::shape::{Shape, ShapeError};

/// Polyhedron generator.
pub trait Generator {
    fn vertex_count(&self) -> usize;

    fn edge_count(&self) -> usize;

    /// Inserts the vertices and edges of the polyhedron into a builder.
    ///
    /// Vertex indices are relative to the vertices already in the builder,
    /// so a builder can accumulate several primitives.
    fn generate(&self, builder: &mut ShapeBuilder) -> Result<(), ShapeError>;

    fn shape(&self) -> Result<Shape, ShapeError> {
        let mut builder = ShapeBuilder::with_capacity(self.vertex_count(), self.edge_count());
        self.generate(&mut builder)?;
        builder.build()
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use crate::builder::ShapeBuilder;
    use crate::primitive::cube::Cube;
    use crate::primitive::dodecahedron::Dodecahedron;
    use crate::primitive::octahedron::Octahedron;
    use crate::primitive::tetrahedron::Tetrahedron;
    use crate::primitive::Generator;

    // Checks counts, circumradius, uniform edge length, and uniform degree.
    fn check<G>(generator: G, radius: f64, degree: usize)
    where
        G: Generator,
    {
        let shape = generator.shape().unwrap();
        assert_eq!(generator.vertex_count(), shape.vertex_count());
        assert_eq!(generator.edge_count(), shape.edge_count());
        for position in shape.vertices() {
            assert_relative_eq!(radius, position.length(), max_relative = 1.0e-12);
        }
        let length = shape.rod(0).unwrap().length();
        for rod in shape.rods() {
            assert_relative_eq!(length, rod.length(), max_relative = 1.0e-12);
        }
        assert!(shape.adjacency().unwrap().is_regular(degree));
    }

    #[test]
    fn tetrahedron() {
        check(Tetrahedron::new(), 1.0, 3);
        check(Tetrahedron::with_radius(3.0f64.sqrt()), 3.0f64.sqrt(), 3);
    }

    #[test]
    fn cube() {
        check(Cube::new(), 1.0, 3);
        check(Cube::with_radius(5.0), 5.0, 3);
    }

    #[test]
    fn octahedron() {
        check(Octahedron::new(), 1.0, 4);
        check(Octahedron::with_radius(0.25), 0.25, 4);
    }

    #[test]
    fn dodecahedron() {
        check(Dodecahedron::new(), 1.0, 3);
        check(Dodecahedron::with_radius(40.0), 40.0, 3);
    }

    #[test]
    fn accumulate() {
        let mut builder = ShapeBuilder::default();
        Tetrahedron::new().generate(&mut builder).unwrap();
        Cube::new().generate(&mut builder).unwrap();
        let shape = builder.build().unwrap();
        assert_eq!(12, shape.vertex_count());
        assert_eq!(18, shape.edge_count());
        assert!(shape.adjacency().unwrap().is_regular(3));
    }
}
