//! Dodecahedron primitive.
//!
//! The vertices of a dodecahedron oriented with a face parallel to the
//! $xy$-plane lie in four rings of five vertices each. On the unit sphere, the
//! rings lie at heights $\pm a$ and $\pm b$ where
//!
//! $$a = \sqrt{\frac{5 + 2\sqrt{5}}{15}},\quad b = \sqrt{\frac{5 - 2\sqrt{5}}{15}}.$$
//!
//! The two lower rings are rotated by half a step ($36^\circ$) relative to the
//! two upper rings.

use std::f64::consts::PI;

use crate::builder::ShapeBuilder;
use crate::geometry::Vector;
use crate::primitive::Generator;
use crate::shape::ShapeError;

const RING: usize = 5;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Dodecahedron {
    radius: f64,
}

impl Dodecahedron {
    pub fn new() -> Self {
        Dodecahedron::with_radius(1.0)
    }

    pub fn with_radius(radius: f64) -> Self {
        Dodecahedron { radius }
    }

    // Heights of the upper two rings on the unit sphere.
    fn heights() -> (f64, f64) {
        let root5 = 5.0f64.sqrt();
        (
            ((5.0 + 2.0 * root5) / 15.0).sqrt(),
            ((5.0 - 2.0 * root5) / 15.0).sqrt(),
        )
    }

    fn ring(&self, height: f64, offset: f64) -> impl Iterator<Item = Vector> {
        let step = 2.0 * PI / RING as f64;
        let radius = self.radius * (1.0 - height * height).sqrt();
        let z = self.radius * height;
        (0..RING).map(move |index| {
            let theta = (index as f64 + offset) * step;
            Vector::new(radius * theta.cos(), radius * theta.sin(), z)
        })
    }
}

impl Default for Dodecahedron {
    fn default() -> Self {
        Dodecahedron::new()
    }
}

impl Generator for Dodecahedron {
    fn vertex_count(&self) -> usize {
        4 * RING
    }

    fn edge_count(&self) -> usize {
        6 * RING
    }

    fn generate(&self, builder: &mut ShapeBuilder) -> Result<(), ShapeError> {
        let (a, b) = Dodecahedron::heights();
        let base = builder.vertex_count();
        for position in self
            .ring(a, 0.0)
            .chain(self.ring(b, 0.0))
            .chain(self.ring(-b, 0.5))
            .chain(self.ring(-a, 0.5))
        {
            builder.insert_vertex(position);
        }
        // Rings are indexed from the top: `upper`, `middle`, `lower`, and
        // `bottom`. Each vertex of the middle rings joins two vertices of the
        // other middle ring, which is offset by half a step.
        let upper = |i: usize| base + (i % RING);
        let middle = |i: usize| base + RING + (i % RING);
        let lower = |i: usize| base + (2 * RING) + (i % RING);
        let bottom = |i: usize| base + (3 * RING) + (i % RING);
        for i in 0..RING {
            builder.insert_edge(upper(i), middle(i))?;
            builder.insert_edge(upper(i), upper(i + 1))?;
            builder.insert_edge(middle(i), lower(i))?;
            builder.insert_edge(middle(i), lower(i + RING - 1))?;
            builder.insert_edge(lower(i), bottom(i))?;
            builder.insert_edge(bottom(i), bottom(i + 1))?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use crate::primitive::dodecahedron::Dodecahedron;
    use crate::primitive::Generator;

    #[test]
    fn edge_length() {
        // The edge length of a dodecahedron inscribed in the unit sphere is
        // 4 / (sqrt(3) (1 + sqrt(5))).
        let expected = 4.0 / (3.0f64.sqrt() * (1.0 + 5.0f64.sqrt()));
        let shape = Dodecahedron::new().shape().unwrap();
        for rod in shape.rods() {
            assert_relative_eq!(expected, rod.length(), max_relative = 1.0e-12);
        }
    }

    #[test]
    fn rings_are_parallel_to_xy_plane() {
        let (a, b) = Dodecahedron::heights();
        let shape = Dodecahedron::new().shape().unwrap();
        let heights = shape
            .vertices()
            .chunks(5)
            .map(|ring| ring[0].z)
            .collect::<Vec<_>>();
        assert_eq!(vec![a, b, -b, -a], heights);
        for ring in shape.vertices().chunks(5) {
            assert!(ring.iter().all(|position| position.z == ring[0].z));
        }
    }
}
