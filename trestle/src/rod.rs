//! Rods.
//!
//! A [`Rod`] is the straight segment spanned by an edge of a
//! [`Shape`][`crate::shape::Shape`], running from `end1` to `end2`. Rods are
//! values copied out of a shape; they do not refer back to it.

use crate::geometry::{cross, dot, Vector};

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Rod {
    pub end1: Vector,
    pub end2: Vector,
}

impl Rod {
    pub fn new(end1: Vector, end2: Vector) -> Self {
        Rod { end1, end2 }
    }

    /// Unnormalized direction of the rod from `end2` to `end1`.
    pub fn axis(&self) -> Vector {
        self.end1 - self.end2
    }

    /// Unnormalized direction of the rod from `end1` to `end2`.
    pub fn delta(&self) -> Vector {
        self.end2 - self.end1
    }

    pub fn length(&self) -> f64 {
        self.delta().length()
    }

    pub fn midpoint(&self) -> Vector {
        self.end1.midpoint(self.end2)
    }

    /// Unit direction from `end1` to `end2`, or `None` if the rod is
    /// degenerate.
    pub fn direction(&self) -> Option<Vector> {
        self.delta().normalize()
    }

    /// Distance from a point to the line that carries the rod.
    ///
    /// If the rod is degenerate, this is the distance to its (only) endpoint.
    pub fn line_distance(&self, point: Vector) -> f64 {
        let offset = point - self.end1;
        match self.direction() {
            Some(direction) => cross(offset, direction).length(),
            None => offset.length(),
        }
    }

    /// Distance between the lines that carry two rods.
    ///
    /// For skew lines this is the length of their common perpendicular. For
    /// parallel lines it is the distance from either line to the other.
    pub fn nearest_distance(&self, other: &Rod) -> f64 {
        match cross(self.delta(), other.delta()).normalize() {
            Some(normal) => dot(self.end1 - other.end1, normal).abs(),
            None => match self.direction() {
                Some(_) => self.line_distance(other.end1),
                None => other.line_distance(self.end1),
            },
        }
    }
}
