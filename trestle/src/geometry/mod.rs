//! Vector arithmetic.
//!
//! This module provides [`Vector`], a value type in $\Reals^3$, and free
//! functions for the closed-form operations used throughout this crate. The
//! free functions mirror the methods on [`Vector`] and exist so that
//! expressions can be written in prefix form, such as `dot(u, v)`.
//!
//! # Examples
//!
//! Computing the area of a parallelogram spanned by two vectors:
//!
//! ```rust
//! use trestle::geometry::{cross, length, Vector};
//!
//! let u = Vector::new(2.0, 0.0, 0.0);
//! let v = Vector::new(1.0, 3.0, 0.0);
//! assert_eq!(6.0, length(cross(u, v)));
//! ```
//!
//! [`Vector`]: crate::geometry::Vector

mod vector;

pub use crate::geometry::vector::Vector;

pub trait FromGeometry<T> {
    fn from_geometry(other: T) -> Self;
}

impl<T> FromGeometry<T> for T {
    fn from_geometry(other: T) -> Self {
        other
    }
}

pub trait IntoGeometry<T> {
    fn into_geometry(self) -> T;
}

impl<T, U> IntoGeometry<U> for T
where
    U: FromGeometry<T>,
{
    fn into_geometry(self) -> U {
        U::from_geometry(self)
    }
}

/// Computes $a\vec{u} + b\vec{v}$ componentwise.
pub fn linear(a: f64, u: Vector, b: f64, v: Vector) -> Vector {
    Vector::linear(a, u, b, v)
}

pub fn dot(u: Vector, v: Vector) -> f64 {
    u.dot(v)
}

pub fn cross(u: Vector, v: Vector) -> Vector {
    u.cross(v)
}

pub fn subtract(u: Vector, v: Vector) -> Vector {
    u - v
}

pub fn scale(t: f64, v: Vector) -> Vector {
    v.scale(t)
}

/// Euclidean length of a vector. The length of the zero vector is zero.
pub fn length(v: Vector) -> f64 {
    v.length()
}
