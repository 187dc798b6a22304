use approx::{AbsDiffEq, RelativeEq, UlpsEq};
use std::fmt::{self, Display, Formatter};
use std::ops::{Add, AddAssign, Mul, Neg, Sub, SubAssign};

use crate::geometry::FromGeometry;

/// Vector in $\Reals^3$.
///
/// `Vector` is a plain value: it is `Copy` and has no identity beyond its
/// components. It is used both for positions and for displacements.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Vector {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Vector {
    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Vector { x, y, z }
    }

    pub const fn zero() -> Self {
        Vector::new(0.0, 0.0, 0.0)
    }

    pub const fn x() -> Self {
        Vector::new(1.0, 0.0, 0.0)
    }

    pub const fn y() -> Self {
        Vector::new(0.0, 1.0, 0.0)
    }

    pub const fn z() -> Self {
        Vector::new(0.0, 0.0, 1.0)
    }

    /// Computes $a\vec{u} + b\vec{v}$.
    pub fn linear(a: f64, u: Vector, b: f64, v: Vector) -> Self {
        Vector::new(a * u.x + b * v.x, a * u.y + b * v.y, a * u.z + b * v.z)
    }

    pub fn dot(self, other: Vector) -> f64 {
        self.x * other.x + self.y * other.y + self.z * other.z
    }

    pub fn cross(self, other: Vector) -> Self {
        Vector::new(
            self.y * other.z - self.z * other.y,
            self.z * other.x - self.x * other.z,
            self.x * other.y - self.y * other.x,
        )
    }

    pub fn scale(self, t: f64) -> Self {
        Vector::new(t * self.x, t * self.y, t * self.z)
    }

    pub fn square_length(self) -> f64 {
        self.dot(self)
    }

    /// Euclidean length. This is zero for the zero vector.
    pub fn length(self) -> f64 {
        self.square_length().sqrt()
    }

    /// Gets a unit vector in the same direction, or `None` if the length of
    /// the vector is zero or not finite.
    pub fn normalize(self) -> Option<Self> {
        let length = self.length();
        if length > 0.0 && length.is_finite() {
            Some(self.scale(1.0 / length))
        }
        else {
            None
        }
    }

    pub fn distance(self, other: Vector) -> f64 {
        (self - other).length()
    }

    pub fn midpoint(self, other: Vector) -> Self {
        Vector::linear(0.5, self, 0.5, other)
    }

    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite() && self.z.is_finite()
    }

    pub fn into_array(self) -> [f64; 3] {
        [self.x, self.y, self.z]
    }
}

impl Display for Vector {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> fmt::Result {
        write!(formatter, "({}, {}, {})", self.x, self.y, self.z)
    }
}

impl Add for Vector {
    type Output = Self;

    fn add(self, other: Self) -> Self::Output {
        Vector::new(self.x + other.x, self.y + other.y, self.z + other.z)
    }
}

impl AddAssign for Vector {
    fn add_assign(&mut self, other: Self) {
        *self = *self + other;
    }
}

impl Sub for Vector {
    type Output = Self;

    fn sub(self, other: Self) -> Self::Output {
        Vector::new(self.x - other.x, self.y - other.y, self.z - other.z)
    }
}

impl SubAssign for Vector {
    fn sub_assign(&mut self, other: Self) {
        *self = *self - other;
    }
}

impl Neg for Vector {
    type Output = Self;

    fn neg(self) -> Self::Output {
        Vector::new(-self.x, -self.y, -self.z)
    }
}

impl Mul<f64> for Vector {
    type Output = Self;

    fn mul(self, t: f64) -> Self::Output {
        self.scale(t)
    }
}

impl Mul<Vector> for f64 {
    type Output = Vector;

    fn mul(self, vector: Vector) -> Self::Output {
        vector.scale(self)
    }
}

impl From<[f64; 3]> for Vector {
    fn from(array: [f64; 3]) -> Self {
        let [x, y, z] = array;
        Vector::new(x, y, z)
    }
}

impl From<(f64, f64, f64)> for Vector {
    fn from(tuple: (f64, f64, f64)) -> Self {
        let (x, y, z) = tuple;
        Vector::new(x, y, z)
    }
}

impl From<Vector> for [f64; 3] {
    fn from(vector: Vector) -> Self {
        vector.into_array()
    }
}

impl From<Vector> for (f64, f64, f64) {
    fn from(vector: Vector) -> Self {
        (vector.x, vector.y, vector.z)
    }
}

impl FromGeometry<[f64; 3]> for Vector {
    fn from_geometry(other: [f64; 3]) -> Self {
        other.into()
    }
}

impl FromGeometry<(f64, f64, f64)> for Vector {
    fn from_geometry(other: (f64, f64, f64)) -> Self {
        other.into()
    }
}

// Integer tuples are convenient for lattice fixtures.
impl FromGeometry<(i32, i32, i32)> for Vector {
    fn from_geometry(other: (i32, i32, i32)) -> Self {
        Vector::new(other.0.into(), other.1.into(), other.2.into())
    }
}

impl AbsDiffEq for Vector {
    type Epsilon = f64;

    fn default_epsilon() -> Self::Epsilon {
        f64::default_epsilon()
    }

    fn abs_diff_eq(&self, other: &Self, epsilon: Self::Epsilon) -> bool {
        self.x.abs_diff_eq(&other.x, epsilon)
            && self.y.abs_diff_eq(&other.y, epsilon)
            && self.z.abs_diff_eq(&other.z, epsilon)
    }
}

impl RelativeEq for Vector {
    fn default_max_relative() -> Self::Epsilon {
        f64::default_max_relative()
    }

    fn relative_eq(
        &self,
        other: &Self,
        epsilon: Self::Epsilon,
        max_relative: Self::Epsilon,
    ) -> bool {
        self.x.relative_eq(&other.x, epsilon, max_relative)
            && self.y.relative_eq(&other.y, epsilon, max_relative)
            && self.z.relative_eq(&other.z, epsilon, max_relative)
    }
}

impl UlpsEq for Vector {
    fn default_max_ulps() -> u32 {
        f64::default_max_ulps()
    }

    fn ulps_eq(&self, other: &Self, epsilon: Self::Epsilon, max_ulps: u32) -> bool {
        self.x.ulps_eq(&other.x, epsilon, max_ulps)
            && self.y.ulps_eq(&other.y, epsilon, max_ulps)
            && self.z.ulps_eq(&other.z, epsilon, max_ulps)
    }
}
