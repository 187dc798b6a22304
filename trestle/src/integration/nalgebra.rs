#![cfg(feature = "geometry-nalgebra")]

#[doc(hidden)]
pub use ::nalgebra::*;

use ::nalgebra::{Point3, Vector3};

use crate::geometry::{FromGeometry, Vector};

impl FromGeometry<Point3<f64>> for Vector {
    fn from_geometry(other: Point3<f64>) -> Self {
        Vector::new(other.x, other.y, other.z)
    }
}

impl FromGeometry<Vector3<f64>> for Vector {
    fn from_geometry(other: Vector3<f64>) -> Self {
        Vector::new(other.x, other.y, other.z)
    }
}

impl From<Vector> for Point3<f64> {
    fn from(vector: Vector) -> Self {
        Point3::new(vector.x, vector.y, vector.z)
    }
}

impl From<Vector> for Vector3<f64> {
    fn from(vector: Vector) -> Self {
        Vector3::new(vector.x, vector.y, vector.z)
    }
}

#[cfg(test)]
mod tests {
    use ::nalgebra::{Point3, Vector3};

    use crate::geometry::{cross, dot, Vector};
    use crate::prelude::*;
    use crate::shape::Shape;

    #[test]
    fn agrees_with_nalgebra() {
        let u = Vector3::new(1.0, 2.0, 3.0);
        let v = Vector3::new(-2.0, 0.5, 4.0);
        let (a, b): (Vector, Vector) = (u.into_geometry(), v.into_geometry());
        assert_eq!(u.dot(&v), dot(a, b));
        assert_eq!(u.cross(&v), Vector3::from(cross(a, b)));
    }

    #[test]
    fn shape_from_points() {
        let shape = Shape::from_raw_buffers(
            vec![(0u32, 1)],
            vec![Point3::new(0.0, 0.0, 0.0), Point3::new(1.0, 1.0, 1.0)],
        )
        .unwrap();
        assert_eq!(
            Point3::new(1.0, 1.0, 1.0),
            Point3::from(shape.position(1).unwrap())
        );
    }
}
