//! Flat record encoding.
//!
//! This encoding mirrors the plain C structs used to pass shapes across a
//! foreign function boundary: a vertex is three `double`s and an edge is two
//! `int` vertex indices followed by copies of the positions of both
//! endpoints. Records are `#[repr(C)]` and implement [`bytemuck::Pod`], so
//! slices of records can be viewed as bytes and back.
//!
//! Endpoint copies are redundant with the vertex table. They are checked
//! against the vertex table when decoding and regenerated from it when
//! encoding. The check compares bits rather than values, so a copy must be
//! exact: `NaN` matches itself and `-0.0` does not match `0.0`.
//!
//! # Examples
//!
//! ```rust
//! use trestle::encoding::raw::{FromRaw, RawEdge, RawVector, ToRaw};
//! use trestle::shape::Shape;
//!
//! let vertices = [RawVector::new(0.0, 0.0, 0.0), RawVector::new(1.0, 0.0, 0.0)];
//! let edges = [RawEdge::new(0, 1, vertices[0], vertices[1])];
//! let shape = Shape::from_raw(&vertices, &edges).unwrap();
//! assert_eq!((vertices.to_vec(), edges.to_vec()), shape.to_raw().unwrap());
//! ```

use bytemuck::{Pod, Zeroable};
use itertools::Itertools;
use std::mem;

use crate::geometry::{FromGeometry, Vector};
use crate::shape::{Edge, Shape, ShapeError};

#[derive(Clone, Copy, Debug, Default, PartialEq, Pod, Zeroable)]
#[repr(C)]
pub struct RawVector {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl RawVector {
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        RawVector { x, y, z }
    }
}

impl From<Vector> for RawVector {
    fn from(vector: Vector) -> Self {
        RawVector::new(vector.x, vector.y, vector.z)
    }
}

impl FromGeometry<RawVector> for Vector {
    fn from_geometry(other: RawVector) -> Self {
        Vector::new(other.x, other.y, other.z)
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Pod, Zeroable)]
#[repr(C)]
pub struct RawEdge {
    pub v1: i32,
    pub v2: i32,
    pub end1: RawVector,
    pub end2: RawVector,
}

impl RawEdge {
    pub fn new(v1: i32, v2: i32, end1: RawVector, end2: RawVector) -> Self {
        RawEdge { v1, v2, end1, end2 }
    }
}

pub trait FromRaw: Sized {
    /// Decodes records.
    ///
    /// # Errors
    ///
    /// Returns an error if an index is negative or out of bounds, if an
    /// endpoint disagrees with the position of its vertex, or if the decoded
    /// topology is otherwise invalid.
    fn from_raw(vertices: &[RawVector], edges: &[RawEdge]) -> Result<Self, ShapeError>;

    /// Decodes records from native-endian bytes.
    ///
    /// The byte slices need not be aligned.
    ///
    /// # Errors
    ///
    /// Returns [`ShapeError::Encoding`] if the length of either slice is not
    /// a multiple of the size of its record, and otherwise fails like
    /// [`FromRaw::from_raw`].
    fn from_raw_bytes(vertices: &[u8], edges: &[u8]) -> Result<Self, ShapeError> {
        let vertices = read_records::<RawVector>(vertices)?;
        let edges = read_records::<RawEdge>(edges)?;
        Self::from_raw(&vertices, &edges)
    }
}

pub trait ToRaw {
    /// Encodes records.
    ///
    /// # Errors
    ///
    /// Returns [`ShapeError::Encoding`] if a vertex index cannot be
    /// represented by an `i32`.
    fn to_raw(&self) -> Result<(Vec<RawVector>, Vec<RawEdge>), ShapeError>;
}

impl FromRaw for Shape {
    fn from_raw(vertices: &[RawVector], edges: &[RawEdge]) -> Result<Self, ShapeError> {
        let count = vertices.len();
        let edges = edges
            .iter()
            .enumerate()
            .map(|(index, raw)| {
                let edge = Edge::new(to_index(raw.v1, count)?, to_index(raw.v2, count)?);
                for (vertex, end) in [(edge.v1(), raw.end1), (edge.v2(), raw.end2)] {
                    if bytemuck::bytes_of(&vertices[vertex]) != bytemuck::bytes_of(&end) {
                        return Err(ShapeError::EndpointConflict {
                            edge: index,
                            vertex,
                        });
                    }
                }
                Ok(edge)
            })
            .collect::<Result<Vec<_>, _>>()?;
        let vertices = vertices
            .iter()
            .map(|&vertex| Vector::from_geometry(vertex))
            .collect();
        Shape::new(vertices, edges)
    }
}

impl ToRaw for Shape {
    fn to_raw(&self) -> Result<(Vec<RawVector>, Vec<RawEdge>), ShapeError> {
        let vertices = self
            .vertices()
            .iter()
            .map(|&vertex| RawVector::from(vertex))
            .collect_vec();
        let edges = self
            .edges()
            .iter()
            .zip(self.rods())
            .map(|(edge, rod)| {
                Ok(RawEdge::new(
                    from_index(edge.v1())?,
                    from_index(edge.v2())?,
                    rod.end1.into(),
                    rod.end2.into(),
                ))
            })
            .collect::<Result<Vec<_>, ShapeError>>()?;
        Ok((vertices, edges))
    }
}

fn read_records<T>(bytes: &[u8]) -> Result<Vec<T>, ShapeError>
where
    T: Pod,
{
    let size = mem::size_of::<T>();
    if bytes.len() % size != 0 {
        return Err(ShapeError::Encoding);
    }
    Ok(bytes
        .chunks_exact(size)
        .map(bytemuck::pod_read_unaligned)
        .collect())
}

fn to_index(index: i32, count: usize) -> Result<usize, ShapeError> {
    let index = usize::try_from(index).map_err(|_| ShapeError::NegativeIndex(index.into()))?;
    if index < count {
        Ok(index)
    }
    else {
        Err(ShapeError::IndexOutOfBounds { index, count })
    }
}

fn from_index(index: usize) -> Result<i32, ShapeError> {
    i32::try_from(index).map_err(|_| ShapeError::Encoding)
}

#[cfg(test)]
mod tests {
    use std::mem;

    use crate::encoding::raw::{FromRaw, RawEdge, RawVector, ToRaw};
    use crate::geometry::Vector;
    use crate::prelude::*;
    use crate::primitive::tetrahedron::Tetrahedron;
    use crate::shape::{Shape, ShapeError};

    fn rod() -> (Vec<RawVector>, Vec<RawEdge>) {
        let a = RawVector::new(0.0, 0.0, 0.0);
        let b = RawVector::new(1.0, 2.0, 3.0);
        (vec![a, b], vec![RawEdge::new(0, 1, a, b)])
    }

    #[test]
    fn layout() {
        assert_eq!(24, mem::size_of::<RawVector>());
        assert_eq!(56, mem::size_of::<RawEdge>());
    }

    #[test]
    fn decode() {
        let (vertices, edges) = rod();
        let shape = Shape::from_raw(&vertices, &edges).unwrap();
        assert_eq!(2, shape.vertex_count());
        assert_eq!(
            Some((Vector::zero(), Vector::new(1.0, 2.0, 3.0))),
            shape.endpoints(0)
        );
    }

    #[test]
    fn decode_bytes() {
        let shape = Tetrahedron::new().shape().unwrap();
        let (vertices, edges) = shape.to_raw().unwrap();
        // Offset the data by one byte to misalign it.
        let mut buffer = vec![0u8];
        buffer.extend_from_slice(bytemuck::cast_slice(&vertices));
        let decoded =
            Shape::from_raw_bytes(&buffer[1..], bytemuck::cast_slice(&edges)).unwrap();
        assert_eq!(shape, decoded);
    }

    #[test]
    fn error_on_truncated_bytes() {
        let (vertices, edges) = rod();
        let bytes: &[u8] = bytemuck::cast_slice(&edges);
        assert_eq!(
            Shape::from_raw_bytes(bytemuck::cast_slice(&vertices), &bytes[..50])
                .err()
                .unwrap(),
            ShapeError::Encoding
        );
    }

    #[test]
    fn error_on_endpoint_conflict() {
        let (vertices, mut edges) = rod();
        edges[0].end2 = RawVector::new(1.0, 2.0, 3.5);
        assert_eq!(
            Shape::from_raw(&vertices, &edges).err().unwrap(),
            ShapeError::EndpointConflict { edge: 0, vertex: 1 }
        );
    }

    #[test]
    fn decode_non_finite_endpoints() {
        let a = RawVector::new(f64::NAN, 0.0, f64::INFINITY);
        let b = RawVector::new(1.0, 2.0, 3.0);
        let shape = Shape::from_raw(&[a, b], &[RawEdge::new(0, 1, a, b)]).unwrap();
        assert!(!shape.position(0).unwrap().is_finite());

        let c = RawVector::new(-0.0, 0.0, 0.0);
        let end = RawVector::new(0.0, 0.0, 0.0);
        assert_eq!(
            Shape::from_raw(&[c, b], &[RawEdge::new(0, 1, end, b)])
                .err()
                .unwrap(),
            ShapeError::EndpointConflict { edge: 0, vertex: 0 }
        );
    }

    #[test]
    fn error_on_bad_index() {
        let (vertices, mut edges) = rod();
        edges[0].v2 = -3;
        assert_eq!(
            Shape::from_raw(&vertices, &edges).err().unwrap(),
            ShapeError::NegativeIndex(-3)
        );
        edges[0].v2 = 2;
        assert_eq!(
            Shape::from_raw(&vertices, &edges).err().unwrap(),
            ShapeError::IndexOutOfBounds { index: 2, count: 2 }
        );
    }
}
