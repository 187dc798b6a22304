//! Incremental shape construction.
//!
//! [`ShapeBuilder`] accumulates vertices and edges and validates each edge as
//! it is inserted, so that errors are reported where they occur rather than
//! when the shape is built. Vertex keys are the indices returned by
//! [`ShapeBuilder::insert_vertex`].
//!
//! # Examples
//!
//! ```rust
//! use trestle::shape::Shape;
//!
//! let mut builder = Shape::builder();
//! let a = builder.insert_vertex((0.0, 0.0, 0.0));
//! let b = builder.insert_vertex((1.0, 0.0, 0.0));
//! builder.insert_edge(a, b).unwrap();
//! let shape = builder.build().unwrap();
//! assert_eq!(1, shape.edge_count());
//! ```

use ahash::AHashSet;

use crate::geometry::{FromGeometry, IntoGeometry, Vector};
use crate::shape::{self, Edge, Shape, ShapeError};

#[derive(Clone, Debug, Default)]
pub struct ShapeBuilder {
    vertices: Vec<Vector>,
    edges: Vec<Edge>,
    keys: AHashSet<(usize, usize)>,
}

impl ShapeBuilder {
    pub fn with_capacity(vertices: usize, edges: usize) -> Self {
        ShapeBuilder {
            vertices: Vec::with_capacity(vertices),
            edges: Vec::with_capacity(edges),
            keys: AHashSet::with_capacity(edges),
        }
    }

    /// Inserts a vertex and returns its index.
    pub fn insert_vertex<T>(&mut self, data: T) -> usize
    where
        Vector: FromGeometry<T>,
    {
        self.vertices.push(data.into_geometry());
        self.vertices.len() - 1
    }

    /// Inserts an edge from vertex `a` to vertex `b` and returns its index.
    ///
    /// # Errors
    ///
    /// Returns an error if either vertex has not been inserted, if `a` and
    /// `b` are the same vertex, or if the vertices are already joined.
    pub fn insert_edge(&mut self, a: usize, b: usize) -> Result<usize, ShapeError> {
        let edge = Edge::new(a, b);
        shape::validate(&edge, self.vertices.len())?;
        if !self.keys.insert(edge.key()) {
            let (a, b) = edge.key();
            return Err(ShapeError::DuplicateEdge(a, b));
        }
        self.edges.push(edge);
        Ok(self.edges.len() - 1)
    }

    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    pub fn build(self) -> Result<Shape, ShapeError> {
        let ShapeBuilder {
            vertices, edges, ..
        } = self;
        Shape::new(vertices, edges)
    }
}

#[cfg(test)]
mod tests {
    use crate::geometry::Vector;
    use crate::shape::{Shape, ShapeError};

    #[test]
    fn build() {
        let mut builder = Shape::builder();
        let a = builder.insert_vertex([0.0, 0.0, 0.0]);
        let b = builder.insert_vertex(Vector::x());
        let c = builder.insert_vertex((0i32, 1, 0));
        assert_eq!((0, 1, 2), (a, b, c));
        assert_eq!(0, builder.insert_edge(a, b).unwrap());
        assert_eq!(1, builder.insert_edge(b, c).unwrap());

        let shape = builder.build().unwrap();
        assert_eq!(3, shape.vertex_count());
        assert_eq!(2, shape.edge_count());
        assert_eq!(Some(Vector::y()), shape.position(c));
    }

    #[test]
    fn error_on_insert() {
        let mut builder = Shape::builder();
        let a = builder.insert_vertex(Vector::zero());
        let b = builder.insert_vertex(Vector::x());
        builder.insert_edge(a, b).unwrap();

        assert_eq!(
            builder.insert_edge(b, a).err().unwrap(),
            ShapeError::DuplicateEdge(a, b)
        );
        assert_eq!(builder.insert_edge(a, a).err().unwrap(), ShapeError::Loop(a));
        assert_eq!(
            builder.insert_edge(a, 2).err().unwrap(),
            ShapeError::IndexOutOfBounds { index: 2, count: 2 }
        );
        // Rejected edges are not retained.
        assert_eq!(1, builder.edge_count());
        assert!(builder.build().is_ok());
    }
}
