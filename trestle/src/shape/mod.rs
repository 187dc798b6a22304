//! Rod networks.
//!
//! A [`Shape`] is an ordered table of vertex positions and an ordered list of
//! [`Edge`]s that join those vertices by index. Vertices have no identity
//! beyond their index in the table. Shapes are validated on construction and
//! are read-only thereafter: every edge refers to two distinct vertices that
//! exist in the table and no two edges join the same pair of vertices.
//!
//! Edges do not carry copies of their endpoint positions. Endpoints are read
//! from the vertex table on demand (see [`Shape::endpoints`] and
//! [`Shape::rod`]), so they cannot disagree with the vertices they name.
//!
//! # Examples
//!
//! ```rust
//! use trestle::prelude::*;
//! use trestle::shape::Shape;
//!
//! let shape = Shape::from_raw_buffers(
//!     vec![(0u32, 1), (1, 2), (2, 0)],
//!     vec![(0.0, 0.0, 0.0), (1.0, 0.0, 0.0), (0.0, 1.0, 0.0)],
//! )
//! .unwrap();
//! assert_eq!(3, shape.edge_count());
//! ```

mod adjacency;

use ahash::AHashSet;
use num::ToPrimitive;
use std::collections::TryReserveError;
use thiserror::Error;
use tracing::debug;

use crate::builder::ShapeBuilder;
use crate::geometry::{FromGeometry, IntoGeometry, Vector};
use crate::rod::Rod;
use crate::FromRawBuffers;

pub use crate::shape::adjacency::VertexAdjacency;

/// Errors concerning the construction and encoding of [`Shape`]s.
#[derive(Clone, Debug, Error, PartialEq)]
pub enum ShapeError {
    #[error("vertex index {index} out of bounds; the shape has {count} vertices")]
    IndexOutOfBounds { index: usize, count: usize },
    #[error("edge joins vertex {0} to itself")]
    Loop(usize),
    #[error("vertices {0} and {1} are already joined by an edge")]
    DuplicateEdge(usize, usize),
    #[error("vertex index {0} is negative")]
    NegativeIndex(i64),
    /// A denormalized endpoint does not match the position of its vertex.
    #[error("endpoint of edge {edge} disagrees with the position of vertex {vertex}")]
    EndpointConflict { edge: usize, vertex: usize },
    #[error("encoding operation failed")]
    Encoding,
}

/// An edge between two vertices of a [`Shape`].
///
/// The order of the vertices is significant: the rod of an edge runs from
/// `end1` (the position of `v1`) to `end2` (the position of `v2`).
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct Edge {
    v1: usize,
    v2: usize,
}

impl Edge {
    pub fn new(v1: usize, v2: usize) -> Self {
        Edge { v1, v2 }
    }

    pub fn v1(&self) -> usize {
        self.v1
    }

    pub fn v2(&self) -> usize {
        self.v2
    }

    pub fn vertices(&self) -> (usize, usize) {
        (self.v1, self.v2)
    }

    pub fn is_incident_to(&self, vertex: usize) -> bool {
        self.v1 == vertex || self.v2 == vertex
    }

    /// Gets the vertex at the other end of the edge from `vertex`.
    pub fn opposite(&self, vertex: usize) -> Option<usize> {
        if vertex == self.v1 {
            Some(self.v2)
        }
        else if vertex == self.v2 {
            Some(self.v1)
        }
        else {
            None
        }
    }

    pub fn shares_vertex_with(&self, other: &Edge) -> bool {
        other.is_incident_to(self.v1) || other.is_incident_to(self.v2)
    }

    // Unordered key used to detect duplicate edges.
    pub(crate) fn key(&self) -> (usize, usize) {
        if self.v1 <= self.v2 {
            (self.v1, self.v2)
        }
        else {
            (self.v2, self.v1)
        }
    }
}

impl From<(usize, usize)> for Edge {
    fn from((v1, v2): (usize, usize)) -> Self {
        Edge::new(v1, v2)
    }
}

/// Vertex positions and the edges that join them.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Shape {
    vertices: Vec<Vector>,
    edges: Vec<Edge>,
}

impl Shape {
    /// Creates a shape from vertex positions and edges.
    ///
    /// # Errors
    ///
    /// Returns an error if an edge refers to a vertex that is out of bounds,
    /// joins a vertex to itself, or joins the same pair of vertices as another
    /// edge.
    ///
    /// Loops and duplicate edges are rejected here rather than reported as a
    /// structural error by the [error functional][`crate::energy`]: a loop has
    /// no axis and a duplicate edge would present the same rod twice at both
    /// of its vertices. Shapes with such edges cannot be constructed.
    pub fn new(vertices: Vec<Vector>, edges: Vec<Edge>) -> Result<Self, ShapeError> {
        let mut keys = AHashSet::with_capacity(edges.len());
        for edge in edges.iter() {
            validate(edge, vertices.len())?;
            if !keys.insert(edge.key()) {
                let (a, b) = edge.key();
                return Err(ShapeError::DuplicateEdge(a, b));
            }
        }
        debug!(
            vertices = vertices.len(),
            edges = edges.len(),
            "constructed shape"
        );
        Ok(Shape { vertices, edges })
    }

    pub fn builder() -> ShapeBuilder {
        ShapeBuilder::default()
    }

    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    pub fn vertices(&self) -> &[Vector] {
        self.vertices.as_slice()
    }

    pub fn edges(&self) -> &[Edge] {
        self.edges.as_slice()
    }

    pub fn position(&self, vertex: usize) -> Option<Vector> {
        self.vertices.get(vertex).copied()
    }

    pub fn edge(&self, edge: usize) -> Option<Edge> {
        self.edges.get(edge).copied()
    }

    /// Gets the positions of the endpoints of an edge as `(end1, end2)`.
    pub fn endpoints(&self, edge: usize) -> Option<(Vector, Vector)> {
        self.rod(edge).map(|rod| (rod.end1, rod.end2))
    }

    /// Gets the rod spanned by an edge.
    pub fn rod(&self, edge: usize) -> Option<Rod> {
        self.edges.get(edge).map(|edge| self.rod_of(edge))
    }

    /// Gets an iterator over the rods of all edges in order.
    pub fn rods(&self) -> impl ExactSizeIterator<Item = Rod> + '_ {
        self.edges.iter().map(move |edge| self.rod_of(edge))
    }

    /// Finds the index of the first vertex at exactly `position`.
    pub fn position_index(&self, position: &Vector) -> Option<usize> {
        self.vertices.iter().position(|vertex| vertex == position)
    }

    /// Builds the vertex adjacency of the shape.
    ///
    /// # Errors
    ///
    /// Returns an error if storage for the adjacency cannot be allocated.
    pub fn adjacency(&self) -> Result<VertexAdjacency, TryReserveError> {
        VertexAdjacency::from_shape(self)
    }

    /// Creates a shape with the same edges and each vertex moved to the
    /// position returned by `f`.
    pub fn map_positions<F>(&self, mut f: F) -> Shape
    where
        F: FnMut(usize, Vector) -> Vector,
    {
        Shape {
            vertices: self
                .vertices
                .iter()
                .enumerate()
                .map(|(vertex, &position)| f(vertex, position))
                .collect(),
            edges: self.edges.clone(),
        }
    }

    pub(crate) fn positions_mut(&mut self) -> &mut [Vector] {
        self.vertices.as_mut_slice()
    }

    /// Gets the rod spanned by an edge.
    ///
    /// # Panics
    ///
    /// Panics if `edge` is out of bounds.
    pub(crate) fn rod_at(&self, edge: usize) -> Rod {
        self.rod_of(&self.edges[edge])
    }

    fn rod_of(&self, edge: &Edge) -> Rod {
        // Edges are validated on construction, so both indices are in bounds.
        Rod::new(self.vertices[edge.v1], self.vertices[edge.v2])
    }
}

impl<N, G> FromRawBuffers<(N, N), G> for Shape
where
    N: Copy + ToPrimitive,
    Vector: FromGeometry<G>,
{
    type Error = ShapeError;

    fn from_raw_buffers<I, J>(indices: I, vertices: J) -> Result<Self, Self::Error>
    where
        I: IntoIterator<Item = (N, N)>,
        J: IntoIterator<Item = G>,
    {
        let vertices = vertices
            .into_iter()
            .map(|vertex| vertex.into_geometry())
            .collect::<Vec<Vector>>();
        let edges = indices
            .into_iter()
            .map(|(a, b)| Ok(Edge::new(to_index(a)?, to_index(b)?)))
            .collect::<Result<Vec<_>, ShapeError>>()?;
        Shape::new(vertices, edges)
    }
}

pub(crate) fn validate(edge: &Edge, count: usize) -> Result<(), ShapeError> {
    for index in [edge.v1, edge.v2] {
        if index >= count {
            return Err(ShapeError::IndexOutOfBounds { index, count });
        }
    }
    if edge.v1 == edge.v2 {
        Err(ShapeError::Loop(edge.v1))
    }
    else {
        Ok(())
    }
}

fn to_index<N>(index: N) -> Result<usize, ShapeError>
where
    N: ToPrimitive,
{
    index.to_usize().ok_or_else(|| match index.to_i64() {
        Some(index) if index < 0 => ShapeError::NegativeIndex(index),
        _ => ShapeError::Encoding,
    })
}
