use smallvec::SmallVec;
use std::collections::TryReserveError;

use crate::shape::Shape;

// Most vertices of interest are trivalent, so three incident edges are stored
// inline before spilling to the heap.
type Incidence = SmallVec<[usize; 3]>;

/// Edges incident to each vertex of a [`Shape`].
///
/// An edge is incident to both of its endpoints. Incident edges are listed in
/// the order in which they appear in the shape. Adjacency is derived data: it
/// is built from a shape on demand and does not observe later changes.
#[derive(Clone, Debug, PartialEq)]
pub struct VertexAdjacency {
    incidence: Vec<Incidence>,
}

impl VertexAdjacency {
    /// Builds the adjacency of a shape.
    ///
    /// # Errors
    ///
    /// Returns an error if storage for the vertex table cannot be reserved.
    pub fn from_shape(shape: &Shape) -> Result<Self, TryReserveError> {
        let mut incidence = Vec::new();
        incidence.try_reserve_exact(shape.vertex_count())?;
        incidence.resize_with(shape.vertex_count(), Incidence::new);
        for (index, edge) in shape.edges().iter().enumerate() {
            let (a, b) = edge.vertices();
            incidence[a].push(index);
            incidence[b].push(index);
        }
        Ok(VertexAdjacency { incidence })
    }

    /// Gets the number of vertices.
    pub fn len(&self) -> usize {
        self.incidence.len()
    }

    pub fn is_empty(&self) -> bool {
        self.incidence.is_empty()
    }

    /// Gets the number of edges incident to a vertex.
    pub fn degree(&self, vertex: usize) -> Option<usize> {
        self.incidence.get(vertex).map(|edges| edges.len())
    }

    /// Gets the indices of the edges incident to a vertex.
    pub fn incident_edges(&self, vertex: usize) -> Option<&[usize]> {
        self.incidence.get(vertex).map(|edges| edges.as_slice())
    }

    /// Gets an iterator over each vertex and its incident edges.
    pub fn iter(&self) -> impl ExactSizeIterator<Item = (usize, &[usize])> {
        self.incidence
            .iter()
            .map(|edges| edges.as_slice())
            .enumerate()
    }

    /// Finds the first vertex with a degree other than `degree`.
    ///
    /// Returns the vertex and its actual degree.
    pub fn find_irregular(&self, degree: usize) -> Option<(usize, usize)> {
        self.iter()
            .map(|(vertex, edges)| (vertex, edges.len()))
            .find(|(_, n)| *n != degree)
    }

    pub fn is_regular(&self, degree: usize) -> bool {
        self.find_irregular(degree).is_none()
    }
}
