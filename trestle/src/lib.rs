//! **Trestle** is a library for the geometry of rod networks.
//!
//! A rod network (a truss) is described by a [`Shape`]: a table of vertex
//! positions and a list of edges that join vertices by index. Each edge spans
//! a straight [`Rod`]. The [`energy`] module scores trivalent networks against
//! a target rod-clearance geometry, the [`descent`] module relaxes networks
//! toward lower energy, and the [`primitive`] module generates the skeletons
//! of common polyhedra.
//!
//! # Examples
//!
//! Scoring the skeleton of a cube built from threaded rods:
//!
//! ```rust
//! use trestle::energy::{EnergyConfig, ErrorFunctional};
//! use trestle::prelude::*;
//! use trestle::primitive::cube::Cube;
//!
//! let shape = Cube::with_width(100.0).shape().unwrap();
//! let functional = ErrorFunctional::new(EnergyConfig::default()).unwrap();
//! let energy = functional.evaluate(&shape).unwrap();
//! ```
//!
//! [`descent`]: crate::descent
//! [`energy`]: crate::energy
//! [`primitive`]: crate::primitive
//! [`Rod`]: crate::rod::Rod
//! [`Shape`]: crate::shape::Shape

use std::fmt::Debug;

pub mod builder;
pub mod descent;
pub mod encoding;
pub mod energy;
pub mod geometry;
pub mod integration;
pub mod primitive;
pub mod rod;
pub mod shape;

pub mod prelude {
    //! Re-exports commonly used traits.
    //!
    //! Importing the contents of this module is recommended when constructing
    //! or encoding shapes, as those operations are expressed mostly through
    //! traits.

    pub use crate::encoding::raw::{FromRaw as _, ToRaw as _};
    pub use crate::encoding::text::ToText as _;
    pub use crate::geometry::{FromGeometry as _, IntoGeometry as _};
    pub use crate::primitive::Generator as _;
    pub use crate::FromRawBuffers as _;
}

pub trait FromRawBuffers<N, G>: Sized {
    type Error: Debug;

    fn from_raw_buffers<I, J>(indices: I, vertices: J) -> Result<Self, Self::Error>
    where
        I: IntoIterator<Item = N>,
        J: IntoIterator<Item = G>;
}
