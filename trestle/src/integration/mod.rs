//! Integration of external crates and foreign types.
//!
//! This module provides conversions between Trestle types and types from
//! commonly used linear algebra crates. Integrated crates are re-exported
//! within a sub-module, which can be used to avoid versioning conflicts.
//!
//! | Feature             | Crate      | Types                          |
//! |---------------------|------------|--------------------------------|
//! | `geometry-nalgebra` | `nalgebra` | `Point3<f64>`, `Vector3<f64>`  |

// Feature modules. These are empty unless Cargo features are enabled.
pub mod nalgebra;
