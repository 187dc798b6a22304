//! Serialization and encodings.
//!
//! This module provides encodings of [`Shape`]s. Each encoding has a
//! corresponding sub-module. The following table summarizes the encodings
//! supported by Trestle:
//!
//! | Module | Encoding                          | Read | Write |
//! |--------|-----------------------------------|------|-------|
//! | `raw`  | Flat `repr(C)` records            | Yes  | Yes   |
//! | `text` | Plain text for diagnostics        | No   | Yes   |
//!
//! [`Shape`]: crate::shape::Shape

pub mod raw;
pub mod text;
