//! Sextant Core - Fundamental types
//!
//! This crate provides the core types used throughout Sextant:
//! - `Exponent`: Exact rational powers
//! - `Dimension`: Physical dimension vectors with non-physical markers
//! - `UnitError`: The error taxonomy shared by every crate

mod exponent;
mod dimension;
mod error;

pub use exponent::Exponent;
pub use dimension::{Dimension, Marker, PhysicalDimension, Tag, BASE_DIMENSIONS};
pub use error::{UnitError, codes};

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::{Dimension, Exponent, PhysicalDimension, UnitError};
    pub use crate::error::codes;
}
