//! Unit errors
//!
//! All errors are returned at the point of the offending call. Units are
//! immutable, so a failed definition or conversion never leaves partial
//! state behind.

use thiserror::Error;

use crate::Dimension;

/// Standard error codes (machine-readable)
pub mod codes {
    pub const DUPLICATE_UNIT: &str = "DUPLICATE_UNIT";
    pub const MALFORMED_UNIT: &str = "MALFORMED_UNIT";
    pub const UNIT_CONVERSION: &str = "UNIT_CONVERSION";
    pub const UNRESOLVED_UNIT: &str = "UNRESOLVED_UNIT";
    pub const UNKNOWN_UNIT: &str = "UNKNOWN_UNIT";
}

/// Errors raised while defining or converting units
#[derive(Debug, Clone, PartialEq, Error)]
pub enum UnitError {
    /// A name or alias is already taken in the target registry
    #[error("unit name '{name}' is already defined")]
    DuplicateUnit { name: String },

    /// Invalid alias, scale or composite power
    #[error("malformed unit: {reason}")]
    MalformedUnit { reason: String },

    /// The units have different dimensions and no equivalency applies
    #[error("cannot convert '{from}' ({from_dimension}) to '{to}' ({to_dimension}): incompatible dimensions")]
    UnitConversion {
        from: String,
        to: String,
        from_dimension: Dimension,
        to_dimension: Dimension,
    },

    /// The unit mixes unrelated non-physical dimensions
    #[error("'{unit}' has no well-defined dimension and converts only to itself, not to '{target}'")]
    UnresolvedUnit { unit: String, target: String },

    /// Registry lookup miss
    #[error("unknown unit: {name}")]
    UnknownUnit { name: String },
}

impl UnitError {
    pub fn duplicate(name: impl Into<String>) -> Self {
        UnitError::DuplicateUnit { name: name.into() }
    }

    pub fn malformed(reason: impl Into<String>) -> Self {
        UnitError::MalformedUnit { reason: reason.into() }
    }

    pub fn unknown(name: impl Into<String>) -> Self {
        UnitError::UnknownUnit { name: name.into() }
    }

    /// Machine-readable code for this error
    pub fn code(&self) -> &'static str {
        match self {
            UnitError::DuplicateUnit { .. } => codes::DUPLICATE_UNIT,
            UnitError::MalformedUnit { .. } => codes::MALFORMED_UNIT,
            UnitError::UnitConversion { .. } => codes::UNIT_CONVERSION,
            UnitError::UnresolvedUnit { .. } => codes::UNRESOLVED_UNIT,
            UnitError::UnknownUnit { .. } => codes::UNKNOWN_UNIT,
        }
    }
}
