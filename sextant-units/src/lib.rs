//! Sextant Units - Unit definitions, algebra and conversion
//!
//! Provides units as composites of named base units raised to rational
//! powers, with SI prefix expansion and dimension-checked conversion.
//!
//! Components:
//! - `Unit`: immutable unit handle with composite algebra (`&m / &s`)
//! - `Definition` / `Registry`: name and alias table, populated once
//! - `SI_PREFIXES`: the 20 prefixes from yotta to yocto
//! - `convert` / `conversion_factor`: the conversion engine
//! - `Equivalency`: opt-in transforms between different dimensions
//! - `FormatStyle` / `FormatTable`: per-style display names
//! - `si`: the SI unit catalogue

mod conversion;
mod definition;
mod equivalency;
mod format;
mod prefix;
mod registry;
mod unit;
pub mod si;

pub use conversion::{conversion_factor, convert};
pub use definition::{Definition, Represents};
pub use equivalency::{Equivalency, Transform};
pub use format::{FormatStyle, FormatTable};
pub use prefix::{expand, find_prefix, Prefix, SI_PREFIXES};
pub use registry::{Registry, UnitSummary};
pub use unit::{Term, Unit};

pub use sextant_core::{codes, Dimension, Exponent, Marker, PhysicalDimension, Tag, UnitError};
