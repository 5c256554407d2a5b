//! Sextant Astro - Astrophysical units
//!
//! Provides the astronomy catalogue on top of the SI units:
//! - Length (AU, pc, solRad, lyr)
//! - Mass (solMass, M_p, M_e, u)
//! - Spectral density (Jy, R, ph) and magnitudes (mag)
//! - Events and detectors (ct, pix, chan, bin, vox, bit, byte, adu, beam)
//!
//! plus the standard equivalencies (spectral, spectral density, parallax,
//! dimensionless angles).

pub mod astrophys;
pub mod constants;
pub mod equivalencies;

use sextant_core::UnitError;
use sextant_units::{si, Registry};
use tracing::info;

/// Build a registry holding the SI and astrophysical catalogues
pub fn standard() -> Result<Registry, UnitError> {
    let mut registry = Registry::new("standard");
    si::define_all(&mut registry)?;
    astrophys::define_all(&mut registry)?;
    info!(
        units = registry.iter().count(),
        names = registry.len(),
        "standard registry ready"
    );
    Ok(registry)
}
