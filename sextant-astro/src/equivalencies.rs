//! Standard astronomical equivalencies
//!
//! Each function returns a list to pass to `convert`. Endpoints are looked
//! up in the registry, so the SI and astrophysical catalogues must be
//! defined first.

use sextant_core::UnitError;
use sextant_units::{convert, Equivalency, Registry, Unit};

use crate::constants::{C, H};

/// Wavelength, frequency, photon energy and wavenumber
pub fn spectral(registry: &Registry) -> Result<Vec<Equivalency>, UnitError> {
    let m = registry.require("m")?;
    let hz = registry.require("Hz")?;
    let joule = registry.require("J")?;
    let hc = H * C;

    Ok(vec![
        Equivalency::new("spectral: wavelength-frequency", m.clone(), hz.clone(), |x| C / x, |x| C / x),
        Equivalency::new("spectral: wavelength-energy", m.clone(), joule.clone(), move |x| hc / x, move |x| hc / x),
        Equivalency::new("spectral: frequency-energy", hz, joule, |x| x * H, |x| x / H),
        Equivalency::new("spectral: wavenumber-wavelength", m.inverse(), m, |x| 1.0 / x, |x| 1.0 / x),
    ])
}

/// Spectral flux density per unit frequency and per unit wavelength,
/// `F_λ = F_ν c / λ²`, at the given spectral coordinate.
///
/// `spectral_unit` may be any unit `spectral` relates to a wavelength.
pub fn spectral_density(
    registry: &Registry,
    value: f64,
    spectral_unit: &Unit,
) -> Result<Vec<Equivalency>, UnitError> {
    let m = registry.require("m")?;
    let wavelength = convert(value, spectral_unit, &m, &spectral(registry)?)?;
    if !(wavelength.is_finite() && wavelength > 0.0) {
        return Err(UnitError::malformed(format!(
            "spectral density needs a positive wavelength, got {} {}",
            value, spectral_unit
        )));
    }

    let watt = registry.require("W")?;
    let hz = registry.require("Hz")?;
    let flux = &watt / &m.power(2);
    let f_nu = &flux / &hz;
    let f_lambda = &flux / &m;
    let ratio = C / (wavelength * wavelength);

    Ok(vec![Equivalency::new(
        "spectral density",
        f_nu,
        f_lambda,
        move |x| x * ratio,
        move |x| x / ratio,
    )])
}

/// Parallax angle and distance
pub fn parallax(registry: &Registry) -> Result<Vec<Equivalency>, UnitError> {
    let arcsec = registry.require("arcsec")?;
    let pc = registry.require("pc")?;
    Ok(vec![Equivalency::new("parallax", arcsec, pc, |x| 1.0 / x, |x| 1.0 / x)])
}

/// Radians treated as plain numbers
pub fn dimensionless_angles(registry: &Registry) -> Result<Vec<Equivalency>, UnitError> {
    let rad = registry.require("rad")?;
    Ok(vec![Equivalency::new(
        "dimensionless angles",
        rad,
        Unit::dimensionless(),
        |x| x,
        |x| x,
    )])
}
