//! SI values of the physical constants consumed by the unit catalogue
//!
//! CODATA 2010 and IAU 2012 values, matching the astronomical unit
//! definitions they feed.

/// Speed of light in vacuum (m s^-1), exact
pub const C: f64 = 299_792_458.0;

/// Planck constant (J s)
pub const H: f64 = 6.62606957e-34;

/// Astronomical unit (m), exact since IAU 2012
pub const AU: f64 = 1.495_978_707_00e11;

/// Parsec (m): `AU / tan(1 arcsec)`
pub const PC: f64 = 3.085_677_581_467_191_6e16;

/// Nominal solar radius (m)
pub const R_SUN: f64 = 6.95508e8;

/// Solar mass (kg)
pub const M_SUN: f64 = 1.9891e30;

/// Nominal solar luminosity (W)
pub const L_SUN: f64 = 3.846e26;

/// Proton mass (kg)
pub const M_P: f64 = 1.672621777e-27;

/// Electron mass (kg)
pub const M_E: f64 = 9.10938291e-31;
