//! SI units
//!
//! Base units for every physical dimension, the usual derived units and the
//! common non-SI time units. Definitions are grouped by category and run in
//! dependency order.

use std::f64::consts::PI;

use sextant_core::{PhysicalDimension, UnitError};

use crate::{Definition, FormatStyle, Registry};

/// Define every SI unit in `registry`
pub fn define_all(registry: &mut Registry) -> Result<(), UnitError> {
    define_base_units(registry)?;
    define_angle_units(registry)?;
    define_derived_units(registry)?;
    define_time_units(registry)?;
    Ok(())
}

fn define_base_units(registry: &mut Registry) -> Result<(), UnitError> {
    registry.define(
        Definition::new(["m", "meter"])
            .base(PhysicalDimension::Length)
            .prefixes(true)
            .doc("meter: base unit of length in SI"),
    )?;
    registry.define(
        Definition::new(["s", "second"])
            .base(PhysicalDimension::Time)
            .prefixes(true)
            .doc("second: base unit of time in SI"),
    )?;

    // kg is the base; the gram provides the prefixed variants
    let kg = registry.define(
        Definition::new(["kg", "kilogram"])
            .base(PhysicalDimension::Mass)
            .doc("kilogram: base unit of mass in SI"),
    )?;
    registry.define(
        Definition::new(["g", "gram"])
            .represents(kg.scaled(1e-3)?)
            .prefixes(true)
            .exclude_prefixes(["k", "kilo"])
            .doc("gram (g)"),
    )?;

    registry.define(
        Definition::new(["K", "Kelvin"])
            .base(PhysicalDimension::Temperature)
            .prefixes(true)
            .doc("Kelvin: temperature with a null point at absolute zero"),
    )?;
    registry.define(
        Definition::new(["A", "ampere", "amp"])
            .base(PhysicalDimension::Current)
            .prefixes(true)
            .doc("ampere: base unit of electric current in SI"),
    )?;
    registry.define(
        Definition::new(["cd", "candela"])
            .base(PhysicalDimension::LuminousIntensity)
            .prefixes(true)
            .doc("candela: base unit of luminous intensity in SI"),
    )?;
    registry.define(
        Definition::new(["mol", "mole"])
            .base(PhysicalDimension::Amount)
            .prefixes(true)
            .doc("mole: amount of a chemical substance in SI"),
    )?;
    Ok(())
}

fn define_angle_units(registry: &mut Registry) -> Result<(), UnitError> {
    let rad = registry.define(
        Definition::new(["rad", "radian"])
            .base(PhysicalDimension::Angle)
            .prefixes(true)
            .doc("radian: angular measurement of the ratio between the length on an arc and its radius"),
    )?;
    registry.define(
        Definition::new(["sr", "steradian"])
            .represents(rad.power(2))
            .prefixes(true)
            .doc("steradian: unit of solid angle in SI"),
    )?;

    let deg = registry.define(
        Definition::new(["deg", "degree"])
            .represents(rad.scaled(PI / 180.0)?)
            .format(FormatStyle::Latex, "^{\\circ}")
            .format(FormatStyle::Unicode, "°")
            .doc("degree of arc: 1/360 of a full circle"),
    )?;
    let arcmin = registry.define(
        Definition::new(["arcmin", "arcminute"])
            .represents(deg.scaled(1.0 / 60.0)?)
            .prefixes(true)
            .format(FormatStyle::Latex, "^{\\prime}")
            .format(FormatStyle::Unicode, "′")
            .doc("arc minute: angular measurement"),
    )?;
    registry.define(
        Definition::new(["arcsec", "arcsecond"])
            .represents(arcmin.scaled(1.0 / 60.0)?)
            .prefixes(true)
            .format(FormatStyle::Latex, "^{\\prime\\prime}")
            .format(FormatStyle::Unicode, "″")
            .doc("arc second: angular measurement"),
    )?;
    Ok(())
}

fn define_derived_units(registry: &mut Registry) -> Result<(), UnitError> {
    let m = registry.require("m")?;
    let s = registry.require("s")?;
    let kg = registry.require("kg")?;

    registry.define(
        Definition::new(["Hz", "Hertz", "hertz"])
            .represents(s.inverse())
            .prefixes(true)
            .doc("Frequency"),
    )?;
    let newton = registry.define(
        Definition::new(["N", "Newton", "newton"])
            .represents(&(&kg * &m) / &s.power(2))
            .prefixes(true)
            .doc("Newton: force"),
    )?;
    let joule = registry.define(
        Definition::new(["J", "Joule", "joule"])
            .represents(&newton * &m)
            .prefixes(true)
            .doc("Joule: energy"),
    )?;
    registry.define(
        Definition::new(["W", "Watt", "watt"])
            .represents(&joule / &s)
            .prefixes(true)
            .doc("Watt: power"),
    )?;
    registry.define(
        Definition::new(["eV", "electronvolt"])
            .represents(joule.scaled(1.602176565e-19)?)
            .prefixes(true)
            .doc("Electron Volt"),
    )?;
    Ok(())
}

fn define_time_units(registry: &mut Registry) -> Result<(), UnitError> {
    let s = registry.require("s")?;

    let minute = registry.define(
        Definition::new(["min", "minute"])
            .represents(s.scaled(60.0)?)
            .doc("minute (min)"),
    )?;
    let hour = registry.define(
        Definition::new(["h", "hour", "hr"])
            .represents(minute.scaled(60.0)?)
            .doc("hour (h)"),
    )?;
    let day = registry.define(
        Definition::new(["d", "day"])
            .represents(hour.scaled(24.0)?)
            .doc("day (d)"),
    )?;
    registry.define(
        Definition::new(["yr", "year"])
            .represents(day.scaled(365.25)?)
            .prefixes(true)
            .doc("Julian year (yr)"),
    )?;
    Ok(())
}
