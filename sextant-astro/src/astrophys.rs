//! Astrophysical units
//!
//! Requires the SI catalogue in the same registry. `mag` is defined for
//! FITS compatibility only: it is an orphan with its own non-physical
//! dimension and converts to nothing else without an equivalency.

use std::f64::consts::PI;

use sextant_core::UnitError;
use sextant_units::{Definition, FormatStyle, Registry};

use crate::constants;

/// Define every astrophysical unit in `registry`
pub fn define_all(registry: &mut Registry) -> Result<(), UnitError> {
    define_length_units(registry)?;
    define_area_units(registry)?;
    define_angle_units(registry)?;
    define_mass_units(registry)?;
    define_energy_units(registry)?;
    define_illumination_units(registry)?;
    define_spectral_density_units(registry)?;
    define_miscellaneous_units(registry)?;
    Ok(())
}

fn define_length_units(registry: &mut Registry) -> Result<(), UnitError> {
    let m = registry.require("m")?;

    registry.define(
        Definition::with_names(["AU", "au"], Vec::<String>::new())
            .represents(m.scaled(constants::AU)?)
            .prefixes(true)
            .doc("astronomical unit: approximately the mean Earth--Sun distance."),
    )?;
    registry.define(
        Definition::new(["pc", "parsec"])
            .represents(m.scaled(constants::PC)?)
            .prefixes(true)
            .doc("parsec: approximately 3.26 light-years."),
    )?;
    registry.define(
        Definition::new(["solRad", "R_sun", "Rsun"])
            .represents(m.scaled(constants::R_SUN)?)
            .format(FormatStyle::Latex, "R_{\\odot}")
            .format(FormatStyle::Unicode, "R⊙")
            .doc("Solar radius"),
    )?;

    let year = registry.require("yr")?;
    let seconds_per_year = year.to(&registry.require("s")?)?;
    registry.define(
        Definition::new(["lyr", "lightyear"])
            .represents(m.scaled(constants::C * seconds_per_year)?)
            .doc("Light year"),
    )?;
    Ok(())
}

fn define_area_units(registry: &mut Registry) -> Result<(), UnitError> {
    let m = registry.require("m")?;
    registry.define(
        Definition::new(["barn"])
            .represents(m.power(2).scaled(1e-28)?)
            .prefixes(true)
            .doc("barn: unit of area used in HEP"),
    )?;
    Ok(())
}

fn define_angle_units(registry: &mut Registry) -> Result<(), UnitError> {
    let rad = registry.require("rad")?;
    registry.define(
        Definition::new(["cycle", "cy"])
            .represents(rad.scaled(2.0 * PI)?)
            .doc("cycle: angular measurement, a full turn or rotation"),
    )?;
    Ok(())
}

fn define_mass_units(registry: &mut Registry) -> Result<(), UnitError> {
    let kg = registry.require("kg")?;

    registry.define(
        Definition::new(["solMass", "M_sun", "Msun"])
            .represents(kg.scaled(constants::M_SUN)?)
            .prefixes(true)
            .format(FormatStyle::Latex, "M_{\\odot}")
            .format(FormatStyle::Unicode, "M⊙")
            .doc("Solar mass"),
    )?;
    registry.define(
        Definition::new(["M_p"])
            .represents(kg.scaled(constants::M_P)?)
            .format(FormatStyle::Latex, "M_{p}")
            .format(FormatStyle::Unicode, "Mₚ")
            .doc("Proton mass"),
    )?;
    registry.define(
        Definition::new(["M_e"])
            .represents(kg.scaled(constants::M_E)?)
            .format(FormatStyle::Latex, "M_{e}")
            .format(FormatStyle::Unicode, "Mₑ")
            .doc("Electron mass"),
    )?;
    registry.define(
        Definition::new(["u", "Da", "Dalton"])
            .represents(kg.scaled(1.6605387e-27)?)
            .doc("Unified atomic mass unit"),
    )?;
    Ok(())
}

fn define_energy_units(registry: &mut Registry) -> Result<(), UnitError> {
    let ev = registry.require("eV")?;
    registry.define(
        Definition::new(["Ry", "rydberg"])
            .represents(ev.scaled(13.605692)?)
            .format(FormatStyle::Latex, "R_{\\infty}")
            .format(FormatStyle::Unicode, "R∞")
            .doc("Rydberg: Energy of a photon whose wavenumber is the Rydberg constant"),
    )?;
    Ok(())
}

fn define_illumination_units(registry: &mut Registry) -> Result<(), UnitError> {
    let watt = registry.require("W")?;
    registry.define(
        Definition::new(["solLum", "L_sun", "Lsun"])
            .represents(watt.scaled(constants::L_SUN)?)
            .prefixes(true)
            .format(FormatStyle::Latex, "L_{\\odot}")
            .format(FormatStyle::Unicode, "L⊙")
            .doc("Solar luminance"),
    )?;
    Ok(())
}

fn define_spectral_density_units(registry: &mut Registry) -> Result<(), UnitError> {
    let m = registry.require("m")?;
    let s = registry.require("s")?;
    let sr = registry.require("sr")?;
    let hz = registry.require("Hz")?;
    let watt = registry.require("W")?;

    let photon = registry.define(Definition::new(["ph", "photon"]))?;
    registry.define(
        Definition::new(["Jy", "Jansky", "jansky"])
            .represents((&(&watt / &m.power(2)) / &hz).scaled(1e-26)?)
            .prefixes(true)
            .doc("Jansky: spectral flux density"),
    )?;

    let photon_radiance = &(&(&photon * &m.power(-2)) * &s.inverse()) * &sr.inverse();
    registry.define(
        Definition::new(["R", "Rayleigh", "rayleigh"])
            .represents(photon_radiance.scaled(1e10 / (4.0 * PI))?)
            .prefixes(true)
            .doc("Rayleigh: photon flux"),
    )?;

    registry.define(
        Definition::new(["mag"])
            .prefixes(true)
            .doc("Astronomical magnitude."),
    )?;
    Ok(())
}

fn define_miscellaneous_units(registry: &mut Registry) -> Result<(), UnitError> {
    // FITS "relative to the sun", with no stated quantity
    registry.define(Definition::new(["Sun"]))?;

    registry.define(Definition::new(["ct", "count"]))?;
    registry.define(Definition::new(["pix", "pixel"]))?;

    registry.define(Definition::new(["chan"]))?;
    registry.define(Definition::new(["bin"]))?;
    registry.define(Definition::new(["vox", "voxel"]))?;
    registry.define(Definition::with_names(["bit", "b"], ["bit"]).prefixes(true))?;
    registry.define(Definition::with_names(["byte", "B"], ["byte"]).prefixes(true))?;
    registry.define(Definition::new(["adu"]))?;
    registry.define(Definition::new(["beam"]))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use sextant_units::{conversion_factor, si, Unit};

    fn registry() -> Registry {
        let mut registry = Registry::new("astrophys");
        si::define_all(&mut registry).unwrap();
        define_all(&mut registry).unwrap();
        registry
    }

    fn unit(registry: &Registry, name: &str) -> Unit {
        registry.require(name).unwrap()
    }

    #[test]
    fn test_requires_si() {
        let mut registry = Registry::new("empty");
        assert!(matches!(define_all(&mut registry), Err(UnitError::UnknownUnit { .. })));
    }

    #[test]
    fn test_lightyear() {
        let registry = registry();
        let factor = conversion_factor(&unit(&registry, "lyr"), &unit(&registry, "m")).unwrap();
        assert!((factor - 9.4607304725808e15).abs() / factor < 1e-12);
    }

    #[test]
    fn test_au_aliases_are_short() {
        let registry = registry();
        let au = unit(&registry, "AU");
        assert_eq!(au.short_names(), ["AU".to_string(), "au".to_string()]);
        assert!(au.long_names().is_empty());
        assert!(registry.contains("kau"));
        assert!(registry.contains("mAU"));
    }

    #[test]
    fn test_bit_and_byte_names() {
        let registry = registry();
        assert!(registry.get("b").unwrap().same_unit(&unit(&registry, "bit")));
        assert!(registry.contains("kbit"));
        assert!(registry.contains("kb"));
        assert!(registry.contains("MB"));
        assert!(registry.contains("Mbyte"));

        // the long name repeats the short one and still takes prefixes
        for (long, short) in [
            ("kilobit", "kbit"),
            ("gigabit", "Gbit"),
            ("kilobyte", "kbyte"),
            ("megabyte", "Mbyte"),
        ] {
            assert!(unit(&registry, long).same_unit(&unit(&registry, short)), "{} != {}", long, short);
        }
        let kbit = unit(&registry, "kbit");
        assert_eq!(kbit.names().collect::<Vec<_>>(), vec!["kbit", "kb", "kilobit"]);
    }

    #[test]
    fn test_solar_display() {
        let registry = registry();
        let msun = unit(&registry, "Msun");
        assert_eq!(msun.to_string(), "solMass");
        assert_eq!(msun.to_string_in(FormatStyle::Unicode), "M⊙");
        assert_eq!(msun.to_string_in(FormatStyle::Latex), "M_{\\odot}");
        let kmsun = unit(&registry, "ksolMass");
        assert_eq!(kmsun.to_string_in(FormatStyle::Unicode), "kM⊙");
        assert_eq!(unit(&registry, "Ry").to_string_in(FormatStyle::Unicode), "R∞");
    }

    #[test]
    fn test_rayleigh_is_photon_radiance() {
        let registry = registry();
        let rayleigh = unit(&registry, "R");
        assert!(!rayleigh.dimension().is_physical());
        assert!(!rayleigh.dimension().is_indeterminate());
        let expected = &(&(&unit(&registry, "ph") / &unit(&registry, "m").power(2))
            / &unit(&registry, "s"))
            / &unit(&registry, "sr");
        let factor = conversion_factor(&rayleigh, &expected).unwrap();
        assert!((factor - 1e10 / (4.0 * PI)).abs() / factor < 1e-12);
    }

    #[test]
    fn test_describe_catalogue() {
        let registry = registry();
        let summaries = registry.describe();
        let mag = summaries.iter().find(|s| s.name == "mag").unwrap();
        assert_eq!(mag.doc.as_deref(), Some("Astronomical magnitude."));
        assert!(mag.represents.is_none());
        assert!(mag.prefixable);
        assert_eq!(mag.dimension, "non-physical: mag");

        let jy = summaries.iter().find(|s| s.name == "Jy").unwrap();
        assert_eq!(jy.aliases, vec!["Jansky", "jansky"]);
        assert!((jy.scale - 1e-26).abs() < 1e-38);
        assert_eq!(jy.dimension, "M T^-2");
    }
}
