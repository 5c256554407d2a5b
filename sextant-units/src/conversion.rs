//! Conversion engine
//!
//! Two units convert by a plain factor when their decompositions reach the
//! same base units with the same powers. Everything else needs an
//! `Equivalency` supplied by the caller.

use sextant_core::UnitError;

use crate::{Equivalency, Unit};

/// Factor such that `value_in_to = value_in_from * factor`.
///
/// The factor is taken over the fully decomposed representation of both
/// units, never over intermediate definitions.
pub fn conversion_factor(from: &Unit, to: &Unit) -> Result<f64, UnitError> {
    if from.same_unit(to) {
        return Ok(1.0);
    }
    if from.signature() == to.signature() {
        return Ok(from.reduced_scale() / to.reduced_scale());
    }
    Err(mismatch(from, to))
}

/// Convert a value between units, trying each equivalency in order when
/// the units are not directly convertible
pub fn convert(
    value: f64,
    from: &Unit,
    to: &Unit,
    equivalencies: &[Equivalency],
) -> Result<f64, UnitError> {
    let err = match conversion_factor(from, to) {
        Ok(factor) => return Ok(value * factor),
        Err(err) => err,
    };

    for equivalency in equivalencies {
        if let Some(converted) = equivalency.try_apply(value, from, to)? {
            return Ok(converted);
        }
    }

    Err(err)
}

fn mismatch(from: &Unit, to: &Unit) -> UnitError {
    if from.dimension().is_indeterminate() {
        return UnitError::UnresolvedUnit {
            unit: from.to_string(),
            target: to.to_string(),
        };
    }
    if to.dimension().is_indeterminate() {
        return UnitError::UnresolvedUnit {
            unit: to.to_string(),
            target: from.to_string(),
        };
    }
    UnitError::UnitConversion {
        from: from.to_string(),
        to: to.to_string(),
        from_dimension: from.dimension().clone(),
        to_dimension: to.dimension().clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Definition, Registry};
    use sextant_core::PhysicalDimension;

    struct Units {
        registry: Registry,
    }

    impl Units {
        fn new() -> Self {
            let mut registry = Registry::new("convert");
            let m = registry
                .define(Definition::new(["m", "meter"]).base(PhysicalDimension::Length).prefixes(true))
                .unwrap();
            registry
                .define(Definition::new(["kg", "kilogram"]).base(PhysicalDimension::Mass))
                .unwrap();
            let s = registry
                .define(Definition::new(["s", "second"]).base(PhysicalDimension::Time))
                .unwrap();
            registry
                .define(Definition::new(["rad", "radian"]).base(PhysicalDimension::Angle))
                .unwrap();
            registry
                .define(Definition::new(["min", "minute"]).represents(s.scaled(60.0).unwrap()))
                .unwrap();
            registry
                .define(Definition::new(["ft", "foot"]).represents(m.scaled(0.3048).unwrap()))
                .unwrap();
            registry.define(Definition::new(["pix", "pixel"])).unwrap();
            registry.define(Definition::new(["ct", "count"])).unwrap();
            registry.define(Definition::new(["mag"]).prefixes(true)).unwrap();
            Units { registry }
        }

        fn get(&self, name: &str) -> Unit {
            self.registry.require(name).unwrap()
        }
    }

    fn assert_close(actual: f64, expected: f64) {
        let tolerance = 1e-12 * expected.abs().max(1e-300);
        assert!((actual - expected).abs() <= tolerance, "expected {}, got {}", expected, actual);
    }

    #[test]
    fn test_identity() {
        let units = Units::new();
        for name in ["m", "km", "ft", "min", "pix", "mag"] {
            let unit = units.get(name);
            for value in [0.0, 1.0, -3.5, 1e-30, 6.02e23] {
                assert_eq!(convert(value, &unit, &unit, &[]).unwrap(), value);
            }
        }
    }

    #[test]
    fn test_prefix_factor() {
        let units = Units::new();
        let m = units.get("m");
        assert_eq!(conversion_factor(&units.get("km"), &m).unwrap(), 1000.0);
        assert_close(conversion_factor(&m, &units.get("km")).unwrap(), 1e-3);
        assert_close(conversion_factor(&m, &units.get("nm")).unwrap(), 1e9);
        assert_close(conversion_factor(&m, &units.get("Ym")).unwrap(), 1e-24);
    }

    #[test]
    fn test_reciprocal_factors() {
        let units = Units::new();
        let ft = units.get("ft");
        let km = units.get("km");
        let forward = convert(7.0, &ft, &km, &[]).unwrap();
        let backward = conversion_factor(&km, &ft).unwrap();
        assert_close(forward, 7.0 / backward);
    }

    #[test]
    fn test_composite_conversion() {
        let units = Units::new();
        let speed = &units.get("km") / &units.get("min");
        let si_speed = &units.get("m") / &units.get("s");
        assert_close(convert(6.0, &speed, &si_speed, &[]).unwrap(), 100.0);
    }

    #[test]
    fn test_dimension_mismatch() {
        let units = Units::new();
        let err = convert(1.0, &units.get("m"), &units.get("kg"), &[]).unwrap_err();
        match err {
            UnitError::UnitConversion { from, to, from_dimension, to_dimension } => {
                assert_eq!(from, "m");
                assert_eq!(to, "kg");
                assert_eq!(from_dimension.to_string(), "L");
                assert_eq!(to_dimension.to_string(), "M");
            }
            other => panic!("unexpected error: {}", other),
        }
    }

    #[test]
    fn test_non_physical_units() {
        let units = Units::new();
        let pix = units.get("pix");
        assert_eq!(convert(1.0, &pix, &units.get("pixel"), &[]).unwrap(), 1.0);
        assert!(matches!(
            convert(1.0, &pix, &units.get("ct"), &[]),
            Err(UnitError::UnitConversion { .. })
        ));
        assert!(matches!(
            convert(1.0, &pix, &units.get("m"), &[]),
            Err(UnitError::UnitConversion { .. })
        ));
        assert!(matches!(
            convert(1.0, &pix, &Unit::dimensionless(), &[]),
            Err(UnitError::UnitConversion { .. })
        ));
    }

    #[test]
    fn test_prefixed_non_physical() {
        let units = Units::new();
        assert_close(convert(1.0, &units.get("mag"), &units.get("mmag"), &[]).unwrap(), 1000.0);
    }

    #[test]
    fn test_indeterminate_converts_only_to_itself() {
        let units = Units::new();
        let rate = &units.get("ct") / &units.get("pix");
        let scaled = rate.scaled(1000.0).unwrap();
        assert_close(convert(1.0, &scaled, &rate, &[]).unwrap(), 1000.0);

        let err = convert(1.0, &rate, &units.get("ct"), &[]).unwrap_err();
        assert!(matches!(err, UnitError::UnresolvedUnit { .. }));
        let inverse = &units.get("pix") / &units.get("ct");
        let err = convert(1.0, &units.get("m"), &inverse, &[]).unwrap_err();
        assert!(matches!(err, UnitError::UnresolvedUnit { ref unit, .. } if unit == "pix ct^-1"));
    }

    #[test]
    fn test_dimensionless_ratio() {
        let units = Units::new();
        let ratio = &units.get("m") / &units.get("km");
        assert_close(convert(1.0, &ratio, &Unit::dimensionless(), &[]).unwrap(), 1e-3);
    }

    #[test]
    fn test_angle_is_not_dimensionless() {
        let units = Units::new();
        assert!(matches!(
            convert(1.0, &units.get("rad"), &Unit::dimensionless(), &[]),
            Err(UnitError::UnitConversion { .. })
        ));
    }

    #[test]
    fn test_equivalency_both_directions() {
        let units = Units::new();
        let ct = units.get("ct");
        let mag = units.get("mag");
        let flux_to_mag = Equivalency::new(
            "counts to magnitude",
            ct.clone(),
            mag.clone(),
            |flux| -2.5 * flux.log10(),
            |m| 10f64.powf(-0.4 * m),
        );
        let equivalencies = [flux_to_mag];

        let m = convert(100.0, &ct, &mag, &equivalencies).unwrap();
        assert_close(m, -5.0);
        let back = convert(m, &mag, &ct, &equivalencies).unwrap();
        assert_close(back, 100.0);

        // endpoints are matched up to scale: mmag converts through mag
        let mmag = convert(100.0, &ct, &units.get("mmag"), &equivalencies).unwrap();
        assert_close(mmag, -5000.0);
    }

    #[test]
    fn test_equivalency_is_opt_in() {
        let units = Units::new();
        assert!(convert(100.0, &units.get("ct"), &units.get("mag"), &[]).is_err());
    }

    #[test]
    fn test_one_way_equivalency() {
        let units = Units::new();
        let ct = units.get("ct");
        let pix = units.get("pix");
        let binning = Equivalency::one_way("binning", ct.clone(), pix.clone(), |c| c / 4.0);
        let equivalencies = [binning];
        assert_close(convert(8.0, &ct, &pix, &equivalencies).unwrap(), 2.0);
        assert!(matches!(
            convert(2.0, &pix, &ct, &equivalencies),
            Err(UnitError::UnitConversion { .. })
        ));
    }

    #[test]
    fn test_first_matching_equivalency_wins() {
        let units = Units::new();
        let ct = units.get("ct");
        let pix = units.get("pix");
        let equivalencies = [
            Equivalency::new("unrelated", units.get("m"), units.get("kg"), |v| v, |v| v),
            Equivalency::new("first", ct.clone(), pix.clone(), |v| v * 2.0, |v| v / 2.0),
            Equivalency::new("second", ct.clone(), pix.clone(), |v| v * 3.0, |v| v / 3.0),
        ];
        assert_close(convert(1.0, &ct, &pix, &equivalencies).unwrap(), 2.0);
        assert_close(convert(1.0, &pix, &ct, &equivalencies).unwrap(), 0.5);
    }
}
