//! Unit representation and composite algebra
//!
//! A `Unit` is an immutable, cheaply cloned handle. Named units come from a
//! `Registry`; unnamed composites come from algebra (`&m / &s`) and can be
//! promoted to named units by using them as a definition's expression.
//!
//! Every composite caches its reduction to base units, so conversion never
//! walks the definition chain and intermediate definitions cannot drift.

use std::fmt;
use std::ops::{Div, Mul};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use sextant_core::{Dimension, Exponent, PhysicalDimension, UnitError};

use crate::conversion;
use crate::format::{FormatStyle, FormatTable};
use crate::Equivalency;

static NEXT_BASE: AtomicU64 = AtomicU64::new(1);

/// Process-unique identity of a base unit
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub(crate) struct BaseId(u64);

impl BaseId {
    fn fresh() -> Self {
        BaseId(NEXT_BASE.fetch_add(1, Ordering::Relaxed))
    }
}

/// What a base unit stands for when comparing reductions
///
/// A physical base is its dimension, whichever registry defined it.
/// Non-physical bases only match themselves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub(crate) enum BaseKey {
    Physical(PhysicalDimension),
    Other(BaseId),
}

impl BaseKey {
    fn for_dimension(dimension: &Dimension) -> Self {
        if dimension.is_physical() {
            let mut present = PhysicalDimension::ALL
                .into_iter()
                .filter(|base| !dimension.exponent(*base).is_zero());
            if let (Some(base), None) = (present.next(), present.next()) {
                if dimension.exponent(base).is_one() {
                    return BaseKey::Physical(base);
                }
            }
        }
        BaseKey::Other(BaseId::fresh())
    }
}

/// A unit raised to a nonzero power inside a composite
#[derive(Debug, Clone)]
pub struct Term {
    pub unit: Unit,
    pub power: Exponent,
}

/// Short and long aliases of a named unit
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub(crate) struct Names {
    pub short: Vec<String>,
    pub long: Vec<String>,
}

impl Names {
    pub fn is_empty(&self) -> bool {
        self.short.is_empty() && self.long.is_empty()
    }

    /// Every distinct alias; a long name repeating a short one is
    /// listed once
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        let long = self.long.iter().filter(move |name| !self.short.contains(*name));
        self.short.iter().chain(long).map(String::as_str)
    }

    pub fn primary(&self) -> Option<&str> {
        self.iter().next()
    }
}

/// Everything about a unit that is not arithmetic
#[derive(Debug, Clone, Default)]
pub(crate) struct Meta {
    pub names: Names,
    pub prefixable: bool,
    pub format: FormatTable,
    pub doc: Option<String>,
}

#[derive(Debug)]
struct UnitData {
    meta: Meta,
    kind: Kind,
}

#[derive(Debug)]
enum Kind {
    Base {
        key: BaseKey,
        dimension: Dimension,
    },
    Composite {
        scale: f64,
        terms: Vec<Term>,
        reduced: Reduced,
    },
}

/// A composite expanded down to base units
#[derive(Debug, Clone)]
struct Reduced {
    scale: f64,
    bases: Vec<Term>,
    dimension: Dimension,
}

/// A physical or non-physical unit of measurement
#[derive(Clone)]
pub struct Unit(Arc<UnitData>);

impl Unit {
    // ========== Construction ==========

    /// The unscaled dimensionless unit
    pub fn dimensionless() -> Unit {
        Unit::composite(Meta::default(), 1.0, Vec::new())
    }

    pub(crate) fn new_base(meta: Meta, dimension: Dimension) -> Unit {
        Unit(Arc::new(UnitData {
            meta,
            kind: Kind::Base { key: BaseKey::for_dimension(&dimension), dimension },
        }))
    }

    /// A named unit defined by an expression
    pub(crate) fn new_named(meta: Meta, expression: &Unit) -> Unit {
        let (scale, terms) = expression.flat_terms();
        Unit::composite(meta, scale, terms)
    }

    /// A named unit equal to `factor × base`
    pub(crate) fn new_scaled(meta: Meta, factor: f64, base: &Unit) -> Unit {
        let terms = vec![Term { unit: base.clone(), power: Exponent::ONE }];
        Unit::composite(meta, factor, terms)
    }

    fn composite(meta: Meta, scale: f64, terms: Vec<Term>) -> Unit {
        let reduced = reduce(scale, &terms);
        Unit(Arc::new(UnitData {
            meta,
            kind: Kind::Composite { scale, terms, reduced },
        }))
    }

    // ========== Inspection ==========

    /// All aliases, short forms first
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.0.meta.names.iter()
    }

    pub fn short_names(&self) -> &[String] {
        &self.0.meta.names.short
    }

    pub fn long_names(&self) -> &[String] {
        &self.0.meta.names.long
    }

    /// The primary alias, or `None` for an unnamed composite
    pub fn name(&self) -> Option<&str> {
        self.0.meta.names.primary()
    }

    pub fn is_named(&self) -> bool {
        !self.0.meta.names.is_empty()
    }

    pub fn doc(&self) -> Option<&str> {
        self.0.meta.doc.as_deref()
    }

    pub fn is_prefixable(&self) -> bool {
        self.0.meta.prefixable
    }

    pub fn format(&self) -> &FormatTable {
        &self.0.meta.format
    }

    /// True for irreducible units (meter, second, pixel...)
    pub fn is_base(&self) -> bool {
        matches!(self.0.kind, Kind::Base { .. })
    }

    /// Scale relative to this unit's own terms (1 for base units)
    pub fn scale(&self) -> f64 {
        match &self.0.kind {
            Kind::Base { .. } => 1.0,
            Kind::Composite { scale, .. } => *scale,
        }
    }

    /// The defining terms (empty for base units)
    pub fn terms(&self) -> &[Term] {
        match &self.0.kind {
            Kind::Base { .. } => &[],
            Kind::Composite { terms, .. } => terms,
        }
    }

    pub fn dimension(&self) -> &Dimension {
        match &self.0.kind {
            Kind::Base { dimension, .. } => dimension,
            Kind::Composite { reduced, .. } => &reduced.dimension,
        }
    }

    /// The expression a named composite was defined as
    pub fn represents(&self) -> Option<Unit> {
        match &self.0.kind {
            Kind::Base { .. } => None,
            Kind::Composite { scale, terms, .. } => {
                Some(Unit::composite(Meta::default(), *scale, terms.clone()))
            }
        }
    }

    /// Expand to base units only
    pub fn decompose(&self) -> Unit {
        match &self.0.kind {
            Kind::Base { .. } => self.clone(),
            Kind::Composite { reduced, .. } => {
                Unit::composite(Meta::default(), reduced.scale, reduced.bases.clone())
            }
        }
    }

    /// Pointer identity: the very same unit object
    pub fn same_unit(&self, other: &Unit) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }

    /// Whether the default algebra can convert between the two units
    pub fn is_equivalent(&self, other: &Unit) -> bool {
        self.same_unit(other) || self.signature() == other.signature()
    }

    pub(crate) fn base_key(&self) -> Option<BaseKey> {
        match &self.0.kind {
            Kind::Base { key, .. } => Some(*key),
            Kind::Composite { .. } => None,
        }
    }

    /// Scale of the fully decomposed representation
    pub(crate) fn reduced_scale(&self) -> f64 {
        match &self.0.kind {
            Kind::Base { .. } => 1.0,
            Kind::Composite { reduced, .. } => reduced.scale,
        }
    }

    /// Base units and powers of the fully decomposed representation
    pub(crate) fn signature(&self) -> Vec<(BaseKey, Exponent)> {
        match &self.0.kind {
            Kind::Base { key, .. } => vec![(*key, Exponent::ONE)],
            Kind::Composite { reduced, .. } => reduced
                .bases
                .iter()
                .filter_map(|term| term.unit.base_key().map(|key| (key, term.power)))
                .collect(),
        }
    }

    // ========== Algebra ==========

    /// Multiply two units (e.g., N * m -> N m)
    pub fn multiply(&self, other: &Unit) -> Unit {
        let (lhs_scale, mut terms) = self.flat_terms();
        let (rhs_scale, rhs_terms) = other.flat_terms();
        for term in rhs_terms {
            push_term(&mut terms, &term.unit, term.power);
        }
        terms.retain(|term| !term.power.is_zero());
        Unit::composite(Meta::default(), lhs_scale * rhs_scale, terms)
    }

    /// Divide two units (e.g., m / s)
    pub fn divide(&self, other: &Unit) -> Unit {
        self.multiply(&other.inverse())
    }

    /// Raise to a rational power; power zero gives the dimensionless unit
    ///
    /// Panics in debug builds if a resulting exponent leaves the `i32`
    /// range; see `checked_power`.
    pub fn power(&self, exp: impl Into<Exponent>) -> Unit {
        let exp = exp.into();
        if exp.is_zero() {
            return Unit::dimensionless();
        }
        let (scale, terms) = self.flat_terms();
        let terms = terms
            .into_iter()
            .map(|term| Term { unit: term.unit, power: term.power * exp })
            .collect();
        Unit::composite(Meta::default(), exp.apply(scale), terms)
    }

    /// Like `power`, but an exponent leaving the `i32` range anywhere in
    /// the reduction is a `MalformedUnit` error
    pub fn checked_power(&self, exp: impl Into<Exponent>) -> Result<Unit, UnitError> {
        let exp = exp.into();
        let (_, terms) = self.flat_terms();
        let mut bases: Vec<(BaseKey, Exponent)> = Vec::new();
        for term in &terms {
            let power = term.power.checked_mul(exp)?;
            for (key, base_power) in term.unit.signature() {
                let total = base_power.checked_mul(power)?;
                match bases.iter_mut().find(|(existing, _)| *existing == key) {
                    Some((_, sum)) => *sum = sum.checked_add(total)?,
                    None => bases.push((key, total)),
                }
            }
        }
        Ok(self.power(exp))
    }

    pub fn inverse(&self) -> Unit {
        self.power(-1)
    }

    /// `factor × self`, for a strictly positive finite factor
    pub fn scaled(&self, factor: f64) -> Result<Unit, UnitError> {
        check_scale(factor)?;
        let (scale, terms) = self.flat_terms();
        Ok(Unit::composite(Meta::default(), factor * scale, terms))
    }

    /// Named units are atoms; unnamed composites contribute their terms
    fn flat_terms(&self) -> (f64, Vec<Term>) {
        if self.is_named() {
            return (1.0, vec![Term { unit: self.clone(), power: Exponent::ONE }]);
        }
        (self.scale(), self.terms().to_vec())
    }

    // ========== Conversion ==========

    /// Factor such that `value_in_target = value_in_self * factor`
    pub fn to(&self, target: &Unit) -> Result<f64, UnitError> {
        conversion::conversion_factor(self, target)
    }

    /// Convert a value from this unit to another unit
    pub fn convert_to(
        &self,
        value: f64,
        target: &Unit,
        equivalencies: &[Equivalency],
    ) -> Result<f64, UnitError> {
        conversion::convert(value, self, target, equivalencies)
    }

    // ========== Display ==========

    /// Render the unit for an output style, falling back to the generic
    /// display name and then the primary alias
    pub fn to_string_in(&self, style: FormatStyle) -> String {
        if let Some(name) = self.name() {
            return self.format().resolve(style).unwrap_or(name).to_string();
        }

        let mut parts = Vec::new();
        let scale = self.scale();
        if scale != 1.0 {
            parts.push(format_scale(scale));
        }
        for term in self.terms() {
            let base = term.unit.to_string_in(style);
            let power = term.power;
            parts.push(if power.is_one() {
                base
            } else if style == FormatStyle::Latex {
                format!("{}^{{{}}}", base, power)
            } else if power.is_integer() {
                format!("{}^{}", base, power)
            } else {
                format!("{}^({})", base, power)
            });
        }

        if parts.is_empty() {
            "dimensionless".to_string()
        } else if style == FormatStyle::Latex {
            parts.join("\\,")
        } else {
            parts.join(" ")
        }
    }
}

pub(crate) fn check_scale(scale: f64) -> Result<(), UnitError> {
    if scale.is_finite() && scale > 0.0 {
        Ok(())
    } else {
        Err(UnitError::malformed(format!(
            "scale factor must be positive and finite, got {}",
            scale
        )))
    }
}

fn push_term(terms: &mut Vec<Term>, unit: &Unit, power: Exponent) {
    match terms.iter_mut().find(|term| term.unit.same_unit(unit)) {
        Some(existing) => existing.power = existing.power + power,
        None => terms.push(Term { unit: unit.clone(), power }),
    }
}

/// Like `push_term`, but base units of one physical dimension merge even
/// when they come from different registries
fn push_base(bases: &mut Vec<Term>, unit: &Unit, power: Exponent) {
    let key = unit.base_key();
    match bases.iter_mut().find(|term| term.unit.base_key() == key) {
        Some(existing) => existing.power = existing.power + power,
        None => bases.push(Term { unit: unit.clone(), power }),
    }
}

fn reduce(scale: f64, terms: &[Term]) -> Reduced {
    let mut total = scale;
    let mut bases = Vec::new();

    for term in terms {
        match &term.unit.0.kind {
            Kind::Base { .. } => push_base(&mut bases, &term.unit, term.power),
            Kind::Composite { reduced, .. } => {
                total *= term.power.apply(reduced.scale);
                for base in &reduced.bases {
                    push_base(&mut bases, &base.unit, base.power * term.power);
                }
            }
        }
    }

    bases.retain(|term| !term.power.is_zero());
    bases.sort_by_key(|term| term.unit.base_key());

    let dimension = bases.iter().fold(Dimension::DIMENSIONLESS, |acc, term| {
        acc.multiply(&term.unit.dimension().power(term.power))
    });

    Reduced { scale: total, bases, dimension }
}

fn format_scale(scale: f64) -> String {
    if (1e-3..1e4).contains(&scale) {
        format!("{}", scale)
    } else {
        format!("{:e}", scale)
    }
}

impl fmt::Display for Unit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_string_in(FormatStyle::Generic))
    }
}

impl fmt::Debug for Unit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Unit").field(&self.to_string()).finish()
    }
}

impl Mul<&Unit> for &Unit {
    type Output = Unit;

    fn mul(self, rhs: &Unit) -> Unit {
        self.multiply(rhs)
    }
}

impl Mul for Unit {
    type Output = Unit;

    fn mul(self, rhs: Unit) -> Unit {
        self.multiply(&rhs)
    }
}

impl Div<&Unit> for &Unit {
    type Output = Unit;

    fn div(self, rhs: &Unit) -> Unit {
        self.divide(rhs)
    }
}

impl Div for Unit {
    type Output = Unit;

    fn div(self, rhs: Unit) -> Unit {
        self.divide(&rhs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sextant_core::{Marker, PhysicalDimension, Tag};

    fn base(name: &str, dimension: Dimension) -> Unit {
        let meta = Meta {
            names: Names { short: vec![name.to_string()], long: Vec::new() },
            ..Meta::default()
        };
        Unit::new_base(meta, dimension)
    }

    fn named(name: &str, expression: &Unit) -> Unit {
        let meta = Meta {
            names: Names { short: vec![name.to_string()], long: Vec::new() },
            ..Meta::default()
        };
        Unit::new_named(meta, expression)
    }

    fn meter() -> Unit {
        base("m", Dimension::of(PhysicalDimension::Length))
    }

    fn second() -> Unit {
        base("s", Dimension::of(PhysicalDimension::Time))
    }

    fn kilogram() -> Unit {
        base("kg", Dimension::of(PhysicalDimension::Mass))
    }

    fn assert_close(actual: f64, expected: f64) {
        let tolerance = 1e-12 * expected.abs().max(1.0);
        assert!((actual - expected).abs() <= tolerance, "expected {}, got {}", expected, actual);
    }

    #[test]
    fn test_base_unit() {
        let m = meter();
        assert!(m.is_base());
        assert_eq!(m.scale(), 1.0);
        assert!(m.terms().is_empty());
        assert!(m.decompose().same_unit(&m));
        assert_eq!(m.to_string(), "m");
    }

    #[test]
    fn test_unit_power() {
        let m = meter();
        let m2 = m.power(2);

        assert_eq!(m2.dimension().name(), Some("area"));
        assert_eq!(m2.to_string(), "m^2");
        assert!(m2.power(0).dimension().is_dimensionless());
    }

    #[test]
    fn test_rational_power() {
        let m = meter();
        let half = Exponent::new(1, 2).unwrap();
        let root = m.power(half);
        assert_eq!(root.to_string(), "m^(1/2)");
        assert!(root.power(2).is_equivalent(&m));
    }

    #[test]
    fn test_unit_divide() {
        let velocity = &meter() / &second();
        assert_eq!(velocity.dimension().name(), Some("velocity"));
        assert_eq!(velocity.to_string(), "m s^-1");
    }

    #[test]
    fn test_cancellation() {
        let m = meter();
        let ratio = &m / &m;
        assert!(ratio.terms().is_empty());
        assert!(ratio.dimension().is_dimensionless());
        assert_eq!(ratio.to_string(), "dimensionless");
    }

    #[test]
    fn test_named_units_are_atoms() {
        let m = meter();
        let km = named("km", &m.scaled(1000.0).unwrap());
        let product = &km * &m;
        assert_eq!(product.terms().len(), 2);
        assert_eq!(product.scale(), 1.0);
        assert_eq!(product.decompose().scale(), 1000.0);
        assert!(product.is_equivalent(&m.power(2)));
    }

    #[test]
    fn test_scale_folding() {
        let m = meter();
        let km = named("km", &m.scaled(1000.0).unwrap());
        let area = km.power(2);
        assert_eq!(area.decompose().scale(), 1.0e6);
        let per_km = km.inverse();
        assert_close(per_km.decompose().scale(), 1.0e-3);
    }

    #[test]
    fn test_multiplication_is_commutative_and_associative() {
        let m = meter();
        let kg = kilogram();
        let km = named("km", &m.scaled(1000.0).unwrap());
        let minute = named("min", &second().scaled(60.0).unwrap());

        let ab = &km * &kg;
        let ba = &kg * &km;
        assert_eq!(ab.dimension(), ba.dimension());
        assert_eq!(ab.decompose().scale(), ba.decompose().scale());

        let left = &(&km * &kg) * &minute;
        let right = &km * &(&kg * &minute);
        assert_eq!(left.dimension(), right.dimension());
        assert_close(left.decompose().scale(), right.decompose().scale());
        assert!(left.is_equivalent(&right));
    }

    #[test]
    fn test_operands_not_mutated() {
        let m = meter();
        let s = second();
        let _velocity = &m / &s;
        assert!(m.is_base());
        assert_eq!(m.dimension(), &Dimension::of(PhysicalDimension::Length));
        assert_eq!(s.dimension(), &Dimension::of(PhysicalDimension::Time));
    }

    #[test]
    fn test_scaled_rejects_bad_factors() {
        let m = meter();
        assert!(matches!(m.scaled(0.0), Err(UnitError::MalformedUnit { .. })));
        assert!(matches!(m.scaled(-2.0), Err(UnitError::MalformedUnit { .. })));
        assert!(matches!(m.scaled(f64::INFINITY), Err(UnitError::MalformedUnit { .. })));
        assert!(matches!(m.scaled(f64::NAN), Err(UnitError::MalformedUnit { .. })));
    }

    #[test]
    fn test_non_physical_power_keeps_marker() {
        let pix = base("pix", Dimension::non_physical(Tag::fresh("pix")));
        let area = pix.power(2);
        assert!(matches!(
            area.dimension().marker(),
            Marker::NonPhysical { power, .. } if *power == Exponent::integer(2)
        ));
    }

    #[test]
    fn test_mixed_non_physical_is_indeterminate() {
        let pix = base("pix", Dimension::non_physical(Tag::fresh("pix")));
        let ct = base("ct", Dimension::non_physical(Tag::fresh("ct")));
        let rate = &ct / &pix;
        assert!(rate.dimension().is_indeterminate());
        // cancelling the mixed part restores a well-defined dimension
        let back = &rate * &pix;
        assert!(!back.dimension().is_indeterminate());
        assert!(back.is_equivalent(&ct));
    }

    #[test]
    fn test_physical_bases_match_by_dimension() {
        let m = meter();
        let other_m = meter();
        assert!(!m.same_unit(&other_m));
        assert!(m.is_equivalent(&other_m));
        assert!((&m / &other_m).decompose().dimension().is_dimensionless());
        assert!((&m / &other_m).is_equivalent(&Unit::dimensionless()));

        let km = named("km", &other_m.scaled(1000.0).unwrap());
        assert!((&km / &second()).is_equivalent(&(&m / &second())));
        assert!(!m.is_equivalent(&second()));
    }

    #[test]
    fn test_non_physical_bases_match_only_themselves() {
        let pix = base("pix", Dimension::non_physical(Tag::fresh("pix")));
        let other_pix = base("pix", Dimension::non_physical(Tag::fresh("pix")));
        assert!(pix.is_equivalent(&pix.power(2).power(Exponent::new(1, 2).unwrap())));
        assert!(!pix.is_equivalent(&other_pix));
    }

    #[test]
    fn test_checked_power_reports_overflow() {
        let m = meter();
        let huge = m.power(i32::MAX);
        assert!(matches!(huge.checked_power(2), Err(UnitError::MalformedUnit { .. })));
        assert!(huge.checked_power(-1).unwrap().is_equivalent(&m.power(-i32::MAX)));

        // the named unit's own m^2 overflows once reduced
        let area = named("area", &m.power(2));
        assert!(matches!(area.checked_power(i32::MAX), Err(UnitError::MalformedUnit { .. })));
        let root = area.checked_power(Exponent::new(1, 2).unwrap()).unwrap();
        assert!(root.is_equivalent(&m));
    }

    #[test]
    fn test_represents() {
        let m = meter();
        let km = named("km", &m.scaled(1000.0).unwrap());
        assert_eq!(km.represents().map(|u| u.to_string()), Some("1000 m".to_string()));
        assert!(m.represents().is_none());
    }

    #[test]
    fn test_display_scale_and_latex() {
        let m = meter();
        let s = second();
        let unit = (&m / &s.power(2)).scaled(1e-26).unwrap();
        assert_eq!(unit.to_string(), "1e-26 m s^-2");
        assert_eq!(unit.to_string_in(FormatStyle::Latex), "1e-26\\,m\\,s^{-2}");
    }
}
