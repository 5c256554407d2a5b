//! Dimensional analysis types
//!
//! Each unit has dimensions represented as an 8-element exponent vector:
//! [length, mass, time, angle, temperature, current, luminous intensity, amount]
//!
//! Units with no physical meaning (pixel, count, magnitude) carry a
//! non-physical marker instead. A marker is identified by the unit that
//! introduced it, so `pixel` and `count` never compare equal even though
//! both have an all-zero physical vector.

use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::atomic::{AtomicU64, Ordering};

use serde::{Deserialize, Serialize};

use crate::Exponent;

/// Number of physical base dimensions
pub const BASE_DIMENSIONS: usize = 8;

/// The fixed set of physical base dimensions
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PhysicalDimension {
    Length,
    Mass,
    Time,
    Angle,
    Temperature,
    Current,
    LuminousIntensity,
    Amount,
}

impl PhysicalDimension {
    /// All base dimensions in vector order
    pub const ALL: [PhysicalDimension; BASE_DIMENSIONS] = [
        PhysicalDimension::Length,
        PhysicalDimension::Mass,
        PhysicalDimension::Time,
        PhysicalDimension::Angle,
        PhysicalDimension::Temperature,
        PhysicalDimension::Current,
        PhysicalDimension::LuminousIntensity,
        PhysicalDimension::Amount,
    ];

    /// Position of this dimension in the exponent vector
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Conventional dimension symbol
    pub const fn symbol(self) -> &'static str {
        match self {
            PhysicalDimension::Length => "L",
            PhysicalDimension::Mass => "M",
            PhysicalDimension::Time => "T",
            PhysicalDimension::Angle => "A",
            PhysicalDimension::Temperature => "Θ",
            PhysicalDimension::Current => "I",
            PhysicalDimension::LuminousIntensity => "J",
            PhysicalDimension::Amount => "N",
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            PhysicalDimension::Length => "length",
            PhysicalDimension::Mass => "mass",
            PhysicalDimension::Time => "time",
            PhysicalDimension::Angle => "angle",
            PhysicalDimension::Temperature => "temperature",
            PhysicalDimension::Current => "current",
            PhysicalDimension::LuminousIntensity => "luminous intensity",
            PhysicalDimension::Amount => "amount",
        }
    }
}

impl fmt::Display for PhysicalDimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

static NEXT_TAG: AtomicU64 = AtomicU64::new(1);

/// Identity of a non-physical dimension.
///
/// Two tags are equal only if they came from the same `Tag::fresh` call;
/// the name is carried for diagnostics.
#[derive(Debug, Clone, Serialize)]
pub struct Tag {
    id: u64,
    name: String,
}

impl Tag {
    /// Reserve a new, never-before-seen tag
    pub fn fresh(name: impl Into<String>) -> Self {
        Tag {
            id: NEXT_TAG.fetch_add(1, Ordering::Relaxed),
            name: name.into(),
        }
    }

    pub fn id(&self) -> u64 {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

impl PartialEq for Tag {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Tag {}

impl Hash for Tag {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

/// What kind of quantity the exponent vector describes
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Marker {
    /// Purely physical: only the exponent vector matters
    Physical,
    /// Carries a single non-physical tag raised to a power
    NonPhysical { tag: Tag, power: Exponent },
    /// Mixes two or more distinct non-physical tags; no shared meaning
    Indeterminate,
}

/// Represents the dimensions of a unit
/// as exponents of the 8 physical base dimensions plus a marker.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Dimension {
    /// [length, mass, time, angle, temperature, current, luminous intensity, amount]
    exponents: [Exponent; BASE_DIMENSIONS],
    marker: Marker,
}

impl Dimension {
    /// Dimensionless quantity (all exponents zero, physical)
    pub const DIMENSIONLESS: Dimension = Dimension {
        exponents: [Exponent::ZERO; BASE_DIMENSIONS],
        marker: Marker::Physical,
    };

    /// Create a physical dimension from exponents
    pub fn new(exponents: [Exponent; BASE_DIMENSIONS]) -> Self {
        Dimension { exponents, marker: Marker::Physical }
    }

    /// The dimension of a single physical base quantity
    pub fn of(base: PhysicalDimension) -> Self {
        let mut exponents = [Exponent::ZERO; BASE_DIMENSIONS];
        exponents[base.index()] = Exponent::ONE;
        Dimension::new(exponents)
    }

    /// The dimension of a non-physical base unit
    pub fn non_physical(tag: Tag) -> Self {
        Dimension {
            exponents: [Exponent::ZERO; BASE_DIMENSIONS],
            marker: Marker::NonPhysical { tag, power: Exponent::ONE },
        }
    }

    pub fn exponent(&self, base: PhysicalDimension) -> Exponent {
        self.exponents[base.index()]
    }

    pub fn exponents(&self) -> &[Exponent; BASE_DIMENSIONS] {
        &self.exponents
    }

    pub fn marker(&self) -> &Marker {
        &self.marker
    }

    /// Check if this is a dimensionless physical quantity
    pub fn is_dimensionless(&self) -> bool {
        self.marker == Marker::Physical && self.exponents.iter().all(Exponent::is_zero)
    }

    pub fn is_physical(&self) -> bool {
        self.marker == Marker::Physical
    }

    pub fn is_indeterminate(&self) -> bool {
        self.marker == Marker::Indeterminate
    }

    /// Whether two dimensions describe the same kind of quantity.
    ///
    /// Unlike `==`, an indeterminate dimension matches nothing, not even
    /// another indeterminate dimension with the same exponents.
    pub fn matches(&self, other: &Dimension) -> bool {
        !self.is_indeterminate() && self == other
    }

    /// Multiply dimensions (add exponents, combine markers)
    pub fn multiply(&self, other: &Dimension) -> Dimension {
        let mut exponents = self.exponents;
        for (exp, rhs) in exponents.iter_mut().zip(other.exponents.iter()) {
            *exp = *exp + *rhs;
        }
        Dimension {
            exponents,
            marker: combine_markers(&self.marker, &other.marker),
        }
    }

    /// Divide dimensions (subtract exponents)
    pub fn divide(&self, other: &Dimension) -> Dimension {
        self.multiply(&other.power(Exponent::integer(-1)))
    }

    /// Raise to a rational power (multiply exponents)
    pub fn power(&self, exp: Exponent) -> Dimension {
        if exp.is_zero() {
            return Self::DIMENSIONLESS;
        }
        let mut exponents = self.exponents;
        for e in exponents.iter_mut() {
            *e = *e * exp;
        }
        let marker = match &self.marker {
            Marker::NonPhysical { tag, power } => Marker::NonPhysical {
                tag: tag.clone(),
                power: *power * exp,
            },
            other => other.clone(),
        };
        Dimension { exponents, marker }
    }

    /// Get the dimension name if it matches a common dimension
    pub fn name(&self) -> Option<&'static str> {
        if !self.is_physical() || !self.exponents.iter().all(Exponent::is_integer) {
            return None;
        }
        let mut ints = [0i32; BASE_DIMENSIONS];
        for (slot, exp) in ints.iter_mut().zip(self.exponents.iter()) {
            *slot = exp.numer();
        }
        match ints {
            [0, 0, 0, 0, 0, 0, 0, 0] => Some("dimensionless"),
            [1, 0, 0, 0, 0, 0, 0, 0] => Some("length"),
            [0, 1, 0, 0, 0, 0, 0, 0] => Some("mass"),
            [0, 0, 1, 0, 0, 0, 0, 0] => Some("time"),
            [0, 0, 0, 1, 0, 0, 0, 0] => Some("angle"),
            [0, 0, 0, 2, 0, 0, 0, 0] => Some("solid angle"),
            [0, 0, 0, 0, 1, 0, 0, 0] => Some("temperature"),
            [0, 0, 0, 0, 0, 1, 0, 0] => Some("current"),
            [0, 0, 0, 0, 0, 0, 1, 0] => Some("luminous intensity"),
            [0, 0, 0, 0, 0, 0, 0, 1] => Some("amount"),
            [2, 0, 0, 0, 0, 0, 0, 0] => Some("area"),
            [3, 0, 0, 0, 0, 0, 0, 0] => Some("volume"),
            [-1, 0, 0, 0, 0, 0, 0, 0] => Some("wavenumber"),
            [0, 0, -1, 0, 0, 0, 0, 0] => Some("frequency"),
            [1, 0, -1, 0, 0, 0, 0, 0] => Some("velocity"),
            [1, 0, -2, 0, 0, 0, 0, 0] => Some("acceleration"),
            [1, 1, -2, 0, 0, 0, 0, 0] => Some("force"),
            [2, 1, -2, 0, 0, 0, 0, 0] => Some("energy"),
            [2, 1, -3, 0, 0, 0, 0, 0] => Some("power"),
            [-1, 1, -2, 0, 0, 0, 0, 0] => Some("pressure"),
            [0, 1, -2, 0, 0, 0, 0, 0] => Some("spectral flux density"),
            [-1, 1, -3, 0, 0, 0, 0, 0] => Some("spectral flux density (wavelength)"),
            _ => None,
        }
    }
}

fn combine_markers(lhs: &Marker, rhs: &Marker) -> Marker {
    match (lhs, rhs) {
        (Marker::Indeterminate, _) | (_, Marker::Indeterminate) => Marker::Indeterminate,
        (Marker::Physical, other) | (other, Marker::Physical) => other.clone(),
        (
            Marker::NonPhysical { tag: a, power: p },
            Marker::NonPhysical { tag: b, power: q },
        ) => {
            if a != b {
                return Marker::Indeterminate;
            }
            let power = *p + *q;
            if power.is_zero() {
                Marker::Physical
            } else {
                Marker::NonPhysical { tag: a.clone(), power }
            }
        }
    }
}

impl fmt::Display for Dimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut parts = Vec::new();

        for base in PhysicalDimension::ALL {
            let exp = self.exponent(base);
            if exp.is_zero() {
                continue;
            }
            if exp.is_one() {
                parts.push(base.symbol().to_string());
            } else if exp.is_integer() {
                parts.push(format!("{}^{}", base.symbol(), exp));
            } else {
                parts.push(format!("{}^({})", base.symbol(), exp));
            }
        }

        match &self.marker {
            Marker::Physical => {}
            Marker::NonPhysical { tag, power } if power.is_one() => {
                parts.push(format!("non-physical: {}", tag.name()));
            }
            Marker::NonPhysical { tag, power } => {
                parts.push(format!("non-physical: {}^{}", tag.name(), power));
            }
            Marker::Indeterminate => parts.push("indeterminate".to_string()),
        }

        if parts.is_empty() {
            write!(f, "1")
        } else {
            write!(f, "{}", parts.join(" "))
        }
    }
}

impl Default for Dimension {
    fn default() -> Self {
        Self::DIMENSIONLESS
    }
}
