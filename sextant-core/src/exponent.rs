//! Rational exponents for unit powers and dimension vectors
//!
//! Exponents are small exact fractions (`m^(1/2)`, `s^-1`). They are kept
//! in lowest terms with a positive denominator, so structural equality is
//! numeric equality.

use std::fmt;
use std::ops::{Add, Mul, Neg, Sub};

use num_rational::Ratio;
use num_traits::{CheckedAdd, CheckedMul, ToPrimitive, Zero};
use serde::{Serialize, Serializer};

use crate::UnitError;

/// Exact rational power
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Exponent(Ratio<i32>);

impl Exponent {
    /// The zero power
    pub const ZERO: Exponent = Exponent(Ratio::new_raw(0, 1));

    /// The unit power
    pub const ONE: Exponent = Exponent(Ratio::new_raw(1, 1));

    /// Create an exponent from a fraction, reducing it to lowest terms
    pub fn new(numer: i32, denom: i32) -> Result<Self, UnitError> {
        if denom == 0 {
            return Err(UnitError::malformed(format!(
                "exponent {}/0 has a zero denominator",
                numer
            )));
        }
        Ok(Exponent(Ratio::new(numer, denom)))
    }

    /// Create an integer exponent
    pub const fn integer(value: i32) -> Self {
        Exponent(Ratio::new_raw(value, 1))
    }

    pub fn numer(&self) -> i32 {
        *self.0.numer()
    }

    pub fn denom(&self) -> i32 {
        *self.0.denom()
    }

    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    pub fn is_one(&self) -> bool {
        *self == Self::ONE
    }

    pub fn is_integer(&self) -> bool {
        self.0.is_integer()
    }

    /// The exponent as an integer, if it has no fractional part
    pub fn to_integer(&self) -> Option<i32> {
        self.is_integer().then(|| self.numer())
    }

    pub fn to_f64(&self) -> f64 {
        self.0.to_f64().unwrap_or(f64::NAN)
    }

    /// Sum that reports leaving the `i32` range instead of overflowing
    pub fn checked_add(self, rhs: Exponent) -> Result<Exponent, UnitError> {
        self.0
            .checked_add(&rhs.0)
            .map(Exponent)
            .ok_or_else(|| overflow(self, '+', rhs))
    }

    /// Product that reports leaving the `i32` range instead of overflowing
    pub fn checked_mul(self, rhs: Exponent) -> Result<Exponent, UnitError> {
        self.0
            .checked_mul(&rhs.0)
            .map(Exponent)
            .ok_or_else(|| overflow(self, '*', rhs))
    }

    /// Raise a scale factor to this power.
    ///
    /// Integer powers use repeated multiplication so that common cases
    /// (`m^2`, `s^-1`) stay exact where f64 allows.
    pub fn apply(&self, base: f64) -> f64 {
        match self.to_integer() {
            Some(1) => base,
            Some(n) => base.powi(n),
            None => base.powf(self.to_f64()),
        }
    }
}

fn overflow(lhs: Exponent, op: char, rhs: Exponent) -> UnitError {
    UnitError::malformed(format!("exponent ({}) {} ({}) overflows", lhs, op, rhs))
}

impl Default for Exponent {
    fn default() -> Self {
        Self::ZERO
    }
}

impl From<i32> for Exponent {
    fn from(value: i32) -> Self {
        Self::integer(value)
    }
}

// The operators panic on `i32` overflow in debug builds, like the integer
// operators; `checked_add` and `checked_mul` report it instead.
impl Add for Exponent {
    type Output = Exponent;

    fn add(self, rhs: Exponent) -> Exponent {
        Exponent(self.0 + rhs.0)
    }
}

impl Sub for Exponent {
    type Output = Exponent;

    fn sub(self, rhs: Exponent) -> Exponent {
        Exponent(self.0 - rhs.0)
    }
}

impl Mul for Exponent {
    type Output = Exponent;

    fn mul(self, rhs: Exponent) -> Exponent {
        Exponent(self.0 * rhs.0)
    }
}

impl Neg for Exponent {
    type Output = Exponent;

    fn neg(self) -> Exponent {
        Exponent(-self.0)
    }
}

impl fmt::Display for Exponent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_integer() {
            write!(f, "{}", self.numer())
        } else {
            write!(f, "{}/{}", self.numer(), self.denom())
        }
    }
}

impl Serialize for Exponent {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}
