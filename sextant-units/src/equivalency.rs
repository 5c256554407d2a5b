//! Equivalencies
//!
//! An equivalency links two units of different dimension through a value
//! transform (wavelength to frequency, parallax to distance). It applies to
//! any pair of units equivalent to its endpoints: the value is first brought
//! into the source endpoint, transformed, then converted out of the target
//! endpoint.

use std::fmt;
use std::sync::Arc;

use sextant_core::{Dimension, UnitError};
use tracing::debug;

use crate::conversion::conversion_factor;
use crate::Unit;

/// A value transform between equivalency endpoints
pub type Transform = Arc<dyn Fn(f64) -> f64 + Send + Sync>;

/// A named, opt-in relation between two units
#[derive(Clone)]
pub struct Equivalency {
    name: String,
    from: Unit,
    to: Unit,
    forward: Transform,
    inverse: Option<Transform>,
}

impl Equivalency {
    /// A relation usable in both directions
    pub fn new<F, G>(name: impl Into<String>, from: Unit, to: Unit, forward: F, inverse: G) -> Self
    where
        F: Fn(f64) -> f64 + Send + Sync + 'static,
        G: Fn(f64) -> f64 + Send + Sync + 'static,
    {
        Equivalency {
            name: name.into(),
            from,
            to,
            forward: Arc::new(forward),
            inverse: Some(Arc::new(inverse)),
        }
    }

    /// A relation usable only from `from` to `to`
    pub fn one_way<F>(name: impl Into<String>, from: Unit, to: Unit, forward: F) -> Self
    where
        F: Fn(f64) -> f64 + Send + Sync + 'static,
    {
        Equivalency {
            name: name.into(),
            from,
            to,
            forward: Arc::new(forward),
            inverse: None,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn from_unit(&self) -> &Unit {
        &self.from
    }

    pub fn to_unit(&self) -> &Unit {
        &self.to
    }

    /// Dimensions of both endpoints
    pub fn dimensions(&self) -> (&Dimension, &Dimension) {
        (self.from.dimension(), self.to.dimension())
    }

    pub fn is_bidirectional(&self) -> bool {
        self.inverse.is_some()
    }

    /// Apply this equivalency to a conversion, or `None` if it does not
    /// link the two units
    pub(crate) fn try_apply(
        &self,
        value: f64,
        from: &Unit,
        to: &Unit,
    ) -> Result<Option<f64>, UnitError> {
        if from.is_equivalent(&self.from) && to.is_equivalent(&self.to) {
            debug!(equivalency = %self.name, from = %from, to = %to, "applying equivalency");
            let converted = (self.forward)(value * conversion_factor(from, &self.from)?);
            return Ok(Some(converted * conversion_factor(&self.to, to)?));
        }

        if let Some(inverse) = &self.inverse {
            if from.is_equivalent(&self.to) && to.is_equivalent(&self.from) {
                debug!(equivalency = %self.name, from = %from, to = %to, "applying inverse equivalency");
                let converted = inverse(value * conversion_factor(from, &self.to)?);
                return Ok(Some(converted * conversion_factor(&self.from, to)?));
            }
        }

        Ok(None)
    }
}

impl fmt::Debug for Equivalency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Equivalency")
            .field("name", &self.name)
            .field("from", &self.from)
            .field("to", &self.to)
            .field("bidirectional", &self.is_bidirectional())
            .finish()
    }
}
