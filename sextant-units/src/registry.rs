//! Unit registry
//!
//! A registry maps every name and alias to its unit. It is populated once
//! through `&mut` access and is read-only afterwards, so a finished
//! registry can be shared between threads freely.

use std::collections::{HashMap, HashSet};

use serde::Serialize;
use sextant_core::{Dimension, PhysicalDimension, Tag, UnitError};
use tracing::{debug, trace};

use crate::definition::{Definition, Represents};
use crate::prefix;
use crate::unit::{check_scale, Meta};
use crate::Unit;

/// Registry of named units
#[derive(Debug)]
pub struct Registry {
    name: String,
    units: HashMap<String, Unit>,
    /// Directly defined units, in definition order
    defined: Vec<Unit>,
    /// Prefix variants, in registration order
    variants: Vec<Unit>,
    bases: HashMap<PhysicalDimension, Unit>,
}

impl Registry {
    pub fn new(name: impl Into<String>) -> Self {
        Registry {
            name: name.into(),
            units: HashMap::new(),
            defined: Vec::new(),
            variants: Vec::new(),
            bases: HashMap::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Define a unit and, if requested, its prefix variants.
    ///
    /// Every name is checked before anything is inserted, so a failed
    /// definition leaves the registry unchanged.
    pub fn define(&mut self, definition: Definition) -> Result<Unit, UnitError> {
        let names = definition.validated_names()?;
        let Definition {
            represents,
            prefixes,
            exclude_prefixes,
            doc,
            format,
            ..
        } = definition;

        let primary = names.primary().unwrap_or_default().to_string();
        let meta = Meta { names, prefixable: prefixes, format, doc };

        let mut base_dimension = None;
        let unit = match represents {
            Represents::NonPhysical => {
                let tag = Tag::fresh(primary);
                Unit::new_base(meta, Dimension::non_physical(tag))
            }
            Represents::Base(dimension) => {
                if let Some(existing) = self.bases.get(&dimension) {
                    return Err(UnitError::malformed(format!(
                        "{} already has the base unit '{}' in registry '{}'",
                        dimension, existing, self.name
                    )));
                }
                base_dimension = Some(dimension);
                Unit::new_base(meta, Dimension::of(dimension))
            }
            Represents::Unit(expression) => {
                check_scale(expression.scale())?;
                let unit = Unit::new_named(meta, &expression);
                check_scale(unit.decompose().scale())?;
                unit
            }
        };

        let variants = if prefixes {
            prefix::expand(&unit, &exclude_prefixes)
        } else {
            Vec::new()
        };

        self.check_available(
            unit.names()
                .chain(variants.iter().flat_map(|(_, variant)| variant.names())),
        )?;

        self.insert(&unit);
        self.defined.push(unit.clone());
        if let Some(dimension) = base_dimension {
            self.bases.insert(dimension, unit.clone());
        }
        for (prefix, variant) in variants {
            trace!(prefix = prefix.symbol, unit = %variant, "registered prefix variant");
            self.insert(&variant);
            self.variants.push(variant);
        }

        debug!(
            registry = %self.name,
            unit = %unit,
            dimension = %unit.dimension(),
            prefixes,
            "defined unit"
        );
        Ok(unit)
    }

    fn check_available<'a>(&self, names: impl Iterator<Item = &'a str>) -> Result<(), UnitError> {
        let mut seen = HashSet::new();
        for name in names {
            if self.units.contains_key(name) || !seen.insert(name) {
                return Err(UnitError::duplicate(name));
            }
        }
        Ok(())
    }

    fn insert(&mut self, unit: &Unit) {
        for name in unit.names() {
            self.units.insert(name.to_string(), unit.clone());
        }
    }

    /// Get a unit by name or alias
    pub fn get(&self, name: &str) -> Option<&Unit> {
        self.units.get(name)
    }

    /// Get a unit by name or alias, failing with `UnknownUnit`
    pub fn require(&self, name: &str) -> Result<Unit, UnitError> {
        self.get(name).cloned().ok_or_else(|| UnitError::unknown(name))
    }

    pub fn contains(&self, name: &str) -> bool {
        self.units.contains_key(name)
    }

    /// The base unit registered for a physical dimension
    pub fn base_unit(&self, dimension: PhysicalDimension) -> Option<&Unit> {
        self.bases.get(&dimension)
    }

    /// Number of registered names
    pub fn len(&self) -> usize {
        self.units.len()
    }

    pub fn is_empty(&self) -> bool {
        self.units.is_empty()
    }

    /// All registered names, sorted
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.units.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// Directly defined units, in definition order
    pub fn iter(&self) -> impl Iterator<Item = &Unit> {
        self.defined.iter()
    }

    /// Every distinct unit, prefix variants included
    pub fn units(&self) -> impl Iterator<Item = &Unit> {
        self.defined.iter().chain(self.variants.iter())
    }

    /// Summaries of the directly defined units, for documentation tools
    pub fn describe(&self) -> Vec<UnitSummary> {
        self.defined.iter().map(UnitSummary::of).collect()
    }
}

/// A read-only description of a defined unit
#[derive(Debug, Clone, Serialize)]
pub struct UnitSummary {
    pub name: String,
    pub aliases: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub doc: Option<String>,
    /// The defining expression; `None` for irreducible units
    #[serde(skip_serializing_if = "Option::is_none")]
    pub represents: Option<String>,
    /// Scale relative to the base units
    pub scale: f64,
    pub dimension: String,
    pub prefixable: bool,
}

impl UnitSummary {
    pub fn of(unit: &Unit) -> Self {
        let mut aliases = unit.names().map(String::from);
        let name = aliases.next().unwrap_or_else(|| unit.to_string());
        UnitSummary {
            name,
            aliases: aliases.collect(),
            doc: unit.doc().map(String::from),
            represents: unit.represents().map(|expr| expr.to_string()),
            scale: unit.decompose().scale(),
            dimension: unit.dimension().to_string(),
            prefixable: unit.is_prefixable(),
        }
    }
}
