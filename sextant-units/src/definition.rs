//! Unit definitions
//!
//! A `Definition` describes a unit to be registered: its aliases, what it
//! represents, whether SI prefixes are generated and how it is displayed.
//! It is consumed by `Registry::define`.

use sextant_core::{PhysicalDimension, UnitError};

use crate::format::{FormatStyle, FormatTable};
use crate::unit::Names;
use crate::Unit;

/// What a defined unit stands for
#[derive(Debug, Clone)]
pub enum Represents {
    /// A new irreducible unit with its own non-physical dimension
    /// (`pixel`, `count`, `mag`)
    NonPhysical,
    /// A new irreducible unit for a physical base dimension (`m`, `s`)
    Base(PhysicalDimension),
    /// A scaled and/or composite expression of existing units
    Unit(Unit),
}

/// Builder for a unit definition
#[derive(Debug, Clone)]
pub struct Definition {
    pub(crate) names: Names,
    pub(crate) represents: Represents,
    pub(crate) prefixes: bool,
    pub(crate) exclude_prefixes: Vec<String>,
    pub(crate) doc: Option<String>,
    pub(crate) format: FormatTable,
}

impl Definition {
    /// Define a unit from a list of aliases: the first is the short form,
    /// the rest are long forms (`["pc", "parsec"]`)
    pub fn new<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut names = names.into_iter().map(Into::into);
        let short = names.next().into_iter().collect();
        let long = names.collect();
        Self::from_names(Names { short, long })
    }

    /// Define a unit with explicit short and long alias lists
    /// (`(["AU", "au"], [])`, `(["bit", "b"], ["bit"])`)
    pub fn with_names<I, J, S, T>(short: I, long: J) -> Self
    where
        I: IntoIterator<Item = S>,
        J: IntoIterator<Item = T>,
        S: Into<String>,
        T: Into<String>,
    {
        Self::from_names(Names {
            short: short.into_iter().map(Into::into).collect(),
            long: long.into_iter().map(Into::into).collect(),
        })
    }

    fn from_names(names: Names) -> Self {
        Definition {
            names,
            represents: Represents::NonPhysical,
            prefixes: false,
            exclude_prefixes: Vec::new(),
            doc: None,
            format: FormatTable::new(),
        }
    }

    /// Builder: make this a physical base unit
    pub fn base(mut self, dimension: PhysicalDimension) -> Self {
        self.represents = Represents::Base(dimension);
        self
    }

    /// Builder: define this unit as an expression of existing units
    pub fn represents(mut self, expression: Unit) -> Self {
        self.represents = Represents::Unit(expression);
        self
    }

    /// Builder: generate the 20 SI prefix variants
    pub fn prefixes(mut self, enabled: bool) -> Self {
        self.prefixes = enabled;
        self
    }

    /// Builder: skip prefixes by symbol or name (`["k", "kilo"]`)
    pub fn exclude_prefixes<I, S>(mut self, excludes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.exclude_prefixes.extend(excludes.into_iter().map(Into::into));
        self
    }

    pub fn doc(mut self, doc: impl Into<String>) -> Self {
        self.doc = Some(doc.into());
        self
    }

    /// Builder: display string for an output style
    pub fn format(mut self, style: FormatStyle, display: impl Into<String>) -> Self {
        self.format.insert(style, display.into());
        self
    }

    /// Drop repeated aliases and reject malformed ones
    pub(crate) fn validated_names(&self) -> Result<Names, UnitError> {
        let mut names = Names::default();

        // duplicates are dropped per list; a long name equal to a short one
        // stays so prefixing still yields its long form
        for (source, target) in [
            (&self.names.short, &mut names.short),
            (&self.names.long, &mut names.long),
        ] {
            for name in source {
                validate_name(name)?;
                if !target.contains(name) {
                    target.push(name.clone());
                }
            }
        }

        if names.is_empty() {
            return Err(UnitError::malformed("a unit definition needs at least one name"));
        }
        Ok(names)
    }
}

/// Names must be usable as lookup keys: no whitespace, no algebra
/// operators, not starting with a digit
fn validate_name(name: &str) -> Result<(), UnitError> {
    if name.is_empty() {
        return Err(UnitError::malformed("unit names must not be empty"));
    }
    if name.starts_with(|c: char| c.is_ascii_digit()) {
        return Err(UnitError::malformed(format!(
            "unit name '{}' must not start with a digit",
            name
        )));
    }
    if name.chars().any(|c| c.is_whitespace() || "*/^().,".contains(c)) {
        return Err(UnitError::malformed(format!(
            "unit name '{}' contains whitespace or an operator character",
            name
        )));
    }
    Ok(())
}
