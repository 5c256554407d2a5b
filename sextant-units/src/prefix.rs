//! SI prefix expansion
//!
//! Every prefixable unit gets the 20 standard SI variants (yotta…yocto).
//! Short aliases receive the prefix symbol, long aliases the prefix name:
//! `pc`/`parsec` become `kpc`/`kiloparsec`.

use crate::unit::{Meta, Names};
use crate::Unit;

/// An SI magnitude prefix
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Prefix {
    pub symbol: &'static str,
    pub name: &'static str,
    pub exponent: i32,
    /// `10^exponent`, written out so every factor is the nearest f64
    pub factor: f64,
}

impl Prefix {
    const fn new(symbol: &'static str, name: &'static str, exponent: i32, factor: f64) -> Self {
        Prefix { symbol, name, exponent, factor }
    }

    /// Excludes match either the symbol (`k`) or the name (`kilo`)
    pub fn is_excluded(&self, excludes: &[String]) -> bool {
        excludes.iter().any(|e| e == self.symbol || e == self.name)
    }

    /// Aliases of the variant of a unit with the given aliases
    pub(crate) fn apply_to(&self, names: &Names) -> Names {
        Names {
            short: names.short.iter().map(|n| format!("{}{}", self.symbol, n)).collect(),
            long: names.long.iter().map(|n| format!("{}{}", self.name, n)).collect(),
        }
    }
}

/// The 20 SI prefixes, largest first
pub static SI_PREFIXES: [Prefix; 20] = [
    Prefix::new("Y", "yotta", 24, 1e24),
    Prefix::new("Z", "zetta", 21, 1e21),
    Prefix::new("E", "exa", 18, 1e18),
    Prefix::new("P", "peta", 15, 1e15),
    Prefix::new("T", "tera", 12, 1e12),
    Prefix::new("G", "giga", 9, 1e9),
    Prefix::new("M", "mega", 6, 1e6),
    Prefix::new("k", "kilo", 3, 1e3),
    Prefix::new("h", "hecto", 2, 1e2),
    Prefix::new("da", "deka", 1, 1e1),
    Prefix::new("d", "deci", -1, 1e-1),
    Prefix::new("c", "centi", -2, 1e-2),
    Prefix::new("m", "milli", -3, 1e-3),
    Prefix::new("u", "micro", -6, 1e-6),
    Prefix::new("n", "nano", -9, 1e-9),
    Prefix::new("p", "pico", -12, 1e-12),
    Prefix::new("f", "femto", -15, 1e-15),
    Prefix::new("a", "atto", -18, 1e-18),
    Prefix::new("z", "zepto", -21, 1e-21),
    Prefix::new("y", "yocto", -24, 1e-24),
];

/// Look up a prefix by symbol or name
pub fn find_prefix(key: &str) -> Option<&'static Prefix> {
    SI_PREFIXES.iter().find(|p| p.symbol == key || p.name == key)
}

/// Build the prefixed variants of `base`, skipping excluded prefixes.
///
/// Nothing is registered here; the caller checks collisions and inserts.
/// The result depends only on the base unit and the exclusions.
pub fn expand(base: &Unit, excludes: &[String]) -> Vec<(&'static Prefix, Unit)> {
    let names = Names {
        short: base.short_names().to_vec(),
        long: base.long_names().to_vec(),
    };

    SI_PREFIXES
        .iter()
        .filter(|prefix| !prefix.is_excluded(excludes))
        .filter_map(|prefix| {
            let variant_names = prefix.apply_to(&names);
            if variant_names.is_empty() {
                return None;
            }
            let meta = Meta {
                names: variant_names,
                prefixable: false,
                format: base.format().prefixed(prefix.symbol),
                doc: base.name().map(|name| format!("{}-{}", prefix.name, name)),
            };
            Some((prefix, Unit::new_scaled(meta, prefix.factor, base)))
        })
        .collect()
}
