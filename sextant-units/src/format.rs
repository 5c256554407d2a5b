//! Per-unit display names for the output styles of the formatting layer

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Output style understood by the formatting layer
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FormatStyle {
    Generic,
    Latex,
    Unicode,
    Fits,
    Console,
}

impl FormatStyle {
    pub const ALL: [FormatStyle; 5] = [
        FormatStyle::Generic,
        FormatStyle::Latex,
        FormatStyle::Unicode,
        FormatStyle::Fits,
        FormatStyle::Console,
    ];

    pub fn name(self) -> &'static str {
        match self {
            FormatStyle::Generic => "generic",
            FormatStyle::Latex => "latex",
            FormatStyle::Unicode => "unicode",
            FormatStyle::Fits => "fits",
            FormatStyle::Console => "console",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|style| style.name().eq_ignore_ascii_case(name))
    }

    /// How a prefix symbol is written in this style
    pub(crate) fn prefix_symbol(self, symbol: &'static str) -> &'static str {
        match (self, symbol) {
            (FormatStyle::Unicode, "u") => "μ",
            (FormatStyle::Latex, "u") => "\\mu ",
            _ => symbol,
        }
    }
}

impl fmt::Display for FormatStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Style name → display string. Read-only once the unit is built.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FormatTable(BTreeMap<FormatStyle, String>);

impl FormatTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder: add a display string for a style
    pub fn with(mut self, style: FormatStyle, display: impl Into<String>) -> Self {
        self.0.insert(style, display.into());
        self
    }

    pub fn get(&self, style: FormatStyle) -> Option<&str> {
        self.0.get(&style).map(String::as_str)
    }

    /// Lookup with fallback to the generic entry
    pub fn resolve(&self, style: FormatStyle) -> Option<&str> {
        self.get(style).or_else(|| self.get(FormatStyle::Generic))
    }

    pub fn iter(&self) -> impl Iterator<Item = (FormatStyle, &str)> {
        self.0.iter().map(|(style, display)| (*style, display.as_str()))
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub(crate) fn insert(&mut self, style: FormatStyle, display: String) {
        self.0.insert(style, display);
    }

    /// The table of a prefixed variant: every entry gets the prefix prepended
    pub(crate) fn prefixed(&self, symbol: &'static str) -> FormatTable {
        let entries = self
            .0
            .iter()
            .map(|(style, display)| (*style, format!("{}{}", style.prefix_symbol(symbol), display)))
            .collect();
        FormatTable(entries)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_falls_back_to_generic() {
        let table = FormatTable::new()
            .with(FormatStyle::Generic, "solMass")
            .with(FormatStyle::Unicode, "M⊙");
        assert_eq!(table.resolve(FormatStyle::Unicode), Some("M⊙"));
        assert_eq!(table.resolve(FormatStyle::Latex), Some("solMass"));
        assert_eq!(FormatTable::new().resolve(FormatStyle::Latex), None);
    }

    #[test]
    fn test_prefixed_micro() {
        let table = FormatTable::new()
            .with(FormatStyle::Unicode, "M⊙")
            .with(FormatStyle::Latex, "M_{\\odot}");
        let micro = table.prefixed("u");
        assert_eq!(micro.get(FormatStyle::Unicode), Some("μM⊙"));
        assert_eq!(micro.get(FormatStyle::Latex), Some("\\mu M_{\\odot}"));
        assert_eq!(table.prefixed("k").get(FormatStyle::Unicode), Some("kM⊙"));
    }

    #[test]
    fn test_style_names() {
        assert_eq!(FormatStyle::from_name("LaTeX"), Some(FormatStyle::Latex));
        assert_eq!(FormatStyle::from_name("cds"), None);
        assert_eq!(FormatStyle::Fits.to_string(), "fits");
    }
}
