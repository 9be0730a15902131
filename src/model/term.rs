use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;

/// Reserved pseudo-element carrying the net ionic charge of a formula.
pub const CHARGE_SYMBOL: &str = "Zz";

/// One atomic or ionic contribution to a parsed formula.
///
/// Terms are identified by `(symbol, valence)`; the isotope label is carried
/// along but never participates in comparisons, so `/18/O` and `O` merge into
/// one entry and keep whichever isotope was seen first.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ElementTerm {
    /// Element or pseudo-element symbol, e.g. `Ca`, `Zz`, `$`.
    pub symbol: String,
    /// Isotope label written between `/` delimiters, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub isotope: Option<String>,
    /// Valence written between `|` bars, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub valence: Option<i32>,
    /// Stoichiometric coefficient.
    pub stoich: f64,
}

impl ElementTerm {
    pub fn new(symbol: impl Into<String>, stoich: f64) -> Self {
        Self {
            symbol: symbol.into(),
            isotope: None,
            valence: None,
            stoich,
        }
    }

    pub fn with_isotope(mut self, isotope: impl Into<String>) -> Self {
        self.isotope = Some(isotope.into());
        self
    }

    pub fn with_valence(mut self, valence: i32) -> Self {
        self.valence = Some(valence);
        self
    }

    /// Builds the charge term for a net charge of `z`.
    pub fn charge(z: f64) -> Self {
        Self {
            symbol: CHARGE_SYMBOL.to_string(),
            isotope: None,
            valence: Some(1),
            stoich: z,
        }
    }

    #[inline]
    pub fn is_charge(&self) -> bool {
        self.symbol == CHARGE_SYMBOL
    }

    /// Orders this term against a `(symbol, valence)` key.
    ///
    /// Symbols compare byte-wise; an unspecified valence sorts before every
    /// explicit one.
    pub fn cmp_key(&self, symbol: &str, valence: Option<i32>) -> Ordering {
        self.symbol
            .as_str()
            .cmp(symbol)
            .then_with(|| self.valence.cmp(&valence))
    }

    #[inline]
    pub fn same_key(&self, other: &ElementTerm) -> bool {
        self.cmp_key(&other.symbol, other.valence) == Ordering::Equal
    }
}

impl fmt::Display for ElementTerm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(isotope) = &self.isotope {
            write!(f, "/{isotope}/")?;
        }
        f.write_str(&self.symbol)?;
        if let Some(valence) = self.valence {
            write!(f, "|{valence}|")?;
        }
        if self.stoich != 1.0 {
            write!(f, "{}", self.stoich)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_term_has_no_isotope_or_valence() {
        let term = ElementTerm::new("Ca", 2.0);
        assert_eq!(term.symbol, "Ca");
        assert!(term.isotope.is_none());
        assert!(term.valence.is_none());
        assert_eq!(term.stoich, 2.0);
        assert!(!term.is_charge());
    }

    #[test]
    fn charge_term_uses_reserved_symbol() {
        let term = ElementTerm::charge(-2.0);
        assert!(term.is_charge());
        assert_eq!(term.valence, Some(1));
        assert!(term.isotope.is_none());
        assert_eq!(term.stoich, -2.0);
    }

    #[test]
    fn unspecified_valence_sorts_first() {
        let plain = ElementTerm::new("Fe", 1.0);
        assert_eq!(plain.cmp_key("Fe", Some(-3)), Ordering::Less);
        assert_eq!(plain.cmp_key("Fe", None), Ordering::Equal);

        let ferric = ElementTerm::new("Fe", 1.0).with_valence(3);
        assert_eq!(ferric.cmp_key("Fe", Some(2)), Ordering::Greater);
        assert_eq!(ferric.cmp_key("Fe", None), Ordering::Greater);
    }

    #[test]
    fn symbol_comparison_is_bytewise() {
        let ca = ElementTerm::new("Ca", 1.0);
        assert_eq!(ca.cmp_key("C", None), Ordering::Greater);
        assert_eq!(ca.cmp_key("Cl", None), Ordering::Less);
        assert_eq!(ca.cmp_key("$", None), Ordering::Greater);
    }

    #[test]
    fn isotope_is_ignored_by_key() {
        let heavy = ElementTerm::new("O", 1.0).with_isotope("18");
        let light = ElementTerm::new("O", 3.0);
        assert!(heavy.same_key(&light));
    }

    #[test]
    fn display_uses_formula_notation() {
        assert_eq!(ElementTerm::new("O", 1.0).to_string(), "O");
        assert_eq!(ElementTerm::new("H", 2.0).to_string(), "H2");
        assert_eq!(
            ElementTerm::new("Fe", 0.5).with_valence(3).to_string(),
            "Fe|3|0.5"
        );
        assert_eq!(
            ElementTerm::new("O", 1.0).with_isotope("18").to_string(),
            "/18/O"
        );
    }
}
