use super::term::ElementTerm;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Order-independent elemental composition of a formula.
///
/// Terms are kept sorted by `(symbol, valence)` and no two terms share that
/// key: inserting a term whose key already exists adds its stoichiometric
/// coefficient to the existing entry instead.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "Vec<ElementTerm>", into = "Vec<ElementTerm>")]
pub struct Composition {
    terms: Vec<ElementTerm>,
}

impl Composition {
    pub fn new() -> Self {
        Self::default()
    }

    /// Merges `term` into the composition, preserving order and key uniqueness.
    ///
    /// On a key match the existing entry keeps its isotope label.
    pub fn insert(&mut self, term: ElementTerm) {
        match self
            .terms
            .binary_search_by(|t| t.cmp_key(&term.symbol, term.valence))
        {
            Ok(idx) => self.terms[idx].stoich += term.stoich,
            Err(idx) => self.terms.insert(idx, term),
        }
    }

    /// Merges every term of `other` into this composition.
    pub fn merge(&mut self, other: Composition) {
        for term in other.terms {
            self.insert(term);
        }
    }

    /// Multiplies every stoichiometric coefficient by `factor`.
    pub fn scale(&mut self, factor: f64) {
        if factor == 1.0 {
            return;
        }
        for term in &mut self.terms {
            term.stoich *= factor;
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.terms.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    #[inline]
    pub fn terms(&self) -> &[ElementTerm] {
        &self.terms
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ElementTerm> {
        self.terms.iter()
    }

    pub fn into_terms(self) -> Vec<ElementTerm> {
        self.terms
    }

    pub fn get(&self, symbol: &str, valence: Option<i32>) -> Option<&ElementTerm> {
        self.terms
            .binary_search_by(|t| t.cmp_key(symbol, valence))
            .ok()
            .map(|idx| &self.terms[idx])
    }

    /// Total coefficient of `symbol` summed over all of its valence states.
    pub fn stoich(&self, symbol: &str) -> f64 {
        self.terms
            .iter()
            .filter(|t| t.symbol == symbol)
            .map(|t| t.stoich)
            .sum()
    }

    /// Net charge, or `None` when the formula carried no charge suffix.
    pub fn charge(&self) -> Option<f64> {
        self.terms.iter().find(|t| t.is_charge()).map(|t| t.stoich)
    }

    /// Terms other than the charge pseudo-element.
    pub fn elements(&self) -> impl Iterator<Item = &ElementTerm> {
        self.terms.iter().filter(|t| !t.is_charge())
    }

    /// Distinct non-charge symbols in sorted order.
    pub fn symbols(&self) -> Vec<&str> {
        let mut symbols: Vec<&str> = self.elements().map(|t| t.symbol.as_str()).collect();
        symbols.dedup();
        symbols
    }

    /// Returns `true` if every non-charge symbol appears in `allowed`.
    ///
    /// The charge pseudo-element is never checked; callers that want to
    /// reject charged species test [`charge`](Self::charge) themselves.
    pub fn is_covered_by<S: AsRef<str>>(&self, allowed: &[S]) -> bool {
        self.elements()
            .all(|t| allowed.iter().any(|a| a.as_ref() == t.symbol))
    }
}

impl From<Vec<ElementTerm>> for Composition {
    fn from(terms: Vec<ElementTerm>) -> Self {
        terms.into_iter().collect()
    }
}

impl From<Composition> for Vec<ElementTerm> {
    fn from(composition: Composition) -> Self {
        composition.terms
    }
}

impl FromIterator<ElementTerm> for Composition {
    fn from_iter<I: IntoIterator<Item = ElementTerm>>(iter: I) -> Self {
        let mut composition = Composition::new();
        for term in iter {
            composition.insert(term);
        }
        composition
    }
}

impl IntoIterator for Composition {
    type Item = ElementTerm;
    type IntoIter = std::vec::IntoIter<ElementTerm>;

    fn into_iter(self) -> Self::IntoIter {
        self.terms.into_iter()
    }
}

impl<'a> IntoIterator for &'a Composition {
    type Item = &'a ElementTerm;
    type IntoIter = std::slice::Iter<'a, ElementTerm>;

    fn into_iter(self) -> Self::IntoIter {
        self.terms.iter()
    }
}

impl fmt::Display for Composition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for term in self.elements() {
            write!(f, "{term}")?;
        }
        // The charge is written as a trailing suffix so the text parses back
        // to the same composition.
        if let Some(z) = self.charge() {
            if z == 0.0 {
                f.write_str("@")?;
            } else {
                f.write_str(if z > 0.0 { "+" } else { "-" })?;
                if z.abs() != 1.0 {
                    write!(f, "{}", z.abs())?;
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::term::CHARGE_SYMBOL;

    fn symbols_of(c: &Composition) -> Vec<(&str, Option<i32>, f64)> {
        c.iter()
            .map(|t| (t.symbol.as_str(), t.valence, t.stoich))
            .collect()
    }

    #[test]
    fn insert_keeps_terms_sorted() {
        let mut c = Composition::new();
        c.insert(ElementTerm::new("O", 1.0));
        c.insert(ElementTerm::new("Ca", 1.0));
        c.insert(ElementTerm::new("H", 2.0));
        assert_eq!(
            symbols_of(&c),
            vec![("Ca", None, 1.0), ("H", None, 2.0), ("O", None, 1.0)]
        );
    }

    #[test]
    fn insert_merges_matching_keys() {
        let mut c = Composition::new();
        c.insert(ElementTerm::new("Ca", 1.0));
        c.insert(ElementTerm::new("O", 1.0));
        c.insert(ElementTerm::new("Ca", 1.0));
        assert_eq!(c.len(), 2);
        assert_eq!(c.stoich("Ca"), 2.0);
    }

    #[test]
    fn distinct_valences_stay_separate() {
        let mut c = Composition::new();
        c.insert(ElementTerm::new("Fe", 1.0).with_valence(3));
        c.insert(ElementTerm::new("Fe", 2.0).with_valence(2));
        c.insert(ElementTerm::new("Fe", 1.0));
        assert_eq!(
            symbols_of(&c),
            vec![("Fe", None, 1.0), ("Fe", Some(2), 2.0), ("Fe", Some(3), 1.0)]
        );
        assert_eq!(c.stoich("Fe"), 4.0);
        assert_eq!(c.symbols(), vec!["Fe"]);
    }

    #[test]
    fn first_isotope_wins_on_merge() {
        let mut c = Composition::new();
        c.insert(ElementTerm::new("O", 1.0).with_isotope("18"));
        c.insert(ElementTerm::new("O", 1.0).with_isotope("16"));
        let o = c.get("O", None).unwrap();
        assert_eq!(o.isotope.as_deref(), Some("18"));
        assert_eq!(o.stoich, 2.0);
    }

    #[test]
    fn scale_multiplies_every_term() {
        let mut c: Composition = vec![ElementTerm::new("O", 1.0), ElementTerm::new("H", 1.0)]
            .into_iter()
            .collect();
        c.scale(2.5);
        assert_eq!(c.stoich("O"), 2.5);
        assert_eq!(c.stoich("H"), 2.5);
    }

    #[test]
    fn charge_is_excluded_from_elements() {
        let mut c = Composition::new();
        c.insert(ElementTerm::new("Na", 1.0));
        c.insert(ElementTerm::charge(1.0));
        assert_eq!(c.charge(), Some(1.0));
        assert_eq!(c.symbols(), vec!["Na"]);
        assert!(c.is_covered_by(&["Na"]));
        assert!(!c.is_covered_by(&[CHARGE_SYMBOL]));
    }

    #[test]
    fn empty_composition_is_covered_by_anything() {
        let c = Composition::new();
        assert!(c.is_covered_by::<&str>(&[]));
        assert_eq!(c.charge(), None);
    }

    #[test]
    fn display_writes_charge_suffix() {
        let c: Composition = vec![
            ElementTerm::new("S", 1.0),
            ElementTerm::new("O", 4.0),
            ElementTerm::charge(-2.0),
        ]
        .into();
        assert_eq!(c.to_string(), "O4S-2");

        let neutral: Composition = vec![ElementTerm::new("H", 2.0), ElementTerm::charge(0.0)].into();
        assert_eq!(neutral.to_string(), "H2@");

        let cation: Composition = vec![ElementTerm::new("Na", 1.0), ElementTerm::charge(1.0)].into();
        assert_eq!(cation.to_string(), "Na+");
    }

    #[test]
    fn deserializing_restores_invariants() {
        let json = r#"[
            {"symbol": "O", "stoich": 1.0},
            {"symbol": "Ca", "stoich": 1.0},
            {"symbol": "O", "stoich": 2.0}
        ]"#;
        let c: Composition = serde_json::from_str(json).unwrap();
        assert_eq!(symbols_of(&c), vec![("Ca", None, 1.0), ("O", None, 3.0)]);
    }

    #[test]
    fn serializes_as_plain_term_list() {
        let c: Composition = vec![ElementTerm::new("Fe", 1.0).with_valence(3)].into();
        let json = serde_json::to_string(&c).unwrap();
        assert_eq!(json, r#"[{"symbol":"Fe","valence":3,"stoich":1.0}]"#);
    }
}
