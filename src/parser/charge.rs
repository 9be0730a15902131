//! Trailing ionic charge of a formula.
//!
//! The charge is located before any structural parsing: it starts at the last
//! `+`, `-` or `@` in the whole string, unless a valence bar follows that
//! character, in which case the sign belongs to a valence and the formula is
//! uncharged.

use super::cursor::Cursor;
use super::token::{ChargeSign, Token};
use crate::model::term::ElementTerm;

/// The charge suffix cut from a formula.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct ChargeSpan<'a> {
    text: &'a str,
    sign: ChargeSign,
}

impl ChargeSpan<'_> {
    /// Signed net charge. A bare sign means a magnitude of one; `@` is neutral.
    pub(crate) fn value(&self) -> f64 {
        let mut cursor = Cursor::at(self.text, 1);
        match self.sign {
            ChargeSign::Neutral => 0.0,
            ChargeSign::Plus => cursor.scan_real(1.0),
            ChargeSign::Minus => -cursor.scan_real(1.0),
        }
    }

    pub(crate) fn into_term(self) -> ElementTerm {
        ElementTerm::charge(self.value())
    }
}

/// Splits `formula` into its structural body and its charge suffix, if any.
pub(crate) fn split_charge(formula: &str) -> (&str, Option<ChargeSpan<'_>>) {
    let bytes = formula.as_bytes();
    let Some((offset, sign)) = bytes
        .iter()
        .enumerate()
        .rev()
        .find_map(|(i, &b)| match Token::classify(b) {
            Some(Token::Charge(sign)) => Some((i, sign)),
            _ => None,
        })
    else {
        return (formula, None);
    };

    if bytes[offset..].contains(&Token::Valence.byte()) {
        return (formula, None);
    }

    let span = ChargeSpan {
        text: &formula[offset..],
        sign,
    };
    (&formula[..offset], Some(span))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_charge_characters() {
        let (body, charge) = split_charge("CaCO3");
        assert_eq!(body, "CaCO3");
        assert!(charge.is_none());
    }

    #[test]
    fn bare_plus_is_unit_charge() {
        let (body, charge) = split_charge("Na+");
        assert_eq!(body, "Na");
        assert_eq!(charge.unwrap().value(), 1.0);
    }

    #[test]
    fn minus_with_magnitude() {
        let (body, charge) = split_charge("SO4-2");
        assert_eq!(body, "SO4");
        assert_eq!(charge.unwrap().value(), -2.0);
    }

    #[test]
    fn fractional_magnitude() {
        let (_, charge) = split_charge("Fe+2.5");
        assert_eq!(charge.unwrap().value(), 2.5);
    }

    #[test]
    fn neutral_marker_ignores_magnitude() {
        let (body, charge) = split_charge("H2@");
        assert_eq!(body, "H2");
        assert_eq!(charge.unwrap().value(), 0.0);
    }

    #[test]
    fn sign_inside_valence_is_not_a_charge() {
        let (body, charge) = split_charge("Fe|-3|O");
        assert_eq!(body, "Fe|-3|O");
        assert!(charge.is_none());
    }

    #[test]
    fn charge_after_valence_is_found() {
        let (body, charge) = split_charge("Fe|3|+3");
        assert_eq!(body, "Fe|3|");
        assert_eq!(charge.unwrap().value(), 3.0);
    }

    #[test]
    fn last_sign_wins_over_earlier_ones() {
        let (body, charge) = split_charge("Ca+Mg-");
        assert_eq!(body, "Ca+Mg");
        assert_eq!(charge.unwrap().value(), -1.0);
    }

    #[test]
    fn charge_term_has_unit_valence() {
        let (_, charge) = split_charge("Cl-");
        let term = charge.unwrap().into_term();
        assert!(term.is_charge());
        assert_eq!(term.valence, Some(1));
        assert_eq!(term.stoich, -1.0);
    }
}
