//! Property tests over generated formulas.
//!
//! - Ordering: every composition is sorted by `(symbol, valence)` with
//!   unique keys.
//! - Merging: writing the same elements in another order changes nothing.
//! - Robustness: neither parser panics on arbitrary text, and whatever
//!   parses from it is still ordered.

use quickcheck::{Arbitrary, Gen, QuickCheck, TestResult};
use std::cmp::Ordering;

use super::{parse_formula, parse_moieties};

const SYMBOLS: &[&str] = &["H", "C", "O", "Ca", "Mg", "Fe", "Si", "Na", "Cl", "S", "Al"];
const VALENCES: &[Option<i32>] = &[None, None, None, Some(2), Some(3), Some(-2)];

/// One generated atom: symbol, valence and integer coefficient.
#[derive(Debug, Clone)]
struct Piece {
    symbol: &'static str,
    valence: Option<i32>,
    count: u8,
}

impl Arbitrary for Piece {
    fn arbitrary(g: &mut Gen) -> Self {
        Piece {
            symbol: g.choose(SYMBOLS).copied().unwrap_or("H"),
            valence: g.choose(VALENCES).copied().flatten(),
            count: u8::arbitrary(g) % 5,
        }
    }
}

impl Piece {
    fn render(&self) -> String {
        let mut text = self.symbol.to_string();
        if let Some(v) = self.valence {
            text.push_str(&format!("|{v}|"));
        }
        if self.count > 1 {
            text.push_str(&self.count.to_string());
        }
        text
    }
}

fn render(pieces: &[Piece]) -> String {
    pieces.iter().map(Piece::render).collect()
}

/// Wraps alternate halves of the formula in brackets to exercise grouping.
fn render_grouped(pieces: &[Piece], multiplier: u8) -> String {
    let (head, tail) = pieces.split_at(pieces.len() / 2);
    format!("{}({}){}", render(head), render(tail), multiplier % 4 + 1)
}

#[test]
fn compositions_are_sorted_with_unique_keys() {
    fn prop(pieces: Vec<Piece>, multiplier: u8) -> TestResult {
        let formula = render_grouped(&pieces, multiplier);
        let Ok(comp) = parse_formula(&formula) else {
            return TestResult::error(format!("failed to parse {formula:?}"));
        };
        let ordered = comp.terms().windows(2).all(|pair| {
            pair[0].cmp_key(&pair[1].symbol, pair[1].valence) == Ordering::Less
        });
        TestResult::from_bool(ordered)
    }

    QuickCheck::new()
        .tests(300)
        .quickcheck(prop as fn(Vec<Piece>, u8) -> TestResult);
}

#[test]
fn term_order_does_not_change_composition() {
    fn prop(pieces: Vec<Piece>) -> TestResult {
        let forward = parse_formula(&render(&pieces));
        let reversed: Vec<Piece> = pieces.iter().rev().cloned().collect();
        let backward = parse_formula(&render(&reversed));
        match (forward, backward) {
            (Ok(a), Ok(b)) => TestResult::from_bool(a == b),
            _ => TestResult::failed(),
        }
    }

    QuickCheck::new()
        .tests(300)
        .quickcheck(prop as fn(Vec<Piece>) -> TestResult);
}

#[test]
fn total_coefficient_is_preserved() {
    fn prop(pieces: Vec<Piece>) -> bool {
        let expected: f64 = pieces
            .iter()
            .map(|p| f64::from(p.count.max(1)))
            .sum();
        match parse_formula(&render(&pieces)) {
            Ok(comp) => comp.iter().map(|t| t.stoich).sum::<f64>() == expected,
            Err(_) => false,
        }
    }

    QuickCheck::new()
        .tests(300)
        .quickcheck(prop as fn(Vec<Piece>) -> bool);
}

#[test]
fn parsers_never_panic() {
    fn prop(input: String) -> bool {
        let _ = parse_moieties(&input);
        match parse_formula(&input) {
            Ok(comp) => comp.terms().windows(2).all(|pair| {
                pair[0].cmp_key(&pair[1].symbol, pair[1].valence) == Ordering::Less
            }),
            Err(_) => true,
        }
    }

    QuickCheck::new()
        .tests(1000)
        .quickcheck(prop as fn(String) -> bool);
}

#[test]
fn structural_noise_keeps_terms_ordered() {
    fn prop(bytes: Vec<u8>) -> bool {
        const ALPHABET: &[u8] = b"()[]{}/|+-@:.eE0123456789 CaOVaZz$_";
        let input: String = bytes
            .iter()
            .map(|b| ALPHABET[*b as usize % ALPHABET.len()] as char)
            .collect();
        let _ = parse_moieties(&input);
        match parse_formula(&input) {
            Ok(comp) => comp.terms().windows(2).all(|pair| {
                pair[0].cmp_key(&pair[1].symbol, pair[1].valence) == Ordering::Less
            }),
            Err(_) => true,
        }
    }

    QuickCheck::new()
        .tests(1000)
        .quickcheck(prop as fn(Vec<u8>) -> bool);
}
