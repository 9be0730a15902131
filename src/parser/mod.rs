//! Formula and moiety parsers.
//!
//! The free functions here use the embedded default [`ParserConfig`]; build a
//! [`FormulaParser`] to apply custom token limits.

mod charge;
mod config;
mod cursor;
mod error;
mod formula;
mod moiety;
mod token;

#[cfg(test)]
mod properties;

pub use config::{ConfigError, ParserConfig, default_config, load_config};
pub use error::{Category, Error, ErrorKind};
pub use formula::FormulaParser;
pub use moiety::parse_moieties;

use crate::model::composition::Composition;

/// Parses `formula` with the default token limits.
///
/// See [`FormulaParser::parse`].
pub fn parse_formula(formula: &str) -> Result<Composition, Error> {
    FormulaParser::default().parse(formula)
}

/// Checks `formula` against an accepted element set with the default limits.
///
/// See [`FormulaParser::contains_only_elements`].
pub fn contains_only_elements<S: AsRef<str>>(formula: &str, allowed: &[S]) -> Result<bool, Error> {
    FormulaParser::default().contains_only_elements(formula, allowed)
}
