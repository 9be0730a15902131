//! Site-occupancy parser for solid-solution end-member formulas.
//!
//! `{Ca}0.5{Mg}0.5:{Si}:` reads as two sites: Ca and Mg sharing site 0 and
//! Si alone on site 1. Characters outside braces other than `:` and `Va`
//! carry no occupancy information and are skipped.

use super::cursor::Cursor;
use super::error::{Error, ErrorKind};
use super::token::{Bracket, Token};
use crate::model::moiety::{MoietyFormula, MoietyTerm, VACANCY};

/// Parses a moiety formula into its site-tagged occupancies.
///
/// # Errors
///
/// Fails with [`ErrorKind::UnclosedMoiety`] if a `{` has no matching `}`.
///
/// # Examples
///
/// ```
/// let parsed = chemform::parse_moieties("{Ca}1{Mg}2:")?;
/// assert_eq!(parsed.site_count(), 1);
/// assert_eq!(parsed.terms()[1].name, "{Mg}0");
/// assert_eq!(parsed.terms()[1].occupancy, 2.0);
/// # Ok::<(), chemform::Error>(())
/// ```
pub fn parse_moieties(formula: &str) -> Result<MoietyFormula, Error> {
    let mut cursor = Cursor::new(formula);
    let mut parsed = MoietyFormula::default();

    while let Some(byte) = cursor.peek() {
        match Token::classify(byte) {
            Some(Token::SiteSeparator) => {
                cursor.bump();
                parsed.sites += 1;
            }
            Some(Token::Open(Bracket::Curly)) => {
                let open_at = cursor.pos();
                cursor.bump();
                let Some(name) = cursor.take_until(Token::Close(Bracket::Curly).byte()) else {
                    return Err(Error::new(ErrorKind::UnclosedMoiety, open_at));
                };
                let occupancy = cursor.scan_real(1.0);
                parsed
                    .terms
                    .push(MoietyTerm::new(name, parsed.sites, occupancy));
            }
            _ if cursor.starts_with(VACANCY) => {
                cursor.advance(VACANCY.len());
                let occupancy = cursor.scan_real(1.0);
                parsed
                    .terms
                    .push(MoietyTerm::vacancy(parsed.sites, occupancy));
            }
            _ => cursor.bump_char(),
        }
    }

    Ok(parsed)
}
