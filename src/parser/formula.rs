//! Recursive-descent parser for chemical formulas.
//!
//! ```text
//! formula := fterm [ charge ]
//! fterm   := { element [ real ] }
//! element := group | 'Va' | ':' | atom
//! group   := '(' fterm ')' | '[' fterm ']' | '{' fterm '}'
//! atom    := [ '/' isotope '/' ] symbol [ '|' valence '|' ]
//! ```
//!
//! The charge suffix is cut off first (see [`super::charge`]); the remaining
//! body is scanned left to right, and every element's terms are scaled by the
//! real that follows it before being merged into the running composition.

use super::charge::split_charge;
use super::config::{ParserConfig, default_config};
use super::cursor::Cursor;
use super::error::{Error, ErrorKind};
use super::token::{Bracket, Token};
use crate::model::composition::Composition;
use crate::model::moiety::VACANCY;
use crate::model::term::ElementTerm;

/// A formula parser with fixed token limits.
///
/// The parser holds only its configuration; all scan state is local to each
/// call, so one instance can be shared freely between threads.
///
/// # Examples
///
/// ```
/// use chemform::FormulaParser;
///
/// let parser = FormulaParser::default();
/// let comp = parser.parse("Ca(OH)2")?;
/// assert_eq!(comp.stoich("Ca"), 1.0);
/// assert_eq!(comp.stoich("O"), 2.0);
/// assert_eq!(comp.stoich("H"), 2.0);
/// # Ok::<(), chemform::Error>(())
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FormulaParser {
    config: ParserConfig,
}

impl Default for FormulaParser {
    fn default() -> Self {
        Self::new(*default_config())
    }
}

impl FormulaParser {
    pub fn new(config: ParserConfig) -> Self {
        Self { config }
    }

    #[inline]
    pub fn config(&self) -> &ParserConfig {
        &self.config
    }

    /// Parses `formula` into a sorted, deduplicated composition.
    ///
    /// A trailing charge is folded in as a [`CHARGE_SYMBOL`] term.
    ///
    /// # Errors
    ///
    /// Returns an [`Error`] on the first grammar violation; no partial
    /// composition is produced.
    ///
    /// [`CHARGE_SYMBOL`]: crate::CHARGE_SYMBOL
    pub fn parse(&self, formula: &str) -> Result<Composition, Error> {
        let (body, charge) = split_charge(formula);

        let mut cursor = Cursor::new(body);
        let mut composition = Composition::new();
        self.scan_fterm(&mut cursor, &mut composition, None, 0)?;

        if let Some(charge) = charge {
            composition.insert(charge.into_term());
        }
        Ok(composition)
    }

    /// Returns `true` if every element of `formula` is listed in `allowed`.
    ///
    /// The charge pseudo-element is ignored; add
    /// [`CHARGE_SYMBOL`](crate::CHARGE_SYMBOL) to `allowed` or not, the
    /// answer is the same.
    pub fn contains_only_elements<S: AsRef<str>>(
        &self,
        formula: &str,
        allowed: &[S],
    ) -> Result<bool, Error> {
        Ok(self.parse(formula)?.is_covered_by(allowed))
    }

    /// Scans elements until end of input or, inside a group, any closer.
    ///
    /// A closer of the wrong kind ends the group too, and [`Self::scan_group`]
    /// reports the group as unclosed.
    fn scan_fterm(
        &self,
        cursor: &mut Cursor<'_>,
        out: &mut Composition,
        group: Option<Bracket>,
        depth: usize,
    ) -> Result<(), Error> {
        loop {
            cursor.skip_blank();
            if cursor.is_at_end() {
                return Ok(());
            }
            if group.is_some() && matches!(cursor.peek_token(), Some(Token::Close(_))) {
                return Ok(());
            }

            let mut part = self.scan_elem(cursor, depth)?;
            part.scale(cursor.scan_real(1.0));
            out.merge(part);
        }
    }

    fn scan_elem(&self, cursor: &mut Cursor<'_>, depth: usize) -> Result<Composition, Error> {
        match cursor.peek_token() {
            Some(Token::Open(bracket)) => self.scan_group(cursor, bracket, depth + 1),
            Some(Token::SiteSeparator) => {
                cursor.bump();
                Ok(Composition::new())
            }
            _ if cursor.starts_with(VACANCY) => {
                cursor.advance(VACANCY.len());
                Ok(Composition::new())
            }
            _ => {
                let term = self.scan_atom(cursor)?;
                Ok(Composition::from(vec![term]))
            }
        }
    }

    /// Scans a bracketed group at nesting level `depth` (1 for outermost).
    fn scan_group(
        &self,
        cursor: &mut Cursor<'_>,
        bracket: Bracket,
        depth: usize,
    ) -> Result<Composition, Error> {
        let open_at = cursor.pos();
        if depth > self.config.max_depth {
            return Err(Error::new(
                ErrorKind::NestingTooDeep {
                    max: self.config.max_depth,
                },
                open_at,
            ));
        }
        cursor.bump();

        let mut inner = Composition::new();
        self.scan_fterm(cursor, &mut inner, Some(bracket), depth)?;

        if cursor.peek_token() != Some(Token::Close(bracket)) {
            return Err(Error::new(
                ErrorKind::UnclosedGroup {
                    open: bracket.open(),
                    close: bracket.close(),
                },
                open_at,
            ));
        }
        cursor.bump();
        Ok(inner)
    }

    fn scan_atom(&self, cursor: &mut Cursor<'_>) -> Result<ElementTerm, Error> {
        let isotope = self.scan_isotope(cursor)?;
        let symbol = self.scan_symbol(cursor)?;
        let valence = self.scan_valence(cursor)?;

        Ok(ElementTerm {
            symbol: symbol.to_string(),
            isotope: isotope.map(str::to_string),
            valence,
            stoich: 1.0,
        })
    }

    fn scan_isotope<'a>(&self, cursor: &mut Cursor<'a>) -> Result<Option<&'a str>, Error> {
        cursor.skip_blank();
        if cursor.peek_token() != Some(Token::Isotope) {
            return Ok(None);
        }
        let open_at = cursor.pos();
        cursor.bump();

        let Some(label) = cursor.take_until(Token::Isotope.byte()) else {
            return Err(Error::new(ErrorKind::UnterminatedIsotope, open_at));
        };
        if label.is_empty() {
            return Err(Error::new(ErrorKind::EmptyIsotope, open_at));
        }
        if label.len() > self.config.max_isotope_len {
            return Err(Error::new(
                ErrorKind::IsotopeTooLong {
                    max: self.config.max_isotope_len,
                },
                open_at,
            ));
        }
        Ok(Some(label))
    }

    fn scan_symbol<'a>(&self, cursor: &mut Cursor<'a>) -> Result<&'a str, Error> {
        cursor.skip_blank();
        let start = cursor.pos();
        match cursor.peek() {
            None => return Err(Error::new(ErrorKind::MissingSymbol, start)),
            Some(b) if b.is_ascii_uppercase() || b == b'$' => {}
            Some(_) => {
                let found = cursor.peek_char().unwrap_or_default();
                return Err(Error::new(ErrorKind::ExpectedSymbol(found), start));
            }
        }

        let rest = cursor.rest();
        let len = 1 + rest[1..]
            .bytes()
            .take_while(|&b| b.is_ascii_lowercase() || b == b'_')
            .count();
        if len > self.config.max_symbol_len {
            return Err(Error::new(
                ErrorKind::SymbolTooLong {
                    max: self.config.max_symbol_len,
                },
                start,
            ));
        }

        cursor.advance(len);
        Ok(&rest[..len])
    }

    fn scan_valence(&self, cursor: &mut Cursor<'_>) -> Result<Option<i32>, Error> {
        cursor.skip_blank();
        if cursor.peek_token() != Some(Token::Valence) {
            return Ok(None);
        }
        let open_at = cursor.pos();
        cursor.bump();

        let Some(span) = cursor.take_until(Token::Valence.byte()) else {
            return Err(Error::new(ErrorKind::UnterminatedValence, open_at));
        };
        if span.len() > self.config.max_valence_len {
            return Err(Error::new(
                ErrorKind::ValenceTooLong {
                    max: self.config.max_valence_len,
                },
                open_at,
            ));
        }

        match span.trim().parse::<i32>() {
            Ok(valence) => Ok(Some(valence)),
            Err(_) => Err(Error::new(
                ErrorKind::InvalidValence(span.to_string()),
                open_at,
            )),
        }
    }
}
