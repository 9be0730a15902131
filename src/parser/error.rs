//! Error types for formula and moiety parsing.
//!
//! Every failure is a grammar violation that aborts the parse. An [`Error`]
//! records what went wrong ([`ErrorKind`]), where in the input it was
//! detected, and which scanning routine raised it.

use std::fmt;
use std::panic::Location;
use thiserror::Error;

/// Broad class of a grammar violation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    /// Unbalanced or over-nested `(`, `[` or `{` group.
    Group,
    /// Missing, malformed or over-long element symbol.
    Symbol,
    /// Malformed `|valence|` span.
    Valence,
    /// Malformed `/isotope/` span.
    Isotope,
    /// Malformed `{moiety}` in a site formula.
    Moiety,
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Category::Group => write!(f, "group"),
            Category::Symbol => write!(f, "symbol"),
            Category::Valence => write!(f, "valence"),
            Category::Isotope => write!(f, "isotope"),
            Category::Moiety => write!(f, "moiety"),
        }
    }
}

/// The specific grammar rule that was violated.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ErrorKind {
    #[error("group opened with '{open}' is never closed with '{close}'")]
    UnclosedGroup { open: char, close: char },

    #[error("groups are nested more than {max} levels deep")]
    NestingTooDeep { max: usize },

    #[error("element symbol expected, found '{0}'")]
    ExpectedSymbol(char),

    #[error("element symbol expected, found end of formula")]
    MissingSymbol,

    #[error("element symbol is longer than {max} characters")]
    SymbolTooLong { max: usize },

    #[error("valence is missing its closing '|'")]
    UnterminatedValence,

    #[error("valence span is longer than {max} characters")]
    ValenceTooLong { max: usize },

    #[error("valence '{0}' is not an integer")]
    InvalidValence(String),

    #[error("isotope label is missing its closing '/'")]
    UnterminatedIsotope,

    #[error("isotope label is empty")]
    EmptyIsotope,

    #[error("isotope label is longer than {max} characters")]
    IsotopeTooLong { max: usize },

    #[error("moiety opened with '{{' is never closed with '}}'")]
    UnclosedMoiety,
}

impl ErrorKind {
    pub fn category(&self) -> Category {
        match self {
            ErrorKind::UnclosedGroup { .. } | ErrorKind::NestingTooDeep { .. } => Category::Group,
            ErrorKind::ExpectedSymbol(_)
            | ErrorKind::MissingSymbol
            | ErrorKind::SymbolTooLong { .. } => Category::Symbol,
            ErrorKind::UnterminatedValence
            | ErrorKind::ValenceTooLong { .. }
            | ErrorKind::InvalidValence(_) => Category::Valence,
            ErrorKind::UnterminatedIsotope
            | ErrorKind::EmptyIsotope
            | ErrorKind::IsotopeTooLong { .. } => Category::Isotope,
            ErrorKind::UnclosedMoiety => Category::Moiety,
        }
    }
}

/// A failed parse.
///
/// `offset` is the byte offset into the parsed string where the violation was
/// detected. `location` points at the parser source line that raised it,
/// which is what diagnostics report alongside the reason.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{kind} at offset {offset}")]
pub struct Error {
    kind: ErrorKind,
    offset: usize,
    location: &'static Location<'static>,
}

impl Error {
    /// Creates an error located at the calling parser routine.
    #[track_caller]
    pub(crate) fn new(kind: ErrorKind, offset: usize) -> Self {
        Self {
            kind,
            offset,
            location: Location::caller(),
        }
    }

    #[inline]
    pub fn kind(&self) -> &ErrorKind {
        &self.kind
    }

    #[inline]
    pub fn category(&self) -> Category {
        self.kind.category()
    }

    /// Human-readable description of the violated rule.
    pub fn reason(&self) -> String {
        self.kind.to_string()
    }

    #[inline]
    pub fn offset(&self) -> usize {
        self.offset
    }

    /// Source location of the parser code that rejected the input.
    #[inline]
    pub fn location(&self) -> &'static Location<'static> {
        self.location
    }
}
