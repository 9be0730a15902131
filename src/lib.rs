//! A pure Rust parser for compact chemical formula notation.
//! It turns formula strings carrying isotopes, valences, nested groups and an
//! ionic charge into sorted elemental compositions, and moiety strings into
//! per-site occupancy records for solid-solution end-members.
//!
//! # Features
//!
//! - **Formula parsing** – Nested `()`, `[]` and `{}` groups with real-valued
//!   multipliers, `/isotope/` labels, `|valence|` annotations and a trailing
//!   `+`, `-` or `@` charge folded in as the `Zz` pseudo-element
//! - **Deterministic output** – Terms sorted by symbol then valence, with
//!   duplicates merged by summing their coefficients
//! - **Membership test** – Check whether a formula only uses an accepted set
//!   of elements
//! - **Moiety parsing** – Site-separated `{moiety}occupancy` sequences
//!   including vacancies
//!
//! # Quick Start
//!
//! ```
//! use chemform::{parse_formula, contains_only_elements, CHARGE_SYMBOL};
//!
//! // Sulfate: four oxygens, one sulfur, net charge -2
//! let sulfate = parse_formula("SO4-2")?;
//! assert_eq!(sulfate.stoich("O"), 4.0);
//! assert_eq!(sulfate.stoich("S"), 1.0);
//! assert_eq!(sulfate.charge(), Some(-2.0));
//! assert_eq!(sulfate.stoich(CHARGE_SYMBOL), -2.0);
//!
//! // Groups multiply through; repeated elements merge
//! let gypsum = parse_formula("CaSO4(H2O)2")?;
//! assert_eq!(gypsum.stoich("O"), 6.0);
//! assert_eq!(gypsum.stoich("H"), 4.0);
//!
//! // Valences keep otherwise identical elements apart
//! let magnetite = parse_formula("Fe|2|Fe|3|2O4")?;
//! assert_eq!(magnetite.get("Fe", Some(3)).map(|t| t.stoich), Some(2.0));
//! assert_eq!(magnetite.stoich("Fe"), 3.0);
//!
//! // Membership: the charge never counts against the accepted set
//! assert!(contains_only_elements("Na+", &["Na", "Cl"])?);
//! assert!(!contains_only_elements("CaCO3", &["Ca", "O"])?);
//! # Ok::<(), chemform::Error>(())
//! ```
//!
//! Moiety formulas list what occupies each crystallographic site:
//!
//! ```
//! let garnet = chemform::parse_moieties("{Ca}3:{Al}2:{Si}3")?;
//! assert_eq!(garnet.site_count(), 2);
//! assert_eq!(garnet.on_site(1).next().map(|t| t.name.as_str()), Some("{Al}1"));
//! # Ok::<(), chemform::Error>(())
//! ```
//!
//! # Module Organization
//!
//! - [`parse_formula`] / [`FormulaParser`] – Formula grammar and merge
//! - [`parse_moieties`] – Moiety grammar
//! - [`load_config`] – Token length limits from TOML
//!
//! # Data Types
//!
//! - [`Composition`] – Sorted, deduplicated collection of terms
//! - [`ElementTerm`] – Symbol, isotope, valence and coefficient
//! - [`MoietyFormula`] – Site count plus ordered [`MoietyTerm`]s
//! - [`ParserConfig`] – Maximum symbol, isotope and valence lengths
//! - [`Error`] – Grammar violation with [`ErrorKind`], [`Category`] and offset

mod model;
mod parser;

pub use model::composition::Composition;
pub use model::moiety::{MoietyFormula, MoietyTerm, VACANCY};
pub use model::term::{CHARGE_SYMBOL, ElementTerm};

pub use parser::{
    Category, ConfigError, Error, ErrorKind, FormulaParser, ParserConfig, contains_only_elements,
    default_config, load_config, parse_formula, parse_moieties,
};
