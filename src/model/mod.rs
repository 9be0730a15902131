//! Plain data produced by the parsers.
//!
//! - [`term`] – A single element, isotope, valence and coefficient, plus the
//!   reserved charge pseudo-element.
//! - [`composition`] – Sorted, deduplicated collection of element terms.
//! - [`moiety`] – Site-occupancy records of solid-solution end-members.
//!
//! Everything here is owned by the caller once a parse returns; the parsers
//! keep no reference to it.

pub mod composition;
pub mod moiety;
pub mod term;
