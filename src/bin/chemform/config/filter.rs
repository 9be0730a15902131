use anyhow::{Result, bail};

use chemform::{Composition, FormulaParser};

use crate::cli::FilterOptions;
use crate::io::CheckRecord;

#[derive(Debug, Clone, PartialEq)]
pub struct ElementFilter {
    /// Accepted symbols, sorted and deduplicated.
    pub allowed: Vec<String>,
    pub neutral_only: bool,
}

impl ElementFilter {
    /// Parses `formula` and decides whether it passes the filter.
    pub fn check(
        &self,
        parser: &FormulaParser,
        formula: &str,
    ) -> Result<CheckRecord, chemform::Error> {
        let comp = parser.parse(formula)?;
        Ok(self.judge(formula, &comp))
    }

    fn judge(&self, formula: &str, comp: &Composition) -> CheckRecord {
        let missing: Vec<String> = comp
            .symbols()
            .into_iter()
            .filter(|&s| self.allowed.binary_search_by(|a| a.as_str().cmp(s)).is_err())
            .map(str::to_string)
            .collect();
        let charge = comp.charge();
        let charged = charge.is_some_and(|z| z != 0.0);

        CheckRecord {
            formula: formula.to_string(),
            accepted: comp.is_covered_by(self.allowed.as_slice()) && !(self.neutral_only && charged),
            missing,
            charge,
        }
    }
}

/// Validates `--elements` against the same limits the formulas are parsed with.
pub fn build_element_filter(opts: &FilterOptions, parser: &FormulaParser) -> Result<ElementFilter> {
    let mut allowed = Vec::with_capacity(opts.elements.len());

    for raw in &opts.elements {
        let symbol = raw.trim();
        if symbol.is_empty() {
            continue;
        }
        if !is_bare_symbol(parser, symbol) {
            bail!("'{symbol}' is not an element symbol (expected e.g. Ca, O, Fe)");
        }
        allowed.push(symbol.to_string());
    }

    if allowed.is_empty() {
        bail!("--elements must name at least one element symbol");
    }

    allowed.sort();
    allowed.dedup();

    Ok(ElementFilter {
        allowed,
        neutral_only: opts.neutral_only,
    })
}

/// True if `text` parses as exactly one element with no decoration.
fn is_bare_symbol(parser: &FormulaParser, text: &str) -> bool {
    let Ok(comp) = parser.parse(text) else {
        return false;
    };
    match comp.terms() {
        [term] => {
            term.symbol == text
                && term.isotope.is_none()
                && term.valence.is_none()
                && !term.is_charge()
        }
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chemform::ParserConfig;

    fn options(elements: &[&str], neutral_only: bool) -> FilterOptions {
        FilterOptions {
            elements: elements.iter().map(|s| s.to_string()).collect(),
            neutral_only,
            verdict: false,
        }
    }

    fn filter(elements: &[&str], neutral_only: bool) -> ElementFilter {
        build_element_filter(&options(elements, neutral_only), &FormulaParser::default()).unwrap()
    }

    #[test]
    fn symbols_are_trimmed_sorted_and_deduplicated() {
        let f = filter(&["O", " Ca", "C", "O", ""], false);
        assert_eq!(f.allowed, vec!["C", "Ca", "O"]);
    }

    #[test]
    fn non_symbols_are_rejected() {
        let opts = FilterOptions {
            elements: vec!["CO2".into()],
            neutral_only: false,
            verdict: false,
        };
        assert!(build_element_filter(&opts, &FormulaParser::default()).is_err());

        let opts = FilterOptions {
            elements: vec!["ca".into()],
            neutral_only: false,
            verdict: false,
        };
        assert!(build_element_filter(&opts, &FormulaParser::default()).is_err());
    }

    #[test]
    fn symbols_are_validated_with_the_configured_limits() {
        let long = options(&["Ca", "Hsiogeneric"], false);
        assert!(build_element_filter(&long, &FormulaParser::default()).is_err());

        let parser = FormulaParser::new(ParserConfig {
            max_symbol_len: 16,
            ..ParserConfig::default()
        });
        let f = build_element_filter(&long, &parser).unwrap();
        assert_eq!(f.allowed, vec!["Ca", "Hsiogeneric"]);
        assert!(f.check(&parser, "Hsiogeneric2Ca").unwrap().accepted);
    }

    #[test]
    fn covered_formula_is_accepted() {
        let f = filter(&["Ca", "C", "O", "H"], false);
        let record = f.check(&FormulaParser::default(), "CaCO3").unwrap();
        assert!(record.accepted);
        assert!(record.missing.is_empty());
    }

    #[test]
    fn missing_elements_are_listed() {
        let f = filter(&["Ca", "O"], false);
        let record = f.check(&FormulaParser::default(), "CaMg(CO3)2").unwrap();
        assert!(!record.accepted);
        assert_eq!(record.missing, vec!["C", "Mg"]);
    }

    #[test]
    fn charge_is_ignored_unless_neutral_only() {
        let parser = FormulaParser::default();
        assert!(filter(&["Na"], false).check(&parser, "Na+").unwrap().accepted);
        assert!(!filter(&["Na"], true).check(&parser, "Na+").unwrap().accepted);
        assert!(filter(&["H", "O"], true).check(&parser, "H2O@").unwrap().accepted);
    }

    #[test]
    fn parse_errors_propagate() {
        let f = filter(&["Ca"], false);
        assert!(f.check(&FormulaParser::default(), "Ca(").is_err());
    }
}
