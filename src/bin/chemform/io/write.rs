use std::io::Write;

use anyhow::Result;
use serde::Serialize;
use serde_json::json;

use chemform::{Composition, ElementTerm, MoietyFormula};

use super::FormulaEntry;
use crate::cli::OutputFormat;
use crate::util::text::format_real;

/// Outcome of the element filter for one formula.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CheckRecord {
    pub formula: String,
    pub accepted: bool,
    /// Symbols outside the accepted set, in sorted order.
    pub missing: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub charge: Option<f64>,
}

pub fn write_compositions(
    out: &mut impl Write,
    records: &[(FormulaEntry, Composition)],
    format: OutputFormat,
) -> Result<()> {
    match format {
        OutputFormat::Text => {
            for (entry, comp) in records {
                writeln!(out, "{}", entry.text)?;
                for term in comp {
                    writeln!(out, "  {:<12} {}", term_label(term), format_real(term.stoich))?;
                }
            }
        }
        OutputFormat::Tsv => {
            writeln!(out, "formula\tsymbol\tisotope\tvalence\tstoich")?;
            for (entry, comp) in records {
                for term in comp {
                    writeln!(
                        out,
                        "{}\t{}\t{}\t{}\t{}",
                        entry.text,
                        term.symbol,
                        term.isotope.as_deref().unwrap_or_default(),
                        term.valence.map(|v| v.to_string()).unwrap_or_default(),
                        format_real(term.stoich)
                    )?;
                }
            }
        }
        OutputFormat::Json => {
            let values: Vec<_> = records
                .iter()
                .map(|(entry, comp)| {
                    json!({
                        "formula": entry.text,
                        "composition": comp,
                        "charge": comp.charge(),
                    })
                })
                .collect();
            write_json(out, &values)?;
        }
    }
    Ok(())
}

pub fn write_moieties(
    out: &mut impl Write,
    records: &[(FormulaEntry, MoietyFormula)],
    format: OutputFormat,
) -> Result<()> {
    match format {
        OutputFormat::Text => {
            for (entry, parsed) in records {
                let sites = parsed.site_count();
                let noun = if sites == 1 { "site" } else { "sites" };
                writeln!(out, "{}  ({sites} {noun})", entry.text)?;
                for term in parsed.terms() {
                    writeln!(
                        out,
                        "  site {:<3} {:<12} {}",
                        term.site,
                        term.moiety,
                        format_real(term.occupancy)
                    )?;
                }
            }
        }
        OutputFormat::Tsv => {
            writeln!(out, "formula\tsite\tmoiety\tname\toccupancy")?;
            for (entry, parsed) in records {
                for term in parsed.terms() {
                    writeln!(
                        out,
                        "{}\t{}\t{}\t{}\t{}",
                        entry.text,
                        term.site,
                        term.moiety,
                        term.name,
                        format_real(term.occupancy)
                    )?;
                }
            }
        }
        OutputFormat::Json => {
            let values: Vec<_> = records
                .iter()
                .map(|(entry, parsed)| {
                    json!({
                        "formula": entry.text,
                        "sites": parsed.sites,
                        "terms": parsed.terms,
                    })
                })
                .collect();
            write_json(out, &values)?;
        }
    }
    Ok(())
}

/// Writes filter results; without `verdict` only accepted formulas are kept.
pub fn write_checks(
    out: &mut impl Write,
    records: &[CheckRecord],
    format: OutputFormat,
    verdict: bool,
) -> Result<()> {
    let shown: Vec<&CheckRecord> = records.iter().filter(|r| verdict || r.accepted).collect();

    match (format, verdict) {
        (OutputFormat::Text, false) => {
            for record in shown {
                writeln!(out, "{}", record.formula)?;
            }
        }
        (OutputFormat::Text, true) => {
            for record in shown {
                let status = if record.accepted {
                    "accepted"
                } else {
                    "rejected"
                };
                if record.missing.is_empty() {
                    writeln!(out, "{:<24} {status}", record.formula)?;
                } else {
                    writeln!(
                        out,
                        "{:<24} {status} (not accepted: {})",
                        record.formula,
                        record.missing.join(", ")
                    )?;
                }
            }
        }
        (OutputFormat::Tsv, _) => {
            writeln!(out, "formula\taccepted\tmissing")?;
            for record in shown {
                writeln!(
                    out,
                    "{}\t{}\t{}",
                    record.formula,
                    record.accepted,
                    record.missing.join(",")
                )?;
            }
        }
        (OutputFormat::Json, _) => write_json(out, &shown)?,
    }
    Ok(())
}

fn write_json(out: &mut impl Write, value: &impl Serialize) -> Result<()> {
    serde_json::to_writer_pretty(&mut *out, value)?;
    writeln!(out)?;
    Ok(())
}

fn term_label(term: &ElementTerm) -> String {
    if term.is_charge() {
        return "charge".to_string();
    }
    let mut label = String::new();
    if let Some(isotope) = &term.isotope {
        label.push('/');
        label.push_str(isotope);
        label.push('/');
    }
    label.push_str(&term.symbol);
    if let Some(valence) = term.valence {
        label.push_str(&format!("|{valence}|"));
    }
    label
}
