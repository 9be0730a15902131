mod check;
mod moiety;
mod parse;

use check::run_check;
use moiety::run_moiety;
use parse::run_parse;

use std::fmt;
use std::io::Write;

use anyhow::{Context as _, Result, bail};

use crate::cli::{Command, IoOptions, OutputFormat};
use crate::display::Context;
use crate::io::{FormulaEntry, Output, read_formulas, stdin_is_tty};

const TOTAL_STEPS: u8 = 3;

pub fn dispatch(command: Command, ctx: Context) -> Result<()> {
    match command {
        Command::Parse(args) => run_parse(args, ctx),
        Command::Moiety(args) => run_moiety(args, ctx),
        Command::Check(args) => run_check(args, ctx),
    }
}

/// Error context naming the formula that failed to parse.
#[derive(Debug)]
pub struct ParseFailure {
    pub entry: FormulaEntry,
}

impl fmt::Display for ParseFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Failed to parse formula '{}' ({})",
            self.entry.text, self.entry.origin
        )
    }
}

/// Results of running one parser over every input formula.
struct Batch<T> {
    parsed: Vec<(FormulaEntry, T)>,
    failed: Vec<(FormulaEntry, chemform::Error)>,
}

impl<T> Batch<T> {
    fn substeps(&self, what: &str) -> Vec<String> {
        let mut steps = vec![format!("{} {what}", self.parsed.len())];
        if !self.failed.is_empty() {
            steps.push(format!("{} skipped (--keep-going)", self.failed.len()));
        }
        steps
    }
}

fn load_formulas(io: &IoOptions) -> Result<Vec<FormulaEntry>> {
    if io.formulas.is_empty() && io.input.is_none() && stdin_is_tty() {
        bail!(
            "No formulas given and stdin is a terminal.\n\nUsage: chemform <COMMAND> <FORMULA>... or pipe formulas via stdin."
        );
    }

    let entries = read_formulas(io)?;
    if entries.is_empty() {
        bail!("No formulas to process: the input is empty or contains only comments");
    }
    Ok(entries)
}

fn source_substep(io: &IoOptions, count: usize) -> String {
    let source = if !io.formulas.is_empty() {
        "arguments".to_string()
    } else {
        io.input
            .as_ref()
            .map(|p| p.display().to_string())
            .unwrap_or_else(|| "stdin".to_string())
    };
    format!("{count} formulas from {source}")
}

/// Applies `parse` to each entry; without `keep_going` the first failure aborts.
fn parse_all<T>(
    entries: Vec<FormulaEntry>,
    keep_going: bool,
    mut parse: impl FnMut(&str) -> Result<T, chemform::Error>,
) -> Result<Batch<T>> {
    let mut batch = Batch {
        parsed: Vec::with_capacity(entries.len()),
        failed: Vec::new(),
    };

    for entry in entries {
        match parse(&entry.text) {
            Ok(value) => batch.parsed.push((entry, value)),
            Err(e) if keep_going => batch.failed.push((entry, e)),
            Err(e) => return Err(anyhow::Error::new(e).context(ParseFailure { entry })),
        }
    }

    Ok(batch)
}

/// Runs `write` against the requested output and returns a progress substep.
fn write_output(io: &IoOptions, write: impl FnOnce(&mut Output) -> Result<()>) -> Result<String> {
    let mut out = Output::create(io.output.as_deref())?;
    write(&mut out).context("Failed to write results")?;
    out.flush().context("Failed to write results")?;

    let name = match io.format {
        OutputFormat::Text => "text",
        OutputFormat::Tsv => "TSV",
        OutputFormat::Json => "JSON",
    };
    Ok(format!("Write {name} → {}", out.label()))
}
