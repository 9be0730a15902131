mod entry;
mod write;

pub use entry::{FormulaEntry, Origin};
pub use write::{CheckRecord, write_checks, write_compositions, write_moieties};

use std::fs::File;
use std::io::{self, BufReader, BufWriter, IsTerminal, Write};
use std::path::Path;

use anyhow::{Context, Result};

use crate::cli::IoOptions;

/// Returns `true` if stderr is a terminal (interactive).
pub fn stderr_is_tty() -> bool {
    io::stderr().is_terminal()
}

/// Returns `true` if stdin is a terminal (interactive).
pub fn stdin_is_tty() -> bool {
    io::stdin().is_terminal()
}

/// Collects the formulas named on the command line, or read from the input.
pub fn read_formulas(opts: &IoOptions) -> Result<Vec<FormulaEntry>> {
    if !opts.formulas.is_empty() {
        return Ok(entry::from_arguments(&opts.formulas));
    }

    match &opts.input {
        Some(path) => {
            let file = File::open(path)
                .with_context(|| format!("Failed to open input file: {}", path.display()))?;
            entry::from_lines(BufReader::new(file))
                .with_context(|| format!("Failed to read formulas from {}", path.display()))
        }
        None => entry::from_lines(io::stdin().lock()).context("Failed to read formulas from stdin"),
    }
}

/// Buffered destination for the formatted results, named for progress reports.
pub struct Output {
    label: String,
    writer: BufWriter<Box<dyn Write>>,
}

impl Output {
    pub fn create(path: Option<&Path>) -> Result<Self> {
        let (label, sink): (String, Box<dyn Write>) = match path {
            Some(p) => {
                let file = File::create(p)
                    .with_context(|| format!("Failed to create output file: {}", p.display()))?;
                let label = p
                    .file_name()
                    .map(|name| name.to_string_lossy().into_owned())
                    .unwrap_or_else(|| p.display().to_string());
                (label, Box::new(file))
            }
            None => ("stdout".to_string(), Box::new(io::stdout().lock())),
        };

        Ok(Self {
            label,
            writer: BufWriter::new(sink),
        })
    }

    pub fn label(&self) -> &str {
        &self.label
    }
}

impl Write for Output {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.writer.write(buf)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.writer.flush()
    }
}
