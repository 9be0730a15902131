use std::fmt;
use std::io::BufRead;

/// Where a formula came from, for error reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Origin {
    /// 1-based position among the command-line formulas.
    Argument(usize),
    /// 1-based line number in the input file or stdin.
    Line(usize),
}

impl fmt::Display for Origin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Origin::Argument(n) => write!(f, "argument {n}"),
            Origin::Line(n) => write!(f, "line {n}"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormulaEntry {
    pub origin: Origin,
    pub text: String,
}

pub fn from_arguments(formulas: &[String]) -> Vec<FormulaEntry> {
    formulas
        .iter()
        .enumerate()
        .map(|(i, text)| FormulaEntry {
            origin: Origin::Argument(i + 1),
            text: text.clone(),
        })
        .collect()
}

/// Reads one formula per line, skipping blank lines and `#` comments.
///
/// Surrounding whitespace is trimmed; the parser would skip it anyway, but
/// trimmed text reads better in reports.
pub fn from_lines(reader: impl BufRead) -> std::io::Result<Vec<FormulaEntry>> {
    let mut entries = Vec::new();
    for (idx, line) in reader.lines().enumerate() {
        let line = line?;
        let text = line.trim();
        if text.is_empty() || text.starts_with('#') {
            continue;
        }
        entries.push(FormulaEntry {
            origin: Origin::Line(idx + 1),
            text: text.to_string(),
        });
    }
    Ok(entries)
}
