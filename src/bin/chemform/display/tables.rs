use std::collections::BTreeMap;
use std::io::{self, Write};

use chemform::{Composition, MoietyFormula};

use crate::io::FormulaEntry;
use crate::util::text::truncate;

const INDENT: &str = "      ";

const BOX_INNER_WIDTH: usize = 62;
const SAFE_TABLE_WIDTH: usize = BOX_INNER_WIDTH - INDENT.len();

const MAX_ROWS: usize = 15;

#[derive(Clone, Copy)]
enum Align {
    Left,
    Right,
}

struct Column {
    header: &'static str,
    width: usize,
    align: Align,
}

impl Column {
    const fn left(header: &'static str, width: usize) -> Self {
        Self {
            header,
            width,
            align: Align::Left,
        }
    }

    const fn right(header: &'static str, width: usize) -> Self {
        Self {
            header,
            width,
            align: Align::Right,
        }
    }
}

/// Box-drawn table on the interactive stderr report.
struct Table {
    title: String,
    columns: Vec<Column>,
    rows: Vec<Vec<String>>,
    hidden: usize,
}

impl Table {
    /// Builds a table whose last column takes up the remaining safe width.
    fn new(title: impl Into<String>, mut columns: Vec<Column>, fill: &'static str) -> Self {
        let used: usize = columns.iter().map(|c| c.width + 3).sum();
        let width = SAFE_TABLE_WIDTH.saturating_sub(used + 3).max(8);
        columns.push(Column::left(fill, width));
        Self {
            title: title.into(),
            columns,
            rows: Vec::new(),
            hidden: 0,
        }
    }

    fn row(&mut self, cells: Vec<String>) {
        if self.rows.len() < MAX_ROWS {
            self.rows.push(cells);
        } else {
            self.hidden += 1;
        }
    }

    fn last_width(&self) -> usize {
        self.columns.last().map_or(0, |c| c.width)
    }

    fn render(&self, out: &mut impl Write) {
        let _ = writeln!(
            out,
            "{INDENT}┌─ {} ─┐",
            truncate(&self.title, SAFE_TABLE_WIDTH - 6)
        );
        self.rule(out, '┌', '┬', '┐');
        let headers: Vec<String> = self.columns.iter().map(|c| c.header.to_string()).collect();
        self.line(out, &headers);
        self.rule(out, '├', '┼', '┤');

        for cells in &self.rows {
            self.line(out, cells);
        }
        if self.hidden > 0 {
            let mut more = vec!["...".to_string(); self.columns.len()];
            if let Some(last) = more.last_mut() {
                *last = format!("({} more)", self.hidden);
            }
            self.line(out, &more);
        }

        self.rule(out, '└', '┴', '┘');
    }

    fn rule(&self, out: &mut impl Write, left: char, mid: char, right: char) {
        let segments: Vec<String> = self
            .columns
            .iter()
            .map(|c| "─".repeat(c.width + 2))
            .collect();
        let _ = writeln!(out, "{INDENT}{left}{}{right}", segments.join(&mid.to_string()));
    }

    fn line(&self, out: &mut impl Write, cells: &[String]) {
        let rendered: Vec<String> = self
            .columns
            .iter()
            .zip(cells)
            .map(|(col, cell)| {
                let text = truncate(cell, col.width);
                let w = col.width;
                match col.align {
                    Align::Left => format!(" {text:<w$} "),
                    Align::Right => format!(" {text:>w$} "),
                }
            })
            .collect();
        let _ = writeln!(out, "{INDENT}│{}│", rendered.join("│"));
    }
}

pub fn print_run_summary(title: &str, rows: &[(&str, String)]) {
    let mut table = Table::new(title, vec![Column::left("Metric", 16)], "Value");
    if let Some(value) = table.columns.last_mut() {
        value.align = Align::Right;
    }
    for (key, value) in rows {
        table.row(vec![key.to_string(), value.clone()]);
    }
    table.render(&mut io::stderr().lock());
}

/// Shows in how many formulas each element occurs.
pub fn print_element_usage(records: &[(FormulaEntry, Composition)]) {
    let mut usage: BTreeMap<&str, usize> = BTreeMap::new();
    for (_, comp) in records {
        for symbol in comp.symbols() {
            *usage.entry(symbol).or_insert(0) += 1;
        }
    }

    if let Some(table) = distribution("Element Usage", "Element", usage, records.len()) {
        table.render(&mut io::stderr().lock());
    }
}

/// Shows how often each moiety is written across all formulas.
pub fn print_moiety_usage(records: &[(FormulaEntry, MoietyFormula)]) {
    let mut usage: BTreeMap<&str, usize> = BTreeMap::new();
    let mut total = 0usize;
    for (_, parsed) in records {
        for term in parsed.terms() {
            *usage.entry(term.moiety.as_str()).or_insert(0) += 1;
            total += 1;
        }
    }

    if let Some(table) = distribution("Moiety Usage", "Moiety", usage, total) {
        table.render(&mut io::stderr().lock());
    }
}

/// Lists formulas that were skipped under `--keep-going`.
pub fn print_skipped(failures: &[(FormulaEntry, chemform::Error)]) {
    if failures.is_empty() {
        return;
    }

    let mut table = Table::new(
        format!("Skipped Formulas ({})", failures.len()),
        vec![Column::left("Source", 12), Column::left("Formula", 16)],
        "Problem",
    );
    for (entry, err) in failures {
        table.row(vec![
            entry.origin.to_string(),
            entry.text.clone(),
            format!("{} @{}", err.category(), err.offset()),
        ]);
    }
    table.render(&mut io::stderr().lock());
}

/// Count-per-name table with a share bar, most frequent first.
fn distribution(
    title: &str,
    label: &'static str,
    usage: BTreeMap<&str, usize>,
    total: usize,
) -> Option<Table> {
    if usage.is_empty() || total == 0 {
        return None;
    }

    let mut sorted: Vec<(&str, usize)> = usage.into_iter().collect();
    sorted.sort_by(|a, b| b.1.cmp(&a.1));

    let mut table = Table::new(
        title,
        vec![Column::left(label, 10), Column::right("Count", 8)],
        "Share",
    );
    let bar_width = table.last_width().saturating_sub(8).min(20);
    for (name, count) in sorted {
        let pct = (count as f64 / total as f64) * 100.0;
        table.row(vec![
            name.to_string(),
            count.to_string(),
            format!("{}  {:>5.1}%", make_bar(pct, bar_width), pct),
        ]);
    }
    Some(table)
}

fn make_bar(pct: f64, max_width: usize) -> String {
    let filled = (((pct / 100.0) * max_width as f64).round() as usize).min(max_width);
    let empty = max_width - filled;
    format!("{}{}", "█".repeat(filled), "░".repeat(empty))
}
