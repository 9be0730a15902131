use std::io::{self, Write};

use anyhow::Error;

use chemform::{Category, ConfigError, ErrorKind};

use crate::commands::ParseFailure;
use crate::util::text::{point_at, wrap};

#[rustfmt::skip]
pub fn print_error(err: &Error) {
    let mut stderr = io::stderr().lock();

    let _ = writeln!(stderr);
    let _ = writeln!(stderr, "   ╔══════════════════════════════════════════════════════════════╗");
    let _ = writeln!(stderr, "   ║  ✗ Error                                                     ║");
    let _ = writeln!(stderr, "   ╟──────────────────────────────────────────────────────────────╢");

    let msg = err.to_string();
    for line in wrap(&msg, 59) {
        let _ = writeln!(stderr, "   ║  {:<59} ║", line);
    }

    let mut source = err.source();
    while let Some(cause) = source {
        let _ = writeln!(stderr, "   ╟──────────────────────────────────────────────────────────────╢");
        let _ = writeln!(stderr, "   ║  Caused by:                                                  ║");
        for line in wrap(&cause.to_string(), 59) {
            let _ = writeln!(stderr, "   ║    {:<57} ║", line);
        }
        source = cause.source();
    }

    if let Some((formula, caret)) = pointer(err) {
        let _ = writeln!(stderr, "   ╟──────────────────────────────────────────────────────────────╢");
        let _ = writeln!(stderr, "   ║  Near:                                                       ║");
        let _ = writeln!(stderr, "   ║    {:<57} ║", formula);
        let _ = writeln!(stderr, "   ║    {:<57} ║", caret);
    }

    if let Some(hints) = HintCollector::collect(err) {
        let _ = writeln!(stderr, "   ╟──────────────────────────────────────────────────────────────╢");
        let _ = writeln!(stderr, "   ║  Hints:                                                      ║");
        for hint in hints {
            let wrapped = wrap(&hint, 55);
            if let Some((first, rest)) = wrapped.split_first() {
                let _ = writeln!(stderr, "   ║    • {:<55} ║", first);
                for line in rest {
                    let _ = writeln!(stderr, "   ║      {:<55} ║", line);
                }
            }
        }
    }

    let _ = writeln!(stderr, "   ╚══════════════════════════════════════════════════════════════╝");
    let _ = writeln!(stderr);
}

/// The failing formula with a caret under the offending character.
fn pointer(err: &Error) -> Option<(String, String)> {
    let failure = err.downcast_ref::<ParseFailure>()?;
    let parse_err = err.downcast_ref::<chemform::Error>()?;
    point_at(&failure.entry.text, parse_err.offset(), 57)
}

struct HintCollector {
    hints: Vec<String>,
    has_typed_hints: bool,
}

impl HintCollector {
    fn new() -> Self {
        Self {
            hints: Vec::new(),
            has_typed_hints: false,
        }
    }

    fn collect(err: &Error) -> Option<Vec<String>> {
        let mut collector = Self::new();

        collector.collect_parse_hints(err);
        collector.collect_config_hints(err);
        collector.collect_io_hints(err);

        if !collector.has_typed_hints {
            collector.collect_fallback_hints(err);
        }

        if collector.hints.is_empty() {
            None
        } else {
            Some(collector.hints)
        }
    }

    fn add(&mut self, hint: impl Into<String>) {
        self.hints.push(hint.into());
    }

    fn mark_typed(&mut self) {
        self.has_typed_hints = true;
    }

    fn collect_parse_hints(&mut self, err: &Error) {
        let Some(parse_err) = err.downcast_ref::<chemform::Error>() else {
            return;
        };

        self.mark_typed();

        match parse_err.kind() {
            ErrorKind::UnclosedGroup { open, close } => {
                self.add(format!("Every '{open}' needs a matching '{close}'"));
                self.add("Groups may nest, e.g. Mg3[Si(O2)2]2, but must close innermost first");
            }

            ErrorKind::NestingTooDeep { max } => {
                self.add(format!("Groups may be nested at most {max} levels deep"));
                self.add("Raise max_depth with --config if deeper nesting is intended");
            }

            ErrorKind::ExpectedSymbol(found) => {
                self.add(format!(
                    "'{found}' cannot start an element symbol; symbols begin with an upper-case letter or '$'"
                ));
                if found.is_ascii_lowercase() {
                    self.add("Element symbols are case-sensitive: write Ca, not ca");
                }
                if matches!(found, ')' | ']' | '}') {
                    self.add("This closing bracket has no matching opening bracket");
                }
            }

            ErrorKind::MissingSymbol => {
                self.add("The formula ends where an element symbol was expected");
                self.add("An isotope label must be followed by its element, e.g. /18/O");
            }

            ErrorKind::SymbolTooLong { max } => {
                self.add(format!("Element symbols may be at most {max} characters long"));
                self.add("Raise max_symbol_len with --config if longer pseudo-elements are intended");
            }

            ErrorKind::UnterminatedValence
            | ErrorKind::ValenceTooLong { .. }
            | ErrorKind::InvalidValence(_) => {
                self.add("Valences are signed integers between bars, e.g. Fe|3| or O|-2|");
                if let ErrorKind::ValenceTooLong { max } = parse_err.kind() {
                    self.add(format!(
                        "At most {max} characters fit between the bars (max_valence_len)"
                    ));
                }
            }

            ErrorKind::UnterminatedIsotope
            | ErrorKind::EmptyIsotope
            | ErrorKind::IsotopeTooLong { .. } => {
                self.add("Isotope labels sit between slashes before the symbol, e.g. /18/O");
                if let ErrorKind::IsotopeTooLong { max } = parse_err.kind() {
                    self.add(format!(
                        "At most {max} characters fit between the slashes (max_isotope_len)"
                    ));
                }
            }

            ErrorKind::UnclosedMoiety => {
                self.add("Moiety names are written between braces, e.g. {Ca}0.5{Mg}0.5:{Si}");
            }
        }

        if parse_err.category() == Category::Group {
            self.add("A trailing '+', '-' or '@' is read as the charge and cut off before grouping");
        }

        let location = parse_err.location();
        self.add(format!(
            "Rejected by {}:{} (include this when reporting a parser bug)",
            location.file(),
            location.line()
        ));
    }

    fn collect_config_hints(&mut self, err: &Error) {
        let Some(config_err) = err.downcast_ref::<ConfigError>() else {
            return;
        };

        self.mark_typed();

        match config_err {
            ConfigError::Parse(_) => {
                self.add("Parser config file has invalid TOML or wrong value types");
                self.add(
                    "Recognized keys: max_symbol_len, max_isotope_len, max_valence_len, max_depth",
                );
                self.add("All values are positive integers; omitted keys keep their defaults");
            }

            ConfigError::ZeroLimit { key } => {
                self.add(format!("Set {key} to 1 or more, or remove it to use the default"));
            }
        }
    }

    fn collect_io_hints(&mut self, err: &Error) {
        use std::io::ErrorKind;

        let Some(io_err) = err.downcast_ref::<std::io::Error>() else {
            return;
        };

        self.mark_typed();

        match io_err.kind() {
            ErrorKind::NotFound => {
                self.add("File or directory not found");
                self.add("Check the path spelling and ensure the file exists");
            }

            ErrorKind::PermissionDenied => {
                self.add("Permission denied accessing the file");
                self.add("Check file permissions with `ls -la`");
            }

            ErrorKind::InvalidData => {
                self.add("Input is not valid UTF-8 text");
                self.add("Formula files must be plain text with one formula per line");
            }

            ErrorKind::BrokenPipe => {
                self.add("Broken pipe: the output consumer terminated early");
                self.add("This may occur when piping to commands like `head`");
            }

            _ => {
                self.add("I/O operation failed");
                self.add("Check file path, permissions, and disk space");
            }
        }
    }

    fn collect_fallback_hints(&mut self, err: &Error) {
        let msg = error_chain_text(err);

        if msg.contains("terminal") || msg.contains("stdin") {
            self.add("Pass formulas as arguments, use -i/--input, or pipe them to stdin");
            return;
        }

        if msg.contains("element symbol") {
            self.add("List accepted elements as symbols, e.g. --elements Ca,C,O");
        }
    }
}

fn error_chain_text(err: &Error) -> String {
    let mut text = String::new();

    text.push_str(&err.to_string());

    let mut source = err.source();
    while let Some(cause) = source {
        text.push('\n');
        text.push_str(&cause.to_string());
        source = cause.source();
    }

    text.to_lowercase()
}
