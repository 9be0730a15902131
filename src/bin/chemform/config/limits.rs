use std::fs;

use anyhow::{Context, Result};

use chemform::{FormulaParser, load_config};

use crate::cli::LimitOptions;

pub fn build_parser(opts: &LimitOptions) -> Result<FormulaParser> {
    let Some(path) = &opts.config else {
        return Ok(FormulaParser::default());
    };

    let text = fs::read_to_string(path)
        .with_context(|| format!("Failed to read parser config: {}", path.display()))?;
    let config = load_config(Some(&text))
        .with_context(|| format!("Invalid parser config: {}", path.display()))?;
    Ok(FormulaParser::new(config))
}
