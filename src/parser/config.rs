//! Token length and nesting limits for the formula grammar.
//!
//! Defaults ship embedded as `resources/default.parser.toml`; a caller may
//! supply its own TOML, in which any omitted key falls back to the default.

use serde::Deserialize;
use std::sync::OnceLock;
use thiserror::Error;

const DEFAULT_CONFIG_TOML: &str = include_str!("../../resources/default.parser.toml");

static DEFAULT_CONFIG: OnceLock<ParserConfig> = OnceLock::new();

/// Errors raised while loading a [`ParserConfig`].
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The TOML text could not be deserialized.
    #[error("failed to parse parser configuration: {0}")]
    Parse(#[from] toml::de::Error),

    /// A limit was set to zero, which would reject every token or group.
    #[error("parser limit '{key}' must be at least 1")]
    ZeroLimit {
        /// Name of the offending key.
        key: &'static str,
    },
}

/// Maximum token lengths and group nesting accepted by [`FormulaParser`](super::FormulaParser).
///
/// # Examples
///
/// ```
/// use chemform::{FormulaParser, ParserConfig};
///
/// let strict = ParserConfig {
///     max_symbol_len: 2,
///     ..Default::default()
/// };
/// let parser = FormulaParser::new(strict);
/// assert!(parser.parse("Ca").is_ok());
/// assert!(parser.parse("Abc").is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct ParserConfig {
    /// Longest element symbol, in bytes.
    #[serde(default = "default_max_symbol_len")]
    pub max_symbol_len: usize,

    /// Longest isotope label between the `/` delimiters.
    #[serde(default = "default_max_isotope_len")]
    pub max_isotope_len: usize,

    /// Longest valence text between the `|` bars.
    #[serde(default = "default_max_valence_len")]
    pub max_valence_len: usize,

    /// Deepest bracket nesting; bounds the parser's recursion.
    #[serde(default = "default_max_depth")]
    pub max_depth: usize,
}

fn default_max_symbol_len() -> usize {
    9
}
fn default_max_isotope_len() -> usize {
    9
}
fn default_max_valence_len() -> usize {
    3
}
fn default_max_depth() -> usize {
    64
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self {
            max_symbol_len: default_max_symbol_len(),
            max_isotope_len: default_max_isotope_len(),
            max_valence_len: default_max_valence_len(),
            max_depth: default_max_depth(),
        }
    }
}

impl ParserConfig {
    /// Rejects limits that would make every token of that kind invalid.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let limits = [
            ("max_symbol_len", self.max_symbol_len),
            ("max_isotope_len", self.max_isotope_len),
            ("max_valence_len", self.max_valence_len),
            ("max_depth", self.max_depth),
        ];
        match limits.into_iter().find(|&(_, value)| value == 0) {
            Some((key, _)) => Err(ConfigError::ZeroLimit { key }),
            None => Ok(()),
        }
    }
}

/// Loads parser limits from `custom_toml`, or the embedded defaults if `None`.
pub fn load_config(custom_toml: Option<&str>) -> Result<ParserConfig, ConfigError> {
    match custom_toml {
        Some(toml) => {
            let config: ParserConfig = toml::from_str(toml)?;
            config.validate()?;
            Ok(config)
        }
        None => Ok(*default_config()),
    }
}

/// The embedded default limits, parsed once.
pub fn default_config() -> &'static ParserConfig {
    DEFAULT_CONFIG.get_or_init(|| toml::from_str(DEFAULT_CONFIG_TOML).unwrap_or_default())
}
