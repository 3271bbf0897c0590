//! Configuration loading for stancemap.
//!
//! Configuration is loaded from TOML files with the following resolution order:
//! 1. `--config <path>` (CLI flag)
//! 2. `~/.stancemap/config.toml` (user)
//! 3. `/etc/stancemap/config.toml` (system)
//!
//! Without any file, the built-in defaults apply: the comma-delimited
//! convention with literal identifiers and six stance labels.
//!
//! ```toml
//! [domain]
//! name = "tweedekamer2017.kieskompas.nl"
//! labels = "six"              # or "five"
//!
//! [input]
//! delimiter = ","             # or ";"
//! identifiers = "column"      # or "row-index"
//!
//! [weights]
//! precision = 3
//! correction = "first-entry"  # or "largest-remainder"
//!
//! [output]
//! domain = "per-party"        # or "once"
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::types::LabelSet;
use crate::weights::{Correction, DEFAULT_PRECISION, MAX_PRECISION};
use crate::{Result, StancemapError};

/// Stancemap configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub domain: DomainConfig,
    #[serde(default)]
    pub input: InputConfig,
    #[serde(default)]
    pub weights: WeightsConfig,
    #[serde(default)]
    pub output: OutputConfig,
}

/// Domain-wide settings shared by every party in a run.
#[derive(Debug, Clone, Deserialize)]
pub struct DomainConfig {
    /// Domain name, also the stem of the domain output file.
    #[serde(default = "default_domain_name")]
    pub name: String,
    /// Allowed stance labels.
    #[serde(default)]
    pub labels: LabelSet,
}

impl Default for DomainConfig {
    fn default() -> Self {
        Self {
            name: default_domain_name(),
            labels: LabelSet::default(),
        }
    }
}

fn default_domain_name() -> String {
    "tweedekamer2017.kieskompas.nl".to_string()
}

/// Field delimiter of survey input files.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
pub enum Delimiter {
    #[default]
    #[serde(rename = ",")]
    Comma,
    #[serde(rename = ";")]
    Semicolon,
}

impl Delimiter {
    pub fn as_byte(self) -> u8 {
        match self {
            Self::Comma => b',',
            Self::Semicolon => b';',
        }
    }
}

/// Where statement identifiers come from.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum IdentifierSource {
    /// Taken literally from the identifier column.
    #[default]
    Column,
    /// Synthesized as `statement<row-index>`, counting data rows from zero.
    RowIndex,
}

/// Survey input layout.
#[derive(Debug, Clone, Deserialize)]
pub struct InputConfig {
    #[serde(default)]
    pub delimiter: Delimiter,
    #[serde(default)]
    pub identifiers: IdentifierSource,
    /// Column holding the identifier (default: 0). Ignored for `row-index`.
    #[serde(default)]
    pub identifier_column: usize,
    /// Column holding the stance label (default: 1).
    #[serde(default = "default_stance_column")]
    pub stance_column: usize,
    /// Column holding the raw weight (default: 2).
    #[serde(default = "default_weight_column")]
    pub weight_column: usize,
    /// Whether the first row is a header (default: false).
    #[serde(default)]
    pub has_headers: bool,
    /// File extension of party input files (default: "csv").
    #[serde(default = "default_extension")]
    pub extension: String,
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            delimiter: Delimiter::default(),
            identifiers: IdentifierSource::default(),
            identifier_column: 0,
            stance_column: default_stance_column(),
            weight_column: default_weight_column(),
            has_headers: false,
            extension: default_extension(),
        }
    }
}

fn default_stance_column() -> usize {
    1
}

fn default_weight_column() -> usize {
    2
}

fn default_extension() -> String {
    "csv".to_string()
}

/// Weight normalization settings.
#[derive(Debug, Clone, Deserialize)]
pub struct WeightsConfig {
    /// Decimal places of normalized weights (default: 3).
    #[serde(default = "default_precision")]
    pub precision: u32,
    #[serde(default)]
    pub correction: Correction,
}

impl Default for WeightsConfig {
    fn default() -> Self {
        Self {
            precision: default_precision(),
            correction: Correction::default(),
        }
    }
}

fn default_precision() -> u32 {
    DEFAULT_PRECISION
}

/// How often the shared domain document is written.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DomainOutput {
    /// Rewritten after every successful party.
    #[default]
    PerParty,
    /// Written once per batch, from the first successful party.
    Once,
}

/// Output settings.
#[derive(Debug, Clone, Deserialize)]
pub struct OutputConfig {
    #[serde(default)]
    pub domain: DomainOutput,
    /// Pretty-print JSON documents (default: true).
    #[serde(default = "default_pretty")]
    pub pretty: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            domain: DomainOutput::default(),
            pretty: default_pretty(),
        }
    }
}

fn default_pretty() -> bool {
    true
}

/// Known survey input conventions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
pub enum Preset {
    /// Comma-delimited, literal identifiers, six labels including "Geen mening".
    Column,
    /// Semicolon-delimited, `statement<i>` identifiers, five labels.
    RowIndex,
}

impl Config {
    /// Defaults adjusted to a known input convention.
    pub fn preset(preset: Preset) -> Self {
        let mut config = Self::default();
        config.apply_preset(preset);
        config
    }

    /// Switch delimiter, identifier source and label set to `preset`.
    pub fn apply_preset(&mut self, preset: Preset) {
        let (delimiter, identifiers, labels) = match preset {
            Preset::Column => (Delimiter::Comma, IdentifierSource::Column, LabelSet::Six),
            Preset::RowIndex => (
                Delimiter::Semicolon,
                IdentifierSource::RowIndex,
                LabelSet::Five,
            ),
        };
        self.input.delimiter = delimiter;
        self.input.identifiers = identifiers;
        self.domain.labels = labels;
    }

    /// Load configuration from the standard locations.
    ///
    /// Resolution order:
    /// 1. Explicit path (if provided, must exist)
    /// 2. `~/.stancemap/config.toml`
    /// 3. `/etc/stancemap/config.toml`
    /// 4. Built-in defaults
    pub fn load(explicit_path: Option<&Path>) -> Result<Self> {
        let Some(path) = Self::resolve_config_path(explicit_path)? else {
            return Ok(Self::default());
        };
        let content = fs::read_to_string(&path).map_err(|e| {
            StancemapError::Configuration(format!("Failed to read config file {path:?}: {e}"))
        })?;
        Self::from_toml(&content).map_err(|e| match e {
            StancemapError::Configuration(msg) => {
                StancemapError::Configuration(format!("{path:?}: {msg}"))
            }
            other => other,
        })
    }

    /// Parse and validate a TOML document.
    pub fn from_toml(content: &str) -> Result<Self> {
        let config: Self = toml::from_str(content).map_err(|e| {
            StancemapError::Configuration(format!("Failed to parse config: {e}"))
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Check cross-field constraints serde can't express.
    pub fn validate(&self) -> Result<()> {
        if !(1..=MAX_PRECISION).contains(&self.weights.precision) {
            return Err(StancemapError::Configuration(format!(
                "weights.precision must be between 1 and {MAX_PRECISION}, got {}",
                self.weights.precision
            )));
        }
        if self.domain.name.trim().is_empty() {
            return Err(StancemapError::Configuration(
                "domain.name must not be empty".to_string(),
            ));
        }
        if self.input.extension.is_empty() {
            return Err(StancemapError::Configuration(
                "input.extension must not be empty".to_string(),
            ));
        }
        let input = &self.input;
        let clash = input.stance_column == input.weight_column
            || (input.identifiers == IdentifierSource::Column
                && (input.identifier_column == input.stance_column
                    || input.identifier_column == input.weight_column));
        if clash {
            return Err(StancemapError::Configuration(
                "input columns must be distinct".to_string(),
            ));
        }
        Ok(())
    }

    /// Resolve the config file path, `None` when no file exists.
    fn resolve_config_path(explicit: Option<&Path>) -> Result<Option<PathBuf>> {
        if let Some(path) = explicit {
            if path.exists() {
                return Ok(Some(path.to_path_buf()));
            }
            return Err(StancemapError::Configuration(format!(
                "Config file not found: {path:?}"
            )));
        }

        // User config
        if let Some(home) = dirs::home_dir() {
            let user_config = home.join(".stancemap").join("config.toml");
            if user_config.exists() {
                return Ok(Some(user_config));
            }
        }

        // System config
        let system_config = PathBuf::from("/etc/stancemap/config.toml");
        if system_config.exists() {
            return Ok(Some(system_config));
        }

        Ok(None)
    }
}
