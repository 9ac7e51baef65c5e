//! Configuration schema definitions

use crate::error::{Error, Result};
use packbench_codecs::{Algorithm, CodecSettings};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Root configuration schema
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct ConfigSchema {
    /// `[bench]` section
    #[serde(default)]
    pub bench: BenchConfig,

    /// `[codecs]` section
    #[serde(default)]
    pub codecs: CodecConfig,

    /// `[report]` section
    #[serde(default)]
    pub report: ReportConfig,
}

impl ConfigSchema {
    /// Check value ranges that serde cannot express.
    pub fn validate(&self) -> Result<()> {
        if let Some(level) = self.bench.level {
            if Algorithm::from_id(level).is_none() {
                return Err(Error::config_validation(format!(
                    "bench.level = {} is outside {}..={}",
                    level,
                    Algorithm::FIRST.id(),
                    Algorithm::LAST.id()
                )));
            }
        }
        if self.codecs.deflate_level > 9 {
            return Err(Error::config_validation(format!(
                "codecs.deflate_level = {} is outside 0..=9",
                self.codecs.deflate_level
            )));
        }
        if self.codecs.brotli_quality > 11 {
            return Err(Error::config_validation(format!(
                "codecs.brotli_quality = {} is outside 0..=11",
                self.codecs.brotli_quality
            )));
        }
        if !(10..=24).contains(&self.codecs.brotli_window) {
            return Err(Error::config_validation(format!(
                "codecs.brotli_window = {} is outside 10..=24",
                self.codecs.brotli_window
            )));
        }
        Ok(())
    }
}

/// Benchmark selection defaults
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct BenchConfig {
    /// Skip decompression and verification
    #[serde(default)]
    pub compression_only: bool,

    /// Benchmark a single algorithm id instead of all of them
    #[serde(default)]
    pub level: Option<u8>,
}

/// Codec tunables
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CodecConfig {
    /// Deflate level (0-9)
    #[serde(default = "default_deflate_level")]
    pub deflate_level: u32,

    /// Brotli quality (0-11)
    #[serde(default = "default_brotli_quality")]
    pub brotli_quality: u32,

    /// Brotli window bits (10-24)
    #[serde(default = "default_brotli_window")]
    pub brotli_window: u32,
}

impl CodecConfig {
    /// Settings handed to the codec provider.
    pub fn settings(&self) -> CodecSettings {
        CodecSettings {
            deflate_level: self.deflate_level,
            brotli_quality: self.brotli_quality,
            brotli_window: self.brotli_window,
        }
    }
}

impl Default for CodecConfig {
    fn default() -> Self {
        Self {
            deflate_level: default_deflate_level(),
            brotli_quality: default_brotli_quality(),
            brotli_window: default_brotli_window(),
        }
    }
}

fn default_deflate_level() -> u32 {
    CodecSettings::default().deflate_level
}

fn default_brotli_quality() -> u32 {
    CodecSettings::default().brotli_quality
}

fn default_brotli_window() -> u32 {
    CodecSettings::default().brotli_window
}

/// Report rendering
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ReportConfig {
    /// Output format
    #[serde(default)]
    pub format: OutputFormat,

    /// Colour terminal output
    #[serde(default = "default_true")]
    pub color: bool,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            format: OutputFormat::default(),
            color: true,
        }
    }
}

fn default_true() -> bool {
    true
}

/// Report output format
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Human-readable text
    #[default]
    Text,
    /// Pretty-printed JSON
    Json,
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutputFormat::Text => f.write_str("text"),
            OutputFormat::Json => f.write_str("json"),
        }
    }
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "text" => Ok(OutputFormat::Text),
            "json" => Ok(OutputFormat::Json),
            other => Err(format!("unknown format '{}' (expected text or json)", other)),
        }
    }
}
