//! Benchmark report rendering
//!
//! Two renderers share one input, a finished or in-progress
//! [`BenchReport`]: [`TextReporter`] writes a human-readable block per
//! algorithm and can be driven incrementally while the benchmark runs, and
//! [`write_json`] serialises the complete report at the end. Both write into
//! any [`Write`], so nothing here touches stdout directly.

use crate::output::{format_count, format_duration, format_size};
use owo_colors::{OwoColorize, Style};
use packbench_codecs::Version;
use packbench_core::bench::{AlgorithmReport, BenchReport, Failure, Outcome, PhaseStats};
use serde::Serialize;
use std::io::{self, Write};

/// Human-readable renderer.
pub struct TextReporter<W> {
    out: W,
    source: String,
    color: bool,
}

impl<W: Write> TextReporter<W> {
    /// Renderer for a benchmark of the file named `source`.
    pub fn new(out: W, source: impl Into<String>) -> Self {
        Self {
            out,
            source: source.into(),
            color: true,
        }
    }

    /// Enable or disable ANSI colours.
    pub fn with_color(mut self, color: bool) -> Self {
        self.color = color;
        self
    }

    /// Provider version and allocated workspace, printed once before the
    /// first algorithm.
    pub fn banner(&mut self, version: Version, workspace_bytes: u64) -> io::Result<()> {
        let title = self.paint(
            &format!("packbench {} / codecs {}", env!("CARGO_PKG_VERSION"), version),
            Style::new().bold(),
        );
        writeln!(self.out, "{}", title)?;
        writeln!(
            self.out,
            "Allocated {} of working memory",
            format_size(workspace_bytes)
        )
    }

    /// Block for one algorithm.
    pub fn algorithm(&mut self, report: &AlgorithmReport) -> io::Result<()> {
        let label = report.algorithm.label();
        let header = format!("{} (level {})", label, report.algorithm.id());
        writeln!(self.out)?;
        writeln!(self.out, "{}", self.paint(&header, Style::new().bold().cyan()))?;
        writeln!(self.out, "{}", "=".repeat(header.chars().count()))?;

        if let Some(c) = &report.compression {
            writeln!(
                self.out,
                "Using file {} ({}) copied in memory",
                self.source,
                format_size(c.uncompressed_bytes)
            )?;
            self.phase_line("Compressed", c)?;
            let ratio = report
                .ratio()
                .map(|r| format!("{:.2}%", r * 100.0))
                .unwrap_or_else(|| "n/a".to_string());
            writeln!(self.out, "{:<13} {}", "Ratio", ratio)?;
        }
        if let Some(d) = &report.decompression {
            self.phase_line("Decompressed", d)?;
        }

        match report.outcome {
            Outcome::Passed => {
                let ok = self.paint("OK", Style::new().green());
                writeln!(self.out, "{:<13} {}", "Verification", ok)
            }
            Outcome::CompressedOnly => writeln!(
                self.out,
                "{:<13} {}",
                "Verification",
                self.paint("skipped (compression only)", Style::new().dimmed())
            ),
            Outcome::Failed(failure @ Failure::Mismatch { .. }) => {
                let msg = self.paint(&format!("FAILED, {}", failure), Style::new().red());
                writeln!(self.out, "{:<13} {}", "Verification", msg)
            }
            Outcome::Failed(failure) => {
                let msg = self.paint(&failure.to_string(), Style::new().red().bold());
                writeln!(self.out, "{:<13} {}", "Error", msg)
            }
        }
    }

    /// Passed and failed counts.
    pub fn summary(&mut self, report: &BenchReport) -> io::Result<()> {
        writeln!(self.out)?;
        let passed = format_count(report.passed(), "algorithm", "algorithms");
        if report.is_success() {
            let line = self.paint(&format!("{} passed", passed), Style::new().green().bold());
            writeln!(self.out, "{}", line)
        } else {
            let line = format!(
                "{} passed, {} failed",
                passed,
                report.failed()
            );
            writeln!(self.out, "{}", self.paint(&line, Style::new().red().bold()))
        }
    }

    /// Banner, every algorithm and the summary in one go.
    pub fn render(&mut self, report: &BenchReport) -> io::Result<()> {
        self.banner(report.provider_version, report.workspace_bytes)?;
        for algorithm in &report.algorithms {
            self.algorithm(algorithm)?;
        }
        self.summary(report)
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn phase_line(&mut self, name: &str, stats: &PhaseStats) -> io::Result<()> {
        writeln!(
            self.out,
            "{:<13} {} -> {} in {} ({})",
            name,
            format_size(stats.input_bytes),
            format_size(stats.output_bytes),
            format_duration(stats.elapsed),
            stats.throughput()
        )
    }

    fn paint(&self, text: &str, style: Style) -> String {
        if self.color {
            text.style(style).to_string()
        } else {
            text.to_string()
        }
    }
}

/// JSON output for a benchmark run
#[derive(Debug, Serialize)]
struct JsonBenchOutput<'a> {
    file: &'a str,
    provider_version: String,
    input_bytes: u64,
    workspace_bytes: u64,
    compression_only: bool,
    passed: usize,
    failed: usize,
    algorithms: Vec<JsonAlgorithm>,
}

#[derive(Debug, Serialize)]
struct JsonAlgorithm {
    id: u8,
    name: &'static str,
    status: &'static str,
    ratio: Option<f64>,
    compression: Option<JsonPhase>,
    decompression: Option<JsonPhase>,
    verified: Option<bool>,
    error: Option<JsonFailure>,
}

#[derive(Debug, Serialize)]
struct JsonPhase {
    input_bytes: u64,
    output_bytes: u64,
    elapsed_secs: f64,
    /// `null` when unbounded
    mib_per_sec: Option<f64>,
}

#[derive(Debug, Serialize)]
struct JsonFailure {
    message: String,
    state: Option<u8>,
}

impl From<&PhaseStats> for JsonPhase {
    fn from(stats: &PhaseStats) -> Self {
        Self {
            input_bytes: stats.input_bytes,
            output_bytes: stats.output_bytes,
            elapsed_secs: stats.elapsed.as_secs_f64(),
            mib_per_sec: stats.throughput().mib_per_sec(),
        }
    }
}

impl From<&AlgorithmReport> for JsonAlgorithm {
    fn from(report: &AlgorithmReport) -> Self {
        let (status, error) = match report.outcome {
            Outcome::Passed => ("passed", None),
            Outcome::CompressedOnly => ("compressed_only", None),
            Outcome::Failed(failure) => {
                let state = match failure {
                    Failure::Compress(s) | Failure::Decompress(s) => Some(s.code()),
                    _ => None,
                };
                (
                    "failed",
                    Some(JsonFailure {
                        message: failure.to_string(),
                        state,
                    }),
                )
            }
        };
        Self {
            id: report.algorithm.id(),
            name: report.algorithm.name(),
            status,
            ratio: report.ratio(),
            compression: report.compression.as_ref().map(JsonPhase::from),
            decompression: report.decompression.as_ref().map(JsonPhase::from),
            verified: report.verification().map(|v| v.is_match()),
            error,
        }
    }
}

/// Serialise `report` as pretty-printed JSON.
pub fn to_json(report: &BenchReport, source: &str) -> serde_json::Result<String> {
    let output = JsonBenchOutput {
        file: source,
        provider_version: report.provider_version.to_string(),
        input_bytes: report.input_bytes,
        workspace_bytes: report.workspace_bytes,
        compression_only: report.compression_only,
        passed: report.passed(),
        failed: report.failed(),
        algorithms: report.algorithms.iter().map(JsonAlgorithm::from).collect(),
    };
    serde_json::to_string_pretty(&output)
}

/// Write `report` as JSON followed by a newline.
pub fn write_json<W: Write>(mut out: W, report: &BenchReport, source: &str) -> io::Result<()> {
    let json = to_json(report, source)?;
    writeln!(out, "{}", json)
}

#[cfg(test)]
mod tests {
    use super::*;
    use packbench_codecs::{Algorithm, ProcessingState};
    use std::time::Duration;

    fn stats(input: u64, output: u64, uncompressed: u64, millis: u64) -> PhaseStats {
        PhaseStats {
            input_bytes: input,
            output_bytes: output,
            uncompressed_bytes: uncompressed,
            elapsed: Duration::from_millis(millis),
        }
    }

    fn sample_report() -> BenchReport {
        BenchReport {
            provider_version: Version {
                major: 0,
                minor: 3,
                patch: 0,
            },
            input_bytes: 1_048_576,
            workspace_bytes: 2_100_000,
            compression_only: false,
            algorithms: vec![
                AlgorithmReport {
                    algorithm: Algorithm::Lz4,
                    compression: Some(stats(1_048_576, 262_144, 1_048_576, 500)),
                    decompression: Some(stats(262_144, 1_048_576, 1_048_576, 0)),
                    outcome: Outcome::Passed,
                },
                AlgorithmReport {
                    algorithm: Algorithm::Deflate,
                    compression: None,
                    decompression: None,
                    outcome: Outcome::Failed(Failure::Compress(ProcessingState::CodecFailure)),
                },
                AlgorithmReport {
                    algorithm: Algorithm::Brotli,
                    compression: Some(stats(1_048_576, 100_000, 1_048_576, 250)),
                    decompression: Some(stats(100_000, 1_048_576, 1_048_576, 250)),
                    outcome: Outcome::Failed(Failure::Mismatch { offset: 17 }),
                },
            ],
        }
    }

    fn render_text(report: &BenchReport) -> String {
        let mut reporter = TextReporter::new(Vec::new(), "corpus.bin").with_color(false);
        reporter.render(report).unwrap();
        String::from_utf8(reporter.into_inner()).unwrap()
    }

    #[test]
    fn test_text_algorithm_block() {
        let text = render_text(&sample_report());

        assert!(text.contains("codecs 0.3.0"));
        assert!(text.contains("LZ4 algorithm (level 1)\n=======================\n"));
        assert!(text.contains("Using file corpus.bin (1.00 MiB) copied in memory"));
        assert!(text.contains("Compressed    1.00 MiB -> 256.00 KiB in 500.00ms (2.00 MiB/s)"));
        assert!(text.contains("Ratio         25.00%"));
        assert!(text.contains("(unbounded)"));
        assert!(text.contains("Verification  OK"));
    }

    #[test]
    fn test_text_failures_and_summary() {
        let text = render_text(&sample_report());

        assert!(text.contains("Error         compression failed: codec failure (state 4)"));
        assert!(text.contains("Verification  FAILED, decompressed data differs"));
        assert!(text.contains("1 algorithm passed, 2 failed"));
    }

    #[test]
    fn test_text_empty_input_ratio() {
        let report = AlgorithmReport {
            algorithm: Algorithm::Lz4,
            compression: Some(stats(0, 9, 0, 0)),
            decompression: Some(stats(9, 0, 0, 0)),
            outcome: Outcome::Passed,
        };
        let mut reporter = TextReporter::new(Vec::new(), "empty").with_color(false);
        reporter.algorithm(&report).unwrap();
        let text = String::from_utf8(reporter.into_inner()).unwrap();

        assert!(text.contains("Ratio         n/a"));
        assert_eq!(text.matches("unbounded").count(), 2);
    }

    #[test]
    fn test_text_compression_only() {
        let report = AlgorithmReport {
            algorithm: Algorithm::Brotli,
            compression: Some(stats(100, 40, 100, 1)),
            decompression: None,
            outcome: Outcome::CompressedOnly,
        };
        let mut reporter = TextReporter::new(Vec::new(), "f").with_color(false);
        reporter.algorithm(&report).unwrap();
        let text = String::from_utf8(reporter.into_inner()).unwrap();

        assert!(!text.contains("Decompressed"));
        assert!(text.contains("skipped (compression only)"));
    }

    #[test]
    fn test_color_toggle() {
        let report = sample_report();
        let mut colored = TextReporter::new(Vec::new(), "f").with_color(true);
        colored.summary(&report).unwrap();
        let colored = String::from_utf8(colored.into_inner()).unwrap();
        assert!(colored.contains('\u{1b}'));

        assert!(!render_text(&report).contains('\u{1b}'));
    }

    #[test]
    fn test_json_view() {
        let json = to_json(&sample_report(), "corpus.bin").unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert_eq!(value["file"], "corpus.bin");
        assert_eq!(value["provider_version"], "0.3.0");
        assert_eq!(value["passed"], 1);
        assert_eq!(value["failed"], 2);

        let algorithms = value["algorithms"].as_array().unwrap();
        assert_eq!(algorithms.len(), 3);
        assert_eq!(algorithms[0]["name"], "lz4");
        assert_eq!(algorithms[0]["status"], "passed");
        assert_eq!(algorithms[0]["ratio"], 0.25);
        assert_eq!(algorithms[0]["compression"]["mib_per_sec"], 2.0);
        assert!(algorithms[0]["decompression"]["mib_per_sec"].is_null());
        assert_eq!(algorithms[0]["verified"], true);

        assert_eq!(algorithms[1]["status"], "failed");
        assert_eq!(algorithms[1]["error"]["state"], 4);
        assert!(algorithms[1]["compression"].is_null());

        assert_eq!(algorithms[2]["verified"], false);
        assert!(algorithms[2]["error"]["state"].is_null());
    }

    #[test]
    fn test_write_json_appends_newline() {
        let mut out = Vec::new();
        write_json(&mut out, &sample_report(), "corpus.bin").unwrap();
        assert!(out.ends_with(b"}\n"));
    }
}
