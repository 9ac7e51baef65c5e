//! packbench CLI
//!
//! Loads one file into memory and benchmarks every compression algorithm
//! of the bundled codec provider on it.

use anyhow::Result;
use clap::Parser;
use packbench_cli::output::Status;
use packbench_cli::{write_json, TextReporter};
use packbench_codecs::{Algorithm, CodecProvider, Codecs};
use packbench_core::config::{Config, ConfigSchema, OutputFormat};
use packbench_core::error::exit_codes;
use packbench_core::prelude::*;
use packbench_telemetry::TelemetryConfig;
use std::io::{self, IsTerminal};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing::info;

#[derive(Parser)]
#[command(name = "packbench")]
#[command(about = "Benchmark LZ4, Deflate and Brotli on a file held in memory")]
#[command(version)]
struct Cli {
    /// Benchmark only algorithm LEVEL (1=lz4, 2=deflate, 3=brotli)
    #[arg(short, long, value_name = "LEVEL")]
    level: Option<Algorithm>,

    /// Skip decompression and verification
    #[arg(short, long)]
    compression_only: bool,

    /// Output format (text, json)
    #[arg(short, long)]
    format: Option<OutputFormat>,

    /// Config file path
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Disable colored output
    #[arg(long)]
    no_color: bool,

    /// Debug logging to stderr
    #[arg(short, long)]
    verbose: bool,

    /// Emit logs as JSON lines
    #[arg(long, env = "PACKBENCH_LOG_JSON")]
    log_json: bool,

    /// File to benchmark
    file: PathBuf,
}

/// Effective settings after merging flags over the config file.
struct RunSettings {
    options: BenchOptions,
    format: OutputFormat,
    color: bool,
}

impl RunSettings {
    fn resolve(cli: &Cli, schema: &ConfigSchema) -> Self {
        let level = cli
            .level
            .or_else(|| schema.bench.level.and_then(Algorithm::from_id));
        Self {
            options: BenchOptions {
                range: AlgorithmRange::from_level(level),
                compression_only: cli.compression_only || schema.bench.compression_only,
            },
            format: cli.format.unwrap_or(schema.report.format),
            color: !cli.no_color && schema.report.color && io::stdout().is_terminal(),
        }
    }
}

fn main() -> ExitCode {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            // --help and --version also arrive here, on stdout
            let code = if e.use_stderr() {
                exit_codes::USAGE_ERROR
            } else {
                exit_codes::SUCCESS
            };
            let _ = e.print();
            return exit_code(code);
        }
    };

    if cli.no_color {
        owo_colors::set_override(false);
    }

    let telemetry = TelemetryConfig::verbose(cli.verbose).with_json(cli.log_json);
    if let Err(e) = packbench_telemetry::init_with_config(telemetry) {
        Status::warning(&e.to_string());
    }

    let code = match run(&cli) {
        Ok(code) => code,
        Err(e) => {
            let code = e
                .downcast_ref::<packbench_core::Error>()
                .map(|e| e.code.exit_code())
                .unwrap_or(exit_codes::FAILURE);
            Status::error(&e.to_string());
            code
        }
    };

    exit_code(code)
}

fn exit_code(code: i32) -> ExitCode {
    ExitCode::from(u8::try_from(code).unwrap_or(1))
}

fn run(cli: &Cli) -> Result<i32> {
    let config = Config::load(cli.config.as_deref())?;
    let settings = RunSettings::resolve(cli, &config.schema);

    let input = read_input(&cli.file)?;
    info!(file = %cli.file.display(), bytes = input.len(), "loaded input");

    let codecs = Codecs::new(config.schema.codecs.settings());
    let mut workspace = Workspace::allocate(input, &codecs)?;
    let benchmark = Benchmark::new(&codecs, settings.options);
    let source = cli.file.display().to_string();
    let stdout = io::stdout().lock();

    let report = match settings.format {
        OutputFormat::Text => {
            let mut reporter = TextReporter::new(stdout, source).with_color(settings.color);
            reporter.banner(codecs.version(), workspace.total_bytes())?;

            let mut written = Ok(());
            let report = benchmark.run_with(&mut workspace, |algorithm| {
                if written.is_ok() {
                    written = reporter.algorithm(algorithm);
                }
            });
            written?;
            reporter.summary(&report)?;
            report
        }
        OutputFormat::Json => {
            let report = benchmark.run(&mut workspace);
            write_json(stdout, &report, &source)?;
            report
        }
    };

    if report.is_success() {
        Ok(exit_codes::SUCCESS)
    } else {
        Status::warning(&format!(
            "{} of {} algorithms failed",
            report.failed(),
            report.algorithms.len()
        ));
        Ok(exit_codes::BENCH_FAILURES)
    }
}

fn read_input(path: &Path) -> packbench_core::Result<Vec<u8>> {
    std::fs::read(path).map_err(|e| match e.kind() {
        io::ErrorKind::NotFound => Error::file_not_found(path),
        io::ErrorKind::PermissionDenied => Error::new(
            ErrorCode::PermissionDenied,
            format!("Permission denied: {}", path.display()),
        )
        .with_source(e),
        _ => Error::io(format!("Cannot read {}", path.display())).with_source(e),
    })
}
