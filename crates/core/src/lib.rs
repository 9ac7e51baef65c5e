//! Benchmark orchestration for packbench
//!
//! This crate drives a [`CodecProvider`](packbench_codecs::CodecProvider)
//! over an in-memory input and measures every algorithm it offers:
//!
//! - **Buffers**: one [`Workspace`](buffer::Workspace) sized once per run
//! - **Timing**: process CPU time through the [`Clock`](clock::Clock) seam
//! - **Benchmark loop**: a fold over the selected algorithms producing one report each
//! - **Verification**: byte-for-byte round-trip comparison
//! - **Configuration**: TOML-based configuration with validation
//! - **Error handling**: fatal errors with codes, context, and recovery suggestions
//!
//! # Example
//!
//! ```rust,no_run
//! use packbench_codecs::Codecs;
//! use packbench_core::prelude::*;
//!
//! let codecs = Codecs::default();
//! let input = std::fs::read("corpus.bin")?;
//! let mut workspace = Workspace::allocate(input, &codecs)?;
//!
//! let report = Benchmark::new(&codecs, BenchOptions::default()).run(&mut workspace);
//! println!("{} of {} algorithms passed", report.passed(), report.algorithms.len());
//! # Ok::<(), packbench_core::Error>(())
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![allow(clippy::module_name_repetitions)]

pub mod bench;
pub mod buffer;
pub mod clock;
pub mod config;
pub mod error;
pub mod metrics;
pub mod range;
pub mod verify;

pub use error::{Error, ErrorCode, Result, ResultExt};

/// Re-export commonly used types
pub mod prelude {
    pub use crate::bench::{
        AlgorithmReport, BenchOptions, BenchReport, Benchmark, Failure, Outcome, Phase, PhaseStats,
    };
    pub use crate::buffer::{Buffer, Workspace};
    pub use crate::clock::{Clock, ProcessCpuClock};
    pub use crate::config::{Config, ConfigSchema, OutputFormat};
    pub use crate::error::{exit_codes, Error, ErrorCode, Result, ResultExt};
    pub use crate::metrics::Throughput;
    pub use crate::range::AlgorithmRange;
    pub use crate::verify::{verify, Verification};
}
