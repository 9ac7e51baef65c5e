//! The benchmark loop.
//!
//! A run is a fold over the selected algorithms. Each iteration compresses
//! the loaded input into the shared output buffer, optionally decompresses
//! it back and verifies the round trip, and yields one [`AlgorithmReport`].
//! Provider failures and mismatches become [`Outcome::Failed`] for that
//! algorithm only; the loop always moves on to the next one.

use crate::buffer::{Buffer, Workspace};
use crate::clock::{Clock, ProcessCpuClock};
use crate::metrics::{ratio, Throughput};
use crate::range::AlgorithmRange;
use crate::verify::{verify, Verification};
use packbench_codecs::{Algorithm, CodecProvider, ProcessingState, Version};
use std::fmt;
use std::time::Duration;
use tracing::{debug_span, info, warn};

/// What to run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct BenchOptions {
    /// Algorithms to benchmark, in ascending order
    pub range: AlgorithmRange,
    /// Skip decompression and verification
    pub compression_only: bool,
}

/// Which provider call a measurement or failure belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// `CodecProvider::compress`
    Compress,
    /// `CodecProvider::decompress`
    Decompress,
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Phase::Compress => f.write_str("compression"),
            Phase::Decompress => f.write_str("decompression"),
        }
    }
}

/// Measurement of one successful phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PhaseStats {
    /// Bytes handed to the provider
    pub input_bytes: u64,
    /// Bytes the provider produced
    pub output_bytes: u64,
    /// Size of the original input, the basis for throughput
    pub uncompressed_bytes: u64,
    /// CPU time spent in the call
    pub elapsed: Duration,
}

impl PhaseStats {
    /// Uncompressed bytes per unit of CPU time.
    pub fn throughput(&self) -> Throughput {
        Throughput::compute(self.uncompressed_bytes, self.elapsed)
    }
}

/// Why an algorithm failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Failure {
    /// The provider reported a non-success state while compressing
    Compress(ProcessingState),
    /// The provider reported a non-success state while decompressing
    Decompress(ProcessingState),
    /// The provider claimed to write more than the destination holds
    Overrun {
        /// Call that overran
        phase: Phase,
        /// Bytes the provider claimed
        written: u64,
        /// Capacity of the destination
        capacity: u64,
    },
    /// The round trip differs from the input
    Mismatch {
        /// First differing byte
        offset: usize,
    },
}

impl fmt::Display for Failure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Failure::Compress(state) => write!(f, "compression failed: {}", state),
            Failure::Decompress(state) => write!(f, "decompression failed: {}", state),
            Failure::Overrun {
                phase,
                written,
                capacity,
            } => write!(
                f,
                "{} reported {} bytes written into a {} byte buffer",
                phase, written, capacity
            ),
            Failure::Mismatch { offset } => write!(
                f,
                "decompressed data differs from the original at byte {}",
                offset
            ),
        }
    }
}

/// Result of one iteration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// Compressed, decompressed and verified
    Passed,
    /// Compressed in compression-only mode
    CompressedOnly,
    /// Stopped at an operational failure
    Failed(Failure),
}

impl Outcome {
    /// Anything but [`Outcome::Failed`].
    pub fn is_success(&self) -> bool {
        !matches!(self, Outcome::Failed(_))
    }
}

/// Everything measured for one algorithm.
#[derive(Debug, Clone, PartialEq)]
pub struct AlgorithmReport {
    /// Algorithm measured
    pub algorithm: Algorithm,
    /// Present when compression succeeded
    pub compression: Option<PhaseStats>,
    /// Present when decompression ran and succeeded
    pub decompression: Option<PhaseStats>,
    /// How the iteration ended
    pub outcome: Outcome,
}

impl AlgorithmReport {
    fn failed(algorithm: Algorithm, failure: Failure) -> Self {
        Self {
            algorithm,
            compression: None,
            decompression: None,
            outcome: Outcome::Failed(failure),
        }
    }

    /// Compressed over uncompressed size, when compression succeeded on a
    /// non-empty input.
    pub fn ratio(&self) -> Option<f64> {
        self.compression
            .and_then(|c| ratio(c.output_bytes, c.uncompressed_bytes))
    }

    /// The verification result, when verification ran.
    pub fn verification(&self) -> Option<Verification> {
        match self.outcome {
            Outcome::Passed => Some(Verification::Match),
            Outcome::Failed(Failure::Mismatch { offset }) => {
                Some(Verification::Mismatch { offset })
            }
            _ => None,
        }
    }

    /// Whether the iteration ended without an operational failure.
    pub fn is_success(&self) -> bool {
        self.outcome.is_success()
    }
}

/// Results of a whole run.
#[derive(Debug, Clone, PartialEq)]
pub struct BenchReport {
    /// Version reported by the provider
    pub provider_version: Version,
    /// Size of the loaded input
    pub input_bytes: u64,
    /// Output and round-trip buffer capacity
    pub workspace_bytes: u64,
    /// Whether decompression was skipped
    pub compression_only: bool,
    /// One report per algorithm, in run order
    pub algorithms: Vec<AlgorithmReport>,
}

impl BenchReport {
    /// Algorithms that completed without failure.
    pub fn passed(&self) -> usize {
        self.algorithms.iter().filter(|r| r.is_success()).count()
    }

    /// Algorithms that hit an operational failure.
    pub fn failed(&self) -> usize {
        self.algorithms.len() - self.passed()
    }

    /// True when no algorithm failed.
    pub fn is_success(&self) -> bool {
        self.failed() == 0
    }
}

/// Drives a [`CodecProvider`] over a [`Workspace`].
pub struct Benchmark<'p, P: ?Sized, C = ProcessCpuClock> {
    provider: &'p P,
    clock: C,
    options: BenchOptions,
}

impl<'p, P> Benchmark<'p, P>
where
    P: CodecProvider + ?Sized,
{
    /// Benchmark timed with process CPU time.
    pub fn new(provider: &'p P, options: BenchOptions) -> Self {
        Self {
            provider,
            clock: ProcessCpuClock,
            options,
        }
    }
}

impl<'p, P, C> Benchmark<'p, P, C>
where
    P: CodecProvider + ?Sized,
    C: Clock,
{
    /// Replace the time source.
    pub fn with_clock<C2: Clock>(self, clock: C2) -> Benchmark<'p, P, C2> {
        Benchmark {
            provider: self.provider,
            clock,
            options: self.options,
        }
    }

    /// Run every selected algorithm.
    pub fn run(&self, workspace: &mut Workspace) -> BenchReport {
        self.run_with(workspace, |_| {})
    }

    /// Run every selected algorithm, handing each report to `on_report` as
    /// soon as it is complete.
    pub fn run_with<F>(&self, workspace: &mut Workspace, mut on_report: F) -> BenchReport
    where
        F: FnMut(&AlgorithmReport),
    {
        info!(
            algorithms = self.options.range.len(),
            input_bytes = workspace.input.len(),
            compression_only = self.options.compression_only,
            "starting benchmark"
        );

        let algorithms = self
            .options
            .range
            .iter()
            .map(|algorithm| {
                let report = self.run_algorithm(algorithm, workspace);
                on_report(&report);
                report
            })
            .collect();

        BenchReport {
            provider_version: self.provider.version(),
            input_bytes: workspace.input.len() as u64,
            workspace_bytes: workspace.total_bytes(),
            compression_only: self.options.compression_only,
            algorithms,
        }
    }

    fn run_algorithm(&self, algorithm: Algorithm, workspace: &mut Workspace) -> AlgorithmReport {
        let _span = debug_span!("algorithm", name = %algorithm).entered();
        let Workspace {
            input,
            output,
            decompressed,
        } = workspace;
        output.clear();
        decompressed.clear();

        let uncompressed = input.len() as u64;
        let src = input.as_slice();

        let (result, elapsed) = {
            let dst = output.as_mut_capacity();
            self.clock
                .measure(|| self.provider.compress(src, dst, algorithm))
        };
        if !result.is_success() {
            warn!(algorithm = %algorithm, state = %result.state, "compression failed");
            return AlgorithmReport::failed(algorithm, Failure::Compress(result.state));
        }
        if !commit(output, result.bytes_written) {
            return AlgorithmReport::failed(
                algorithm,
                overrun(Phase::Compress, result.bytes_written, output),
            );
        }

        let compression = PhaseStats {
            input_bytes: uncompressed,
            output_bytes: result.bytes_written,
            uncompressed_bytes: uncompressed,
            elapsed,
        };
        info!(
            algorithm = %algorithm,
            compressed_bytes = compression.output_bytes,
            elapsed_us = elapsed.as_micros() as u64,
            "compressed"
        );

        let mut report = AlgorithmReport {
            algorithm,
            compression: Some(compression),
            decompression: None,
            outcome: Outcome::CompressedOnly,
        };
        if self.options.compression_only {
            return report;
        }

        let (result, elapsed) = {
            let frame = output.as_slice();
            let dst = decompressed.as_mut_capacity();
            self.clock.measure(|| self.provider.decompress(frame, dst))
        };
        if !result.is_success() {
            warn!(algorithm = %algorithm, state = %result.state, "decompression failed");
            report.outcome = Outcome::Failed(Failure::Decompress(result.state));
            return report;
        }
        if !commit(decompressed, result.bytes_written) {
            report.outcome =
                Outcome::Failed(overrun(Phase::Decompress, result.bytes_written, decompressed));
            return report;
        }

        report.decompression = Some(PhaseStats {
            input_bytes: compression.output_bytes,
            output_bytes: result.bytes_written,
            uncompressed_bytes: uncompressed,
            elapsed,
        });

        report.outcome = match verify(src, decompressed.as_slice()) {
            Verification::Match => Outcome::Passed,
            Verification::Mismatch { offset } => {
                warn!(algorithm = %algorithm, offset, "round trip mismatch");
                Outcome::Failed(Failure::Mismatch { offset })
            }
        };
        report
    }
}

/// Record `written` as the buffer's logical length, rejecting lengths past
/// its capacity.
fn commit(buffer: &mut Buffer, written: u64) -> bool {
    usize::try_from(written).is_ok_and(|len| buffer.set_len(len))
}

fn overrun(phase: Phase, written: u64, buffer: &Buffer) -> Failure {
    warn!(%phase, written, capacity = buffer.capacity(), "provider overran its buffer");
    Failure::Overrun {
        phase,
        written,
        capacity: buffer.capacity() as u64,
    }
}
