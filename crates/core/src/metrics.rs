//! Derived metrics: compression ratio and throughput.
//!
//! Nothing here is stored; every value is computed from sizes and elapsed
//! time when a report asks for it. No function divides by zero.

use std::fmt;
use std::time::Duration;

const MIB: f64 = 1024.0 * 1024.0;

/// Processing rate of one phase.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Throughput {
    /// Mebibytes of uncompressed data per second
    MibPerSec(f64),
    /// Too fast to measure, or nothing to measure
    Unbounded,
}

impl Throughput {
    /// Rate for `uncompressed_bytes` processed in `elapsed`.
    ///
    /// An elapsed time below the clock's resolution, or an empty input,
    /// yields [`Throughput::Unbounded`].
    pub fn compute(uncompressed_bytes: u64, elapsed: Duration) -> Self {
        let secs = elapsed.as_secs_f64();
        if uncompressed_bytes == 0 || secs <= 0.0 {
            return Throughput::Unbounded;
        }
        Throughput::MibPerSec(uncompressed_bytes as f64 / secs / MIB)
    }

    /// Value in MiB/s, `None` when unbounded.
    pub fn mib_per_sec(&self) -> Option<f64> {
        match self {
            Throughput::MibPerSec(v) => Some(*v),
            Throughput::Unbounded => None,
        }
    }

    /// True for [`Throughput::Unbounded`].
    pub fn is_unbounded(&self) -> bool {
        matches!(self, Throughput::Unbounded)
    }
}

impl fmt::Display for Throughput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Throughput::MibPerSec(v) => write!(f, "{:.2} MiB/s", v),
            Throughput::Unbounded => f.write_str("unbounded"),
        }
    }
}

/// Compressed size over uncompressed size, `None` for an empty input.
pub fn ratio(compressed_bytes: u64, uncompressed_bytes: u64) -> Option<f64> {
    if uncompressed_bytes == 0 {
        return None;
    }
    Some(compressed_bytes as f64 / uncompressed_bytes as f64)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_throughput_mib() {
        let t = Throughput::compute(2 * 1024 * 1024, Duration::from_secs(1));
        assert_eq!(t.mib_per_sec(), Some(2.0));
        assert_eq!(t.to_string(), "2.00 MiB/s");
    }

    #[test]
    fn test_zero_elapsed_is_unbounded() {
        let t = Throughput::compute(1000, Duration::ZERO);
        assert!(t.is_unbounded());
        assert_eq!(t.to_string(), "unbounded");
    }

    #[test]
    fn test_empty_input_is_unbounded() {
        assert!(Throughput::compute(0, Duration::from_millis(3)).is_unbounded());
        assert!(Throughput::compute(0, Duration::ZERO).is_unbounded());
    }

    #[test]
    fn test_ratio() {
        assert_eq!(ratio(250, 1000), Some(0.25));
        assert_eq!(ratio(9, 0), None);
    }
}
