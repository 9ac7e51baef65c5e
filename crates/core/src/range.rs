//! Contiguous algorithm selection.

use crate::error::{Error, Result};
use packbench_codecs::Algorithm;

/// Inclusive range of algorithms to benchmark.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AlgorithmRange {
    start: Algorithm,
    end: Algorithm,
}

impl AlgorithmRange {
    /// Range from `start` to `end`, both included.
    pub fn new(start: Algorithm, end: Algorithm) -> Result<Self> {
        if start > end {
            return Err(Error::invalid_range(start.id(), end.id()));
        }
        Ok(Self { start, end })
    }

    /// Every known algorithm.
    pub fn all() -> Self {
        Self {
            start: Algorithm::FIRST,
            end: Algorithm::LAST,
        }
    }

    /// Exactly one algorithm.
    pub fn single(algorithm: Algorithm) -> Self {
        Self {
            start: algorithm,
            end: algorithm,
        }
    }

    /// `single` when a level is given, `all` otherwise.
    pub fn from_level(level: Option<Algorithm>) -> Self {
        level.map_or_else(Self::all, Self::single)
    }

    /// First algorithm.
    pub fn start(&self) -> Algorithm {
        self.start
    }

    /// Last algorithm, included.
    pub fn end(&self) -> Algorithm {
        self.end
    }

    /// Number of algorithms in the range.
    pub fn len(&self) -> usize {
        usize::from(self.end.id() - self.start.id()) + 1
    }

    /// Always false: a range holds at least one algorithm.
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Algorithms in ascending id order.
    pub fn iter(&self) -> impl Iterator<Item = Algorithm> + use<> {
        let end = self.end;
        std::iter::successors(Some(self.start), move |a| a.next().filter(|n| *n <= end))
    }
}

impl Default for AlgorithmRange {
    fn default() -> Self {
        Self::all()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ErrorCode;

    #[test]
    fn test_all_is_ascending_and_complete() {
        let algorithms: Vec<_> = AlgorithmRange::all().iter().collect();
        assert_eq!(algorithms, Algorithm::ALL.to_vec());
        assert_eq!(AlgorithmRange::all().len(), Algorithm::ALL.len());
    }

    #[test]
    fn test_single_yields_one() {
        for algorithm in Algorithm::ALL {
            let range = AlgorithmRange::single(algorithm);
            assert_eq!(range.iter().collect::<Vec<_>>(), vec![algorithm]);
            assert_eq!(range.len(), 1);
        }
    }

    #[test]
    fn test_sub_range() {
        let range = AlgorithmRange::new(Algorithm::Deflate, Algorithm::Brotli).unwrap();
        assert_eq!(
            range.iter().collect::<Vec<_>>(),
            vec![Algorithm::Deflate, Algorithm::Brotli]
        );
    }

    #[test]
    fn test_reversed_range_rejected() {
        let err = AlgorithmRange::new(Algorithm::Brotli, Algorithm::Lz4).unwrap_err();
        assert_eq!(err.code, ErrorCode::InvalidRange);
    }

    #[test]
    fn test_from_level() {
        assert_eq!(AlgorithmRange::from_level(None), AlgorithmRange::all());
        assert_eq!(
            AlgorithmRange::from_level(Some(Algorithm::Lz4)),
            AlgorithmRange::single(Algorithm::Lz4)
        );
    }
}
