//! Round-trip verification.

/// Result of comparing a round trip against the original input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verification {
    /// Byte-for-byte identical
    Match,
    /// Differs first at `offset`
    Mismatch {
        /// First differing byte
        offset: usize,
    },
}

impl Verification {
    /// True for [`Verification::Match`].
    pub fn is_match(&self) -> bool {
        matches!(self, Verification::Match)
    }
}

/// Compare `roundtrip` with `original`.
///
/// When the lengths differ the mismatch offset is the first byte past the
/// common prefix, which is at most the shorter length.
pub fn verify(original: &[u8], roundtrip: &[u8]) -> Verification {
    if original == roundtrip {
        return Verification::Match;
    }
    let offset = original
        .iter()
        .zip(roundtrip)
        .position(|(a, b)| a != b)
        .unwrap_or_else(|| original.len().min(roundtrip.len()));
    Verification::Mismatch { offset }
}
