//! Outcome record of a single compress or decompress call.

use std::fmt;

/// Status of a provider call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProcessingState {
    /// The call completed
    Success,
    /// Destination capacity was insufficient
    OutputTooSmall,
    /// Compressed stream is malformed or truncated
    CorruptInput,
    /// Frame names an algorithm the provider does not implement
    UnknownAlgorithm,
    /// The codec itself reported an error
    CodecFailure,
}

impl ProcessingState {
    /// Stable numeric code, `0` for success.
    pub fn code(self) -> u8 {
        match self {
            ProcessingState::Success => 0,
            ProcessingState::OutputTooSmall => 1,
            ProcessingState::CorruptInput => 2,
            ProcessingState::UnknownAlgorithm => 3,
            ProcessingState::CodecFailure => 4,
        }
    }

    /// Whether the call succeeded.
    pub fn is_success(self) -> bool {
        self == ProcessingState::Success
    }

    /// Short description for reports.
    pub fn description(self) -> &'static str {
        match self {
            ProcessingState::Success => "success",
            ProcessingState::OutputTooSmall => "output buffer too small",
            ProcessingState::CorruptInput => "corrupt input",
            ProcessingState::UnknownAlgorithm => "unknown algorithm",
            ProcessingState::CodecFailure => "codec failure",
        }
    }
}

impl fmt::Display for ProcessingState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (state {})", self.description(), self.code())
    }
}

/// Result record returned by [`CodecProvider::compress`](crate::CodecProvider::compress)
/// and [`CodecProvider::decompress`](crate::CodecProvider::decompress).
///
/// On success `bytes_read` covers the whole source and `bytes_written` never
/// exceeds the destination capacity. Failed calls report zero for both.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProcessingResult {
    pub state: ProcessingState,
    pub bytes_read: u64,
    pub bytes_written: u64,
}

impl ProcessingResult {
    /// A successful call.
    pub fn success(bytes_read: u64, bytes_written: u64) -> Self {
        Self {
            state: ProcessingState::Success,
            bytes_read,
            bytes_written,
        }
    }

    /// A failed call.
    pub fn failure(state: ProcessingState) -> Self {
        Self {
            state,
            bytes_read: 0,
            bytes_written: 0,
        }
    }

    pub fn is_success(&self) -> bool {
        self.state.is_success()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_success_code_is_zero() {
        assert_eq!(ProcessingState::Success.code(), 0);
        assert!(ProcessingResult::success(10, 4).is_success());
    }

    #[test]
    fn test_failure_zeroes_counts() {
        let result = ProcessingResult::failure(ProcessingState::CorruptInput);
        assert!(!result.is_success());
        assert_eq!(result.bytes_read, 0);
        assert_eq!(result.bytes_written, 0);
        assert_eq!(result.state.to_string(), "corrupt input (state 2)");
    }
}
