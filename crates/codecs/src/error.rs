//! Error types for the codec crate.

use crate::result::ProcessingState;
use thiserror::Error;

/// Result type alias for codec operations.
pub type Result<T> = std::result::Result<T, CodecError>;

/// Errors that can occur inside a block codec or the frame layer.
#[derive(Debug, Error)]
pub enum CodecError {
    /// Compression failed
    #[error("{codec} compression failed: {message}")]
    CompressionFailed {
        /// Codec that failed
        codec: &'static str,
        /// Underlying cause
        message: String,
    },

    /// Destination slice cannot hold the output
    #[error("output buffer too small: capacity {capacity} bytes")]
    OutputTooSmall {
        /// Capacity of the destination slice
        capacity: usize,
    },

    /// Frame header or payload is malformed
    #[error("corrupt input: {0}")]
    CorruptInput(String),

    /// Frame header names an algorithm this build does not know
    #[error("unknown algorithm id {0}")]
    UnknownAlgorithm(u8),

    /// Worst-case size does not fit the platform's address space
    #[error("size bound overflows for input of {0} bytes")]
    SizeOverflow(u64),
}

impl CodecError {
    /// Map the error to the status reported in a [`ProcessingResult`](crate::ProcessingResult).
    pub fn state(&self) -> ProcessingState {
        match self {
            CodecError::OutputTooSmall { .. } => ProcessingState::OutputTooSmall,
            CodecError::CorruptInput(_) => ProcessingState::CorruptInput,
            CodecError::UnknownAlgorithm(_) => ProcessingState::UnknownAlgorithm,
            CodecError::CompressionFailed { .. }
            | CodecError::SizeOverflow(_) => ProcessingState::CodecFailure,
        }
    }
}
