//! Self-describing frame header.
//!
//! Every compressed stream starts with the algorithm id followed by the
//! original length as a little-endian `u64`. Decompression reads the
//! algorithm from here instead of taking it as a parameter.

use crate::{Algorithm, CodecError, Result};

/// Encoded header size in bytes.
pub const HEADER_LEN: usize = 1 + 8;

/// Decoded frame header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameHeader {
    pub algorithm: Algorithm,
    pub original_len: u64,
}

impl FrameHeader {
    /// Write the header at the start of `dst`, returning its length.
    pub fn write(&self, dst: &mut [u8]) -> Result<usize> {
        if dst.len() < HEADER_LEN {
            return Err(CodecError::OutputTooSmall {
                capacity: dst.len(),
            });
        }
        dst[0] = self.algorithm.id();
        dst[1..HEADER_LEN].copy_from_slice(&self.original_len.to_le_bytes());
        Ok(HEADER_LEN)
    }

    /// Parse the header at the start of `src`.
    pub fn read(src: &[u8]) -> Result<Self> {
        if src.len() < HEADER_LEN {
            return Err(CodecError::CorruptInput(format!(
                "frame of {} bytes is shorter than its {} byte header",
                src.len(),
                HEADER_LEN
            )));
        }
        let algorithm = Algorithm::from_id(src[0]).ok_or(CodecError::UnknownAlgorithm(src[0]))?;
        let mut len = [0u8; 8];
        len.copy_from_slice(&src[1..HEADER_LEN]);
        Ok(Self {
            algorithm,
            original_len: u64::from_le_bytes(len),
        })
    }
}
