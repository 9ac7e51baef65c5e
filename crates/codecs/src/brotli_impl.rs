//! Brotli compression implementation.

use crate::codec::BlockCodec;
use crate::{CodecError, Result};
use brotli::enc::BrotliEncoderParams;
use std::io;

const NAME: &str = "brotli";

/// Brotli codec writing straight into the destination slice.
#[derive(Debug, Clone, Copy)]
pub struct BrotliCodec {
    quality: u32,
    window: u32,
}

impl BrotliCodec {
    /// Create a brotli codec.
    ///
    /// # Arguments
    /// * `quality` - Compression quality (0-11, clamped)
    /// * `window` - Window size in bits (10-24, clamped)
    pub fn new(quality: u32, window: u32) -> Self {
        Self {
            quality: quality.min(11),
            window: window.clamp(10, 24),
        }
    }

    fn params(&self, size_hint: usize) -> BrotliEncoderParams {
        BrotliEncoderParams {
            quality: self.quality as i32,
            lgwin: self.window as i32,
            size_hint,
            ..Default::default()
        }
    }
}

impl Default for BrotliCodec {
    fn default() -> Self {
        Self::new(9, 22)
    }
}

/// Translate a writer error into a codec error, blaming the destination
/// when it has been filled completely.
fn write_error(err: io::Error, remaining: usize, capacity: usize, decoding: bool) -> CodecError {
    if remaining == 0 {
        CodecError::OutputTooSmall { capacity }
    } else if decoding {
        CodecError::CorruptInput(format!("{NAME}: {err}"))
    } else {
        CodecError::CompressionFailed {
            codec: NAME,
            message: err.to_string(),
        }
    }
}

impl BlockCodec for BrotliCodec {
    /// `BrotliEncoderMaxCompressedSize` with extra slack per window.
    fn max_encoded_len(&self, input_len: usize) -> Option<usize> {
        let large_blocks = input_len >> 14;
        input_len
            .checked_add(large_blocks.checked_mul(4)?)?
            .checked_add(input_len >> 8)?
            .checked_add(64)
    }

    fn encode(&self, src: &[u8], dst: &mut [u8]) -> Result<usize> {
        let capacity = dst.len();
        let mut reader: &[u8] = src;
        let mut writer: &mut [u8] = dst;
        brotli::BrotliCompress(&mut reader, &mut writer, &self.params(src.len()))
            .map_err(|e| write_error(e, writer.len(), capacity, false))?;
        Ok(capacity - writer.len())
    }

    fn decode(&self, src: &[u8], dst: &mut [u8]) -> Result<usize> {
        let capacity = dst.len();
        let mut reader: &[u8] = src;
        let mut writer: &mut [u8] = dst;
        brotli::BrotliDecompress(&mut reader, &mut writer)
            .map_err(|e| write_error(e, writer.len(), capacity, true))?;
        Ok(capacity - writer.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_roundtrip() {
        let original = b"Hello, World! This is a test of Brotli compression.";
        let codec = BrotliCodec::default();
        let mut compressed = vec![0u8; codec.max_encoded_len(original.len()).unwrap()];
        let n = codec.encode(original, &mut compressed).unwrap();
        let mut decompressed = vec![0u8; original.len()];
        let m = codec.decode(&compressed[..n], &mut decompressed).unwrap();
        assert_eq!(&decompressed[..m], original.as_slice());
    }

    #[test]
    fn test_compression_ratio() {
        let data = "a".repeat(1000);
        let codec = BrotliCodec::new(11, 22);
        let mut compressed = vec![0u8; codec.max_encoded_len(data.len()).unwrap()];
        let n = codec.encode(data.as_bytes(), &mut compressed).unwrap();
        assert!(n < data.len() / 10);
    }

    #[test]
    fn test_settings_are_clamped() {
        let codec = BrotliCodec::new(99, 3);
        assert_eq!(codec.quality, 11);
        assert_eq!(codec.window, 10);
    }

    #[test]
    fn test_decode_truncated_stream_fails() {
        let original: Vec<u8> = (0..4000u32).map(|i| (i * 7 % 253) as u8).collect();
        let codec = BrotliCodec::default();
        let mut compressed = vec![0u8; codec.max_encoded_len(original.len()).unwrap()];
        let n = codec.encode(&original, &mut compressed).unwrap();
        let mut out = vec![0u8; original.len()];
        assert!(codec.decode(&compressed[..n / 2], &mut out).is_err());
    }
}
