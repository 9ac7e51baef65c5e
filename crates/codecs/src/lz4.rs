//! LZ4 block implementation.

use crate::codec::BlockCodec;
use crate::{CodecError, Result};
use lz4_flex::block::{self, CompressError, DecompressError};

/// LZ4 block codec. Has no tunables.
#[derive(Debug, Clone, Copy, Default)]
pub struct Lz4Codec;

impl BlockCodec for Lz4Codec {
    fn max_encoded_len(&self, input_len: usize) -> Option<usize> {
        // get_maximum_output_size goes through f64 and is exact enough below 2^52.
        if input_len > (1usize << 52) {
            return None;
        }
        Some(block::get_maximum_output_size(input_len))
    }

    fn encode(&self, src: &[u8], dst: &mut [u8]) -> Result<usize> {
        block::compress_into(src, dst).map_err(|e| match e {
            CompressError::OutputTooSmall => CodecError::OutputTooSmall {
                capacity: dst.len(),
            },
            other => CodecError::CompressionFailed {
                codec: "lz4",
                message: other.to_string(),
            },
        })
    }

    fn decode(&self, src: &[u8], dst: &mut [u8]) -> Result<usize> {
        block::decompress_into(src, dst).map_err(|e| match e {
            DecompressError::OutputTooSmall { .. } => CodecError::OutputTooSmall {
                capacity: dst.len(),
            },
            other => CodecError::CorruptInput(format!("lz4: {other}")),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lz4_roundtrip() {
        let original = "Hello, LZ4! ".repeat(50);
        let codec = Lz4Codec;
        let mut compressed = vec![0u8; codec.max_encoded_len(original.len()).unwrap()];
        let n = codec.encode(original.as_bytes(), &mut compressed).unwrap();
        assert!(n < original.len());

        let mut decompressed = vec![0u8; original.len()];
        let m = codec.decode(&compressed[..n], &mut decompressed).unwrap();
        assert_eq!(&decompressed[..m], original.as_bytes());
    }

    #[test]
    fn test_decode_into_short_buffer_fails() {
        let original = vec![1u8; 1024];
        let codec = Lz4Codec;
        let mut compressed = vec![0u8; codec.max_encoded_len(original.len()).unwrap()];
        let n = codec.encode(&original, &mut compressed).unwrap();

        let mut short = vec![0u8; 100];
        let err = codec.decode(&compressed[..n], &mut short).unwrap_err();
        assert!(matches!(err, CodecError::OutputTooSmall { capacity: 100 }));
    }
}
