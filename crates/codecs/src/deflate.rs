//! Raw deflate implementation over caller-supplied slices.

use crate::codec::BlockCodec;
use crate::{CodecError, Result};
use flate2::{Compress, Compression, Decompress, FlushCompress, FlushDecompress, Status};

const NAME: &str = "deflate";

/// Deflate codec without zlib or gzip wrapping.
#[derive(Debug, Clone, Copy)]
pub struct DeflateCodec {
    level: Compression,
}

impl DeflateCodec {
    /// Create a deflate codec.
    ///
    /// # Arguments
    /// * `level` - Compression level (0-9, clamped)
    pub fn new(level: u32) -> Self {
        Self {
            level: Compression::new(level.min(9)),
        }
    }
}

impl Default for DeflateCodec {
    fn default() -> Self {
        Self::new(6)
    }
}

impl BlockCodec for DeflateCodec {
    /// zlib's `deflateBound` for raw streams, plus slack for the final
    /// empty stored block some encoders emit.
    fn max_encoded_len(&self, input_len: usize) -> Option<usize> {
        input_len
            .checked_add(input_len.checked_add(7)? >> 3)?
            .checked_add(input_len.checked_add(63)? >> 6)?
            .checked_add(64)
    }

    fn encode(&self, src: &[u8], dst: &mut [u8]) -> Result<usize> {
        let mut stream = Compress::new(self.level, false);
        loop {
            let read = stream.total_in() as usize;
            let written = stream.total_out() as usize;
            let status = stream
                .compress(&src[read..], &mut dst[written..], FlushCompress::Finish)
                .map_err(|e| CodecError::CompressionFailed {
                    codec: NAME,
                    message: e.to_string(),
                })?;

            if status == Status::StreamEnd {
                return Ok(stream.total_out() as usize);
            }
            if stream.total_in() as usize == read && stream.total_out() as usize == written {
                return Err(CodecError::OutputTooSmall {
                    capacity: dst.len(),
                });
            }
        }
    }

    fn decode(&self, src: &[u8], dst: &mut [u8]) -> Result<usize> {
        let mut stream = Decompress::new(false);
        loop {
            let read = stream.total_in() as usize;
            let written = stream.total_out() as usize;
            let status = stream
                .decompress(&src[read..], &mut dst[written..], FlushDecompress::Finish)
                .map_err(|e| CodecError::CorruptInput(format!("{NAME}: {e}")))?;

            if status == Status::StreamEnd {
                return Ok(stream.total_out() as usize);
            }
            if stream.total_in() as usize == read && stream.total_out() as usize == written {
                // Stalled: either the output is full or the stream ended early.
                return if written == dst.len() {
                    Err(CodecError::OutputTooSmall {
                        capacity: dst.len(),
                    })
                } else {
                    Err(CodecError::CorruptInput(format!("{NAME}: truncated stream")))
                };
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn roundtrip(codec: &DeflateCodec, original: &[u8]) -> Vec<u8> {
        let mut compressed = vec![0u8; codec.max_encoded_len(original.len()).unwrap()];
        let n = codec.encode(original, &mut compressed).unwrap();
        let mut decompressed = vec![0u8; original.len()];
        let m = codec.decode(&compressed[..n], &mut decompressed).unwrap();
        assert_eq!(m, original.len());
        decompressed
    }

    #[test]
    fn test_deflate_roundtrip() {
        let original = b"Hello, Deflate! Hello, Deflate! Hello, Deflate!";
        let codec = DeflateCodec::default();
        assert_eq!(roundtrip(&codec, original), original);
    }

    #[test]
    fn test_level_zero_roundtrip() {
        let original: Vec<u8> = (0..5000u32).map(|i| (i * 31 % 251) as u8).collect();
        let codec = DeflateCodec::new(0);
        assert_eq!(roundtrip(&codec, &original), original);
    }

    #[test]
    fn test_encode_into_tiny_buffer_fails() {
        let original = vec![7u8; 4096];
        let mut tiny = [0u8; 2];
        let err = DeflateCodec::default().encode(&original, &mut tiny).unwrap_err();
        assert!(matches!(err, CodecError::OutputTooSmall { capacity: 2 }));
    }

    #[test]
    fn test_decode_truncated_stream_fails() {
        let original: Vec<u8> = (0..2000u32).map(|i| (i % 97) as u8).collect();
        let codec = DeflateCodec::default();
        let mut compressed = vec![0u8; codec.max_encoded_len(original.len()).unwrap()];
        let n = codec.encode(&original, &mut compressed).unwrap();
        let mut out = vec![0u8; original.len()];
        assert!(codec.decode(&compressed[..n / 2], &mut out).is_err());
    }
}
