//! The block codec seam and codec settings.

use crate::Result;

/// One algorithm family operating on caller-supplied slices.
///
/// Implementations never allocate their output: `encode` and `decode` write
/// into `dst` and return the number of bytes produced, failing with
/// [`CodecError::OutputTooSmall`](crate::CodecError::OutputTooSmall) when
/// `dst` cannot hold the result.
pub trait BlockCodec {
    /// Worst-case encoded size for `input_len` bytes, or `None` on overflow.
    fn max_encoded_len(&self, input_len: usize) -> Option<usize>;

    /// Compress all of `src` into `dst`.
    fn encode(&self, src: &[u8], dst: &mut [u8]) -> Result<usize>;

    /// Decompress all of `src` into `dst`.
    ///
    /// A stream that fills `dst` before it ends is reported as
    /// `OutputTooSmall`. The frame layer sizes `dst` from the declared
    /// length and reclassifies that case as corrupt input.
    fn decode(&self, src: &[u8], dst: &mut [u8]) -> Result<usize>;
}

/// Tunables for the bundled codecs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CodecSettings {
    /// Deflate level (0-9)
    pub deflate_level: u32,
    /// Brotli quality (0-11)
    pub brotli_quality: u32,
    /// Brotli window bits (10-24)
    pub brotli_window: u32,
}

impl Default for CodecSettings {
    fn default() -> Self {
        Self {
            deflate_level: 6,
            brotli_quality: 9,
            brotli_window: 22,
        }
    }
}
