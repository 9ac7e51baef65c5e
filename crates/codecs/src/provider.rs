//! The codec provider driven by the benchmark.

use crate::brotli_impl::BrotliCodec;
use crate::codec::{BlockCodec, CodecSettings};
use crate::deflate::DeflateCodec;
use crate::frame::{FrameHeader, HEADER_LEN};
use crate::lz4::Lz4Codec;
use crate::{Algorithm, CodecError, ProcessingResult, Result};
use std::fmt;
use tracing::debug;

/// Provider version, reported once at startup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Version {
    pub major: u16,
    pub minor: u16,
    pub patch: u16,
}

impl Version {
    /// Version of this crate.
    pub fn current() -> Self {
        Self {
            major: env!("CARGO_PKG_VERSION_MAJOR").parse().unwrap_or(0),
            minor: env!("CARGO_PKG_VERSION_MINOR").parse().unwrap_or(0),
            patch: env!("CARGO_PKG_VERSION_PATCH").parse().unwrap_or(0),
        }
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.patch)
    }
}

/// Capability interface the benchmark drives.
///
/// `compress` and `decompress` report failures through the returned
/// [`ProcessingResult`] rather than an error: a failing algorithm is an
/// outcome to measure, not a reason to stop.
pub trait CodecProvider {
    /// Provider version.
    fn version(&self) -> Version;

    /// Upper bound on the compressed size of `input_len` bytes, valid for
    /// every algorithm the provider supports.
    fn max_compressed_size(&self, input_len: u64) -> Result<u64>;

    /// Destination capacity needed to decompress a stream whose original
    /// length is `expected_len`.
    fn max_decompressed_size(&self, expected_len: u64) -> Result<u64>;

    /// Compress `src` into `dst` with `algorithm`.
    fn compress(&self, src: &[u8], dst: &mut [u8], algorithm: Algorithm) -> ProcessingResult;

    /// Decompress the frame in `src` into `dst`.
    fn decompress(&self, src: &[u8], dst: &mut [u8]) -> ProcessingResult;
}

/// The bundled provider: LZ4, deflate and brotli behind one frame format.
#[derive(Debug, Clone)]
pub struct Codecs {
    lz4: Lz4Codec,
    deflate: DeflateCodec,
    brotli: BrotliCodec,
}

impl Codecs {
    /// Build the provider from settings.
    pub fn new(settings: CodecSettings) -> Self {
        Self {
            lz4: Lz4Codec,
            deflate: DeflateCodec::new(settings.deflate_level),
            brotli: BrotliCodec::new(settings.brotli_quality, settings.brotli_window),
        }
    }

    /// The codec behind `algorithm`.
    pub fn codec(&self, algorithm: Algorithm) -> &dyn BlockCodec {
        match algorithm {
            Algorithm::Lz4 => &self.lz4,
            Algorithm::Deflate => &self.deflate,
            Algorithm::Brotli => &self.brotli,
        }
    }

    fn try_compress(&self, src: &[u8], dst: &mut [u8], algorithm: Algorithm) -> Result<usize> {
        let header = FrameHeader {
            algorithm,
            original_len: src.len() as u64,
        };
        let header_len = header.write(dst)?;
        if src.is_empty() {
            return Ok(header_len);
        }
        let payload = self.codec(algorithm).encode(src, &mut dst[header_len..])?;
        Ok(header_len + payload)
    }

    fn try_decompress(&self, src: &[u8], dst: &mut [u8]) -> Result<usize> {
        let header = FrameHeader::read(src)?;
        let payload = &src[HEADER_LEN..];
        let expected = usize::try_from(header.original_len)
            .map_err(|_| CodecError::SizeOverflow(header.original_len))?;
        if expected > dst.len() {
            return Err(CodecError::OutputTooSmall {
                capacity: dst.len(),
            });
        }
        if expected == 0 {
            return if payload.is_empty() {
                Ok(0)
            } else {
                Err(CodecError::CorruptInput(
                    "payload present in an empty frame".to_string(),
                ))
            };
        }

        // `dst` is already known to be large enough, so a full slice means
        // the header understates the payload.
        let produced = self
            .codec(header.algorithm)
            .decode(payload, &mut dst[..expected])
            .map_err(|e| match e {
                CodecError::OutputTooSmall { .. } => CodecError::CorruptInput(format!(
                    "frame declares {} bytes but payload decodes to more",
                    expected
                )),
                other => other,
            })?;
        if produced != expected {
            return Err(CodecError::CorruptInput(format!(
                "frame declares {} bytes but decoded {}",
                expected, produced
            )));
        }
        Ok(produced)
    }
}

impl Default for Codecs {
    fn default() -> Self {
        Self::new(CodecSettings::default())
    }
}

impl CodecProvider for Codecs {
    fn version(&self) -> Version {
        Version::current()
    }

    fn max_compressed_size(&self, input_len: u64) -> Result<u64> {
        let len = usize::try_from(input_len).map_err(|_| CodecError::SizeOverflow(input_len))?;
        let mut bound = 0usize;
        for algorithm in Algorithm::ALL {
            let codec_bound = self
                .codec(algorithm)
                .max_encoded_len(len)
                .ok_or(CodecError::SizeOverflow(input_len))?;
            bound = bound.max(codec_bound);
        }
        let total = bound
            .checked_add(HEADER_LEN)
            .ok_or(CodecError::SizeOverflow(input_len))?;
        Ok(total as u64)
    }

    fn max_decompressed_size(&self, expected_len: u64) -> Result<u64> {
        usize::try_from(expected_len).map_err(|_| CodecError::SizeOverflow(expected_len))?;
        Ok(expected_len)
    }

    fn compress(&self, src: &[u8], dst: &mut [u8], algorithm: Algorithm) -> ProcessingResult {
        match self.try_compress(src, dst, algorithm) {
            Ok(written) => ProcessingResult::success(src.len() as u64, written as u64),
            Err(e) => {
                debug!(algorithm = %algorithm, error = %e, "compression failed");
                ProcessingResult::failure(e.state())
            }
        }
    }

    fn decompress(&self, src: &[u8], dst: &mut [u8]) -> ProcessingResult {
        match self.try_decompress(src, dst) {
            Ok(written) => ProcessingResult::success(src.len() as u64, written as u64),
            Err(e) => {
                debug!(error = %e, "decompression failed");
                ProcessingResult::failure(e.state())
            }
        }
    }
}
