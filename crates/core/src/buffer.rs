//! Work buffers sized once per run.
//!
//! A [`Workspace`] holds the three buffers the benchmark loop needs: the
//! loaded input, the compressed output and the round-trip destination.
//! They are allocated up front so that no allocation happens inside a
//! measured window, then overwritten by every algorithm and released when
//! the workspace is dropped.

use crate::error::{Error, Result, ResultExt};
use packbench_codecs::CodecProvider;
use tracing::debug;

/// Fixed-capacity byte region with a logical length.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Buffer {
    bytes: Box<[u8]>,
    len: usize,
}

impl Buffer {
    /// Zero-filled buffer with logical length zero.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            bytes: vec![0u8; capacity].into_boxed_slice(),
            len: 0,
        }
    }

    /// Buffer holding `data`, full to capacity.
    pub fn from_vec(data: Vec<u8>) -> Self {
        let len = data.len();
        Self {
            bytes: data.into_boxed_slice(),
            len,
        }
    }

    /// Allocated size in bytes.
    pub fn capacity(&self) -> usize {
        self.bytes.len()
    }

    /// Logical length.
    pub fn len(&self) -> usize {
        self.len
    }

    /// True when the logical length is zero.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// The logical contents.
    pub fn as_slice(&self) -> &[u8] {
        &self.bytes[..self.len]
    }

    /// The whole capacity, for a codec to write into.
    pub fn as_mut_capacity(&mut self) -> &mut [u8] {
        &mut self.bytes
    }

    /// Reset the logical length without touching the bytes.
    pub fn clear(&mut self) {
        self.len = 0;
    }

    /// Set the logical length. Returns `false`, leaving the length
    /// unchanged, when `len` exceeds the capacity.
    pub fn set_len(&mut self, len: usize) -> bool {
        if len > self.bytes.len() {
            return false;
        }
        self.len = len;
        true
    }
}

/// The three buffers of one run.
#[derive(Debug)]
pub struct Workspace {
    pub(crate) input: Buffer,
    pub(crate) output: Buffer,
    pub(crate) decompressed: Buffer,
}

impl Workspace {
    /// Size the output and round-trip buffers for `input` using the
    /// provider's bounds.
    ///
    /// The compressed-size bound is queried once and shared by every
    /// algorithm, so the provider must return a bound valid for all of them.
    pub fn allocate<P>(input: Vec<u8>, provider: &P) -> Result<Self>
    where
        P: CodecProvider + ?Sized,
    {
        let input_len = input.len() as u64;
        let output_capacity = provider
            .max_compressed_size(input_len)
            .map_err(Error::from)
            .and_then(|bound| to_usize(bound, input_len))
            .context("While sizing the compression buffer")?;
        let decompressed_capacity = provider
            .max_decompressed_size(input_len)
            .map_err(Error::from)
            .and_then(|bound| to_usize(bound, input_len))
            .context("While sizing the decompression buffer")?;

        debug!(
            input_bytes = input_len,
            output_capacity, decompressed_capacity, "allocating workspace"
        );

        Ok(Self {
            input: Buffer::from_vec(input),
            output: Buffer::with_capacity(output_capacity),
            decompressed: Buffer::with_capacity(decompressed_capacity),
        })
    }

    /// The loaded input.
    pub fn input(&self) -> &[u8] {
        self.input.as_slice()
    }

    /// Bytes of the last compressed frame.
    pub fn compressed(&self) -> &[u8] {
        self.output.as_slice()
    }

    /// Bytes of the last round trip.
    pub fn decompressed(&self) -> &[u8] {
        self.decompressed.as_slice()
    }

    /// Capacity of the compressed-output buffer.
    pub fn output_capacity(&self) -> usize {
        self.output.capacity()
    }

    /// Capacity of the round-trip buffer.
    pub fn decompressed_capacity(&self) -> usize {
        self.decompressed.capacity()
    }

    /// Working memory allocated besides the input.
    pub fn total_bytes(&self) -> u64 {
        (self.output.capacity() + self.decompressed.capacity()) as u64
    }
}

fn to_usize(bound: u64, input_len: u64) -> Result<usize> {
    usize::try_from(bound).map_err(|_| Error::buffer_size_overflow(input_len))
}
