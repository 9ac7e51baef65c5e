//! Codec provider for packbench.
//!
//! This crate provides:
//! - The [`Algorithm`] enumeration benchmarked by packbench
//! - LZ4, raw deflate and Brotli block codecs working on caller-supplied slices
//! - A self-describing frame header so decompression needs no algorithm argument
//! - [`Codecs`], the [`CodecProvider`] combining them under one size bound

mod algorithm;
mod brotli_impl;
mod codec;
mod deflate;
mod error;
pub mod frame;
mod lz4;
mod provider;
mod result;

pub use algorithm::Algorithm;
pub use brotli_impl::BrotliCodec;
pub use codec::{BlockCodec, CodecSettings};
pub use deflate::DeflateCodec;
pub use error::{CodecError, Result};
pub use lz4::Lz4Codec;
pub use provider::{CodecProvider, Codecs, Version};
pub use result::{ProcessingResult, ProcessingState};
