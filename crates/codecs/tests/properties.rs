//! Property tests for the bundled codec provider.

use packbench_codecs::{Algorithm, CodecProvider, CodecSettings, Codecs};
use proptest::prelude::*;

fn algorithm() -> impl Strategy<Value = Algorithm> {
    prop::sample::select(Algorithm::ALL.to_vec())
}

fn settings() -> impl Strategy<Value = CodecSettings> {
    (0u32..=9, 0u32..=11, 10u32..=24).prop_map(|(deflate_level, brotli_quality, brotli_window)| {
        CodecSettings {
            deflate_level,
            brotli_quality,
            brotli_window,
        }
    })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn roundtrip_reproduces_input(
        input in prop::collection::vec(any::<u8>(), 0..4096),
        algorithm in algorithm(),
        settings in settings(),
    ) {
        let codecs = Codecs::new(settings);
        let bound = codecs.max_compressed_size(input.len() as u64).unwrap() as usize;
        let mut compressed = vec![0u8; bound];
        let c = codecs.compress(&input, &mut compressed, algorithm);
        prop_assert!(c.is_success());

        let mut out = vec![0u8; input.len()];
        let d = codecs.decompress(&compressed[..c.bytes_written as usize], &mut out);
        prop_assert!(d.is_success());
        prop_assert_eq!(d.bytes_written as usize, input.len());
        prop_assert_eq!(out, input);
    }

    #[test]
    fn bound_covers_incompressible_input(
        input in prop::collection::vec(any::<u8>(), 0..16384),
        algorithm in algorithm(),
    ) {
        let codecs = Codecs::default();
        let bound = codecs.max_compressed_size(input.len() as u64).unwrap();
        let mut compressed = vec![0u8; bound as usize];
        let c = codecs.compress(&input, &mut compressed, algorithm);
        prop_assert!(c.is_success());
        prop_assert!(c.bytes_written <= bound);
    }

    #[test]
    fn bound_covers_repetitive_input(
        byte in any::<u8>(),
        len in 0usize..32768,
        algorithm in algorithm(),
    ) {
        let input = vec![byte; len];
        let codecs = Codecs::default();
        let bound = codecs.max_compressed_size(len as u64).unwrap();
        let mut compressed = vec![0u8; bound as usize];
        let c = codecs.compress(&input, &mut compressed, algorithm);
        prop_assert!(c.is_success());
        prop_assert!(c.bytes_written <= bound);
    }
}
