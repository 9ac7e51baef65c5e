//! Benchmarks for the bundled codecs.

use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use packbench_codecs::{Algorithm, CodecProvider, Codecs};

fn generate_test_data(size: usize) -> Vec<u8> {
    // Generate compressible data (repeated text)
    let text = "Hello, World! This is test data for compression benchmarks. ";
    text.repeat(size / text.len() + 1).into_bytes()[..size].to_vec()
}

fn bench_compression(c: &mut Criterion) {
    let codecs = Codecs::default();
    let mut group = c.benchmark_group("compression");

    for size in [1024, 10240, 102400].iter() {
        let data = generate_test_data(*size);
        let bound = codecs.max_compressed_size(*size as u64).unwrap() as usize;
        let mut out = vec![0u8; bound];

        for algorithm in Algorithm::ALL {
            group.bench_with_input(BenchmarkId::new(algorithm.name(), size), &data, |b, data| {
                b.iter(|| codecs.compress(black_box(data), &mut out, algorithm))
            });
        }
    }

    group.finish();
}

fn bench_decompression(c: &mut Criterion) {
    let codecs = Codecs::default();
    let mut group = c.benchmark_group("decompression");
    let data = generate_test_data(102400);
    let bound = codecs.max_compressed_size(data.len() as u64).unwrap() as usize;

    for algorithm in Algorithm::ALL {
        let mut frame = vec![0u8; bound];
        let written = codecs.compress(&data, &mut frame, algorithm).bytes_written as usize;
        frame.truncate(written);
        let mut out = vec![0u8; data.len()];

        group.bench_with_input(BenchmarkId::new(algorithm.name(), data.len()), &frame, |b, frame| {
            b.iter(|| codecs.decompress(black_box(frame), &mut out))
        });
    }

    group.finish();
}

criterion_group!(benches, bench_compression, bench_decompression);
criterion_main!(benches);
