use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use std::hint::black_box;

mod test_data {
    /// Deterministic sentinel-free pseudo-random bytes.
    pub fn random_bytes(seed: u64, len: usize) -> Vec<u8> {
        let mut state = seed;
        (0..len)
            .map(|_| {
                state = state.wrapping_mul(6364136223846793005).wrapping_add(1);
                ((state >> 32) as u8 % 255) + 1
            })
            .collect()
    }

    /// English-like filler with plenty of repeated context.
    pub fn text_bytes(len: usize) -> Vec<u8> {
        b"the quick brown fox jumps over the lazy dog. "
            .iter()
            .copied()
            .cycle()
            .take(len)
            .collect()
    }
}

fn bench_compress(c: &mut Criterion) {
    let mut group = c.benchmark_group("compress");
    for size in [4 * 1024, 64 * 1024] {
        group.throughput(Throughput::Bytes(size as u64));
        group.bench_with_input(BenchmarkId::new("text", size), &size, |b, &size| {
            let data = test_data::text_bytes(size);
            b.iter(|| black_box(dczip::compress(&data).unwrap()));
        });
        group.bench_with_input(BenchmarkId::new("random", size), &size, |b, &size| {
            let data = test_data::random_bytes(0xC0FFEE, size);
            b.iter(|| black_box(dczip::compress(&data).unwrap()));
        });
    }
    group.finish();
}

fn bench_decompress(c: &mut Criterion) {
    let mut group = c.benchmark_group("decompress");
    for size in [4 * 1024, 64 * 1024] {
        group.throughput(Throughput::Bytes(size as u64));
        group.bench_with_input(BenchmarkId::new("text", size), &size, |b, &size| {
            let blob = dczip::compress(&test_data::text_bytes(size)).unwrap();
            b.iter(|| black_box(dczip::decompress(&blob).unwrap()));
        });
    }
    group.finish();
}

fn bench_stages(c: &mut Criterion) {
    let mut group = c.benchmark_group("stages");
    let size = 64 * 1024;
    group.throughput(Throughput::Bytes(size as u64));

    group.bench_function("bwt_transform", |b| {
        let data = test_data::text_bytes(size);
        b.iter(|| black_box(dczip::bwt::transform(&data).unwrap()));
    });
    group.bench_function("dc_encode", |b| {
        let transformed = dczip::bwt::transform(&test_data::text_bytes(size)).unwrap();
        b.iter(|| black_box(dczip::dc::encode(&transformed)));
    });
    group.bench_function("huffman_encode", |b| {
        let transformed = dczip::bwt::transform(&test_data::text_bytes(size)).unwrap();
        let serialized = dczip::varint::encode(&dczip::dc::encode(&transformed));
        b.iter(|| black_box(dczip::huffman::encode(&serialized)));
    });
    group.finish();
}

criterion_group!(benches, bench_compress, bench_decompress, bench_stages);
criterion_main!(benches);
