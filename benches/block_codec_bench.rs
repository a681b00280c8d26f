// In blockpack-core/benches/block_codec_bench.rs

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};

use blockpack::io::ByteArrayInput;
use blockpack::{BitWidth, Block, BlockCodec, BLOCK_SIZE};

// --- Mock Data Generation ---

/// A deterministic block whose widest value needs exactly `bits` bits.
fn generate_block(bits: u32) -> Block {
    let max = if bits == 0 { 0 } else { u32::MAX >> (32 - bits) };
    let mut block = [0u32; BLOCK_SIZE];
    let mut state = 0x9E37_79B9u32;
    for v in block.iter_mut() {
        state ^= state << 13;
        state ^= state >> 17;
        state ^= state << 5;
        *v = state & max;
    }
    block[0] = max;
    block
}

// --- Benchmark Suite ---

const BENCH_WIDTHS: [u32; 5] = [1, 8, 16, 24, 32];

fn bench_block_codec(c: &mut Criterion) {
    let codec = BlockCodec::new();

    let mut group = c.benchmark_group("Block Codec");
    group.throughput(Throughput::Elements(BLOCK_SIZE as u64));

    for &bits in BENCH_WIDTHS.iter() {
        let block = generate_block(bits);
        let mut encoded = Vec::new();
        let width = codec.encode(&block, &mut encoded).unwrap();
        assert_eq!(width, BitWidth::new(bits as u8).unwrap());

        group.bench_with_input(BenchmarkId::new("Encode", bits), &block, |b, block| {
            let mut out = Vec::with_capacity(encoded.len());
            b.iter(|| {
                out.clear();
                black_box(codec.encode(black_box(block), &mut out).unwrap());
            })
        });

        group.bench_with_input(BenchmarkId::new("Decode", bits), &encoded, |b, encoded| {
            let mut out = [0u32; BLOCK_SIZE];
            b.iter(|| {
                let mut input = ByteArrayInput::new(black_box(encoded));
                black_box(codec.decode_into(&mut input, &mut out).unwrap());
            })
        });

        group.bench_with_input(BenchmarkId::new("Skip", bits), &encoded, |b, encoded| {
            b.iter(|| {
                let mut input = ByteArrayInput::new(black_box(encoded));
                black_box(codec.skip(&mut input).unwrap());
            })
        });
    }

    group.finish();
}

criterion_group!(benches, bench_block_codec);
criterion_main!(benches);
