//! Benchmark suite for view, directory and volume entry decoding
//!
//! Run with: cargo bench --manifest-path benches/Cargo.toml

use agi_benches::{generate_directory_data, generate_view_data};
use agi_types::file::{Cel, DecodeConfig, Directory, PixelFormat, Resolver, View, compression::lzw};
use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use std::hint::black_box;

/// Benchmark directory decoding at several fill levels
fn bench_directory_decode(c: &mut Criterion) {
	let mut group = c.benchmark_group("directory_decode");

	for present in [16usize, 128, 256] {
		let data = generate_directory_data(present, 0x5EED);
		group.throughput(Throughput::Bytes(data.len() as u64));
		group.bench_with_input(BenchmarkId::from_parameter(present), &data, |b, data| {
			b.iter(|| black_box(Directory::from_bytes(black_box(data))));
		});
	}

	group.finish();
}

/// Benchmark full view decoding for typical sprite sizes
fn bench_view_decode(c: &mut Criterion) {
	let mut group = c.benchmark_group("view_decode");

	let cases = [("small", 4u8, 4u8, 16u8, 24u8), ("large", 8, 4, 64, 96)];
	for (name, loops, cels, width, height) in cases {
		let data = generate_view_data(loops, cels, width, height, 0xA61);
		let pixels = loops as u64 * cels as u64 * width as u64 * height as u64;
		group.throughput(Throughput::Elements(pixels));
		group.bench_with_input(BenchmarkId::new("decode", name), &data, |b, data| {
			b.iter(|| black_box(View::from_bytes(black_box(data))));
		});
	}

	group.finish();
}

/// Benchmark decoding with each pixel format
fn bench_pixel_formats(c: &mut Criterion) {
	let mut group = c.benchmark_group("view_pixel_format");
	let data = generate_view_data(4, 4, 32, 48, 7);

	for format in PixelFormat::ALL {
		let config = DecodeConfig::default().with_pixel_format(format);
		group.bench_with_input(BenchmarkId::from_parameter(format), &config, |b, config| {
			b.iter(|| black_box(View::decode(black_box(&data), config)));
		});
	}

	group.finish();
}

/// Benchmark the displayable image conversion
fn bench_to_rgba(c: &mut Criterion) {
	let mut group = c.benchmark_group("cel_to_rgba");
	let data = generate_view_data(1, 1, 160, 168, 11);

	let Ok(view) = View::from_bytes(&data) else {
		eprintln!("Warning: Could not decode generated view");
		return;
	};
	let Some(cel) = view.cel(0, 0).cloned() else {
		return;
	};

	group.throughput(Throughput::Elements((cel.width() * cel.height()) as u64));
	group.bench_function("to_rgba", |b| {
		b.iter(|| black_box(black_box(&cel).to_rgba()));
	});
	group.bench_function("to_rgba_with", |b| {
		let resolver = Resolver::shared();
		b.iter(|| black_box(Cel::to_rgba_with(black_box(&cel), resolver)));
	});

	group.finish();
}

/// Benchmark LZW expansion of compressed views
fn bench_lzw_expand(c: &mut Criterion) {
	let mut group = c.benchmark_group("lzw_expand");

	for (name, width, height) in [("small", 16u8, 24u8), ("large", 64, 96)] {
		let view = generate_view_data(8, 4, width, height, 0x1A2B);
		let packed = lzw::compress(&view);
		group.throughput(Throughput::Bytes(view.len() as u64));
		group.bench_with_input(BenchmarkId::from_parameter(name), &packed, |b, packed| {
			b.iter(|| black_box(lzw::expand(black_box(packed), view.len())));
		});
	}

	group.finish();
}

criterion_group!(
	benches,
	bench_directory_decode,
	bench_view_decode,
	bench_pixel_formats,
	bench_to_rgba,
	bench_lzw_expand
);
criterion_main!(benches);
