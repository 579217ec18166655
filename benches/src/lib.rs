//! Benchmark helper utilities for agi-rs
//!
//! This module provides generators for synthetic directories and views. Output is
//! deterministic for a given seed so runs stay comparable.

use rand::{Rng, SeedableRng, rngs::SmallRng};

/// Generates a directory with `present` resources spread over the 256 slots.
pub fn generate_directory_data(present: usize, seed: u64) -> Vec<u8> {
	let mut rng = SmallRng::seed_from_u64(seed);
	let mut data = Vec::with_capacity(256 * 3);

	for slot in 0..256 {
		if slot < present {
			let volume: u8 = rng.random_range(0..16);
			let offset: u32 = rng.random_range(0..0x10_0000);
			data.push((volume << 4) | (offset >> 16) as u8);
			data.push((offset >> 8) as u8);
			data.push(offset as u8);
		} else {
			data.extend_from_slice(&[0xFF, 0xFF, 0xFF]);
		}
	}

	data
}

/// Generates the bytes of a single cel (header and RLE rows).
///
/// Rows are filled with random runs up to a random column, then terminated.
pub fn generate_cel_data(width: u8, height: u8, flags: u8, rng: &mut impl Rng) -> Vec<u8> {
	let mut data = vec![width, height, flags];

	for _ in 0..height {
		let filled = rng.random_range(0..=width as usize);
		let mut column = 0;
		while column < filled {
			let run = rng.random_range(1..=15).min(filled - column);
			let color: u8 = rng.random_range(0..16);
			data.push((color << 4) | run as u8);
			column += run;
		}
		data.push(0x00);
	}

	data
}

/// Generates a view with `loops` loops of `cels` cels each.
///
/// Odd loops mirror the cels of the loop before them, as real views do for
/// left/right facing loops.
pub fn generate_view_data(loops: u8, cels: u8, width: u8, height: u8, seed: u64) -> Vec<u8> {
	let mut rng = SmallRng::seed_from_u64(seed);
	let mut data = vec![0x01, 0x01, loops, 0x00, 0x00];
	data.resize(5 + loops as usize * 2, 0);

	for index in 0..loops {
		let loop_start = data.len();
		let slot = 5 + index as usize * 2;
		data[slot..slot + 2].copy_from_slice(&(loop_start as u16).to_le_bytes());

		data.push(cels);
		data.resize(loop_start + 1 + cels as usize * 2, 0);

		let source = index & !1;
		let flags = 0x80 | ((source & 0x07) << 4) | rng.random_range(0..16u8);
		for cel in 0..cels as usize {
			let relative = (data.len() - loop_start) as u16;
			let entry = loop_start + 1 + cel * 2;
			data[entry..entry + 2].copy_from_slice(&relative.to_le_bytes());
			let cel_data = generate_cel_data(width, height, flags, &mut rng);
			data.extend_from_slice(&cel_data);
		}
	}

	data
}
