//! Adaptive LZW used by version 3 volumes.
//!
//! Codes are packed least significant bit first. They start 9 bits wide and
//! widen by one bit whenever the table outgrows the current width, up to 11
//! bits. Once the table is full it stops growing until the next reset.
//!
//! | Code    | Meaning                                            |
//! |---------|----------------------------------------------------|
//! | 0-255   | Literal byte                                       |
//! | 256     | Reset: clear the table and return to 9-bit codes   |
//! | 257     | End of data                                        |
//! | 258-    | Table entry: prefix code followed by one byte      |
//!
//! The first code after a reset (or at the start of the stream) is a literal
//! and defines no entry. Every later code defines the entry `previous string +
//! first byte of this string`.

use std::collections::HashMap;

use crate::file::AgiFileError;

/// LZW constants.
pub mod constants {
	/// Code width after a reset
	pub const START_BITS: u32 = 9;

	/// Widest code
	pub const MAX_BITS: u32 = 11;

	/// Clears the table
	pub const RESET_CODE: u16 = 256;

	/// Ends the stream
	pub const END_CODE: u16 = 257;

	/// First table entry
	pub const FIRST_CODE: u16 = 258;

	/// Number of addressable codes
	pub const TABLE_SIZE: usize = 1 << MAX_BITS;
}

use constants::*;

/// Code width and next free entry, advanced identically on both sides.
#[derive(Debug, Clone, Copy)]
struct CodeSpace {
	bits: u32,
	next: u16,
}

impl CodeSpace {
	fn new() -> Self {
		Self {
			bits: START_BITS,
			next: FIRST_CODE,
		}
	}

	/// Claims the next table entry, widening codes once the current width is used up.
	///
	/// Returns `None` once the table is full.
	fn define(&mut self) -> Option<u16> {
		if u32::from(self.next) > (1 << self.bits) - 2 && self.bits < MAX_BITS {
			self.bits += 1;
		}
		if usize::from(self.next) >= TABLE_SIZE {
			return None;
		}
		let code = self.next;
		self.next += 1;
		Some(code)
	}
}

#[derive(Debug)]
struct BitReader<'a> {
	data: &'a [u8],
	position: usize,
	buffer: u32,
	count: u32,
}

impl<'a> BitReader<'a> {
	fn new(data: &'a [u8]) -> Self {
		Self {
			data,
			position: 0,
			buffer: 0,
			count: 0,
		}
	}

	/// Reads a `bits` wide code, or `None` when the stream cannot fill it.
	fn read(&mut self, bits: u32) -> Option<u16> {
		while self.count < bits {
			let &byte = self.data.get(self.position)?;
			self.position += 1;
			self.buffer |= u32::from(byte) << self.count;
			self.count += 8;
		}

		let code = (self.buffer & ((1 << bits) - 1)) as u16;
		self.buffer >>= bits;
		self.count -= bits;
		Some(code)
	}
}

#[derive(Debug, Default)]
struct BitWriter {
	data: Vec<u8>,
	buffer: u32,
	count: u32,
}

impl BitWriter {
	fn write(&mut self, code: u16, bits: u32) {
		self.buffer |= u32::from(code) << self.count;
		self.count += bits;
		while self.count >= 8 {
			self.data.push(self.buffer as u8);
			self.buffer >>= 8;
			self.count -= 8;
		}
	}

	fn finish(mut self) -> Vec<u8> {
		if self.count > 0 {
			self.data.push(self.buffer as u8);
		}
		self.data
	}
}

/// Appends the string of `code` to `output`.
///
/// Entry prefixes always point to lower codes, so the walk terminates.
fn append_string(table: &[(u16, u8)], mut code: u16, output: &mut Vec<u8>) {
	let start = output.len();
	while code > 0xFF {
		let (prefix, byte) = table[usize::from(code)];
		output.push(byte);
		code = prefix;
	}
	output.push(code as u8);
	output[start..].reverse();
}

/// Expands an LZW stream into `expected` bytes.
///
/// Decoding stops at the end code, when the input runs out, or once `expected`
/// bytes have been produced. Fewer bytes than `expected` is an error.
pub fn expand(data: &[u8], expected: usize) -> Result<Vec<u8>, AgiFileError> {
	let mut reader = BitReader::new(data);
	let mut table = vec![(0u16, 0u8); TABLE_SIZE];
	let mut space = CodeSpace::new();
	let mut previous: Option<u16> = None;
	let mut output = Vec::with_capacity(expected);

	while output.len() < expected {
		let Some(code) = reader.read(space.bits) else {
			log::debug!("LZW stream ended without an end code after {} bytes", output.len());
			break;
		};

		match code {
			END_CODE => break,
			RESET_CODE => {
				space = CodeSpace::new();
				previous = None;
				continue;
			}
			_ => {}
		}

		let Some(prefix) = previous else {
			if code > 0xFF {
				return Err(AgiFileError::InvalidLzwCode {
					code,
					next: space.next,
				});
			}
			output.push(code as u8);
			previous = Some(code);
			continue;
		};

		let start = output.len();
		if code < space.next {
			append_string(&table, code, &mut output);
		} else if code == space.next {
			// the entry being defined right now: previous string plus its own first byte
			append_string(&table, prefix, &mut output);
			output.push(output[start]);
		} else {
			return Err(AgiFileError::InvalidLzwCode {
				code,
				next: space.next,
			});
		}

		if let Some(entry) = space.define() {
			table[usize::from(entry)] = (prefix, output[start]);
		}
		previous = Some(code);
	}

	if output.len() < expected {
		return Err(AgiFileError::DecompressedSize {
			expected,
			actual: output.len(),
		});
	}
	output.truncate(expected);
	Ok(output)
}

/// Compresses `data` into a stream [`expand`] reads back.
///
/// The stream opens with a reset code, and a reset is emitted each time the
/// table fills up.
pub fn compress(data: &[u8]) -> Vec<u8> {
	let mut writer = BitWriter::default();
	let mut dictionary: HashMap<(u16, u8), u16> = HashMap::new();
	let mut next = FIRST_CODE;
	// mirrors the reader's code space to know the width of every code
	let mut space = CodeSpace::new();
	let mut literal_pending = true;

	writer.write(RESET_CODE, space.bits);

	let mut bytes = data.iter().copied();
	let Some(first) = bytes.next() else {
		writer.write(END_CODE, space.bits);
		return writer.finish();
	};

	let mut current = u16::from(first);
	for byte in bytes {
		if let Some(&code) = dictionary.get(&(current, byte)) {
			current = code;
			continue;
		}

		writer.write(current, space.bits);
		if literal_pending {
			literal_pending = false;
		} else {
			space.define();
		}

		if usize::from(next) < TABLE_SIZE {
			dictionary.insert((current, byte), next);
			next += 1;
		} else {
			writer.write(RESET_CODE, space.bits);
			dictionary.clear();
			next = FIRST_CODE;
			space = CodeSpace::new();
			literal_pending = true;
		}
		current = u16::from(byte);
	}

	writer.write(current, space.bits);
	if !literal_pending {
		space.define();
	}
	writer.write(END_CODE, space.bits);
	writer.finish()
}
