//! Nibble packing of version 3 pictures.
//!
//! Picture commands `0xF0` (set visual color) and `0xF2` (set priority color)
//! take a color between 0 and 15. Packed pictures store that operand in a
//! single nibble, which shifts everything after it by half a byte until the
//! next packed operand realigns the stream. `0xFF` ends the picture.
//!
//! ```text
//! unpacked  F0 06 F8 12 45 F0 07 F2 05 F8 14 67 FF
//! packed    F0 6F 81 24 5F 07 F2 5F 81 46 7F F0
//! ```

/// Picture constants.
pub mod constants {
	/// Change visual color
	pub const SET_VISUAL_COLOR: u8 = 0xF0;

	/// Change priority color
	pub const SET_PRIORITY_COLOR: u8 = 0xF2;

	/// End of picture
	pub const END_OF_PICTURE: u8 = 0xFF;
}

#[derive(Debug)]
struct NibbleReader<'a> {
	data: &'a [u8],
	position: usize,
}

impl NibbleReader<'_> {
	fn nibble(&mut self) -> Option<u8> {
		let byte = self.data.get(self.position / 2)?;
		let nibble = if self.position % 2 == 0 {
			byte >> 4
		} else {
			byte & 0x0F
		};
		self.position += 1;
		Some(nibble)
	}

	fn byte(&mut self) -> Option<u8> {
		let high = self.nibble()?;
		let low = self.nibble()?;
		Some(high << 4 | low)
	}
}

/// Unpacks a nibble packed picture.
///
/// The output stops after the end-of-picture byte, which is kept, or when the
/// input runs out.
pub fn expand(data: &[u8]) -> Vec<u8> {
	let mut reader = NibbleReader {
		data,
		position: 0,
	};
	let mut output = Vec::with_capacity(data.len() * 2);

	while let Some(byte) = reader.byte() {
		output.push(byte);
		match byte {
			constants::END_OF_PICTURE => break,
			constants::SET_VISUAL_COLOR | constants::SET_PRIORITY_COLOR => match reader.nibble() {
				Some(color) => output.push(color),
				None => break,
			},
			_ => {}
		}
	}

	output
}
