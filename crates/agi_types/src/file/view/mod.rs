//! View resource support.
//!
//! A view is a sprite made of animation loops, each loop a list of cels.
//!
//! # File Structure Overview
//!
//! ```text
//! Offset  Size     Field               Description
//! ------  -------  ------------------  ------------------------------------------
//! 0x00    2        reserved            Unused by the decoder
//! 0x02    1        loop_count          Number of loops (0-255)
//! 0x03    2        description_offset  LE offset of the description, 0 for none
//! 0x05    2 × n    loop_offsets        LE offsets of each loop in the buffer
//! ```
//!
//! ## Loop
//!
//! ```text
//! +0x00   1        cel_count           Number of cels
//! +0x01   2 × n    cel_offsets         LE offsets of each cel, relative to the loop
//! ```
//!
//! ## Cel
//!
//! ```text
//! +0x00   1        width
//! +0x01   1        height
//! +0x02   1        flags               M S S S T T T T
//! +0x03   ...      rows                RLE tokens, one row after another
//! ```
//!
//! `T` is the transparent palette index. When the mirror bit `M` is set, the cel
//! was drawn for loop `S`: loops with any other index show it flipped
//! horizontally.
//!
//! Each row is a sequence of `CCCC RRRR` tokens painting `R` pixels of palette
//! color `C`, closed by a `0x00` token. Columns left unpainted when the row
//! closes are transparent.
//!
//! # Example
//!
//! ```no_run
//! use agi_types::file::View;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let view = View::open("VIEW.011")?;
//! for (i, lp) in view.iter().enumerate() {
//!     println!("loop {}: {} cels", i, lp.cel_count());
//! }
//! # Ok(())
//! # }
//! ```

mod cel;
mod loops;


use std::{
	fmt::{self, Display, Formatter},
	path::Path,
	slice,
};

use encoding_rs::WINDOWS_1252;

use crate::file::{AgiFileError, DecodeConfig, ResourceKind};

pub use cel::{Cel, CelHeader};
pub use loops::Loop;

/// View format constants.
pub mod constants {
	/// Size of the fixed view header
	pub const HEADER_SIZE: usize = 5;

	/// Offset of the loop count
	pub const LOOP_COUNT_OFFSET: usize = 2;

	/// Offset of the description pointer
	pub const DESCRIPTION_OFFSET: usize = 3;

	/// Size of a table offset entry
	pub const OFFSET_SIZE: usize = 2;

	/// Size of a cel header
	pub const CEL_HEADER_SIZE: usize = 3;

	/// Token closing a cel row
	pub const ROW_TERMINATOR: u8 = 0x00;

	/// Mirror bit of the cel flags
	pub const MIRROR_FLAG: u8 = 0x80;
}

/// A decoded view.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct View {
	loops: Vec<Loop>,
	description: Option<String>,
}

impl View {
	/// Opens a view resource extracted to a file.
	pub fn open(path: impl AsRef<Path>) -> Result<Self, AgiFileError> {
		let data = std::fs::read(path)?;
		Self::from_bytes(&data)
	}

	/// Decodes a view with the default configuration.
	pub fn from_bytes(data: &[u8]) -> Result<Self, AgiFileError> {
		Self::decode(data, &DecodeConfig::default())
	}

	/// Decodes a view.
	pub fn decode(data: &[u8], config: &DecodeConfig) -> Result<Self, AgiFileError> {
		if data.len() < constants::HEADER_SIZE {
			return Err(AgiFileError::insufficient_data(
				ResourceKind::View,
				constants::HEADER_SIZE,
				data.len(),
			));
		}

		let loop_count = data[constants::LOOP_COUNT_OFFSET] as usize;
		let description_offset = u16::from_le_bytes([
			data[constants::DESCRIPTION_OFFSET],
			data[constants::DESCRIPTION_OFFSET + 1],
		]) as usize;

		let table_end = constants::HEADER_SIZE + loop_count * constants::OFFSET_SIZE;
		if data.len() < table_end {
			return Err(AgiFileError::insufficient_data(ResourceKind::View, table_end, data.len()));
		}

		let description = match description_offset {
			0 => None,
			offset => Some(read_description(data, offset)?),
		};

		let loops = data[constants::HEADER_SIZE..table_end]
			.chunks_exact(constants::OFFSET_SIZE)
			.enumerate()
			.map(|(index, entry)| {
				let start = u16::from_le_bytes([entry[0], entry[1]]) as usize;
				Loop::decode(data, start, index as u8, config)
			})
			.collect::<Result<Vec<_>, _>>()?;

		log::debug!(
			"Decoded view: {} loops, {} cels, description {}",
			loops.len(),
			loops.iter().map(Loop::cel_count).sum::<usize>(),
			if description.is_some() {
				"present"
			} else {
				"absent"
			}
		);

		Ok(Self {
			loops,
			description,
		})
	}

	/// Number of loops.
	pub fn loop_count(&self) -> usize {
		self.loops.len()
	}

	/// Returns true if the view has no loops.
	pub fn is_empty(&self) -> bool {
		self.loops.is_empty()
	}

	/// Returns the loop at `index`.
	pub fn get_loop(&self, index: usize) -> Option<&Loop> {
		self.loops.get(index)
	}

	/// Returns cel `cel` of loop `loop_index`.
	pub fn cel(&self, loop_index: usize, cel: usize) -> Option<&Cel> {
		self.get_loop(loop_index).and_then(|l| l.cel(cel))
	}

	/// All loops, in order.
	pub fn loops(&self) -> &[Loop] {
		&self.loops
	}

	/// Description text, if the view has one.
	pub fn description(&self) -> Option<&str> {
		self.description.as_deref()
	}

	/// Iterates over the loops.
	pub fn iter(&self) -> slice::Iter<'_, Loop> {
		self.loops.iter()
	}
}

impl<'a> IntoIterator for &'a View {
	type Item = &'a Loop;
	type IntoIter = slice::Iter<'a, Loop>;

	fn into_iter(self) -> Self::IntoIter {
		self.iter()
	}
}

impl TryFrom<&[u8]> for View {
	type Error = AgiFileError;

	fn try_from(value: &[u8]) -> Result<Self, Self::Error> {
		Self::from_bytes(value)
	}
}

impl Display for View {
	fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
		writeln!(f, "View: {} loops", self.loops.len())?;
		if let Some(description) = &self.description {
			writeln!(f, "  Description: {:?}", description)?;
		}
		for lp in &self.loops {
			writeln!(f, "  Loop {}: {} cels", lp.index(), lp.cel_count())?;
			for (i, cel) in lp.iter().enumerate() {
				writeln!(f, "    Cel {}: {}", i, cel)?;
			}
		}
		Ok(())
	}
}

/// Reads the NUL-terminated description at `offset`. The text may run up to
/// the end of the buffer.
fn read_description(data: &[u8], offset: usize) -> Result<String, AgiFileError> {
	if offset > data.len() {
		return Err(AgiFileError::offset_out_of_range(ResourceKind::View, offset, data.len()));
	}

	let tail = &data[offset..];
	let text = tail.iter().position(|&b| b == 0).map_or(tail, |end| &tail[..end]);
	let (cow, had_errors) = WINDOWS_1252.decode_without_bom_handling(text);
	if had_errors {
		log::warn!("View description at 0x{:04X} contains undecodable bytes", offset);
	}

	Ok(cow.into_owned())
}
