//! Loop decoding: an ordered list of cels.

use std::slice;

use super::{cel::Cel, constants};
use crate::file::{AgiFileError, DecodeConfig, ResourceKind};

/// One animation loop of a view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Loop {
	index: u8,
	cels: Vec<Cel>,
}

impl Loop {
	/// Decodes the loop at `start` with the default configuration.
	pub fn from_bytes(data: &[u8], start: usize, index: u8) -> Result<Self, AgiFileError> {
		Self::decode(data, start, index, &DecodeConfig::default())
	}

	/// Decodes the loop at `start`, numbered `index` within its view.
	///
	/// The loop starts with a cel count followed by that many little-endian
	/// cel offsets, relative to the start of the loop.
	pub fn decode(
		data: &[u8],
		start: usize,
		index: u8,
		config: &DecodeConfig,
	) -> Result<Self, AgiFileError> {
		let Some(&cel_count) = data.get(start) else {
			return Err(AgiFileError::offset_out_of_range(ResourceKind::Loop, start, data.len()));
		};

		let table_size = 1 + cel_count as usize * constants::OFFSET_SIZE;
		let available = data.len() - start;
		if available < table_size {
			return Err(AgiFileError::insufficient_data(ResourceKind::Loop, table_size, available));
		}

		let table = &data[start + 1..start + table_size];
		let cels = table
			.chunks_exact(constants::OFFSET_SIZE)
			.map(|entry| {
				let relative = u16::from_le_bytes([entry[0], entry[1]]) as usize;
				Cel::decode(data, start + relative, index, config)
			})
			.collect::<Result<Vec<_>, _>>()?;

		log::trace!("Decoded loop {} at 0x{:04X}: {} cels", index, start, cels.len());

		Ok(Self {
			index,
			cels,
		})
	}

	/// Position of the loop within its view.
	#[inline]
	pub fn index(&self) -> u8 {
		self.index
	}

	/// Number of cels.
	pub fn cel_count(&self) -> usize {
		self.cels.len()
	}

	/// Returns true if the loop holds no cels.
	pub fn is_empty(&self) -> bool {
		self.cels.is_empty()
	}

	/// Returns the cel at `index`.
	pub fn cel(&self, index: usize) -> Option<&Cel> {
		self.cels.get(index)
	}

	/// All cels, in order.
	pub fn cels(&self) -> &[Cel] {
		&self.cels
	}

	/// Iterates over the cels.
	pub fn iter(&self) -> slice::Iter<'_, Cel> {
		self.cels.iter()
	}
}

impl<'a> IntoIterator for &'a Loop {
	type Item = &'a Cel;
	type IntoIter = slice::Iter<'a, Cel>;

	fn into_iter(self) -> Self::IntoIter {
		self.iter()
	}
}
