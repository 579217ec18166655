//! Volume file support (`VOL.0` .. `VOL.15`).
//!
//! Volumes are plain concatenations of resources. Every resource found through
//! a directory starts with a small header at its offset:
//!
//! ```text
//! Version 2 (5 bytes)
//! Offset  Size  Field
//! 0x00    2     signature (0x12 0x34)
//! 0x02    1     volume number
//! 0x03    2     payload length (LE)
//!
//! Version 3 (7 bytes)
//! Offset  Size  Field
//! 0x00    2     signature (0x12 0x34)
//! 0x02    1     volume number
//! 0x03    2     uncompressed length (LE)
//! 0x05    2     compressed length (LE)
//! ```
//!
//! Version 3 entries whose two lengths differ are LZW compressed. Pictures with
//! the top bit of the volume byte set are nibble packed instead.

use std::{borrow::Cow, path::Path};

use serde::{Deserialize, Serialize};

use super::{AgiFileError, ResourceKind, ResourceType, compression::Compression};

/// Volume constants.
pub mod constants {
	/// Resource header signature
	pub const SIGNATURE: [u8; 2] = [0x12, 0x34];

	/// Header size of version 2 entries
	pub const V2_HEADER_SIZE: usize = 5;

	/// Header size of version 3 entries
	pub const V3_HEADER_SIZE: usize = 7;

	/// Volume byte flag marking a nibble packed picture
	pub const PICTURE_FLAG: u8 = 0x80;
}

/// Interpreter generation, selecting the volume entry header layout.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VolumeVersion {
	/// Separate directory files, 5-byte entry headers
	#[default]
	V2,
	/// Combined directory file, 7-byte entry headers
	V3,
}

impl VolumeVersion {
	/// Size of the entry header for this version.
	pub const fn header_size(self) -> usize {
		match self {
			Self::V2 => constants::V2_HEADER_SIZE,
			Self::V3 => constants::V3_HEADER_SIZE,
		}
	}
}

/// Header of a single volume entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EntryHeader {
	/// Volume number stored in the header
	pub volume: u8,
	/// Length of the payload as stored in the volume
	pub stored_len: usize,
	/// Length of the payload once decompressed
	pub uncompressed_len: usize,
}

impl EntryHeader {
	/// Compression of the payload, given the type of resource it holds.
	pub fn compression(&self, resource_type: ResourceType) -> Compression {
		if resource_type == ResourceType::Picture && self.volume & constants::PICTURE_FLAG != 0 {
			Compression::Picture
		} else if self.stored_len != self.uncompressed_len {
			Compression::Lzw
		} else {
			Compression::None
		}
	}
}

/// A loaded volume file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Volume {
	number: u8,
	data: Vec<u8>,
}

impl Volume {
	/// Wraps the bytes of volume `number`.
	pub fn new(number: u8, data: Vec<u8>) -> Self {
		Self {
			number,
			data,
		}
	}

	/// Opens a volume file from the specified path.
	pub fn open(number: u8, path: impl AsRef<Path>) -> Result<Self, AgiFileError> {
		let data = std::fs::read(path)?;
		log::debug!("Loaded volume {}: {} bytes", number, data.len());
		Ok(Self::new(number, data))
	}

	/// Volume number.
	pub fn number(&self) -> u8 {
		self.number
	}

	/// Size of the volume in bytes.
	pub fn len(&self) -> usize {
		self.data.len()
	}

	/// Returns true if the volume holds no bytes.
	pub fn is_empty(&self) -> bool {
		self.data.is_empty()
	}

	/// Raw bytes of the volume.
	pub fn as_bytes(&self) -> &[u8] {
		&self.data
	}

	/// Reads and validates the entry header at `offset`.
	pub fn header(&self, offset: usize, version: VolumeVersion) -> Result<EntryHeader, AgiFileError> {
		let header_size = version.header_size();
		let end = offset.checked_add(header_size).filter(|&end| end <= self.data.len());
		let Some(end) = end else {
			return Err(AgiFileError::offset_out_of_range(
				ResourceKind::Volume,
				offset.saturating_add(header_size),
				self.data.len(),
			));
		};
		let header = &self.data[offset..end];

		if header[0..2] != constants::SIGNATURE {
			return Err(AgiFileError::InvalidSignature {
				kind: ResourceKind::Volume,
				offset,
				actual: [header[0], header[1]],
			});
		}

		let first = usize::from(u16::from_le_bytes([header[3], header[4]]));
		let entry = match version {
			VolumeVersion::V2 => EntryHeader {
				volume: header[2],
				stored_len: first,
				uncompressed_len: first,
			},
			VolumeVersion::V3 => EntryHeader {
				volume: header[2],
				stored_len: usize::from(u16::from_le_bytes([header[5], header[6]])),
				uncompressed_len: first,
			},
		};

		if entry.volume & 0x7F != self.number {
			log::debug!(
				"Entry at 0x{:05X} claims volume {}, read from volume {}",
				offset,
				entry.volume & 0x7F,
				self.number
			);
		}

		Ok(entry)
	}

	/// Returns the payload of the entry starting at `offset` as stored in the volume.
	pub fn stored(&self, offset: usize, version: VolumeVersion) -> Result<(EntryHeader, &[u8]), AgiFileError> {
		let header = self.header(offset, version)?;
		let start = offset + version.header_size();
		let end = start + header.stored_len;
		if end > self.data.len() {
			return Err(AgiFileError::offset_out_of_range(ResourceKind::Volume, end, self.data.len()));
		}

		Ok((header, &self.data[start..end]))
	}

	/// Returns the payload of the `resource_type` entry starting at `offset`,
	/// expanded when it is stored compressed.
	pub fn entry(
		&self,
		offset: usize,
		version: VolumeVersion,
		resource_type: ResourceType,
	) -> Result<Cow<'_, [u8]>, AgiFileError> {
		let (header, stored) = self.stored(offset, version)?;
		let compression = header.compression(resource_type);
		if compression != Compression::None {
			log::trace!(
				"Expanding {} entry at 0x{:05X}: {} -> {} bytes",
				compression,
				offset,
				header.stored_len,
				header.uncompressed_len
			);
		}
		compression.expand(stored, header.uncompressed_len)
	}
}
