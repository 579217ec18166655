//! Resource directory support (`LOGDIR`, `PICDIR`, `SNDDIR`, `VIEWDIR`).
//!
//! A directory maps resource numbers to their location inside the `VOL.N` files.
//! It is a flat list of 3-byte records, record `i` describing resource `i`:
//!
//! ```text
//! byte 0          byte 1          byte 2
//! 7 6 5 4 3 2 1 0 7 6 5 4 3 2 1 0 7 6 5 4 3 2 1 0
//! V V V V P P P P P P P P P P P P P P P P P P P P
//! ```
//!
//! `V` is the volume number and `P` the 20-bit offset into that volume. A record
//! starting with `0xFF` marks an absent resource. Version 3 games join the four
//! directories into a single file behind an 8-byte offset header, see
//! [`DirectorySet::from_combined`].

use std::{
	fmt::{self, Display, Formatter},
	io::{self, Read},
};

use serde::{Deserialize, Serialize};

use super::{AgiFileError, ResourceKind};

/// Directory constants.
pub mod constants {
	/// Number of slots in a directory
	pub const MAX_ENTRIES: usize = 256;

	/// Size of a directory record in bytes
	pub const RECORD_SIZE: usize = 3;

	/// First byte of an absent record
	pub const ABSENT_MARKER: u8 = 0xFF;

	/// Size of the version 3 combined directory header (4 × u16)
	pub const COMBINED_HEADER_SIZE: usize = 8;

	/// Largest encodable volume number
	pub const MAX_VOLUME: u8 = 0x0F;

	/// Largest encodable volume offset
	pub const MAX_OFFSET: u32 = 0x000F_FFFF;
}

/// Resource types addressed by directories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[repr(u8)]
pub enum ResourceType {
	/// Logic scripts
	Logic = 0,
	/// Pictures
	Picture = 1,
	/// Sounds
	Sound = 2,
	/// Views
	View = 3,
}

impl ResourceType {
	/// All resource types, in directory set order.
	pub const ALL: [ResourceType; 4] = [Self::Logic, Self::Picture, Self::Sound, Self::View];

	/// Returns the lowercase name of the type.
	pub fn name(self) -> &'static str {
		match self {
			Self::Logic => "logic",
			Self::Picture => "picture",
			Self::Sound => "sound",
			Self::View => "view",
		}
	}
}

impl Display for ResourceType {
	fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
		write!(f, "{}", self.name())
	}
}

/// Location of a resource: volume number and byte offset inside it.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Location {
	/// Volume number (0-15)
	pub volume: u8,
	/// Offset inside the volume (20 bits)
	pub offset: u32,
}

impl Location {
	/// Creates a location, masking both fields to their on-disk width.
	pub fn new(volume: u8, offset: u32) -> Self {
		Self {
			volume: volume & constants::MAX_VOLUME,
			offset: offset & constants::MAX_OFFSET,
		}
	}

	/// Decodes a 3-byte record. Returns `None` for absent records.
	pub fn from_record(record: [u8; constants::RECORD_SIZE]) -> Option<Self> {
		let [b0, b1, b2] = record;
		if b0 == constants::ABSENT_MARKER {
			return None;
		}

		Some(Self {
			volume: (b0 >> 4) & 0x0F,
			offset: (u32::from(b0 & 0x0F) << 16) | (u32::from(b1) << 8) | u32::from(b2),
		})
	}

	/// Encodes the location as a 3-byte record.
	pub fn to_record(self) -> [u8; constants::RECORD_SIZE] {
		[
			((self.volume & 0x0F) << 4) | ((self.offset >> 16) & 0x0F) as u8,
			(self.offset >> 8) as u8,
			self.offset as u8,
		]
	}
}

impl Display for Location {
	fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
		write!(f, "vol.{} @ 0x{:05X}", self.volume, self.offset)
	}
}

/// Reads one record. `Ok(None)` marks a clean end of stream.
fn read_record<R: Read>(
	reader: &mut R,
	offset: usize,
) -> Result<Option<[u8; constants::RECORD_SIZE]>, AgiFileError> {
	let mut record = [0u8; constants::RECORD_SIZE];
	let mut filled = 0;
	while filled < constants::RECORD_SIZE {
		match reader.read(&mut record[filled..]) {
			Ok(0) => break,
			Ok(n) => filled += n,
			Err(e) if e.kind() == io::ErrorKind::Interrupted => {}
			Err(e) => return Err(e.into()),
		}
	}

	match filled {
		0 => Ok(None),
		constants::RECORD_SIZE => Ok(Some(record)),
		available => Err(AgiFileError::TruncatedRecord {
			offset,
			available,
		}),
	}
}

/// Decoded resource directory.
///
/// Holds one slot per resource number; slots are fixed once decoded.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Directory {
	entries: [Option<Location>; constants::MAX_ENTRIES],
	checksum: u32,
	count: usize,
}

impl Directory {
	/// Creates a directory with every slot absent.
	pub fn empty() -> Self {
		Self {
			entries: [None; constants::MAX_ENTRIES],
			checksum: 0,
			count: 0,
		}
	}

	/// Opens a directory file from the specified path.
	pub fn open(path: impl AsRef<std::path::Path>) -> Result<Self, AgiFileError> {
		let data = std::fs::read(path)?;
		Self::from_bytes(&data)
	}

	/// Decodes a directory from a byte slice.
	///
	/// Trailing bytes that do not form a full record are ignored.
	pub fn from_bytes(data: &[u8]) -> Result<Self, AgiFileError> {
		let records = data.len() / constants::RECORD_SIZE;
		if records > constants::MAX_ENTRIES {
			return Err(AgiFileError::TooManyEntries {
				count: records,
				max: constants::MAX_ENTRIES,
			});
		}

		let mut reader = data;
		Self::from_reader(&mut reader)
	}

	/// Decodes a directory from any reader, consuming it to the end.
	///
	/// A record cut short by the end of the stream terminates decoding; the
	/// records read before it are kept.
	pub fn from_reader<R: Read>(reader: &mut R) -> Result<Self, AgiFileError> {
		let mut directory = Self::empty();
		let mut index = 0;

		loop {
			let offset = index * constants::RECORD_SIZE;
			let record = match read_record(reader, offset) {
				Ok(Some(record)) => record,
				Ok(None) => break,
				Err(e @ AgiFileError::TruncatedRecord { .. }) => {
					log::debug!("Ignoring trailing bytes: {}", e);
					break;
				}
				Err(e) => return Err(e),
			};

			if index >= constants::MAX_ENTRIES {
				return Err(AgiFileError::TooManyEntries {
					count: index + 1,
					max: constants::MAX_ENTRIES,
				});
			}

			for byte in record {
				directory.checksum = directory.checksum.wrapping_add(u32::from(byte));
			}

			if let Some(location) = Location::from_record(record) {
				directory.entries[index] = Some(location);
				directory.count += 1;
			}

			index += 1;
		}

		log::trace!(
			"Decoded directory: {} records, {} present, checksum {}",
			index,
			directory.count,
			directory.checksum
		);

		Ok(directory)
	}

	/// Returns the location of a resource, if present.
	#[inline]
	pub fn location(&self, number: u8) -> Option<Location> {
		self.entries[number as usize]
	}

	/// Returns the volume holding a resource, if present.
	pub fn volume(&self, number: u8) -> Option<u8> {
		self.location(number).map(|l| l.volume)
	}

	/// Returns the offset of a resource in its volume, if present.
	pub fn offset(&self, number: u8) -> Option<u32> {
		self.location(number).map(|l| l.offset)
	}

	/// Returns true if the slot for `number` is present.
	pub fn contains(&self, number: u8) -> bool {
		self.entries[number as usize].is_some()
	}

	/// Additive sum of every record byte consumed, wrapping on overflow.
	pub fn checksum(&self) -> u32 {
		self.checksum
	}

	/// Returns the number of present slots.
	pub fn count(&self) -> usize {
		self.count
	}

	/// Returns the numbers of all present resources in ascending order.
	pub fn numbers(&self) -> Vec<u8> {
		self.iter().map(|(number, _)| number).collect()
	}

	/// Iterates over present slots as `(number, location)` pairs.
	pub fn iter(&self) -> impl Iterator<Item = (u8, Location)> + '_ {
		self.entries
			.iter()
			.enumerate()
			.filter_map(|(i, entry)| entry.map(|location| (i as u8, location)))
	}

	/// Encodes the directory, up to and including the highest present slot.
	pub fn to_bytes(&self) -> Vec<u8> {
		let used = self.entries.iter().rposition(Option::is_some).map_or(0, |i| i + 1);
		let mut buffer = Vec::with_capacity(used * constants::RECORD_SIZE);
		for entry in &self.entries[..used] {
			match entry {
				Some(location) => buffer.extend_from_slice(&location.to_record()),
				None => buffer.extend_from_slice(&[constants::ABSENT_MARKER; constants::RECORD_SIZE]),
			}
		}
		buffer
	}
}

impl Default for Directory {
	fn default() -> Self {
		Self::empty()
	}
}

impl Display for Directory {
	fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
		let noun = if self.count == 1 {
			"entry"
		} else {
			"entries"
		};
		writeln!(f, "Directory: {} {}, checksum {}", self.count, noun, self.checksum)?;
		for (number, location) in self.iter() {
			writeln!(f, "  {:3}: {}", number, location)?;
		}
		Ok(())
	}
}

impl TryFrom<&[u8]> for Directory {
	type Error = AgiFileError;

	fn try_from(value: &[u8]) -> Result<Self, Self::Error> {
		Self::from_bytes(value)
	}
}

impl TryFrom<Vec<u8>> for Directory {
	type Error = AgiFileError;

	fn try_from(value: Vec<u8>) -> Result<Self, Self::Error> {
		Self::from_bytes(&value)
	}
}

impl FromIterator<(u8, Location)> for Directory {
	fn from_iter<T: IntoIterator<Item = (u8, Location)>>(iter: T) -> Self {
		let mut directory = Self::empty();
		for (number, location) in iter {
			let location = Location::new(location.volume, location.offset);
			if directory.entries[number as usize].replace(location).is_none() {
				directory.count += 1;
			}
		}
		directory.checksum = directory
			.to_bytes()
			.iter()
			.fold(0u32, |sum, &b| sum.wrapping_add(u32::from(b)));
		directory
	}
}

/// The four directories of a game.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct DirectorySet {
	directories: [Directory; 4],
}

impl DirectorySet {
	/// Groups four decoded directories.
	pub fn new(logic: Directory, picture: Directory, sound: Directory, view: Directory) -> Self {
		Self {
			directories: [logic, picture, sound, view],
		}
	}

	/// Splits a version 3 combined directory file.
	///
	/// The header holds the offsets of the logic, picture, view and sound
	/// directories. Each directory runs up to the next greater offset, or to the
	/// end of the file.
	pub fn from_combined(data: &[u8]) -> Result<Self, AgiFileError> {
		if data.len() < constants::COMBINED_HEADER_SIZE {
			return Err(AgiFileError::insufficient_data(
				ResourceKind::Directory,
				constants::COMBINED_HEADER_SIZE,
				data.len(),
			));
		}

		let mut offsets = [0usize; 4];
		for (i, offset) in offsets.iter_mut().enumerate() {
			*offset = usize::from(u16::from_le_bytes([data[i * 2], data[i * 2 + 1]]));
		}

		let decode = |start: usize| -> Result<Directory, AgiFileError> {
			if start > data.len() {
				return Err(AgiFileError::offset_out_of_range(
					ResourceKind::Directory,
					start,
					data.len(),
				));
			}
			let end = offsets.iter().copied().filter(|&o| o > start).min().unwrap_or(data.len());
			Directory::from_bytes(&data[start..end.min(data.len())])
		};

		let logic = decode(offsets[0])?;
		let picture = decode(offsets[1])?;
		let view = decode(offsets[2])?;
		let sound = decode(offsets[3])?;

		Ok(Self::new(logic, picture, sound, view))
	}

	/// Returns the directory for a resource type.
	#[inline]
	pub fn get(&self, resource_type: ResourceType) -> &Directory {
		&self.directories[resource_type as usize]
	}

	/// Looks up the location of a resource.
	pub fn locate(&self, resource_type: ResourceType, number: u8) -> Option<Location> {
		self.get(resource_type).location(number)
	}

	/// Iterates over `(type, directory)` pairs.
	pub fn iter(&self) -> impl Iterator<Item = (ResourceType, &Directory)> {
		ResourceType::ALL.into_iter().zip(self.directories.iter())
	}
}
