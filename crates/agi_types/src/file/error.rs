//! Error types for resource parsing.

use std::fmt::{self, Display, Formatter};

use thiserror::Error;

use super::dir::ResourceType;

/// Layer of the resource format an error was raised from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResourceKind {
	/// Resource directory (`LOGDIR`, `VIEWDIR`, ...)
	Directory,
	/// Volume file (`VOL.N`)
	Volume,
	/// View container
	View,
	/// Loop inside a view
	Loop,
	/// Cel inside a loop
	Cel,
}

impl Display for ResourceKind {
	fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
		match self {
			Self::Directory => write!(f, "directory"),
			Self::Volume => write!(f, "volume"),
			Self::View => write!(f, "view"),
			Self::Loop => write!(f, "loop"),
			Self::Cel => write!(f, "cel"),
		}
	}
}

/// Errors that can occur while decoding AGI resources.
#[derive(Debug, Error)]
pub enum AgiFileError {
	/// Not enough data to read a fixed-size header
	#[error("{kind}: insufficient data, expected {expected} bytes, got {actual} bytes")]
	InsufficientData {
		/// Layer that failed
		kind: ResourceKind,
		/// Expected number of bytes
		expected: usize,
		/// Actual number of bytes
		actual: usize,
	},

	/// An offset read from the resource points outside of its buffer
	#[error("{kind}: offset {offset} is out of range (buffer size {size})")]
	OffsetOutOfRange {
		/// Layer that failed
		kind: ResourceKind,
		/// Offending offset
		offset: usize,
		/// Size of the buffer
		size: usize,
	},

	/// A run of pixels extends beyond the cel width
	#[error("cel row {row}: run of {run} pixels at column {column} overruns width {width}")]
	RowOverrun {
		/// Row being decoded
		row: usize,
		/// Column the run started at
		column: usize,
		/// Run length
		run: usize,
		/// Cel width
		width: usize,
	},

	/// The buffer ended before a row terminator was found
	#[error("cel row {row}: buffer ended at offset {offset} before the row terminator")]
	MissingRowTerminator {
		/// Row being decoded
		row: usize,
		/// Offset where the buffer ended
		offset: usize,
	},

	/// Palette index outside of the 16 EGA colors
	#[error("invalid palette index {0}, the EGA palette has 16 entries")]
	InvalidPaletteIndex(u8),

	/// Zero-size cel rejected by the decode configuration
	#[error("empty cel ({width}x{height}) rejected by configuration")]
	EmptyCel {
		/// Cel width
		width: u8,
		/// Cel height
		height: u8,
	},

	/// Volume entry does not start with the `0x12 0x34` signature
	#[error("{kind}: invalid signature {actual:02X?} at offset {offset}")]
	InvalidSignature {
		/// Layer that failed
		kind: ResourceKind,
		/// Offset of the entry
		offset: usize,
		/// Bytes found instead of the signature
		actual: [u8; 2],
	},

	/// A 3-byte directory record was cut short by the end of the stream
	#[error("truncated directory record at byte {offset}: {available} of 3 bytes available")]
	TruncatedRecord {
		/// Offset of the record
		offset: usize,
		/// Bytes available for it
		available: usize,
	},

	/// The directory holds more records than the 256 slot table can address
	#[error("directory holds {count} records, at most {max} are supported")]
	TooManyEntries {
		/// Records present in the stream
		count: usize,
		/// Fixed capacity
		max: usize,
	},

	/// LZW stream references a code that is not defined yet
	#[error("invalid LZW code {code}, next free code is {next}")]
	InvalidLzwCode {
		/// Offending code
		code: u16,
		/// Next code the table would define
		next: u16,
	},

	/// Compressed payload expanded to fewer bytes than its header claims
	#[error("compressed payload expanded to {actual} bytes, expected {expected}")]
	DecompressedSize {
		/// Uncompressed length from the entry header
		expected: usize,
		/// Bytes produced
		actual: usize,
	},

	/// The directory has no entry for the requested resource
	#[error("{resource_type} {number} does not exist")]
	ResourceNotFound {
		/// Resource type
		resource_type: ResourceType,
		/// Resource number
		number: u8,
	},

	/// IO error
	#[error(transparent)]
	IOError(#[from] std::io::Error),
}

impl AgiFileError {
	/// Shorthand for [`AgiFileError::InsufficientData`]
	pub fn insufficient_data(kind: ResourceKind, expected: usize, actual: usize) -> Self {
		Self::InsufficientData {
			kind,
			expected,
			actual,
		}
	}

	/// Shorthand for [`AgiFileError::OffsetOutOfRange`]
	pub fn offset_out_of_range(kind: ResourceKind, offset: usize, size: usize) -> Self {
		Self::OffsetOutOfRange {
			kind,
			offset,
			size,
		}
	}

	/// Returns true for errors caused by malformed resource bytes.
	pub fn is_format_error(&self) -> bool {
		matches!(
			self,
			Self::InsufficientData { .. }
				| Self::OffsetOutOfRange { .. }
				| Self::RowOverrun { .. }
				| Self::MissingRowTerminator { .. }
				| Self::InvalidPaletteIndex(_)
				| Self::EmptyCel { .. }
				| Self::InvalidSignature { .. }
				| Self::InvalidLzwCode { .. }
				| Self::DecompressedSize { .. }
		)
	}

	/// Returns true for well-formed input this crate cannot decode.
	pub fn is_unsupported(&self) -> bool {
		matches!(self, Self::TooManyEntries { .. })
	}
}
