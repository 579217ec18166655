//! Compression schemes of version 3 volume entries.
//!
//! An entry is LZW compressed when its stored and uncompressed lengths differ.
//! Pictures use their own nibble packing instead, flagged by the top bit of the
//! entry's volume byte; the flag takes priority over the length comparison.

use std::{
	borrow::Cow,
	fmt::{self, Display, Formatter},
};

use super::AgiFileError;

pub mod lzw;
pub mod picture;

/// How a volume entry payload is stored.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Compression {
	/// Stored as is
	#[default]
	None,
	/// Adaptive LZW, see [`lzw`]
	Lzw,
	/// Picture nibble packing, see [`picture`]
	Picture,
}

impl Compression {
	/// Expands a stored payload into `expected` bytes.
	pub fn expand(self, data: &[u8], expected: usize) -> Result<Cow<'_, [u8]>, AgiFileError> {
		match self {
			Self::None => Ok(Cow::Borrowed(data)),
			Self::Lzw => lzw::expand(data, expected).map(Cow::Owned),
			Self::Picture => {
				let output = picture::expand(data);
				if output.len() != expected {
					log::debug!("Picture unpacked to {} bytes, header claims {}", output.len(), expected);
				}
				Ok(Cow::Owned(output))
			}
		}
	}
}

impl Display for Compression {
	fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
		match self {
			Self::None => write!(f, "none"),
			Self::Lzw => write!(f, "LZW"),
			Self::Picture => write!(f, "picture"),
		}
	}
}
