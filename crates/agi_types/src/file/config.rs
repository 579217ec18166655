//! Decode configuration for view resources.
//!
//! Controls how cels are materialized: which display-pixel packing the palette
//! resolver produces, and whether zero-size cels are accepted.

use serde::{Deserialize, Serialize};

use super::palette::{PixelFormat, Resolver};

/// Configuration for decoding views, loops and cels.
///
/// # Presets
///
/// - `default()`: RGBA8888 pixels, zero-size cels accepted as empty
/// - `strict()`: RGBA8888 pixels, zero-size cels rejected
///
/// # Examples
///
/// ```
/// use agi_types::file::{DecodeConfig, PixelFormat};
///
/// let config = DecodeConfig::default();
/// assert!(config.allow_empty_cels);
///
/// let config = DecodeConfig::strict().with_pixel_format(PixelFormat::Argb8888);
/// assert!(!config.allow_empty_cels);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DecodeConfig {
	/// Packing of the display pixels stored in decoded cels
	pub pixel_format: PixelFormat,
	/// Accept cels with a zero width or height as valid-but-empty
	pub allow_empty_cels: bool,
}

impl Default for DecodeConfig {
	fn default() -> Self {
		Self {
			pixel_format: PixelFormat::Rgba8888,
			allow_empty_cels: true,
		}
	}
}

impl DecodeConfig {
	/// Create a new decode configuration.
	pub fn new(pixel_format: PixelFormat, allow_empty_cels: bool) -> Self {
		Self {
			pixel_format,
			allow_empty_cels,
		}
	}

	/// Configuration that rejects zero-size cels.
	pub fn strict() -> Self {
		Self {
			allow_empty_cels: false,
			..Self::default()
		}
	}

	/// Returns a copy using `pixel_format`.
	pub fn with_pixel_format(mut self, pixel_format: PixelFormat) -> Self {
		self.pixel_format = pixel_format;
		self
	}

	/// Returns a copy with empty cels allowed or rejected.
	pub fn with_empty_cels(mut self, allow: bool) -> Self {
		self.allow_empty_cels = allow;
		self
	}

	/// Shared palette resolver for the configured pixel format.
	pub fn resolver(&self) -> &'static Resolver {
		Resolver::for_format(self.pixel_format)
	}
}
