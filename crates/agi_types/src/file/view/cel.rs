//! Cel decoding: one run-length encoded raster frame.

use std::fmt::{self, Display, Formatter};

use super::constants;
use crate::file::{AgiFileError, Color, DecodeConfig, PixelFormat, ResourceKind, Resolver};

/// The 3-byte header preceding the cel body.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CelHeader {
	/// Width in pixels
	pub width: u8,
	/// Height in pixels
	pub height: u8,
	/// Packed transparency and mirror byte
	pub flags: u8,
}

impl CelHeader {
	/// Reads the header at `start`.
	pub fn from_bytes(data: &[u8], start: usize) -> Result<Self, AgiFileError> {
		if start >= data.len() {
			return Err(AgiFileError::offset_out_of_range(ResourceKind::Cel, start, data.len()));
		}

		let available = data.len() - start;
		if available < constants::CEL_HEADER_SIZE {
			return Err(AgiFileError::insufficient_data(
				ResourceKind::Cel,
				constants::CEL_HEADER_SIZE,
				available,
			));
		}

		Ok(Self {
			width: data[start],
			height: data[start + 1],
			flags: data[start + 2],
		})
	}

	/// Palette index of the transparent color.
	#[inline]
	pub fn transparent_color(&self) -> u8 {
		self.flags & 0x0F
	}

	/// Whether the mirror bit is set.
	#[inline]
	pub fn mirror_flag(&self) -> bool {
		self.flags & constants::MIRROR_FLAG != 0
	}

	/// Loop index the cel was originally drawn for.
	#[inline]
	pub fn mirror_source(&self) -> u8 {
		(self.flags >> 4) & 0x07
	}

	/// Whether a cel decoded for `loop_index` must be flipped.
	pub fn should_mirror(&self, loop_index: u8) -> bool {
		self.mirror_flag() && self.mirror_source() != loop_index
	}
}

/// A decoded cel.
///
/// Pixels are display pixels in the configured [`PixelFormat`], stored row by
/// row. The buffer always holds exactly `width * height` pixels.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cel {
	header: CelHeader,
	format: PixelFormat,
	transparent: u32,
	mirrored: bool,
	pixels: Vec<u32>,
}

impl Cel {
	/// Decodes the cel at `start` with the default configuration.
	pub fn from_bytes(data: &[u8], start: usize, loop_index: u8) -> Result<Self, AgiFileError> {
		Self::decode(data, start, loop_index, &DecodeConfig::default())
	}

	/// Decodes the cel at `start` for the loop numbered `loop_index`.
	pub fn decode(
		data: &[u8],
		start: usize,
		loop_index: u8,
		config: &DecodeConfig,
	) -> Result<Self, AgiFileError> {
		let header = CelHeader::from_bytes(data, start)?;
		if (header.width == 0 || header.height == 0) && !config.allow_empty_cels {
			return Err(AgiFileError::EmptyCel {
				width: header.width,
				height: header.height,
			});
		}

		let resolver = config.resolver();
		let transparent = resolver.resolve(header.transparent_color())?;
		let mut pixels =
			decode_rows(data, start + constants::CEL_HEADER_SIZE, &header, resolver, transparent)?;

		let mirrored = header.should_mirror(loop_index);
		if mirrored {
			flip_rows(&mut pixels, header.width as usize);
		}

		log::trace!(
			"Decoded cel at 0x{:04X}: {}x{}, transparent {}, mirrored {}",
			start,
			header.width,
			header.height,
			header.transparent_color(),
			mirrored
		);

		Ok(Self {
			header,
			format: resolver.format(),
			transparent,
			mirrored,
			pixels,
		})
	}

	/// Width in pixels.
	#[inline]
	pub fn width(&self) -> usize {
		self.header.width as usize
	}

	/// Height in pixels.
	#[inline]
	pub fn height(&self) -> usize {
		self.header.height as usize
	}

	/// The header this cel was decoded from.
	pub fn header(&self) -> &CelHeader {
		&self.header
	}

	/// Display pixel used for transparent pixels.
	#[inline]
	pub fn transparent(&self) -> u32 {
		self.transparent
	}

	/// Palette index of the transparent color.
	pub fn transparent_index(&self) -> u8 {
		self.header.transparent_color()
	}

	/// Whether the buffer was flipped horizontally during decoding.
	pub fn is_mirrored(&self) -> bool {
		self.mirrored
	}

	/// Returns true for zero-size cels.
	pub fn is_empty(&self) -> bool {
		self.pixels.is_empty()
	}

	/// Pixel format of the stored pixels.
	pub fn pixel_format(&self) -> PixelFormat {
		self.format
	}

	/// The pixel buffer.
	pub fn pixels(&self) -> &[u32] {
		&self.pixels
	}

	/// Returns the pixel at (`x`, `y`).
	pub fn pixel(&self, x: usize, y: usize) -> Option<u32> {
		if x >= self.width() || y >= self.height() {
			return None;
		}
		self.pixels.get(y * self.width() + x).copied()
	}

	/// Iterates over the rows of the cel, top to bottom.
	pub fn rows(&self) -> impl Iterator<Item = &[u32]> + '_ {
		let width = self.width();
		(0..self.height()).map(move |y| &self.pixels[y * width..(y + 1) * width])
	}

	/// Converts the cel into RGBA8888 bytes.
	///
	/// Transparent pixels become fully transparent, every other pixel opaque.
	pub fn to_rgba(&self) -> Vec<u8> {
		self.to_rgba_with(Resolver::for_format(self.format))
	}

	/// Converts the cel into RGBA8888 bytes, unpacking pixels with `resolver`.
	///
	/// `resolver` must use the pixel format the cel was decoded with.
	pub fn to_rgba_with(&self, resolver: &Resolver) -> Vec<u8> {
		debug_assert_eq!(resolver.format(), self.format, "resolver does not match the cel pixel format");
		let mut rgba = Vec::with_capacity(self.pixels.len() * 4);
		for &pixel in &self.pixels {
			let color = if pixel == self.transparent {
				Color::transparent()
			} else {
				resolver.to_color(pixel).opaque()
			};
			rgba.extend_from_slice(&[color.r, color.g, color.b, color.a]);
		}
		rgba
	}
}

impl Display for Cel {
	fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
		write!(
			f,
			"{}x{} cel, transparent {}{}",
			self.width(),
			self.height(),
			self.transparent_index(),
			if self.mirrored {
				", mirrored"
			} else {
				""
			}
		)
	}
}

/// Expands the RLE body starting at `offset` into `width * height` pixels.
fn decode_rows(
	data: &[u8],
	mut offset: usize,
	header: &CelHeader,
	resolver: &Resolver,
	transparent: u32,
) -> Result<Vec<u32>, AgiFileError> {
	let width = header.width as usize;
	let height = header.height as usize;
	let mut pixels = Vec::with_capacity(width * height);

	for row in 0..height {
		let mut column = 0;
		loop {
			let Some(&token) = data.get(offset) else {
				return Err(AgiFileError::MissingRowTerminator {
					row,
					offset,
				});
			};
			offset += 1;

			if token == constants::ROW_TERMINATOR {
				break;
			}

			let run = (token & 0x0F) as usize;
			if column + run > width {
				return Err(AgiFileError::RowOverrun {
					row,
					column,
					run,
					width,
				});
			}

			let pixel = resolver.resolve(token >> 4)?;
			pixels.extend(std::iter::repeat_n(pixel, run));
			column += run;
		}

		pixels.extend(std::iter::repeat_n(transparent, width - column));
	}

	Ok(pixels)
}

/// Mirrors every row of the buffer in place.
fn flip_rows(pixels: &mut [u32], width: usize) {
	if width == 0 {
		return;
	}
	for row in pixels.chunks_exact_mut(width) {
		row.reverse();
	}
}
