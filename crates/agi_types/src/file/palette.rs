//! EGA palette support.
//!
//! AGI graphics index a fixed 16-color EGA palette. The [`Resolver`] turns a palette
//! index into a display pixel, a `u32` packed in the host's [`PixelFormat`]. Resolvers
//! for each format are built once on first use and shared between threads afterwards.

use std::fmt;
use std::sync::OnceLock;

use serde::{Deserialize, Serialize};

use crate::file::AgiFileError;

/// RGBA color representation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Color {
	/// Red component (0-255)
	pub r: u8,
	/// Green component (0-255)
	pub g: u8,
	/// Blue component (0-255)
	pub b: u8,
	/// Alpha component (0-255)
	pub a: u8,
}

impl Color {
	/// Creates a new RGBA color.
	pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
		Self {
			r,
			g,
			b,
			a,
		}
	}

	/// Creates a new RGB color with full opacity.
	pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
		Self::new(r, g, b, 255)
	}

	/// Creates a transparent black color.
	pub const fn transparent() -> Self {
		Self::new(0, 0, 0, 0)
	}

	/// Returns the same color with full opacity.
	pub const fn opaque(self) -> Self {
		Self::new(self.r, self.g, self.b, 255)
	}

	/// Returns the color as a 32-bit RGBA value.
	pub const fn to_rgba32(&self) -> u32 {
		((self.r as u32) << 24) | ((self.g as u32) << 16) | ((self.b as u32) << 8) | (self.a as u32)
	}

	/// Creates a color from a 32-bit RGBA value.
	pub const fn from_rgba32(rgba: u32) -> Self {
		Self {
			r: ((rgba >> 24) & 0xFF) as u8,
			g: ((rgba >> 16) & 0xFF) as u8,
			b: ((rgba >> 8) & 0xFF) as u8,
			a: (rgba & 0xFF) as u8,
		}
	}
}

impl Default for Color {
	fn default() -> Self {
		Self::transparent()
	}
}

impl fmt::Display for Color {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "RGBA({}, {}, {}, {})", self.r, self.g, self.b, self.a)
	}
}

/// Number of colors in the EGA palette.
pub const EGA_COLOR_COUNT: usize = 16;

/// The 16 EGA colors, in palette index order.
pub const EGA_COLORS: [Color; EGA_COLOR_COUNT] = [
	Color::rgb(0x00, 0x00, 0x00), // black
	Color::rgb(0x00, 0x00, 0xAA), // blue
	Color::rgb(0x00, 0xAA, 0x00), // green
	Color::rgb(0x00, 0xAA, 0xAA), // cyan
	Color::rgb(0xAA, 0x00, 0x00), // red
	Color::rgb(0xAA, 0x00, 0xAA), // magenta
	Color::rgb(0xAA, 0x55, 0x00), // brown
	Color::rgb(0xAA, 0xAA, 0xAA), // grey
	Color::rgb(0x55, 0x55, 0x55), // dark grey
	Color::rgb(0x55, 0x55, 0xFF), // light blue
	Color::rgb(0x55, 0xFF, 0x55), // light green
	Color::rgb(0x55, 0xFF, 0xFF), // light cyan
	Color::rgb(0xFF, 0x55, 0x55), // pink
	Color::rgb(0xFF, 0x55, 0xFF), // light magenta
	Color::rgb(0xFF, 0xFF, 0x55), // yellow
	Color::rgb(0xFF, 0xFF, 0xFF), // white
];

/// Packing of a display pixel into a `u32`.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PixelFormat {
	/// `0xRRGGBBAA`
	#[default]
	Rgba8888,
	/// `0xAARRGGBB`
	Argb8888,
	/// `0xBBGGRRAA`
	Bgra8888,
	/// 16-bit `RRRRRGGGGGGBBBBB` in the low half word, no alpha
	Rgb565,
}

impl PixelFormat {
	/// All supported formats.
	pub const ALL: [PixelFormat; 4] = [Self::Rgba8888, Self::Argb8888, Self::Bgra8888, Self::Rgb565];

	/// Packs a color into a display pixel.
	pub const fn pack(self, color: Color) -> u32 {
		let (r, g, b, a) = (color.r as u32, color.g as u32, color.b as u32, color.a as u32);
		match self {
			Self::Rgba8888 => (r << 24) | (g << 16) | (b << 8) | a,
			Self::Argb8888 => (a << 24) | (r << 16) | (g << 8) | b,
			Self::Bgra8888 => (b << 24) | (g << 16) | (r << 8) | a,
			Self::Rgb565 => ((r >> 3) << 11) | ((g >> 2) << 5) | (b >> 3),
		}
	}

	/// Unpacks a display pixel. `Rgb565` pixels come back fully opaque.
	pub const fn unpack(self, pixel: u32) -> Color {
		match self {
			Self::Rgba8888 => Color::from_rgba32(pixel),
			Self::Argb8888 => Color::new(
				(pixel >> 16) as u8,
				(pixel >> 8) as u8,
				pixel as u8,
				(pixel >> 24) as u8,
			),
			Self::Bgra8888 => Color::new(
				(pixel >> 8) as u8,
				(pixel >> 16) as u8,
				(pixel >> 24) as u8,
				pixel as u8,
			),
			Self::Rgb565 => {
				let r = ((pixel >> 11) & 0x1F) as u8;
				let g = ((pixel >> 5) & 0x3F) as u8;
				let b = (pixel & 0x1F) as u8;
				Color::rgb((r << 3) | (r >> 2), (g << 2) | (g >> 4), (b << 3) | (b >> 2))
			}
		}
	}

	const fn slot(self) -> usize {
		match self {
			Self::Rgba8888 => 0,
			Self::Argb8888 => 1,
			Self::Bgra8888 => 2,
			Self::Rgb565 => 3,
		}
	}
}

impl fmt::Display for PixelFormat {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Self::Rgba8888 => write!(f, "RGBA8888"),
			Self::Argb8888 => write!(f, "ARGB8888"),
			Self::Bgra8888 => write!(f, "BGRA8888"),
			Self::Rgb565 => write!(f, "RGB565"),
		}
	}
}

static RESOLVERS: [OnceLock<Resolver>; 4] = [const { OnceLock::new() }; 4];

/// Maps EGA palette indices to display pixels.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolver {
	format: PixelFormat,
	pixels: [u32; EGA_COLOR_COUNT],
}

impl Resolver {
	/// Builds a resolver for the given pixel format.
	///
	/// Prefer [`Resolver::for_format`], which builds each format once per process.
	pub fn new(format: PixelFormat) -> Self {
		let mut pixels = [0u32; EGA_COLOR_COUNT];
		for (pixel, color) in pixels.iter_mut().zip(EGA_COLORS.iter()) {
			*pixel = format.pack(*color);
		}
		Self {
			format,
			pixels,
		}
	}

	/// Returns the shared resolver for `format`, building it on first use.
	pub fn for_format(format: PixelFormat) -> &'static Resolver {
		RESOLVERS[format.slot()].get_or_init(|| {
			log::debug!("Initializing EGA resolver for {}", format);
			Self::new(format)
		})
	}

	/// Returns the shared RGBA8888 resolver.
	pub fn shared() -> &'static Resolver {
		Self::for_format(PixelFormat::Rgba8888)
	}

	/// Returns the pixel format produced by this resolver.
	#[inline]
	pub fn format(&self) -> PixelFormat {
		self.format
	}

	/// Resolves a palette index to its display pixel.
	#[inline]
	pub fn resolve(&self, index: u8) -> Result<u32, AgiFileError> {
		self.pixels.get(index as usize).copied().ok_or(AgiFileError::InvalidPaletteIndex(index))
	}

	/// Returns the EGA color for a palette index.
	pub fn color(&self, index: u8) -> Result<Color, AgiFileError> {
		EGA_COLORS.get(index as usize).copied().ok_or(AgiFileError::InvalidPaletteIndex(index))
	}

	/// Converts a display pixel back into a color.
	#[inline]
	pub fn to_color(&self, pixel: u32) -> Color {
		self.format.unpack(pixel)
	}

	/// Finds the palette index a display pixel was resolved from.
	pub fn index_of(&self, pixel: u32) -> Option<u8> {
		self.pixels.iter().position(|&p| p == pixel).map(|i| i as u8)
	}

	/// Returns the 16 display pixels.
	pub fn pixels(&self) -> &[u32; EGA_COLOR_COUNT] {
		&self.pixels
	}

	/// Returns the palette as 48 bytes of packed RGB triples.
	pub fn to_rgb_bytes(&self) -> Vec<u8> {
		EGA_COLORS.iter().flat_map(|c| [c.r, c.g, c.b]).collect()
	}
}

impl Default for Resolver {
	fn default() -> Self {
		Self::new(PixelFormat::default())
	}
}
