//! View files on disk and image conversion

use agi_rs::prelude::*;
use image::RgbaImage;

use crate::fixtures::{CEL, DESCRIPTION, view_bytes};

#[test_log::test]
fn test_open_view_file() {
	let dir = tempfile::tempdir().unwrap();
	let path = dir.path().join("VIEW.001");
	std::fs::write(&path, view_bytes()).unwrap();

	let view = View::open(&path).unwrap();
	assert_eq!(view.loop_count(), 2);
	assert_eq!(view.description(), Some(DESCRIPTION));

	let canonical = view.cel(0, 0).unwrap();
	let mirrored = view.cel(1, 0).unwrap();
	assert!(!canonical.is_mirrored());
	assert!(mirrored.is_mirrored());

	for (a, b) in canonical.rows().zip(mirrored.rows()) {
		let flipped: Vec<u32> = a.iter().rev().copied().collect();
		assert_eq!(b, flipped.as_slice());
	}
}

#[test_log::test]
fn test_cel_to_image() {
	let cel = Cel::from_bytes(&CEL, 0, 0).unwrap();
	let image = RgbaImage::from_raw(cel.width() as u32, cel.height() as u32, cel.to_rgba()).unwrap();

	assert_eq!(image.get_pixel(0, 0).0, [0xAA, 0x00, 0x00, 0xFF]);
	assert_eq!(image.get_pixel(1, 0).0, [0x00, 0x00, 0xAA, 0xFF]);
	assert_eq!(image.get_pixel(2, 0).0, [0x00, 0x00, 0xAA, 0xFF]);
	assert_eq!(image.get_pixel(0, 1).0, [0x00, 0xAA, 0xAA, 0xFF]);
	// padding is transparent
	assert_eq!(image.get_pixel(1, 1).0[3], 0);
	assert_eq!(image.get_pixel(2, 1).0[3], 0);
}

#[test_log::test]
fn test_decode_config_from_json() {
	let config: DecodeConfig =
		serde_json::from_str(r#"{ "pixel_format": "rgb565", "allow_empty_cels": false }"#).unwrap();
	assert_eq!(config, DecodeConfig::strict().with_pixel_format(PixelFormat::Rgb565));

	let view = View::decode(&view_bytes(), &config).unwrap();
	let cel = view.cel(0, 0).unwrap();
	assert_eq!(cel.pixel_format(), PixelFormat::Rgb565);
	let alpha: Vec<u8> = cel.to_rgba().chunks_exact(4).map(|p| p[3]).collect();
	assert_eq!(alpha, [0xFF, 0xFF, 0xFF, 0xFF, 0x00, 0x00]);
}

#[test_log::test]
fn test_corrupted_view_file() {
	let mut data = view_bytes();
	// first token of the loop 0 cel now overruns the width
	data[15] = 0x44;
	let err = View::from_bytes(&data).unwrap_err();
	assert!(err.is_format_error());
}
