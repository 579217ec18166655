//! Directory files on disk

use agi_rs::prelude::*;

use crate::fixtures::directory_bytes;

#[test_log::test]
fn test_open_directory_file() {
	let dir = tempfile::tempdir().unwrap();
	let path = dir.path().join("VIEWDIR");

	let mut data = directory_bytes(&[Some(Location::new(1, 0x2345)), None, Some(Location::new(14, 0xF_FFFE))]);
	// trailing partial record
	data.extend_from_slice(&[0x00, 0x01]);
	std::fs::write(&path, &data).unwrap();

	let directory = Directory::open(&path).unwrap();
	assert_eq!(directory.count(), 2);
	assert_eq!(directory.volume(0), Some(1));
	assert_eq!(directory.offset(0), Some(0x2345));
	assert_eq!(directory.volume(2), Some(14));
	assert_eq!(directory.offset(2), Some(0xF_FFFE));
	for number in 3..=255 {
		assert!(!directory.contains(number));
	}

	let expected: u32 = data[..9].iter().map(|&b| u32::from(b)).sum();
	assert_eq!(directory.checksum(), expected);

	let reopened = Directory::open(&path).unwrap();
	assert_eq!(reopened, directory);
}

#[test_log::test]
fn test_directory_display() {
	let directory: Directory = [(4u8, Location::new(2, 0x100))].into_iter().collect();
	let text = directory.to_string();
	assert!(text.starts_with("Directory: 1 entries"));
	assert!(text.contains("  4: vol.2 @ 0x00100"));
}

#[test_log::test]
fn test_missing_directory_file() {
	let dir = tempfile::tempdir().unwrap();
	let err = Directory::open(dir.path().join("NOPE")).unwrap_err();
	assert!(matches!(err, AgiFileError::IOError(_)));
}
