//! Game folder loading

use std::io;

use agi_rs::prelude::*;

use crate::fixtures::{DESCRIPTION, PICTURE, write_v2_game, write_v3_game};

#[test_log::test]
fn test_open_v2_game() {
	let dir = tempfile::tempdir().unwrap();
	write_v2_game(dir.path(), false);

	let game = Game::open(dir.path(), &GameLayout::default()).unwrap();
	assert_eq!(game.version(), VolumeVersion::V2);
	assert_eq!(game.directories().get(ResourceType::View).numbers(), vec![1, 2, 3]);
	assert_eq!(game.directories().get(ResourceType::Picture).count(), 0);
	assert!(game.volume(0).is_some());
	assert!(game.volume(2).is_none());

	assert_eq!(&*game.raw(ResourceType::Logic, 0).unwrap(), &[1, 2, 3]);

	let view = game.view(1).unwrap();
	assert_eq!(view.loop_count(), 2);
	assert_eq!(view.description(), Some(DESCRIPTION));
	assert_eq!(game.view(2).unwrap(), view);
}

#[test_log::test]
fn test_lowercase_file_names() {
	let dir = tempfile::tempdir().unwrap();
	write_v2_game(dir.path(), true);

	let game = Game::open(dir.path(), &GameLayout::default()).unwrap();
	assert_eq!(game.version(), VolumeVersion::V2);
	assert!(game.view(1).is_ok());
}

#[test_log::test]
fn test_missing_resources() {
	let dir = tempfile::tempdir().unwrap();
	write_v2_game(dir.path(), false);
	let game = Game::open(dir.path(), &GameLayout::default()).unwrap();

	let err = game.view(0).unwrap_err();
	assert!(matches!(
		err,
		AgiFileError::ResourceNotFound {
			resource_type: ResourceType::View,
			number: 0
		}
	));
	assert_eq!(err.to_string(), "view 0 does not exist");

	// view 3 lives in a volume the folder does not have
	let err = game.view(3).unwrap_err();
	assert!(matches!(err, AgiFileError::IOError(ref e) if e.kind() == io::ErrorKind::NotFound));
}

#[test_log::test]
fn test_open_v3_game() {
	let dir = tempfile::tempdir().unwrap();
	write_v3_game(dir.path(), "GR");

	let game = Game::open(dir.path(), &GameLayout::default()).unwrap();
	assert_eq!(game.version(), VolumeVersion::V3);
	assert_eq!(game.directories().get(ResourceType::View).count(), 3);
	assert_eq!(game.directories().get(ResourceType::Picture).count(), 1);
	assert_eq!(game.directories().get(ResourceType::Logic).count(), 0);

	let view = game.view(0).unwrap();
	assert_eq!(view.description(), Some(DESCRIPTION));
}

#[test_log::test]
fn test_v3_compressed_resources() {
	let dir = tempfile::tempdir().unwrap();
	write_v3_game(dir.path(), "GR");
	let game = Game::open(dir.path(), &GameLayout::default()).unwrap();

	// LZW view decodes to the same view as the plain copy
	let view = game.view(1).unwrap();
	assert_eq!(view, game.view(0).unwrap());
	assert_eq!(view.description(), Some(DESCRIPTION));
	assert!(view.cel(1, 0).unwrap().is_mirrored());

	assert_eq!(&*game.raw(ResourceType::Picture, 0).unwrap(), &PICTURE);

	let err = game.view(2).unwrap_err();
	assert!(err.is_format_error());
	assert!(matches!(err, AgiFileError::DecompressedSize { actual: 8, .. }));
}

#[test_log::test]
fn test_explicit_v3_layout() {
	let dir = tempfile::tempdir().unwrap();
	write_v3_game(dir.path(), "KQ4");

	let game = Game::open(dir.path(), &GameLayout::v3("KQ4")).unwrap();
	assert_eq!(game.version(), VolumeVersion::V3);
	assert!(game.view(0).is_ok());

	let err = Game::open(dir.path(), &GameLayout::v3("MH")).unwrap_err();
	assert!(matches!(err, AgiFileError::IOError(_)));
}

#[test_log::test]
fn test_game_config() {
	let dir = tempfile::tempdir().unwrap();
	write_v2_game(dir.path(), false);

	let config = DecodeConfig::default().with_pixel_format(PixelFormat::Bgra8888);
	let game = Game::open(dir.path(), &GameLayout::default()).unwrap().with_config(config);
	let view = game.view(1).unwrap();
	let cel = view.cel(0, 0).unwrap();
	assert_eq!(cel.pixel_format(), PixelFormat::Bgra8888);
	assert_eq!(cel.transparent(), Resolver::for_format(PixelFormat::Bgra8888).resolve(0).unwrap());
}

#[test_log::test]
fn test_empty_folder() {
	let dir = tempfile::tempdir().unwrap();
	let err = Game::open(dir.path(), &GameLayout::default()).unwrap_err();
	assert!(matches!(err, AgiFileError::IOError(_)));
}
