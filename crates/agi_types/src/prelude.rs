//! Prelude module for `agi_types`.
//!
//! This module provides a convenient way to import commonly used types, traits, and constants.
//!
//! # Examples
//!
//! ```no_run
//! use agi_types::prelude::*;
//!
//! let config = DecodeConfig::strict();
//! let view = View::decode(&[0, 0, 0, 0, 0], &config);
//! ```

// File module types
#[doc(inline)]
pub use crate::file::{
	AgiFileError,
	// View types
	Cel,
	// Palette types
	Color,
	// Volume types
	Compression,
	// Configuration
	DecodeConfig,
	// Directory types
	Directory,
	DirectorySet,
	// Game folder
	Game,
	GameLayout,
	Location,
	Loop,
	PixelFormat,
	ResourceKind,
	ResourceType,
	Resolver,
	View,
	Volume,
	VolumeVersion,
	Word,
};

// Re-export the file module for advanced usage
#[doc(inline)]
pub use crate::file;
