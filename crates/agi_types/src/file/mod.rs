//! File type support for `agi-rs` project.

mod error;

pub mod compression;
pub mod config;
pub mod dir;
pub mod game;
pub mod palette;
pub mod view;
pub mod vol;
pub mod word;

// Re-export unified error type
pub use error::{AgiFileError, ResourceKind};

// Re-export main file types
pub use compression::Compression;
pub use config::DecodeConfig;
pub use dir::{Directory, DirectorySet, Location, ResourceType};
pub use game::{Game, GameLayout};
pub use palette::{Color, EGA_COLORS, PixelFormat, Resolver};
pub use view::{Cel, CelHeader, Loop, View};
pub use vol::{EntryHeader, Volume, VolumeVersion};
pub use word::Word;
