//! This module is separated into its own crate to enable simple dynamic linking for `agi-rs`, and should not be used directly.

/// `use agi_rs::prelude::*;` to import commonly used items.
pub mod prelude;

// Re-export agi_types for convenience
pub use agi_types;

// Re-export commonly used types at crate root
pub use agi_types::file::{AgiFileError, Directory, Game, GameLayout, View};
