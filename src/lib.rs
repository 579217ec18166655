#![allow(clippy::single_component_path_imports)]
#![cfg_attr(docsrs, feature(doc_auto_cfg))]

//! `agi-rs` decodes the resource files of Sierra's Adventure Game Interpreter:
//! resource directories, volumes and view sprites.
//!
//! ```no_run
//! use agi_rs::prelude::*;
//!
//! # fn main() -> Result<(), AgiFileError> {
//! let game = Game::open("sq1", &GameLayout::default())?;
//! for number in game.directories().get(ResourceType::View).numbers() {
//!     let view = game.view(number)?;
//!     println!("view {}: {} loops", number, view.loop_count());
//! }
//! # Ok(())
//! # }
//! ```
pub use agi_internal::*;

#[cfg(all(feature = "dynamic_linking", not(target_family = "wasm")))]
#[allow(unused_imports)]
use agi_dylib;
