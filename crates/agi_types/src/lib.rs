//! This crate provides core data types and file format support for the `agi-rs` project.
//!
//! # File Formats
//!
//! - **Directory**: `LOGDIR`/`PICDIR`/`SNDDIR`/`VIEWDIR` tables mapping resource numbers to volume locations
//! - **Volume**: `VOL.N` files holding the resources themselves
//! - **View**: sprites made of animation loops and run-length encoded cels
//! - **Palette**: the fixed 16-color EGA palette and its display-pixel resolvers
//!
//! # Examples
//!
//! Using the prelude (recommended):
//!
//! ```no_run
//! use agi_types::prelude::*;
//!
//! # fn main() -> Result<(), AgiFileError> {
//! let game = Game::open("kq1", &GameLayout::default())?;
//! let view = game.view(0)?;
//! if let Some(cel) = view.cel(0, 0) {
//!     println!("{}x{}", cel.width(), cel.height());
//! }
//! # Ok(())
//! # }
//! ```
//!
//! Or use explicit paths:
//!
//! ```no_run
//! use agi_types::file::Directory;
//!
//! # fn main() -> Result<(), agi_types::file::AgiFileError> {
//! let dir = Directory::open("VIEWDIR")?;
//! println!("{} views", dir.count());
//! # Ok(())
//! # }
//! ```

pub mod file;

/// `use agi_types::prelude::*;` to import commonly used items.
pub mod prelude;
