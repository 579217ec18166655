//! Integration tests for `agi-rs` file types

mod directory;
mod fixtures;
mod game;
mod view;
