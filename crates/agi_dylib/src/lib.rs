//! Forces dynamic linking of `agi_internal`, enabled through the `dynamic_linking` feature.

#![allow(clippy::single_component_path_imports)]

#[allow(unused_imports)]
use agi_internal;
