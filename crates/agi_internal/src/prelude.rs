//! Prelude module for `agi_internal`.
//!
//! This module provides a convenient way to import commonly used types and traits.
//!
//! # Examples
//!
//! ```rust
//! use agi_internal::prelude::*;
//!
//! // Now you can use all common types directly
//! let directory = Directory::from_bytes(&[0x12, 0x3D, 0xFE]).unwrap();
//! assert_eq!(directory.volume(0), Some(1));
//!
//! let view = View::from_bytes(&[0, 0, 0, 0, 0]).unwrap();
//! assert_eq!(view.loop_count(), 0);
//! ```

// Re-export everything from agi_types::prelude
#[doc(inline)]
pub use agi_types::prelude::*;

// Re-export the entire agi_types module for advanced usage
#[doc(inline)]
pub use agi_types;
