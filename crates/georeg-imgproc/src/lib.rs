#![deny(missing_docs)]
#![doc = env!("CARGO_PKG_DESCRIPTION")]

/// feature detection and description module.
pub mod features;

/// utilities for interpolation.
pub mod interpolation;

/// geometric transformations module.
pub mod warp;
