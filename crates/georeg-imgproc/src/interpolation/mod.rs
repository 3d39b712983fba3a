//! Pixel interpolation methods for raster resampling.
//!
//! Used by the warp module when mapping destination pixels back into the
//! source grid at fractional positions.

mod bilinear;
pub(crate) mod interpolate;
mod nearest;

pub use interpolate::{interpolate_pixel, InterpolationMode};
