#![deny(missing_docs)]
#![doc = env!("CARGO_PKG_DESCRIPTION")]

/// raster band containers and sizes.
pub mod band;

/// error types for the raster module.
pub mod error;

/// pixel to world coordinate mapping.
pub mod geotransform;

/// operations on raster bands (masks, quantization).
pub mod ops;

pub use crate::band::{RasterBand, RasterSize};
pub use crate::error::RasterError;
pub use crate::geotransform::GeoTransform;
