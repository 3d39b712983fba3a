//! Feature detection and description.
//!
//! Detects distinctive points in a raster band and encodes their local
//! appearance so two acquisitions of the same scene can be paired up for
//! co-registration.
//!
//! The detect/describe split follows the classic recipe: FAST corners for
//! localization, a steered binary descriptor for appearance.

mod brief;
pub use brief::*;

mod extractor;
pub use extractor::*;

mod fast;
pub use fast::*;
