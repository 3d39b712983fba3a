//! Geometric band transformations.

mod affine;

pub use affine::{invert_affine_transform, translation_matrix, warp_affine};
