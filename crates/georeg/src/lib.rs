#![doc = include_str!(concat!("../", env!("CARGO_PKG_README")))]

#[doc(inline)]
pub use georeg_raster as raster;

#[doc(inline)]
pub use georeg_imgproc as imgproc;

#[doc(inline)]
pub use georeg_register as register;
