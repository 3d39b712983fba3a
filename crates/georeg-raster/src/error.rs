/// An error type for raster band operations.
#[derive(thiserror::Error, Debug)]
pub enum RasterError {
    /// Error when the data length does not match the declared band size.
    #[error("Data length ({0}) does not match the band size ({1})")]
    InvalidDataLength(usize, usize),

    /// Error when a validity mask does not match the band size.
    #[error("Mask length ({0}) does not match the band size ({1})")]
    MaskSizeMismatch(usize, usize),

    /// Error when casting the band samples to another type fails.
    #[error("Failed to cast the band samples")]
    CastError,
}
