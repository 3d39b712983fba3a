use crate::error::RasterError;

/// Raster size in pixels
///
/// A struct to represent the size of a raster band in pixels.
///
/// # Examples
///
/// ```
/// use georeg_raster::RasterSize;
///
/// let size = RasterSize {
///   width: 10,
///   height: 20,
/// };
///
/// assert_eq!(size.width, 10);
/// assert_eq!(size.height, 20);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RasterSize {
    /// Width of the raster in pixels
    pub width: usize,
    /// Height of the raster in pixels
    pub height: usize,
}

impl RasterSize {
    /// Number of samples in a single band of this size.
    pub fn numel(&self) -> usize {
        self.width * self.height
    }

    /// Linear index of the sample at (row, col) in row-major order.
    #[inline]
    pub fn index(&self, row: usize, col: usize) -> usize {
        row * self.width + col
    }
}

impl std::fmt::Display for RasterSize {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(
            f,
            "RasterSize {{ width: {}, height: {} }}",
            self.width, self.height
        )
    }
}

impl From<[usize; 2]> for RasterSize {
    fn from(size: [usize; 2]) -> Self {
        RasterSize {
            width: size[0],
            height: size[1],
        }
    }
}

/// A single raster band as a 2-D grid of samples.
///
/// Samples are stored row-major with the origin at the top-left pixel,
/// matching the layout delivered by raster drivers. The band itself carries
/// no georeferencing; pair it with a [`crate::GeoTransform`] when mapping
/// pixels to world coordinates.
#[derive(Clone, Debug, PartialEq)]
pub struct RasterBand<T> {
    size: RasterSize,
    data: Vec<T>,
}

impl<T> RasterBand<T> {
    /// Create a new band from raw samples.
    ///
    /// # Errors
    ///
    /// Returns an error if the sample count does not match the band size.
    ///
    /// # Examples
    ///
    /// ```
    /// use georeg_raster::{RasterBand, RasterSize};
    ///
    /// let band = RasterBand::<u8>::new([4, 2].into(), vec![0u8; 8]).unwrap();
    /// assert_eq!(band.cols(), 4);
    /// assert_eq!(band.rows(), 2);
    /// ```
    pub fn new(size: RasterSize, data: Vec<T>) -> Result<Self, RasterError> {
        if data.len() != size.numel() {
            return Err(RasterError::InvalidDataLength(data.len(), size.numel()));
        }
        Ok(Self { size, data })
    }

    /// Create a new band filled with a constant value.
    pub fn from_size_val(size: RasterSize, val: T) -> Self
    where
        T: Clone,
    {
        let data = vec![val; size.numel()];
        Self { size, data }
    }

    /// The size of the band in pixels.
    #[inline]
    pub fn size(&self) -> RasterSize {
        self.size
    }

    /// Number of rows (height).
    #[inline]
    pub fn rows(&self) -> usize {
        self.size.height
    }

    /// Number of columns (width).
    #[inline]
    pub fn cols(&self) -> usize {
        self.size.width
    }

    /// The samples as a flat row-major slice.
    #[inline]
    pub fn as_slice(&self) -> &[T] {
        &self.data
    }

    /// The samples as a mutable flat row-major slice.
    #[inline]
    pub fn as_slice_mut(&mut self) -> &mut [T] {
        &mut self.data
    }

    /// Sample at (row, col), or `None` when out of bounds.
    #[inline]
    pub fn get(&self, row: usize, col: usize) -> Option<&T> {
        if row >= self.size.height || col >= self.size.width {
            return None;
        }
        self.data.get(self.size.index(row, col))
    }

    /// Consume the band and return the raw samples.
    pub fn into_vec(self) -> Vec<T> {
        self.data
    }

    /// Cast the samples to a different type.
    ///
    /// # Errors
    ///
    /// Returns an error if any sample is not representable in the target
    /// type.
    pub fn cast<U>(&self) -> Result<RasterBand<U>, RasterError>
    where
        T: num_traits::NumCast + Copy,
        U: num_traits::NumCast,
    {
        let casted = self
            .data
            .iter()
            .map(|&x| U::from(x).ok_or(RasterError::CastError))
            .collect::<Result<Vec<U>, RasterError>>()?;

        RasterBand::new(self.size, casted)
    }
}
