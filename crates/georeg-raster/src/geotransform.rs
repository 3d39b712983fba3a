use crate::band::RasterSize;

/// Six-coefficient affine transform mapping pixel to world coordinates.
///
/// The coefficients follow the usual raster-driver convention:
///
/// ```text
/// x = c[0] + col * c[1] + row * c[2]
/// y = c[3] + col * c[4] + row * c[5]
/// ```
///
/// where `c[0], c[3]` is the world position of the top-left corner, `c[1]`
/// the pixel width and `c[5]` the (usually negative) pixel height.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GeoTransform(pub [f64; 6]);

impl GeoTransform {
    /// Identity transform: pixel coordinates are world coordinates.
    pub fn identity() -> Self {
        Self([0.0, 1.0, 0.0, 0.0, 0.0, 1.0])
    }

    /// Map a pixel position (col, row) to world coordinates (x, y).
    ///
    /// Fractional pixel positions are valid input; (0.0, 0.0) maps to the
    /// top-left corner of the top-left pixel.
    pub fn pixel_to_world(&self, col: f64, row: f64) -> (f64, f64) {
        let c = &self.0;
        let x = c[0] + col * c[1] + row * c[2];
        let y = c[3] + col * c[4] + row * c[5];
        (x, y)
    }

    /// Map world coordinates (x, y) to a fractional pixel position
    /// (col, row).
    ///
    /// Follows the OpenCV affine-inversion convention: a singular transform
    /// inverts to the zero transform, so all world positions collapse onto
    /// pixel (0, 0).
    pub fn world_to_pixel(&self, x: f64, y: f64) -> (f64, f64) {
        let c = &self.0;

        let determinant = c[1] * c[5] - c[2] * c[4];
        let inv_determinant = if determinant != 0.0 {
            1.0 / determinant
        } else {
            0.0
        };

        let dx = x - c[0];
        let dy = y - c[3];

        let col = (dx * c[5] - dy * c[2]) * inv_determinant;
        let row = (dy * c[1] - dx * c[4]) * inv_determinant;
        (col, row)
    }

    /// World-coordinate extent (min_x, min_y, max_x, max_y) of a raster of
    /// the given size under this transform.
    pub fn extent(&self, size: RasterSize) -> (f64, f64, f64, f64) {
        let (w, h) = (size.width as f64, size.height as f64);
        let corners = [
            self.pixel_to_world(0.0, 0.0),
            self.pixel_to_world(w, 0.0),
            self.pixel_to_world(0.0, h),
            self.pixel_to_world(w, h),
        ];

        let mut min_x = f64::INFINITY;
        let mut min_y = f64::INFINITY;
        let mut max_x = f64::NEG_INFINITY;
        let mut max_y = f64::NEG_INFINITY;
        for (x, y) in corners {
            min_x = min_x.min(x);
            min_y = min_y.min(y);
            max_x = max_x.max(x);
            max_y = max_y.max(y);
        }

        (min_x, min_y, max_x, max_y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    // north-up transform: 30 m pixels, origin at (300000, 5000000)
    fn north_up() -> GeoTransform {
        GeoTransform([300000.0, 30.0, 0.0, 5000000.0, 0.0, -30.0])
    }

    #[test]
    fn pixel_world_round_trip() {
        let gt = north_up();
        let (x, y) = gt.pixel_to_world(10.0, 20.0);
        assert_relative_eq!(x, 300300.0);
        assert_relative_eq!(y, 4999400.0);

        let (col, row) = gt.world_to_pixel(x, y);
        assert_relative_eq!(col, 10.0);
        assert_relative_eq!(row, 20.0);
    }

    #[test]
    fn rotated_round_trip() {
        let gt = GeoTransform([100.0, 2.0, 0.5, 200.0, -0.5, -2.0]);
        let (x, y) = gt.pixel_to_world(3.0, 7.0);
        let (col, row) = gt.world_to_pixel(x, y);
        assert_relative_eq!(col, 3.0, epsilon = 1e-9);
        assert_relative_eq!(row, 7.0, epsilon = 1e-9);
    }

    #[test]
    fn singular_collapses_to_origin() {
        let gt = GeoTransform([0.0, 0.0, 0.0, 0.0, 0.0, 0.0]);
        assert_eq!(gt.world_to_pixel(123.0, 456.0), (0.0, 0.0));
    }

    #[test]
    fn extent_north_up() {
        let gt = north_up();
        let (min_x, min_y, max_x, max_y) = gt.extent([100, 50].into());
        assert_relative_eq!(min_x, 300000.0);
        assert_relative_eq!(max_x, 303000.0);
        assert_relative_eq!(min_y, 4998500.0);
        assert_relative_eq!(max_y, 5000000.0);
    }
}
