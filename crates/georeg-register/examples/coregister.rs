use georeg_raster::RasterBand;
use georeg_register::{coregister, RegistrationConfig};

// paints bright rectangles on a dark background, offset by (dx, dy)
fn scene(dx: i32, dy: i32) -> RasterBand<u8> {
    let (cols, rows) = (128usize, 128usize);
    let mut band = RasterBand::from_size_val([cols, rows].into(), 30);
    let data = band.as_slice_mut();
    let rectangles = [
        (24, 24, 10, 12, 220u8),
        (70, 28, 14, 9, 160),
        (30, 72, 9, 13, 250),
        (74, 76, 12, 10, 120),
    ];
    for (x0, y0, w, h, value) in rectangles {
        for y in y0 + dy..y0 + dy + h {
            for x in x0 + dx..x0 + dx + w {
                if (0..cols as i32).contains(&x) && (0..rows as i32).contains(&y) {
                    data[y as usize * cols + x as usize] = value;
                }
            }
        }
    }
    band
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    // synthetic pair: the target drifted by (5, 3) pixels
    let reference = scene(0, 0);
    let target = scene(5, 3);

    let result = coregister(&reference, &target, None, None, &RegistrationConfig::default())?;

    println!(
        "offset: ({}, {}) from {} candidates (best distance {})",
        result.offset.0, result.offset.1, result.num_candidates, result.best_match.distance
    );

    Ok(())
}
