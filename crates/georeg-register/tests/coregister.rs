//! End-to-end shifted-scene scenario: a handful of bright blocks on a dark
//! background, with the target copy translated by a known offset. The scene
//! is a scaled-up version of the classic shifted-square example; the 31x31
//! descriptor patch and the matching detection border need every block to
//! sit at least 19 pixels from the band edge, hence the 96x96 band.

use georeg_raster::RasterBand;
use georeg_register::{coregister, RegistrationConfig, RegistrationError};

const COLS: usize = 96;
const ROWS: usize = 96;
const BACKGROUND: u8 = 30;

// rectangles with distinct sizes and intensities so every corner has a
// unique appearance; (x, y, width, height, value)
const RECTANGLES: [(i32, i32, i32, i32, u8); 4] = [
    (22, 22, 8, 10, 220),
    (55, 25, 12, 7, 160),
    (25, 55, 9, 11, 250),
    (58, 56, 10, 12, 120),
];

/// Scene with every rectangle offset by (dx, dy) pixels.
fn scene(dx: i32, dy: i32) -> RasterBand<u8> {
    let mut band = RasterBand::from_size_val([COLS, ROWS].into(), BACKGROUND);
    let data = band.as_slice_mut();
    for &(x0, y0, w, h, value) in &RECTANGLES {
        for y in y0 + dy..y0 + dy + h {
            for x in x0 + dx..x0 + dx + w {
                if (0..COLS as i32).contains(&x) && (0..ROWS as i32).contains(&y) {
                    data[y as usize * COLS + x as usize] = value;
                }
            }
        }
    }
    band
}

fn assert_aligned(corrected: &RasterBand<f32>, reference: &RasterBand<u8>, dx: i32, dy: i32) {
    for y in 0..ROWS as i32 {
        for x in 0..COLS as i32 {
            let value = corrected.as_slice()[(y * COLS as i32 + x) as usize];
            let in_bounds = (0..COLS as i32).contains(&(x + dx))
                && (0..ROWS as i32).contains(&(y + dy));
            if in_bounds {
                let expected = reference.as_slice()[(y * COLS as i32 + x) as usize] as f32;
                assert_eq!(value, expected, "mismatch at ({x}, {y})");
            } else {
                // the strip exposed by the shift holds exactly the fill value
                assert_eq!(value, 0.0, "expected fill at ({x}, {y})");
            }
        }
    }
}

#[test]
fn recovers_positive_shift() {
    let reference = scene(0, 0);
    let target = scene(4, 3);

    let result = coregister(&reference, &target, None, None, &RegistrationConfig::default())
        .expect("registration should succeed");

    assert_eq!(result.offset, (4, 3));
    assert!(result.num_candidates >= 4);
    assert_aligned(&result.corrected, &reference, 4, 3);
}

#[test]
fn recovers_negative_shift() {
    let reference = scene(0, 0);
    let target = scene(-3, -2);

    let result = coregister(&reference, &target, None, None, &RegistrationConfig::default())
        .expect("registration should succeed");

    assert_eq!(result.offset, (-3, -2));
    assert_aligned(&result.corrected, &reference, -3, -2);
}

#[test]
fn identical_bands_have_zero_offset() {
    let reference = scene(0, 0);

    let result = coregister(&reference, &reference, None, None, &RegistrationConfig::default())
        .expect("registration should succeed");

    assert_eq!(result.offset, (0, 0));
    assert_eq!(
        result.corrected.as_slice(),
        reference
            .as_slice()
            .iter()
            .map(|&v| v as f32)
            .collect::<Vec<_>>()
            .as_slice()
    );
}

#[test]
fn featureless_reference_fails_fast() {
    let flat = RasterBand::from_size_val([COLS, ROWS].into(), BACKGROUND);
    let target = scene(2, 2);

    let result = coregister(&flat, &target, None, None, &RegistrationConfig::default());
    assert!(matches!(
        result,
        Err(RegistrationError::NoKeypoints("reference"))
    ));
}

#[test]
fn masking_the_features_away_fails_fast() {
    let reference = scene(0, 0);
    let target = scene(1, 1);

    // declare everything but the outer frame invalid on the reference
    let mut mask = vec![false; COLS * ROWS];
    for y in 0..4 {
        for x in 0..COLS {
            mask[y * COLS + x] = true;
        }
    }

    let result = coregister(
        &reference,
        &target,
        Some(&mask),
        None,
        &RegistrationConfig::default(),
    );
    assert!(matches!(
        result,
        Err(RegistrationError::NoKeypoints("reference"))
    ));
}

#[test]
fn registration_is_deterministic() {
    let reference = scene(0, 0);
    let target = scene(4, 3);
    let config = RegistrationConfig::default();

    let a = coregister(&reference, &target, None, None, &config).unwrap();
    let b = coregister(&reference, &target, None, None, &config).unwrap();

    assert_eq!(a.offset, b.offset);
    assert_eq!(a.num_candidates, b.num_candidates);
    assert_eq!(a.best_match, b.best_match);
    assert_eq!(a.corrected.as_slice(), b.corrected.as_slice());
}
