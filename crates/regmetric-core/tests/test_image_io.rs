use image::{GrayImage, ImageBuffer, Luma};

use regmetric_core::error::MetricError;
use regmetric_core::io::load_image;

#[test]
fn test_load_16bit_png() {
    let mut img = ImageBuffer::<Luma<u16>, Vec<u16>>::new(3, 2);
    img.put_pixel(0, 0, Luma([0]));
    img.put_pixel(1, 0, Luma([65535]));
    img.put_pixel(2, 1, Luma([32768]));

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("fixed.png");
    img.save(&path).unwrap();

    let loaded = load_image(&path).unwrap();
    // Axis 0 is the row.
    assert_eq!(loaded.size(), [2, 3]);
    assert_eq!(loaded.get(&[0, 0]), 0.0);
    assert_eq!(loaded.get(&[0, 1]), 1.0);
    assert!((loaded.get(&[1, 2]) - 0.5).abs() < 1e-4);
    assert_eq!(loaded.spacing(), &[1.0, 1.0]);
}

#[test]
fn test_load_8bit_png_is_normalised() {
    let mut img = GrayImage::new(4, 4);
    img.put_pixel(3, 3, Luma([255]));

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("mask.png");
    img.save(&path).unwrap();

    let loaded = load_image(&path).unwrap();
    assert_eq!(loaded.get(&[3, 3]), 1.0);
    assert_eq!(loaded.get(&[0, 0]), 0.0);
}

#[test]
fn test_missing_file_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    let err = load_image(&dir.path().join("absent.png")).unwrap_err();
    assert!(matches!(
        err,
        MetricError::ImageError(_) | MetricError::Io(_)
    ));
}
