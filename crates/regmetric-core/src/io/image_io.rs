use std::path::Path;

use ndarray::Array2;
use tracing::debug;

use crate::error::Result;
use crate::image::ScalarImage;

/// Load a grayscale image file as a 2-D image with unit spacing.
///
/// Samples are normalised to `[0, 1]` from 16-bit luma. Axis 0 is the row.
pub fn load_image(path: &Path) -> Result<ScalarImage<2>> {
    let img = image::open(path)?;
    let gray = img.to_luma16();
    let (w, h) = gray.dimensions();
    let mut data = Array2::<f64>::zeros((h as usize, w as usize));

    for row in 0..h as usize {
        for col in 0..w as usize {
            let pixel = gray.get_pixel(col as u32, row as u32);
            data[[row, col]] = pixel.0[0] as f64 / 65535.0;
        }
    }

    debug!(path = %path.display(), width = w, height = h, "Loaded image");
    ScalarImage::from_array(data.into_dyn())
}
