use serde::{Deserialize, Serialize};

use crate::image::{Point, ScalarImage};

/// How the moving image is sampled at non-grid positions.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum InterpolationMethod {
    NearestNeighbor,
    #[default]
    Linear,
}

impl std::fmt::Display for InterpolationMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NearestNeighbor => write!(f, "Nearest Neighbor"),
            Self::Linear => write!(f, "Linear"),
        }
    }
}

impl InterpolationMethod {
    /// Sample `image` at a continuous index.
    ///
    /// Returns `None` when the index lies outside the buffer, i.e. outside
    /// `[-0.5, size - 0.5)` on any axis.
    pub fn evaluate<const D: usize>(
        &self,
        image: &ScalarImage<D>,
        index: &Point<D>,
    ) -> Option<f64> {
        let size = image.size();
        if !is_inside_buffer(&size, index) {
            return None;
        }
        Some(match self {
            Self::NearestNeighbor => nearest_sample(image, &size, index),
            Self::Linear => linear_sample(image, &size, index),
        })
    }
}

fn is_inside_buffer<const D: usize>(size: &[usize; D], index: &Point<D>) -> bool {
    (0..D).all(|k| index[k] >= -0.5 && index[k] < size[k] as f64 - 0.5)
}

fn clamp_index(i: i64, len: usize) -> usize {
    i.clamp(0, len as i64 - 1) as usize
}

fn nearest_sample<const D: usize>(image: &ScalarImage<D>, size: &[usize; D], index: &Point<D>) -> f64 {
    let mut nearest = [0usize; D];
    for k in 0..D {
        nearest[k] = clamp_index(index[k].round() as i64, size[k]);
    }
    image.get(&nearest)
}

/// N-linear interpolation over the `2^D` surrounding grid samples;
/// neighbours beyond the edge are clamped onto it.
fn linear_sample<const D: usize>(image: &ScalarImage<D>, size: &[usize; D], index: &Point<D>) -> f64 {
    let mut base = [0i64; D];
    let mut frac = [0.0f64; D];
    for k in 0..D {
        let floor = index[k].floor();
        base[k] = floor as i64;
        frac[k] = index[k] - floor;
    }

    let mut value = 0.0;
    let mut corner = [0usize; D];
    for bits in 0..(1usize << D) {
        let mut weight = 1.0;
        for k in 0..D {
            let upper = (bits >> k) & 1 == 1;
            weight *= if upper { frac[k] } else { 1.0 - frac[k] };
            corner[k] = clamp_index(base[k] + upper as i64, size[k]);
        }
        if weight != 0.0 {
            value += weight * image.get(&corner);
        }
    }
    value
}

#[cfg(test)]
mod tests {
    use ndarray::{arr2, ArrayD};

    use super::*;

    fn ramp() -> ScalarImage<2> {
        let data: ArrayD<f64> = arr2(&[[0.0, 1.0, 2.0], [10.0, 11.0, 12.0]]).into_dyn();
        ScalarImage::from_array(data).unwrap()
    }

    #[test]
    fn linear_is_exact_on_grid_and_halfway() {
        let image = ramp();
        let m = InterpolationMethod::Linear;
        assert_eq!(m.evaluate(&image, &Point::<2>::new(1.0, 2.0)), Some(12.0));
        assert_eq!(m.evaluate(&image, &Point::<2>::new(0.5, 0.5)), Some(5.5));
    }

    #[test]
    fn nearest_rounds() {
        let image = ramp();
        let m = InterpolationMethod::NearestNeighbor;
        assert_eq!(m.evaluate(&image, &Point::<2>::new(0.6, 1.4)), Some(11.0));
    }

    #[test]
    fn outside_buffer_is_none() {
        let image = ramp();
        let m = InterpolationMethod::Linear;
        assert_eq!(m.evaluate(&image, &Point::<2>::new(-0.6, 0.0)), None);
        assert_eq!(m.evaluate(&image, &Point::<2>::new(0.0, 2.5)), None);
        // Within half a sample of the edge is still inside and clamps.
        assert_eq!(m.evaluate(&image, &Point::<2>::new(0.0, 2.4)), Some(2.0));
    }
}
