use crate::error::{MetricError, Result};
use crate::image::mask::includes;
use crate::image::{ImageMask, ImageRegion, ScalarImage};

/// The fixed-image indices a metric sums over: every index of the fixed
/// region whose physical point passes the mask, in row-major order.
///
/// The mask and the fixed geometry never change after initialisation, so
/// the selection is made once and reused by every evaluation.
#[derive(Clone, Debug)]
pub struct SampleSet<const D: usize> {
    region: ImageRegion<D>,
    indices: Vec<[usize; D]>,
}

impl<const D: usize> SampleSet<D> {
    pub fn new(
        fixed: &ScalarImage<D>,
        region: &ImageRegion<D>,
        mask: Option<&dyn ImageMask<D>>,
    ) -> Result<Self> {
        let full = fixed.largest_possible_region();
        if !full.contains_region(region) {
            return Err(MetricError::geometry(&full.to_vec(), &region.to_vec()));
        }
        let indices = region
            .iter()
            .filter(|index| includes(mask, fixed, index))
            .collect();
        Ok(Self {
            region: *region,
            indices,
        })
    }

    pub fn region(&self) -> &ImageRegion<D> {
        &self.region
    }

    pub fn indices(&self) -> &[[usize; D]] {
        &self.indices
    }

    pub fn len(&self) -> usize {
        self.indices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }
}
