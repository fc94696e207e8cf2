use super::{Point, ScalarImage};

/// Spatial predicate restricting which fixed-image samples take part in a
/// metric. A metric without a mask includes every sample of its region.
pub trait ImageMask<const D: usize>: Send + Sync {
    fn is_inside(&self, point: &Point<D>) -> bool;
}

impl<const D: usize, F> ImageMask<D> for F
where
    F: Fn(&Point<D>) -> bool + Send + Sync,
{
    fn is_inside(&self, point: &Point<D>) -> bool {
        self(point)
    }
}

/// Mask backed by an image: non-zero samples are inside.
///
/// Points are looked up at their nearest grid index; points outside the
/// mask image's grid are outside the mask.
#[derive(Clone, Debug)]
pub struct BinaryImageMask<const D: usize> {
    image: ScalarImage<D>,
}

impl<const D: usize> BinaryImageMask<D> {
    pub fn new(image: ScalarImage<D>) -> Self {
        Self { image }
    }

    pub fn image(&self) -> &ScalarImage<D> {
        &self.image
    }
}

impl<const D: usize> ImageMask<D> for BinaryImageMask<D> {
    fn is_inside(&self, point: &Point<D>) -> bool {
        self.image
            .physical_point_to_index(point)
            .map(|index| self.image.get(&index) != 0.0)
            .unwrap_or(false)
    }
}

/// Whether the sample at `index` of `image` is included under `mask`.
///
/// The physical point is only computed when a mask is present.
pub(crate) fn includes<const D: usize>(
    mask: Option<&dyn ImageMask<D>>,
    image: &ScalarImage<D>,
    index: &[usize; D],
) -> bool {
    match mask {
        None => true,
        Some(mask) => mask.is_inside(&image.index_to_physical_point(index)),
    }
}
