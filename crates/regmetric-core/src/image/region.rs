/// A rectangular block of sample indices: `index` is the first sample,
/// `size` the extent along each axis.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ImageRegion<const D: usize> {
    pub index: [usize; D],
    pub size: [usize; D],
}

impl<const D: usize> ImageRegion<D> {
    pub fn new(index: [usize; D], size: [usize; D]) -> Self {
        Self { index, size }
    }

    /// Region starting at the origin index with the given size.
    pub fn from_size(size: [usize; D]) -> Self {
        Self {
            index: [0; D],
            size,
        }
    }

    pub fn number_of_samples(&self) -> usize {
        self.size.iter().product()
    }

    pub fn is_empty(&self) -> bool {
        self.size.iter().any(|&s| s == 0)
    }

    pub fn contains_index(&self, index: &[usize; D]) -> bool {
        (0..D).all(|k| index[k] >= self.index[k] && index[k] < self.index[k] + self.size[k])
    }

    /// True if `other` lies entirely within this region.
    pub fn contains_region(&self, other: &ImageRegion<D>) -> bool {
        (0..D).all(|k| {
            other.index[k] >= self.index[k]
                && other.index[k] + other.size[k] <= self.index[k] + self.size[k]
        })
    }

    /// Iterate indices in row-major order (last axis fastest).
    pub fn iter(&self) -> RegionIter<D> {
        RegionIter {
            region: *self,
            current: self.index,
            remaining: self.number_of_samples(),
        }
    }

    /// Flattened `index ++ size`, used when reporting mismatches.
    pub(crate) fn to_vec(self) -> Vec<usize> {
        self.index.iter().chain(self.size.iter()).copied().collect()
    }
}

impl<const D: usize> IntoIterator for &ImageRegion<D> {
    type Item = [usize; D];
    type IntoIter = RegionIter<D>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

pub struct RegionIter<const D: usize> {
    region: ImageRegion<D>,
    current: [usize; D],
    remaining: usize,
}

impl<const D: usize> Iterator for RegionIter<D> {
    type Item = [usize; D];

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        let out = self.current;
        self.remaining -= 1;

        for axis in (0..D).rev() {
            self.current[axis] += 1;
            if self.current[axis] < self.region.index[axis] + self.region.size[axis] {
                break;
            }
            self.current[axis] = self.region.index[axis];
        }

        Some(out)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<const D: usize> ExactSizeIterator for RegionIter<D> {}
