//! Scalar images with physical geometry, index regions and masks.

pub mod mask;
pub mod region;
pub mod scalar;

pub use mask::{BinaryImageMask, ImageMask};
pub use region::{ImageRegion, RegionIter};
pub use scalar::ScalarImage;

/// A point (or continuous index) in D-dimensional space.
pub type Point<const D: usize> = nalgebra::SVector<f64, D>;

/// Direction cosines: column `k` is the physical direction of index axis `k`.
pub type Direction<const D: usize> = nalgebra::SMatrix<f64, D, D>;
