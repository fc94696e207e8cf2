pub mod config;
pub mod consts;
pub mod error;
pub mod image;
pub mod interpolate;
pub mod io;
pub mod metric;
pub mod resample;
pub mod transform;

