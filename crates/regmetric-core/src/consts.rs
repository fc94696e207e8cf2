/// Minimum sample count to use sample-level Rayon parallelism when resampling.
pub const PARALLEL_SAMPLE_THRESHOLD: usize = 65_536;

/// Default finite-difference step for numeric derivatives.
pub const DEFAULT_DERIVATIVE_DELTA: f64 = 0.001;

/// Rescaling factor the calibration loop starts from.
pub const INITIAL_RESCALING_FACTOR: f64 = 1.0;

/// Multiplier applied to the rescaling factor on each calibration step.
pub const RESCALING_STEP: f64 = 10.0;

/// Derivative taps of the separable Sobel operator, in correlation order
/// (applied to the samples at offsets -1, 0, +1).
pub const SOBEL_DERIVATIVE: [f64; 3] = [-1.0, 0.0, 1.0];

/// Smoothing taps of the separable Sobel operator.
pub const SOBEL_SMOOTHING: [f64; 3] = [1.0, 2.0, 1.0];
