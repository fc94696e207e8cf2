use thiserror::Error;

#[derive(Error, Debug)]
pub enum MetricError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Image format error: {0}")]
    ImageError(#[from] image::ImageError),

    #[error("Array shape error: {0}")]
    Shape(#[from] ndarray::ShapeError),

    /// Degenerate numerical input, e.g. no samples inside the mask.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// An operation was called in a state that does not allow it.
    #[error("Precondition violated: {0}")]
    PreconditionViolation(String),

    #[error("Geometry mismatch: expected {expected:?}, got {actual:?}")]
    GeometryMismatch {
        expected: Vec<usize>,
        actual: Vec<usize>,
    },

    #[error("Parameter count mismatch: expected {expected}, got {actual}")]
    ParameterCount { expected: usize, actual: usize },

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

impl MetricError {
    pub fn invalid_input(msg: impl Into<String>) -> Self {
        Self::InvalidInput(msg.into())
    }

    pub fn precondition(msg: impl Into<String>) -> Self {
        Self::PreconditionViolation(msg.into())
    }

    pub fn invalid_config(msg: impl Into<String>) -> Self {
        Self::InvalidConfig(msg.into())
    }

    pub fn geometry(expected: &[usize], actual: &[usize]) -> Self {
        Self::GeometryMismatch {
            expected: expected.to_vec(),
            actual: actual.to_vec(),
        }
    }
}

pub type Result<T> = std::result::Result<T, MetricError>;
