//! Error types for the voc-eval library.

use thiserror::Error;

/// Result type for voc-eval operations.
pub type Result<T> = std::result::Result<T, VocEvalError>;

/// Error types that can occur during VOC evaluation.
#[derive(Error, Debug)]
pub enum VocEvalError {
    /// A class (or the whole label collection) has zero labels.
    ///
    /// Recall divides by the label count, so evaluation refuses to start
    /// rather than produce NaN or infinity.
    #[error("Empty label set: {0}")]
    EmptyLabelSet(String),

    /// Bounding box with too few points to define a region.
    #[error("Invalid bounding box: {0}")]
    InvalidBoundingBox(String),

    /// IoU or confidence threshold outside the valid range [0.0, 1.0].
    #[error("Invalid threshold: {0}")]
    InvalidThreshold(String),
}
