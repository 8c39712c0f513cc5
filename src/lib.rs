//! # voc-eval
//!
//! A Rust library for PASCAL VOC style object detection evaluation metrics.
//!
//! This library provides implementations of standard object detection metrics
//! including:
//! - **AP** (Average Precision per class, exact VOC integration)
//! - **mAP** (mean Average Precision across classes)
//! - **weighted mAP** (per-class AP weighted by label count)
//! - **Precision**, **Recall** and **F1 score**, per class and aggregate
//! - Raw and interpolated precision-recall curves
//!
//! ## Features
//!
//! - Greedy IoU-based matching of predictions to ground-truth labels
//! - Calculate IoU (Intersection over Union) between point-set bounding boxes
//! - VOC precision-envelope interpolation and step integration
//! - Per-class and dataset-wide confusion counts (TP/FP/FN)
//! - Confidence thresholding of true positives
//!
//! ## Quick Start
//!
//! ```rust
//! use voc_eval::{BoundingBox, DatasetEvaluation, Label, Prediction};
//!
//! # fn main() -> Result<(), voc_eval::VocEvalError> {
//! let labels = vec![
//!     Label::new("car", BoundingBox::from_corners(0.0, 0.0, 10.0, 10.0), "img_0"),
//!     Label::new("car", BoundingBox::from_corners(50.0, 50.0, 60.0, 60.0), "img_0"),
//! ];
//!
//! // Predictions must be sorted by descending confidence.
//! let predictions = vec![
//!     Prediction::new("car", BoundingBox::from_corners(0.0, 0.0, 10.0, 10.0), 0.9, "img_0"),
//!     Prediction::new("car", BoundingBox::from_corners(50.0, 50.0, 60.0, 60.0), 0.8, "img_0"),
//! ];
//!
//! let evaluation = DatasetEvaluation::new(&labels, &predictions, None, None)?;
//! assert!((evaluation.map - 1.0).abs() < 1e-10);
//!
//! let summary = evaluation.summary();
//! println!("car AP: {:.4}", summary["car"]);
//! println!("mAP: {:.4}", summary["mAP"]);
//! # Ok(())
//! # }
//! ```
//!
//! ## Input contract
//!
//! Labels and predictions are flat collections of per-box records tagged with
//! an image id and a class name. Evaluation partitions them by class, matches
//! per image, and scores each class independently; classes that appear only
//! in the predictions are not scored. Every evaluated class must have at
//! least one label, otherwise construction fails with
//! [`VocEvalError::EmptyLabelSet`].

pub mod error;
pub mod evaluator;
pub mod matching;
pub mod metrics;
pub mod partition;
pub mod types;

// Re-export commonly used types and functions
pub use error::{Result, VocEvalError};
pub use evaluator::{
    ClassEvaluation, DatasetEvaluation, DEFAULT_CONFIDENCE_THRESHOLD, DEFAULT_IOU_THRESHOLD,
};
pub use metrics::{calculate_iou, calculate_map, calculate_voc_ap, calculate_weighted_map};
pub use partition::{partition_labels, partition_predictions};
pub use types::{BoundingBox, Label, Point, Prediction, PrecisionRecallPoint};
