//! Metrics calculation modules for VOC evaluation.

pub mod ap;
pub mod f1_score;
pub mod iou;
pub mod precision_recall;

pub use ap::{calculate_map, calculate_voc_ap, calculate_weighted_map, interpolate_precision};
pub use f1_score::{calculate_f1_from_counts, calculate_f1_score};
pub use iou::calculate_iou;
pub use precision_recall::{calculate_precision_recall, PrecisionRecall};
