//! Class-name partitioning of labels and predictions.

use std::collections::HashMap;

use crate::types::{Label, Prediction};

/// Group labels by class name.
///
/// Input order is preserved within each class.
///
/// # Example
///
/// ```
/// use voc_eval::partition::partition_labels;
/// use voc_eval::types::{BoundingBox, Label};
///
/// let labels = vec![
///     Label::new("car", BoundingBox::from_corners(0.0, 0.0, 1.0, 1.0), "img_0"),
///     Label::new("person", BoundingBox::from_corners(2.0, 2.0, 3.0, 3.0), "img_0"),
///     Label::new("car", BoundingBox::from_corners(4.0, 4.0, 5.0, 5.0), "img_1"),
/// ];
/// let by_class = partition_labels(&labels);
/// assert_eq!(by_class["car"].len(), 2);
/// assert_eq!(by_class["person"].len(), 1);
/// ```
pub fn partition_labels(labels: &[Label]) -> HashMap<String, Vec<Label>> {
    let mut groups: HashMap<String, Vec<Label>> = HashMap::new();
    for label in labels {
        groups
            .entry(label.class_name.clone())
            .or_default()
            .push(label.clone());
    }
    groups
}

/// Group predictions by class name.
///
/// Input order is preserved within each class, so a confidence-descending
/// input stays confidence-descending per class.
pub fn partition_predictions(predictions: &[Prediction]) -> HashMap<String, Vec<Prediction>> {
    let mut groups: HashMap<String, Vec<Prediction>> = HashMap::new();
    for prediction in predictions {
        groups
            .entry(prediction.class_name.clone())
            .or_default()
            .push(prediction.clone());
    }
    groups
}
