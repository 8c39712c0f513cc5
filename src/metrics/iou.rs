//! Intersection over Union (IoU) calculation.

use crate::error::Result;
use crate::types::BoundingBox;

/// Calculate the Intersection over Union (IoU) between two bounding boxes.
///
/// Both boxes are reduced to their axis-aligned envelopes first, so boxes
/// given as more than two corner points are handled the same way.
///
/// # Arguments
///
/// * `bbox1` - First bounding box
/// * `bbox2` - Second bounding box
///
/// # Returns
///
/// Returns a value between 0.0 (no overlap) and 1.0 (perfect overlap).
///
/// # Errors
///
/// Returns an error if either box has fewer than the minimum number of points.
///
/// # Example
///
/// ```
/// use voc_eval::metrics::iou::calculate_iou;
/// use voc_eval::types::BoundingBox;
///
/// let bbox1 = BoundingBox::from_corners(0.0, 0.0, 10.0, 10.0);
/// let bbox2 = BoundingBox::from_corners(5.0, 5.0, 15.0, 15.0);
/// let iou = calculate_iou(&bbox1, &bbox2).unwrap();
/// assert!(iou > 0.0 && iou < 1.0);
/// ```
pub fn calculate_iou(bbox1: &BoundingBox, bbox2: &BoundingBox) -> Result<f64> {
    let a = bbox1.extent()?;
    let b = bbox2.extent()?;

    // Intersection rectangle
    let x_left = a.x_min.max(b.x_min);
    let y_top = a.y_min.max(b.y_min);
    let x_right = a.x_max.min(b.x_max);
    let y_bottom = a.y_max.min(b.y_max);

    if x_right < x_left || y_bottom < y_top {
        return Ok(0.0);
    }

    let intersection_area = (x_right - x_left) * (y_bottom - y_top);
    let union_area = a.area() + b.area() - intersection_area;

    // Degenerate boxes have zero union
    if union_area == 0.0 {
        return Ok(0.0);
    }

    Ok(intersection_area / union_area)
}
