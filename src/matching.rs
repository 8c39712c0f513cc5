//! Greedy matching of predictions to ground-truth labels.

use std::collections::HashMap;

use crate::error::Result;
use crate::metrics::iou::calculate_iou;
use crate::types::{Label, Prediction};

/// Match observation for a single prediction.
#[derive(Debug, Clone)]
pub struct Match {
    /// Highest IoU against any label in the prediction's image.
    pub iou: f64,
    /// The prediction's confidence score.
    pub confidence: f64,
    /// Whether the best-IoU label had already been claimed by an earlier
    /// prediction at the time this prediction was processed.
    pub gt_already_claimed: bool,
}

/// Match predictions to ground-truth labels for a single class.
///
/// Labels are grouped by image id; each prediction is compared against every
/// label in its own image and observes the label with maximum IoU (ties go to
/// the first label in input order). When that IoU reaches `iou_threshold` and
/// the label is still unclaimed, the prediction claims it; the claim is only
/// visible to later predictions, so the returned observation always carries
/// the claim state from before this prediction ran. Predictions whose image
/// has no labels observe an IoU of 0.0.
///
/// Predictions are processed in input order, which callers must keep sorted
/// by descending confidence. Claiming ignores the confidence threshold; a
/// low-confidence prediction can claim a label and block later ones.
///
/// # Returns
///
/// Returns one [`Match`] per prediction, in input order.
///
/// # Errors
///
/// Propagates [`InvalidBoundingBox`] from the IoU computation.
///
/// [`InvalidBoundingBox`]: crate::error::VocEvalError::InvalidBoundingBox
pub fn match_predictions(
    labels: &[Label],
    predictions: &[Prediction],
    iou_threshold: f64,
) -> Result<Vec<Match>> {
    // Label indices per image, with a parallel claim-flag array scoped to
    // this run.
    let mut labels_by_image: HashMap<&str, Vec<usize>> = HashMap::new();
    for (idx, label) in labels.iter().enumerate() {
        labels_by_image
            .entry(label.image_id.as_str())
            .or_default()
            .push(idx);
    }
    let mut claimed = vec![false; labels.len()];

    let mut matches = Vec::with_capacity(predictions.len());
    for prediction in predictions {
        let mut best: Option<(usize, f64)> = None;
        if let Some(candidates) = labels_by_image.get(prediction.image_id.as_str()) {
            for &label_idx in candidates {
                let iou = calculate_iou(&prediction.bbox, &labels[label_idx].bbox)?;
                // Strict comparison keeps the first occurrence on ties.
                if best.map_or(true, |(_, best_iou)| iou > best_iou) {
                    best = Some((label_idx, iou));
                }
            }
        }

        let (iou, gt_already_claimed) = match best {
            Some((label_idx, max_iou)) => {
                let already = claimed[label_idx];
                if max_iou >= iou_threshold && !already {
                    claimed[label_idx] = true;
                }
                (max_iou, already)
            }
            None => (0.0, false),
        };

        matches.push(Match {
            iou,
            confidence: prediction.score,
            gt_already_claimed,
        });
    }

    Ok(matches)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::BoundingBox;

    fn label(bbox: BoundingBox, image_id: &str) -> Label {
        Label::new("car", bbox, image_id)
    }

    fn prediction(bbox: BoundingBox, score: f64, image_id: &str) -> Prediction {
        Prediction::new("car", bbox, score, image_id)
    }

    #[test]
    fn test_perfect_match() {
        let labels = vec![label(BoundingBox::from_corners(0.0, 0.0, 10.0, 10.0), "a")];
        let predictions = vec![prediction(
            BoundingBox::from_corners(0.0, 0.0, 10.0, 10.0),
            0.9,
            "a",
        )];

        let matches = match_predictions(&labels, &predictions, 0.5).unwrap();
        assert_eq!(matches.len(), 1);
        assert!((matches[0].iou - 1.0).abs() < 1e-10);
        assert!(!matches[0].gt_already_claimed);
    }

    #[test]
    fn test_no_labels_in_image() {
        let labels = vec![label(BoundingBox::from_corners(0.0, 0.0, 10.0, 10.0), "a")];
        let predictions = vec![prediction(
            BoundingBox::from_corners(0.0, 0.0, 10.0, 10.0),
            0.9,
            "b",
        )];

        let matches = match_predictions(&labels, &predictions, 0.5).unwrap();
        assert_eq!(matches[0].iou, 0.0);
        assert!(!matches[0].gt_already_claimed);
    }

    #[test]
    fn test_duplicate_prediction_sees_claim() {
        let labels = vec![label(BoundingBox::from_corners(0.0, 0.0, 10.0, 10.0), "a")];
        let predictions = vec![
            prediction(BoundingBox::from_corners(0.0, 0.0, 10.0, 10.0), 0.9, "a"),
            prediction(BoundingBox::from_corners(0.0, 0.0, 10.0, 10.0), 0.8, "a"),
        ];

        let matches = match_predictions(&labels, &predictions, 0.5).unwrap();
        assert!(!matches[0].gt_already_claimed);
        assert!(matches[1].gt_already_claimed);
    }

    #[test]
    fn test_below_threshold_does_not_claim() {
        let labels = vec![label(BoundingBox::from_corners(0.0, 0.0, 10.0, 10.0), "a")];
        let predictions = vec![
            prediction(BoundingBox::from_corners(8.0, 8.0, 18.0, 18.0), 0.9, "a"),
            prediction(BoundingBox::from_corners(0.0, 0.0, 10.0, 10.0), 0.8, "a"),
        ];

        let matches = match_predictions(&labels, &predictions, 0.5).unwrap();
        // First overlaps too little to claim, second still finds the label free.
        assert!(matches[0].iou < 0.5);
        assert!(!matches[1].gt_already_claimed);
        assert!((matches[1].iou - 1.0).abs() < 1e-10);
    }

    #[test]
    fn test_tie_break_first_occurrence() {
        // Two identical labels: the max-IoU scan settles on the first one,
        // both times, so the second prediction observes it as claimed even
        // though the second label is still free.
        let labels = vec![
            label(BoundingBox::from_corners(0.0, 0.0, 10.0, 10.0), "a"),
            label(BoundingBox::from_corners(0.0, 0.0, 10.0, 10.0), "a"),
        ];
        let predictions = vec![
            prediction(BoundingBox::from_corners(0.0, 0.0, 10.0, 10.0), 0.9, "a"),
            prediction(BoundingBox::from_corners(0.0, 0.0, 10.0, 10.0), 0.8, "a"),
        ];

        let matches = match_predictions(&labels, &predictions, 0.5).unwrap();
        assert!(!matches[0].gt_already_claimed);
        assert!(matches[1].gt_already_claimed);
    }

    #[test]
    fn test_best_label_selected() {
        let labels = vec![
            label(BoundingBox::from_corners(0.0, 0.0, 10.0, 10.0), "a"),
            label(BoundingBox::from_corners(5.0, 5.0, 15.0, 15.0), "a"),
        ];
        let predictions = vec![prediction(
            BoundingBox::from_corners(5.0, 5.0, 15.0, 15.0),
            0.9,
            "a",
        )];

        let matches = match_predictions(&labels, &predictions, 0.5).unwrap();
        assert!((matches[0].iou - 1.0).abs() < 1e-10);
    }

    #[test]
    fn test_empty_predictions() {
        let labels = vec![label(BoundingBox::from_corners(0.0, 0.0, 10.0, 10.0), "a")];
        let matches = match_predictions(&labels, &[], 0.5).unwrap();
        assert!(matches.is_empty());
    }
}
