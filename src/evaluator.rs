//! Per-class and aggregate VOC evaluation.
//!
//! Both evaluators compute their results eagerly at construction; a value of
//! either type always carries a complete, consistent set of metrics.

use std::collections::HashMap;

use log::debug;

use crate::error::{Result, VocEvalError};
use crate::matching::match_predictions;
use crate::metrics::ap::{calculate_map, calculate_weighted_map, interpolate_precision, step_integral};
use crate::metrics::f1_score::calculate_f1_score;
use crate::metrics::precision_recall::calculate_precision_recall;
use crate::partition::{partition_labels, partition_predictions};
use crate::types::{Label, Prediction, PrecisionRecallPoint};

/// Default IoU threshold for counting a prediction as a true positive.
pub const DEFAULT_IOU_THRESHOLD: f64 = 0.5;

/// Default confidence threshold; zero keeps every prediction.
pub const DEFAULT_CONFIDENCE_THRESHOLD: f64 = 0.0;

fn validate_threshold(name: &str, value: f64) -> Result<()> {
    if !(0.0..=1.0).contains(&value) {
        return Err(VocEvalError::InvalidThreshold(format!(
            "{name} must be between 0.0 and 1.0, got {value}"
        )));
    }
    Ok(())
}

/// Evaluation result for a single class.
///
/// Construct with [`ClassEvaluation::new`]; all fields are computed up front
/// and read-only afterwards.
#[derive(Debug, Clone)]
pub struct ClassEvaluation {
    /// Average Precision (area under the interpolated PR curve).
    pub ap: f64,
    /// Raw precision-recall curve, one point per prediction plus the
    /// `(0, 0)` seed and `(0, 1)` terminator.
    pub raw_curve: Vec<PrecisionRecallPoint>,
    /// The raw curve with the precision envelope applied.
    pub interpolated_curve: Vec<PrecisionRecallPoint>,
    /// Number of ground-truth labels for this class.
    pub label_count: usize,
    pub true_positives: usize,
    pub false_positives: usize,
    pub false_negatives: usize,
    /// Mean IoU over true-positive matches, 0.0 if there were none.
    pub tp_avg_iou: f64,
    pub precision: f64,
    pub recall: f64,
    pub f1_score: f64,
}

impl ClassEvaluation {
    /// Evaluate one class.
    ///
    /// `predictions` must be sorted by descending confidence; ties keep input
    /// order. Thresholds default to [`DEFAULT_IOU_THRESHOLD`] and
    /// [`DEFAULT_CONFIDENCE_THRESHOLD`] when `None`.
    ///
    /// A prediction counts as a true positive when its best IoU reaches the
    /// IoU threshold, its confidence reaches the confidence threshold, and
    /// the matched label was not already claimed by an earlier prediction.
    /// Everything else counts as a false positive.
    ///
    /// # Errors
    ///
    /// * [`VocEvalError::EmptyLabelSet`] if `labels` is empty
    /// * [`VocEvalError::InvalidThreshold`] if a threshold is outside [0, 1]
    /// * [`VocEvalError::InvalidBoundingBox`] for malformed boxes
    pub fn new(
        labels: &[Label],
        predictions: &[Prediction],
        iou_threshold: Option<f64>,
        confidence_threshold: Option<f64>,
    ) -> Result<Self> {
        let iou_threshold = iou_threshold.unwrap_or(DEFAULT_IOU_THRESHOLD);
        let confidence_threshold = confidence_threshold.unwrap_or(DEFAULT_CONFIDENCE_THRESHOLD);
        validate_threshold("iou threshold", iou_threshold)?;
        validate_threshold("confidence threshold", confidence_threshold)?;

        if labels.is_empty() {
            return Err(VocEvalError::EmptyLabelSet(
                "cannot evaluate a class with zero labels".to_string(),
            ));
        }

        let matches = match_predictions(labels, predictions, iou_threshold)?;

        let label_count = labels.len();
        let (raw_precisions, raw_recalls, true_positives, false_positives, tp_iou_sum) =
            build_pr_curve(&matches, label_count, iou_threshold, confidence_threshold);

        let false_negatives = label_count - true_positives;
        let tp_avg_iou = if true_positives > 0 {
            tp_iou_sum / true_positives as f64
        } else {
            0.0
        };
        let pr = calculate_precision_recall(true_positives, false_positives, false_negatives);
        let f1_score = calculate_f1_score(pr.precision, pr.recall);

        let interpolated_precisions = interpolate_precision(&raw_precisions);
        let ap = step_integral(&interpolated_precisions, &raw_recalls);

        let raw_curve = zip_curve(&raw_precisions, &raw_recalls);
        let interpolated_curve = zip_curve(&interpolated_precisions, &raw_recalls);

        Ok(Self {
            ap,
            raw_curve,
            interpolated_curve,
            label_count,
            true_positives,
            false_positives,
            false_negatives,
            tp_avg_iou,
            precision: pr.precision,
            recall: pr.recall,
            f1_score,
        })
    }
}

/// Walk matches in order, accumulating the raw PR curve and confusion counts.
///
/// The curve is seeded with `(0, 0)` before any prediction and terminated
/// with `(precision=0, recall=1)`; these endpoints anchor the AP integral.
fn build_pr_curve(
    matches: &[crate::matching::Match],
    label_count: usize,
    iou_threshold: f64,
    confidence_threshold: f64,
) -> (Vec<f64>, Vec<f64>, usize, usize, f64) {
    let mut true_positives = 0usize;
    let mut false_positives = 0usize;
    let mut tp_iou_sum = 0.0;

    let mut precisions = Vec::with_capacity(matches.len() + 2);
    let mut recalls = Vec::with_capacity(matches.len() + 2);
    precisions.push(0.0);
    recalls.push(0.0);

    for m in matches {
        if m.iou >= iou_threshold
            && m.confidence >= confidence_threshold
            && !m.gt_already_claimed
        {
            true_positives += 1;
            tp_iou_sum += m.iou;
        } else {
            false_positives += 1;
        }

        precisions.push(true_positives as f64 / (true_positives + false_positives) as f64);
        recalls.push(true_positives as f64 / label_count as f64);
    }

    precisions.push(0.0);
    recalls.push(1.0);

    (precisions, recalls, true_positives, false_positives, tp_iou_sum)
}

fn zip_curve(precisions: &[f64], recalls: &[f64]) -> Vec<PrecisionRecallPoint> {
    precisions
        .iter()
        .zip(recalls.iter())
        .map(|(&precision, &recall)| PrecisionRecallPoint { precision, recall })
        .collect()
}

/// Aggregate evaluation across every class present in the labels.
///
/// Construct with [`DatasetEvaluation::new`]. Classes that appear only in the
/// predictions are not scored; their predictions are silently dropped.
#[derive(Debug, Clone)]
pub struct DatasetEvaluation {
    /// Per-class results, keyed by class name.
    pub class_evaluations: HashMap<String, ClassEvaluation>,
    /// Unweighted mean of per-class AP.
    pub map: f64,
    /// Label-count-weighted mean of per-class AP.
    pub weighted_map: f64,
    pub total_true_positives: usize,
    pub total_false_positives: usize,
    pub total_false_negatives: usize,
    /// Unweighted mean of per-class `tp_avg_iou`.
    pub mean_tp_avg_iou: f64,
    pub mean_precision: f64,
    pub mean_recall: f64,
    pub mean_f1_score: f64,
}

impl DatasetEvaluation {
    /// Evaluate every class present in `labels`.
    ///
    /// `predictions` must be sorted by descending confidence. Thresholds
    /// default like [`ClassEvaluation::new`].
    ///
    /// # Errors
    ///
    /// * [`VocEvalError::EmptyLabelSet`] if `labels` is empty
    /// * [`VocEvalError::InvalidThreshold`] if a threshold is outside [0, 1]
    /// * [`VocEvalError::InvalidBoundingBox`] for malformed boxes
    pub fn new(
        labels: &[Label],
        predictions: &[Prediction],
        iou_threshold: Option<f64>,
        confidence_threshold: Option<f64>,
    ) -> Result<Self> {
        let labels_by_class = partition_labels(labels);
        if labels_by_class.is_empty() {
            return Err(VocEvalError::EmptyLabelSet(
                "cannot evaluate an empty label collection".to_string(),
            ));
        }
        let predictions_by_class = partition_predictions(predictions);

        let dropped = predictions_by_class
            .keys()
            .filter(|name| !labels_by_class.contains_key(*name))
            .count();
        if dropped > 0 {
            debug!("{dropped} prediction class(es) absent from the labels, not scored");
        }

        // Classes are walked in sorted name order so the float accumulation
        // is deterministic run to run.
        let mut class_names: Vec<&String> = labels_by_class.keys().collect();
        class_names.sort();

        let mut class_evaluations = HashMap::with_capacity(class_names.len());
        let mut aps = Vec::with_capacity(class_names.len());
        let mut label_counts = Vec::with_capacity(class_names.len());
        let mut total_true_positives = 0usize;
        let mut total_false_positives = 0usize;
        let mut total_false_negatives = 0usize;
        let mut tp_avg_iou_sum = 0.0;

        for name in class_names {
            let class_labels = &labels_by_class[name];
            let class_predictions = predictions_by_class
                .get(name)
                .map(Vec::as_slice)
                .unwrap_or(&[]);

            let evaluation = ClassEvaluation::new(
                class_labels,
                class_predictions,
                iou_threshold,
                confidence_threshold,
            )?;
            debug!(
                "class {name}: AP {:.4} (tp={} fp={} fn={})",
                evaluation.ap,
                evaluation.true_positives,
                evaluation.false_positives,
                evaluation.false_negatives,
            );

            aps.push(evaluation.ap);
            label_counts.push(evaluation.label_count);
            total_true_positives += evaluation.true_positives;
            total_false_positives += evaluation.false_positives;
            total_false_negatives += evaluation.false_negatives;
            tp_avg_iou_sum += evaluation.tp_avg_iou;

            class_evaluations.insert(name.clone(), evaluation);
        }

        let class_count = class_evaluations.len();
        let map = calculate_map(&aps);
        let weighted_map = calculate_weighted_map(&aps, &label_counts);
        let mean_tp_avg_iou = tp_avg_iou_sum / class_count as f64;

        // total TP + total FN equals the total label count, so this yields
        // exactly TP / sum(label_count) for the mean recall.
        let pr = calculate_precision_recall(
            total_true_positives,
            total_false_positives,
            total_false_negatives,
        );
        let mean_f1_score = calculate_f1_score(pr.precision, pr.recall);

        Ok(Self {
            class_evaluations,
            map,
            weighted_map,
            total_true_positives,
            total_false_positives,
            total_false_negatives,
            mean_tp_avg_iou,
            mean_precision: pr.precision,
            mean_recall: pr.recall,
            mean_f1_score,
        })
    }

    /// Per-class AP summary, with the mean under the `"mAP"` key.
    pub fn summary(&self) -> HashMap<String, f64> {
        let mut summary: HashMap<String, f64> = self
            .class_evaluations
            .iter()
            .map(|(name, evaluation)| (name.clone(), evaluation.ap))
            .collect();
        summary.insert("mAP".to_string(), self.map);
        summary
    }
}
