//! Average Precision (AP) and mean Average Precision (mAP) calculation.
//!
//! Uses the PASCAL VOC exact-integration method: the raw precision curve is
//! replaced by its monotonic envelope, then integrated against recall as a
//! step function.

/// Apply the precision envelope: a right-to-left running maximum.
///
/// The result satisfies `out[i] >= out[i + 1]` for all `i`, which is the
/// monotonic shape the VOC integral expects.
///
/// # Example
///
/// ```
/// use voc_eval::metrics::ap::interpolate_precision;
///
/// let envelope = interpolate_precision(&[0.0, 1.0, 0.5, 0.0]);
/// assert_eq!(envelope, vec![1.0, 1.0, 0.5, 0.0]);
/// ```
pub fn interpolate_precision(precisions: &[f64]) -> Vec<f64> {
    let mut interpolated = precisions.to_vec();
    for i in (0..interpolated.len().saturating_sub(1)).rev() {
        interpolated[i] = interpolated[i].max(interpolated[i + 1]);
    }
    interpolated
}

/// Integrate an enveloped precision curve against recall as a step function.
///
/// Accumulates `(recall[i] - recall[i - 1]) * precision[i]` at every index
/// where the recall actually changed.
pub fn step_integral(interpolated_precisions: &[f64], recalls: &[f64]) -> f64 {
    let mut ap = 0.0;
    for i in 1..recalls.len() {
        if recalls[i] != recalls[i - 1] {
            ap += (recalls[i] - recalls[i - 1]) * interpolated_precisions[i];
        }
    }
    ap
}

/// Calculate Average Precision from a raw precision-recall curve.
///
/// The curve is expected to already carry its sentinel endpoints: a leading
/// `(precision=0, recall=0)` and a trailing `(precision=0, recall=1)` point.
///
/// # Arguments
///
/// * `precisions` - Raw precision values, one per curve point
/// * `recalls` - Recall values, non-decreasing, one per curve point
///
/// # Returns
///
/// Returns the Average Precision value (0.0 to 1.0).
///
/// # Example
///
/// ```
/// use voc_eval::metrics::ap::calculate_voc_ap;
///
/// let precisions = vec![0.0, 1.0, 0.5, 0.0];
/// let recalls = vec![0.0, 0.5, 0.5, 1.0];
/// let ap = calculate_voc_ap(&precisions, &recalls);
/// assert!((ap - 0.5).abs() < 1e-10);
/// ```
pub fn calculate_voc_ap(precisions: &[f64], recalls: &[f64]) -> f64 {
    if precisions.is_empty() || recalls.is_empty() {
        return 0.0;
    }
    let interpolated = interpolate_precision(precisions);
    step_integral(&interpolated, recalls)
}

/// Calculate mean Average Precision across classes.
///
/// # Example
///
/// ```
/// use voc_eval::metrics::ap::calculate_map;
///
/// let class_aps = vec![0.8, 0.9, 0.75, 0.85];
/// let map = calculate_map(&class_aps);
/// assert!((map - 0.825).abs() < 1e-10);
/// ```
pub fn calculate_map(class_aps: &[f64]) -> f64 {
    if class_aps.is_empty() {
        return 0.0;
    }
    class_aps.iter().sum::<f64>() / class_aps.len() as f64
}

/// Calculate label-count-weighted mean Average Precision.
///
/// Each class's AP is weighted by the number of ground-truth labels it has,
/// so classes with more labels dominate the mean.
///
/// # Example
///
/// ```
/// use voc_eval::metrics::ap::calculate_weighted_map;
///
/// let w_map = calculate_weighted_map(&[1.0, 0.0], &[1, 9]);
/// assert!((w_map - 0.1).abs() < 1e-10);
/// ```
pub fn calculate_weighted_map(class_aps: &[f64], label_counts: &[usize]) -> f64 {
    let total_labels: usize = label_counts.iter().sum();
    if total_labels == 0 {
        return 0.0;
    }

    let weighted_sum: f64 = class_aps
        .iter()
        .zip(label_counts.iter())
        .map(|(&ap, &count)| ap * count as f64)
        .sum();

    weighted_sum / total_labels as f64
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_envelope_is_monotonic() {
        let envelope = interpolate_precision(&[0.0, 1.0, 0.5, 0.75, 0.6, 0.0]);
        for i in 0..envelope.len() - 1 {
            assert!(envelope[i] >= envelope[i + 1]);
        }
    }

    #[test]
    fn test_envelope_empty() {
        assert!(interpolate_precision(&[]).is_empty());
    }

    #[test]
    fn test_ap_perfect_curve() {
        // Single perfect prediction: seed, one TP, terminator.
        let precisions = vec![0.0, 1.0, 0.0];
        let recalls = vec![0.0, 1.0, 1.0];
        let ap = calculate_voc_ap(&precisions, &recalls);
        assert!((ap - 1.0).abs() < 1e-10);
    }

    #[test]
    fn test_ap_empty() {
        assert_eq!(calculate_voc_ap(&[], &[]), 0.0);
    }

    #[test]
    fn test_ap_no_true_positives() {
        // Two false positives: precision stays at zero everywhere.
        let precisions = vec![0.0, 0.0, 0.0, 0.0];
        let recalls = vec![0.0, 0.0, 0.0, 1.0];
        assert_eq!(calculate_voc_ap(&precisions, &recalls), 0.0);
    }

    #[test]
    fn test_ap_duplicate_detection_curve() {
        // TP then duplicate FP over two labels.
        let precisions = vec![0.0, 1.0, 0.5, 0.0];
        let recalls = vec![0.0, 0.5, 0.5, 1.0];
        let ap = calculate_voc_ap(&precisions, &recalls);
        assert!((ap - 0.5).abs() < 1e-10);
    }

    #[test]
    fn test_step_integral_skips_flat_recall() {
        // Only recall changes contribute.
        let interpolated = vec![1.0, 1.0, 0.5, 0.5];
        let recalls = vec![0.0, 0.5, 0.5, 0.5];
        let ap = step_integral(&interpolated, &recalls);
        assert!((ap - 0.5).abs() < 1e-10);
    }

    #[test]
    fn test_calculate_map() {
        let map = calculate_map(&[0.8, 0.9, 0.75, 0.85]);
        assert!((map - 0.825).abs() < 1e-10);
    }

    #[test]
    fn test_calculate_map_empty() {
        assert_eq!(calculate_map(&[]), 0.0);
    }

    #[test]
    fn test_weighted_map() {
        let w_map = calculate_weighted_map(&[1.0, 0.0], &[1, 9]);
        assert!((w_map - 0.1).abs() < 1e-10);
    }

    #[test]
    fn test_weighted_map_equal_counts_matches_map() {
        let aps = [0.4, 0.6, 0.8];
        let w_map = calculate_weighted_map(&aps, &[5, 5, 5]);
        let map = calculate_map(&aps);
        assert!((w_map - map).abs() < 1e-10);
    }
}
