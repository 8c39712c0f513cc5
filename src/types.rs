//! Core data types for labels, predictions and evaluation results.

use serde::{Deserialize, Serialize};

use crate::error::{Result, VocEvalError};

/// Minimum number of points needed to define a bounding box region.
pub const MIN_BOX_POINTS: usize = 2;

/// A 2D point.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    /// Create a new point.
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// A bounding box given as an ordered sequence of corner points.
///
/// Two opposite corners are enough for an axis-aligned box; more points are
/// accepted and reduced to their axis-aligned envelope by [`extent`].
///
/// [`extent`]: BoundingBox::extent
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    pub points: Vec<Point>,
}

impl BoundingBox {
    /// Create a bounding box from a sequence of corner points.
    pub fn new(points: Vec<Point>) -> Self {
        Self { points }
    }

    /// Create an axis-aligned box from two opposite corners.
    ///
    /// # Example
    ///
    /// ```
    /// use voc_eval::types::BoundingBox;
    ///
    /// let bbox = BoundingBox::from_corners(0.0, 0.0, 10.0, 10.0);
    /// assert!(bbox.is_valid());
    /// ```
    pub fn from_corners(x_min: f64, y_min: f64, x_max: f64, y_max: f64) -> Self {
        Self {
            points: vec![Point::new(x_min, y_min), Point::new(x_max, y_max)],
        }
    }

    /// Check that the box carries enough points to define a region.
    pub fn is_valid(&self) -> bool {
        self.points.len() >= MIN_BOX_POINTS
    }

    /// Compute the axis-aligned envelope of the corner points.
    ///
    /// # Errors
    ///
    /// Returns [`VocEvalError::InvalidBoundingBox`] if the box has fewer than
    /// [`MIN_BOX_POINTS`] points.
    pub fn extent(&self) -> Result<BoxExtent> {
        if !self.is_valid() {
            return Err(VocEvalError::InvalidBoundingBox(format!(
                "expected at least {} points, got {}",
                MIN_BOX_POINTS,
                self.points.len()
            )));
        }

        let mut extent = BoxExtent {
            x_min: self.points[0].x,
            y_min: self.points[0].y,
            x_max: self.points[0].x,
            y_max: self.points[0].y,
        };
        for point in &self.points[1..] {
            extent.x_min = extent.x_min.min(point.x);
            extent.y_min = extent.y_min.min(point.y);
            extent.x_max = extent.x_max.max(point.x);
            extent.y_max = extent.y_max.max(point.y);
        }
        Ok(extent)
    }
}

/// Axis-aligned envelope of a bounding box.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoxExtent {
    pub x_min: f64,
    pub y_min: f64,
    pub x_max: f64,
    pub y_max: f64,
}

impl BoxExtent {
    /// Area of the envelope.
    pub fn area(&self) -> f64 {
        (self.x_max - self.x_min) * (self.y_max - self.y_min)
    }
}

/// A ground-truth box belonging to one image and one class.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Label {
    pub class_name: String,
    pub bbox: BoundingBox,
    pub image_id: String,
}

impl Label {
    /// Create a new ground-truth label.
    pub fn new(class_name: impl Into<String>, bbox: BoundingBox, image_id: impl Into<String>) -> Self {
        Self {
            class_name: class_name.into(),
            bbox,
            image_id: image_id.into(),
        }
    }
}

/// A predicted box with a confidence score, belonging to one image and one class.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Prediction {
    pub class_name: String,
    pub bbox: BoundingBox,
    pub score: f64,
    pub image_id: String,
}

impl Prediction {
    /// Create a new prediction.
    pub fn new(
        class_name: impl Into<String>,
        bbox: BoundingBox,
        score: f64,
        image_id: impl Into<String>,
    ) -> Self {
        Self {
            class_name: class_name.into(),
            bbox,
            score,
            image_id: image_id.into(),
        }
    }
}

/// One point of a precision-recall curve.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PrecisionRecallPoint {
    pub precision: f64,
    pub recall: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extent_from_corners() {
        let bbox = BoundingBox::from_corners(1.0, 2.0, 5.0, 7.0);
        let extent = bbox.extent().unwrap();
        assert_eq!(extent.x_min, 1.0);
        assert_eq!(extent.y_min, 2.0);
        assert_eq!(extent.x_max, 5.0);
        assert_eq!(extent.y_max, 7.0);
        assert!((extent.area() - 20.0).abs() < 1e-10);
    }

    #[test]
    fn test_extent_from_unordered_points() {
        // Corner order does not matter for the envelope.
        let bbox = BoundingBox::new(vec![
            Point::new(5.0, 0.0),
            Point::new(0.0, 5.0),
            Point::new(2.0, 2.0),
        ]);
        let extent = bbox.extent().unwrap();
        assert_eq!(extent.x_min, 0.0);
        assert_eq!(extent.y_min, 0.0);
        assert_eq!(extent.x_max, 5.0);
        assert_eq!(extent.y_max, 5.0);
    }

    #[test]
    fn test_too_few_points() {
        let bbox = BoundingBox::new(vec![Point::new(1.0, 1.0)]);
        assert!(!bbox.is_valid());
        assert!(bbox.extent().is_err());
    }

    #[test]
    fn test_zero_area_extent() {
        let bbox = BoundingBox::from_corners(3.0, 3.0, 3.0, 3.0);
        let extent = bbox.extent().unwrap();
        assert_eq!(extent.area(), 0.0);
    }
}
