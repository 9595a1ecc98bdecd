use nalgebra::Point2;
use serde::{Deserialize, Serialize};

/// Errors for malformed segment input.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum SegmentError {
    #[error("no segments to measure")]
    NoSegments,
    #[error("segment {index} has no points")]
    EmptySegment { index: usize },
}

/// One piece of a skeletonized plant: an ordered run of pixel coordinates.
///
/// Serialized as a plain array of `[x, y]` pairs.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Segment {
    pub points: Vec<Point2<i32>>,
}

impl Segment {
    pub fn new(points: Vec<Point2<i32>>) -> Self {
        Self { points }
    }

    /// Build a segment from `(x, y)` tuples.
    pub fn from_xy(points: &[(i32, i32)]) -> Self {
        Self::new(points.iter().map(|&(x, y)| Point2::new(x, y)).collect())
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// First point of the segment; used as the label anchor.
    #[inline]
    pub fn first(&self) -> Option<Point2<i32>> {
        self.points.first().copied()
    }
}

/// Check that there is at least one segment and that none of them is empty.
pub fn validate_segments(segments: &[Segment]) -> Result<(), SegmentError> {
    if segments.is_empty() {
        return Err(SegmentError::NoSegments);
    }
    if let Some(index) = segments.iter().position(Segment::is_empty) {
        return Err(SegmentError::EmptySegment { index });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_empty_collection() {
        assert_eq!(validate_segments(&[]), Err(SegmentError::NoSegments));
    }

    #[test]
    fn reports_first_empty_segment() {
        let segs = vec![
            Segment::from_xy(&[(0, 0)]),
            Segment::new(Vec::new()),
            Segment::new(Vec::new()),
        ];
        assert_eq!(
            validate_segments(&segs),
            Err(SegmentError::EmptySegment { index: 1 })
        );
    }

    #[test]
    fn deserializes_from_point_pairs() {
        let seg: Segment = serde_json::from_str("[[1, 2], [3, 4]]").expect("parse");
        assert_eq!(seg, Segment::from_xy(&[(1, 2), (3, 4)]));
        assert_eq!(seg.first(), Some(Point2::new(1, 2)));
    }
}
