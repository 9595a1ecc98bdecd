//! Per-segment angle derivation: extent + fitted line -> slope, angle and
//! the drawable line clipped to the segment's horizontal extent.

use std::f64::consts::PI;

use nalgebra::Point2;
use serde::{Deserialize, Serialize};

use crate::extent::{bounding_extent, BoundingExtent};
use crate::line_fit::{fit_line_l2, FittedLine};
use crate::segment::{Segment, SegmentError};

/// Lines steeper than this are reported but not drawn.
///
/// Compatibility threshold on the slope magnitude; it is not a test on `vx`.
pub const VERTICAL_SLOPE_LIMIT: f64 = 1_000_000.0;

/// Angle in degrees of a line with image-space `slope`, in (-90, 90].
///
/// Vertical lines (either sign of an infinite or huge slope) report `90`.
#[inline]
pub fn slope_to_degrees(slope: f64) -> f64 {
    let deg = slope.atan() * 180.0 / PI;
    if deg <= -90.0 || deg > 90.0 {
        90.0
    } else {
        deg
    }
}

/// Whether a slope is too steep to render as a finite line.
#[inline]
pub fn is_effectively_vertical(slope: f64) -> bool {
    slope.abs() > VERTICAL_SLOPE_LIMIT
}

/// Integer endpoints of a drawable line.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineSegment {
    pub start: Point2<i32>,
    pub end: Point2<i32>,
}

/// Everything measured for one segment.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SegmentAngle {
    pub index: usize,
    pub extent: BoundingExtent,
    pub line: FittedLine,
    pub slope: f64,
    pub angle_deg: f64,
    /// `None` when the fitted line is effectively vertical.
    pub draw: Option<LineSegment>,
    /// Where the angle label goes: the segment's first point.
    pub label_anchor: Point2<i32>,
}

impl SegmentAngle {
    /// Text drawn next to the segment.
    pub fn label(&self) -> String {
        format!("{:.2}", self.angle_deg)
    }
}

/// Endpoints of the fitted line evaluated at the extent's left and right edges.
///
/// The right end sits one pixel inside `x_max`. Heights are truncated
/// towards zero.
pub fn clip_to_extent(line: &FittedLine, extent: BoundingExtent) -> LineSegment {
    let slope = line.slope();
    let y_at = |x: i32| ((line.anchor.x - x as f64) * slope + line.anchor.y).trunc() as i32;
    LineSegment {
        start: Point2::new(extent.x_max - 1, y_at(extent.x_max)),
        end: Point2::new(extent.x_min, y_at(extent.x_min)),
    }
}

/// Fit and measure segment `index`.
pub fn measure_segment(index: usize, segment: &Segment) -> Result<SegmentAngle, SegmentError> {
    let points = &segment.points;
    let (Some(extent), Some(line), Some(label_anchor)) = (
        bounding_extent(points),
        fit_line_l2(points),
        segment.first(),
    ) else {
        return Err(SegmentError::EmptySegment { index });
    };

    let slope = line.slope();
    let draw = if is_effectively_vertical(slope) {
        log::warn!("slope of segment ID#{index} is {slope} and cannot be plotted");
        None
    } else {
        Some(clip_to_extent(&line, extent))
    };
    let angle_deg = slope_to_degrees(slope);
    log::debug!(
        "segment {index}: {} points, x=[{}, {}], slope={slope:.6}, angle={angle_deg:.2}",
        points.len(),
        extent.x_min,
        extent.x_max
    );

    Ok(SegmentAngle {
        index,
        extent,
        line,
        slope,
        angle_deg,
        draw,
        label_anchor,
    })
}

/// Measure every segment in input order.
///
/// Fails on the first empty segment or when there are no segments at all;
/// nothing is returned in that case.
pub fn measure_segments(segments: &[Segment]) -> Result<Vec<SegmentAngle>, SegmentError> {
    crate::segment::validate_segments(segments)?;
    segments
        .iter()
        .enumerate()
        .map(|(i, s)| measure_segment(i, s))
        .collect()
}
