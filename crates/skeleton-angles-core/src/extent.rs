//! Minimal-area bounding rectangle and the horizontal extent derived from it.
//!
//! The rectangle comes from rotating calipers over the convex hull: one of
//! the optimal rectangle's sides is always collinear with a hull edge, so it
//! is enough to try every hull edge as the rectangle orientation.
//!
//! `imageproc::geometry::min_area_rect` is not used for the rectangle: it
//! rounds corners outwards to integers, which widens the truncated extent by
//! a pixel, and it panics on empty input.

use imageproc::geometry;
use imageproc::point::Point;
use nalgebra::{Point2, Vector2};
use serde::{Deserialize, Serialize};

/// Corner coordinates closer than this to an integer are treated as that integer.
const INTEGER_SNAP_EPS: f64 = 1e-9;

/// Rotated rectangle given by its four corners in drawing order.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct MinAreaRect {
    pub corners: [Point2<f64>; 4],
}

impl MinAreaRect {
    pub fn area(&self) -> f64 {
        let [a, b, _, d] = self.corners;
        (b - a).norm() * (d - a).norm()
    }

    /// Horizontal extent of the corners, truncated towards zero.
    pub fn x_extent(&self) -> BoundingExtent {
        let (lo, hi) = self
            .corners
            .iter()
            .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), c| {
                (lo.min(c.x), hi.max(c.x))
            });
        BoundingExtent {
            x_min: snap_to_integer(lo).trunc() as i32,
            x_max: snap_to_integer(hi).trunc() as i32,
        }
    }
}

/// Horizontal span used to clip a fitted line before drawing.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoundingExtent {
    pub x_min: i32,
    pub x_max: i32,
}

#[inline]
fn snap_to_integer(v: f64) -> f64 {
    let r = v.round();
    if (v - r).abs() < INTEGER_SNAP_EPS {
        r
    } else {
        v
    }
}

/// Convex hull of `points` (Graham scan from `imageproc`).
///
/// Collinear boundary points are dropped, so a collinear set reduces to its
/// two end points. Repeated input points may survive as repeated vertices.
pub fn convex_hull(points: &[Point2<i32>]) -> Vec<Point2<i32>> {
    let pts: Vec<Point<i32>> = points.iter().map(|p| Point::new(p.x, p.y)).collect();
    geometry::convex_hull(pts)
        .into_iter()
        .map(|p| Point2::new(p.x, p.y))
        .collect()
}

/// Minimal-area rectangle enclosing `points`.
///
/// Returns `None` for an empty point set.
pub fn min_area_rect(points: &[Point2<i32>]) -> Option<MinAreaRect> {
    let hull: Vec<Point2<f64>> = convex_hull(points)
        .into_iter()
        .map(|p| Point2::new(p.x as f64, p.y as f64))
        .collect();

    match hull.len() {
        0 => None,
        1 => Some(MinAreaRect {
            corners: [hull[0]; 4],
        }),
        2 => Some(MinAreaRect {
            corners: [hull[0], hull[1], hull[1], hull[0]],
        }),
        n => {
            let mut best: Option<(f64, MinAreaRect)> = None;
            for i in 0..n {
                let origin = hull[i];
                let edge = hull[(i + 1) % n] - origin;
                let len = edge.norm();
                if len < f64::EPSILON {
                    continue;
                }
                let u = edge / len;
                let v = Vector2::new(-u.y, u.x);

                let mut min_u = f64::INFINITY;
                let mut max_u = f64::NEG_INFINITY;
                let mut min_v = f64::INFINITY;
                let mut max_v = f64::NEG_INFINITY;
                for p in &hull {
                    let d = *p - origin;
                    let pu = d.dot(&u);
                    let pv = d.dot(&v);
                    min_u = min_u.min(pu);
                    max_u = max_u.max(pu);
                    min_v = min_v.min(pv);
                    max_v = max_v.max(pv);
                }

                let area = (max_u - min_u) * (max_v - min_v);
                if best.as_ref().is_some_and(|(a, _)| area >= *a) {
                    continue;
                }
                let at = |a: f64, b: f64| origin + u * a + v * b;
                let rect = MinAreaRect {
                    corners: [
                        at(min_u, min_v),
                        at(max_u, min_v),
                        at(max_u, max_v),
                        at(min_u, max_v),
                    ],
                };
                best = Some((area, rect));
            }
            best.map(|(_, rect)| rect)
        }
    }
}

/// Horizontal extent of the minimal-area rectangle around `points`.
pub fn bounding_extent(points: &[Point2<i32>]) -> Option<BoundingExtent> {
    min_area_rect(points).map(|r| r.x_extent())
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn pts(xy: &[(i32, i32)]) -> Vec<Point2<i32>> {
        xy.iter().map(|&(x, y)| Point2::new(x, y)).collect()
    }

    #[test]
    fn empty_input_has_no_rect() {
        assert!(min_area_rect(&[]).is_none());
        assert!(bounding_extent(&[]).is_none());
    }

    #[test]
    fn single_point_collapses_to_point() {
        let ext = bounding_extent(&pts(&[(7, 3)])).expect("extent");
        assert_eq!(ext, BoundingExtent { x_min: 7, x_max: 7 });
    }

    #[test]
    fn collinear_points_use_end_points() {
        let ext = bounding_extent(&pts(&[(0, 5), (5, 5), (10, 5)])).expect("extent");
        assert_eq!(ext, BoundingExtent { x_min: 0, x_max: 10 });

        let ext = bounding_extent(&pts(&[(2, 2), (0, 0), (1, 1)])).expect("extent");
        assert_eq!(ext, BoundingExtent { x_min: 0, x_max: 2 });
    }

    #[test]
    fn hull_drops_interior_and_duplicate_points() {
        let hull = convex_hull(&pts(&[(0, 0), (4, 0), (4, 4), (0, 4), (2, 2), (4, 0), (2, 0)]));
        assert_eq!(hull.len(), 4);
    }

    #[test]
    fn repeated_point_collapses_to_point() {
        let ext = bounding_extent(&pts(&[(7, 3), (7, 3), (7, 3)])).expect("extent");
        assert_eq!(ext, BoundingExtent { x_min: 7, x_max: 7 });
    }

    #[test]
    fn tilted_rectangle_corners_truncate_towards_zero() {
        // The tight rectangle leans along (10, 1); its x range is about
        // [-0.099, 10.099], which truncates to [0, 10].
        let band = pts(&[(0, 0), (10, 1), (10, 2), (0, 1)]);
        let rect = min_area_rect(&band).expect("rect");
        assert_relative_eq!(rect.area(), 10.0 + 10.0 / 101.0, epsilon = 1e-9);
        assert_eq!(rect.x_extent(), BoundingExtent { x_min: 0, x_max: 10 });
    }

    #[test]
    fn axis_aligned_box_is_recovered() {
        let rect = min_area_rect(&pts(&[(1, 2), (6, 2), (6, 5), (1, 5), (3, 3)])).expect("rect");
        assert_relative_eq!(rect.area(), 15.0, epsilon = 1e-9);
        assert_eq!(rect.x_extent(), BoundingExtent { x_min: 1, x_max: 6 });
    }

    #[test]
    fn rotated_strip_uses_tight_rectangle() {
        // A thin diagonal band: the tight rectangle is rotated by 45 degrees
        // and much smaller than the axis-aligned box.
        let band = pts(&[(0, 0), (1, 0), (10, 9), (10, 10), (5, 5), (6, 5)]);
        let rect = min_area_rect(&band).expect("rect");
        assert!(rect.area() < 100.0 * 0.5);
        let ext = rect.x_extent();
        assert!(ext.x_min <= 0 && ext.x_max >= 10);
    }
}
