use nalgebra::{Point2, Vector2};
use serde::{Deserialize, Serialize};

/// Below this the scatter is treated as isotropic (no preferred direction).
const ISOTROPY_EPS: f64 = 1e-12;

/// Line through `anchor` along the unit vector `direction`.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct FittedLine {
    pub direction: Vector2<f64>,
    pub anchor: Point2<f64>,
}

impl FittedLine {
    /// Image-space slope `-vy / vx`, with y pointing down.
    ///
    /// Infinite for a vertical line; callers decide what to do with that.
    #[inline]
    pub fn slope(&self) -> f64 {
        let slope = -self.direction.y / self.direction.x;
        // -0.0 would print as "-0.00" in labels
        if slope == 0.0 {
            0.0
        } else {
            slope
        }
    }

    /// Perpendicular distance from `p` to the line.
    pub fn distance(&self, p: Point2<f64>) -> f64 {
        let d = p - self.anchor;
        (d.x * self.direction.y - d.y * self.direction.x).abs()
    }
}

/// Orthogonal (total least squares) line fit.
///
/// The direction is the principal axis of the scatter matrix and the anchor is
/// the centroid; together they minimise the sum of squared perpendicular
/// distances. Direction is normalised and oriented with `vx > 0`, or `vy < 0`
/// when `vx == 0`. Returns `None` for an empty point set.
pub fn fit_line_l2(points: &[Point2<i32>]) -> Option<FittedLine> {
    if points.is_empty() {
        return None;
    }

    let n = points.len() as f64;
    let (sx, sy) = points
        .iter()
        .fold((0.0, 0.0), |(sx, sy), p| (sx + p.x as f64, sy + p.y as f64));
    let anchor = Point2::new(sx / n, sy / n);

    // Scatter = | cxx cxy |
    //           | cxy cyy |
    let mut cxx = 0.0;
    let mut cyy = 0.0;
    let mut cxy = 0.0;
    for p in points {
        let dx = p.x as f64 - anchor.x;
        let dy = p.y as f64 - anchor.y;
        cxx += dx * dx;
        cyy += dy * dy;
        cxy += dx * dy;
    }

    let half_diff = (cxx - cyy) / 2.0;
    let disc = (half_diff * half_diff + cxy * cxy).sqrt();

    let raw = if disc < ISOTROPY_EPS {
        Vector2::new(1.0, 0.0)
    } else if cxy.abs() > ISOTROPY_EPS {
        // Eigenvector of the larger eigenvalue: (lambda1 - cyy, cxy).
        let lambda1 = (cxx + cyy) / 2.0 + disc;
        Vector2::new(lambda1 - cyy, cxy)
    } else if cxx >= cyy {
        Vector2::new(1.0, 0.0)
    } else {
        Vector2::new(0.0, 1.0)
    };

    Some(FittedLine {
        direction: canonical_direction(raw.normalize()),
        anchor,
    })
}

fn canonical_direction(v: Vector2<f64>) -> Vector2<f64> {
    let flip = v.x < 0.0 || (v.x == 0.0 && v.y > 0.0);
    let mut out = if flip { -v } else { v };
    if out.x == 0.0 {
        // Keep +0.0 so a vertical slope is +inf rather than -inf.
        out.x = 0.0;
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn pts(xy: &[(i32, i32)]) -> Vec<Point2<i32>> {
        xy.iter().map(|&(x, y)| Point2::new(x, y)).collect()
    }

    #[test]
    fn diagonal_points_fit_unit_diagonal() {
        let line = fit_line_l2(&pts(&[(0, 0), (1, 1), (2, 2)])).expect("fit");
        let s = std::f64::consts::FRAC_1_SQRT_2;
        assert_relative_eq!(line.direction.x, s, epsilon = 1e-12);
        assert_relative_eq!(line.direction.y, s, epsilon = 1e-12);
        assert_relative_eq!(line.anchor.x, 1.0);
        assert_relative_eq!(line.anchor.y, 1.0);
        assert_relative_eq!(line.slope(), -1.0, epsilon = 1e-12);
    }

    #[test]
    fn horizontal_points_have_zero_slope() {
        let line = fit_line_l2(&pts(&[(0, 5), (5, 5), (10, 5)])).expect("fit");
        assert_eq!(line.direction, Vector2::new(1.0, 0.0));
        assert_eq!(line.slope(), 0.0);
        assert_relative_eq!(line.anchor.y, 5.0);
    }

    #[test]
    fn vertical_points_give_positive_infinite_slope() {
        let line = fit_line_l2(&pts(&[(4, 0), (4, 3), (4, 9)])).expect("fit");
        assert_eq!(line.direction, Vector2::new(0.0, -1.0));
        assert_eq!(line.slope(), f64::INFINITY);
    }

    #[test]
    fn fit_minimises_perpendicular_distance() {
        // Points scattered symmetrically around y = 0.5 x + 2.
        let data = pts(&[(0, 2), (2, 4), (4, 4), (6, 4), (8, 6), (10, 7), (12, 8)]);
        let line = fit_line_l2(&data).expect("fit");
        let cost = |l: &FittedLine| {
            data.iter()
                .map(|p| l.distance(Point2::new(p.x as f64, p.y as f64)).powi(2))
                .sum::<f64>()
        };
        let best = cost(&line);
        for delta in [-0.05_f64, 0.05] {
            let rot = nalgebra::Rotation2::new(delta);
            let perturbed = FittedLine {
                direction: rot * line.direction,
                anchor: line.anchor,
            };
            assert!(cost(&perturbed) > best);
        }
    }

    #[test]
    fn direction_is_canonical_for_negative_correlation() {
        let line = fit_line_l2(&pts(&[(0, 10), (5, 5), (10, 0)])).expect("fit");
        assert!(line.direction.x > 0.0);
        assert_relative_eq!(line.slope(), 1.0, epsilon = 1e-12);
    }

    #[test]
    fn single_point_falls_back_to_horizontal() {
        let line = fit_line_l2(&pts(&[(3, 8)])).expect("fit");
        assert_eq!(line.direction, Vector2::new(1.0, 0.0));
        assert_eq!(line.anchor, Point2::new(3.0, 8.0));
    }

    #[test]
    fn empty_input_is_rejected() {
        assert!(fit_line_l2(&[]).is_none());
    }
}
