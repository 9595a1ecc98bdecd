//! Deterministic color palettes for per-segment line colors.

use std::f64::consts::PI;

use image::Rgb;
use serde::{Deserialize, Serialize};

/// Continuous colormap sampled to build a palette.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Colormap {
    /// matplotlib `rainbow`: purple through red.
    #[default]
    Rainbow,
    /// matplotlib `jet`: dark blue through dark red.
    Jet,
}

impl Colormap {
    /// Color at `t` in `[0, 1]`, as `[r, g, b]` in `[0, 1]`.
    pub fn eval(self, t: f64) -> [f64; 3] {
        let t = t.clamp(0.0, 1.0);
        match self {
            Colormap::Rainbow => [
                (2.0 * t - 0.5).abs().min(1.0),
                (PI * t).sin(),
                (PI * t / 2.0).cos(),
            ],
            Colormap::Jet => [
                interpolate(JET_RED, t),
                interpolate(JET_GREEN, t),
                interpolate(JET_BLUE, t),
            ],
        }
    }
}

const JET_RED: &[(f64, f64)] = &[(0.0, 0.0), (0.35, 0.0), (0.66, 1.0), (0.89, 1.0), (1.0, 0.5)];
const JET_GREEN: &[(f64, f64)] = &[
    (0.0, 0.0),
    (0.125, 0.0),
    (0.375, 1.0),
    (0.64, 1.0),
    (0.91, 0.0),
    (1.0, 0.0),
];
const JET_BLUE: &[(f64, f64)] = &[(0.0, 0.5), (0.11, 1.0), (0.34, 1.0), (0.65, 0.0), (1.0, 0.0)];

/// Linear interpolation through `(t, value)` knots sorted by `t`.
fn interpolate(knots: &[(f64, f64)], t: f64) -> f64 {
    for w in knots.windows(2) {
        let (t0, v0) = w[0];
        let (t1, v1) = w[1];
        if t <= t1 {
            return v0 + (v1 - v0) * (t - t0) / (t1 - t0);
        }
    }
    knots.last().map_or(0.0, |&(_, v)| v)
}

/// Palette configuration.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaletteParams {
    #[serde(default)]
    pub colormap: Colormap,
    /// Walk the colormap from the far end.
    #[serde(default)]
    pub reverse: bool,
}

/// `n` colors sampled evenly along the colormap, identical on every call.
pub fn color_palette_with(n: usize, params: PaletteParams) -> Vec<Rgb<u8>> {
    let mut colors: Vec<Rgb<u8>> = (0..n)
        .map(|i| {
            let t = if n > 1 {
                i as f64 / (n - 1) as f64
            } else {
                0.0
            };
            let [r, g, b] = params.colormap.eval(t);
            Rgb([to_u8(r), to_u8(g), to_u8(b)])
        })
        .collect();
    if params.reverse {
        colors.reverse();
    }
    colors
}

/// `n` colors from the default rainbow palette.
pub fn color_palette(n: usize) -> Vec<Rgb<u8>> {
    color_palette_with(n, PaletteParams::default())
}

#[inline]
fn to_u8(v: f64) -> u8 {
    (v * 255.0).round().clamp(0.0, 255.0) as u8
}
