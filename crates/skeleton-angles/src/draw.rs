//! Raster annotation: fitted lines and angle labels on an RGB buffer.

use image::{Rgb, RgbImage};
use imageproc::drawing::draw_line_segment_mut;
use skeleton_angles_core::LineSegment;

use crate::font::text_strokes;

/// Stroke width of fitted lines, in pixels.
pub const LINE_THICKNESS: u32 = 1;
/// Label font scale relative to the 21-unit cap height.
pub const LABEL_SCALE: f32 = 0.55;
pub const LABEL_COLOR: Rgb<u8> = Rgb([150, 150, 150]);
/// Stroke width of label glyphs, in pixels.
pub const LABEL_THICKNESS: u32 = 2;

/// Clip a segment to the pixel-center rectangle `[0, w - 1] x [0, h - 1]`
/// (Liang-Barsky). Returns `None` when nothing of it is inside.
///
/// Segments already inside are returned unchanged so they rasterise to the
/// same pixels.
pub fn clip_segment_to_image(
    start: (f32, f32),
    end: (f32, f32),
    w: u32,
    h: u32,
) -> Option<((f32, f32), (f32, f32))> {
    if w == 0 || h == 0 {
        return None;
    }
    let (max_x, max_y) = ((w - 1) as f32, (h - 1) as f32);
    let inside = |p: (f32, f32)| p.0 >= 0.0 && p.0 <= max_x && p.1 >= 0.0 && p.1 <= max_y;
    if inside(start) && inside(end) {
        return Some((start, end));
    }

    let (dx, dy) = ((end.0 - start.0) as f64, (end.1 - start.1) as f64);
    let (x0, y0) = (start.0 as f64, start.1 as f64);
    let mut t0 = 0.0_f64;
    let mut t1 = 1.0_f64;
    for (p, q) in [
        (-dx, x0),
        (dx, max_x as f64 - x0),
        (-dy, y0),
        (dy, max_y as f64 - y0),
    ] {
        if p == 0.0 {
            if q < 0.0 {
                return None;
            }
            continue;
        }
        let r = q / p;
        if p < 0.0 {
            t0 = t0.max(r);
        } else {
            t1 = t1.min(r);
        }
        if t0 > t1 {
            return None;
        }
    }
    let at = |t: f64| {
        (
            (x0 + t * dx).clamp(0.0, max_x as f64) as f32,
            (y0 + t * dy).clamp(0.0, max_y as f64) as f32,
        )
    };
    Some((at(t0), at(t1)))
}

/// Draw a straight stroke `thickness` pixels wide. The stroke is clipped to
/// the image first, so far off-canvas endpoints cost nothing.
pub fn draw_thick_segment_mut(
    img: &mut RgbImage,
    start: (f32, f32),
    end: (f32, f32),
    thickness: u32,
    color: Rgb<u8>,
) {
    let (w, h) = img.dimensions();
    let t = thickness.max(1);
    for dy in 0..t {
        for dx in 0..t {
            let (ox, oy) = (dx as f32, dy as f32);
            let shifted = ((start.0 + ox, start.1 + oy), (end.0 + ox, end.1 + oy));
            if let Some((a, b)) = clip_segment_to_image(shifted.0, shifted.1, w, h) {
                draw_line_segment_mut(img, a, b, color);
            }
        }
    }
}

/// Draw a fitted segment line.
pub fn draw_fitted_line(img: &mut RgbImage, line: &LineSegment, color: Rgb<u8>) {
    draw_thick_segment_mut(
        img,
        (line.start.x as f32, line.start.y as f32),
        (line.end.x as f32, line.end.y as f32),
        LINE_THICKNESS,
        color,
    );
}

/// Draw `text` with its baseline-left corner at `(x, y)` in the label style.
pub fn draw_label(img: &mut RgbImage, text: &str, x: i32, y: i32) {
    for (a, b) in text_strokes(text, (x as f32, y as f32), LABEL_SCALE) {
        draw_thick_segment_mut(img, a, b, LABEL_THICKNESS, LABEL_COLOR);
    }
}
