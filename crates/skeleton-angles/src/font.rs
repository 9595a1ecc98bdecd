//! Fixed vector stroke font for angle labels.
//!
//! Glyphs are polylines in font units on a 21-unit cap height, x to the
//! right and y up from the baseline stored as negative values (image
//! convention). Only what a `{:.2}` angle can print is covered: digits,
//! minus and the decimal point.

type Polyline = &'static [(i8, i8)];

struct Glyph {
    advance: i8,
    strokes: &'static [Polyline],
}

/// Cap height in font units.
pub const CAP_HEIGHT: f32 = 21.0;

/// Advance used for characters the font does not cover.
const MISSING_ADVANCE: i8 = 16;

static ZERO: Glyph = Glyph {
    advance: 20,
    strokes: &[&[
        (9, -21),
        (6, -20),
        (4, -17),
        (3, -12),
        (3, -9),
        (4, -4),
        (6, -1),
        (9, 0),
        (11, 0),
        (14, -1),
        (16, -4),
        (17, -9),
        (17, -12),
        (16, -17),
        (14, -20),
        (11, -21),
        (9, -21),
    ]],
};

static ONE: Glyph = Glyph {
    advance: 20,
    strokes: &[&[(6, -17), (8, -18), (11, -21), (11, 0)]],
};

static TWO: Glyph = Glyph {
    advance: 20,
    strokes: &[&[
        (4, -16),
        (4, -17),
        (5, -19),
        (6, -20),
        (8, -21),
        (12, -21),
        (14, -20),
        (15, -19),
        (16, -17),
        (16, -15),
        (15, -13),
        (13, -10),
        (3, 0),
        (17, 0),
    ]],
};

static THREE: Glyph = Glyph {
    advance: 20,
    strokes: &[&[
        (5, -21),
        (16, -21),
        (10, -13),
        (13, -13),
        (15, -12),
        (16, -11),
        (17, -8),
        (17, -6),
        (16, -3),
        (14, -1),
        (11, 0),
        (8, 0),
        (5, -1),
        (4, -2),
        (3, -4),
    ]],
};

static FOUR: Glyph = Glyph {
    advance: 20,
    strokes: &[&[(13, -21), (3, -7), (18, -7)], &[(13, -21), (13, 0)]],
};

static FIVE: Glyph = Glyph {
    advance: 20,
    strokes: &[&[
        (15, -21),
        (5, -21),
        (4, -12),
        (5, -13),
        (8, -14),
        (11, -14),
        (14, -13),
        (16, -11),
        (17, -8),
        (17, -6),
        (16, -3),
        (14, -1),
        (11, 0),
        (8, 0),
        (5, -1),
        (4, -2),
        (3, -4),
    ]],
};

static SIX: Glyph = Glyph {
    advance: 20,
    strokes: &[&[
        (16, -18),
        (15, -20),
        (12, -21),
        (10, -21),
        (7, -20),
        (5, -17),
        (4, -12),
        (4, -7),
        (5, -3),
        (7, -1),
        (10, 0),
        (11, 0),
        (14, -1),
        (16, -3),
        (17, -6),
        (17, -7),
        (16, -10),
        (14, -12),
        (11, -13),
        (10, -13),
        (7, -12),
        (5, -10),
        (4, -7),
    ]],
};

static SEVEN: Glyph = Glyph {
    advance: 20,
    strokes: &[&[(17, -21), (7, 0)], &[(3, -21), (17, -21)]],
};

static EIGHT: Glyph = Glyph {
    advance: 20,
    strokes: &[&[
        (8, -21),
        (5, -20),
        (4, -18),
        (4, -16),
        (5, -14),
        (7, -13),
        (11, -12),
        (14, -11),
        (16, -9),
        (17, -7),
        (17, -4),
        (16, -2),
        (15, -1),
        (12, 0),
        (8, 0),
        (5, -1),
        (4, -2),
        (3, -4),
        (3, -7),
        (4, -9),
        (6, -11),
        (9, -12),
        (13, -13),
        (15, -14),
        (16, -16),
        (16, -18),
        (15, -20),
        (12, -21),
        (8, -21),
    ]],
};

static NINE: Glyph = Glyph {
    advance: 20,
    strokes: &[&[
        (16, -14),
        (15, -11),
        (13, -9),
        (10, -8),
        (9, -8),
        (6, -9),
        (4, -11),
        (3, -14),
        (3, -15),
        (4, -18),
        (6, -20),
        (9, -21),
        (10, -21),
        (13, -20),
        (15, -18),
        (16, -14),
        (16, -9),
        (15, -4),
        (13, -1),
        (10, 0),
        (8, 0),
        (5, -1),
        (4, -3),
    ]],
};

static MINUS: Glyph = Glyph {
    advance: 26,
    strokes: &[&[(4, -9), (22, -9)]],
};

static PERIOD: Glyph = Glyph {
    advance: 10,
    strokes: &[&[(5, -2), (4, -1), (5, 0), (6, -1), (5, -2)]],
};

fn glyph(c: char) -> Option<&'static Glyph> {
    Some(match c {
        '0' => &ZERO,
        '1' => &ONE,
        '2' => &TWO,
        '3' => &THREE,
        '4' => &FOUR,
        '5' => &FIVE,
        '6' => &SIX,
        '7' => &SEVEN,
        '8' => &EIGHT,
        '9' => &NINE,
        '-' => &MINUS,
        '.' => &PERIOD,
        _ => return None,
    })
}

/// Straight pieces to draw for `text` with its baseline-left corner at
/// `origin`, in pixels.
pub fn text_strokes(text: &str, origin: (f32, f32), scale: f32) -> Vec<((f32, f32), (f32, f32))> {
    let mut out = Vec::new();
    let mut pen_x = origin.0;
    for c in text.chars() {
        let Some(g) = glyph(c) else {
            pen_x += MISSING_ADVANCE as f32 * scale;
            continue;
        };
        let to_px = |(x, y): (i8, i8)| (pen_x + x as f32 * scale, origin.1 + y as f32 * scale);
        for stroke in g.strokes {
            for w in stroke.windows(2) {
                out.push((to_px(w[0]), to_px(w[1])));
            }
        }
        pen_x += g.advance as f32 * scale;
    }
    out
}

/// Width in pixels of `text` at `scale`.
pub fn text_width(text: &str, scale: f32) -> f32 {
    text.chars()
        .map(|c| glyph(c).map_or(MISSING_ADVANCE, |g| g.advance) as f32 * scale)
        .sum()
}
