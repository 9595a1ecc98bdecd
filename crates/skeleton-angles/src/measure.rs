//! Segment angle measurement: fit, draw, tabulate, report.

use image::RgbImage;
use skeleton_angles_core::{measure_segments, AngleTable, Segment, SegmentAngle, SegmentError};

#[cfg(feature = "tracing")]
use tracing::instrument;

use crate::debug::DebugContext;
use crate::draw::{draw_fitted_line, draw_label};
use crate::io::IoError;
use crate::outputs::{MeasurementStore, MeasurementValue, MORPHOLOGY_CATEGORY, SEGMENT_ANGLES_KEY};
use crate::palette::{color_palette_with, PaletteParams};

/// Suffix of the debug image written in print mode.
pub const DEBUG_IMAGE_SUFFIX: &str = "segmented_angles";

/// Errors returned by [`segment_angle`].
#[derive(thiserror::Error, Debug)]
pub enum SegmentAngleError {
    #[error(transparent)]
    Segment(#[from] SegmentError),
    #[error("invalid image dimensions (width={width}, height={height})")]
    EmptyImage { width: u32, height: u32 },
    #[error(transparent)]
    Io(#[from] IoError),
}

/// Output of one measurement call.
#[derive(Clone, Debug)]
pub struct SegmentAngleResult {
    pub table: AngleTable,
    pub labeled_img: RgbImage,
    /// Per-segment geometry in input order.
    pub segments: Vec<SegmentAngle>,
}

impl SegmentAngleResult {
    /// `["HEADER_ANGLE", "ID0", ...]`
    pub fn angle_header(&self) -> &[String] {
        self.table.header()
    }

    /// `["ANGLE_DATA", a0, ...]`
    pub fn angle_data(&self) -> &[skeleton_angles_core::AngleCell] {
        self.table.data()
    }

    pub fn angles(&self) -> Vec<f64> {
        self.table.angles()
    }
}

/// Measure segment angles with the default rainbow palette.
///
/// See [`segment_angle_with_palette`].
pub fn segment_angle(
    segmented_img: &RgbImage,
    objects: &[Segment],
    store: &mut impl MeasurementStore,
    debug: &mut DebugContext,
) -> Result<SegmentAngleResult, SegmentAngleError> {
    segment_angle_with_palette(segmented_img, objects, store, debug, PaletteParams::default())
}

/// Fit a line to every segment, draw it and its angle onto a copy of
/// `segmented_img`, and report the angles.
///
/// All lines are drawn before any label so later lines never cover an
/// earlier segment's text. Steep segments (see
/// [`skeleton_angles_core::VERTICAL_SLOPE_LIMIT`]) are labelled and reported
/// but get no line. The angle list is written to `store` once, under
/// `morphology_data.segment_angles`, after the debug image (if any) has
/// been emitted; on error neither the store nor the caller sees partial
/// results and the debug counter is left where it was.
#[cfg_attr(
    feature = "tracing",
    instrument(
        level = "info",
        skip(segmented_img, objects, store, debug, palette),
        fields(
            width = segmented_img.width(),
            height = segmented_img.height(),
            segments = objects.len()
        )
    )
)]
pub fn segment_angle_with_palette(
    segmented_img: &RgbImage,
    objects: &[Segment],
    store: &mut impl MeasurementStore,
    debug: &mut DebugContext,
    palette: PaletteParams,
) -> Result<SegmentAngleResult, SegmentAngleError> {
    let (width, height) = segmented_img.dimensions();
    if width == 0 || height == 0 {
        return Err(SegmentAngleError::EmptyImage { width, height });
    }

    let measured = measure_segments(objects)?;
    let colors = color_palette_with(measured.len(), palette);
    let mut labeled_img = segmented_img.clone();

    for (m, color) in measured.iter().zip(&colors) {
        if let Some(line) = &m.draw {
            draw_fitted_line(&mut labeled_img, line, *color);
        }
    }
    for m in &measured {
        draw_label(
            &mut labeled_img,
            &m.label(),
            m.label_anchor.x,
            m.label_anchor.y,
        );
    }

    let table = AngleTable::from_measurements(&measured);

    debug.emit_next(&labeled_img, DEBUG_IMAGE_SUFFIX)?;

    store.set(
        MORPHOLOGY_CATEGORY,
        SEGMENT_ANGLES_KEY,
        MeasurementValue::List(table.angles()),
    );
    log::debug!("measured {} segment angles", measured.len());

    Ok(SegmentAngleResult {
        table,
        labeled_img,
        segments: measured,
    })
}
