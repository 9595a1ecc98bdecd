//! Angle measurement for plant-skeleton segments.
//!
//! This crate provides:
//! - re-exports of the pure geometry in `skeleton-angles-core`
//! - [`segment_angle`]: fit a line to each segment, draw lines and angle
//!   labels onto a copy of the segmented image, build the angle table and
//!   report the angles to a [`MeasurementStore`]
//! - the collaborators that call needs: a deterministic color palette, a
//!   debug context with its per-call counter, and an in-memory store
//! - JSON config/segment/report helpers and (feature `cli`) a binary
//!
//! ## Quickstart
//!
//! ```
//! use image::{Rgb, RgbImage};
//! use skeleton_angles::{segment_angle, DebugContext, Outputs, Segment};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let img = RgbImage::from_pixel(32, 32, Rgb([0, 0, 0]));
//! let segments = vec![Segment::from_xy(&[(0, 0), (1, 1), (2, 2)])];
//! let mut store = Outputs::new();
//! let mut debug = DebugContext::default();
//!
//! let res = segment_angle(&img, &segments, &mut store, &mut debug)?;
//! assert_eq!(res.angle_header(), ["HEADER_ANGLE", "ID0"]);
//! assert_eq!(format!("{:.2}", res.angles()[0]), "-45.00");
//! # Ok(())
//! # }
//! ```
//!
//! ## API map
//! - `skeleton_angles::core`: segments, extents, line fits, angle table.
//! - [`palette`]: colormaps and [`color_palette`].
//! - [`draw`]: line and label rasterisation.
//! - [`font`]: the stroke font used for labels.
//! - [`outputs`]: the measurement store.
//! - [`debug`]: debug mode and image emission.
//! - [`io`]: JSON config, segments and reports.

pub use skeleton_angles_core as core;

pub mod debug;
pub mod draw;
pub mod font;
pub mod io;
mod measure;
pub mod outputs;
pub mod palette;

pub use debug::{DebugContext, DebugMode, DebugParams};
pub use measure::{
    segment_angle, segment_angle_with_palette, SegmentAngleError, SegmentAngleResult,
    DEBUG_IMAGE_SUFFIX,
};
pub use outputs::{
    MeasurementStore, MeasurementValue, Outputs, MORPHOLOGY_CATEGORY, SEGMENT_ANGLES_KEY,
};
pub use palette::{color_palette, color_palette_with, Colormap, PaletteParams};

pub use skeleton_angles_core::{AngleCell, AngleTable, Segment, SegmentAngle, SegmentError};
