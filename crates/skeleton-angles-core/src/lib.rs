//! Geometry core for plant-skeleton segment angles.
//!
//! Works on point lists only, no image buffers: for each segment (an ordered run of integer pixel
//! coordinates) it computes the horizontal extent of the minimal-area
//! bounding rectangle, an orthogonal least-squares line, the image-space
//! slope and the angle in degrees, plus the line segment worth drawing.
//!
//! ```
//! use skeleton_angles_core::{measure_segments, AngleTable, Segment};
//!
//! let segments = vec![Segment::from_xy(&[(0, 5), (5, 5), (10, 5)])];
//! let measured = measure_segments(&segments).unwrap();
//! let table = AngleTable::from_measurements(&measured);
//! assert_eq!(table.header(), ["HEADER_ANGLE", "ID0"]);
//! assert_eq!(table.angles(), vec![0.0]);
//! ```

mod angle;
mod extent;
mod line_fit;
mod logger;
mod segment;
mod table;

pub use angle::{
    clip_to_extent, is_effectively_vertical, measure_segment, measure_segments, slope_to_degrees,
    LineSegment, SegmentAngle, VERTICAL_SLOPE_LIMIT,
};
pub use extent::{bounding_extent, convex_hull, min_area_rect, BoundingExtent, MinAreaRect};
pub use line_fit::{fit_line_l2, FittedLine};
pub use segment::{validate_segments, Segment, SegmentError};
pub use table::{
    segment_label, AngleCell, AngleTable, TableError, ANGLE_DATA_MARKER, ANGLE_HEADER_MARKER,
};

#[cfg(feature = "tracing")]
pub use logger::init_tracing;

pub use logger::init_with_level;
