use serde::{Deserialize, Serialize};

use crate::angle::SegmentAngle;

pub const ANGLE_HEADER_MARKER: &str = "HEADER_ANGLE";
pub const ANGLE_DATA_MARKER: &str = "ANGLE_DATA";

/// One cell of the data row: the leading marker, then angle values.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AngleCell {
    Marker(String),
    Value(f64),
}

impl AngleCell {
    pub fn as_value(&self) -> Option<f64> {
        match self {
            AngleCell::Value(v) => Some(*v),
            AngleCell::Marker(_) => None,
        }
    }
}

/// Rejected table layouts when loading from disk.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum TableError {
    #[error("header row must start with \"HEADER_ANGLE\"")]
    MissingHeaderMarker,
    #[error("data row must start with \"ANGLE_DATA\"")]
    MissingDataMarker,
    #[error("header has {header} cells but data has {data}")]
    LengthMismatch { header: usize, data: usize },
    #[error("cell {index} must be a number")]
    NonNumericCell { index: usize },
}

/// Header and data rows for segment angles.
///
/// `header[i + 1]` and `data[i + 1]` always describe segment `i`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawAngleTable")]
pub struct AngleTable {
    header: Vec<String>,
    data: Vec<AngleCell>,
}

#[derive(Deserialize)]
struct RawAngleTable {
    header: Vec<String>,
    data: Vec<AngleCell>,
}

impl TryFrom<RawAngleTable> for AngleTable {
    type Error = TableError;

    fn try_from(raw: RawAngleTable) -> Result<Self, Self::Error> {
        if raw.header.first().map(String::as_str) != Some(ANGLE_HEADER_MARKER) {
            return Err(TableError::MissingHeaderMarker);
        }
        if !matches!(raw.data.first(), Some(AngleCell::Marker(m)) if m == ANGLE_DATA_MARKER) {
            return Err(TableError::MissingDataMarker);
        }
        if raw.header.len() != raw.data.len() {
            return Err(TableError::LengthMismatch {
                header: raw.header.len(),
                data: raw.data.len(),
            });
        }
        if let Some(index) = raw.data.iter().skip(1).position(|c| c.as_value().is_none()) {
            return Err(TableError::NonNumericCell { index: index + 1 });
        }
        Ok(Self {
            header: raw.header,
            data: raw.data,
        })
    }
}

impl Default for AngleTable {
    fn default() -> Self {
        Self::new()
    }
}

impl AngleTable {
    pub fn new() -> Self {
        Self {
            header: vec![ANGLE_HEADER_MARKER.to_string()],
            data: vec![AngleCell::Marker(ANGLE_DATA_MARKER.to_string())],
        }
    }

    /// Build a table from measurements already in segment order.
    pub fn from_measurements(measurements: &[SegmentAngle]) -> Self {
        let mut table = Self::new();
        for m in measurements {
            table.push(m.index, m.angle_deg);
        }
        table
    }

    /// Append the row for segment `index`.
    pub fn push(&mut self, index: usize, angle_deg: f64) {
        self.header.push(segment_label(index));
        self.data.push(AngleCell::Value(angle_deg));
    }

    pub fn header(&self) -> &[String] {
        &self.header
    }

    pub fn data(&self) -> &[AngleCell] {
        &self.data
    }

    /// Angle values without the leading marker.
    pub fn angles(&self) -> Vec<f64> {
        self.data.iter().filter_map(AngleCell::as_value).collect()
    }

    /// Number of segments in the table.
    pub fn len(&self) -> usize {
        self.header.len() - 1
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Both rows as comma-separated lines.
    pub fn to_csv_lines(&self) -> [String; 2] {
        let data: Vec<String> = self
            .data
            .iter()
            .map(|c| match c {
                AngleCell::Marker(m) => m.clone(),
                AngleCell::Value(v) => v.to_string(),
            })
            .collect();
        [self.header.join(","), data.join(",")]
    }
}

/// Header label for segment `index`.
pub fn segment_label(index: usize) -> String {
    format!("ID{index}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_table_has_only_markers() {
        let t = AngleTable::new();
        assert!(t.is_empty());
        assert_eq!(t.header(), ["HEADER_ANGLE"]);
        assert_eq!(t.data(), [AngleCell::Marker("ANGLE_DATA".into())]);
    }

    #[test]
    fn rows_stay_aligned() {
        let mut t = AngleTable::new();
        t.push(0, -45.0);
        t.push(1, 12.5);
        assert_eq!(t.len(), 2);
        assert_eq!(t.header().len(), t.data().len());
        assert_eq!(t.header()[2], "ID1");
        assert_eq!(t.data()[2], AngleCell::Value(12.5));
        assert_eq!(t.angles(), vec![-45.0, 12.5]);
        assert_eq!(
            t.to_csv_lines(),
            [
                "HEADER_ANGLE,ID0,ID1".to_string(),
                "ANGLE_DATA,-45,12.5".to_string()
            ]
        );
    }

    #[test]
    fn data_row_serializes_mixed_cells() {
        let mut t = AngleTable::new();
        t.push(0, 0.0);
        let json = serde_json::to_value(&t).expect("serialize");
        assert_eq!(json["header"], serde_json::json!(["HEADER_ANGLE", "ID0"]));
        assert_eq!(json["data"], serde_json::json!(["ANGLE_DATA", 0.0]));
        let back: AngleTable = serde_json::from_value(json).expect("deserialize");
        assert_eq!(back, t);
    }

    fn load(json: &str) -> Result<AngleTable, String> {
        serde_json::from_str(json).map_err(|e| e.to_string())
    }

    #[test]
    fn loading_rejects_misaligned_rows() {
        let err = load(r#"{"header":["HEADER_ANGLE","ID0","ID1"],"data":["ANGLE_DATA",1.0]}"#)
            .unwrap_err();
        assert!(err.contains("header has 3 cells but data has 2"), "{err}");
    }

    #[test]
    fn loading_rejects_missing_markers() {
        let err = load(r#"{"header":[],"data":[]}"#).unwrap_err();
        assert!(err.contains("HEADER_ANGLE"), "{err}");
        let err = load(r#"{"header":["HEADER_ANGLE"],"data":[]}"#).unwrap_err();
        assert!(err.contains("ANGLE_DATA"), "{err}");
        let err = load(r#"{"header":["HEADER_ANGLE","ID0"],"data":["ANGLE_DATA","x"]}"#)
            .unwrap_err();
        assert!(err.contains("cell 1 must be a number"), "{err}");
    }

    #[test]
    fn loaded_table_keeps_len_consistent() {
        let t = load(r#"{"header":["HEADER_ANGLE"],"data":["ANGLE_DATA"]}"#).expect("load");
        assert!(t.is_empty());
        assert_eq!(t.len(), 0);
    }
}
