//! Measurement store: named result values grouped by category.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::io::IoError;

/// Category the segment angles are written under.
pub const MORPHOLOGY_CATEGORY: &str = "morphology_data";
/// Key of the segment angle list inside [`MORPHOLOGY_CATEGORY`].
pub const SEGMENT_ANGLES_KEY: &str = "segment_angles";

/// A stored measurement.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MeasurementValue {
    Scalar(f64),
    List(Vec<f64>),
    Text(String),
}

impl MeasurementValue {
    pub fn as_list(&self) -> Option<&[f64]> {
        match self {
            MeasurementValue::List(v) => Some(v.as_slice()),
            _ => None,
        }
    }
}

/// Sink for computed measurements.
pub trait MeasurementStore {
    /// Store `value` under `category.key`, creating the category if needed
    /// and replacing any previous value.
    fn set(&mut self, category: &str, key: &str, value: MeasurementValue);

    fn get(&self, category: &str, key: &str) -> Option<&MeasurementValue>;
}

/// In-memory store, serialised as `{category: {key: value}}`.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Outputs {
    pub measurements: BTreeMap<String, BTreeMap<String, MeasurementValue>>,
}

impl Outputs {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clear(&mut self) {
        self.measurements.clear();
    }

    /// Write all measurements to disk as pretty JSON.
    pub fn save_json(&self, path: impl AsRef<Path>) -> Result<(), IoError> {
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json)?;
        Ok(())
    }

    pub fn load_json(path: impl AsRef<Path>) -> Result<Self, IoError> {
        let raw = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&raw)?)
    }
}

impl MeasurementStore for Outputs {
    fn set(&mut self, category: &str, key: &str, value: MeasurementValue) {
        self.measurements
            .entry(category.to_string())
            .or_default()
            .insert(key.to_string(), value);
    }

    fn get(&self, category: &str, key: &str) -> Option<&MeasurementValue> {
        self.measurements.get(category)?.get(key)
    }
}
