//! JSON configuration, segment files and report helpers.

use std::fs;
use std::path::{Path, PathBuf};

use image::RgbImage;
use serde::{Deserialize, Serialize};
use skeleton_angles_core::{AngleTable, Segment};

use crate::debug::DebugParams;
use crate::measure::{SegmentAngleError, SegmentAngleResult};
use crate::outputs::Outputs;
use crate::palette::PaletteParams;

#[derive(thiserror::Error, Debug)]
pub enum IoError {
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Json(#[from] serde_json::Error),
    #[error(transparent)]
    Image(#[from] image::ImageError),
}

/// Load segments stored as `[[[x, y], ...], ...]`.
pub fn load_segments_json(path: impl AsRef<Path>) -> Result<Vec<Segment>, IoError> {
    let raw = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&raw)?)
}

pub fn write_segments_json(path: impl AsRef<Path>, segments: &[Segment]) -> Result<(), IoError> {
    fs::write(path, serde_json::to_string(segments)?)?;
    Ok(())
}

/// Load any supported image as 8-bit RGB.
pub fn load_rgb_image(path: impl AsRef<Path>) -> Result<RgbImage, IoError> {
    Ok(image::open(path)?.to_rgb8())
}

/// Configuration for a measurement run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SegmentAngleConfig {
    pub image_path: String,
    pub segments_path: String,
    #[serde(default)]
    pub output_path: Option<String>,
    #[serde(default)]
    pub results_path: Option<String>,
    #[serde(default)]
    pub debug: DebugParams,
    #[serde(default)]
    pub palette: PaletteParams,
}

impl SegmentAngleConfig {
    /// Load a JSON config from disk.
    pub fn load_json(path: impl AsRef<Path>) -> Result<Self, IoError> {
        let raw = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&raw)?)
    }

    /// Write this config to disk as pretty JSON.
    pub fn write_json(&self, path: impl AsRef<Path>) -> Result<(), IoError> {
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json)?;
        Ok(())
    }

    /// Annotated image path.
    pub fn output_path(&self) -> PathBuf {
        self.output_path
            .as_ref()
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from("segmented_angles.png"))
    }

    /// Measurement store path.
    pub fn results_path(&self) -> PathBuf {
        self.results_path
            .as_ref()
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from("segment_angles.json"))
    }
}

/// Summary of one run, written next to the annotated image.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SegmentAngleReport {
    pub image_path: String,
    pub num_segments: usize,
    #[serde(default)]
    pub table: Option<AngleTable>,
    #[serde(default)]
    pub results: Option<Outputs>,
    #[serde(default)]
    pub error: Option<String>,
}

impl SegmentAngleReport {
    /// Base report for a run over `num_segments` segments.
    pub fn new(cfg: &SegmentAngleConfig, num_segments: usize) -> Self {
        Self {
            image_path: cfg.image_path.clone(),
            num_segments,
            table: None,
            results: None,
            error: None,
        }
    }

    /// Fill in a successful measurement.
    pub fn set_measurement(&mut self, res: &SegmentAngleResult, results: &Outputs) {
        self.table = Some(res.table.clone());
        self.results = Some(results.clone());
        self.error = None;
    }

    /// Record a measurement error.
    pub fn set_error(&mut self, err: &SegmentAngleError) {
        self.error = Some(err.to_string());
    }

    pub fn load_json(path: impl AsRef<Path>) -> Result<Self, IoError> {
        let raw = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&raw)?)
    }

    pub fn write_json(&self, path: impl AsRef<Path>) -> Result<(), IoError> {
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json)?;
        Ok(())
    }
}
