//! Debug-image context: mode, output directory and the per-call counter
//! used to name debug files.

use std::path::{Path, PathBuf};

use image::RgbImage;
use serde::{Deserialize, Serialize};

use crate::io::IoError;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DebugMode {
    #[default]
    Off,
    /// Write debug images to the output directory.
    Print,
    /// Hand debug images to an interactive viewer. Only logged here.
    Plot,
}

impl std::str::FromStr for DebugMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "off" | "none" => Ok(DebugMode::Off),
            "print" => Ok(DebugMode::Print),
            "plot" | "show" => Ok(DebugMode::Plot),
            other => Err(format!("unknown debug mode {other:?}")),
        }
    }
}

fn default_outdir() -> PathBuf {
    PathBuf::from(".")
}

/// Serializable debug settings.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DebugParams {
    #[serde(default)]
    pub debug: DebugMode,
    #[serde(default = "default_outdir")]
    pub debug_outdir: PathBuf,
}

impl Default for DebugParams {
    fn default() -> Self {
        Self {
            debug: DebugMode::Off,
            debug_outdir: default_outdir(),
        }
    }
}

/// Debug state threaded through measurement calls.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DebugContext {
    pub mode: DebugMode,
    pub outdir: PathBuf,
    device: u64,
}

impl Default for DebugContext {
    fn default() -> Self {
        Self::new(DebugMode::Off, default_outdir())
    }
}

impl DebugContext {
    pub fn new(mode: DebugMode, outdir: impl Into<PathBuf>) -> Self {
        Self {
            mode,
            outdir: outdir.into(),
            device: 0,
        }
    }

    pub fn from_params(params: &DebugParams) -> Self {
        Self::new(params.debug, params.debug_outdir.clone())
    }

    /// Current counter value.
    pub fn device(&self) -> u64 {
        self.device
    }

    /// Bump the counter; called once per measurement call.
    pub fn advance(&mut self) -> u64 {
        self.device += 1;
        self.device
    }

    /// Debug file path for `suffix` at the current counter value.
    pub fn image_path(&self, suffix: &str) -> PathBuf {
        self.outdir.join(format!("{}_{suffix}.png", self.device))
    }

    /// Emit `img` under the next counter value and advance the counter.
    ///
    /// The counter moves in every mode, but only once the emit succeeded.
    pub fn emit_next(
        &mut self,
        img: &RgbImage,
        suffix: &str,
    ) -> Result<Option<PathBuf>, IoError> {
        self.device += 1;
        let emitted = self.emit(img, suffix);
        if emitted.is_err() {
            self.device -= 1;
        }
        emitted
    }

    /// Emit `img` according to the mode. Returns the written path in
    /// `Print` mode.
    pub fn emit(&self, img: &RgbImage, suffix: &str) -> Result<Option<PathBuf>, IoError> {
        match self.mode {
            DebugMode::Off => Ok(None),
            DebugMode::Print => {
                let path = self.image_path(suffix);
                save_rgb(img, &path)?;
                log::info!("wrote debug image {}", path.display());
                Ok(Some(path))
            }
            DebugMode::Plot => {
                log::info!(
                    "debug image {}_{suffix} ({}x{}) ready for display",
                    self.device,
                    img.width(),
                    img.height()
                );
                Ok(None)
            }
        }
    }
}

fn save_rgb(img: &RgbImage, path: &Path) -> Result<(), IoError> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }
    img.save(path)?;
    Ok(())
}
