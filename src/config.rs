//! JSON runtime configuration for the command-line tools.
//!
//! ```json
//! {
//!   "input": "boathouse.png",
//!   "grayscale": false,
//!   "output": { "image": "out/boathouse_ts.png", "reportJson": "out/report.json" },
//!   "filter": {
//!     "passes": 3,
//!     "saturation": 0.0,
//!     "contrast": 0.0,
//!     "focus": { "kind": "disc", "center_x": 650, "center_y": 420, "radius": 200 },
//!     "tiles": { "tileWidth": 16, "tileHeight": 16, "halo": 1 }
//!   }
//! }
//! ```
use crate::error::{Result, TiltShiftError};
use crate::pass::FilterParams;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Clone, Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OutputConfig {
    /// Filtered image; format follows the extension.
    pub image: Option<PathBuf>,
    /// Optional JSON report of the run.
    pub report_json: Option<PathBuf>,
    /// Optional grayscale rendering of the blur mask.
    pub mask_image: Option<PathBuf>,
}

#[derive(Clone, Debug, Deserialize)]
pub struct RuntimeConfig {
    pub input: PathBuf,
    /// Load the input as single-channel instead of RGB.
    #[serde(default)]
    pub grayscale: bool,
    #[serde(default)]
    pub output: OutputConfig,
    #[serde(default)]
    pub filter: FilterParams,
}

pub fn load_config(path: &Path) -> Result<RuntimeConfig> {
    let contents = fs::read_to_string(path).map_err(|source| TiltShiftError::Io {
        path: path.display().to_string(),
        source,
    })?;
    parse_config(&contents).map_err(|source| TiltShiftError::Json {
        path: path.display().to_string(),
        source,
    })
}

pub fn parse_config(contents: &str) -> std::result::Result<RuntimeConfig, serde_json::Error> {
    serde_json::from_str(contents)
}
