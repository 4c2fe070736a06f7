//! Parameter types configuring a filter run.
//!
//! Everything is supplied by the caller before the first pass and never
//! changes afterwards; there is no global or environment-derived state.
use crate::error::{Result, TiltShiftError};
use crate::grade::ColorGrade;
use crate::mask::FocusRegion;
use crate::tile::TileOptions;
use serde::{Deserialize, Serialize};

/// Three box-blur passes approximate a Gaussian.
pub const DEFAULT_PASSES: usize = 3;

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct FilterParams {
    /// Number of blur passes (>= 1).
    pub passes: usize,
    /// Final-pass saturation in `[0, 1]`.
    pub saturation: f32,
    /// Final-pass contrast in `[-255, 255]`.
    pub contrast: f32,
    /// Sharp zone of the image.
    pub focus: FocusRegion,
    /// Work-unit geometry.
    pub tiles: TileOptions,
}

impl FilterParams {
    /// Default passes, no grade and [`TileOptions::default`] tiles (16×16).
    ///
    /// A tile larger than the image is a configuration error, so images under
    /// 16 pixels in either axis need
    /// `.with_tiles(TileOptions::default().fit_to(width, height))`.
    pub fn new(focus: FocusRegion) -> Self {
        Self {
            focus,
            ..Self::default()
        }
    }

    pub fn with_passes(mut self, passes: usize) -> Self {
        self.passes = passes;
        self
    }

    pub fn with_grade(mut self, saturation: f32, contrast: f32) -> Self {
        self.saturation = saturation;
        self.contrast = contrast;
        self
    }

    pub fn with_tiles(mut self, tiles: TileOptions) -> Self {
        self.tiles = tiles;
        self
    }

    /// Check the pass count and build the validated colour grade.
    pub(crate) fn grade(&self) -> Result<ColorGrade> {
        if self.passes < 1 {
            return Err(TiltShiftError::invalid(format!(
                "at least one pass is required, got {}",
                self.passes
            )));
        }
        ColorGrade::new(self.saturation, self.contrast)
    }
}

impl Default for FilterParams {
    fn default() -> Self {
        Self {
            passes: DEFAULT_PASSES,
            saturation: 0.0,
            contrast: 0.0,
            focus: FocusRegion::default(),
            tiles: TileOptions::default(),
        }
    }
}
