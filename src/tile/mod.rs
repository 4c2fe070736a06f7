//! Tiling of the image into independent work units.
//!
//! Purpose
//! - Split each pass into tiles that can be convolved in any order (or in
//!   parallel): a tile reads only from the pass input and writes only its own
//!   interior of the pass output.
//!
//! Design
//! - The global range is rounded up to a multiple of the tile size, the way a
//!   work-group dispatch would be; tiles along the right and bottom edges are
//!   clipped to the image so interiors never overlap and never leave it.
//! - Each tile carries a `halo` (>= 1). The halo cells are loaded into the
//!   tile's private [`LocalBuffer`] with clamp-to-edge addressing, so adjacent
//!   tiles overlap only in what they read.
//! - Tiles are enumerated row-major; the order carries no meaning.
pub mod buffer;
pub mod convolve;

pub use buffer::{clamp_coord, LocalBuffer};
pub use convolve::{blur_pixel, convolve_tile, BoxBlurWeights, TileBlock};

use crate::error::{Result, TiltShiftError};
use serde::{Deserialize, Serialize};

/// Rectangular interior of a work unit plus its halo width.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Tile {
    pub origin_x: usize,
    pub origin_y: usize,
    pub width: usize,
    pub height: usize,
    pub halo: usize,
}

impl Tile {
    /// Width of the halo-padded local buffer.
    #[inline]
    pub fn buffer_width(&self) -> usize {
        self.width + 2 * self.halo
    }

    /// Height of the halo-padded local buffer.
    #[inline]
    pub fn buffer_height(&self) -> usize {
        self.height + 2 * self.halo
    }

    /// Whether the interior lies inside a `width × height` image.
    pub fn fits(&self, width: usize, height: usize) -> bool {
        self.origin_x + self.width <= width && self.origin_y + self.height <= height
    }
}

/// Tile geometry requested by the caller.
///
/// The default is 16×16 tiles with a 1-pixel halo. An image narrower or
/// shorter than 16 pixels rejects that size; [`TileOptions::fit_to`] adapts it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct TileOptions {
    pub tile_width: usize,
    pub tile_height: usize,
    pub halo: usize,
}

impl TileOptions {
    pub fn new(tile_width: usize, tile_height: usize) -> Self {
        Self {
            tile_width,
            tile_height,
            ..Self::default()
        }
    }

    /// One tile covering the whole image.
    pub fn whole_image(width: usize, height: usize) -> Self {
        Self::new(width, height)
    }

    pub fn with_halo(mut self, halo: usize) -> Self {
        self.halo = halo;
        self
    }

    /// Shrink the tile so it is no larger than a `width × height` image.
    pub fn fit_to(mut self, width: usize, height: usize) -> Self {
        self.tile_width = self.tile_width.min(width);
        self.tile_height = self.tile_height.min(height);
        self
    }
}

impl Default for TileOptions {
    fn default() -> Self {
        Self {
            tile_width: 16,
            tile_height: 16,
            halo: 1,
        }
    }
}

/// All tiles covering one image.
#[derive(Clone, Debug)]
pub struct TileGrid {
    width: usize,
    height: usize,
    options: TileOptions,
    tiles: Vec<Tile>,
}

impl TileGrid {
    pub fn new(width: usize, height: usize, options: TileOptions) -> Result<Self> {
        validate(width, height, &options)?;
        let global_w = round_up(width, options.tile_width);
        let global_h = round_up(height, options.tile_height);

        let mut tiles = Vec::with_capacity(
            (global_w / options.tile_width) * (global_h / options.tile_height),
        );
        for origin_y in (0..global_h).step_by(options.tile_height) {
            for origin_x in (0..global_w).step_by(options.tile_width) {
                tiles.push(Tile {
                    origin_x,
                    origin_y,
                    width: options.tile_width.min(width - origin_x),
                    height: options.tile_height.min(height - origin_y),
                    halo: options.halo,
                });
            }
        }

        Ok(Self {
            width,
            height,
            options,
            tiles,
        })
    }

    pub fn tiles(&self) -> &[Tile] {
        &self.tiles
    }

    pub fn len(&self) -> usize {
        self.tiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }

    pub fn options(&self) -> TileOptions {
        self.options
    }

    pub fn dimensions(&self) -> (usize, usize) {
        (self.width, self.height)
    }
}

/// Round `global` up to the next multiple of `group`.
pub fn round_up(global: usize, group: usize) -> usize {
    match global % group {
        0 => global,
        r => global + group - r,
    }
}

fn validate(width: usize, height: usize, options: &TileOptions) -> Result<()> {
    if width == 0 || height == 0 {
        return Err(TiltShiftError::invalid(format!(
            "image dimensions must be positive, got {width}x{height}"
        )));
    }
    if options.tile_width == 0 || options.tile_height == 0 {
        return Err(TiltShiftError::invalid(format!(
            "tile size must be positive, got {}x{}",
            options.tile_width, options.tile_height
        )));
    }
    if options.tile_width > width || options.tile_height > height {
        return Err(TiltShiftError::invalid(format!(
            "tile {}x{} exceeds image {width}x{height}",
            options.tile_width, options.tile_height
        )));
    }
    if options.halo == 0 {
        return Err(TiltShiftError::invalid(
            "halo must be at least 1 for a 3x3 neighbourhood",
        ));
    }
    Ok(())
}
