//! Per-pixel blur-intensity field derived from a focus region.
//!
//! The mask starts fully blurred (`1.0` everywhere) and the focus geometry
//! carves out a sharp-to-blurred gradient. Only the part of the geometry that
//! can change a value is visited:
//!
//! - `Band` walks row distances `d < radius` and writes the shared amount to
//!   the two rows `center ± d` in one step.
//! - `Disc` walks offsets `(dx, dy)` in `[0, radius)²` and writes each amount
//!   to the four mirrored positions `(cx ± dx, cy ± dy)`.
//!
//! Offsets are clipped per axis to those that reach the image, so the work is
//! bounded by the image size even when the centre lies far outside it.
//! Everything outside stays at the initial `1.0`, which is exactly what the
//! fade law yields for `d >= radius`. The mask is computed once, before the
//! first pass, and is read-only afterwards.
pub mod focus;

pub use focus::{fade_amount, FocusRegion, CORE_FRACTION};

use crate::error::{Result, TiltShiftError};
use crate::image::{Image, ImageView, ImageViewMut};
use log::debug;
use std::ops::Range;

/// Blur amount per pixel in `[0, 1]`; `0` is sharp, `1` is maximum blur.
#[derive(Clone, Debug, PartialEq)]
pub struct BlurMask {
    amounts: Image<f32>,
}

impl BlurMask {
    /// Build the mask for `region` over a `width × height` image.
    pub fn generate(region: &FocusRegion, width: usize, height: usize) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(TiltShiftError::invalid(format!(
                "image dimensions must be positive, got {width}x{height}"
            )));
        }
        region.validate()?;

        let mut amounts = Image::filled(width, height, 1.0f32);
        let radius = region.radius();
        let core = region.core();
        match *region {
            FocusRegion::Band { center_row, .. } => {
                for d in offset_range(center_row, height, radius) {
                    let amount = fade_amount(d as f32, radius as f32, core);
                    for row in [center_row as i64 - d, center_row as i64 + d] {
                        if let Some(y) = in_bounds(row, height) {
                            amounts.row_mut(y).fill(amount);
                        }
                    }
                }
            }
            FocusRegion::Disc {
                center_x, center_y, ..
            } => {
                let range_x = offset_range(center_x, width, radius);
                for dy in offset_range(center_y, height, radius) {
                    for dx in range_x.clone() {
                        let distance = ((dx * dx + dy * dy) as f32).sqrt();
                        let amount = fade_amount(distance, radius as f32, core);
                        for row in [center_y as i64 - dy, center_y as i64 + dy] {
                            let Some(y) = in_bounds(row, height) else {
                                continue;
                            };
                            for col in [center_x as i64 - dx, center_x as i64 + dx] {
                                if let Some(x) = in_bounds(col, width) {
                                    amounts.set(x, y, amount);
                                }
                            }
                        }
                    }
                }
            }
        }

        debug!(
            "BlurMask::generate {:?} over {}x{} (core {:.2})",
            region, width, height, core
        );
        Ok(Self { amounts })
    }

    /// Wrap precomputed amounts; every value must be finite and within `[0, 1]`.
    pub fn from_vec(width: usize, height: usize, amounts: Vec<f32>) -> Result<Self> {
        if let Some(bad) = amounts
            .iter()
            .find(|a| !a.is_finite() || !(0.0..=1.0).contains(*a))
        {
            return Err(TiltShiftError::invalid(format!(
                "blur amount {bad} outside [0, 1]"
            )));
        }
        Ok(Self {
            amounts: Image::from_vec(width, height, amounts)?,
        })
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.amounts.w
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.amounts.h
    }

    #[inline]
    pub fn dimensions(&self) -> (usize, usize) {
        (self.amounts.w, self.amounts.h)
    }

    /// Blur amount at global coordinates `(x, y)`.
    #[inline]
    pub fn get(&self, x: usize, y: usize) -> f32 {
        self.amounts.get(x, y)
    }

    #[inline]
    pub fn row(&self, y: usize) -> &[f32] {
        self.amounts.row(y)
    }
}

/// Offsets `d < radius` for which `center - d` or `center + d` lies in `[0, extent)`.
fn offset_range(center: i32, extent: usize, radius: i32) -> Range<i64> {
    let last = extent as i64 - 1;
    let c = center as i64;
    let nearest = if c < 0 {
        -c
    } else if c > last {
        c - last
    } else {
        0
    };
    let farthest = c.abs().max((last - c).abs());
    nearest..(farthest + 1).min(radius as i64)
}

#[inline]
fn in_bounds(coord: i64, extent: usize) -> Option<usize> {
    (coord >= 0 && (coord as usize) < extent).then_some(coord as usize)
}
