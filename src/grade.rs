//! Final-pass colour grade: saturation and contrast.
//!
//! `saturation` scales every channel by `1 - value`, i.e. it pulls the pixel
//! toward black rather than toward its luminance. `contrast` uses the usual
//! 8-bit contrast curve `f = 259 (c + 255) / (255 (259 - c))` around mid-grey
//! 128 and truncates the result to `[0, 255]`.
use crate::error::{Result, TiltShiftError};
use crate::image::pixel::{truncate, Pixel};

pub const SATURATION_RANGE: std::ops::RangeInclusive<f32> = 0.0..=1.0;
pub const CONTRAST_RANGE: std::ops::RangeInclusive<f32> = -255.0..=255.0;

/// Scale every channel by `1 - value`, `value ∈ [0, 1]`.
pub fn saturation<P: Pixel>(pixel: P, value: f32) -> Result<P> {
    check_range("saturation", value, &SATURATION_RANGE)?;
    Ok(apply_saturation(pixel, value))
}

/// Contrast adjustment around 128, `value ∈ [-255, 255]`.
pub fn contrast<P: Pixel>(pixel: P, value: f32) -> Result<P> {
    check_range("contrast", value, &CONTRAST_RANGE)?;
    Ok(apply_contrast(pixel, contrast_factor(value)))
}

/// `259 (value + 255) / (255 (259 - value))`; equals 1 at `value == 0`.
#[inline]
pub fn contrast_factor(value: f32) -> f32 {
    (259.0 * (value + 255.0)) / (255.0 * (259.0 - value))
}

/// Validated saturation/contrast pair applied on the last pass.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ColorGrade {
    saturation: f32,
    /// Precomputed [`contrast_factor`].
    factor: f32,
}

impl ColorGrade {
    pub fn new(saturation: f32, contrast: f32) -> Result<Self> {
        check_range("saturation", saturation, &SATURATION_RANGE)?;
        check_range("contrast", contrast, &CONTRAST_RANGE)?;
        Ok(Self {
            saturation,
            factor: contrast_factor(contrast),
        })
    }

    /// Grade that leaves every pixel unchanged.
    pub fn identity() -> Self {
        Self {
            saturation: 0.0,
            factor: 1.0,
        }
    }

    /// Saturation first, then contrast.
    #[inline]
    pub fn apply<P: Pixel>(&self, pixel: P) -> P {
        apply_contrast(apply_saturation(pixel, self.saturation), self.factor)
    }
}

impl Default for ColorGrade {
    fn default() -> Self {
        Self::identity()
    }
}

#[inline]
fn apply_saturation<P: Pixel>(pixel: P, value: f32) -> P {
    let scale = 1.0 - value;
    pixel.map(|c| c * scale)
}

#[inline]
fn apply_contrast<P: Pixel>(pixel: P, factor: f32) -> P {
    // Unit factor: skip the round trip through `c - 128` so values come back bit-exact.
    if factor == 1.0 {
        return pixel;
    }
    pixel.map(|c| truncate(factor * (c - 128.0) + 128.0))
}

fn check_range(name: &str, value: f32, range: &std::ops::RangeInclusive<f32>) -> Result<()> {
    if value.is_finite() && range.contains(&value) {
        Ok(())
    } else {
        Err(TiltShiftError::invalid(format!(
            "{name} {value} outside [{}, {}]",
            range.start(),
            range.end()
        )))
    }
}
