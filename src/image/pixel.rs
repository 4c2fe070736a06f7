//! Pixel types understood by the filter.
//!
//! Grayscale pixels are a bare `f32`; colour pixels are an `[f32; 3]` RGB
//! triple. Values live in the 8-bit range `[0, 255]` but stay floating point
//! until output so repeated passes do not accumulate rounding error.

/// RGB triple in `[0, 255]`, stored as floats.
pub type Rgb = [f32; 3];

/// Per-channel arithmetic shared by grayscale and colour pixels.
///
/// Every kernel in the crate is written once against this trait, so a scalar
/// and an RGB image go through the exact same formulas.
pub trait Pixel: Copy + Default + PartialEq + std::fmt::Debug + Send + Sync + 'static {
    /// Number of 8-bit channels when the pixel is serialised.
    const CHANNELS: usize;

    /// Apply `f` to every channel.
    fn map(self, f: impl Fn(f32) -> f32) -> Self;

    /// Combine two pixels channel by channel.
    fn zip_map(self, other: Self, f: impl Fn(f32, f32) -> f32) -> Self;

    /// Channel values in order (`[v]` or `[r, g, b]`).
    fn channels(&self) -> &[f32];

    /// Build a pixel from `CHANNELS` consecutive values.
    fn from_channels(values: &[f32]) -> Self;

    #[inline]
    fn add(self, other: Self) -> Self {
        self.zip_map(other, |a, b| a + b)
    }
}

impl Pixel for f32 {
    const CHANNELS: usize = 1;

    #[inline]
    fn map(self, f: impl Fn(f32) -> f32) -> Self {
        f(self)
    }

    #[inline]
    fn zip_map(self, other: Self, f: impl Fn(f32, f32) -> f32) -> Self {
        f(self, other)
    }

    #[inline]
    fn channels(&self) -> &[f32] {
        std::slice::from_ref(self)
    }

    #[inline]
    fn from_channels(values: &[f32]) -> Self {
        values[0]
    }
}

impl Pixel for Rgb {
    const CHANNELS: usize = 3;

    #[inline]
    fn map(self, f: impl Fn(f32) -> f32) -> Self {
        [f(self[0]), f(self[1]), f(self[2])]
    }

    #[inline]
    fn zip_map(self, other: Self, f: impl Fn(f32, f32) -> f32) -> Self {
        [
            f(self[0], other[0]),
            f(self[1], other[1]),
            f(self[2], other[2]),
        ]
    }

    #[inline]
    fn channels(&self) -> &[f32] {
        self
    }

    #[inline]
    fn from_channels(values: &[f32]) -> Self {
        [values[0], values[1], values[2]]
    }
}

/// Clamp a channel value into the displayable `[0, 255]` range.
#[inline]
pub fn truncate(value: f32) -> f32 {
    value.clamp(0.0, 255.0)
}
