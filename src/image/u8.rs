use super::buffer::Image;
use super::pixel::{Pixel, Rgb};
use crate::error::{Result, TiltShiftError};

/// Borrowed interleaved 8-bit image as handed over by an external loader.
#[derive(Clone, Debug)]
pub struct ImageU8<'a> {
    pub w: usize,
    pub h: usize,
    /// 1 (gray) or 3 (RGB)
    pub channels: usize,
    pub stride: usize, // bytes between rows
    pub data: &'a [u8],
}

impl<'a> ImageU8<'a> {
    /// Tightly packed view (`stride == w * channels`).
    pub fn packed(w: usize, h: usize, channels: usize, data: &'a [u8]) -> Self {
        Self {
            w,
            h,
            channels,
            stride: w * channels,
            data,
        }
    }

    #[inline]
    pub fn get(&self, x: usize, y: usize, c: usize) -> u8 {
        self.data[y * self.stride + x * self.channels + c]
    }

    /// Promote to a float grayscale image (values stay in `[0, 255]`).
    pub fn to_gray(&self) -> Result<Image<f32>> {
        self.convert::<f32>()
    }

    /// Promote to a float RGB image (values stay in `[0, 255]`).
    pub fn to_rgb(&self) -> Result<Image<Rgb>> {
        self.convert::<Rgb>()
    }

    fn convert<P: Pixel>(&self) -> Result<Image<P>> {
        self.validate(P::CHANNELS)?;
        let mut scratch = [0.0f32; 3];
        Ok(Image::from_fn(self.w, self.h, |x, y| {
            for (c, slot) in scratch.iter_mut().take(P::CHANNELS).enumerate() {
                *slot = self.get(x, y, c) as f32;
            }
            P::from_channels(&scratch[..P::CHANNELS])
        }))
    }

    fn validate(&self, expected_channels: usize) -> Result<()> {
        if self.w == 0 || self.h == 0 {
            return Err(TiltShiftError::invalid(format!(
                "image dimensions must be positive, got {}x{}",
                self.w, self.h
            )));
        }
        if self.channels != expected_channels {
            return Err(TiltShiftError::invalid(format!(
                "expected {expected_channels} channel(s), view has {}",
                self.channels
            )));
        }
        if self.stride < self.w * self.channels {
            return Err(TiltShiftError::invalid(format!(
                "stride {} shorter than a row of {} bytes",
                self.stride,
                self.w * self.channels
            )));
        }
        let needed = (self.h - 1) * self.stride + self.w * self.channels;
        if self.data.len() < needed {
            return Err(TiltShiftError::invalid(format!(
                "buffer holds {} bytes, need {needed}",
                self.data.len()
            )));
        }
        Ok(())
    }
}
