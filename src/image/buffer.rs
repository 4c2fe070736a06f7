//! Owned row-major image (stride == width) generic over the pixel type.
//!
//! Every pass of the filter reads one `Image` and writes a second one; the
//! two are swapped between passes and never aliased within a pass.
use super::pixel::{truncate, Pixel};
use super::traits::{ImageView, ImageViewMut};
use crate::error::{Result, TiltShiftError};

#[derive(Clone, Debug, PartialEq)]
pub struct Image<P: Pixel> {
    /// Image width in pixels
    pub w: usize,
    /// Image height in pixels
    pub h: usize,
    /// Number of pixels between consecutive rows (equals `w`)
    pub stride: usize,
    /// Backing storage in row-major order
    pub data: Vec<P>,
}

impl<P: Pixel> Image<P> {
    /// Construct a zero-initialised buffer of size `w × h`.
    pub fn new(w: usize, h: usize) -> Self {
        Self::filled(w, h, P::default())
    }

    /// Construct a buffer where every pixel equals `value`.
    pub fn filled(w: usize, h: usize, value: P) -> Self {
        Self {
            w,
            h,
            stride: w,
            data: vec![value; w * h],
        }
    }

    /// Construct a buffer by evaluating `f(x, y)` for every pixel.
    pub fn from_fn(w: usize, h: usize, mut f: impl FnMut(usize, usize) -> P) -> Self {
        let mut data = Vec::with_capacity(w * h);
        for y in 0..h {
            for x in 0..w {
                data.push(f(x, y));
            }
        }
        Self {
            w,
            h,
            stride: w,
            data,
        }
    }

    /// Wrap an existing row-major pixel vector.
    pub fn from_vec(w: usize, h: usize, data: Vec<P>) -> Result<Self> {
        if data.len() != w * h {
            return Err(TiltShiftError::invalid(format!(
                "pixel buffer holds {} pixels, expected {w}x{h}",
                data.len()
            )));
        }
        Ok(Self {
            w,
            h,
            stride: w,
            data,
        })
    }

    #[inline]
    /// Convert (x, y) to a linear index into `data`.
    pub fn idx(&self, x: usize, y: usize) -> usize {
        y * self.stride + x
    }
    #[inline]
    /// Get the pixel value at (x, y).
    pub fn get(&self, x: usize, y: usize) -> P {
        self.data[self.idx(x, y)]
    }
    #[inline]
    /// Set the pixel value at (x, y).
    pub fn set(&mut self, x: usize, y: usize, v: P) {
        let i = self.idx(x, y);
        self.data[i] = v;
    }

    /// Interleaved 8-bit output; each channel is truncated to `[0, 255]`.
    pub fn to_u8(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(self.w * self.h * P::CHANNELS);
        for row in self.rows() {
            for px in row {
                out.extend(px.channels().iter().map(|&c| truncate(c) as u8));
            }
        }
        out
    }
}

impl<P: Pixel> ImageView for Image<P> {
    type Pixel = P;

    #[inline]
    fn width(&self) -> usize {
        self.w
    }
    #[inline]
    fn height(&self) -> usize {
        self.h
    }
    #[inline]
    fn row(&self, y: usize) -> &[P] {
        let start = y * self.stride;
        &self.data[start..start + self.w]
    }
}

impl<P: Pixel> ImageViewMut for Image<P> {
    #[inline]
    fn row_mut(&mut self, y: usize) -> &mut [P] {
        let start = y * self.stride;
        let end = start + self.w;
        &mut self.data[start..end]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::image::Rgb;

    #[test]
    fn to_u8_truncates_out_of_range_channels() {
        let img: Image<Rgb> = Image::from_fn(2, 1, |x, _| {
            if x == 0 {
                [-3.0, 12.9, 300.0]
            } else {
                [255.0, 0.0, 128.4]
            }
        });
        assert_eq!(img.to_u8(), vec![0, 12, 255, 255, 0, 128]);
    }

    #[test]
    fn rows_cover_the_image_in_order() {
        let mut img = Image::<f32>::new(3, 2);
        img.row_mut(1).fill(5.0);
        assert_eq!(img.dimensions(), (3, 2));
        let rows: Vec<&[f32]> = img.rows().collect();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0], &[0.0; 3]);
        assert_eq!(rows[1], &[5.0; 3]);
        assert_eq!(img.rows().size_hint(), (2, Some(2)));
    }

    #[test]
    fn from_vec_rejects_wrong_length() {
        assert!(Image::<f32>::from_vec(3, 3, vec![0.0; 8]).is_err());
        let img = Image::<f32>::from_vec(2, 2, vec![1.0, 2.0, 3.0, 4.0]).unwrap();
        assert_eq!(img.get(1, 1), 4.0);
        assert_eq!(img.row(1), &[3.0, 4.0]);
    }
}
