use super::buffer::Image;
use super::pixel::Rgb;

/// Image whose channel count is only known at runtime (e.g. after decoding a file).
#[derive(Clone, Debug, PartialEq)]
pub enum Frame {
    Gray(Image<f32>),
    Rgb(Image<Rgb>),
}

impl Frame {
    pub fn width(&self) -> usize {
        match self {
            Frame::Gray(img) => img.w,
            Frame::Rgb(img) => img.w,
        }
    }

    pub fn height(&self) -> usize {
        match self {
            Frame::Gray(img) => img.h,
            Frame::Rgb(img) => img.h,
        }
    }

    pub fn channels(&self) -> usize {
        match self {
            Frame::Gray(_) => 1,
            Frame::Rgb(_) => 3,
        }
    }
}
