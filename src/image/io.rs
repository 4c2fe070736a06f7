//! I/O helpers for frames, blur masks and JSON.
//!
//! - `load_frame`: read a PNG/JPEG into a float grayscale or RGB frame.
//! - `save_frame`: write a frame as 8-bit, truncating channels to `[0, 255]`.
//! - `save_mask_png`: write a `BlurMask` as grayscale (white = fully blurred).
//! - `write_json_file`: pretty-print a serializable value to disk.
use super::{Frame, ImageU8};
use crate::error::{Result, TiltShiftError};
use crate::mask::BlurMask;
use image::{DynamicImage, GrayImage, ImageBuffer, Luma, RgbImage};
use serde::Serialize;
use std::fs;
use std::path::Path;

/// Load an image from disk as grayscale (`grayscale == true`) or RGB.
pub fn load_frame(path: &Path, grayscale: bool) -> Result<Frame> {
    let decoded = image::open(path).map_err(|source| TiltShiftError::Codec {
        path: path.display().to_string(),
        source,
    })?;
    let (w, h) = (decoded.width() as usize, decoded.height() as usize);
    if grayscale {
        let raw = decoded.into_luma8().into_raw();
        let view = ImageU8::packed(w, h, 1, &raw);
        Ok(Frame::Gray(view.to_gray()?))
    } else {
        let raw = decoded.into_rgb8().into_raw();
        let view = ImageU8::packed(w, h, 3, &raw);
        Ok(Frame::Rgb(view.to_rgb()?))
    }
}

/// Save a frame to disk; the format follows the file extension.
pub fn save_frame(frame: &Frame, path: &Path) -> Result<()> {
    ensure_parent_dir(path)?;
    let (w, h) = (frame.width() as u32, frame.height() as u32);
    let dynamic = match frame {
        Frame::Gray(img) => {
            let buffer: GrayImage = ImageBuffer::from_raw(w, h, img.to_u8())
                .ok_or_else(|| TiltShiftError::invalid("gray buffer does not match dimensions"))?;
            DynamicImage::ImageLuma8(buffer)
        }
        Frame::Rgb(img) => {
            let buffer: RgbImage = ImageBuffer::from_raw(w, h, img.to_u8())
                .ok_or_else(|| TiltShiftError::invalid("rgb buffer does not match dimensions"))?;
            DynamicImage::ImageRgb8(buffer)
        }
    };
    dynamic.save(path).map_err(|source| TiltShiftError::Codec {
        path: path.display().to_string(),
        source,
    })
}

/// Save a blur mask as an 8-bit grayscale image, mapping `[0, 1]` to `[0, 255]`.
pub fn save_mask_png(mask: &BlurMask, path: &Path) -> Result<()> {
    ensure_parent_dir(path)?;
    let mut out = GrayImage::new(mask.width() as u32, mask.height() as u32);
    for y in 0..mask.height() {
        for (x, &amount) in mask.row(y).iter().enumerate() {
            let v = (amount * 255.0).clamp(0.0, 255.0);
            out.put_pixel(x as u32, y as u32, Luma([v as u8]));
        }
    }
    out.save(path).map_err(|source| TiltShiftError::Codec {
        path: path.display().to_string(),
        source,
    })
}

/// Serialize a value as pretty JSON to `path`, creating parent directories.
pub fn write_json_file<T: Serialize>(path: &Path, value: &T) -> Result<()> {
    ensure_parent_dir(path)?;
    let json = serde_json::to_string_pretty(value).map_err(|source| TiltShiftError::Json {
        path: path.display().to_string(),
        source,
    })?;
    fs::write(path, json).map_err(|source| TiltShiftError::Io {
        path: path.display().to_string(),
        source,
    })
}

fn ensure_parent_dir(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent).map_err(|source| TiltShiftError::Io {
                path: parent.display().to_string(),
                source,
            })?;
        }
    }
    Ok(())
}
