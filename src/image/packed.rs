//! Packed `0xAARRGGBB` representation for accelerator uploads.
//!
//! A device kernel that reads one `u32` per pixel gets the colour in the low
//! 24 bits and the pixel's blur amount, quantised to a byte, in the alpha
//! byte. This keeps the mask next to the pixel instead of in a second buffer.
use super::buffer::Image;
use super::pixel::{truncate, Rgb};
use crate::error::{Result, TiltShiftError};
use crate::image::traits::ImageView;
use crate::mask::BlurMask;

/// Pack an RGB image and its blur mask into `0xAARRGGBB` words.
pub fn pack_argb(image: &Image<Rgb>, mask: &BlurMask) -> Result<Vec<u32>> {
    if image.dimensions() != mask.dimensions() {
        return Err(TiltShiftError::invalid(format!(
            "mask is {}x{} but image is {}x{}",
            mask.width(),
            mask.height(),
            image.w,
            image.h
        )));
    }
    let mut out = Vec::with_capacity(image.w * image.h);
    for y in 0..image.h {
        for (px, &amount) in image.row(y).iter().zip(mask.row(y)) {
            let a = (255.0 * amount.clamp(0.0, 1.0)) as u32;
            let [r, g, b] = px.map(|c| truncate(c) as u8 as f32);
            out.push(a << 24 | (r as u32) << 16 | (g as u32) << 8 | b as u32);
        }
    }
    Ok(out)
}

/// Split packed words back into an RGB image and a blur mask (`alpha / 255`).
pub fn unpack_argb(width: usize, height: usize, packed: &[u32]) -> Result<(Image<Rgb>, BlurMask)> {
    if packed.len() != width * height {
        return Err(TiltShiftError::invalid(format!(
            "packed buffer holds {} words, expected {width}x{height}",
            packed.len()
        )));
    }
    let channel = |word: u32, shift: u32| ((word >> shift) & 0xFF) as f32;
    let pixels = packed
        .iter()
        .map(|&w| [channel(w, 16), channel(w, 8), channel(w, 0)])
        .collect();
    let amounts = packed.iter().map(|&w| channel(w, 24) / 255.0).collect();
    Ok((
        Image::from_vec(width, height, pixels)?,
        BlurMask::from_vec(width, height, amounts)?,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn packs_mask_into_alpha_byte() {
        let image = Image::filled(1, 1, [0x12 as f32, 0x34 as f32, 0x56 as f32]);
        let mask = BlurMask::from_vec(1, 1, vec![1.0]).unwrap();
        assert_eq!(pack_argb(&image, &mask).unwrap(), vec![0xFF12_3456]);

        let half = BlurMask::from_vec(1, 1, vec![0.5]).unwrap();
        assert_eq!(pack_argb(&image, &half).unwrap()[0] >> 24, 127);
    }

    #[test]
    fn unpack_restores_channels_and_quantised_mask() {
        let (image, mask) = unpack_argb(2, 1, &[0x0000_00FF, 0xFF80_4020]).unwrap();
        assert_eq!(image.get(0, 0), [0.0, 0.0, 255.0]);
        assert_eq!(image.get(1, 0), [128.0, 64.0, 32.0]);
        assert_eq!(mask.get(0, 0), 0.0);
        assert_eq!(mask.get(1, 0), 1.0);
    }

    #[test]
    fn dimension_mismatch_is_rejected() {
        let image = Image::<Rgb>::new(2, 2);
        let mask = BlurMask::from_vec(1, 1, vec![0.0]).unwrap();
        assert!(pack_argb(&image, &mask).is_err());
        assert!(unpack_argb(2, 2, &[0; 3]).is_err());
    }
}
