//! Mask-weighted 3×3 box blur of one tile.
//!
//! For a pixel with blur amount `a`:
//!
//! ```text
//! self_weight  = (9 - 8a) / 9
//! other_weight = a / 9
//! out = self_weight · centre + other_weight · Σ(8 neighbours)
//! ```
//!
//! `self_weight + 8 · other_weight == 1`, so the output is a convex
//! combination of the neighbourhood: `a = 0` returns the centre unchanged,
//! `a = 1` the plain 3×3 mean. Colour pixels are blurred per channel.
use super::buffer::LocalBuffer;
use super::Tile;
use crate::error::{Result, TiltShiftError};
use crate::grade::ColorGrade;
use crate::image::{Image, Pixel};
use crate::mask::BlurMask;

/// Neighbour offsets in a fixed order so every tiling sums identically.
const NEIGHBOURS: [(isize, isize); 8] = [
    (-1, -1),
    (0, -1),
    (1, -1),
    (-1, 0),
    (1, 0),
    (-1, 1),
    (0, 1),
    (1, 1),
];

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BoxBlurWeights {
    pub self_weight: f32,
    pub other_weight: f32,
}

impl BoxBlurWeights {
    #[inline]
    pub fn for_amount(blur_amount: f32) -> Self {
        Self {
            self_weight: (9.0 - 8.0 * blur_amount) / 9.0,
            other_weight: blur_amount / 9.0,
        }
    }
}

/// Blend the centre pixel with the sum of its eight neighbours.
#[inline]
pub fn blur_pixel<P: Pixel>(blur_amount: f32, center: P, neighbour_sum: P) -> P {
    let w = BoxBlurWeights::for_amount(blur_amount);
    center.zip_map(neighbour_sum, |c, s| w.self_weight * c + w.other_weight * s)
}

/// Output pixels for one tile interior, row-major.
#[derive(Clone, Debug)]
pub struct TileBlock<P: Pixel> {
    pub tile: Tile,
    pub pixels: Vec<P>,
}

impl<P: Pixel> TileBlock<P> {
    /// Copy the block into the tile's interior of `next`; the halo is never written.
    pub fn write_into(&self, next: &mut Image<P>) -> Result<()> {
        if !self.tile.fits(next.w, next.h) {
            return Err(TiltShiftError::IndexOutOfRange {
                x: (self.tile.origin_x + self.tile.width) as isize - 1,
                y: (self.tile.origin_y + self.tile.height) as isize - 1,
                width: next.w,
                height: next.h,
            });
        }
        for (ly, src) in self.pixels.chunks_exact(self.tile.width).enumerate() {
            let start = next.idx(self.tile.origin_x, self.tile.origin_y + ly);
            next.data[start..start + self.tile.width].copy_from_slice(src);
        }
        Ok(())
    }
}

/// Blur the interior of `tile`, reading only from `current`.
///
/// With `grade` set (last pass) every blurred pixel is passed through the
/// colour grade before it is stored.
pub fn convolve_tile<P: Pixel>(
    current: &Image<P>,
    mask: &BlurMask,
    tile: &Tile,
    grade: Option<&ColorGrade>,
) -> Result<TileBlock<P>> {
    if mask.dimensions() != (current.w, current.h) {
        return Err(TiltShiftError::IndexOutOfRange {
            x: mask.width() as isize - 1,
            y: mask.height() as isize - 1,
            width: current.w,
            height: current.h,
        });
    }
    let buffer = LocalBuffer::load(current, tile)?;
    let halo = buffer.halo() as isize;

    let mut pixels = Vec::with_capacity(tile.width * tile.height);
    for ly in 0..tile.height {
        let by = ly as isize + halo;
        let mask_row = mask.row(tile.origin_y + ly);
        for lx in 0..tile.width {
            let bx = lx as isize + halo;
            let center = buffer.get(bx as usize, by as usize);
            let neighbour_sum = NEIGHBOURS.iter().fold(P::default(), |acc, &(dx, dy)| {
                acc.add(buffer.get((bx + dx) as usize, (by + dy) as usize))
            });
            let blurred = blur_pixel(mask_row[tile.origin_x + lx], center, neighbour_sum);
            pixels.push(match grade {
                Some(grade) => grade.apply(blurred),
                None => blurred,
            });
        }
    }

    Ok(TileBlock {
        tile: *tile,
        pixels,
    })
}
