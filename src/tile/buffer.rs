//! Halo-padded per-tile copy of the pass input.
use super::Tile;
use crate::error::{Result, TiltShiftError};
use crate::image::{Image, Pixel};

/// Clamp a possibly negative coordinate into `[0, extent - 1]`.
///
/// `extent` must be positive; callers validate image dimensions up front.
#[inline]
pub fn clamp_coord(coord: isize, extent: usize) -> usize {
    coord.clamp(0, extent as isize - 1) as usize
}

/// `(tile.width + 2·halo) × (tile.height + 2·halo)` snapshot owned by one tile.
#[derive(Clone, Debug)]
pub struct LocalBuffer<P: Pixel> {
    width: usize,
    height: usize,
    halo: usize,
    data: Vec<P>,
}

impl<P: Pixel> LocalBuffer<P> {
    /// Copy the tile and its halo out of `image`, replicating edge pixels for
    /// halo cells that fall outside the image.
    pub fn load(image: &Image<P>, tile: &Tile) -> Result<Self> {
        if image.w == 0 || image.h == 0 || !tile.fits(image.w, image.h) {
            return Err(TiltShiftError::IndexOutOfRange {
                x: (tile.origin_x + tile.width) as isize - 1,
                y: (tile.origin_y + tile.height) as isize - 1,
                width: image.w,
                height: image.h,
            });
        }

        let (bw, bh) = (tile.buffer_width(), tile.buffer_height());
        let corner_x = tile.origin_x as isize - tile.halo as isize;
        let corner_y = tile.origin_y as isize - tile.halo as isize;
        let mut data = Vec::with_capacity(bw * bh);
        for row in 0..bh {
            let sy = clamp_coord(corner_y + row as isize, image.h);
            let src = &image.data[sy * image.stride..sy * image.stride + image.w];
            for col in 0..bw {
                let sx = clamp_coord(corner_x + col as isize, image.w);
                data.push(src[sx]);
            }
        }

        Ok(Self {
            width: bw,
            height: bh,
            halo: tile.halo,
            data,
        })
    }

    /// Pixel at buffer-local `(col, row)`; `(halo, halo)` is the tile origin.
    #[inline]
    pub fn get(&self, col: usize, row: usize) -> P {
        self.data[row * self.width + col]
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    #[inline]
    pub fn halo(&self) -> usize {
        self.halo
    }
}
