//! One full sweep of every tile over the pass input.
//!
//! Tiles read only the immutable `current` image and each produces the
//! pixels for its own disjoint interior, so they run without locks. With the
//! `parallel` feature the sweep is spread over rayon's pool (sized to the
//! available hardware threads); without it tiles run one after another. The
//! function returns only once every tile has been written, which is the
//! barrier between passes.
use crate::error::Result;
use crate::grade::ColorGrade;
use crate::image::{Image, Pixel};
use crate::mask::BlurMask;
use crate::tile::{convolve_tile, Tile, TileBlock};

pub(crate) fn run_pass<P: Pixel>(
    current: &Image<P>,
    next: &mut Image<P>,
    mask: &BlurMask,
    tiles: &[Tile],
    grade: Option<&ColorGrade>,
) -> Result<()> {
    let blocks = convolve_tiles(current, mask, tiles, grade)?;
    for block in &blocks {
        block.write_into(next)?;
    }
    Ok(())
}

fn convolve_tiles<P: Pixel>(
    current: &Image<P>,
    mask: &BlurMask,
    tiles: &[Tile],
    grade: Option<&ColorGrade>,
) -> Result<Vec<TileBlock<P>>> {
    #[cfg(feature = "parallel")]
    {
        use rayon::prelude::*;
        tiles
            .par_iter()
            .map(|tile| convolve_tile(current, mask, tile, grade))
            .collect()
    }
    #[cfg(not(feature = "parallel"))]
    {
        tiles
            .iter()
            .map(|tile| convolve_tile(current, mask, tile, grade))
            .collect()
    }
}
