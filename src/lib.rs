#![doc = include_str!("../README.md")]

// Core filter stages.
pub mod error;
pub mod grade;
pub mod image;
pub mod mask;
pub mod pass;
pub mod tile;

// Surrounding helpers (reports, tool configuration).
pub mod config;
pub mod diagnostics;

// --- High-level re-exports -------------------------------------------------

pub use crate::error::{Result, TiltShiftError};
pub use crate::grade::{contrast, saturation, ColorGrade};
pub use crate::image::{Frame, Image, ImageU8, Pixel, Rgb};
pub use crate::mask::{BlurMask, FocusRegion};
pub use crate::pass::{FilterOutput, FilterParams, PassOrchestrator, PassPhase, TiltShift};
pub use crate::tile::{Tile, TileGrid, TileOptions};

// Reports returned with every filtered image.
pub use crate::diagnostics::{FilterReport, PassReport};

// --- Prelude ---------------------------------------------------------------

/// Small prelude for quick experiments.
///
/// ```no_run
/// use tilt_shift::prelude::*;
///
/// # fn main() -> tilt_shift::Result<()> {
/// let (w, h) = (640usize, 480usize);
/// let gray = vec![128u8; w * h];
/// let image = ImageU8::packed(w, h, 1, &gray).to_gray()?;
///
/// let params = FilterParams::new(FocusRegion::Band { center_row: 240, radius: 60 });
/// let filter = TiltShift::new(params, w, h)?;
/// let out = filter.apply(&image)?;
/// println!("passes={} total_ms={:.3}", out.report.passes.len(), out.report.timings.total_ms);
/// # Ok(())
/// # }
/// ```
pub mod prelude {
    pub use crate::image::{Image, ImageU8, Rgb};
    pub use crate::{FilterParams, FocusRegion, TileOptions, TiltShift};
}
