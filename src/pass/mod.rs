//! Multi-pass driver with ping-pong buffering.
//!
//! Purpose
//! - Run `passes` sweeps of the tiled box blur over an image, grading the
//!   pixels on the last sweep only.
//!
//! Design
//! - [`TiltShift::new`] validates every parameter and builds the blur mask and
//!   tile grid once. Nothing is validated lazily once passes start.
//! - [`PassOrchestrator`] owns two buffers. Each [`PassOrchestrator::step`]
//!   sweeps all tiles from `current` into `next`, waits for every tile, then
//!   swaps the two. After the final pass `current` holds the filtered image.
//! - Passes are the only place a caller can stop: driving `step` manually and
//!   not calling it again is how a deadline is layered on top. A pass itself
//!   is never interrupted.
//!
//! State machine: `NotStarted → Pass(1) → … → Pass(n) → Done`, where
//! `Pass(k)` means pass `k` has completed and its output is `current`. The
//! first `step` after `Pass(n)` runs nothing and moves the run to `Done`.
pub mod dispatch;
pub mod params;

pub use params::{FilterParams, DEFAULT_PASSES};

use crate::diagnostics::{elapsed_ms, FilterReport, InputDescriptor, PassReport, TimingBreakdown};
use crate::error::{Result, TiltShiftError};
use crate::grade::ColorGrade;
use crate::image::{Frame, Image, Pixel};
use crate::mask::BlurMask;
use crate::tile::TileGrid;
use log::debug;
use std::time::Instant;

/// Validated filter: parameters, blur mask and tile grid for one image size.
#[derive(Clone, Debug)]
pub struct TiltShift {
    params: FilterParams,
    grade: ColorGrade,
    mask: BlurMask,
    grid: TileGrid,
    mask_ms: f64,
}

impl TiltShift {
    /// Validate `params` for a `width × height` image and build the blur mask.
    pub fn new(params: FilterParams, width: usize, height: usize) -> Result<Self> {
        let grade = params.grade()?;
        let grid = TileGrid::new(width, height, params.tiles)?;
        let start = Instant::now();
        let mask = BlurMask::generate(&params.focus, width, height)?;
        let mask_ms = elapsed_ms(start);
        debug!(
            "TiltShift::new {}x{} passes={} tiles={} mask_ms={:.3}",
            width,
            height,
            params.passes,
            grid.len(),
            mask_ms
        );
        Ok(Self {
            params,
            grade,
            mask,
            grid,
            mask_ms,
        })
    }

    pub fn params(&self) -> &FilterParams {
        &self.params
    }

    pub fn mask(&self) -> &BlurMask {
        &self.mask
    }

    pub fn grid(&self) -> &TileGrid {
        &self.grid
    }

    /// Start a stepwise run over `image`.
    pub fn passes<P: Pixel>(&self, image: &Image<P>) -> Result<PassOrchestrator<'_, P>> {
        let expected = self.grid.dimensions();
        if (image.w, image.h) != expected {
            return Err(TiltShiftError::invalid(format!(
                "filter was built for {}x{} but image is {}x{}",
                expected.0, expected.1, image.w, image.h
            )));
        }
        let mut timings = TimingBreakdown::default();
        timings.push("blur mask", self.mask_ms);
        Ok(PassOrchestrator {
            filter: self,
            state: PassState {
                current: image.clone(),
                next: Image::new(image.w, image.h),
                pass_index: 0,
                total_passes: self.params.passes,
                finished: false,
            },
            reports: Vec::with_capacity(self.params.passes),
            timings,
        })
    }

    /// Run every pass and return the filtered image.
    pub fn apply<P: Pixel>(&self, image: &Image<P>) -> Result<FilterOutput<P>> {
        self.passes(image)?.finish()
    }

    /// Run every pass over a frame of either channel count.
    pub fn apply_frame(&self, frame: &Frame) -> Result<(Frame, FilterReport)> {
        match frame {
            Frame::Gray(img) => {
                let out = self.apply(img)?;
                Ok((Frame::Gray(out.image), out.report))
            }
            Frame::Rgb(img) => {
                let out = self.apply(img)?;
                Ok((Frame::Rgb(out.image), out.report))
            }
        }
    }
}

/// Filtered image plus the report of the run that produced it.
#[derive(Clone, Debug)]
pub struct FilterOutput<P: Pixel> {
    pub image: Image<P>,
    pub report: FilterReport,
}

/// Where a run currently is.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PassPhase {
    NotStarted,
    /// Pass `k` (1-based) has completed.
    Pass(usize),
    /// All passes ran and the run was closed; `current` is the filtered image.
    Done,
}

/// Ping-pong buffers of a run. `current` is read, `next` is written, then they swap.
#[derive(Clone, Debug)]
pub struct PassState<P: Pixel> {
    pub current: Image<P>,
    pub next: Image<P>,
    /// Number of completed passes.
    pub pass_index: usize,
    pub total_passes: usize,
    pub finished: bool,
}

impl<P: Pixel> PassState<P> {
    pub fn phase(&self) -> PassPhase {
        match self.pass_index {
            _ if self.finished => PassPhase::Done,
            0 => PassPhase::NotStarted,
            k => PassPhase::Pass(k),
        }
    }
}

/// Stepwise driver for one image; see the module docs.
pub struct PassOrchestrator<'a, P: Pixel> {
    filter: &'a TiltShift,
    state: PassState<P>,
    reports: Vec<PassReport>,
    timings: TimingBreakdown,
}

impl<'a, P: Pixel> PassOrchestrator<'a, P> {
    pub fn phase(&self) -> PassPhase {
        self.state.phase()
    }

    pub fn is_done(&self) -> bool {
        self.phase() == PassPhase::Done
    }

    pub fn state(&self) -> &PassState<P> {
        &self.state
    }

    /// Run exactly one full pass; `Ok(None)` once all passes are done.
    pub fn step(&mut self) -> Result<Option<PassReport>> {
        let total = self.state.total_passes;
        if self.state.pass_index >= total {
            self.state.finished = true;
            return Ok(None);
        }
        let filter = self.filter;
        let pass_index = self.state.pass_index + 1;
        let last_pass = pass_index == total;
        let grade = last_pass.then_some(&filter.grade);
        let tiles = filter.grid.tiles();

        let start = Instant::now();
        dispatch::run_pass(
            &self.state.current,
            &mut self.state.next,
            &filter.mask,
            tiles,
            grade,
        )?;
        std::mem::swap(&mut self.state.current, &mut self.state.next);
        self.state.pass_index = pass_index;
        let elapsed = elapsed_ms(start);

        debug!(
            "PassOrchestrator::step pass {}/{} tiles={} last={} elapsed_ms={:.3}",
            pass_index,
            total,
            tiles.len(),
            last_pass,
            elapsed
        );
        self.timings.push(format!("pass {pass_index}/{total}"), elapsed);
        let report = PassReport {
            pass_index,
            total_passes: total,
            last_pass,
            tiles: tiles.len(),
            elapsed_ms: elapsed,
        };
        self.reports.push(report.clone());
        Ok(Some(report))
    }

    /// Run the remaining passes and hand back the final `current` buffer.
    pub fn finish(mut self) -> Result<FilterOutput<P>> {
        while self.step()?.is_some() {}
        let options = self.filter.grid.options();
        let input = InputDescriptor {
            width: self.state.current.w,
            height: self.state.current.h,
            channels: P::CHANNELS,
            tile_width: options.tile_width,
            tile_height: options.tile_height,
            halo: options.halo,
            tile_count: self.filter.grid.len(),
            passes: self.state.total_passes,
        };
        Ok(FilterOutput {
            image: self.state.current,
            report: FilterReport {
                input,
                passes: self.reports,
                timings: self.timings,
            },
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mask::FocusRegion;
    use crate::tile::TileOptions;

    fn band_params(center_row: i32, radius: i32) -> FilterParams {
        FilterParams::new(FocusRegion::Band { center_row, radius })
            .with_tiles(TileOptions::new(2, 2))
    }

    #[test]
    fn phases_advance_through_every_pass() {
        let filter = TiltShift::new(band_params(2, 1).with_passes(3), 4, 4).unwrap();
        let img = Image::filled(4, 4, 10.0f32);
        let mut run = filter.passes(&img).unwrap();
        assert_eq!(run.phase(), PassPhase::NotStarted);

        let first = run.step().unwrap().unwrap();
        assert_eq!(first.pass_index, 1);
        assert!(!first.last_pass);
        assert_eq!(first.tiles, 4);
        assert_eq!(run.phase(), PassPhase::Pass(1));

        run.step().unwrap();
        assert_eq!(run.phase(), PassPhase::Pass(2));
        let last = run.step().unwrap().unwrap();
        assert!(last.last_pass);
        assert_eq!(run.phase(), PassPhase::Pass(3));
        assert!(!run.is_done());

        assert!(run.step().unwrap().is_none());
        assert!(run.is_done());
        assert!(run.step().unwrap().is_none());
        assert_eq!(run.phase(), PassPhase::Done);

        let out = run.finish().unwrap();
        assert_eq!(out.report.passes.len(), 3);
        assert_eq!(out.report.timings.stages.len(), 4);
    }

    #[test]
    fn single_pass_run_reports_its_only_pass() {
        let filter = TiltShift::new(band_params(2, 1).with_passes(1), 4, 4).unwrap();
        let img = Image::filled(4, 4, 10.0f32);
        let mut run = filter.passes(&img).unwrap();
        assert_eq!(run.phase(), PassPhase::NotStarted);
        assert!(run.step().unwrap().unwrap().last_pass);
        assert_eq!(run.phase(), PassPhase::Pass(1));
        assert!(run.step().unwrap().is_none());
        assert_eq!(run.phase(), PassPhase::Done);
        assert_eq!(run.finish().unwrap().report.passes.len(), 1);
    }

    #[test]
    fn grade_only_runs_on_last_pass() {
        // Saturation 0.5 applied once halves a sharp pixel; applied per pass it would
        // reach 1/8 after three passes.
        let params = band_params(2, 2).with_passes(3).with_grade(0.5, 0.0);
        let filter = TiltShift::new(params, 4, 4).unwrap();
        let img = Image::filled(4, 4, 200.0f32);
        let out = filter.apply(&img).unwrap();
        assert_eq!(out.image.get(1, 2), 100.0);
    }

    #[test]
    fn single_pass_swaps_buffers_once() {
        let filter = TiltShift::new(band_params(0, 1).with_passes(1), 4, 4).unwrap();
        let img = Image::from_fn(4, 4, |x, y| (x * 10 + y) as f32);
        let mut run = filter.passes(&img).unwrap();
        run.step().unwrap();
        assert_eq!(run.state().next, img);
        assert_eq!(run.state().current.get(0, 0), img.get(0, 0));
    }

    #[test]
    fn rejects_zero_passes_and_bad_grade() {
        assert!(matches!(
            TiltShift::new(band_params(2, 1).with_passes(0), 4, 4),
            Err(TiltShiftError::InvalidConfiguration { .. })
        ));
        assert!(TiltShift::new(band_params(2, 1).with_grade(2.0, 0.0), 4, 4).is_err());
        assert!(TiltShift::new(band_params(2, 1).with_grade(0.0, 300.0), 4, 4).is_err());
        assert!(TiltShift::new(band_params(2, 0), 4, 4).is_err());
    }

    #[test]
    fn small_image_needs_fitted_tiles() {
        let focus = FocusRegion::Band {
            center_row: 2,
            radius: 1,
        };
        assert!(matches!(
            TiltShift::new(FilterParams::new(focus), 4, 4),
            Err(TiltShiftError::InvalidConfiguration { .. })
        ));
        let params = FilterParams::new(focus).with_tiles(TileOptions::default().fit_to(4, 4));
        let filter = TiltShift::new(params, 4, 4).unwrap();
        assert_eq!(filter.grid().len(), 1);
        let out = filter.apply(&Image::filled(4, 4, 100.0f32)).unwrap();
        assert_eq!(out.image.get(0, 2), 100.0);
    }

    #[test]
    fn rejects_image_of_other_size() {
        let filter = TiltShift::new(band_params(2, 1), 4, 4).unwrap();
        let img = Image::filled(5, 4, 0.0f32);
        assert!(filter.passes(&img).is_err());
    }

    #[test]
    fn frame_keeps_its_channel_count() {
        let filter = TiltShift::new(band_params(1, 1), 4, 4).unwrap();
        let frame = Frame::Rgb(Image::filled(4, 4, [1.0, 2.0, 3.0]));
        let (out, report) = filter.apply_frame(&frame).unwrap();
        assert_eq!(out.channels(), 3);
        assert_eq!(report.input.channels, 3);
        assert_eq!(report.input.tile_count, 4);
    }
}
