//! Diagnostics data model returned alongside every filtered image.
//!
//! `FilterReport` bundles a description of the input and tiling, one
//! `PassReport` per completed pass and a `TimingBreakdown` covering the mask
//! build and each pass. All types serialize to camelCase JSON.

pub mod report;
pub mod timing;

pub use report::{FilterReport, InputDescriptor, PassReport};
pub use timing::{elapsed_ms, StageTiming, TimingBreakdown};
