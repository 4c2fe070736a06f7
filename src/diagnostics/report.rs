use super::timing::TimingBreakdown;
use serde::Serialize;

/// What was filtered and how it was split into work units.
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InputDescriptor {
    pub width: usize,
    pub height: usize,
    pub channels: usize,
    pub tile_width: usize,
    pub tile_height: usize,
    pub halo: usize,
    pub tile_count: usize,
    pub passes: usize,
}

/// Outcome of one completed pass.
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PassReport {
    /// 1-based index of the pass that just finished.
    pub pass_index: usize,
    pub total_passes: usize,
    pub last_pass: bool,
    pub tiles: usize,
    pub elapsed_ms: f64,
}

/// Summary returned with every filtered image.
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterReport {
    pub input: InputDescriptor,
    pub passes: Vec<PassReport>,
    pub timings: TimingBreakdown,
}
