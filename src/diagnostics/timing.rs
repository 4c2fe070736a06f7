use serde::{Deserialize, Serialize};
use std::time::Instant;

/// Timing entry describing a single stage of a filter run (mask build or one pass).
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StageTiming {
    pub label: String,
    pub elapsed_ms: f64,
}

impl StageTiming {
    pub fn new(label: impl Into<String>, elapsed_ms: f64) -> Self {
        Self {
            label: label.into(),
            elapsed_ms,
        }
    }
}

/// Aggregated timing trace for a filter run.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimingBreakdown {
    pub total_ms: f64,
    pub stages: Vec<StageTiming>,
}

impl TimingBreakdown {
    /// Record a stage and add it to the running total.
    pub fn push(&mut self, label: impl Into<String>, elapsed_ms: f64) {
        self.total_ms += elapsed_ms;
        self.stages.push(StageTiming::new(label, elapsed_ms));
    }

    /// Sum of every stage whose label starts with `prefix` (e.g. `"pass"`).
    pub fn sum_matching(&self, prefix: &str) -> f64 {
        self.stages
            .iter()
            .filter(|s| s.label.starts_with(prefix))
            .map(|s| s.elapsed_ms)
            .sum()
    }
}

/// Milliseconds elapsed since `start`.
#[inline]
pub fn elapsed_ms(start: Instant) -> f64 {
    start.elapsed().as_secs_f64() * 1000.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn push_accumulates_total() {
        let mut timings = TimingBreakdown::default();
        timings.push("mask", 1.5);
        timings.push("pass 1/1", 2.0);
        assert_eq!(timings.total_ms, 3.5);
        assert_eq!(timings.stages[1].label, "pass 1/1");
        assert_eq!(timings.sum_matching("pass"), 2.0);

        let json = serde_json::to_value(&timings).unwrap();
        assert_eq!(json["totalMs"], 3.5);
        assert_eq!(json["stages"][0]["elapsedMs"], 1.5);
    }
}
