//! Synthetic utilization summary generator.

use super::{SyntheticRng, TelemetryError};
use serde::{Deserialize, Serialize};

const SAMPLES_PER_HOUR: usize = 4;
const SAMPLE_INTERVAL_MINUTES: i64 = 15;

/// Hard ceiling (30 days) so absurd lookbacks cannot balloon the loop.
const MAX_LOOKBACK_HOURS: i64 = 720;

/// A single utilization sample. `offset_minutes` counts back from the end
/// of the lookback window (0 = most recent).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UtilizationSample {
    pub offset_minutes: i64,
    pub cpu_pct: f64,
    pub mem_pct: f64,
    pub disk_pct: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UtilizationSummary {
    pub hours: i64,
    pub sample_interval_minutes: i64,
    pub samples_available: usize,
    pub cpu_avg_pct: f64,
    pub mem_avg_pct: f64,
    pub disk_avg_pct: f64,
    /// Most recent samples, oldest first.
    pub recent: Vec<UtilizationSample>,
    /// True when the requested recent-sample count exceeded what the
    /// window holds and was clamped down.
    pub clamped: bool,
}

/// Aggregate fabricated CPU/memory/disk figures over the last `hours`,
/// carrying the `include_recent` most recent samples. A request for more
/// recent samples than the window holds is clamped and flagged, not
/// rejected; a non-positive window is rejected. Lookbacks beyond
/// `MAX_LOOKBACK_HOURS` are capped so the sample count stays bounded.
pub fn summarize_utilization(
    hours: i64,
    include_recent: usize,
) -> Result<UtilizationSummary, TelemetryError> {
    if hours <= 0 {
        return Err(TelemetryError::InvalidLookback(hours));
    }

    let hours = hours.min(MAX_LOOKBACK_HOURS);
    let mut rng = SyntheticRng::seeded(&["utilization", &hours.to_string()]);
    let samples_available = (hours as usize) * SAMPLES_PER_HOUR;

    let clamped = include_recent > samples_available;
    let recent_count = include_recent.min(samples_available);

    let mut cpu_sum = 0.0;
    let mut mem_sum = 0.0;
    let mut disk_sum = 0.0;
    let mut recent = Vec::with_capacity(recent_count);

    for i in 0..samples_available {
        let sample = UtilizationSample {
            offset_minutes: (samples_available - 1 - i) as i64 * SAMPLE_INTERVAL_MINUTES,
            cpu_pct: rng.pick(350, 920) as f64 / 10.0,
            mem_pct: rng.pick(400, 870) as f64 / 10.0,
            disk_pct: rng.pick(550, 820) as f64 / 10.0,
        };

        cpu_sum += sample.cpu_pct;
        mem_sum += sample.mem_pct;
        disk_sum += sample.disk_pct;

        if i >= samples_available - recent_count {
            recent.push(sample);
        }
    }

    let n = samples_available as f64;
    Ok(UtilizationSummary {
        hours,
        sample_interval_minutes: SAMPLE_INTERVAL_MINUTES,
        samples_available,
        cpu_avg_pct: round1(cpu_sum / n),
        mem_avg_pct: round1(mem_sum / n),
        disk_avg_pct: round1(disk_sum / n),
        recent,
        clamped,
    })
}

fn round1(v: f64) -> f64 {
    (v * 10.0).round() / 10.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_summary_basic_shape() {
        let summary = summarize_utilization(12, 3).unwrap();

        assert_eq!(summary.hours, 12);
        assert_eq!(summary.samples_available, 48);
        assert_eq!(summary.recent.len(), 3);
        assert!(!summary.clamped);
        assert_eq!(summary.recent.last().unwrap().offset_minutes, 0);
    }

    #[test]
    fn test_recent_count_never_exceeds_available() {
        for (hours, include_recent) in [(1, 0), (1, 4), (2, 7), (3, 100)] {
            let summary = summarize_utilization(hours, include_recent).unwrap();
            assert!(summary.recent.len() <= include_recent.max(summary.samples_available));
            assert!(summary.recent.len() <= summary.samples_available);
        }
    }

    #[test]
    fn test_clamp_is_reported() {
        // One hour holds four samples; asking for ten clamps to four.
        let summary = summarize_utilization(1, 10).unwrap();

        assert_eq!(summary.recent.len(), 4);
        assert!(summary.clamped);
    }

    #[test]
    fn test_zero_recent_is_valid() {
        let summary = summarize_utilization(4, 0).unwrap();
        assert!(summary.recent.is_empty());
        assert!(!summary.clamped);
    }

    #[test]
    fn test_huge_lookback_is_capped() {
        let summary = summarize_utilization(1_000_000_000_000, 1).unwrap();

        assert_eq!(summary.hours, MAX_LOOKBACK_HOURS);
        assert_eq!(
            summary.samples_available,
            MAX_LOOKBACK_HOURS as usize * SAMPLES_PER_HOUR
        );
        assert_eq!(summary.recent.len(), 1);
        assert_eq!(summary.recent[0].offset_minutes, 0);
    }

    #[test]
    fn test_non_positive_hours_rejected() {
        assert_eq!(
            summarize_utilization(0, 3).unwrap_err(),
            TelemetryError::InvalidLookback(0)
        );
        assert!(summarize_utilization(-2, 3).is_err());
    }

    #[test]
    fn test_averages_in_percent_range() {
        let summary = summarize_utilization(6, 2).unwrap();
        for avg in [
            summary.cpu_avg_pct,
            summary.mem_avg_pct,
            summary.disk_avg_pct,
        ] {
            assert!((0.0..=100.0).contains(&avg));
        }
    }
}
