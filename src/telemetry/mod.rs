//! Synthetic telemetry generators.
//!
//! These stand in for real observability backends (log search, metrics
//! store, ticketing). Every generator is a pure function of its inputs:
//! no network, no disk, no clock. Output is pseudo-randomized but
//! deterministic per input so demo transcripts and tests are stable.

mod incidents;
mod logs;
mod utilization;

pub use incidents::{fetch_incident_digest, IncidentDigest};
pub use logs::fetch_server_logs;
pub use utilization::{summarize_utilization, UtilizationSample, UtilizationSummary};

use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum TelemetryError {
    #[error("window_minutes must be positive, got {0}")]
    InvalidWindow(i64),

    #[error("hours must be positive, got {0}")]
    InvalidLookback(i64),
}

/// Deterministic generator seeded from the request parameters.
///
/// FNV-1a over the seed material, then xorshift64*. Hand-rolled rather
/// than pulled from a crate because the sequence must stay identical for
/// the same inputs across runs and library upgrades.
pub(crate) struct SyntheticRng(u64);

impl SyntheticRng {
    pub(crate) fn seeded(parts: &[&str]) -> Self {
        let mut hash: u64 = 0xcbf2_9ce4_8422_2325;
        for part in parts {
            for byte in part.as_bytes() {
                hash ^= u64::from(*byte);
                hash = hash.wrapping_mul(0x0000_0100_0000_01b3);
            }
            // Separator so ["ab","c"] and ["a","bc"] seed differently.
            hash ^= 0x1f;
            hash = hash.wrapping_mul(0x0000_0100_0000_01b3);
        }
        Self(if hash == 0 { 0xcbf2_9ce4_8422_2325 } else { hash })
    }

    pub(crate) fn next_u64(&mut self) -> u64 {
        let mut x = self.0;
        x ^= x >> 12;
        x ^= x << 25;
        x ^= x >> 27;
        self.0 = x;
        x.wrapping_mul(0x2545_f491_4f6c_dd1d)
    }

    /// Uniform-ish value in [lo, hi).
    pub(crate) fn pick(&mut self, lo: u64, hi: u64) -> u64 {
        debug_assert!(lo < hi);
        lo + self.next_u64() % (hi - lo)
    }
}
