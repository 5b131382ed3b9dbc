//! Primorial scaling check: does the flip predictor keep its 100% accuracy
//! when the mod-6 reference table is swapped for measured mod-30 and
//! mod-210 tables?
//!
//! The scan itself is the same linear pass every accuracy-checked driver
//! uses: predict each successor from a 10-candidate lookahead pool and
//! compare against the true next prime, stopping at the first mismatch.

use gap_core::{FlipEngine, Mismatch};

/// Lookahead pool width.
pub const POOL_WIDTH: usize = 10;

/// A completed (mismatch-free) accuracy scan.
#[derive(Debug, Clone)]
pub struct ScanReport {
    pub primes_checked: usize,
    pub wall_seconds: f64,
}

/// Check every prediction from index 0 up to `limit` (clamped so the
/// lookahead pool stays inside the slice). Returns the first mismatch as
/// an error.
pub fn run_accuracy_scan(
    primes: &[u64],
    engine: &FlipEngine,
    limit: usize,
) -> Result<ScanReport, Mismatch> {
    let start = std::time::Instant::now();
    let max_index = limit.min(primes.len().saturating_sub(POOL_WIDTH + 2));

    for i in 0..max_index {
        let p_n = primes[i];
        let pool = &primes[i + 1..i + 1 + POOL_WIDTH];
        let prediction = engine
            .predict(p_n, pool)
            .expect("lookahead pool is non-empty");

        if prediction.candidate != primes[i + 1] {
            return Err(Mismatch {
                p_n,
                predicted: prediction.candidate,
                actual: primes[i + 1],
            });
        }
    }

    Ok(ScanReport {
        primes_checked: max_index,
        wall_seconds: start.elapsed().as_secs_f64(),
    })
}
