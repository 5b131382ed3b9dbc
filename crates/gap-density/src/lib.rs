//! Gap-density census: how often is the next prime gap 2 (twin) or 4
//! (cousin)?
//!
//! The census never reads the true gap directly. Every gap is *predicted*
//! by the flip engine from a 10-candidate lookahead pool, and the predicted
//! successor is then checked against the actual next prime. The predictor
//! claims 100% accuracy, so a single mismatch aborts the run as a property
//! violation rather than being tallied as noise.
//!
//! The per-index scan is independent, so each checkpoint block is scanned
//! in parallel; checkpoints themselves stay in order.

use gap_core::{FlipEngine, Mismatch};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

/// First index scanned (skips the 2, 3 singularity with margin, matching
/// the measurement runs the reference table came from).
pub const START_INDEX: usize = 10;

/// Lookahead pool width.
pub const POOL_WIDTH: usize = 10;

/// Gaps per checkpoint block.
pub const CHECKPOINT_EVERY: usize = 1_000_000;

/// Densities observed up to a checkpoint, per 1000 predicted gaps.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DensityCheckpoint {
    pub gaps_analyzed: usize,
    pub twin_density_per_1000: f64,
    pub cousin_density_per_1000: f64,
}

/// Final census report.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DensityReport {
    pub gaps_analyzed: usize,
    pub twin_count: usize,
    pub cousin_count: usize,
    pub twin_density_per_1000: f64,
    pub cousin_density_per_1000: f64,
    pub checkpoints: Vec<DensityCheckpoint>,
    pub wall_seconds: f64,
}

fn density_per_1000(count: usize, total: usize) -> f64 {
    if total == 0 {
        0.0
    } else {
        count as f64 / total as f64 * 1000.0
    }
}

/// Run the census over `count` consecutive primes starting at
/// [`START_INDEX`]. The slice must hold `START_INDEX + count + POOL_WIDTH + 1`
/// primes; the loader enforces that for file input.
pub fn run_census(
    primes: &[u64],
    engine: &FlipEngine,
    count: usize,
) -> Result<DensityReport, Mismatch> {
    let end = START_INDEX + count;
    assert!(
        primes.len() > end + POOL_WIDTH,
        "prime list too short for the requested census"
    );

    let start = std::time::Instant::now();
    let mut twin_count = 0usize;
    let mut cousin_count = 0usize;
    let mut checkpoints = Vec::new();

    let mut block_start = START_INDEX;
    while block_start < end {
        let block_end = (block_start + CHECKPOINT_EVERY).min(end);

        let (block_twins, block_cousins) = (block_start..block_end)
            .into_par_iter()
            .map(|i| {
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

                Ok(match prediction.gap {
                    2 => (1usize, 0usize),
                    4 => (0, 1),
                    _ => (0, 0),
                })
            })
            .try_reduce(|| (0, 0), |a, b| Ok((a.0 + b.0, a.1 + b.1)))?;

        twin_count += block_twins;
        cousin_count += block_cousins;

        let gaps_so_far = block_end - START_INDEX;
        checkpoints.push(DensityCheckpoint {
            gaps_analyzed: gaps_so_far,
            twin_density_per_1000: density_per_1000(twin_count, gaps_so_far),
            cousin_density_per_1000: density_per_1000(cousin_count, gaps_so_far),
        });

        block_start = block_end;
    }

    Ok(DensityReport {
        gaps_analyzed: count,
        twin_count,
        cousin_count,
        twin_density_per_1000: density_per_1000(twin_count, count),
        cousin_density_per_1000: density_per_1000(cousin_count, count),
        checkpoints,
        wall_seconds: start.elapsed().as_secs_f64(),
    })
}
