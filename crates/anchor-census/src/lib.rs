//! Anchor failure-rate census: where the messiness tables come from.
//!
//! For each consecutive prime pair the anchor is `S_n = p_n + p_{n+1}`. The
//! census finds the distance `k_min` from the anchor to its nearest prime
//! and calls the anchor a *failure* when that distance is composite
//! (`k_min > 1` and not prime). Tallying failures per `S_n % modulus`
//! residue gives exactly the failure-rate percentages the flip predictor
//! uses as messiness scores, so a census run can emit a residue table file
//! for any modulus.
//!
//! A second pass, the correction survey, restricts to anchors divisible by
//! 210 and checks that every failing anchor has a neighboring anchor within
//! a bounded index radius whose distance to the offending prime is clean
//! (1 or prime).

use std::collections::{BTreeMap, HashSet};

use gap_core::{Messiness, ResidueTable};
use serde::{Deserialize, Serialize};

/// First index scanned. Skips the 2, 3 singularity with margin so the
/// measured rates line up with the table-producing runs.
pub const START_INDEX: usize = 10;

/// Nearest-prime search gives up past this distance. Maximal prime gaps in
/// the tested range are far below it; an exhausted search is counted as
/// "no measurement", never as a failure.
pub const K_MIN_SEARCH_LIMIT: u64 = 2000;

/// Anchor and failure tallies for one residue class.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ResidueStats {
    pub anchors: u64,
    pub failures: u64,
}

impl ResidueStats {
    /// Failure percentage, or `None` for an unpopulated residue.
    pub fn failure_rate_percent(&self) -> Option<f64> {
        if self.anchors == 0 {
            None
        } else {
            Some(self.failures as f64 / self.anchors as f64 * 100.0)
        }
    }
}

/// Per-residue census over one run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FailureCensus {
    pub modulus: u64,
    pub anchors_tested: u64,
    pub stats: BTreeMap<u64, ResidueStats>,
    pub wall_seconds: f64,
}

impl FailureCensus {
    /// Convert measured failure rates into a messiness table. Residues the
    /// scan never produced (odd residues, for anchors of odd primes) stay
    /// absent and look up as [`Messiness::Unknown`].
    pub fn to_residue_table(&self) -> ResidueTable {
        let measured: Vec<(u64, f64)> = self
            .stats
            .iter()
            .filter_map(|(&res, s)| s.failure_rate_percent().map(|rate| (res, rate)))
            .collect();
        ResidueTable::from_measured(self.modulus, &measured)
    }

    pub fn rate(&self, residue: u64) -> Messiness {
        match self.stats.get(&residue).and_then(ResidueStats::failure_rate_percent) {
            Some(v) => Messiness::Measured(v),
            None => Messiness::Unknown,
        }
    }
}

/// Outcome of the bounded-radius correction search over mod-210 anchors.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CorrectionSurvey {
    pub anchors_tested: u64,
    pub failures: u64,
    pub resolved: u64,
    pub unresolved: u64,
    pub max_radius_observed: usize,
    pub wall_seconds: f64,
}

/// Distance from `anchor` to the nearest prime, searching both directions,
/// or `None` past [`K_MIN_SEARCH_LIMIT`].
pub fn k_min(anchor: u64, prime_set: &HashSet<u64>) -> Option<u64> {
    for dist in 1..=K_MIN_SEARCH_LIMIT {
        if anchor >= dist && prime_set.contains(&(anchor - dist)) {
            return Some(dist);
        }
        if prime_set.contains(&(anchor + dist)) {
            return Some(dist);
        }
    }
    None
}

/// A distance is clean when it is 1 or prime.
pub fn is_clean_distance(k: u64, prime_set: &HashSet<u64>) -> bool {
    k == 1 || prime_set.contains(&k)
}

fn is_failure(anchor: u64, prime_set: &HashSet<u64>) -> bool {
    match k_min(anchor, prime_set) {
        Some(k) => k > 1 && !prime_set.contains(&k),
        None => false,
    }
}

/// Scan `count` anchors starting at [`START_INDEX`] and tally failures per
/// `S_n % modulus` residue. The slice must extend far enough past the
/// scanned range that nearest-prime lookups around every anchor resolve
/// inside the set.
pub fn run_failure_census(primes: &[u64], modulus: u64, count: usize) -> FailureCensus {
    assert!(modulus > 0, "modulus must be positive");
    let end = START_INDEX + count;
    assert!(primes.len() > end + 1, "prime list too short for the census");

    let last_anchor = primes[end - 1] + primes[end];
    assert!(
        *primes.last().unwrap() >= last_anchor + K_MIN_SEARCH_LIMIT,
        "prime list does not cover the anchor search window"
    );

    let start = std::time::Instant::now();
    let prime_set: HashSet<u64> = primes.iter().copied().collect();
    let mut stats: BTreeMap<u64, ResidueStats> = BTreeMap::new();

    for i in START_INDEX..end {
        let anchor = primes[i] + primes[i + 1];
        let entry = stats.entry(anchor % modulus).or_default();
        entry.anchors += 1;
        if is_failure(anchor, &prime_set) {
            entry.failures += 1;
        }
    }

    FailureCensus {
        modulus,
        anchors_tested: count as u64,
        stats,
        wall_seconds: start.elapsed().as_secs_f64(),
    }
}

/// For every failing anchor divisible by 210, search anchors at index
/// distance 1..=`max_radius` for one whose distance to the offending prime
/// is clean, and record the largest radius any fix needed.
pub fn run_correction_survey(
    primes: &[u64],
    count: usize,
    max_radius: usize,
) -> CorrectionSurvey {
    let scan_start = START_INDEX + max_radius;
    let end = scan_start + count;
    assert!(
        primes.len() > end + max_radius + 1,
        "prime list too short for the correction survey"
    );

    let start = std::time::Instant::now();
    let prime_set: HashSet<u64> = primes.iter().copied().collect();

    let mut anchors_tested = 0u64;
    let mut failures = 0u64;
    let mut resolved = 0u64;
    let mut unresolved = 0u64;
    let mut max_radius_observed = 0usize;

    for i in scan_start..end {
        let anchor = primes[i] + primes[i + 1];
        if anchor % 210 != 0 {
            continue;
        }
        anchors_tested += 1;

        let Some(k) = k_min(anchor, &prime_set) else {
            continue;
        };
        if k == 1 || prime_set.contains(&k) {
            continue;
        }
        failures += 1;

        // The prime that set k_min; the search direction that hit first.
        let offender = if prime_set.contains(&(anchor - k)) {
            anchor - k
        } else {
            anchor + k
        };

        let mut fixed = false;
        for r in 1..=max_radius {
            let prev = primes[i - r] + primes[i - r + 1];
            let next = primes[i + r] + primes[i + r + 1];
            if is_clean_distance(prev.abs_diff(offender), &prime_set)
                || is_clean_distance(next.abs_diff(offender), &prime_set)
            {
                resolved += 1;
                max_radius_observed = max_radius_observed.max(r);
                fixed = true;
                break;
            }
        }
        if !fixed {
            unresolved += 1;
        }
    }

    CorrectionSurvey {
        anchors_tested,
        failures,
        resolved,
        unresolved,
        max_radius_observed,
        wall_seconds: start.elapsed().as_secs_f64(),
    }
}
