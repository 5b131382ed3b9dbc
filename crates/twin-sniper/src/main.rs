//! Twin-prime sniper benchmark.
//!
//! Twin primes `(p, p+2)` with `p > 3` require `p == 5 (mod 6)`: if
//! `p == 1 (mod 6)` then `p + 2` is divisible by 3. A residue-aware search
//! can therefore skip the neighbor check for roughly half of all primes
//! without losing a single twin. This driver runs the blind search and the
//! filtered search over the same sieve and compares both the results and
//! the number of neighbor checks spent.

use std::collections::HashSet;

use gap_core::sieve_primes;

const LIMIT: u64 = 2_000_000;
const TARGET_TWINS: usize = 50_000;

#[derive(Debug, Clone)]
struct SearchStats {
    /// Lower member of every twin pair found, in order.
    twins: Vec<u64>,
    /// Neighbor checks actually performed.
    checks: u64,
    /// Primes skipped by the residue filter.
    skipped: u64,
    wall_seconds: f64,
}

/// Blind search: check `p + 2` for every prime.
fn brute_force(primes: &[u64], prime_set: &HashSet<u64>, target: usize) -> SearchStats {
    let start = std::time::Instant::now();
    let mut twins = Vec::new();
    let mut checks = 0u64;

    for &p in primes {
        if p + 2 >= LIMIT {
            break;
        }
        checks += 1;
        if prime_set.contains(&(p + 2)) {
            twins.push(p);
            if twins.len() >= target {
                break;
            }
        }
    }

    SearchStats {
        twins,
        checks,
        skipped: 0,
        wall_seconds: start.elapsed().as_secs_f64(),
    }
}

/// Is `p` worth a neighbor check? Only residue 5 anchors can open a twin,
/// plus the lone singularity (3, 5) below the mod-6 wheel.
fn twin_eligible(p: u64) -> bool {
    p % 6 == 5 || p == 3
}

/// Filtered search: spend a neighbor check only on eligible primes.
fn sniper(primes: &[u64], prime_set: &HashSet<u64>, target: usize) -> SearchStats {
    let start = std::time::Instant::now();
    let mut twins = Vec::new();
    let mut checks = 0u64;
    let mut skipped = 0u64;

    for &p in primes {
        if p + 2 >= LIMIT {
            break;
        }
        if !twin_eligible(p) {
            skipped += 1;
            continue;
        }
        checks += 1;
        if prime_set.contains(&(p + 2)) {
            twins.push(p);
            if twins.len() >= target {
                break;
            }
        }
    }

    SearchStats {
        twins,
        checks,
        skipped,
        wall_seconds: start.elapsed().as_secs_f64(),
    }
}

fn main() {
    println!("\n{}", "=".repeat(60));
    println!("      TWIN PRIME SNIPER CHALLENGE");
    println!("{}", "=".repeat(60));

    println!("Generating primes up to {}...", LIMIT);
    let primes = sieve_primes(LIMIT);
    let prime_set: HashSet<u64> = primes.iter().copied().collect();
    println!("Search pool: {} primes.", primes.len());
    println!("{}", "-".repeat(60));

    println!("Run 1: brute force (blind search)");
    let bf = brute_force(&primes, &prime_set, TARGET_TWINS);
    println!("  > Twins found:               {}", bf.twins.len());
    println!("  > Neighbor checks performed: {}", bf.checks);
    println!("  > Time:                      {:.5}s", bf.wall_seconds);

    println!("\nRun 2: sniper (residue filtering)");
    let sn = sniper(&primes, &prime_set, TARGET_TWINS);
    println!("  > Twins found:               {}", sn.twins.len());
    println!("  > Neighbor checks performed: {}", sn.checks);
    println!("  > Checks skipped:            {}", sn.skipped);
    println!("  > Time:                      {:.5}s", sn.wall_seconds);

    println!("{}", "-".repeat(60));
    println!("RESULTS ANALYSIS");
    println!("Brute-force checks: {}", bf.checks);
    println!("Sniper checks:      {}", sn.checks);
    let reduction = (1.0 - sn.checks as f64 / bf.checks as f64) * 100.0;
    println!("\nWorkload reduction: {:.4}%", reduction);

    if bf.twins != sn.twins {
        println!("[CRITICAL FAILURE] The sniper missed or invented twins!");
        std::process::exit(1);
    }
    println!("[SUCCESS] The sniper found exactly the same twins.");

    if reduction > 49.0 {
        println!("[VERDICT] CONFIRMED. The filter eliminates half the search space.");
    } else {
        println!("[VERDICT] FAILED. Efficiency gain negligible.");
        std::process::exit(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn setup() -> (Vec<u64>, HashSet<u64>) {
        let primes = sieve_primes(LIMIT);
        let set = primes.iter().copied().collect();
        (primes, set)
    }

    #[test]
    fn test_small_range_twins_are_correct() {
        let primes = sieve_primes(100);
        let set: HashSet<u64> = primes.iter().copied().collect();
        let bf = brute_force(&primes, &set, usize::MAX);
        assert_eq!(bf.twins, vec![3, 5, 11, 17, 29, 41, 59, 71]);
    }

    #[test]
    fn test_sniper_finds_the_same_twins() {
        let (primes, set) = setup();
        let bf = brute_force(&primes, &set, TARGET_TWINS);
        let sn = sniper(&primes, &set, TARGET_TWINS);
        assert_eq!(bf.twins, sn.twins);
        assert!(!bf.twins.is_empty());
    }

    #[test]
    fn test_sniper_covers_the_three_five_singularity() {
        assert!(twin_eligible(3));
        assert!(twin_eligible(5));
        assert!(twin_eligible(11));
        assert!(!twin_eligible(7));
        assert!(!twin_eligible(13));
    }

    #[test]
    fn test_filter_halves_the_checks() {
        let (primes, set) = setup();
        let bf = brute_force(&primes, &set, TARGET_TWINS);
        let sn = sniper(&primes, &set, TARGET_TWINS);
        let reduction = 1.0 - sn.checks as f64 / bf.checks as f64;
        assert!(reduction > 0.45, "reduction {}", reduction);
        assert_eq!(sn.checks + sn.skipped, bf.checks);
    }
}
