//! Semiprime factoring over the predictor-generated prime stream.
//!
//! The demonstration: if the flip predictor really is a deterministic next-
//! prime selector, then iterating it from p=3 yields the full prime sequence,
//! and trial-dividing a semiprime `N` by that stream up to `sqrt(N)` must
//! surface a factor. The stream never consults a sieve for the *selection* —
//! trial division only builds each local candidate window, and the predictor
//! picks the successor from it.
//!
//! Targets are `BigUint` so arbitrary decimal input works on the command
//! line; the stream itself runs in `u64`, which bounds the reachable
//! `sqrt(N)` and is checked up front.

use std::time::{Duration, Instant};

use gap_core::FlipEngine;
use num_bigint::BigUint;
use num_integer::{Integer, Roots};
use num_traits::{ToPrimitive, Zero};

/// Candidate windows start at this width; a window wider than every prime
/// gap in the reachable range, so widening is rare.
pub const INITIAL_WINDOW: u64 = 100;

/// Primes yielded by repeatedly applying the flip predictor to a local
/// candidate window. Yields 2, 3, then every predicted successor.
pub struct PrimeStream<'a> {
    engine: &'a FlipEngine,
    /// Primes produced so far; also the trial-division base for window
    /// construction.
    known: Vec<u64>,
    /// Index of the next element of `known` to hand out.
    cursor: usize,
}

impl<'a> PrimeStream<'a> {
    pub fn new(engine: &'a FlipEngine) -> Self {
        PrimeStream {
            engine,
            known: vec![2, 3],
            cursor: 0,
        }
    }

    /// Odd numbers in `(p_n, p_n + window)` that survive trial division by
    /// the primes found so far. `known` always covers `sqrt` of the window,
    /// so survival means primality.
    fn candidate_window(&self, p_n: u64, window: u64) -> Vec<u64> {
        let mut pool = Vec::new();
        let mut k = p_n + 2;
        while k < p_n + window {
            let mut composite = false;
            for &p in &self.known {
                if p.saturating_mul(p) > k {
                    break;
                }
                if k % p == 0 {
                    composite = true;
                    break;
                }
            }
            if !composite {
                pool.push(k);
            }
            k += 2;
        }
        pool
    }

    fn advance(&mut self) -> u64 {
        let p_n = *self.known.last().unwrap();
        let mut window = INITIAL_WINDOW;
        loop {
            let pool = self.candidate_window(p_n, window);
            if let Some(prediction) = self.engine.predict(p_n, &pool) {
                self.known.push(prediction.candidate);
                return prediction.candidate;
            }
            // Empty window: a gap wider than the window. Widen and retry.
            window *= 2;
        }
    }
}

impl Iterator for PrimeStream<'_> {
    type Item = u64;

    fn next(&mut self) -> Option<u64> {
        if self.cursor < self.known.len() {
            let p = self.known[self.cursor];
            self.cursor += 1;
            return Some(p);
        }
        let p = self.advance();
        self.cursor += 1;
        Some(p)
    }
}

/// Outcome of one factoring attempt.
#[derive(Debug, Clone)]
pub struct ProbeResult {
    pub n: BigUint,
    /// `Some((p, q))` with `p * q == n`, smallest factor first.
    pub factors: Option<(BigUint, BigUint)>,
    /// Primes drawn from the stream before stopping.
    pub primes_generated: u64,
    pub duration: Duration,
}

impl ProbeResult {
    pub fn verify(&self) -> bool {
        match &self.factors {
            Some((p, q)) => p * q == self.n,
            None => false,
        }
    }
}

/// Trial-divide `n` by the predictor-generated prime stream up to
/// `sqrt(n)`. Returns `factors: None` when no stream prime divides `n`
/// (i.e. `n` is prime) or when `sqrt(n)` exceeds the `u64` stream range.
pub fn probe(n: &BigUint, engine: &FlipEngine) -> ProbeResult {
    let start = Instant::now();
    let mut primes_generated = 0u64;
    let mut factors = None;

    // sqrt(N) bounds the search; past u64 the stream cannot follow.
    let limit = n.sqrt().to_u64().unwrap_or(u64::MAX);

    for p in PrimeStream::new(engine) {
        if p > limit {
            break;
        }
        primes_generated += 1;
        let divisor = BigUint::from(p);
        if n.mod_floor(&divisor).is_zero() {
            let q = n / &divisor;
            factors = Some((divisor, q));
            break;
        }
    }

    ProbeResult {
        n: n.clone(),
        factors,
        primes_generated,
        duration: start.elapsed(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gap_core::{sieve_primes, ResidueTable};

    fn engine() -> FlipEngine {
        FlipEngine::new(ResidueTable::mod6_reference())
    }

    #[test]
    fn test_stream_reproduces_the_prime_sequence() {
        let engine = engine();
        let truth = sieve_primes(105_000);
        let streamed: Vec<u64> = PrimeStream::new(&engine).take(truth.len()).collect();
        assert_eq!(streamed, truth);
    }

    #[test]
    fn test_probe_factors_a_small_semiprime() {
        let engine = engine();
        let n = BigUint::from(7919u64 * 7907);
        let result = probe(&n, &engine);
        let (p, q) = result.factors.clone().expect("semiprime must factor");
        assert_eq!(p, BigUint::from(7907u64));
        assert_eq!(q, BigUint::from(7919u64));
        assert!(result.verify());
    }

    #[test]
    fn test_probe_handles_even_and_tiny_factors() {
        let engine = engine();
        let result = probe(&BigUint::from(2u64 * 1_000_003), &engine);
        let (p, _) = result.factors.unwrap();
        assert_eq!(p, BigUint::from(2u64));
    }

    #[test]
    fn test_probe_reports_primes_as_unfactorable() {
        let engine = engine();
        let result = probe(&BigUint::from(104_729u64), &engine);
        assert!(result.factors.is_none());
        assert!(result.primes_generated > 0);
    }
}
