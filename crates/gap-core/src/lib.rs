//! Shared types and utilities for prime-gap residue experiments.
//!
//! The experiments in this workspace all revolve around one heuristic: for a
//! prime `p_n` and a candidate successor `q`, the "anchor" `p_n + q` falls
//! into a residue class (mod 6, 30, or 210) whose measured failure rate — its
//! "messiness" — weights how plausible `q` is as the true next prime. This
//! crate provides:
//!
//! - [`ResidueTable`]: the residue → messiness map, with a JSON loader that
//!   handles the non-standard `Infinity` entries the measurement runs emit
//! - [`FlipEngine`]: the candidate scorer and flip predictor
//! - [`sieve`]: Sieve of Eratosthenes and a trial-division primality test
//! - [`load`]: the newline-delimited prime-list loader and its error type

pub mod engine;
pub mod load;
pub mod sieve;
pub mod table;

pub use engine::{CandidateScore, Decision, FlipEngine, Mismatch, Prediction, MESSY_THRESHOLD};
pub use load::{load_primes, LoadError};
pub use sieve::{is_prime, sieve_primes};
pub use table::{Messiness, ResidueTable};
