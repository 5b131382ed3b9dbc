//! Semiprime probe driver.
//!
//! Factors each target by trial division over the predictor-generated
//! prime stream. Targets come from positional decimal arguments; with no
//! arguments, two built-in semiprimes run as a self-check.

use num_bigint::BigUint;
use num_integer::Roots;

use gap_core::{FlipEngine, ResidueTable};
use semiprime_probe::probe;

fn parse_targets() -> Result<Vec<BigUint>, String> {
    let args: Vec<String> = std::env::args().skip(1).collect();
    if args.is_empty() {
        return Ok(vec![
            BigUint::from(7919u64 * 7907),
            BigUint::from(104_729u64 * 104_723),
        ]);
    }
    args.iter()
        .map(|a| {
            a.parse::<BigUint>()
                .map_err(|_| format!("'{}' is not a decimal integer", a))
        })
        .collect()
}

fn main() {
    println!("\n{}", "=".repeat(60));
    println!("      SEMIPRIME PROBE (predictor-generated prime stream)");
    println!("{}", "=".repeat(60));

    let targets = match parse_targets() {
        Ok(t) => t,
        Err(e) => {
            eprintln!("[FATAL] {}", e);
            std::process::exit(1);
        }
    };

    let engine = FlipEngine::new(ResidueTable::mod6_reference());
    let mut any_failure = false;

    for n in targets {
        if n < BigUint::from(4u64) {
            eprintln!("\n[SKIP] {} has no nontrivial factorization.", n);
            continue;
        }

        println!("\n[TARGET] N = {}", n);
        println!("  Search space: primes up to sqrt(N) = {}", n.sqrt());

        let result = probe(&n, &engine);
        match &result.factors {
            Some((p, q)) => {
                println!("\n  [SUCCESS] N = {} x {}", p, q);
                println!("  Primes generated: {}", result.primes_generated);
                println!("  Time taken:       {:.4}s", result.duration.as_secs_f64());
                if !result.verify() {
                    eprintln!("  [FATAL] factor product does not equal N");
                    std::process::exit(1);
                }
            }
            None => {
                println!(
                    "\n  [NO FACTOR] No stream prime up to sqrt(N) divides N ({} generated).",
                    result.primes_generated
                );
                println!("  N is prime, or sqrt(N) exceeds the stream range.");
                any_failure = true;
            }
        }
    }

    if any_failure {
        std::process::exit(1);
    }
}
