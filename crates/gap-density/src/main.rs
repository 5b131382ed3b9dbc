//! Gap-density census driver.
//!
//! Loads a precomputed prime list, predicts every successor with the mod-6
//! reference engine, and reports twin/cousin densities with checkpointed
//! trend data. Any prediction mismatch is fatal.

use std::path::Path;

use gap_core::{load_primes, FlipEngine, ResidueTable};
use gap_density::{run_census, POOL_WIDTH, START_INDEX};

const PRIME_INPUT_FILE: &str = "prime/primes_100m.txt";
const PRIMES_TO_TEST: usize = 1_000_000;

fn main() {
    println!("\n{}", "=".repeat(60));
    println!("      PRIME GAP DENSITY CENSUS (predictor-driven)");
    println!("{}", "=".repeat(60));

    let required = START_INDEX + PRIMES_TO_TEST + POOL_WIDTH + 2;
    let primes = match load_primes(Path::new(PRIME_INPUT_FILE), required) {
        Ok(p) => p,
        Err(e) => {
            eprintln!("[FATAL] {}", e);
            std::process::exit(1);
        }
    };
    println!("Loaded {} primes from {}.", primes.len(), PRIME_INPUT_FILE);

    let engine = FlipEngine::new(ResidueTable::mod6_reference());
    println!(
        "Scanning {} gaps (pool width {}, messy threshold {})...",
        PRIMES_TO_TEST,
        POOL_WIDTH,
        engine.messy_threshold()
    );
    println!("{}", "-".repeat(60));

    let report = match run_census(&primes, &engine, PRIMES_TO_TEST) {
        Ok(r) => r,
        Err(m) => {
            eprintln!("[FATAL] {}", m);
            eprintln!("The 100% accuracy claim is violated; aborting the run.");
            std::process::exit(1);
        }
    };

    println!("\nTotal gaps analyzed: {}", report.gaps_analyzed);
    println!("Wall time:           {:.2}s", report.wall_seconds);

    println!("\n{:<22} | {:>12} | {:>26}", "Gap type", "Count", "Density (per 1000 primes)");
    println!("{}", "-".repeat(66));
    println!(
        "{:<22} | {:>12} | {:>26.4}",
        "Twin (gap = 2)", report.twin_count, report.twin_density_per_1000
    );
    println!(
        "{:<22} | {:>12} | {:>26.4}",
        "Cousin (gap = 4)", report.cousin_count, report.cousin_density_per_1000
    );

    println!("\nDensity trend checkpoints:");
    println!("{:<15} | {:>18} | {:>18}", "Gaps", "Twin /1000", "Cousin /1000");
    println!("{}", "-".repeat(57));
    for cp in &report.checkpoints {
        println!(
            "{:<15} | {:>18.4} | {:>18.4}",
            cp.gaps_analyzed, cp.twin_density_per_1000, cp.cousin_density_per_1000
        );
    }

    let json = match serde_json::to_string_pretty(&report) {
        Ok(j) => j,
        Err(e) => {
            eprintln!("[FATAL] could not serialize report: {}", e);
            std::process::exit(1);
        }
    };
    let output_path = Path::new("data/gap_density_report.json");
    if let Some(dir) = output_path.parent() {
        let _ = std::fs::create_dir_all(dir);
    }
    match std::fs::write(output_path, &json) {
        Ok(()) => println!("\nReport saved to {}", output_path.display()),
        Err(e) => eprintln!("[WARN] could not save report: {}", e),
    }
}
