//! Scaling report: classical vs. expected quantum queries for max finding.
//!
//! Maximizes 4x - x^2 over an even grid of `--points` values, then over a
//! grid of each sweep size, and prints the query statistics recorded by the
//! tracker.
//!
//! Options:
//!   --config=<file.json>      Load a BenchConfig (missing fields use defaults)
//!   --lower=<x> --upper=<x>   Input interval (default: [-10, 10])
//!   --points=<N>              Grid size of the reference run (default: 10000)
//!   --error=<p>               Failure probability (default: 1e-5)
//!   --sizes=10,100,1000       Grid sizes to sweep
//!   --json                    Emit JSON instead of a table

use serde_json::json;

use benchmarks::{reference_run, scaling_report, BenchConfig};

fn main() {
    env_logger::init();

    let args: Vec<String> = std::env::args().collect();

    let mut config = match args.iter().find_map(|a| a.strip_prefix("--config=")) {
        Some(path) => match BenchConfig::from_file(path) {
            Ok(config) => config,
            Err(e) => {
                eprintln!("Error: {}", e);
                std::process::exit(1);
            }
        },
        None => BenchConfig::default(),
    };
    config.apply_args(&args);
    if let Err(e) = config.validate() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }

    let (argmax, reference) = match reference_run(&config) {
        Ok(run) => run,
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    };

    let rows = match scaling_report(&config) {
        Ok(rows) => rows,
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    };

    if args.iter().any(|a| a == "--json") {
        let report = json!({
            "reference": { "points": config.points, "argmax": argmax, "stats": reference },
            "sweep": rows,
        });
        match serde_json::to_string_pretty(&report) {
            Ok(json) => println!("{}", json),
            Err(e) => {
                eprintln!("Error: {}", e);
                std::process::exit(1);
            }
        }
        return;
    }

    println!("================================================================");
    println!("  MAX FINDING: classical vs. quantum queries (error = {:e})", config.error);
    println!("================================================================\n");
    println!("  Reference run over {} points in [{}, {}]:", config.points, config.lower, config.upper);
    println!("    argmax = {:.6}", argmax);
    println!("    {}\n", reference);
    println!(
        "  {:>9} {:>12} {:>12} {:>16} {:>9}",
        "N", "argmax", "classical", "quantum (exp.)", "ratio"
    );
    println!("  {}", "-".repeat(62));
    for row in &rows {
        println!(
            "  {:>9} {:>12.6} {:>12} {:>16.4} {:>9.3}",
            row.size,
            row.argmax,
            row.stats.classical_actual_queries,
            row.stats.quantum_expected_quantum_queries,
            row.speedup
        );
    }
    println!();
}
