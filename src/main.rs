//! Pixel Climb CLI - Approximate a goal PNG with a two-tone bitmap.

#[cfg(feature = "dhat-heap")]
#[global_allocator]
static ALLOC: dhat::Alloc = dhat::Alloc;

use std::fs;
use std::path::PathBuf;

use log::error;
use pixel_climb::{compute::HillClimber, schema::ClimbConfig};

fn main() {
    #[cfg(feature = "dhat-heap")]
    let _profiler = dhat::Profiler::new_heap();

    env_logger::init();

    let args: Vec<String> = std::env::args().collect();

    if args.len() > 2 {
        eprintln!("Usage: {} [config.json | --example]", args[0]);
        eprintln!();
        eprintln!("Approximate a goal image by stochastic hill climbing.");
        eprintln!("Without arguments the built-in defaults are used (goal: bc.png).");
        std::process::exit(1);
    }

    if args.get(1).is_some_and(|a| a == "--example") {
        print_example_config();
        return;
    }

    let config = match args.get(1) {
        Some(path) => load_config(PathBuf::from(path)),
        None => ClimbConfig::default(),
    };

    println!("Pixel Climb");
    println!("===========");
    println!("Goal: {}", config.goal_path.display());
    println!("Metric: {:?}", config.metric);
    println!("Iterations: {}", config.iterations);
    println!("Max mutation rate: {}", config.max_mutation_rate);
    println!();

    let mut climber = HillClimber::from_config(config).unwrap_or_else(|e| {
        error!("{}", e);
        std::process::exit(1);
    });

    let result = climber
        .run_with_callback(|p| {
            if p.promoted {
                println!(
                    "Promoted at gen {}: (mut: {:.6}) {:.6} -> {:.6}",
                    p.iteration, p.mutation_rate, p.previous_distance, p.trial_distance
                );
            }
        })
        .unwrap_or_else(|e| {
            error!("{}", e);
            std::process::exit(1);
        });

    println!();
    println!(
        "Promotions: {} over {} iterations ({:.1} it/s)",
        result.stats.promotions, result.stats.iterations, result.stats.iterations_per_second
    );
    if result.stats.snapshot_failures > 0 {
        println!("Snapshot failures: {}", result.stats.snapshot_failures);
    }
    println!("Final distance: {:.6}", result.candidate.distance);
}

fn load_config(path: PathBuf) -> ClimbConfig {
    let config_str = fs::read_to_string(&path).unwrap_or_else(|e| {
        error!("Error reading config file {}: {}", path.display(), e);
        std::process::exit(1);
    });

    serde_json::from_str(&config_str).unwrap_or_else(|e| {
        error!("Error parsing config: {}", e);
        std::process::exit(1);
    })
}

fn print_example_config() {
    let config = ClimbConfig {
        random_seed: Some(42),
        ..Default::default()
    };

    println!("Example configuration (config.json):");
    match serde_json::to_string_pretty(&config) {
        Ok(json) => println!("{}", json),
        Err(e) => {
            error!("Error serializing config: {}", e);
            std::process::exit(1);
        }
    }
}
