//! Quick hill-climbing performance test

use image::{Rgb, RgbImage};
use pixel_climb::{
    ClimbConfig, ColorMetric, SmoothingConfig,
    compute::{HillClimber, MemorySink},
};
use std::time::Instant;

/// A dark disc on a light background.
fn disc_goal(size: u32) -> RgbImage {
    let c = size as f32 / 2.0;
    let r = size as f32 / 3.0;
    RgbImage::from_fn(size, size, |x, y| {
        let dx = x as f32 - c;
        let dy = y as f32 - c;
        if dx * dx + dy * dy < r * r {
            Rgb([20, 20, 20])
        } else {
            Rgb([235, 235, 235])
        }
    })
}

fn main() {
    println!("=== Hill Climbing Performance Test ===\n");

    for size in [16, 32, 64] {
        println!("Goal size: {}x{}", size, size);

        for metric in [ColorMetric::Lab, ColorMetric::Hcl] {
            for smoothing in [SmoothingConfig::default(), SmoothingConfig::disabled()] {
                let config = ClimbConfig {
                    iterations: 2_000,
                    metric,
                    smoothing: smoothing.clone(),
                    random_seed: Some(42),
                    ..Default::default()
                };

                let start = Instant::now();
                let mut climber =
                    match HillClimber::new(config, disc_goal(size), MemorySink::default()) {
                        Ok(c) => c,
                        Err(e) => {
                            eprintln!("  setup failed: {}", e);
                            continue;
                        }
                    };
                let result = match climber.run() {
                    Ok(r) => r,
                    Err(e) => {
                        eprintln!("  run failed: {}", e);
                        continue;
                    }
                };
                let elapsed = start.elapsed();

                println!(
                    "  {:?} smoothing={:<5} {:>10.3} -> {:>10.3}  ({} promotions, {:.1} it/s)",
                    metric,
                    smoothing.enabled,
                    result.stats.initial_distance,
                    result.stats.final_distance,
                    result.stats.promotions,
                    result.stats.iterations as f64 / elapsed.as_secs_f64()
                );
            }
        }
        println!();
    }
}
