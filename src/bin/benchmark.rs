/*
Narrow-Phase Throughput Benchmark

Measures the CPU all-pairs scan against the GPU collision kernel over growing collider counts. Each
GPU run is also checked against the CPU reference of the kernel so a speedup never hides a wrong
answer. Without a GPU adapter only the CPU numbers are reported.
*/

use anyhow::{bail, Result};
use clap::Parser;
use physics_core::{
    cpu_ref,
    test_utils::{BenchmarkTimer, SceneBuilder, TestHarness},
    GpuCollisionBackend, World,
};

#[derive(Parser, Debug)]
#[command(name = "benchmark")]
#[command(about = "CPU vs GPU narrow-phase throughput")]
struct Args {
    /// Collider counts to measure
    #[arg(long, value_delimiter = ',', default_value = "100,500,1000,2000")]
    counts: Vec<usize>,

    /// Measured ticks per count
    #[arg(long, default_value = "20")]
    ticks: u32,
}

fn register_all(world: &World, backend: &mut GpuCollisionBackend) -> Result<()> {
    backend.clear_colliders();
    for (_, collider) in world.colliders() {
        if let Some(body) = world.body(collider.body) {
            backend.add_collider(collider, body)?;
        }
    }
    Ok(())
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    println!("Narrow-Phase Benchmark");
    println!("======================");

    let max_count = args.counts.iter().copied().max().unwrap_or(0) as u32;
    let mut gpu = TestHarness::collision_backend(max_count);
    if gpu.is_none() {
        println!("No GPU available; reporting CPU only.");
    }

    let timer = BenchmarkTimer::new(2, args.ticks);

    for &count in &args.counts {
        let world = SceneBuilder::create_benchmark_scene(count);

        let cpu_results = timer.measure(|| {
            std::hint::black_box(world.detect_pairs());
        });
        cpu_results.print_summary("CPU all-pairs", count);

        if let Some(backend) = gpu.as_mut() {
            register_all(&world, backend)?;

            let expected = cpu_ref::detect_pairs(backend.descriptors());
            let actual = backend.detect_collisions()?;
            if actual != expected {
                bail!(
                    "GPU result diverges from CPU reference at {} colliders ({} vs {} pairs)",
                    count,
                    actual.len(),
                    expected.len()
                );
            }

            let backend = &*backend;
            let gpu_results = timer.measure(|| {
                if let Err(err) = backend.detect_collisions() {
                    log::error!("GPU dispatch failed: {}", err);
                }
            });
            gpu_results.print_summary("GPU kernel", count);
            println!(
                "  Speedup: {:.2}x",
                cpu_results.average_tick_time().as_secs_f64()
                    / gpu_results.average_tick_time().as_secs_f64()
            );
        }
    }

    Ok(())
}
