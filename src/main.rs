//! Command-line driver for the collision core.
//!
//! Drops a grid of circles onto a static ground box and reports contacts
//! and resting heights. `--backend gpu` routes pair detection through the
//! wgpu kernel; without an adapter the run falls back to the CPU scan.

use anyhow::Result;
use clap::{Parser, ValueEnum};
use physics_core::{
    math::Vec3,
    test_utils::{SceneBuilder, SceneConfig},
    DetectionBackend, World, WorldConfig,
};

#[derive(Copy, Clone, Debug, ValueEnum)]
enum Backend {
    Cpu,
    Gpu,
}

#[derive(Parser, Debug)]
#[command(name = "physics_core")]
#[command(about = "Rigid-body integration and collision demo")]
struct Args {
    /// Circles per side of the spawn grid
    #[arg(long, default_value = "3")]
    grid: usize,

    /// Number of ticks to simulate
    #[arg(long, default_value = "240")]
    steps: u32,

    /// Tick length in seconds
    #[arg(long, default_value_t = 1.0 / 60.0)]
    dt: f32,

    /// Vertical gravity component
    #[arg(long, default_value = "-9.81", allow_hyphen_values = true)]
    gravity: f32,

    /// Narrow-phase used for pair detection
    #[arg(long, value_enum, default_value = "cpu")]
    backend: Backend,

    /// Collider slots to allocate on the GPU
    #[arg(long, default_value = "1024")]
    gpu_capacity: u32,
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let config = WorldConfig::new(args.dt)
        .with_gravity(Vec3::new(0.0, args.gravity, 0.0))
        .with_gpu_capacity(args.gpu_capacity);
    let mut world = World::with_config(config);

    if let Backend::Gpu = args.backend {
        if let Err(err) = world.init_gpu() {
            log::warn!("GPU backend unavailable ({}), using CPU scan", err);
        }
    }

    let scene = SceneConfig {
        grid_size: args.grid,
        ..SceneConfig::default()
    };
    let circles = SceneBuilder::create_circle_grid(&mut world, &scene);

    println!(
        "Simulating {} circles for {} ticks (dt={:.4}, backend={:?})",
        circles.len(),
        args.steps,
        args.dt,
        world.detection_backend()
    );

    let mut total_contacts = 0usize;
    for step in 0..args.steps {
        world.update(args.dt);
        total_contacts += world.contacts().len();

        if step % 60 == 0 {
            let lowest = circles
                .iter()
                .filter_map(|&h| world.body(h))
                .map(|body| body.position.y)
                .fold(f32::INFINITY, f32::min);
            println!(
                "  tick {:4}: {:3} contacts, lowest circle y={:.3}",
                step,
                world.contacts().len(),
                lowest
            );
        }
    }

    println!("\nFinal positions:");
    for (i, &handle) in circles.iter().enumerate() {
        if let Some(body) = world.body(handle) {
            println!(
                "  circle {:2}: ({:7.3}, {:7.3}, {:7.3}) v=({:6.3}, {:6.3}, {:6.3})",
                i,
                body.position.x,
                body.position.y,
                body.position.z,
                body.velocity.x,
                body.velocity.y,
                body.velocity.z
            );
        }
    }
    println!("Total contacts over run: {}", total_contacts);

    if world.detection_backend() == DetectionBackend::Gpu {
        if let Some(gpu) = world.gpu_backend() {
            println!("GPU adds dropped: {}", gpu.dropped_count());
        }
    }

    Ok(())
}
