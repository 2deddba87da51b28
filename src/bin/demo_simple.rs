/*
Drop-On-Ground Console Demo

Drops a single unit circle from y=10 onto a static 10x1x10 ground box and prints the trajectory
around each impact. It is the smallest end-to-end use of the World API: build bodies and
colliders, tick with a fixed delta, read positions back for a renderer or a log.
*/

use anyhow::Result;
use physics_core::test_utils::SceneBuilder;

const MAX_TICKS: u32 = 600;

fn main() -> Result<()> {
    env_logger::init();

    println!("Drop-On-Ground Demo");
    println!("===================\n");

    let (mut world, ball) = SceneBuilder::create_drop_scene();
    let dt = world.time_step();
    let mut bounces = 0;

    for tick in 0..MAX_TICKS {
        let before = world.body(ball).map(|b| b.velocity.y).unwrap_or_default();
        world.update(dt);

        let Some(body) = world.body(ball) else {
            break;
        };
        if !world.contacts().is_empty() && before < 0.0 && body.velocity.y > 0.0 {
            bounces += 1;
            println!(
                "tick {:3}: bounce #{} at y={:.3}, vy {:.3} -> {:.3}",
                tick, bounces, body.position.y, before, body.velocity.y
            );
        } else if tick % 30 == 0 {
            println!("tick {:3}: y={:.3} vy={:.3}", tick, body.position.y, body.velocity.y);
        }
    }

    println!("\n{} bounces in {} ticks", bounces, MAX_TICKS);
    Ok(())
}
