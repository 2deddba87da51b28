use crate::{
    body::Body,
    collider::{BodyHandle, Collider},
    config::WorldConfig,
    math::Vec3,
    world::{ColliderHandle, World},
};

pub struct SceneConfig {
    pub grid_size: usize,
    pub spacing: f32,
    pub initial_height: f32,
    pub circle_radius: f32,
    pub mass: f32,
    /// Half extents of the static ground box centred at the origin.
    pub ground_size: Vec3,
    pub add_small_velocity: bool,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            grid_size: 3,
            spacing: 3.0,
            initial_height: 10.0,
            circle_radius: 0.5,
            mass: 1.0,
            ground_size: Vec3::new(20.0, 1.0, 20.0),
            add_small_velocity: true,
        }
    }
}

pub struct SceneBuilder;

impl SceneBuilder {
    /// Square grid of falling circles above a static ground box.
    pub fn create_circle_grid(world: &mut World, config: &SceneConfig) -> Vec<BodyHandle> {
        let mut handles = Vec::with_capacity(config.grid_size * config.grid_size);
        let offset = (config.grid_size as f32 - 1.0) * config.spacing / 2.0;

        for i in 0..config.grid_size {
            for j in 0..config.grid_size {
                let x = i as f32 * config.spacing - offset;
                let z = j as f32 * config.spacing - offset;

                let mut body = Body::new(Vec3::new(x, config.initial_height, z), config.mass);
                if config.add_small_velocity {
                    // Deterministic spread based on grid position
                    body.velocity.x = (i as f32 - config.grid_size as f32 / 2.0) * 0.1;
                    body.velocity.z = (j as f32 - config.grid_size as f32 / 2.0) * 0.1;
                }

                let handle = world.add_body(body);
                world.add_collider(Collider::circle(handle, config.circle_radius));
                handles.push(handle);
            }
        }

        Self::create_ground(world, config.ground_size);
        handles
    }

    pub fn create_ground(world: &mut World, half_extents: Vec3) -> (BodyHandle, ColliderHandle) {
        let body = world.add_body(Body::new_static(Vec3::ZERO));
        let collider = world.add_collider(Collider::cuboid(body, half_extents));
        (body, collider)
    }

    /// Dynamic unit circle at y = 10 above a static 10×1×10 ground box at
    /// the origin, under standard gravity at 60 Hz.
    pub fn create_drop_scene() -> (World, BodyHandle) {
        let mut world = World::with_config(WorldConfig::default());
        let ball = world.add_body(Body::new(Vec3::new(0.0, 10.0, 0.0), 1.0));
        world.add_collider(Collider::circle(ball, 1.0));
        Self::create_ground(&mut world, Vec3::new(10.0, 1.0, 10.0));
        (world, ball)
    }

    /// `count` non-overlapping circles laid out on a plane, no ground.
    pub fn create_benchmark_scene(count: usize) -> World {
        let mut world = World::with_config(WorldConfig::default().with_gravity(Vec3::ZERO));
        let grid_size = (count as f32).sqrt().ceil().max(1.0) as usize;
        let spacing = 3.0;

        for i in 0..count {
            let x = (i % grid_size) as f32 * spacing;
            let z = (i / grid_size) as f32 * spacing;
            let body = world.add_body(Body::new(Vec3::new(x, 0.0, z), 1.0));
            world.add_collider(Collider::circle(body, 0.5));
        }
        world
    }
}
