//! Simulation container and per-tick pipeline.
//!
//! Bodies and colliders live in generational arenas; the world additionally
//! keeps their registration order, which drives both integration and the
//! `i < j` pair scan. Each `update`:
//!
//! 1. applies `gravity * mass` to every dynamic body and integrates it;
//! 2. scans collider pairs in registration order, skipping static–static
//!    pairs, and resolves each detected pair as `(A = i, B = j)`.
//!
//! With a GPU backend attached and selected, one dispatch over the positions
//! at the start of the pass nominates candidate pairs. Each candidate is
//! re-tested against current positions before it is resolved, so pairs an
//! earlier resolution already separated are skipped.

use crate::{
    arena::{Arena, Handle},
    body::Body,
    collider::{BodyHandle, Collider},
    config::{DetectionBackend, WorldConfig},
    contact::Contact,
    error::Result,
    gpu_collision::GpuCollisionBackend,
    math::Vec3,
};

pub type ColliderHandle = Handle<Collider>;

pub struct World {
    bodies: Arena<Body>,
    body_order: Vec<BodyHandle>,
    colliders: Arena<Collider>,
    collider_order: Vec<ColliderHandle>,
    gravity: Vec3,
    time_step: f32,
    backend: DetectionBackend,
    gpu_capacity: u32,
    gpu: Option<GpuCollisionBackend>,
    contacts: Vec<Contact>,
}

impl World {
    pub fn new(time_step: f32) -> Self {
        Self::with_config(WorldConfig::new(time_step))
    }

    pub fn with_config(config: WorldConfig) -> Self {
        Self {
            bodies: Arena::new(),
            body_order: Vec::new(),
            colliders: Arena::new(),
            collider_order: Vec::new(),
            gravity: config.gravity,
            time_step: config.time_step,
            backend: config.backend,
            gpu_capacity: config.gpu_capacity,
            gpu: None,
            contacts: Vec::new(),
        }
    }

    pub fn gravity(&self) -> Vec3 {
        self.gravity
    }

    pub fn set_gravity(&mut self, gravity: Vec3) {
        self.gravity = gravity;
    }

    pub fn time_step(&self) -> f32 {
        self.time_step
    }

    pub fn add_body(&mut self, body: Body) -> BodyHandle {
        let handle = self.bodies.insert(body);
        self.body_order.push(handle);
        handle
    }

    /// Unknown and already-removed handles yield `None`. Colliders that
    /// reference the body stay registered but are skipped until removed.
    pub fn remove_body(&mut self, handle: BodyHandle) -> Option<Body> {
        let body = self.bodies.remove(handle)?;
        self.body_order.retain(|&h| h != handle);
        Some(body)
    }

    pub fn add_collider(&mut self, collider: Collider) -> ColliderHandle {
        let handle = self.colliders.insert(collider);
        self.collider_order.push(handle);
        handle
    }

    pub fn remove_collider(&mut self, handle: ColliderHandle) -> Option<Collider> {
        let collider = self.colliders.remove(handle)?;
        self.collider_order.retain(|&h| h != handle);
        Some(collider)
    }

    /// Drops every body and collider; gravity and time step are kept.
    pub fn clear(&mut self) {
        self.bodies.clear();
        self.body_order.clear();
        self.colliders.clear();
        self.collider_order.clear();
        self.contacts.clear();
    }

    pub fn body(&self, handle: BodyHandle) -> Option<&Body> {
        self.bodies.get(handle)
    }

    pub fn body_mut(&mut self, handle: BodyHandle) -> Option<&mut Body> {
        self.bodies.get_mut(handle)
    }

    pub fn collider(&self, handle: ColliderHandle) -> Option<&Collider> {
        self.colliders.get(handle)
    }

    pub fn collider_mut(&mut self, handle: ColliderHandle) -> Option<&mut Collider> {
        self.colliders.get_mut(handle)
    }

    /// Bodies in registration order.
    pub fn bodies(&self) -> impl Iterator<Item = (BodyHandle, &Body)> + '_ {
        self.body_order
            .iter()
            .filter_map(|&h| self.bodies.get(h).map(|body| (h, body)))
    }

    /// Colliders in registration order.
    pub fn colliders(&self) -> impl Iterator<Item = (ColliderHandle, &Collider)> + '_ {
        self.collider_order
            .iter()
            .filter_map(|&h| self.colliders.get(h).map(|collider| (h, collider)))
    }

    pub fn body_count(&self) -> usize {
        self.bodies.len()
    }

    pub fn collider_count(&self) -> usize {
        self.colliders.len()
    }

    /// Pairs detected during the most recent `update`.
    pub fn contacts(&self) -> &[Contact] {
        &self.contacts
    }

    /// Attaches a GPU narrow-phase and selects it.
    pub fn enable_gpu(&mut self, backend: GpuCollisionBackend) {
        self.gpu = Some(backend);
        self.backend = DetectionBackend::Gpu;
    }

    /// Creates a backend sized to the configured GPU capacity and selects it.
    /// On error the world is left unchanged.
    pub fn init_gpu(&mut self) -> Result<()> {
        let backend = GpuCollisionBackend::new_blocking(self.gpu_capacity)?;
        self.enable_gpu(backend);
        Ok(())
    }

    pub fn gpu_capacity(&self) -> u32 {
        self.gpu_capacity
    }

    /// Detaches the GPU narrow-phase and returns to the CPU scan.
    pub fn disable_gpu(&mut self) -> Option<GpuCollisionBackend> {
        self.backend = DetectionBackend::Cpu;
        self.gpu.take()
    }

    pub fn gpu_backend(&self) -> Option<&GpuCollisionBackend> {
        self.gpu.as_ref()
    }

    pub fn detection_backend(&self) -> DetectionBackend {
        self.backend
    }

    /// `false` when either handle (or its body) is gone.
    pub fn check_collision(&self, a: ColliderHandle, b: ColliderHandle) -> bool {
        let (Some(ca), Some(cb)) = (self.colliders.get(a), self.colliders.get(b)) else {
            return false;
        };
        let (Some(ba), Some(bb)) = (self.bodies.get(ca.body), self.bodies.get(cb.body)) else {
            return false;
        };
        ca.check_collision(ba, cb, bb)
    }

    /// Resolves `a` against `b` without checking for contact first.
    pub fn resolve_collision(&mut self, a: ColliderHandle, b: ColliderHandle) {
        let (Some(&ca), Some(&cb)) = (self.colliders.get(a), self.colliders.get(b)) else {
            return;
        };
        // Two colliders on one body cannot push that body against itself.
        if let Some((ba, bb)) = self.bodies.get2_mut(ca.body, cb.body) {
            ca.resolve_collision(ba, &cb, bb);
        }
    }

    /// CPU narrow-phase without response: indices into the registration
    /// order, `i < j`, static–static pairs excluded.
    pub fn detect_pairs(&self) -> Vec<(usize, usize)> {
        let n = self.collider_order.len();
        let mut pairs = Vec::new();
        for i in 0..n {
            for j in (i + 1)..n {
                let (a, b) = (self.collider_order[i], self.collider_order[j]);
                if !self.both_static(a, b) && self.check_collision(a, b) {
                    pairs.push((i, j));
                }
            }
        }
        pairs
    }

    pub fn update(&mut self, delta_time: f32) {
        self.integrate_bodies(delta_time);
        self.contacts.clear();

        let handled_on_gpu = self.backend == DetectionBackend::Gpu && self.gpu_collision_pass();
        if !handled_on_gpu {
            self.cpu_collision_pass();
        }

        log::debug!(
            "tick dt={}: {} bodies, {} colliders, {} contacts ({})",
            delta_time,
            self.body_order.len(),
            self.collider_order.len(),
            self.contacts.len(),
            if handled_on_gpu { "gpu" } else { "cpu" }
        );
    }

    fn integrate_bodies(&mut self, delta_time: f32) {
        for &handle in &self.body_order {
            let Some(body) = self.bodies.get_mut(handle) else {
                continue;
            };
            if body.is_static {
                continue;
            }
            let weight = self.gravity * body.mass;
            body.apply_force(weight);
            body.integrate(delta_time);
        }
    }

    /// Detection and resolution interleave: a resolved pair's corrected
    /// positions are what later pairs are tested against.
    fn cpu_collision_pass(&mut self) {
        let n = self.collider_order.len();
        for i in 0..n {
            for j in (i + 1)..n {
                let (a, b) = (self.collider_order[i], self.collider_order[j]);
                self.process_pair(a, b);
            }
        }
    }

    /// Returns `false` when the tick must fall back to the CPU scan.
    fn gpu_collision_pass(&mut self) -> bool {
        let Some(gpu) = self.gpu.as_mut() else {
            log::debug!("GPU detection selected but no backend attached");
            return false;
        };

        if self.collider_order.len() > gpu.max_colliders() as usize {
            log::warn!(
                "{} colliders exceed GPU capacity {}, using CPU scan this tick",
                self.collider_order.len(),
                gpu.max_colliders()
            );
            return false;
        }

        gpu.clear_colliders();
        let mut slots = Vec::with_capacity(self.collider_order.len());
        for &handle in &self.collider_order {
            let Some(collider) = self.colliders.get(handle) else {
                continue;
            };
            let Some(body) = self.bodies.get(collider.body) else {
                continue;
            };
            if gpu.add_collider(collider, body).is_err() {
                return false;
            }
            slots.push(handle);
        }

        let pairs = match gpu.detect_collisions() {
            Ok(pairs) => pairs,
            Err(err) => {
                log::error!("GPU collision dispatch failed, using CPU scan this tick: {}", err);
                return false;
            }
        };

        for (i, j) in pairs {
            self.process_pair(slots[i as usize], slots[j as usize]);
        }
        true
    }

    fn both_static(&self, a: ColliderHandle, b: ColliderHandle) -> bool {
        let is_static = |h: ColliderHandle| {
            self.colliders
                .get(h)
                .and_then(|c| self.bodies.get(c.body))
                .is_some_and(|body| body.is_static)
        };
        is_static(a) && is_static(b)
    }

    fn process_pair(&mut self, a: ColliderHandle, b: ColliderHandle) {
        let (Some(&ca), Some(&cb)) = (self.colliders.get(a), self.colliders.get(b)) else {
            return;
        };
        let (Some(ba), Some(bb)) = (self.bodies.get(ca.body), self.bodies.get(cb.body)) else {
            return;
        };
        if ba.is_static && bb.is_static {
            return;
        }
        if !ca.check_collision(ba, &cb, bb) {
            return;
        }

        self.contacts.push(Contact {
            a,
            b,
            is_trigger: ca.is_trigger || cb.is_trigger,
        });
        self.resolve_collision(a, b);
    }
}

impl Default for World {
    fn default() -> Self {
        Self::with_config(WorldConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clear_keeps_gravity_and_time_step() {
        let mut world = World::new(0.02);
        world.set_gravity(Vec3::new(0.0, -1.0, 0.0));
        let body = world.add_body(Body::new(Vec3::ZERO, 1.0));
        world.add_collider(Collider::circle(body, 1.0));

        world.clear();
        assert_eq!(world.body_count(), 0);
        assert_eq!(world.collider_count(), 0);
        assert_eq!(world.gravity(), Vec3::new(0.0, -1.0, 0.0));
        assert_eq!(world.time_step(), 0.02);
    }

    #[test]
    fn test_remove_unknown_body_is_noop() {
        let mut world = World::default();
        let body = world.add_body(Body::new(Vec3::ZERO, 1.0));
        assert!(world.remove_body(body).is_some());
        assert!(world.remove_body(body).is_none());
        assert_eq!(world.body_count(), 0);
    }

    #[test]
    fn test_static_pair_is_never_reported() {
        let mut world = World::default();
        let a = world.add_body(Body::new_static(Vec3::ZERO));
        let b = world.add_body(Body::new_static(Vec3::ZERO));
        world.add_collider(Collider::circle(a, 1.0));
        world.add_collider(Collider::circle(b, 1.0));

        assert!(world.detect_pairs().is_empty());
        world.update(world.time_step());
        assert!(world.contacts().is_empty());
    }

    #[test]
    fn test_collider_on_removed_body_is_skipped() {
        let mut world = World::new(1.0 / 60.0);
        world.set_gravity(Vec3::ZERO);
        let a = world.add_body(Body::new(Vec3::ZERO, 1.0));
        let b = world.add_body(Body::new(Vec3::new(0.5, 0.0, 0.0), 1.0));
        world.add_collider(Collider::circle(a, 1.0));
        world.add_collider(Collider::circle(b, 1.0));

        world.remove_body(b);
        world.update(1.0 / 60.0);
        assert!(world.contacts().is_empty());
        assert_eq!(world.body(a).unwrap().position, Vec3::ZERO);
    }

    #[test]
    fn test_counts_track_removals() {
        let mut world = World::with_config(WorldConfig::default().with_gpu_capacity(64));
        let a = world.add_body(Body::new(Vec3::ZERO, 1.0));
        let b = world.add_body(Body::new(Vec3::X, 1.0));
        let ca = world.add_collider(Collider::circle(a, 1.0));
        world.add_collider(Collider::circle(b, 1.0));

        world.remove_body(a);
        world.remove_collider(ca);
        assert_eq!(world.body_count(), 1);
        assert_eq!(world.collider_count(), 1);
        assert_eq!(world.gpu_capacity(), 64);
    }

    #[test]
    fn test_gpu_selected_without_backend_uses_cpu() {
        let config = WorldConfig::default()
            .with_gravity(Vec3::ZERO)
            .with_backend(DetectionBackend::Gpu);
        let mut world = World::with_config(config);
        let a = world.add_body(Body::new(Vec3::ZERO, 1.0));
        let b = world.add_body(Body::new(Vec3::new(1.0, 0.0, 0.0), 1.0));
        world.add_collider(Collider::circle(a, 1.0));
        world.add_collider(Collider::circle(b, 1.0));

        world.update(1.0 / 60.0);
        assert_eq!(world.contacts().len(), 1);
    }
}
