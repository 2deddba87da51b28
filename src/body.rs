//! Point-mass rigid body.
//!
//! Holds linear state only. Forces accumulate into `acceleration` between
//! integrations; `integrate` consumes and clears the accumulator.
//! Static bodies ignore both.

use crate::math::Vec3;

pub const DEFAULT_DRAG: f32 = 1.0;

#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Body {
    pub position: Vec3,
    pub velocity: Vec3,
    /// Per-tick accumulator, zeroed by `integrate`.
    pub acceleration: Vec3,
    /// Must be positive for dynamic bodies.
    pub mass: f32,
    pub is_static: bool,
    /// Velocity multiplier applied once per integration, in (0, 1].
    pub drag: f32,
}

impl Body {
    pub fn new(position: Vec3, mass: f32) -> Self {
        debug_assert!(mass > 0.0, "dynamic body mass must be positive, got {mass}");
        Self {
            position,
            velocity: Vec3::ZERO,
            acceleration: Vec3::ZERO,
            mass,
            is_static: false,
            drag: DEFAULT_DRAG,
        }
    }

    pub fn new_static(position: Vec3) -> Self {
        Self {
            position,
            velocity: Vec3::ZERO,
            acceleration: Vec3::ZERO,
            mass: 1.0,
            is_static: true,
            drag: DEFAULT_DRAG,
        }
    }

    pub fn with_velocity(mut self, velocity: Vec3) -> Self {
        self.velocity = velocity;
        self
    }

    pub fn with_drag(mut self, drag: f32) -> Self {
        debug_assert!(drag > 0.0 && drag <= 1.0, "drag must lie in (0, 1], got {drag}");
        self.drag = drag;
        self
    }

    pub fn apply_force(&mut self, force: Vec3) {
        if self.is_static {
            return;
        }
        debug_assert!(self.mass > 0.0, "apply_force on non-positive mass {}", self.mass);
        self.acceleration += force / self.mass;
    }

    /// Semi-implicit Euler: accelerate, damp, then translate.
    pub fn integrate(&mut self, delta_time: f32) {
        if self.is_static {
            return;
        }
        self.velocity += self.acceleration * delta_time;
        self.velocity *= self.drag;
        self.position += self.velocity * delta_time;
        self.acceleration = Vec3::ZERO;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_apply_force_divides_by_mass() {
        let mut body = Body::new(Vec3::ZERO, 2.0);
        body.apply_force(Vec3::new(4.0, 0.0, -2.0));
        body.apply_force(Vec3::new(0.0, 6.0, 0.0));
        assert_eq!(body.acceleration, Vec3::new(2.0, 3.0, -1.0));
    }

    #[test]
    fn test_integrate_damps_before_translating() {
        let mut body = Body::new(Vec3::new(0.0, 10.0, 0.0), 1.0).with_drag(0.5);
        body.acceleration = Vec3::new(0.0, -10.0, 0.0);
        body.integrate(0.1);

        // v = (-10 * 0.1) * 0.5 = -0.5, then p = 10 + (-0.5 * 0.1)
        assert_relative_eq!(body.velocity.y, -0.5, epsilon = 1e-6);
        assert_relative_eq!(body.position.y, 9.95, epsilon = 1e-5);
        assert_eq!(body.acceleration, Vec3::ZERO);
    }

    #[test]
    fn test_static_body_ignores_force_and_integration() {
        let mut body = Body::new_static(Vec3::new(1.0, 2.0, 3.0)).with_velocity(Vec3::X);
        body.apply_force(Vec3::splat(100.0));
        body.integrate(1.0);

        assert_eq!(body.position, Vec3::new(1.0, 2.0, 3.0));
        assert_eq!(body.velocity, Vec3::X);
        assert_eq!(body.acceleration, Vec3::ZERO);
    }
}
