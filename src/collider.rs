//! Collision shapes attached to bodies.
//!
//! A collider never stores a position of its own: every test reads the
//! current position of the body it references. Detection and response are
//! dispatched over the ordered pair of shape kinds:
//!
//! | A \ B  | Circle            | Box               |
//! |--------|-------------------|-------------------|
//! | Circle | exact, resolved   | exact, resolved   |
//! | Box    | exact, resolved   | AABB, no response |
//!
//! Box–box response is intentionally absent; those pairs are reported by
//! detection and left alone by resolution.

use crate::{
    arena::Handle,
    body::Body,
    math::{aabb_overlap, closest_point_on_aabb, Vec3},
};

pub type BodyHandle = Handle<Body>;

/// Fraction of closing speed returned as separating speed.
pub const RESTITUTION: f32 = 0.8;

#[derive(Copy, Clone, Debug, PartialEq)]
pub enum Shape {
    /// Circle in the plane, sphere in space; the tests are the same.
    Circle { radius: f32 },
    /// Axis-aligned box given by its half extents.
    Box { half_extents: Vec3 },
}

/// Tag written into GPU shape descriptors.
#[repr(u32)]
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ShapeKind {
    Circle = 0,
    Box = 1,
}

impl Shape {
    pub fn kind(&self) -> ShapeKind {
        match self {
            Shape::Circle { .. } => ShapeKind::Circle,
            Shape::Box { .. } => ShapeKind::Box,
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Collider {
    pub body: BodyHandle,
    pub shape: Shape,
    /// Triggers are detected but never pushed or bounced.
    pub is_trigger: bool,
}

/// Separation data for a touching pair. `normal` points from B towards A.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct ContactGeometry {
    pub normal: Vec3,
    pub penetration: f32,
}

impl ContactGeometry {
    fn flipped(self) -> Self {
        Self {
            normal: -self.normal,
            penetration: self.penetration,
        }
    }
}

impl Collider {
    pub fn circle(body: BodyHandle, radius: f32) -> Self {
        Self {
            body,
            shape: Shape::Circle { radius },
            is_trigger: false,
        }
    }

    pub fn cuboid(body: BodyHandle, half_extents: Vec3) -> Self {
        Self {
            body,
            shape: Shape::Box { half_extents },
            is_trigger: false,
        }
    }

    pub fn with_trigger(mut self, is_trigger: bool) -> Self {
        self.is_trigger = is_trigger;
        self
    }

    pub fn world_position(&self, body: &Body) -> Vec3 {
        body.position
    }

    /// `body` must be the body this collider references, `other_body` the one
    /// `other` references.
    pub fn check_collision(&self, body: &Body, other: &Collider, other_body: &Body) -> bool {
        let pos_a = self.world_position(body);
        let pos_b = other.world_position(other_body);

        match (self.shape, other.shape) {
            (Shape::Circle { radius: ra }, Shape::Circle { radius: rb }) => {
                circle_circle_overlap(pos_a, ra, pos_b, rb)
            }
            (Shape::Circle { radius }, Shape::Box { half_extents }) => {
                circle_box_overlap(pos_a, radius, pos_b, half_extents)
            }
            (Shape::Box { half_extents }, Shape::Circle { radius }) => {
                circle_box_overlap(pos_b, radius, pos_a, half_extents)
            }
            (Shape::Box { half_extents: ha }, Shape::Box { half_extents: hb }) => {
                aabb_overlap(pos_a, ha, pos_b, hb)
            }
        }
    }

    /// Pushes the pair apart and applies a restitution impulse along the
    /// contact normal. Mutates both bodies in place.
    pub fn resolve_collision(&self, body: &mut Body, other: &Collider, other_body: &mut Body) {
        if self.is_trigger || other.is_trigger {
            return;
        }

        let Some(contact) = self.contact_geometry(body, other, other_body) else {
            return;
        };
        apply_response(body, other_body, contact);
    }

    /// `None` for coincident centres, separated pairs and every box–box pair.
    pub fn contact_geometry(
        &self,
        body: &Body,
        other: &Collider,
        other_body: &Body,
    ) -> Option<ContactGeometry> {
        let pos_a = self.world_position(body);
        let pos_b = other.world_position(other_body);

        match (self.shape, other.shape) {
            (Shape::Circle { radius: ra }, Shape::Circle { radius: rb }) => {
                circle_circle_contact(pos_a, ra, pos_b, rb)
            }
            (Shape::Circle { radius }, Shape::Box { half_extents }) => {
                circle_box_contact(pos_a, radius, pos_b, half_extents)
            }
            (Shape::Box { half_extents }, Shape::Circle { radius }) => {
                circle_box_contact(pos_b, radius, pos_a, half_extents).map(ContactGeometry::flipped)
            }
            (Shape::Box { .. }, Shape::Box { .. }) => None,
        }
    }
}

pub fn circle_circle_overlap(pos_a: Vec3, ra: f32, pos_b: Vec3, rb: f32) -> bool {
    let radii = ra + rb;
    pos_a.distance_squared(pos_b) <= radii * radii
}

pub fn circle_box_overlap(center: Vec3, radius: f32, box_center: Vec3, half_extents: Vec3) -> bool {
    let closest = closest_point_on_aabb(center, box_center, half_extents);
    center.distance_squared(closest) <= radius * radius
}

fn circle_circle_contact(pos_a: Vec3, ra: f32, pos_b: Vec3, rb: f32) -> Option<ContactGeometry> {
    let separation = pos_a - pos_b;
    let distance = separation.length();
    if distance == 0.0 || distance > ra + rb {
        return None;
    }

    Some(ContactGeometry {
        normal: separation / distance,
        penetration: (ra + rb) - distance,
    })
}

/// Normal points from the box towards the circle.
fn circle_box_contact(
    center: Vec3,
    radius: f32,
    box_center: Vec3,
    half_extents: Vec3,
) -> Option<ContactGeometry> {
    let closest = closest_point_on_aabb(center, box_center, half_extents);
    let separation = center - closest;
    let distance = separation.length();
    // Centre inside the box has no defined normal.
    if distance == 0.0 || distance > radius {
        return None;
    }

    Some(ContactGeometry {
        normal: separation / distance,
        penetration: radius - distance,
    })
}

fn apply_response(a: &mut Body, b: &mut Body, contact: ContactGeometry) {
    let ContactGeometry { normal, penetration } = contact;

    match (a.is_static, b.is_static) {
        (false, false) => {
            let half = normal * (penetration * 0.5);
            a.position += half;
            b.position -= half;
        }
        (false, true) => a.position += normal * penetration,
        (true, false) => b.position -= normal * penetration,
        (true, true) => return,
    }

    let relative_velocity = (a.velocity - b.velocity).dot(normal);
    if relative_velocity > 0.0 {
        return;
    }

    let impulse = -(1.0 + RESTITUTION) * relative_velocity;
    if !a.is_static {
        a.velocity += normal * (impulse / a.mass);
    }
    if !b.is_static {
        b.velocity -= normal * (impulse / b.mass);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::arena::Arena;
    use approx::assert_relative_eq;

    fn handles() -> (BodyHandle, BodyHandle) {
        let mut arena = Arena::new();
        (arena.insert(Body::new(Vec3::ZERO, 1.0)), arena.insert(Body::new(Vec3::ZERO, 1.0)))
    }

    #[test]
    fn test_circle_circle_boundary() {
        let (ha, hb) = handles();
        let a = Collider::circle(ha, 1.0);
        let b = Collider::circle(hb, 1.0);
        let origin = Body::new(Vec3::ZERO, 1.0);

        assert!(a.check_collision(&origin, &b, &Body::new(Vec3::new(1.9, 0.0, 0.0), 1.0)));
        assert!(a.check_collision(&origin, &b, &Body::new(Vec3::new(2.0, 0.0, 0.0), 1.0)));
        assert!(!a.check_collision(&origin, &b, &Body::new(Vec3::new(2.1, 0.0, 0.0), 1.0)));
    }

    #[test]
    fn test_box_box_has_no_response() {
        let (ha, hb) = handles();
        let a = Collider::cuboid(ha, Vec3::ONE);
        let b = Collider::cuboid(hb, Vec3::ONE);
        let mut body_a = Body::new(Vec3::ZERO, 1.0).with_velocity(Vec3::X);
        let mut body_b = Body::new(Vec3::new(1.0, 0.0, 0.0), 1.0).with_velocity(-Vec3::X);
        let (before_a, before_b) = (body_a, body_b);

        assert!(a.check_collision(&body_a, &b, &body_b));
        a.resolve_collision(&mut body_a, &b, &mut body_b);
        assert_eq!(body_a, before_a);
        assert_eq!(body_b, before_b);
    }

    #[test]
    fn test_box_circle_normal_points_from_circle_to_box() {
        let (ha, hb) = handles();
        let ground = Collider::cuboid(ha, Vec3::new(10.0, 1.0, 10.0));
        let ball = Collider::circle(hb, 1.0);
        let ground_body = Body::new_static(Vec3::ZERO);
        let ball_body = Body::new(Vec3::new(0.0, 1.5, 0.0), 1.0);

        let contact = ground.contact_geometry(&ground_body, &ball, &ball_body).unwrap();
        assert_relative_eq!(contact.normal.y, -1.0);
        assert_relative_eq!(contact.penetration, 0.5);
    }

    #[test]
    fn test_coincident_circles_are_skipped() {
        let (ha, hb) = handles();
        let a = Collider::circle(ha, 1.0);
        let b = Collider::circle(hb, 1.0);
        let mut body_a = Body::new(Vec3::ZERO, 1.0).with_velocity(Vec3::Y);
        let mut body_b = Body::new(Vec3::ZERO, 1.0);
        let (before_a, before_b) = (body_a, body_b);

        a.resolve_collision(&mut body_a, &b, &mut body_b);
        assert_eq!(body_a, before_a);
        assert_eq!(body_b, before_b);
    }

    #[test]
    fn test_separated_circles_are_left_alone() {
        let (ha, hb) = handles();
        let a = Collider::circle(ha, 1.0);
        let b = Collider::circle(hb, 0.3);
        // Closing on each other, but 1.54 apart with radii summing to 1.3.
        let mut body_a = Body::new(Vec3::ZERO, 1.0).with_velocity(Vec3::X);
        let mut body_b = Body::new(Vec3::new(1.54, 0.0, 0.0), 1.0).with_velocity(-Vec3::X);
        let (before_a, before_b) = (body_a, body_b);

        assert!(a.contact_geometry(&body_a, &b, &body_b).is_none());
        a.resolve_collision(&mut body_a, &b, &mut body_b);
        assert_eq!(body_a, before_a);
        assert_eq!(body_b, before_b);
    }
}
