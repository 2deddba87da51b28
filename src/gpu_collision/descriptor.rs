use crate::{
    body::Body,
    collider::{Collider, Shape, ShapeKind},
    math::max_extent,
};
use bytemuck::{Pod, Zeroable};

/// One collider flattened for the kernel (32 bytes).
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct ShapeDescriptor {
    pub position: [f32; 3],
    /// Circle radius, or the largest half extent of a box.
    pub extent: f32,
    pub kind: u32,
    _padding: [u32; 3],
}

const _: () = assert!(std::mem::size_of::<ShapeDescriptor>() == 32);

impl ShapeDescriptor {
    /// Snapshot of `collider` at `body`'s current position. Boxes collapse to
    /// a cube of half side `max(half_extents)`, a superset of the real box.
    pub fn encode(collider: &Collider, body: &Body) -> Self {
        let position = collider.world_position(body).to_array();
        match collider.shape {
            Shape::Circle { radius } => Self::new(position, radius, ShapeKind::Circle),
            Shape::Box { half_extents } => {
                Self::new(position, max_extent(half_extents), ShapeKind::Box)
            }
        }
    }

    pub fn new(position: [f32; 3], extent: f32, kind: ShapeKind) -> Self {
        Self {
            position,
            extent,
            kind: kind as u32,
            _padding: [0; 3],
        }
    }

    pub fn is_circle(&self) -> bool {
        self.kind == ShapeKind::Circle as u32
    }
}

#[repr(C)]
#[derive(Copy, Clone, Debug, Pod, Zeroable)]
pub struct CollisionParams {
    pub num_colliders: u32,
    /// Row stride of the collision matrix.
    pub capacity: u32,
    _padding: [u32; 2],
}

const _: () = assert!(std::mem::size_of::<CollisionParams>() == 16);

impl CollisionParams {
    pub fn new(num_colliders: u32, capacity: u32) -> Self {
        Self {
            num_colliders,
            capacity,
            _padding: [0; 2],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{arena::Arena, math::Vec3};

    #[test]
    fn test_box_encodes_largest_half_extent() {
        let mut bodies = Arena::new();
        let body = Body::new_static(Vec3::new(1.0, 2.0, 3.0));
        let handle = bodies.insert(body);
        let collider = Collider::cuboid(handle, Vec3::new(10.0, 1.0, 4.0));

        let descriptor = ShapeDescriptor::encode(&collider, &body);
        assert_eq!(descriptor.position, [1.0, 2.0, 3.0]);
        assert_eq!(descriptor.extent, 10.0);
        assert_eq!(descriptor.kind, 1);
        assert!(!descriptor.is_circle());
    }

    #[test]
    fn test_circle_encodes_radius() {
        let mut bodies = Arena::new();
        let body = Body::new(Vec3::ZERO, 1.0);
        let collider = Collider::circle(bodies.insert(body), 0.75);

        let descriptor = ShapeDescriptor::encode(&collider, &body);
        assert_eq!(descriptor.extent, 0.75);
        assert!(descriptor.is_circle());
    }
}
