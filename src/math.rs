//! Vector primitives and the shape geometry shared by every detection path.
//!
//! `Vec3` is glam's; the free functions here are the axis-aligned helpers the
//! narrow-phase and the GPU kernel's CPU reference both build on.

pub use glam::Vec3;

/// Closest point to `point` on the axis-aligned box `center ± half_extents`.
pub fn closest_point_on_aabb(point: Vec3, center: Vec3, half_extents: Vec3) -> Vec3 {
    point.clamp(center - half_extents, center + half_extents)
}

/// Standard AABB overlap: touching faces count as overlapping.
pub fn aabb_overlap(center_a: Vec3, half_a: Vec3, center_b: Vec3, half_b: Vec3) -> bool {
    let min_a = center_a - half_a;
    let max_a = center_a + half_a;
    let min_b = center_b - half_b;
    let max_b = center_b + half_b;

    min_a.x <= max_b.x
        && max_a.x >= min_b.x
        && min_a.y <= max_b.y
        && max_a.y >= min_b.y
        && min_a.z <= max_b.z
        && max_a.z >= min_b.z
}

/// Largest component of an extent vector.
pub fn max_extent(half_extents: Vec3) -> f32 {
    half_extents.x.max(half_extents.y).max(half_extents.z)
}
