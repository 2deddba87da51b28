//! CPU reference for the GPU collision kernel.
//!
//! Applies the kernel's predicates to the same descriptor slice, so GPU
//! output can be checked pair-for-pair. Boxes are the encoded cubes here,
//! not the real AABBs the `World` narrow-phase uses.

use crate::{
    collider::{circle_box_overlap, circle_circle_overlap},
    gpu_collision::ShapeDescriptor,
    math::Vec3,
};

pub fn descriptors_overlap(a: &ShapeDescriptor, b: &ShapeDescriptor) -> bool {
    let pos_a = Vec3::from_array(a.position);
    let pos_b = Vec3::from_array(b.position);

    match (a.is_circle(), b.is_circle()) {
        (true, true) => circle_circle_overlap(pos_a, a.extent, pos_b, b.extent),
        (true, false) => circle_box_overlap(pos_a, a.extent, pos_b, Vec3::splat(b.extent)),
        (false, true) => circle_box_overlap(pos_b, b.extent, pos_a, Vec3::splat(a.extent)),
        (false, false) => {
            let reach = a.extent + b.extent;
            (pos_a - pos_b).abs().cmple(Vec3::splat(reach)).all()
        }
    }
}

/// Same contract as `GpuCollisionBackend::detect_collisions`.
pub fn detect_pairs(descriptors: &[ShapeDescriptor]) -> Vec<(u32, u32)> {
    let mut pairs = Vec::new();
    for (i, a) in descriptors.iter().enumerate() {
        for (j, b) in descriptors.iter().enumerate().skip(i + 1) {
            if descriptors_overlap(a, b) {
                pairs.push((i as u32, j as u32));
            }
        }
    }
    pairs
}
