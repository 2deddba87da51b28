use std::fs;
use std::path::Path;

const KERNEL: &str = "src/shaders/collision_detect.wgsl";
const COMMON: &str = "src/shaders/common/types.wgsl";

#[test]
fn test_shader_files_exist() {
    for path in [KERNEL, COMMON] {
        assert!(Path::new(path).exists(), "Shader file should exist at {:?}", path);
    }
}

#[test]
fn test_kernel_bindings() {
    let source = fs::read_to_string(KERNEL).expect("Failed to read kernel");

    assert!(source.contains("@group(0) @binding(0) var<uniform> params: CollisionParams"));
    assert!(source.contains("@group(0) @binding(1) var<storage, read> shapes: array<ShapeDescriptor>"));
    assert!(source.contains("@group(0) @binding(2) var<storage, read_write> collision_matrix: array<u32>"));
    assert!(source.contains("fn detect_collisions"));
}

#[test]
fn test_kernel_writes_both_triangles() {
    let source = fs::read_to_string(KERNEL).expect("Failed to read kernel");

    assert!(source.contains("i >= j"), "Kernel should only evaluate i < j");
    assert!(source.contains("collision_matrix[i * params.capacity + j]"));
    assert!(source.contains("collision_matrix[j * params.capacity + i]"));
}

#[test]
fn test_common_layout_matches_host_tags() {
    let source = fs::read_to_string(COMMON).expect("Failed to read common types");

    assert!(source.contains("const SHAPE_CIRCLE: u32 = 0u;"));
    assert!(source.contains("const SHAPE_BOX: u32 = 1u;"));
    assert!(source.contains("position: vec3<f32>"));
    assert!(source.contains("extent: f32"));
    assert!(source.contains("kind: u32"));
}
