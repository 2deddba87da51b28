use std::collections::HashMap;

pub const COLLISION_DETECT: &str = "collision_detect";
pub const COLLISION_ENTRY_POINT: &str = "detect_collisions";

/// Prepends the shared type declarations to each kernel and caches the result.
pub struct ShaderBuilder {
    common_types: &'static str,
    shader_cache: HashMap<&'static str, String>,
}

impl ShaderBuilder {
    pub fn new() -> Self {
        Self {
            common_types: include_str!("common/types.wgsl"),
            shader_cache: HashMap::new(),
        }
    }

    pub fn get_shader(&mut self, name: &str) -> Option<&str> {
        let (key, specific) = match name {
            COLLISION_DETECT => (COLLISION_DETECT, include_str!("collision_detect.wgsl")),
            _ => return None,
        };

        let common_types = self.common_types;
        let source = self
            .shader_cache
            .entry(key)
            .or_insert_with(|| format!("{}\n\n{}", common_types, specific));
        Some(source.as_str())
    }
}

impl Default for ShaderBuilder {
    fn default() -> Self {
        Self::new()
    }
}

pub fn load_shader(device: &wgpu::Device, name: &str) -> Option<wgpu::ShaderModule> {
    let mut builder = ShaderBuilder::new();
    let source = builder.get_shader(name)?;

    Some(device.create_shader_module(wgpu::ShaderModuleDescriptor {
        label: Some(name),
        source: wgpu::ShaderSource::Wgsl(source.to_owned().into()),
    }))
}
