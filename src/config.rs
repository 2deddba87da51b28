use crate::math::Vec3;

pub const DEFAULT_TIME_STEP: f32 = 1.0 / 60.0;
pub const DEFAULT_GRAVITY: Vec3 = Vec3::new(0.0, -9.81, 0.0);
pub const DEFAULT_GPU_CAPACITY: u32 = 1024;

/// Which narrow-phase a `World` runs when it has a GPU backend attached.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Default)]
pub enum DetectionBackend {
    #[default]
    Cpu,
    Gpu,
}

/// Construction-time settings for a `World`.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct WorldConfig {
    /// Informational; `World::update` integrates with the caller's delta.
    pub time_step: f32,
    pub gravity: Vec3,
    pub backend: DetectionBackend,
    /// Collider slots `World::init_gpu` allocates.
    pub gpu_capacity: u32,
}

impl WorldConfig {
    pub fn new(time_step: f32) -> Self {
        Self {
            time_step,
            ..Self::default()
        }
    }

    pub fn with_gravity(mut self, gravity: Vec3) -> Self {
        self.gravity = gravity;
        self
    }

    pub fn with_time_step(mut self, time_step: f32) -> Self {
        self.time_step = time_step;
        self
    }

    pub fn with_backend(mut self, backend: DetectionBackend) -> Self {
        self.backend = backend;
        self
    }

    pub fn with_gpu_capacity(mut self, gpu_capacity: u32) -> Self {
        self.gpu_capacity = gpu_capacity;
        self
    }
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            time_step: DEFAULT_TIME_STEP,
            gravity: DEFAULT_GRAVITY,
            backend: DetectionBackend::Cpu,
            gpu_capacity: DEFAULT_GPU_CAPACITY,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = WorldConfig::default();
        assert_eq!(config.gravity, Vec3::new(0.0, -9.81, 0.0));
        assert_eq!(config.backend, DetectionBackend::Cpu);
        assert_eq!(config.gpu_capacity, 1024);
    }

    #[test]
    fn test_builder_overrides_only_named_fields() {
        let config = WorldConfig::new(0.01)
            .with_gravity(Vec3::ZERO)
            .with_backend(DetectionBackend::Gpu);
        assert_eq!(config.time_step, 0.01);
        assert_eq!(config.gravity, Vec3::ZERO);
        assert_eq!(config.backend, DetectionBackend::Gpu);
        assert_eq!(config.gpu_capacity, DEFAULT_GPU_CAPACITY);
    }
}
