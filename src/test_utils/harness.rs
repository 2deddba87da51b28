use crate::{error::PhysicsError, gpu::GpuContext, gpu_collision::GpuCollisionBackend};
use pollster::block_on;

/// GPU access for tests and tools. Machines without an adapter get `None`
/// instead of an error so GPU checks can be skipped rather than failed.
pub struct TestHarness {
    pub gpu: GpuContext,
}

impl TestHarness {
    pub async fn new() -> Option<Self> {
        init_logging();
        match GpuContext::new().await {
            Ok(gpu) => Some(Self { gpu }),
            Err(PhysicsError::AdapterUnavailable) => {
                log::warn!("No GPU adapter available, skipping GPU checks");
                None
            }
            Err(err) => {
                log::warn!("GPU device unavailable ({}), skipping GPU checks", err);
                None
            }
        }
    }

    pub fn new_blocking() -> Option<Self> {
        block_on(Self::new())
    }

    /// Backend on a fresh context; `None` when no GPU is present.
    pub fn collision_backend(max_colliders: u32) -> Option<GpuCollisionBackend> {
        let harness = Self::new_blocking()?;
        match GpuCollisionBackend::with_context(harness.gpu, max_colliders) {
            Ok(backend) => Some(backend),
            Err(err) => {
                log::warn!("GPU collision backend unavailable ({}), skipping", err);
                None
            }
        }
    }
}

pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}
