//! Data-parallel narrow-phase on wgpu.
//!
//! Colliders are flattened into a fixed-capacity array of
//! [`ShapeDescriptor`]s. One dispatch evaluates every `(i, j)` pair with
//! `i < j` and writes a symmetric `capacity × capacity` hit matrix; only the
//! upper triangle is read back.
//!
//! Slot `k` is the `k`-th collider passed to [`GpuCollisionBackend::add_collider`]
//! since the last [`GpuCollisionBackend::clear_colliders`]. This sequence is
//! independent of any `World`'s registration order; `World` re-registers its
//! own colliders each tick when it drives the backend.

mod buffer_manager;
mod compute_executor;
mod descriptor;
mod gpu_pipeline;

pub use descriptor::{CollisionParams, ShapeDescriptor};

use self::{buffer_manager::BufferManager, compute_executor::ComputeExecutor, gpu_pipeline::GpuPipeline};
use crate::{
    body::Body,
    collider::Collider,
    error::{PhysicsError, Result},
    gpu::GpuContext,
};

pub struct GpuCollisionBackend {
    gpu: GpuContext,
    pipeline: GpuPipeline,
    buffer_manager: BufferManager,
    compute_executor: ComputeExecutor,
    descriptors: Vec<ShapeDescriptor>,
    max_colliders: u32,
    dropped: u64,
}

impl GpuCollisionBackend {
    pub async fn new(max_colliders: u32) -> Result<Self> {
        let gpu = GpuContext::new().await?;
        Self::with_context(gpu, max_colliders)
    }

    pub fn new_blocking(max_colliders: u32) -> Result<Self> {
        pollster::block_on(Self::new(max_colliders))
    }

    pub fn with_context(gpu: GpuContext, max_colliders: u32) -> Result<Self> {
        Self::validate_capacity(&gpu, max_colliders)?;

        let buffer_manager = BufferManager::new(&gpu, max_colliders);
        let pipeline = GpuPipeline::new(&gpu, &buffer_manager)?;
        let compute_executor = ComputeExecutor::new();

        log::info!("GPU collision backend ready for {} colliders", max_colliders);

        Ok(Self {
            gpu,
            pipeline,
            buffer_manager,
            compute_executor,
            descriptors: Vec::with_capacity(max_colliders as usize),
            max_colliders,
            dropped: 0,
        })
    }

    fn validate_capacity(gpu: &GpuContext, max_colliders: u32) -> Result<()> {
        let slots = max_colliders.max(1) as u64;
        let matrix_bytes = slots * slots * std::mem::size_of::<u32>() as u64;
        let limits = gpu.device.limits();

        if matrix_bytes > limits.max_storage_buffer_binding_size as u64
            || matrix_bytes > limits.max_buffer_size
        {
            return Err(PhysicsError::InvalidConfiguration(format!(
                "collision matrix for {max_colliders} colliders needs {matrix_bytes} bytes, \
                 device allows {}",
                limits.max_storage_buffer_binding_size
            )));
        }
        Ok(())
    }

    /// Appends `collider` (at `body`'s current position) and returns its slot.
    /// When the backend is full the add is dropped and reported.
    pub fn add_collider(&mut self, collider: &Collider, body: &Body) -> Result<u32> {
        if self.descriptors.len() >= self.max_colliders as usize {
            self.dropped += 1;
            log::warn!(
                "GPU collider capacity {} reached, dropping add ({} dropped so far)",
                self.max_colliders,
                self.dropped
            );
            return Err(PhysicsError::CapacityExceeded {
                resource: "GPU collider",
                limit: self.max_colliders as usize,
            });
        }

        let slot = self.descriptors.len() as u32;
        self.descriptors.push(ShapeDescriptor::encode(collider, body));
        Ok(slot)
    }

    /// Forgets every registered collider. GPU buffers are kept for reuse.
    pub fn clear_colliders(&mut self) {
        self.descriptors.clear();
    }

    pub fn collider_count(&self) -> u32 {
        self.descriptors.len() as u32
    }

    pub fn max_colliders(&self) -> u32 {
        self.max_colliders
    }

    /// Adds rejected for lack of capacity since construction.
    pub fn dropped_count(&self) -> u64 {
        self.dropped
    }

    pub fn descriptors(&self) -> &[ShapeDescriptor] {
        &self.descriptors
    }

    /// Colliding slot pairs `(i, j)` with `i < j`, ordered by `i` then `j`.
    pub async fn detect_collisions_async(&self) -> Result<Vec<(u32, u32)>> {
        let n = self.collider_count();
        if n == 0 {
            return Ok(Vec::new());
        }

        self.buffer_manager.upload(&self.gpu, &self.descriptors);
        self.compute_executor.execute_detection(&self.gpu, &self.pipeline, n);
        let matrix = self.buffer_manager.read_matrix_rows(&self.gpu, n).await?;

        let pairs = upper_triangle_pairs(&matrix, n, self.max_colliders);
        log::debug!("GPU narrow-phase: {} colliders, {} pairs", n, pairs.len());
        Ok(pairs)
    }

    /// Blocking form of [`Self::detect_collisions_async`].
    pub fn detect_collisions(&self) -> Result<Vec<(u32, u32)>> {
        pollster::block_on(self.detect_collisions_async())
    }
}

fn upper_triangle_pairs(matrix: &[u32], n: u32, stride: u32) -> Vec<(u32, u32)> {
    let mut pairs = Vec::new();
    for i in 0..n {
        let row = (i * stride) as usize;
        for j in (i + 1)..n {
            if matrix[row + j as usize] != 0 {
                pairs.push((i, j));
            }
        }
    }
    pairs
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_upper_triangle_ignores_lower_and_diagonal() {
        // 3 active slots, stride 4. Lower triangle and diagonal hold garbage.
        #[rustfmt::skip]
        let matrix = [
            7, 1, 0, 9,
            1, 7, 1, 9,
            1, 1, 7, 9,
        ];
        assert_eq!(upper_triangle_pairs(&matrix, 3, 4), vec![(0, 1), (1, 2)]);
    }

    #[test]
    fn test_upper_triangle_empty() {
        assert!(upper_triangle_pairs(&[], 0, 4).is_empty());
    }
}
