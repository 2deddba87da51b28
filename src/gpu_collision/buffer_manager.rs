use super::descriptor::{CollisionParams, ShapeDescriptor};
use crate::{error::Result, gpu::GpuContext};
use wgpu::{Buffer, BufferUsages};

/// GPU storage sized once for `capacity` colliders and reused every dispatch.
pub struct BufferManager {
    descriptors_buffer: Buffer,
    params_buffer: Buffer,
    matrix_buffer: Buffer,
    staging_buffer: Buffer,
    capacity: u32,
}

impl BufferManager {
    pub fn new(gpu: &GpuContext, capacity: u32) -> Self {
        // Zero-sized bindings are invalid; keep at least one slot.
        let slots = capacity.max(1) as u64;
        let descriptor_bytes = slots * std::mem::size_of::<ShapeDescriptor>() as u64;
        let matrix_bytes = slots * slots * std::mem::size_of::<u32>() as u64;

        let descriptors_buffer = gpu.create_buffer(
            "Shape Descriptors Buffer",
            descriptor_bytes,
            BufferUsages::STORAGE | BufferUsages::COPY_DST,
        );
        let params_buffer = gpu.create_buffer_init(
            "Collision Params Buffer",
            bytemuck::bytes_of(&CollisionParams::new(0, capacity)),
            BufferUsages::UNIFORM | BufferUsages::COPY_DST,
        );
        let matrix_buffer = gpu.create_buffer(
            "Collision Matrix Buffer",
            matrix_bytes,
            BufferUsages::STORAGE | BufferUsages::COPY_SRC,
        );
        let staging_buffer = gpu.create_buffer(
            "Collision Matrix Staging Buffer",
            matrix_bytes,
            BufferUsages::MAP_READ | BufferUsages::COPY_DST,
        );

        Self {
            descriptors_buffer,
            params_buffer,
            matrix_buffer,
            staging_buffer,
            capacity,
        }
    }

    pub fn descriptors_buffer(&self) -> &Buffer {
        &self.descriptors_buffer
    }

    pub fn params_buffer(&self) -> &Buffer {
        &self.params_buffer
    }

    pub fn matrix_buffer(&self) -> &Buffer {
        &self.matrix_buffer
    }

    pub fn upload(&self, gpu: &GpuContext, descriptors: &[ShapeDescriptor]) {
        debug_assert!(descriptors.len() <= self.capacity as usize);
        let params = CollisionParams::new(descriptors.len() as u32, self.capacity);
        gpu.queue.write_buffer(&self.params_buffer, 0, bytemuck::bytes_of(&params));
        if !descriptors.is_empty() {
            gpu.queue.write_buffer(&self.descriptors_buffer, 0, bytemuck::cast_slice(descriptors));
        }
    }

    /// Reads back the first `rows` rows of the collision matrix, each
    /// `capacity` entries wide.
    pub async fn read_matrix_rows(&self, gpu: &GpuContext, rows: u32) -> Result<Vec<u32>> {
        let size = rows as u64 * self.capacity as u64 * std::mem::size_of::<u32>() as u64;
        if size == 0 {
            return Ok(Vec::new());
        }

        self.copy_to_staging_buffer(gpu, size);
        self.read_from_staging_buffer(gpu, size).await
    }

    fn copy_to_staging_buffer(&self, gpu: &GpuContext, size: u64) {
        let mut encoder = gpu.device.create_command_encoder(&wgpu::CommandEncoderDescriptor {
            label: Some("Collision Matrix Copy Encoder"),
        });

        encoder.copy_buffer_to_buffer(&self.matrix_buffer, 0, &self.staging_buffer, 0, size);

        gpu.queue.submit(Some(encoder.finish()));
    }

    async fn read_from_staging_buffer(&self, gpu: &GpuContext, size: u64) -> Result<Vec<u32>> {
        let buffer_slice = self.staging_buffer.slice(..size);
        let (tx, rx) = futures::channel::oneshot::channel();

        buffer_slice.map_async(wgpu::MapMode::Read, move |result| {
            // Receiver only disappears if the caller gave up on the read.
            let _ = tx.send(result);
        });

        gpu.device.poll(wgpu::Maintain::Wait);
        rx.await??;

        let data = buffer_slice.get_mapped_range();
        let matrix: Vec<u32> = bytemuck::cast_slice(&data).to_vec();

        drop(data);
        self.staging_buffer.unmap();

        Ok(matrix)
    }
}
