use super::gpu_pipeline::GpuPipeline;
use crate::gpu::GpuContext;

/// Matches `@workgroup_size(8, 8, 1)` in collision_detect.wgsl.
const WORKGROUP_SIZE: u32 = 8;

pub struct ComputeExecutor;

impl ComputeExecutor {
    pub fn new() -> Self {
        Self
    }

    /// Evaluates every `(i, j)` pair of the first `num_colliders` slots and
    /// blocks until the GPU has finished.
    pub fn execute_detection(&self, gpu: &GpuContext, pipeline: &GpuPipeline, num_colliders: u32) {
        let mut encoder = gpu.device.create_command_encoder(&wgpu::CommandEncoderDescriptor {
            label: Some("Collision Detect Encoder"),
        });
        self.dispatch_compute_pass(&mut encoder, pipeline, num_colliders);
        self.submit_and_wait(gpu, encoder);
    }

    fn dispatch_compute_pass(
        &self,
        encoder: &mut wgpu::CommandEncoder,
        pipeline: &GpuPipeline,
        num_colliders: u32,
    ) {
        let mut compute_pass = encoder.begin_compute_pass(&wgpu::ComputePassDescriptor {
            label: Some("Collision Detect Pass"),
            timestamp_writes: None,
        });

        compute_pass.set_pipeline(pipeline.compute_pipeline());
        compute_pass.set_bind_group(0, pipeline.bind_group(), &[]);

        let workgroups = Self::calculate_workgroups(num_colliders);
        compute_pass.dispatch_workgroups(workgroups, workgroups, 1);
    }

    fn calculate_workgroups(num_colliders: u32) -> u32 {
        num_colliders.div_ceil(WORKGROUP_SIZE)
    }

    fn submit_and_wait(&self, gpu: &GpuContext, encoder: wgpu::CommandEncoder) {
        gpu.queue.submit(Some(encoder.finish()));
        gpu.device.poll(wgpu::Maintain::Wait);
    }
}

impl Default for ComputeExecutor {
    fn default() -> Self {
        Self::new()
    }
}
