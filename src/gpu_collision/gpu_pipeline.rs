use super::buffer_manager::BufferManager;
use crate::{
    error::{PhysicsError, Result},
    gpu::GpuContext,
    shaders::{self, COLLISION_DETECT, COLLISION_ENTRY_POINT},
};
use wgpu::{BindGroup, BindGroupLayout, ComputePipeline};

pub struct GpuPipeline {
    bind_group: BindGroup,
    compute_pipeline: ComputePipeline,
}

impl GpuPipeline {
    pub fn new(gpu: &GpuContext, buffer_manager: &BufferManager) -> Result<Self> {
        let shader = shaders::load_shader(&gpu.device, COLLISION_DETECT).ok_or_else(|| {
            PhysicsError::InvalidConfiguration(format!("missing shader {COLLISION_DETECT}"))
        })?;
        let bind_group_layout = Self::create_bind_group_layout(gpu);
        let bind_group = Self::create_bind_group(gpu, &bind_group_layout, buffer_manager);
        let compute_pipeline = Self::create_compute_pipeline(gpu, &shader, &bind_group_layout);

        Ok(Self {
            bind_group,
            compute_pipeline,
        })
    }

    pub fn bind_group(&self) -> &BindGroup {
        &self.bind_group
    }

    pub fn compute_pipeline(&self) -> &ComputePipeline {
        &self.compute_pipeline
    }

    fn create_bind_group_layout(gpu: &GpuContext) -> BindGroupLayout {
        gpu.device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("Collision Bind Group Layout"),
            entries: &[
                wgpu::BindGroupLayoutEntry {
                    binding: 0,
                    visibility: wgpu::ShaderStages::COMPUTE,
                    ty: wgpu::BindingType::Buffer {
                        ty: wgpu::BufferBindingType::Uniform,
                        has_dynamic_offset: false,
                        min_binding_size: None,
                    },
                    count: None,
                },
                wgpu::BindGroupLayoutEntry {
                    binding: 1,
                    visibility: wgpu::ShaderStages::COMPUTE,
                    ty: wgpu::BindingType::Buffer {
                        ty: wgpu::BufferBindingType::Storage { read_only: true },
                        has_dynamic_offset: false,
                        min_binding_size: None,
                    },
                    count: None,
                },
                wgpu::BindGroupLayoutEntry {
                    binding: 2,
                    visibility: wgpu::ShaderStages::COMPUTE,
                    ty: wgpu::BindingType::Buffer {
                        ty: wgpu::BufferBindingType::Storage { read_only: false },
                        has_dynamic_offset: false,
                        min_binding_size: None,
                    },
                    count: None,
                },
            ],
        })
    }

    fn create_bind_group(
        gpu: &GpuContext,
        layout: &BindGroupLayout,
        buffer_manager: &BufferManager,
    ) -> BindGroup {
        gpu.device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("Collision Bind Group"),
            layout,
            entries: &[
                wgpu::BindGroupEntry {
                    binding: 0,
                    resource: buffer_manager.params_buffer().as_entire_binding(),
                },
                wgpu::BindGroupEntry {
                    binding: 1,
                    resource: buffer_manager.descriptors_buffer().as_entire_binding(),
                },
                wgpu::BindGroupEntry {
                    binding: 2,
                    resource: buffer_manager.matrix_buffer().as_entire_binding(),
                },
            ],
        })
    }

    fn create_compute_pipeline(
        gpu: &GpuContext,
        shader: &wgpu::ShaderModule,
        bind_group_layout: &BindGroupLayout,
    ) -> ComputePipeline {
        let pipeline_layout = gpu.device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("Collision Pipeline Layout"),
            bind_group_layouts: &[bind_group_layout],
            push_constant_ranges: &[],
        });

        gpu.device.create_compute_pipeline(&wgpu::ComputePipelineDescriptor {
            label: Some("Collision Detect Pipeline"),
            layout: Some(&pipeline_layout),
            module: shader,
            entry_point: Some(COLLISION_ENTRY_POINT),
            compilation_options: wgpu::PipelineCompilationOptions::default(),
            cache: None,
        })
    }
}
