use thiserror::Error;

pub type Result<T, E = PhysicsError> = std::result::Result<T, E>;

#[derive(Debug, Error)]
pub enum PhysicsError {
    #[error("no suitable GPU adapter found")]
    AdapterUnavailable,

    #[error("failed to request GPU device: {0}")]
    RequestDevice(#[from] wgpu::RequestDeviceError),

    #[error("failed to map readback buffer: {0}")]
    BufferMap(#[from] wgpu::BufferAsyncError),

    #[error("readback channel closed before the buffer was mapped")]
    ReadbackCancelled(#[from] futures::channel::oneshot::Canceled),

    #[error("{resource} capacity exceeded (limit={limit})")]
    CapacityExceeded { resource: &'static str, limit: usize },

    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),
}
