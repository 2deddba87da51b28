pub mod arena;
pub mod body;
pub mod collider;
pub mod config;
pub mod contact;
pub mod cpu_ref;
pub mod error;
pub mod gpu;
pub mod gpu_collision;
pub mod math;
pub mod shaders;
pub mod test_utils;
pub mod world;

pub use body::Body;
pub use collider::{BodyHandle, Collider, Shape};
pub use config::{DetectionBackend, WorldConfig};
pub use contact::Contact;
pub use error::{PhysicsError, Result};
pub use gpu_collision::GpuCollisionBackend;
pub use world::{ColliderHandle, World};
