pub mod benchmark;
pub mod harness;
pub mod scene;

pub use benchmark::{BenchmarkResults, BenchmarkTimer};
pub use harness::TestHarness;
pub use scene::{SceneBuilder, SceneConfig};
