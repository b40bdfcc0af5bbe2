//! CPU rendition of the compute shaders, used by tests and benches to check
//! the simulation without a GPU.

pub mod kernels;
pub mod sim2d;

pub use sim2d::CpuSimulation;
