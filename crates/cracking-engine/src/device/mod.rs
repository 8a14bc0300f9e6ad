//! GPU device + surface management.
//!
//! One [`Gpu`] per window:
//! - creates the wgpu Instance/Adapter/Device/Queue
//! - creates & configures the Surface
//! - hands out one [`GpuFrame`] per redraw

mod error;
mod frame;
mod gpu;
mod init;
mod surface;

pub use error::SurfaceErrorAction;
pub use frame::GpuFrame;
pub use gpu::Gpu;
pub use init::GpuInit;
