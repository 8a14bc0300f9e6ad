//! GPU rendering subsystem.
//!
//! Turns a finished [`GeometryStore`](crate::mesh::GeometryStore) into GPU buffers
//! and draws it with a single WGSL pipeline.
//!
//! Convention:
//! - positions are clip-space coordinates, used as-is by the vertex shader
//! - one indexed triangle-list draw per frame
//!
//! Shader sources are checked with naga (parse, validate, stage interface)
//! before wgpu ever sees them, so bad shaders surface as [`ShaderError`] instead
//! of a device-level validation panic.

mod ctx;
mod error;
mod gpu_mesh;
mod pipeline;
mod renderer;
mod shader;

pub use ctx::{RenderCtx, RenderTarget};
pub use error::ShaderError;
pub use gpu_mesh::{vertex_buffer_layout, GpuMesh, SyncAction};
pub use pipeline::MeshPipeline;
pub use renderer::MeshRenderer;
pub use shader::{link, CompiledShader, ShaderPaths, ShaderSource, ShaderStage};
