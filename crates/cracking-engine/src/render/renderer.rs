use crate::mesh::GeometryStore;

use super::{GpuMesh, MeshPipeline, RenderCtx, RenderTarget, ShaderError, ShaderPaths, SyncAction};

/// Draws one [`GeometryStore`] with the mesh pipeline.
///
/// Owns the pipeline and the GPU copy of the store; the store itself stays with
/// the caller.
pub struct MeshRenderer {
    pipeline: MeshPipeline,
    mesh: GpuMesh,
}

impl MeshRenderer {
    /// Builds the pipeline and uploads `store`.
    pub fn new(
        ctx: &RenderCtx<'_>,
        shaders: &ShaderPaths,
        store: &GeometryStore,
    ) -> Result<Self, ShaderError> {
        let pipeline = MeshPipeline::new(ctx, shaders)?;
        let mesh = GpuMesh::upload(ctx.device, store);
        Ok(Self { pipeline, mesh })
    }

    /// Re-uploads whatever changed in `store` since the last upload.
    pub fn sync(&mut self, ctx: &RenderCtx<'_>, store: &GeometryStore) -> SyncAction {
        self.mesh.sync(ctx.device, ctx.queue, store)
    }

    #[inline]
    pub fn mesh(&self) -> &GpuMesh {
        &self.mesh
    }

    /// Draws on top of whatever `target` already holds.
    pub fn render(&self, target: &mut RenderTarget<'_>) {
        let mut rpass = target.encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
            label: Some("cracking mesh pass"),
            color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                view: target.color_view,
                resolve_target: None,
                ops: wgpu::Operations {
                    load: wgpu::LoadOp::Load,
                    store: wgpu::StoreOp::Store,
                },
                depth_slice: None,
            })],
            depth_stencil_attachment: None,
            timestamp_writes: None,
            occlusion_query_set: None,
            multiview_mask: None,
        });

        rpass.set_pipeline(self.pipeline.raw());
        self.mesh.draw(&mut rpass);
    }
}
