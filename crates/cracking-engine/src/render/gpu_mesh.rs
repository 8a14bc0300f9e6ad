use wgpu::util::DeviceExt;

use crate::logging::{self, Status};
use crate::mesh::{GeometryStore, VertexLayout, ATTRIBUTES_COUNT, COMPONENTS};

const LAYOUT: VertexLayout = VertexLayout::interleaved();

// Every attribute is uploaded as `Float32x3`.
const _: () = assert!(COMPONENTS == 3);

const ATTRS: [wgpu::VertexAttribute; ATTRIBUTES_COUNT] = [attribute(0), attribute(1)];

const fn attribute(i: usize) -> wgpu::VertexAttribute {
    let desc = LAYOUT.attributes[i];
    wgpu::VertexAttribute {
        format: wgpu::VertexFormat::Float32x3,
        offset: desc.offset,
        shader_location: desc.location,
    }
}

/// wgpu form of [`VertexLayout::interleaved`].
pub fn vertex_buffer_layout() -> wgpu::VertexBufferLayout<'static> {
    wgpu::VertexBufferLayout {
        array_stride: LAYOUT.stride,
        step_mode: wgpu::VertexStepMode::Vertex,
        attributes: &ATTRS,
    }
}

/// What [`GpuMesh::sync`] had to do.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum SyncAction {
    /// GPU copy already matched the store.
    Unchanged,
    /// Attribute data rewritten in place.
    Rewritten,
    /// Buffers recreated because the store grew.
    Recreated,
}

/// GPU copy of a [`GeometryStore`]: one vertex buffer, one `u32` index buffer.
pub struct GpuMesh {
    vertex_buffer: wgpu::Buffer,
    index_buffer: wgpu::Buffer,

    vertex_count: usize,
    index_count: u32,

    /// Store generation the buffers were last written from.
    generation: u64,
}

impl GpuMesh {
    /// Uploads the store's attribute and index streams.
    pub fn upload(device: &wgpu::Device, store: &GeometryStore) -> Self {
        let vertex_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("cracking mesh vbo"),
            contents: bytemuck::cast_slice(store.attributes()),
            usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
        });

        let index_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("cracking mesh ibo"),
            contents: bytemuck::cast_slice(store.indices()),
            usage: wgpu::BufferUsages::INDEX | wgpu::BufferUsages::COPY_DST,
        });

        logging::report(
            Status::Success,
            "load_primitives_in_gpu",
            format_args!(
                "{} vertices / {} indices uploaded",
                store.vertex_count(),
                store.index_count()
            ),
        );

        Self {
            vertex_buffer,
            index_buffer,
            vertex_count: store.vertex_count(),
            index_count: store.index_count() as u32,
            generation: store.generation(),
        }
    }

    /// True if the GPU buffers reflect the store's current contents.
    pub fn is_current(&self, store: &GeometryStore) -> bool {
        self.generation == store.generation()
            && self.vertex_count == store.vertex_count()
            && self.index_count as usize == store.index_count()
    }

    /// Brings the GPU copy up to date with `store`.
    ///
    /// Recolors only touch attribute data and are written in place; any change in
    /// vertex or index count recreates both buffers.
    pub fn sync(
        &mut self,
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        store: &GeometryStore,
    ) -> SyncAction {
        if self.is_current(store) {
            return SyncAction::Unchanged;
        }

        if self.vertex_count == store.vertex_count()
            && self.index_count as usize == store.index_count()
        {
            queue.write_buffer(&self.vertex_buffer, 0, bytemuck::cast_slice(store.attributes()));
            self.generation = store.generation();
            log::debug!("mesh attributes rewritten (generation {})", self.generation);
            return SyncAction::Rewritten;
        }

        *self = Self::upload(device, store);
        SyncAction::Recreated
    }

    #[inline]
    pub fn vertex_count(&self) -> usize {
        self.vertex_count
    }

    #[inline]
    pub fn index_count(&self) -> u32 {
        self.index_count
    }

    /// Records one indexed triangle-list draw. Pipeline must already be set.
    pub fn draw(&self, pass: &mut wgpu::RenderPass<'_>) {
        if self.index_count == 0 {
            return;
        }
        pass.set_vertex_buffer(0, self.vertex_buffer.slice(..));
        pass.set_index_buffer(self.index_buffer.slice(..), wgpu::IndexFormat::Uint32);
        pass.draw_indexed(0..self.index_count, 0, 0..1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wgpu_layout_mirrors_mesh_layout() {
        let layout = vertex_buffer_layout();
        assert_eq!(layout.array_stride, 24);
        assert_eq!(layout.step_mode, wgpu::VertexStepMode::Vertex);
        assert_eq!(layout.attributes.len(), 2);

        let position = layout.attributes[0];
        assert_eq!(position.shader_location, 0);
        assert_eq!(position.offset, 0);
        assert_eq!(position.format, wgpu::VertexFormat::Float32x3);

        let color = layout.attributes[1];
        assert_eq!(color.shader_location, 1);
        assert_eq!(color.offset, 12);
    }

    #[test]
    fn attributes_cover_the_stride() {
        let layout = vertex_buffer_layout();
        let covered: u64 = layout.attributes.iter().map(|a| a.format.size()).sum();
        assert_eq!(covered, layout.array_stride);
    }
}
