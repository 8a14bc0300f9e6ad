/// Number of per-vertex attributes (position, color).
pub const ATTRIBUTES_COUNT: usize = 2;

/// Float components per attribute.
pub const COMPONENTS: usize = 3;

/// Floats per vertex in the interleaved stream.
pub const STRIDE: usize = ATTRIBUTES_COUNT * COMPONENTS;

/// Float offset of the position inside a vertex.
pub const POSITION_OFFSET: usize = 0;

/// Float offset of the color inside a vertex.
pub const COLOR_OFFSET: usize = COMPONENTS;

const FLOAT_BYTES: u64 = std::mem::size_of::<f32>() as u64;

/// One shader-visible attribute of the interleaved stream.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct AttributeDesc {
    /// Shader input location.
    pub location: u32,
    /// Number of `f32` components.
    pub components: u32,
    /// Byte offset inside a vertex.
    pub offset: u64,
}

/// Backend-neutral description of the attribute stream.
///
/// Attribute `i` sits at location `i` and byte offset `i * 3 * size_of::<f32>()`;
/// vertices are tightly packed with `stride` bytes each.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct VertexLayout {
    pub stride: u64,
    pub attributes: [AttributeDesc; ATTRIBUTES_COUNT],
}

impl VertexLayout {
    pub const fn interleaved() -> Self {
        Self {
            stride: STRIDE as u64 * FLOAT_BYTES,
            attributes: [
                AttributeDesc {
                    location: 0,
                    components: COMPONENTS as u32,
                    offset: POSITION_OFFSET as u64 * FLOAT_BYTES,
                },
                AttributeDesc {
                    location: 1,
                    components: COMPONENTS as u32,
                    offset: COLOR_OFFSET as u64 * FLOAT_BYTES,
                },
            ],
        }
    }

    /// Shader locations fed by this layout.
    pub fn locations(&self) -> impl Iterator<Item = u32> + '_ {
        self.attributes.iter().map(|a| a.location)
    }
}
