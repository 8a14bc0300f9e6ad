use std::sync::atomic::{AtomicU64, Ordering};

use super::layout::{COLOR_OFFSET, COMPONENTS, POSITION_OFFSET, STRIDE};
use super::{Color, MeshError, Position, Stream};

static NEXT_STORE_ID: AtomicU64 = AtomicU64::new(1);

/// Process-unique identity of a [`GeometryStore`].
///
/// Objects carry the id of the store that built them so they cannot be applied
/// to another store by accident.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct StoreId(u64);

impl StoreId {
    fn next() -> Self {
        Self(NEXT_STORE_ID.fetch_add(1, Ordering::Relaxed))
    }
}

/// Fixed upper bounds for a [`GeometryStore`].
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct MeshCapacity {
    pub max_vertices: usize,
    pub max_indices: usize,
}

impl MeshCapacity {
    #[inline]
    pub const fn new(max_vertices: usize, max_indices: usize) -> Self {
        Self { max_vertices, max_indices }
    }

    /// Capacity expressed as a float budget for the attribute stream.
    ///
    /// Partial vertices are not representable, so the budget rounds down to a
    /// whole number of vertices.
    #[inline]
    pub const fn from_attribute_budget(floats: usize, max_indices: usize) -> Self {
        Self::new(floats / STRIDE, max_indices)
    }

    /// Both streams must stay addressable by `u32` indices and counts.
    pub fn check(self) -> Result<Self, MeshError> {
        let too_large = MeshError::CapacityTooLarge {
            max_vertices: self.max_vertices,
            max_indices: self.max_indices,
        };
        if u32::try_from(self.max_vertices).is_err() || u32::try_from(self.max_indices).is_err() {
            return Err(too_large);
        }
        match self.max_vertices.checked_mul(STRIDE) {
            Some(_) => Ok(self),
            None => Err(too_large),
        }
    }
}

impl Default for MeshCapacity {
    /// 512 attribute floats (85 vertices) and 512 indices.
    fn default() -> Self {
        Self::from_attribute_budget(512, 512)
    }
}

/// How the primitive factory treats corners that coincide with existing vertices.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq)]
pub enum VertexSharing {
    /// Every corner appends a fresh vertex. Index resolution still goes through
    /// the exact-position lookup, so a corner that coincides with an older
    /// vertex is indexed to the older one and its own vertex is left unreferenced.
    #[default]
    AlwaysAppend,
    /// Corners that exactly match an already-emitted vertex reuse it.
    ShareExact,
}

/// Interleaved attribute stream + index stream for an entire scene.
///
/// Invariants (hold after every public call, including failed ones):
/// - `attribute_len() == vertex_count() * STRIDE`
/// - every index is `< vertex_count()`
/// - `index_count() % 3 == 0`
/// - neither stream grows past `capacity()`
///
/// Storage is allocated once from the capacity and never reallocated.
#[derive(Debug)]
pub struct GeometryStore {
    id: StoreId,
    capacity: MeshCapacity,
    sharing: VertexSharing,

    attributes: Vec<f32>,
    indices: Vec<u32>,

    /// Bumped on every attribute mutation; lets GPU copies detect staleness.
    generation: u64,
}

impl GeometryStore {
    /// Fails with [`MeshError::CapacityTooLarge`] if `capacity` does not fit
    /// `u32` indexing; nothing is allocated in that case.
    pub fn new(capacity: MeshCapacity) -> Result<Self, MeshError> {
        Self::with_sharing(capacity, VertexSharing::default())
    }

    pub fn with_sharing(capacity: MeshCapacity, sharing: VertexSharing) -> Result<Self, MeshError> {
        let capacity = capacity.check()?;
        Ok(Self {
            id: StoreId::next(),
            capacity,
            sharing,
            attributes: Vec::with_capacity(capacity.max_vertices * STRIDE),
            indices: Vec::with_capacity(capacity.max_indices),
            generation: 0,
        })
    }

    #[inline]
    pub fn id(&self) -> StoreId {
        self.id
    }

    #[inline]
    pub fn capacity(&self) -> MeshCapacity {
        self.capacity
    }

    #[inline]
    pub fn sharing(&self) -> VertexSharing {
        self.sharing
    }

    /// Floats per vertex.
    #[inline]
    pub const fn stride(&self) -> usize {
        STRIDE
    }

    #[inline]
    pub fn vertex_count(&self) -> usize {
        self.attributes.len() / STRIDE
    }

    #[inline]
    pub fn index_count(&self) -> usize {
        self.indices.len()
    }

    /// Number of attribute floats written.
    #[inline]
    pub fn attribute_len(&self) -> usize {
        self.attributes.len()
    }

    #[inline]
    pub fn attributes(&self) -> &[f32] {
        &self.attributes
    }

    #[inline]
    pub fn indices(&self) -> &[u32] {
        &self.indices
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.attributes.is_empty()
    }

    #[inline]
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn position(&self, index: usize) -> Option<Position> {
        self.vertex_slots(index)
            .map(|v| Position::from_slots(&v[POSITION_OFFSET..POSITION_OFFSET + COMPONENTS]))
    }

    pub fn color(&self, index: usize) -> Option<Color> {
        self.vertex_slots(index)
            .map(|v| Color::from_slots(&v[COLOR_OFFSET..COLOR_OFFSET + COMPONENTS]))
    }

    #[inline]
    pub fn remaining_vertices(&self) -> usize {
        self.capacity.max_vertices.saturating_sub(self.vertex_count())
    }

    #[inline]
    pub fn remaining_indices(&self) -> usize {
        self.capacity.max_indices.saturating_sub(self.index_count())
    }

    fn vertex_slots(&self, index: usize) -> Option<&[f32]> {
        let start = index.checked_mul(STRIDE)?;
        self.attributes.get(start..start + STRIDE)
    }

    /// `u32` index of the vertex at `position` in emission order.
    ///
    /// Cannot fail for a vertex within capacity; the error covers positions
    /// past the checked range.
    pub(crate) fn index_at(&self, position: usize) -> Result<u32, MeshError> {
        u32::try_from(position).map_err(|_| MeshError::CapacityExceeded {
            stream: Stream::Vertices,
            required: position + 1,
            capacity: self.capacity.max_vertices,
        })
    }

    /// Fails unless `vertices` more vertices and `indices` more indices fit.
    pub(crate) fn ensure_room(&self, vertices: usize, indices: usize) -> Result<(), MeshError> {
        if vertices > self.remaining_vertices() {
            return Err(MeshError::CapacityExceeded {
                stream: Stream::Vertices,
                required: self.vertex_count() + vertices,
                capacity: self.capacity.max_vertices,
            });
        }
        if indices > self.remaining_indices() {
            return Err(MeshError::CapacityExceeded {
                stream: Stream::Indices,
                required: self.index_count() + indices,
                capacity: self.capacity.max_indices,
            });
        }
        Ok(())
    }

    /// Writes one vertex. Capacity must have been checked by the caller.
    ///
    /// Returns the first color slot.
    pub(crate) fn push_vertex(&mut self, position: Position, color: Color) -> usize {
        debug_assert!(self.remaining_vertices() > 0);
        self.attributes.extend_from_slice(&position.to_array());
        let color_slot = self.attributes.len();
        self.attributes.extend_from_slice(&color.to_array());
        self.generation += 1;
        color_slot
    }

    /// Appends whole triangles to the index stream.
    ///
    /// All-or-nothing: capacity and index range are checked for the full batch first.
    pub(crate) fn push_triangles(&mut self, triangles: &[[u32; 3]]) -> Result<(), MeshError> {
        self.ensure_room(0, triangles.len() * 3)?;

        let vertex_count = self.vertex_count();
        if let Some(&index) = triangles
            .iter()
            .flatten()
            .find(|&&i| i as usize >= vertex_count)
        {
            return Err(MeshError::IndexOutOfRange { index, vertex_count });
        }

        self.indices.extend(triangles.iter().flatten().copied());
        Ok(())
    }

    /// Overwrites one attribute float. The caller has bounds-checked `slot`.
    pub(crate) fn write_slot(&mut self, slot: usize, value: f32) {
        self.attributes[slot] = value;
    }

    pub(crate) fn touch(&mut self) {
        self.generation += 1;
    }
}
