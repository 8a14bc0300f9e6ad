use crate::logging;

use super::{Color, GeometryStore, MeshError, StoreId};

/// Color slots of one primitive, for recoloring after construction.
///
/// Holds attribute-stream offsets rather than references, so it stays valid for
/// the life of the store that built it and never borrows that store. Slots come
/// in groups of three (r, g, b), one group per vertex.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Object {
    store: StoreId,
    color_slots: Vec<usize>,
}

impl Object {
    pub(crate) fn new(store: StoreId) -> Self {
        Self { store, color_slots: Vec::new() }
    }

    pub(crate) fn push_vertex(&mut self, color_slots: [usize; 3]) {
        self.color_slots.extend_from_slice(&color_slots);
    }

    /// Id of the store this object refers into.
    #[inline]
    pub fn store_id(&self) -> StoreId {
        self.store
    }

    #[inline]
    pub fn color_slots(&self) -> &[usize] {
        &self.color_slots
    }

    #[inline]
    pub fn vertex_count(&self) -> usize {
        self.color_slots.len() / 3
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.color_slots.is_empty()
    }
}

impl GeometryStore {
    /// Overwrites the color of every vertex referenced by `object`.
    ///
    /// Checks all preconditions before writing, so a rejected call leaves the
    /// store untouched. Any GPU copy of the store is stale afterwards; see
    /// [`generation`](Self::generation).
    pub fn set_object_color(&mut self, object: &Object, color: Color) -> Result<(), MeshError> {
        let outcome = self.recolor(object, color);
        logging::report_outcome(
            "set_object_color",
            &outcome,
            format_args!("{} vertices set to {:?}", object.vertex_count(), color.to_array()),
        );
        outcome
    }

    fn recolor(&mut self, object: &Object, color: Color) -> Result<(), MeshError> {
        if object.store != self.id() {
            return Err(MeshError::ForeignObject);
        }

        let slots = object.color_slots();
        if slots.len() % 3 != 0 {
            return Err(MeshError::PartialVertex { slots: slots.len() });
        }

        let len = self.attribute_len();
        if let Some(&slot) = slots.iter().find(|&&s| s >= len) {
            return Err(MeshError::SlotOutOfRange { slot, len });
        }

        for group in slots.chunks_exact(3) {
            for (&slot, value) in group.iter().zip(color.to_array()) {
                self.write_slot(slot, value);
            }
        }
        self.touch();

        Ok(())
    }
}
