use crate::logging::{self, Status};

use super::{Color, GeometryStore, MeshError, Position};

/// Result of appending a vertex.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct VertexRecord {
    /// Index of the new vertex.
    pub index: u32,
    /// Attribute-stream offsets of its red, green and blue components.
    pub color_slots: [usize; 3],
}

impl GeometryStore {
    /// Appends a vertex at `position` with the default white color.
    ///
    /// Never deduplicates; use [`find_vertex_index`](Self::find_vertex_index)
    /// first to reuse a vertex. On [`MeshError::CapacityExceeded`] nothing is written.
    pub fn append_vertex(&mut self, position: Position) -> Result<VertexRecord, MeshError> {
        let outcome = self.push_record(position);
        match &outcome {
            Ok(record) => logging::report_detail(
                Status::Success,
                "append_vertex",
                format_args!("vertex {} at {:?}", record.index, position.to_array()),
            ),
            Err(e) => logging::report_detail(Status::Error, "append_vertex", e),
        }
        outcome
    }

    fn push_record(&mut self, position: Position) -> Result<VertexRecord, MeshError> {
        self.ensure_room(1, 0)?;
        let index = self.index_at(self.vertex_count())?;
        let slot = self.push_vertex(position, Color::WHITE);

        Ok(VertexRecord {
            index,
            color_slots: [slot, slot + 1, slot + 2],
        })
    }
}
