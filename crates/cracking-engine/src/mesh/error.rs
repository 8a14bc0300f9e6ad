use std::fmt;

use super::Position;

/// Which of the two store streams ran out of room.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum Stream {
    Vertices,
    Indices,
}

impl fmt::Display for Stream {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Stream::Vertices => f.write_str("vertex"),
            Stream::Indices => f.write_str("index"),
        }
    }
}

/// Mesh construction failure.
///
/// Every operation that returns one of these has left the store untouched.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum MeshError {
    #[error("{stream} capacity exceeded: {required} required, capacity is {capacity}")]
    CapacityExceeded {
        stream: Stream,
        required: usize,
        capacity: usize,
    },
    #[error(
        "capacity of {max_vertices} vertices / {max_indices} indices exceeds the u32 index range"
    )]
    CapacityTooLarge {
        max_vertices: usize,
        max_indices: usize,
    },
    #[error("no vertex at {0:?}")]
    VertexNotFound(Position),
    #[error("index {index} out of range for {vertex_count} vertices")]
    IndexOutOfRange { index: u32, vertex_count: usize },
    #[error("object holds {slots} color slots, not a whole number of vertices")]
    PartialVertex { slots: usize },
    #[error("object was built by a different geometry store")]
    ForeignObject,
    #[error("color slot {slot} is outside the attribute stream (len {len})")]
    SlotOutOfRange { slot: usize, len: usize },
}
