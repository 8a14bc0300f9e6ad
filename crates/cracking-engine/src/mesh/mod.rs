//! Indexed mesh construction.
//!
//! All geometry lives in a single [`GeometryStore`]: one interleaved attribute
//! stream (position + color per vertex) and one `u32` index stream, both bounded
//! by a [`MeshCapacity`] fixed at construction.
//!
//! Layout of the pieces:
//! - `store`: buffers, counters, capacity checks
//! - `dedup`: exact-position vertex lookup
//! - `builder`: appending single vertices
//! - `object`: per-primitive color slots and recoloring
//! - `primitive`: triangles and quads built from corner positions
//! - `layout`: the interleaved vertex layout handed to the GPU
//!
//! Positions are used verbatim as clip-space coordinates by the bundled shaders.

mod builder;
mod color;
mod dedup;
mod error;
mod layout;
mod object;
mod position;
mod primitive;
mod store;

pub use builder::VertexRecord;
pub use color::Color;
pub use error::{MeshError, Stream};
pub use layout::{
    AttributeDesc, VertexLayout, ATTRIBUTES_COUNT, COLOR_OFFSET, COMPONENTS, POSITION_OFFSET,
    STRIDE,
};
pub use object::Object;
pub use position::Position;
pub use store::{GeometryStore, MeshCapacity, StoreId, VertexSharing};
