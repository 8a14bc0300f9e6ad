use crate::logging::{self, Status};

use super::layout::{COMPONENTS, POSITION_OFFSET, STRIDE};
use super::{GeometryStore, MeshError, Position};

impl GeometryStore {
    /// Returns the index of the first vertex whose stored position equals `position`.
    ///
    /// Linear in the vertex count; scenes built here are small and static.
    /// Comparison is exact (see [`Position`]).
    pub fn find_vertex_index(&self, position: Position) -> Option<u32> {
        let found = self
            .attributes()
            .chunks_exact(STRIDE)
            .position(|vertex| {
                Position::from_slots(&vertex[POSITION_OFFSET..POSITION_OFFSET + COMPONENTS])
                    == position
            })
            .and_then(|i| u32::try_from(i).ok());

        match found {
            Some(index) => logging::report_detail(
                Status::Success,
                "find_vertex_index",
                format_args!("found vertex {index} at {:?}", position.to_array()),
            ),
            None => logging::report_detail(
                Status::Error,
                "find_vertex_index",
                format_args!("no vertex at {:?}", position.to_array()),
            ),
        }
        found
    }

    /// Like [`find_vertex_index`](Self::find_vertex_index) but fails with
    /// [`MeshError::VertexNotFound`].
    pub fn require_vertex_index(&self, position: Position) -> Result<u32, MeshError> {
        self.find_vertex_index(position)
            .ok_or(MeshError::VertexNotFound(position))
    }
}

#[cfg(test)]
mod tests {
    use quickcheck::TestResult;
    use quickcheck_macros::quickcheck;

    use crate::mesh::{Color, MeshCapacity};

    use super::*;

    fn store() -> GeometryStore {
        GeometryStore::new(MeshCapacity::new(16, 48)).unwrap()
    }

    #[test]
    fn empty_store_finds_nothing() {
        assert_eq!(store().find_vertex_index(Position::default()), None);
    }

    #[test]
    fn finds_by_emission_order() {
        let mut s = store();
        s.push_vertex(Position::new(0.0, 0.5, 0.0), Color::WHITE);
        s.push_vertex(Position::new(-0.5, 0.0, 0.0), Color::WHITE);
        s.push_vertex(Position::new(0.5, 0.0, 0.0), Color::WHITE);
        assert_eq!(s.find_vertex_index(Position::new(0.0, 0.5, 0.0)), Some(0));
        assert_eq!(s.find_vertex_index(Position::new(-0.5, 0.0, 0.0)), Some(1));
        assert_eq!(s.find_vertex_index(Position::new(0.5, 0.0, 0.0)), Some(2));
    }

    #[test]
    fn color_slots_are_not_matched() {
        let mut s = store();
        s.push_vertex(Position::new(0.0, 0.0, 0.0), Color::WHITE);
        // (1, 1, 1) only exists as a color, never as a position.
        assert_eq!(s.find_vertex_index(Position::new(1.0, 1.0, 1.0)), None);
    }

    #[test]
    fn require_reports_missing_position() {
        let s = store();
        let missing = Position::new(4.0, 2.0, 0.0);
        assert_eq!(s.require_vertex_index(missing), Err(MeshError::VertexNotFound(missing)));
    }

    #[test]
    fn lookups_report_hits_and_misses() {
        crate::logging::capture::start();
        let mut s = store();
        s.push_vertex(Position::new(0.5, 0.0, 0.0), Color::WHITE);
        s.find_vertex_index(Position::new(0.5, 0.0, 0.0));
        s.find_vertex_index(Position::new(0.0, 0.5, 0.0));

        let lines = crate::logging::capture::lines();
        assert_eq!(lines.len(), 2);
        assert!(lines.iter().all(|(level, _)| *level == log::Level::Trace));
        assert!(lines[0].1.starts_with("[SUCCESS] find_vertex_index -> found vertex 0"));
        assert!(lines[1].1.starts_with("[ERROR] find_vertex_index -> no vertex"));
    }

    #[test]
    fn nan_position_is_never_found() {
        let mut s = store();
        let nan = Position::new(f32::NAN, 0.0, 0.0);
        s.push_vertex(nan, Color::WHITE);
        assert_eq!(s.find_vertex_index(nan), None);
    }

    #[quickcheck]
    fn duplicate_appends_resolve_to_first(x: f32, y: f32, z: f32, before: u8) -> TestResult {
        let pos = Position::new(x, y, z);
        if !pos.is_finite() {
            return TestResult::discard();
        }

        let mut s = store();
        // Unrelated vertices ahead of the duplicates, none of which can equal `pos`.
        for i in 0..(before % 8) {
            let filler = Position::new(f32::NAN, i as f32, 0.0);
            s.push_vertex(filler, Color::WHITE);
        }
        let first = s.vertex_count() as u32;
        s.push_vertex(pos, Color::WHITE);
        s.push_vertex(pos, Color::WHITE);

        TestResult::from_bool(s.find_vertex_index(pos) == Some(first))
    }
}
