use crate::logging;

use super::layout::COLOR_OFFSET;
use super::{GeometryStore, MeshError, Object, Position, VertexSharing};

/// Scratch result of resolving a primitive's corners against the store.
///
/// Nothing in the store changes until the whole plan is known to fit.
struct PrimitivePlan {
    /// Positions that need a new vertex, in append order.
    pending: Vec<Position>,
    /// Resolved vertex index per corner.
    corner_indices: Vec<u32>,
    /// Vertices whose color slots belong to the resulting object, in corner order.
    owned: Vec<u32>,
}

impl GeometryStore {
    /// Builds one triangle from three corners and returns its [`Object`].
    ///
    /// Corner handling follows the store's [`VertexSharing`]. Indices are emitted
    /// in corner order. On error the store is left exactly as it was.
    pub fn create_triangle(
        &mut self,
        a: Position,
        b: Position,
        c: Position,
    ) -> Result<Object, MeshError> {
        let outcome = self.create_primitive(&[a, b, c], &[[0, 1, 2]]);
        logging::report_outcome("create_triangle", &outcome, "triangle created");
        outcome
    }

    /// Builds a quad as two triangles, `(tl, tr, bl)` and `(bl, tr, br)`,
    /// over four corners. One [`Object`] covers the whole quad.
    pub fn create_quad(
        &mut self,
        top_left: Position,
        top_right: Position,
        bottom_right: Position,
        bottom_left: Position,
    ) -> Result<Object, MeshError> {
        let outcome = self.create_primitive(
            &[top_left, top_right, bottom_right, bottom_left],
            &[[0, 1, 3], [3, 1, 2]],
        );
        logging::report_outcome("create_quad", &outcome, "quad created");
        outcome
    }

    fn create_primitive(
        &mut self,
        corners: &[Position],
        triangles: &[[usize; 3]],
    ) -> Result<Object, MeshError> {
        let plan = self.plan_primitive(corners)?;
        self.ensure_room(plan.pending.len(), triangles.len() * 3)?;

        let indices: Vec<[u32; 3]> = triangles
            .iter()
            .map(|t| t.map(|corner| plan.corner_indices[corner]))
            .collect();

        // Commit. Capacity was checked above, so nothing below can fail halfway.
        let base = self.index_at(self.vertex_count())?;
        let mut slots = Vec::with_capacity(plan.pending.len());
        for &position in &plan.pending {
            slots.push(self.append_vertex(position)?.color_slots);
        }
        self.push_triangles(&indices)?;

        let mut object = Object::new(self.id());
        for vertex in plan.owned {
            let color_slots = match vertex.checked_sub(base) {
                Some(i) => slots[i as usize],
                None => self.color_slots_of(vertex),
            };
            object.push_vertex(color_slots);
        }

        Ok(object)
    }

    fn plan_primitive(&self, corners: &[Position]) -> Result<PrimitivePlan, MeshError> {
        let base = self.vertex_count();
        let mut pending: Vec<Position> = Vec::with_capacity(corners.len());
        let mut owned = Vec::with_capacity(corners.len());

        // Which vertex each corner brings into the object.
        for &corner in corners {
            let shared = match self.sharing() {
                VertexSharing::AlwaysAppend => None,
                VertexSharing::ShareExact => self
                    .find_vertex_index(corner)
                    .or_else(|| self.find_pending(&pending, corner)),
            };

            let vertex = match shared {
                Some(v) => v,
                None => {
                    pending.push(corner);
                    self.index_at(base + pending.len() - 1)?
                }
            };

            if !owned.contains(&vertex) {
                owned.push(vertex);
            }
        }

        // Index resolution always goes through the exact lookup, store first.
        let corner_indices = corners
            .iter()
            .map(|&corner| {
                self.require_vertex_index(corner)
                    .or_else(|missing| self.find_pending(&pending, corner).ok_or(missing))
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(PrimitivePlan { pending, corner_indices, owned })
    }

    /// Index a not-yet-appended vertex will get, by first exact match in `pending`.
    fn find_pending(&self, pending: &[Position], corner: Position) -> Option<u32> {
        let i = pending.iter().position(|&p| p == corner)?;
        self.index_at(self.vertex_count() + i).ok()
    }

    fn color_slots_of(&self, vertex: u32) -> [usize; 3] {
        let first = vertex as usize * self.stride() + COLOR_OFFSET;
        [first, first + 1, first + 2]
    }
}

#[cfg(test)]
mod tests {
    use quickcheck::TestResult;
    use quickcheck_macros::quickcheck;

    use crate::mesh::{Color, MeshCapacity, Stream, STRIDE};

    use super::*;

    fn p(x: f32, y: f32) -> Position {
        Position::new(x, y, 0.0)
    }

    fn store() -> GeometryStore {
        GeometryStore::new(MeshCapacity::default()).unwrap()
    }

    fn sharing_store() -> GeometryStore {
        GeometryStore::with_sharing(MeshCapacity::default(), VertexSharing::ShareExact).unwrap()
    }

    // ── scenarios ─────────────────────────────────────────────────────────

    #[test]
    fn single_red_triangle() {
        let mut s = store();
        let tri = s.create_triangle(p(0.0, 0.5), p(-0.5, 0.0), p(0.5, 0.0)).unwrap();
        s.set_object_color(&tri, Color::RED).unwrap();

        assert_eq!(s.vertex_count(), 3);
        assert_eq!(s.indices(), &[0, 1, 2]);
        for i in 0..3 {
            assert_eq!(s.color(i), Some(Color::RED));
        }
    }

    #[test]
    fn two_disjoint_triangles() {
        let mut s = store();
        let first = s.create_triangle(p(0.0, 0.5), p(-0.5, 0.0), p(0.5, 0.0)).unwrap();
        s.set_object_color(&first, Color::RED).unwrap();
        let second = s.create_triangle(p(0.6, 0.5), p(0.6, 0.0), p(0.9, 0.0)).unwrap();
        s.set_object_color(&second, Color::GREEN).unwrap();

        assert_eq!(s.vertex_count(), 6);
        assert_eq!(s.indices(), &[0, 1, 2, 3, 4, 5]);
        for i in 0..3 {
            assert_eq!(s.color(i), Some(Color::RED));
        }
        for i in 3..6 {
            assert_eq!(s.color(i), Some(Color::GREEN));
        }
    }

    #[test]
    fn shared_corner_with_exact_sharing() {
        let mut s = sharing_store();
        s.create_triangle(p(0.0, 0.5), p(-0.5, 0.0), p(0.5, 0.0)).unwrap();
        s.create_triangle(p(0.5, 0.0), p(1.0, 0.5), p(1.0, 0.0)).unwrap();

        assert_eq!(s.vertex_count(), 5);
        assert_eq!(s.indices(), &[0, 1, 2, 2, 3, 4]);
    }

    #[test]
    fn shared_corner_with_always_append() {
        let mut s = store();
        s.create_triangle(p(0.0, 0.5), p(-0.5, 0.0), p(0.5, 0.0)).unwrap();
        let second = s.create_triangle(p(0.5, 0.0), p(1.0, 0.5), p(1.0, 0.0)).unwrap();

        // Three fresh vertices, but the coinciding corner indexes the older one.
        assert_eq!(s.vertex_count(), 6);
        assert_eq!(s.indices(), &[0, 1, 2, 2, 4, 5]);

        // The object owns the vertices that were appended for it.
        s.set_object_color(&second, Color::BLUE).unwrap();
        assert_eq!(s.color(2), Some(Color::WHITE));
        assert_eq!(s.color(3), Some(Color::BLUE));
    }

    #[test]
    fn shared_corner_object_recolors_shared_vertex() {
        let mut s = sharing_store();
        s.create_triangle(p(0.0, 0.5), p(-0.5, 0.0), p(0.5, 0.0)).unwrap();
        let second = s.create_triangle(p(0.5, 0.0), p(1.0, 0.5), p(1.0, 0.0)).unwrap();
        assert_eq!(second.vertex_count(), 3);

        s.set_object_color(&second, Color::GREEN).unwrap();
        assert_eq!(s.color(2), Some(Color::GREEN));
        assert_eq!(s.color(0), Some(Color::WHITE));
    }

    #[test]
    fn degenerate_triangle_with_sharing_appends_once() {
        let mut s = sharing_store();
        let tri = s.create_triangle(p(0.0, 0.0), p(0.0, 0.0), p(1.0, 0.0)).unwrap();
        assert_eq!(s.vertex_count(), 2);
        assert_eq!(s.indices(), &[0, 0, 1]);
        assert_eq!(tri.vertex_count(), 2);
    }

    // ── quads ─────────────────────────────────────────────────────────────

    #[test]
    fn quad_is_two_triangles_over_four_vertices() {
        let mut s = store();
        let quad = s
            .create_quad(p(-0.5, 0.5), p(0.5, 0.5), p(0.5, -0.5), p(-0.5, -0.5))
            .unwrap();

        assert_eq!(s.vertex_count(), 4);
        assert_eq!(s.indices(), &[0, 1, 3, 3, 1, 2]);
        assert_eq!(quad.vertex_count(), 4);

        s.set_object_color(&quad, Color::BLUE).unwrap();
        for i in 0..4 {
            assert_eq!(s.color(i), Some(Color::BLUE));
        }
    }

    // ── atomicity ─────────────────────────────────────────────────────────

    #[test]
    fn vertex_overflow_writes_nothing() {
        let mut s = GeometryStore::new(MeshCapacity::new(5, 64)).unwrap();
        s.create_triangle(p(0.0, 0.5), p(-0.5, 0.0), p(0.5, 0.0)).unwrap();
        let attrs = s.attributes().to_vec();

        let err = s.create_triangle(p(0.6, 0.5), p(0.6, 0.0), p(0.9, 0.0)).unwrap_err();
        assert_eq!(
            err,
            MeshError::CapacityExceeded { stream: Stream::Vertices, required: 6, capacity: 5 }
        );
        assert_eq!(s.vertex_count(), 3);
        assert_eq!(s.index_count(), 3);
        assert_eq!(s.attributes(), attrs.as_slice());
    }

    #[test]
    fn index_overflow_writes_nothing() {
        let mut s = GeometryStore::new(MeshCapacity::new(64, 5)).unwrap();
        s.create_triangle(p(0.0, 0.5), p(-0.5, 0.0), p(0.5, 0.0)).unwrap();

        let err = s.create_triangle(p(0.6, 0.5), p(0.6, 0.0), p(0.9, 0.0)).unwrap_err();
        assert!(matches!(err, MeshError::CapacityExceeded { stream: Stream::Indices, .. }));
        assert_eq!(s.vertex_count(), 3);
        assert_eq!(s.index_count(), 3);
    }

    #[test]
    fn nan_corner_fails_lookup_without_writes() {
        let mut s = store();
        let bad = Position::new(f32::NAN, 0.0, 0.0);
        let err = s.create_triangle(p(0.0, 0.5), bad, p(0.5, 0.0)).unwrap_err();
        assert!(matches!(err, MeshError::VertexNotFound(_)));
        assert!(s.is_empty());
        assert_eq!(s.index_count(), 0);
    }

    // ── invariants ────────────────────────────────────────────────────────

    #[quickcheck]
    fn indices_stay_valid(corners: Vec<(i8, i8)>, share: bool) -> TestResult {
        if corners.len() < 3 {
            return TestResult::discard();
        }
        let sharing = if share { VertexSharing::ShareExact } else { VertexSharing::AlwaysAppend };
        let mut s = GeometryStore::with_sharing(MeshCapacity::new(32, 48), sharing).unwrap();

        // Small integer grid so corners collide often.
        let to_pos = |(x, y): (i8, i8)| p((x % 4) as f32 * 0.25, (y % 4) as f32 * 0.25);

        for tri in corners.chunks_exact(3) {
            let (vertices, indices) = (s.vertex_count(), s.index_count());
            match s.create_triangle(to_pos(tri[0]), to_pos(tri[1]), to_pos(tri[2])) {
                Ok(_) => {}
                Err(MeshError::CapacityExceeded { .. }) => {
                    if (s.vertex_count(), s.index_count()) != (vertices, indices) {
                        return TestResult::failed();
                    }
                }
                Err(_) => return TestResult::failed(),
            }

            let vertex_count = s.vertex_count() as u32;
            if s.index_count() % 3 != 0
                || s.attribute_len() != s.vertex_count() * STRIDE
                || s.indices().iter().any(|&i| i >= vertex_count)
            {
                return TestResult::failed();
            }
        }

        TestResult::passed()
    }
}
