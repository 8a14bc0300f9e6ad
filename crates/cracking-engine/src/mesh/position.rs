/// Point in object space.
///
/// Equality is exact IEEE comparison with no tolerance: two positions name the
/// same vertex only if every component compares equal. Coordinates reached via
/// different arithmetic will generally not match, so shared corners must be
/// spelled with identical literals. `NaN` never matches anything.
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct Position {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl Position {
    #[inline]
    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    #[inline]
    pub const fn to_array(self) -> [f32; 3] {
        [self.x, self.y, self.z]
    }

    /// Rebuilds a position from three consecutive attribute slots.
    #[inline]
    pub(crate) fn from_slots(slots: &[f32]) -> Self {
        Self::new(slots[0], slots[1], slots[2])
    }

    #[inline]
    pub fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite() && self.z.is_finite()
    }
}

impl From<[f32; 3]> for Position {
    #[inline]
    fn from([x, y, z]: [f32; 3]) -> Self {
        Self::new(x, y, z)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn equality_is_exact() {
        let p = Position::new(0.3, 0.0, 0.0);
        // One ulp away.
        let q = Position::new(f32::from_bits(0.3f32.to_bits() + 1), 0.0, 0.0);
        assert_eq!(p, Position::from([0.3, 0.0, 0.0]));
        assert_ne!(p, q);
    }

    #[test]
    fn nan_never_equal() {
        let p = Position::new(f32::NAN, 0.0, 0.0);
        assert_ne!(p, p);
        assert!(!p.is_finite());
    }

    #[test]
    fn from_slots_reads_three_components() {
        let p = Position::from_slots(&[1.0, 2.0, 3.0, 9.0]);
        assert_eq!(p.to_array(), [1.0, 2.0, 3.0]);
    }
}
