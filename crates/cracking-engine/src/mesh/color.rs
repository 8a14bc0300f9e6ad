/// Straight RGB vertex color, components in `[0, 1]`.
///
/// Stored per vertex in the attribute stream. New vertices start out [`Color::WHITE`].
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

impl Color {
    pub const WHITE: Self = Self::new(1.0, 1.0, 1.0);
    pub const RED: Self = Self::new(1.0, 0.0, 0.0);
    pub const GREEN: Self = Self::new(0.0, 1.0, 0.0);
    pub const BLUE: Self = Self::new(0.0, 0.0, 1.0);

    #[inline]
    pub const fn new(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b }
    }

    #[inline]
    pub const fn to_array(self) -> [f32; 3] {
        [self.r, self.g, self.b]
    }

    #[inline]
    pub(crate) fn from_slots(slots: &[f32]) -> Self {
        Self::new(slots[0], slots[1], slots[2])
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::WHITE
    }
}
