use winit::dpi::PhysicalSize;

/// Viewport rectangle in physical pixels, anchored at the lower-left corner.
///
/// This mirrors what `glViewport(0, 0, width, height)` establishes: the mapping
/// from normalized device coordinates to window coordinates.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
}

impl Viewport {
    #[inline]
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// A zero-area viewport cannot be applied (minimized windows report this).
    #[inline]
    pub fn is_empty(self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Width over height. Returns `1.0` for empty viewports.
    #[inline]
    pub fn aspect(self) -> f32 {
        if self.is_empty() {
            1.0
        } else {
            self.width as f32 / self.height as f32
        }
    }

    /// Maps a point in NDC to window coordinates.
    ///
    /// `(-1, -1)` lands on the lower-left corner and `(1, 1)` on the upper-right.
    #[inline]
    pub fn ndc_to_window(self, x: f32, y: f32) -> (f32, f32) {
        (
            (x + 1.0) * 0.5 * self.width as f32,
            (y + 1.0) * 0.5 * self.height as f32,
        )
    }

    /// Arguments for `glViewport`.
    #[inline]
    pub fn gl_args(self) -> (i32, i32, i32, i32) {
        (
            0,
            0,
            i32::try_from(self.width).unwrap_or(i32::MAX),
            i32::try_from(self.height).unwrap_or(i32::MAX),
        )
    }
}

impl From<PhysicalSize<u32>> for Viewport {
    fn from(size: PhysicalSize<u32>) -> Self {
        Self::new(size.width, size.height)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ndc_maps_into_800_by_600() {
        let vp = Viewport::new(800, 600);
        assert_eq!(vp.ndc_to_window(-0.5, 0.5), (200.0, 450.0));
    }

    #[test]
    fn ndc_corners_hit_window_corners() {
        let vp = Viewport::new(800, 600);
        assert_eq!(vp.ndc_to_window(-1.0, -1.0), (0.0, 0.0));
        assert_eq!(vp.ndc_to_window(1.0, 1.0), (800.0, 600.0));
        assert_eq!(vp.ndc_to_window(0.0, 0.0), (400.0, 300.0));
    }

    #[test]
    fn empty_when_either_side_is_zero() {
        assert!(Viewport::new(0, 600).is_empty());
        assert!(Viewport::new(800, 0).is_empty());
        assert!(!Viewport::new(1, 1).is_empty());
    }

    #[test]
    fn aspect_of_empty_viewport_is_one() {
        assert_eq!(Viewport::new(0, 0).aspect(), 1.0);
        assert_eq!(Viewport::new(800, 400).aspect(), 2.0);
    }

    #[test]
    fn gl_args_saturate() {
        assert_eq!(Viewport::new(800, 600).gl_args(), (0, 0, 800, 600));
        assert_eq!(Viewport::new(u32::MAX, 1).gl_args(), (0, 0, i32::MAX, 1));
    }

    #[test]
    fn from_physical_size() {
        let vp: Viewport = PhysicalSize::new(1024u32, 768u32).into();
        assert_eq!(vp, Viewport::new(1024, 768));
    }
}
