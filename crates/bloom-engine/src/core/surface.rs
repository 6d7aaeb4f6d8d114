use glam::Vec2;

/// Logical drawing surface size (CSS pixels, y down).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Surface {
    pub width: f32,
    pub height: f32,
}

impl Surface {
    /// Sizes below one pixel are raised to one.
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            width: width.max(1.0),
            height: height.max(1.0),
        }
    }

    pub fn size(&self) -> Vec2 {
        Vec2::new(self.width, self.height)
    }

    pub fn area(&self) -> f32 {
        self.width * self.height
    }

    pub fn center(&self) -> Vec2 {
        self.size() * 0.5
    }

    /// Point at fractional coordinates of the surface.
    pub fn at(&self, fx: f32, fy: f32) -> Vec2 {
        Vec2::new(self.width * fx, self.height * fy)
    }

    /// Clamp a point into the surface bounds.
    pub fn clamp(&self, p: Vec2) -> Vec2 {
        p.clamp(Vec2::ZERO, self.size())
    }

    /// Cursor offset from the centre, scaled to [-1, 1] on both axes.
    pub fn parallax(&self, p: Vec2) -> Vec2 {
        (p / self.size() - Vec2::splat(0.5)) * 2.0
    }
}

impl Default for Surface {
    fn default() -> Self {
        Self::new(800.0, 600.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn degenerate_size_is_raised() {
        let s = Surface::new(0.0, -5.0);
        assert_eq!(s.size(), Vec2::ONE);
    }

    #[test]
    fn clamp_keeps_points_inside() {
        let s = Surface::new(100.0, 50.0);
        assert_eq!(s.clamp(Vec2::new(-10.0, 80.0)), Vec2::new(0.0, 50.0));
        assert_eq!(s.clamp(Vec2::new(30.0, 20.0)), Vec2::new(30.0, 20.0));
    }

    #[test]
    fn parallax_spans_unit_range() {
        let s = Surface::new(200.0, 100.0);
        assert_eq!(s.parallax(Vec2::ZERO), Vec2::new(-1.0, -1.0));
        assert_eq!(s.parallax(s.center()), Vec2::ZERO);
        assert_eq!(s.parallax(s.size()), Vec2::ONE);
    }
}
