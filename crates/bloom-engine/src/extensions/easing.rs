// extensions/easing.rs
//
// Pure easing functions for growth and opening curves.

/// Easing function type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Easing {
    /// Constant velocity (no easing).
    #[default]
    Linear,
    /// Strong slow end.
    CubicOut,
    /// Strong slow start and end.
    CubicInOut,
}

impl Easing {
    /// Apply the easing function to `t`, clamped into [0, 1].
    #[inline]
    pub fn apply(self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Easing::Linear => t,
            Easing::CubicOut => 1.0 - (1.0 - t).powi(3),
            Easing::CubicInOut => {
                if t < 0.5 {
                    4.0 * t * t * t
                } else {
                    1.0 - (-2.0 * t + 2.0).powi(3) / 2.0
                }
            }
        }
    }
}

/// Linearly interpolate between two values.
#[inline]
pub fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

/// Interpolate with easing.
#[inline]
pub fn ease(a: f32, b: f32, t: f32, easing: Easing) -> f32 {
    lerp(a, b, easing.apply(t))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoints_are_fixed() {
        for e in [Easing::Linear, Easing::CubicOut, Easing::CubicInOut] {
            assert_eq!(e.apply(0.0), 0.0, "{:?}", e);
            assert_eq!(e.apply(1.0), 1.0, "{:?}", e);
        }
    }

    #[test]
    fn cubic_out_faster_start() {
        let mid = Easing::CubicOut.apply(0.5);
        assert!(mid > 0.5, "CubicOut at 0.5 should be > 0.5, got {}", mid);
    }

    #[test]
    fn cubic_in_out_symmetric() {
        let a = Easing::CubicInOut.apply(0.25);
        let b = Easing::CubicInOut.apply(0.75);
        assert!((a + b - 1.0).abs() < 1e-6);
    }

    #[test]
    fn input_outside_unit_range_clamps() {
        assert_eq!(Easing::CubicOut.apply(-3.0), 0.0);
        assert_eq!(Easing::CubicInOut.apply(7.0), 1.0);
    }

    #[test]
    fn ease_interpolates() {
        let result = ease(100.0, 200.0, 0.5, Easing::Linear);
        assert!((result - 150.0).abs() < 0.001);
    }
}
