//! Backend-neutral draw list produced once per frame.

use glam::Vec2;

use super::color::Color;

/// Geometry of one instruction. Closed shapes are filled; `Curve` is stroked.
#[derive(Debug, Clone, PartialEq)]
pub enum Shape {
    /// Axis-aligned rectangle with its top-left corner at `pos`.
    Rect { pos: Vec2, size: Vec2 },
    Circle { center: Vec2, radius: f32 },
    /// Heart whose notch sits `0.35 * size` below `center` in local space,
    /// tip pointing down before `rotation` (radians) is applied.
    Heart { center: Vec2, size: f32, rotation: f32 },
    /// Two mirrored quadratic arcs from `base` to `tip`. Control points lie
    /// `ctrl_at` of the way along the axis, `half_width` off to each side.
    Lens {
        base: Vec2,
        tip: Vec2,
        half_width: f32,
        ctrl_at: f32,
    },
    /// Stroked cubic bezier with round caps.
    Curve {
        from: Vec2,
        ctrl1: Vec2,
        ctrl2: Vec2,
        to: Vec2,
        width: f32,
    },
}

impl Shape {
    /// Straight stroke expressed as a degenerate cubic.
    pub fn line(from: Vec2, to: Vec2, width: f32) -> Self {
        Shape::Curve {
            from,
            ctrl1: from.lerp(to, 1.0 / 3.0),
            ctrl2: from.lerp(to, 2.0 / 3.0),
            to,
            width,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ColorStop {
    pub offset: f32,
    pub color: Color,
}

impl ColorStop {
    pub const fn new(offset: f32, color: Color) -> Self {
        Self { offset, color }
    }
}

/// Sample a sorted stop list at `t` in [0, 1].
pub fn sample_stops(stops: &[ColorStop], t: f32) -> Color {
    let Some(first) = stops.first() else {
        return Color::TRANSPARENT;
    };
    if t <= first.offset {
        return first.color;
    }
    for pair in stops.windows(2) {
        let (a, b) = (pair[0], pair[1]);
        if t <= b.offset {
            let span = (b.offset - a.offset).max(f32::EPSILON);
            return a.color.mix(b.color, (t - a.offset) / span);
        }
    }
    stops[stops.len() - 1].color
}

#[derive(Debug, Clone, PartialEq)]
pub enum Fill {
    Solid(Color),
    Linear {
        from: Vec2,
        to: Vec2,
        stops: Vec<ColorStop>,
    },
    /// Gradient between two circles, like a canvas radial gradient.
    Radial {
        start: Vec2,
        start_radius: f32,
        end: Vec2,
        end_radius: f32,
        stops: Vec<ColorStop>,
    },
}

impl Fill {
    pub fn linear(from: Vec2, to: Vec2, stops: &[ColorStop]) -> Self {
        Fill::Linear {
            from,
            to,
            stops: stops.to_vec(),
        }
    }

    /// Concentric radial gradient around `center`.
    pub fn radial(center: Vec2, inner: f32, outer: f32, stops: &[ColorStop]) -> Self {
        Fill::Radial {
            start: center,
            start_radius: inner,
            end: center,
            end_radius: outer,
            stops: stops.to_vec(),
        }
    }

    pub fn is_solid(&self) -> bool {
        matches!(self, Fill::Solid(_))
    }

    /// Color of this fill at `p`.
    ///
    /// Radial fills solve the two-circle gradient equation for `p` and
    /// sample the stops at the larger root, clamped to [0, 1].
    pub fn color_at(&self, p: Vec2) -> Color {
        match self {
            Fill::Solid(c) => *c,
            Fill::Linear { from, to, stops } => {
                let axis = *to - *from;
                let len2 = axis.length_squared();
                let t = if len2 > 0.0 {
                    (p - *from).dot(axis) / len2
                } else {
                    0.0
                };
                sample_stops(stops, t.clamp(0.0, 1.0))
            }
            Fill::Radial {
                start,
                start_radius,
                end,
                end_radius,
                stops,
            } => {
                let t = radial_param(p, *start, *start_radius, *end, *end_radius);
                sample_stops(stops, t)
            }
        }
    }
}

/// Solve for the largest `t` whose interpolated circle passes through `p`.
fn radial_param(p: Vec2, c0: Vec2, r0: f32, c1: Vec2, r1: f32) -> f32 {
    let dc = c1 - c0;
    let dr = r1 - r0;
    let pd = p - c0;
    // |pd - t*dc| = r0 + t*dr  =>  a*t^2 - 2*b*t + c = 0
    let a = dc.length_squared() - dr * dr;
    let b = pd.dot(dc) + r0 * dr;
    let c = pd.length_squared() - r0 * r0;
    let t = if a.abs() < 1e-6 {
        if b.abs() < 1e-6 {
            0.0
        } else {
            c / (2.0 * b)
        }
    } else {
        let root = (b * b - a * c).max(0.0).sqrt();
        ((b + root) / a).max((b - root) / a)
    };
    t.clamp(0.0, 1.0)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Blend {
    #[default]
    Normal,
    /// Canvas "lighter".
    Additive,
}

impl Blend {
    pub fn id(self) -> u32 {
        match self {
            Blend::Normal => 0,
            Blend::Additive => 1,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Paint {
    pub fill: Fill,
    /// Multiplied into every color of `fill`.
    pub alpha: f32,
    pub blend: Blend,
}

impl Paint {
    pub fn solid(color: Color) -> Self {
        Self {
            fill: Fill::Solid(color),
            alpha: 1.0,
            blend: Blend::Normal,
        }
    }

    pub fn gradient(fill: Fill) -> Self {
        Self {
            fill,
            alpha: 1.0,
            blend: Blend::Normal,
        }
    }

    pub fn with_alpha(mut self, alpha: f32) -> Self {
        self.alpha = alpha.clamp(0.0, 1.0);
        self
    }

    pub fn additive(mut self) -> Self {
        self.blend = Blend::Additive;
        self
    }

    /// Final color at `p`, alpha included.
    pub fn color_at(&self, p: Vec2) -> Color {
        let c = self.fill.color_at(p);
        c.with_alpha(c.a * self.alpha)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct DrawInstruction {
    pub shape: Shape,
    pub paint: Paint,
}

/// Ordered draw list for one frame. Earlier instructions paint underneath.
#[derive(Debug, Clone, Default)]
pub struct Frame {
    pub width: f32,
    pub height: f32,
    instructions: Vec<DrawInstruction>,
}

impl Frame {
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            width,
            height,
            instructions: Vec::with_capacity(2048),
        }
    }

    /// Push an instruction. Fully transparent paints are dropped.
    pub fn push(&mut self, shape: Shape, paint: Paint) {
        if paint.alpha <= 0.0 {
            return;
        }
        self.instructions.push(DrawInstruction { shape, paint });
    }

    pub fn instructions(&self) -> &[DrawInstruction] {
        &self.instructions
    }

    pub fn len(&self) -> usize {
        self.instructions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.instructions.is_empty()
    }

    pub fn clear(&mut self) {
        self.instructions.clear();
    }
}
