//! Lyon-based tessellation of the frame draw list.
//!
//! Every instruction becomes a run of colored triangles in one flat
//! `x, y, r, g, b, a` buffer. Gradients are evaluated per vertex. Runs that
//! share a blend mode are grouped into [`BlendBatch`]es so the host can
//! switch compositing between them.

use bytemuck::{Pod, Zeroable};
use glam::{Affine2, Vec2};
use lyon::math::point;
use lyon::path::{Path, Winding};
use lyon::tessellation::{
    BuffersBuilder, FillOptions, FillTessellator, FillVertex, FillVertexConstructor, LineCap,
    StrokeOptions, StrokeTessellator, StrokeVertex, StrokeVertexConstructor, VertexBuffers,
};

use crate::renderer::draw::{Blend, DrawInstruction, Fill, Frame, Paint, Shape};
use crate::renderer::traits::Renderer;

/// Per-vertex data for vector rendering.
/// 6 floats = 24 bytes per vertex.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, Pod, Zeroable)]
pub struct VectorVertex {
    pub x: f32,
    pub y: f32,
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl VectorVertex {
    /// Number of floats per vertex.
    pub const FLOATS: usize = 6;
    /// Stride in bytes.
    pub const STRIDE_BYTES: usize = Self::FLOATS * 4; // 24

    fn painted(p: Vec2, paint: &Paint) -> Self {
        let c = paint.color_at(p);
        Self {
            x: p.x,
            y: p.y,
            r: c.r,
            g: c.g,
            b: c.b,
            a: c.a,
        }
    }
}

/// A contiguous vertex range drawn with one blend mode.
/// Wire format: `blend, start, end` (3 floats).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BlendBatch {
    pub blend: Blend,
    pub start: u32,
    /// Exclusive.
    pub end: u32,
}

impl BlendBatch {
    pub const FLOATS: usize = 3;
}

/// Vertex constructor for lyon fill tessellation.
struct FillVertexCtor<'a> {
    paint: &'a Paint,
}

impl FillVertexConstructor<VectorVertex> for FillVertexCtor<'_> {
    fn new_vertex(&mut self, vertex: FillVertex) -> VectorVertex {
        let p = vertex.position();
        VectorVertex::painted(Vec2::new(p.x, p.y), self.paint)
    }
}

/// Vertex constructor for lyon stroke tessellation.
struct StrokeVertexCtor<'a> {
    paint: &'a Paint,
}

impl StrokeVertexConstructor<VectorVertex> for StrokeVertexCtor<'_> {
    fn new_vertex(&mut self, vertex: StrokeVertex) -> VectorVertex {
        let p = vertex.position();
        VectorVertex::painted(Vec2::new(p.x, p.y), self.paint)
    }
}

/// Segments per ring when a radial gradient disc is meshed by hand.
const RADIAL_SEGMENTS: usize = 32;
/// Grid cells per side when a gradient rectangle is meshed by hand.
const RECT_GRID: usize = 12;

/// Holds lyon tessellators and the output vertex buffer.
/// Cleared and refilled on every `draw`.
pub struct VectorState {
    fill_tess: FillTessellator,
    stroke_tess: StrokeTessellator,
    geometry: VertexBuffers<VectorVertex, u32>,
    buffer: Vec<f32>,
    batches: Vec<BlendBatch>,
    batch_buffer: Vec<f32>,
    size: (u32, u32),
}

impl VectorState {
    pub fn new() -> Self {
        Self {
            fill_tess: FillTessellator::new(),
            stroke_tess: StrokeTessellator::new(),
            geometry: VertexBuffers::new(),
            buffer: Vec::with_capacity(16384 * VectorVertex::FLOATS),
            batches: Vec::with_capacity(64),
            batch_buffer: Vec::with_capacity(64 * BlendBatch::FLOATS),
            size: (0, 0),
        }
    }

    pub fn clear(&mut self) {
        self.buffer.clear();
        self.batches.clear();
        self.batch_buffer.clear();
    }

    pub fn vertex_count(&self) -> usize {
        self.buffer.len() / VectorVertex::FLOATS
    }

    /// Raw pointer to the flat float buffer (for SAB copy).
    pub fn buffer_ptr(&self) -> *const f32 {
        self.buffer.as_ptr()
    }

    pub fn vertices(&self) -> &[VectorVertex] {
        bytemuck::cast_slice(&self.buffer)
    }

    pub fn batches(&self) -> &[BlendBatch] {
        &self.batches
    }

    pub fn batch_ptr(&self) -> *const f32 {
        self.batch_buffer.as_ptr()
    }

    pub fn batch_count(&self) -> usize {
        self.batches.len()
    }

    pub fn size(&self) -> (u32, u32) {
        self.size
    }

    // -- Instruction dispatch --

    fn draw_instruction(&mut self, inst: &DrawInstruction) {
        let start = self.vertex_count() as u32;
        let paint = &inst.paint;
        match &inst.shape {
            Shape::Rect { pos, size } => {
                if paint.fill.is_solid() {
                    let path = rect_path(*pos, *size);
                    self.fill_path(&path, paint);
                } else {
                    self.fill_grid(*pos, *size, paint);
                }
            }
            Shape::Circle { center, radius } => {
                if *radius <= 0.0 {
                    return;
                }
                if let Fill::Radial { .. } = paint.fill {
                    self.fill_disc(*center, *radius, paint);
                } else {
                    let mut builder = Path::builder();
                    builder.add_circle(point(center.x, center.y), *radius, Winding::Positive);
                    self.fill_path(&builder.build(), paint);
                }
            }
            Shape::Heart { center, size, rotation } => {
                if *size > 0.0 {
                    let xf = Affine2::from_translation(*center) * Affine2::from_angle(*rotation);
                    self.fill_path(&heart_path(xf, *size), paint);
                }
            }
            Shape::Lens { base, tip, half_width, ctrl_at } => {
                if let Some(path) = lens_path(*base, *tip, *half_width, *ctrl_at) {
                    self.fill_path(&path, paint);
                }
            }
            Shape::Curve { from, ctrl1, ctrl2, to, width } => {
                if *width > 0.0 {
                    let mut builder = Path::builder();
                    builder.begin(point(from.x, from.y));
                    builder.cubic_bezier_to(
                        point(ctrl1.x, ctrl1.y),
                        point(ctrl2.x, ctrl2.y),
                        point(to.x, to.y),
                    );
                    builder.end(false);
                    self.stroke_path(&builder.build(), *width, paint);
                }
            }
        }
        self.record_batch(paint.blend, start);
    }

    fn record_batch(&mut self, blend: Blend, start: u32) {
        let end = self.vertex_count() as u32;
        if end == start {
            return;
        }
        match self.batches.last_mut() {
            Some(last) if last.blend == blend && last.end == start => last.end = end,
            _ => self.batches.push(BlendBatch { blend, start, end }),
        }
    }

    fn flush_batches(&mut self) {
        self.batch_buffer.clear();
        for b in &self.batches {
            self.batch_buffer
                .extend_from_slice(&[b.blend.id() as f32, b.start as f32, b.end as f32]);
        }
    }

    // -- Tessellation --

    /// Flush indexed geometry to the flat buffer as triangle list.
    fn flush_geometry(&mut self) {
        for idx in &self.geometry.indices {
            let v = &self.geometry.vertices[*idx as usize];
            self.buffer.extend_from_slice(&[v.x, v.y, v.r, v.g, v.b, v.a]);
        }
        self.geometry.vertices.clear();
        self.geometry.indices.clear();
    }

    fn fill_path(&mut self, path: &Path, paint: &Paint) {
        let result = self.fill_tess.tessellate_path(
            path,
            &FillOptions::tolerance(0.5),
            &mut BuffersBuilder::new(&mut self.geometry, FillVertexCtor { paint }),
        );

        if result.is_ok() {
            self.flush_geometry();
        } else {
            self.geometry.vertices.clear();
            self.geometry.indices.clear();
        }
    }

    fn stroke_path(&mut self, path: &Path, width: f32, paint: &Paint) {
        let options = StrokeOptions::tolerance(0.5)
            .with_line_width(width)
            .with_line_cap(LineCap::Round);
        let result = self.stroke_tess.tessellate_path(
            path,
            &options,
            &mut BuffersBuilder::new(&mut self.geometry, StrokeVertexCtor { paint }),
        );

        if result.is_ok() {
            self.flush_geometry();
        } else {
            self.geometry.vertices.clear();
            self.geometry.indices.clear();
        }
    }

    fn push_triangle(&mut self, a: Vec2, b: Vec2, c: Vec2, paint: &Paint) {
        for p in [a, b, c] {
            let v = VectorVertex::painted(p, paint);
            self.buffer.extend_from_slice(bytemuck::cast_slice(&[v]));
        }
    }

    /// Disc meshed as concentric rings so radial stops survive interpolation.
    fn fill_disc(&mut self, center: Vec2, radius: f32, paint: &Paint) {
        let rings = match &paint.fill {
            Fill::Radial { stops, .. } => (stops.len() * 2).max(2),
            _ => 1,
        };
        let ring_point = |ring: usize, seg: usize| {
            let r = radius * ring as f32 / rings as f32;
            let a = seg as f32 / RADIAL_SEGMENTS as f32 * std::f32::consts::TAU;
            center + Vec2::from_angle(a) * r
        };
        for seg in 0..RADIAL_SEGMENTS {
            let next = seg + 1;
            self.push_triangle(center, ring_point(1, seg), ring_point(1, next), paint);
            for ring in 1..rings {
                let (a, b) = (ring_point(ring, seg), ring_point(ring, next));
                let (c, d) = (ring_point(ring + 1, seg), ring_point(ring + 1, next));
                self.push_triangle(a, c, d, paint);
                self.push_triangle(a, d, b, paint);
            }
        }
    }

    /// Rectangle meshed as a grid so gradient fills vary across it.
    fn fill_grid(&mut self, pos: Vec2, size: Vec2, paint: &Paint) {
        let cell = size / RECT_GRID as f32;
        for j in 0..RECT_GRID {
            for i in 0..RECT_GRID {
                let p0 = pos + cell * Vec2::new(i as f32, j as f32);
                let p1 = p0 + Vec2::new(cell.x, 0.0);
                let p2 = p0 + cell;
                let p3 = p0 + Vec2::new(0.0, cell.y);
                self.push_triangle(p0, p1, p2, paint);
                self.push_triangle(p0, p2, p3, paint);
            }
        }
    }
}

impl Default for VectorState {
    fn default() -> Self {
        Self::new()
    }
}

impl Renderer for VectorState {
    fn backend(&self) -> &'static str {
        "lyon"
    }

    fn draw(&mut self, frame: &Frame) {
        self.clear();
        for inst in frame.instructions() {
            self.draw_instruction(inst);
        }
        self.flush_batches();
    }

    fn resize(&mut self, width: u32, height: u32) {
        self.size = (width, height);
    }
}

// -- Paths --

fn rect_path(pos: Vec2, size: Vec2) -> Path {
    let mut builder = Path::builder();
    builder.begin(point(pos.x, pos.y));
    builder.line_to(point(pos.x + size.x, pos.y));
    builder.line_to(point(pos.x + size.x, pos.y + size.y));
    builder.line_to(point(pos.x, pos.y + size.y));
    builder.close();
    builder.build()
}

fn heart_path(xf: Affine2, s: f32) -> Path {
    let p = |x: f32, y: f32| {
        let v = xf.transform_point2(Vec2::new(x * s, y * s));
        point(v.x, v.y)
    };
    let mut builder = Path::builder();
    builder.begin(p(0.0, 0.35));
    builder.cubic_bezier_to(p(0.6, -0.1), p(1.1, 0.35), p(0.0, 1.1));
    builder.cubic_bezier_to(p(-1.1, 0.35), p(-0.6, -0.1), p(0.0, 0.35));
    builder.close();
    builder.build()
}

fn lens_path(base: Vec2, tip: Vec2, half_width: f32, ctrl_at: f32) -> Option<Path> {
    let axis = tip - base;
    let normal = axis.perp().try_normalize()?;
    let mid = base + axis * ctrl_at;
    let left = mid + normal * half_width;
    let right = mid - normal * half_width;

    let mut builder = Path::builder();
    builder.begin(point(base.x, base.y));
    builder.quadratic_bezier_to(point(left.x, left.y), point(tip.x, tip.y));
    builder.quadratic_bezier_to(point(right.x, right.y), point(base.x, base.y));
    builder.close();
    Some(builder.build())
}
