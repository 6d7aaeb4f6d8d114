use bloom_engine::bridge::protocol::{
    FLAG_BARRAGE_ACTIVE, FLAG_CELEBRATION_OPEN, FLAG_HINT_VISIBLE, HEADER_FLOATS,
};
use bloom_engine::{
    BlendBatch, Frame, FrameHeader, InputEvent, ProtocolLayout, Renderer, SimConfig, SimContext,
    Surface, VectorState, WireEvent,
};

/// Owns the simulation and the buffers the page reads after every frame.
///
/// The page calls `frame(now_ms)` from `requestAnimationFrame`, then copies
/// the header, vertex, batch and event sections out of wasm memory.
pub struct SimRunner {
    ctx: SimContext,
    frame: Frame,
    vectors: VectorState,
    layout: ProtocolLayout,
    header: [f32; HEADER_FLOATS],
    /// Blend batches of the last frame, clamped to the layout.
    wire_batches: Vec<f32>,
    /// Events of the last frame, packed for the page.
    wire_events: Vec<WireEvent>,
    frame_counter: u32,
}

impl SimRunner {
    pub fn new(config: SimConfig, width: f32, height: f32) -> Self {
        let ctx = SimContext::new(config, Surface::new(width, height));
        Self::from_context(ctx, ProtocolLayout::default())
    }

    /// Runner around an existing context, with buffers capped by `layout`.
    pub fn from_context(ctx: SimContext, layout: ProtocolLayout) -> Self {
        let surface = *ctx.surface();
        let mut vectors = VectorState::new();
        vectors.resize(surface.width as u32, surface.height as u32);
        Self {
            ctx,
            frame: Frame::new(surface.width, surface.height),
            vectors,
            wire_batches: Vec::with_capacity(layout.max_batches * BlendBatch::FLOATS),
            wire_events: Vec::with_capacity(layout.max_events),
            layout,
            header: [0.0; HEADER_FLOATS],
            frame_counter: 0,
        }
    }

    /// Seed the opening scene. Call once after construction.
    pub fn init(&mut self) {
        self.ctx.init();
    }

    pub fn push_input(&mut self, event: InputEvent) {
        self.ctx.push_input(event);
    }

    pub fn resize(&mut self, width: f32, height: f32) {
        self.ctx.resize(width, height);
        let surface = self.ctx.surface();
        self.vectors.resize(surface.width as u32, surface.height as u32);
    }

    /// Run one frame: step, rebuild the draw list, tessellate, pack.
    pub fn frame(&mut self, now_ms: f64) {
        self.ctx.step(now_ms / 1000.0);
        self.ctx.build_frame(&mut self.frame);
        self.vectors.draw(&self.frame);

        let now = self.ctx.now();
        self.wire_events.clear();
        self.wire_events.extend(
            self.ctx
                .events()
                .iter()
                .take(self.layout.max_events)
                .map(|e| e.to_wire(now)),
        );

        if self.vectors.vertex_count() > self.layout.max_vertices {
            log::warn!(
                "frame has {} vertices, buffer holds {}",
                self.vectors.vertex_count(),
                self.layout.max_vertices
            );
        }
        if self.vectors.batch_count() > self.layout.max_batches {
            log::warn!(
                "frame has {} blend batches, buffer holds {}",
                self.vectors.batch_count(),
                self.layout.max_batches
            );
        }
        self.pack_batches();

        self.frame_counter = self.frame_counter.wrapping_add(1);
        self.write_header();
    }

    /// Copy batches that fit both caps. A batch straddling the vertex cap is
    /// cut at it; batches starting past it are dropped.
    fn pack_batches(&mut self) {
        let max_vertices = self.layout.max_vertices as u32;
        self.wire_batches.clear();
        for b in self.vectors.batches().iter().take(self.layout.max_batches) {
            if b.start >= max_vertices {
                break;
            }
            let end = b.end.min(max_vertices);
            self.wire_batches
                .extend_from_slice(&[b.blend.id() as f32, b.start as f32, end as f32]);
        }
    }

    fn write_header(&mut self) {
        let director = self.ctx.director();
        let mut flags = 0;
        if director.is_open() {
            flags |= FLAG_CELEBRATION_OPEN;
        }
        if director.barrage_active() {
            flags |= FLAG_BARRAGE_ACTIVE;
        }
        if director.hint_visible() {
            flags |= FLAG_HINT_VISIBLE;
        }
        let surface = self.ctx.surface();
        let parallax = self.ctx.parallax();
        let header = FrameHeader {
            frame_counter: self.frame_counter,
            vertex_count: self.vectors.vertex_count(),
            batch_count: self.batch_count() as usize,
            event_count: self.wire_events.len(),
            surface_width: surface.width,
            surface_height: surface.height,
            parallax_x: parallax.x,
            parallax_y: parallax.y,
            wind: self.ctx.wind().value(),
            sim_time: self.ctx.now() as f32,
            flags,
        };
        header.write(&self.layout, &mut self.header);
    }

    // ---- Pointer accessors for shared buffer reads ----

    pub fn header_ptr(&self) -> *const f32 {
        self.header.as_ptr()
    }

    pub fn vertices_ptr(&self) -> *const f32 {
        self.vectors.buffer_ptr()
    }

    pub fn vertex_count(&self) -> u32 {
        self.vectors.vertex_count().min(self.layout.max_vertices) as u32
    }

    pub fn batches_ptr(&self) -> *const f32 {
        self.wire_batches.as_ptr()
    }

    pub fn batch_count(&self) -> u32 {
        (self.wire_batches.len() / BlendBatch::FLOATS) as u32
    }

    pub fn events_ptr(&self) -> *const f32 {
        self.wire_events.as_ptr() as *const f32
    }

    pub fn events_len(&self) -> u32 {
        self.wire_events.len() as u32
    }

    pub fn buffer_total_floats(&self) -> u32 {
        self.layout.buffer_total_floats as u32
    }

    pub fn context(&self) -> &SimContext {
        &self.ctx
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bloom_engine::bridge::protocol::{
        HEADER_BATCH_COUNT, HEADER_EVENT_COUNT, HEADER_FLAGS, HEADER_VERTEX_COUNT,
    };
    use bloom_engine::{ButtonIntent, SimEvent};

    fn runner() -> SimRunner {
        let mut r = SimRunner::new(SimConfig::default(), 640.0, 480.0);
        r.init();
        r
    }

    #[test]
    fn first_frame_reports_hint() {
        let mut r = runner();
        r.frame(0.0);
        assert_eq!(r.events_len(), 1);
        assert_eq!(r.wire_events[0].kind, SimEvent::HintShown.kind() as f32);
        assert_eq!(r.header[HEADER_EVENT_COUNT], 1.0);
        assert_eq!(r.header[HEADER_FLAGS], FLAG_HINT_VISIBLE as f32);
        assert!(r.vertex_count() > 0);
        assert_eq!(r.header[HEADER_VERTEX_COUNT], r.vertex_count() as f32);
    }

    #[test]
    fn celebrate_sets_flags() {
        let mut r = runner();
        r.frame(0.0);
        r.push_input(InputEvent::Button(ButtonIntent::Celebrate));
        r.frame(16.0);
        let flags = r.header[HEADER_FLAGS] as u32;
        assert_ne!(flags & FLAG_CELEBRATION_OPEN, 0);
        assert_ne!(flags & FLAG_BARRAGE_ACTIVE, 0);
        assert!(r.batch_count() >= 2);
    }

    fn seeded(layout: ProtocolLayout) -> SimRunner {
        let ctx = SimContext::with_seed(SimConfig::default(), Surface::new(640.0, 480.0), 9);
        let mut r = SimRunner::from_context(ctx, layout);
        r.init();
        r.push_input(InputEvent::Button(ButtonIntent::Celebrate));
        r.frame(0.0);
        r
    }

    #[test]
    fn overflowing_frame_is_clamped_to_layout() {
        let full = seeded(ProtocolLayout::default());
        let batches = full.vectors.batches().to_vec();
        assert!(batches.len() > 2, "need several batches, got {}", batches.len());
        assert_eq!(full.batch_count() as usize, batches.len());
        // Cap vertices one past the start of the second batch.
        let cap = batches[1].start as usize + 1;

        let r = seeded(ProtocolLayout::new(cap, 1, 4));
        assert_eq!(r.batch_count(), 1);
        assert_eq!(r.header[HEADER_BATCH_COUNT], 1.0);
        assert_eq!(r.vertex_count() as usize, cap);
        assert_eq!(r.header[HEADER_VERTEX_COUNT], cap as f32);
        assert_eq!(r.wire_batches[2], batches[0].end as f32);

        let r = seeded(ProtocolLayout::new(cap, 512, 4));
        assert_eq!(r.batch_count(), 2);
        assert_eq!(r.wire_batches[4], batches[1].start as f32);
        assert_eq!(r.wire_batches[5], cap as f32);
        let last_end = r.wire_batches[r.wire_batches.len() - 1];
        assert!(last_end <= r.header[HEADER_VERTEX_COUNT]);
    }

    #[test]
    fn frames_run_without_input() {
        let mut r = runner();
        for i in 0..240 {
            r.frame(i as f64 * 16.6);
        }
        assert_eq!(r.frame_counter, 240);
        assert!(r.context().now() > 3.0);
    }
}
