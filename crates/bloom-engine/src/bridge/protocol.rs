/// Shared buffer layout read by the host page.
/// Must stay in sync with the page's `protocol.ts`.
///
/// Layout (all values in f32 / 4 bytes):
/// ```text
/// [Header: 16 floats]
/// [Vector vertices: max_vertices × 6 floats]
/// [Blend batches: max_batches × 3 floats]
/// [Events: max_events × 4 floats]
/// ```
///
/// Capacities are written into the header every frame, so the host can
/// compute section offsets without hard-coding them.

/// Number of floats in the header section.
pub const HEADER_FLOATS: usize = 16;

/// Header field indices.
pub const HEADER_LOCK: usize = 0;
pub const HEADER_FRAME_COUNTER: usize = 1;
pub const HEADER_MAX_VERTICES: usize = 2;
pub const HEADER_VERTEX_COUNT: usize = 3;
pub const HEADER_MAX_BATCHES: usize = 4;
pub const HEADER_BATCH_COUNT: usize = 5;
pub const HEADER_MAX_EVENTS: usize = 6;
pub const HEADER_EVENT_COUNT: usize = 7;
pub const HEADER_SURFACE_WIDTH: usize = 8;
pub const HEADER_SURFACE_HEIGHT: usize = 9;
pub const HEADER_PARALLAX_X: usize = 10;
pub const HEADER_PARALLAX_Y: usize = 11;
pub const HEADER_WIND: usize = 12;
pub const HEADER_SIM_TIME: usize = 13;
pub const HEADER_FLAGS: usize = 14;
pub const HEADER_PROTOCOL_VERSION: usize = 15;

/// Bits of `HEADER_FLAGS`.
pub const FLAG_CELEBRATION_OPEN: u32 = 1 << 0;
pub const FLAG_BARRAGE_ACTIVE: u32 = 1 << 1;
pub const FLAG_HINT_VISIBLE: u32 = 1 << 2;

/// Floats per vector vertex: x, y, r, g, b, a (wire format, never changes).
pub const VERTEX_FLOATS: usize = 6;

/// Floats per blend batch: blend, start, end (wire format, never changes).
pub const BATCH_FLOATS: usize = 3;

/// Floats per event: kind, time, a, b (wire format, never changes).
pub const EVENT_FLOATS: usize = 4;

/// Protocol version written into the header.
pub const PROTOCOL_VERSION: f32 = 1.0;

pub const DEFAULT_MAX_VERTICES: usize = 131_072;
pub const DEFAULT_MAX_BATCHES: usize = 512;
pub const DEFAULT_MAX_EVENTS: usize = 32;

/// Runtime-computed buffer layout.
#[derive(Debug, Clone, PartialEq)]
pub struct ProtocolLayout {
    pub max_vertices: usize,
    pub max_batches: usize,
    pub max_events: usize,

    pub vertex_data_offset: usize,
    pub batch_data_offset: usize,
    pub event_data_offset: usize,

    /// Total buffer size in floats.
    pub buffer_total_floats: usize,
    /// Total buffer size in bytes.
    pub buffer_total_bytes: usize,
}

impl ProtocolLayout {
    pub fn new(max_vertices: usize, max_batches: usize, max_events: usize) -> Self {
        let vertex_data_offset = HEADER_FLOATS;
        let batch_data_offset = vertex_data_offset + max_vertices * VERTEX_FLOATS;
        let event_data_offset = batch_data_offset + max_batches * BATCH_FLOATS;
        let buffer_total_floats = event_data_offset + max_events * EVENT_FLOATS;

        Self {
            max_vertices,
            max_batches,
            max_events,
            vertex_data_offset,
            batch_data_offset,
            event_data_offset,
            buffer_total_floats,
            buffer_total_bytes: buffer_total_floats * 4,
        }
    }
}

impl Default for ProtocolLayout {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_VERTICES, DEFAULT_MAX_BATCHES, DEFAULT_MAX_EVENTS)
    }
}

/// Per-frame values written into the header section.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct FrameHeader {
    pub frame_counter: u32,
    pub vertex_count: usize,
    pub batch_count: usize,
    pub event_count: usize,
    pub surface_width: f32,
    pub surface_height: f32,
    pub parallax_x: f32,
    pub parallax_y: f32,
    pub wind: f32,
    pub sim_time: f32,
    pub flags: u32,
}

impl FrameHeader {
    /// Serialize into the header floats. Counts are clamped to capacity.
    pub fn write(&self, layout: &ProtocolLayout, out: &mut [f32; HEADER_FLOATS]) {
        out[HEADER_LOCK] = 0.0;
        out[HEADER_FRAME_COUNTER] = self.frame_counter as f32;
        out[HEADER_MAX_VERTICES] = layout.max_vertices as f32;
        out[HEADER_VERTEX_COUNT] = self.vertex_count.min(layout.max_vertices) as f32;
        out[HEADER_MAX_BATCHES] = layout.max_batches as f32;
        out[HEADER_BATCH_COUNT] = self.batch_count.min(layout.max_batches) as f32;
        out[HEADER_MAX_EVENTS] = layout.max_events as f32;
        out[HEADER_EVENT_COUNT] = self.event_count.min(layout.max_events) as f32;
        out[HEADER_SURFACE_WIDTH] = self.surface_width;
        out[HEADER_SURFACE_HEIGHT] = self.surface_height;
        out[HEADER_PARALLAX_X] = self.parallax_x;
        out[HEADER_PARALLAX_Y] = self.parallax_y;
        out[HEADER_WIND] = self.wind;
        out[HEADER_SIM_TIME] = self.sim_time;
        out[HEADER_FLAGS] = self.flags as f32;
        out[HEADER_PROTOCOL_VERSION] = PROTOCOL_VERSION;
    }
}
