//! `#[wasm_bindgen]` exports for the bloom simulation.
//!
//! wasm-bindgen cannot export a struct holding the whole engine by value,
//! so a single `SimRunner` lives in thread-local storage and every export
//! goes through `with_runner`.

pub mod runner;

use std::cell::RefCell;

use bloom_engine::{ButtonIntent, InputEvent, SimConfig};
use wasm_bindgen::prelude::*;

pub use runner::SimRunner;

thread_local! {
    static RUNNER: RefCell<Option<SimRunner>> = RefCell::new(None);
}

fn with_runner<R>(f: impl FnOnce(&mut SimRunner) -> R) -> R {
    RUNNER.with(|cell| {
        let mut borrow = cell.borrow_mut();
        let runner = borrow
            .as_mut()
            .expect("Simulation not initialized. Call sim_init() first.");
        f(runner)
    })
}

/// Build the simulation for a `width` x `height` surface.
///
/// `config_json` may be empty. A document that fails to parse is logged
/// and the defaults are used instead.
#[wasm_bindgen]
pub fn sim_init(width: f32, height: f32, reduced_motion: bool, config_json: &str) {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Info);

    let config = if config_json.trim().is_empty() {
        SimConfig::default()
    } else {
        SimConfig::from_json(config_json).unwrap_or_else(|e| {
            log::warn!("invalid sim config, using defaults: {}", e);
            SimConfig::default()
        })
    };
    let config = config.with_reduced_motion(reduced_motion);

    let mut runner = SimRunner::new(config, width, height);
    runner.init();
    RUNNER.with(|cell| {
        *cell.borrow_mut() = Some(runner);
    });
    log::info!("bloom: initialized");
}

/// Advance to the `requestAnimationFrame` timestamp (milliseconds).
#[wasm_bindgen]
pub fn sim_frame(now_ms: f64) {
    with_runner(|r| r.frame(now_ms));
}

#[wasm_bindgen]
pub fn sim_resize(width: f32, height: f32) {
    with_runner(|r| r.resize(width, height));
}

// ---- Input ----

#[wasm_bindgen]
pub fn sim_pointer_down(id: u32, x: f32, y: f32) {
    with_runner(|r| r.push_input(InputEvent::PointerDown { id, x, y }));
}

#[wasm_bindgen]
pub fn sim_pointer_move(id: u32, x: f32, y: f32) {
    with_runner(|r| r.push_input(InputEvent::PointerMove { id, x, y }));
}

#[wasm_bindgen]
pub fn sim_pointer_up(id: u32, x: f32, y: f32) {
    with_runner(|r| r.push_input(InputEvent::PointerUp { id, x, y }));
}

#[wasm_bindgen]
pub fn sim_pointer_cancel(id: u32, x: f32, y: f32) {
    with_runner(|r| r.push_input(InputEvent::PointerCancel { id, x, y }));
}

#[wasm_bindgen]
pub fn sim_hover(x: f32, y: f32) {
    with_runner(|r| r.push_input(InputEvent::HoverMove { x, y }));
}

/// Host button: 0 = bouquet, 1 = clear, 2 = celebrate. Other codes are ignored.
#[wasm_bindgen]
pub fn sim_button(code: u32) {
    match ButtonIntent::from_code(code) {
        Some(intent) => with_runner(|r| r.push_input(InputEvent::Button(intent))),
        None => log::warn!("unknown button code {}", code),
    }
}

#[wasm_bindgen]
pub fn sim_key_down(key_code: u32) {
    with_runner(|r| r.push_input(InputEvent::KeyDown { key_code }));
}

#[wasm_bindgen]
pub fn sim_dismiss_overlay() {
    with_runner(|r| r.push_input(InputEvent::DismissOverlay));
}

// ---- Data accessors ----

#[wasm_bindgen]
pub fn get_header_ptr() -> *const f32 {
    with_runner(|r| r.header_ptr())
}

#[wasm_bindgen]
pub fn get_vertices_ptr() -> *const f32 {
    with_runner(|r| r.vertices_ptr())
}

#[wasm_bindgen]
pub fn get_vertex_count() -> u32 {
    with_runner(|r| r.vertex_count())
}

#[wasm_bindgen]
pub fn get_batches_ptr() -> *const f32 {
    with_runner(|r| r.batches_ptr())
}

#[wasm_bindgen]
pub fn get_batch_count() -> u32 {
    with_runner(|r| r.batch_count())
}

#[wasm_bindgen]
pub fn get_events_ptr() -> *const f32 {
    with_runner(|r| r.events_ptr())
}

#[wasm_bindgen]
pub fn get_events_len() -> u32 {
    with_runner(|r| r.events_len())
}

#[wasm_bindgen]
pub fn get_buffer_total_floats() -> u32 {
    with_runner(|r| r.buffer_total_floats())
}
