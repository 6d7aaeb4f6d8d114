use crate::api::types::ButtonIntent;

/// Key code the host sends for Escape.
pub const KEY_ESCAPE: u32 = 27;

/// Input events the simulation understands.
/// Coordinates are surface-relative pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    /// A touch/click began.
    PointerDown { id: u32, x: f32, y: f32 },
    /// A pressed or hovering pointer moved.
    PointerMove { id: u32, x: f32, y: f32 },
    /// A touch/click ended.
    PointerUp { id: u32, x: f32, y: f32 },
    /// The platform took the pointer away (scroll, system gesture).
    PointerCancel { id: u32, x: f32, y: f32 },
    /// Mouse movement with no button pressed.
    HoverMove { x: f32, y: f32 },
    /// One of the host UI buttons.
    Button(ButtonIntent),
    /// A key was pressed.
    KeyDown { key_code: u32 },
    /// The host's celebration overlay was dismissed by the user.
    DismissOverlay,
}

/// A queue of input events.
/// The host pushes events between frames; the step drains them.
pub struct InputQueue {
    events: Vec<InputEvent>,
}

impl InputQueue {
    pub fn new() -> Self {
        Self {
            events: Vec::with_capacity(32),
        }
    }

    pub fn push(&mut self, event: InputEvent) {
        self.events.push(event);
    }

    /// Drain all pending events in arrival order.
    pub fn drain(&mut self) -> Vec<InputEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }
}

impl Default for InputQueue {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn push_and_drain_in_order() {
        let mut q = InputQueue::new();
        q.push(InputEvent::PointerDown { id: 1, x: 10.0, y: 20.0 });
        q.push(InputEvent::KeyDown { key_code: KEY_ESCAPE });
        q.push(InputEvent::Button(ButtonIntent::Clear));
        assert_eq!(q.len(), 3);
        let events = q.drain();
        assert!(q.is_empty());
        assert_eq!(events[0], InputEvent::PointerDown { id: 1, x: 10.0, y: 20.0 });
        assert_eq!(events[2], InputEvent::Button(ButtonIntent::Clear));
    }
}
