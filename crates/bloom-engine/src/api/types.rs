use bytemuck::{Pod, Zeroable};

/// Notification from the simulation to the host page (overlay, hint).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SimEvent {
    CelebrationOpened,
    CelebrationClosed,
    BarrageStarted,
    BarrageEnded,
    HintShown,
    HintHidden,
}

impl SimEvent {
    /// Stable numeric id used on the wire.
    pub fn kind(self) -> u32 {
        match self {
            SimEvent::CelebrationOpened => 1,
            SimEvent::CelebrationClosed => 2,
            SimEvent::BarrageStarted => 3,
            SimEvent::BarrageEnded => 4,
            SimEvent::HintShown => 5,
            SimEvent::HintHidden => 6,
        }
    }

    /// Pack for the shared buffer. `time` is simulation time in seconds.
    pub fn to_wire(self, time: f64) -> WireEvent {
        WireEvent {
            kind: self.kind() as f32,
            time: time as f32,
            a: 0.0,
            b: 0.0,
        }
    }
}

/// An event laid out for the host: `kind, time, a, b`.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Pod, Zeroable)]
pub struct WireEvent {
    pub kind: f32,
    pub time: f32,
    pub a: f32,
    pub b: f32,
}

impl WireEvent {
    pub const FLOATS: usize = 4;
}

/// Discrete button intents from the host UI.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ButtonIntent {
    Bouquet,
    Clear,
    Celebrate,
}

impl ButtonIntent {
    /// Decode a host-side button id. Unknown ids yield `None`.
    pub fn from_code(code: u32) -> Option<Self> {
        match code {
            0 => Some(ButtonIntent::Bouquet),
            1 => Some(ButtonIntent::Clear),
            2 => Some(ButtonIntent::Celebrate),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wire_event_is_four_floats() {
        assert_eq!(std::mem::size_of::<WireEvent>(), WireEvent::FLOATS * 4);
        let w = SimEvent::CelebrationClosed.to_wire(12.5);
        assert_eq!(w.kind, 2.0);
        assert_eq!(w.time, 12.5);
    }

    #[test]
    fn button_codes() {
        assert_eq!(ButtonIntent::from_code(2), Some(ButtonIntent::Celebrate));
        assert_eq!(ButtonIntent::from_code(9), None);
    }
}
