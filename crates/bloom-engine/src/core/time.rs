/// Upper bound on a single simulation step, in seconds.
/// Long gaps (tab suspension, debugger pauses) collapse to one short step.
pub const DEFAULT_MAX_DT: f32 = 0.033;

/// Frame clock.
/// Converts a monotonically increasing raw timestamp stream into clamped
/// per-step deltas and accumulates simulation time from them.
#[derive(Debug, Clone)]
pub struct Clock {
    /// Last raw sample in seconds, `None` until the first tick.
    last_raw: Option<f64>,
    /// Simulation time: the sum of every delivered `dt`.
    t: f64,
    max_dt: f32,
}

impl Clock {
    pub fn new(max_dt: f32) -> Self {
        Self {
            last_raw: None,
            t: 0.0,
            max_dt: max_dt.max(0.0),
        }
    }

    /// Sample the raw timestamp (seconds). Returns the step delta.
    ///
    /// The first call yields 0. Later calls yield the elapsed raw time
    /// clamped to `[0, max_dt]`, so clock skew never produces negative time.
    /// A non-finite sample is a zero-length step and is not recorded.
    pub fn tick(&mut self, raw_seconds: f64) -> f32 {
        if !raw_seconds.is_finite() {
            return 0.0;
        }
        let dt = match self.last_raw {
            None => 0.0,
            Some(last) => ((raw_seconds - last) as f32).clamp(0.0, self.max_dt),
        };
        self.last_raw = Some(raw_seconds);
        self.t += dt as f64;
        dt
    }

    /// Current simulation time in seconds.
    pub fn now(&self) -> f64 {
        self.t
    }

    /// Last raw timestamp in seconds (0 before the first tick).
    /// Gesture timing uses wall time; simulation timers use `now()`.
    pub fn wall(&self) -> f64 {
        self.last_raw.unwrap_or(0.0)
    }

    pub fn max_dt(&self) -> f32 {
        self.max_dt
    }
}

impl Default for Clock {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_DT)
    }
}
