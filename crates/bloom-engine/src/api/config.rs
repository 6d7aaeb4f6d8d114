use serde::{Deserialize, Serialize};

use crate::core::time::DEFAULT_MAX_DT;
use crate::core::wind::WindConfig;

/// A value with separate full-motion and reduced-motion settings.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MotionScaled<T> {
    pub full: T,
    pub reduced: T,
}

impl<T: Copy> MotionScaled<T> {
    pub const fn new(full: T, reduced: T) -> Self {
        Self { full, reduced }
    }

    pub fn pick(&self, reduced_motion: bool) -> T {
        if reduced_motion {
            self.reduced
        } else {
            self.full
        }
    }
}

/// A quantity proportional to surface area, clamped into `[min, max]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DensityBand {
    /// Surface area (px²) that yields one unit.
    pub area_per_unit: f32,
    pub min: f32,
    pub max: f32,
}

impl DensityBand {
    pub fn value(&self, area: f32) -> f32 {
        (area / self.area_per_unit.max(1.0)).clamp(self.min, self.max)
    }
}

/// Pointer gesture thresholds.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GestureConfig {
    /// Max travel (px) between press and release for a tap.
    pub tap_slop: f32,
    /// Max time (s) between two presses for a double tap.
    pub double_tap_window: f64,
    /// Max distance (px) between two presses for a double tap.
    pub double_tap_radius: f32,
}

impl Default for GestureConfig {
    fn default() -> Self {
        Self {
            tap_slop: 12.0,
            double_tap_window: 0.32,
            double_tap_radius: 42.0,
        }
    }
}

/// Celebration overlay timing.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CelebrationConfig {
    pub duration: f64,
    pub first_pulse_delay: f64,
    pub pulse_interval: MotionScaled<f64>,
}

impl Default for CelebrationConfig {
    fn default() -> Self {
        Self {
            duration: 10.0,
            first_pulse_delay: 0.25,
            pulse_interval: MotionScaled::new(0.65, 1.2),
        }
    }
}

/// Firework barrage timing.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BarrageConfig {
    pub duration: MotionScaled<f64>,
    /// Rockets per second.
    pub rate: MotionScaled<f32>,
}

impl Default for BarrageConfig {
    fn default() -> Self {
        Self {
            duration: MotionScaled::new(6.0, 2.8),
            rate: MotionScaled::new(1.35, 0.55),
        }
    }
}

/// Spawn counts for every burst-style operation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PopulationConfig {
    /// Sparks that accompany each new bloom.
    pub bloom_sparks: usize,
    pub heart_burst: MotionScaled<usize>,
    pub pulse_hearts: MotionScaled<usize>,
    pub firework_sparks: MotionScaled<usize>,
    /// Every n-th firework spark also throws a heart (full motion only).
    pub firework_heart_every: usize,
    pub bouquet_blooms: MotionScaled<usize>,
    /// Hearts scattered over the surface after a clear.
    pub clear_hearts: usize,
    /// Ambient heart spawn rate per reference frame.
    pub ambient_hearts: DensityBand,
    pub bokeh: DensityBand,
    /// Frame rate the ambient rate is expressed against.
    pub frame_reference_rate: f32,
}

impl Default for PopulationConfig {
    fn default() -> Self {
        Self {
            bloom_sparks: 8,
            heart_burst: MotionScaled::new(20, 10),
            pulse_hearts: MotionScaled::new(10, 6),
            firework_sparks: MotionScaled::new(90, 40),
            firework_heart_every: 9,
            bouquet_blooms: MotionScaled::new(10, 6),
            clear_hearts: 18,
            ambient_hearts: DensityBand {
                area_per_unit: 7_000_000.0,
                min: 0.05,
                max: 0.22,
            },
            bokeh: DensityBand {
                area_per_unit: 42_000.0,
                min: 10.0,
                max: 32.0,
            },
            frame_reference_rate: 60.0,
        }
    }
}

/// Simulation configuration. Every field has a default, so a partial JSON
/// document overrides only what it names.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    /// Sampled once at start-up. Scales down counts and cadence.
    pub reduced_motion: bool,
    /// Upper clamp for a single step (seconds).
    pub max_dt: f32,
    /// How long the usage hint stays visible (seconds).
    pub hint_duration: f64,
    pub wind: WindConfig,
    pub gesture: GestureConfig,
    pub celebration: CelebrationConfig,
    pub barrage: BarrageConfig,
    pub population: PopulationConfig,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            reduced_motion: false,
            max_dt: DEFAULT_MAX_DT,
            hint_duration: 3.2,
            wind: WindConfig::default(),
            gesture: GestureConfig::default(),
            celebration: CelebrationConfig::default(),
            barrage: BarrageConfig::default(),
            population: PopulationConfig::default(),
        }
    }
}

impl SimConfig {
    /// Parse a configuration from a JSON string.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    pub fn with_reduced_motion(mut self, reduced: bool) -> Self {
        self.reduced_motion = reduced;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_json_yields_defaults() {
        let config = SimConfig::from_json("{}").unwrap();
        assert_eq!(config, SimConfig::default());
    }

    #[test]
    fn partial_override() {
        let json = r#"{
            "reduced_motion": true,
            "celebration": { "duration": 4.0 },
            "population": { "heart_burst": { "full": 30, "reduced": 12 } }
        }"#;
        let config = SimConfig::from_json(json).unwrap();
        assert!(config.reduced_motion);
        assert_eq!(config.celebration.duration, 4.0);
        assert_eq!(config.celebration.first_pulse_delay, 0.25);
        assert_eq!(config.population.heart_burst.pick(true), 12);
        assert_eq!(config.population.firework_sparks.pick(false), 90);
    }

    #[test]
    fn invalid_json_is_an_error() {
        assert!(SimConfig::from_json("{ reduced_motion: ").is_err());
    }

    #[test]
    fn motion_scaled_pick() {
        let m = MotionScaled::new(1.35, 0.55);
        assert_eq!(m.pick(false), 1.35);
        assert_eq!(m.pick(true), 0.55);
    }

    #[test]
    fn density_band_clamps() {
        let band = PopulationConfig::default().bokeh;
        assert_eq!(band.value(0.0), 10.0);
        assert_eq!(band.value(42_000.0 * 20.0), 20.0);
        assert_eq!(band.value(f32::MAX), 32.0);
    }
}
