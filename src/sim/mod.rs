mod daily;
mod generator;

pub use generator::{SensorSimulator, SensorValues};

/// Inclusive numeric range with a default value, mirroring a physical
/// sensor's calibrated span.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ValueRange {
    pub min: f64,
    pub max: f64,
    pub default: f64,
}

impl ValueRange {
    pub const fn new(min: f64, max: f64, default: f64) -> Self {
        Self { min, max, default }
    }

    pub fn clamp(&self, value: f64) -> f64 {
        value.clamp(self.min, self.max)
    }
}

/// Per-sensor ranges for one station.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SensorBounds {
    pub temperature: ValueRange,
    pub soil_moisture: ValueRange,
    pub humidity: ValueRange,
    pub rainfall: ValueRange,
    pub wind_speed: ValueRange,
    pub light_intensity: ValueRange,
}

impl SensorBounds {
    /// Calibrated spans of the station's sensors; manually supplied
    /// values are clamped into these.
    pub const fn station() -> Self {
        Self {
            temperature: ValueRange::new(5.0, 40.0, 24.0),
            soil_moisture: ValueRange::new(5.0, 95.0, 42.0),
            humidity: ValueRange::new(20.0, 95.0, 65.0),
            rainfall: ValueRange::new(0.0, 50.0, 0.0),
            wind_speed: ValueRange::new(0.0, 30.0, 12.0),
            light_intensity: ValueRange::new(0.0, 15000.0, 8500.0),
        }
    }

    /// Narrower spans used when drawing randomized readings, so that
    /// generated weather stays plausible rather than merely in-range.
    pub const fn randomize() -> Self {
        Self {
            temperature: ValueRange::new(15.0, 35.0, 24.0),
            soil_moisture: ValueRange::new(20.0, 80.0, 42.0),
            humidity: ValueRange::new(40.0, 80.0, 65.0),
            rainfall: ValueRange::new(0.0, 15.0, 0.0),
            wind_speed: ValueRange::new(0.0, 20.0, 12.0),
            light_intensity: ValueRange::new(2000.0, 12000.0, 8500.0),
        }
    }
}

impl Default for SensorBounds {
    fn default() -> Self {
        Self::station()
    }
}
