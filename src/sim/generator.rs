use super::{SensorBounds, ValueRange};
use crate::models::SensorReading;
use chrono::Utc;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Caller-supplied sensor values for a manual reading. Fields left as
/// `None` fall back to the sensor's default.
#[derive(Debug, Clone, Copy, Default)]
pub struct SensorValues {
    pub temperature: Option<f64>,
    pub soil_moisture: Option<f64>,
    pub humidity: Option<f64>,
    pub rainfall: Option<f64>,
    pub wind_speed: Option<f64>,
    pub light_intensity: Option<f64>,
}

/// Generates sensor readings in place of field hardware: randomized
/// within plausible weather spans, or from manual values clamped to the
/// station's calibrated bounds.
pub struct SensorSimulator {
    rng: StdRng,
    bounds: SensorBounds,
}

impl SensorSimulator {
    pub fn new() -> Self {
        Self {
            rng: StdRng::from_entropy(),
            bounds: SensorBounds::station(),
        }
    }

    /// Reproducible simulator for a fixed seed.
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
            bounds: SensorBounds::station(),
        }
    }

    pub(super) fn rng(&mut self) -> &mut StdRng {
        &mut self.rng
    }

    fn draw(&mut self, range: ValueRange) -> f64 {
        self.rng.gen_range(range.min..=range.max)
    }

    /// Draw a fully randomized reading, stamped with the current time.
    pub fn random_reading(&mut self, location: &str) -> SensorReading {
        let spans = SensorBounds::randomize();
        SensorReading {
            timestamp: Utc::now(),
            temperature: self.draw(spans.temperature),
            soil_moisture: self.draw(spans.soil_moisture),
            humidity: self.draw(spans.humidity),
            rainfall: self.draw(spans.rainfall),
            wind_speed: self.draw(spans.wind_speed),
            light_intensity: self.draw(spans.light_intensity),
            location: location.to_string(),
        }
    }

    /// Build a reading from manual values, clamping each into the
    /// station's calibrated span and defaulting unset fields.
    pub fn manual_reading(&self, values: &SensorValues, location: &str) -> SensorReading {
        let b = &self.bounds;
        SensorReading {
            timestamp: Utc::now(),
            temperature: clamp_or_default(values.temperature, b.temperature),
            soil_moisture: clamp_or_default(values.soil_moisture, b.soil_moisture),
            humidity: clamp_or_default(values.humidity, b.humidity),
            rainfall: clamp_or_default(values.rainfall, b.rainfall),
            wind_speed: clamp_or_default(values.wind_speed, b.wind_speed),
            light_intensity: clamp_or_default(values.light_intensity, b.light_intensity),
            location: location.to_string(),
        }
    }
}

impl Default for SensorSimulator {
    fn default() -> Self {
        Self::new()
    }
}

fn clamp_or_default(value: Option<f64>, range: ValueRange) -> f64 {
    match value {
        Some(v) => range.clamp(v),
        None => range.default,
    }
}
