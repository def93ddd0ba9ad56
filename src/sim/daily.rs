use super::SensorSimulator;
use crate::models::SensorReading;
use chrono::{Duration, Timelike, Utc};
use rand::Rng;
use std::f64::consts::PI;

impl SensorSimulator {
    /// Generate an hourly daily-cycle series ending now, ordered oldest
    /// to newest. Moisture dips through the afternoon as evaporation
    /// outpaces uptake, temperature peaks mid-afternoon, and light
    /// follows a daylight curve that is zero overnight.
    pub fn daily_history(&mut self, points: usize, location: &str) -> Vec<SensorReading> {
        let now = Utc::now();
        let mut readings = Vec::with_capacity(points);

        for i in 0..points {
            let hours_ago = (points - 1 - i) as i64;
            let timestamp = now - Duration::hours(hours_ago);
            let hour = timestamp.hour() as f64;

            let moisture_jitter = self.rng().gen_range(-7.5..=7.5);
            let moisture =
                (60.0 + moisture_jitter - 5.0 * ((hour - 6.0) * PI / 12.0).sin()).clamp(30.0, 95.0);

            let temp_jitter = self.rng().gen_range(-2.0..=2.0);
            let temperature =
                (22.0 + temp_jitter + 6.0 * ((hour - 2.0) * PI / 12.0).sin()).clamp(15.0, 35.0);

            let light = if (6.0..=18.0).contains(&hour) {
                10000.0 * ((hour - 6.0) * PI / 12.0).sin()
            } else {
                0.0
            };

            readings.push(
                SensorReading::new(location)
                    .with_timestamp(timestamp)
                    .with_temperature(temperature)
                    .with_soil_moisture(moisture)
                    .with_humidity(self.rng().gen_range(60.0..=80.0))
                    .with_rainfall(0.0)
                    .with_wind_speed(self.rng().gen_range(5.0..=15.0))
                    .with_light_intensity(light),
            );
        }

        readings
    }
}
